//! Seed data emitter.

use schemaforge_core::ColumnType;
use serde_json::Value;

use super::{module, Imports};
use crate::artifact::ArtifactKind;
use crate::config::CodegenConfig;
use crate::literal::{js_string, js_value};
use crate::names::relative_module;
use crate::resolved::{ResolvedColumn, ResolvedTable};

/// Emit `seeds/<singular>.ts`, or nothing when the table has no seed rows.
pub fn emit(resolved: &ResolvedTable<'_>, config: &CodegenConfig) -> Option<String> {
    if resolved.seed.is_empty() {
        return None;
    }
    let names = &resolved.names;

    let mut imports = Imports::new();
    imports.add_type(
        &relative_module(
            config.dir(ArtifactKind::Seed),
            config.dir(ArtifactKind::Validation),
            &names.module,
        ),
        &names.insert_type,
    );

    let mut body = format!(
        "export const {}: {}[] = [\n",
        names.seed_const, names.insert_type
    );
    for row in &resolved.seed {
        let fields: Vec<String> = row
            .iter()
            .map(|&(index, value)| {
                let column = &resolved.columns[index];
                format!("{}: {}", column.property, seed_literal(column, value))
            })
            .collect();
        if fields.is_empty() {
            body.push_str("  {},\n");
        } else {
            body.push_str(&format!("  {{ {} }},\n", fields.join(", ")));
        }
    }
    body.push_str("];\n");

    Some(module(config, &imports, &body))
}

/// Render one seed value the way the column's validation schema accepts it.
fn seed_literal(column: &ResolvedColumn<'_>, value: &Value) -> String {
    match (&column.column.column_type, value) {
        (ColumnType::Decimal, Value::Number(n)) => js_string(&n.to_string()),
        (ColumnType::Date | ColumnType::DateTime, Value::String(s)) => {
            format!("new Date({})", js_string(s))
        }
        _ => js_value(value),
    }
}
