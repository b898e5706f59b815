//! Validation schema emitter.
//!
//! Emits the base, insert and update schemas of one table and the three
//! inferred types. The type artifact imports these types by name instead of
//! recomputing them.

use super::{module, Imports, ENUMS_MODULE};
use crate::config::CodegenConfig;
use crate::resolved::ResolvedTable;

/// Emit `validation/<singular>.ts`.
pub fn emit(resolved: &ResolvedTable<'_>, config: &CodegenConfig) -> String {
    let names = &resolved.names;
    let fields = &resolved.fields;

    let mut imports = Imports::new();
    imports.add(&config.validation_import, "z");

    let mut body = String::new();

    body.push_str(&format!("export const {} = z.object({{\n", names.base_schema));
    for column in &resolved.columns {
        if let Some(schema) = column.validation.enum_schema() {
            imports.add(ENUMS_MODULE, schema);
        }
        body.push_str(&format!(
            "  {}: {},\n",
            column.property,
            column.validation.render()
        ));
    }
    body.push_str("});\n\n");

    body.push_str(&insert_schema(resolved));
    body.push('\n');

    if fields.primary_key.is_empty() {
        body.push_str(&format!(
            "export const {} = {}.partial();\n",
            names.update_schema, names.insert_schema
        ));
    } else {
        body.push_str(&format!(
            "export const {} = {}.partial().extend({{\n",
            names.update_schema, names.insert_schema
        ));
        for key in &fields.primary_key {
            body.push_str(&format!("  {}: {}.shape.{},\n", key, names.base_schema, key));
        }
        body.push_str("});\n");
    }
    body.push('\n');

    for (type_name, schema) in [
        (&names.select_type, &names.base_schema),
        (&names.insert_type, &names.insert_schema),
        (&names.update_type, &names.update_schema),
    ] {
        body.push_str(&format!(
            "export type {} = z.infer<typeof {}>;\n",
            type_name, schema
        ));
    }

    module(config, &imports, &body)
}

fn insert_schema(resolved: &ResolvedTable<'_>) -> String {
    let names = &resolved.names;
    let fields = &resolved.fields;

    if fields.omitted.is_empty() && fields.widened.is_empty() {
        return format!(
            "export const {} = {};\n",
            names.insert_schema, names.base_schema
        );
    }

    let mut out = format!("export const {} = {}", names.insert_schema, names.base_schema);
    if !fields.omitted.is_empty() {
        let omitted: Vec<String> = fields
            .omitted
            .iter()
            .map(|field| format!("{}: true", field))
            .collect();
        out.push_str(&format!("\n  .omit({{ {} }})", omitted.join(", ")));
    }
    if !fields.widened.is_empty() {
        out.push_str("\n  .extend({\n");
        for field in &fields.widened {
            out.push_str(&format!(
                "    {}: {}.shape.{}.optional(),\n",
                field, names.base_schema, field
            ));
        }
        out.push_str("  })");
    }
    out.push_str(";\n");
    out
}
