//! Enum artifacts: one per storage, validation and types directory.

use schemaforge_core::naming::humanize;

use super::{module, Imports};
use crate::artifact::ArtifactKind;
use crate::config::CodegenConfig;
use crate::literal::js_string;
use crate::names::relative_module;
use crate::resolved::ResolvedEnum;

/// File stem shared by the three enum artifacts.
pub const ENUMS_STEM: &str = "enums";

fn value_list(resolved: &ResolvedEnum<'_>) -> String {
    let values: Vec<String> = resolved
        .definition
        .value_strings()
        .map(js_string)
        .collect();
    format!("[{}]", values.join(", "))
}

fn description(out: &mut String, resolved: &ResolvedEnum<'_>) {
    if let Some(text) = &resolved.definition.description {
        out.push_str(&format!("/** {} */\n", text.trim()));
    }
}

/// `schema/enums.ts`: one `pgEnum` per enum.
pub fn emit_storage(enums: &[ResolvedEnum<'_>], config: &CodegenConfig) -> String {
    let mut imports = Imports::new();
    let mut body = String::new();

    for resolved in enums {
        imports.add(&config.storage_import, "pgEnum");
        description(&mut body, resolved);
        body.push_str(&format!(
            "export const {} = pgEnum({}, {});\n\n",
            resolved.names.storage_const,
            js_string(&resolved.names.db_name),
            value_list(resolved)
        ));
    }

    finish(config, &imports, body)
}

/// `validation/enums.ts`: one `z.enum` schema and inferred type per enum.
pub fn emit_validation(enums: &[ResolvedEnum<'_>], config: &CodegenConfig) -> String {
    let mut imports = Imports::new();
    let mut body = String::new();

    for resolved in enums {
        let names = &resolved.names;
        imports.add(&config.validation_import, "z");
        description(&mut body, resolved);
        body.push_str(&format!(
            "export const {} = z.enum({});\n",
            names.schema_const,
            value_list(resolved)
        ));
        body.push_str(&format!(
            "export type {} = z.infer<typeof {}>;\n\n",
            names.type_name, names.schema_const
        ));
    }

    finish(config, &imports, body)
}

/// `types/enums.ts`: re-exported enum types and display option lists.
pub fn emit_types(enums: &[ResolvedEnum<'_>], config: &CodegenConfig) -> String {
    let mut imports = Imports::new();
    if enums.is_empty() {
        return finish(config, &imports, String::new());
    }

    let source = relative_module(
        config.dir(ArtifactKind::Types),
        config.dir(ArtifactKind::Validation),
        ENUMS_STEM,
    );
    let type_names: Vec<&str> = enums.iter().map(|e| e.names.type_name.as_str()).collect();
    for name in &type_names {
        imports.add_type(&source, name);
    }

    let mut body = format!("export type {{ {} }};\n\n", type_names.join(", "));
    body.push_str(
        "export interface EnumOption<T extends string> {\n  value: T;\n  label: string;\n  color?: string;\n  icon?: string;\n}\n\n",
    );

    for resolved in enums {
        let names = &resolved.names;
        description(&mut body, resolved);
        body.push_str(&format!(
            "export const {}: EnumOption<{}>[] = [\n",
            names.options_const, names.type_name
        ));
        for value in &resolved.definition.values {
            let label = value.label.clone().unwrap_or_else(|| humanize(&value.value));
            let mut fields = vec![
                format!("value: {}", js_string(&value.value)),
                format!("label: {}", js_string(&label)),
            ];
            if let Some(color) = &value.color {
                fields.push(format!("color: {}", js_string(color)));
            }
            if let Some(icon) = &value.icon {
                fields.push(format!("icon: {}", js_string(icon)));
            }
            body.push_str(&format!("  {{ {} }},\n", fields.join(", ")));
        }
        body.push_str("];\n\n");
    }

    finish(config, &imports, body)
}

fn finish(config: &CodegenConfig, imports: &Imports, body: String) -> String {
    if body.is_empty() {
        return module(config, imports, "export {};");
    }
    module(config, imports, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolved::resolve_enums;
    use pretty_assertions::assert_eq;
    use schemaforge_core::{EnumDef, EnumValue, SchemaModel};

    fn model() -> SchemaModel {
        let mut status = EnumDef::new("user_status", ["active", "on_hold"]);
        status.description = Some("Account lifecycle.".into());
        status.values[0] = EnumValue::new("active").with_label("Active user");
        status.values[0].color = Some("green".into());
        SchemaModel::new()
            .with_enum(status)
            .with_enum(EnumDef::new("room_kind_enum", ["single", "double"]))
    }

    fn config() -> CodegenConfig {
        CodegenConfig::new().with_header("Generated.")
    }

    #[test]
    fn test_emit_storage() {
        let model = model();
        let expected = "\
// Generated.

import { pgEnum } from 'drizzle-orm/pg-core';

/** Account lifecycle. */
export const userStatusEnum = pgEnum('user_status', ['active', 'on_hold']);

export const roomKindEnum = pgEnum('room_kind_enum', ['single', 'double']);
";
        assert_eq!(emit_storage(&resolve_enums(&model), &config()), expected);
    }

    #[test]
    fn test_emit_validation() {
        let model = model();
        let text = emit_validation(&resolve_enums(&model), &config());
        assert!(text.contains("import { z } from 'zod';\n"));
        assert!(text.contains("export const userStatusSchema = z.enum(['active', 'on_hold']);\n"));
        assert!(text.contains("export type RoomKind = z.infer<typeof roomKindSchema>;\n"));
    }

    #[test]
    fn test_emit_types_options() {
        let model = model();
        let text = emit_types(&resolve_enums(&model), &config());

        assert!(text.contains("import type { RoomKind, UserStatus } from '../validation/enums';\n"));
        assert!(text.contains("export type { UserStatus, RoomKind };\n"));
        assert!(text.contains(
            "  { value: 'active', label: 'Active user', color: 'green' },\n"
        ));
        assert!(text.contains("  { value: 'on_hold', label: 'On Hold' },\n"));
        assert!(text.contains("export const roomKindOptions: EnumOption<RoomKind>[] = [\n"));
    }

    #[test]
    fn test_no_enums() {
        let config = config();
        assert_eq!(emit_storage(&[], &config), "// Generated.\n\nexport {};\n");
        assert_eq!(emit_types(&[], &config), "// Generated.\n\nexport {};\n");
    }
}
