//! Type declaration emitter.
//!
//! Row, insert and update types are re-exported from the validation artifact
//! under the names the resolved table carries. Everything else here (API
//! envelopes, list parameters, relation-aware types) builds on those names.

use schemaforge_core::{Cardinality, OrderDirection};

use super::{module, Imports};
use crate::artifact::ArtifactKind;
use crate::config::CodegenConfig;
use crate::literal::js_string;
use crate::names::{relative_module, TableNames};
use crate::resolved::{ResolvedRelation, ResolvedTable};

/// Emit `types/<singular>.ts`.
pub fn emit(resolved: &ResolvedTable<'_>, config: &CodegenConfig) -> String {
    let names = &resolved.names;
    let mut imports = Imports::new();

    let validation_module = relative_module(
        config.dir(ArtifactKind::Types),
        config.dir(ArtifactKind::Validation),
        &names.module,
    );
    for type_name in [&names.select_type, &names.insert_type, &names.update_type] {
        imports.add_type(&validation_module, type_name);
    }

    let mut body = format!(
        "export type {{ {}, {}, {} }};\n\n",
        names.select_type, names.insert_type, names.update_type
    );

    body.push_str(&envelopes(names));
    body.push_str(&list_params(resolved));

    for relation in resolved.outgoing.iter().chain(&resolved.incoming) {
        if relation.related.table != names.table {
            imports.add_type(
                &format!("./{}", relation.related.module),
                &relation.related.select_type,
            );
        }
    }
    body.push_str(&relation_types(resolved));

    module(config, &imports, &body)
}

fn envelopes(names: &TableNames) -> String {
    let row = &names.select_type;
    let mut out = String::new();

    out.push_str(&format!(
        "export interface {} {{\n  data: {}[];\n  total: number;\n  page: number;\n  pageSize: number;\n  totalPages: number;\n}}\n\n",
        names.list_response(),
        row
    ));
    out.push_str(&format!(
        "export interface {} {{\n  data: {};\n}}\n\n",
        names.response(),
        row
    ));
    out.push_str(&format!(
        "export interface {} {{\n  data: {};\n}}\n\n",
        names.create_request(),
        names.insert_type
    ));
    out.push_str(&format!(
        "export interface {} {{\n  data: {};\n}}\n\n",
        names.update_request(),
        names.update_type
    ));
    out.push_str(&format!(
        "export interface {} {{\n  success: boolean;\n  message?: string;\n}}\n\n",
        names.delete_response()
    ));

    out
}

fn list_params(resolved: &ResolvedTable<'_>) -> String {
    let names = &resolved.names;
    let list = &resolved.list;

    let mut out = format!("export interface {} {{\n", names.list_params());
    out.push_str("  page?: number;\n  pageSize?: number;\n");
    if !list.searchable.is_empty() {
        out.push_str("  search?: string;\n");
    }
    if list.sortable.is_empty() {
        out.push_str(&format!("  sortBy?: keyof {};\n", names.select_type));
    } else {
        let fields: Vec<String> = list.sortable.iter().map(|f| js_string(f)).collect();
        out.push_str(&format!("  sortBy?: {};\n", fields.join(" | ")));
    }
    out.push_str("  sortOrder?: 'asc' | 'desc';\n");

    if !list.filterable.is_empty() {
        out.push_str("  filters?: {\n");
        for &index in &list.filterable {
            let column = &resolved.columns[index];
            out.push_str(&format!(
                "    {}?: {};\n",
                column.property,
                column.surface.base.as_str()
            ));
        }
        out.push_str("  };\n");
    }
    out.push_str("}\n\n");

    if list.default_sort.is_some() || list.page_size.is_some() {
        out.push_str(&format!("export const {} = {{\n", names.list_defaults()));
        if let Some((field, direction)) = &list.default_sort {
            let order = match direction {
                OrderDirection::Asc => "asc",
                OrderDirection::Desc => "desc",
            };
            out.push_str(&format!("  sortBy: {},\n", js_string(field)));
            out.push_str(&format!("  sortOrder: '{}',\n", order));
        }
        if let Some(page_size) = list.page_size {
            out.push_str(&format!("  pageSize: {},\n", page_size));
        }
        out.push_str("} as const;\n\n");
    }

    out
}

fn relation_type(relation: &ResolvedRelation) -> String {
    let related = &relation.related.select_type;
    match relation.cardinality {
        Cardinality::Many => format!("{}[]", related),
        Cardinality::One if relation.nullable => format!("{} | null", related),
        Cardinality::One => related.clone(),
    }
}

fn relation_types(resolved: &ResolvedTable<'_>) -> String {
    let names = &resolved.names;

    if !resolved.has_relations() {
        return format!(
            "export type {} = {};\n",
            names.with_relations(),
            names.select_type
        );
    }

    let mut out = format!(
        "export interface {} extends {} {{\n",
        names.with_relations(),
        names.select_type
    );
    for relation in resolved.outgoing.iter().chain(&resolved.incoming) {
        out.push_str(&format!(
            "  {}?: {};\n",
            relation.property,
            relation_type(relation)
        ));
    }
    out.push_str("}\n");

    for relation in &resolved.outgoing {
        out.push_str(&format!(
            "\nexport interface {} extends {} {{\n  {}: {};\n}}\n",
            names.with_relation(&relation.name),
            names.select_type,
            relation.property,
            relation_type(relation)
        ));
    }

    out
}
