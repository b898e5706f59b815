//! Storage schema emitter (`pgTable` definitions and relation blocks).

use schemaforge_core::RelationKind;

use super::{module, Imports, ENUMS_MODULE};
use crate::config::CodegenConfig;
use crate::literal::js_string;
use crate::names::TableNames;
use crate::resolved::ResolvedTable;

/// Emit `schema/<singular>.ts`.
pub fn emit(resolved: &ResolvedTable<'_>, config: &CodegenConfig) -> String {
    let names = &resolved.names;
    let storage = config.storage_import.as_str();

    let mut imports = Imports::new();
    imports.add(storage, "pgTable");

    let mut body = format!(
        "export const {} = pgTable({}, {{\n",
        names.table_const,
        js_string(&names.table)
    );

    for column in &resolved.columns {
        let constructor = &column.storage.constructor;
        if constructor.is_enum() {
            imports.add(ENUMS_MODULE, constructor.symbol());
        } else {
            imports.add(storage, constructor.symbol());
        }
        if column.storage.is_self_reference() {
            imports.add_type(storage, "AnyPgColumn");
        }
        body.push_str(&format!(
            "  {}: {},\n",
            column.property,
            column.storage.render(&column.column.name)
        ));
    }

    for relation in &resolved.outgoing {
        import_table(&mut imports, names, &relation.related);
    }

    let extras = extra_config(resolved, &mut imports, storage);
    if extras.is_empty() {
        body.push_str("});\n");
    } else {
        body.push_str("}, (table) => ({\n");
        body.push_str(&extras);
        body.push_str("}));\n");
    }

    if !resolved.declarations.is_empty() {
        body.push('\n');
        body.push_str(&relations_block(resolved, &mut imports, config));
    }

    module(config, &imports, &body)
}

fn import_table(imports: &mut Imports, own: &TableNames, related: &TableNames) {
    if related.table != own.table {
        imports.add(&format!("./{}", related.module), &related.table_const);
    }
}

/// Composite key and index entries of the extra-config callback.
fn extra_config(resolved: &ResolvedTable<'_>, imports: &mut Imports, storage: &str) -> String {
    let mut out = String::new();

    if let Some(key) = &resolved.composite_key {
        imports.add(storage, "primaryKey");
        let columns: Vec<String> = key.iter().map(|c| format!("table.{}", c)).collect();
        out.push_str(&format!(
            "  pk: primaryKey({{ columns: [{}] }}),\n",
            columns.join(", ")
        ));
    }

    for index in &resolved.indexes {
        let constructor = if index.unique { "uniqueIndex" } else { "index" };
        imports.add(storage, constructor);
        let columns: Vec<String> = index.columns.iter().map(|c| format!("table.{}", c)).collect();
        out.push_str(&format!(
            "  {}: {}({}).on({}),\n",
            index.property,
            constructor,
            js_string(&index.name),
            columns.join(", ")
        ));
    }

    out
}

/// The `relations(...)` block for declared relationships.
///
/// Many-to-many relationships are written as a comment naming the
/// associative table; they are not expanded into join relations.
fn relations_block(
    resolved: &ResolvedTable<'_>,
    imports: &mut Imports,
    config: &CodegenConfig,
) -> String {
    let names = &resolved.names;
    imports.add(&config.orm_import, "relations");

    let uses = |kind: RelationKind| resolved.declarations.iter().any(|d| d.kind == kind);
    let helpers: Vec<&str> = [
        (RelationKind::OneToOne, "one"),
        (RelationKind::OneToMany, "many"),
    ]
    .into_iter()
    .filter(|(kind, _)| uses(*kind))
    .map(|(_, helper)| helper)
    .collect();
    let params = if helpers.is_empty() {
        "()".to_string()
    } else {
        format!("({{ {} }})", helpers.join(", "))
    };

    let mut out = format!(
        "export const {} = relations({}, {} => ({{\n",
        names.relations_const, names.table_const, params
    );

    for declaration in &resolved.declarations {
        let target = &declaration.target;
        match declaration.kind {
            RelationKind::OneToOne => {
                import_table(imports, names, target);
                match &declaration.link {
                    Some((column, referenced)) => out.push_str(&format!(
                        "  {}: one({}, {{\n    fields: [{}.{}],\n    references: [{}.{}],\n  }}),\n",
                        declaration.property,
                        target.table_const,
                        names.table_const,
                        column,
                        target.table_const,
                        referenced
                    )),
                    None => out.push_str(&format!(
                        "  {}: one({}),\n",
                        declaration.property, target.table_const
                    )),
                }
            }
            RelationKind::OneToMany => {
                import_table(imports, names, target);
                out.push_str(&format!(
                    "  {}: many({}),\n",
                    declaration.property, target.table_const
                ));
            }
            RelationKind::ManyToMany => {
                let through = declaration
                    .through
                    .as_ref()
                    .map(|t| t.table.as_str())
                    .unwrap_or("?");
                out.push_str(&format!(
                    "  // {}: many-to-many with {} through {} (not expanded)\n",
                    declaration.property, target.table, through
                ));
            }
        }
    }

    out.push_str("}));\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schemaforge_core::{
        ColumnDef, ColumnType, DeleteBehavior, EnumDef, ForeignKey, IndexDef, RelationshipDecl,
        SchemaModel, TableDef,
    };

    fn config() -> CodegenConfig {
        CodegenConfig::new().with_header("Generated.")
    }

    fn hotel() -> SchemaModel {
        let guests = TableDef::new("guests")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(ColumnDef::new("tier", ColumnType::Named("guest_tier".into())));
        let rooms = TableDef::new("rooms")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(ColumnDef::new("number", ColumnType::ShortText).with_length(8));
        let booking_rooms = TableDef::new("booking_rooms")
            .with_column(ColumnDef::new("booking_id", ColumnType::Integer).primary_key())
            .with_column(ColumnDef::new("room_id", ColumnType::Integer).primary_key());
        let bookings = TableDef::new("bookings")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(
                ColumnDef::new("guest_id", ColumnType::Integer).references(
                    ForeignKey::new("guests").with_on_delete(DeleteBehavior::Cascade),
                ),
            )
            .with_column(ColumnDef::new("reference", ColumnType::ShortText).with_length(32))
            .with_index(IndexDef {
                name: "bookings_reference_idx".into(),
                columns: vec!["reference".into()],
                unique: true,
            })
            .with_relationship(RelationshipDecl::one_to_one("guest", "guests"))
            .with_relationship(RelationshipDecl::many_to_many(
                "rooms",
                "rooms",
                "booking_rooms",
            ));

        SchemaModel::new()
            .with_enum(EnumDef::new("guest_tier", ["regular", "vip"]))
            .with_table(guests)
            .with_table(rooms)
            .with_table(booking_rooms)
            .with_table(bookings)
    }

    #[test]
    fn test_emit_simple_table() {
        let model = hotel();
        let resolved = ResolvedTable::build(&model.tables[0], &model).unwrap();

        let expected = "\
// Generated.

import { pgTable, serial } from 'drizzle-orm/pg-core';
import { guestTierEnum } from './enums';

export const guests = pgTable('guests', {
  id: serial('id').primaryKey(),
  tier: guestTierEnum('tier').notNull(),
});
";
        assert_eq!(emit(&resolved, &config()), expected);
    }

    #[test]
    fn test_emit_composite_key() {
        let model = hotel();
        let resolved = ResolvedTable::build(&model.tables[2], &model).unwrap();

        let expected = "\
// Generated.

import { integer, pgTable, primaryKey } from 'drizzle-orm/pg-core';

export const bookingRooms = pgTable('booking_rooms', {
  bookingId: integer('booking_id').notNull(),
  roomId: integer('room_id').notNull(),
}, (table) => ({
  pk: primaryKey({ columns: [table.bookingId, table.roomId] }),
}));
";
        assert_eq!(emit(&resolved, &config()), expected);
        assert!(!emit(&resolved, &config()).contains(".primaryKey()"));
    }

    #[test]
    fn test_emit_relations_and_indexes() {
        let model = hotel();
        let resolved = ResolvedTable::build(&model.tables[3], &model).unwrap();

        let expected = "\
// Generated.

import { relations } from 'drizzle-orm';
import { integer, pgTable, serial, uniqueIndex, varchar } from 'drizzle-orm/pg-core';
import { guests } from './guest';

export const bookings = pgTable('bookings', {
  id: serial('id').primaryKey(),
  guestId: integer('guest_id').notNull().references(() => guests.id, { onDelete: 'cascade' }),
  reference: varchar('reference', { length: 32 }).notNull(),
}, (table) => ({
  bookingsReferenceIdx: uniqueIndex('bookings_reference_idx').on(table.reference),
}));

export const bookingsRelations = relations(bookings, ({ one }) => ({
  guest: one(guests, {
    fields: [bookings.guestId],
    references: [guests.id],
  }),
  // rooms: many-to-many with rooms through booking_rooms (not expanded)
}));
";
        assert_eq!(emit(&resolved, &config()), expected);
    }

    #[test]
    fn test_self_reference_imports_column_type() {
        let categories = TableDef::new("categories")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(
                ColumnDef::nullable("parent_id", ColumnType::Integer)
                    .references(ForeignKey::new("categories")),
            );
        let model = SchemaModel::new().with_table(categories);
        let resolved = ResolvedTable::build(&model.tables[0], &model).unwrap();

        let text = emit(&resolved, &config());
        assert!(text.contains("import type { AnyPgColumn } from 'drizzle-orm/pg-core';\n"));
        assert!(!text.contains("from './category'"));
    }
}
