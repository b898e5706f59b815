//! Relationship resolution between tables.
//!
//! Relations are derived from foreign keys, never stored: a column with a
//! reference yields an outgoing relation on its own table and an incoming
//! relation on the target table. Incoming relations need no declaration on
//! the target side.

use super::column::{ColumnDef, DeleteBehavior};
use super::table::TableDef;
use crate::error::EmissionError;
use crate::naming::{pluralize, singularize, to_camel_case};

/// Cardinality of a derived relation, seen from the table that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// The relation points at a single row.
    One,
    /// The relation collects many rows.
    Many,
}

/// A relation from a foreign-key column to the row it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRelation {
    /// Relation name (snake_case).
    pub name: String,
    /// Column carrying the foreign key.
    pub column: String,
    /// Referenced table.
    pub target_table: String,
    /// Referenced column.
    pub target_column: String,
    /// Delete policy of the foreign key.
    pub on_delete: DeleteBehavior,
}

impl OutgoingRelation {
    /// Outgoing relations always point at one row.
    pub fn cardinality(&self) -> Cardinality {
        Cardinality::One
    }
}

/// A relation from a referenced table back to the rows referencing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRelation {
    /// Relation name (snake_case), derived from the source table.
    pub name: String,
    /// Table declaring the foreign key.
    pub source_table: String,
    /// Column declaring the foreign key.
    pub source_column: String,
    /// Always [`Cardinality::Many`].
    pub cardinality: Cardinality,
}

/// Name of the relation a foreign-key column introduces.
///
/// `guest_id` becomes `guest`; a column without the `_id` suffix is named
/// after the singular of its target table.
pub fn outgoing_name(column: &ColumnDef) -> Option<String> {
    let reference = column.references.as_ref()?;
    match column.name.strip_suffix("_id") {
        Some(stem) if !stem.is_empty() => Some(stem.to_string()),
        _ => Some(singularize(&reference.table)),
    }
}

/// Resolve the outgoing relations of a table, in column order.
///
/// Relation names never share a property with a column or with an earlier
/// relation: a name equal to its own column becomes `<name>_record`, any
/// other clash becomes `<name>_by_<column>`.
pub fn resolve_outgoing(table: &TableDef) -> Vec<OutgoingRelation> {
    let mut taken = column_properties(table);
    table
        .columns
        .iter()
        .filter_map(|column| {
            let reference = column.references.as_ref()?;
            let preferred = outgoing_name(column)?;
            let qualified = if preferred == column.name {
                format!("{}_record", preferred)
            } else {
                format!("{}_by_{}", preferred, column.name)
            };
            Some(OutgoingRelation {
                name: claim(&mut taken, preferred, qualified),
                column: column.name.clone(),
                target_table: reference.table.clone(),
                target_column: reference.column.clone(),
                on_delete: reference.on_delete,
            })
        })
        .collect()
}

/// Resolve the incoming relations of `table` by scanning every other table.
///
/// Tables are visited in `all_tables` order and columns in column order, so
/// the result is deterministic. The table itself is skipped by identity, so a
/// self-reference never produces an incoming relation even when another
/// table shares its name. Names avoid the table's column properties and its
/// outgoing relations; a clash becomes `<name>_by_<qualifier>`.
pub fn resolve_incoming(table: &TableDef, all_tables: &[TableDef]) -> Vec<IncomingRelation> {
    let mut taken = column_properties(table);
    taken.extend(resolve_outgoing(table).iter().map(|r| to_camel_case(&r.name)));
    let mut relations: Vec<IncomingRelation> = Vec::new();

    for source in all_tables {
        if std::ptr::eq(source, table) {
            continue;
        }

        for column in source.columns_with_references() {
            let Some(reference) = column.references.as_ref() else {
                continue;
            };
            if reference.table != table.name {
                continue;
            }

            let preferred = pluralize(&source.name);
            let qualifier = outgoing_name(column).unwrap_or_else(|| column.name.clone());
            let qualified = format!("{}_by_{}", preferred, qualifier);

            relations.push(IncomingRelation {
                name: claim(&mut taken, preferred, qualified),
                source_table: source.name.clone(),
                source_column: column.name.clone(),
                cardinality: Cardinality::Many,
            });
        }
    }

    relations
}

/// Generated property names of a table's columns.
fn column_properties(table: &TableDef) -> Vec<String> {
    table.columns.iter().map(|c| to_camel_case(&c.name)).collect()
}

/// Take the first free name among `preferred`, `qualified` and numbered
/// variants of `qualified`. Names are compared as generated properties.
fn claim(taken: &mut Vec<String>, preferred: String, qualified: String) -> String {
    let is_free = |taken: &[String], name: &str| !taken.contains(&to_camel_case(name));

    let name = if is_free(taken, &preferred) {
        preferred
    } else if is_free(taken, &qualified) {
        qualified
    } else {
        let mut n = 2;
        loop {
            let candidate = format!("{}_{}", qualified, n);
            if is_free(taken, &candidate) {
                break candidate;
            }
            n += 1;
        }
    };

    taken.push(to_camel_case(&name));
    name
}

/// Check that every foreign key and relationship declaration of `table`
/// points at something in `all_tables`. Errors follow column order, then
/// relationship order.
pub fn check_table_references(table: &TableDef, all_tables: &[TableDef]) -> Vec<EmissionError> {
    let mut errors = Vec::new();

    for column in table.columns_with_references() {
        let Some(reference) = column.references.as_ref() else {
            continue;
        };
        match all_tables.iter().find(|t| t.name == reference.table) {
            None => errors.push(EmissionError::dangling_table(
                &table.name,
                &column.name,
                &reference.table,
            )),
            Some(target) if target.get_column(&reference.column).is_none() => {
                errors.push(EmissionError::dangling_column(
                    &table.name,
                    &column.name,
                    &reference.table,
                    &reference.column,
                ))
            }
            Some(_) => {}
        }
    }

    for relationship in &table.relationships {
        let targets = std::iter::once(&relationship.target).chain(relationship.through.iter());
        for target in targets {
            if !all_tables.iter().any(|t| &t.name == target) {
                errors.push(EmissionError::unknown_relation_target(
                    &table.name,
                    &relationship.name,
                    target,
                ));
            }
        }
    }

    errors
}

/// Check the references of every table, in table order.
pub fn check_references(tables: &[TableDef]) -> Vec<EmissionError> {
    tables
        .iter()
        .flat_map(|table| check_table_references(table, tables))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnType, ForeignKey, RelationshipDecl};
    use crate::error::EmissionErrorKind;

    fn guests() -> TableDef {
        TableDef::new("guests")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(ColumnDef::new("name", ColumnType::ShortText))
    }

    fn bookings() -> TableDef {
        TableDef::new("bookings")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(
                ColumnDef::new("guest_id", ColumnType::Integer).references(
                    ForeignKey::new("guests").with_on_delete(DeleteBehavior::Cascade),
                ),
            )
    }

    #[test]
    fn test_outgoing_relation() {
        let outgoing = resolve_outgoing(&bookings());
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].name, "guest");
        assert_eq!(outgoing[0].column, "guest_id");
        assert_eq!(outgoing[0].target_table, "guests");
        assert_eq!(outgoing[0].target_column, "id");
        assert_eq!(outgoing[0].on_delete, DeleteBehavior::Cascade);
        assert_eq!(outgoing[0].cardinality(), Cardinality::One);
    }

    #[test]
    fn test_outgoing_name_without_id_suffix() {
        let column =
            ColumnDef::new("owner", ColumnType::Integer).references(ForeignKey::new("users"));
        assert_eq!(outgoing_name(&column), Some("user".to_string()));
    }

    #[test]
    fn test_incoming_is_inferred_from_foreign_keys() {
        let tables = vec![guests(), bookings()];
        let incoming = resolve_incoming(&tables[0], &tables);

        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].name, "bookings");
        assert_eq!(incoming[0].source_table, "bookings");
        assert_eq!(incoming[0].source_column, "guest_id");
        assert_eq!(incoming[0].cardinality, Cardinality::Many);

        assert!(resolve_incoming(&tables[1], &tables).is_empty());
    }

    #[test]
    fn test_incoming_pluralizes_singular_table_names() {
        let staff = TableDef::new("staff")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(
                ColumnDef::new("guest_id", ColumnType::Integer).references(ForeignKey::new("guests")),
            );
        let tables = vec![guests(), staff];
        let incoming = resolve_incoming(&tables[0], &tables);
        assert_eq!(incoming[0].name, "staffs");
    }

    #[test]
    fn test_self_reference_is_not_incoming() {
        let categories = TableDef::new("categories")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(
                ColumnDef::nullable("parent_id", ColumnType::Integer)
                    .references(ForeignKey::new("categories")),
            );
        let tables = vec![categories];

        assert!(resolve_incoming(&tables[0], &tables).is_empty());
        let outgoing = resolve_outgoing(&tables[0]);
        assert_eq!(outgoing[0].name, "parent");
        assert_eq!(outgoing[0].target_table, "categories");
    }

    #[test]
    fn test_duplicate_incoming_names_are_qualified() {
        let messages = TableDef::new("messages")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(
                ColumnDef::new("sender_id", ColumnType::Integer).references(ForeignKey::new("guests")),
            )
            .with_column(
                ColumnDef::new("recipient_id", ColumnType::Integer)
                    .references(ForeignKey::new("guests")),
            );
        let tables = vec![guests(), messages];
        let incoming = resolve_incoming(&tables[0], &tables);

        let names: Vec<_> = incoming.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["messages", "messages_by_recipient"]);
    }

    #[test]
    fn test_outgoing_name_clashing_with_column_is_qualified() {
        let posts = TableDef::new("posts")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(
                ColumnDef::new("author", ColumnType::Integer).references(ForeignKey::new("authors")),
            );
        let outgoing = resolve_outgoing(&posts);
        assert_eq!(outgoing[0].name, "author_record");
        assert_eq!(outgoing[0].column, "author");
    }

    #[test]
    fn test_repeated_outgoing_names_are_qualified() {
        let tasks = TableDef::new("tasks")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(
                ColumnDef::new("owner", ColumnType::Integer).references(ForeignKey::new("users")),
            )
            .with_column(
                ColumnDef::new("creator", ColumnType::Integer).references(ForeignKey::new("users")),
            );
        let names: Vec<_> = resolve_outgoing(&tasks).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["user", "user_by_creator"]);
    }

    #[test]
    fn test_incoming_name_avoids_columns() {
        let guests = guests().with_column(ColumnDef::new("bookings", ColumnType::Integer));
        let tables = vec![guests, bookings()];
        let incoming = resolve_incoming(&tables[0], &tables);
        assert_eq!(incoming[0].name, "bookings_by_guest");
    }

    #[test]
    fn test_check_references() {
        let tables = vec![guests(), bookings()];
        assert!(check_references(&tables).is_empty());

        let errors = check_references(&[bookings()]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, EmissionErrorKind::DanglingTable);
        assert_eq!(errors[0].column.as_deref(), Some("guest_id"));

        let bad_column = TableDef::new("bookings").with_column(
            ColumnDef::new("guest_code", ColumnType::ShortText)
                .references(ForeignKey::new("guests").with_column("code")),
        );
        let errors = check_references(&[guests(), bad_column]);
        assert_eq!(errors[0].kind, EmissionErrorKind::DanglingColumn);
    }

    #[test]
    fn test_check_relationship_targets() {
        let users = TableDef::new("users")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_relationship(RelationshipDecl::many_to_many("tags", "tags", "user_tags"));
        let errors = check_references(&[users]);

        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == EmissionErrorKind::UnknownRelationTarget));
    }
}
