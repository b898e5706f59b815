//! Schema model - every enum and table of one compiler run.

use super::enums::{resolve_enum, EnumDef};
use super::relation::{resolve_incoming, resolve_outgoing, IncomingRelation, OutgoingRelation};
use super::table::TableDef;

/// The full set of enums and tables for one compiler invocation.
///
/// Both lists are kept in canonical load order, which drives emission order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaModel {
    /// Enum definitions.
    pub enums: Vec<EnumDef>,
    /// Table definitions.
    pub tables: Vec<TableDef>,
}

impl SchemaModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enum.
    pub fn with_enum(mut self, definition: EnumDef) -> Self {
        self.enums.push(definition);
        self
    }

    /// Add a table.
    pub fn with_table(mut self, table: TableDef) -> Self {
        self.tables.push(table);
        self
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&TableDef> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Get an enum by exact name.
    pub fn get_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Resolve a column type tag to an enum (see [`resolve_enum`]).
    pub fn resolve_enum(&self, tag: &str) -> Option<&EnumDef> {
        resolve_enum(tag, &self.enums)
    }

    /// Outgoing relations of a table.
    pub fn relations_from(&self, table: &TableDef) -> Vec<OutgoingRelation> {
        resolve_outgoing(table)
    }

    /// Incoming relations of a table.
    pub fn relations_to(&self, table: &TableDef) -> Vec<IncomingRelation> {
        resolve_incoming(table, &self.tables)
    }

    /// List all table names in canonical order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnDef, ColumnType, ForeignKey};

    fn sample_model() -> SchemaModel {
        let guests = TableDef::new("guests")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(ColumnDef::new("status", ColumnType::Named("guest_status".into())));
        let bookings = TableDef::new("bookings")
            .with_column(ColumnDef::new("id", ColumnType::AutoIncrement))
            .with_column(
                ColumnDef::new("guest_id", ColumnType::Integer).references(ForeignKey::new("guests")),
            );

        SchemaModel::new()
            .with_enum(EnumDef::new("guest_status_enum", ["vip", "regular"]))
            .with_table(guests)
            .with_table(bookings)
    }

    #[test]
    fn test_lookup() {
        let model = sample_model();
        assert!(model.get_table("guests").is_some());
        assert!(model.get_table("rooms").is_none());
        assert!(model.get_enum("guest_status").is_none());
        assert!(model.resolve_enum("guest_status").is_some());
        assert_eq!(model.table_names(), vec!["guests", "bookings"]);
    }

    #[test]
    fn test_relations_round_trip() {
        let model = sample_model();
        let guests = model.get_table("guests").unwrap();
        let bookings = model.get_table("bookings").unwrap();

        let incoming = model.relations_to(guests);
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].source_table, "bookings");

        let outgoing = model.relations_from(bookings);
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].target_table, "guests");
    }
}
