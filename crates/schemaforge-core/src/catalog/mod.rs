//! Schema catalog for schemaforge.
//!
//! The catalog holds the in-memory model of tables, columns, and enums, and
//! derives the relationship graph between tables.

mod column;
mod enums;
mod relation;
mod schema;
mod table;
mod types;

pub use column::{ColumnDef, ColumnUi, DefaultValue, DeleteBehavior, ForeignKey, ValidationRules};
pub use enums::{resolve_enum, EnumDef, EnumValue};
pub use relation::{
    check_references, check_table_references, outgoing_name, resolve_incoming, resolve_outgoing,
    Cardinality, IncomingRelation, OutgoingRelation,
};
pub use schema::SchemaModel;
pub use table::{
    IndexDef, OrderBy, OrderDirection, RelationKind, RelationshipDecl, SeedRow, TableDef, TableUi,
};
pub use types::ColumnType;
