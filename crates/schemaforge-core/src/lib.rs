//! Schemaforge Core - schema model, loading, validation, and relationships.
//!
//! This crate owns everything the code generators need to know about a
//! project's tables and enums before any text is produced:
//!
//! - [`catalog`]: the in-memory model (tables, columns, enums) and the
//!   relationship resolver that derives outgoing and incoming relations.
//! - [`loader`]: reads JSON descriptors into a [`SchemaModel`].
//! - [`validator`]: checks per-table invariants before emission.
//! - [`naming`]: identifier case conversion and pluralization rules.
//!
//! # Example
//!
//! ```rust
//! use schemaforge_core::{validate, SchemaLoader};
//!
//! let users = r#"{
//!     "name": "users",
//!     "columns": {
//!         "id": { "type": "serial" },
//!         "email": { "type": "varchar", "length": 255 }
//!     }
//! }"#;
//!
//! let model = SchemaLoader::default()
//!     .load_sources(&[], &[("tables/users.json", users)])
//!     .unwrap();
//! assert!(validate(&model.tables[0]).is_empty());
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod naming;
pub mod validator;

pub use catalog::{
    check_references, check_table_references, outgoing_name, resolve_enum, resolve_incoming,
    resolve_outgoing, Cardinality, ColumnDef, ColumnType, ColumnUi, DefaultValue, DeleteBehavior,
    EnumDef, EnumValue, ForeignKey, IncomingRelation, IndexDef, OrderBy, OrderDirection,
    OutgoingRelation, RelationKind, RelationshipDecl, SchemaModel, SeedRow, TableDef, TableUi,
    ValidationRules,
};
pub use config::LoaderConfig;
pub use error::{
    EmissionError, EmissionErrorKind, IssueKind, LoadError, LoadErrorKind, ValidationIssue,
};
pub use loader::SchemaLoader;
pub use validator::{validate, validate_model};
