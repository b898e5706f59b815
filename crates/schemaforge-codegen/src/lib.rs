//! Schemaforge Codegen
//!
//! Turns a [`SchemaModel`](schemaforge_core::SchemaModel) into TypeScript
//! artifacts: Drizzle `pg-core` table definitions, Zod validation schemas,
//! derived API types and seed modules, plus one barrel file per directory.
//!
//! # Output layout
//!
//! ```text
//! schema/enums.ts       schema/<table>.ts       schema/index.ts
//! validation/enums.ts   validation/<table>.ts   validation/index.ts
//! types/enums.ts        types/<table>.ts        types/index.ts
//! seeds/<table>.ts      seeds/index.ts          (only for tables with seed rows)
//! ```
//!
//! `<table>` is the singular snake_case table name. Directories come from
//! [`CodegenConfig`].
//!
//! # Usage
//!
//! ```rust
//! use schemaforge_codegen::{CodegenConfig, Compiler};
//! use schemaforge_core::SchemaLoader;
//!
//! let users = r#"{
//!     "name": "users",
//!     "columns": {
//!         "id": { "type": "serial" },
//!         "email": { "type": "varchar", "length": 255, "validation": { "email": true } }
//!     }
//! }"#;
//!
//! let model = SchemaLoader::default()
//!     .load_sources(&[], &[("tables/users.json", users)])
//!     .unwrap();
//! let compiled = Compiler::new(CodegenConfig::new()).compile(&model).unwrap();
//!
//! let schema = compiled.get("validation/user.ts").unwrap();
//! assert!(schema.content.contains("email: z.string().email().max(255),"));
//! ```

pub mod aggregate;
pub mod artifact;
pub mod compiler;
pub mod config;
pub mod emit;
pub mod error;
pub mod literal;
pub mod mapper;
pub mod names;
pub mod pool;
pub mod resolved;

pub use aggregate::aggregate;
pub use artifact::{Artifact, ArtifactKind, CompiledSchema};
pub use compiler::{compile_dir, Compiler};
pub use config::CodegenConfig;
pub use error::{CompileError, Result};
pub use names::{EnumNames, TableNames};
pub use resolved::{resolve_enums, ResolvedEnum, ResolvedTable};
