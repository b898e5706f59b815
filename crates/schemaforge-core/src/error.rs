//! Error types for loading, validation, and emission.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error while reading or parsing a descriptor file.
#[derive(Debug, Error)]
#[error("{}: {kind}", .path.display())]
pub struct LoadError {
    /// The offending file (or directory).
    pub path: PathBuf,
    /// What went wrong.
    pub kind: LoadErrorKind,
}

/// Kinds of load errors.
#[derive(Debug, Error)]
pub enum LoadErrorKind {
    /// The file or directory could not be read.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON, or does not have the expected shape.
    #[error("invalid descriptor: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSON is well-formed but describes an invalid model.
    #[error("{0}")]
    Shape(String),
}

impl LoadError {
    /// Create a new load error.
    pub fn new(path: impl Into<PathBuf>, kind: impl Into<LoadErrorKind>) -> Self {
        Self {
            path: path.into(),
            kind: kind.into(),
        }
    }

    /// Create a shape error with a message.
    pub fn shape(path: &Path, message: impl Into<String>) -> Self {
        Self::new(path, LoadErrorKind::Shape(message.into()))
    }
}

/// Kinds of per-table validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// The table has no name (or an empty one).
    MissingName,
    /// The table declares no columns.
    NoColumns,
    /// No column is a primary key or an auto-increment column.
    NoPrimaryKey,
}

/// A schema-shape problem found by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Issue kind for programmatic handling.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Kinds of emission errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionErrorKind {
    /// A foreign key names a table that was not loaded.
    DanglingTable,
    /// A foreign key names a column missing from its target table.
    DanglingColumn,
    /// A declared relationship targets a table that was not loaded.
    UnknownRelationTarget,
    /// An index or seed row refers to a column the table does not have.
    UnknownColumn,
    /// A seed row sets a column the database generates.
    GeneratedColumn,
    /// Two tables or enums derive the same module or exported identifier.
    NameCollision,
}

/// Error raised while resolving or emitting a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("table '{table}'{}: {message}", .column.as_ref().map(|c| format!(" column '{}'", c)).unwrap_or_default())]
pub struct EmissionError {
    /// Table being emitted.
    pub table: String,
    /// Offending column, when there is one.
    pub column: Option<String>,
    /// Error kind for programmatic handling.
    pub kind: EmissionErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl EmissionError {
    /// Create a new emission error.
    pub fn new(
        table: impl Into<String>,
        column: Option<&str>,
        kind: EmissionErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.map(str::to_string),
            kind,
            message: message.into(),
        }
    }

    /// A foreign key targets a table that does not exist.
    pub fn dangling_table(table: &str, column: &str, target: &str) -> Self {
        Self::new(
            table,
            Some(column),
            EmissionErrorKind::DanglingTable,
            format!("references unknown table '{}'", target),
        )
    }

    /// A foreign key targets a column that does not exist.
    pub fn dangling_column(table: &str, column: &str, target: &str, target_column: &str) -> Self {
        Self::new(
            table,
            Some(column),
            EmissionErrorKind::DanglingColumn,
            format!(
                "references unknown column '{}' on table '{}'",
                target_column, target
            ),
        )
    }

    /// A relationship declaration targets a table that does not exist.
    pub fn unknown_relation_target(table: &str, relation: &str, target: &str) -> Self {
        Self::new(
            table,
            None,
            EmissionErrorKind::UnknownRelationTarget,
            format!("relationship '{}' targets unknown table '{}'", relation, target),
        )
    }

    /// An index or seed row names a column the table does not have.
    pub fn unknown_column(table: &str, column: &str, context: &str) -> Self {
        Self::new(
            table,
            Some(column),
            EmissionErrorKind::UnknownColumn,
            format!("{} refers to a column the table does not declare", context),
        )
    }

    /// A seed row sets a column the database fills itself.
    pub fn generated_column(table: &str, column: &str, context: &str) -> Self {
        Self::new(
            table,
            Some(column),
            EmissionErrorKind::GeneratedColumn,
            format!("{} sets a column the database generates", context),
        )
    }

    /// `owner` derives a module or identifier already taken by `first`.
    pub fn name_collision(owner: &str, what: &str, name: &str, first: &str) -> Self {
        Self::new(
            owner,
            None,
            EmissionErrorKind::NameCollision,
            format!("{} '{}' is already derived from '{}'", what, name, first),
        )
    }
}
