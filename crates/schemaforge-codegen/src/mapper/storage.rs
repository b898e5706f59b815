//! Storage-layer column mapping.

use schemaforge_core::{
    resolve_enum, ColumnDef, ColumnType, DefaultValue, DeleteBehavior, EnumDef, TableDef,
};

use crate::literal::js_string;
use crate::names::{property, EnumNames};

/// Column constructor of the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConstructor {
    Varchar,
    Text,
    Serial,
    Integer,
    Numeric,
    Boolean,
    Date,
    Timestamp,
    /// An enum constructor exported by the enum artifact.
    Enum(String),
}

impl StorageConstructor {
    /// The imported symbol.
    pub fn symbol(&self) -> &str {
        match self {
            StorageConstructor::Varchar => "varchar",
            StorageConstructor::Text => "text",
            StorageConstructor::Serial => "serial",
            StorageConstructor::Integer => "integer",
            StorageConstructor::Numeric => "numeric",
            StorageConstructor::Boolean => "boolean",
            StorageConstructor::Date => "date",
            StorageConstructor::Timestamp => "timestamp",
            StorageConstructor::Enum(name) => name,
        }
    }

    /// Check if the constructor comes from the enum artifact.
    pub fn is_enum(&self) -> bool {
        matches!(self, StorageConstructor::Enum(_))
    }
}

/// Constraint modifier, listed in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    NotNull,
    /// `.default(<literal>)`
    Default(String),
    DefaultNow,
    Unique,
    PrimaryKey,
    /// `.references(() => <table>.<column>, { onDelete })`
    References {
        /// Target table constant.
        table: String,
        /// Target column property.
        column: String,
        /// Delete policy, only when it differs from the default.
        on_delete: Option<&'static str>,
        /// The column references its own table.
        self_reference: bool,
    },
}

impl Modifier {
    fn render(&self) -> String {
        match self {
            Modifier::NotNull => ".notNull()".to_string(),
            Modifier::Default(literal) => format!(".default({})", literal),
            Modifier::DefaultNow => ".defaultNow()".to_string(),
            Modifier::Unique => ".unique()".to_string(),
            Modifier::PrimaryKey => ".primaryKey()".to_string(),
            Modifier::References {
                table,
                column,
                on_delete,
                self_reference,
            } => {
                // A self reference needs an explicit return type to break the
                // inference cycle.
                let arrow = if *self_reference {
                    "(): AnyPgColumn =>"
                } else {
                    "() =>"
                };
                match on_delete {
                    Some(policy) => format!(
                        ".references({} {}.{}, {{ onDelete: '{}' }})",
                        arrow, table, column, policy
                    ),
                    None => format!(".references({} {}.{})", arrow, table, column),
                }
            }
        }
    }
}

/// A storage column expression: constructor, options and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageType {
    pub constructor: StorageConstructor,
    /// Constructor options as `(key, rendered value)`.
    pub options: Vec<(&'static str, String)>,
    pub modifiers: Vec<Modifier>,
}

impl StorageType {
    /// Render the column expression for the column's database name.
    pub fn render(&self, db_name: &str) -> String {
        let mut out = format!("{}({}", self.constructor.symbol(), js_string(db_name));
        if !self.options.is_empty() {
            let options: Vec<String> = self
                .options
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect();
            out.push_str(&format!(", {{ {} }}", options.join(", ")));
        }
        out.push(')');
        for modifier in &self.modifiers {
            out.push_str(&modifier.render());
        }
        out
    }

    /// Check if a modifier of the same variant is present.
    pub fn has(&self, modifier: &Modifier) -> bool {
        self.modifiers
            .iter()
            .any(|m| std::mem::discriminant(m) == std::mem::discriminant(modifier))
    }

    /// Check if the column references its own table.
    pub fn is_self_reference(&self) -> bool {
        self.modifiers.iter().any(|m| {
            matches!(
                m,
                Modifier::References {
                    self_reference: true,
                    ..
                }
            )
        })
    }
}

/// Map a column to its storage expression.
///
/// Modifiers follow the canonical order not-null, default, unique, primary
/// key, references. Auto-increment columns never carry not-null, default or
/// unique. Columns of a table with a composite key never carry a per-column
/// primary key.
pub fn to_storage_type(column: &ColumnDef, table: &TableDef, enums: &[EnumDef]) -> StorageType {
    let (constructor, options) = match &column.column_type {
        ColumnType::ShortText => (
            StorageConstructor::Varchar,
            column
                .length
                .map(|length| vec![("length", length.to_string())])
                .unwrap_or_default(),
        ),
        ColumnType::LongText | ColumnType::Geographic => (StorageConstructor::Text, Vec::new()),
        ColumnType::AutoIncrement => (StorageConstructor::Serial, Vec::new()),
        ColumnType::Integer => (StorageConstructor::Integer, Vec::new()),
        ColumnType::Decimal => match (column.precision, column.scale) {
            (Some(precision), Some(scale)) => (
                StorageConstructor::Numeric,
                vec![
                    ("precision", precision.to_string()),
                    ("scale", scale.to_string()),
                ],
            ),
            _ => (StorageConstructor::Numeric, Vec::new()),
        },
        ColumnType::Boolean => (StorageConstructor::Boolean, Vec::new()),
        ColumnType::Date => (StorageConstructor::Date, Vec::new()),
        ColumnType::DateTime => (StorageConstructor::Timestamp, Vec::new()),
        ColumnType::Named(tag) => match resolve_enum(tag, enums) {
            Some(definition) => (
                StorageConstructor::Enum(EnumNames::new(definition).storage_const),
                Vec::new(),
            ),
            None => (StorageConstructor::Text, Vec::new()),
        },
    };

    let mut modifiers = Vec::new();
    if !column.column_type.is_auto_increment() {
        if !column.is_nullable() {
            modifiers.push(Modifier::NotNull);
        }
        // Decimal columns are text on the wire, so their defaults are quoted.
        match &column.default {
            Some(DefaultValue::CurrentTimestamp) => modifiers.push(Modifier::DefaultNow),
            Some(DefaultValue::Bool(b)) => modifiers.push(Modifier::Default(b.to_string())),
            Some(DefaultValue::Number(n)) if column.column_type == ColumnType::Decimal => {
                modifiers.push(Modifier::Default(js_string(n)))
            }
            Some(DefaultValue::Number(n)) => modifiers.push(Modifier::Default(n.clone())),
            Some(DefaultValue::String(s)) => modifiers.push(Modifier::Default(js_string(s))),
            None => {}
        }
        if column.unique {
            modifiers.push(Modifier::Unique);
        }
    }

    if table.composite_key().is_none() && table.is_primary_key(&column.name) {
        modifiers.push(Modifier::PrimaryKey);
    }

    if let Some(reference) = &column.references {
        modifiers.push(Modifier::References {
            table: property(&reference.table),
            column: property(&reference.column),
            on_delete: (reference.on_delete != DeleteBehavior::NoAction)
                .then(|| reference.on_delete.as_str()),
            self_reference: reference.table == table.name,
        });
    }

    StorageType {
        constructor,
        options,
        modifiers,
    }
}
