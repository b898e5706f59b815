//! Column definitions for tables.

use super::types::ColumnType;

/// A column definition within a table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnDef {
    /// Logical (database) column name.
    pub name: String,
    /// Abstract type tag.
    pub column_type: ColumnType,
    /// Whether the column accepts null.
    pub nullable: bool,
    /// Maximum length for text columns.
    pub length: Option<u32>,
    /// Total digits for decimal columns.
    pub precision: Option<u32>,
    /// Digits after the decimal point for decimal columns.
    pub scale: Option<u32>,
    /// Default value if not provided.
    pub default: Option<DefaultValue>,
    /// Whether values must be unique.
    pub unique: bool,
    /// Whether this column is (part of) the primary key.
    pub primary_key: bool,
    /// Foreign-key reference.
    pub references: Option<ForeignKey>,
    /// Input validation rules.
    pub validation: ValidationRules,
    /// Form metadata.
    pub ui: ColumnUi,
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Boolean literal.
    Bool(bool),
    /// Numeric literal, kept as its verbatim source text.
    Number(String),
    /// String literal.
    String(String),
    /// Current timestamp (evaluated at insert time).
    CurrentTimestamp,
}

impl DefaultValue {
    /// Check if this is the current-timestamp sentinel.
    pub fn is_current_timestamp(&self) -> bool {
        matches!(self, DefaultValue::CurrentTimestamp)
    }
}

/// Behavior when a referenced row is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteBehavior {
    /// Leave the check to the database (no explicit action).
    #[default]
    NoAction,
    /// Delete referencing rows.
    Cascade,
    /// Prevent deletion while referencing rows exist.
    Restrict,
    /// Set the foreign key to null.
    SetNull,
    /// Set the foreign key to its default.
    SetDefault,
}

impl DeleteBehavior {
    /// Parse a descriptor spelling (`cascade`, `set null`, `set_null`, `setNull`, ...).
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "noaction" => Some(DeleteBehavior::NoAction),
            "cascade" => Some(DeleteBehavior::Cascade),
            "restrict" => Some(DeleteBehavior::Restrict),
            "setnull" => Some(DeleteBehavior::SetNull),
            "setdefault" => Some(DeleteBehavior::SetDefault),
            _ => None,
        }
    }

    /// Storage-layer keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteBehavior::NoAction => "no action",
            DeleteBehavior::Cascade => "cascade",
            DeleteBehavior::Restrict => "restrict",
            DeleteBehavior::SetNull => "set null",
            DeleteBehavior::SetDefault => "set default",
        }
    }
}

/// Foreign-key reference declared on a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Target table name.
    pub table: String,
    /// Target column name.
    pub column: String,
    /// Delete policy.
    pub on_delete: DeleteBehavior,
}

impl ForeignKey {
    /// Reference the `id` column of a table.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: "id".to_string(),
            on_delete: DeleteBehavior::NoAction,
        }
    }

    /// Set the target column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Set the delete policy.
    pub fn with_on_delete(mut self, on_delete: DeleteBehavior) -> Self {
        self.on_delete = on_delete;
        self
    }
}

/// Validation rules attached to a column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationRules {
    /// Explicit required flag. When absent, non-nullable columns are required.
    pub required: Option<bool>,
    /// Minimum numeric value.
    pub min: Option<f64>,
    /// Maximum numeric value.
    pub max: Option<f64>,
    /// Minimum text length.
    pub min_length: Option<u32>,
    /// Maximum text length.
    pub max_length: Option<u32>,
    /// Regular expression the value must match.
    pub pattern: Option<String>,
    /// Value must be an email address.
    pub email: bool,
    /// Value must be a URL.
    pub url: bool,
}

/// Form metadata for a column. Carried through for UI collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnUi {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub section: Option<String>,
    pub order: Option<i64>,
    pub format: Option<String>,
    pub readonly: bool,
    pub hidden: bool,
}

impl ColumnDef {
    /// Create a new non-nullable column.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            ..Default::default()
        }
    }

    /// Create a nullable column.
    pub fn nullable(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            nullable: true,
            ..Self::new(name, column_type)
        }
    }

    /// Set the default value.
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the text length.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set decimal precision and scale.
    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    /// Mark as unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark as (part of) the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Add a foreign-key reference.
    pub fn references(mut self, reference: ForeignKey) -> Self {
        self.references = Some(reference);
        self
    }

    /// Set validation rules.
    pub fn with_validation(mut self, validation: ValidationRules) -> Self {
        self.validation = validation;
        self
    }

    /// Whether the column accepts null. Auto-increment columns never do.
    pub fn is_nullable(&self) -> bool {
        self.nullable && !self.column_type.is_auto_increment()
    }

    /// Whether the column is required on input.
    pub fn is_required(&self) -> bool {
        self.validation.required.unwrap_or(!self.is_nullable())
    }

    /// Whether the database fills this column on insert.
    pub fn is_auto_generated(&self) -> bool {
        self.column_type.is_auto_increment()
            || self
                .default
                .as_ref()
                .is_some_and(DefaultValue::is_current_timestamp)
    }

    /// Check if this column has a default value.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builder() {
        let column = ColumnDef::new("email", ColumnType::ShortText)
            .with_length(255)
            .unique();

        assert_eq!(column.name, "email");
        assert!(column.unique);
        assert!(!column.is_nullable());
        assert!(column.is_required());
        assert_eq!(column.length, Some(255));
    }

    #[test]
    fn test_required_follows_nullability() {
        let bio = ColumnDef::nullable("bio", ColumnType::LongText);
        assert!(!bio.is_required());

        let nickname = ColumnDef::new("nickname", ColumnType::ShortText).with_validation(
            ValidationRules {
                required: Some(false),
                ..Default::default()
            },
        );
        assert!(!nickname.is_required());
    }

    #[test]
    fn test_auto_generated() {
        let mut id = ColumnDef::new("id", ColumnType::AutoIncrement);
        id.nullable = true;
        assert!(id.is_auto_generated());
        assert!(!id.is_nullable());

        let created = ColumnDef::new("created_at", ColumnType::DateTime)
            .with_default(DefaultValue::CurrentTimestamp);
        assert!(created.is_auto_generated());

        let status = ColumnDef::new("status", ColumnType::Named("user_status".into()))
            .with_default(DefaultValue::String("pending".into()));
        assert!(!status.is_auto_generated());
        assert!(status.has_default());
    }

    #[test]
    fn test_delete_behavior_spellings() {
        assert_eq!(DeleteBehavior::from_str("cascade"), Some(DeleteBehavior::Cascade));
        assert_eq!(DeleteBehavior::from_str("set null"), Some(DeleteBehavior::SetNull));
        assert_eq!(DeleteBehavior::from_str("SET_NULL"), Some(DeleteBehavior::SetNull));
        assert_eq!(DeleteBehavior::from_str("setDefault"), Some(DeleteBehavior::SetDefault));
        assert_eq!(DeleteBehavior::from_str("explode"), None);
        assert_eq!(DeleteBehavior::SetNull.as_str(), "set null");
    }
}
