//! Abstract column type vocabulary.

/// Abstract column type, decoupled from any target representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ColumnType {
    /// Bounded text (`varchar`).
    #[default]
    ShortText,
    /// Unbounded text.
    LongText,
    /// Auto-incrementing integer; implicitly the non-null primary key.
    AutoIncrement,
    /// Plain integer.
    Integer,
    /// Fixed-precision decimal, represented as text on the wire.
    Decimal,
    /// Boolean value.
    Boolean,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
    /// Simplified geographic point stored as `"lat,lng"` text.
    Geographic,
    /// Any other tag: an enum reference, or a type introduced after this
    /// vocabulary was fixed. Resolved against the enum set at mapping time.
    Named(String),
}

impl ColumnType {
    /// Parse a descriptor type tag. Never fails: unknown tags become [`ColumnType::Named`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "varchar" | "string" => ColumnType::ShortText,
            "text" => ColumnType::LongText,
            "serial" => ColumnType::AutoIncrement,
            "integer" | "int" => ColumnType::Integer,
            "decimal" | "numeric" | "money" => ColumnType::Decimal,
            "boolean" | "bool" => ColumnType::Boolean,
            "date" => ColumnType::Date,
            "timestamp" | "datetime" => ColumnType::DateTime,
            "geography" | "location" => ColumnType::Geographic,
            other => ColumnType::Named(other.to_string()),
        }
    }

    /// Canonical tag spelling.
    pub fn tag(&self) -> &str {
        match self {
            ColumnType::ShortText => "varchar",
            ColumnType::LongText => "text",
            ColumnType::AutoIncrement => "serial",
            ColumnType::Integer => "integer",
            ColumnType::Decimal => "decimal",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::DateTime => "timestamp",
            ColumnType::Geographic => "geography",
            ColumnType::Named(name) => name,
        }
    }

    /// Check if this is the auto-increment type.
    pub fn is_auto_increment(&self) -> bool {
        matches!(self, ColumnType::AutoIncrement)
    }

    /// Check if values of this type are whole numbers.
    pub fn is_integer(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::AutoIncrement)
    }

    /// Check if this type is plain text (eligible for length and format checks).
    pub fn is_text(&self) -> bool {
        matches!(self, ColumnType::ShortText | ColumnType::LongText)
    }

    /// Check if this type holds a date or a timestamp.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Date | ColumnType::DateTime)
    }
}
