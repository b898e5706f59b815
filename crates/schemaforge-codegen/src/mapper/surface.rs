//! Surface (API/UI) type mapping.

use std::fmt;

use schemaforge_core::{ColumnDef, ColumnType};

/// Externally visible scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceType {
    String,
    Number,
    Boolean,
    Date,
}

impl SurfaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceType::String => "string",
            SurfaceType::Number => "number",
            SurfaceType::Boolean => "boolean",
            SurfaceType::Date => "Date",
        }
    }
}

/// A surface type with its nullability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub base: SurfaceType,
    pub nullable: bool,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{} | null", self.base.as_str())
        } else {
            f.write_str(self.base.as_str())
        }
    }
}

/// Map a column to its surface type.
///
/// Enum references and unknown tags surface as `string`; the literal union
/// of an enum lives in the inferred validation type. Decimals are text on
/// the wire and surface as `string` too.
pub fn to_surface_type(column: &ColumnDef) -> Surface {
    let base = match &column.column_type {
        ColumnType::AutoIncrement | ColumnType::Integer => SurfaceType::Number,
        ColumnType::Boolean => SurfaceType::Boolean,
        ColumnType::Date | ColumnType::DateTime => SurfaceType::Date,
        ColumnType::ShortText
        | ColumnType::LongText
        | ColumnType::Decimal
        | ColumnType::Geographic
        | ColumnType::Named(_) => SurfaceType::String,
    };
    Surface {
        base,
        nullable: column.is_nullable(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_types() {
        let cases = [
            (ColumnDef::new("id", ColumnType::AutoIncrement), "number"),
            (ColumnDef::new("rate", ColumnType::Decimal), "string"),
            (ColumnDef::new("at", ColumnType::DateTime), "Date"),
            (ColumnDef::new("ok", ColumnType::Boolean), "boolean"),
            (ColumnDef::new("status", ColumnType::Named("status".into())), "string"),
            (ColumnDef::nullable("bio", ColumnType::LongText), "string | null"),
        ];
        for (column, expected) in cases {
            assert_eq!(to_surface_type(&column).to_string(), expected, "{}", column.name);
        }
    }

    #[test]
    fn test_auto_increment_is_never_nullable() {
        let column = ColumnDef::nullable("id", ColumnType::AutoIncrement);
        assert!(!to_surface_type(&column).nullable);
    }
}
