//! Validation-schema column mapping.

use schemaforge_core::{resolve_enum, ColumnDef, ColumnType, DefaultValue, EnumDef};

use crate::literal::{js_number, js_string, regex_literal};
use crate::names::EnumNames;

/// Decimal values travel as text: an optional sign, digits, optional fraction.
pub const DECIMAL_PATTERN: &str = r"^-?\d+(\.\d+)?$";

/// Simplified geographic points are `"lat,lng"` text.
pub const LAT_LNG_PATTERN: &str = r"^-?\d+(\.\d+)?,\s*-?\d+(\.\d+)?$";

/// The base type check of a validation chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationBase {
    String,
    Integer,
    Decimal,
    Boolean,
    Date,
    Geographic,
    /// Reference to an enum schema exported by the enum artifact.
    Enum(String),
}

impl ValidationBase {
    fn render(&self) -> String {
        match self {
            ValidationBase::String => "z.string()".to_string(),
            ValidationBase::Integer => "z.number().int()".to_string(),
            ValidationBase::Decimal => {
                format!("z.string().regex({})", regex_literal(DECIMAL_PATTERN))
            }
            ValidationBase::Boolean => "z.boolean()".to_string(),
            ValidationBase::Date => "z.coerce.date()".to_string(),
            ValidationBase::Geographic => {
                format!("z.string().regex({})", regex_literal(LAT_LNG_PATTERN))
            }
            ValidationBase::Enum(schema) => schema.clone(),
        }
    }

    /// Check if the base validates text.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            ValidationBase::String | ValidationBase::Decimal | ValidationBase::Geographic
        )
    }
}

/// One link of a validation chain after the base check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refinement {
    Email,
    Url,
    Min(String),
    Max(String),
    /// Numeric lower bound on decimal text.
    AtLeast(String),
    /// Numeric upper bound on decimal text.
    AtMost(String),
    /// Pattern, rendered as a regex literal.
    Regex(String),
    /// Literal default.
    Default(String),
    Nullable,
    Optional,
}

impl Refinement {
    fn render(&self) -> String {
        match self {
            Refinement::Email => ".email()".to_string(),
            Refinement::Url => ".url()".to_string(),
            Refinement::Min(n) => format!(".min({})", n),
            Refinement::Max(n) => format!(".max({})", n),
            Refinement::AtLeast(n) => format!(
                ".refine((value) => Number(value) >= {}, {{ message: 'Must be at least {}' }})",
                n, n
            ),
            Refinement::AtMost(n) => format!(
                ".refine((value) => Number(value) <= {}, {{ message: 'Must be at most {}' }})",
                n, n
            ),
            Refinement::Regex(pattern) => format!(".regex({})", regex_literal(pattern)),
            Refinement::Default(literal) => format!(".default({})", literal),
            Refinement::Nullable => ".nullable()".to_string(),
            Refinement::Optional => ".optional()".to_string(),
        }
    }
}

/// A validation chain: base check followed by refinements in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationExpr {
    pub base: ValidationBase,
    pub refinements: Vec<Refinement>,
}

impl ValidationExpr {
    /// Render the full chain.
    pub fn render(&self) -> String {
        let mut out = self.base.render();
        for refinement in &self.refinements {
            out.push_str(&refinement.render());
        }
        out
    }

    /// The enum schema referenced by this chain, if any.
    pub fn enum_schema(&self) -> Option<&str> {
        match &self.base {
            ValidationBase::Enum(schema) => Some(schema),
            _ => None,
        }
    }

    /// Check if the chain ends in `.nullable()`.
    pub fn is_nullable(&self) -> bool {
        self.refinements.last() == Some(&Refinement::Nullable)
    }

    /// Check if the chain ends in `.optional()`.
    pub fn is_optional(&self) -> bool {
        self.refinements.last() == Some(&Refinement::Optional)
    }
}

/// Map a column to its validation chain.
///
/// Order: base check, email/url (text only), bounds, pattern, default, then
/// at most one of nullable or optional. Nullable wins; optional is added only
/// for columns that are neither required, nullable, nor defaulted.
pub fn to_validation_expression(column: &ColumnDef, enums: &[EnumDef]) -> ValidationExpr {
    let base = match &column.column_type {
        ColumnType::ShortText | ColumnType::LongText => ValidationBase::String,
        ColumnType::AutoIncrement | ColumnType::Integer => ValidationBase::Integer,
        ColumnType::Decimal => ValidationBase::Decimal,
        ColumnType::Boolean => ValidationBase::Boolean,
        ColumnType::Date | ColumnType::DateTime => ValidationBase::Date,
        ColumnType::Geographic => ValidationBase::Geographic,
        ColumnType::Named(tag) => match resolve_enum(tag, enums) {
            Some(definition) => ValidationBase::Enum(EnumNames::new(definition).schema_const),
            None => ValidationBase::String,
        },
    };

    let rules = &column.validation;
    let mut refinements = Vec::new();

    if column.column_type.is_text() {
        if rules.email {
            refinements.push(Refinement::Email);
        }
        if rules.url {
            refinements.push(Refinement::Url);
        }
    }

    if base == ValidationBase::Integer {
        if let Some(min) = rules.min {
            refinements.push(Refinement::Min(js_number(min)));
        }
        if let Some(max) = rules.max {
            refinements.push(Refinement::Max(js_number(max)));
        }
    } else if base == ValidationBase::Decimal {
        if let Some(min) = rules.min {
            refinements.push(Refinement::AtLeast(js_number(min)));
        }
        if let Some(max) = rules.max {
            refinements.push(Refinement::AtMost(js_number(max)));
        }
    } else if column.column_type.is_text() {
        if let Some(min) = rules.min_length {
            refinements.push(Refinement::Min(min.to_string()));
        }
        if let Some(max) = rules.max_length.or(column.length) {
            refinements.push(Refinement::Max(max.to_string()));
        }
    }

    if base.is_textual() {
        if let Some(pattern) = &rules.pattern {
            refinements.push(Refinement::Regex(pattern.clone()));
        }
    }

    if let Some(literal) = column.default.as_ref().and_then(|d| default_literal(&base, d)) {
        refinements.push(Refinement::Default(literal));
    }

    if column.is_nullable() {
        refinements.push(Refinement::Nullable);
    } else if !column.is_required() && !column.has_default() {
        refinements.push(Refinement::Optional);
    }

    ValidationExpr { base, refinements }
}

/// Render a default literal for the base type. The current-timestamp
/// sentinel has no validation-side literal.
fn default_literal(base: &ValidationBase, value: &DefaultValue) -> Option<String> {
    let literal = match (base, value) {
        (_, DefaultValue::CurrentTimestamp) => return None,
        (ValidationBase::Boolean, DefaultValue::Bool(b)) => b.to_string(),
        (ValidationBase::Integer, DefaultValue::Number(n)) => n.clone(),
        (ValidationBase::Date, DefaultValue::String(s)) => format!("new Date({})", js_string(s)),
        (_, DefaultValue::Bool(b)) => js_string(&b.to_string()),
        (_, DefaultValue::Number(n)) => js_string(n),
        (_, DefaultValue::String(s)) => js_string(s),
    };
    Some(literal)
}
