//! Enumeration definitions.

/// A single enum member with optional display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// The stored value.
    pub value: String,
    /// Display label.
    pub label: Option<String>,
    /// Display color.
    pub color: Option<String>,
    /// Display icon.
    pub icon: Option<String>,
}

impl EnumValue {
    /// Create a value without display metadata.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            color: None,
            icon: None,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// An enumeration definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    /// Enum name (unique within the schema).
    pub name: String,
    /// Ordered, non-empty list of members.
    pub values: Vec<EnumValue>,
    /// Optional description.
    pub description: Option<String>,
}

impl EnumDef {
    /// Create an enum from plain values.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(EnumValue::new).collect(),
            description: None,
        }
    }

    /// Name with the conventional `_enum` suffix removed, used for derived identifiers.
    pub fn base_name(&self) -> &str {
        match self.name.strip_suffix("_enum") {
            Some(base) if !base.is_empty() => base,
            _ => &self.name,
        }
    }

    /// Iterate the stored values in order.
    pub fn value_strings(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.value.as_str())
    }

    /// Check if the enum contains a value.
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.value == value)
    }
}

/// Resolve a column type tag to an enum.
///
/// A tag matches the enum with exactly that name, or failing that the enum
/// named `<tag>_enum`. Returns `None` when neither exists; callers fall back
/// to a plain text representation.
pub fn resolve_enum<'a>(tag: &str, enums: &'a [EnumDef]) -> Option<&'a EnumDef> {
    enums.iter().find(|e| e.name == tag).or_else(|| {
        let suffixed = format!("{}_enum", tag);
        enums.iter().find(|e| e.name == suffixed)
    })
}
