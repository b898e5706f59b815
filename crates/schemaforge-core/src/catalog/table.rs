//! Table definitions.

use super::column::ColumnDef;

/// One seed row: field name to raw JSON value, in descriptor order.
pub type SeedRow = serde_json::Map<String, serde_json::Value>;

/// A table definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableDef {
    /// Table name (unique within the schema).
    pub name: String,
    /// Human display name.
    pub display_name: Option<String>,
    /// Display icon.
    pub icon: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Columns in canonical emission order.
    pub columns: Vec<ColumnDef>,
    /// Named indexes.
    pub indexes: Vec<IndexDef>,
    /// Declared relationships.
    pub relationships: Vec<RelationshipDecl>,
    /// Seed rows.
    pub seed: Vec<SeedRow>,
    /// List/search/sort configuration.
    pub ui: TableUi,
}

/// A named index over one or more columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    /// Index name.
    pub name: String,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
}

/// Kind of a declared relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// One-to-one relation.
    OneToOne,
    /// One-to-many relation (foreign key on the many side).
    OneToMany,
    /// Many-to-many relation through an associative table.
    ManyToMany,
}

impl RelationKind {
    /// Parse a descriptor spelling (`one-to-many`, `one_to_many`, `oneToMany`).
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "onetoone" => Some(RelationKind::OneToOne),
            "onetomany" => Some(RelationKind::OneToMany),
            "manytomany" => Some(RelationKind::ManyToMany),
            _ => None,
        }
    }
}

/// A relationship declared explicitly in a table descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDecl {
    /// Relation name.
    pub name: String,
    /// Relation kind.
    pub kind: RelationKind,
    /// Related table.
    pub target: String,
    /// Associative table for many-to-many relations.
    pub through: Option<String>,
}

impl RelationshipDecl {
    /// Create a one-to-one relation.
    pub fn one_to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RelationKind::OneToOne,
            target: target.into(),
            through: None,
        }
    }

    /// Create a one-to-many relation.
    pub fn one_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RelationKind::OneToMany,
            target: target.into(),
            through: None,
        }
    }

    /// Create a many-to-many relation.
    pub fn many_to_many(
        name: impl Into<String>,
        target: impl Into<String>,
        through: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: RelationKind::ManyToMany,
            target: target.into(),
            through: Some(through.into()),
        }
    }

    /// Check if this is a many-to-many relation.
    pub fn is_many_to_many(&self) -> bool {
        self.kind == RelationKind::ManyToMany
    }
}

/// List/search/sort configuration for a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableUi {
    /// Columns shown in list views.
    pub list_columns: Vec<String>,
    /// Columns covered by free-text search.
    pub searchable: Vec<String>,
    /// Columns a list may be sorted by.
    pub sortable: Vec<String>,
    /// Columns a list may be filtered by. `None` means every visible column.
    pub filterable: Option<Vec<String>>,
    /// Default ordering.
    pub default_sort: Option<OrderBy>,
    /// Default page size.
    pub page_size: Option<u32>,
}

/// Order specification for default ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Column to order by.
    pub field: String,
    /// Sort direction.
    pub direction: OrderDirection,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl TableDef {
    /// Create a new table definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a column to the table.
    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Add multiple columns.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = ColumnDef>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Add an index.
    pub fn with_index(mut self, index: IndexDef) -> Self {
        self.indexes.push(index);
        self
    }

    /// Add a relationship declaration.
    pub fn with_relationship(mut self, relationship: RelationshipDecl) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns carrying a foreign-key reference.
    pub fn columns_with_references(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.references.is_some())
    }

    /// Columns forming a composite primary key.
    ///
    /// Returns `Some` only when more than one column is flagged as primary
    /// key. An auto-increment column counts only when it is flagged itself;
    /// its implicit key status never joins a composite.
    pub fn composite_key(&self) -> Option<Vec<&ColumnDef>> {
        let flagged: Vec<&ColumnDef> = self.columns.iter().filter(|c| c.primary_key).collect();
        (flagged.len() > 1).then_some(flagged)
    }

    /// Columns forming the primary key.
    ///
    /// Explicitly flagged columns win; an auto-increment column is the key
    /// only when no column declares `primaryKey`.
    pub fn primary_key_columns(&self) -> Vec<&ColumnDef> {
        let flagged: Vec<&ColumnDef> = self.columns.iter().filter(|c| c.primary_key).collect();
        if !flagged.is_empty() {
            return flagged;
        }
        self.columns
            .iter()
            .filter(|c| c.column_type.is_auto_increment())
            .collect()
    }

    /// Check if a column takes part in the primary key.
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_key_columns().iter().any(|c| c.name == column)
    }
}
