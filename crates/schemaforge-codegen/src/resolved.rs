//! Resolved table representation shared by every emitter.
//!
//! A [`ResolvedTable`] is built once per table. It carries every derived
//! name, the three mapped representations of each column, the resolved
//! relations, and the base/insert/update field sets. Emitters only read it.

use schemaforge_core::{
    check_table_references, resolve_enum, resolve_incoming, resolve_outgoing, Cardinality,
    ColumnDef, ColumnType, EmissionError, EnumDef, OrderDirection, RelationKind, SchemaModel,
    TableDef,
};
use serde_json::Value;

use crate::mapper::{
    to_storage_type, to_surface_type, to_validation_expression, StorageType, Surface,
    ValidationExpr,
};
use crate::names::{property, EnumNames, TableNames};

/// One column with its three target representations.
#[derive(Debug, Clone)]
pub struct ResolvedColumn<'a> {
    pub column: &'a ColumnDef,
    /// Property name in generated code.
    pub property: String,
    pub storage: StorageType,
    pub validation: ValidationExpr,
    pub surface: Surface,
}

/// A relation derived from a foreign key, in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelation {
    /// Relation name (snake_case).
    pub name: String,
    /// Relation property in generated code.
    pub property: String,
    pub cardinality: Cardinality,
    /// The table on the other side.
    pub related: TableNames,
    /// Property of the foreign-key column (on this table when outgoing, on
    /// the related table when incoming).
    pub foreign_key: String,
    /// Property of the referenced column.
    pub references: String,
    /// The foreign-key column accepts null.
    pub nullable: bool,
}

/// A relationship declared in the table descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDeclaration {
    pub name: String,
    pub property: String,
    pub kind: RelationKind,
    pub target: TableNames,
    /// Associative table of a many-to-many relationship.
    pub through: Option<TableNames>,
    /// Local foreign key to the target, as `(column, referenced column)` properties.
    pub link: Option<(String, String)>,
}

/// A named index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIndex {
    /// Database index name.
    pub name: String,
    /// Key in the extra-config object.
    pub property: String,
    /// Column properties.
    pub columns: Vec<String>,
    pub unique: bool,
}

/// Field sets of the three validation schema variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSets {
    /// Every column, in canonical order.
    pub base: Vec<String>,
    /// Columns the database fills on insert; omitted from the insert schema.
    pub omitted: Vec<String>,
    /// Columns widened to optional in the insert schema.
    pub widened: Vec<String>,
    /// Primary-key columns, re-asserted as required in the update schema.
    pub primary_key: Vec<String>,
}

/// List endpoint configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListConfig {
    /// Properties covered by free-text search.
    pub searchable: Vec<String>,
    /// Properties accepted by `sortBy`.
    pub sortable: Vec<String>,
    /// Indexes into [`ResolvedTable::columns`] of filterable columns.
    pub filterable: Vec<usize>,
    /// Default sort as `(property, direction)`.
    pub default_sort: Option<(String, OrderDirection)>,
    pub page_size: Option<u32>,
}

/// A seed row: `(column index, value)` pairs in column order.
pub type ResolvedSeedRow<'a> = Vec<(usize, &'a Value)>;

/// Everything the emitters need to know about one table.
#[derive(Debug, Clone)]
pub struct ResolvedTable<'a> {
    pub table: &'a TableDef,
    pub names: TableNames,
    pub columns: Vec<ResolvedColumn<'a>>,
    /// Composite key column properties, when the table has one.
    pub composite_key: Option<Vec<String>>,
    pub indexes: Vec<ResolvedIndex>,
    pub outgoing: Vec<ResolvedRelation>,
    pub incoming: Vec<ResolvedRelation>,
    pub declarations: Vec<ResolvedDeclaration>,
    pub fields: FieldSets,
    pub list: ListConfig,
    pub seed: Vec<ResolvedSeedRow<'a>>,
}

impl<'a> ResolvedTable<'a> {
    /// Resolve one table against the whole model.
    ///
    /// Fails with every problem found: dangling references, unknown
    /// relationship targets, and index, list or seed entries naming columns
    /// the table does not declare.
    pub fn build(table: &'a TableDef, model: &'a SchemaModel) -> Result<Self, Vec<EmissionError>> {
        let mut errors = check_table_references(table, &model.tables);
        check_columns(table, &mut errors);
        if !errors.is_empty() {
            return Err(errors);
        }

        let columns: Vec<ResolvedColumn<'a>> = table
            .columns
            .iter()
            .map(|column| resolve_column(table, column, &model.enums))
            .collect();

        let outgoing: Vec<ResolvedRelation> = resolve_outgoing(table)
            .into_iter()
            .map(|relation| {
                let nullable = table
                    .get_column(&relation.column)
                    .is_some_and(ColumnDef::is_nullable);
                ResolvedRelation {
                    property: property(&relation.name),
                    name: relation.name,
                    cardinality: Cardinality::One,
                    related: TableNames::new(&relation.target_table),
                    foreign_key: property(&relation.column),
                    references: property(&relation.target_column),
                    nullable,
                }
            })
            .collect();

        let incoming: Vec<ResolvedRelation> = resolve_incoming(table, &model.tables)
            .into_iter()
            .map(|relation| {
                let referenced = model
                    .get_table(&relation.source_table)
                    .and_then(|source| source.get_column(&relation.source_column))
                    .and_then(|column| column.references.as_ref())
                    .map(|reference| property(&reference.column))
                    .unwrap_or_else(|| "id".to_string());
                ResolvedRelation {
                    property: property(&relation.name),
                    name: relation.name,
                    cardinality: relation.cardinality,
                    related: TableNames::new(&relation.source_table),
                    foreign_key: property(&relation.source_column),
                    references: referenced,
                    nullable: false,
                }
            })
            .collect();

        let declarations = table
            .relationships
            .iter()
            .map(|declaration| {
                let link = table
                    .columns_with_references()
                    .find_map(|column| {
                        let reference = column.references.as_ref()?;
                        (reference.table == declaration.target)
                            .then(|| (property(&column.name), property(&reference.column)))
                    })
                    .filter(|_| declaration.kind == RelationKind::OneToOne);
                ResolvedDeclaration {
                    name: declaration.name.clone(),
                    property: property(&declaration.name),
                    kind: declaration.kind,
                    target: TableNames::new(&declaration.target),
                    through: declaration.through.as_deref().map(TableNames::new),
                    link,
                }
            })
            .collect();

        let indexes = table
            .indexes
            .iter()
            .map(|index| ResolvedIndex {
                name: index.name.clone(),
                property: property(&index.name),
                columns: index.columns.iter().map(|c| property(c)).collect(),
                unique: index.unique,
            })
            .collect();

        let fields = field_sets(table, &columns);
        let list = list_config(table);
        let seed = seed_rows(table);

        tracing::debug!(
            table = %table.name,
            columns = columns.len(),
            outgoing = outgoing.len(),
            incoming = incoming.len(),
            "table resolved"
        );

        Ok(Self {
            table,
            names: TableNames::new(&table.name),
            composite_key: table
                .composite_key()
                .map(|key| key.iter().map(|c| property(&c.name)).collect()),
            columns,
            indexes,
            outgoing,
            incoming,
            declarations,
            fields,
            list,
            seed,
        })
    }

    /// Look up a resolved column by its declared name.
    pub fn column(&self, name: &str) -> Option<&ResolvedColumn<'a>> {
        self.columns.iter().find(|c| c.column.name == name)
    }

    /// Check if the table has any derived relation.
    pub fn has_relations(&self) -> bool {
        !self.outgoing.is_empty() || !self.incoming.is_empty()
    }
}

fn resolve_column<'a>(
    table: &TableDef,
    column: &'a ColumnDef,
    enums: &[EnumDef],
) -> ResolvedColumn<'a> {
    if let ColumnType::Named(tag) = &column.column_type {
        if resolve_enum(tag, enums).is_none() {
            tracing::warn!(
                table = %table.name,
                column = %column.name,
                tag = %tag,
                "unknown type tag, falling back to text"
            );
        }
    }

    ResolvedColumn {
        column,
        property: property(&column.name),
        storage: to_storage_type(column, table, enums),
        validation: to_validation_expression(column, enums),
        surface: to_surface_type(column),
    }
}

fn check_columns(table: &TableDef, errors: &mut Vec<EmissionError>) {
    let mut check = |name: &str, context: &str| {
        if table.get_column(name).is_none() {
            errors.push(EmissionError::unknown_column(&table.name, name, context));
        }
    };

    for index in &table.indexes {
        for column in &index.columns {
            check(column, &format!("index '{}'", index.name));
        }
    }

    let ui = &table.ui;
    for column in &ui.searchable {
        check(column, "searchable list");
    }
    for column in &ui.sortable {
        check(column, "sortable list");
    }
    for column in ui.filterable.iter().flatten() {
        check(column, "filterable list");
    }
    if let Some(sort) = &ui.default_sort {
        check(&sort.field, "default sort");
    }

    // Seed rows are typed as insert rows, which omit generated columns.
    for (row, record) in table.seed.iter().enumerate() {
        let context = format!("seed row {}", row + 1);
        for key in record.keys() {
            match table.get_column(key) {
                None => errors.push(EmissionError::unknown_column(&table.name, key, &context)),
                Some(column) if column.is_auto_generated() => {
                    errors.push(EmissionError::generated_column(&table.name, key, &context))
                }
                Some(_) => {}
            }
        }
    }
}

fn field_sets(table: &TableDef, columns: &[ResolvedColumn<'_>]) -> FieldSets {
    let mut fields = FieldSets::default();

    for resolved in columns {
        let column = resolved.column;
        fields.base.push(resolved.property.clone());

        if column.is_auto_generated() {
            fields.omitted.push(resolved.property.clone());
        } else if !resolved.validation.is_optional()
            && (column.is_nullable() || column.has_default() || !column.is_required())
        {
            fields.widened.push(resolved.property.clone());
        }
    }

    fields.primary_key = table
        .primary_key_columns()
        .iter()
        .map(|c| property(&c.name))
        .collect();

    fields
}

fn list_config(table: &TableDef) -> ListConfig {
    let ui = &table.ui;
    let filterable = match &ui.filterable {
        Some(names) => table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| names.contains(&c.name))
            .map(|(i, _)| i)
            .collect(),
        None => table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.ui.hidden)
            .map(|(i, _)| i)
            .collect(),
    };

    ListConfig {
        searchable: ui.searchable.iter().map(|c| property(c)).collect(),
        sortable: ui.sortable.iter().map(|c| property(c)).collect(),
        filterable,
        default_sort: ui
            .default_sort
            .as_ref()
            .map(|sort| (property(&sort.field), sort.direction)),
        page_size: ui.page_size,
    }
}

fn seed_rows(table: &TableDef) -> Vec<ResolvedSeedRow<'_>> {
    table
        .seed
        .iter()
        .map(|record| {
            table
                .columns
                .iter()
                .enumerate()
                .filter_map(|(i, column)| record.get(&column.name).map(|value| (i, value)))
                .collect()
        })
        .collect()
}

/// An enum with its derived identifiers.
#[derive(Debug, Clone)]
pub struct ResolvedEnum<'a> {
    pub definition: &'a EnumDef,
    pub names: EnumNames,
}

/// Resolve every enum of the model, in canonical order.
pub fn resolve_enums(model: &SchemaModel) -> Vec<ResolvedEnum<'_>> {
    model
        .enums
        .iter()
        .map(|definition| ResolvedEnum {
            definition,
            names: EnumNames::new(definition),
        })
        .collect()
}
