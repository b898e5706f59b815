//! Descriptor loader.
//!
//! Reads enum and table descriptors (JSON) into a [`SchemaModel`]. Descriptors
//! are parsed into private `Raw*` structures first and then converted, so the
//! public model never carries serde concerns. Unknown keys are ignored.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::catalog::{
    ColumnDef, ColumnType, ColumnUi, DefaultValue, DeleteBehavior, EnumDef, EnumValue,
    ForeignKey, IndexDef, OrderBy, OrderDirection, RelationKind, RelationshipDecl, SchemaModel,
    SeedRow, TableDef, TableUi, ValidationRules,
};
use crate::config::LoaderConfig;
use crate::error::LoadError;
use crate::naming::{is_enum_value, is_identifier};

/// Strings accepted as the current-timestamp default sentinel.
const TIMESTAMP_SENTINELS: &[&str] = &["now", "now()", "CURRENT_TIMESTAMP", "current_timestamp"];

/// Loads descriptors into a schema model.
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    config: LoaderConfig,
}

impl SchemaLoader {
    /// Create a loader with the given configuration.
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// The loader configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load every descriptor under a schema root directory.
    ///
    /// Files are read in sorted file-name order, which becomes the canonical
    /// order of the model. A missing enums directory means no enums; a missing
    /// tables directory is an error.
    pub fn load_dir(&self, root: &Path) -> Result<SchemaModel, LoadError> {
        let enum_files = self.list_descriptors(&root.join(&self.config.enums_dir), false)?;
        let table_files = self.list_descriptors(&root.join(&self.config.tables_dir), true)?;

        let enum_sources = read_all(enum_files)?;
        let table_sources = read_all(table_files)?;

        tracing::debug!(
            root = %root.display(),
            enums = enum_sources.len(),
            tables = table_sources.len(),
            "read descriptor files"
        );

        self.build(
            enum_sources.iter().map(|(p, s)| (p.as_path(), s.as_str())),
            table_sources.iter().map(|(p, s)| (p.as_path(), s.as_str())),
        )
    }

    /// Load descriptors from in-memory `(path, text)` pairs.
    ///
    /// The order of the slices is the canonical order.
    pub fn load_sources(
        &self,
        enums: &[(&str, &str)],
        tables: &[(&str, &str)],
    ) -> Result<SchemaModel, LoadError> {
        self.build(
            enums.iter().map(|(p, s)| (Path::new(*p), *s)),
            tables.iter().map(|(p, s)| (Path::new(*p), *s)),
        )
    }

    fn build<'a>(
        &self,
        enum_sources: impl Iterator<Item = (&'a Path, &'a str)>,
        table_sources: impl Iterator<Item = (&'a Path, &'a str)>,
    ) -> Result<SchemaModel, LoadError> {
        let mut model = SchemaModel::new();

        let mut enum_names = HashSet::new();
        for (path, text) in enum_sources {
            for definition in self.parse_enums(path, text)? {
                if !enum_names.insert(definition.name.clone()) {
                    return Err(LoadError::shape(
                        path,
                        format!("duplicate enum name '{}'", definition.name),
                    ));
                }
                model.enums.push(definition);
            }
        }

        let mut table_names = HashSet::new();
        for (path, text) in table_sources {
            let table = parse_table(path, text)?;
            if !table.name.is_empty() && !table_names.insert(table.name.clone()) {
                return Err(LoadError::shape(
                    path,
                    format!("duplicate table name '{}'", table.name),
                ));
            }
            model.tables.push(table);
        }

        tracing::debug!(
            enums = model.enums.len(),
            tables = model.tables.len(),
            "schema model loaded"
        );

        Ok(model)
    }

    fn list_descriptors(&self, dir: &Path, required: bool) -> Result<Vec<PathBuf>, LoadError> {
        if !dir.is_dir() {
            if required {
                return Err(LoadError::shape(dir, "descriptor directory not found"));
            }
            return Ok(Vec::new());
        }

        let suffix = format!(".{}", self.config.extension);
        let entries = fs::read_dir(dir).map_err(|e| LoadError::new(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| LoadError::new(dir, e))?.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(&suffix));
            if matches && path.is_file() {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Parse one enum descriptor file.
    ///
    /// The file holds either a single enum object with a `values` key, or a
    /// mapping of enum name to definition (an object or a bare value list).
    pub fn parse_enums(&self, path: &Path, text: &str) -> Result<Vec<EnumDef>, LoadError> {
        let value: Value = serde_json::from_str(text).map_err(|e| LoadError::new(path, e))?;
        let Value::Object(object) = value else {
            return Err(LoadError::shape(path, "enum descriptor must be a JSON object"));
        };

        if object.contains_key("values") {
            let raw: RawEnum =
                serde_json::from_value(Value::Object(object)).map_err(|e| LoadError::new(path, e))?;
            let fallback = self.file_stem(path);
            return Ok(vec![convert_enum(path, fallback, raw)?]);
        }

        let mut definitions = Vec::with_capacity(object.len());
        for (name, body) in object {
            let raw = match body {
                Value::Array(_) => RawEnum {
                    values: serde_json::from_value(body).map_err(|e| LoadError::new(path, e))?,
                    ..RawEnum::default()
                },
                other => serde_json::from_value(other).map_err(|e| LoadError::new(path, e))?,
            };
            definitions.push(convert_enum(path, name, raw)?);
        }
        Ok(definitions)
    }

    fn file_stem(&self, path: &Path) -> String {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        file_name
            .strip_suffix(&format!(".{}", self.config.extension))
            .unwrap_or(file_name)
            .to_string()
    }
}

fn read_all(files: Vec<PathBuf>) -> Result<Vec<(PathBuf, String)>, LoadError> {
    files
        .into_iter()
        .map(|path| {
            let text = fs::read_to_string(&path).map_err(|e| LoadError::new(&path, e))?;
            Ok((path, text))
        })
        .collect()
}

fn convert_enum(path: &Path, fallback_name: String, raw: RawEnum) -> Result<EnumDef, LoadError> {
    let name = raw.name.unwrap_or(fallback_name);
    if !is_identifier(&name) {
        return Err(LoadError::shape(
            path,
            format!("enum name '{}' is not an identifier", name),
        ));
    }
    if raw.values.is_empty() {
        return Err(LoadError::shape(
            path,
            format!("enum '{}' has no values", name),
        ));
    }

    let mut seen = HashSet::new();
    let mut values = Vec::with_capacity(raw.values.len());
    for raw_value in raw.values {
        let mut value = match raw_value {
            RawEnumValue::Plain(value) => EnumValue::new(value),
            RawEnumValue::Detailed {
                value,
                label,
                color,
                icon,
            } => EnumValue {
                value,
                label,
                color,
                icon,
            },
        };

        if !is_enum_value(&value.value) {
            return Err(LoadError::shape(
                path,
                format!("enum '{}' value '{}' is not identifier-safe", name, value.value),
            ));
        }
        if !seen.insert(value.value.clone()) {
            return Err(LoadError::shape(
                path,
                format!("enum '{}' repeats value '{}'", name, value.value),
            ));
        }

        if value.label.is_none() {
            value.label = raw.labels.get(&value.value).cloned();
        }
        if value.color.is_none() {
            value.color = raw.colors.get(&value.value).cloned();
        }
        if value.icon.is_none() {
            value.icon = raw.icons.get(&value.value).cloned();
        }
        values.push(value);
    }

    Ok(EnumDef {
        name,
        values,
        description: raw.description,
    })
}

/// Parse one table descriptor file.
pub fn parse_table(path: &Path, text: &str) -> Result<TableDef, LoadError> {
    let raw: RawTable = serde_json::from_str(text).map_err(|e| LoadError::new(path, e))?;

    if !raw.name.is_empty() && !is_identifier(&raw.name) {
        return Err(LoadError::shape(
            path,
            format!("table name '{}' is not an identifier", raw.name),
        ));
    }

    let mut columns = Vec::with_capacity(raw.columns.len());
    for (name, body) in raw.columns {
        let raw_column: RawColumn = serde_json::from_value(body).map_err(|e| LoadError::new(path, e))?;
        columns.push(convert_column(path, name, raw_column)?);
    }

    let mut indexes = Vec::with_capacity(raw.indexes.len());
    for (name, body) in raw.indexes {
        let raw_index: RawIndex = serde_json::from_value(body).map_err(|e| LoadError::new(path, e))?;
        if raw_index.columns.is_empty() {
            return Err(LoadError::shape(
                path,
                format!("index '{}' lists no columns", name),
            ));
        }
        indexes.push(IndexDef {
            name,
            columns: raw_index.columns,
            unique: raw_index.unique,
        });
    }

    let mut relationships = Vec::with_capacity(raw.relationships.len());
    for (name, body) in raw.relationships {
        let raw_relation: RawRelationship =
            serde_json::from_value(body).map_err(|e| LoadError::new(path, e))?;
        relationships.push(convert_relationship(path, name, raw_relation)?);
    }

    Ok(TableDef {
        name: raw.name,
        display_name: raw.display_name,
        icon: raw.icon,
        description: raw.description,
        columns,
        indexes,
        relationships,
        seed: raw.seed,
        ui: convert_table_ui(path, raw.ui)?,
    })
}

fn convert_column(path: &Path, name: String, raw: RawColumn) -> Result<ColumnDef, LoadError> {
    if !is_identifier(&name) {
        return Err(LoadError::shape(
            path,
            format!("column name '{}' is not an identifier", name),
        ));
    }

    let column_type = ColumnType::from_tag(&raw.column_type);
    let default = match raw.default {
        Some(value) => convert_default(path, &name, value)?,
        None => None,
    };

    let references = match raw.references {
        Some(reference) => {
            let on_delete = match reference.on_delete.as_deref() {
                None => DeleteBehavior::default(),
                Some(s) => DeleteBehavior::from_str(s).ok_or_else(|| {
                    LoadError::shape(
                        path,
                        format!("column '{}' has unknown onDelete policy '{}'", name, s),
                    )
                })?,
            };
            Some(ForeignKey {
                table: reference.table,
                column: reference.column,
                on_delete,
            })
        }
        None => None,
    };

    // Auto-increment and primary-key columns are never nullable.
    let nullable = raw.nullable && !raw.primary_key && !column_type.is_auto_increment();

    Ok(ColumnDef {
        name,
        column_type,
        nullable,
        length: raw.length,
        precision: raw.precision,
        scale: raw.scale,
        default,
        unique: raw.unique,
        primary_key: raw.primary_key,
        references,
        validation: ValidationRules {
            required: raw.validation.required,
            min: raw.validation.min,
            max: raw.validation.max,
            min_length: raw.validation.min_length,
            max_length: raw.validation.max_length,
            pattern: raw.validation.pattern,
            email: raw.validation.email,
            url: raw.validation.url,
        },
        ui: ColumnUi {
            label: raw.ui.label,
            placeholder: raw.ui.placeholder,
            help_text: raw.ui.help_text,
            section: raw.ui.section,
            order: raw.ui.order,
            format: raw.ui.format,
            readonly: raw.ui.readonly,
            hidden: raw.ui.hidden,
        },
    })
}

fn convert_default(
    path: &Path,
    column: &str,
    value: Value,
) -> Result<Option<DefaultValue>, LoadError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(DefaultValue::Bool(b))),
        Value::Number(n) => Ok(Some(DefaultValue::Number(n.to_string()))),
        Value::String(s) if TIMESTAMP_SENTINELS.contains(&s.as_str()) => {
            Ok(Some(DefaultValue::CurrentTimestamp))
        }
        Value::String(s) => Ok(Some(DefaultValue::String(s))),
        Value::Array(_) | Value::Object(_) => Err(LoadError::shape(
            path,
            format!("default of column '{}' must be a literal", column),
        )),
    }
}

fn convert_relationship(
    path: &Path,
    name: String,
    raw: RawRelationship,
) -> Result<RelationshipDecl, LoadError> {
    if !is_identifier(&name) {
        return Err(LoadError::shape(
            path,
            format!("relationship name '{}' is not an identifier", name),
        ));
    }

    let kind = RelationKind::from_str(&raw.kind).ok_or_else(|| {
        LoadError::shape(
            path,
            format!("relationship '{}' has unknown type '{}'", name, raw.kind),
        )
    })?;

    if kind == RelationKind::ManyToMany && raw.through.is_none() {
        return Err(LoadError::shape(
            path,
            format!("many-to-many relationship '{}' needs a 'through' table", name),
        ));
    }

    Ok(RelationshipDecl {
        name,
        kind,
        target: raw.table,
        through: raw.through,
    })
}

fn convert_table_ui(path: &Path, raw: RawTableUi) -> Result<TableUi, LoadError> {
    let default_sort = match raw.default_sort {
        Some(sort) => {
            let direction = match sort.direction.as_deref() {
                None | Some("asc") | Some("ASC") => OrderDirection::Asc,
                Some("desc") | Some("DESC") => OrderDirection::Desc,
                Some(other) => {
                    return Err(LoadError::shape(
                        path,
                        format!("unknown sort direction '{}'", other),
                    ))
                }
            };
            Some(OrderBy {
                field: sort.field,
                direction,
            })
        }
        None => None,
    };

    Ok(TableUi {
        list_columns: raw.list_columns,
        searchable: raw.searchable,
        sortable: raw.sortable,
        filterable: raw.filterable,
        default_sort,
        page_size: raw.page_size,
    })
}

// Raw descriptor structures, used only for deserialization.

#[derive(Debug, Default, Deserialize)]
struct RawEnum {
    name: Option<String>,
    values: Vec<RawEnumValue>,
    #[serde(default)]
    labels: HashMap<String, String>,
    #[serde(default)]
    colors: HashMap<String, String>,
    #[serde(default)]
    icons: HashMap<String, String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEnumValue {
    Plain(String),
    Detailed {
        value: String,
        label: Option<String>,
        color: Option<String>,
        icon: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTable {
    #[serde(default)]
    name: String,
    display_name: Option<String>,
    icon: Option<String>,
    description: Option<String>,
    #[serde(default)]
    columns: Map<String, Value>,
    #[serde(default)]
    indexes: Map<String, Value>,
    #[serde(default)]
    relationships: Map<String, Value>,
    #[serde(default, alias = "seedData")]
    seed: Vec<SeedRow>,
    #[serde(default)]
    ui: RawTableUi,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawColumn {
    #[serde(rename = "type")]
    column_type: String,
    #[serde(default)]
    nullable: bool,
    length: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
    default: Option<Value>,
    #[serde(default)]
    unique: bool,
    #[serde(default)]
    primary_key: bool,
    references: Option<RawReference>,
    #[serde(default)]
    validation: RawValidation,
    #[serde(default)]
    ui: RawColumnUi,
}

fn default_reference_column() -> String {
    "id".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReference {
    table: String,
    #[serde(default = "default_reference_column")]
    column: String,
    on_delete: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawValidation {
    required: Option<bool>,
    min: Option<f64>,
    max: Option<f64>,
    min_length: Option<u32>,
    max_length: Option<u32>,
    pattern: Option<String>,
    #[serde(default)]
    email: bool,
    #[serde(default)]
    url: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawColumnUi {
    label: Option<String>,
    placeholder: Option<String>,
    help_text: Option<String>,
    section: Option<String>,
    order: Option<i64>,
    format: Option<String>,
    #[serde(default)]
    readonly: bool,
    #[serde(default)]
    hidden: bool,
}

#[derive(Debug, Deserialize)]
struct RawIndex {
    columns: Vec<String>,
    #[serde(default)]
    unique: bool,
}

#[derive(Debug, Deserialize)]
struct RawRelationship {
    #[serde(rename = "type", alias = "kind")]
    kind: String,
    #[serde(alias = "target")]
    table: String,
    through: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTableUi {
    #[serde(default)]
    list_columns: Vec<String>,
    #[serde(default)]
    searchable: Vec<String>,
    #[serde(default)]
    sortable: Vec<String>,
    filterable: Option<Vec<String>>,
    default_sort: Option<RawSort>,
    page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawSort {
    field: String,
    direction: Option<String>,
}
