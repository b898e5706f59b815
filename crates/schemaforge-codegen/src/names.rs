//! Derived identifiers for generated code.
//!
//! Every generated name is computed here, once, and carried by value. The
//! emitters never build identifiers from string conventions themselves, so
//! the names one artifact exports are exactly the names another imports.

use std::collections::hash_map::{Entry, HashMap};

use schemaforge_core::naming::{singularize, to_camel_case, to_pascal_case};
use schemaforge_core::{EmissionError, EnumDef, SchemaModel};

use crate::aggregate::INDEX_STEM;
use crate::emit::enums::ENUMS_STEM;

/// Identifiers derived from a table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    /// Table name as declared (`booking_items`).
    pub table: String,
    /// Module file stem, the singular snake_case name (`booking_item`).
    pub module: String,
    /// Storage table constant (`bookingItems`).
    pub table_const: String,
    /// Storage relations constant (`bookingItemsRelations`).
    pub relations_const: String,
    /// Singular PascalCase stem (`BookingItem`).
    pub pascal: String,
    /// Base validation schema (`bookingItemSchema`).
    pub base_schema: String,
    /// Insert validation schema (`insertBookingItemSchema`).
    pub insert_schema: String,
    /// Update validation schema (`updateBookingItemSchema`).
    pub update_schema: String,
    /// Row type (`BookingItem`).
    pub select_type: String,
    /// Insert type (`NewBookingItem`).
    pub insert_type: String,
    /// Update type (`UpdateBookingItem`).
    pub update_type: String,
    /// Seed constant (`bookingItemSeed`).
    pub seed_const: String,
}

impl TableNames {
    /// Derive every identifier for a table.
    pub fn new(table: &str) -> Self {
        let module = singularize(table);
        let pascal = to_pascal_case(&module);
        let camel = to_camel_case(&module);
        let table_const = to_camel_case(table);

        Self {
            table: table.to_string(),
            relations_const: format!("{}Relations", table_const),
            table_const,
            base_schema: format!("{}Schema", camel),
            insert_schema: format!("insert{}Schema", pascal),
            update_schema: format!("update{}Schema", pascal),
            select_type: pascal.clone(),
            insert_type: format!("New{}", pascal),
            update_type: format!("Update{}", pascal),
            seed_const: format!("{}Seed", camel),
            pascal,
            module,
        }
    }

    /// `<Singular>ListResponse`
    pub fn list_response(&self) -> String {
        format!("{}ListResponse", self.pascal)
    }

    /// `<Singular>Response`
    pub fn response(&self) -> String {
        format!("{}Response", self.pascal)
    }

    /// `Create<Singular>Request`
    pub fn create_request(&self) -> String {
        format!("Create{}Request", self.pascal)
    }

    /// `Update<Singular>Request`
    pub fn update_request(&self) -> String {
        format!("Update{}Request", self.pascal)
    }

    /// `Delete<Singular>Response`
    pub fn delete_response(&self) -> String {
        format!("Delete{}Response", self.pascal)
    }

    /// `<Singular>ListParams`
    pub fn list_params(&self) -> String {
        format!("{}ListParams", self.pascal)
    }

    /// `<singular>ListDefaults`
    pub fn list_defaults(&self) -> String {
        format!("{}ListDefaults", to_camel_case(&self.module))
    }

    /// `<Singular>WithRelations`
    pub fn with_relations(&self) -> String {
        format!("{}WithRelations", self.pascal)
    }

    /// `<Singular>With<Relation>` for one relation.
    pub fn with_relation(&self, relation: &str) -> String {
        format!("{}With{}", self.pascal, to_pascal_case(relation))
    }
}

/// Identifiers derived from an enum definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumNames {
    /// Database enum name (the declared name).
    pub db_name: String,
    /// Storage enum constructor (`userStatusEnum`).
    pub storage_const: String,
    /// Validation schema (`userStatusSchema`).
    pub schema_const: String,
    /// Inferred type (`UserStatus`).
    pub type_name: String,
    /// Option list constant (`userStatusOptions`).
    pub options_const: String,
}

impl EnumNames {
    /// Derive every identifier for an enum. A conventional `_enum` suffix
    /// does not leak into the identifiers.
    pub fn new(definition: &EnumDef) -> Self {
        let camel = to_camel_case(definition.base_name());
        Self {
            db_name: definition.name.clone(),
            storage_const: format!("{}Enum", camel),
            schema_const: format!("{}Schema", camel),
            type_name: to_pascal_case(definition.base_name()),
            options_const: format!("{}Options", camel),
        }
    }
}

/// Check that no two tables or enums derive the same module stem, storage
/// constant, or type stem. Table modules also may not shadow the enum
/// artifact or the barrel. Errors follow enum order, then table order.
pub fn check_collisions(model: &SchemaModel) -> Vec<EmissionError> {
    let mut seen: HashMap<(&'static str, String), String> = HashMap::new();
    seen.insert(("module", ENUMS_STEM.to_string()), "the enum artifact".into());
    seen.insert(("module", INDEX_STEM.to_string()), "the barrel".into());

    let mut errors = Vec::new();
    let mut claim = |owner: &str, what: &'static str, name: String| match seen.entry((what, name)) {
        Entry::Occupied(entry) => errors.push(EmissionError::name_collision(
            owner,
            what,
            &entry.key().1,
            entry.get(),
        )),
        Entry::Vacant(entry) => {
            entry.insert(owner.to_string());
        }
    };

    for definition in &model.enums {
        let names = EnumNames::new(definition);
        claim(&definition.name, "storage constant", names.storage_const);
        claim(&definition.name, "type stem", names.type_name);
    }
    for table in &model.tables {
        let names = TableNames::new(&table.name);
        claim(&table.name, "module", names.module);
        claim(&table.name, "storage constant", names.table_const);
        claim(&table.name, "type stem", names.pascal);
    }

    errors
}

/// Property name of a column or relation in generated code.
pub fn property(name: &str) -> String {
    to_camel_case(name)
}

/// Relative module specifier from one output directory to a module in another.
///
/// `relative_module("types", "validation", "user")` is `../validation/user`.
pub fn relative_module(from_dir: &str, to_dir: &str, module: &str) -> String {
    if from_dir == to_dir {
        return format!("./{}", module);
    }
    let depth = from_dir.split('/').filter(|s| !s.is_empty()).count();
    format!("{}{}/{}", "../".repeat(depth), to_dir, module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemaforge_core::{EmissionErrorKind, TableDef};

    #[test]
    fn test_table_names() {
        let names = TableNames::new("booking_items");
        assert_eq!(names.module, "booking_item");
        assert_eq!(names.table_const, "bookingItems");
        assert_eq!(names.relations_const, "bookingItemsRelations");
        assert_eq!(names.base_schema, "bookingItemSchema");
        assert_eq!(names.insert_schema, "insertBookingItemSchema");
        assert_eq!(names.update_schema, "updateBookingItemSchema");
        assert_eq!(names.select_type, "BookingItem");
        assert_eq!(names.insert_type, "NewBookingItem");
        assert_eq!(names.update_type, "UpdateBookingItem");
        assert_eq!(names.seed_const, "bookingItemSeed");
        assert_eq!(names.with_relation("guest"), "BookingItemWithGuest");
        assert_eq!(names.list_defaults(), "bookingItemListDefaults");
    }

    #[test]
    fn test_enum_names_strip_suffix() {
        let names = EnumNames::new(&EnumDef::new("user_status_enum", ["active"]));
        assert_eq!(names.db_name, "user_status_enum");
        assert_eq!(names.storage_const, "userStatusEnum");
        assert_eq!(names.schema_const, "userStatusSchema");
        assert_eq!(names.type_name, "UserStatus");
        assert_eq!(names.options_const, "userStatusOptions");
    }

    #[test]
    fn test_singular_and_plural_tables_collide() {
        let model = SchemaModel::new()
            .with_table(TableDef::new("category"))
            .with_table(TableDef::new("categories"));
        let errors = check_collisions(&model);

        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.table == "categories"));
        assert!(errors
            .iter()
            .all(|e| e.kind == EmissionErrorKind::NameCollision));
        assert_eq!(
            errors[0].message,
            "module 'category' is already derived from 'category'"
        );
    }

    #[test]
    fn test_reserved_modules_and_enum_types() {
        let model = SchemaModel::new()
            .with_enum(EnumDef::new("room_type", ["single"]))
            .with_table(TableDef::new("indexes"))
            .with_table(TableDef::new("room_types"))
            .with_table(TableDef::new("guests"));
        let errors = check_collisions(&model);

        let found: Vec<(&str, &str)> = errors
            .iter()
            .map(|e| (e.table.as_str(), e.message.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![
                ("indexes", "module 'index' is already derived from 'the barrel'"),
                ("room_types", "type stem 'RoomType' is already derived from 'room_type'"),
            ]
        );
    }

    #[test]
    fn test_relative_module() {
        assert_eq!(relative_module("types", "types", "guest"), "./guest");
        assert_eq!(
            relative_module("types", "validation", "user"),
            "../validation/user"
        );
        assert_eq!(
            relative_module("api/types", "validation", "user"),
            "../../validation/user"
        );
    }
}
