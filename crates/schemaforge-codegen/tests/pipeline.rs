//! End-to-end compiler tests over descriptors written to disk.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use schemaforge_codegen::{compile_dir, ArtifactKind, CodegenConfig, CompileError, Compiler};
use schemaforge_core::{
    EmissionErrorKind, IssueKind, LoaderConfig, SchemaLoader, SchemaModel,
};
use tempfile::TempDir;

const USER_STATUS: &str = r#"{ "name": "user_status", "values": ["active", "pending"] }"#;

const USERS: &str = r#"{
    "name": "users",
    "columns": {
        "id": { "type": "serial" },
        "email": { "type": "varchar", "length": 255, "unique": true, "validation": { "email": true } },
        "status": { "type": "user_status", "default": "pending" },
        "nickname": { "type": "varchar", "nullable": true, "default": "guest" },
        "created_at": { "type": "timestamp", "default": "now" }
    }
}"#;

const GUESTS: &str = r#"{
    "name": "guests",
    "columns": {
        "id": { "type": "serial" },
        "full_name": { "type": "varchar", "length": 120 }
    },
    "seed": [
        { "full_name": "Ada Lovelace" }
    ]
}"#;

const ROOMS: &str = r#"{
    "name": "rooms",
    "columns": {
        "id": { "type": "serial" },
        "number": { "type": "varchar", "length": 8 }
    }
}"#;

const BOOKINGS: &str = r#"{
    "name": "bookings",
    "columns": {
        "id": { "type": "serial" },
        "guest_id": {
            "type": "integer",
            "references": { "table": "guests", "onDelete": "cascade" }
        },
        "reference": { "type": "varchar", "length": 32 }
    },
    "indexes": {
        "bookings_reference_idx": { "columns": ["reference"], "unique": true }
    }
}"#;

const BOOKING_ROOMS: &str = r#"{
    "name": "booking_rooms",
    "columns": {
        "booking_id": { "type": "integer", "primaryKey": true, "references": { "table": "bookings" } },
        "room_id": { "type": "integer", "primaryKey": true, "references": { "table": "rooms" } }
    }
}"#;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn hotel() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "enums/user_status.json", USER_STATUS);
    write(root, "tables/users.json", USERS);
    write(root, "tables/guests.json", GUESTS);
    write(root, "tables/rooms.json", ROOMS);
    write(root, "tables/bookings.json", BOOKINGS);
    write(root, "tables/booking_rooms.json", BOOKING_ROOMS);
    dir
}

fn config() -> CodegenConfig {
    CodegenConfig::new().with_header("Generated.")
}

fn content<'a>(compiled: &'a schemaforge_codegen::CompiledSchema, path: &str) -> &'a str {
    match compiled.get(path) {
        Some(artifact) => &artifact.content,
        None => panic!("missing artifact {}", path),
    }
}

#[test]
fn test_artifact_paths() {
    let dir = hotel();
    let compiled = compile_dir(dir.path(), &LoaderConfig::default(), &config()).unwrap();

    let mut expected = Vec::new();
    for dir in ["schema", "validation", "types"] {
        expected.push(format!("{}/enums.ts", dir));
        for module in ["booking_room", "booking", "guest", "room", "user"] {
            expected.push(format!("{}/{}.ts", dir, module));
        }
        expected.push(format!("{}/index.ts", dir));
    }
    expected.push("seeds/guest.ts".to_string());
    expected.push("seeds/index.ts".to_string());

    assert_eq!(compiled.paths(), expected);
    assert_eq!(compiled.by_kind(ArtifactKind::Seed).count(), 2);
}

#[test]
fn test_enum_default_scenario() {
    let dir = hotel();
    let compiled = compile_dir(dir.path(), &LoaderConfig::default(), &config()).unwrap();
    let validation = content(&compiled, "validation/user.ts");

    assert!(validation.contains("import { userStatusSchema } from './enums';\n"));
    assert!(validation.contains("  status: userStatusSchema.default('pending'),\n"));
    assert!(validation.contains("    status: userSchema.shape.status.optional(),\n"));
    assert!(validation.contains("  .omit({ id: true, createdAt: true })\n"));

    let storage = content(&compiled, "schema/user.ts");
    assert!(storage.contains("  status: userStatusEnum('status').notNull().default('pending'),\n"));
    assert!(storage.contains("  createdAt: timestamp('created_at').notNull().defaultNow(),\n"));
}

#[test]
fn test_nullable_with_default_is_not_optional() {
    let dir = hotel();
    let compiled = compile_dir(dir.path(), &LoaderConfig::default(), &config()).unwrap();
    let validation = content(&compiled, "validation/user.ts");

    assert!(validation.contains("  nickname: z.string().default('guest').nullable(),\n"));
    assert!(!validation.contains("nickname: z.string().default('guest').nullable().optional()"));
}

#[test]
fn test_serial_is_primary_key() {
    let dir = hotel();
    let compiled = compile_dir(dir.path(), &LoaderConfig::default(), &config()).unwrap();
    let storage = content(&compiled, "schema/room.ts");

    assert!(storage.contains("  id: serial('id').primaryKey(),\n"));
    assert!(!storage.contains("serial('id').notNull()"));
}

#[test]
fn test_incoming_relation_without_declaration() {
    let dir = hotel();
    let compiled = compile_dir(dir.path(), &LoaderConfig::default(), &config()).unwrap();

    let types = content(&compiled, "types/guest.ts");
    assert!(types.contains("import type { Booking } from './booking';\n"));
    assert!(types.contains("export interface GuestWithRelations extends Guest {\n  bookings?: Booking[];\n}\n"));

    let storage = content(&compiled, "schema/guest.ts");
    assert!(!storage.contains("relations("));

    let bookings = content(&compiled, "types/booking.ts");
    assert!(bookings.contains("export interface BookingWithGuest extends Booking {\n  guest: Guest;\n}\n"));
}

#[test]
fn test_composite_key() {
    let dir = hotel();
    let compiled = compile_dir(dir.path(), &LoaderConfig::default(), &config()).unwrap();
    let storage = content(&compiled, "schema/booking_room.ts");

    assert!(storage.contains("  pk: primaryKey({ columns: [table.bookingId, table.roomId] }),\n"));
    assert!(!storage.contains(".primaryKey()"));
    assert!(storage.contains("import { bookings } from './booking';\n"));
    assert!(storage.contains("import { rooms } from './room';\n"));

    let validation = content(&compiled, "validation/booking_room.ts");
    assert!(validation.contains(
        "export const updateBookingRoomSchema = insertBookingRoomSchema.partial().extend({\n  bookingId: bookingRoomSchema.shape.bookingId,\n  roomId: bookingRoomSchema.shape.roomId,\n});\n"
    ));
}

#[test]
fn test_seed_artifact() {
    let dir = hotel();
    let compiled = compile_dir(dir.path(), &LoaderConfig::default(), &config()).unwrap();

    assert_eq!(
        content(&compiled, "seeds/guest.ts"),
        "// Generated.\n\nimport type { NewGuest } from '../validation/guest';\n\nexport const guestSeed: NewGuest[] = [\n  { fullName: 'Ada Lovelace' },\n];\n"
    );
    assert_eq!(
        content(&compiled, "seeds/index.ts"),
        "// Generated.\n\nexport * from './guest';\n"
    );

    let without = compile_dir(
        dir.path(),
        &LoaderConfig::default(),
        &config().without_seeds(),
    )
    .unwrap();
    assert!(without.get("seeds/guest.ts").is_none());
    assert!(without.get("seeds/index.ts").is_none());
}

#[test]
fn test_barrels() {
    let dir = hotel();
    let compiled = compile_dir(dir.path(), &LoaderConfig::default(), &config()).unwrap();

    assert_eq!(
        content(&compiled, "types/index.ts"),
        "// Generated.\n\n\
         export * from './enums';\n\
         export * from './booking_room';\n\
         export * from './booking';\n\
         export * from './guest';\n\
         export * from './room';\n\
         export * from './user';\n"
    );
}

#[test]
fn test_compile_is_deterministic() {
    let dir = hotel();
    let loader = LoaderConfig::default();

    let first = compile_dir(dir.path(), &loader, &config().with_workers(4)).unwrap();
    let second = compile_dir(dir.path(), &loader, &config().with_workers(4)).unwrap();
    let serial = compile_dir(dir.path(), &loader, &config().with_workers(1)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, serial);
}

#[test]
fn test_dangling_references_are_all_reported() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tables/bookings.json", BOOKINGS);
    write(dir.path(), "tables/booking_rooms.json", BOOKING_ROOMS);

    let err = compile_dir(dir.path(), &LoaderConfig::default(), &config()).unwrap_err();
    let errors = err.emission_errors();

    let found: Vec<(&str, Option<&str>, EmissionErrorKind)> = errors
        .iter()
        .map(|e| (e.table.as_str(), e.column.as_deref(), e.kind))
        .collect();
    assert_eq!(
        found,
        vec![
            ("booking_rooms", Some("room_id"), EmissionErrorKind::DanglingTable),
            ("bookings", Some("guest_id"), EmissionErrorKind::DanglingTable),
        ]
    );
}

#[test]
fn test_singular_and_plural_tables_are_rejected() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "tables/category.json",
        r#"{ "name": "category", "columns": { "id": { "type": "serial" } } }"#,
    );
    write(
        dir.path(),
        "tables/categories.json",
        r#"{ "name": "categories", "columns": { "id": { "type": "serial" } } }"#,
    );

    let err = compile_dir(dir.path(), &LoaderConfig::default(), &config()).unwrap_err();
    let kinds: Vec<EmissionErrorKind> = err.emission_errors().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![EmissionErrorKind::NameCollision, EmissionErrorKind::NameCollision]
    );
    assert!(err.to_string().contains("module 'category'"));
}

#[test]
fn test_validation_stops_at_first_invalid_table() {
    let no_key = r#"{ "name": "notes", "columns": { "body": { "type": "text" } } }"#;
    let model: SchemaModel = SchemaLoader::default()
        .load_sources(&[], &[("tables/notes.json", no_key), ("tables/rooms.json", ROOMS)])
        .unwrap();

    match Compiler::new(config()).compile(&model) {
        Err(CompileError::Validation { table, issues }) => {
            assert_eq!(table, "notes");
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].kind, IssueKind::NoPrimaryKey);
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_custom_output_layout() {
    let dir = hotel();
    let config = config()
        .with_dir(ArtifactKind::Types, "api/types")
        .with_dir(ArtifactKind::Validation, "zod");
    let compiled = compile_dir(dir.path(), &LoaderConfig::default(), &config).unwrap();

    let types = content(&compiled, "api/types/user.ts");
    assert!(types.contains("from '../../zod/user';\n"));
    assert!(compiled.get("zod/enums.ts").is_some());
}

#[test]
fn test_load_error_surfaces() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tables/broken.json", "{ not json");

    let err = compile_dir(dir.path(), &LoaderConfig::default(), &config()).unwrap_err();
    assert!(matches!(err, CompileError::Load(_)));
}
