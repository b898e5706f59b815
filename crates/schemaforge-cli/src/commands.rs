//! Subcommand execution.

use schemaforge_codegen::{compile_dir, ArtifactKind, CompileError, CompiledSchema};
use thiserror::Error;

use crate::{Args, Command};

/// Errors reported by the command-line interface.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("no artifact at '{path}' (use `list` to see generated paths)")]
    UnknownArtifact { path: String },

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Compile the schema named by `args` and run its subcommand.
///
/// Returns the text to print on stdout.
pub fn run(args: Args) -> Result<String, CliError> {
    let root = args.root.clone();
    let command = args.command.clone();
    let (loader, codegen) = args.into_config()?;

    tracing::debug!(
        root = %root.display(),
        workers = codegen.workers,
        "compiling schema"
    );
    let compiled = compile_dir(&root, &loader, &codegen)?;

    execute(&command, &compiled)
}

/// Run one subcommand against a compiled schema.
pub fn execute(command: &Command, compiled: &CompiledSchema) -> Result<String, CliError> {
    match command {
        Command::Check => Ok(summary(compiled)),
        Command::List { json: false } => {
            let mut out = String::new();
            for path in compiled.paths() {
                out.push_str(path);
                out.push('\n');
            }
            Ok(out)
        }
        Command::List { json: true } => {
            let entries: Vec<serde_json::Value> = compiled
                .artifacts()
                .iter()
                .map(|artifact| {
                    serde_json::json!({
                        "path": artifact.path,
                        "kind": artifact.kind.as_str(),
                        "bytes": artifact.content.len(),
                    })
                })
                .collect();
            let mut out = serde_json::to_string_pretty(&entries)?;
            out.push('\n');
            Ok(out)
        }
        Command::Print { path } => compiled
            .get(path)
            .map(|artifact| artifact.content.clone())
            .ok_or_else(|| CliError::UnknownArtifact { path: path.clone() }),
    }
}

fn summary(compiled: &CompiledSchema) -> String {
    let counts: Vec<String> = ArtifactKind::ALL
        .iter()
        .map(|&kind| format!("{} {}", compiled.by_kind(kind).count(), kind))
        .collect();
    format!(
        "ok: {} artifacts ({})\n",
        compiled.len(),
        counts.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn schema_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let tables = dir.path().join("tables");
        fs::create_dir_all(&tables).unwrap();
        fs::write(
            tables.join("tags.json"),
            r#"{ "name": "tags", "columns": { "id": { "type": "serial" }, "label": { "type": "varchar" } } }"#,
        )
        .unwrap();
        dir
    }

    fn run_with(dir: &TempDir, rest: &[&str]) -> Result<String, CliError> {
        let root = dir.path().to_str().unwrap().to_string();
        let mut argv = vec!["schemaforge", "--root", root.as_str()];
        argv.extend_from_slice(rest);
        run(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_list() {
        let dir = schema_dir();
        let output = run_with(&dir, &["list"]).unwrap();
        assert_eq!(
            output,
            "schema/enums.ts\nschema/tag.ts\nschema/index.ts\n\
             validation/enums.ts\nvalidation/tag.ts\nvalidation/index.ts\n\
             types/enums.ts\ntypes/tag.ts\ntypes/index.ts\n"
        );
    }

    #[test]
    fn test_list_json() {
        let dir = schema_dir();
        let output = run_with(&dir, &["list", "--json"]).unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(entries.len(), 9);
        assert_eq!(entries[1]["path"], "schema/tag.ts");
        assert_eq!(entries[1]["kind"], "storage");
    }

    #[test]
    fn test_check_summary() {
        let dir = schema_dir();
        let output = run_with(&dir, &["check"]).unwrap();
        assert_eq!(
            output,
            "ok: 9 artifacts (3 storage, 3 validation, 3 types, 0 seed)\n"
        );
    }

    #[test]
    fn test_print() {
        let dir = schema_dir();
        let output = run_with(&dir, &["print", "schema/tag.ts"]).unwrap();
        assert!(output.contains("export const tags = pgTable('tags', {\n"));

        let err = run_with(&dir, &["print", "schema/nope.ts"]).unwrap_err();
        assert!(matches!(err, CliError::UnknownArtifact { .. }));
    }

    #[test]
    fn test_missing_tables_dir() {
        let dir = TempDir::new().unwrap();
        let err = run_with(&dir, &["check"]).unwrap_err();
        assert!(matches!(err, CliError::Compile(CompileError::Load(_))));
    }
}
