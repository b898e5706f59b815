//! Compiler pipeline: validate, resolve, emit, aggregate.

use std::path::Path;

use schemaforge_core::{
    validate_model, EmissionError, LoaderConfig, SchemaLoader, SchemaModel, TableDef,
};

use crate::aggregate::aggregate;
use crate::artifact::{Artifact, ArtifactKind, CompiledSchema};
use crate::config::CodegenConfig;
use crate::emit::{self, enums::ENUMS_STEM};
use crate::error::{CompileError, Result};
use crate::names::check_collisions;
use crate::pool::run_indexed;
use crate::resolved::{resolve_enums, ResolvedTable};

/// Text produced for one table.
#[derive(Debug)]
struct TableOutput {
    module: String,
    storage: String,
    validation: String,
    types: String,
    seed: Option<String>,
}

impl TableOutput {
    fn get(&self, kind: ArtifactKind) -> Option<&str> {
        match kind {
            ArtifactKind::Storage => Some(self.storage.as_str()),
            ArtifactKind::Validation => Some(self.validation.as_str()),
            ArtifactKind::Types => Some(self.types.as_str()),
            ArtifactKind::Seed => self.seed.as_deref(),
        }
    }
}

/// Compiles a [`SchemaModel`] into generated artifacts.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CodegenConfig,
}

impl Compiler {
    /// Create a compiler with the given configuration.
    pub fn new(config: CodegenConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Compile a model.
    ///
    /// Validation stops at the first invalid table. Emission runs every table
    /// and reports all emission errors together, name collisions first.
    /// Either way no artifact is returned on failure.
    pub fn compile(&self, model: &SchemaModel) -> Result<CompiledSchema> {
        let config = &self.config;

        validate_model(model)
            .map_err(|(table, issues)| CompileError::Validation { table, issues })?;

        let outputs = run_indexed(model.tables.len(), config.workers, |index| {
            self.emit_table(&model.tables[index], model)
        });

        let mut tables = Vec::with_capacity(outputs.len());
        let mut errors: Vec<EmissionError> = check_collisions(model);
        for output in outputs {
            match output {
                Ok(output) => tables.push(output),
                Err(table_errors) => errors.extend(table_errors),
            }
        }
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "emission failed");
            return Err(CompileError::Emission(errors));
        }

        let enums = resolve_enums(model);
        let mut artifacts = Vec::new();

        for kind in [
            ArtifactKind::Storage,
            ArtifactKind::Validation,
            ArtifactKind::Types,
        ] {
            let content = match kind {
                ArtifactKind::Storage => emit::enums::emit_storage(&enums, config),
                ArtifactKind::Validation => emit::enums::emit_validation(&enums, config),
                _ => emit::enums::emit_types(&enums, config),
            };
            artifacts.push(Artifact::new(kind, config.dir(kind), ENUMS_STEM, content));
            self.push_tables(kind, &tables, &mut artifacts);
        }

        if config.emit_seeds && tables.iter().any(|t| t.seed.is_some()) {
            self.push_tables(ArtifactKind::Seed, &tables, &mut artifacts);
        }

        tracing::info!(
            tables = model.tables.len(),
            enums = model.enums.len(),
            artifacts = artifacts.len(),
            "schema compiled"
        );

        Ok(CompiledSchema::new(artifacts))
    }

    fn emit_table(
        &self,
        table: &TableDef,
        model: &SchemaModel,
    ) -> std::result::Result<TableOutput, Vec<EmissionError>> {
        let resolved = ResolvedTable::build(table, model)?;
        let config = &self.config;

        let output = TableOutput {
            module: resolved.names.module.clone(),
            storage: emit::storage::emit(&resolved, config),
            validation: emit::validation::emit(&resolved, config),
            types: emit::types::emit(&resolved, config),
            seed: if config.emit_seeds {
                emit::seed::emit(&resolved, config)
            } else {
                None
            },
        };
        tracing::debug!(table = %table.name, module = %output.module, "table emitted");
        Ok(output)
    }

    /// Append one artifact per table of `kind`, then the barrel.
    fn push_tables(
        &self,
        kind: ArtifactKind,
        tables: &[TableOutput],
        artifacts: &mut Vec<Artifact>,
    ) {
        let dir = self.config.dir(kind);
        let mut modules = Vec::new();
        for table in tables {
            if let Some(content) = table.get(kind) {
                artifacts.push(Artifact::new(kind, dir, &table.module, content.to_string()));
                modules.push(table.module.as_str());
            }
        }
        artifacts.push(aggregate(kind, &modules, &self.config));
    }
}

/// Load the descriptors under `root` and compile them.
pub fn compile_dir(
    root: &Path,
    loader: &LoaderConfig,
    config: &CodegenConfig,
) -> Result<CompiledSchema> {
    let model = SchemaLoader::new(loader.clone()).load_dir(root)?;
    Compiler::new(config.clone()).compile(&model)
}
