//! Code generation configuration.

use std::path::Path;

use serde::Deserialize;

use crate::artifact::ArtifactKind;
use crate::error::{CompileError, Result};

/// Default module providing the storage-layer constructors.
pub const DEFAULT_STORAGE_IMPORT: &str = "drizzle-orm/pg-core";

/// Default module providing `relations`.
pub const DEFAULT_ORM_IMPORT: &str = "drizzle-orm";

/// Default module providing `z`.
pub const DEFAULT_VALIDATION_IMPORT: &str = "zod";

/// Default banner written at the top of every artifact.
pub const DEFAULT_HEADER: &str = "This file is generated by schemaforge. Do not edit it by hand.";

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(4)
        .max(1)
}

/// Code generation configuration.
///
/// Threaded explicitly into the compiler and every emitter; nothing is read
/// from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CodegenConfig {
    /// Module imported for `pgTable` and column constructors.
    pub storage_import: String,

    /// Module imported for `relations`.
    pub orm_import: String,

    /// Module imported for `z`.
    pub validation_import: String,

    /// Banner comment (may span several lines).
    pub header: String,

    /// Number of emission worker threads.
    pub workers: usize,

    /// Output directory for storage artifacts.
    pub schema_dir: String,

    /// Output directory for validation artifacts.
    pub validation_dir: String,

    /// Output directory for type artifacts.
    pub types_dir: String,

    /// Output directory for seed artifacts.
    pub seeds_dir: String,

    /// Whether seed artifacts are produced.
    pub emit_seeds: bool,
}

impl CodegenConfig {
    /// Create a configuration with the default output layout.
    pub fn new() -> Self {
        Self {
            storage_import: DEFAULT_STORAGE_IMPORT.to_string(),
            orm_import: DEFAULT_ORM_IMPORT.to_string(),
            validation_import: DEFAULT_VALIDATION_IMPORT.to_string(),
            header: DEFAULT_HEADER.to_string(),
            workers: default_workers(),
            schema_dir: "schema".to_string(),
            validation_dir: "validation".to_string(),
            types_dir: "types".to_string(),
            seeds_dir: "seeds".to_string(),
            emit_seeds: true,
        }
    }

    /// Parse a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| CompileError::config(format!("invalid codegen config: {}", e)))?;
        config.check()
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CompileError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// Set the storage import module.
    pub fn with_storage_import(mut self, module: impl Into<String>) -> Self {
        self.storage_import = module.into();
        self
    }

    /// Set the validation import module.
    pub fn with_validation_import(mut self, module: impl Into<String>) -> Self {
        self.validation_import = module.into();
        self
    }

    /// Set the banner comment.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the number of worker threads.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the output directory for one artifact kind.
    pub fn with_dir(mut self, kind: ArtifactKind, dir: impl Into<String>) -> Self {
        let dir = dir.into().trim_matches('/').to_string();
        match kind {
            ArtifactKind::Storage => self.schema_dir = dir,
            ArtifactKind::Validation => self.validation_dir = dir,
            ArtifactKind::Types => self.types_dir = dir,
            ArtifactKind::Seed => self.seeds_dir = dir,
        }
        self
    }

    /// Disable seed artifacts.
    pub fn without_seeds(mut self) -> Self {
        self.emit_seeds = false;
        self
    }

    /// Output directory for an artifact kind.
    pub fn dir(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Storage => &self.schema_dir,
            ArtifactKind::Validation => &self.validation_dir,
            ArtifactKind::Types => &self.types_dir,
            ArtifactKind::Seed => &self.seeds_dir,
        }
    }

    /// Reject configurations that would produce unusable paths.
    pub fn check(mut self) -> Result<Self> {
        self.workers = self.workers.max(1);

        let mut seen: Vec<&str> = Vec::new();
        for kind in ArtifactKind::ALL {
            let dir = self.dir(kind);
            if dir.is_empty() {
                return Err(CompileError::config(format!(
                    "output directory for {} artifacts is empty",
                    kind
                )));
            }
            if dir.split('/').any(|segment| segment == "..") {
                return Err(CompileError::config(format!(
                    "output directory '{}' leaves the output root",
                    dir
                )));
            }
            if seen.contains(&dir) {
                return Err(CompileError::config(format!(
                    "output directory '{}' is used by more than one artifact kind",
                    dir
                )));
            }
            seen.push(dir);
        }

        Ok(self)
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self::new()
    }
}
