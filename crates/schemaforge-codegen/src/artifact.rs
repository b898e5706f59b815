//! Generated artifacts and the compiler output.

use std::fmt;

/// The kind of a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Storage-layer table definitions.
    Storage,
    /// Validation schemas.
    Validation,
    /// Derived type declarations.
    Types,
    /// Seed data modules.
    Seed,
}

impl ArtifactKind {
    /// Every kind, in emission order.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Storage,
        ArtifactKind::Validation,
        ArtifactKind::Types,
        ArtifactKind::Seed,
    ];

    /// Short lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Storage => "storage",
            ArtifactKind::Validation => "validation",
            ArtifactKind::Types => "types",
            ArtifactKind::Seed => "seed",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated text file, addressed by a logical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Logical path, e.g. `schema/user.ts`.
    pub path: String,
    /// Artifact kind.
    pub kind: ArtifactKind,
    /// Generated text.
    pub content: String,
}

impl Artifact {
    /// Create an artifact at `<dir>/<module>.ts`.
    pub fn new(kind: ArtifactKind, dir: &str, module: &str, content: String) -> Self {
        Self {
            path: format!("{}/{}.ts", dir, module),
            kind,
            content,
        }
    }
}

/// The output of one compiler run: every artifact in canonical order.
///
/// Artifacts are grouped by kind (storage, validation, types, seed). Within a
/// kind the enum artifact comes first, then one artifact per table in load
/// order, then the barrel file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompiledSchema {
    artifacts: Vec<Artifact>,
}

impl CompiledSchema {
    pub(crate) fn new(artifacts: Vec<Artifact>) -> Self {
        Self { artifacts }
    }

    /// All artifacts.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Consume the output and return the artifacts.
    pub fn into_artifacts(self) -> Vec<Artifact> {
        self.artifacts
    }

    /// Look up an artifact by logical path.
    pub fn get(&self, path: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.path == path)
    }

    /// Logical paths of every artifact.
    pub fn paths(&self) -> Vec<&str> {
        self.artifacts.iter().map(|a| a.path.as_str()).collect()
    }

    /// Artifacts of one kind.
    pub fn by_kind(&self, kind: ArtifactKind) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(move |a| a.kind == kind)
    }

    /// Number of artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Check if no artifact was produced.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
