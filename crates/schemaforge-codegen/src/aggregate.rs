//! Barrel files.

use crate::artifact::{Artifact, ArtifactKind};
use crate::config::CodegenConfig;
use crate::emit::{self, enums::ENUMS_STEM};

/// File stem of every barrel.
pub const INDEX_STEM: &str = "index";

/// Build `<dir>/index.ts` for one artifact kind.
///
/// Re-exports the enum artifact first (seed directories have none), then
/// every listed module in the order given.
pub fn aggregate<S: AsRef<str>>(
    kind: ArtifactKind,
    modules: &[S],
    config: &CodegenConfig,
) -> Artifact {
    let mut body = String::new();
    if kind != ArtifactKind::Seed {
        body.push_str(&format!("export * from './{}';\n", ENUMS_STEM));
    }
    for module in modules {
        body.push_str(&format!("export * from './{}';\n", module.as_ref()));
    }
    if body.is_empty() {
        body.push_str("export {};\n");
    }

    let mut content = emit::header(config);
    content.push_str(&body);
    Artifact::new(kind, config.dir(kind), INDEX_STEM, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_aggregate_order() {
        let config = CodegenConfig::new().with_header("Generated.");
        let barrel = aggregate(ArtifactKind::Validation, &["user", "booking"], &config);

        assert_eq!(barrel.path, "validation/index.ts");
        assert_eq!(
            barrel.content,
            "// Generated.\n\nexport * from './enums';\nexport * from './user';\nexport * from './booking';\n"
        );
    }

    #[test]
    fn test_seed_barrel_has_no_enums() {
        let config = CodegenConfig::new().with_header("");
        let barrel = aggregate(ArtifactKind::Seed, &["room"], &config);
        assert_eq!(barrel.path, "seeds/index.ts");
        assert_eq!(barrel.content, "export * from './room';\n");
    }
}
