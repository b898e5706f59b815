//! Loader configuration.

/// Default directory holding enum descriptors.
pub const DEFAULT_ENUMS_DIR: &str = "enums";

/// Default directory holding table descriptors.
pub const DEFAULT_TABLES_DIR: &str = "tables";

/// Default descriptor file extension.
pub const DEFAULT_EXTENSION: &str = "json";

/// Where the loader looks for descriptors under a schema root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Directory (relative to the root) holding enum descriptors.
    pub enums_dir: String,
    /// Directory (relative to the root) holding table descriptors.
    pub tables_dir: String,
    /// Extension of descriptor files, without the dot.
    pub extension: String,
}

impl LoaderConfig {
    /// Create a configuration with the default layout.
    pub fn new() -> Self {
        Self {
            enums_dir: DEFAULT_ENUMS_DIR.to_string(),
            tables_dir: DEFAULT_TABLES_DIR.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Set the enums directory.
    pub fn with_enums_dir(mut self, dir: impl Into<String>) -> Self {
        self.enums_dir = dir.into();
        self
    }

    /// Set the tables directory.
    pub fn with_tables_dir(mut self, dir: impl Into<String>) -> Self {
        self.tables_dir = dir.into();
        self
    }

    /// Set the descriptor extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.enums_dir, "enums");
        assert_eq!(config.tables_dir, "tables");
        assert_eq!(config.extension, "json");
    }

    #[test]
    fn test_config_builder() {
        let config = LoaderConfig::new()
            .with_enums_dir("schema/enums")
            .with_tables_dir("schema/tables")
            .with_extension(".schema.json");

        assert_eq!(config.enums_dir, "schema/enums");
        assert_eq!(config.tables_dir, "schema/tables");
        assert_eq!(config.extension, "schema.json");
    }
}
