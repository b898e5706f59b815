//! Artifact emitters.
//!
//! Every emitter reads a [`ResolvedTable`](crate::resolved::ResolvedTable)
//! (or the resolved enum set) plus the [`CodegenConfig`] and returns text:
//! a header comment, the imports its body actually uses, and the body.

pub mod enums;
pub mod seed;
pub mod storage;
pub mod types;
pub mod validation;

use std::collections::{BTreeMap, BTreeSet};

use crate::config::CodegenConfig;

/// Module specifier of the enum artifact, relative to its own directory.
pub(crate) const ENUMS_MODULE: &str = "./enums";

/// Banner comment, one `//` line per header line, followed by a blank line.
pub(crate) fn header(config: &CodegenConfig) -> String {
    let mut out = String::new();
    for line in config.header.lines() {
        if line.is_empty() {
            out.push_str("//\n");
        } else {
            out.push_str(&format!("// {}\n", line));
        }
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Used-symbol import collector.
///
/// Package imports are rendered before relative ones; modules and symbols
/// are sorted so output does not depend on the order symbols were used in.
#[derive(Debug, Default)]
pub(crate) struct Imports {
    values: BTreeMap<String, BTreeSet<String>>,
    types: BTreeMap<String, BTreeSet<String>>,
}

impl Imports {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Import a value symbol.
    pub(crate) fn add(&mut self, module: &str, symbol: &str) {
        self.values
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Import a type-only symbol.
    pub(crate) fn add_type(&mut self, module: &str, symbol: &str) {
        self.types
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Render the import block, followed by a blank line when non-empty.
    pub(crate) fn render(&self) -> String {
        let modules: BTreeSet<&String> = self.values.keys().chain(self.types.keys()).collect();
        let (packages, relative): (Vec<&String>, Vec<&String>) =
            modules.into_iter().partition(|m| !m.starts_with('.'));

        let mut out = String::new();
        for module in packages.into_iter().chain(relative) {
            if let Some(symbols) = self.values.get(module) {
                out.push_str(&import_line("import", symbols, module));
            }
            if let Some(symbols) = self.types.get(module) {
                out.push_str(&import_line("import type", symbols, module));
            }
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

fn import_line(keyword: &str, symbols: &BTreeSet<String>, module: &str) -> String {
    let symbols: Vec<&str> = symbols.iter().map(String::as_str).collect();
    format!("{} {{ {} }} from '{}';\n", keyword, symbols.join(", "), module)
}

/// Join a file from its header, imports and body.
pub(crate) fn module(config: &CodegenConfig, imports: &Imports, body: &str) -> String {
    let mut out = header(config);
    out.push_str(&imports.render());
    out.push_str(body.trim_end());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imports_render_sorted() {
        let mut imports = Imports::new();
        imports.add("./guest", "guests");
        imports.add("drizzle-orm/pg-core", "varchar");
        imports.add("drizzle-orm/pg-core", "pgTable");
        imports.add_type("drizzle-orm/pg-core", "AnyPgColumn");
        imports.add("./enums", "userStatusEnum");

        assert_eq!(
            imports.render(),
            "import { pgTable, varchar } from 'drizzle-orm/pg-core';\n\
             import type { AnyPgColumn } from 'drizzle-orm/pg-core';\n\
             import { userStatusEnum } from './enums';\n\
             import { guests } from './guest';\n\n"
        );
    }

    #[test]
    fn test_header_lines() {
        let config = CodegenConfig::new().with_header("Generated.\n\nDo not edit.");
        assert_eq!(header(&config), "// Generated.\n//\n// Do not edit.\n\n");

        let config = CodegenConfig::new().with_header("");
        assert_eq!(header(&config), "");
    }
}
