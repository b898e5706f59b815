//! Schemaforge command-line interface.
//!
//! Loads a schema directory, compiles it, and reports on the result.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use schemaforge_codegen::{CodegenConfig, CompileError};
use schemaforge_core::LoaderConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Schemaforge schema compiler
#[derive(Parser, Debug)]
#[command(name = "schemaforge")]
#[command(version, about = "Compile JSON table descriptors into Drizzle, Zod and TypeScript")]
pub struct Args {
    /// Schema root holding the enum and table descriptor directories.
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Enum descriptor directory, relative to the root.
    #[arg(long, default_value = schemaforge_core::config::DEFAULT_ENUMS_DIR)]
    pub enums_dir: String,

    /// Table descriptor directory, relative to the root.
    #[arg(long, default_value = schemaforge_core::config::DEFAULT_TABLES_DIR)]
    pub tables_dir: String,

    /// Descriptor file extension.
    #[arg(long, default_value = schemaforge_core::config::DEFAULT_EXTENSION)]
    pub extension: String,

    /// Codegen configuration file (JSON).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Emission worker threads (0 = configured or automatic).
    #[arg(long, default_value_t = 0)]
    pub workers: usize,

    /// Skip seed artifacts.
    #[arg(long)]
    pub no_seeds: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do with the compiled schema.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compile and report counts, without printing artifacts.
    Check,
    /// List generated artifact paths.
    List {
        /// Print a JSON array instead of one path per line.
        #[arg(long)]
        json: bool,
    },
    /// Print one generated artifact.
    Print {
        /// Logical artifact path, e.g. `schema/user.ts`.
        path: String,
    },
}

impl Args {
    /// Convert command-line arguments to loader and codegen configuration.
    pub fn into_config(self) -> Result<(LoaderConfig, CodegenConfig), CompileError> {
        let loader = LoaderConfig::new()
            .with_enums_dir(self.enums_dir)
            .with_tables_dir(self.tables_dir)
            .with_extension(self.extension);

        let mut codegen = match &self.config {
            Some(path) => CodegenConfig::from_file(path)?,
            None => CodegenConfig::new(),
        };
        if self.workers > 0 {
            codegen = codegen.with_workers(self.workers);
        }
        if self.no_seeds {
            codegen = codegen.without_seeds();
        }

        Ok((loader, codegen))
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schemaforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match commands::run(args) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
