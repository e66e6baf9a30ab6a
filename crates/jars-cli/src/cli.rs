//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// jar-manager - resolve and load jar dependencies for components
#[derive(Parser, Debug)]
#[command(name = "jars")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Structured properties file consulted before the environment
    #[arg(long, global = true, value_name = "FILE")]
    pub properties: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the loader script, referencing archives in the shared
    /// repository
    ///
    /// Examples:
    ///   jars install                     # Discover the spec in the current directory
    ///   jars install --spec demo.jars.toml
    Install {
        /// Component spec file (discovered in the current directory
        /// when omitted; discovery fails unless exactly one
        /// *.jars.toml exists)
        #[arg(short, long)]
        spec: Option<PathBuf>,
    },

    /// Generate the loader script and vendor the archives alongside
    /// the component
    ///
    /// Vendoring honors the jars.vendor property chain; when the
    /// property is absent it defaults to on.
    Vendor {
        /// Component spec file (discovered when omitted)
        #[arg(short, long)]
        spec: Option<PathBuf>,
    },

    /// Print the resolved repository home and settings path
    Home,
}
