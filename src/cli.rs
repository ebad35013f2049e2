use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// bitpm - component package manager
#[derive(Parser, Debug)]
#[command(name = "bitpm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new inline component
    Create {
        /// Component as box/name (a bare name goes to the global box)
        id: String,

        /// Also scaffold specs
        #[arg(short, long)]
        specs: bool,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Compile a component through its compiler environment
    Build {
        /// Inline component (box/name) or stored version (box/name@version)
        id: String,

        /// Persist the dist to the scope (stored versions only)
        #[arg(long)]
        save: bool,

        /// Install the compiler environment first
        #[arg(short, long)]
        env: bool,
    },

    /// Run a component's specs
    Test {
        /// Inline component (box/name) or stored version (box/name@version)
        id: String,

        /// Persist the results to the scope (stored versions only)
        #[arg(long)]
        save: bool,

        /// Install compiler and tester environments first
        #[arg(short, long)]
        env: bool,

        /// Fail when specs fail
        #[arg(long)]
        reject: bool,
    },

    /// Store an inline component as a new version in the scope
    Commit {
        /// Inline component as box/name
        id: String,

        /// Log message
        message: String,

        /// Commit even when specs fail
        #[arg(short, long)]
        force: bool,

        /// Install environments first
        #[arg(short, long)]
        env: bool,
    },

    /// Print a stored component record
    Show {
        /// [scope/]box/name[@version]; latest version when omitted
        id: String,
    },

    /// Import component records (NDJSON) into a scope
    Put {
        /// Scope root directory
        scope_path: PathBuf,

        /// Records file (stdin when omitted)
        file: Option<PathBuf>,
    },
}
