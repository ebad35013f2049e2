//! bitpm CLI - component package manager
//!
//! Usage: bitpm <COMMAND>
//!
//! Commands:
//!   create  Scaffold a new inline component
//!   build   Compile a component
//!   test    Run a component's specs
//!   commit  Store an inline component as a new version
//!   show    Print a stored component
//!   put     Import component records into a scope

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (json, verbose) = (cli.json, cli.verbose);

    match cli.command {
        Commands::Create { id, specs, force } => {
            commands::cmd_create(&id, specs, force, json, verbose)
        }
        Commands::Build { id, save, env } => commands::cmd_build(&id, save, env, json, verbose),
        Commands::Test {
            id,
            save,
            env,
            reject,
        } => commands::cmd_test(&id, save, env, reject, json, verbose),
        Commands::Commit {
            id,
            message,
            force,
            env,
        } => commands::cmd_commit(&id, &message, force, env, json, verbose),
        Commands::Show { id } => commands::cmd_show(&id, json, verbose),
        Commands::Put { scope_path, file } => {
            commands::cmd_put(&scope_path, file.as_deref(), json)
        }
    }
}
