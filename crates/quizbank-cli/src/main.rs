//! quizbank CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod render;
mod sample;

#[derive(Parser)]
#[command(name = "quizbank", version, about = "Single-user question bank manager")]
struct Cli {
    /// Path to the preferences file
    #[arg(long, global = true, default_value = "quizbank.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (the default when no subcommand is given)
    Repl,

    /// Execute a single command line against the stored bank
    Exec {
        /// The command line, e.g. `add q/... p/... e/... a/...`
        line: Vec<String>,
    },

    /// Create a starter preferences file and sample data
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizbank=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Repl) | None => commands::repl::execute(&cli.config),
        Some(Commands::Exec { line }) => commands::exec::execute(&cli.config, &line.join(" ")),
        Some(Commands::Init) => commands::init::execute(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
