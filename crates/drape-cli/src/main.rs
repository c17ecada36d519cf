//! Drape CLI: run and check cloth scenes.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "drape")]
#[command(version, about = "Drape: position-based cloth simulation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene and report the final state.
    Simulate {
        /// Scene config (TOML). The built-in hanging sheet if omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Override the number of steps.
        #[arg(short, long)]
        steps: Option<u32>,

        /// Write the final state as JSON to this path (`-` for stdout).
        #[arg(short, long)]
        output: Option<String>,

        /// Log every telemetry event.
        #[arg(long)]
        telemetry: bool,
    },

    /// Check a scene config without running it.
    Validate {
        /// Path to the scene config (TOML).
        #[arg(short, long)]
        config: String,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            steps,
            output,
            telemetry,
        } => commands::simulate(config.as_deref(), steps, output.as_deref(), telemetry),
        Commands::Validate { config } => commands::validate(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
