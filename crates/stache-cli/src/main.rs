// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use stache_cli::commands;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stache")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Render and check Mustache templates", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Configuration file (defaults to ./stache.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template against a JSON or TOML data file
    Render {
        /// Template file to render
        template: PathBuf,
        /// Data file (.json or .toml); renders against an empty context when omitted
        #[arg(short, long)]
        data: Option<PathBuf>,
        /// Directory partials are read from
        #[arg(short, long)]
        partials: Option<PathBuf>,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Disable HTML escaping
        #[arg(long)]
        raw: bool,
    },
    /// Compile templates and report syntax errors
    Check {
        /// Glob patterns of templates to check
        #[arg(required = true)]
        patterns: Vec<String>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = stache_cli::config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            template,
            data,
            partials,
            output,
            raw,
        } => {
            let args = commands::render::RenderArgs {
                template,
                data,
                partials,
                output,
                raw,
            };
            commands::render::run(&config, &args)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { patterns } => {
            let report = commands::check::run(&config, &patterns)?;
            Ok(if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
