//! Validator command line.
//!
//! `e3a validate <FILE>` checks an archive read-only; `--fix` applies the
//! safe repairs in place, leaving a `.backup` sibling. Exit status is 0 only
//! when the post-run state is clean.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "e3a", version, about = "Integrity validator for .E3A project archives")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check an .E3A file for integrity defects
    Validate {
        /// The .E3A file to check
        file: PathBuf,
        /// Repair calendar corruption and Default Space contamination in
        /// place (a .backup sibling is written first)
        #[arg(long)]
        fix: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Validate { file, fix } => match e3a::validate::validate_file(&file, fix) {
            Ok(report) => {
                print!("{}", report);
                let clean = if fix {
                    // Repairs already applied; only unrepairable findings count.
                    report.is_repairable()
                } else {
                    report.is_clean()
                };
                if clean {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(1)
                }
            },
            Err(error) => {
                eprintln!("error: {}", error);
                ExitCode::from(1)
            },
        },
    }
}
