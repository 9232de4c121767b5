mod cli;
mod env;
mod install;
mod pipeline;
mod process;
mod prompt;
mod runner;

use clap::Parser;
use std::path::PathBuf;

use scrapeboot_core::config::BootstrapConfig;
use scrapeboot_core::error::{BootstrapError, EXIT_SCRIPT_FAILED};
use scrapeboot_core::observability;

use cli::Cli;
use pipeline::PipelineOutcome;
use prompt::{Prompter, StdinPrompter};

fn main() {
    observability::init_tracing();
    let cli = Cli::parse();
    let cfg = BootstrapConfig::from_env();

    let root = resolve_root(cli.project_dir.as_deref());
    let assume_yes = cli.yes || cfg.auto_approve;

    let proc = process::SystemRunner;
    let prompter = StdinPrompter;
    let opts = pipeline::Options { assume_yes };

    let code = match pipeline::run(&root, &cfg, &proc, &prompter, &opts) {
        Ok(PipelineOutcome::Completed(report)) => {
            if cli.json {
                let payload = serde_json::to_string_pretty(&report)
                    .unwrap_or_else(|_| "{}".to_string());
                println!("{}", payload);
            }
            0
        }
        Ok(PipelineOutcome::ScriptFailed { .. }) => EXIT_SCRIPT_FAILED,
        Ok(PipelineOutcome::Cancelled) => 0,
        Err(err) => {
            print_diagnostic(&err);
            if !assume_yes {
                prompter.acknowledge("Press Enter to exit... ");
            }
            err.exit_code()
        }
    };
    std::process::exit(code);
}

fn resolve_root(dir: Option<&str>) -> PathBuf {
    let p = PathBuf::from(dir.unwrap_or("."));
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

fn print_diagnostic(err: &BootstrapError) {
    eprintln!();
    eprintln!("✗ {}", err);
    match err {
        BootstrapError::ScriptNotFound { candidates, .. } if !candidates.is_empty() => {
            eprintln!("  .py files seen during the search:");
            for c in candidates {
                eprintln!("   • {}", c);
            }
        }
        BootstrapError::PythonMissing => {
            eprintln!("  Install Python 3 or add it to PATH, then re-run.");
        }
        BootstrapError::EnvCreate { .. } => {
            eprintln!("  The interpreter may lack the venv module (python3-venv on Debian/Ubuntu).");
        }
        BootstrapError::Install { .. } => {
            eprintln!("  Check network access and the manifest's package names, then re-run.");
        }
        _ => {}
    }
}
