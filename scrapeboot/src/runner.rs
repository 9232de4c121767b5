//! Run the target script to completion and classify the outcome.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use scrapeboot_core::config::BootstrapConfig;
use scrapeboot_core::error::BootstrapError;
use scrapeboot_core::{discovery, observability};

use crate::env::EnvContext;
use crate::process::ProcessRunner;
use crate::prompt::Prompter;

/// What the script run produced, for the final report.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub script: String,
    pub exit_code: i32,
    /// `.txt` files found in the output directory afterward (best-effort).
    pub outputs: Vec<String>,
}

/// Result of the execution stage.
#[derive(Debug)]
pub enum Outcome {
    Success(RunReport),
    Failed { exit_code: i32 },
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    Failure,
}

/// Pure classification of the target script's exit status. Nothing else
/// feeds into this.
pub fn classify(exit_code: i32) -> Classification {
    if exit_code == 0 {
        Classification::Success
    } else {
        Classification::Failure
    }
}

/// Run `script_path` inside its own directory with the environment's
/// interpreter, gated on operator confirmation.
pub fn run_target(
    script_path: &Path,
    ctx: &EnvContext,
    cfg: &BootstrapConfig,
    runner: &dyn ProcessRunner,
    prompter: &dyn Prompter,
    assume_yes: bool,
) -> Result<Outcome, BootstrapError> {
    let dir = script_path
        .parent()
        .ok_or_else(|| BootstrapError::Workdir {
            dir: script_path.to_path_buf(),
            detail: "script path has no parent directory".to_string(),
        })?;
    let name = script_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !dir.is_dir() {
        return Err(BootstrapError::Workdir {
            dir: dir.to_path_buf(),
            detail: "directory vanished since discovery".to_string(),
        });
    }
    // Stricter re-check than the locator: the file must still be there now.
    if !script_path.is_file() {
        return Err(BootstrapError::ScriptNotFound {
            name: name.clone(),
            root: dir.to_path_buf(),
            candidates: discovery::py_files_in(dir),
        });
    }

    if !assume_yes {
        let ok = prompter.confirm(&format!("Run {} now?", name))?;
        if !ok {
            eprintln!("Cancelled — nothing was run.");
            return Ok(Outcome::Cancelled);
        }
    }

    observability::audit_execution_started(&name, &dir.to_string_lossy());
    let start = Instant::now();
    let exit_code = runner.run_inherited(&ctx.python, &[name.as_str()], dir)?;
    let duration_ms = start.elapsed().as_millis() as u64;
    observability::audit_execution_completed(&name, exit_code, duration_ms);
    tracing::info!(script = %name, exit_code, duration_ms, "target script finished");

    match classify(exit_code) {
        Classification::Success => {
            let out_dir = dir.join(&cfg.output_dir_name);
            let outputs = list_text_outputs(&out_dir);
            print_success(&name, &out_dir, &outputs);
            Ok(Outcome::Success(RunReport {
                script: script_path.to_string_lossy().into_owned(),
                exit_code,
                outputs,
            }))
        }
        Classification::Failure => {
            print_failure(&name, exit_code);
            Ok(Outcome::Failed { exit_code })
        }
    }
}

/// List `.txt` files in the output directory, sorted. An absent directory
/// yields an empty list — the scraper may legitimately not have created it.
fn list_text_outputs(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().to_str().map(String::from))
        .filter(|n| n.ends_with(".txt"))
        .collect();
    names.sort();
    names
}

fn print_success(name: &str, out_dir: &Path, outputs: &[String]) {
    eprintln!();
    eprintln!("{}", "═".repeat(50));
    eprintln!("🎉 {} finished successfully", name);
    if !outputs.is_empty() {
        eprintln!();
        eprintln!("   Output files in {}:", out_dir.display());
        for f in outputs {
            eprintln!("   • {}", f);
        }
    }
    eprintln!("{}", "═".repeat(50));
}

fn print_failure(name: &str, exit_code: i32) {
    eprintln!();
    eprintln!("✗ {} exited with status {}", name, exit_code);
    eprintln!("  Its output was shown above (not captured) — check it for the cause.");
}
