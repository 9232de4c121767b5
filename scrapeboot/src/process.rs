//! Blocking subprocess capability.
//!
//! Every external tool (venv creation, pip, the target script) is invoked
//! through [`ProcessRunner`] so the orchestration logic can be tested with a
//! scripted fake instead of real interpreters.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Outcome of a captured invocation (provisioning and installs).
#[derive(Debug, Clone)]
pub struct Captured {
    pub success: bool,
    pub code: Option<i32>,
    pub stderr: String,
}

pub trait ProcessRunner {
    /// Locate a runnable program on PATH: the first of `names` found.
    fn find_program(&self, names: &[&str]) -> Option<PathBuf>;

    /// Run to completion, capturing output. Used for provisioning and
    /// install commands where stderr feeds the failure diagnostic.
    fn run(&self, program: &Path, args: &[&str], cwd: &Path) -> Result<Captured>;

    /// Run to completion with stdio inherited. Used for the target script;
    /// only the exit code is observed.
    fn run_inherited(&self, program: &Path, args: &[&str], cwd: &Path) -> Result<i32>;
}

/// Production impl backed by `std::process::Command`.
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn find_program(&self, names: &[&str]) -> Option<PathBuf> {
        names.iter().find_map(|n| which::which(n).ok())
    }

    fn run(&self, program: &Path, args: &[&str], cwd: &Path) -> Result<Captured> {
        let out = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .with_context(|| format!("failed to spawn {}", program.display()))?;
        Ok(Captured {
            success: out.status.success(),
            code: out.status.code(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }

    fn run_inherited(&self, program: &Path, args: &[&str], cwd: &Path) -> Result<i32> {
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .status()
            .with_context(|| format!("failed to spawn {}", program.display()))?;
        // Terminated by signal maps to -1; callers treat it as failure.
        Ok(status.code().unwrap_or(-1))
    }
}
