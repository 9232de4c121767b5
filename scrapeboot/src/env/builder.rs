//! Provision the project virtual environment (create or reuse `venv/`).

use std::path::{Path, PathBuf};

use scrapeboot_core::error::BootstrapError;

use crate::process::ProcessRunner;

/// The active environment, threaded by reference through the installer and
/// the execution runner. Never process-global state.
#[derive(Debug, Clone)]
pub struct EnvContext {
    pub env_dir: PathBuf,
    /// Resolved interpreter inside the environment.
    pub python: PathBuf,
    /// Whether the environment directory pre-existed this run.
    pub reused: bool,
}

/// Ensure the environment directory exists under `root`. An existing
/// directory is reused as-is (existence is the only check); otherwise the
/// venv creation primitive runs. Returns the directory and whether it was
/// reused.
pub fn ensure_environment(
    root: &Path,
    env_dir_name: &str,
    runner: &dyn ProcessRunner,
) -> Result<(PathBuf, bool), BootstrapError> {
    let env_dir = root.join(env_dir_name);
    if env_dir.is_dir() {
        tracing::debug!(env_dir = %env_dir.display(), "reusing existing environment");
        return Ok((env_dir, true));
    }

    let python = runner
        .find_program(&["python3", "python"])
        .ok_or(BootstrapError::PythonMissing)?;
    let out = runner
        .run(&python, &["-m", "venv", env_dir_name], root)
        .map_err(|e| BootstrapError::EnvCreate {
            env_dir: env_dir.clone(),
            detail: e.to_string(),
        })?;
    if !out.success {
        return Err(BootstrapError::EnvCreate {
            env_dir,
            detail: out.stderr.trim().to_string(),
        });
    }
    Ok((env_dir, false))
}

/// Resolve the environment's interpreter into an [`EnvContext`]. A missing
/// interpreter here is an activation failure, distinct from creation failure
/// (the directory exists but cannot be entered as a runtime).
pub fn activate(env_dir: &Path, reused: bool) -> Result<EnvContext, BootstrapError> {
    let unix = env_dir.join("bin").join("python");
    let windows = env_dir.join("Scripts").join("python.exe");
    let python = if unix.is_file() {
        unix
    } else if windows.is_file() {
        windows
    } else {
        return Err(BootstrapError::EnvActivate {
            env_dir: env_dir.to_path_buf(),
            detail: "no interpreter at bin/python or Scripts/python.exe".to_string(),
        });
    };
    Ok(EnvContext {
        env_dir: env_dir.to_path_buf(),
        python,
        reused,
    })
}

/// Upgrade the environment's pip to latest. Best-effort: a failure is
/// surfaced as a warning and the pipeline continues with the bundled pip.
pub fn upgrade_pip(ctx: &EnvContext, root: &Path, runner: &dyn ProcessRunner) {
    match runner.run(
        &ctx.python,
        &["-m", "pip", "install", "--upgrade", "pip"],
        root,
    ) {
        Ok(out) if out.success => {}
        Ok(out) => {
            tracing::warn!(stderr = %out.stderr.trim(), "pip upgrade failed");
            eprintln!("   ⚠ pip upgrade failed, continuing with the bundled pip");
        }
        Err(e) => {
            tracing::warn!(error = %e, "pip upgrade could not run");
            eprintln!("   ⚠ pip upgrade could not run, continuing with the bundled pip");
        }
    }
}
