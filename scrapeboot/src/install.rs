//! Populate the active environment with the declared dependency set.
//!
//! A discovered manifest is passed to pip opaquely (`pip install -r`); when
//! none was found, or it vanished between discovery and install, the fixed
//! fallback set is installed instead.

use std::path::{Path, PathBuf};

use scrapeboot_core::error::BootstrapError;

use crate::env::EnvContext;
use crate::process::ProcessRunner;

/// Installed when no manifest is found. Minimum floors match what the
/// scraper imports: crawl4ai drives the crawl, playwright is its browser
/// backend, beautifulsoup4 its HTML-to-markdown path.
pub const FALLBACK_PACKAGES: &[&str] = &[
    "crawl4ai>=0.3.74",
    "playwright>=1.40.0",
    "beautifulsoup4>=4.12.0",
];

/// Where the installed set came from, for reporting and audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallSource {
    Manifest(PathBuf),
    Fallback,
}

impl InstallSource {
    pub fn label(&self) -> String {
        match self {
            Self::Manifest(path) => format!("manifest {}", path.display()),
            Self::Fallback => "fallback package set".to_string(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Manifest(_) => "manifest",
            Self::Fallback => "fallback",
        }
    }
}

/// Install dependencies into `ctx`. Any non-zero pip exit is fatal; there is
/// no per-package retry or partial-state recovery.
pub fn install_dependencies(
    ctx: &EnvContext,
    root: &Path,
    manifest: Option<&Path>,
    runner: &dyn ProcessRunner,
) -> Result<InstallSource, BootstrapError> {
    match manifest {
        Some(path) if path.is_file() => {
            let path_str = path.to_string_lossy();
            let args = ["-m", "pip", "install", "-r", path_str.as_ref()];
            run_pip(ctx, root, &args, runner)?;
            Ok(InstallSource::Manifest(path.to_path_buf()))
        }
        other => {
            if other.is_some() {
                tracing::warn!("manifest vanished since discovery, using fallback set");
            }
            let mut args = vec!["-m", "pip", "install"];
            args.extend_from_slice(FALLBACK_PACKAGES);
            run_pip(ctx, root, &args, runner)?;
            Ok(InstallSource::Fallback)
        }
    }
}

fn run_pip(
    ctx: &EnvContext,
    root: &Path,
    args: &[&str],
    runner: &dyn ProcessRunner,
) -> Result<(), BootstrapError> {
    let out = runner
        .run(&ctx.python, args, root)
        .map_err(|e| BootstrapError::Install {
            detail: e.to_string(),
        })?;
    if !out.success {
        let status = out
            .code
            .map_or_else(|| "?".to_string(), |c| c.to_string());
        return Err(BootstrapError::Install {
            detail: format!("pip exited with status {}: {}", status, out.stderr.trim()),
        });
    }
    Ok(())
}
