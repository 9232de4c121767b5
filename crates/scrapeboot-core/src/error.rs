//! Failure taxonomy for the bootstrap pipeline.
//!
//! Each variant is a fatal condition that aborts the pipeline and maps to a
//! stable process exit code. Two states are deliberately NOT here: a missing
//! manifest (selects the fallback dependency set) and a declined confirmation
//! (clean cancellation, exit 0). A target script that runs and exits non-zero
//! is reported by the runner and mapped to [`EXIT_SCRIPT_FAILED`].

use std::path::PathBuf;
use thiserror::Error;

/// Exit code used when the target script itself exits non-zero. The pipeline
/// completed its own responsibilities in that case, so it is not a
/// `BootstrapError`.
pub const EXIT_SCRIPT_FAILED: i32 = 7;

#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The target script was not found anywhere under the project root.
    #[error("target script '{name}' not found under {}", root.display())]
    ScriptNotFound {
        name: String,
        root: PathBuf,
        /// `.py` files seen during the search, for diagnosis.
        candidates: Vec<String>,
    },

    /// No python3/python interpreter on PATH; venv creation cannot start.
    #[error("no python3 (or python) interpreter found on PATH")]
    PythonMissing,

    /// The venv creation primitive reported failure.
    #[error("failed to create virtual environment at {}: {detail}", env_dir.display())]
    EnvCreate { env_dir: PathBuf, detail: String },

    /// The environment exists but its interpreter could not be resolved.
    #[error("failed to activate virtual environment at {}: {detail}", env_dir.display())]
    EnvActivate { env_dir: PathBuf, detail: String },

    /// Dependency installation exited non-zero.
    #[error("dependency install failed: {detail}")]
    Install { detail: String },

    /// The script's directory vanished or cannot be entered.
    #[error("cannot enter script directory {}: {detail}", dir.display())]
    Workdir { dir: PathBuf, detail: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BootstrapError {
    /// Stable process exit code for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ScriptNotFound { .. } => 2,
            Self::PythonMissing | Self::EnvCreate { .. } => 3,
            Self::EnvActivate { .. } => 4,
            Self::Install { .. } => 5,
            Self::Workdir { .. } => 6,
            Self::Other(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_stage() {
        let cases = [
            (
                BootstrapError::ScriptNotFound {
                    name: "x.py".into(),
                    root: PathBuf::from("/p"),
                    candidates: vec![],
                },
                2,
            ),
            (BootstrapError::PythonMissing, 3),
            (
                BootstrapError::EnvCreate {
                    env_dir: PathBuf::from("/p/venv"),
                    detail: "boom".into(),
                },
                3,
            ),
            (
                BootstrapError::EnvActivate {
                    env_dir: PathBuf::from("/p/venv"),
                    detail: "no interpreter".into(),
                },
                4,
            ),
            (
                BootstrapError::Install {
                    detail: "pip exited 1".into(),
                },
                5,
            ),
            (
                BootstrapError::Workdir {
                    dir: PathBuf::from("/p/sub"),
                    detail: "gone".into(),
                },
                6,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(err.exit_code(), code, "{err}");
            assert_ne!(err.exit_code(), 0);
            assert_ne!(err.exit_code(), EXIT_SCRIPT_FAILED);
        }
    }

    #[test]
    fn test_messages_distinguish_create_from_activate() {
        let create = BootstrapError::EnvCreate {
            env_dir: PathBuf::from("/p/venv"),
            detail: "venv module missing".into(),
        };
        let activate = BootstrapError::EnvActivate {
            env_dir: PathBuf::from("/p/venv"),
            detail: "bin/python missing".into(),
        };
        assert!(create.to_string().contains("create"));
        assert!(activate.to_string().contains("activate"));
    }
}
