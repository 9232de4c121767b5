//! Structured configuration loaded from environment variables.

use super::loader::{env_bool, env_optional, env_or, load_dotenv};

/// Dependency manifest filename searched for under the project root.
pub const MANIFEST_NAME: &str = "requirements.txt";

/// Target script filename searched for under the project root.
pub const TARGET_SCRIPT_NAME: &str = "gsap_batch_scraper_sequential.py";

/// Virtual environment directory created (or reused) under the project root.
pub const ENV_DIR_NAME: &str = "venv";

/// Output directory the scraper writes into, next to the target script.
pub const OUTPUT_DIR_NAME: &str = "Gsap_Docs";

/// Pipeline configuration: the fixed filesystem names plus the auto-approve
/// switch. Every name defaults to its constant and can be overridden via env
/// for non-standard project layouts.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub manifest_name: String,
    pub target_script: String,
    pub env_dir_name: String,
    pub output_dir_name: String,
    /// Skip the pre-run confirmation prompt (SCRAPEBOOT_AUTO_APPROVE).
    pub auto_approve: bool,
}

impl BootstrapConfig {
    pub fn from_env() -> Self {
        load_dotenv();
        Self {
            manifest_name: env_or("SCRAPEBOOT_MANIFEST", || MANIFEST_NAME.to_string()),
            target_script: env_or("SCRAPEBOOT_TARGET_SCRIPT", || {
                TARGET_SCRIPT_NAME.to_string()
            }),
            env_dir_name: env_or("SCRAPEBOOT_ENV_DIR", || ENV_DIR_NAME.to_string()),
            output_dir_name: env_or("SCRAPEBOOT_OUTPUT_DIR", || OUTPUT_DIR_NAME.to_string()),
            auto_approve: env_bool("SCRAPEBOOT_AUTO_APPROVE", false),
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            manifest_name: MANIFEST_NAME.to_string(),
            target_script: TARGET_SCRIPT_NAME.to_string(),
            env_dir_name: ENV_DIR_NAME.to_string(),
            output_dir_name: OUTPUT_DIR_NAME.to_string(),
            auto_approve: false,
        }
    }
}

/// Logging and audit configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// When SCRAPEBOOT_QUIET=1, only WARN and above are logged.
    pub quiet: bool,
    /// Default tracing filter (SCRAPEBOOT_LOG_LEVEL).
    pub log_level: String,
    /// Emit JSON-formatted logs (SCRAPEBOOT_LOG_JSON).
    pub log_json: bool,
    /// Append audit events to this JSONL file (SCRAPEBOOT_AUDIT_LOG). Unset
    /// disables the audit trail.
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        load_dotenv();
        Self {
            quiet: env_bool("SCRAPEBOOT_QUIET", false),
            log_level: env_or("SCRAPEBOOT_LOG_LEVEL", || "scrapeboot=info".to_string()),
            log_json: env_bool("SCRAPEBOOT_LOG_JSON", false),
            audit_log: env_optional("SCRAPEBOOT_AUDIT_LOG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_config_defaults() {
        let cfg = BootstrapConfig::default();
        assert_eq!(cfg.manifest_name, "requirements.txt");
        assert_eq!(cfg.target_script, "gsap_batch_scraper_sequential.py");
        assert_eq!(cfg.env_dir_name, "venv");
        assert_eq!(cfg.output_dir_name, "Gsap_Docs");
        assert!(!cfg.auto_approve);
    }
}
