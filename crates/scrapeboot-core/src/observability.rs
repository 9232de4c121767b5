//! Observability: tracing init and the optional audit trail.
//!
//! Uses `config::ObservabilityConfig` for SCRAPEBOOT_QUIET, LOG_LEVEL,
//! LOG_JSON and AUDIT_LOG.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};

static AUDIT_PATH: Mutex<Option<String>> = Mutex::new(None);

/// Initialize tracing. Call once at process startup.
/// When SCRAPEBOOT_QUIET=1, only WARN and above are logged.
pub fn init_tracing() {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level = if cfg.quiet {
        "scrapeboot=warn".to_string()
    } else {
        cfg.log_level.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

fn get_audit_path() -> Option<String> {
    {
        let guard = AUDIT_PATH.lock().ok()?;
        if let Some(ref p) = *guard {
            return Some(p.clone());
        }
    }
    let path = crate::config::ObservabilityConfig::from_env().audit_log?;
    if path.is_empty() {
        return None;
    }
    if let Some(parent) = Path::new(&path).parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!(error = %e, "cannot create audit log directory");
        }
    }
    {
        let mut guard = AUDIT_PATH.lock().ok()?;
        *guard = Some(path.clone());
    }
    Some(path)
}

fn append_jsonl(path: &str, record: &serde_json::Value) {
    if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(path) {
        if let Ok(line) = serde_json::to_string(record) {
            let _ = writeln!(f, "{}", line);
        }
    }
}

fn now_ts() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Audit: environment provisioned (created or reused).
pub fn audit_env_ready(env_dir: &str, reused: bool) {
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": now_ts(),
            "event": "env_ready",
            "env_dir": env_dir,
            "reused": reused,
        });
        append_jsonl(&path, &record);
    }
}

/// Audit: dependencies installed. `source` is "manifest" or "fallback".
pub fn audit_deps_installed(source: &str, detail: &str) {
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": now_ts(),
            "event": "deps_installed",
            "source": source,
            "detail": detail,
        });
        append_jsonl(&path, &record);
    }
}

/// Audit: right before the target script is spawned.
pub fn audit_execution_started(script: &str, cwd: &str) {
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": now_ts(),
            "event": "execution_started",
            "script": script,
            "cwd": cwd,
        });
        append_jsonl(&path, &record);
    }
}

/// Audit: the target script returned.
pub fn audit_execution_completed(script: &str, exit_code: i32, duration_ms: u64) {
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": now_ts(),
            "event": "execution_completed",
            "script": script,
            "exit_code": exit_code,
            "duration_ms": duration_ms,
            "success": exit_code == 0,
        });
        append_jsonl(&path, &record);
    }
}
