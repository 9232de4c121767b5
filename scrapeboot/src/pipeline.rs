//! The four-stage bootstrap pipeline: locate → provision → install → run.
//!
//! Strictly sequential; every stage is gated on the previous one. The active
//! environment is an explicit [`EnvContext`] value threaded through the
//! installer and the runner, never ambient process state.

use std::path::Path;

use serde::Serialize;

use scrapeboot_core::config::BootstrapConfig;
use scrapeboot_core::error::BootstrapError;
use scrapeboot_core::{discovery, observability};

use crate::env;
use crate::install;
use crate::process::ProcessRunner;
use crate::prompt::Prompter;
use crate::runner::{self, Outcome};

pub struct Options {
    /// Skip the confirmation gate (--yes or SCRAPEBOOT_AUTO_APPROVE).
    pub assume_yes: bool,
}

/// Final report for a completed run (also the --json payload).
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    pub project_root: String,
    pub manifest: Option<String>,
    pub script: String,
    pub env_dir: String,
    pub env_reused: bool,
    pub install_source: String,
    pub exit_code: i32,
    pub outputs: Vec<String>,
}

#[derive(Debug)]
pub enum PipelineOutcome {
    /// Script ran and exited zero.
    Completed(PipelineReport),
    /// Script ran and exited non-zero; the pipeline itself did its job.
    ScriptFailed { exit_code: i32 },
    /// Operator declined the confirmation gate.
    Cancelled,
}

pub fn run(
    root: &Path,
    cfg: &BootstrapConfig,
    proc: &dyn ProcessRunner,
    prompter: &dyn Prompter,
    opts: &Options,
) -> Result<PipelineOutcome, BootstrapError> {
    eprintln!("🚀 Bootstrapping scrape project in {}", root.display());
    eprintln!();

    // Step 1: discovery. The manifest gets a root-level fast path; the
    // script search is always recursive. A missing manifest is a handled
    // state, a missing script is fatal.
    let prune = [cfg.env_dir_name.as_str()];
    let manifest = {
        let direct = root.join(&cfg.manifest_name);
        if direct.is_file() {
            Some(direct)
        } else {
            discovery::locate(root, &cfg.manifest_name, &prune)
        }
    };
    let script = discovery::locate(root, &cfg.target_script, &prune).ok_or_else(|| {
        BootstrapError::ScriptNotFound {
            name: cfg.target_script.clone(),
            root: root.to_path_buf(),
            candidates: discovery::py_candidates(root, &prune, 10),
        }
    })?;

    eprintln!("✅ Step 1/4: Located {}", script.display());
    match &manifest {
        Some(m) => eprintln!("   📄 Manifest: {}", m.display()),
        None => eprintln!(
            "   📄 No {} found — the fallback package set will be installed",
            cfg.manifest_name
        ),
    }

    // Step 2: provisioning. Reuse is existence-only; activation resolves the
    // interpreter; the pip upgrade is best-effort.
    eprintln!();
    let (env_dir, reused) = env::ensure_environment(root, &cfg.env_dir_name, proc)?;
    let ctx = env::activate(&env_dir, reused)?;
    if ctx.reused {
        eprintln!(
            "✅ Step 2/4: Reusing virtual environment at {}",
            ctx.env_dir.display()
        );
    } else {
        eprintln!(
            "✅ Step 2/4: Created virtual environment at {}",
            ctx.env_dir.display()
        );
    }
    env::upgrade_pip(&ctx, root, proc);
    observability::audit_env_ready(&ctx.env_dir.to_string_lossy(), ctx.reused);

    // Step 3: dependencies.
    eprintln!();
    let source = install::install_dependencies(&ctx, root, manifest.as_deref(), proc)?;
    eprintln!("✅ Step 3/4: Installed dependencies from {}", source.label());
    observability::audit_deps_installed(source.kind(), &source.label());

    // Step 4: execution.
    eprintln!();
    eprintln!("▶  Step 4/4: Launching the scraper");
    let outcome = runner::run_target(&script, &ctx, cfg, proc, prompter, opts.assume_yes)?;

    Ok(match outcome {
        Outcome::Success(report) => PipelineOutcome::Completed(PipelineReport {
            project_root: root.to_string_lossy().into_owned(),
            manifest: manifest.map(|m| m.to_string_lossy().into_owned()),
            script: report.script,
            env_dir: ctx.env_dir.to_string_lossy().into_owned(),
            env_reused: ctx.reused,
            install_source: source.kind().to_string(),
            exit_code: report.exit_code,
            outputs: report.outputs,
        }),
        Outcome::Failed { exit_code } => PipelineOutcome::ScriptFailed { exit_code },
        Outcome::Cancelled => PipelineOutcome::Cancelled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::testing::FakeRunner;
    use crate::prompt::testing::FakePrompter;
    use std::fs;
    use std::path::PathBuf;

    fn write_script(root: &Path) -> PathBuf {
        let dir = root.join("extraction");
        fs::create_dir_all(&dir).unwrap();
        let script = dir.join("gsap_batch_scraper_sequential.py");
        fs::write(&script, "print('scrape')\n").unwrap();
        script
    }

    fn opts() -> Options {
        Options { assume_yes: false }
    }

    #[test]
    fn test_scenario_a_empty_root_aborts_before_provisioning() {
        let tmp = tempfile::tempdir().unwrap();
        let runner = FakeRunner::new();
        let prompter = FakePrompter::answering(true);

        let err = run(
            tmp.path(),
            &BootstrapConfig::default(),
            &runner,
            &prompter,
            &opts(),
        )
        .unwrap_err();

        assert!(matches!(err, BootstrapError::ScriptNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
        // No environment was created, no external tool ran.
        assert!(runner.calls.borrow().is_empty());
        assert!(!tmp.path().join("venv").exists());
    }

    #[test]
    fn test_scenario_b_manifest_run_and_report() {
        let tmp = tempfile::tempdir().unwrap();
        let script = write_script(tmp.path());
        fs::write(tmp.path().join("requirements.txt"), "packageA>=1.0\n").unwrap();
        let out_dir = script.parent().unwrap().join("Gsap_Docs");
        fs::create_dir_all(&out_dir).unwrap();
        fs::write(out_dir.join("report.txt"), "done\n").unwrap();

        let runner = FakeRunner::new();
        let prompter = FakePrompter::answering(true);
        let outcome = run(
            tmp.path(),
            &BootstrapConfig::default(),
            &runner,
            &prompter,
            &opts(),
        )
        .unwrap();

        match outcome {
            PipelineOutcome::Completed(report) => {
                assert_eq!(report.install_source, "manifest");
                assert_eq!(report.exit_code, 0);
                assert!(report.env_dir.ends_with("venv"));
                assert!(!report.env_reused);
                assert_eq!(report.outputs, vec!["report.txt".to_string()]);
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(prompter.asked.get(), 1);
        assert_eq!(runner.calls_containing("-m venv"), 1);
        assert_eq!(runner.calls_containing("install -r"), 1);
    }

    #[test]
    fn test_scenario_c_existing_env_skips_creation_but_activates() {
        let tmp = tempfile::tempdir().unwrap();
        write_script(tmp.path());
        let bin = tmp.path().join("venv").join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("python"), "").unwrap();

        let runner = FakeRunner::new();
        let prompter = FakePrompter::answering(true);
        let outcome = run(
            tmp.path(),
            &BootstrapConfig::default(),
            &runner,
            &prompter,
            &opts(),
        )
        .unwrap();

        assert!(matches!(outcome, PipelineOutcome::Completed(_)));
        assert_eq!(runner.calls_containing("-m venv"), 0);
        // Activation happened: installs ran with the env's interpreter.
        assert!(runner
            .calls
            .borrow()
            .iter()
            .all(|c| c.starts_with(&bin.join("python").display().to_string())));
    }

    #[test]
    fn test_scenario_d_script_failure_reported_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_script(tmp.path());

        let mut runner = FakeRunner::new();
        runner.inherited_exit = 1;
        let prompter = FakePrompter::answering(true);
        let outcome = run(
            tmp.path(),
            &BootstrapConfig::default(),
            &runner,
            &prompter,
            &opts(),
        )
        .unwrap();

        assert!(matches!(
            outcome,
            PipelineOutcome::ScriptFailed { exit_code: 1 }
        ));
    }

    #[test]
    fn test_no_manifest_uses_fallback_install() {
        let tmp = tempfile::tempdir().unwrap();
        write_script(tmp.path());

        let runner = FakeRunner::new();
        let prompter = FakePrompter::answering(true);
        run(
            tmp.path(),
            &BootstrapConfig::default(),
            &runner,
            &prompter,
            &opts(),
        )
        .unwrap();

        assert_eq!(runner.calls_containing("install -r"), 0);
        assert_eq!(
            runner.calls_containing(crate::install::FALLBACK_PACKAGES[0]),
            1
        );
    }

    #[test]
    fn test_declined_gate_cancels_after_provisioning() {
        let tmp = tempfile::tempdir().unwrap();
        write_script(tmp.path());

        let runner = FakeRunner::new();
        let prompter = FakePrompter::answering(false);
        let outcome = run(
            tmp.path(),
            &BootstrapConfig::default(),
            &runner,
            &prompter,
            &opts(),
        )
        .unwrap();

        assert!(matches!(outcome, PipelineOutcome::Cancelled));
        // Provisioning and install happened, the script run did not.
        assert_eq!(runner.calls_containing("-m venv"), 1);
        assert_eq!(
            runner.calls_containing("gsap_batch_scraper_sequential.py"),
            0
        );
    }

    #[test]
    fn test_manifest_found_at_depth() {
        let tmp = tempfile::tempdir().unwrap();
        write_script(tmp.path());
        let nested = tmp.path().join("config");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("requirements.txt"), "packageA>=1.0\n").unwrap();

        let runner = FakeRunner::new();
        let prompter = FakePrompter::answering(true);
        let outcome = run(
            tmp.path(),
            &BootstrapConfig::default(),
            &runner,
            &prompter,
            &opts(),
        )
        .unwrap();

        match outcome {
            PipelineOutcome::Completed(report) => {
                assert_eq!(report.install_source, "manifest");
                let m = report.manifest.unwrap();
                assert!(PathBuf::from(m).exists());
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }
}
