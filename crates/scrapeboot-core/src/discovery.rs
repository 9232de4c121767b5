//! Fixed-name file discovery under a project root.
//!
//! `locate` is a pure recursive search with a deterministic visit order:
//! within each directory, files are checked before subdirectories and both
//! are walked in lexical order, so the first match is stable across runs on
//! an unchanged tree.

use std::fs;
use std::path::{Path, PathBuf};

/// Directory names never descended into. The environment directory is pruned
/// separately by the caller (its name is configurable); `__pycache__` and
/// hidden directories would otherwise shadow the real files with copies
/// inside site-packages or VCS metadata.
pub const PRUNED_DIRS: &[&str] = &["__pycache__", "node_modules"];

/// Recursively search `root` for a file with exactly `filename`.
/// Returns the first match in deterministic (lexical, files-first) order.
/// Directories listed in `prune` (plus [`PRUNED_DIRS`] and hidden
/// directories) are skipped entirely.
pub fn locate(root: &Path, filename: &str, prune: &[&str]) -> Option<PathBuf> {
    let Ok(entries) = fs::read_dir(root) else {
        return None;
    };
    let mut children: Vec<_> = entries.flatten().collect();
    children.sort_by_key(|e| e.file_name());

    let mut subdirs = Vec::new();
    for entry in children {
        let path = entry.path();
        if path.is_file() {
            if entry.file_name().to_str() == Some(filename) {
                return Some(path);
            }
        } else if path.is_dir() && !is_pruned(&entry.file_name().to_string_lossy(), prune) {
            subdirs.push(path);
        }
    }

    for dir in subdirs {
        if let Some(found) = locate(&dir, filename, prune) {
            return Some(found);
        }
    }
    None
}

/// Collect the names of `.py` files under `root` (same pruning and order as
/// `locate`), capped at `limit`. Used for not-found diagnostics.
pub fn py_candidates(root: &Path, prune: &[&str], limit: usize) -> Vec<String> {
    let mut out = Vec::new();
    collect_py(root, prune, limit, &mut out);
    out
}

/// List the `.py` files directly inside `dir`, sorted. Used by the runner's
/// pre-execution re-check diagnostic.
pub fn py_files_in(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().to_str().map(String::from))
        .filter(|n| n.ends_with(".py"))
        .collect();
    names.sort();
    names
}

fn is_pruned(name: &str, prune: &[&str]) -> bool {
    name.starts_with('.') || PRUNED_DIRS.contains(&name) || prune.contains(&name)
}

fn collect_py(root: &Path, prune: &[&str], limit: usize, out: &mut Vec<String>) {
    if out.len() >= limit {
        return;
    }
    let Ok(entries) = fs::read_dir(root) else {
        return;
    };
    let mut children: Vec<_> = entries.flatten().collect();
    children.sort_by_key(|e| e.file_name());

    let mut subdirs = Vec::new();
    for entry in children {
        let path = entry.path();
        if path.is_file() {
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".py") && out.len() < limit {
                    out.push(name.to_string());
                }
            }
        } else if path.is_dir() && !is_pruned(&entry.file_name().to_string_lossy(), prune) {
            subdirs.push(path);
        }
    }
    for dir in subdirs {
        collect_py(&dir, prune, limit, out);
    }
}
