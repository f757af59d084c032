//! Integration Test: Headless Core
//!
//! **Policy**: `hearth-core` MUST stay headless. It may never import terminal
//! crates (ratatui, crossterm) or the clipboard (arboard); those belong to
//! surfaces. The reverse also holds: the TUI is a thin client and may never
//! talk to the generation provider directly (reqwest), only through the Hearth.
//!
//! Any surface should be able to embed the core: TUI today, others later.

use std::fs;
use std::path::{Path, PathBuf};

/// Crates forbidden inside the core
const SURFACE_CRATES: &[&str] = &["ratatui", "crossterm", "arboard"];

/// Crates forbidden inside the TUI
const PROVIDER_CRATES: &[&str] = &["reqwest"];

#[test]
fn test_core_never_imports_surface_crates() {
    let violations = find_forbidden_imports(&workspace_path("hearth/core/src"), SURFACE_CRATES);

    if !violations.is_empty() {
        eprintln!("\nCRITICAL: Surface crates imported by the core!");
        eprintln!("hearth-core must stay embeddable by any surface.\n");

        for violation in &violations {
            eprintln!("  {violation}");
        }

        panic!(
            "\nFound {} surface import(s) in hearth-core.\nFix these before merging!",
            violations.len()
        );
    }
}

#[test]
fn test_tui_never_talks_to_the_provider_directly() {
    let violations = find_forbidden_imports(&workspace_path("tui/src"), PROVIDER_CRATES);

    if !violations.is_empty() {
        eprintln!("\nCRITICAL: Provider HTTP crates imported by the TUI!");
        eprintln!("All generation goes through the Hearth.\n");

        for violation in &violations {
            eprintln!("  {violation}");
        }

        panic!(
            "\nFound {} provider import(s) in the TUI.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Resolve a path relative to the workspace root
fn workspace_path(relative: &str) -> PathBuf {
    // CARGO_MANIFEST_DIR is tests/architectural-enforcement
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

/// Scan every .rs file under `dir` for `use` or `extern crate` lines naming
/// one of the forbidden crates
fn find_forbidden_imports(dir: &Path, forbidden: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();

    if !dir.exists() {
        panic!("Scanned directory is missing: {}", dir.display());
    }

    for entry in walkdir::WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
            check_file(entry.path(), forbidden, &mut violations);
        }
    }

    violations
}

fn check_file(path: &Path, forbidden: &[&str], violations: &mut Vec<String>) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for (idx, line) in content.lines().enumerate() {
        // Skip comments
        let code_part = line.split("//").next().unwrap_or(line);
        let trimmed = code_part.trim_start();

        let is_import = trimmed.starts_with("use ") || trimmed.starts_with("extern crate ");
        if !is_import {
            continue;
        }

        for name in forbidden {
            let crate_ref = format!("{name}::");
            if trimmed.contains(&crate_ref) || trimmed.contains(&format!("extern crate {name}")) {
                violations.push(format!("{}:{}: {}", path.display(), idx + 1, line.trim()));
            }
        }
    }
}
