//! Integration Test: Headless Core
//!
//! **Policy**: `talk-core` holds chat state and timing only. Terminal crates
//! belong to the surface, so the core must neither depend on nor name them.

use std::fs;

use architectural_enforcement::{production_files, workspace_root};

const SURFACE_CRATES: &[&str] = &["ratatui", "crossterm"];

#[test]
fn test_core_manifest_has_no_surface_crates() {
    let manifest = fs::read_to_string(workspace_root().join("talk/core/Cargo.toml"))
        .expect("talk/core/Cargo.toml should be readable");

    for krate in SURFACE_CRATES {
        assert!(
            !manifest.lines().any(|line| line.trim_start().starts_with(krate)),
            "talk-core must not depend on {krate}"
        );
    }
}

#[test]
fn test_core_source_has_no_surface_crates() {
    let mut violations = Vec::new();

    for file in production_files(&["talk/core/src"]) {
        for idx in 0..file.lines.len() {
            let code = file.code(idx);
            for krate in SURFACE_CRATES {
                if code.contains(&format!("{krate}::")) {
                    violations.push(file.describe(idx, "Surface crate in core"));
                }
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\n❌ talk-core reaches into the terminal surface:\n");
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        panic!(
            "\nFound {} surface reference(s) in talk-core.",
            violations.len()
        );
    }
}
