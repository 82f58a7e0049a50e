//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: Async functions MUST NOT use blocking file I/O. Avatar reads
//! go through `tokio::fs`; `std::fs` is fine in sync code that runs before
//! the event loop (config loading, log file setup).

use architectural_enforcement::{production_files, PRODUCTION_DIRS};

const BLOCKING: &[&str] = &["std::fs::", "fs::read(", "fs::read_to_string(", "File::open("];

/// Test that async production code does not use blocking I/O
#[test]
fn test_no_blocking_io_in_async_fns() {
    let mut violations = Vec::new();

    for file in production_files(PRODUCTION_DIRS) {
        for idx in 0..file.lines.len() {
            let code = file.code(idx);

            // tokio::fs::read is the async form
            if code.contains("tokio::fs::") {
                continue;
            }

            if BLOCKING.iter().any(|call| code.contains(call)) && file.in_async_fn(idx) {
                violations.push(file.describe(idx, "Blocking file I/O in async fn"));
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Blocking I/O calls found in async code!\n");
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        eprintln!("\n✅ REQUIRED async I/O:");
        eprintln!("  - tokio::fs::read().await");

        panic!(
            "\nFound {} blocking I/O violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}

#[test]
fn test_avatar_reads_are_async() {
    let files = production_files(&["talk/core/src"]);
    let avatar = files
        .iter()
        .find(|f| f.path.ends_with("avatar.rs"))
        .expect("talk/core/src/avatar.rs should exist");

    assert!(
        avatar.lines.iter().any(|line| line.contains("tokio::fs::read(")),
        "avatar files must be read with tokio::fs"
    );
}
