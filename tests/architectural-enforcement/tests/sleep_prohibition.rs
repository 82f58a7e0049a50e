//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT block a thread with sleep. The only
//! timer is the reply delay, a `tokio::time::sleep` inside the responder's
//! spawned task.

use architectural_enforcement::{production_files, PRODUCTION_DIRS};

/// Files allowed to use `tokio::time::sleep`
const TIMER_FILES: &[&str] = &["responder.rs"];

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();

    for file in production_files(PRODUCTION_DIRS) {
        let timer_allowed = TIMER_FILES.iter().any(|name| file.path.ends_with(name));

        for idx in 0..file.lines.len() {
            let code = file.code(idx);

            if code.contains("thread::sleep") {
                violations.push(file.describe(idx, "Thread sleep"));
            }
            if code.contains("time::sleep") && !code.contains("thread::") && !timer_allowed {
                violations.push(file.describe(idx, "Sleep outside the reply timer"));
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Sleep calls found in production code!\n");
        for violation in &violations {
            eprintln!("  ❌ {}", violation);
        }
        eprintln!("\n✅ ACCEPTABLE sleep uses:");
        eprintln!("  - The reply delay in talk-core's responder");
        eprintln!("  - Test code (#[test] or #[tokio::test] functions)");

        panic!(
            "\nFound {} sleep violation(s) in production code.\nFix these before merging!",
            violations.len()
        );
    }
}
