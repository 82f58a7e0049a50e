//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The chat core stays headless (no terminal crates)
//! - No blocking file I/O inside async functions
//! - No thread sleeps in production code
//!
//! The helpers here find production source and answer simple questions
//! about where a line sits. They work on text, not syntax trees, so the
//! code they scan is expected to be rustfmt-formatted.

use std::fs;
use std::path::{Path, PathBuf};

/// Production source directories, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["talk/core/src", "tui/src"];

/// The workspace root
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// A production source file, with its test module cut off
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl SourceFile {
    /// Read a file, keeping only lines above `#[cfg(test)]`
    pub fn load(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        let lines = content
            .lines()
            .take_while(|line| line.trim() != "#[cfg(test)]")
            .map(str::to_string)
            .collect();

        Some(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    /// Line text with any trailing `//` comment removed
    pub fn code(&self, idx: usize) -> &str {
        let line = &self.lines[idx];
        line.split("//").next().unwrap_or(line)
    }

    /// Signature line of the function enclosing `idx`, if any
    pub fn enclosing_fn(&self, idx: usize) -> Option<&str> {
        let indent = indent_of(&self.lines[idx]);

        self.lines[..idx]
            .iter()
            .rev()
            .filter(|line| !line.trim().is_empty())
            .take_while(|line| {
                // Stop at the first top-level item that is not this function
                indent_of(line) > 0 || is_fn_signature(line) || line.starts_with(')')
            })
            .find(|line| indent_of(line) < indent && is_fn_signature(line))
            .map(String::as_str)
    }

    /// Whether `idx` sits inside an `async fn`
    pub fn in_async_fn(&self, idx: usize) -> bool {
        self.enclosing_fn(idx)
            .is_some_and(|signature| signature.contains("async fn "))
    }

    /// `path:line - text` for reports
    pub fn describe(&self, idx: usize, what: &str) -> String {
        format!(
            "{}:{} - {}: {}",
            self.path.display(),
            idx + 1,
            what,
            self.lines[idx].trim()
        )
    }
}

/// Every production `.rs` file under the given workspace-relative dirs
pub fn production_files(dirs: &[&str]) -> Vec<SourceFile> {
    let root = workspace_root();

    dirs.iter()
        .map(|dir| root.join(dir))
        .filter(|dir| dir.exists())
        .flat_map(|dir| walkdir::WalkDir::new(dir).into_iter().filter_map(Result::ok))
        .filter(|entry| entry.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .filter_map(|entry| SourceFile::load(entry.path()))
        .collect()
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn is_fn_signature(line: &str) -> bool {
    let trimmed = line.trim_start();
    let rest = trimmed
        .strip_prefix("pub(crate) ")
        .or_else(|| trimmed.strip_prefix("pub "))
        .unwrap_or(trimmed);
    rest.starts_with("fn ") || rest.starts_with("async fn ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(text: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from("sample.rs"),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    #[test]
    fn test_enclosing_fn() {
        let file = source(
            "use std::fs;\n\
             \n\
             pub async fn load() {\n    \
                 let x = 1;\n\
             }\n\
             \n\
             fn sync_one() {\n    \
                 let y = 2;\n\
             }\n",
        );

        assert_eq!(file.enclosing_fn(0), None);
        assert!(file.in_async_fn(3));
        assert!(!file.in_async_fn(7));
        assert_eq!(file.enclosing_fn(7), Some("fn sync_one() {"));
    }

    #[test]
    fn test_methods_are_found() {
        let file = source(
            "impl Thing {\n    \
                 pub async fn run(&self) {\n        \
                     work();\n    \
                 }\n\
             }\n",
        );

        assert!(file.in_async_fn(2));
        assert!(!file.in_async_fn(1));
    }

    #[test]
    fn test_workspace_root_has_members() {
        assert!(workspace_root().join("talk/core/src/lib.rs").exists());
        assert!(workspace_root().join("tui/src/lib.rs").exists());
    }
}
