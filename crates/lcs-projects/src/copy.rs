//! Filtered copy of a cloned template into the new project.
//!
//! Only top-level entries are filtered; whatever passes is copied
//! recursively. The template's own README.md and todo.md are kept aside as
//! `ORIGINAL_README.md` and `ORIGINAL_todo.md` because the project gets
//! freshly generated versions.

use crate::error::{Error, Result};
use crate::setup::{SCHEMA_FILE, SETUP_JS, SETUP_SH};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Top-level name prefixes that are never copied
const EXCLUDED_PREFIXES: &[&str] = &[
    "node_modules",
    "dist",
    ".vscode",
    "TEMPLATE_",
    "README.md",
    "todo.md",
];

/// Exact top-level names that are never copied; the setup files are
/// installed by the LCS setup step instead
const EXCLUDED_NAMES: &[&str] = &[".git", SETUP_SH, SETUP_JS, SCHEMA_FILE];

const EXCLUDED_SUFFIX: &str = ".example";

pub const ORIGINAL_README: &str = "ORIGINAL_README.md";
pub const ORIGINAL_TODO: &str = "ORIGINAL_todo.md";

/// Which template documents were preserved under their `ORIGINAL_` names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreservedDocs {
    pub readme: bool,
    pub todo: bool,
}

/// Whether a top-level template entry is left out of the project
pub fn is_excluded(name: &str) -> bool {
    EXCLUDED_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
        || name.ends_with(EXCLUDED_SUFFIX)
        || EXCLUDED_NAMES.contains(&name)
}

/// Top-level entries of `template_dir` that would be copied, sorted by name
pub fn copyable_entries(template_dir: &Utf8Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in template_dir.read_dir_utf8()? {
        let entry = entry?;
        let name = entry.file_name();
        if is_excluded(name) {
            debug!("Skipping template entry {}", name);
        } else {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Copy every non-excluded top-level entry into `project_dir`.
///
/// Returns the names of the copied entries.
pub fn copy_template(template_dir: &Utf8Path, project_dir: &Utf8Path) -> Result<Vec<String>> {
    std::fs::create_dir_all(project_dir)?;

    let names = copyable_entries(template_dir)?;
    for name in &names {
        copy_tree(&template_dir.join(name), &project_dir.join(name))?;
    }
    Ok(names)
}

/// Copy the template README.md/todo.md to their `ORIGINAL_` names
pub fn preserve_original_docs(
    template_dir: &Utf8Path,
    project_dir: &Utf8Path,
) -> Result<PreservedDocs> {
    let mut preserved = PreservedDocs::default();

    let readme = template_dir.join("README.md");
    if readme.is_file() {
        std::fs::copy(&readme, project_dir.join(ORIGINAL_README))?;
        preserved.readme = true;
    }

    let todo = template_dir.join("todo.md");
    if todo.is_file() {
        std::fs::copy(&todo, project_dir.join(ORIGINAL_TODO))?;
        preserved.todo = true;
    }

    Ok(preserved)
}

/// Recursively copy a file or directory
pub fn copy_tree(source: &Utf8Path, destination: &Utf8Path) -> Result<()> {
    if source.is_file() {
        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(source, destination)?;
        return Ok(());
    }

    for entry in WalkDir::new(source) {
        let entry = entry?;
        let path = Utf8PathBuf::from_path_buf(entry.path().to_path_buf())
            .map_err(|p| Error::invalid_path(p.display().to_string()))?;
        let relative = path
            .strip_prefix(source)
            .map_err(|_| Error::invalid_path(path.as_str()))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(&path, &target)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusions() {
        for name in [
            "node_modules",
            ".git",
            "dist",
            ".vscode",
            "TEMPLATE_notes.md",
            "README.md",
            "todo.md",
            ".env.example",
            "setup.sh",
            "setup.js",
            ".lcsconf.schema.json",
        ] {
            assert!(is_excluded(name), "{name} should be excluded");
        }

        for name in [
            "src",
            "package.json",
            "Dockerfile",
            ".github",
            ".gitignore",
            "setup.ts",
            ".lcsconf.json",
        ] {
            assert!(!is_excluded(name), "{name} should be copied");
        }
    }
}
