//! `list_files`: recursive, gitignore-aware directory listing
//!
//! The walk is pre-order. Ignored directories are pruned before anything
//! below them is visited, so a pattern like `target/` costs one check no
//! matter how large the subtree is.

use std::path::{Component, Path};
use std::sync::Arc;

use ignore::WalkBuilder;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::{object_schema, parse_input, Tool, ToolError};
use crate::sandbox::{GlobalExcludes, IgnoreMatcher, PathSandbox};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListFilesArgs {
    #[serde(default = "default_path")]
    path: String,
}

fn default_path() -> String {
    ".".to_string()
}

#[derive(Debug, Clone)]
pub struct ListFilesTool {
    sandbox: PathSandbox,
    global: GlobalExcludes,
}

impl ListFilesTool {
    pub fn with_global_excludes(sandbox: PathSandbox, global: GlobalExcludes) -> Self {
        Self { sandbox, global }
    }

    /// List everything under `path`, relative to it, sorted.
    ///
    /// Directories carry a trailing `/`. A path naming a regular file yields
    /// an empty list. Ignore rules are read fresh from `path` on every call.
    pub fn list(&self, path: &str) -> Result<Vec<String>, ToolError> {
        let base = self.sandbox.locate(path)?;
        if !base.is_dir() {
            return Ok(Vec::new());
        }

        let matcher = Arc::new(IgnoreMatcher::build(&base, &self.global));
        let filter_matcher = Arc::clone(&matcher);
        let filter_base = base.clone();

        let walker = WalkBuilder::new(&base)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                match relative_path(entry.path(), &filter_base) {
                    Some(rel) => !filter_matcher.matches(&rel, entry.path().is_dir()),
                    None => false,
                }
            })
            .build();

        let mut results = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let Some(rel) = relative_path(entry.path(), &base) else {
                continue;
            };
            if entry.path().is_dir() {
                results.push(format!("{}/", rel));
            } else {
                results.push(rel);
            }
        }

        results.sort();
        debug!(base = %base.display(), entries = results.len(), "Directory listed");
        Ok(results)
    }
}

/// `path` relative to `base`, `/`-separated
fn relative_path(path: &Path, base: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Vec<_> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

impl Tool for ListFilesTool {
    fn name(&self) -> &'static str {
        "list_files"
    }

    fn description(&self) -> &'static str {
        "Recursively list files/directories under a path. \
         Returns JSON array of relative paths; directories end with '/'. \
         If no path is given, the current directory is used."
    }

    fn input_schema(&self) -> Value {
        object_schema(
            json!({
                "path": {"type": "string", "description": "Optional base dir"}
            }),
            &[],
        )
    }

    fn call(&self, input: &Map<String, Value>) -> Result<String, ToolError> {
        let args: ListFilesArgs = parse_input(self.name(), input)?;
        let entries = self.list(&args.path)?;
        serde_json::to_string(&entries).map_err(|e| ToolError::HandlerFailure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tool(root: &Path) -> ListFilesTool {
        ListFilesTool::with_global_excludes(PathSandbox::new(root).unwrap(), GlobalExcludes::Disabled)
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(tool(dir.path()).call(&Map::new()).unwrap(), "[]");
    }

    #[test]
    fn test_sorted_with_directory_suffix() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/main.rs");
        touch(dir.path(), "Cargo.toml");
        touch(dir.path(), "src/bin/tool.rs");

        let listed = tool(dir.path()).list(".").unwrap();
        assert_eq!(
            listed,
            vec!["Cargo.toml", "src/", "src/bin/", "src/bin/tool.rs", "src/main.rs"]
        );
    }

    #[test]
    fn test_file_path_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.txt");
        assert!(tool(dir.path()).list("a.txt").unwrap().is_empty());
    }

    #[test]
    fn test_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = tool(dir.path()).list("nope").unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn test_global_excludes_file_applies() {
        let dir = tempfile::tempdir().unwrap();
        let global_dir = tempfile::tempdir().unwrap();
        let global = global_dir.path().join("ignore");
        fs::write(&global, "*.swp\n").unwrap();
        touch(dir.path(), "main.rs");
        touch(dir.path(), "main.rs.swp");

        let tool = ListFilesTool::with_global_excludes(
            PathSandbox::new(dir.path()).unwrap(),
            GlobalExcludes::File(global),
        );
        assert_eq!(tool.list(".").unwrap(), vec!["main.rs"]);
    }

    #[test]
    fn test_relative_path_joins_components() {
        let base = Path::new("/x/y");
        assert_eq!(relative_path(Path::new("/x/y/a/b.txt"), base).as_deref(), Some("a/b.txt"));
        assert_eq!(relative_path(base, base), None);
    }
}
