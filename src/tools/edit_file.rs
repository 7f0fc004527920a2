//! `edit_file`: substring replacement, or file creation
//!
//! * target missing, `old_str` empty  → create it (and its parents) with `new_str`
//! * target missing, `old_str` set    → `NotFound`
//! * target is a directory            → `IsADirectory`
//! * target exists, `old_str` empty   → `InvalidInput`
//! * otherwise                        → replace every occurrence and write back
//!
//! Zero occurrences is not an error: the file is written back unchanged.

use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::{decode_text, object_schema, parse_input, Tool, ToolError};
use crate::sandbox::PathSandbox;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EditFileArgs {
    path: String,
    old_str: String,
    new_str: String,
}

#[derive(Debug, Clone)]
pub struct EditFileTool {
    sandbox: PathSandbox,
}

impl EditFileTool {
    pub fn new(sandbox: PathSandbox) -> Self {
        Self { sandbox }
    }

    pub fn edit(&self, path: &str, old_str: &str, new_str: &str) -> Result<String, ToolError> {
        let target = self.sandbox.resolve(path)?;

        if !target.exists() {
            if !old_str.is_empty() {
                return Err(ToolError::NotFound(path.to_string()));
            }
            create(&target, new_str)?;
            return Ok(format!("Created new file: {}", path));
        }

        if target.is_dir() {
            return Err(ToolError::IsADirectory(path.to_string()));
        }
        if old_str.is_empty() {
            return Err(ToolError::InvalidInput {
                tool: "edit_file",
                message: format!("old_str must not be empty when editing existing file {}", path),
            });
        }

        let content = decode_text(std::fs::read(&target)?);
        let replacements = content.matches(old_str).count();
        let updated = content.replace(old_str, new_str);
        std::fs::write(&target, updated)?;

        debug!(path, replacements, "File edited");
        Ok(format!("Successfully edited file: {}", path))
    }
}

fn create(target: &Path, content: &str) -> Result<(), ToolError> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(target, content)?;
    Ok(())
}

impl Tool for EditFileTool {
    fn name(&self) -> &'static str {
        "edit_file"
    }

    fn description(&self) -> &'static str {
        "Replace old_str with new_str in the given file. \
         If the file does not exist and old_str is empty, create the file."
    }

    fn input_schema(&self) -> Value {
        object_schema(
            json!({
                "path": {"type": "string"},
                "old_str": {"type": "string"},
                "new_str": {"type": "string"}
            }),
            &["path", "old_str", "new_str"],
        )
    }

    fn call(&self, input: &Map<String, Value>) -> Result<String, ToolError> {
        let args: EditFileArgs = parse_input(self.name(), input)?;
        self.edit(&args.path, &args.old_str, &args.new_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tool(root: &Path) -> EditFileTool {
        EditFileTool::new(PathSandbox::new(root).unwrap())
    }

    #[test]
    fn test_creates_file_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let msg = tool(dir.path()).edit("deep/nested/new.txt", "", "hello\n").unwrap();

        assert_eq!(msg, "Created new file: deep/nested/new.txt");
        let content = fs::read_to_string(dir.path().join("deep/nested/new.txt")).unwrap();
        assert_eq!(content, "hello\n");
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "foo bar foo").unwrap();

        let msg = tool(dir.path()).edit("a.txt", "foo", "baz").unwrap();
        assert_eq!(msg, "Successfully edited file: a.txt");
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "baz bar baz");
    }

    #[test]
    fn test_replacement_is_literal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("re.txt"), "a.c abc").unwrap();
        tool(dir.path()).edit("re.txt", "a.c", "X").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("re.txt")).unwrap(), "X abc");
    }

    #[test]
    fn test_zero_occurrences_is_noop_success() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "unchanged").unwrap();
        assert!(tool(dir.path()).edit("a.txt", "missing", "x").is_ok());
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "unchanged");
    }

    #[test]
    fn test_missing_file_with_old_str() {
        let dir = tempfile::tempdir().unwrap();
        let err = tool(dir.path()).edit("ghost.txt", "x", "y").unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
        assert!(!dir.path().join("ghost.txt").exists());
    }

    #[test]
    fn test_directory_target() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        let err = tool(dir.path()).edit("src", "a", "b").unwrap_err();
        assert!(matches!(err, ToolError::IsADirectory(_)));
    }

    #[test]
    fn test_empty_old_str_on_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "abc").unwrap();
        let err = tool(dir.path()).edit("a.txt", "", "x").unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput { .. }));
        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "abc");
    }

    #[test]
    fn test_escape_is_blocked_before_write() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("project");
        fs::create_dir(&root).unwrap();

        let err = tool(&root).edit("../outside.txt", "", "pwned").unwrap_err();
        assert!(matches!(err, ToolError::PathEscape(_)));
        assert!(!dir.path().join("outside.txt").exists());
    }
}
