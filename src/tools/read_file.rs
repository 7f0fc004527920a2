//! `read_file`: return the text of a project file

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{decode_text, object_schema, parse_input, Tool, ToolError};
use crate::sandbox::PathSandbox;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReadFileArgs {
    path: String,
}

#[derive(Debug, Clone)]
pub struct ReadFileTool {
    sandbox: PathSandbox,
}

impl ReadFileTool {
    pub fn new(sandbox: PathSandbox) -> Self {
        Self { sandbox }
    }

    /// Read the full contents of `path` (project-relative)
    pub fn read(&self, path: &str) -> Result<String, ToolError> {
        let target = self.sandbox.resolve(path)?;

        let metadata = match std::fs::metadata(&target) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ToolError::NotFound(path.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        if metadata.is_dir() {
            return Err(ToolError::IsADirectory(path.to_string()));
        }

        Ok(decode_text(std::fs::read(&target)?))
    }
}

impl Tool for ReadFileTool {
    fn name(&self) -> &'static str {
        "read_file"
    }

    fn description(&self) -> &'static str {
        "Read the text contents of a relative file path."
    }

    fn input_schema(&self) -> Value {
        object_schema(
            json!({
                "path": {"type": "string", "description": "Relative file path"}
            }),
            &["path"],
        )
    }

    fn call(&self, input: &Map<String, Value>) -> Result<String, ToolError> {
        let args: ReadFileArgs = parse_input(self.name(), input)?;
        self.read(&args.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(root: &std::path::Path) -> ReadFileTool {
        ReadFileTool::new(PathSandbox::new(root).unwrap())
    }

    #[test]
    fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "line one\nline two\n").unwrap();
        assert_eq!(tool(dir.path()).read("notes.txt").unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = tool(dir.path()).read("missing.txt").unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        let err = tool(dir.path()).read("src").unwrap_err();
        assert!(matches!(err, ToolError::IsADirectory(_)));
    }

    #[test]
    fn test_binary_content_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blob.bin"), [0x80u8, 0x41]).unwrap();
        assert_eq!(tool(dir.path()).read("blob.bin").unwrap(), "\u{80}A");
    }

    #[test]
    fn test_call_requires_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = tool(dir.path()).call(&Map::new()).unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput { .. }));
    }
}
