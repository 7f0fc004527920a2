//! Error type shared by the sandbox and every tool handler

use thiserror::Error;

/// Everything that can go wrong while running a tool.
///
/// None of these ever escape the orchestrator: the dispatcher turns each one
/// into an `is_error` tool result carrying the `Display` text.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Empty or absolute path where a project-relative one is required
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    /// Path resolves outside the project root
    #[error("Path escapes project root: {0}")]
    PathEscape(String),
    #[error("No such file or directory: {0}")]
    NotFound(String),
    #[error("Expected a file, found a directory: {0}")]
    IsADirectory(String),
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),
    /// Tool input does not match the declared input schema
    #[error("Invalid input for {tool}: {message}")]
    InvalidInput { tool: &'static str, message: String },
    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),
    /// Any other failure inside a handler, I/O included
    #[error("{0}")]
    HandlerFailure(String),
}

impl From<std::io::Error> for ToolError {
    fn from(e: std::io::Error) -> Self {
        ToolError::HandlerFailure(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_becomes_handler_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: ToolError = io.into();
        assert!(matches!(err, ToolError::HandlerFailure(_)));
        assert_eq!(err.to_string(), "permission denied");
    }

    #[test]
    fn test_messages_name_the_path() {
        assert_eq!(
            ToolError::IsADirectory("src".into()).to_string(),
            "Expected a file, found a directory: src"
        );
        assert_eq!(
            ToolError::UnknownTool("rm_rf".into()).to_string(),
            "Unknown tool 'rm_rf'"
        );
    }
}
