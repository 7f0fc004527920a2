//! Tool registry and dispatch
//!
//! Dispatch never fails: unknown names and handler errors come back as
//! `is_error` tool results so the model can react to them.

use serde_json::{Map, Value};
use tracing::{debug, info_span, warn};

use super::{EditFileTool, ListFilesTool, ReadFileTool, Tool, ToolError};
use crate::llm::{ContentBlock, ToolDeclaration};
use crate::sandbox::{GlobalExcludes, PathSandbox};

/// Ordered set of tools, unique by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `list_files`, `read_file` and `edit_file` over one project root
    pub fn builtin(sandbox: PathSandbox) -> Self {
        Self::builtin_with(sandbox, GlobalExcludes::default())
    }

    /// Same as [`builtin`](Self::builtin), with `list_files` reading its
    /// global ignore rules from `global`
    pub fn builtin_with(sandbox: PathSandbox, global: GlobalExcludes) -> Self {
        Self {
            tools: vec![
                Box::new(ListFilesTool::with_global_excludes(sandbox.clone(), global)),
                Box::new(ReadFileTool::new(sandbox.clone())),
                Box::new(EditFileTool::new(sandbox)),
            ],
        }
    }

    /// Add a tool. Names must be unique.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), ToolError> {
        if self.get(tool.name()).is_some() {
            return Err(ToolError::DuplicateTool(tool.name().to_string()));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Declarations sent to the model, in registration order
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.tools
            .iter()
            .map(|tool| ToolDeclaration {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }

    /// Run one tool by name
    pub fn call(&self, name: &str, input: &Map<String, Value>) -> Result<String, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tool.call(input)
    }

    /// Run a `tool_use` request and build the matching `tool_result` block
    pub fn dispatch(&self, tool_use_id: &str, name: &str, input: &Map<String, Value>) -> ContentBlock {
        let _span = info_span!("tool_dispatch", tool = %name, tool_use_id = %tool_use_id).entered();

        match self.call(name, input) {
            Ok(output) => {
                debug!(output_len = output.len(), "Tool succeeded");
                ContentBlock::tool_result(tool_use_id, output)
            }
            Err(e) => {
                warn!(error = %e, "Tool failed");
                ContentBlock::tool_error(tool_use_id, e.to_string())
            }
        }
    }
}
