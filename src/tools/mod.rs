//! Local tools the model may call
//!
//! Each tool is a [`Tool`] implementation with a fixed name, a description
//! and a JSON Schema for its input. The [`ToolRegistry`] is built once at
//! startup and is the only source for both the declarations sent to the
//! model and local dispatch, so the two cannot drift apart.
//!
//! | Tool         | Input                          | Path check        |
//! |--------------|--------------------------------|-------------------|
//! | `list_files` | `{path?}`                      | existence only    |
//! | `read_file`  | `{path}`                       | sandboxed         |
//! | `edit_file`  | `{path, old_str, new_str}`     | sandboxed         |

pub mod edit_file;
pub mod error;
pub mod list_files;
pub mod read_file;
pub mod registry;

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

pub use edit_file::EditFileTool;
pub use error::ToolError;
pub use list_files::ListFilesTool;
pub use read_file::ReadFileTool;
pub use registry::ToolRegistry;

/// A named, schema-described local operation
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON Schema of the input object
    fn input_schema(&self) -> Value;

    /// Run the tool. The returned string is sent back to the model verbatim.
    fn call(&self, input: &Map<String, Value>) -> Result<String, ToolError>;
}

/// Object schema with `additionalProperties: false`
pub(crate) fn object_schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// Deserialize a tool's input mapping into its typed argument struct
pub(crate) fn parse_input<T: DeserializeOwned>(
    tool: &'static str,
    input: &Map<String, Value>,
) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(input.clone())).map_err(|e| ToolError::InvalidInput {
        tool,
        message: e.to_string(),
    })
}

/// Decode file bytes as UTF-8, falling back to Latin-1.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback cannot fail.
pub(crate) fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    }
}
