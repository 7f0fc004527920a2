//! coding-agent - interactive console agent that edits a repository through tools
//!
//! A remote model converses with the user and may call three local tools to
//! act on the project in the current directory.
//!
//! # Modules
//!
//! - `agent` - Conversation state and the tool-calling orchestration loop
//! - `llm` - Messages API types and HTTP client
//! - `tools` - Tool registry plus `list_files`, `read_file`, `edit_file`
//! - `sandbox` - Project-root path checks and gitignore matching
//! - `config` - Settings from the environment / `.env`
//! - `logging` - tracing subscriber setup
//!
//! # Quick Start
//!
//! ```ignore
//! use coding_agent::{AgentController, ConsoleTranscript, MessagesClient, PathSandbox, ToolRegistry};
//!
//! let sandbox = PathSandbox::new(std::env::current_dir()?)?;
//! let client = MessagesClient::new(settings.base_url.clone(), settings.api_key.clone());
//! let mut agent = AgentController::new(
//!     client,
//!     ToolRegistry::builtin(sandbox),
//!     ConsoleTranscript::stdout(),
//!     settings.agent_config(),
//! );
//! agent.run(tokio::io::BufReader::new(tokio::io::stdin())).await?;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod logging;
pub mod sandbox;
pub mod tools;

// Re-export commonly used types at crate root for convenience
pub use agent::{AgentConfig, AgentController, AgentError, ConsoleTranscript, Transcript};
pub use config::{ConfigError, Settings};
pub use llm::{ContentBlock, Message, MessagesClient, ModelError, ModelService};
pub use sandbox::{GlobalExcludes, IgnoreMatcher, PathSandbox};
pub use tools::{Tool, ToolError, ToolRegistry};
