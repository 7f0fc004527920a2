//! Agent module for the interactive coding chat
//!
//! This module provides the loop that orchestrates:
//! - the model service (Messages API with tool declarations)
//! - the local file tools (list / read / edit)
//! - the console transcript
//!
//! # Architecture
//!
//! ```text
//! stdin line → AgentController → Conversation (append user text)
//!                  ↓
//!           ModelService.create_message(conversation, tools)
//!                  ↓
//!           reply blocks, in order:
//!             text     → Transcript
//!             tool_use → ToolRegistry.dispatch → tool_result appended
//!                           ↓
//!                        follow-up model call → queued reply
//!                  ↓
//!           queue empty → back to the prompt
//! ```

pub mod console;
pub mod controller;
pub mod session;

pub use console::{ConsoleTranscript, Transcript};
pub use controller::{AgentConfig, AgentController, AgentError, TurnSummary};
pub use session::Conversation;
