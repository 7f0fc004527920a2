//! Model service integration
//!
//! This module holds the Messages API wire types and the HTTP client that
//! sends the conversation (plus tool declarations) to the remote model.
//!
//! The orchestrator only ever talks to the [`ModelService`] trait, so tests
//! can script model replies without a network.

pub mod client;
pub mod types;

// Re-export public types so other modules can write `crate::llm::Message`
pub use client::{MessagesClient, ModelError, ModelService, ANTHROPIC_VERSION};
pub use types::{ContentBlock, Message, MessagesRequest, MessagesResponse, Role, ToolDeclaration};
