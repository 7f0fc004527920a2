//! In-memory conversation state
//!
//! The conversation is append-only: messages are never edited, removed or
//! reordered once pushed. It lives as long as the process and is owned by
//! the [`AgentController`](super::AgentController).

use std::collections::HashSet;

use crate::llm::{ContentBlock, Message};

/// Ordered log of exchanged messages, sent in full on every model call
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Time-sortable id used to correlate logs for this chat
    id: String,
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Tool results whose id does not match any earlier `tool_use` block.
    ///
    /// Empty for every conversation built by the controller.
    pub fn orphaned_tool_results(&self) -> Vec<&str> {
        let mut requested = HashSet::new();
        let mut orphans = Vec::new();
        for message in &self.messages {
            for block in &message.content {
                match block {
                    ContentBlock::ToolUse { id, .. } => {
                        requested.insert(id.as_str());
                    }
                    ContentBlock::ToolResult { tool_use_id, .. } => {
                        if !requested.contains(tool_use_id.as_str()) {
                            orphans.push(tool_use_id.as_str());
                        }
                    }
                    ContentBlock::Text { .. } => {}
                }
            }
        }
        orphans
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
