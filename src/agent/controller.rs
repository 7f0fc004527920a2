//! Agent Controller - the tool-calling orchestration loop
//!
//! The controller owns the conversation and alternates between calling the
//! model and running the tools it asks for, until a reply contains no more
//! tool requests.
//!
//! ```text
//! AwaitingUserInput ──line──► ModelRequested ──reply──► BlocksPending
//!        ▲                         ▲                       │
//!        │                         └──── ToolDispatch ◄────┤ tool_use
//!        └──────────── queue empty ────────────────────────┘
//! ```
//!
//! Replies wait in a FIFO queue. Every `tool_use` block produces one tool
//! result and one follow-up model call whose reply joins the back of the
//! queue, so chains of any length run without recursion.

use std::collections::VecDeque;
use std::time::Instant;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, info_span, warn, Instrument};

use super::console::Transcript;
use super::session::Conversation;
use crate::llm::{ContentBlock, Message, MessagesRequest, ModelError, ModelService, ToolDeclaration};
use crate::tools::ToolRegistry;

/// Configuration for the agent controller
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Model name sent with every request
    pub model: String,
    /// `max_tokens` sent with every request
    pub max_tokens: u32,
    /// Dump every model message to the transcript
    pub debug: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-sonnet-latest".to_string(),
            max_tokens: 1024,
            debug: false,
        }
    }
}

/// Counts for one user turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnSummary {
    pub model_calls: usize,
    pub tool_calls: usize,
}

/// Failures that end the chat.
///
/// Tool failures are not here: they are reported to the model instead.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Model service error: {0}")]
    Model(#[from] ModelError),
    #[error("Console error: {0}")]
    Console(#[from] std::io::Error),
}

/// Agent Controller orchestrating the model and the local tools
pub struct AgentController<M, T> {
    model: M,
    registry: ToolRegistry,
    /// Declarations derived from `registry` once, at construction
    tools: Vec<ToolDeclaration>,
    transcript: T,
    config: AgentConfig,
    conversation: Conversation,
}

impl<M: ModelService, T: Transcript> AgentController<M, T> {
    /// Create a new agent controller
    ///
    /// # Arguments
    /// * `model` - Service answering Messages requests
    /// * `registry` - Tools the model may call
    /// * `transcript` - Where text, tool calls and errors are shown
    /// * `config` - Model name, token limit, debug flag
    pub fn new(model: M, registry: ToolRegistry, transcript: T, config: AgentConfig) -> Self {
        let tools = registry.declarations();
        Self {
            model,
            registry,
            tools,
            transcript,
            config,
            conversation: Conversation::new(),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn transcript(&self) -> &T {
        &self.transcript
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Interactive loop: read a line, run the turn, repeat.
    ///
    /// Empty lines are skipped. End of input or CTRL-C while waiting for a
    /// line ends the loop with `Ok`.
    pub async fn run<R>(&mut self, input: R) -> Result<(), AgentError>
    where
        R: AsyncBufRead + Unpin,
    {
        self.transcript.banner(&self.config.model)?;
        info!(trace_id = %self.conversation.id(), model = %self.config.model, "Chat started");

        let mut lines = input.lines();
        loop {
            self.transcript.prompt()?;

            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = tokio::signal::ctrl_c() => None,
            };

            let Some(line) = line else {
                self.transcript.farewell()?;
                info!(trace_id = %self.conversation.id(), messages = self.conversation.len(), "Chat ended");
                return Ok(());
            };

            if line.is_empty() {
                continue;
            }

            self.submit(line).await?;
        }
    }

    /// Run one user turn to completion
    pub async fn submit(&mut self, text: impl Into<String>) -> Result<TurnSummary, AgentError> {
        let span = info_span!("chat_turn", trace_id = %self.conversation.id());
        self.run_turn(text.into()).instrument(span).await
    }

    async fn run_turn(&mut self, text: String) -> Result<TurnSummary, AgentError> {
        self.conversation.push(Message::user_text(text));

        let mut summary = TurnSummary::default();
        let mut pending = VecDeque::new();
        pending.push_back(self.request(&mut summary).await?);

        while let Some(current) = pending.pop_front() {
            self.conversation.push(current.clone());

            if self.config.debug {
                self.transcript.debug_message(&current)?;
            }

            for block in &current.content {
                match block {
                    ContentBlock::Text { text } => self.transcript.assistant_text(text)?,
                    ContentBlock::ToolUse { id, name, input } => {
                        let result = self.run_tool(id, name, input)?;
                        summary.tool_calls += 1;
                        self.conversation.push(Message::user(vec![result]));
                        pending.push_back(self.request(&mut summary).await?);
                    }
                    ContentBlock::ToolResult { tool_use_id, .. } => {
                        warn!(tool_use_id = %tool_use_id, "Ignoring tool_result block from model");
                    }
                }
            }
        }

        debug!(
            model_calls = summary.model_calls,
            tool_calls = summary.tool_calls,
            "Turn completed"
        );
        Ok(summary)
    }

    /// One blocking model call over the full conversation
    async fn request(&self, summary: &mut TurnSummary) -> Result<Message, AgentError> {
        summary.model_calls += 1;

        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: self.conversation.messages(),
            tools: &self.tools,
        };

        let llm_span = info_span!(
            "llm_call",
            model = %self.config.model,
            call = summary.model_calls,
            messages = self.conversation.len()
        );

        let call_start = Instant::now();
        let reply = self.model.create_message(&request).instrument(llm_span).await?;
        let duration_ms = call_start.elapsed().as_secs_f64() * 1000.0;
        debug!(duration_ms, blocks = reply.content.len(), "Model call completed");

        Ok(reply)
    }

    fn run_tool(
        &mut self,
        id: &str,
        name: &str,
        input: &Map<String, Value>,
    ) -> Result<ContentBlock, AgentError> {
        if self.registry.get(name).is_some() {
            self.transcript.tool_call(name, input)?;
        }

        let result = self.registry.dispatch(id, name, input);

        if let ContentBlock::ToolResult {
            is_error: true,
            content,
            ..
        } = &result
        {
            self.transcript.tool_error(content)?;
        }

        Ok(result)
    }
}
