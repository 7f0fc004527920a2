//! Shared fixtures: a scripted model service and a recording transcript

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use coding_agent::llm::{MessagesRequest, ToolDeclaration};
use coding_agent::{ContentBlock, Message, ModelError, ModelService, Transcript};

/// Replays canned replies in order and records every request
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Message>>,
    requests: Mutex<Vec<Vec<Message>>>,
    tools: Mutex<Vec<Vec<ToolDeclaration>>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Message>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    /// Conversation snapshot sent with each call, in call order
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn declared_tools(&self) -> Vec<Vec<ToolDeclaration>> {
        self.tools.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelService for ScriptedModel {
    async fn create_message(&self, request: &MessagesRequest<'_>) -> Result<Message, ModelError> {
        self.requests.lock().unwrap().push(request.messages.to_vec());
        self.tools.lock().unwrap().push(request.tools.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ModelError::EmptyResponse)
    }
}

/// Captures what would have been printed
#[derive(Debug, Default)]
pub struct RecordingTranscript {
    pub banners: Vec<String>,
    pub prompts: usize,
    pub texts: Vec<String>,
    pub tool_calls: Vec<String>,
    pub tool_errors: Vec<String>,
    pub debug_dumps: usize,
    pub farewells: usize,
}

impl Transcript for RecordingTranscript {
    fn banner(&mut self, model: &str) -> io::Result<()> {
        self.banners.push(model.to_string());
        Ok(())
    }

    fn prompt(&mut self) -> io::Result<()> {
        self.prompts += 1;
        Ok(())
    }

    fn assistant_text(&mut self, text: &str) -> io::Result<()> {
        self.texts.push(text.to_string());
        Ok(())
    }

    fn tool_call(&mut self, name: &str, _input: &Map<String, Value>) -> io::Result<()> {
        self.tool_calls.push(name.to_string());
        Ok(())
    }

    fn tool_error(&mut self, message: &str) -> io::Result<()> {
        self.tool_errors.push(message.to_string());
        Ok(())
    }

    fn debug_message(&mut self, _message: &Message) -> io::Result<()> {
        self.debug_dumps += 1;
        Ok(())
    }

    fn farewell(&mut self) -> io::Result<()> {
        self.farewells += 1;
        Ok(())
    }
}

pub fn text_reply(text: &str) -> Message {
    Message::assistant(vec![ContentBlock::text(text)])
}

pub fn tool_use(id: &str, name: &str, input: Value) -> ContentBlock {
    let input = match input {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    ContentBlock::ToolUse {
        id: id.to_string(),
        name: name.to_string(),
        input,
    }
}

pub fn tool_reply(id: &str, name: &str, input: Value) -> Message {
    Message::assistant(vec![tool_use(id, name, input)])
}

/// The single tool_result block of a user message
pub fn tool_result_of(message: &Message) -> (&str, &str, bool) {
    match message.content.as_slice() {
        [ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        }] => (tool_use_id.as_str(), content.as_str(), *is_error),
        other => panic!("expected one tool_result block, got {:?}", other),
    }
}
