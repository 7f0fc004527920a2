//! Console rendering of the chat transcript
//!
//! ```text
//! Chat with Claude (model) — press CTRL-C to quit
//! You: list the files here
//! Tool: list_files({})
//! Claude: There are three files...
//! ```
//!
//! Labels are colored; message text is printed as-is.

use std::io::{self, Stdout, Write};

use crossterm::style::Stylize;
use serde_json::{Map, Value};

use crate::llm::Message;

/// Receives everything the orchestrator surfaces to the user
pub trait Transcript {
    fn banner(&mut self, model: &str) -> io::Result<()>;

    /// Show the input prompt (no trailing newline)
    fn prompt(&mut self) -> io::Result<()>;

    fn assistant_text(&mut self, text: &str) -> io::Result<()>;

    /// A tool is about to run
    fn tool_call(&mut self, name: &str, input: &Map<String, Value>) -> io::Result<()>;

    fn tool_error(&mut self, message: &str) -> io::Result<()>;

    /// Raw dump of a model message, only called in debug mode
    fn debug_message(&mut self, message: &Message) -> io::Result<()>;

    /// Input ended (EOF or CTRL-C)
    fn farewell(&mut self) -> io::Result<()>;
}

/// Colored transcript on a terminal (stdout by default)
pub struct ConsoleTranscript<W: Write = Stdout> {
    out: W,
}

impl ConsoleTranscript<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleTranscript<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Transcript for ConsoleTranscript<W> {
    fn banner(&mut self, model: &str) -> io::Result<()> {
        writeln!(self.out, "Chat with Claude ({}) — press CTRL-C to quit", model)
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{}: ", "You".yellow())?;
        self.out.flush()
    }

    fn assistant_text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}: {}", "Claude".yellow(), text)
    }

    fn tool_call(&mut self, name: &str, input: &Map<String, Value>) -> io::Result<()> {
        let args = Value::Object(input.clone());
        writeln!(self.out, "{}: {}({})", "Tool".green(), name, args)
    }

    fn tool_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}: {}", "Tool error".red(), message)
    }

    fn debug_message(&mut self, message: &Message) -> io::Result<()> {
        let dump = serde_json::to_string(message).map_err(io::Error::other)?;
        writeln!(self.out, "{}: {}", "Debug".red(), dump)
    }

    fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }
}
