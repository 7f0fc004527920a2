use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{error, info};

use coding_agent::logging::init_logging;
use coding_agent::{AgentController, ConsoleTranscript, MessagesClient, PathSandbox, Settings, ToolRegistry};

#[derive(Parser, Debug)]
#[command(name = "coding-agent", version, about = "Chat with Claude about the repository in the current directory")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start an interactive chat session with Claude
    Chat {
        /// Dump every model message (overrides DEBUG)
        #[arg(long)]
        debug: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let debug_flag = match cli.command {
        Some(Command::Chat { debug }) => debug,
        None => false,
    };

    let mut settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    settings.debug |= debug_flag;

    if let Err(e) = init_logging(settings.debug) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match chat(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Chat aborted");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn chat(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let root = std::env::current_dir()?.canonicalize()?;
    let sandbox = PathSandbox::new(root)?;
    info!(root = %sandbox.root().display(), settings = ?settings, "Starting chat");

    let client = MessagesClient::new(settings.base_url.clone(), settings.api_key.clone());
    let mut agent = AgentController::new(
        client,
        ToolRegistry::builtin(sandbox),
        ConsoleTranscript::stdout(),
        settings.agent_config(),
    );

    agent.run(BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}
