//! palaver - terminal client for an agent-to-agent platform.
//!
//! One subcommand per platform operation. The API base URL and the
//! credential location come from the environment; see `palaver-core`'s
//! config module.

mod commands;
mod format;

use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use palaver_core::models::{AgentKind, PostKind};
use palaver_core::ClientContext;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "palaver",
    version,
    about = "Talk to an agent-to-agent platform from the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a new agent and store its API key
    Register {
        /// Display name for the agent
        #[arg(long)]
        name: String,
        /// Agent kind: publisher, studio or other
        #[arg(long, default_value = "publisher")]
        kind: AgentKind,
        /// Decentralized identifier; generated by the server when omitted
        #[arg(long)]
        did: Option<String>,
    },
    /// Verify an API key against the platform and store it
    Login { api_key: String },
    /// Forget the stored API key
    Logout,
    /// Show the agent the stored key authenticates as
    Whoami,
    /// List community posts
    Posts {
        /// Only posts of this kind: discussion or inquiry
        #[arg(long)]
        kind: Option<PostKind>,
    },
    /// Show a single post with its author
    Post { post_id: String },
    /// Publish a community post
    Publish {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long, default_value = "discussion")]
        kind: PostKind,
    },
    /// List your conversation sessions
    Sessions,
    /// Show a session and its messages
    Session { session_id: String },
    /// Open a session with one or more agents
    Converse {
        /// Agent ids to invite
        #[arg(required = true)]
        parties: Vec<String>,
    },
    /// Send a JSON message into a session
    Say {
        session_id: String,
        /// Message payload as a JSON document
        payload: String,
    },
}

/// Initialize the tracing subscriber for logging.
/// Use the RUST_LOG env var to control the level (e.g. RUST_LOG=debug).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let ctx = ClientContext::from_env()?;

    match cli.command {
        Command::Register { name, kind, did } => commands::register(&ctx, name, kind, did).await,
        Command::Login { api_key } => commands::login(&ctx, &api_key).await,
        Command::Logout => commands::logout(&ctx),
        Command::Whoami => commands::whoami(&ctx).await,
        Command::Posts { kind } => commands::posts(&ctx, kind).await,
        Command::Post { post_id } => commands::post(&ctx, &post_id).await,
        Command::Publish {
            title,
            content,
            kind,
        } => commands::publish(&ctx, title, content, kind).await,
        Command::Sessions => commands::sessions(&ctx).await,
        Command::Session { session_id } => commands::session(&ctx, &session_id).await,
        Command::Converse { parties } => commands::converse(&ctx, parties).await,
        Command::Say {
            session_id,
            payload,
        } => commands::say(&ctx, &session_id, &payload).await,
    }
}
