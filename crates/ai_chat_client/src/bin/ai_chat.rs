//! ai-chat: terminal front end for the chat client.
//! Reads config, asks questions, and renders the history table.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use ai_chat_client::render::{render_history, render_status};
use ai_chat_client::{config, ChatSession, Client, Config, ExchangeId};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

/// A classified failure whose message is already meant for the user.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Reported(String);

#[derive(Parser)]
#[command(name = "ai-chat")]
#[command(version, about = "Ask an AI backend questions and browse past answers")]
struct Cli {
    /// Config file (default: ~/.ai-chat/config.yaml).
    #[arg(long, global = true, env = "AI_CHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Override backend.base_url from the config file.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one question (from the argument or the first line of stdin).
    Ask { question: Option<String> },

    /// Show past questions and answers.
    History {
        /// Show the stored answer of this exchange.
        #[arg(long)]
        expand: Option<ExchangeId>,
    },

    /// Check that the backend is up.
    Health,

    /// Interactive chat: one question per line.
    Chat,
}

fn load_config(cli: &Cli) -> Result<Config> {
    // 1. --config flag or AI_CHAT_CONFIG; must exist.
    // 2. Default path if present, built-in defaults otherwise.
    let mut cfg = match &cli.config {
        Some(path) => config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => match config::default_config_path() {
            Some(path) => config::load_or_default(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::default(),
        },
    };
    if let Some(base_url) = &cli.base_url {
        cfg.backend.base_url = Some(base_url.clone());
    }
    Ok(cfg)
}

fn read_question_from_stdin() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn ask(client: Client, question: Option<String>) -> Result<()> {
    let question = match question {
        Some(question) => question,
        None => read_question_from_stdin().context("failed to read question from stdin")?,
    };
    let mut session = ChatSession::new(client);
    session.set_draft(question);
    if !session.submit_question() {
        bail!("no question provided");
    }
    session.settle().await;

    let state = session.state();
    if let Some(error) = state.error_message() {
        return Err(Reported(error.to_string()).into());
    }
    print!("{}", render_status(state));
    Ok(())
}

async fn history(client: Client, expand: Option<ExchangeId>) -> Result<()> {
    let mut session = ChatSession::open(client);
    session.settle().await;
    if let Some(notice) = session.state().history_notice() {
        return Err(Reported(notice.to_string()).into());
    }
    if let Some(id) = expand {
        session.toggle_expanded(id);
    }
    print!("{}", render_history(session.state()));
    Ok(())
}

async fn health(client: Client) -> Result<()> {
    match client.health().await {
        Ok(()) => {
            println!("ok");
            Ok(())
        }
        Err(e) => Err(Reported(e.user_message()).into()),
    }
}

async fn chat(client: Client) -> Result<()> {
    let mut session = ChatSession::open(client);
    session.settle().await;
    print!("{}", render_history(session.state()));

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        match input {
            "/quit" => break,
            "/history" => {
                session.fetch_history();
                session.settle().await;
                print!("{}", render_history(session.state()));
            }
            _ if input.starts_with("/toggle") => {
                let arg = input.trim_start_matches("/toggle").trim();
                if arg.is_empty() {
                    eprintln!("usage: /toggle <id>");
                    continue;
                }
                let id = match arg.parse::<ExchangeId>() {
                    Ok(id) => id,
                    Err(never) => match never {},
                };
                session.toggle_expanded(id);
                print!("{}", render_history(session.state()));
            }
            _ => {
                session.set_draft(line.clone());
                if !session.submit_question() {
                    continue;
                }
                print!("{}", render_status(session.state()));
                session.settle().await;
                let state = session.state();
                print!("{}", render_status(state));
                if state.pending_answer().is_some() || state.history_notice().is_some() {
                    print!("{}", render_history(state));
                }
            }
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(&cli)?;
    let client = Client::new(cfg.endpoints(), cfg.request_timeout())
        .context("failed to build HTTP client")?;

    match cli.command.unwrap_or(Commands::Ask { question: None }) {
        Commands::Ask { question } => ask(client, question).await,
        Commands::History { expand } => history(client, expand).await,
        Commands::Health => health(client).await,
        Commands::Chat => chat(client).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        match e.downcast_ref::<Reported>() {
            Some(reported) => eprintln!("{}", reported),
            None => eprintln!("Error: {:#}", e),
        }
        process::exit(1);
    }
}
