//! memoir - terminal client for a personal diary backend

mod config;
mod ui;

use clap::Parser;
use memoir_api::DiaryClient;
use memoir_core::{Conversation, run_turn};
use memoir_tui::Theme;

/// memoir - write diary entries, chat with your assistant, see your stats
#[derive(Parser, Debug)]
#[command(name = "memoir")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the diary backend (default: http://localhost:8000)
    #[arg(short, long)]
    base_url: Option<String>,

    /// View to open at startup (journal, assistant, dashboard)
    #[arg(long)]
    view: Option<String>,

    /// Ask the assistant a single question and print the answer (no TUI)
    #[arg(long)]
    ask: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Initialize config file
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Setup tracing
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("memoir=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    // Initialize config and exit
    if args.init_config {
        match config::Config::init() {
            Ok(path) => {
                println!("Config file created at: {}", path.display());
                println!("\nExample config:\n{}", config::example_config());
            }
            Err(e) => {
                eprintln!("Error creating config: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Load config file
    let cfg = config::Config::load();

    let base_url = args
        .base_url
        .or(cfg.base_url)
        .unwrap_or_else(|| memoir_api::client::DEFAULT_BASE_URL.to_string());
    let client = DiaryClient::new(base_url);

    // One-shot question mode
    if let Some(question) = args.ask {
        let mut conversation = Conversation::new();
        if !run_turn(&mut conversation, &client, &question).await {
            eprintln!("Nothing to ask.");
            std::process::exit(1);
        }
        // begin_turn accepted, so the answer (or a fallback) is last
        if let Some(answer) = conversation.messages().last() {
            println!("{}", answer.content);
        }
        return Ok(());
    }

    let theme = match cfg.theme.as_deref() {
        Some("light") => Theme::light(),
        _ => Theme::dark(),
    };

    let start_view = match args.view.as_deref() {
        Some("assistant") => ui::View::Assistant,
        Some("dashboard") => ui::View::Dashboard,
        _ => ui::View::Journal,
    };

    ui::run_tui(client, theme, start_view).await
}
