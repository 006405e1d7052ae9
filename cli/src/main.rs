//! Pasteboard Pro CLI（クリップボードのテキストを Claude で加工する）

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pb_core::domain::action::ActionKind;

mod commands;

#[derive(Parser)]
#[command(name = "pasteboard")]
#[command(version)]
#[command(about = "Rephrase, summarize, or tweetify text from the clipboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logs and metrics)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite the text in a crisp, professional tone
    Rephrase {
        #[command(flatten)]
        args: ProcessArgs,
    },

    /// Produce a 1-2 sentence summary
    Summarize {
        #[command(flatten)]
        args: ProcessArgs,
    },

    /// Convert the text into a single tweet
    Tweetify {
        #[command(flatten)]
        args: ProcessArgs,
    },
}

#[derive(Args)]
struct ProcessArgs {
    /// Text to process (omit to read --paste or stdin)
    text: Option<String>,

    /// Read the input from the clipboard
    #[arg(long)]
    paste: bool,

    /// Copy the result to the clipboard
    #[arg(short = 'c', long)]
    copy: bool,

    /// Force the offline mock processor
    #[arg(long)]
    mock: bool,

    /// Model identifier for the live API
    #[arg(long)]
    model: Option<String>,

    /// Maximum tokens in the response
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Override the API endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (default: no explicit timeout)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ログは stderr へ出す（stdout は結果のみ、パイプ可能に保つ）
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Rephrase { args } => {
            commands::process::run(ActionKind::Rephrase, &args, cli.verbose).await
        }

        Commands::Summarize { args } => {
            commands::process::run(ActionKind::Summarize, &args, cli.verbose).await
        }

        Commands::Tweetify { args } => {
            commands::process::run(ActionKind::Tweetify, &args, cli.verbose).await
        }
    }
}
