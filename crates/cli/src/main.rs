//! CLI entrypoint and subcommand orchestration.

mod config;
mod tui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use proto::{Role, SessionId, StagedFile};
use session::{BackendSender, ChatSession, PlaceholderSender};
#[cfg(not(test))]
use tracing::{info, warn};
#[cfg(not(test))]
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

/// Top-level command-line arguments for the neurago application.
#[derive(Parser)]
#[command(name = "neurago")]
#[command(about = "Terminal chat client", version)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable debug logging to ~/.neurago/logs/
    #[arg(long, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// CLI subcommands available in the application.
#[derive(Subcommand)]
enum Commands {
    /// Start the full-screen TUI (default when no subcommand is given)
    Tui,

    /// Perform one submission without the TUI and print the transcript
    Send {
        /// Message text to send
        #[arg(short = 'm', long)]
        message: Option<String>,

        /// File to attach (repeatable)
        #[arg(long = "attach", value_name = "PATH")]
        attach: Vec<PathBuf>,
    },
}

#[cfg(not(test))]
#[tokio::main]
/// Program entrypoint.
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine effective command (default to Tui if none given)
    let command = cli.command.unwrap_or(Commands::Tui);
    let is_tui = matches!(command, Commands::Tui);

    // Initialize tracing — suppress console output in TUI mode to avoid corrupting the display.
    // When --debug is passed, write debug-level logs to ~/.neurago/logs/debug.YYYY-MM-DD.log
    // using daily rotation so logs accumulate across sessions.
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    // WorkerGuard must outlive main() so buffered file writes are flushed on exit.
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>;

    let debug_writer = if cli.debug {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let log_dir = PathBuf::from(home).join(".neurago").join("logs");
        std::fs::create_dir_all(&log_dir).ok();
        let appender = tracing_appender::rolling::daily(&log_dir, "debug.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        _file_guard = Some(guard);
        Some(writer)
    } else {
        _file_guard = None;
        None
    };

    match (is_tui, debug_writer) {
        (true, Some(writer)) => {
            let console = fmt::layer()
                .with_writer(std::io::sink)
                .with_target(false)
                .with_filter(console_filter);
            let file = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .with_filter(EnvFilter::new("debug"));
            tracing_subscriber::registry()
                .with(console)
                .with(file)
                .init();
        }
        (true, None) => {
            fmt()
                .with_env_filter(console_filter)
                .with_writer(std::io::sink)
                .with_target(false)
                .init();
        }
        (false, Some(writer)) => {
            let console = fmt::layer().with_target(false).with_filter(console_filter);
            let file = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false)
                .with_filter(EnvFilter::new("debug"));
            tracing_subscriber::registry()
                .with(console)
                .with(file)
                .init();
        }
        (false, None) => {
            fmt()
                .with_env_filter(console_filter)
                .with_target(false)
                .init();
        }
    }

    // Emit session-start marker when --debug is active so each run is easily identifiable.
    if cli.debug {
        let cmd_label = match &command {
            Commands::Tui => "tui",
            Commands::Send { .. } => "send",
        };
        info!(
            version = env!("CARGO_PKG_VERSION"),
            command = cmd_label,
            log_level = %cli.log_level,
            "========== neurago session start =========="
        );
    }

    // Load config
    let config = Config::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!("Failed to load config ({e}), using defaults");
        Config::default()
    });

    match command {
        Commands::Tui => cmd_tui(config).await,
        Commands::Send { message, attach } => cmd_send(config, message, attach).await,
    }
}

#[cfg(not(test))]
/// Starts the full-screen TUI.
async fn cmd_tui(config: Config) -> anyhow::Result<()> {
    let session = ChatSession::new();
    let session_id = session.id().clone();
    let sender: Arc<dyn BackendSender> = Arc::new(PlaceholderSender::with_delay(
        Duration::from_millis(config.backend.reply_delay_ms),
    ));
    let app = tui::app::TuiApp::new(session, &config);

    tui::run_tui(app, sender).await?;

    print_goodbye_banner(&session_id);
    Ok(())
}

/// Runs one submission against the stub backend and prints the transcript.
async fn cmd_send(
    config: Config,
    message: Option<String>,
    attach: Vec<PathBuf>,
) -> anyhow::Result<()> {
    use anyhow::Context;

    let mut session = ChatSession::new();
    for path in &attach {
        let file = StagedFile::from_path(path)
            .with_context(|| format!("failed to stage {}", path.display()))?;
        session.stage_file(file);
    }
    session.set_draft(message.unwrap_or_default());

    let sender = PlaceholderSender::with_delay(Duration::from_millis(config.backend.reply_delay_ms));
    if !session.submit(&sender).await {
        println!("Nothing to send: pass -m <text> and/or --attach <path>.");
        return Ok(());
    }

    for msg in session.messages() {
        let label = match msg.role {
            Role::User => "You",
            Role::Assistant => "Neurago",
        };
        println!("{label}: {}", msg.content);
        for attachment in &msg.attachments {
            println!("  📎 {}", tui::chat::attachment_summary(attachment));
        }
    }
    Ok(())
}

/// Prints the branded farewell banner with a fresh-start hint.
fn print_goodbye_banner(session_id: &SessionId) {
    let session_str = session_id.as_str();

    println!();
    println!("  \x1b[1;36m _ __   ___ _   _ _ __ __ _  __ _  ___  \x1b[0m");
    println!("  \x1b[1;36m| '_ \\ / _ \\ | | | '__/ _` |/ _` |/ _ \\ \x1b[0m");
    println!("  \x1b[1;36m| | | |  __/ |_| | | | (_| | (_| | (_) |\x1b[0m");
    println!("  \x1b[1;36m|_| |_|\\___|\\__,_|_|  \\__,_|\\__, |\\___/ \x1b[0m");
    println!("  \x1b[1;36m                            |___/       \x1b[0m");
    println!();
    println!("  \x1b[1;37mSession\x1b[0m    \x1b[36m{session_str}\x1b[0m");
    println!("  \x1b[1;37mBackend\x1b[0m    \x1b[36mplaceholder (integration pending)\x1b[0m");
    println!();
    println!("  \x1b[1;37mNew chat\x1b[0m   \x1b[1;36mneurago\x1b[0m");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_command_is_tui() {
        let cli = Cli::parse_from(["neurago"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "info");
        assert!(!cli.debug);
    }

    #[test]
    fn send_command_parses_message_and_attachments() {
        let cli = Cli::parse_from([
            "neurago", "send", "-m", "see attached", "--attach", "a.pdf", "--attach", "b.txt",
        ]);
        match cli.command {
            Some(Commands::Send { message, attach }) => {
                assert_eq!(message.as_deref(), Some("see attached"));
                assert_eq!(attach, vec![PathBuf::from("a.pdf"), PathBuf::from("b.txt")]);
            }
            _ => panic!("expected send subcommand"),
        }
    }

    #[test]
    fn goodbye_banner_prints_without_panicking() {
        print_goodbye_banner(&SessionId::from("test-session"));
    }

    #[tokio::test]
    async fn cmd_send_with_nothing_to_send_is_ok() {
        let config = Config {
            backend: crate::config::BackendConfig { reply_delay_ms: 1 },
            ..Config::default()
        };
        cmd_send(config, None, Vec::new()).await.expect("ok");
    }

    #[tokio::test]
    async fn cmd_send_fails_on_unreadable_attachment() {
        let config = Config::default();
        let result = cmd_send(
            config,
            Some("hi".to_string()),
            vec![PathBuf::from("/nonexistent/missing.pdf")],
        )
        .await;
        assert!(result.is_err());
    }
}
