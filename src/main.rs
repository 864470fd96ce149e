mod app;
mod audio;
mod auth;
mod chat;
mod config;
mod history;
mod input;
mod lyrics;
mod pipeline;
mod server;
mod storage;
#[cfg(test)]
mod test_support;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "lyrix", version, about = "Chat-style lyrics finder")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the terminal chat client (default).
    Chat,
    /// Run the HTTP server exposing /api/extract-lyrics.
    Serve {
        /// Address to listen on, overrides `server.bind`.
        #[arg(long)]
        bind: Option<String>,
    },
    /// Look up lyrics once and print them (headless).
    Lookup { song: String, artist: String },
    /// Read tags from a local audio file, look up lyrics and print the JSON reply.
    Extract { file: PathBuf },
    /// Inspect or clear the lookup history.
    History {
        #[command(subcommand)]
        cmd: HistoryCommand,
    },
    /// Start a session for the chat client.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LYRIX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the current session.
    Logout,
    /// Manage the accounts allowed to log in.
    Account {
        #[command(subcommand)]
        cmd: AccountCommand,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryCommand {
    /// Print past lookups, most recent first.
    List,
    /// Forget every past lookup.
    Clear,
}

#[derive(Debug, Subcommand)]
enum AccountCommand {
    /// Add an account, or reset its password.
    Add {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LYRIX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Remove an account.
    Remove {
        #[arg(long)]
        email: String,
    },
    /// List account emails.
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let command = cli.command.unwrap_or(Command::Chat);

    init_tracing(&cfg, matches!(command, Command::Chat))?;

    match command {
        Command::Chat => {
            let store = storage::SqliteStore::open(&cfg.paths.state_db())?;
            if !auth::Authenticator::new(&cfg.auth.accounts, &store).is_authenticated() {
                anyhow::bail!("not logged in; run `lyrix login --email <EMAIL>` first");
            }

            let session = chat::Session::open(Box::new(store)).context("open session")?;
            tui::theme::init(&cfg.ui);
            let mouse = cfg.input.mouse;
            let mut app = app::App::new(cfg, session)?;
            let exit = {
                let mut terminal = tui::TerminalGuard::enter(mouse).context("init terminal")?;
                app.run(terminal.terminal_mut()).await?
            };
            if exit == app::Exit::LoggedOut {
                println!("Logged out.");
            }
        }
        Command::Serve { bind } => {
            let mut cfg = cfg;
            if let Some(bind) = bind {
                cfg.server.bind = bind;
            }
            server::serve(&cfg).await?;
        }
        Command::Lookup { song, artist } => {
            let client = lyrics::OvhClient::new(&cfg.lyrics)?;
            let store = storage::SqliteStore::open(&cfg.paths.state_db())?;
            let mut session = chat::Session::open(Box::new(store)).context("open session")?;
            if !session.submit(&client, &song, &artist).await {
                anyhow::bail!("both a song and an artist are required");
            }
            if let Some(reply) = session.messages().last() {
                println!("{}", reply.content);
            }
        }
        Command::Extract { file } => {
            let client = lyrics::OvhClient::new(&cfg.lyrics)?;
            let upload = read_upload(&file).await?;
            let reply = pipeline::extract_lyrics(&client, upload).await;
            println!("{}", serde_json::to_string_pretty(&reply.to_json())?);
        }
        Command::History { cmd } => {
            let store = storage::SqliteStore::open(&cfg.paths.state_db())?;
            match cmd {
                HistoryCommand::List => {
                    let history = history::History::load(&store)?;
                    if history.is_empty() {
                        println!("No history yet.");
                    }
                    for (i, h) in history.entries().iter().enumerate() {
                        println!("{:02}. {} by {}  ({})", i + 1, h.song, h.artist, day_of(h.timestamp));
                    }
                }
                HistoryCommand::Clear => {
                    let mut history = history::History::load(&store)?;
                    history.clear();
                    history.save(&store)?;
                    println!("History cleared.");
                }
            }
        }
        Command::Login { email, password } => {
            let store = storage::SqliteStore::open(&cfg.paths.state_db())?;
            let credentials = auth::Credentials { email, password };
            auth::Authenticator::new(&cfg.auth.accounts, &store).login(&credentials)?;
            println!("Logged in as {}.", credentials.email);
        }
        Command::Logout => {
            let store = storage::SqliteStore::open(&cfg.paths.state_db())?;
            auth::Authenticator::new(&cfg.auth.accounts, &store).logout()?;
            println!("Logged out.");
        }
        Command::Account { cmd } => {
            let mut cfg = cfg;
            match cmd {
                AccountCommand::Add { email, password } => {
                    auth::upsert_account(&mut cfg.auth.accounts, &email, &password);
                    config::save(&cfg, cli.config.as_deref()).context("save config")?;
                    println!("Saved account {}.", email.trim());
                }
                AccountCommand::Remove { email } => {
                    let before = cfg.auth.accounts.len();
                    cfg.auth
                        .accounts
                        .retain(|a| !a.email.eq_ignore_ascii_case(email.trim()));
                    if cfg.auth.accounts.len() == before {
                        anyhow::bail!("no account {}", email.trim());
                    }
                    config::save(&cfg, cli.config.as_deref()).context("save config")?;
                    println!("Removed account {}.", email.trim());
                }
                AccountCommand::List => {
                    for a in &cfg.auth.accounts {
                        println!("{}", a.email);
                    }
                }
            }
        }
    }

    Ok(())
}

/// The chat client owns the terminal, so its logs go to a file.
fn init_tracing(cfg: &config::Config, to_file: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if to_file {
        let path = cfg.paths.log_file();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

async fn read_upload(path: &Path) -> anyhow::Result<pipeline::Upload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    Ok(pipeline::Upload {
        bytes,
        media_type: None,
        file_name: path.file_name().map(|n| n.to_string_lossy().into_owned()),
    })
}

fn day_of(timestamp_ms: i64) -> String {
    time::OffsetDateTime::from_unix_timestamp(timestamp_ms / 1000)
        .map(|t| t.date().to_string())
        .unwrap_or_else(|_| "-".to_string())
}
