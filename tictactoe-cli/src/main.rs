use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tictactoe::server::{AppState, PumpConfig, RoomConfig, ServerConfig, router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictactoe", version, about = "Two-player tic-tac-toe game server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the game over HTTP and WebSocket.
    Serve(ServeArgs),
}

#[derive(clap::Args)]
struct ServeArgs {
    #[arg(long, env = "TICTACTOE_BIND", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    /// Directory with index.html, room.html and 404.html.
    #[arg(long, env = "TICTACTOE_SCENES", default_value = "./scenes")]
    scenes: PathBuf,

    /// Drop connections that send nothing for this long.
    #[arg(long, env = "TICTACTOE_IDLE_TIMEOUT_SECS", default_value_t = 15 * 60)]
    idle_timeout_secs: u64,

    /// Pause between seating the second player and starting the game.
    #[arg(long, env = "TICTACTOE_SETTLE_DELAY_MS", default_value_t = 500)]
    settle_delay_ms: u64,

    /// How long a room waits on one player's full queue before skipping it.
    #[arg(long, env = "TICTACTOE_BROADCAST_TIMEOUT_MS", default_value_t = 5000)]
    broadcast_timeout_ms: u64,

    /// Close rooms that nobody has joined within this many seconds.
    #[arg(long, env = "TICTACTOE_WAITING_TTL_SECS", default_value_t = 10 * 60)]
    waiting_ttl_secs: u64,
}

impl ServeArgs {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind: self.bind,
            scenes_dir: self.scenes,
            room: RoomConfig {
                settle_delay: Duration::from_millis(self.settle_delay_ms),
                broadcast_timeout: Duration::from_millis(self.broadcast_timeout_ms),
                waiting_ttl: Duration::from_secs(self.waiting_ttl_secs),
                ..RoomConfig::default()
            },
            pump: PumpConfig {
                idle_timeout: Duration::from_secs(self.idle_timeout_secs),
                ..PumpConfig::default()
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve(args.into_config()).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> Result<()> {
    println!("{}", "🚀 Starting tic-tac-toe server...".green().bold());

    let addr = config.bind;
    if !config.scenes_dir.is_dir() {
        println!(
            "{} {}",
            "⚠️  Scenes directory not found:".yellow(),
            config.scenes_dir.display()
        );
    }

    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    println!("   🌐 Listening on http://{}", addr);
    info!("running server at {}", addr);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
