use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;

pub mod console;
pub mod controller;
pub mod events;
pub mod popup;
pub mod profile;
pub mod reader;
pub mod session;
pub mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::session::EnvSessionProvider;
use self::state::AppState;

#[derive(Parser)]
#[command(
    name = "glossa",
    version,
    about = "Read documents from Google Drive and build vocabulary as you go"
)]
struct Cli {
    /// Config file path; falls back to GLOSSA_CONFIG, then ./config.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter directives, e.g. `debug` or `glossa_app=trace`;
    /// overrides GLOSSA_LOG
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.log_filter.as_deref());

    let config = profile::load_config(cli.config.as_deref())?;
    let state = Arc::new(AppState::new(config, Arc::new(EnvSessionProvider)));

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("task finished"),
                Some(Ok(Err(e))) => tracing::error!("task exited: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    Ok(())
}

/// Logs go to stderr so the console stays readable on stdout. Filter via
/// `--log-filter`, then GLOSSA_LOG, `info` by default.
fn init_tracing(flag: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let filter = match flag {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_env("GLOSSA_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .init();
}
