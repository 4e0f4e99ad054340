//! ═══════════════════════════════════════════════════════════════════════════════
//! MINDWAVE TUI CLI — Dashboard Entry Point
//! ═══════════════════════════════════════════════════════════════════════════════

use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

use mindwave::telemetry::{init_tracing, LogTarget};
use mindwave::{MindwaveConfig, Route, WindowSpan};
use mindwave_tui::{App, DashboardRunner};

#[derive(Parser)]
#[command(name = "mindwave-tui")]
#[command(about = "Terminal dashboard for synthetic brain wave simulation")]
#[command(version)]
struct Cli {
    /// Page to open, e.g. /simulate
    #[arg(short, long, default_value = "/")]
    route: String,

    /// Chart window: 1, 10, 30 or 60 seconds (also 1s, 10s, 30s, 1m)
    #[arg(short, long)]
    window: Option<WindowSpan>,

    /// Fixed RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (the terminal itself is taken by the dashboard)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !std::io::stdout().is_terminal() {
        anyhow::bail!("mindwave-tui needs a terminal; use `mindwave simulate` for headless runs");
    }

    let target = cli
        .log_file
        .map(LogTarget::File)
        .unwrap_or_else(LogTarget::default_file);
    init_tracing(target, "info")?;

    let route = Route::parse(&cli.route)?;

    let mut config = match MindwaveConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "config not loaded, using environment defaults");
            MindwaveConfig::from_env()?
        }
    };
    if let Some(span) = cli.window {
        config.window_seconds = span.seconds();
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    config.validate()?;

    let mut runner = DashboardRunner::new(App::new(config, route));
    runner.run().await
}
