//! ═══════════════════════════════════════════════════════════════════════════════
//! MINDWAVE CLI — Headless Simulation Runs
//! ═══════════════════════════════════════════════════════════════════════════════

use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;

use mindwave::display;
use mindwave::telemetry::{init_tracing, LogTarget};
use mindwave::{
    MindwaveConfig, SessionDriver, SimulationSession, StatsSource, WindowSpan,
};

#[derive(Parser)]
#[command(name = "mindwave")]
#[command(about = "Synthetic EEG brain wave simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print every tick
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Chart window: 1, 10, 30 or 60 seconds (also 1s, 10s, 30s, 1m)
    #[arg(short, long, global = true)]
    window: Option<WindowSpan>,

    /// Fixed RNG seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Where the stat cards read from
    #[arg(long, global = true, value_enum)]
    stats_source: Option<SourceArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Independent,
    Window,
}

impl From<SourceArg> for StatsSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Independent => StatsSource::Independent,
            SourceArg::Window => StatsSource::Window,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the primary simulation for a number of ticks
    Simulate {
        /// Ticks to run
        #[arg(short, long, default_value = "10")]
        ticks: u64,

        /// Wait one tick period between ticks instead of running flat out
        #[arg(long)]
        realtime: bool,

        /// Emit one JSON snapshot per tick instead of text
        #[arg(long)]
        json: bool,
    },

    /// Run the 100 ms chart demo for a while
    Demo {
        /// Seconds of wall time
        #[arg(short, long, default_value = "3")]
        seconds: u64,

        /// Emit the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the page table
    Routes,

    /// Show or create the configuration file
    Config {
        /// Show effective config
        #[arg(long)]
        show: bool,

        /// Write the effective config to the config file
        #[arg(long)]
        init: bool,
    },
}

fn progress_bar(len: u64) -> anyhow::Result<indicatif::ProgressBar> {
    let pb = indicatif::ProgressBar::new(len);
    pb.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} ticks")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

async fn run_simulate(config: &MindwaveConfig, ticks: u64, realtime: bool, json: bool) -> anyhow::Result<()> {
    let mut session = SimulationSession::primary(config);
    session.start();

    let quiet = json || config.verbose;
    if !quiet {
        display::welcome("Simulation");
    }
    let pb = if quiet { None } else { Some(progress_bar(ticks)?) };

    for _ in 0..ticks {
        if realtime {
            tokio::time::sleep(config.tick_period()).await;
        }
        let Some(report) = session.tick() else {
            break;
        };
        if json {
            println!("{}", serde_json::to_string(&session.snapshot())?);
        } else if config.verbose {
            display::tick_line(&report);
        }
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    session.stop();
    if !json {
        display::summary(&session.snapshot());
    }
    Ok(())
}

async fn run_demo(config: &MindwaveConfig, seconds: u64, json: bool) -> anyhow::Result<()> {
    let mut driver = SessionDriver::new(SimulationSession::demo(config));
    let mut updates = driver.subscribe();
    driver.start();
    if !json {
        display::welcome("Chart Demo");
    }

    let deadline = tokio::time::sleep(Duration::from_secs(seconds));
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            _ = &mut deadline => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                if config.verbose && !json {
                    let snapshot = updates.borrow_and_update().clone();
                    if let Some(sample) = snapshot.chart.last() {
                        println!(
                            "t={:6.1} α {:6.2} β {:6.2} γ {:6.2} θ {:6.2}",
                            sample.time,
                            sample.values.alpha,
                            sample.values.beta,
                            sample.values.gamma,
                            sample.values.theta
                        );
                    }
                }
            }
        }
    }

    driver.stop();
    let snapshot = driver.snapshot();
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        display::summary(&snapshot);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(LogTarget::Stderr, "info")?;

    // Load config, then apply CLI overrides
    let mut config = match MindwaveConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "config not loaded, using environment defaults");
            MindwaveConfig::from_env()?
        }
    };
    config.verbose = cli.verbose || config.verbose;
    if let Some(span) = cli.window {
        config.window_seconds = span.seconds();
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(source) = cli.stats_source {
        config.stats_source = source.into();
    }
    config.validate()?;

    match cli.command {
        Commands::Simulate { ticks, realtime, json } => {
            run_simulate(&config, ticks, realtime, json).await?;
        }

        Commands::Demo { seconds, json } => {
            run_demo(&config, seconds, json).await?;
        }

        Commands::Routes => display::routes(),

        Commands::Config { show, init } => {
            if init {
                let path = config.save()?;
                display::success(&format!("Config written to {}", path.display()));
            }
            if show || !init {
                display::config(&config);
            }
        }
    }

    Ok(())
}
