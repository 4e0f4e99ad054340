//! ═══════════════════════════════════════════════════════════════════════════════
//! MINDWAVE — Synthetic Brain Wave Simulation
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Four synthetic EEG bands (alpha, beta, gamma, theta) generated from
//! sinusoids plus bounded jitter, kept in a rolling window, and summarised for
//! a dashboard. Nothing here reads a sensor.
//!
//! # Usage
//!
//! ```no_run
//! use mindwave::{MindwaveConfig, SessionDriver, SimulationSession};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MindwaveConfig::load()?;
//!     let mut driver = SessionDriver::new(SimulationSession::primary(&config));
//!     driver.start();
//!     tokio::time::sleep(config.tick_period() * 5).await;
//!     println!("index = {}", driver.snapshot().activity_index);
//!     Ok(())
//! }
//! ```
//!
//! ═══════════════════════════════════════════════════════════════════════════════

#![allow(clippy::new_without_default)]

// ═══════════════════════════════════════════════════════════════════════════════
// FOUNDATION — Bands, generation, buffers
// ═══════════════════════════════════════════════════════════════════════════════

pub mod band;
pub mod generator;
pub mod sparkline;
pub mod window;

// ═══════════════════════════════════════════════════════════════════════════════
// DERIVED STATE
// ═══════════════════════════════════════════════════════════════════════════════

pub mod insight;
pub mod stats;

// ═══════════════════════════════════════════════════════════════════════════════
// SESSION & TIMING
// ═══════════════════════════════════════════════════════════════════════════════

pub mod scheduler;
pub mod session;

// ═══════════════════════════════════════════════════════════════════════════════
// VIEW SUPPORT
// ═══════════════════════════════════════════════════════════════════════════════

pub mod animation;
pub mod display;
pub mod forms;
pub mod routes;

// ═══════════════════════════════════════════════════════════════════════════════
// AMBIENT
// ═══════════════════════════════════════════════════════════════════════════════

pub mod config;
pub mod error;
pub mod telemetry;

pub use band::{Band, BandValues};
pub use config::MindwaveConfig;
pub use error::{ConfigError, MindwaveError, MindwaveResult, RouteError, ValidationError};
pub use generator::{GeneratorPreset, Jitter, WaveGenerator};
pub use insight::{Insight, InsightFeed, InsightKind};
pub use routes::{Navigator, Route};
pub use scheduler::{CancelToken, ScheduledTask, SessionDriver};
pub use session::{Phase, ProfileKind, SessionProfile, SessionSnapshot, SimulationSession, TickReport};
pub use stats::{ActivityStatus, StatsSource, SummaryStats};
pub use window::{RollingWindow, Sample, WindowSpan};
