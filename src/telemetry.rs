//! ═══════════════════════════════════════════════════════════════════════════════
//! TELEMETRY — Tracing Subscriber Setup
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Filter defaults to `info`; `RUST_LOG` overrides it. The headless CLI logs
//! to stderr. The terminal dashboard owns the screen, so it logs to a file.
//! ═══════════════════════════════════════════════════════════════════════════════

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::EnvFilter;

use crate::error::{MindwaveError, MindwaveResult};

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// `<data_dir>/mindwave/mindwave.log`, or the working directory
    pub fn default_file() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mindwave");
        LogTarget::File(dir.join("mindwave.log"))
    }
}

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber. Returns false if one was already installed.
pub fn init_tracing(target: LogTarget, default_level: &str) -> MindwaveResult<bool> {
    if INITIALISED.set(()).is_err() {
        return Ok(false);
    }

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter(default_level))
            .with_target(true)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter(default_level))
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    result
        .map(|_| true)
        .map_err(|e| MindwaveError::Internal(format!("tracing init failed: {}", e)))
}
