//! ═══════════════════════════════════════════════════════════════════════════════
//! CONFIG — Simulation Settings
//! ═══════════════════════════════════════════════════════════════════════════════
//! Layering: defaults → config file → environment → CLI flags (applied by the
//! binaries after `load`).
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, MindwaveResult};
use crate::insight::{INSIGHT_CAP, INSIGHT_PROBABILITY};
use crate::sparkline::SPARKLINE_LEN;
use crate::stats::StatsSource;
use crate::window::WindowSpan;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MindwaveConfig {
    /// Initial chart window (1, 10, 30 or 60 seconds)
    pub window_seconds: u32,

    /// Primary simulation tick period in milliseconds
    pub tick_ms: u64,

    /// Demo chart frame period in milliseconds
    pub demo_frame_ms: u64,

    /// Chance per tick that an insight is added
    pub insight_probability: f64,

    /// Maximum insights kept
    pub insight_cap: usize,

    /// Points per sparkline
    pub sparkline_len: usize,

    /// Samples generated when a window is (re)built, capped at its capacity
    pub initial_burst: usize,

    /// Where the stat cards read from
    pub stats_source: StatsSource,

    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,

    /// Print every tick in the headless CLI
    pub verbose: bool,
}

impl Default for MindwaveConfig {
    fn default() -> Self {
        Self {
            window_seconds: 10,
            tick_ms: 1000,
            demo_frame_ms: 100,
            insight_probability: INSIGHT_PROBABILITY,
            insight_cap: INSIGHT_CAP,
            sparkline_len: SPARKLINE_LEN,
            initial_burst: 5,
            stats_source: StatsSource::Independent,
            seed: None,
            verbose: false,
        }
    }
}

impl MindwaveConfig {
    /// Load defaults, then the config file if present, then the environment
    pub fn load() -> MindwaveResult<Self> {
        Self::load_from(&Self::config_path())
    }

    /// `load` with an explicit config file path
    pub fn load_from(path: &Path) -> MindwaveResult<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment only
    pub fn from_env() -> MindwaveResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(secs) = env_parse::<u32>("MINDWAVE_WINDOW")? {
            self.window_seconds = secs;
        }
        if let Some(seed) = env_parse::<u64>("MINDWAVE_SEED")? {
            self.seed = Some(seed);
        }
        if let Some(p) = env_parse::<f64>("MINDWAVE_INSIGHT_PROBABILITY")? {
            self.insight_probability = p;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        WindowSpan::from_seconds(self.window_seconds)?;
        if !(0.0..=1.0).contains(&self.insight_probability) {
            return Err(ConfigError::ProbabilityOutOfRange(self.insight_probability));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroPeriod("tick_ms"));
        }
        if self.demo_frame_ms == 0 {
            return Err(ConfigError::ZeroPeriod("demo_frame_ms"));
        }
        if self.insight_cap == 0 {
            return Err(ConfigError::ZeroCapacity("insight_cap"));
        }
        if self.sparkline_len == 0 {
            return Err(ConfigError::ZeroCapacity("sparkline_len"));
        }
        Ok(())
    }

    /// Validated window span; falls back to the default span
    pub fn window_span(&self) -> WindowSpan {
        WindowSpan::from_seconds(self.window_seconds).unwrap_or_default()
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn demo_frame_period(&self) -> Duration {
        Duration::from_millis(self.demo_frame_ms)
    }

    /// Default config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mindwave")
            .join("config.json")
    }

    /// Save config to the default path
    pub fn save(&self) -> MindwaveResult<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> MindwaveResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                key: key.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MindwaveError;
    use parking_lot::{const_mutex, Mutex};

    /// Serialises tests that touch `MINDWAVE_*` variables
    static ENV_LOCK: Mutex<()> = const_mutex(());

    const ENV_KEYS: [&str; 3] = [
        "MINDWAVE_WINDOW",
        "MINDWAVE_SEED",
        "MINDWAVE_INSIGHT_PROBABILITY",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("mindwave-{}", uuid::Uuid::new_v4()))
            .join("config.json")
    }

    #[test]
    fn test_default_is_valid() {
        let config = MindwaveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window_span(), WindowSpan::TenSeconds);
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.demo_frame_period(), Duration::from_millis(100));
    }

    #[test]
    fn test_rejects_bad_window() {
        let config = MindwaveConfig {
            window_seconds: 15,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidWindowSeconds(15)));
    }

    #[test]
    fn test_rejects_bad_probability_and_periods() {
        let config = MindwaveConfig {
            insight_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange(_))
        ));

        let config = MindwaveConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPeriod("tick_ms")));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: MindwaveConfig =
            serde_json::from_str(r#"{ "window_seconds": 60, "stats_source": "window" }"#).unwrap();
        assert_eq!(config.window_span(), WindowSpan::OneMinute);
        assert_eq!(config.stats_source, StatsSource::Window);
        assert_eq!(config.sparkline_len, SPARKLINE_LEN);
    }

    #[test]
    fn test_env_overrides_apply() {
        let _env = ENV_LOCK.lock();
        std::env::set_var("MINDWAVE_WINDOW", "30");
        std::env::set_var("MINDWAVE_SEED", " 42 ");
        std::env::set_var("MINDWAVE_INSIGHT_PROBABILITY", "0.5");
        let config = MindwaveConfig::from_env();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.window_span(), WindowSpan::ThirtySeconds);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.insight_probability, 0.5);
        assert_eq!(config.tick_ms, 1000);
    }

    #[test]
    fn test_bad_env_is_rejected() {
        let _env = ENV_LOCK.lock();
        std::env::set_var("MINDWAVE_SEED", "forty-two");
        let unparseable = MindwaveConfig::from_env();
        clear_env();
        std::env::set_var("MINDWAVE_WINDOW", "15");
        let out_of_range = MindwaveConfig::from_env();
        clear_env();

        match unparseable {
            Err(MindwaveError::Config(ConfigError::InvalidEnv { key, value })) => {
                assert_eq!(key, "MINDWAVE_SEED");
                assert_eq!(value, "forty-two");
            }
            other => panic!("expected InvalidEnv, got {:?}", other),
        }
        assert!(matches!(
            out_of_range,
            Err(MindwaveError::Config(ConfigError::InvalidWindowSeconds(15)))
        ));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let _env = ENV_LOCK.lock();
        clear_env();
        let path = scratch_path();
        let config = MindwaveConfig {
            window_seconds: 60,
            seed: Some(7),
            stats_source: StatsSource::Window,
            insight_probability: 0.25,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: MindwaveConfig = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(MindwaveConfig::load_from(&path).unwrap(), config);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let _env = ENV_LOCK.lock();
        clear_env();
        let config = MindwaveConfig::load_from(&scratch_path()).unwrap();
        assert_eq!(config, MindwaveConfig::default());
    }
}
