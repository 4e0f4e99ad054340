//! ═══════════════════════════════════════════════════════════════════════════════
//! STATS — Summary Values and Everything Derived From Them
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! - SummaryStats: the four "current" band readings on the stat cards
//! - Brain Activity Index: round(clamp(mean · 0.8, 0, 100))
//! - Status, dominant band, trend, distribution shares, analysis detail
//! - WindowSummary: min / max / mean over a retained window
//! ═══════════════════════════════════════════════════════════════════════════════

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::band::{Band, BandValues};
use crate::window::RollingWindow;

/// Scale applied to the stats mean before clamping
const INDEX_SCALE: f64 = 0.8;

/// Index shown before the first tick
pub const INITIAL_INDEX: u8 = 72;

/// Where the stat cards take their numbers from each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsSource {
    /// Resampled from the catalogue Hz ranges, independent of the chart
    #[default]
    Independent,
    /// Copied from the sample just pushed into the window
    Window,
}

/// Latest band readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryStats(pub BandValues<f64>);

impl Default for SummaryStats {
    fn default() -> Self {
        SummaryStats(BandValues::new(10.5, 22.3, 45.8, 6.2))
    }
}

impl SummaryStats {
    /// Uniform draw inside each band's Hz range
    pub fn resample<R: Rng>(rng: &mut R) -> Self {
        SummaryStats(BandValues::from_fn(|band| {
            let (lo, hi) = band.hz_range();
            lo + rng.gen::<f64>() * (hi - lo)
        }))
    }

    pub fn values(&self) -> &BandValues<f64> {
        &self.0
    }

    pub fn get(&self, band: Band) -> f64 {
        *self.0.get(band)
    }

    pub fn activity_index(&self) -> u8 {
        activity_index(&self.0)
    }

    pub fn dominant(&self) -> Band {
        self.0.dominant()
    }

    /// Percent of the band's catalogue maximum, rounded
    pub fn trend(&self, band: Band) -> i64 {
        (self.get(band) / band.max_hz() * 100.0).round() as i64
    }

    /// Each band's share of the total, in percent
    pub fn distribution(&self) -> BandValues<f64> {
        let total = self.0.sum();
        if total <= 0.0 {
            return BandValues::splat(0.0);
        }
        self.0.map(|_, v| v / total * 100.0)
    }
}

/// round(clamp(mean · 0.8, 0, 100))
pub fn activity_index(values: &BandValues<f64>) -> u8 {
    let scaled = values.mean() * INDEX_SCALE;
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, 100.0).round() as u8
}

/// Gauge classification of the activity index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    Optimal,
    Active,
    Moderate,
    Relaxed,
}

impl ActivityStatus {
    pub fn from_index(index: u8) -> Self {
        match index {
            75..=u8::MAX => ActivityStatus::Optimal,
            50..=74 => ActivityStatus::Active,
            25..=49 => ActivityStatus::Moderate,
            _ => ActivityStatus::Relaxed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityStatus::Optimal => "Optimal",
            ActivityStatus::Active => "Active",
            ActivityStatus::Moderate => "Moderate",
            ActivityStatus::Relaxed => "Relaxed",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            ActivityStatus::Optimal => "Excellent state for complex tasks and learning",
            ActivityStatus::Active => "Good focus - Continue current activity",
            ActivityStatus::Moderate => "Consider taking a short energizing break",
            ActivityStatus::Relaxed => "Deep relaxation - Perfect for meditation",
        }
    }
}

/// Expandable detail panel for one stat card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandAnalysis {
    pub band: Band,
    pub average: f64,
    pub min_hz: f64,
    pub max_hz: f64,
    pub amplitude: f64,
    pub power_level: f64,
    pub coherence: u8,
    pub mental_state: &'static str,
    pub interpretation: &'static str,
}

impl BandAnalysis {
    /// Recomputed whenever the stats change; amplitude, power and coherence
    /// are decorative draws around per-band baselines
    pub fn compute<R: Rng>(band: Band, stats: &SummaryStats, rng: &mut R) -> Self {
        // (amplitude base, spread), (power base, spread), (coherence base, spread)
        let ((amp, amp_s), (pow, pow_s), (coh, coh_s)) = match band {
            Band::Alpha => ((30.0, 20.0), (15.5, 5.0), (75.0, 15.0)),
            Band::Beta => ((15.0, 15.0), (12.8, 4.0), (70.0, 20.0)),
            Band::Gamma => ((10.0, 8.0), (8.3, 3.0), (65.0, 25.0)),
            Band::Theta => ((40.0, 25.0), (18.2, 6.0), (80.0, 15.0)),
        };
        let (min_hz, max_hz) = band.hz_range();
        Self {
            band,
            average: stats.get(band),
            min_hz,
            max_hz,
            amplitude: amp + rng.gen::<f64>() * amp_s,
            power_level: pow + rng.gen::<f64>() * pow_s,
            coherence: (coh + (rng.gen::<f64>() * coh_s).round()) as u8,
            mental_state: band.mental_state(),
            interpretation: band.interpretation(),
        }
    }
}

/// Per-band extent of one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandExtent {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Results-page summary of a retained window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub samples: usize,
    pub bands: BandValues<BandExtent>,
}

impl WindowSummary {
    /// None for an empty window
    pub fn of(window: &RollingWindow) -> Option<Self> {
        if window.is_empty() {
            return None;
        }
        let n = window.len() as f64;
        let bands = BandValues::from_fn(|band| {
            let (min, max, sum) = window.iter().map(|s| *s.values.get(band)).fold(
                (f64::INFINITY, f64::NEG_INFINITY, 0.0),
                |(lo, hi, sum), v| (lo.min(v), hi.max(v), sum + v),
            );
            BandExtent { min, max, mean: sum / n }
        });
        Some(Self { samples: window.len(), bands })
    }
}
