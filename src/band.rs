//! ═══════════════════════════════════════════════════════════════════════════════
//! BAND — The Four Brain-Wave Bands and Per-Band Storage
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Bands are labels only. Nothing here measures a frequency; the Hz ranges
//! are catalogue text shown next to the generated series.
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four named brain-wave bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Alpha,
    Beta,
    Gamma,
    Theta,
}

impl Band {
    /// All bands in display order
    pub const ALL: [Band; 4] = [Band::Alpha, Band::Beta, Band::Gamma, Band::Theta];

    pub fn name(&self) -> &'static str {
        match self {
            Band::Alpha => "Alpha",
            Band::Beta => "Beta",
            Band::Gamma => "Gamma",
            Band::Theta => "Theta",
        }
    }

    /// Catalogue frequency range (min Hz, max Hz)
    pub fn hz_range(&self) -> (f64, f64) {
        match self {
            Band::Alpha => (8.0, 13.0),
            Band::Beta => (13.0, 30.0),
            Band::Gamma => (30.0, 100.0),
            Band::Theta => (4.0, 8.0),
        }
    }

    /// Upper bound of the catalogue range, used for trend percentages
    pub fn max_hz(&self) -> f64 {
        self.hz_range().1
    }

    /// Short tagline shown in the wave information footer
    pub fn tagline(&self) -> &'static str {
        match self {
            Band::Alpha => "Relaxation & calm state",
            Band::Beta => "Active thinking & focus",
            Band::Gamma => "High cognitive function",
            Band::Theta => "Deep meditation & creativity",
        }
    }

    /// Label used by the distribution panel
    pub fn distribution_label(&self) -> &'static str {
        match self {
            Band::Alpha => "Alpha (Relaxation)",
            Band::Beta => "Beta (Focus)",
            Band::Gamma => "Gamma (Cognition)",
            Band::Theta => "Theta (Meditation)",
        }
    }

    pub fn mental_state(&self) -> &'static str {
        match self {
            Band::Alpha => "Relaxed & Wakeful",
            Band::Beta => "Active Thinking & Alert",
            Band::Gamma => "Peak Cognitive Performance",
            Band::Theta => "Deep Meditation & Creativity",
        }
    }

    pub fn interpretation(&self) -> &'static str {
        match self {
            Band::Alpha => {
                "Alpha waves indicate relaxed and alert state. This level is optimal for \
                 learning and creativity. Activity increases when eyes are closed and \
                 decreases during high concentration."
            }
            Band::Beta => {
                "Beta waves indicate high mental activity, focus, and full awareness. High \
                 levels show strong concentration, but excessive activity may indicate \
                 stress or anxiety."
            }
            Band::Gamma => {
                "Gamma waves are associated with high-level information processing and peak \
                 cognitive function. This activity is crucial for memory, learning, and \
                 integration of information from various brain areas."
            }
            Band::Theta => {
                "Theta waves dominate during deep meditation, REM sleep phase, and high \
                 creativity. This level facilitates deep insight, intuition, and access to \
                 subconscious memory."
            }
        }
    }

    /// (r, g, b) series color
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Band::Alpha => (167, 139, 250),
            Band::Beta => (59, 130, 246),
            Band::Gamma => (16, 185, 129),
            Band::Theta => (245, 158, 11),
        }
    }

    /// Next band in display order, wrapping
    pub fn next(self) -> Band {
        match self {
            Band::Alpha => Band::Beta,
            Band::Beta => Band::Gamma,
            Band::Gamma => Band::Theta,
            Band::Theta => Band::Alpha,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per band
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BandValues<T> {
    pub alpha: T,
    pub beta: T,
    pub gamma: T,
    pub theta: T,
}

impl<T> BandValues<T> {
    pub fn new(alpha: T, beta: T, gamma: T, theta: T) -> Self {
        Self { alpha, beta, gamma, theta }
    }

    /// Build by calling `f` once per band, in display order
    pub fn from_fn(mut f: impl FnMut(Band) -> T) -> Self {
        Self {
            alpha: f(Band::Alpha),
            beta: f(Band::Beta),
            gamma: f(Band::Gamma),
            theta: f(Band::Theta),
        }
    }

    pub fn get(&self, band: Band) -> &T {
        match band {
            Band::Alpha => &self.alpha,
            Band::Beta => &self.beta,
            Band::Gamma => &self.gamma,
            Band::Theta => &self.theta,
        }
    }

    pub fn get_mut(&mut self, band: Band) -> &mut T {
        match band {
            Band::Alpha => &mut self.alpha,
            Band::Beta => &mut self.beta,
            Band::Gamma => &mut self.gamma,
            Band::Theta => &mut self.theta,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Band, &T) -> U) -> BandValues<U> {
        BandValues::from_fn(|band| f(band, self.get(band)))
    }

    /// (band, value) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Band, &T)> {
        Band::ALL.into_iter().map(move |band| (band, self.get(band)))
    }
}

impl BandValues<f64> {
    pub fn splat(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn sum(&self) -> f64 {
        self.alpha + self.beta + self.gamma + self.theta
    }

    pub fn mean(&self) -> f64 {
        self.sum() / 4.0
    }

    /// Band with the largest value; ties resolve to the earliest band
    pub fn dominant(&self) -> Band {
        self.iter()
            .fold((Band::Alpha, f64::NEG_INFINITY), |best, (band, &value)| {
                if value > best.1 {
                    (band, value)
                } else {
                    best
                }
            })
            .0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_order_and_next() {
        assert_eq!(Band::ALL[0], Band::Alpha);
        let mut band = Band::Alpha;
        for _ in 0..4 {
            band = band.next();
        }
        assert_eq!(band, Band::Alpha);
    }

    #[test]
    fn test_band_values_mean_and_dominant() {
        let values = BandValues::new(10.0, 22.0, 45.0, 6.0);
        assert!((values.mean() - 20.75).abs() < 1e-9);
        assert_eq!(values.dominant(), Band::Gamma);

        let tie = BandValues::splat(5.0);
        assert_eq!(tie.dominant(), Band::Alpha);
    }

    #[test]
    fn test_band_values_serialize_flat() {
        let values = BandValues::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"alpha":1.0,"beta":2.0,"gamma":3.0,"theta":4.0}"#);
    }
}
