//! ═══════════════════════════════════════════════════════════════════════════════
//! SPARKLINE — Fixed-Length Recent-Value History
//! ═══════════════════════════════════════════════════════════════════════════════
//! Length is set at construction and never changes: every shift drops the
//! oldest value and appends the newest.
//! ═══════════════════════════════════════════════════════════════════════════════

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::band::{Band, BandValues};

/// Default number of points per sparkline
pub const SPARKLINE_LEN: usize = 20;

/// Constant-length FIFO of recent values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    values: VecDeque<f64>,
}

impl Sparkline {
    /// `len` copies of `fill`; a zero length is raised to one
    pub fn filled(len: usize, fill: f64) -> Self {
        Self {
            values: std::iter::repeat(fill).take(len.max(1)).collect(),
        }
    }

    pub fn from_fn(len: usize, mut f: impl FnMut() -> f64) -> Self {
        Self {
            values: (0..len.max(1)).map(|_| f()).collect(),
        }
    }

    /// Drop the oldest value, append `value`
    pub fn shift(&mut self, value: f64) {
        self.values.pop_front();
        self.values.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

/// Range the initial fill is drawn from, per band
fn seed_range(band: Band) -> (f64, f64) {
    match band {
        Band::Alpha => (30.0, 80.0),
        Band::Beta => (40.0, 100.0),
        Band::Gamma => (30.0, 100.0),
        Band::Theta => (30.0, 85.0),
    }
}

/// One sparkline per band
pub type SparklineHistory = BandValues<Sparkline>;

/// Random initial history, so the cards are not flat on first render
pub fn seeded_history<R: Rng>(len: usize, rng: &mut R) -> SparklineHistory {
    BandValues::from_fn(|band| {
        let (lo, hi) = seed_range(band);
        Sparkline::from_fn(len, || lo + rng.gen::<f64>() * (hi - lo))
    })
}

/// Shift every band's sparkline with the matching value
pub fn shift_history(history: &mut SparklineHistory, values: &BandValues<f64>) {
    for band in Band::ALL {
        history.get_mut(band).shift(*values.get(band));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shift_keeps_length() {
        let mut spark = Sparkline::filled(SPARKLINE_LEN, 0.0);
        for i in 0..100 {
            spark.shift(i as f64);
            assert_eq!(spark.len(), SPARKLINE_LEN);
        }
        assert_eq!(spark.latest(), Some(99.0));
        assert_eq!(spark.min(), 80.0);
    }

    #[test]
    fn test_seeded_history_ranges() {
        let mut rng = StdRng::seed_from_u64(9);
        let history = seeded_history(SPARKLINE_LEN, &mut rng);
        for (band, spark) in history.iter() {
            let (lo, hi) = seed_range(band);
            assert_eq!(spark.len(), SPARKLINE_LEN);
            assert!(spark.iter().all(|v| v >= lo && v < hi));
        }
    }

    #[test]
    fn test_shift_history_appends_per_band() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut history = seeded_history(5, &mut rng);
        shift_history(&mut history, &BandValues::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(history.beta.latest(), Some(2.0));
        assert_eq!(history.theta.latest(), Some(4.0));
        assert_eq!(history.alpha.len(), 5);
    }
}
