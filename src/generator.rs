//! ═══════════════════════════════════════════════════════════════════════════════
//! GENERATOR — Synthetic Waveform Samples
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! value(band, t) = offset + amplitude · f(freq · t) + jitter
//!
//! where f is sin or cos per band. The jitter term is the only impurity; give
//! the generator a seeded RNG to make a run reproducible.
//! ═══════════════════════════════════════════════════════════════════════════════

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::band::{Band, BandValues};
use crate::window::Sample;

/// Periodic shape of one band's carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Cosine,
}

impl Waveform {
    fn eval(&self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => phase.sin(),
            Waveform::Cosine => phase.cos(),
        }
    }
}

/// Constants for one band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandWave {
    pub offset: f64,
    pub amplitude: f64,
    /// Angular frequency (rad per simulated second)
    pub freq: f64,
    pub waveform: Waveform,
}

impl BandWave {
    pub const fn sine(offset: f64, amplitude: f64, freq: f64) -> Self {
        Self { offset, amplitude, freq, waveform: Waveform::Sine }
    }

    pub const fn cosine(offset: f64, amplitude: f64, freq: f64) -> Self {
        Self { offset, amplitude, freq, waveform: Waveform::Cosine }
    }

    /// Deterministic part of the sample
    pub fn carrier(&self, t: f64) -> f64 {
        self.offset + self.amplitude * self.waveform.eval(self.freq * t)
    }
}

/// Bounded random term added to every sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Jitter {
    None,
    /// Uniform in (-m/2, +m/2)
    Centered(f64),
    /// Uniform in [0, m)
    Positive(f64),
}

impl Jitter {
    fn draw<R: Rng>(&self, rng: &mut R) -> f64 {
        match *self {
            Jitter::None => 0.0,
            Jitter::Centered(m) => (rng.gen::<f64>() - 0.5) * m,
            Jitter::Positive(m) => rng.gen::<f64>() * m,
        }
    }

    /// Inclusive-exclusive bounds of the drawn term
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            Jitter::None => (0.0, 0.0),
            Jitter::Centered(m) => (-m / 2.0, m / 2.0),
            Jitter::Positive(m) => (0.0, m),
        }
    }
}

/// Named constant sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorPreset {
    /// Main simulate page, sampled once per second
    Primary,
    /// Standalone chart demo, sampled every 100 ms
    Demo,
}

impl GeneratorPreset {
    pub fn waves(&self) -> BandValues<BandWave> {
        match self {
            GeneratorPreset::Primary => BandValues::new(
                BandWave::sine(50.0, 30.0, 0.3),
                BandWave::sine(60.0, 25.0, 0.5),
                BandWave::sine(40.0, 20.0, 0.7),
                BandWave::sine(55.0, 35.0, 0.2),
            ),
            GeneratorPreset::Demo => BandValues::new(
                BandWave::sine(60.0, 20.0, 1.0),
                BandWave::cosine(50.0, 15.0, 0.5),
                BandWave::sine(40.0, 25.0, 1.0 / 3.0),
                BandWave::cosine(70.0, 10.0, 1.0 / 1.5),
            ),
        }
    }

    pub fn jitter(&self) -> Jitter {
        match self {
            GeneratorPreset::Primary => Jitter::Centered(8.0),
            GeneratorPreset::Demo => Jitter::Positive(3.0),
        }
    }
}

/// Produces one value per band for a simulated time
#[derive(Debug, Clone)]
pub struct WaveGenerator<R = StdRng> {
    waves: BandValues<BandWave>,
    jitter: Jitter,
    rng: R,
}

impl WaveGenerator<StdRng> {
    /// Preset generator seeded from the OS, or from `seed` when given
    pub fn from_preset(preset: GeneratorPreset, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(preset.waves(), preset.jitter(), rng)
    }
}

impl<R: Rng> WaveGenerator<R> {
    pub fn new(waves: BandValues<BandWave>, jitter: Jitter, rng: R) -> Self {
        Self { waves, jitter, rng }
    }

    pub fn waves(&self) -> &BandValues<BandWave> {
        &self.waves
    }

    pub fn jitter(&self) -> Jitter {
        self.jitter
    }

    /// Shared RNG, also used by the session for stats and insights
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn value(&mut self, band: Band, t: f64) -> f64 {
        self.waves.get(band).carrier(t) + self.jitter.draw(&mut self.rng)
    }

    /// Full sample at `t`, jittered
    pub fn sample(&mut self, t: f64) -> Sample {
        let waves = self.waves;
        let jitter = self.jitter;
        let rng = &mut self.rng;
        let values = BandValues::from_fn(|band| waves.get(band).carrier(t) + jitter.draw(&mut *rng));
        Sample::new(t, values)
    }

    /// Full sample at `t` with the jitter term left out
    pub fn sample_clean(&self, t: f64) -> Sample {
        Sample::new(t, self.waves.map(|_, wave| wave.carrier(t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_carrier_at_zero() {
        let gen = WaveGenerator::from_preset(GeneratorPreset::Primary, Some(1));
        let s = gen.sample_clean(0.0);
        assert_eq!(s.values, BandValues::new(50.0, 60.0, 40.0, 55.0));
    }

    #[test]
    fn test_demo_uses_cosine_bands() {
        let gen = WaveGenerator::from_preset(GeneratorPreset::Demo, Some(1));
        let s = gen.sample_clean(0.0);
        // cos(0) = 1 on beta and theta
        assert_eq!(s.values, BandValues::new(60.0, 65.0, 40.0, 80.0));
    }

    #[test]
    fn test_jitter_stays_in_bounds() {
        let mut gen = WaveGenerator::from_preset(GeneratorPreset::Primary, Some(7));
        let (lo, hi) = gen.jitter().bounds();
        assert_eq!((lo, hi), (-4.0, 4.0));
        for i in 0..500 {
            let t = i as f64;
            let clean = gen.sample_clean(t);
            let noisy = gen.sample(t);
            for band in Band::ALL {
                let delta = noisy.values.get(band) - clean.values.get(band);
                assert!(delta >= lo - 1e-9 && delta < hi + 1e-9, "delta {} out of range", delta);
            }
        }
    }

    #[test]
    fn test_positive_jitter_is_one_sided() {
        let mut gen = WaveGenerator::from_preset(GeneratorPreset::Demo, Some(3));
        for i in 0..200 {
            let t = i as f64 * 0.1;
            let delta = gen.value(Band::Alpha, t) - gen.waves().alpha.carrier(t);
            assert!(delta >= -1e-9 && delta < 3.0 + 1e-9);
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = WaveGenerator::from_preset(GeneratorPreset::Primary, Some(42));
        let mut b = WaveGenerator::from_preset(GeneratorPreset::Primary, Some(42));
        for i in 0..10 {
            assert_eq!(a.sample(i as f64), b.sample(i as f64));
        }
    }

    #[test]
    fn test_values_stay_in_display_range() {
        let mut gen = WaveGenerator::from_preset(GeneratorPreset::Primary, None);
        for i in 0..1000 {
            let s = gen.sample(i as f64);
            for (_, v) in s.values.iter() {
                assert!(*v >= 0.0 && *v <= 120.0);
            }
        }
    }
}
