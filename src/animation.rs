//! ═══════════════════════════════════════════════════════════════════════════════
//! ANIMATION — Time-Based View Helpers
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Pure functions of elapsed time; the view passes `Instant::elapsed()` in.
//! ═══════════════════════════════════════════════════════════════════════════════

use std::time::Duration;

/// Count-up duration for the home page stats
pub const COUNT_UP_DURATION: Duration = Duration::from_millis(3500);

/// How long each headline word stays up
pub const ROTATE_PERIOD: Duration = Duration::from_secs(3);

/// Headline words, cycled in order
pub const HEADLINE_WORDS: [&str; 5] = ["Brain", "Relaxation", "Focus", "Creative", "Imaginary"];

/// 1 - (1 - t)³, with t clamped to [0, 1]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Number that eases from 0 up to `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountUp {
    pub target: u32,
    pub suffix: &'static str,
    pub label: &'static str,
    pub duration: Duration,
}

impl CountUp {
    pub const fn new(target: u32, suffix: &'static str, label: &'static str) -> Self {
        Self {
            target,
            suffix,
            label,
            duration: COUNT_UP_DURATION,
        }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Floored eased value; exactly `target` once the duration has passed
    pub fn value_at(&self, elapsed: Duration) -> u32 {
        let progress = self.progress(elapsed);
        if progress >= 1.0 {
            return self.target;
        }
        (ease_out_cubic(progress) * self.target as f64).floor() as u32
    }

    pub fn render(&self, elapsed: Duration) -> String {
        format!("{}{}", self.value_at(elapsed), self.suffix)
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// The three home page stats
pub fn home_stats() -> [CountUp; 3] {
    [
        CountUp::new(4, "", "Wave Types"),
        CountUp::new(24, "/7", "Monitoring"),
        CountUp::new(100, "%", "Accuracy"),
    ]
}

/// Cycles through a fixed word list
#[derive(Debug, Clone, Copy)]
pub struct Rotator {
    words: &'static [&'static str],
    period: Duration,
}

impl Default for Rotator {
    fn default() -> Self {
        Self::new(&HEADLINE_WORDS, ROTATE_PERIOD)
    }
}

impl Rotator {
    pub fn new(words: &'static [&'static str], period: Duration) -> Self {
        Self { words, period }
    }

    pub fn index_at(&self, elapsed: Duration) -> usize {
        if self.words.is_empty() || self.period.is_zero() {
            return 0;
        }
        let steps = elapsed.as_nanos() / self.period.as_nanos();
        (steps % self.words.len() as u128) as usize
    }

    pub fn word_at(&self, elapsed: Duration) -> &'static str {
        self.words.get(self.index_at(elapsed)).copied().unwrap_or("")
    }
}

/// Wrap-around pager over labelled slides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    labels: Vec<&'static str>,
    current: usize,
}

impl Carousel {
    pub fn new(labels: Vec<&'static str>) -> Self {
        Self { labels, current: 0 }
    }

    /// Activity Index, Insights, Distribution
    pub fn simulate_panels() -> Self {
        Self::new(vec!["Activity Index", "Insights", "Distribution"])
    }

    /// Move by `direction` slides, wrapping at both ends
    pub fn paginate(&mut self, direction: isize) -> usize {
        let len = self.labels.len() as isize;
        if len > 0 {
            self.current = (self.current as isize + direction).rem_euclid(len) as usize;
        }
        self.current
    }

    pub fn next(&mut self) -> usize {
        self.paginate(1)
    }

    pub fn prev(&mut self) -> usize {
        self.paginate(-1)
    }

    /// Jump directly; out-of-range indices are ignored
    pub fn go_to(&mut self, index: usize) {
        if index < self.labels.len() {
            self.current = index;
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn label(&self) -> &'static str {
        self.labels.get(self.current).copied().unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_count_up_reaches_target() {
        let stat = CountUp::new(100, "%", "Accuracy");
        assert_eq!(stat.value_at(Duration::ZERO), 0);
        assert_eq!(stat.value_at(Duration::from_millis(1750)), 87);
        assert_eq!(stat.value_at(COUNT_UP_DURATION), 100);
        assert_eq!(stat.render(Duration::from_secs(10)), "100%");
        assert!(stat.is_done(Duration::from_secs(4)));
    }

    #[test]
    fn test_count_up_is_monotonic() {
        let stat = CountUp::new(24, "/7", "Monitoring");
        let mut last = 0;
        for ms in (0..=3600).step_by(50) {
            let v = stat.value_at(Duration::from_millis(ms));
            assert!(v >= last);
            last = v;
        }
        assert_eq!(last, 24);
    }

    #[test]
    fn test_rotator_cycles_every_three_seconds() {
        let rotator = Rotator::default();
        assert_eq!(rotator.word_at(Duration::ZERO), "Brain");
        assert_eq!(rotator.word_at(Duration::from_millis(2999)), "Brain");
        assert_eq!(rotator.word_at(Duration::from_secs(3)), "Relaxation");
        assert_eq!(rotator.word_at(Duration::from_secs(15)), "Brain");
    }

    #[test]
    fn test_rotator_sub_millisecond_period() {
        let rotator = Rotator::new(&HEADLINE_WORDS, Duration::from_micros(500));
        assert_eq!(rotator.index_at(Duration::from_micros(499)), 0);
        assert_eq!(rotator.index_at(Duration::from_micros(500)), 1);
        let word = rotator.word_at(Duration::from_secs(1));
        assert!(HEADLINE_WORDS.contains(&word));
    }

    #[test]
    fn test_carousel_wraps() {
        let mut carousel = Carousel::simulate_panels();
        assert_eq!(carousel.prev(), 2);
        assert_eq!(carousel.label(), "Distribution");
        assert_eq!(carousel.next(), 0);
        carousel.go_to(1);
        assert_eq!(carousel.label(), "Insights");
        carousel.go_to(7);
        assert_eq!(carousel.current(), 1);
    }
}
