//! ═══════════════════════════════════════════════════════════════════════════════
//! WINDOW — Rolling Sample Buffer
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Fixed-capacity FIFO of timestamped samples. Invariants:
//! - len() ≤ capacity()
//! - samples are held in push order
//! - on overflow exactly the oldest sample is evicted
//!
//! A capacity change rebuilds the buffer; it never resamples.
//! ═══════════════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use crate::band::BandValues;
use crate::error::ConfigError;

/// One generated point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Simulated seconds since the window was built
    pub time: f64,
    #[serde(flatten)]
    pub values: BandValues<f64>,
}

impl Sample {
    pub fn new(time: f64, values: BandValues<f64>) -> Self {
        Self { time, values }
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }
}

/// Selectable chart interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum WindowSpan {
    OneSecond,
    #[default]
    TenSeconds,
    ThirtySeconds,
    OneMinute,
}

impl WindowSpan {
    pub const ALL: [WindowSpan; 4] = [
        WindowSpan::OneSecond,
        WindowSpan::TenSeconds,
        WindowSpan::ThirtySeconds,
        WindowSpan::OneMinute,
    ];

    pub fn seconds(&self) -> u32 {
        match self {
            WindowSpan::OneSecond => 1,
            WindowSpan::TenSeconds => 10,
            WindowSpan::ThirtySeconds => 30,
            WindowSpan::OneMinute => 60,
        }
    }

    pub fn from_seconds(secs: u32) -> Result<Self, ConfigError> {
        match secs {
            1 => Ok(WindowSpan::OneSecond),
            10 => Ok(WindowSpan::TenSeconds),
            30 => Ok(WindowSpan::ThirtySeconds),
            60 => Ok(WindowSpan::OneMinute),
            other => Err(ConfigError::InvalidWindowSeconds(other)),
        }
    }

    /// Selector label: 1s, 10s, 30s, 1m
    pub fn label(&self) -> &'static str {
        match self {
            WindowSpan::OneSecond => "1s",
            WindowSpan::TenSeconds => "10s",
            WindowSpan::ThirtySeconds => "30s",
            WindowSpan::OneMinute => "1m",
        }
    }

    /// Next span in selector order, wrapping
    pub fn next(self) -> Self {
        match self {
            WindowSpan::OneSecond => WindowSpan::TenSeconds,
            WindowSpan::TenSeconds => WindowSpan::ThirtySeconds,
            WindowSpan::ThirtySeconds => WindowSpan::OneMinute,
            WindowSpan::OneMinute => WindowSpan::OneSecond,
        }
    }

    /// Wrap a simulated time onto the x-axis: `t mod C`, with 0 shown as C
    pub fn display_time(&self, t: f64) -> f64 {
        let span = self.seconds() as f64;
        let rel = t.rem_euclid(span);
        if rel == 0.0 {
            span
        } else {
            rel
        }
    }
}

impl fmt::Display for WindowSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u32> for WindowSpan {
    type Error = ConfigError;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        WindowSpan::from_seconds(secs)
    }
}

impl From<WindowSpan> for u32 {
    fn from(span: WindowSpan) -> Self {
        span.seconds()
    }
}

impl FromStr for WindowSpan {
    type Err = ConfigError;

    /// Accepts "10", "10s" or "1m"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(span) = WindowSpan::ALL.iter().find(|span| span.label() == s) {
            return Ok(*span);
        }
        let secs = s
            .trim_end_matches('s')
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidWindow(s.to_string()))?;
        WindowSpan::from_seconds(secs)
    }
}

/// Bounded FIFO of samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingWindow {
    capacity: usize,
    samples: VecDeque<Sample>,
}

impl RollingWindow {
    /// Empty window; a zero capacity is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append, evicting from the front on overflow. Returns the evicted sample.
    pub fn push(&mut self, sample: Sample) -> Option<Sample> {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front()
        } else {
            None
        }
    }

    /// Value-semantics push: consumes the buffer and hands back the new one
    pub fn pushed(mut self, sample: Sample) -> Self {
        self.push(sample);
        self
    }

    /// Rebuild as an empty window of `capacity`
    pub fn resize(&mut self, capacity: usize) {
        *self = Self::new(capacity);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Copy with `time` re-indexed to 0..N-1, for a paused chart
    pub fn reindexed(&self) -> Vec<Sample> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, s)| s.with_time(i as f64))
            .collect()
    }

    /// Points the chart should draw: wrapped display time while running,
    /// contiguous indices while paused
    pub fn display_points(&self, span: WindowSpan, running: bool) -> Vec<Sample> {
        if running {
            self.samples
                .iter()
                .map(|s| s.with_time(span.display_time(s.time)))
                .collect()
        } else {
            self.reindexed()
        }
    }
}

impl<'a> IntoIterator for &'a RollingWindow {
    type Item = &'a Sample;
    type IntoIter = std::collections::vec_deque::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t: f64) -> Sample {
        Sample::new(t, BandValues::splat(t))
    }

    #[test]
    fn test_length_is_min_of_pushes_and_capacity() {
        for span in WindowSpan::ALL {
            let cap = span.seconds() as usize;
            for n in [0usize, 1, cap.saturating_sub(1), cap, cap + 1, 3 * cap + 7] {
                let mut window = RollingWindow::new(cap);
                for i in 0..n {
                    window.push(at(i as f64));
                }
                assert_eq!(window.len(), n.min(cap), "cap={} n={}", cap, n);
            }
        }
    }

    #[test]
    fn test_eviction_is_fifo() {
        let mut window = RollingWindow::new(10);
        for i in 0..25 {
            let evicted = window.push(at(i as f64));
            if i >= 10 {
                assert_eq!(evicted.map(|s| s.time), Some((i - 10) as f64));
            } else {
                assert!(evicted.is_none());
            }
        }
        let times: Vec<f64> = window.iter().map(|s| s.time).collect();
        let expected: Vec<f64> = (15..25).map(|i| i as f64).collect();
        assert_eq!(times, expected);
    }

    #[test]
    fn test_pushed_returns_new_buffer() {
        let window = RollingWindow::new(2).pushed(at(0.0)).pushed(at(1.0)).pushed(at(2.0));
        assert_eq!(window.len(), 2);
        assert_eq!(window.oldest().map(|s| s.time), Some(1.0));
        assert_eq!(window.latest().map(|s| s.time), Some(2.0));
    }

    #[test]
    fn test_resize_rebuilds() {
        let mut window = RollingWindow::new(10);
        for i in 0..10 {
            window.push(at(i as f64));
        }
        window.resize(30);
        assert!(window.is_empty());
        assert_eq!(window.capacity(), 30);
    }

    #[test]
    fn test_reindexed_is_contiguous() {
        let mut window = RollingWindow::new(5);
        for i in 40..48 {
            window.push(at(i as f64));
        }
        let times: Vec<f64> = window.reindexed().iter().map(|s| s.time).collect();
        assert_eq!(times, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_display_time_wraps() {
        let span = WindowSpan::TenSeconds;
        assert_eq!(span.display_time(3.0), 3.0);
        assert_eq!(span.display_time(10.0), 10.0);
        assert_eq!(span.display_time(20.0), 10.0);
        assert_eq!(span.display_time(23.0), 3.0);
    }

    #[test]
    fn test_span_parsing() {
        assert_eq!("1m".parse::<WindowSpan>().unwrap(), WindowSpan::OneMinute);
        assert_eq!("30".parse::<WindowSpan>().unwrap(), WindowSpan::ThirtySeconds);
        assert_eq!("10s".parse::<WindowSpan>().unwrap(), WindowSpan::TenSeconds);
        assert!("15".parse::<WindowSpan>().is_err());
        assert_eq!(
            "abc".parse::<WindowSpan>(),
            Err(ConfigError::InvalidWindow("abc".to_string()))
        );
        assert_eq!(
            WindowSpan::from_seconds(45),
            Err(ConfigError::InvalidWindowSeconds(45))
        );
    }

    #[test]
    fn test_span_serde_as_seconds() {
        let json = serde_json::to_string(&WindowSpan::OneMinute).unwrap();
        assert_eq!(json, "60");
        let span: WindowSpan = serde_json::from_str("30").unwrap();
        assert_eq!(span, WindowSpan::ThirtySeconds);
        assert!(serde_json::from_str::<WindowSpan>("7").is_err());
    }
}
