//! ═══════════════════════════════════════════════════════════════════════════════
//! SESSION — One View's Simulation State
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! A `SimulationSession` owns everything one view mutates: generator, window,
//! summary stats, sparklines, insights and the activity index. It is created
//! when the view mounts and dropped when the view goes away.
//!
//! Idle ──start──▶ Running ──stop──▶ Idle
//!
//! start rebuilds the window from an initial burst; stop keeps the last window
//! for static display. `tick` is a no-op while Idle.
//! ═══════════════════════════════════════════════════════════════════════════════

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::band::{Band, BandValues};
use crate::config::MindwaveConfig;
use crate::generator::{GeneratorPreset, WaveGenerator};
use crate::insight::{Insight, InsightFeed};
use crate::sparkline::{seeded_history, shift_history, SparklineHistory};
use crate::stats::{
    ActivityStatus, BandAnalysis, StatsSource, SummaryStats, WindowSummary, INITIAL_INDEX,
};
use crate::window::{RollingWindow, Sample, WindowSpan};

/// Scheduler state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
}

impl Phase {
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running)
    }
}

/// Which view a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// Simulate page: 1 s ticks, stat cards, insights
    Primary,
    /// Chart demo: 100 ms frames, chart only
    Demo,
}

/// Parameter set for one session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionProfile {
    pub kind: ProfileKind,
    pub preset: GeneratorPreset,
    pub tick_period: Duration,
    /// Simulated seconds added per tick
    pub time_step: f64,
    /// Window capacity per second of span
    pub points_per_second: usize,
    pub initial_burst: usize,
    /// Whether burst samples carry jitter
    pub burst_jitter: bool,
    /// Build the burst at construction instead of waiting for start
    pub prefill: bool,
    /// Stat cards, sparklines, insights and index are updated per tick
    pub panels: bool,
    pub stats_source: StatsSource,
    pub insight_probability: f64,
    pub insight_cap: usize,
    pub sparkline_len: usize,
    pub seed: Option<u64>,
}

impl SessionProfile {
    pub fn primary(config: &MindwaveConfig) -> Self {
        Self {
            kind: ProfileKind::Primary,
            preset: GeneratorPreset::Primary,
            tick_period: config.tick_period(),
            time_step: 1.0,
            points_per_second: 1,
            initial_burst: config.initial_burst,
            burst_jitter: false,
            prefill: true,
            panels: true,
            stats_source: config.stats_source,
            insight_probability: config.insight_probability,
            insight_cap: config.insight_cap,
            sparkline_len: config.sparkline_len,
            seed: config.seed,
        }
    }

    pub fn demo(config: &MindwaveConfig) -> Self {
        Self {
            kind: ProfileKind::Demo,
            preset: GeneratorPreset::Demo,
            tick_period: config.demo_frame_period(),
            time_step: 0.1,
            points_per_second: 10,
            initial_burst: 10,
            burst_jitter: true,
            prefill: false,
            panels: false,
            stats_source: config.stats_source,
            insight_probability: 0.0,
            insight_cap: config.insight_cap,
            sparkline_len: config.sparkline_len,
            seed: config.seed,
        }
    }

    pub fn capacity(&self, span: WindowSpan) -> usize {
        span.seconds() as usize * self.points_per_second
    }
}

/// What one tick changed
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub sample: Sample,
    pub index: u8,
    pub insight: Option<Insight>,
}

/// Owned simulation state for one view
#[derive(Debug)]
pub struct SimulationSession {
    profile: SessionProfile,
    generator: WaveGenerator<StdRng>,
    span: WindowSpan,
    phase: Phase,
    window: RollingWindow,
    elapsed_steps: u64,
    ticks: u64,
    stats: SummaryStats,
    sparklines: SparklineHistory,
    insights: InsightFeed,
    index: u8,
    analysis: BandValues<BandAnalysis>,
}

impl SimulationSession {
    pub fn new(profile: SessionProfile, span: WindowSpan) -> Self {
        let mut generator = WaveGenerator::from_preset(profile.preset, profile.seed);
        let sparklines = seeded_history(profile.sparkline_len, generator.rng());
        let stats = SummaryStats::default();
        let analysis = BandValues::from_fn(|band| BandAnalysis::compute(band, &stats, generator.rng()));
        let mut session = Self {
            window: RollingWindow::new(profile.capacity(span)),
            insights: InsightFeed::seeded(profile.insight_cap),
            profile,
            generator,
            span,
            phase: Phase::Idle,
            elapsed_steps: 0,
            ticks: 0,
            stats,
            sparklines,
            index: INITIAL_INDEX,
            analysis,
        };
        if session.profile.prefill {
            session.rebuild_window();
        }
        session
    }

    pub fn primary(config: &MindwaveConfig) -> Self {
        Self::new(SessionProfile::primary(config), config.window_span())
    }

    pub fn demo(config: &MindwaveConfig) -> Self {
        Self::new(SessionProfile::demo(config), config.window_span())
    }

    /// Fresh window of the current span holding the initial burst; elapsed
    /// time restarts at the burst length
    fn rebuild_window(&mut self) {
        let capacity = self.profile.capacity(self.span);
        let burst = self.profile.initial_burst.min(capacity);
        let mut window = RollingWindow::new(capacity);
        for i in 0..burst {
            let t = i as f64 * self.profile.time_step;
            let sample = if self.profile.burst_jitter {
                self.generator.sample(t)
            } else {
                self.generator.sample_clean(t)
            };
            window.push(sample);
        }
        self.window = window;
        self.elapsed_steps = burst as u64;
    }

    /// Idle → Running. Returns false when already running.
    pub fn start(&mut self) -> bool {
        if self.phase.is_running() {
            return false;
        }
        self.rebuild_window();
        self.phase = Phase::Running;
        tracing::info!(
            profile = ?self.profile.kind,
            span = %self.span,
            burst = self.window.len(),
            "simulation started"
        );
        true
    }

    /// Running → Idle, keeping the last window. Returns false when already idle.
    pub fn stop(&mut self) -> bool {
        if !self.phase.is_running() {
            return false;
        }
        self.phase = Phase::Idle;
        tracing::info!(profile = ?self.profile.kind, ticks = self.ticks, "simulation stopped");
        true
    }

    /// Start when idle, stop when running; returns the new phase
    pub fn toggle(&mut self) -> Phase {
        if self.phase.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.phase
    }

    /// Change the window span. The window is rebuilt, never resampled.
    pub fn set_span(&mut self, span: WindowSpan) {
        if span == self.span {
            return;
        }
        tracing::info!(from = %self.span, to = %span, "window span changed");
        self.span = span;
        self.rebuild_window();
    }

    /// Back to the mount-time state, idle
    pub fn reset(&mut self) {
        let profile = self.profile.clone();
        *self = Self::new(profile, self.span);
    }

    /// One scheduler step. None while idle.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.phase.is_running() {
            return None;
        }
        self.elapsed_steps += 1;
        self.ticks += 1;
        let sample = self.generator.sample(self.elapsed_time());
        self.window.push(sample);

        let mut insight = None;
        if self.profile.panels {
            self.stats = match self.profile.stats_source {
                StatsSource::Independent => SummaryStats::resample(self.generator.rng()),
                StatsSource::Window => SummaryStats(sample.values),
            };
            shift_history(&mut self.sparklines, self.stats.values());
            self.index = self.stats.activity_index();
            let stats = self.stats;
            let rng = self.generator.rng();
            self.analysis = BandValues::from_fn(|band| BandAnalysis::compute(band, &stats, &mut *rng));
            insight = self
                .insights
                .maybe_emit(self.profile.insight_probability, self.generator.rng())
                .cloned();
        }

        tracing::trace!(tick = self.ticks, t = sample.time, index = self.index, "tick");
        Some(TickReport {
            tick: self.ticks,
            sample,
            index: self.index,
            insight,
        })
    }

    pub fn profile(&self) -> &SessionProfile {
        &self.profile
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn span(&self) -> WindowSpan {
        self.span
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    /// Simulated seconds; drives the generator phase
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_steps as f64 * self.profile.time_step
    }

    pub fn elapsed_steps(&self) -> u64 {
        self.elapsed_steps
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn stats(&self) -> &SummaryStats {
        &self.stats
    }

    pub fn sparklines(&self) -> &SparklineHistory {
        &self.sparklines
    }

    pub fn insights(&self) -> &InsightFeed {
        &self.insights
    }

    pub fn activity_index(&self) -> u8 {
        self.index
    }

    pub fn analysis(&self, band: Band) -> &BandAnalysis {
        self.analysis.get(band)
    }

    /// Read-only copy for the view layer
    pub fn snapshot(&self) -> SessionSnapshot {
        let running = self.phase.is_running();
        let chart = match self.profile.kind {
            ProfileKind::Primary => self.window.display_points(self.span, running),
            // The demo chart keeps its own continuous time axis while running
            ProfileKind::Demo if running => self.window.iter().copied().collect(),
            ProfileKind::Demo => self.window.reindexed(),
        };
        SessionSnapshot {
            profile: self.profile.kind,
            phase: self.phase,
            span: self.span,
            capacity: self.window.capacity(),
            elapsed_time: self.elapsed_time(),
            ticks: self.ticks,
            chart,
            stats: self.stats,
            sparklines: self.sparklines.map(|_, s| s.to_vec()),
            insights: self.insights.iter().cloned().collect(),
            activity_index: self.index,
            status: ActivityStatus::from_index(self.index),
            dominant: self.stats.dominant(),
            distribution: self.stats.distribution(),
            trends: BandValues::from_fn(|band| self.stats.trend(band)),
            analysis: self.analysis.clone(),
            summary: WindowSummary::of(&self.window),
        }
    }
}

/// Immutable view of a session at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub profile: ProfileKind,
    pub phase: Phase,
    pub span: WindowSpan,
    pub capacity: usize,
    pub elapsed_time: f64,
    pub ticks: u64,
    /// Window samples with display-ready time values
    pub chart: Vec<Sample>,
    pub stats: SummaryStats,
    pub sparklines: BandValues<Vec<f64>>,
    /// Newest first
    pub insights: Vec<Insight>,
    pub activity_index: u8,
    pub status: ActivityStatus,
    pub dominant: Band,
    pub distribution: BandValues<f64>,
    pub trends: BandValues<i64>,
    pub analysis: BandValues<BandAnalysis>,
    pub summary: Option<WindowSummary>,
}

impl SessionSnapshot {
    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparkline::SPARKLINE_LEN;

    fn seeded_config() -> MindwaveConfig {
        MindwaveConfig {
            seed: Some(17),
            ..Default::default()
        }
    }

    #[test]
    fn test_primary_mounts_idle_with_burst() {
        let session = SimulationSession::primary(&seeded_config());
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.window().len(), 5);
        assert_eq!(session.elapsed_steps(), 5);
        assert_eq!(session.activity_index(), INITIAL_INDEX);
        assert_eq!(session.insights().len(), 2);
    }

    #[test]
    fn test_demo_mounts_empty() {
        let session = SimulationSession::demo(&seeded_config());
        assert!(session.window().is_empty());
        assert_eq!(session.window().capacity(), 100);
    }

    #[test]
    fn test_tick_is_noop_while_idle() {
        let mut session = SimulationSession::primary(&seeded_config());
        assert!(session.tick().is_none());
        assert_eq!(session.ticks(), 0);
    }

    #[test]
    fn test_tick_advances_time_and_window() {
        let mut session = SimulationSession::primary(&seeded_config());
        session.start();
        let report = session.tick().unwrap();
        assert_eq!(report.tick, 1);
        assert_eq!(report.sample.time, 6.0);
        assert_eq!(session.window().len(), 6);
        for _ in 0..20 {
            session.tick();
        }
        assert_eq!(session.window().len(), 10);
        assert_eq!(session.window().latest().map(|s| s.time), Some(26.0));
    }

    #[test]
    fn test_sparklines_keep_length() {
        let mut session = SimulationSession::primary(&seeded_config());
        for (_, s) in session.sparklines().iter() {
            assert_eq!(s.len(), SPARKLINE_LEN);
        }
        session.start();
        for _ in 0..57 {
            session.tick();
            for (_, s) in session.sparklines().iter() {
                assert_eq!(s.len(), SPARKLINE_LEN);
            }
        }
    }

    #[test]
    fn test_insights_capped() {
        let config = MindwaveConfig {
            insight_probability: 1.0,
            ..seeded_config()
        };
        let mut session = SimulationSession::primary(&config);
        session.start();
        for _ in 0..20 {
            let report = session.tick().unwrap();
            assert!(report.insight.is_some());
            assert!(session.insights().len() <= 6);
        }
        assert_eq!(session.insights().len(), 6);
    }

    #[test]
    fn test_span_change_rebuilds() {
        let mut session = SimulationSession::primary(&seeded_config());
        session.start();
        for _ in 0..8 {
            session.tick();
        }
        session.set_span(WindowSpan::OneSecond);
        assert_eq!(session.window().capacity(), 1);
        assert_eq!(session.window().len(), 1);
        assert_eq!(session.elapsed_steps(), 1);
        assert!(session.is_running());

        session.set_span(WindowSpan::OneMinute);
        assert_eq!(session.window().len(), 5);
        assert_eq!(session.elapsed_steps(), 5);
    }

    #[test]
    fn test_stop_retains_window() {
        let mut session = SimulationSession::primary(&seeded_config());
        session.start();
        for _ in 0..12 {
            session.tick();
        }
        let before = session.window().clone();
        assert!(session.stop());
        assert!(!session.stop());
        assert!(session.tick().is_none());
        assert_eq!(session.window(), &before);
    }

    #[test]
    fn test_start_resets_window() {
        let mut session = SimulationSession::primary(&seeded_config());
        session.start();
        for _ in 0..12 {
            session.tick();
        }
        session.stop();
        session.start();
        assert_eq!(session.window().len(), 5);
        assert_eq!(session.elapsed_steps(), 5);
    }

    #[test]
    fn test_window_stats_source_tracks_chart() {
        let config = MindwaveConfig {
            stats_source: StatsSource::Window,
            ..seeded_config()
        };
        let mut session = SimulationSession::primary(&config);
        session.start();
        let report = session.tick().unwrap();
        assert_eq!(session.stats().values(), &report.sample.values);
    }

    #[test]
    fn test_paused_snapshot_reindexes() {
        let mut session = SimulationSession::primary(&seeded_config());
        session.start();
        for _ in 0..15 {
            session.tick();
        }
        let running = session.snapshot();
        assert!(running.chart.iter().all(|s| s.time >= 1.0 && s.time <= 10.0));

        session.stop();
        let paused = session.snapshot();
        let times: Vec<f64> = paused.chart.iter().map(|s| s.time).collect();
        assert_eq!(times, (0..10).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_demo_steps_in_tenths() {
        let mut session = SimulationSession::demo(&seeded_config());
        session.start();
        assert_eq!(session.window().len(), 10);
        session.tick();
        assert!((session.elapsed_time() - 1.1).abs() < 1e-9);
        // Demo never touches the panels
        assert_eq!(session.activity_index(), INITIAL_INDEX);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = SimulationSession::primary(&seeded_config());
        session.start();
        session.tick();
        session.reset();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.ticks(), 0);
        assert_eq!(session.window().len(), 5);
    }
}
