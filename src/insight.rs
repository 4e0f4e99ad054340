//! ═══════════════════════════════════════════════════════════════════════════════
//! INSIGHT — Probabilistic Messages, Newest First
//! ═══════════════════════════════════════════════════════════════════════════════

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Default number of insights kept
pub const INSIGHT_CAP: usize = 6;

/// Chance per tick that an insight is emitted
pub const INSIGHT_PROBABILITY: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Info,
    Warning,
}

impl InsightKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            InsightKind::Success => "✓",
            InsightKind::Info => "ℹ",
            InsightKind::Warning => "⚠",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: Uuid,
    pub kind: InsightKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Insight {
    pub fn new(kind: InsightKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Static candidate list. Two candidates carry a number drawn per emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightTemplate {
    ConcentrationImproved,
    ThetaRelaxation,
    BetaElevated,
    GammaPerformance,
    AlphaCoherence,
}

impl InsightTemplate {
    pub const ALL: [InsightTemplate; 5] = [
        InsightTemplate::ConcentrationImproved,
        InsightTemplate::ThetaRelaxation,
        InsightTemplate::BetaElevated,
        InsightTemplate::GammaPerformance,
        InsightTemplate::AlphaCoherence,
    ];

    pub fn kind(&self) -> InsightKind {
        match self {
            InsightTemplate::ConcentrationImproved | InsightTemplate::GammaPerformance => {
                InsightKind::Success
            }
            InsightTemplate::ThetaRelaxation | InsightTemplate::AlphaCoherence => {
                InsightKind::Info
            }
            InsightTemplate::BetaElevated => InsightKind::Warning,
        }
    }

    pub fn render<R: Rng>(&self, rng: &mut R) -> Insight {
        let message = match self {
            InsightTemplate::ConcentrationImproved => {
                format!("Concentration improved by {}%", rng.gen_range(5..=20))
            }
            InsightTemplate::ThetaRelaxation => {
                "Theta waves indicate deep relaxation state".to_string()
            }
            InsightTemplate::BetaElevated => {
                "Beta activity slightly elevated - consider a short break".to_string()
            }
            InsightTemplate::GammaPerformance => {
                "Gamma waves showing excellent cognitive performance".to_string()
            }
            InsightTemplate::AlphaCoherence => {
                format!("Alpha coherence at {}%", rng.gen_range(70..=90))
            }
        };
        Insight::new(self.kind(), message)
    }

    /// Uniform pick from the candidate list
    pub fn pick<R: Rng>(rng: &mut R) -> InsightTemplate {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Newest-first insight history with a hard cap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightFeed {
    cap: usize,
    entries: VecDeque<Insight>,
}

impl InsightFeed {
    pub fn new(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            entries: VecDeque::new(),
        }
    }

    /// Feed holding the two messages shown before any tick
    pub fn seeded(cap: usize) -> Self {
        let mut feed = Self::new(cap);
        feed.push(Insight::new(
            InsightKind::Info,
            "Beta wave activity is optimal for focus tasks",
        ));
        feed.push(Insight::new(
            InsightKind::Success,
            "Concentration increased by 12% in the last 5 minutes",
        ));
        feed
    }

    /// Prepend, dropping the oldest past the cap. Returns the dropped entry.
    pub fn push(&mut self, insight: Insight) -> Option<Insight> {
        self.entries.push_front(insight);
        if self.entries.len() > self.cap {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// With probability `p`, prepend one random insight
    pub fn maybe_emit<R: Rng>(&mut self, p: f64, rng: &mut R) -> Option<&Insight> {
        if rng.gen::<f64>() >= p {
            return None;
        }
        let insight = InsightTemplate::pick(rng).render(rng);
        tracing::debug!(kind = ?insight.kind, message = %insight.message, "insight emitted");
        self.push(insight);
        self.entries.front()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &Insight> {
        self.entries.iter()
    }

    pub fn newest(&self) -> Option<&Insight> {
        self.entries.front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_feed_order() {
        let feed = InsightFeed::seeded(INSIGHT_CAP);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.newest().map(|i| i.kind), Some(InsightKind::Success));
    }

    #[test]
    fn test_cap_keeps_newest_first() {
        let mut feed = InsightFeed::new(INSIGHT_CAP);
        assert_eq!(feed.cap(), INSIGHT_CAP);
        for i in 0..10 {
            feed.push(Insight::new(InsightKind::Info, format!("m{}", i)));
            assert!(feed.len() <= INSIGHT_CAP);
        }
        let messages: Vec<&str> = feed.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["m9", "m8", "m7", "m6", "m5", "m4"]);
    }

    #[test]
    fn test_probability_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut feed = InsightFeed::new(INSIGHT_CAP);
        for _ in 0..100 {
            assert!(feed.maybe_emit(0.0, &mut rng).is_none());
        }
        assert!(feed.is_empty());
        assert!(feed.maybe_emit(1.0, &mut rng).is_some());
    }

    #[test]
    fn test_templated_numbers_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let msg = InsightTemplate::AlphaCoherence.render(&mut rng).message;
            let n: u32 = msg
                .trim_start_matches("Alpha coherence at ")
                .trim_end_matches('%')
                .parse()
                .unwrap();
            assert!((70..=90).contains(&n));
        }
    }
}
