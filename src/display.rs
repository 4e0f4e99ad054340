//! ═══════════════════════════════════════════════════════════════════════════════
//! DISPLAY — Headless Terminal Output
//! ═══════════════════════════════════════════════════════════════════════════════

use colored::*;

use crate::band::Band;
use crate::config::MindwaveConfig;
use crate::insight::InsightKind;
use crate::routes::Route;
use crate::session::{SessionSnapshot, TickReport};
use crate::stats::ActivityStatus;

const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn band_name(band: Band) -> ColoredString {
    let (r, g, b) = band.rgb();
    format!("{:5}", band.name()).truecolor(r, g, b).bold()
}

fn status_color(status: ActivityStatus) -> &'static str {
    match status {
        ActivityStatus::Optimal => "green",
        ActivityStatus::Active => "cyan",
        ActivityStatus::Moderate => "yellow",
        ActivityStatus::Relaxed => "magenta",
    }
}

fn insight_color(kind: InsightKind) -> &'static str {
    match kind {
        InsightKind::Success => "green",
        InsightKind::Info => "cyan",
        InsightKind::Warning => "yellow",
    }
}

/// Unicode block sparkline scaled to the series' own range
pub fn sparkline(values: &[f64]) -> String {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let span = hi - lo;
    values
        .iter()
        .map(|v| {
            let level = if span > 0.0 { (v - lo) / span } else { 0.5 };
            let idx = (level * (SPARK_CHARS.len() - 1) as f64).round() as usize;
            SPARK_CHARS[idx.min(SPARK_CHARS.len() - 1)]
        })
        .collect()
}

/// Display welcome banner
pub fn welcome(title: &str) {
    println!();
    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  MINDWAVE — {}", title).bright_white().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();
}

/// One line per tick
pub fn tick_line(report: &TickReport) {
    let values = report.sample.values;
    println!(
        "{} {:>7.1}s │ {} {:6.2} {} {:6.2} {} {:6.2} {} {:6.2} │ {} {}",
        format!("#{:<4}", report.tick).bright_black(),
        report.sample.time,
        band_name(Band::Alpha),
        values.alpha,
        band_name(Band::Beta),
        values.beta,
        band_name(Band::Gamma),
        values.gamma,
        band_name(Band::Theta),
        values.theta,
        "index".bright_black(),
        report.index.to_string().white().bold(),
    );
    if let Some(insight) = &report.insight {
        println!(
            "       {} {}",
            insight.kind.symbol().color(insight_color(insight.kind)),
            insight.message.color(insight_color(insight.kind))
        );
    }
}

/// Index bar, 30 cells wide
pub fn index_bar(index: u8, status: ActivityStatus) {
    let width: usize = 30;
    let filled = (index as usize * width) / 100;
    println!(
        "  {:12} [{}{}] {:3} {}",
        "Activity".white(),
        "█".repeat(filled).color(status_color(status)),
        "░".repeat(width.saturating_sub(filled)).bright_black(),
        index,
        status.label().color(status_color(status)).bold()
    );
    println!("  {:12} {}", "", status.recommendation().bright_black());
}

/// Full session summary
pub fn summary(snapshot: &SessionSnapshot) {
    println!();
    println!("{}", "═══ SESSION SUMMARY ═══".cyan().bold());
    println!();
    println!(
        "{} {:?} │ {} {} │ {} {} │ {} {:.1}s",
        "Phase:".bright_black(),
        snapshot.phase,
        "Window:".bright_black(),
        snapshot.span.label(),
        "Ticks:".bright_black(),
        snapshot.ticks,
        "Elapsed:".bright_black(),
        snapshot.elapsed_time,
    );
    println!();

    for band in Band::ALL {
        let trend = *snapshot.trends.get(band);
        let (lo, hi) = band.hz_range();
        println!(
            "  {} {:6.2} Hz  {:>3}%  {}  {}",
            band_name(band),
            snapshot.stats.get(band),
            trend,
            sparkline(snapshot.sparklines.get(band)),
            format!("{}-{} Hz", lo, hi).bright_black(),
        );
    }
    println!();
    index_bar(snapshot.activity_index, snapshot.status);
    println!(
        "  {:12} {}",
        "Dominant".white(),
        band_name(snapshot.dominant)
    );

    if let Some(window) = &snapshot.summary {
        println!();
        println!("{} {}", "Window samples:".bright_black(), window.samples);
        for (band, extent) in window.bands.iter() {
            println!(
                "  {} min {:6.2}  max {:6.2}  mean {:6.2}",
                band_name(band),
                extent.min,
                extent.max,
                extent.mean
            );
        }
    }

    if !snapshot.insights.is_empty() {
        println!();
        println!("{}", "Insights".white().bold());
        for insight in &snapshot.insights {
            println!(
                "  {} {} {}",
                insight.kind.symbol().color(insight_color(insight.kind)),
                insight.timestamp.format("%H:%M:%S").to_string().bright_black(),
                insight.message
            );
        }
    }
    println!();
}

/// Route table
pub fn routes() {
    println!();
    println!("{}", "═══ ROUTES ═══".cyan().bold());
    println!();
    for (i, route) in Route::ALL.iter().enumerate() {
        println!(
            "  {} {:10} {}",
            format!("[{}]", i + 1).yellow(),
            route.path().white(),
            route.title().bright_black()
        );
    }
    println!();
}

/// Effective configuration
pub fn config(config: &MindwaveConfig) {
    println!();
    println!("{}", "═══ CONFIGURATION ═══".cyan().bold());
    println!();
    println!("  {:22} {}", "config file".white(), MindwaveConfig::config_path().display());
    println!("  {:22} {}", "window".white(), config.window_span().label());
    println!("  {:22} {} ms", "tick".white(), config.tick_ms);
    println!("  {:22} {} ms", "demo frame".white(), config.demo_frame_ms);
    println!("  {:22} {}", "insight probability".white(), config.insight_probability);
    println!("  {:22} {}", "insight cap".white(), config.insight_cap);
    println!("  {:22} {}", "sparkline length".white(), config.sparkline_len);
    println!("  {:22} {}", "initial burst".white(), config.initial_burst);
    println!("  {:22} {:?}", "stats source".white(), config.stats_source);
    println!(
        "  {:22} {}",
        "seed".white(),
        config.seed.map_or_else(|| "entropy".to_string(), |s| s.to_string())
    );
    println!();
}

/// Display success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message.green());
}

/// Display error
pub fn error(message: &str) {
    eprintln!();
    eprintln!("{} {}", "ERROR:".red().bold(), message.red());
}
