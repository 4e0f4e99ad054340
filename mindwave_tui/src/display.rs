//! ═══════════════════════════════════════════════════════════════════════════════
//! DISPLAY — Page Rendering
//! ═══════════════════════════════════════════════════════════════════════════════
//!
//! Read-only: every function takes `&App` or a snapshot and draws. Nothing
//! here mutates simulation state.
//! ═══════════════════════════════════════════════════════════════════════════════

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, List, ListItem, Paragraph, Tabs,
        Wrap,
    },
    Frame,
};

use mindwave::animation::home_stats;
use mindwave::display::sparkline;
use mindwave::forms::{LoginField, RegisterField};
use mindwave::insight::InsightKind;
use mindwave::stats::ActivityStatus;
use mindwave::{Band, Route, SessionSnapshot};

use crate::state::{App, Notice};

/// Values are drawn against a fixed 0–120 y axis
const Y_MAX: f64 = 120.0;

fn band_color(band: Band) -> Color {
    let (r, g, b) = band.rgb();
    Color::Rgb(r, g, b)
}

fn status_color(status: ActivityStatus) -> Color {
    match status {
        ActivityStatus::Optimal => Color::Green,
        ActivityStatus::Active => Color::Cyan,
        ActivityStatus::Moderate => Color::Yellow,
        ActivityStatus::Relaxed => Color::Magenta,
    }
}

fn insight_color(kind: InsightKind) -> Color {
    match kind {
        InsightKind::Success => Color::Green,
        InsightKind::Info => Color::Cyan,
        InsightKind::Warning => Color::Yellow,
    }
}

fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(format!(" {} ", title), bold(Color::White)))
}

#[inline]
fn sep<'a>() -> Span<'a> {
    Span::styled(" │ ", dim())
}

// ═══════════════════════════════════════════════════════════════════════════════
// FRAME
// ═══════════════════════════════════════════════════════════════════════════════

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .split(frame.area());

    draw_nav(frame, root[0], app);
    match app.route() {
        Route::Home => draw_home(frame, root[1], app),
        Route::Simulate => draw_simulate(frame, root[1], app),
        Route::Results => draw_results(frame, root[1], app),
        Route::Profile => draw_profile(frame, root[1]),
        Route::Register => draw_register(frame, root[1], app),
        Route::Login => draw_login(frame, root[1], app),
    }
    draw_footer(frame, root[2], app);
}

fn draw_nav(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = Route::ALL
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{} {}", i + 1, r.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" MindWave ", bold(Color::Cyan))),
        )
        .select(app.route().nav_index())
        .style(dim())
        .highlight_style(bold(Color::Cyan));
    frame.render_widget(tabs, area);
}

fn key(s: &str) -> Span<'_> {
    Span::styled(s, bold(Color::Yellow))
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = match app.route() {
        _ if app.is_form_page() => vec![
            key("Tab"),
            Span::raw(" field  "),
            key("Enter"),
            Span::raw(" submit  "),
            key("^R"),
            Span::raw(" show/hide  "),
            key("F1-F6"),
            Span::raw(" pages  "),
            key("Esc"),
            Span::raw(" back  "),
            key("^C"),
            Span::raw(" quit"),
        ],
        Route::Simulate => vec![
            key("Space"),
            Span::raw(" start/stop  "),
            key("w"),
            Span::raw(" window  "),
            key("←/→"),
            Span::raw(" panel  "),
            key("b"),
            Span::raw(" band  "),
            key("Enter"),
            Span::raw(" analysis  "),
            key("r"),
            Span::raw(" reset  "),
            key("q"),
            Span::raw(" quit"),
        ],
        Route::Results => vec![
            key("Space"),
            Span::raw(" start/stop demo  "),
            key("w"),
            Span::raw(" window  "),
            key("1-6"),
            Span::raw(" pages  "),
            key("q"),
            Span::raw(" quit"),
        ],
        _ => vec![
            key("1-6"),
            Span::raw("/"),
            key("Tab"),
            Span::raw(" pages  "),
            key("Enter"),
            Span::raw(" get started  "),
            key("q"),
            Span::raw(" quit"),
        ],
    };
    if !app.is_form_page() && app.can_go_back() {
        spans.push(Span::raw("  "));
        spans.push(key("⌫"));
        spans.push(Span::raw(" back"));
    }
    if let Some(notice) = &app.notice {
        spans.push(sep());
        spans.push(match notice {
            Notice::Info(msg) => Span::styled(msg.clone(), bold(Color::Green)),
            Notice::Error(msg) => Span::styled(msg.clone(), bold(Color::Red)),
        });
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// HOME
// ═══════════════════════════════════════════════════════════════════════════════

fn draw_home(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Min(6),
    ])
    .split(area);

    let elapsed = app.entered_at().elapsed();
    let word = app.rotator.word_at(elapsed);
    let word_color = match app.rotator.index_at(elapsed) {
        0 => Color::White,
        1 => band_color(Band::Alpha),
        2 => band_color(Band::Beta),
        3 => band_color(Band::Gamma),
        _ => band_color(Band::Theta),
    };
    let headline = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Visualize Your ", bold(Color::White)),
            Span::styled(word, bold(word_color)),
            Span::styled(" in Real-Time", bold(Color::White)),
        ]),
        Line::from(Span::styled(
            "Advanced EEG Technology for Real-Time Brainwave Insights",
            Style::default().fg(Color::Cyan),
        )),
    ];
    frame.render_widget(Paragraph::new(headline).alignment(Alignment::Center), rows[0]);

    frame.render_widget(
        Paragraph::new(
            "MindWave provides EEG monitoring and visualization, helping you understand \
             and optimize your mental state through brain wave analysis.",
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(dim()),
        rows[1],
    );

    let stats = home_stats();
    let cols = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(rows[2]);
    for (stat, col) in stats.iter().zip(cols.iter()) {
        let text = vec![
            Line::from(Span::styled(stat.render(elapsed), bold(Color::White))),
            Line::from(Span::styled(stat.label, Style::default().fg(Color::Cyan))),
        ];
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(dim())),
            *col,
        );
    }

    draw_wave_info(frame, rows[3]);
}

/// Four band cards: name, range, tagline
fn draw_wave_info(frame: &mut Frame, area: Rect) {
    let cols = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for (band, col) in Band::ALL.into_iter().zip(cols.iter()) {
        let (lo, hi) = band.hz_range();
        let text = vec![
            Line::from(Span::styled(format!("{} Waves", band.name()), bold(band_color(band)))),
            Line::from(Span::styled(format!("{}-{} Hz", lo, hi), dim())),
            Line::from(band.tagline()),
        ];
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(band_color(band))),
            ),
            *col,
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SIMULATE
// ═══════════════════════════════════════════════════════════════════════════════

fn draw_simulate(frame: &mut Frame, area: Rect, app: &App) {
    let Some(snapshot) = app.simulate_snapshot() else {
        frame.render_widget(Paragraph::new("No simulation"), area);
        return;
    };
    let bottom = if app.show_analysis { 10 } else { 6 };
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(6),
        Constraint::Min(10),
        Constraint::Length(bottom),
    ])
    .split(area);

    draw_status(frame, rows[0], &snapshot);
    draw_stat_cards(frame, rows[1], &snapshot, app.selected_band);

    let middle = Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[2]);
    draw_chart(frame, middle[0], "Real-Time EEG Wave Activity", &snapshot);
    draw_carousel(frame, middle[1], app, &snapshot);

    if app.show_analysis {
        draw_analysis(frame, rows[3], &snapshot, app.selected_band);
    } else {
        draw_wave_info(frame, rows[3]);
    }
}

fn draw_status(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let (label, color) = if snapshot.is_running() {
        ("● SIMULATION STARTED", Color::Green)
    } else {
        ("⏸ SIMULATION PAUSED", Color::Red)
    };
    let line = Line::from(vec![
        Span::styled(label, bold(color)),
        sep(),
        Span::styled(format!("Window {}", snapshot.span.label()), bold(Color::LightBlue)),
        sep(),
        Span::raw(format!("{} / {} samples", snapshot.chart.len(), snapshot.capacity)),
        sep(),
        Span::styled(format!("t = {:.1}s", snapshot.elapsed_time), dim()),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_stat_cards(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot, selected: Band) {
    let cols = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for (band, col) in Band::ALL.into_iter().zip(cols.iter()) {
        let color = band_color(band);
        let text = vec![
            Line::from(vec![
                Span::styled(format!("{:.1} Hz", snapshot.stats.get(band)), bold(Color::White)),
                Span::styled(format!("  ↑ {}%", snapshot.trends.get(band)), Style::default().fg(color)),
            ]),
            Line::from(Span::styled(band.tagline(), dim())),
            Line::from(Span::styled(sparkline(snapshot.sparklines.get(band)), Style::default().fg(color))),
        ];
        let border = if band == selected { bold(color) } else { Style::default().fg(color) };
        frame.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(Span::styled(format!(" {} ", band.name()), bold(color))),
            ),
            *col,
        );
    }
}

/// Time-series chart; x is the sample position, labels show display time
fn draw_chart(frame: &mut Frame, area: Rect, title: &str, snapshot: &SessionSnapshot) {
    let series: Vec<(Band, Vec<(f64, f64)>)> = Band::ALL
        .into_iter()
        .map(|band| {
            let points = snapshot
                .chart
                .iter()
                .enumerate()
                .map(|(i, s)| (i as f64, s.values.get(band).clamp(0.0, Y_MAX)))
                .collect();
            (band, points)
        })
        .collect();

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|(band, points)| {
            Dataset::default()
                .name(band.name())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(band_color(*band)))
                .data(points)
        })
        .collect();

    let x_max = (snapshot.capacity.max(2) - 1) as f64;
    let first = snapshot.chart.first().map_or(0.0, |s| s.time);
    let last = snapshot.chart.last().map_or(0.0, |s| s.time);
    let x_labels = vec![format!("{:.1}s", first), format!("{:.1}s", last)];
    let y_labels: Vec<String> = [0.0, 40.0, 80.0, Y_MAX].iter().map(|v| format!("{:.0}", v)).collect();

    let chart = Chart::new(datasets)
        .block(panel(title))
        .x_axis(Axis::default().bounds([0.0, x_max]).labels(x_labels).style(dim()))
        .y_axis(Axis::default().bounds([0.0, Y_MAX]).labels(y_labels).style(dim()));
    frame.render_widget(chart, area);
}

fn draw_carousel(frame: &mut Frame, area: Rect, app: &App, snapshot: &SessionSnapshot) {
    let dots: String = (0..app.carousel.len())
        .map(|i| if i == app.carousel.current() { '●' } else { '○' })
        .collect();
    let title = format!("◀ {} ▶  {}", app.carousel.label(), dots);
    let block = panel(&title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match app.carousel.current() {
        0 => draw_gauge(frame, inner, snapshot),
        1 => draw_insights(frame, inner, snapshot),
        _ => draw_distribution(frame, inner, snapshot),
    }
}

fn draw_gauge(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .split(area);
    let color = status_color(snapshot.status);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Brain Activity Index "))
        .gauge_style(Style::default().fg(color))
        .percent(u16::from(snapshot.activity_index.min(100)))
        .label(format!("{} / 100", snapshot.activity_index));
    frame.render_widget(gauge, rows[0]);

    let status = vec![
        Line::from(vec![
            Span::raw("Status: "),
            Span::styled(snapshot.status.label(), bold(color)),
            Span::raw("   Dominant: "),
            Span::styled(snapshot.dominant.name(), bold(band_color(snapshot.dominant))),
        ]),
        Line::from(Span::styled(snapshot.status.recommendation(), dim())),
    ];
    frame.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), rows[1]);

    let lines: Vec<Line> = Band::ALL
        .into_iter()
        .map(|band| {
            Line::from(vec![
                Span::styled(format!("{:6}", band.name()), Style::default().fg(band_color(band))),
                Span::raw(format!("{:6.1} Hz", snapshot.stats.get(band))),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), rows[2]);
}

fn draw_insights(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let items: Vec<ListItem> = snapshot
        .insights
        .iter()
        .map(|insight| {
            let color = insight_color(insight.kind);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{} ", insight.kind.symbol()), bold(color)),
                    Span::styled(insight.message.clone(), Style::default().fg(color)),
                ]),
                Line::from(Span::styled(
                    format!("  {}", insight.timestamp.format("%H:%M:%S")),
                    dim(),
                )),
            ])
        })
        .collect();
    frame.render_widget(List::new(items), area);
}

fn draw_distribution(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    let rows = Layout::vertical([Constraint::Length(2); 4]).split(area);
    for (band, row) in Band::ALL.into_iter().zip(rows.iter()) {
        let share = *snapshot.distribution.get(band);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(band_color(band)))
            .ratio((share / 100.0).clamp(0.0, 1.0))
            .label(format!("{} {:.1}%", band.distribution_label(), share));
        frame.render_widget(gauge, *row);
    }
}

fn draw_analysis(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot, band: Band) {
    let detail = snapshot.analysis.get(band);
    let color = band_color(band);
    let text = vec![
        Line::from(vec![
            Span::raw("Average "),
            Span::styled(format!("{:.2} Hz", detail.average), bold(Color::White)),
            sep(),
            Span::raw(format!("Range {}-{} Hz", detail.min_hz, detail.max_hz)),
            sep(),
            Span::raw(format!("Amplitude {:.1} µV", detail.amplitude)),
            sep(),
            Span::raw(format!("Power {:.1} dB", detail.power_level)),
            sep(),
            Span::raw(format!("Coherence {}%", detail.coherence)),
        ]),
        Line::from(vec![
            Span::raw("Mental state: "),
            Span::styled(detail.mental_state, bold(color)),
        ]),
        Line::from(""),
        Line::from(Span::styled(detail.interpretation, dim())),
    ];
    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(format!(" {} Wave Analysis ", band.name()), bold(color))),
        ),
        area,
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// RESULTS
// ═══════════════════════════════════════════════════════════════════════════════

fn draw_results(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::vertical([Constraint::Length(8), Constraint::Min(10)]).split(area);

    match app.last_primary().and_then(|s| s.summary.as_ref().map(|w| (s, w))) {
        Some((snapshot, window)) => {
            let mut lines = vec![Line::from(vec![
                Span::styled(format!("{} samples", window.samples), bold(Color::White)),
                sep(),
                Span::raw(format!("window {}", snapshot.span.label())),
                sep(),
                Span::raw(format!("{} ticks", snapshot.ticks)),
                sep(),
                Span::styled(
                    format!("index {} ({})", snapshot.activity_index, snapshot.status.label()),
                    bold(status_color(snapshot.status)),
                ),
            ])];
            for (band, extent) in window.bands.iter() {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:6}", band.name()), bold(band_color(band))),
                    Span::raw(format!(
                        " min {:6.2}   max {:6.2}   mean {:6.2}",
                        extent.min, extent.max, extent.mean
                    )),
                ]));
            }
            frame.render_widget(Paragraph::new(lines).block(panel("Last Session")), rows[0]);
        }
        None => frame.render_widget(
            Paragraph::new("No session recorded yet. Visit Simulate (2) first.")
                .style(dim())
                .block(panel("Last Session")),
            rows[0],
        ),
    }

    if let Some(demo) = app.demo_snapshot() {
        let title = if demo.is_running() {
            format!("EEG Wave Chart ● live ({})", demo.span.label())
        } else {
            format!("EEG Wave Chart ⏸ paused ({})", demo.span.label())
        };
        draw_chart(frame, rows[1], &title, &demo);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROFILE & FORMS
// ═══════════════════════════════════════════════════════════════════════════════

fn draw_profile(frame: &mut Frame, area: Rect) {
    let cols = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area);
    let card = vec![
        Line::from(""),
        Line::from(Span::styled("Dwi Rahma", bold(Color::White))),
        Line::from(Span::styled("abcd@gmail.com", Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(Span::styled("[ Edit Profile ]", bold(Color::Yellow))),
    ];
    frame.render_widget(
        Paragraph::new(card).alignment(Alignment::Center).block(panel("Profile")),
        cols[0],
    );

    let items: Vec<ListItem> = ["Change Password", "Connected Device", "Help & Support"]
        .into_iter()
        .map(|s| ListItem::new(Line::from(vec![Span::styled("› ", dim()), Span::raw(s)])))
        .collect();
    frame.render_widget(List::new(items).block(panel("Account Settings")), cols[1]);
}

fn field_line(label: &str, value: String, placeholder: &str, focused: bool) -> Vec<Line<'static>> {
    let marker = if focused { "▶ " } else { "  " };
    let body = if value.is_empty() {
        Span::styled(placeholder.to_string(), dim())
    } else {
        Span::raw(value)
    };
    let label_style = if focused { bold(Color::Cyan) } else { Style::default().fg(Color::White) };
    vec![
        Line::from(Span::styled(format!("{}{}", marker, label), label_style)),
        Line::from(vec![Span::raw("    "), body]),
    ]
}

fn draw_register(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.register;
    let mut lines = Vec::new();
    for field in RegisterField::ALL {
        lines.extend(field_line(
            field.label(),
            form.display(field),
            field.placeholder(),
            form.focus() == field,
        ));
    }
    lines.push(Line::from(""));
    let (match_label, match_color) = if form.passwords_match() {
        ("✓ passwords match", Color::Green)
    } else {
        ("✗ passwords must match", Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(match_label, Style::default().fg(match_color))));
    let button = if form.can_submit() {
        Span::styled("[ Create Account ]", bold(Color::Cyan))
    } else {
        Span::styled("[ Create Account ]", dim())
    };
    lines.push(Line::from(button));
    lines.push(Line::from(Span::styled("Already have an account? Login (F6)", dim())));

    frame.render_widget(
        Paragraph::new(lines).block(panel("Create Account")),
        centered(area, 60),
    );
}

fn draw_login(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.login;
    let mut lines = Vec::new();
    for field in LoginField::ALL {
        let placeholder = match field {
            LoginField::Email => "abcd@gmail.com",
            LoginField::Password => "••••••••",
            LoginField::Remember => "",
        };
        lines.extend(field_line(field.label(), form.display(field), placeholder, form.focus() == field));
    }
    lines.push(Line::from(Span::styled("Forgot password?", dim())));
    lines.push(Line::from(""));
    let button = if form.can_submit() {
        Span::styled("[ Login ]", bold(Color::Cyan))
    } else {
        Span::styled("[ Login ]", dim())
    };
    lines.push(Line::from(button));
    lines.push(Line::from(Span::styled("Don't have an account? Register (F5)", dim())));

    frame.render_widget(Paragraph::new(lines).block(panel("Welcome Back")), centered(area, 60));
}

/// Horizontally centred column of `percent` width
fn centered(area: Rect, percent: u16) -> Rect {
    let side = (100 - percent.min(100)) / 2;
    Layout::horizontal([
        Constraint::Percentage(side),
        Constraint::Percentage(percent),
        Constraint::Percentage(side),
    ])
    .split(area)[1]
}
