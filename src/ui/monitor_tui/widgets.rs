use ratatui::{prelude::*, widgets::Gauge};

use crate::core::process_monitor::ProcessRecord;

/// Bar color for a usage percentage
pub fn usage_color(value: f64) -> Color {
    match value {
        v if v >= 80.0 => Color::Red,
        v if v >= 60.0 => Color::Yellow,
        _ => Color::Green,
    }
}

/// Create a gauge with color based on value thresholds
pub fn colored_gauge<'a>(value: f64, label: String) -> Gauge<'a> {
    // NaN or out-of-range readings must not reach Gauge::ratio, which panics
    let ratio = if value.is_finite() {
        (value / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Gauge::default()
        .gauge_style(Style::default().fg(usage_color(value)).bg(Color::Black))
        .ratio(ratio)
        .label(label)
}

/// Row color for a process, from its resource usage
pub fn process_color(record: &ProcessRecord) -> Color {
    let cpu = record.cpu_percent;
    let mem = record.memory_percent;

    if cpu >= 50.0 {
        Color::Red
    } else if mem >= 30.0 {
        Color::Yellow
    } else if cpu >= 10.0 || mem >= 10.0 {
        Color::White
    } else {
        Color::Green
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
