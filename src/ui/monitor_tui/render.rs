use std::rc::Rc;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

use super::app::{MonitorApp, NotificationLevel};
use super::event_handler::InputMode;
use super::widgets::{centered_rect, colored_gauge, process_color};
use crate::core::process_monitor::{ProcessSnapshotProvider, SignalDispatcher, SignalKind};
use crate::ui::formatters::{format_gb, format_size, format_timestamp, format_uptime, truncate_to_width};

const NAME_WIDTH: usize = 20;
const USER_WIDTH: usize = 10;

// Table block borders plus the column header row
const TABLE_CHROME: u16 = 3;

const HEADER: usize = 0;
const GAUGES: usize = 1;
const DESCRIPTION: usize = 2;
const TABLE: usize = 3;
const SELECTION: usize = 4;
const NOTIFICATION: usize = 5;
const FOOTER: usize = 6;

fn main_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header line
            Constraint::Length(3), // CPU / MEM / SWP bars
            Constraint::Length(1), // Filter and sort description or search prompt
            Constraint::Min(0),    // Process table
            Constraint::Length(2), // Selected process
            Constraint::Length(1), // Notification
            Constraint::Length(2), // Footer
        ])
        .split(area)
}

/// Number of process rows that fit in `area`
pub fn page_size_for(area: Rect) -> usize {
    let chunks = main_layout(area);
    chunks[TABLE].height.saturating_sub(TABLE_CHROME) as usize
}

/// Main render function
pub fn render_ui<P, D>(frame: &mut Frame, app: &MonitorApp<P, D>)
where
    P: ProcessSnapshotProvider,
    D: SignalDispatcher,
{
    let area = frame.area();
    let chunks = main_layout(area);

    render_header(frame, chunks[HEADER], app);
    render_gauges(frame, chunks[GAUGES], app);
    render_description(frame, chunks[DESCRIPTION], app);
    render_process_table(frame, chunks[TABLE], app);
    render_selection(frame, chunks[SELECTION], app);
    render_notification(frame, chunks[NOTIFICATION], app);
    render_footer(frame, chunks[FOOTER], app);

    match app.mode {
        InputMode::SignalMenu => render_signal_menu(frame, area, app),
        InputMode::Help => render_help_overlay(frame, area),
        InputMode::Normal | InputMode::Search => {}
    }
}

fn render_header<P, D>(frame: &mut Frame, area: Rect, app: &MonitorApp<P, D>)
where
    P: ProcessSnapshotProvider,
    D: SignalDispatcher,
{
    let gauges = app.monitor.gauges();

    let mut parts = vec![
        format!("Uptime: {}", format_uptime(gauges.uptime_secs)),
        format!("Cores: {}", gauges.core_count),
        format!("RAM: {}", format_gb(gauges.memory_total_bytes)),
    ];
    if gauges.cpu_frequency_mhz > 0 {
        parts.push(format!("Freq: {} MHz", gauges.cpu_frequency_mhz));
    }
    parts.push(format!("Boot: {}", format_timestamp(gauges.boot_time)));
    if app.elevated {
        parts.push("root".to_string());
    }

    let line = Line::from(vec![
        Span::styled(
            " commandstate ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("│ {} ", parts.join(" │ "))),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_gauges<P, D>(frame: &mut Frame, area: Rect, app: &MonitorApp<P, D>)
where
    P: ProcessSnapshotProvider,
    D: SignalDispatcher,
{
    let gauges = app.monitor.gauges();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 3])
        .split(area);

    let cpu = f64::from(gauges.cpu_percent);
    frame.render_widget(colored_gauge(cpu, format!("CPU {:5.1}%", cpu)), rows[0]);

    let mem = f64::from(gauges.memory_percent);
    frame.render_widget(colored_gauge(mem, format!("MEM {:5.1}%", mem)), rows[1]);

    if gauges.has_swap() {
        let swap = f64::from(gauges.swap_percent);
        frame.render_widget(colored_gauge(swap, format!("SWP {:5.1}%", swap)), rows[2]);
    }
}

fn render_description<P, D>(frame: &mut Frame, area: Rect, app: &MonitorApp<P, D>)
where
    P: ProcessSnapshotProvider,
    D: SignalDispatcher,
{
    let line = if app.mode == InputMode::Search {
        Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{}_", app.search_buffer)),
            Span::styled(
                "  (Enter: keep, Esc: cancel)",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(app.monitor.description())
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_process_table<P, D>(frame: &mut Frame, area: Rect, app: &MonitorApp<P, D>)
where
    P: ProcessSnapshotProvider,
    D: SignalDispatcher,
{
    let processes = app.monitor.processes();
    let block = Block::default()
        .title(format!(
            " Processes ({}/{}) ",
            processes.len(),
            app.monitor.total_count()
        ))
        .borders(Borders::ALL);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(
        ["PID", "NAME", "CPU%", "MEM%", "MEM", "STATUS", "USER"]
            .into_iter()
            .map(|title| Cell::from(title).style(bold)),
    )
    .height(1);

    let selected_row = app.monitor.viewport().selected_row_on_page(processes.len());
    let rows: Vec<Row> = app
        .monitor
        .visible()
        .iter()
        .enumerate()
        .map(|(i, proc)| {
            // Highlight selected row
            let style = if Some(i) == selected_row {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(process_color(proc))
            };

            Row::new(vec![
                Cell::from(proc.pid.to_string()),
                Cell::from(truncate_to_width(&proc.name, NAME_WIDTH)),
                Cell::from(format!("{:.1}", proc.cpu_percent)),
                Cell::from(format!("{:.1}", proc.memory_percent)),
                Cell::from(format_size(proc.memory_bytes)),
                Cell::from(proc.status.short_code()),
                Cell::from(truncate_to_width(
                    proc.owner.as_deref().unwrap_or("unknown"),
                    USER_WIDTH,
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(NAME_WIDTH as u16 + 1),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(USER_WIDTH as u16),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_selection<P, D>(frame: &mut Frame, area: Rect, app: &MonitorApp<P, D>)
where
    P: ProcessSnapshotProvider,
    D: SignalDispatcher,
{
    let width = area.width as usize;
    let lines = match app.monitor.selected() {
        Some(proc) => vec![
            Line::from(format!(
                "Selected: PID {} - {} (CPU: {:.1}%, Mem: {:.1}%)",
                proc.pid, proc.name, proc.cpu_percent, proc.memory_percent
            )),
            Line::from(Span::styled(
                truncate_to_width(&format!("Command: {}", proc.display_command()), width),
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![Line::from("Selected Process: None")],
    };
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_notification<P, D>(frame: &mut Frame, area: Rect, app: &MonitorApp<P, D>)
where
    P: ProcessSnapshotProvider,
    D: SignalDispatcher,
{
    let Some(notification) = &app.notification else {
        return;
    };
    let color = match notification.level {
        NotificationLevel::Info => Color::Green,
        NotificationLevel::Error => Color::Red,
    };
    let para = Paragraph::new(notification.message.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    frame.render_widget(para, area);
}

fn render_footer<P, D>(frame: &mut Frame, area: Rect, app: &MonitorApp<P, D>)
where
    P: ProcessSnapshotProvider,
    D: SignalDispatcher,
{
    let key_avg = match app.metrics.average_input_interval() {
        Some(avg) => format!("{:.3}s", avg.as_secs_f64()),
        None => "-".to_string(),
    };
    let lines = vec![
        Line::from(" q: Quit │ ?: Help │ ←→: Sort │ r: Reverse │ f: Filter │ /: Search │ k/K: Term/Kill │ s: Signals "),
        Line::from(format!(
            " Key avg: {} | Processes: {}/{} | Refresh: {}ms ",
            key_avg,
            app.metrics.shown_count,
            app.metrics.total_count,
            app.interval_ms
        )),
    ];
    let para = Paragraph::new(lines).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}

fn render_signal_menu<P, D>(frame: &mut Frame, area: Rect, app: &MonitorApp<P, D>)
where
    P: ProcessSnapshotProvider,
    D: SignalDispatcher,
{
    let target = app
        .signal_target
        .and_then(|pid| app.monitor.processes().iter().find(|r| r.pid == pid));
    let title = match (app.signal_target, target) {
        (_, Some(proc)) => format!(" Send signal to {} ({}) ", proc.name, proc.pid),
        (Some(pid), None) => format!(" Send signal to process {} ", pid),
        (None, None) => " Send signal ".to_string(),
    };

    let lines: Vec<Line> = SignalKind::ALL
        .iter()
        .enumerate()
        .map(|(i, signal)| {
            let text = format!(" {:<14} {}", signal.to_string(), signal.description());
            if i == app.signal_menu_index {
                Line::from(Span::styled(
                    text,
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let popup_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = r#"
    commandstate - Help

    Keyboard Shortcuts:
    ─────────────────────────────────────
    ↑ / ↓         Move selection
    PgUp / PgDn   Move one page
    Home / End    First / last process
    ← / →         Previous / next sort column
    r             Reverse sort direction
    f             Cycle filter mode
    u             Toggle own processes only
    /             Search by name
    c             Clear filter
    k / K         Send SIGTERM / SIGKILL
    s             Signal menu
    F5 / R        Refresh now
    q / Esc       Quit

    Press any key to close this help
    "#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::DarkGray));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    // Center the help popup
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(paragraph, popup_area);
}
