use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::core::config::MonitorConfig;
use crate::core::process_monitor::{
    DispatchError, FilterMode, FilterSpec, LoopMetrics, OsSignalDispatcher, ProcessMonitor,
    ProcessSnapshotProvider, SignalDispatcher, SignalKind, SignalOutcome, SysinfoProvider,
};
use crate::platform::is_elevated;

use super::event_handler::{map_key, InputMode, MonitorEvent};
use super::render::{page_size_for, render_ui};

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Longest accepted search pattern
pub const MAX_SEARCH_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient message shown under the process table
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
}

/// Monitor application state
pub struct MonitorApp<P, D> {
    pub monitor: ProcessMonitor<P, D>,
    pub metrics: LoopMetrics,
    pub mode: InputMode,
    pub search_buffer: String,
    filter_before_search: Option<FilterSpec>,
    pub signal_menu_index: usize,
    /// Pid the signal menu was opened on
    pub signal_target: Option<u32>,
    pub notification: Option<Notification>,
    pub should_quit: bool,
    pub interval_ms: u64,
    pub elevated: bool,
}

impl<P: ProcessSnapshotProvider, D: SignalDispatcher> MonitorApp<P, D> {
    pub fn new(monitor: ProcessMonitor<P, D>, interval_ms: u64) -> Self {
        Self {
            monitor,
            metrics: LoopMetrics::new(),
            mode: InputMode::Normal,
            search_buffer: String::new(),
            filter_before_search: None,
            signal_menu_index: 0,
            signal_target: None,
            notification: None,
            should_quit: false,
            interval_ms,
            elevated: is_elevated(),
        }
    }

    /// Re-acquire the process table
    pub fn refresh(&mut self) {
        self.monitor.refresh(&mut self.metrics);
    }

    /// Size the process table page to the drawable area
    pub fn fit_to(&mut self, area: Rect) {
        self.monitor.set_page_size(page_size_for(area));
    }

    pub fn notify<S: Into<String>>(&mut self, message: S, level: NotificationLevel) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            created_at: Instant::now(),
        });
    }

    /// Drop the notification once it is older than `NOTIFICATION_TTL`
    pub fn expire_notification(&mut self, now: Instant) {
        let expired = self
            .notification
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.created_at) >= NOTIFICATION_TTL);
        if expired {
            self.notification = None;
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::Quit => self.should_quit = true,
            MonitorEvent::ToggleHelp => {
                self.mode = if self.mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            MonitorEvent::Refresh => self.refresh(),

            MonitorEvent::MoveUp => self.monitor.move_selection(-1),
            MonitorEvent::MoveDown => self.monitor.move_selection(1),
            MonitorEvent::PageUp => self.monitor.page_up(),
            MonitorEvent::PageDown => self.monitor.page_down(),
            MonitorEvent::Home => self.monitor.select_first(),
            MonitorEvent::End => self.monitor.select_last(),

            MonitorEvent::NextSortKey => self.monitor.next_sort_key(&mut self.metrics),
            MonitorEvent::PrevSortKey => self.monitor.prev_sort_key(&mut self.metrics),
            MonitorEvent::ToggleSortDirection => {
                self.monitor.toggle_sort_direction(&mut self.metrics)
            }

            MonitorEvent::CycleFilter => self.monitor.cycle_filter(&mut self.metrics),
            MonitorEvent::ToggleOwnerFilter => {
                self.monitor.toggle_owner_filter(&mut self.metrics)
            }
            MonitorEvent::ClearFilter => self.monitor.clear_filter(&mut self.metrics),

            MonitorEvent::StartSearch => self.start_search(),
            MonitorEvent::SearchInput(c) => {
                if self.search_buffer.chars().count() < MAX_SEARCH_LEN {
                    self.search_buffer.push(c);
                    self.apply_search();
                }
            }
            MonitorEvent::SearchBackspace => {
                if self.search_buffer.pop().is_some() {
                    self.apply_search();
                }
            }
            MonitorEvent::SearchSubmit => {
                self.filter_before_search = None;
                self.mode = InputMode::Normal;
            }
            MonitorEvent::SearchCancel => {
                if let Some(previous) = self.filter_before_search.take() {
                    self.monitor.set_filter(previous, &mut self.metrics);
                }
                self.search_buffer.clear();
                self.mode = InputMode::Normal;
            }

            MonitorEvent::OpenSignalMenu => {
                if let Some(pid) = self.monitor.selected().map(|r| r.pid) {
                    self.signal_menu_index = 0;
                    self.signal_target = Some(pid);
                    self.mode = InputMode::SignalMenu;
                } else {
                    self.notify("No process selected", NotificationLevel::Info);
                }
            }
            MonitorEvent::CloseSignalMenu => {
                self.signal_target = None;
                self.mode = InputMode::Normal;
            }
            MonitorEvent::SignalMenuUp => {
                self.signal_menu_index = self.signal_menu_index.saturating_sub(1);
            }
            MonitorEvent::SignalMenuDown => {
                if self.signal_menu_index + 1 < SignalKind::ALL.len() {
                    self.signal_menu_index += 1;
                }
            }
            MonitorEvent::SignalMenuConfirm => {
                self.mode = InputMode::Normal;
                // Rows may have reordered since the menu opened
                let target = self.signal_target.take();
                if let (Some(pid), Some(&signal)) =
                    (target, SignalKind::ALL.get(self.signal_menu_index))
                {
                    let outcome = self.monitor.signal_pid(pid, signal, &mut self.metrics);
                    self.report(&outcome);
                }
            }
            MonitorEvent::SendSignal(signal) => self.send_signal(signal),

            MonitorEvent::None => {}
        }
    }

    fn start_search(&mut self) {
        let current = self.monitor.filter().clone();
        self.search_buffer = if current.mode == FilterMode::NameSubstring {
            current.pattern.clone()
        } else {
            String::new()
        };
        self.filter_before_search = Some(current);
        self.mode = InputMode::Search;
        self.apply_search();
    }

    fn apply_search(&mut self) {
        self.monitor
            .set_search_pattern(&self.search_buffer, &mut self.metrics);
    }

    fn send_signal(&mut self, signal: SignalKind) {
        match self.monitor.signal_selected(signal, &mut self.metrics) {
            Some(outcome) => self.report(&outcome),
            None => self.notify("No process selected", NotificationLevel::Info),
        }
    }

    fn report(&mut self, outcome: &SignalOutcome) {
        let mut message = outcome.message();
        if outcome.result == Err(DispatchError::PermissionDenied) && !self.elevated {
            message.push_str(" (try running as root)");
        }

        let level = if outcome.is_error() {
            NotificationLevel::Error
        } else {
            NotificationLevel::Info
        };
        self.notify(message, level);
    }
}

/// Run the monitor TUI application
pub fn run_monitor_app(config: &MonitorConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_loop(&mut terminal, config);

    // Restore terminal even when the loop failed
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &MonitorConfig,
) -> Result<()> {
    let monitor = ProcessMonitor::new(
        SysinfoProvider::new(),
        OsSignalDispatcher,
        config.filter.clone(),
        config.sort,
    );
    let mut app = MonitorApp::new(monitor, config.interval_ms);
    let tick_rate = config.interval();

    // Initial metrics collection
    // Wait for CPU measurement interval
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    app.refresh();

    let mut last_tick = Instant::now();

    // Main loop
    loop {
        app.expire_notification(Instant::now());

        // Draw UI
        terminal
            .draw(|frame| {
                app.fit_to(frame.area());
                render_ui(frame, &app);
            })
            .context("Failed to draw frame")?;

        // Handle events with timeout
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    app.metrics.record_input(Instant::now());
                    app.handle_event(map_key(key, app.mode));
                }
            }
        }

        // Check if should quit
        if app.should_quit {
            break;
        }

        // Ticks missed while a refresh ran are dropped, not queued
        if last_tick.elapsed() >= tick_rate {
            app.refresh();
            last_tick = Instant::now();
        }
    }

    log::info!(
        "Monitor stopped after {} refreshes",
        app.metrics.refresh_count
    );
    Ok(())
}
