use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::process_monitor::SignalKind;

/// What the keyboard is currently driving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a name filter
    Search,
    /// Choosing a signal for the selected process
    SignalMenu,
    Help,
}

/// Events that can occur in the monitor TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Re-acquire the process table now
    Refresh,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Home,
    End,
    NextSortKey,
    PrevSortKey,
    ToggleSortDirection,
    CycleFilter,
    ToggleOwnerFilter,
    ClearFilter,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    SearchCancel,
    OpenSignalMenu,
    CloseSignalMenu,
    SignalMenuUp,
    SignalMenuDown,
    SignalMenuConfirm,
    /// Send a signal to the selected process
    SendSignal(SignalKind),
    /// No action
    None,
}

/// Translate a key press into an event for the current mode
pub fn map_key(key: KeyEvent, mode: InputMode) -> MonitorEvent {
    // Raw mode swallows SIGINT
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return MonitorEvent::Quit;
    }

    match mode {
        InputMode::Normal => map_normal(key.code),
        InputMode::Search => match key.code {
            KeyCode::Enter => MonitorEvent::SearchSubmit,
            KeyCode::Esc => MonitorEvent::SearchCancel,
            KeyCode::Backspace => MonitorEvent::SearchBackspace,
            KeyCode::Char(c) if (' '..='~').contains(&c) => MonitorEvent::SearchInput(c),
            _ => MonitorEvent::None,
        },
        InputMode::SignalMenu => match key.code {
            KeyCode::Up => MonitorEvent::SignalMenuUp,
            KeyCode::Down => MonitorEvent::SignalMenuDown,
            KeyCode::Enter => MonitorEvent::SignalMenuConfirm,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('s') => {
                MonitorEvent::CloseSignalMenu
            }
            _ => MonitorEvent::None,
        },
        // Press any key to close the help
        InputMode::Help => MonitorEvent::ToggleHelp,
    }
}

fn map_normal(code: KeyCode) -> MonitorEvent {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => MonitorEvent::Quit,
        KeyCode::Char('?') | KeyCode::Char('h') => MonitorEvent::ToggleHelp,
        KeyCode::F(5) | KeyCode::Char('R') => MonitorEvent::Refresh,
        KeyCode::Up => MonitorEvent::MoveUp,
        KeyCode::Down => MonitorEvent::MoveDown,
        KeyCode::PageUp => MonitorEvent::PageUp,
        KeyCode::PageDown => MonitorEvent::PageDown,
        KeyCode::Home => MonitorEvent::Home,
        KeyCode::End => MonitorEvent::End,
        KeyCode::Left => MonitorEvent::PrevSortKey,
        KeyCode::Right => MonitorEvent::NextSortKey,
        KeyCode::Char('r') => MonitorEvent::ToggleSortDirection,
        KeyCode::Char('f') => MonitorEvent::CycleFilter,
        KeyCode::Char('u') => MonitorEvent::ToggleOwnerFilter,
        KeyCode::Char('c') => MonitorEvent::ClearFilter,
        KeyCode::Char('/') => MonitorEvent::StartSearch,
        KeyCode::Char('s') => MonitorEvent::OpenSignalMenu,
        KeyCode::Char('k') => MonitorEvent::SendSignal(SignalKind::Terminate),
        KeyCode::Char('K') => MonitorEvent::SendSignal(SignalKind::Kill),
        _ => MonitorEvent::None,
    }
}
