//! Terminal User Interface for the process monitor.
//!
//! Draws the process table with ratatui and drives the refresh loop.

mod app;
mod event_handler;
mod render;
mod widgets;

pub use app::{run_monitor_app, MonitorApp, Notification, NotificationLevel};
pub use event_handler::{map_key, InputMode, MonitorEvent};
