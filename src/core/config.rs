use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::core::process_monitor::{FilterMode, FilterSpec, SortSpec};
use crate::error::{CommandStateError, Result};

pub const DEFAULT_INTERVAL_MS: u64 = 2000;
pub const MIN_INTERVAL_MS: u64 = 100;
pub const MAX_INTERVAL_MS: u64 = 60_000;

/// Runtime settings of the monitor, built from command line flags.
/// Nothing here is read from or written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub interval_ms: u64,
    pub sort: SortSpec,
    pub filter: FilterSpec,
    /// Emit JSON lines instead of running the TUI
    #[serde(default)]
    pub json: bool,
    /// Number of JSON snapshots to print, 0 for no limit
    #[serde(default)]
    pub iterations: u64,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            sort: SortSpec::default(),
            filter: FilterSpec::default(),
            json: false,
            iterations: 0,
            log_file: None,
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&self.interval_ms) {
            return Err(CommandStateError::config(format!(
                "refresh interval must be between {} and {} ms, got {}",
                MIN_INTERVAL_MS, MAX_INTERVAL_MS, self.interval_ms
            )));
        }

        if !self.filter.threshold.is_finite() || !(0.0..=100.0).contains(&self.filter.threshold)
        {
            return Err(CommandStateError::config(format!(
                "threshold must be a percentage between 0 and 100, got {}",
                self.filter.threshold
            )));
        }

        if self.filter.mode == FilterMode::NameSubstring && self.filter.pattern.chars().count() > 64
        {
            return Err(CommandStateError::config("search pattern is too long"));
        }

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
