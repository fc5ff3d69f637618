//! Per-refresh process records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheduler state of a process, normalized across platforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessStatus {
    Running,
    Sleeping,
    DiskSleep,
    Stopped,
    TracingStop,
    Zombie,
    Dead,
    Idle,
    Locked,
    Waiting,
    #[default]
    Unknown,
}

impl ProcessStatus {
    /// Three-letter code shown in the STATUS column
    pub fn short_code(self) -> &'static str {
        match self {
            ProcessStatus::Running => "RUN",
            ProcessStatus::Sleeping => "SLP",
            ProcessStatus::DiskSleep => "DSK",
            ProcessStatus::Stopped => "STP",
            ProcessStatus::TracingStop => "TRC",
            ProcessStatus::Zombie => "ZOM",
            ProcessStatus::Dead => "DEA",
            ProcessStatus::Idle => "IDL",
            ProcessStatus::Locked => "LCK",
            ProcessStatus::Waiting => "WAI",
            ProcessStatus::Unknown => "UNK",
        }
    }
}

impl From<sysinfo::ProcessStatus> for ProcessStatus {
    fn from(status: sysinfo::ProcessStatus) -> Self {
        use sysinfo::ProcessStatus as Os;

        match status {
            Os::Run => ProcessStatus::Running,
            Os::Sleep => ProcessStatus::Sleeping,
            Os::UninterruptibleDiskSleep => ProcessStatus::DiskSleep,
            Os::Stop => ProcessStatus::Stopped,
            Os::Tracing => ProcessStatus::TracingStop,
            Os::Zombie => ProcessStatus::Zombie,
            Os::Dead => ProcessStatus::Dead,
            Os::Idle | Os::Parked => ProcessStatus::Idle,
            Os::LockBlocked => ProcessStatus::Locked,
            Os::Wakekill | Os::Waking => ProcessStatus::Waiting,
            _ => ProcessStatus::Unknown,
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

/// One row of the process table.
///
/// Records are rebuilt from scratch on every refresh and never mutated.
/// The only identity carried across refreshes is the numeric pid, which the
/// OS may hand to a different process once the original one exits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    /// Share of total machine CPU (0-100), not per-core
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub memory_bytes: u64,
    pub status: ProcessStatus,
    pub owner: Option<String>,
    pub command_line: String,
}

impl ProcessRecord {
    /// Command line for display, falling back to the process name
    pub fn display_command(&self) -> &str {
        if self.command_line.is_empty() {
            &self.name
        } else {
            &self.command_line
        }
    }
}

/// One refresh cycle's process list, in pipeline order.
pub type Snapshot = Vec<ProcessRecord>;
