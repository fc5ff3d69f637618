//! Process monitoring core functionality.
//!
//! This module provides the business logic of the process table: acquiring
//! snapshots, filtering, sorting, paging and sending signals.

pub mod filter;
mod gauges;
mod loop_metrics;
mod provider;
mod record;
mod refresh;
pub mod signal;
pub mod sort;
mod viewport;

pub use filter::{FilterMode, FilterSpec, DEFAULT_THRESHOLD};
pub use gauges::SystemGauges;
pub use loop_metrics::LoopMetrics;
pub use provider::{ProcessSnapshotProvider, SysinfoProvider};
pub use record::{ProcessRecord, ProcessStatus, Snapshot};
pub use refresh::ProcessMonitor;
pub use signal::{
    DispatchError, OsSignalDispatcher, SignalDispatcher, SignalKind, SignalOutcome, SignalRequest,
};
pub use sort::{SortKey, SortSpec};
pub use viewport::ViewportState;
