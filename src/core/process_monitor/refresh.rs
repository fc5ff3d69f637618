//! The refresh cycle: acquire → filter → sort → viewport.

use std::time::Instant;

use super::filter::{self, FilterMode, FilterSpec};
use super::gauges::SystemGauges;
use super::loop_metrics::LoopMetrics;
use super::provider::ProcessSnapshotProvider;
use super::record::{ProcessRecord, Snapshot};
use super::signal::{SignalDispatcher, SignalKind, SignalOutcome, SignalRequest};
use super::sort::{self, SortSpec};
use super::viewport::ViewportState;

/// Process table state driven by the refresh loop.
///
/// All methods take `&mut self`, so a refresh can never overlap another one
/// or a user command. Filter, search and sort changes move the selection
/// back to the top; a signal keeps the selected row index and lets the
/// following refresh clamp it.
pub struct ProcessMonitor<P, D> {
    provider: P,
    dispatcher: D,
    filter: FilterSpec,
    sort: SortSpec,
    viewport: ViewportState,
    raw: Snapshot,
    processes: Snapshot,
    gauges: SystemGauges,
    current_user: Option<String>,
}

impl<P: ProcessSnapshotProvider, D: SignalDispatcher> ProcessMonitor<P, D> {
    pub fn new(provider: P, dispatcher: D, filter: FilterSpec, sort: SortSpec) -> Self {
        Self {
            provider,
            dispatcher,
            filter,
            sort,
            viewport: ViewportState::default(),
            raw: Vec::new(),
            processes: Vec::new(),
            gauges: SystemGauges::default(),
            current_user: None,
        }
    }

    /// Run a full cycle against a fresh OS snapshot
    pub fn refresh(&mut self, metrics: &mut LoopMetrics) {
        let started = Instant::now();

        self.gauges = self.provider.gauges();
        self.raw = self.provider.acquire();
        self.current_user = self.provider.current_user();
        if self.filter.mode == FilterMode::OwnerOnly && self.current_user.is_none() {
            log::warn!("Current user could not be resolved; owner filter hides everything");
        }

        self.rebuild(metrics, started);
    }

    /// Re-run filter and sort over the last acquired snapshot
    pub fn reapply(&mut self, metrics: &mut LoopMetrics) {
        self.rebuild(metrics, Instant::now());
    }

    fn rebuild(&mut self, metrics: &mut LoopMetrics, started: Instant) {
        let filtered = filter::apply(&self.raw, &self.filter, self.current_user.as_deref());
        self.processes = sort::order(filtered, &self.sort);
        self.viewport
            .on_refresh(self.processes.len(), self.viewport.page_size);

        metrics.record_refresh(started, self.processes.len(), self.raw.len());
        log::trace!(
            "Refresh #{}: {}/{} processes in {:?}",
            metrics.refresh_count,
            self.processes.len(),
            self.raw.len(),
            metrics.last_refresh_duration
        );
    }

    // Filtering

    pub fn set_filter(&mut self, spec: FilterSpec, metrics: &mut LoopMetrics) {
        self.filter = spec;
        self.viewport.reset();
        self.reapply(metrics);
    }

    /// Advance to the next filter mode, keeping the threshold
    pub fn cycle_filter(&mut self, metrics: &mut LoopMetrics) {
        let spec = FilterSpec {
            mode: self.filter.mode.next(),
            threshold: self.filter.threshold,
            pattern: String::new(),
        };
        self.set_filter(spec, metrics);
    }

    pub fn toggle_owner_filter(&mut self, metrics: &mut LoopMetrics) {
        let mode = if self.filter.mode == FilterMode::OwnerOnly {
            FilterMode::None
        } else {
            FilterMode::OwnerOnly
        };
        let spec = FilterSpec {
            mode,
            threshold: self.filter.threshold,
            pattern: String::new(),
        };
        self.set_filter(spec, metrics);
    }

    pub fn set_search_pattern(&mut self, pattern: &str, metrics: &mut LoopMetrics) {
        let spec = FilterSpec {
            mode: FilterMode::NameSubstring,
            threshold: self.filter.threshold,
            pattern: pattern.to_string(),
        };
        self.set_filter(spec, metrics);
    }

    pub fn clear_filter(&mut self, metrics: &mut LoopMetrics) {
        let spec = FilterSpec {
            threshold: self.filter.threshold,
            ..Default::default()
        };
        self.set_filter(spec, metrics);
    }

    // Sorting

    pub fn set_sort(&mut self, spec: SortSpec, metrics: &mut LoopMetrics) {
        self.sort = spec;
        self.viewport.reset();
        self.reapply(metrics);
    }

    pub fn next_sort_key(&mut self, metrics: &mut LoopMetrics) {
        let spec = SortSpec::new(self.sort.key.next(), self.sort.descending);
        self.set_sort(spec, metrics);
    }

    pub fn prev_sort_key(&mut self, metrics: &mut LoopMetrics) {
        let spec = SortSpec::new(self.sort.key.prev(), self.sort.descending);
        self.set_sort(spec, metrics);
    }

    pub fn toggle_sort_direction(&mut self, metrics: &mut LoopMetrics) {
        let spec = SortSpec::new(self.sort.key, !self.sort.descending);
        self.set_sort(spec, metrics);
    }

    // Navigation

    pub fn move_selection(&mut self, delta: isize) {
        self.viewport.move_by(delta, self.processes.len());
    }

    pub fn page_up(&mut self) {
        self.viewport.page_up(self.processes.len());
    }

    pub fn page_down(&mut self) {
        self.viewport.page_down(self.processes.len());
    }

    pub fn select_first(&mut self) {
        self.viewport.home(self.processes.len());
    }

    pub fn select_last(&mut self) {
        self.viewport.end(self.processes.len());
    }

    /// Apply a new table height, e.g. after a terminal resize
    pub fn set_page_size(&mut self, page_size: usize) {
        self.viewport.on_refresh(self.processes.len(), page_size);
    }

    // Signals

    /// Send `signal` to the selected process and re-acquire the table.
    ///
    /// Returns `None` when nothing is selected.
    pub fn signal_selected(
        &mut self,
        signal: SignalKind,
        metrics: &mut LoopMetrics,
    ) -> Option<SignalOutcome> {
        let pid = self.selected()?.pid;
        Some(self.signal_pid(pid, signal, metrics))
    }

    /// Send `signal` to `pid` and re-acquire the table whatever the outcome
    pub fn signal_pid(
        &mut self,
        pid: u32,
        signal: SignalKind,
        metrics: &mut LoopMetrics,
    ) -> SignalOutcome {
        let result = self.dispatcher.send(pid, signal);
        match &result {
            Ok(()) => log::info!("Sent {} to pid {}", signal.name(), pid),
            Err(e) => log::warn!("Failed to send {} to pid {}: {}", signal.name(), pid, e),
        }

        self.refresh(metrics);

        SignalOutcome {
            request: SignalRequest { pid, signal },
            result,
        }
    }

    // Accessors

    /// Filtered and sorted rows
    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    /// Rows on the current page
    pub fn visible(&self) -> &[ProcessRecord] {
        self.viewport.visible_slice(&self.processes)
    }

    pub fn selected(&self) -> Option<&ProcessRecord> {
        self.viewport.selected(&self.processes)
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn gauges(&self) -> &SystemGauges {
        &self.gauges
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Number of processes before filtering
    pub fn total_count(&self) -> usize {
        self.raw.len()
    }

    /// "Filter: ... | Sort: ..." line for the header
    pub fn description(&self) -> String {
        format!("Filter: {} | Sort: {}", self.filter, self.sort)
    }
}
