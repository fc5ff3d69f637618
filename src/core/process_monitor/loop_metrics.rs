use std::collections::VecDeque;
use std::time::{Duration, Instant};

const DEFAULT_INPUT_WINDOW: usize = 20;

/// Timing statistics of the refresh loop.
///
/// Owned by the loop driver and passed into every refresh, so nothing about
/// loop timing lives in global state.
#[derive(Debug, Clone)]
pub struct LoopMetrics {
    capacity: usize,
    last_input: Option<Instant>,
    input_intervals: VecDeque<Duration>,
    pub refresh_count: u64,
    pub last_refresh_duration: Duration,
    pub last_refresh_at: Option<Instant>,
    /// Rows left after filtering
    pub shown_count: usize,
    /// Rows in the raw snapshot
    pub total_count: usize,
}

impl LoopMetrics {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INPUT_WINDOW)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            last_input: None,
            input_intervals: VecDeque::with_capacity(capacity),
            refresh_count: 0,
            last_refresh_duration: Duration::ZERO,
            last_refresh_at: None,
            shown_count: 0,
            total_count: 0,
        }
    }

    /// Note a key press at `now`
    pub fn record_input(&mut self, now: Instant) {
        if let Some(previous) = self.last_input {
            if self.input_intervals.len() >= self.capacity {
                self.input_intervals.pop_front();
            }
            self.input_intervals
                .push_back(now.saturating_duration_since(previous));
        }
        self.last_input = Some(now);
    }

    /// Mean time between the most recent key presses
    pub fn average_input_interval(&self) -> Option<Duration> {
        if self.input_intervals.is_empty() {
            return None;
        }
        let total: Duration = self.input_intervals.iter().sum();
        Some(total / self.input_intervals.len() as u32)
    }

    pub fn record_refresh(&mut self, started: Instant, shown: usize, total: usize) {
        let finished = Instant::now();
        self.refresh_count += 1;
        self.last_refresh_duration = finished.saturating_duration_since(started);
        self.last_refresh_at = Some(finished);
        self.shown_count = shown;
        self.total_count = total;
    }
}

impl Default for LoopMetrics {
    fn default() -> Self {
        Self::new()
    }
}
