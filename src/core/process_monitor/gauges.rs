use serde::{Deserialize, Serialize};

/// System-wide readings shown above the process table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemGauges {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub swap_percent: f32,
    pub memory_total_bytes: u64,
    pub swap_total_bytes: u64,
    pub core_count: usize,
    pub cpu_frequency_mhz: u64,
    pub boot_time: u64, // Unix timestamp
    pub uptime_secs: u64,
}

impl SystemGauges {
    pub fn has_swap(&self) -> bool {
        self.swap_total_bytes > 0
    }
}

/// Percentage of `part` in `total`, 0 when `total` is 0
pub fn percent_of(part: u64, total: u64) -> f32 {
    if total > 0 {
        (part as f32 / total as f32) * 100.0
    } else {
        0.0
    }
}
