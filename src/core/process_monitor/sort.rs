//! Deterministic ordering of a snapshot.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::record::{ProcessRecord, Snapshot};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    CpuPercent,
    MemoryPercent,
    Pid,
    Name,
}

impl SortKey {
    /// Order of the ←/→ key cycle
    pub const ALL: [SortKey; 4] = [
        SortKey::CpuPercent,
        SortKey::MemoryPercent,
        SortKey::Pid,
        SortKey::Name,
    ];

    pub fn next(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).unwrap_or(0)
    }

    /// Column label used in the description line
    pub fn label(self) -> &'static str {
        match self {
            SortKey::CpuPercent => "CPU%",
            SortKey::MemoryPercent => "MEM%",
            SortKey::Pid => "PID",
            SortKey::Name => "NAME",
        }
    }

    /// Compare two records on this key alone
    fn compare(self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        match self {
            SortKey::CpuPercent => a.cpu_percent.total_cmp(&b.cpu_percent),
            SortKey::MemoryPercent => a.memory_percent.total_cmp(&b.memory_percent),
            SortKey::Pid => a.pid.cmp(&b.pid),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cpu" => Ok(SortKey::CpuPercent),
            "memory" | "mem" => Ok(SortKey::MemoryPercent),
            "pid" => Ok(SortKey::Pid),
            "name" => Ok(SortKey::Name),
            other => Err(format!(
                "unknown sort key '{}' (expected cpu, memory, pid or name)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub descending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::CpuPercent,
            descending: true,
        }
    }
}

impl SortSpec {
    pub fn new(key: SortKey, descending: bool) -> Self {
        Self { key, descending }
    }

    /// Total order: key (in the requested direction), then ascending pid
    pub fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        self.directed(self.key.compare(a, b))
            .then_with(|| a.pid.cmp(&b.pid))
    }

    fn directed(&self, by_key: Ordering) -> Ordering {
        if self.descending {
            by_key.reverse()
        } else {
            by_key
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.descending { "↓" } else { "↑" };
        write!(f, "{} {}", self.key.label(), arrow)
    }
}

/// Sort `snapshot` by `spec`
pub fn order(mut snapshot: Snapshot, spec: &SortSpec) -> Snapshot {
    if spec.key != SortKey::Name {
        snapshot.sort_by(|a, b| spec.compare(a, b));
        return snapshot;
    }

    // Fold each name once, not on every comparison
    let mut keyed: Vec<(String, ProcessRecord)> = snapshot
        .into_iter()
        .map(|record| (record.name.to_lowercase(), record))
        .collect();
    keyed.sort_by(|(name_a, a), (name_b, b)| {
        spec.directed(name_a.cmp(name_b))
            .then_with(|| a.pid.cmp(&b.pid))
    });
    keyed.into_iter().map(|(_, record)| record).collect()
}
