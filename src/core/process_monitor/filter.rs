//! Single-predicate filtering of a snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::record::{ProcessRecord, Snapshot};

/// Default cut-off for the high CPU / high memory filters (%)
pub const DEFAULT_THRESHOLD: f32 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    #[default]
    None,
    OwnerOnly,
    HighCpu,
    HighMemory,
    NameSubstring,
}

impl FilterMode {
    pub const ALL: [FilterMode; 5] = [
        FilterMode::None,
        FilterMode::OwnerOnly,
        FilterMode::HighCpu,
        FilterMode::HighMemory,
        FilterMode::NameSubstring,
    ];

    /// Next mode in the `f` key cycle
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" | "none" => Ok(FilterMode::None),
            "user" | "owner" => Ok(FilterMode::OwnerOnly),
            "cpu" => Ok(FilterMode::HighCpu),
            "memory" | "mem" => Ok(FilterMode::HighMemory),
            "name" => Ok(FilterMode::NameSubstring),
            other => Err(format!(
                "unknown filter '{}' (expected all, user, cpu, memory or name)",
                other
            )),
        }
    }
}

/// The active filter. Exactly one mode applies at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub mode: FilterMode,
    pub threshold: f32,
    pub pattern: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            mode: FilterMode::None,
            threshold: DEFAULT_THRESHOLD,
            pattern: String::new(),
        }
    }
}

impl FilterSpec {
    pub fn with_mode(mode: FilterMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn name<S: Into<String>>(pattern: S) -> Self {
        Self {
            mode: FilterMode::NameSubstring,
            pattern: pattern.into(),
            ..Default::default()
        }
    }

    /// Whether `record` passes this filter.
    ///
    /// `current_user` is the invoking user's login name; when it could not
    /// be resolved the owner filter matches nothing.
    pub fn matches(&self, record: &ProcessRecord, current_user: Option<&str>) -> bool {
        match self.mode {
            FilterMode::None => true,
            FilterMode::OwnerOnly => match (record.owner.as_deref(), current_user) {
                (Some(owner), Some(user)) => owner == user,
                _ => false,
            },
            FilterMode::HighCpu => record.cpu_percent > self.threshold,
            FilterMode::HighMemory => record.memory_percent > self.threshold,
            FilterMode::NameSubstring => {
                self.pattern.is_empty()
                    || record
                        .name
                        .to_lowercase()
                        .contains(&self.pattern.to_lowercase())
            }
        }
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            FilterMode::None => write!(f, "All processes"),
            FilterMode::OwnerOnly => write!(f, "User processes only"),
            FilterMode::HighCpu => write!(f, "High CPU (>{}%)", self.threshold),
            FilterMode::HighMemory => write!(f, "High Memory (>{}%)", self.threshold),
            FilterMode::NameSubstring if self.pattern.is_empty() => write!(f, "Name filter"),
            FilterMode::NameSubstring => write!(f, "Name filter '{}'", self.pattern),
        }
    }
}

/// Keep the records of `snapshot` that pass `spec`, in their original order
pub fn apply(snapshot: &[ProcessRecord], spec: &FilterSpec, current_user: Option<&str>) -> Snapshot {
    if spec.mode == FilterMode::None {
        return snapshot.to_vec();
    }

    snapshot
        .iter()
        .filter(|record| spec.matches(record, current_user))
        .cloned()
        .collect()
}
