use std::cell::{Cell, RefCell};

use commandstate::core::process_monitor::{
    DispatchError, FilterSpec, ProcessMonitor, ProcessRecord, ProcessSnapshotProvider,
    ProcessStatus, SignalDispatcher, SignalKind, Snapshot, SortSpec, SystemGauges,
};

/// Provider returning a fixed table and counting acquisitions
pub struct ScriptedProvider {
    pub snapshot: Snapshot,
    pub user: Option<String>,
    pub acquisitions: Cell<usize>,
}

impl ScriptedProvider {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            user: Some("alice".to_string()),
            acquisitions: Cell::new(0),
        }
    }
}

impl ProcessSnapshotProvider for ScriptedProvider {
    fn acquire(&mut self) -> Snapshot {
        self.acquisitions.set(self.acquisitions.get() + 1);
        self.snapshot.clone()
    }

    fn gauges(&mut self) -> SystemGauges {
        SystemGauges {
            cpu_percent: 30.0,
            memory_percent: 50.0,
            core_count: 8,
            ..Default::default()
        }
    }

    fn current_user(&mut self) -> Option<String> {
        self.user.clone()
    }
}

/// Dispatcher that records requests and answers with a fixed result
#[derive(Default)]
pub struct ScriptedDispatcher {
    pub sent: RefCell<Vec<(u32, SignalKind)>>,
    pub answer: Option<DispatchError>,
}

impl SignalDispatcher for ScriptedDispatcher {
    fn send(&self, pid: u32, signal: SignalKind) -> Result<(), DispatchError> {
        self.sent.borrow_mut().push((pid, signal));
        match &self.answer {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

pub fn record(pid: u32, name: &str, cpu: f32) -> ProcessRecord {
    ProcessRecord {
        pid,
        name: name.to_string(),
        cpu_percent: cpu,
        status: ProcessStatus::Running,
        ..Default::default()
    }
}

/// Three processes used by most scenarios
pub fn scenario_snapshot() -> Snapshot {
    vec![
        record(1, "initd", 0.5),
        record(2, "worker", 42.0),
        record(3, "worker2", 11.0),
    ]
}

pub fn monitor_with(
    snapshot: Snapshot,
    dispatcher: ScriptedDispatcher,
) -> ProcessMonitor<ScriptedProvider, ScriptedDispatcher> {
    ProcessMonitor::new(
        ScriptedProvider::new(snapshot),
        dispatcher,
        FilterSpec::default(),
        SortSpec::default(),
    )
}

pub fn pids(rows: &[ProcessRecord]) -> Vec<u32> {
    rows.iter().map(|r| r.pid).collect()
}

/// Small deterministic generator for property style tests
pub struct XorShift(pub u64);

impl XorShift {
    pub fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, n: u64) -> u64 {
        if n == 0 {
            0
        } else {
            self.next() % n
        }
    }
}

/// Random table with repeated values so ties are exercised
pub fn random_snapshot(rng: &mut XorShift, len: usize) -> Snapshot {
    let names = ["bash", "Bash", "sshd", "cargo", "rustc", "init", ""];
    let owners = [Some("alice"), Some("root"), None];
    (0..len)
        .map(|_| ProcessRecord {
            pid: rng.below(50) as u32,
            name: names[rng.below(names.len() as u64) as usize].to_string(),
            cpu_percent: rng.below(5) as f32 * 12.5,
            memory_percent: rng.below(4) as f32 * 10.0,
            memory_bytes: rng.below(1 << 30),
            owner: owners[rng.below(owners.len() as u64) as usize].map(str::to_string),
            ..Default::default()
        })
        .collect()
}
