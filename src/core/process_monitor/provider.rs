//! Process table acquisition backed by `sysinfo`.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use sysinfo::{
    CpuRefreshKind, MemoryRefreshKind, Pid, ProcessRefreshKind, ProcessesToUpdate, RefreshKind,
    System, Uid, UpdateKind, Users,
};

use super::gauges::{percent_of, SystemGauges};
use super::record::{ProcessRecord, Snapshot};

/// Source of process snapshots and system gauges.
///
/// Implementations never fail: a process that disappears or cannot be read
/// while the table is being enumerated is simply left out of the snapshot.
pub trait ProcessSnapshotProvider {
    /// Read the current process table
    fn acquire(&mut self) -> Snapshot;

    /// Read system-wide CPU, memory and swap usage
    fn gauges(&mut self) -> SystemGauges;

    /// Login name of the user running the monitor, if it can be resolved
    fn current_user(&mut self) -> Option<String>;
}

/// Provider reading the live OS process table
pub struct SysinfoProvider {
    system: System,
    user_names: UserNames<Uid>,
    process_refresh: ProcessRefreshKind,
    own_pid: Option<Pid>,
}

impl SysinfoProvider {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything());

        let process_refresh = ProcessRefreshKind::nothing()
            .with_cpu()
            .with_memory()
            .with_user(UpdateKind::OnlyIfNotSet)
            .with_cmd(UpdateKind::OnlyIfNotSet);

        let mut system = System::new_with_specifics(refresh_kind);
        // Prime per-process CPU accounting; usage is a delta between refreshes
        system.refresh_processes_specifics(ProcessesToUpdate::All, true, process_refresh);

        let own_pid = sysinfo::get_current_pid().ok();
        if own_pid.is_none() {
            log::warn!("Could not determine own pid; owner filter falls back to $USER");
        }

        log::info!(
            "Process provider ready ({} processes, {} cpus)",
            system.processes().len(),
            system.cpus().len()
        );

        Self {
            system,
            user_names: UserNames::new(load_user_names()),
            process_refresh,
            own_pid,
        }
    }
}

impl Default for SysinfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSnapshotProvider for SysinfoProvider {
    fn acquire(&mut self) -> Snapshot {
        self.system
            .refresh_processes_specifics(ProcessesToUpdate::All, true, self.process_refresh);

        let total_memory = self.system.total_memory();
        let core_count = self.system.cpus().len().max(1) as f32;

        let mut reloaded = false;
        let mut snapshot = Vec::with_capacity(self.system.processes().len());
        for proc in self.system.processes().values() {
            // Linux lists threads as tasks of their process
            if proc.thread_kind().is_some() {
                continue;
            }

            let memory = proc.memory();
            snapshot.push(ProcessRecord {
                pid: proc.pid().as_u32(),
                name: proc.name().to_string_lossy().to_string(),
                cpu_percent: proc.cpu_usage() / core_count,
                memory_percent: percent_of(memory, total_memory),
                memory_bytes: memory,
                status: proc.status().into(),
                owner: proc.user_id().and_then(|uid| {
                    self.user_names
                        .resolve(uid, &mut reloaded, load_user_names)
                }),
                command_line: proc
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy())
                    .collect::<Vec<_>>()
                    .join(" "),
            });
        }

        log::trace!("Acquired {} processes", snapshot.len());
        snapshot
    }

    fn gauges(&mut self) -> SystemGauges {
        self.system.refresh_cpu_all();
        self.system.refresh_memory();

        let cpus = self.system.cpus();
        let total_memory = self.system.total_memory();
        let total_swap = self.system.total_swap();

        SystemGauges {
            cpu_percent: self.system.global_cpu_usage(),
            memory_percent: percent_of(self.system.used_memory(), total_memory),
            swap_percent: percent_of(self.system.used_swap(), total_swap),
            memory_total_bytes: total_memory,
            swap_total_bytes: total_swap,
            core_count: cpus.len(),
            cpu_frequency_mhz: cpus.first().map(|cpu| cpu.frequency()).unwrap_or(0),
            boot_time: System::boot_time(),
            uptime_secs: System::uptime(),
        }
    }

    fn current_user(&mut self) -> Option<String> {
        let names = &mut self.user_names;
        let mut reloaded = false;
        let from_process = self
            .own_pid
            .and_then(|pid| self.system.process(pid))
            .and_then(|proc| proc.user_id())
            .and_then(|uid| names.resolve(uid, &mut reloaded, load_user_names));

        from_process.or_else(|| {
            std::env::var("USER")
                .or_else(|_| std::env::var("LOGNAME"))
                .ok()
                .filter(|name| !name.is_empty())
        })
    }
}

/// Login names by uid.
///
/// A miss reloads the system user list, at most once per `reloaded` pass.
/// Uids still missing after a reload are remembered and resolve to `None`
/// without touching the user database again, until a miss on some other
/// uid triggers the next reload.
struct UserNames<K> {
    names: HashMap<K, String>,
    unknown: HashSet<K>,
}

impl<K: Eq + Hash + Clone> UserNames<K> {
    fn new(names: HashMap<K, String>) -> Self {
        Self {
            names,
            unknown: HashSet::new(),
        }
    }

    fn resolve<F>(&mut self, key: &K, reloaded: &mut bool, load: F) -> Option<String>
    where
        F: FnOnce() -> HashMap<K, String>,
    {
        if let Some(name) = self.names.get(key) {
            return Some(name.clone());
        }
        if *reloaded || self.unknown.contains(key) {
            self.unknown.insert(key.clone());
            return None;
        }

        *reloaded = true;
        self.names = load();
        self.unknown.clear();

        let name = self.names.get(key).cloned();
        if name.is_none() {
            self.unknown.insert(key.clone());
        }
        name
    }
}

fn load_user_names() -> HashMap<Uid, String> {
    let users = Users::new_with_refreshed_list();
    log::debug!("Loaded {} users", users.list().len());
    users
        .list()
        .iter()
        .map(|user| (user.id().clone(), user.name().to_string()))
        .collect()
}
