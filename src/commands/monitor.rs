//! Process monitor command handler.
//!
//! Builds a `MonitorConfig` from the command line and runs either the TUI
//! or the JSON snapshot stream.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::json;

use crate::core::config::{MonitorConfig, DEFAULT_INTERVAL_MS};
use crate::core::process_monitor::{
    FilterMode, FilterSpec, LoopMetrics, OsSignalDispatcher, ProcessMonitor,
    ProcessSnapshotProvider, SignalDispatcher, SortKey, SortSpec, SysinfoProvider,
    DEFAULT_THRESHOLD,
};
use crate::error::CommandStateError;
use crate::ui::monitor_tui::run_monitor_app;

/// Command line definition
pub fn command() -> Command {
    Command::new("commandstate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interactive terminal process monitor")
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("MS")
                .help("Refresh interval in milliseconds")
                .value_parser(value_parser!(u64))
                .default_value("2000"),
        )
        .arg(
            Arg::new("sort")
                .short('s')
                .long("sort")
                .value_name("KEY")
                .help("Initial sort column: cpu, memory, pid or name")
                .default_value("cpu"),
        )
        .arg(
            Arg::new("ascending")
                .short('a')
                .long("ascending")
                .help("Sort in ascending order")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("filter")
                .short('f')
                .long("filter")
                .value_name("MODE")
                .help("Initial filter: all, user, cpu, memory or name")
                .default_value("all"),
        )
        .arg(
            Arg::new("threshold")
                .short('t')
                .long("threshold")
                .value_name("PCT")
                .help("Threshold for the cpu and memory filters")
                .value_parser(value_parser!(f32))
                .default_value("10"),
        )
        .arg(
            Arg::new("search")
                .long("search")
                .value_name("TEXT")
                .help("Only show processes whose name contains TEXT"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print snapshots as JSON lines instead of running the TUI")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("iterations")
                .short('n')
                .long("iterations")
                .value_name("N")
                .help("Number of JSON snapshots to print (0 = until interrupted)")
                .value_parser(value_parser!(u64))
                .default_value("0"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Write log records to PATH")
                .value_parser(value_parser!(PathBuf)),
        )
}

/// Build and validate the monitor settings from parsed arguments
pub fn config_from_matches(matches: &ArgMatches) -> crate::Result<MonitorConfig> {
    let interval_ms = matches
        .get_one::<u64>("interval")
        .copied()
        .unwrap_or(DEFAULT_INTERVAL_MS);

    let key = match matches.get_one::<String>("sort") {
        Some(raw) => raw.parse::<SortKey>().map_err(CommandStateError::config)?,
        None => SortKey::default(),
    };
    let sort = SortSpec::new(key, !matches.get_flag("ascending"));

    let mode = match matches.get_one::<String>("filter") {
        Some(raw) => raw.parse::<FilterMode>().map_err(CommandStateError::config)?,
        None => FilterMode::None,
    };
    let threshold = matches
        .get_one::<f32>("threshold")
        .copied()
        .unwrap_or(DEFAULT_THRESHOLD);

    // --search implies the name filter
    let filter = match matches.get_one::<String>("search") {
        Some(pattern) => FilterSpec {
            mode: FilterMode::NameSubstring,
            threshold,
            pattern: pattern.clone(),
        },
        None => FilterSpec {
            mode,
            threshold,
            pattern: String::new(),
        },
    };

    let config = MonitorConfig {
        interval_ms,
        sort,
        filter,
        json: matches.get_flag("json"),
        iterations: matches.get_one::<u64>("iterations").copied().unwrap_or(0),
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
    };
    config.validate()?;
    Ok(config)
}

/// Execute the monitor command
pub fn execute(config: &MonitorConfig) -> Result<()> {
    log::info!(
        "Starting monitor (interval {}ms, filter {}, sort {})",
        config.interval_ms,
        config.filter,
        config.sort
    );

    // Handle JSON output mode (non-TUI)
    if config.json {
        return run_json_output(config);
    }

    run_monitor_app(config).context("Failed to run process monitor")
}

/// Run in JSON output mode (for scripting)
fn run_json_output(config: &MonitorConfig) -> Result<()> {
    let mut monitor = ProcessMonitor::new(
        SysinfoProvider::new(),
        OsSignalDispatcher,
        config.filter.clone(),
        config.sort,
    );
    let mut metrics = LoopMetrics::new();

    // Initial collection
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut printed = 0u64;

    loop {
        monitor.refresh(&mut metrics);
        write_snapshot(&mut out, &monitor).context("Failed to write snapshot")?;
        printed += 1;

        if config.iterations > 0 && printed >= config.iterations {
            break;
        }
        std::thread::sleep(config.interval());
    }

    Ok(())
}

/// Write the current filtered and sorted table as one JSON line
pub fn write_snapshot<W, P, D>(out: &mut W, monitor: &ProcessMonitor<P, D>) -> crate::Result<()>
where
    W: Write,
    P: ProcessSnapshotProvider,
    D: SignalDispatcher,
{
    let value = json!({
        "timestamp": chrono::Local::now().to_rfc3339(),
        "gauges": monitor.gauges(),
        "filter": monitor.filter().to_string(),
        "sort": monitor.sort().to_string(),
        "shown": monitor.processes().len(),
        "total": monitor.total_count(),
        "processes": monitor.processes(),
    });

    serde_json::to_writer(&mut *out, &value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
