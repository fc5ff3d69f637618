use commandstate::commands::monitor::write_snapshot;
use commandstate::core::process_monitor::{FilterMode, FilterSpec, LoopMetrics};
use serde_json::Value;

use super::support::{monitor_with, scenario_snapshot, ScriptedDispatcher};

#[test]
fn test_snapshot_is_one_json_line() {
    let mut metrics = LoopMetrics::new();
    let mut monitor = monitor_with(scenario_snapshot(), ScriptedDispatcher::default());
    monitor.refresh(&mut metrics);
    monitor.set_filter(FilterSpec::with_mode(FilterMode::HighCpu), &mut metrics);

    let mut out = Vec::new();
    write_snapshot(&mut out, &monitor).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.ends_with('\n'));

    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["shown"], 2);
    assert_eq!(value["total"], 3);
    assert_eq!(value["filter"], "High CPU (>10%)");
    assert_eq!(value["sort"], "CPU% ↓");
    assert_eq!(value["gauges"]["core_count"], 8);

    let pids: Vec<u64> = value["processes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["pid"].as_u64().unwrap())
        .collect();
    assert_eq!(pids, vec![2, 3]);
    assert_eq!(value["processes"][0]["name"], "worker");
    assert!(value["timestamp"].is_string());
}
