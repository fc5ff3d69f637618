use std::io::Write;

use commandstate::{init_logging, open_log_file};
use tempfile::TempDir;

#[test]
fn test_open_log_file_appends() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("monitor.log");

    writeln!(open_log_file(&path).unwrap(), "first").unwrap();
    writeln!(open_log_file(&path).unwrap(), "second").unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "first\nsecond\n");
}

#[test]
fn test_log_records_go_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("commandstate.log");

    // Only test in this binary that installs the global logger
    init_logging(Some(&path)).unwrap();
    log::info!("monitor started for logging test");
    log::logger().flush();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("monitor started for logging test"));
}
