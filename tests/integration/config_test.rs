use commandstate::commands::monitor::{command, config_from_matches};
use commandstate::core::config::{MonitorConfig, MAX_INTERVAL_MS, MIN_INTERVAL_MS};
use commandstate::core::process_monitor::{FilterMode, FilterSpec, SortKey};
use commandstate::CommandStateError;

fn config_for(args: &[&str]) -> commandstate::Result<MonitorConfig> {
    let matches = command()
        .try_get_matches_from(std::iter::once("commandstate").chain(args.iter().copied()))
        .unwrap();
    config_from_matches(&matches)
}

#[test]
fn test_config_default() {
    let config = MonitorConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.filter.mode, FilterMode::None);
    assert_eq!(config.sort.key, SortKey::CpuPercent);
    assert!(config.sort.descending);
}

#[test]
fn test_interval_bounds() {
    let mut config = MonitorConfig {
        interval_ms: MIN_INTERVAL_MS,
        ..Default::default()
    };
    assert!(config.validate().is_ok());

    config.interval_ms = MAX_INTERVAL_MS;
    assert!(config.validate().is_ok());

    config.interval_ms = MAX_INTERVAL_MS + 1;
    assert!(matches!(config.validate(), Err(CommandStateError::Config(_))));
}

#[test]
fn test_nan_threshold_rejected() {
    let config = MonitorConfig {
        filter: FilterSpec {
            threshold: f32::NAN,
            ..FilterSpec::with_mode(FilterMode::HighCpu)
        },
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_cli_builds_config() {
    let config = config_for(&["-s", "mem", "-f", "user", "-i", "1000"]).unwrap();
    assert_eq!(config.sort.key, SortKey::MemoryPercent);
    assert_eq!(config.filter.mode, FilterMode::OwnerOnly);
    assert_eq!(config.interval().as_millis(), 1000);
}

#[test]
fn test_cli_rejects_unknown_sort_key() {
    let err = config_for(&["--sort", "rss"]).unwrap_err();
    assert!(err.to_string().contains("unknown sort key 'rss'"));
}

#[test]
fn test_cli_rejects_non_numeric_interval() {
    let result = command().try_get_matches_from(["commandstate", "--interval", "fast"]);
    assert!(result.is_err());
}
