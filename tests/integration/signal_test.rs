use commandstate::core::process_monitor::{
    DispatchError, LoopMetrics, OsSignalDispatcher, SignalDispatcher, SignalKind,
};

use super::support::{monitor_with, scenario_snapshot, ScriptedDispatcher};

#[test]
fn test_missing_pid_reports_not_found_and_reacquires() {
    let mut metrics = LoopMetrics::new();
    let dispatcher = ScriptedDispatcher {
        answer: Some(DispatchError::NotFound),
        ..Default::default()
    };
    let mut monitor = monitor_with(scenario_snapshot(), dispatcher);
    monitor.refresh(&mut metrics);
    let before = monitor.processes().len();

    let outcome = monitor.signal_pid(99999, SignalKind::Terminate, &mut metrics);

    assert_eq!(outcome.result, Err(DispatchError::NotFound));
    assert_eq!(outcome.message(), "Process 99999 not found");
    assert_eq!(monitor.provider().acquisitions.get(), 2);
    assert_eq!(monitor.processes().len(), before);
}

#[test]
fn test_signal_selected_targets_highlighted_row() {
    let mut metrics = LoopMetrics::new();
    let mut monitor = monitor_with(scenario_snapshot(), ScriptedDispatcher::default());
    monitor.refresh(&mut metrics);
    monitor.move_selection(2);

    let outcome = monitor
        .signal_selected(SignalKind::Hangup, &mut metrics)
        .expect("row selected");

    assert!(!outcome.is_error());
    assert_eq!(outcome.message(), "Sent SIGHUP to process 1");
    assert_eq!(*monitor.dispatcher().sent.borrow(), vec![(1, SignalKind::Hangup)]);
    assert_eq!(monitor.viewport().selected_index, 2);
}

#[test]
fn test_other_error_message() {
    let mut metrics = LoopMetrics::new();
    let dispatcher = ScriptedDispatcher {
        answer: Some(DispatchError::other("boom")),
        ..Default::default()
    };
    let mut monitor = monitor_with(scenario_snapshot(), dispatcher);
    monitor.refresh(&mut metrics);

    let outcome = monitor.signal_pid(3, SignalKind::User1, &mut metrics);
    assert!(outcome.is_error());
    assert_eq!(outcome.message(), "Error sending SIGUSR1 to process 3: boom");
}

#[test]
fn test_os_dispatcher_refuses_pid_zero() {
    let result = OsSignalDispatcher.send(0, SignalKind::Terminate);
    assert!(matches!(result, Err(DispatchError::Other(_))));
}

#[cfg(unix)]
#[test]
fn test_os_dispatcher_nonexistent_pid() {
    // Above the kernel's pid limit, so never a live process
    let result = OsSignalDispatcher.send(5_000_000, SignalKind::Terminate);
    assert_eq!(result, Err(DispatchError::NotFound));
}
