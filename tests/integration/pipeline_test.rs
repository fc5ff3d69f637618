use commandstate::core::process_monitor::{
    filter, sort, FilterMode, FilterSpec, LoopMetrics, ProcessRecord, SortKey, SortSpec,
    ViewportState,
};

use super::support::{
    monitor_with, pids, random_snapshot, scenario_snapshot, ScriptedDispatcher, XorShift,
};

#[test]
fn test_scenario_sort_then_filter() {
    let ordered = sort::order(
        scenario_snapshot(),
        &SortSpec::new(SortKey::CpuPercent, true),
    );
    assert_eq!(pids(&ordered), vec![2, 3, 1]);

    let spec = FilterSpec {
        mode: FilterMode::HighCpu,
        threshold: 10.0,
        pattern: String::new(),
    };
    let filtered = filter::apply(&ordered, &spec, None);
    assert_eq!(pids(&filtered), vec![2, 3]);
}

#[test]
fn test_scenario_viewport_clamp() {
    let mut viewport = ViewportState::new(2);
    viewport.move_by(5, 3);
    assert_eq!(viewport.selected_index, 2);
    assert_eq!(viewport.scroll_offset, 1);
}

#[test]
fn test_sort_is_total_and_repeatable() {
    let mut rng = XorShift(0x5eed_1234);
    for _ in 0..50 {
        let len = rng.below(40) as usize;
        let snapshot = random_snapshot(&mut rng, len);

        for key in SortKey::ALL {
            for descending in [true, false] {
                let spec = SortSpec::new(key, descending);
                let first = sort::order(snapshot.clone(), &spec);
                let second = sort::order(snapshot.clone(), &spec);
                assert_eq!(first, second);

                // Permutation of the input
                let mut a = pids(&first);
                let mut b = pids(&snapshot);
                a.sort_unstable();
                b.sort_unstable();
                assert_eq!(a, b);

                for pair in first.windows(2) {
                    assert_ne!(spec.compare(&pair[0], &pair[1]), std::cmp::Ordering::Greater);
                }
            }
        }
    }
}

#[test]
fn test_filter_is_sound_and_complete() {
    let mut rng = XorShift(0xfeed_beef);
    let cases: [(FilterSpec, fn(&ProcessRecord) -> bool); 6] = [
        (FilterSpec::default(), |_| true),
        (FilterSpec::with_mode(FilterMode::OwnerOnly), |r| {
            r.owner.as_deref() == Some("alice")
        }),
        (FilterSpec::with_mode(FilterMode::HighCpu), |r| r.cpu_percent > 10.0),
        (FilterSpec::with_mode(FilterMode::HighMemory), |r| {
            r.memory_percent > 10.0
        }),
        (FilterSpec::name("SH"), |r| r.name.to_lowercase().contains("sh")),
        (FilterSpec::name(""), |_| true),
    ];

    for _ in 0..50 {
        let len = rng.below(40) as usize;
        let snapshot = random_snapshot(&mut rng, len);

        for (spec, expected_match) in &cases {
            let out = filter::apply(&snapshot, spec, Some("alice"));
            let expected: Vec<ProcessRecord> = snapshot
                .iter()
                .filter(|r| expected_match(r))
                .cloned()
                .collect();
            assert_eq!(out, expected, "filter {}", spec);
        }
    }
}

#[test]
fn test_empty_filter_is_identity() {
    let mut rng = XorShift(42);
    let snapshot = random_snapshot(&mut rng, 25);
    assert_eq!(filter::apply(&snapshot, &FilterSpec::default(), None), snapshot);
}

#[test]
fn test_viewport_invariant_through_monitor() {
    let mut rng = XorShift(7);
    let mut metrics = LoopMetrics::new();
    let mut monitor = monitor_with(random_snapshot(&mut rng, 30), ScriptedDispatcher::default());
    monitor.set_page_size(5);
    monitor.refresh(&mut metrics);

    for _ in 0..500 {
        match rng.below(6) {
            0 => monitor.move_selection(rng.below(21) as isize - 10),
            1 => monitor.page_down(),
            2 => monitor.page_up(),
            3 => monitor.set_page_size(rng.below(8) as usize + 1),
            4 => monitor.cycle_filter(&mut metrics),
            _ => monitor.refresh(&mut metrics),
        }

        let len = monitor.processes().len();
        let vp = monitor.viewport();
        if len == 0 {
            assert_eq!((vp.selected_index, vp.scroll_offset), (0, 0));
        } else {
            assert!(vp.scroll_offset <= vp.selected_index);
            assert!(vp.selected_index < vp.scroll_offset + vp.page_size);
            assert!(vp.selected_index < len);
            assert!(monitor.visible().len() <= vp.page_size);
        }
    }
}

#[test]
fn test_owner_filter_skips_records_without_owner() {
    let mut metrics = LoopMetrics::new();
    let mut monitor = monitor_with(scenario_snapshot(), ScriptedDispatcher::default());
    monitor.set_filter(FilterSpec::with_mode(FilterMode::OwnerOnly), &mut metrics);
    monitor.refresh(&mut metrics);

    assert_eq!(monitor.current_user(), Some("alice"));
    assert!(monitor.processes().is_empty());
    assert!(monitor.selected().is_none());
    assert_eq!(metrics.total_count, 3);
}

#[test]
fn test_refresh_metrics() {
    let mut metrics = LoopMetrics::new();
    let mut monitor = monitor_with(scenario_snapshot(), ScriptedDispatcher::default());
    monitor.refresh(&mut metrics);
    monitor.set_filter(FilterSpec::with_mode(FilterMode::HighCpu), &mut metrics);

    assert_eq!(metrics.refresh_count, 2);
    assert_eq!(metrics.shown_count, 2);
    assert_eq!(metrics.total_count, 3);
    assert_eq!(monitor.provider().acquisitions.get(), 1);
    assert_eq!(
        monitor.description(),
        "Filter: High CPU (>10%) | Sort: CPU% ↓"
    );
}
