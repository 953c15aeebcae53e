//! End-to-end timing scenarios through the public API.

use ringwatch::{
    ButtonEvent, Config, Controller, InputDebouncer, Page, PowerButtonMonitor, RawSample,
    SleepTransition,
};

#[test]
fn debounce_window_scenario() {
    let mut debouncer = InputDebouncer::new(150);
    let events: Vec<u32> = [0, 50, 100, 200]
        .into_iter()
        .filter_map(|t| debouncer.on_raw_edge(t))
        .map(|e| e.at_ms)
        .collect();
    assert_eq!(events, vec![0, 200]);
}

#[test]
fn sustained_hold_scenario() {
    let mut monitor = PowerButtonMonitor::new(2000);
    let mut events = Vec::new();
    for t in (0..=2500).step_by(10) {
        if let Some(e) = monitor.on_poll(true, t) {
            events.push((t, e));
        }
    }
    assert_eq!(monitor.on_poll(false, 2500), None);
    assert_eq!(events, vec![(2000, ButtonEvent::SustainedPress)]);
}

#[test]
fn short_press_scenario() {
    let mut monitor = PowerButtonMonitor::new(2000);
    let mut events = Vec::new();
    for t in (0..1000).step_by(10) {
        events.extend(monitor.on_poll(true, t));
    }
    assert!(events.is_empty());
    assert_eq!(monitor.on_poll(false, 1000), Some(ButtonEvent::ShortPress));
}

#[test]
fn a_day_of_wear() {
    let config = Config::from_build();
    config.validate().expect("build configuration must be valid");
    let mut ctl = Controller::new(config);
    let start_page = ctl.page();

    let idle = RawSample {
        button_high: false,
        touch_high: true,
    };
    let tap = RawSample {
        button_high: false,
        touch_high: false,
    };
    let held = RawSample {
        button_high: true,
        touch_high: true,
    };

    // Two taps far apart: two page changes.
    assert!(ctl.poll(tap, 1_000).page_changed.is_some());
    ctl.poll(idle, 1_010);
    assert!(ctl.poll(tap, 5_000).page_changed.is_some());
    ctl.poll(idle, 5_010);
    assert_ne!(ctl.page(), start_page);

    // Hold to sleep.
    let mut transitions = Vec::new();
    for t in (10_000..=13_000).step_by(10) {
        transitions.extend(ctl.poll(held, t).sleep);
    }
    ctl.poll(idle, 13_010);
    assert_eq!(transitions, vec![SleepTransition::Asleep]);

    // Hold again to wake; the page survives sleep.
    let page_before = ctl.page();
    for t in (20_000..=22_500).step_by(10) {
        transitions.extend(ctl.poll(held, t).sleep);
    }
    ctl.poll(idle, 22_510);
    assert_eq!(transitions, vec![SleepTransition::Asleep, SleepTransition::Awake]);
    assert_eq!(ctl.page(), page_before);
    assert!(ctl.pages().needs_full_redraw());
    assert!(ctl.page() <= Page::LAST);
}
