// RingWatch - Touch Navigation Input
//
// The touch controller raises a burst of interrupts for a single tap (bounce
// plus multitouch artifacts). `InputDebouncer` turns that burst into one
// navigation event per cool-down window. Timestamps come from the caller so
// the filter runs the same on the host as on the watch.

use crate::events::NavigationEvent;

/// Half the `u32` range: larger forward steps are a clock going backwards.
const MAX_FORWARD_STEP_MS: u32 = u32::MAX / 2;

pub struct InputDebouncer {
    window_ms: u32,
    last_event_ms: Option<u32>,
    enabled: bool,
}

impl InputDebouncer {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_event_ms: None,
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// While disabled every edge is dropped and the window is left alone.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Feed one raw edge. Returns an event when the edge lands outside the
    /// window opened by the previously accepted one.
    pub fn on_raw_edge(&mut self, now_ms: u32) -> Option<NavigationEvent> {
        if !self.enabled {
            return None;
        }

        if let Some(last) = self.last_event_ms {
            let elapsed = now_ms.wrapping_sub(last);
            debug_assert!(elapsed <= MAX_FORWARD_STEP_MS, "touch timestamp went backwards");
            if elapsed < self.window_ms {
                log::trace!("Touch edge dropped ({} ms after last event)", elapsed);
                return None;
            }
        }

        self.last_event_ms = Some(now_ms);
        Some(NavigationEvent { at_ms: now_ms })
    }
}

/// Turns sampled levels into rising edges.
#[derive(Debug, Default)]
pub struct RisingEdge {
    last: bool,
}

impl RisingEdge {
    pub fn update(&mut self, asserted: bool) -> bool {
        let rose = asserted && !self.last;
        self.last = asserted;
        rose
    }
}
