// RingWatch - Power Button Monitor
//
// Classifies the PWR_PB sense line into short presses (navigate) and
// sustained presses (sleep / wake). Polled from the control loop with the
// polarity-normalized level: `true` means the button is held.
//
//   Idle ──press──▶ PressedWaiting ──held ≥ threshold──▶ SustainedFired
//     ▲                   │ release: ShortPress               │ release
//     └───────────────────┴───────────────────────────────────┘

use crate::events::ButtonEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressState {
    Idle,
    PressedWaiting { since_ms: u32 },
    SustainedFired,
}

pub struct PowerButtonMonitor {
    state: PressState,
    threshold_ms: u32,
}

impl PowerButtonMonitor {
    pub fn new(threshold_ms: u32) -> Self {
        Self {
            state: PressState::Idle,
            threshold_ms,
        }
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    /// How long the current press has lasted, if it is still classifiable.
    pub fn held_ms(&self, now_ms: u32) -> Option<u32> {
        match self.state {
            PressState::PressedWaiting { since_ms } => Some(now_ms.wrapping_sub(since_ms)),
            _ => None,
        }
    }

    pub fn on_poll(&mut self, pressed: bool, now_ms: u32) -> Option<ButtonEvent> {
        match (self.state, pressed) {
            (PressState::Idle, false) => None,
            (PressState::Idle, true) => {
                log::debug!("Button down at {} ms", now_ms);
                self.state = PressState::PressedWaiting { since_ms: now_ms };
                self.check_sustained(now_ms, now_ms)
            }
            (PressState::PressedWaiting { since_ms }, true) => self.check_sustained(since_ms, now_ms),
            (PressState::PressedWaiting { since_ms }, false) => {
                log::debug!("Short press ({} ms)", now_ms.wrapping_sub(since_ms));
                self.state = PressState::Idle;
                Some(ButtonEvent::ShortPress)
            }
            (PressState::SustainedFired, true) => None,
            (PressState::SustainedFired, false) => {
                self.state = PressState::Idle;
                None
            }
        }
    }

    fn check_sustained(&mut self, since_ms: u32, now_ms: u32) -> Option<ButtonEvent> {
        let held = now_ms.wrapping_sub(since_ms);
        debug_assert!(held <= u32::MAX / 2, "button timestamp went backwards");
        if held >= self.threshold_ms {
            log::debug!("Sustained press ({} ms)", held);
            self.state = PressState::SustainedFired;
            Some(ButtonEvent::SustainedPress)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Poll a constant level every 10 ms over `[from, to]` and collect events.
    fn hold(
        monitor: &mut PowerButtonMonitor,
        pressed: bool,
        from: u32,
        to: u32,
    ) -> Vec<(u32, ButtonEvent)> {
        (from..=to)
            .step_by(10)
            .filter_map(|t| monitor.on_poll(pressed, t).map(|e| (t, e)))
            .collect()
    }

    #[test]
    fn idle_low_stays_idle() {
        let mut monitor = PowerButtonMonitor::new(2000);
        assert!(hold(&mut monitor, false, 0, 5000).is_empty());
        assert_eq!(monitor.state(), PressState::Idle);
    }

    #[test]
    fn sustained_press_fires_once_at_threshold() {
        let mut monitor = PowerButtonMonitor::new(2000);
        let events = hold(&mut monitor, true, 0, 2500);
        assert_eq!(events, vec![(2000, ButtonEvent::SustainedPress)]);
        assert_eq!(monitor.state(), PressState::SustainedFired);

        // Release after the sustained event emits nothing.
        assert_eq!(monitor.on_poll(false, 2510), None);
        assert_eq!(monitor.state(), PressState::Idle);
    }

    #[test]
    fn release_before_threshold_is_a_short_press() {
        let mut monitor = PowerButtonMonitor::new(2000);
        assert!(hold(&mut monitor, true, 0, 990).is_empty());
        assert_eq!(monitor.on_poll(false, 1000), Some(ButtonEvent::ShortPress));
        assert_eq!(monitor.state(), PressState::Idle);
    }

    #[test]
    fn release_one_tick_before_threshold_is_still_short() {
        let mut monitor = PowerButtonMonitor::new(2000);
        assert!(hold(&mut monitor, true, 0, 1990).is_empty());
        assert_eq!(monitor.held_ms(1999), Some(1999));
        assert_eq!(monitor.on_poll(false, 1999), Some(ButtonEvent::ShortPress));
    }

    #[test]
    fn very_long_hold_never_refires() {
        let mut monitor = PowerButtonMonitor::new(2000);
        let events = hold(&mut monitor, true, 0, 60_000);
        assert_eq!(events.len(), 1);
        assert_eq!(monitor.held_ms(60_000), None);
    }

    #[test]
    fn each_high_interval_is_classified_independently() {
        let mut monitor = PowerButtonMonitor::new(2000);
        let mut events = hold(&mut monitor, true, 0, 2200);
        events.extend(hold(&mut monitor, false, 2210, 2300));
        events.extend(hold(&mut monitor, true, 2310, 2500));
        events.extend(hold(&mut monitor, false, 2510, 2520));
        events.extend(hold(&mut monitor, true, 3000, 5500));
        assert_eq!(
            events,
            vec![
                (2000, ButtonEvent::SustainedPress),
                (2510, ButtonEvent::ShortPress),
                (5000, ButtonEvent::SustainedPress),
            ]
        );
    }

    #[test]
    fn coarse_polling_still_fires_sustained() {
        let mut monitor = PowerButtonMonitor::new(2000);
        assert_eq!(monitor.on_poll(true, 0), None);
        assert_eq!(monitor.on_poll(true, 3700), Some(ButtonEvent::SustainedPress));
    }
}
