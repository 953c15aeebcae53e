// RingWatch - Input & Control Events

use crate::pages::Page;

// ---------------------------------------------------------------------------
// Component outputs
// ---------------------------------------------------------------------------

/// A touch edge that survived the debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationEvent {
    pub at_ms: u32,
}

/// Classified power button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Released before the sustained threshold: navigate.
    ShortPress,
    /// Held past the sustained threshold: toggle sleep.
    SustainedPress,
}

// ---------------------------------------------------------------------------
// Control loop output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepTransition {
    Asleep,
    Awake,
}

/// What changed during one poll of the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    pub page_changed: Option<Page>,
    pub sleep: Option<SleepTransition>,
}

impl Outcome {
    pub fn is_idle(&self) -> bool {
        self.page_changed.is_none() && self.sleep.is_none()
    }
}
