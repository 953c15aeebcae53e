// RingWatch - Control Loop State
//
// Owns every piece of mutable UI / power state and applies the events from
// the two input components. The firmware calls `poll` once per sampling tick
// with the raw pin levels and a monotonic millisecond timestamp; nothing in
// here touches hardware or reads a clock.

use crate::config::Config;
use crate::events::{ButtonEvent, Outcome, SleepTransition};
use crate::input::{InputDebouncer, RisingEdge};
use crate::pages::{Page, PageSelector};
use crate::power_button::PowerButtonMonitor;

/// Raw pin levels sampled in one tick (`true` = electrically high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    pub button_high: bool,
    pub touch_high: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SleepState {
    sleeping: bool,
}

impl SleepState {
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    fn toggle(&mut self) -> SleepTransition {
        self.sleeping = !self.sleeping;
        if self.sleeping {
            SleepTransition::Asleep
        } else {
            SleepTransition::Awake
        }
    }
}

pub struct Controller {
    config: Config,
    touch_edge: RisingEdge,
    debouncer: InputDebouncer,
    button: PowerButtonMonitor,
    pages: PageSelector,
    sleep: SleepState,
}

impl Controller {
    pub fn new(config: Config) -> Self {
        let mut debouncer = InputDebouncer::new(config.touch_debounce_ms);
        debouncer.set_enabled(config.touch_navigation);
        Self {
            config,
            touch_edge: RisingEdge::default(),
            debouncer,
            button: PowerButtonMonitor::new(config.sustained_press_ms),
            pages: PageSelector::new(config.initial_page, config.last_page),
            sleep: SleepState::default(),
        }
    }

    pub fn page(&self) -> Page {
        self.pages.current()
    }

    pub fn pages(&self) -> &PageSelector {
        &self.pages
    }

    /// The draw pass uses this to acknowledge a full redraw.
    pub fn pages_mut(&mut self) -> &mut PageSelector {
        &mut self.pages
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleep.is_sleeping()
    }

    pub fn set_touch_navigation(&mut self, enabled: bool) {
        self.debouncer.set_enabled(enabled);
    }

    /// Apply one sampling tick. A short press and a touch tap landing in the
    /// same tick are one request to navigate and advance the page once.
    pub fn poll(&mut self, sample: RawSample, now_ms: u32) -> Outcome {
        let touch = self.config.touch_polarity.is_asserted(sample.touch_high);
        let pressed = self.config.button_polarity.is_asserted(sample.button_high);

        let mut outcome = Outcome::default();
        let mut navigate = false;

        if let Some(event) = self.button.on_poll(pressed, now_ms) {
            navigate |= self.apply_button(event, &mut outcome);
        }
        if self.touch_edge.update(touch) {
            navigate |= self.accept_touch(now_ms);
        }

        if navigate {
            outcome.page_changed = self.navigate();
        }
        outcome
    }

    /// Returns whether the event asks for the next page.
    fn apply_button(&mut self, event: ButtonEvent, outcome: &mut Outcome) -> bool {
        match event {
            ButtonEvent::SustainedPress => {
                let transition = self.sleep.toggle();
                if transition == SleepTransition::Awake {
                    self.pages.request_full_redraw();
                }
                log::info!("Sustained press: {:?}", transition);
                outcome.sleep = Some(transition);
                false
            }
            ButtonEvent::ShortPress => {
                if self.sleep.is_sleeping() {
                    log::debug!("Short press ignored while asleep");
                    return false;
                }
                true
            }
        }
    }

    // Taps while asleep never reach the debouncer and leave its window open.
    fn accept_touch(&mut self, now_ms: u32) -> bool {
        if self.sleep.is_sleeping() {
            log::debug!("Touch at {} ms ignored while asleep", now_ms);
            return false;
        }
        self.debouncer.on_raw_edge(now_ms).is_some()
    }

    fn navigate(&mut self) -> Option<Page> {
        let before = self.pages.current();
        let page = self.pages.advance();
        if page == before {
            log::debug!("Single page range, staying on {}", page.name());
            return None;
        }
        log::info!("Page -> {} ({})", page.index(), page.name());
        Some(page)
    }
}
