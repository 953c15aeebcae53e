// RingWatch - Control Task
//
// Runs on the main thread at `CONTROL_POLL_INTERVAL_MS`. Samples the power
// button and the touch interrupt line, feeds them to the `Controller` and
// carries out what comes back: switching the power rail on sleep / wake and
// handing full-redraw requests to the display side.

use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::{AnyInputPin, Input, PinDriver};

use ringwatch::config::CONTROL_POLL_INTERVAL_MS;
use ringwatch::{Controller, Page, RawSample, SleepTransition};

use crate::drivers::enable::EnableLine;
use crate::tasks::sensor::{Telemetry, TEMPERATURE_UNKNOWN};

pub struct ControlInputs<'d> {
    pub button: PinDriver<'d, AnyInputPin, Input>,
    pub touch: PinDriver<'d, AnyInputPin, Input>,
}

impl ControlInputs<'_> {
    fn sample(&self) -> RawSample {
        RawSample {
            button_high: self.button.is_high(),
            touch_high: self.touch.is_high(),
        }
    }
}

pub fn control_task(
    mut controller: Controller,
    inputs: ControlInputs<'_>,
    mut power_rail: EnableLine<'_>,
    telemetry: &'static Telemetry,
) -> ! {
    log::info!("Control task started on page {}", controller.page().name());

    let poll_interval = Duration::from_millis(CONTROL_POLL_INTERVAL_MS);

    loop {
        let outcome = controller.poll(inputs.sample(), crate::now_ms());

        match outcome.sleep {
            Some(SleepTransition::Asleep) => {
                telemetry.sleeping.store(true, Ordering::Relaxed);
                if let Err(e) = power_rail.deactivate() {
                    log::error!("Power rail off failed: {}", e);
                }
                log::info!("Sleeping - hold the button to wake");
            }
            Some(SleepTransition::Awake) => {
                if let Err(e) = power_rail.activate() {
                    log::error!("Power rail on failed: {}", e);
                }
                telemetry.sleeping.store(false, Ordering::Relaxed);
                log::info!("Awake");
            }
            None => {}
        }

        if !controller.is_sleeping() && controller.pages().needs_full_redraw() {
            hand_off_redraw(controller.page(), telemetry);
            controller.pages_mut().mark_drawn();
        }

        thread::sleep(poll_interval);
    }
}

/// Display boundary: the renderer repaints the whole face for `page`.
fn hand_off_redraw(page: Page, telemetry: &Telemetry) {
    let battery = telemetry.battery_percent.load(Ordering::Relaxed);
    match telemetry.temperature_decicelsius.load(Ordering::Relaxed) {
        TEMPERATURE_UNKNOWN => log::info!(
            "Full redraw: page {} ({}), battery {}%",
            page.index(),
            page.name(),
            battery
        ),
        deci => log::info!(
            "Full redraw: page {} ({}), battery {}%, {:.1} °C",
            page.index(),
            page.name(),
            battery,
            deci as f32 / 10.0
        ),
    }
}
