// RingWatch - Firmware Entry Point
//
// Boot sequence:
//   1. Resolve and validate the build configuration.
//   2. Configure the button and touch interrupt inputs with idle pulls.
//   3. Release the touch controller from reset and switch the power rail on.
//   4. Hold the pump and valve stages off (pump/valve board only).
//   5. Spawn the sensor task, then run the control loop on this thread.
//
// A sustained press (2 s) on the power button toggles sleep: the power rail
// is switched off and navigation input is ignored until the next sustained
// press.

mod drivers;
mod tasks;

use std::thread;

use esp_idf_hal::gpio::{InputPin, OutputPin, PinDriver};
use esp_idf_hal::prelude::*;

use ringwatch::config::*;
use ringwatch::{Config, Controller, Polarity};

use crate::drivers::enable::EnableLine;
use crate::tasks::control::ControlInputs;
use crate::tasks::sensor::Telemetry;

static TELEMETRY: Telemetry = Telemetry::new();

// ---------------------------------------------------------------------------
// Utility: milliseconds since boot (wraps at ~49 days, the controller
// measures intervals with wrapping arithmetic)
// ---------------------------------------------------------------------------
pub fn now_ms() -> u32 {
    unsafe { (esp_idf_sys::esp_timer_get_time() / 1000) as u32 }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------
fn main() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("RingWatch firmware starting");

    let config = Config::from_build();
    config.validate()?;
    log::info!(
        "Board {:?}, outputs {:?}, start page {}",
        config.board,
        config.output_polarity,
        config.initial_page.name()
    );

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // ---- Inputs -----------------------------------------------------------
    let button = PinDriver::input(pins.gpio14.downgrade_input())?;
    set_idle_pull(PIN_BUTTON, config.button_polarity)?;

    let touch = PinDriver::input(pins.gpio32.downgrade_input())?;
    set_idle_pull(PIN_TOUCH_INT, config.touch_polarity)?;

    let mut touch_reset = PinDriver::output(pins.gpio33.downgrade_output())?;
    touch_reset.set_high()?;
    log::debug!("Touch controller out of reset (GPIO{})", PIN_TOUCH_RST);

    // ---- Outputs ----------------------------------------------------------
    let mut power_rail = EnableLine::new(
        PinDriver::output(pins.gpio26.downgrade_output())?,
        config.output_polarity,
    )?;
    power_rail.activate()?;
    log::info!("Power rail on (GPIO{})", PIN_POWER_ENABLE);

    // Kept alive for the lifetime of the firmware so the stages stay off.
    let _actuators = match config.board.actuator_pins() {
        Some(actuators) => {
            log::info!(
                "Holding pump (GPIO{}) and valve (GPIO{}) off",
                actuators.pump,
                actuators.valve
            );
            let pump = EnableLine::new(
                PinDriver::output(pins.gpio25.downgrade_output())?,
                config.output_polarity,
            )?;
            let valve = EnableLine::new(
                PinDriver::output(pins.gpio17.downgrade_output())?,
                config.output_polarity,
            )?;
            Some((pump, valve))
        }
        None => None,
    };

    // ---- Sensor task ------------------------------------------------------
    thread::Builder::new()
        .name("sensor".into())
        .stack_size(STACK_SENSOR)
        .spawn(|| tasks::sensor::sensor_task(&TELEMETRY))?;

    // ---- Control loop (never returns) -------------------------------------
    let inputs = ControlInputs { button, touch };
    tasks::control::control_task(Controller::new(config), inputs, power_rail, &TELEMETRY)
}

/// Pull an input towards its idle level so a floating line reads released.
fn set_idle_pull(gpio: i32, polarity: Polarity) -> anyhow::Result<()> {
    let mode = match polarity {
        Polarity::ActiveHigh => esp_idf_sys::gpio_pull_mode_t_GPIO_PULLDOWN_ONLY,
        Polarity::ActiveLow => esp_idf_sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY,
    };
    esp_idf_sys::esp!(unsafe { esp_idf_sys::gpio_set_pull_mode(gpio, mode) })?;
    Ok(())
}
