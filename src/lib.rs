// RingWatch - Control Logic Library
//
// Everything that does not touch ESP-IDF lives here so it can be exercised
// with `cargo test` on the host. The firmware binary (`src/main.rs`, feature
// `embedded`) samples the pins and feeds `Controller::poll`.

pub mod calibration;
pub mod config;
pub mod controller;
pub mod events;
pub mod input;
pub mod pages;
pub mod power_button;

pub use calibration::{battery_percentage, battery_voltage, interpolate, Thermistor};
pub use config::{BoardVariant, Config, ConfigError, Polarity};
pub use controller::{Controller, RawSample, SleepState};
pub use events::{ButtonEvent, NavigationEvent, Outcome, SleepTransition};
pub use input::InputDebouncer;
pub use pages::{Page, PageSelector};
pub use power_button::{PowerButtonMonitor, PressState};
