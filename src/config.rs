// RingWatch - Hardware & System Configuration
// Target: ESP32 (Xtensa) wearable with 1.28" round touchscreen and LED ring

use std::fmt;

use crate::pages::Page;

// ---------------------------------------------------------------------------
// GPIO Pin Definitions
// ---------------------------------------------------------------------------
pub const PIN_TOUCH_RST: i32 = 33;
pub const PIN_TOUCH_INT: i32 = 32;    // Touch controller interrupt line

pub const PIN_BATTERY_ADC: i32 = 35;  // Battery divider midpoint (ADC1_CH7)
pub const PIN_THERMISTOR: i32 = 34;   // ADC1_CH6, shared with motion sense
pub const PIN_BUTTON: i32 = 14;       // Pin 13 - PWR_PB sense

pub const PIN_POWER_ENABLE: i32 = 26; // Pin 11 - P_ENA
pub const PIN_VALVE_ENABLE: i32 = 17; // Pin 28 - VALVE
pub const PIN_PUMP_ENABLE: i32 = 25;  // Pin 10 - PUMP

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_SENSOR: usize = 4096;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const CONTROL_POLL_INTERVAL_MS: u64 = 10;        // 100 Hz pin sampling
pub const SENSOR_SAMPLE_INTERVAL_MS: u64 = 10_000;   // battery + thermistor
pub const TOUCH_NAV_DEBOUNCE_MS: u32 = 150;          // limits multitouch bursts
pub const SUSTAINED_PRESS_MS: u32 = 2000;            // hold to sleep / wake

// ---------------------------------------------------------------------------
// ADC
// ---------------------------------------------------------------------------
pub const ADC_RESOLUTION: u16 = 4095;      // 12-bit
pub const ADC_REFERENCE_VOLTAGE: f32 = 3.3;

// ---------------------------------------------------------------------------
// Battery divider and discharge curve
// ---------------------------------------------------------------------------
pub const BATTERY_DIVIDER_R1: f32 = 100_000.0;
pub const BATTERY_DIVIDER_R2: f32 = 100_000.0;
pub const BATTERY_CALIBRATION_FACTOR: f32 = 1.116;

/// Cell voltage to state of charge, 50 mV steps from full to empty.
pub const BATTERY_CURVE: [(f32, f32); 21] = [
    (4.20, 100.0),
    (4.15, 95.0),
    (4.10, 90.0),
    (4.05, 85.0),
    (4.00, 80.0),
    (3.95, 75.0),
    (3.90, 70.0),
    (3.85, 65.0),
    (3.80, 60.0),
    (3.75, 55.0),
    (3.70, 50.0),
    (3.65, 45.0),
    (3.60, 40.0),
    (3.55, 35.0),
    (3.50, 30.0),
    (3.45, 25.0),
    (3.40, 20.0),
    (3.35, 15.0),
    (3.30, 10.0),
    (3.25, 5.0),
    (3.20, 0.0),
];

// ---------------------------------------------------------------------------
// Thermistor (NTC, B-parameter model)
// ---------------------------------------------------------------------------
pub const THERMISTOR_REFERENCE_OHMS: f32 = 9998.0;
pub const THERMISTOR_NOMINAL_OHMS: f32 = 10_000.0;
pub const THERMISTOR_NOMINAL_CELSIUS: f32 = 25.0;
pub const THERMISTOR_B_VALUE: f32 = 3900.0;

// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

/// Electrical sense of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    #[default]
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Map a raw pin level to "asserted".
    pub fn is_asserted(self, raw_high: bool) -> bool {
        match self {
            Self::ActiveHigh => raw_high,
            Self::ActiveLow => !raw_high,
        }
    }

    /// Pin level (true = high) that asserts an output.
    pub fn activate_level(self) -> bool {
        matches!(self, Self::ActiveHigh)
    }

    pub fn deactivate_level(self) -> bool {
        !self.activate_level()
    }
}

/// Hardware build targets sharing this firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardVariant {
    /// Board with the pump and valve stage populated.
    PumpValve,
    /// Display, LED ring and sensors only.
    Basic,
}

/// Output pins that only exist on [`BoardVariant::PumpValve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorPins {
    pub pump: i32,
    pub valve: i32,
}

impl BoardVariant {
    pub fn default_page(self) -> Page {
        match self {
            Self::PumpValve => Page::GreenRing,
            Self::Basic => Page::BlueRing,
        }
    }

    pub fn actuator_pins(self) -> Option<ActuatorPins> {
        match self {
            Self::PumpValve => Some(ActuatorPins {
                pump: PIN_PUMP_ENABLE,
                valve: PIN_VALVE_ENABLE,
            }),
            Self::Basic => None,
        }
    }
}

/// Settings resolved once at boot and handed to the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub touch_debounce_ms: u32,
    pub sustained_press_ms: u32,
    pub touch_navigation: bool,
    pub button_polarity: Polarity,
    /// The touch controller pulses its interrupt line low.
    pub touch_polarity: Polarity,
    /// Polarity of the power, pump and valve enables.
    pub output_polarity: Polarity,
    pub board: BoardVariant,
    pub initial_page: Page,
    pub last_page: Page,
}

impl Config {
    pub fn for_board(board: BoardVariant) -> Self {
        Self {
            touch_debounce_ms: TOUCH_NAV_DEBOUNCE_MS,
            sustained_press_ms: SUSTAINED_PRESS_MS,
            touch_navigation: true,
            button_polarity: Polarity::ActiveHigh,
            touch_polarity: Polarity::ActiveLow,
            output_polarity: Polarity::ActiveHigh,
            board,
            initial_page: board.default_page(),
            last_page: Page::LAST,
        }
    }

    /// Configuration selected by the crate features this image was built with.
    pub fn from_build() -> Self {
        let board = if cfg!(feature = "basic-board") {
            BoardVariant::Basic
        } else {
            BoardVariant::PumpValve
        };
        let mut config = Self::for_board(board);
        if cfg!(feature = "active-low") {
            config.output_polarity = Polarity::ActiveLow;
        }
        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.touch_debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounceWindow);
        }
        if self.sustained_press_ms == 0 {
            return Err(ConfigError::ZeroSustainedThreshold);
        }
        if self.initial_page > self.last_page {
            return Err(ConfigError::InitialPageOutOfRange {
                initial: self.initial_page,
                last: self.last_page,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_board(BoardVariant::PumpValve)
    }
}

/// Rejected runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero window would let every bounce through.
    ZeroDebounceWindow,
    /// A zero threshold turns every press into a sleep toggle.
    ZeroSustainedThreshold,
    InitialPageOutOfRange { initial: Page, last: Page },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDebounceWindow => write!(f, "touch debounce window must be non-zero"),
            Self::ZeroSustainedThreshold => write!(f, "sustained press threshold must be non-zero"),
            Self::InitialPageOutOfRange { initial, last } => write!(
                f,
                "initial page {:?} lies beyond last page {:?}",
                initial, last
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_normalizes_inputs() {
        assert!(Polarity::ActiveHigh.is_asserted(true));
        assert!(!Polarity::ActiveHigh.is_asserted(false));
        assert!(Polarity::ActiveLow.is_asserted(false));
        assert!(!Polarity::ActiveLow.is_asserted(true));
    }

    #[test]
    fn polarity_output_levels() {
        assert!(Polarity::ActiveHigh.activate_level());
        assert!(!Polarity::ActiveHigh.deactivate_level());
        assert!(!Polarity::ActiveLow.activate_level());
        assert!(Polarity::ActiveLow.deactivate_level());
    }

    #[test]
    fn default_config_matches_header_values() {
        let config = Config::default();
        assert_eq!(config.touch_debounce_ms, 150);
        assert_eq!(config.sustained_press_ms, 2000);
        assert_eq!(config.initial_page, Page::GreenRing);
        assert_eq!(config.last_page, Page::EyePulsePause);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn board_variants_differ_in_page_and_actuators() {
        assert_eq!(BoardVariant::Basic.default_page(), Page::BlueRing);
        assert!(BoardVariant::Basic.actuator_pins().is_none());

        let pins = BoardVariant::PumpValve.actuator_pins().unwrap();
        assert_eq!(pins.pump, 25);
        assert_eq!(pins.valve, 17);
    }

    #[test]
    fn validate_rejects_degenerate_timing() {
        let mut config = Config::default();
        config.touch_debounce_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounceWindow));

        let mut config = Config::default();
        config.sustained_press_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroSustainedThreshold));
    }

    #[test]
    fn validate_rejects_initial_page_past_last() {
        let mut config = Config::default();
        config.last_page = Page::BlueRing;
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InitialPageOutOfRange {
                initial: Page::GreenRing,
                last: Page::BlueRing,
            }
        );
        assert!(err.to_string().contains("GreenRing"));
    }

    #[test]
    #[cfg(feature = "active-low")]
    fn active_low_build_inverts_outputs_only() {
        let config = Config::from_build();
        assert_eq!(config.output_polarity, Polarity::ActiveLow);
        assert_eq!(config.button_polarity, Polarity::ActiveHigh);
        assert_eq!(config.touch_polarity, Polarity::ActiveLow);
    }

    #[test]
    #[cfg(not(feature = "active-low"))]
    fn default_build_drives_outputs_high() {
        assert_eq!(Config::from_build().output_polarity, Polarity::ActiveHigh);
    }

    #[test]
    #[cfg(feature = "basic-board")]
    fn basic_board_build_starts_on_first_page() {
        let config = Config::from_build();
        assert_eq!(config.board, BoardVariant::Basic);
        assert_eq!(config.initial_page, Page::BlueRing);
        assert!(config.board.actuator_pins().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[cfg(not(feature = "basic-board"))]
    fn default_build_is_pump_valve_board() {
        let config = Config::from_build();
        assert_eq!(config.board, BoardVariant::PumpValve);
        assert_eq!(config.initial_page, Page::GreenRing);
    }

    #[test]
    fn battery_curve_is_descending() {
        assert!(BATTERY_CURVE.windows(2).all(|w| w[0].0 > w[1].0 && w[0].1 > w[1].1));
    }
}
