// RingWatch - Sensor Calibration
//
// Pure conversions from raw 12-bit ADC counts to battery voltage, state of
// charge and thermistor temperature.

use crate::config::*;

/// Piecewise-linear lookup over `(x, y)` points whose `x` is monotonic
/// (ascending or descending). Inputs outside the table clamp to the end
/// points. `None` only for an empty table.
pub fn interpolate(table: &[(f32, f32)], x: f32) -> Option<f32> {
    let (&first, &last) = (table.first()?, table.last()?);
    let ascending = first.0 <= last.0;
    let (low, high) = if ascending { (first, last) } else { (last, first) };

    if x <= low.0 {
        return Some(low.1);
    }
    if x >= high.0 {
        return Some(high.1);
    }

    for pair in table.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let inside = if ascending {
            x >= a.0 && x <= b.0
        } else {
            x <= a.0 && x >= b.0
        };
        if inside {
            let span = b.0 - a.0;
            if span == 0.0 {
                return Some(a.1);
            }
            return Some(a.1 + (x - a.0) / span * (b.1 - a.1));
        }
    }

    // Only reachable for tables that are not monotonic.
    Some(last.1)
}

// ---------------------------------------------------------------------------
// Battery
// ---------------------------------------------------------------------------

/// Cell voltage behind the R1/R2 divider for a raw ADC reading.
pub fn battery_voltage(raw: u16) -> f32 {
    let pin_volts = f32::from(raw.min(ADC_RESOLUTION)) / f32::from(ADC_RESOLUTION)
        * ADC_REFERENCE_VOLTAGE;
    let divider = (BATTERY_DIVIDER_R1 + BATTERY_DIVIDER_R2) / BATTERY_DIVIDER_R2;
    pin_volts * divider * BATTERY_CALIBRATION_FACTOR
}

/// State of charge in whole percent, 0..=100.
pub fn battery_percentage(volts: f32) -> u8 {
    let percent = interpolate(&BATTERY_CURVE, volts).unwrap_or(0.0);
    percent.round().clamp(0.0, 100.0) as u8
}

// ---------------------------------------------------------------------------
// Thermistor
// ---------------------------------------------------------------------------

/// NTC thermistor on the low side of a divider fed from the ADC reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thermistor {
    pub reference_ohms: f32,
    pub nominal_ohms: f32,
    pub nominal_celsius: f32,
    pub b_value: f32,
    pub adc_max: u16,
}

const KELVIN_OFFSET: f32 = 273.15;

impl Thermistor {
    pub const BOARD: Thermistor = Thermistor {
        reference_ohms: THERMISTOR_REFERENCE_OHMS,
        nominal_ohms: THERMISTOR_NOMINAL_OHMS,
        nominal_celsius: THERMISTOR_NOMINAL_CELSIUS,
        b_value: THERMISTOR_B_VALUE,
        adc_max: ADC_RESOLUTION,
    };

    /// NTC resistance for a raw reading. Readings pinned to either rail mean
    /// an open or shorted sensor and yield `None`.
    pub fn resistance(&self, raw: u16) -> Option<f32> {
        if raw == 0 || raw >= self.adc_max {
            return None;
        }
        let ratio = f32::from(self.adc_max) / f32::from(raw);
        Some(self.reference_ohms / (ratio - 1.0))
    }

    /// Temperature in °C from the B-parameter equation.
    pub fn celsius(&self, raw: u16) -> Option<f32> {
        let ohms = self.resistance(raw)?;
        let nominal_kelvin = self.nominal_celsius + KELVIN_OFFSET;
        let inverse = 1.0 / nominal_kelvin + (ohms / self.nominal_ohms).ln() / self.b_value;
        Some(1.0 / inverse - KELVIN_OFFSET)
    }
}
