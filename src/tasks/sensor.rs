// RingWatch - Sensor Task
//
// Samples the battery divider and the thermistor every
// `SENSOR_SAMPLE_INTERVAL_MS` and publishes the converted values for the
// control task. Sampling pauses while the watch sleeps because the power
// rail feeding both dividers is switched off.

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use esp_idf_sys::{self as sys, esp, EspError};

use ringwatch::config::{PIN_BATTERY_ADC, PIN_THERMISTOR, SENSOR_SAMPLE_INTERVAL_MS};
use ringwatch::{battery_percentage, battery_voltage, Thermistor};

const BATTERY_CHANNEL: sys::adc_channel_t = sys::adc_channel_t_ADC_CHANNEL_7; // GPIO35
const THERMISTOR_CHANNEL: sys::adc_channel_t = sys::adc_channel_t_ADC_CHANNEL_6; // GPIO34

/// Marks a temperature that could not be read.
pub const TEMPERATURE_UNKNOWN: i32 = i32::MIN;

/// Values shared between the sensor and control tasks.
pub struct Telemetry {
    pub battery_percent: AtomicU8,
    /// Tenths of a degree Celsius, or [`TEMPERATURE_UNKNOWN`].
    pub temperature_decicelsius: AtomicI32,
    pub sleeping: AtomicBool,
}

impl Telemetry {
    pub const fn new() -> Self {
        Self {
            battery_percent: AtomicU8::new(0),
            temperature_decicelsius: AtomicI32::new(TEMPERATURE_UNKNOWN),
            sleeping: AtomicBool::new(false),
        }
    }
}

/// ADC1 one-shot unit with the battery and thermistor channels configured
/// for the full 0-3.3 V range.
struct Adc1 {
    handle: sys::adc_oneshot_unit_handle_t,
}

impl Adc1 {
    fn new() -> Result<Self, EspError> {
        let mut handle: sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();
        // SAFETY: plain C structs; zeroed fields select the driver defaults.
        let unit_cfg = sys::adc_oneshot_unit_init_cfg_t {
            unit_id: sys::adc_unit_t_ADC_UNIT_1,
            ulp_mode: sys::adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
            ..unsafe { core::mem::zeroed() }
        };
        esp!(unsafe { sys::adc_oneshot_new_unit(&unit_cfg, &mut handle) })?;

        let chan_cfg = sys::adc_oneshot_chan_cfg_t {
            atten: sys::adc_atten_t_ADC_ATTEN_DB_11,
            bitwidth: sys::adc_bitwidth_t_ADC_BITWIDTH_12,
        };
        for channel in [BATTERY_CHANNEL, THERMISTOR_CHANNEL] {
            esp!(unsafe { sys::adc_oneshot_config_channel(handle, channel, &chan_cfg) })?;
        }

        Ok(Self { handle })
    }

    fn read(&self, channel: sys::adc_channel_t) -> Result<u16, EspError> {
        let mut raw: i32 = 0;
        esp!(unsafe { sys::adc_oneshot_read(self.handle, channel, &mut raw) })?;
        Ok(raw.clamp(0, i32::from(u16::MAX)) as u16)
    }
}

pub fn sensor_task(telemetry: &'static Telemetry) {
    log::info!(
        "Sensor task started (battery GPIO{}, thermistor GPIO{})",
        PIN_BATTERY_ADC,
        PIN_THERMISTOR
    );

    let adc = match Adc1::new() {
        Ok(adc) => adc,
        Err(e) => {
            log::error!("ADC init failed: {}", e);
            return;
        }
    };

    let interval = Duration::from_millis(SENSOR_SAMPLE_INTERVAL_MS);

    loop {
        let tick_start = Instant::now();

        if !telemetry.sleeping.load(Ordering::Relaxed) {
            sample(&adc, telemetry);
        }

        let elapsed = tick_start.elapsed();
        if elapsed < interval {
            thread::sleep(interval - elapsed);
        }
    }
}

fn sample(adc: &Adc1, telemetry: &Telemetry) {
    match adc.read(BATTERY_CHANNEL) {
        Ok(raw) => {
            let volts = battery_voltage(raw);
            let percent = battery_percentage(volts);
            telemetry.battery_percent.store(percent, Ordering::Relaxed);
            log::info!("Battery {:.2} V ({}%)", volts, percent);
        }
        Err(e) => log::warn!("Battery read failed: {}", e),
    }

    let temperature = adc
        .read(THERMISTOR_CHANNEL)
        .map(|raw| Thermistor::BOARD.celsius(raw));
    match temperature {
        Ok(Some(celsius)) => {
            let deci = (celsius * 10.0).round() as i32;
            telemetry.temperature_decicelsius.store(deci, Ordering::Relaxed);
            log::info!("Temperature {:.1} °C", celsius);
        }
        Ok(None) => {
            telemetry
                .temperature_decicelsius
                .store(TEMPERATURE_UNKNOWN, Ordering::Relaxed);
            log::warn!("Thermistor reading at rail - sensor open or shorted");
        }
        Err(e) => log::warn!("Thermistor read failed: {}", e),
    }
}
