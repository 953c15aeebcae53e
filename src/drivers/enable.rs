// RingWatch - Enable Line Driver
//
// GPIO outputs that switch a load on or off: the P_ENA power rail and, on the
// pump/valve board, the pump and valve stages. The board's output polarity
// decides which level means "on".

use esp_idf_hal::gpio::{AnyOutputPin, Level, Output, PinDriver};
use esp_idf_sys::EspError;

use ringwatch::Polarity;

pub struct EnableLine<'d> {
    pin: PinDriver<'d, AnyOutputPin, Output>,
    polarity: Polarity,
}

impl<'d> EnableLine<'d> {
    /// Wraps `pin` and drives it to the inactive level straight away.
    pub fn new(pin: PinDriver<'d, AnyOutputPin, Output>, polarity: Polarity) -> Result<Self, EspError> {
        let mut line = Self { pin, polarity };
        line.deactivate()?;
        Ok(line)
    }

    pub fn activate(&mut self) -> Result<(), EspError> {
        self.drive(true)
    }

    pub fn deactivate(&mut self) -> Result<(), EspError> {
        self.drive(false)
    }

    fn drive(&mut self, active: bool) -> Result<(), EspError> {
        let high = if active {
            self.polarity.activate_level()
        } else {
            self.polarity.deactivate_level()
        };
        self.pin.set_level(if high { Level::High } else { Level::Low })
    }
}
