//! Single LDR light sensor on one ADS1115 channel.
//!
//! Converts the raw conversion count to a normalized 0-100 intensity and
//! range-checks the result.  No retry policy lives here — the control
//! loop owns retries.

use crate::drivers::hal;
use crate::error::SensorFault;
use crate::pins;

#[derive(Debug, Clone, Copy)]
pub struct LightReading {
    pub raw: u16,
    /// Normalized intensity, 0-100.
    pub intensity: f32,
}

pub struct LightSensor {
    channel: u8,
}

impl LightSensor {
    pub fn new(channel: u8) -> Self {
        Self { channel }
    }

    pub fn read(&mut self) -> Result<LightReading, SensorFault> {
        let raw = hal::adc_read(self.channel)?;
        if raw > pins::ADC_FULL_SCALE {
            return Err(SensorFault::OutOfRange);
        }
        let intensity = f32::from(raw) / f32::from(pins::ADC_FULL_SCALE) * 100.0;
        if !intensity.is_finite() {
            return Err(SensorFault::OutOfRange);
        }
        Ok(LightReading { raw, intensity })
    }
}
