//! Sensor subsystem — LDR drivers and the aggregating pair.
//!
//! The pair owns both channel drivers and produces one [`SensorReading`]
//! per tick.  A failed read on either channel fails the whole pair: a
//! half reading cannot drive a safe decision.

pub mod light;

use crate::error::SensorFault;
use crate::pins;
use light::LightSensor;

/// Paired normalized intensities from the two LDRs.  Produced and
/// consumed within one tick, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub a: f32,
    pub b: f32,
}

/// Aggregates the two light sensors.
pub struct SensorPair {
    a: LightSensor,
    b: LightSensor,
}

impl SensorPair {
    pub fn new() -> Self {
        Self {
            a: LightSensor::new(pins::LDR_A_ADC_CHANNEL),
            b: LightSensor::new(pins::LDR_B_ADC_CHANNEL),
        }
    }

    /// Read both channels and return a paired reading.
    pub fn read(&mut self) -> Result<SensorReading, SensorFault> {
        let a = self.a.read()?;
        let b = self.b.read()?;
        Ok(SensorReading {
            a: a.intensity,
            b: b.intensity,
        })
    }
}

impl Default for SensorPair {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::hal;
    use std::sync::{Mutex, MutexGuard};

    // The sim HAL is process-global; serialise tests that touch it.
    static HW_LOCK: Mutex<()> = Mutex::new(());

    fn guard() -> MutexGuard<'static, ()> {
        HW_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[test]
    fn reads_both_channels_normalized() {
        let _g = guard();
        hal::sim_inject_adc_failure(false);
        hal::sim_set_adc(pins::LDR_A_ADC_CHANNEL, pins::ADC_FULL_SCALE);
        hal::sim_set_adc(pins::LDR_B_ADC_CHANNEL, 0);

        let mut pair = SensorPair::new();
        let reading = pair.read().unwrap();
        assert!((reading.a - 100.0).abs() < 1e-3);
        assert!(reading.b.abs() < 1e-3);
    }

    #[test]
    fn adc_failure_fails_the_pair() {
        let _g = guard();
        hal::sim_inject_adc_failure(true);
        let mut pair = SensorPair::new();
        assert_eq!(pair.read().unwrap_err(), SensorFault::AdcReadFailed);
        hal::sim_inject_adc_failure(false);
    }

    #[test]
    fn out_of_range_count_is_rejected() {
        let _g = guard();
        hal::sim_inject_adc_failure(false);
        hal::sim_set_adc(pins::LDR_A_ADC_CHANNEL, pins::ADC_FULL_SCALE + 1);
        hal::sim_set_adc(pins::LDR_B_ADC_CHANNEL, 100);

        let mut pair = SensorPair::new();
        assert_eq!(pair.read().unwrap_err(), SensorFault::OutOfRange);
        hal::sim_set_adc(pins::LDR_A_ADC_CHANNEL, 0);
    }
}
