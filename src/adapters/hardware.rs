//! Sensor and actuator ports over the physical drivers.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::Decision;
use crate::drivers::motor::MotorDriver;
use crate::error::{ActuatorFault, SensorFault};
use crate::sensors::{SensorPair, SensorReading};

/// Bundles the LDR pair and the motor driver behind the loop's ports.
pub struct HardwareAdapter {
    sensors: SensorPair,
    motor: MotorDriver,
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self {
            sensors: SensorPair::new(),
            motor: MotorDriver::new(),
        }
    }
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for HardwareAdapter {
    fn read(&mut self) -> Result<SensorReading, SensorFault> {
        self.sensors.read()
    }
}

impl ActuatorPort for HardwareAdapter {
    fn apply(&mut self, decision: &Decision) -> Result<(), ActuatorFault> {
        self.motor.apply(decision)
    }

    fn all_off(&mut self) {
        self.motor.all_off();
    }
}
