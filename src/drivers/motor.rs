//! Tracker motor driver (H-bridge).
//!
//! Directional pin pair plus a PWM enable pin.  Hold de-energises both
//! direction inputs; Left and Right energise exactly one.
//!
//! ## Safety contract
//!
//! The duty cycle applied to the enable pin is clamped to 0-100 here,
//! regardless of what the decision engine requested.  The centering rule
//! can compute magnitudes above 100 and this driver is the last line
//! before physical hardware.
//!
//! ## Dual-target design
//!
//! On `rpi-hw`: drives real GPIO and software PWM via the HAL shim.
//! On host/test: the shim tracks pin and duty state in-memory.

use crate::control::{Decision, Direction};
use crate::drivers::hal;
use crate::error::ActuatorFault;
use crate::pins;

pub struct MotorDriver {
    /// Direction and clamped duty of the last successful command.
    last_applied: Option<(Direction, u8)>,
}

impl MotorDriver {
    pub fn new() -> Self {
        Self { last_applied: None }
    }

    /// Apply a movement command.  Idempotent: repeating the same decision
    /// re-issues the same pin and duty writes.
    pub fn apply(&mut self, decision: &Decision) -> Result<(), ActuatorFault> {
        let duty = decision.applied_duty();
        let (in1, in2) = match decision.direction {
            Direction::Hold => (false, false),
            Direction::Left => (true, false),
            Direction::Right => (false, true),
        };

        hal::gpio_write(pins::MOTOR_IN1_GPIO, in1)?;
        hal::gpio_write(pins::MOTOR_IN2_GPIO, in2)?;
        hal::pwm_set_duty(duty)?;

        self.last_applied = Some((decision.direction, duty));
        Ok(())
    }

    /// Best-effort shutdown: de-energise everything.  Used on the fatal
    /// fault path where a second failure must not mask the first, so
    /// errors are logged rather than returned.
    pub fn all_off(&mut self) {
        let results = [
            hal::gpio_write(pins::MOTOR_IN1_GPIO, false),
            hal::gpio_write(pins::MOTOR_IN2_GPIO, false),
            hal::pwm_set_duty(0),
        ];
        if results.iter().any(|r| r.is_err()) {
            log::warn!("motor: all_off could not fully de-energise the bridge");
        }
        self.last_applied = Some((Direction::Hold, 0));
    }

    /// Direction and clamped duty of the last successful command.
    pub fn last_applied(&self) -> Option<(Direction, u8)> {
        self.last_applied
    }
}

impl Default for MotorDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // The sim HAL is process-global; serialise tests that touch it.
    static HW_LOCK: Mutex<()> = Mutex::new(());

    fn guard() -> MutexGuard<'static, ()> {
        HW_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[test]
    fn left_energises_in1_only() {
        let _g = guard();
        hal::sim_inject_pwm_failure(false);
        let mut motor = MotorDriver::new();
        motor
            .apply(&Decision {
                direction: Direction::Left,
                speed: 40,
            })
            .unwrap();
        assert!(hal::sim_pin_is_high(pins::MOTOR_IN1_GPIO));
        assert!(!hal::sim_pin_is_high(pins::MOTOR_IN2_GPIO));
        assert_eq!(hal::sim_pwm_duty(), 40);
    }

    #[test]
    fn right_energises_in2_only() {
        let _g = guard();
        hal::sim_inject_pwm_failure(false);
        let mut motor = MotorDriver::new();
        motor
            .apply(&Decision {
                direction: Direction::Right,
                speed: 70,
            })
            .unwrap();
        assert!(!hal::sim_pin_is_high(pins::MOTOR_IN1_GPIO));
        assert!(hal::sim_pin_is_high(pins::MOTOR_IN2_GPIO));
        assert_eq!(hal::sim_pwm_duty(), 70);
    }

    #[test]
    fn hold_de_energises_both_pins() {
        let _g = guard();
        hal::sim_inject_pwm_failure(false);
        let mut motor = MotorDriver::new();
        motor
            .apply(&Decision {
                direction: Direction::Left,
                speed: 90,
            })
            .unwrap();
        motor.apply(&Decision::HOLD).unwrap();
        assert!(!hal::sim_pin_is_high(pins::MOTOR_IN1_GPIO));
        assert!(!hal::sim_pin_is_high(pins::MOTOR_IN2_GPIO));
        assert_eq!(hal::sim_pwm_duty(), 0);
    }

    #[test]
    fn duty_is_clamped_to_100() {
        let _g = guard();
        hal::sim_inject_pwm_failure(false);
        let mut motor = MotorDriver::new();
        motor
            .apply(&Decision {
                direction: Direction::Right,
                speed: 180,
            })
            .unwrap();
        assert_eq!(hal::sim_pwm_duty(), 100);
        assert_eq!(motor.last_applied(), Some((Direction::Right, 100)));
    }

    #[test]
    fn pwm_failure_surfaces_as_actuator_fault() {
        let _g = guard();
        hal::sim_inject_pwm_failure(true);
        let mut motor = MotorDriver::new();
        let err = motor
            .apply(&Decision {
                direction: Direction::Left,
                speed: 50,
            })
            .unwrap_err();
        assert_eq!(err, ActuatorFault::PwmWriteFailed);
        assert!(motor.last_applied().is_none());
        hal::sim_inject_pwm_failure(false);
    }
}
