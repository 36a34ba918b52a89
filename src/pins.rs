//! GPIO / peripheral pin assignments for the tracker main board.
//!
//! Single source of truth — every driver references this module rather
//! than hard-coding pin numbers.  BCM numbering (Raspberry Pi).

// ---------------------------------------------------------------------------
// Tracker motor driver (H-bridge)
// ---------------------------------------------------------------------------

/// Digital output: energised for a Left (angle-increasing) command.
pub const MOTOR_IN1_GPIO: u8 = 18;
/// Digital output: energised for a Right (angle-decreasing) command.
pub const MOTOR_IN2_GPIO: u8 = 23;
/// PWM enable pin — duty cycle sets motor speed.
pub const MOTOR_EN_GPIO: u8 = 24;

/// Software PWM base frequency for the enable pin.
pub const MOTOR_PWM_FREQ_HZ: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Light sensors (LDR pair on ADS1115, I2C)
// ---------------------------------------------------------------------------

/// ADS1115 single-ended input for the east-facing LDR.
pub const LDR_A_ADC_CHANNEL: u8 = 0;
/// ADS1115 single-ended input for the west-facing LDR.
pub const LDR_B_ADC_CHANNEL: u8 = 1;

/// ADS1115 I2C address (ADDR pin tied to GND).
pub const ADC_I2C_ADDR: u16 = 0x48;

/// Positive full-scale conversion count (15-bit single-ended range).
pub const ADC_FULL_SCALE: u16 = 32767;
