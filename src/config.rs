//! System configuration parameters
//!
//! All tunable parameters for the tracker control loop.  Values can be
//! overridden via a JSON config file passed to the binary.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    // --- Control loop ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Panel angle at startup (degrees, 0-180)
    pub initial_angle_deg: u8,

    // --- Decision engine ---
    /// Relative sensor difference below which the panel recenters
    /// instead of consulting the classifier (fraction, 0-1)
    pub balance_deadband: f32,
    /// Recentering setpoint angle (degrees)
    pub setpoint_deg: u8,
    /// Degrees-of-deviation to duty-cycle multiplier for recentering
    pub centering_gain: u8,
    /// Fixed duty cycle for classifier-driven moves (0-100%)
    pub inference_speed_percent: u8,

    // --- Fault policy ---
    /// Consecutive failed sensor reads tolerated before the loop halts
    pub max_sensor_retries: u32,

    // --- Data logging ---
    /// Append-only training sample log (CSV)
    pub sample_log_path: String,

    // --- Classifier ---
    /// Classifier model weights (JSON)
    pub model_path: String,
    /// Interval between model-file change checks (seconds, 0 = disabled)
    pub model_reload_check_secs: u32,

    // --- Telemetry ---
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            // Control loop — 10 Hz, panel starts mid-travel
            control_loop_interval_ms: 100,
            initial_angle_deg: 90,

            // Decision engine
            balance_deadband: 0.10,
            setpoint_deg: 90,
            centering_gain: 2,
            inference_speed_percent: 50,

            // Fault policy — ~5 s of consecutive sensor failures at 10 Hz
            max_sensor_retries: 50,

            // Data logging
            sample_log_path: "data.csv".into(),

            // Classifier
            model_path: "model.json".into(),
            model_reload_check_secs: 60,

            // Telemetry
            telemetry_interval_secs: 60,
        }
    }
}

impl TrackerConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped,
    /// so a bad config file cannot silently weaken the fault policy.
    pub fn validate(&self) -> Result<()> {
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control_loop_interval_ms must be > 0"));
        }
        if self.initial_angle_deg > 180 {
            return Err(Error::Config("initial_angle_deg must be 0-180"));
        }
        if !(self.balance_deadband > 0.0 && self.balance_deadband < 1.0) {
            return Err(Error::Config("balance_deadband must be in (0, 1)"));
        }
        if self.setpoint_deg > 180 {
            return Err(Error::Config("setpoint_deg must be 0-180"));
        }
        if self.centering_gain == 0 {
            return Err(Error::Config("centering_gain must be > 0"));
        }
        if self.inference_speed_percent > 100 {
            return Err(Error::Config("inference_speed_percent must be 0-100"));
        }
        if self.max_sensor_retries == 0 {
            return Err(Error::Config("max_sensor_retries must be > 0"));
        }
        if self.sample_log_path.is_empty() {
            return Err(Error::Config("sample_log_path must not be empty"));
        }
        Ok(())
    }

    /// Load and validate configuration from a JSON file.
    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            log::warn!("config read failed ({}): {}", path, e);
            Error::Config("config file unreadable")
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            log::warn!("config parse failed ({}): {}", path, e);
            Error::Config("config file unparseable")
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = TrackerConfig::default();
        assert!(c.validate().is_ok());
        assert!(c.balance_deadband > 0.0 && c.balance_deadband < 1.0);
        assert!(c.setpoint_deg <= 180);
        assert!(c.inference_speed_percent <= 100);
        assert!(c.control_loop_interval_ms > 0);
        assert!(c.max_sensor_retries > 0);
    }

    #[test]
    fn serde_roundtrip() {
        let c = TrackerConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: TrackerConfig = serde_json::from_str(&json).unwrap();
        assert!((c.balance_deadband - c2.balance_deadband).abs() < 1e-6);
        assert_eq!(c.setpoint_deg, c2.setpoint_deg);
        assert_eq!(c.sample_log_path, c2.sample_log_path);
    }

    #[test]
    fn rejects_out_of_range_setpoint() {
        let c = TrackerConfig {
            setpoint_deg: 181,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_zero_deadband() {
        let c = TrackerConfig {
            balance_deadband: 0.0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_overdriven_inference_speed() {
        let c = TrackerConfig {
            inference_speed_percent: 101,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_unbounded_sensor_retry() {
        let c = TrackerConfig {
            max_sensor_retries: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err(), "unbounded silent retry is disallowed");
    }
}
