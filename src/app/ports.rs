//! Port traits the control loop consumes.
//!
//! The loop core is pure orchestration; everything with a side effect
//! (sensors, motor, classifier, log, clock, event reporting) sits behind
//! one of these traits so the loop can run identically against real
//! hardware and against mocks.

use crate::control::Decision;
use crate::datalog::TrainingSample;
use crate::error::{ActuatorFault, ClassifierFault, LogFault, SensorFault};
use crate::sensors::SensorReading;

use super::events::AppEvent;

/// Produces one paired light reading per tick.
pub trait SensorPort {
    fn read(&mut self) -> Result<SensorReading, SensorFault>;
}

/// Drives the panel motor.
pub trait ActuatorPort {
    /// Apply a movement command for this tick.
    fn apply(&mut self, decision: &Decision) -> Result<(), ActuatorFault>;

    /// Best-effort de-energise.  Must not fail: called on the fatal path
    /// where reporting the original fault takes priority.
    fn all_off(&mut self);
}

/// Direction classifier.  Features are `[a, b, angle, difference]`;
/// output is a probability per direction in wire-code order
/// (Hold, Left, Right).
pub trait ClassifierPort {
    fn infer(&self, features: [f32; 4]) -> Result<[f32; 3], ClassifierFault>;
}

/// Append-only training-sample sink.
pub trait SampleLog {
    fn append(&mut self, sample: &TrainingSample) -> Result<(), LogFault>;
}

/// Receives loop lifecycle and per-tick events.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

/// Wall-clock source for log timestamps.
pub trait Clock {
    /// Seconds since the Unix epoch.
    fn now_unix(&self) -> u64;
}
