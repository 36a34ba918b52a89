//! Unified error types for the tracker firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's fault policy uniform.  All fault variants are `Copy` so
//! they can be cheaply threaded through events and counters without
//! allocation.  The loop applies a documented local-vs-fatal policy per
//! category: sensor faults are retried (bounded), classifier and log
//! faults are recovered locally, actuator faults halt the loop.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A light sensor could not be read or returned out-of-range data.
    Sensor(SensorFault),
    /// Classifier inference or model load failed.
    Classifier(ClassifierFault),
    /// A motor command failed.
    Actuator(ActuatorFault),
    /// The training-sample log could not be written.
    Log(LogFault),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Classifier(e) => write!(f, "classifier: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Log(e) => write!(f, "log: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor faults
// ---------------------------------------------------------------------------

/// Fatal for the current tick: no safe decision can be made without a
/// reading.  The loop holds position and retries next cycle, up to the
/// configured bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFault {
    /// The ADC conversion failed or the I2C transaction timed out.
    AdcReadFailed,
    /// Reading is outside the physically plausible range (negative or
    /// non-finite after normalisation).
    OutOfRange,
}

impl fmt::Display for SensorFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorFault> for Error {
    fn from(e: SensorFault) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Classifier faults
// ---------------------------------------------------------------------------

/// Recovered locally by the decision engine, which substitutes a hold
/// command.  Never propagated as a process-ending error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierFault {
    /// Inference itself failed.
    InferenceFailed,
    /// The model produced NaN or infinite probabilities.
    NonFiniteOutput,
    /// A model failed validation and was not installed.
    ModelRejected(&'static str),
}

impl fmt::Display for ClassifierFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InferenceFailed => write!(f, "inference failed"),
            Self::NonFiniteOutput => write!(f, "non-finite output"),
            Self::ModelRejected(msg) => write!(f, "model rejected: {msg}"),
        }
    }
}

impl From<ClassifierFault> for Error {
    fn from(e: ClassifierFault) -> Self {
        Self::Classifier(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator faults
// ---------------------------------------------------------------------------

/// Fatal: the loop cannot verify the motor is in the commanded state, so
/// it stops issuing commands and surfaces the fault to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorFault {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// Direction pin write failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<ActuatorFault> for Error {
    fn from(e: ActuatorFault) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Log faults
// ---------------------------------------------------------------------------

/// Recovered locally: the tick's control behaviour proceeds unaffected.
/// Counted and reported, never allowed to take down the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFault {
    /// The underlying storage is full.
    StorageFull,
    /// Generic write or flush failure.
    WriteFailed,
}

impl fmt::Display for LogFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageFull => write!(f, "storage full"),
            Self::WriteFailed => write!(f, "write failed"),
        }
    }
}

impl From<LogFault> for Error {
    fn from(e: LogFault) -> Self {
        Self::Log(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
