//! Decision engine — centering rule plus classifier inference.
//!
//! Each tick the engine looks at the relative illumination difference
//! between the two sensors:
//!
//! ```text
//!   difference < deadband   →  CENTERING: drive back toward the setpoint
//!   difference >= deadband  →  INFERENCE: ask the classifier which way
//! ```
//!
//! The engine is pure: it never touches hardware, and a classifier
//! failure degrades to a hold command instead of propagating.  The raw
//! centering magnitude may exceed 100; the actuator driver owns the
//! mandatory duty clamp.

use crate::app::ports::ClassifierPort;
use crate::error::ClassifierFault;
use crate::sensors::SensorReading;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Commanded movement direction.  The discriminants are the wire codes
/// written to the training log, so they must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    /// No movement — both H-bridge inputs de-energised.
    Hold = 0,
    /// Increase angle.
    Left = 1,
    /// Decrease angle.
    Right = 2,
}

impl Direction {
    /// Training-label code (Hold=0, Left=1, Right=2).
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Hold),
            1 => Some(Self::Left),
            2 => Some(Self::Right),
            _ => None,
        }
    }

    /// Map a classifier output index to a direction.  Index order matches
    /// the wire codes.
    fn from_index(idx: usize) -> Self {
        match idx {
            1 => Self::Left,
            2 => Self::Right,
            _ => Self::Hold,
        }
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// One tick's movement command.  Immutable once returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    /// Requested duty cycle (percent).  Centering may request more than
    /// 100; the actuator clamps before driving the motor.
    pub speed: u8,
}

impl Decision {
    /// The safe do-nothing command.
    pub const HOLD: Self = Self {
        direction: Direction::Hold,
        speed: 0,
    };

    /// Duty cycle actually applied to the motor (0-100).
    pub fn applied_duty(&self) -> u8 {
        self.speed.min(100)
    }
}

/// Which decision path produced the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Sensors near-equal — recentering toward the setpoint.
    Centering,
    /// Significant imbalance — classifier consulted.
    Inference,
}

/// A decision plus the context the loop needs for reporting.
#[derive(Debug, Clone, Copy)]
pub struct DecisionOutcome {
    pub decision: Decision,
    pub branch: Branch,
    /// Set when the classifier failed and the engine substituted Hold.
    pub classifier_fault: Option<ClassifierFault>,
}

// ---------------------------------------------------------------------------
// DecisionEngine
// ---------------------------------------------------------------------------

/// Combines the deterministic centering rule with classifier inference.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    balance_deadband: f32,
    setpoint_deg: u8,
    centering_gain: u8,
    inference_speed: u8,
}

impl DecisionEngine {
    pub fn new(config: &crate::config::TrackerConfig) -> Self {
        Self {
            balance_deadband: config.balance_deadband,
            setpoint_deg: config.setpoint_deg,
            centering_gain: config.centering_gain,
            inference_speed: config.inference_speed_percent,
        }
    }

    /// Pick a direction and speed for this tick.
    ///
    /// The classifier is consulted only on the inference branch; on the
    /// centering branch the command depends solely on the current angle.
    pub fn decide(
        &self,
        reading: SensorReading,
        angle_deg: u8,
        classifier: &dyn ClassifierPort,
    ) -> DecisionOutcome {
        let difference = relative_difference(reading.a, reading.b);

        if difference < self.balance_deadband {
            return DecisionOutcome {
                decision: self.centering_decision(angle_deg),
                branch: Branch::Centering,
                classifier_fault: None,
            };
        }

        let features = [reading.a, reading.b, f32::from(angle_deg), difference];
        match classifier.infer(features) {
            Ok(probabilities) if probabilities.iter().all(|p| p.is_finite()) => DecisionOutcome {
                decision: Decision {
                    direction: Direction::from_index(argmax(&probabilities)),
                    speed: self.inference_speed,
                },
                branch: Branch::Inference,
                classifier_fault: None,
            },
            Ok(_) => DecisionOutcome {
                decision: Decision::HOLD,
                branch: Branch::Inference,
                classifier_fault: Some(ClassifierFault::NonFiniteOutput),
            },
            Err(fault) => DecisionOutcome {
                decision: Decision::HOLD,
                branch: Branch::Inference,
                classifier_fault: Some(fault),
            },
        }
    }

    /// Proportional drive back toward the setpoint.  Magnitude is degrees
    /// of deviation times the gain, left unclamped here on purpose.
    fn centering_decision(&self, angle_deg: u8) -> Decision {
        let setpoint = self.setpoint_deg;
        if angle_deg > setpoint {
            Decision {
                direction: Direction::Right,
                speed: (angle_deg - setpoint).saturating_mul(self.centering_gain),
            }
        } else if angle_deg < setpoint {
            Decision {
                direction: Direction::Left,
                speed: (setpoint - angle_deg).saturating_mul(self.centering_gain),
            }
        } else {
            Decision::HOLD
        }
    }
}

/// `|a - b| / max(a, b)`, with a zero (or degenerate) denominator treated
/// as zero difference so the centering branch handles dark conditions.
fn relative_difference(a: f32, b: f32) -> f32 {
    let hi = a.max(b);
    if hi <= 0.0 {
        return 0.0;
    }
    (a - b).abs() / hi
}

/// Index of the highest probability.  Ties resolve to the lowest index
/// (Hold < Left < Right) for determinism.
fn argmax(probabilities: &[f32; 3]) -> usize {
    let mut best = 0;
    for (i, p) in probabilities.iter().enumerate().skip(1) {
        if *p > probabilities[best] {
            best = i;
        }
    }
    best
}
