//! Property tests over the pure domain logic.

use proptest::prelude::*;

use heliotrack::app::ports::ClassifierPort;
use heliotrack::config::TrackerConfig;
use heliotrack::control::{Branch, Decision, DecisionEngine, Direction, TrackerState};
use heliotrack::datalog::TrainingSample;
use heliotrack::error::ClassifierFault;
use heliotrack::sensors::SensorReading;

struct FixedClassifier([f32; 3]);

impl ClassifierPort for FixedClassifier {
    fn infer(&self, _features: [f32; 4]) -> Result<[f32; 3], ClassifierFault> {
        Ok(self.0)
    }
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Hold),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

proptest! {
    /// The tracked angle never escapes the mechanical travel range, no
    /// matter what command sequence is applied from any starting point.
    #[test]
    fn angle_stays_within_travel_limits(
        initial in 0u8..=255,
        directions in proptest::collection::vec(direction_strategy(), 0..500),
    ) {
        let mut state = TrackerState::new(initial);
        prop_assert!(state.angle() <= 180);
        for d in directions {
            state.advance(d);
            prop_assert!(state.angle() <= 180);
        }
    }

    /// The duty cycle that reaches the motor is always 0-100, whatever
    /// magnitude the decision carries.
    #[test]
    fn applied_duty_is_always_clamped(speed in any::<u8>(), direction in direction_strategy()) {
        let decision = Decision { direction, speed };
        prop_assert!(decision.applied_duty() <= 100);
    }

    /// With balanced sensors the command depends only on the angle: above
    /// the setpoint drives Right, below drives Left, at it holds, and the
    /// magnitude is deviation times gain.
    #[test]
    fn centering_is_a_pure_function_of_angle(angle in 0u8..=180) {
        let config = TrackerConfig::default();
        let engine = DecisionEngine::new(&config);
        let reading = SensorReading { a: 80.0, b: 80.0 };

        let out = engine.decide(reading, angle, &FixedClassifier([0.0, 0.0, 1.0]));
        prop_assert_eq!(out.branch, Branch::Centering);

        let setpoint = config.setpoint_deg;
        match angle.cmp(&setpoint) {
            std::cmp::Ordering::Greater => {
                prop_assert_eq!(out.decision.direction, Direction::Right);
                prop_assert_eq!(
                    out.decision.speed,
                    (angle - setpoint).saturating_mul(config.centering_gain)
                );
            }
            std::cmp::Ordering::Less => {
                prop_assert_eq!(out.decision.direction, Direction::Left);
                prop_assert_eq!(
                    out.decision.speed,
                    (setpoint - angle).saturating_mul(config.centering_gain)
                );
            }
            std::cmp::Ordering::Equal => {
                prop_assert_eq!(out.decision, Decision::HOLD);
            }
        }
    }

    /// On the inference branch the chosen direction always carries the
    /// highest probability, with ties resolved toward the lowest index.
    #[test]
    fn inference_picks_the_argmax_direction(
        p0 in 0.0f32..1.0,
        p1 in 0.0f32..1.0,
        p2 in 0.0f32..1.0,
    ) {
        let engine = DecisionEngine::new(&TrackerConfig::default());
        // Heavily imbalanced reading forces the inference branch.
        let reading = SensorReading { a: 10.0, b: 100.0 };

        let probs = [p0, p1, p2];
        let out = engine.decide(reading, 90, &FixedClassifier(probs));
        prop_assert_eq!(out.branch, Branch::Inference);

        let chosen = out.decision.direction.code() as usize;
        for (i, p) in probs.iter().enumerate() {
            prop_assert!(probs[chosen] >= *p);
            if i < chosen {
                prop_assert!(probs[chosen] > *p, "tie must resolve to the lower index");
            }
        }
    }

    /// CSV serialisation is lossless for every representable sample.
    #[test]
    fn training_sample_round_trips(
        timestamp in any::<u64>(),
        a in 0.0f32..=100.0,
        b in 0.0f32..=100.0,
        angle in 0u8..=180,
        direction in direction_strategy(),
    ) {
        let sample = TrainingSample { timestamp, a, b, angle, direction };
        let parsed = TrainingSample::parse_line(&sample.to_line()).unwrap();
        prop_assert_eq!(parsed, sample);
    }
}
