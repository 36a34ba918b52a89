//! Fixed-shape MLP classifier: 4 inputs → 8 hidden (ReLU) → 3 softmax.
//!
//! Weights come from the offline trainer as a JSON file.  The shape is
//! part of the classifier boundary contract and is enforced by the types;
//! the values are validated on load so a corrupt model is rejected
//! instead of steering the panel with NaNs.

use serde::{Deserialize, Serialize};

use crate::app::ports::ClassifierPort;
use crate::error::{ClassifierFault, Error, Result};

const INPUTS: usize = 4;
const HIDDEN: usize = 8;
const OUTPUTS: usize = 3;

/// Serialisable weight bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlpWeights {
    /// Hidden layer, row per neuron.
    pub w1: [[f32; INPUTS]; HIDDEN],
    pub b1: [f32; HIDDEN],
    /// Output layer, row per direction (Hold, Left, Right).
    pub w2: [[f32; HIDDEN]; OUTPUTS],
    pub b2: [f32; OUTPUTS],
}

pub struct MlpClassifier {
    weights: MlpWeights,
}

impl MlpClassifier {
    /// Wrap a weight bundle, rejecting non-finite values.
    pub fn new(weights: MlpWeights) -> Result<Self> {
        let finite = weights.w1.iter().flatten().all(|w| w.is_finite())
            && weights.b1.iter().all(|w| w.is_finite())
            && weights.w2.iter().flatten().all(|w| w.is_finite())
            && weights.b2.iter().all(|w| w.is_finite());
        if !finite {
            return Err(ClassifierFault::ModelRejected("non-finite weight").into());
        }
        Ok(Self { weights })
    }

    /// Load and validate a model file.
    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            log::warn!("model read failed ({}): {}", path, e);
            Error::Classifier(ClassifierFault::ModelRejected("model file unreadable"))
        })?;
        let weights: MlpWeights = serde_json::from_str(&raw).map_err(|e| {
            log::warn!("model parse failed ({}): {}", path, e);
            Error::Classifier(ClassifierFault::ModelRejected("model file unparseable"))
        })?;
        Self::new(weights)
    }
}

impl ClassifierPort for MlpClassifier {
    fn infer(&self, features: [f32; 4]) -> core::result::Result<[f32; 3], ClassifierFault> {
        let w = &self.weights;

        let mut hidden = [0.0f32; HIDDEN];
        for (h, (row, bias)) in hidden.iter_mut().zip(w.w1.iter().zip(&w.b1)) {
            let sum: f32 = row.iter().zip(&features).map(|(wi, xi)| wi * xi).sum();
            *h = (sum + bias).max(0.0); // ReLU
        }

        let mut logits = [0.0f32; OUTPUTS];
        for (l, (row, bias)) in logits.iter_mut().zip(w.w2.iter().zip(&w.b2)) {
            let sum: f32 = row.iter().zip(&hidden).map(|(wi, hi)| wi * hi).sum();
            *l = sum + bias;
        }

        let probabilities = softmax(logits);
        if probabilities.iter().all(|p| p.is_finite()) {
            Ok(probabilities)
        } else {
            Err(ClassifierFault::NonFiniteOutput)
        }
    }
}

/// Numerically stable softmax (max-shifted before exponentiation).
fn softmax(logits: [f32; OUTPUTS]) -> [f32; OUTPUTS] {
    let max = logits.iter().fold(f32::NEG_INFINITY, |m, l| m.max(*l));
    let mut out = [0.0f32; OUTPUTS];
    let mut denom = 0.0f32;
    for (o, l) in out.iter_mut().zip(&logits) {
        *o = (l - max).exp();
        denom += *o;
    }
    for o in &mut out {
        *o /= denom;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_weights() -> MlpWeights {
        MlpWeights {
            w1: [[0.0; INPUTS]; HIDDEN],
            b1: [0.0; HIDDEN],
            w2: [[0.0; HIDDEN]; OUTPUTS],
            b2: [0.0; OUTPUTS],
        }
    }

    #[test]
    fn zero_model_outputs_uniform_simplex() {
        let mlp = MlpClassifier::new(zero_weights()).unwrap();
        let probs = mlp.infer([10.0, 20.0, 90.0, 0.5]).unwrap();
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for p in probs {
            assert!((p - 1.0 / 3.0).abs() < 1e-5);
        }
    }

    #[test]
    fn output_bias_steers_argmax() {
        let mut weights = zero_weights();
        weights.b2 = [0.0, 3.0, 0.0];
        let mlp = MlpClassifier::new(weights).unwrap();
        let probs = mlp.infer([1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!(probs[1] > probs[0] && probs[1] > probs[2]);
    }

    #[test]
    fn relu_gates_negative_hidden_activations() {
        let mut weights = zero_weights();
        // Hidden neuron 0 sums to a negative value, then feeds output 2
        // with a large positive weight; ReLU must zero it out.
        weights.w1[0] = [-1.0, -1.0, -1.0, -1.0];
        weights.w2[2][0] = 100.0;
        let mlp = MlpClassifier::new(weights).unwrap();
        let probs = mlp.infer([1.0, 1.0, 1.0, 1.0]).unwrap();
        for p in probs {
            assert!((p - 1.0 / 3.0).abs() < 1e-5);
        }
    }

    #[test]
    fn softmax_survives_large_logits() {
        let mut weights = zero_weights();
        weights.b2 = [1000.0, 900.0, 800.0];
        let mlp = MlpClassifier::new(weights).unwrap();
        let probs = mlp.infer([0.0; 4]).unwrap();
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!(probs[0] > 0.99);
    }

    #[test]
    fn non_finite_weights_are_rejected() {
        let mut weights = zero_weights();
        weights.w1[3][2] = f32::NAN;
        assert!(MlpClassifier::new(weights).is_err());
    }

    #[test]
    fn weights_serde_roundtrip() {
        let mut weights = zero_weights();
        weights.w1[0][0] = 1.25;
        weights.b2[2] = -0.5;
        let json = serde_json::to_string(&weights).unwrap();
        let back: MlpWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(back.w1[0][0], 1.25);
        assert_eq!(back.b2[2], -0.5);
    }
}
