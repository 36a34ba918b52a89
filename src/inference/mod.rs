//! Classifier implementations and the swappable classifier handle.
//!
//! The control loop never owns a model: it holds a [`ClassifierSlot`] and
//! pins one classifier per tick.  An offline trainer (out of process)
//! produces replacement models; [`reload`] installs them between ticks.

pub mod mlp;
pub mod reload;

use std::sync::{Arc, Mutex, PoisonError};

use crate::app::ports::ClassifierPort;
use crate::error::ClassifierFault;

// ---------------------------------------------------------------------------
// Cold-start fallback
// ---------------------------------------------------------------------------

/// Equal preference for every direction.  Used before a trained model
/// exists; argmax tie-breaking makes it command Hold.
pub struct UniformClassifier;

impl ClassifierPort for UniformClassifier {
    fn infer(&self, _features: [f32; 4]) -> Result<[f32; 3], ClassifierFault> {
        Ok([1.0 / 3.0; 3])
    }
}

// ---------------------------------------------------------------------------
// Swappable handle
// ---------------------------------------------------------------------------

/// Shared classifier handle.
///
/// The loop calls [`current`](Self::current) once per tick and uses the
/// returned `Arc` for the whole tick, so an [`install`](Self::install)
/// from another thread is atomic from the loop's perspective: a tick sees
/// either the old or the new classifier in full, never a mix.
pub struct ClassifierSlot {
    inner: Mutex<Arc<dyn ClassifierPort + Send + Sync>>,
}

impl ClassifierSlot {
    pub fn new(initial: Arc<dyn ClassifierPort + Send + Sync>) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }

    /// Pin the currently installed classifier.
    pub fn current(&self) -> Arc<dyn ClassifierPort + Send + Sync> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the installed classifier.  The previous one stays alive
    /// until the last tick holding it finishes.
    pub fn install(&self, replacement: Arc<dyn ClassifierPort + Send + Sync>) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = replacement;
    }
}
