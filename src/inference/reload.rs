//! Model hot-reload.
//!
//! The offline trainer rewrites the model file out-of-band.  The watcher
//! polls the file's modification time at a configured interval and, when
//! it changes, parses and validates the new weights before installing
//! them into the [`ClassifierSlot`].  A bad file never displaces a good
//! model.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use log::{info, warn};

use super::mlp::MlpClassifier;
use super::ClassifierSlot;

pub struct ModelWatcher {
    path: PathBuf,
    check_every: Duration,
    last_check: Instant,
    last_mtime: Option<SystemTime>,
    enabled: bool,
}

impl ModelWatcher {
    /// `check_every_secs == 0` disables watching entirely.
    pub fn new(path: &str, check_every_secs: u32) -> Self {
        let path = PathBuf::from(path);
        let last_mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
        Self {
            path,
            check_every: Duration::from_secs(u64::from(check_every_secs)),
            last_check: Instant::now(),
            last_mtime,
            enabled: check_every_secs > 0,
        }
    }

    /// Called once per cycle from the main loop.  Returns `true` when a
    /// new model was installed.
    pub fn poll(&mut self, slot: &ClassifierSlot) -> bool {
        if !self.enabled || self.last_check.elapsed() < self.check_every {
            return false;
        }
        self.last_check = Instant::now();

        let mtime = match std::fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(t) => t,
            // Missing file: nothing to install, keep the current model.
            Err(_) => return false,
        };
        if self.last_mtime == Some(mtime) {
            return false;
        }
        self.last_mtime = Some(mtime);

        match MlpClassifier::load(&self.path.to_string_lossy()) {
            Ok(model) => {
                slot.install(Arc::new(model));
                info!("classifier: new model installed from {}", self.path.display());
                true
            }
            Err(e) => {
                warn!("classifier: replacement model rejected ({e}), keeping current");
                false
            }
        }
    }
}
