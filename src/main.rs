//! Tracker binary: wire the adapters together and run the loop.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, bail};
use log::{info, warn};

use heliotrack::adapters::{CsvSampleLog, HardwareAdapter, LogEventSink, SystemClock};
use heliotrack::app::ports::{ActuatorPort, ClassifierPort};
use heliotrack::app::{LoopState, TrackerService};
use heliotrack::config::TrackerConfig;
use heliotrack::drivers::hal;
use heliotrack::inference::mlp::MlpClassifier;
use heliotrack::inference::reload::ModelWatcher;
use heliotrack::inference::{ClassifierSlot, UniformClassifier};
use heliotrack::shutdown;

const DEFAULT_CONFIG_PATH: &str = "heliotrack.json";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("heliotrack v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    hal::init_peripherals().context("peripheral init failed")?;

    ctrlc::set_handler(|| {
        shutdown::request_shutdown();
    })
    .context("signal handler install failed")?;

    let initial: Arc<dyn ClassifierPort + Send + Sync> =
        match MlpClassifier::load(&config.model_path) {
            Ok(model) => {
                info!("classifier: model loaded from {}", config.model_path);
                Arc::new(model)
            }
            Err(e) => {
                warn!("classifier: {e}; starting with the uniform fallback");
                Arc::new(UniformClassifier)
            }
        };
    let slot = ClassifierSlot::new(initial);
    let mut watcher = ModelWatcher::new(&config.model_path, config.model_reload_check_secs);

    let mut hw = HardwareAdapter::new();
    let mut sample_log =
        CsvSampleLog::open(&config.sample_log_path).context("sample log open failed")?;
    let mut sink = LogEventSink;
    let clock = SystemClock;

    let mut service = TrackerService::new(&config);
    service.start(&mut sink);

    let period = Duration::from_millis(u64::from(config.control_loop_interval_ms));
    while !shutdown::shutdown_requested() {
        watcher.poll(&slot);
        let classifier = slot.current();

        let state = service.tick(&mut hw, &*classifier, &mut sample_log, &clock, &mut sink);
        if let LoopState::Halted(reason) = state {
            bail!("control loop halted: {reason:?}");
        }

        thread::sleep(period);
    }

    info!("shutdown requested, de-energising the motor");
    hw.all_off();
    Ok(())
}

/// Load the config file named on the command line (or the default path).
/// A missing default file falls back to built-in defaults; an explicit
/// path that fails to load is an error.
fn load_config() -> anyhow::Result<TrackerConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let config = TrackerConfig::load(&path)
                .with_context(|| format!("config load failed: {path}"))?;
            info!("config loaded from {path}");
            Ok(config)
        }
        None => match TrackerConfig::load(DEFAULT_CONFIG_PATH) {
            Ok(config) => {
                info!("config loaded from {DEFAULT_CONFIG_PATH}");
                Ok(config)
            }
            Err(_) => {
                info!("no config file, using defaults");
                Ok(TrackerConfig::default())
            }
        },
    }
}
