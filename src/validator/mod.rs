//! EV compensation validator
//!
//! Sweeps the device's AE compensation range, captures one shot per setting
//! and checks measured patch brightness against the modeled exponential
//! curve. Capability gaps skip the check; a deviation past the threshold
//! fails it.

pub mod model;
pub mod plot;

use crate::config::ValidatorConfig;
use crate::errors::SuiteError;
use crate::session::{CameraSession, CaptureRequest, Capability, ConvergeSettings};
use serde::Serialize;
use std::path::PathBuf;

pub use model::{deviation_stats, enumerate_ev_steps, expected_lumas};

/// Name used for log lines and the diagnostic plot file.
pub const EV_COMPENSATION_TEST_NAME: &str = "ev_compensation";

const REQUIRED_CAPABILITIES: [Capability; 4] = [
    Capability::ManualSensor,
    Capability::ManualPostProcessing,
    Capability::PerFrameControl,
    Capability::EvCompensation,
];

/// Outcome of one validator run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Passed(DeviationReport),
    Failed(DeviationReport),
    Skipped { reason: String },
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Passed(_))
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Verdict::Skipped { .. })
    }
}

/// Measured-vs-modeled deviation summary for the full sweep.
#[derive(Debug, Clone, Serialize)]
pub struct DeviationReport {
    pub evs: Vec<i32>,
    pub measured: Vec<f64>,
    pub expected: Vec<f64>,
    pub max_delta: f64,
    pub avg_delta: f64,
    pub threshold: f64,
}

pub struct EvCompensationValidator {
    config: ValidatorConfig,
}

impl EvCompensationValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Run the sweep against `session`.
    ///
    /// Returns `Verdict::Skipped` when a required capability is absent and
    /// propagates session failures; there is no capture retry.
    pub fn run<S: CameraSession>(&self, session: &mut S) -> Result<Verdict, SuiteError> {
        let props = session.properties()?;

        if let Some(missing) = props.missing_capability(&REQUIRED_CAPABILITIES) {
            let reason = format!("device lacks required capability {missing:?}");
            log::info!("{EV_COMPENSATION_TEST_NAME}: skipped, {reason}");
            return Ok(Verdict::Skipped { reason });
        }

        let (range_min, range_max) = props.ae_compensation_range;
        let ev_per_step = props.ae_compensation_step.to_f64();
        let evs = model::enumerate_ev_steps(range_min, range_max, ev_per_step)?;
        log::info!(
            "{EV_COMPENSATION_TEST_NAME}: sweeping {} settings in [{range_min}, {range_max}], \
             {ev_per_step} EV per step",
            evs.len()
        );

        let mut measured = Vec::with_capacity(evs.len());
        for &ev in &evs {
            // Re-converge 3A and lock AE once converged; AF is skipped since
            // a dark or bright scene can fail AF and sharpness is irrelevant.
            session.converge(&ConvergeSettings::locked_ae(ev))?;

            // Single shot with the same EV, locked AE and a linear tone curve
            // so tone mapping does not skew measured brightness.
            let request = CaptureRequest::linear_locked(ev);
            let plane = session.capture(&request)?;
            let mean = plane.patch_mean(
                self.config.patch_x,
                self.config.patch_y,
                self.config.patch_w,
                self.config.patch_h,
            );
            log::debug!("{EV_COMPENSATION_TEST_NAME}: ev {ev} -> patch mean {mean:.5}");
            measured.push(mean);
        }

        let expected = model::expected_lumas(&measured, ev_per_step);
        let stats = model::deviation_stats(&expected, &measured);
        log::info!(
            "{EV_COMPENSATION_TEST_NAME}: max delta {:.5}, avg delta {:.5}",
            stats.max_abs,
            stats.avg_abs
        );

        if self.config.plot_enabled {
            // Diagnostic only; a plot failure never changes the verdict.
            if let Err(e) = plot::save_means_plot(&self.plot_path(), &evs, &measured, &expected) {
                log::warn!("{EV_COMPENSATION_TEST_NAME}: could not write plot: {e}");
            }
        }

        let report = DeviationReport {
            evs,
            measured,
            expected,
            max_delta: stats.max_abs,
            avg_delta: stats.avg_abs,
            threshold: self.config.max_luma_delta,
        };

        if report.max_delta >= self.config.max_luma_delta {
            Ok(Verdict::Failed(report))
        } else {
            Ok(Verdict::Passed(report))
        }
    }

    fn plot_path(&self) -> PathBuf {
        PathBuf::from(&self.config.plot_directory)
            .join(format!("{EV_COMPENSATION_TEST_NAME}_plot_means.png"))
    }
}
