//! Deterministic camera session for offline testing.
//!
//! Captured frames are flat luma planes whose brightness follows the
//! exponential EV model exactly: one doubling per `1/ev_per_step`
//! compensation steps, anchored at the bottom of the range. Per-EV offsets
//! can be injected to simulate devices that miss the curve.

use crate::session::{
    CameraProperties, CameraSession, Capability, CaptureRequest, ConvergeSettings, LumaPlane,
    Rational, SessionError,
};
use std::collections::BTreeMap;

pub struct SyntheticSession {
    properties: CameraProperties,
    base_luma: f64,
    width: u32,
    height: u32,
    luma_offsets: BTreeMap<i32, f64>,
    last_converge: Option<ConvergeSettings>,
    pub converge_log: Vec<ConvergeSettings>,
    pub capture_log: Vec<CaptureRequest>,
}

impl SyntheticSession {
    /// Full-capability session over `[-4, 4]` at 1/2 EV per step.
    pub fn new() -> Self {
        Self {
            properties: CameraProperties {
                capabilities: [
                    Capability::ManualSensor,
                    Capability::ManualPostProcessing,
                    Capability::PerFrameControl,
                    Capability::EvCompensation,
                ]
                .into_iter()
                .collect(),
                ae_compensation_range: (-4, 4),
                ae_compensation_step: Rational::new(1, 2),
            },
            base_luma: 0.1,
            width: 640,
            height: 480,
            luma_offsets: BTreeMap::new(),
            last_converge: None,
            converge_log: Vec::new(),
            capture_log: Vec::new(),
        }
    }

    /// Session whose sweep lumas are exactly representable in f32: whole-stop
    /// steps and a power-of-two base, so the model reproduces the
    /// measurements bit for bit.
    pub fn exact() -> Self {
        let mut session = Self::new();
        session.properties.ae_compensation_range = (-3, 3);
        session.properties.ae_compensation_step = Rational::new(1, 1);
        session.base_luma = 1.0 / 128.0;
        session
    }

    pub fn with_range(mut self, min: i32, max: i32, step: Rational) -> Self {
        self.properties.ae_compensation_range = (min, max);
        self.properties.ae_compensation_step = step;
        self
    }

    pub fn with_base_luma(mut self, base_luma: f64) -> Self {
        self.base_luma = base_luma;
        self
    }

    /// Shift the captured luma at one EV setting, e.g. to push a single
    /// sweep sample past the deviation threshold.
    pub fn with_luma_offset(mut self, ev: i32, offset: f64) -> Self {
        self.luma_offsets.insert(ev, offset);
        self
    }

    pub fn without_capability(mut self, capability: Capability) -> Self {
        self.properties.capabilities.remove(&capability);
        self
    }

    /// Modeled luma for an EV setting, before any injected offset.
    pub fn model_luma(&self, ev: i32) -> f64 {
        let (range_min, _) = self.properties.ae_compensation_range;
        let ev_per_step = self.properties.ae_compensation_step.to_f64();
        let stride = ((1.0 / ev_per_step).floor() as i32).max(1);
        let gain = 2f64.powf(ev_per_step);
        let index = ev - range_min;
        if index % stride == 0 {
            // Sweep-aligned settings stay exact so whole-stop sweeps
            // reproduce the model bit for bit.
            self.base_luma * gain.powi(index / stride)
        } else {
            self.base_luma * gain.powf(f64::from(index) / f64::from(stride))
        }
    }

    fn captured_luma(&self, ev: i32) -> f64 {
        let offset = self.luma_offsets.get(&ev).copied().unwrap_or(0.0);
        (self.model_luma(ev) + offset).clamp(0.0, 1.0)
    }
}

impl Default for SyntheticSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSession for SyntheticSession {
    fn properties(&mut self) -> Result<CameraProperties, SessionError> {
        Ok(self.properties.clone())
    }

    fn converge(&mut self, settings: &ConvergeSettings) -> Result<(), SessionError> {
        let (min, max) = self.properties.ae_compensation_range;
        if settings.ev_comp < min || settings.ev_comp > max {
            return Err(SessionError::invalid_argument(format!(
                "ev_comp {} outside [{min}, {max}]",
                settings.ev_comp
            )));
        }
        self.last_converge = Some(*settings);
        self.converge_log.push(*settings);
        Ok(())
    }

    fn capture(&mut self, request: &CaptureRequest) -> Result<LumaPlane, SessionError> {
        // AE must have been converged and locked at this EV first.
        match self.last_converge {
            Some(settings) if settings.ev_comp == request.ev_comp && settings.lock_ae => {}
            _ => {
                return Err(SessionError::invalid_argument(
                    "capture without a matching locked-AE convergence",
                ))
            }
        }

        self.capture_log.push(request.clone());
        let luma = self.captured_luma(request.ev_comp) as f32;
        Ok(LumaPlane::flat(self.width, self.height, luma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_doubles_per_stop() {
        let session = SyntheticSession::exact();
        assert_eq!(session.model_luma(-3), 1.0 / 128.0);
        assert_eq!(session.model_luma(-2), 2.0 / 128.0);
        assert_eq!(session.model_luma(3), 64.0 / 128.0);
    }

    #[test]
    fn test_capture_requires_converged_locked_ae() {
        let mut session = SyntheticSession::new();
        let err = session.capture(&CaptureRequest::linear_locked(0)).unwrap_err();
        assert_eq!(err.kind, crate::session::SessionErrorKind::InvalidArgument);

        session.converge(&ConvergeSettings::locked_ae(0)).unwrap();
        assert!(session.capture(&CaptureRequest::linear_locked(0)).is_ok());
    }

    #[test]
    fn test_offset_shifts_one_setting_only() {
        let mut session = SyntheticSession::exact().with_luma_offset(0, 0.05);
        session.converge(&ConvergeSettings::locked_ae(0)).unwrap();
        let plane = session.capture(&CaptureRequest::linear_locked(0)).unwrap();
        let expected = session.model_luma(0) + 0.05;
        assert!((f64::from(plane.data[0]) - expected).abs() < 1e-6);

        session.converge(&ConvergeSettings::locked_ae(1)).unwrap();
        let plane = session.capture(&CaptureRequest::linear_locked(1)).unwrap();
        assert_eq!(f64::from(plane.data[0]), session.model_luma(1));
    }
}
