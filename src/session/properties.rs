use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Rational value as reported by device property bags
/// (e.g. the AE compensation step, typically 1/2 or 1/3 stop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rational {
    pub numerator: i32,
    pub denominator: i32,
}

impl Rational {
    pub fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

/// Device capabilities the validators gate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    ManualSensor,
    ManualPostProcessing,
    PerFrameControl,
    EvCompensation,
}

/// Capability/config bag retrieved once per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraProperties {
    pub capabilities: BTreeSet<Capability>,
    /// Inclusive `[min, max]` AE compensation range, in steps.
    pub ae_compensation_range: (i32, i32),
    /// EV worth of a single compensation step.
    pub ae_compensation_step: Rational,
}

impl CameraProperties {
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// First capability from `required` that the device lacks, if any.
    pub fn missing_capability(&self, required: &[Capability]) -> Option<Capability> {
        required.iter().copied().find(|c| !self.supports(*c))
    }
}
