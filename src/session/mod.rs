//! Device-session seam for camera compliance checks.
//!
//! The real capture protocol (3A convergence, capture requests, property
//! retrieval) lives behind [`CameraSession`]; validators only drive the
//! trait. `testing::SyntheticSession` provides an offline implementation.

pub mod errors;
pub mod properties;
pub mod request;

pub use errors::{SessionError, SessionErrorKind};
pub use properties::{CameraProperties, Capability, Rational};
pub use request::{CaptureRequest, ConvergeSettings, LumaPlane, TonemapCurve};

/// One device capture session.
///
/// Every method is a blocking round-trip to the device. Implementations are
/// expected to keep capture settings stable across calls except for what the
/// request itself carries.
pub trait CameraSession {
    /// Retrieve the capability/config bag, once per run.
    fn properties(&mut self) -> Result<CameraProperties, SessionError>;

    /// Re-converge 3A with the given settings.
    fn converge(&mut self, settings: &ConvergeSettings) -> Result<(), SessionError>;

    /// Issue a single capture request and return the luma plane of the shot.
    fn capture(&mut self, request: &CaptureRequest) -> Result<LumaPlane, SessionError>;
}
