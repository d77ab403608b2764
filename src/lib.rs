//! camcert: camera compliance test tooling
//!
//! Two utilities behind one crate:
//! - an EV compensation validator that sweeps a camera's AE compensation
//!   range and checks measured brightness against the modeled exponential
//!   curve;
//! - a test plan generator that loads package names from description files
//!   and materializes a fixed catalog of include/exclude plans as XML.
//!
//! # Usage
//! ```rust
//! use camcert::testing::SyntheticSession;
//! use camcert::validator::EvCompensationValidator;
//! use camcert::CamcertConfig;
//!
//! let mut config = CamcertConfig::default().validator;
//! config.plot_enabled = false;
//! let mut session = SyntheticSession::exact();
//! let verdict = EvCompensationValidator::new(config)
//!     .run(&mut session)
//!     .expect("sweep should complete");
//! assert!(verdict.is_pass());
//! ```
pub mod config;
pub mod errors;
pub mod planner;
pub mod session;
pub mod validator;

// Testing utilities - synthetic sessions for offline testing
pub mod testing;

// Re-exports for convenience
pub use config::{CamcertConfig, PlannerConfig, ValidatorConfig};
pub use errors::SuiteError;
pub use planner::{PlanBuilder, PlanError, TestPlan};
pub use session::{CameraProperties, CameraSession, Capability, SessionError};
pub use validator::{DeviationReport, EvCompensationValidator, Verdict};

/// Initialize logging for the compliance tooling
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "camcert=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
