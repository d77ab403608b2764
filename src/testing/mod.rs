//! Testing utilities - synthetic device sessions for offline testing.

pub mod synthetic_session;

pub use synthetic_session::SyntheticSession;
