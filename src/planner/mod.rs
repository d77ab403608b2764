//! Test plan generation.
//!
//! Loads package names from description files, applies per-plan
//! include/exclude directive chains and serializes each resulting selection
//! to a plan file. Description generation runs first on a small worker pool
//! and any failure there halts plan generation entirely.

pub mod builder;
pub mod catalog;
pub mod descriptions;
pub mod error;
pub mod plan;
pub mod pool;
pub mod writer;

pub use builder::PlanBuilder;
pub use catalog::{plan_catalog, PlanSpec, FLAKY_TESTS, MEDIUM_TESTS, SMALL_TESTS, VETTED_NEW_PACKAGES};
pub use descriptions::discover_package_names;
pub use error::PlanError;
pub use plan::{Directive, Selection, TestPlan};
pub use pool::{run_generation_tasks, GenerationTask, GENERATION_WORKERS};
pub use writer::{serialize_plan, write_plan};
