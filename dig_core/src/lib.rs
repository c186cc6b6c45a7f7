//! # dig_core - Pipeline Excavation Estimating Engine
//!
//! `dig_core` is the computational heart of Digline, turning trench and
//! bell-hole parameters into volumes, material quantities, and labor-hour
//! estimates across three project phases (excavation, shoring, backfill).
//! All inputs and outputs are JSON-serializable, making it easy to drive
//! from any front end.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: one pure function from input to results
//! - **Total**: the engine never fails - bad input degrades to clamped zeros
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rounding at the boundary**: full precision internally, display
//!   rounding only in the result record
//!
//! ## Quick Start
//!
//! ```rust
//! use dig_core::calculations::{calculate, ExcavationInput};
//!
//! let mut input = ExcavationInput::default();
//! input.length_ft = 20.0;
//! input.width_ft = 2.0;
//! input.depth_ft = 5.0;
//!
//! let result = calculate(&input);
//! println!("Bank volume: {} CY over {} field hours",
//!     result.bank_vol_cy, result.total_field_hrs);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - the estimating engine (geometry, excavation, spoils)
//! - [`catalog`] - static reference data (soils, surfaces, machines, shoring)
//! - [`project`] - project container, metadata, and estimator settings
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types
//! - [`file_io`] - file operations with atomic saves and locking

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod file_io;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, ExcavationInput, ExcavationResult};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use project::{EstimatorSettings, Project, ProjectMetadata};
