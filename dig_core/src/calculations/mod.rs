//! # Estimate Calculations
//!
//! This module contains the excavation estimating engine. The calculation
//! follows the pattern:
//!
//! - `ExcavationInput` - input parameters (JSON-serializable)
//! - `ExcavationResult` - calculation results (JSON-serializable)
//! - `calculate(&input) -> ExcavationResult` - pure, total calculation function
//!
//! ## Stages
//!
//! - [`geometry`] - width/depth resolution and volumetric geometry
//! - [`excavation`] - the orchestrating estimate (materials, time, labor)
//! - [`spoils`] - native material disposition and truck logistics
//!
//! ## Rounding discipline
//!
//! All intermediate arithmetic runs in full precision. The display rounding
//! helpers here ([`round1`], [`round2`]) are applied only when the final
//! result record is populated, so chained stages never compound rounding
//! error.

pub mod excavation;
pub mod geometry;
pub mod spoils;

// Re-export commonly used types
pub use excavation::{calculate, CongestionItem, ExcavationInput, ExcavationResult};
pub use geometry::{DepthMode, DepthSegment, ExcShape, ExcType, NsSide};
pub use spoils::{plan_spoils, SpoilsAction, SpoilsPlan};

use crate::units::{CuFt, CuYd};

/// Round to 2 decimal places (volumes, ratios, feet)
pub fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Round to 1 decimal place (hours, areas)
pub fn round1(n: f64) -> f64 {
    (n * 10.0).round() / 10.0
}

/// Cubic feet to cubic yards
pub fn cf_to_cy(cf: f64) -> f64 {
    CuYd::from(CuFt(cf)).value()
}
