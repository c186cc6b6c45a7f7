//! # Excavation Geometry
//!
//! Width/depth resolution and volumetric geometry for trenches and bell
//! holes. Everything here is pure arithmetic on feet/inches; the labor and
//! material derivations live in [`super::excavation`].
//!
//! ## Cross-sections
//!
//! The shoring method sets the cross-section shape:
//!
//! - `sloped` - trapezoid; top width = bottom + 2 x depth x slope ratio
//! - `benched` - trapezoid approximation with a 0.5 x depth bench per side
//! - `none`/`shored` - rectangular prism
//!
//! ## Multi-depth runs
//!
//! A trench with varying cover is modeled as ordered [`DepthSegment`]s.
//! Each segment resolves its own excavation depth and width, then aggregate
//! dimensions are length-weighted averages (NOT simple averages - segments
//! may have unequal lengths). The accumulator reduction is kept explicit so
//! the weighting rule stays auditable.
//!
//! The weighted-average and non-standard shape-factor formulas are the
//! pragmatic approximations accepted in pipeline construction estimating.
//! Preserve them exactly.

use serde::{Deserialize, Serialize};

use crate::catalog::{ShoringType, SoilType};
use crate::units::{Feet, Inches};

/// Excavation topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcType {
    /// Linear trench run
    Trench,
    /// Localized pit for tie-ins, valves, or repairs
    BellHole,
}

impl Default for ExcType {
    fn default() -> Self {
        ExcType::Trench
    }
}

/// Bell hole footprint shape (ignored for trenches)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcShape {
    Square,
    Rectangle,
    /// Irregular footprint approximated from side lengths (5+ sides)
    NonStandard,
}

impl Default for ExcShape {
    fn default() -> Self {
        ExcShape::Rectangle
    }
}

/// Interpretation of a user-entered depth value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DepthMode {
    /// Depth is the full excavation depth
    Total,
    /// Depth is cover to top of pipe; pipe OD and under-pipe clearance added
    TopOfPipe,
    /// Depth is to pipe centerline; half OD and under-pipe clearance added
    Centerline,
}

impl DepthMode {
    /// Label shown next to the depth input
    pub fn display_name(&self) -> &'static str {
        match self {
            DepthMode::Total => "Total Depth",
            DepthMode::TopOfPipe => "Depth to Top of Pipe",
            DepthMode::Centerline => "Depth to Centerline",
        }
    }
}

impl Default for DepthMode {
    fn default() -> Self {
        DepthMode::Total
    }
}

/// One segment of a variable-depth run.
///
/// `width_ft` and `depth_ft` of 0 fall back to the whole-excavation values;
/// `use_auto_width` (trenches only) overrides the width from the pipe-OD
/// clearance table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSegment {
    pub length_ft: f64,
    pub depth_ft: f64,
    #[serde(default)]
    pub width_ft: f64,
    #[serde(default)]
    pub depth_mode: DepthMode,
    #[serde(default)]
    pub use_auto_width: bool,
}

/// One side of a non-standard bell hole footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NsSide {
    pub label: String,
    pub length_ft: f64,
}

/// Minimum code-compliant trench width (in) for a pipe OD (in).
///
/// Banded per the GDS trench width table: small pipe gets a fixed 12 in
/// trench, larger pipe gets OD plus a clearance band.
pub fn min_trench_width_in(pipe_od_in: f64) -> f64 {
    if pipe_od_in < 3.0 {
        12.0
    } else if pipe_od_in <= 16.0 {
        pipe_od_in + 12.0
    } else if pipe_od_in <= 34.0 {
        pipe_od_in + 18.0
    } else {
        pipe_od_in + 24.0
    }
}

/// Parse a soil slope ratio string ("H:V", e.g. "1.5:1") to a numeric
/// horizontal-per-vertical ratio.
///
/// "vertical" means vertical walls (ratio 0). Unparsable input falls back
/// to 1.5 rather than propagating an error.
pub fn parse_slope_ratio(ratio_str: &str) -> f64 {
    if ratio_str == "vertical" {
        return 0.0;
    }
    let parts: Vec<&str> = ratio_str.split(':').collect();
    if parts.len() == 2 {
        if let (Ok(horizontal), Ok(vertical)) =
            (parts[0].trim().parse::<f64>(), parts[1].trim().parse::<f64>())
        {
            if vertical != 0.0 {
                return horizontal / vertical;
            }
        }
    }
    1.5
}

/// Convert a user-entered reference depth to canonical total excavation
/// depth (ft).
pub fn resolve_excavation_depth(
    raw_depth_ft: f64,
    mode: DepthMode,
    pipe_od_ft: f64,
    clearance_under_ft: f64,
) -> f64 {
    match mode {
        DepthMode::Total => raw_depth_ft,
        DepthMode::TopOfPipe => raw_depth_ft + pipe_od_ft + clearance_under_ft,
        DepthMode::Centerline => raw_depth_ft + pipe_od_ft / 2.0 + clearance_under_ft,
    }
}

/// Cross-section profile: shoring method plus the parsed soil slope ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionProfile {
    pub shoring: ShoringType,
    pub slope_ratio: f64,
}

impl SectionProfile {
    pub fn new(shoring: ShoringType, slope_ratio: f64) -> Self {
        Self { shoring, slope_ratio }
    }

    /// Build a profile from the soil's allowable slope string
    pub fn for_soil(shoring: ShoringType, soil: SoilType) -> Self {
        Self::new(shoring, parse_slope_ratio(soil.properties().slope_ratio))
    }

    /// Width of the cut at grade (ft) for a given bottom width and depth
    pub fn top_width_ft(&self, bottom_width_ft: f64, depth_ft: f64) -> f64 {
        match self.shoring {
            ShoringType::Sloped => bottom_width_ft + 2.0 * depth_ft * self.slope_ratio,
            // 0.5 x depth bench per side
            ShoringType::Benched => bottom_width_ft + depth_ft,
            ShoringType::None | ShoringType::Shored => bottom_width_ft,
        }
    }

    /// Bank volume (CF) of a prismatic run with this cross-section.
    ///
    /// Trapezoidal average-width formula; for vertical-wall sections the
    /// top width equals the bottom width and this reduces to the prism.
    pub fn bank_volume_cf(&self, length_ft: f64, bottom_width_ft: f64, depth_ft: f64) -> f64 {
        let top_width_ft = self.top_width_ft(bottom_width_ft, depth_ft);
        let avg_width_ft = (bottom_width_ft + top_width_ft) / 2.0;
        length_ft * avg_width_ft * depth_ft
    }
}

/// Geometry totals for one excavation, in the units volume math wants.
///
/// `effective_*` are the dimensions actually used - length-weighted
/// averages for multi-depth runs, the plain inputs otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometrySummary {
    pub bank_vol_cf: f64,
    pub surface_area_sf: f64,
    pub floor_area_sf: f64,
    pub perimeter_ft: f64,
    pub effective_length_ft: f64,
    pub effective_width_ft: f64,
    pub effective_depth_ft: f64,
}

/// Single-depth trench run.
pub fn trench_geometry(
    length_ft: f64,
    width_ft: f64,
    depth_ft: f64,
    profile: &SectionProfile,
) -> GeometrySummary {
    let top_width_ft = profile.top_width_ft(width_ft, depth_ft);
    GeometrySummary {
        bank_vol_cf: profile.bank_volume_cf(length_ft, width_ft, depth_ft),
        surface_area_sf: length_ft * top_width_ft,
        floor_area_sf: length_ft * width_ft,
        perimeter_ft: 2.0 * (length_ft + width_ft),
        effective_length_ft: length_ft,
        effective_width_ft: width_ft,
        effective_depth_ft: depth_ft,
    }
}

/// Single-depth bell hole.
///
/// Bell holes are sized by footprint; the cut is taken as a vertical-wall
/// prism regardless of shoring method. The non-standard shape approximates
/// an irregular footprint as (sum of side lengths) x average width x 0.25,
/// an empirical shape factor.
pub fn bell_hole_geometry(
    shape: ExcShape,
    length_ft: f64,
    width_ft: f64,
    depth_ft: f64,
    ns_sides: &[NsSide],
) -> GeometrySummary {
    match shape {
        ExcShape::Square => GeometrySummary {
            bank_vol_cf: length_ft * length_ft * depth_ft,
            surface_area_sf: length_ft * length_ft,
            floor_area_sf: length_ft * length_ft,
            perimeter_ft: 4.0 * length_ft,
            effective_length_ft: length_ft,
            effective_width_ft: length_ft,
            effective_depth_ft: depth_ft,
        },
        ExcShape::Rectangle => GeometrySummary {
            bank_vol_cf: length_ft * width_ft * depth_ft,
            surface_area_sf: length_ft * width_ft,
            floor_area_sf: length_ft * width_ft,
            perimeter_ft: 2.0 * (length_ft + width_ft),
            effective_length_ft: length_ft,
            effective_width_ft: width_ft,
            effective_depth_ft: depth_ft,
        },
        ExcShape::NonStandard => {
            let total_perim_ft: f64 = ns_sides
                .iter()
                .map(|side| if side.length_ft > 0.0 { side.length_ft } else { 0.0 })
                .sum();
            let approx_area_sf = total_perim_ft * width_ft * 0.25;
            GeometrySummary {
                bank_vol_cf: approx_area_sf * depth_ft,
                surface_area_sf: approx_area_sf,
                floor_area_sf: approx_area_sf,
                perimeter_ft: total_perim_ft,
                effective_length_ft: length_ft,
                effective_width_ft: width_ft,
                effective_depth_ft: depth_ft,
            }
        }
    }
}

/// Whole-excavation context the segment loop resolves against.
#[derive(Debug, Clone, Copy)]
pub struct SegmentContext {
    /// Pipe OD (ft), for per-segment depth-mode resolution
    pub pipe_od_ft: f64,
    /// Clearance under pipe (ft), for per-segment depth-mode resolution
    pub clearance_under_ft: f64,
    /// Auto width from the pipe-OD table (ft); segment width fallback
    pub auto_width_ft: f64,
    /// Whole-excavation raw depth input (ft); segment depth fallback
    pub whole_depth_ft: f64,
    /// Whole-excavation width (ft); effective-width fallback for empty runs
    pub whole_width_ft: f64,
    /// Whole-excavation resolved depth (ft); effective-depth fallback
    pub resolved_depth_ft: f64,
    /// Trench runs allow per-segment auto width
    pub is_trench: bool,
}

/// Resolve one segment's excavation depth (ft).
///
/// A zero/negative segment depth falls back to the whole-excavation raw
/// depth; the segment's own depth mode then applies.
fn segment_excavation_depth(seg: &DepthSegment, ctx: &SegmentContext) -> f64 {
    let raw_depth_ft = if seg.depth_ft > 0.0 {
        seg.depth_ft
    } else {
        ctx.whole_depth_ft
    };
    resolve_excavation_depth(raw_depth_ft, seg.depth_mode, ctx.pipe_od_ft, ctx.clearance_under_ft)
}

/// Resolve one segment's bottom width (ft), falling back to auto width.
fn segment_width(seg: &DepthSegment, ctx: &SegmentContext) -> f64 {
    if ctx.is_trench && seg.use_auto_width {
        return ctx.auto_width_ft;
    }
    if seg.width_ft > 0.0 {
        seg.width_ft
    } else {
        ctx.auto_width_ft
    }
}

/// Multi-depth run: accumulate per-segment volumes and length-weighted
/// effective dimensions.
///
/// Works for both trenches and bell holes. Zero and negative segment
/// lengths contribute nothing but do not abort the aggregate.
pub fn multi_depth_geometry(
    segments: &[DepthSegment],
    profile: &SectionProfile,
    ctx: &SegmentContext,
) -> GeometrySummary {
    let mut bank_vol_cf = 0.0;
    let mut surface_area_sf = 0.0;
    let mut floor_area_sf = 0.0;
    let mut total_length_ft = 0.0;
    // Accumulators for weighted averages
    let mut sum_len_width = 0.0;
    let mut sum_len_depth = 0.0;

    for seg in segments {
        let seg_len = if seg.length_ft > 0.0 { seg.length_ft } else { 0.0 };
        let seg_depth = segment_excavation_depth(seg, ctx);
        let seg_width = segment_width(seg, ctx);

        bank_vol_cf += profile.bank_volume_cf(seg_len, seg_width, seg_depth);
        surface_area_sf += seg_len * profile.top_width_ft(seg_width, seg_depth);
        // Floor area (bottom of excavation, for pipe zone calcs)
        floor_area_sf += seg_len * seg_width;

        total_length_ft += seg_len;
        sum_len_width += seg_len * seg_width;
        sum_len_depth += seg_len * seg_depth;
    }

    let effective_width_ft = if total_length_ft > 0.0 {
        sum_len_width / total_length_ft
    } else {
        ctx.whole_width_ft
    };
    let effective_depth_ft = if total_length_ft > 0.0 {
        sum_len_depth / total_length_ft
    } else {
        ctx.resolved_depth_ft
    };

    GeometrySummary {
        bank_vol_cf,
        surface_area_sf,
        floor_area_sf,
        // Weighted-average width stands in for the varying plan width
        perimeter_ft: 2.0 * (total_length_ft + effective_width_ft),
        effective_length_ft: total_length_ft,
        effective_width_ft,
        effective_depth_ft,
    }
}

/// Auto trench width (ft) for a pipe OD (in), via the clearance table.
pub fn auto_width_ft(pipe_od_in: f64) -> f64 {
    Feet::from(Inches(min_trench_width_in(pipe_od_in))).value()
}
