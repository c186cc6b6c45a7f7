//! # Excavation Estimate Calculation
//!
//! The estimating engine: one pure function from an [`ExcavationInput`] to
//! an [`ExcavationResult`]. Stages run in order - geometry, hand-dig
//! fraction, pipe-zone materials, dig/surface/shoring/compaction time,
//! spoils logistics, congestion, phase subtotals, crew rollups.
//!
//! ## Design
//!
//! - **Total function**: `calculate` never fails. Zero rates skip their
//!   divisions, malformed slope ratios fall back, and negative material
//!   quantities clamp to zero. [`ExcavationInput::validate`] exists for the
//!   form layer but `calculate` does not call it.
//! - **Rounding at the boundary**: every stage works in full precision;
//!   display rounding (2 decimals for volumes/ratios, 1 for hours/areas)
//!   happens only when the result record is populated.
//!
//! ## Example
//!
//! ```rust
//! use dig_core::calculations::excavation::{calculate, ExcavationInput};
//!
//! let mut input = ExcavationInput::default();
//! input.label = "Main St tie-in".to_string();
//! input.length_ft = 20.0;
//! input.width_ft = 2.0;
//! input.depth_ft = 5.0;
//!
//! let result = calculate(&input);
//! assert!(result.bank_vol_cy > 0.0);
//! assert!(result.total_field_hrs > 0.0);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::catalog::{ExcavatorSize, LocationType, ShoringType, SoilType, SurfaceType, TruckSize};
use crate::errors::{CalcError, CalcResult};
use crate::project::EstimatorSettings;
use crate::units::{Feet, Inches, SqFt, SqIn};

use super::geometry::{
    self, DepthMode, DepthSegment, ExcShape, ExcType, NsSide, SectionProfile, SegmentContext,
};
use super::spoils::{plan_spoils, SpoilsAction};
use super::{cf_to_cy, round1, round2};

/// A utility conflict crossing the excavation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CongestionItem {
    /// What is in the way (e.g., "gas service", "telecom duct")
    #[serde(rename = "type")]
    pub kind: String,
    pub length_ft: f64,
    pub depth_ft: f64,
}

/// Input parameters for one excavation estimate.
///
/// All dimensions are feet except pipe OD and clearances, which follow
/// field convention in inches.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "8th Ave main replacement",
///   "exc_type": "trench",
///   "surface_type": "asphalt",
///   "location_type": "city",
///   "soil_type": "type_b",
///   "shoring_type": "none",
///   "exc_shape": "rectangle",
///   "pipe_od_in": 6.0,
///   "length_ft": 20.0,
///   "width_ft": 2.0,
///   "depth_ft": 5.0,
///   "depth_mode": "total",
///   "use_auto_width": false,
///   "multi_depth": false,
///   "has_congestion": false,
///   "excavator_size": "medium",
///   "truck_size": "14cy",
///   "spoils_action": "offhaul",
///   "hand_dig_override": false,
///   "hand_dig_pct_manual": 0.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcavationInput {
    /// User label for this estimate (e.g., "B-12 bell hole")
    #[serde(default)]
    pub label: String,

    /// Excavation topology
    pub exc_type: ExcType,

    /// Existing surface over the dig
    pub surface_type: SurfaceType,

    /// Job location class (informational; not read by the formulas)
    pub location_type: LocationType,

    /// Native soil classification
    pub soil_type: SoilType,

    /// Wall support method
    pub shoring_type: ShoringType,

    /// Bell hole footprint shape (ignored for trenches)
    pub exc_shape: ExcShape,

    /// Pipe outer diameter (in); drives auto width and pipe zone sizing
    pub pipe_od_in: f64,

    /// Run length / footprint length (ft)
    pub length_ft: f64,

    /// Bottom width (ft); ignored when auto width is active on a trench
    pub width_ft: f64,

    /// Depth input (ft), interpreted per `depth_mode`
    pub depth_ft: f64,

    /// How `depth_ft` is interpreted
    #[serde(default)]
    pub depth_mode: DepthMode,

    /// Derive trench width from pipe OD via the clearance table
    #[serde(default)]
    pub use_auto_width: bool,

    /// Drive geometry from `depth_segments` instead of the single triple
    #[serde(default)]
    pub multi_depth: bool,

    /// Ordered variable-depth segments (when `multi_depth`)
    #[serde(default)]
    pub depth_segments: Vec<DepthSegment>,

    /// Footprint sides for non-standard bell holes
    #[serde(default)]
    pub ns_sides: Vec<NsSide>,

    /// Whether utility conflicts are present
    #[serde(default)]
    pub has_congestion: bool,

    /// The conflicts themselves; each adds a dig-time penalty
    #[serde(default)]
    pub congestion_items: Vec<CongestionItem>,

    /// Excavator on the job
    pub excavator_size: ExcavatorSize,

    /// Haul truck for offhaul
    pub truck_size: TruckSize,

    /// Native spoils disposition policy
    pub spoils_action: SpoilsAction,

    /// Substitute `hand_dig_pct_manual` for the computed percentage
    #[serde(default)]
    pub hand_dig_override: bool,

    /// Manual hand-dig percentage (0-100), used when overridden
    #[serde(default)]
    pub hand_dig_pct_manual: f64,

    /// Rate/clearance/crew constants for this estimate
    #[serde(default)]
    pub settings: EstimatorSettings,
}

impl Default for ExcavationInput {
    fn default() -> Self {
        ExcavationInput {
            label: String::new(),
            exc_type: ExcType::Trench,
            surface_type: SurfaceType::default(),
            location_type: LocationType::default(),
            soil_type: SoilType::default(),
            shoring_type: ShoringType::default(),
            exc_shape: ExcShape::default(),
            pipe_od_in: 6.0,
            length_ft: 20.0,
            width_ft: 2.0,
            depth_ft: 5.0,
            depth_mode: DepthMode::Total,
            use_auto_width: false,
            multi_depth: false,
            depth_segments: Vec::new(),
            ns_sides: Vec::new(),
            has_congestion: false,
            congestion_items: Vec::new(),
            excavator_size: ExcavatorSize::default(),
            truck_size: TruckSize::default(),
            spoils_action: SpoilsAction::default(),
            hand_dig_override: false,
            hand_dig_pct_manual: 0.0,
            settings: EstimatorSettings::default(),
        }
    }
}

impl ExcavationInput {
    /// Validate input parameters for the form layer.
    ///
    /// The engine itself degrades gracefully on bad input; this is the
    /// stricter check a UI runs before accepting a field.
    pub fn validate(&self) -> CalcResult<()> {
        if self.pipe_od_in < 0.0 {
            return Err(CalcError::invalid_input(
                "pipe_od_in",
                self.pipe_od_in.to_string(),
                "Pipe OD cannot be negative",
            ));
        }
        if self.length_ft <= 0.0 && !(self.multi_depth && !self.depth_segments.is_empty()) {
            return Err(CalcError::invalid_input(
                "length_ft",
                self.length_ft.to_string(),
                "Length must be positive",
            ));
        }
        if self.depth_ft <= 0.0 && !(self.multi_depth && !self.depth_segments.is_empty()) {
            return Err(CalcError::invalid_input(
                "depth_ft",
                self.depth_ft.to_string(),
                "Depth must be positive",
            ));
        }
        if self.hand_dig_override
            && !(0.0..=100.0).contains(&self.hand_dig_pct_manual)
        {
            return Err(CalcError::invalid_input(
                "hand_dig_pct_manual",
                self.hand_dig_pct_manual.to_string(),
                "Hand dig percentage must be between 0 and 100",
            ));
        }
        Ok(())
    }
}

/// Results for one excavation estimate.
///
/// Every field is a pure function of the input. Volumes and ratios carry
/// 2 decimals, hours and areas 1 decimal; counts are integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcavationResult {
    // Volumes
    pub bank_vol_cy: f64,
    pub bank_vol_cf: f64,
    pub loose_vol_cy: f64,
    pub swell_factor: f64,
    pub load_factor: f64,
    pub surface_cut_cy: f64,
    pub surface_area_sf: f64,
    pub perimeter_ft: f64,

    // Depth
    pub depth_input_label: String,
    pub depth_input_ft: f64,
    pub computed_exc_depth_ft: f64,
    pub clearance_under_in: f64,

    // Pipe zone
    pub bedding_vol_cy: f64,
    pub shading_vol_cy: f64,
    pub pipe_zone_vol_cy: f64,
    pub bedding_depth_in: f64,
    pub pipe_zone_depth_ft: f64,

    // Backfill
    pub final_backfill_cy: f64,
    pub total_backfill_cy: f64,
    pub import_bedding_cy: f64,
    pub import_shading_cy: f64,
    pub import_final_cy: f64,

    // Time per activity
    pub hand_dig_hrs: f64,
    pub machine_dig_hrs: f64,
    pub total_exc_hrs: f64,
    pub saw_cut_time_hrs: f64,
    pub surface_removal_hrs: f64,
    pub shoring_install_hrs: f64,
    pub total_compaction_hrs: f64,
    pub compaction_test_hrs: f64,
    pub bedding_cure_hrs: f64,
    pub offhaul_time_hrs: f64,
    pub backfill_placement_hrs: f64,

    // Phase subtotals
    pub exc_phase_hrs: f64,
    pub shoring_phase_hrs: f64,
    pub backfill_phase_hrs: f64,

    pub total_field_hrs: f64,
    pub crew_days: u32,
    pub total_calendar_days: u32,

    // Crew / man-hours
    pub total_crew_on_site: u32,
    pub hand_digger_count: u32,
    pub total_man_hrs: f64,
    pub adjusted_man_hrs: f64,
    pub truck_driver_hrs: f64,

    // Hand dig
    pub calculated_hand_dig_pct: f64,
    pub active_hand_dig_pct: f64,
    pub hand_dig_area_sq_in: f64,

    // Spoils
    pub spoils_reuse_cy: f64,
    pub spoils_offhaul_cy: f64,
    pub offhaul_truck_loads: u32,

    // Shoring
    pub shoring_sf: f64,
    pub shoring_panels: u32,

    // Compaction
    pub num_lifts: u32,

    // Congestion
    pub congestion_time_factor: f64,
    pub congestion_notes: Vec<String>,

    // Dimensions used
    pub effective_length: f64,
    pub effective_width: f64,
    pub effective_depth: f64,
}

/// Hand-dig cross-section (sq-in): keyhole envelope around the pipe minus
/// the pipe itself.
///
/// The envelope is a semicircle of radius OD/2 + pipe clearance above the
/// centerline plus a rectangle down to the under-pipe clearance.
fn hand_dig_area_sq_in(pipe_od_in: f64, pipe_clearance_in: f64, clearance_under_in: f64) -> f64 {
    let buffer_r_in = pipe_od_in / 2.0 + pipe_clearance_in;
    let below_in = pipe_od_in / 2.0 + clearance_under_in;
    let keyhole_sq_in = PI * buffer_r_in * buffer_r_in / 2.0 + 2.0 * buffer_r_in * below_in;
    let pipe_sq_in = PI * (pipe_od_in / 2.0) * (pipe_od_in / 2.0);
    keyhole_sq_in - pipe_sq_in
}

/// Compute the full estimate.
///
/// Pure and total: identical input yields identical output, and no input
/// produces an error - physically meaningless inputs yield clamped zeros
/// rather than failures.
pub fn calculate(input: &ExcavationInput) -> ExcavationResult {
    let s = &input.settings;
    let soil = input.soil_type.properties();
    let surface = input.surface_type.properties();
    let exc = input.excavator_size.spec();
    let truck = input.truck_size.spec();
    let shoring = input.shoring_type.spec();

    let swell_factor = 1.0 + soil.swell_pct / 100.0;
    let eff = s.job_efficiency_pct / 100.0;
    let is_trench = input.exc_type == ExcType::Trench;

    // Width resolution
    let auto_width_ft = geometry::auto_width_ft(input.pipe_od_in);
    let effective_width_ft = if is_trench && input.use_auto_width {
        auto_width_ft
    } else {
        input.width_ft
    };

    // Depth resolution
    let clearance_under_ft = Feet::from(Inches(s.clearance_under_pipe_in)).value();
    let pipe_od_ft = Feet::from(Inches(input.pipe_od_in)).value();
    let computed_exc_depth_ft = geometry::resolve_excavation_depth(
        input.depth_ft,
        input.depth_mode,
        pipe_od_ft,
        clearance_under_ft,
    );

    // Geometry
    let profile = SectionProfile::for_soil(input.shoring_type, input.soil_type);
    let geo = if input.multi_depth && !input.depth_segments.is_empty() {
        let ctx = SegmentContext {
            pipe_od_ft,
            clearance_under_ft,
            auto_width_ft,
            whole_depth_ft: input.depth_ft,
            whole_width_ft: effective_width_ft,
            resolved_depth_ft: computed_exc_depth_ft,
            is_trench,
        };
        geometry::multi_depth_geometry(&input.depth_segments, &profile, &ctx)
    } else if is_trench {
        geometry::trench_geometry(
            input.length_ft,
            effective_width_ft,
            computed_exc_depth_ft,
            &profile,
        )
    } else {
        geometry::bell_hole_geometry(
            input.exc_shape,
            input.length_ft,
            effective_width_ft,
            computed_exc_depth_ft,
            &input.ns_sides,
        )
    };

    // Hand-dig fraction from the keyhole cross-section
    let hand_dig_area =
        hand_dig_area_sq_in(input.pipe_od_in, s.pipe_clearance_in, s.clearance_under_pipe_in);
    let hand_dig_vol_cf = SqFt::from(SqIn(hand_dig_area)).value() * geo.effective_length_ft;
    let calculated_hand_dig_pct = if geo.bank_vol_cf > 0.0 {
        ((hand_dig_vol_cf / geo.bank_vol_cf * 100.0).round()).min(100.0)
    } else {
        0.0
    };
    let active_hand_dig_pct = if input.hand_dig_override {
        input.hand_dig_pct_manual
    } else {
        calculated_hand_dig_pct
    };

    // Surface cut volume
    let surface_cut_cf = geo.surface_area_sf * Feet::from(Inches(surface.thickness_in)).value();
    let surface_cut_cy = cf_to_cy(surface_cut_cf);

    let bank_vol_cy = cf_to_cy(geo.bank_vol_cf);
    let loose_vol_cy = bank_vol_cy * swell_factor;

    // Pipe zone
    let bedding_depth_ft = (s.bedding_min_in / 12.0)
        .max(input.pipe_od_in * s.bedding_depth_multiplier / 12.0);
    let shading_above_ft = Feet::from(Inches(s.shading_above_pipe_in)).value();
    let pipe_zone_depth_ft = bedding_depth_ft + pipe_od_ft + shading_above_ft;

    // Floor area drives material volumes for every topology
    let pipe_zone_vol_cy = cf_to_cy(geo.floor_area_sf * pipe_zone_depth_ft);
    let bedding_vol_cy = cf_to_cy(geo.floor_area_sf * bedding_depth_ft);
    let shading_vol_cy = cf_to_cy(geo.floor_area_sf * (pipe_od_ft + shading_above_ft));

    // Final backfill, clamped when the pipe zone exceeds the dig depth
    let final_backfill_depth_ft = geo.effective_depth_ft - pipe_zone_depth_ft;
    let final_backfill_cy = cf_to_cy((geo.floor_area_sf * final_backfill_depth_ft).max(0.0));
    let total_backfill_cy = bedding_vol_cy + shading_vol_cy + final_backfill_cy;

    // Crew
    let hand_digger_count = s.crew_pipelayers + s.crew_laborers;
    let total_crew_on_site =
        s.crew_foreman + s.crew_operators + s.crew_pipelayers + s.crew_laborers + s.crew_truck_driver;

    // Dig time: partition bank volume between hand and machine
    let machine_dig_rate = exc.bucket_cy * s.bucket_fill_factor * exc.cycles_per_hr * eff;
    let hand_dig_frac = active_hand_dig_pct / 100.0;
    let hand_dig_vol_cy = bank_vol_cy * hand_dig_frac;
    let machine_dig_vol_cy = bank_vol_cy * (1.0 - hand_dig_frac);
    let hand_crew_rate = s.hand_dig_rate_cy_per_hr * hand_digger_count as f64;
    let hand_dig_hrs = if hand_crew_rate > 0.0 {
        hand_dig_vol_cy / hand_crew_rate
    } else {
        0.0
    };
    let machine_dig_hrs = if machine_dig_rate > 0.0 {
        machine_dig_vol_cy / machine_dig_rate
    } else {
        0.0
    };
    let total_exc_hrs = hand_dig_hrs + machine_dig_hrs;

    // Surface removal
    let saw_cut_lf = geo.perimeter_ft;
    let saw_cut_time_hrs = if surface.saw_cut_ft_per_min > 0.0 {
        saw_cut_lf / surface.saw_cut_ft_per_min / 60.0
    } else {
        0.0
    };
    let surface_removal_hrs = if surface.removal_sf_per_hr > 0.0 {
        geo.surface_area_sf / surface.removal_sf_per_hr
    } else {
        0.0
    };

    // Spoils
    let spoils = plan_spoils(
        input.spoils_action,
        loose_vol_cy,
        final_backfill_cy,
        swell_factor,
        truck,
        s.truck_round_trip_min,
    );

    // Shoring: trenches shore the two long walls (ends are open);
    // bell holes shore all four
    let mut shoring_sf = 0.0;
    let mut shoring_panels: u32 = 0;
    let mut shoring_install_hrs = 0.0;
    if input.shoring_type.uses_panels() {
        shoring_sf = if is_trench {
            2.0 * geo.effective_length_ft * geo.effective_depth_ft
        } else {
            2.0 * geo.effective_length_ft * geo.effective_depth_ft
                + 2.0 * geo.effective_width_ft * geo.effective_depth_ft
        };
        let panel_sf = s.shoring_panel_width_ft * s.shoring_panel_height_ft;
        if panel_sf > 0.0 {
            shoring_panels = (shoring_sf / panel_sf).ceil() as u32;
        }
        shoring_install_hrs = shoring_panels as f64 * shoring.install_time_per_panel_min / 60.0;
    }

    // Compaction: lifts over the depth above the pipe zone
    let compactable_depth_in = ((geo.effective_depth_ft - pipe_zone_depth_ft) * 12.0).max(0.0);
    let num_lifts: u32 = if s.compaction_lift_in > 0.0 {
        (compactable_depth_in / s.compaction_lift_in).ceil() as u32
    } else {
        0
    };
    let compaction_area_sf = if geo.surface_area_sf > 0.0 {
        geo.surface_area_sf
    } else {
        geo.effective_length_ft * geo.effective_width_ft
    };
    let compaction_hrs_per_lift = if s.compaction_sf_per_hr > 0.0 {
        compaction_area_sf / s.compaction_sf_per_hr
    } else {
        0.0
    };
    let total_compaction_hrs = num_lifts as f64 * compaction_hrs_per_lift;
    let compaction_test_hrs = num_lifts as f64 * s.compaction_test_time_min / 60.0;

    // Congestion: flat 15% dig-time penalty per conflict
    let mut congestion_time_factor = 1.0;
    let mut congestion_notes: Vec<String> = Vec::new();
    if input.has_congestion && !input.congestion_items.is_empty() {
        congestion_time_factor += input.congestion_items.len() as f64 * 0.15;
        for item in &input.congestion_items {
            congestion_notes.push(format!(
                "{}: {}' long at {}' deep",
                item.kind, item.length_ft, item.depth_ft
            ));
        }
    }

    // Import material: bedding and shading always import; final backfill
    // import is offset by reused spoils
    let import_bedding_cy = bedding_vol_cy;
    let import_shading_cy = shading_vol_cy;
    let import_final_cy = match input.spoils_action {
        SpoilsAction::Offhaul => final_backfill_cy,
        _ => (final_backfill_cy - spoils.reuse_cy).max(0.0),
    };

    // Backfill placement
    let placement_rate = s.backfill_placement_cy_per_hr * eff;
    let backfill_placement_hrs = if placement_rate > 0.0 {
        total_backfill_cy / placement_rate
    } else {
        0.0
    };

    // Phase subtotals
    let exc_phase_hrs = round1(
        saw_cut_time_hrs
            + surface_removal_hrs
            + total_exc_hrs * congestion_time_factor
            + spoils.offhaul_time_hrs,
    );
    let shoring_phase_hrs = round1(shoring_install_hrs);
    let backfill_phase_hrs =
        round1(backfill_placement_hrs + total_compaction_hrs + compaction_test_hrs);
    let total_field_hrs = round1(exc_phase_hrs + shoring_phase_hrs + backfill_phase_hrs);

    let crew_days = (total_field_hrs / 8.0).ceil() as u32;
    // Slurry bedding adds a cure day before backfill can resume
    let total_calendar_days = crew_days + if bedding_vol_cy > 0.0 { 1 } else { 0 };

    // Man-hours; the truck driver only works during offhaul
    let total_man_hrs = round1(total_field_hrs * total_crew_on_site as f64);
    let truck_driver_hrs = if s.crew_truck_driver > 0 {
        round1(spoils.offhaul_time_hrs * s.crew_truck_driver as f64)
    } else {
        0.0
    };
    let adjusted_man_hrs = round1(
        (total_field_hrs - spoils.offhaul_time_hrs)
            * (total_crew_on_site - s.crew_truck_driver) as f64
            + spoils.offhaul_time_hrs * total_crew_on_site as f64,
    );

    ExcavationResult {
        bank_vol_cy: round2(bank_vol_cy),
        bank_vol_cf: round1(geo.bank_vol_cf),
        loose_vol_cy: round2(loose_vol_cy),
        swell_factor,
        load_factor: round2(1.0 / swell_factor),
        surface_cut_cy: round2(surface_cut_cy),
        surface_area_sf: round1(geo.surface_area_sf),
        perimeter_ft: round1(geo.perimeter_ft),

        depth_input_label: input.depth_mode.display_name().to_string(),
        depth_input_ft: round2(input.depth_ft),
        computed_exc_depth_ft: round2(computed_exc_depth_ft),
        clearance_under_in: s.clearance_under_pipe_in,

        bedding_vol_cy: round2(bedding_vol_cy),
        shading_vol_cy: round2(shading_vol_cy),
        pipe_zone_vol_cy: round2(pipe_zone_vol_cy),
        bedding_depth_in: round1(Inches::from(Feet(bedding_depth_ft)).value()),
        pipe_zone_depth_ft: round2(pipe_zone_depth_ft),

        final_backfill_cy: round2(final_backfill_cy),
        total_backfill_cy: round2(total_backfill_cy),
        import_bedding_cy: round2(import_bedding_cy),
        import_shading_cy: round2(import_shading_cy),
        import_final_cy: round2(import_final_cy),

        hand_dig_hrs: round1(hand_dig_hrs),
        machine_dig_hrs: round1(machine_dig_hrs),
        total_exc_hrs: round1(total_exc_hrs * congestion_time_factor),
        saw_cut_time_hrs: round1(saw_cut_time_hrs),
        surface_removal_hrs: round1(surface_removal_hrs),
        shoring_install_hrs: round1(shoring_install_hrs),
        total_compaction_hrs: round1(total_compaction_hrs),
        compaction_test_hrs: round1(compaction_test_hrs),
        bedding_cure_hrs: s.zero_sack_cure_hrs,
        offhaul_time_hrs: round1(spoils.offhaul_time_hrs),
        backfill_placement_hrs: round1(backfill_placement_hrs),

        exc_phase_hrs,
        shoring_phase_hrs,
        backfill_phase_hrs,

        total_field_hrs,
        crew_days,
        total_calendar_days,

        total_crew_on_site,
        hand_digger_count,
        total_man_hrs,
        adjusted_man_hrs,
        truck_driver_hrs,

        calculated_hand_dig_pct,
        active_hand_dig_pct,
        hand_dig_area_sq_in: round1(hand_dig_area),

        spoils_reuse_cy: round2(spoils.reuse_cy),
        spoils_offhaul_cy: round2(spoils.offhaul_cy),
        offhaul_truck_loads: spoils.truck_loads,

        shoring_sf: round1(shoring_sf),
        shoring_panels,

        num_lifts,

        congestion_time_factor,
        congestion_notes,

        effective_length: round1(geo.effective_length_ft),
        effective_width: round2(geo.effective_width_ft),
        effective_depth: round2(geo.effective_depth_ft),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 20 ft x 2 ft x 5 ft trench in Type B, asphalt, medium excavator,
    /// 14 CY truck, no shoring, offhaul - the reference scenario.
    fn base_input() -> ExcavationInput {
        ExcavationInput {
            label: "Test run".to_string(),
            ..ExcavationInput::default()
        }
    }

    #[test]
    fn test_reference_scenario_volumes() {
        let result = calculate(&base_input());

        assert_eq!(result.bank_vol_cf, 200.0);
        assert!((result.bank_vol_cy - 7.41).abs() < 1e-9);
        assert!((result.loose_vol_cy - 9.26).abs() < 1e-9);
        assert_eq!(result.swell_factor, 1.25);
        assert!((result.load_factor - 0.8).abs() < 1e-9);
        assert_eq!(result.surface_area_sf, 40.0);
        assert_eq!(result.perimeter_ft, 44.0);
        assert_eq!(result.effective_length, 20.0);
        assert_eq!(result.effective_width, 2.0);
        assert_eq!(result.effective_depth, 5.0);
    }

    #[test]
    fn test_cf_cy_consistency() {
        let result = calculate(&base_input());
        assert!((result.bank_vol_cy * 27.0 - result.bank_vol_cf).abs() < 0.2);
    }

    #[test]
    fn test_pipe_zone() {
        let result = calculate(&base_input());

        // bedding = max(4", 6 x 0.333") = 4" = 0.3333 ft
        assert!((result.bedding_depth_in - 4.0).abs() < 1e-9);
        // pipe zone = 0.3333 + 0.5 + 1.0 = 1.8333 ft
        assert!((result.pipe_zone_depth_ft - 1.83).abs() < 1e-9);
        assert!((result.bedding_vol_cy - 0.49).abs() < 1e-9);
        assert!((result.shading_vol_cy - 2.22).abs() < 1e-9);
        assert!((result.pipe_zone_vol_cy - 2.72).abs() < 1e-9);
        assert!((result.final_backfill_cy - 4.69).abs() < 1e-9);
        assert!((result.total_backfill_cy - 7.41).abs() < 1e-9);
    }

    #[test]
    fn test_total_backfill_is_sum_of_parts() {
        let result = calculate(&base_input());
        let parts = result.bedding_vol_cy + result.shading_vol_cy + result.final_backfill_cy;
        assert!((result.total_backfill_cy - parts).abs() < 0.02);
    }

    #[test]
    fn test_final_backfill_clamped_for_shallow_dig() {
        let mut input = base_input();
        // 1 ft total depth is shallower than the pipe zone
        input.depth_ft = 1.0;
        let result = calculate(&input);
        assert_eq!(result.final_backfill_cy, 0.0);
        assert_eq!(result.num_lifts, 0);
    }

    #[test]
    fn test_keyhole_hand_dig_pct() {
        let result = calculate(&base_input());

        // buffer r = 3 + 6 = 9; below = 3 + 24 = 27
        // keyhole = pi*81/2 + 2*9*27 = 613.23; pipe = pi*9 = 28.27
        assert!((result.hand_dig_area_sq_in - 585.0).abs() < 0.1);
        assert_eq!(result.calculated_hand_dig_pct, 41.0);
        assert_eq!(result.active_hand_dig_pct, 41.0);
    }

    #[test]
    fn test_hand_dig_override() {
        let mut input = base_input();
        input.hand_dig_override = true;
        input.hand_dig_pct_manual = 10.0;
        let result = calculate(&input);
        assert_eq!(result.active_hand_dig_pct, 10.0);
        // Computed value still reported
        assert_eq!(result.calculated_hand_dig_pct, 41.0);
    }

    #[test]
    fn test_hand_dig_pct_clamped_to_100() {
        let mut input = base_input();
        // Huge pipe in a tiny dig
        input.pipe_od_in = 36.0;
        input.width_ft = 1.0;
        input.depth_ft = 2.0;
        let result = calculate(&input);
        assert_eq!(result.calculated_hand_dig_pct, 100.0);
    }

    #[test]
    fn test_dig_time_partition() {
        let result = calculate(&base_input());

        // 41% of 7.4074 CY by hand at 0.5 CY/hr x 3 diggers
        assert!((result.hand_dig_hrs - 2.0).abs() < 0.051);
        // machine: 4.3704 CY at 1.15 x 0.85 x 90 x 0.83 = 73.02 CY/hr
        assert!((result.machine_dig_hrs - 0.1).abs() < 0.051);
        assert!((result.total_exc_hrs - 2.1).abs() < 0.051);
    }

    #[test]
    fn test_volume_partition_invariant() {
        // Long run so the 0.1-hr display rounding stays small against the
        // reconstructed volumes
        let mut input = base_input();
        input.length_ft = 200.0;
        let result = calculate(&input);
        let s = &input.settings;

        let hand_cy = result.hand_dig_hrs * s.hand_dig_rate_cy_per_hr * 3.0;
        let machine_rate = 1.15 * s.bucket_fill_factor * 90.0 * (s.job_efficiency_pct / 100.0);
        let machine_cy = result.machine_dig_hrs * machine_rate;
        // Reconstructed from rounded hours, so the tolerance is loose
        assert!((hand_cy + machine_cy - result.bank_vol_cy).abs() < 0.5);
    }

    #[test]
    fn test_surface_times() {
        let result = calculate(&base_input());

        // 44 lf at 3 ft/min = 14.67 min
        assert!((result.saw_cut_time_hrs - 0.2).abs() < 1e-9);
        // 40 SF at 200 SF/hr
        assert!((result.surface_removal_hrs - 0.2).abs() < 1e-9);
        assert!((result.surface_cut_cy - 0.49).abs() < 1e-9);
    }

    #[test]
    fn test_unpaved_surface_skips_cut_and_removal() {
        let mut input = base_input();
        input.surface_type = SurfaceType::Dirt;
        let result = calculate(&input);
        assert_eq!(result.saw_cut_time_hrs, 0.0);
        assert_eq!(result.surface_removal_hrs, 0.0);
        assert_eq!(result.surface_cut_cy, 0.0);
    }

    #[test]
    fn test_offhaul_truck_loads() {
        let result = calculate(&base_input());
        // 9.26 loose CY in a 14 CY truck
        assert_eq!(result.offhaul_truck_loads, 1);
        assert!((result.offhaul_time_hrs - 1.2).abs() < 1e-9);
        assert!((result.spoils_offhaul_cy - 9.26).abs() < 1e-9);
        assert_eq!(result.spoils_reuse_cy, 0.0);
    }

    #[test]
    fn test_compaction_lifts() {
        let result = calculate(&base_input());
        // compactable = (5 - 1.8333) x 12 = 38"; 8" lifts -> 5
        assert_eq!(result.num_lifts, 5);
        assert!((result.total_compaction_hrs - 0.5).abs() < 1e-9);
        assert!((result.compaction_test_hrs - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_phase_sums() {
        let result = calculate(&base_input());
        let phase_sum =
            result.exc_phase_hrs + result.shoring_phase_hrs + result.backfill_phase_hrs;
        assert!((result.total_field_hrs - phase_sum).abs() < 0.051);
        assert!(result.total_field_hrs > 0.0);
    }

    #[test]
    fn test_crew_and_man_hours() {
        let result = calculate(&base_input());
        assert_eq!(result.total_crew_on_site, 5);
        assert_eq!(result.hand_digger_count, 3);
        assert!(
            (result.total_man_hrs - result.total_field_hrs * 5.0).abs() < 0.051
        );
        // No truck driver on the default crew
        assert_eq!(result.truck_driver_hrs, 0.0);
        assert!((result.adjusted_man_hrs - result.total_man_hrs).abs() < 0.051);
    }

    #[test]
    fn test_truck_driver_isolation() {
        let mut input = base_input();
        input.settings.crew_truck_driver = 1;
        let result = calculate(&input);
        assert_eq!(result.total_crew_on_site, 6);
        assert!(result.truck_driver_hrs > 0.0);
        // Driver idle outside offhaul, so adjusted < total
        assert!(result.adjusted_man_hrs < result.total_man_hrs);
    }

    #[test]
    fn test_congestion_factor() {
        let mut input = base_input();
        input.has_congestion = true;
        input.congestion_items = vec![
            CongestionItem {
                kind: "gas service".to_string(),
                length_ft: 4.0,
                depth_ft: 3.0,
            },
            CongestionItem {
                kind: "telecom duct".to_string(),
                length_ft: 2.0,
                depth_ft: 2.5,
            },
        ];
        let result = calculate(&input);
        assert!((result.congestion_time_factor - 1.3).abs() < 1e-9);
        assert_eq!(result.congestion_notes.len(), 2);
        assert_eq!(result.congestion_notes[0], "gas service: 4' long at 3' deep");

        // Dig time scales by the factor; the flag alone does nothing
        let baseline = calculate(&base_input());
        assert!(result.total_exc_hrs > baseline.total_exc_hrs);
    }

    #[test]
    fn test_congestion_flag_without_items() {
        let mut input = base_input();
        input.has_congestion = true;
        let result = calculate(&input);
        assert_eq!(result.congestion_time_factor, 1.0);
        assert!(result.congestion_notes.is_empty());
    }

    #[test]
    fn test_auto_width() {
        let mut input = base_input();
        input.use_auto_width = true;
        // 6" OD -> 6 + 12 = 18" = 1.5 ft
        let result = calculate(&input);
        assert_eq!(result.effective_width, 1.5);
    }

    #[test]
    fn test_auto_width_ignored_for_bell_holes() {
        let mut input = base_input();
        input.exc_type = ExcType::BellHole;
        input.exc_shape = ExcShape::Rectangle;
        input.use_auto_width = true;
        let result = calculate(&input);
        assert_eq!(result.effective_width, 2.0);
    }

    #[test]
    fn test_depth_modes() {
        let mut input = base_input();
        input.depth_mode = DepthMode::TopOfPipe;
        input.depth_ft = 3.0;
        let result = calculate(&input);
        // 3 + 0.5 (OD) + 2.0 (clearance) = 5.5
        assert!((result.computed_exc_depth_ft - 5.5).abs() < 1e-9);
        assert_eq!(result.depth_input_label, "Depth to Top of Pipe");
        assert_eq!(result.depth_input_ft, 3.0);

        input.depth_mode = DepthMode::Centerline;
        let result = calculate(&input);
        assert!((result.computed_exc_depth_ft - 5.25).abs() < 1e-9);
        assert_eq!(result.depth_input_label, "Depth to Centerline");
    }

    #[test]
    fn test_sloped_walls_widen_cut() {
        let mut input = base_input();
        input.shoring_type = ShoringType::Sloped;
        // Type B slope ratio is 1:1 -> top = 2 + 2 x 5 = 12 ft
        let result = calculate(&input);
        assert_eq!(result.surface_area_sf, 240.0);
        // avg width 7 ft -> 20 x 7 x 5 = 700 CF
        assert_eq!(result.bank_vol_cf, 700.0);
        assert_eq!(result.shoring_phase_hrs, 0.0);
    }

    #[test]
    fn test_rock_is_vertical() {
        let mut input = base_input();
        input.shoring_type = ShoringType::Sloped;
        input.soil_type = SoilType::Rock;
        let result = calculate(&input);
        // "vertical" ratio 0 -> no widening
        assert_eq!(result.bank_vol_cf, 200.0);
    }

    #[test]
    fn test_shoring_panels_trench() {
        let mut input = base_input();
        input.shoring_type = ShoringType::Shored;
        let result = calculate(&input);
        // Two long walls only: 2 x 20 x 5 = 200 SF; 4x8 panels -> 7
        assert_eq!(result.shoring_sf, 200.0);
        assert_eq!(result.shoring_panels, 7);
        // 7 panels x 20 min
        assert!((result.shoring_install_hrs - 2.3).abs() < 1e-9);
        assert!((result.shoring_phase_hrs - 2.3).abs() < 1e-9);
    }

    #[test]
    fn test_shoring_panels_bell_hole_all_walls() {
        let mut input = base_input();
        input.exc_type = ExcType::BellHole;
        input.exc_shape = ExcShape::Rectangle;
        input.shoring_type = ShoringType::Shored;
        let result = calculate(&input);
        // 2 x 20 x 5 + 2 x 2 x 5 = 220 SF
        assert_eq!(result.shoring_sf, 220.0);
    }

    #[test]
    fn test_bell_hole_square() {
        let mut input = base_input();
        input.exc_type = ExcType::BellHole;
        input.exc_shape = ExcShape::Square;
        input.length_ft = 6.0;
        let result = calculate(&input);
        // 6 x 6 x 5 = 180 CF
        assert_eq!(result.bank_vol_cf, 180.0);
        assert_eq!(result.perimeter_ft, 24.0);
        assert_eq!(result.effective_width, 6.0);
    }

    #[test]
    fn test_bell_hole_nonstandard_floor_area_drives_pipe_zone() {
        let mut input = base_input();
        input.exc_type = ExcType::BellHole;
        input.exc_shape = ExcShape::NonStandard;
        input.length_ft = 8.0;
        input.width_ft = 6.0;
        input.ns_sides = [8.0, 6.0, 8.0, 6.0, 4.0]
            .iter()
            .map(|&length_ft| NsSide {
                label: String::new(),
                length_ft,
            })
            .collect();
        let result = calculate(&input);
        // area = 32 x 6 x 0.25 = 48 SF
        assert_eq!(result.surface_area_sf, 48.0);
        assert_eq!(result.perimeter_ft, 32.0);
        // bedding over the approximated floor: 48 x 0.3333 / 27
        assert!((result.bedding_vol_cy - 0.59).abs() < 1e-9);
    }

    #[test]
    fn test_multi_depth_matches_single_run() {
        let mut split = base_input();
        split.multi_depth = true;
        split.depth_segments = vec![
            DepthSegment {
                length_ft: 10.0,
                depth_ft: 5.0,
                width_ft: 2.0,
                depth_mode: DepthMode::Total,
                use_auto_width: false,
            };
            2
        ];
        let single = calculate(&base_input());
        let multi = calculate(&split);

        assert_eq!(single.bank_vol_cf, multi.bank_vol_cf);
        assert_eq!(single.effective_length, multi.effective_length);
        assert_eq!(single.effective_width, multi.effective_width);
        assert_eq!(single.effective_depth, multi.effective_depth);
        assert_eq!(single.total_field_hrs, multi.total_field_hrs);
    }

    #[test]
    fn test_multi_depth_weighted_dimensions() {
        let mut input = base_input();
        input.multi_depth = true;
        input.depth_segments = vec![
            DepthSegment {
                length_ft: 30.0,
                depth_ft: 4.0,
                width_ft: 2.0,
                depth_mode: DepthMode::Total,
                use_auto_width: false,
            },
            DepthSegment {
                length_ft: 10.0,
                depth_ft: 8.0,
                width_ft: 3.0,
                depth_mode: DepthMode::Total,
                use_auto_width: false,
            },
        ];
        let result = calculate(&input);
        assert_eq!(result.effective_length, 40.0);
        assert!((result.effective_width - 2.25).abs() < 1e-9);
        assert!((result.effective_depth - 5.0).abs() < 1e-9);
        // 30x2x4 + 10x3x8 = 480 CF
        assert_eq!(result.bank_vol_cf, 480.0);
    }

    #[test]
    fn test_idempotence() {
        let input = base_input();
        let a = serde_json::to_string(&calculate(&input)).unwrap();
        let b = serde_json::to_string(&calculate(&input)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_input_does_not_panic() {
        let mut input = base_input();
        input.length_ft = 0.0;
        input.width_ft = 0.0;
        input.depth_ft = 0.0;
        input.pipe_od_in = 0.0;
        let result = calculate(&input);
        assert_eq!(result.bank_vol_cf, 0.0);
        assert_eq!(result.calculated_hand_dig_pct, 0.0);
        assert_eq!(result.offhaul_truck_loads, 0);
        assert!(result.total_field_hrs >= 0.0);
    }

    #[test]
    fn test_zero_rates_skip_divisions() {
        let mut input = base_input();
        input.settings.hand_dig_rate_cy_per_hr = 0.0;
        input.settings.backfill_placement_cy_per_hr = 0.0;
        input.settings.compaction_sf_per_hr = 0.0;
        input.settings.compaction_lift_in = 0.0;
        let result = calculate(&input);
        assert_eq!(result.hand_dig_hrs, 0.0);
        assert_eq!(result.backfill_placement_hrs, 0.0);
        assert_eq!(result.total_compaction_hrs, 0.0);
        assert_eq!(result.num_lifts, 0);
        assert!(result.total_field_hrs.is_finite());
    }

    #[test]
    fn test_calendar_days_include_cure() {
        let result = calculate(&base_input());
        assert_eq!(result.crew_days, 1);
        // Slurry bedding present -> one cure day
        assert_eq!(result.total_calendar_days, 2);
        assert_eq!(result.bedding_cure_hrs, 24.0);
    }

    #[test]
    fn test_validate() {
        assert!(base_input().validate().is_ok());

        let mut input = base_input();
        input.pipe_od_in = -1.0;
        assert!(input.validate().is_err());

        let mut input = base_input();
        input.length_ft = 0.0;
        assert!(input.validate().is_err());

        let mut input = base_input();
        input.hand_dig_override = true;
        input.hand_dig_pct_manual = 150.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_input_serialization() {
        let input = base_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"exc_type\": \"trench\""));
        assert!(json.contains("\"truck_size\": \"14cy\""));

        let roundtrip: ExcavationInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate(&base_input());
        let json = serde_json::to_string(&result).unwrap();
        let roundtrip: ExcavationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
