//! # Spoils Logistics
//!
//! Disposition of excavated native material: haul it all off, reuse it for
//! final backfill, or split the difference. Truck math works in loose CY -
//! the swell factor converts any bank-measured reuse back to loose volume
//! before the surplus is computed.

use serde::{Deserialize, Serialize};

use crate::catalog::TruckSpec;
use crate::units::{Hours, Minutes};

/// Disposition policy for excavated native material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpoilsAction {
    /// Reuse spoils up to the final-backfill requirement; offhaul surplus
    Reuse,
    /// Truck all loose volume off-site
    Offhaul,
    /// Reuse a fixed 50% of the final-backfill volume; offhaul the rest
    Partial,
}

impl SpoilsAction {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SpoilsAction::Reuse => "Reuse On-Site",
            SpoilsAction::Offhaul => "Offhaul All",
            SpoilsAction::Partial => "Partial Reuse (50%)",
        }
    }
}

impl std::fmt::Display for SpoilsAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Default for SpoilsAction {
    fn default() -> Self {
        SpoilsAction::Offhaul
    }
}

/// Resolved spoils plan for one excavation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpoilsPlan {
    /// Spoils kept on site for final backfill (bank-measured CY)
    pub reuse_cy: f64,
    /// Loose CY trucked off-site (never negative)
    pub offhaul_cy: f64,
    /// Truck loads at the selected truck's capacity
    pub truck_loads: u32,
    /// Loading plus round-trip time for all loads (hrs)
    pub offhaul_time_hrs: f64,
}

/// Truck loads needed for a loose volume; 0 when there is nothing to haul
/// or the truck has no capacity.
fn loads_for(offhaul_cy: f64, capacity_cy: f64) -> u32 {
    if offhaul_cy <= 0.0 || capacity_cy <= 0.0 {
        return 0;
    }
    (offhaul_cy / capacity_cy).ceil() as u32
}

/// Hours to load and haul `loads` truckloads
fn haul_time_hrs(loads: u32, load_time_min: f64, round_trip_min: f64) -> f64 {
    Hours::from(Minutes(loads as f64 * (load_time_min + round_trip_min))).value()
}

/// Resolve the spoils plan for one excavation.
///
/// * `loose_vol_cy` - total excavated loose volume
/// * `final_backfill_cy` - bank-measured final backfill requirement
/// * `swell_factor` - bank-to-loose multiplier for the native soil
pub fn plan_spoils(
    action: SpoilsAction,
    loose_vol_cy: f64,
    final_backfill_cy: f64,
    swell_factor: f64,
    truck: &TruckSpec,
    round_trip_min: f64,
) -> SpoilsPlan {
    match action {
        SpoilsAction::Offhaul => {
            let offhaul_cy = loose_vol_cy;
            let truck_loads = loads_for(offhaul_cy, truck.capacity_cy);
            SpoilsPlan {
                reuse_cy: 0.0,
                offhaul_cy,
                truck_loads,
                offhaul_time_hrs: haul_time_hrs(truck_loads, truck.load_time_min, round_trip_min),
            }
        }
        SpoilsAction::Reuse => {
            let reuse_cy = final_backfill_cy;
            // Surplus beyond what final backfill consumes, loose-measured
            let offhaul_cy = (loose_vol_cy - final_backfill_cy * swell_factor).max(0.0);
            let truck_loads = loads_for(offhaul_cy, truck.capacity_cy);
            SpoilsPlan {
                reuse_cy,
                offhaul_cy,
                truck_loads,
                offhaul_time_hrs: haul_time_hrs(truck_loads, truck.load_time_min, round_trip_min),
            }
        }
        SpoilsAction::Partial => {
            let reuse_cy = final_backfill_cy * 0.5;
            let offhaul_cy = (loose_vol_cy - reuse_cy * swell_factor).max(0.0);
            let truck_loads = loads_for(offhaul_cy, truck.capacity_cy);
            SpoilsPlan {
                reuse_cy,
                offhaul_cy,
                truck_loads,
                offhaul_time_hrs: haul_time_hrs(truck_loads, truck.load_time_min, round_trip_min),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TruckSize;

    fn truck_14cy() -> &'static TruckSpec {
        TruckSize::Cy14.spec()
    }

    #[test]
    fn test_offhaul_all() {
        let plan = plan_spoils(SpoilsAction::Offhaul, 9.26, 4.69, 1.25, truck_14cy(), 60.0);
        assert_eq!(plan.reuse_cy, 0.0);
        assert_eq!(plan.offhaul_cy, 9.26);
        assert_eq!(plan.truck_loads, 1);
        // 1 load x (10 + 60) min
        assert!((plan.offhaul_time_hrs - 70.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_offhaul_multiple_loads() {
        let plan = plan_spoils(SpoilsAction::Offhaul, 30.0, 0.0, 1.25, truck_14cy(), 60.0);
        assert_eq!(plan.truck_loads, 3);
    }

    #[test]
    fn test_reuse_consumes_final_backfill() {
        // loose 9.26, final backfill 4.69 bank -> 5.86 loose consumed
        let plan = plan_spoils(SpoilsAction::Reuse, 9.26, 4.69, 1.25, truck_14cy(), 60.0);
        assert_eq!(plan.reuse_cy, 4.69);
        assert!((plan.offhaul_cy - (9.26 - 4.69 * 1.25)).abs() < 1e-9);
        assert_eq!(plan.truck_loads, 1);
    }

    #[test]
    fn test_reuse_surplus_clamped() {
        // Final backfill wants more than was dug - nothing to offhaul
        let plan = plan_spoils(SpoilsAction::Reuse, 5.0, 10.0, 1.25, truck_14cy(), 60.0);
        assert_eq!(plan.offhaul_cy, 0.0);
        assert_eq!(plan.truck_loads, 0);
        assert_eq!(plan.offhaul_time_hrs, 0.0);
    }

    #[test]
    fn test_partial_reuse() {
        let plan = plan_spoils(SpoilsAction::Partial, 9.26, 4.69, 1.25, truck_14cy(), 60.0);
        assert!((plan.reuse_cy - 2.345).abs() < 1e-9);
        assert!((plan.offhaul_cy - (9.26 - 2.345 * 1.25)).abs() < 1e-9);
        assert_eq!(plan.truck_loads, 1);
    }

    #[test]
    fn test_partial_offhaul_clamped() {
        let plan = plan_spoils(SpoilsAction::Partial, 1.0, 10.0, 1.5, truck_14cy(), 60.0);
        assert_eq!(plan.offhaul_cy, 0.0);
        assert_eq!(plan.truck_loads, 0);
    }

    #[test]
    fn test_zero_capacity_guard() {
        let no_capacity = TruckSpec {
            label: "degenerate",
            capacity_cy: 0.0,
            load_time_min: 10.0,
        };
        let plan = plan_spoils(SpoilsAction::Offhaul, 9.26, 0.0, 1.25, &no_capacity, 60.0);
        assert_eq!(plan.truck_loads, 0);
        assert_eq!(plan.offhaul_time_hrs, 0.0);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&SpoilsAction::Offhaul).unwrap(),
            "\"offhaul\""
        );
        let roundtrip: SpoilsAction = serde_json::from_str("\"partial\"").unwrap();
        assert_eq!(roundtrip, SpoilsAction::Partial);
    }
}
