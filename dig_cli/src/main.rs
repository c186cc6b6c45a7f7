//! # Digline CLI Application
//!
//! Terminal-based interface for excavation estimates.
//!
//! ## Status
//!
//! This is a simple prompt-driven demo. A full Ratatui TUI will follow
//! once the form layer is designed.

use std::io::{self, BufRead, Write};

use dig_core::calculations::{calculate, ExcavationInput};
use dig_core::catalog::{SoilType, SurfaceType};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_str(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn main() {
    println!("Digline CLI - Pipeline Excavation Estimator");
    println!("===========================================");
    println!();

    let mut input = ExcavationInput::default();
    input.label = "CLI estimate".to_string();
    input.pipe_od_in = prompt_f64("Pipe OD (in) [6.0]: ", 6.0);
    input.length_ft = prompt_f64("Trench length (ft) [20.0]: ", 20.0);
    input.width_ft = prompt_f64("Trench width (ft) [2.0]: ", 2.0);
    input.depth_ft = prompt_f64("Total depth (ft) [5.0]: ", 5.0);

    let soil_str = prompt_str("Soil type (type_a/type_b/type_c/rock) [type_b]: ", "type_b");
    input.soil_type = SoilType::from_str_flexible(&soil_str).unwrap_or_default();

    let surface_str = prompt_str("Surface (asphalt/concrete/dirt) [asphalt]: ", "asphalt");
    input.surface_type = SurfaceType::from_str_flexible(&surface_str).unwrap_or_default();

    println!();
    println!("Calculating...");
    println!();

    let result = calculate(&input);

    println!("═══════════════════════════════════════");
    println!("  EXCAVATION ESTIMATE");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Dig:      {:.1}' x {:.2}' x {:.2}' ({})",
        result.effective_length,
        result.effective_width,
        result.effective_depth,
        input.soil_type
    );
    println!("  Pipe:     {:.1}\" OD", input.pipe_od_in);
    println!("  Surface:  {}", input.surface_type);
    println!();
    println!("Volumes:");
    println!("  Bank:           {:.2} CY ({:.1} CF)", result.bank_vol_cy, result.bank_vol_cf);
    println!("  Loose:          {:.2} CY (swell {:.2})", result.loose_vol_cy, result.swell_factor);
    println!("  Total backfill: {:.2} CY", result.total_backfill_cy);
    println!("  Offhaul:        {:.2} CY in {} truck loads",
        result.spoils_offhaul_cy, result.offhaul_truck_loads);
    println!();
    println!("Hand dig: {:.0}% of volume ({:.1} hrs)",
        result.active_hand_dig_pct, result.hand_dig_hrs);
    println!();
    println!("Phases:");
    println!("  Excavation: {:>6.1} hrs", result.exc_phase_hrs);
    println!("  Shoring:    {:>6.1} hrs", result.shoring_phase_hrs);
    println!("  Backfill:   {:>6.1} hrs", result.backfill_phase_hrs);
    println!("  ─────────────────────");
    println!("  Total:      {:>6.1} hrs ({} crew days, {} calendar days)",
        result.total_field_hrs, result.crew_days, result.total_calendar_days);
    println!();
    println!("Man-hours: {:.1} ({} on site)", result.total_man_hrs, result.total_crew_on_site);
    println!("═══════════════════════════════════════");

    println!();
    println!("JSON Output (for API use):");
    if let Ok(json) = serde_json::to_string_pretty(&result) {
        println!("{}", json);
    }
}
