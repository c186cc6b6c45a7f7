//! # Project Data Structures
//!
//! The `Project` struct is the root container for a job's excavation
//! estimates. Projects serialize to `.dig` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, estimator, job info, timestamps)
//! ├── settings: EstimatorSettings (job-level rate/clearance/crew defaults)
//! └── items: HashMap<Uuid, ExcavationInput> (all estimates)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dig_core::project::Project;
//!
//! let project = Project::new("Jane Estimator", "25-042", "ACME Pipeline Co");
//!
//! // Serialize to JSON
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::ExcavationInput;

/// Current schema version for .dig files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// This is the top-level struct that gets serialized to `.dig` files.
/// Items are stored in a flat UUID-keyed map for O(1) lookups and stable
/// references when estimates are reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, estimator, job info)
    pub meta: ProjectMetadata,

    /// Job-level estimator settings; new estimates copy these defaults
    pub settings: EstimatorSettings,

    /// All excavation estimates, keyed by UUID
    pub items: HashMap<Uuid, ExcavationInput>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Arguments
    ///
    /// * `estimator` - Name of the responsible estimator
    /// * `job_id` - Job/project number (e.g., "25-001")
    /// * `client` - Client name
    ///
    /// # Example
    ///
    /// ```rust
    /// use dig_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.estimator, "John Doe");
    /// ```
    pub fn new(
        estimator: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                estimator: estimator.into(),
                job_id: job_id.into(),
                client: client.into(),
                line: String::new(),
                location: String::new(),
                created: now,
                modified: now,
            },
            settings: EstimatorSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add an estimate to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: ExcavationInput) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove an estimate by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<ExcavationInput> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get an estimate by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&ExcavationInput> {
        self.items.get(id)
    }

    /// Get a mutable reference to an estimate by UUID.
    ///
    /// Note: getting a mutable reference marks the project as modified.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut ExcavationInput> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Number of estimates in the project.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible estimator
    pub estimator: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// Pipeline/line designation (e.g., "L-142")
    pub line: String,

    /// Job site location description
    pub location: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Job-level estimator settings.
///
/// Every stage of the calculation reads its rate/clearance/crew constants
/// from this record rather than hardcoded values. A few keys
/// (`warning_tape_above_pipe_in`, `lift_height_in`, `pave_saw_cut_buffer_in`)
/// exist for the form layer and are not read by the formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    /// Job efficiency (%): fraction of the clock spent producing
    pub job_efficiency_pct: f64,

    /// Hand dig production per person (CY/hr)
    pub hand_dig_rate_cy_per_hr: f64,

    /// Compaction production (SF/hr per lift)
    pub compaction_sf_per_hr: f64,

    /// Density test time per lift (min)
    pub compaction_test_time_min: f64,

    /// Bedding depth as a multiple of pipe OD
    pub bedding_depth_multiplier: f64,

    /// Minimum bedding depth (in)
    pub bedding_min_in: f64,

    /// Shading above top of pipe (in)
    pub shading_above_pipe_in: f64,

    /// Warning tape height above pipe (in)
    pub warning_tape_above_pipe_in: f64,

    /// Clearance under pipe for bedding work (in)
    pub clearance_under_pipe_in: f64,

    /// Lateral hand-dig clearance around the pipe (in)
    pub pipe_clearance_in: f64,

    /// 0-sack slurry cure time before backfill (hrs)
    pub zero_sack_cure_hrs: f64,

    /// Generic lift height (in)
    pub lift_height_in: f64,

    /// Truck round trip to the dump site (min)
    pub truck_round_trip_min: f64,

    // Crew roster
    pub crew_foreman: u32,
    pub crew_operators: u32,
    pub crew_pipelayers: u32,
    pub crew_laborers: u32,
    pub crew_truck_driver: u32,

    /// Bucket fill factor for the native soil
    pub bucket_fill_factor: f64,

    /// Shoring panel width (ft)
    pub shoring_panel_width_ft: f64,

    /// Shoring panel height (ft)
    pub shoring_panel_height_ft: f64,

    /// Compaction lift height (in)
    pub compaction_lift_in: f64,

    /// Backfill placement production (CY/hr)
    pub backfill_placement_cy_per_hr: f64,

    /// Saw cut buffer beyond the trench edge (in)
    pub pave_saw_cut_buffer_in: f64,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        EstimatorSettings {
            job_efficiency_pct: 83.0,
            hand_dig_rate_cy_per_hr: 0.5,
            compaction_sf_per_hr: 400.0,
            compaction_test_time_min: 15.0,
            bedding_depth_multiplier: 0.333,
            bedding_min_in: 4.0,
            shading_above_pipe_in: 12.0,
            warning_tape_above_pipe_in: 18.0,
            clearance_under_pipe_in: 24.0,
            pipe_clearance_in: 6.0,
            zero_sack_cure_hrs: 24.0,
            lift_height_in: 8.0,
            truck_round_trip_min: 60.0,
            crew_foreman: 1,
            crew_operators: 1,
            crew_pipelayers: 1,
            crew_laborers: 2,
            crew_truck_driver: 0,
            bucket_fill_factor: 0.85,
            shoring_panel_width_ft: 4.0,
            shoring_panel_height_ft: 8.0,
            compaction_lift_in: 8.0,
            backfill_placement_cy_per_hr: 15.0,
            pave_saw_cut_buffer_in: 12.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Pipeline");
        assert_eq!(project.meta.estimator, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Pipeline");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_project_serialization() {
        let project = Project::new("Jane Estimator", "25-042", "Test Client");
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Estimator"));
        assert!(json.contains("25-042"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.estimator, "Jane Estimator");
    }

    #[test]
    fn test_add_remove_item() {
        use crate::calculations::ExcavationInput;

        let mut project = Project::new("Estimator", "25-001", "Client");

        let mut estimate = ExcavationInput::default();
        estimate.label = "B-1 bell hole".to_string();

        let id = project.add_item(estimate);
        assert_eq!(project.item_count(), 1);
        assert!(project.get_item(&id).is_some());

        let removed = project.remove_item(&id);
        assert!(removed.is_some());
        assert_eq!(project.item_count(), 0);
    }

    #[test]
    fn test_default_settings_match_field_standards() {
        let settings = EstimatorSettings::default();
        assert_eq!(settings.job_efficiency_pct, 83.0);
        assert_eq!(settings.clearance_under_pipe_in, 24.0);
        assert_eq!(settings.crew_laborers, 2);
        assert_eq!(settings.compaction_lift_in, 8.0);
    }

    #[test]
    fn test_settings_partial_json_uses_defaults() {
        // A settings sheet that only overrides one value
        let settings: EstimatorSettings =
            serde_json::from_str(r#"{"job_efficiency_pct": 75.0}"#).unwrap();
        assert_eq!(settings.job_efficiency_pct, 75.0);
        assert_eq!(settings.bedding_min_in, 4.0);
    }
}
