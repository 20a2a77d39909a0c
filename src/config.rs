use std::time::Duration;

/// Tunable constants for evaluation, placement and rendering.
///
/// Distances are in canvas pixels. The exclusion radii were picked by eye;
/// they keep the picture stable near a charge and carry no physical meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Visualization-scale Coulomb constant (not the SI value).
    pub coulomb_k: f64,
    /// Field contributions with r² at or below this are skipped.
    pub field_exclusion_r2: f64,
    /// Potential contributions with r at or below this are skipped.
    pub potential_exclusion_radius: f64,

    pub min_separation: f64,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    pub default_magnitude: f64,
    /// Pointer distance that grabs a charge.
    pub hit_radius: f64,

    // vector mode
    pub grid_pitch: f64,
    pub min_visible_field: f64,
    pub max_visible_field: f64,
    pub max_arrow_length: f64,

    // potential mode
    pub contour_resolution: f64,
    pub contour_levels: Vec<f64>,

    pub warning_duration: Duration,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            coulomb_k: 8990.0,
            field_exclusion_r2: 100.0,
            potential_exclusion_radius: 10.0,

            min_separation: 40.0,
            min_magnitude: 0.1,
            max_magnitude: 5.0,
            default_magnitude: 1.0,
            hit_radius: 25.0,

            grid_pitch: 55.0,
            min_visible_field: 0.1,
            max_visible_field: 1000.0,
            max_arrow_length: 300.0,

            contour_resolution: 4.0,
            contour_levels: vec![
                -1000.0, -500.0, -200.0, -100.0, -50.0, 0.0, 50.0, 100.0, 200.0, 500.0, 1000.0,
            ],

            warning_duration: Duration::from_secs(2),
        }
    }
}
