use nalgebra as na;

use crate::charge::Charge;
use crate::config::FieldConfig;

/// Field and potential of a snapshot of charges.
///
/// Everything is recomputed from scratch on each call. Contributions from
/// charges too close to the sample point are dropped instead of diverging.
#[derive(Debug, Clone, Copy)]
pub struct FieldEvaluator<'a> {
    charges: &'a [Charge],
    k: f64,
    field_exclusion_r2: f64,
    potential_exclusion_radius: f64,
}

impl<'a> FieldEvaluator<'a> {
    pub fn new(charges: &'a [Charge], config: &FieldConfig) -> Self {
        Self {
            charges,
            k: config.coulomb_k,
            field_exclusion_r2: config.field_exclusion_r2,
            potential_exclusion_radius: config.potential_exclusion_radius,
        }
    }

    pub fn charges(&self) -> &'a [Charge] {
        self.charges
    }

    /// Electric field: `k q / r²` along the unit vector from each charge.
    pub fn field_at(&self, point: na::Point2<f64>) -> na::Vector2<f64> {
        let mut field = na::Vector2::zeros();
        for charge in self.charges {
            let r_vec = point - charge.position;
            let r2 = r_vec.norm_squared();
            if r2 <= self.field_exclusion_r2 {
                continue; // singularity
            }
            let r = r2.sqrt();
            let strength = self.k * charge.magnitude / r2;
            field += (r_vec / r) * (strength * charge.polarity.sign());
        }
        field
    }

    pub fn potential_at(&self, point: na::Point2<f64>) -> f64 {
        let mut potential = 0.0;
        for charge in self.charges {
            let r = na::distance(&point, &charge.position);
            if r > self.potential_exclusion_radius {
                potential += self.k * charge.signed_magnitude() / r;
            }
        }
        potential
    }
}
