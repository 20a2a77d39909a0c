use std::f64::consts::PI;

use egui::{Color32, Stroke, Vec2};
use nalgebra as na;

use super::{grid_axis, to_pos, Surface};
use crate::config::FieldConfig;
use crate::field::FieldEvaluator;

const ARROW_WIDTH: f32 = 2.0;
const HEAD_ANGLE: f64 = PI / 6.0;

/// One visible field sample on the vector grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub center: na::Point2<f64>,
    /// Unit direction of the field.
    pub direction: na::Vector2<f64>,
    pub magnitude: f64,
    pub length: f64,
}

impl Arrow {
    pub fn tail(&self) -> na::Point2<f64> {
        self.center - self.direction * (self.length / 2.0)
    }

    pub fn tip(&self) -> na::Point2<f64> {
        self.center + self.direction * (self.length / 2.0)
    }

    /// The two barb endpoints of the arrowhead.
    pub fn head(&self) -> [na::Point2<f64>; 2] {
        let tip = self.tip();
        let head_len = self.length / 2.0;
        let angle = f64::atan2(self.direction.y, self.direction.x);
        [angle - HEAD_ANGLE, angle + HEAD_ANGLE]
            .map(|a| tip - na::Vector2::new(a.cos(), a.sin()) * head_len)
    }

    /// White for weak fields shading to red for strong ones.
    pub fn color(&self) -> Color32 {
        let intensity = (self.magnitude / 2.0).min(255.0) as u8;
        Color32::from_rgba_unmultiplied(255, 255 - intensity, 255 - intensity, 204)
    }
}

/// Samples the field on the vector grid, keeping only magnitudes inside the
/// visible range. Log scaling keeps strong and weak arrows on one screen.
pub fn sample_arrows(evaluator: &FieldEvaluator<'_>, config: &FieldConfig, size: Vec2) -> Vec<Arrow> {
    let mut arrows = Vec::new();
    for x in grid_axis(size.x as f64, config.grid_pitch) {
        for y in grid_axis(size.y as f64, config.grid_pitch) {
            let center = na::Point2::new(x, y);
            let field = evaluator.field_at(center);
            let magnitude = field.norm();

            if magnitude <= config.min_visible_field || magnitude >= config.max_visible_field {
                continue;
            }

            let length = ((magnitude + 1.0).ln() * 20.0).min(config.max_arrow_length);
            arrows.push(Arrow {
                center,
                direction: field / magnitude,
                magnitude,
                length,
            });
        }
    }
    arrows
}

pub(super) fn draw_field_vectors<S: Surface>(
    evaluator: &FieldEvaluator<'_>,
    config: &FieldConfig,
    size: Vec2,
    surface: &mut S,
) {
    for arrow in sample_arrows(evaluator, config, size) {
        let stroke = Stroke::new(ARROW_WIDTH, arrow.color());
        let tip = to_pos(arrow.tip());
        surface.line(to_pos(arrow.tail()), tip, stroke);
        for barb in arrow.head() {
            surface.line(tip, to_pos(barb), stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charge::{ChargeStore, Polarity};
    use approx::assert_relative_eq;

    #[test]
    fn arrow_length_is_log_scaled_and_centered() {
        let config = FieldConfig::default();
        let mut store = ChargeStore::new(&config);
        store.add(na::Point2::new(0.0, 0.0), Polarity::Positive).unwrap();
        let eval = FieldEvaluator::new(store.charges(), &config);

        let arrows = sample_arrows(&eval, &config, Vec2::new(120.0, 1.0));
        // (0,0) sits on the charge, so only x = 55 and x = 110 remain
        assert_eq!(arrows.len(), 2);

        let a = arrows[0];
        let expected = 8990.0 / (55.0 * 55.0);
        assert_relative_eq!(a.magnitude, expected, max_relative = 1e-12);
        assert_relative_eq!(a.length, (expected + 1.0).ln() * 20.0, max_relative = 1e-12);
        assert_relative_eq!(na::center(&a.tail(), &a.tip()), a.center, epsilon = 1e-9);
        assert_relative_eq!(a.direction, na::Vector2::new(1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn arrowhead_barbs_trail_the_tip() {
        let arrow = Arrow {
            center: na::Point2::new(0.0, 0.0),
            direction: na::Vector2::new(1.0, 0.0),
            magnitude: 10.0,
            length: 40.0,
        };
        let [a, b] = arrow.head();
        assert!(a.x < 20.0 && b.x < 20.0);
        assert_relative_eq!(a.y, -b.y, epsilon = 1e-12);
        assert_relative_eq!(na::distance(&a, &arrow.tip()), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn strong_fields_shade_toward_red() {
        let mut arrow = Arrow {
            center: na::Point2::origin(),
            direction: na::Vector2::new(0.0, 1.0),
            magnitude: 0.5,
            length: 1.0,
        };
        let weak = arrow.color();
        arrow.magnitude = 900.0;
        let strong = arrow.color();
        assert!(strong.g() < weak.g());
        assert!(strong.g() < strong.r());
        assert_eq!(weak.g(), weak.r());
    }

    #[test]
    fn arrow_color_matches_intensity_table() {
        let arrow = |magnitude| Arrow {
            center: na::Point2::origin(),
            direction: na::Vector2::new(1.0, 0.0),
            magnitude,
            length: 1.0,
        };
        // intensity = min(255, |E| / 2)
        assert_eq!(arrow(100.0).color(), Color32::from_rgba_unmultiplied(255, 205, 205, 204));
        assert_eq!(arrow(999.0).color(), Color32::from_rgba_unmultiplied(255, 0, 0, 204));
        assert_eq!(arrow(0.5).color().a(), 204);
    }
}
