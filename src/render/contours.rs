use egui::{Color32, Stroke, Vec2};
use nalgebra as na;

use super::{grid_axis, to_pos, Surface};
use crate::config::FieldConfig;
use crate::field::FieldEvaluator;

const CONTOUR_WIDTH: f32 = 2.0;

/// Potential sampled on a regular grid, stored column-major.
#[derive(Debug, Clone)]
pub struct PotentialGrid {
    resolution: f64,
    width: f64,
    height: f64,
    cols: usize,
    rows: usize,
    values: Vec<f64>,
}

impl PotentialGrid {
    pub fn sample(evaluator: &FieldEvaluator<'_>, resolution: f64, size: Vec2) -> Self {
        let width = size.x as f64;
        let height = size.y as f64;
        let xs: Vec<f64> = grid_axis(width, resolution).collect();
        let ys: Vec<f64> = grid_axis(height, resolution).collect();

        let mut values = Vec::with_capacity(xs.len() * ys.len());
        for &x in &xs {
            for &y in &ys {
                values.push(evaluator.potential_at(na::Point2::new(x, y)));
            }
        }

        Self {
            resolution,
            width,
            height,
            cols: xs.len(),
            rows: ys.len(),
            values,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.cols && j < self.rows {
            Some(self.values[i * self.rows + j])
        } else {
            None
        }
    }

    /// Number of cells along an axis. A cell needs both corners inside the
    /// grid and its origin strictly less than `extent - resolution`.
    fn cell_count(&self, extent: f64, samples: usize) -> usize {
        grid_axis(extent - self.resolution, self.resolution)
            .count()
            .min(samples.saturating_sub(1))
    }

    /// 4-bit marching-squares case for the cell at `(i, j)`: corners
    /// (i,j), (i+1,j), (i+1,j+1), (i,j+1) weigh 8, 4, 2, 1.
    pub fn cell_case(&self, i: usize, j: usize, level: f64) -> Option<u8> {
        let corners = [
            self.get(i, j)?,
            self.get(i + 1, j)?,
            self.get(i + 1, j + 1)?,
            self.get(i, j + 1)?,
        ];
        Some(
            corners
                .iter()
                .zip([8u8, 4, 2, 1])
                .filter(|(v, _)| **v > level)
                .map(|(_, bit)| bit)
                .sum(),
        )
    }
}

/// Boundary segments for one potential level.
///
/// This is a simplified marching squares: every cell the contour crosses gets
/// the same short diagonal from its top-edge midpoint to its right-edge
/// midpoint, without edge interpolation.
pub fn contour_segments(grid: &PotentialGrid, level: f64) -> Vec<(na::Point2<f64>, na::Point2<f64>)> {
    let res = grid.resolution;
    let cols = grid.cell_count(grid.width, grid.cols);
    let rows = grid.cell_count(grid.height, grid.rows);

    let mut segments = Vec::new();
    for i in 0..cols {
        for j in 0..rows {
            let Some(case) = grid.cell_case(i, j, level) else {
                continue;
            };
            if case == 0 || case == 15 {
                continue;
            }
            let x = i as f64 * res;
            let y = j as f64 * res;
            segments.push((
                na::Point2::new(x + res / 2.0, y),
                na::Point2::new(x + res, y + res / 2.0),
            ));
        }
    }
    segments
}

fn level_color(level: f64) -> Color32 {
    if level > 0.0 {
        Color32::from_rgba_unmultiplied(255, 0, 255, 153)
    } else {
        Color32::from_rgba_unmultiplied(0, 255, 255, 153)
    }
}

pub(super) fn draw_equipotentials<S: Surface>(
    evaluator: &FieldEvaluator<'_>,
    config: &FieldConfig,
    size: Vec2,
    surface: &mut S,
) {
    let grid = PotentialGrid::sample(evaluator, config.contour_resolution, size);
    for &level in &config.contour_levels {
        let stroke = Stroke::new(CONTOUR_WIDTH, level_color(level));
        for (from, to) in contour_segments(&grid, level) {
            surface.line(to_pos(from), to_pos(to), stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charge::{ChargeStore, Polarity};

    fn grid_with_charge(polarity: Polarity) -> PotentialGrid {
        let config = FieldConfig::default();
        let mut store = ChargeStore::new(&config);
        store.add(na::Point2::new(100.0, 100.0), polarity).unwrap();
        let eval = FieldEvaluator::new(store.charges(), &config);
        PotentialGrid::sample(&eval, config.contour_resolution, Vec2::new(200.0, 200.0))
    }

    #[test]
    fn grid_dimensions_follow_resolution() {
        let grid = grid_with_charge(Polarity::Positive);
        assert_eq!(grid.cols(), 50);
        assert_eq!(grid.rows(), 50);
        assert!(grid.get(50, 0).is_none());
    }

    #[test]
    fn cells_at_the_far_edge_are_skipped() {
        let grid = grid_with_charge(Polarity::Positive);
        assert_eq!(grid.cell_count(200.0, grid.cols()), 49);
        assert!(grid.cell_case(49, 0, 0.0).is_none());
    }

    #[test]
    fn uniform_cells_emit_nothing() {
        let grid = grid_with_charge(Polarity::Positive);
        // far above every sample
        assert!(contour_segments(&grid, 1.0e9).is_empty());
        // far below every sample
        assert!(contour_segments(&grid, -1.0).is_empty());
    }

    #[test]
    fn positive_level_around_a_charge_emits_fixed_diagonals() {
        let grid = grid_with_charge(Polarity::Positive);
        let segments = contour_segments(&grid, 200.0);
        let center = na::Point2::new(100.0, 100.0);
        let mut on_ring = 0;
        for (from, to) in &segments {
            assert_eq!(to.x - from.x, 2.0);
            assert_eq!(to.y - from.y, 2.0);
            let d = na::distance(from, &center);
            if d < 20.0 {
                // edge of the exclusion disc, where potential drops to zero
                continue;
            }
            // the 200 contour has radius ~45 px
            assert!(d > 30.0 && d < 60.0, "segment at distance {d}");
            on_ring += 1;
        }
        assert!(on_ring > 0);
    }

    #[test]
    fn case_bits_follow_corner_order() {
        let grid = PotentialGrid {
            resolution: 1.0,
            width: 3.0,
            height: 3.0,
            cols: 2,
            rows: 2,
            values: vec![5.0, 0.0, 0.0, 0.0],
        };
        assert_eq!(grid.cell_case(0, 0, 1.0), Some(8));
        let grid = PotentialGrid {
            values: vec![0.0, 5.0, 5.0, 5.0],
            ..grid
        };
        assert_eq!(grid.cell_case(0, 0, 1.0), Some(7));
    }

    #[test]
    fn zero_and_negative_levels_are_cyan() {
        let cyan = Color32::from_rgba_unmultiplied(0, 255, 255, 153);
        let magenta = Color32::from_rgba_unmultiplied(255, 0, 255, 153);
        assert_eq!(level_color(0.0), cyan);
        assert_eq!(level_color(-50.0), cyan);
        assert_eq!(level_color(50.0), magenta);
        assert_eq!(level_color(0.0).a(), 153);
    }
}
