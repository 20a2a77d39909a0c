//! Immediate-mode rendering of the charge field onto a [`Surface`].
//!
//! Every call to [`render`] starts with a full clear and redraws everything
//! from the current charges; nothing carries over between frames.

mod contours;
mod vectors;

pub use contours::{contour_segments, PotentialGrid};
pub use vectors::{sample_arrows, Arrow};

use egui::{Color32, Pos2, Stroke, Vec2};
use nalgebra as na;

use crate::charge::{Charge, ChargeStore, Polarity};
use crate::config::FieldConfig;
use crate::field::FieldEvaluator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Vectors,
    Potential,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Vectors => RenderMode::Potential,
            RenderMode::Potential => RenderMode::Vectors,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RenderMode::Vectors => "Field Vectors",
            RenderMode::Potential => "Equipotential Lines",
        }
    }
}

/// A 2D drawing target in canvas pixel space (origin top-left).
pub trait Surface {
    fn clear(&mut self);
    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, outline: Stroke);
    fn text(&mut self, center: Pos2, text: &str, size: f32, color: Color32);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
    },
    Circle {
        center: Pos2,
        radius: f32,
        fill: Color32,
        outline: Stroke,
    },
    Text {
        center: Pos2,
        text: String,
        size: f32,
        color: Color32,
    },
}

/// Surface that records draw commands so a frame can be replayed later.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn lines(&self) -> impl Iterator<Item = (Pos2, Pos2, Stroke)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, stroke } => Some((*from, *to, *stroke)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for Scene {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn line(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.commands.push(DrawCommand::Line { from, to, stroke });
    }

    fn circle(&mut self, center: Pos2, radius: f32, fill: Color32, outline: Stroke) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
            outline,
        });
    }

    fn text(&mut self, center: Pos2, text: &str, size: f32, color: Color32) {
        self.commands.push(DrawCommand::Text {
            center,
            text: text.to_owned(),
            size,
            color,
        });
    }
}

/// Clears `surface` and draws one full frame in the given mode.
pub fn render<S: Surface>(
    store: &ChargeStore,
    config: &FieldConfig,
    mode: RenderMode,
    size: Vec2,
    surface: &mut S,
) {
    surface.clear();
    let evaluator = FieldEvaluator::new(store.charges(), config);
    match mode {
        RenderMode::Vectors => vectors::draw_field_vectors(&evaluator, config, size, surface),
        RenderMode::Potential => contours::draw_equipotentials(&evaluator, config, size, surface),
    }
    draw_charges(store, surface);
}

pub fn charge_radius(charge: &Charge) -> f32 {
    (15.0 + charge.magnitude * 5.0) as f32
}

fn charge_colors(polarity: Polarity) -> (Color32, Color32) {
    match polarity {
        Polarity::Positive => (
            Color32::from_rgb(255, 0, 255),
            Color32::from_rgb(255, 102, 255),
        ),
        Polarity::Negative => (
            Color32::from_rgb(0, 255, 255),
            Color32::from_rgb(102, 255, 255),
        ),
    }
}

/// Charges as filled circles labelled with sign and 1-based creation index.
pub fn draw_charges<S: Surface>(store: &ChargeStore, surface: &mut S) {
    for (label, charge) in store.labelled() {
        let radius = charge_radius(charge);
        let center = to_pos(charge.position);
        let (fill, outline) = charge_colors(charge.polarity);

        surface.circle(center, radius, fill, Stroke::new(3.0, outline));

        let font_size = (radius * 0.8).min(20.0);
        surface.text(center, &label, font_size, Color32::BLACK);
    }
}

/// Sample coordinates `0, pitch, 2*pitch, ...` strictly below `extent`.
pub(crate) fn grid_axis(extent: f64, pitch: f64) -> impl Iterator<Item = f64> {
    let count = if pitch > 0.0 && extent > 0.0 {
        (extent / pitch).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |i| i as f64 * pitch).filter(move |&v| v < extent)
}

pub(crate) fn to_pos(p: na::Point2<f64>) -> Pos2 {
    Pos2::new(p.x as f32, p.y as f32)
}
