use std::time::Instant;

use chargefield::{ChargeId, DrawCommand, Polarity, RenderMode, Scene, Simulation};
use eframe::egui;
use log::warn;
use nalgebra as na;

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(26, 26, 26);
const POSITIVE_ACCENT: egui::Color32 = egui::Color32::from_rgb(153, 0, 153);
const NEGATIVE_ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 153, 153);

pub struct FieldSimulator {
    sim: Simulation,
    scene: Scene,
    rendered_revision: Option<u64>,
    show_controls: bool,
}

impl FieldSimulator {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            scene: Scene::new(),
            rendered_revision: None,
            show_controls: true,
        }
    }

    fn show(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Electric Field Simulator");
                let label = if self.show_controls { "Hide Controls" } else { "Show Controls" };
                if ui.button(label).clicked() {
                    self.show_controls = !self.show_controls;
                }
            });
        });

        if self.show_controls {
            egui::SidePanel::left("controls").show(ctx, |ui| self.controls(ui));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.canvas(ui));
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Add Charge");
        ui.horizontal(|ui| {
            let mut polarity = self.sim.polarity();
            ui.selectable_value(&mut polarity, Polarity::Positive, "Positive (+)");
            ui.selectable_value(&mut polarity, Polarity::Negative, "Negative (−)");
            self.sim.set_polarity(polarity);
        });

        ui.separator();
        ui.heading("Visualization");
        ui.horizontal(|ui| {
            let mut mode = self.sim.mode();
            ui.selectable_value(&mut mode, RenderMode::Vectors, RenderMode::Vectors.label());
            ui.selectable_value(&mut mode, RenderMode::Potential, RenderMode::Potential.label());
            self.sim.set_mode(mode);
        });

        ui.separator();
        ui.horizontal(|ui| {
            ui.heading(format!("Charges ({})", self.sim.store().len()));
            if ui.button("Clear All").clicked() {
                self.sim.clear();
            }
        });
        if self.sim.store().is_empty() {
            ui.label("Click on the canvas to place a charge");
        }

        let charges: Vec<(String, ChargeId, Polarity, f64)> = self
            .sim
            .store()
            .labelled()
            .map(|(label, c)| (label, c.id, c.polarity, c.magnitude))
            .collect();
        let (min_mag, max_mag) = (self.sim.config().min_magnitude, self.sim.config().max_magnitude);

        let mut removed = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (label, id, polarity, magnitude) in charges {
                let accent = if polarity.is_positive() { POSITIVE_ACCENT } else { NEGATIVE_ACCENT };
                egui::Frame::group(ui.style())
                    .stroke(egui::Stroke::new(2.0, accent))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.colored_label(accent, format!("Charge {label}"));
                            if ui.small_button("✖").clicked() {
                                removed = Some(id);
                            }
                        });
                        let mut value = magnitude;
                        let slider = egui::Slider::new(&mut value, min_mag..=max_mag)
                            .step_by(0.1)
                            .fixed_decimals(1)
                            .text("Magnitude");
                        if ui.add(slider).changed() {
                            if let Err(e) = self.sim.set_magnitude(id, value) {
                                warn!("{e}");
                            }
                        }
                    });
            }
        });

        if let Some(id) = removed {
            if let Err(e) = self.sim.remove(id) {
                warn!("{e}");
            }
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        self.sim.resize(rect.size());

        let now = Instant::now();
        let to_canvas = |p: egui::Pos2| na::Point2::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64);

        if response.drag_started() {
            if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
                self.sim.press(to_canvas(origin));
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.sim.drag_to(to_canvas(pos));
            }
        }
        if response.drag_released() {
            self.sim.release();
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.sim.click(to_canvas(pos), now);
            }
        }

        if self.rendered_revision != Some(self.sim.revision()) {
            self.sim.render(&mut self.scene);
            self.rendered_revision = Some(self.sim.revision());
        }

        painter.rect_filled(rect, 0.0, BACKGROUND);
        paint_scene(&painter, rect.min.to_vec2(), &self.scene);

        if self.sim.warning_visible(now) {
            let banner = egui::Rect::from_center_size(
                egui::pos2(rect.center().x, rect.min.y + 30.0),
                egui::vec2(360.0, 36.0),
            );
            painter.rect_filled(banner, 6.0, egui::Color32::from_rgba_unmultiplied(153, 0, 0, 220));
            painter.text(
                banner.center(),
                egui::Align2::CENTER_CENTER,
                "Charges cannot be placed that close together",
                egui::FontId::proportional(15.0),
                egui::Color32::WHITE,
            );
        }
        if let Some(left) = self.sim.warning_remaining(now) {
            ui.ctx().request_repaint_after(left);
        }
    }
}

fn paint_scene(painter: &egui::Painter, offset: egui::Vec2, scene: &Scene) {
    for command in scene.commands() {
        match command {
            DrawCommand::Line { from, to, stroke } => {
                painter.line_segment([*from + offset, *to + offset], *stroke);
            }
            DrawCommand::Circle { center, radius, fill, outline } => {
                painter.circle(*center + offset, *radius, *fill, *outline);
            }
            DrawCommand::Text { center, text, size, color } => {
                painter.text(
                    *center + offset,
                    egui::Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(*size),
                    *color,
                );
            }
        }
    }
}

impl eframe::App for FieldSimulator {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}
