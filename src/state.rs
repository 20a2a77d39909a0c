//! The simulation state container driven by pointer and control events.

use std::time::{Duration, Instant};

use egui::Vec2;
use log::{debug, warn};
use nalgebra as na;

use crate::charge::{ChargeId, ChargeStore, Polarity};
use crate::config::FieldConfig;
use crate::error::{FieldError, Result};
use crate::render::{self, RenderMode, Surface};

/// What a canvas click ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Added(ChargeId),
    /// The click landed on an existing charge.
    OnCharge(ChargeId),
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
    id: ChargeId,
}

/// Auto-dismissing overlap warning.
#[derive(Debug, Clone, Copy, Default)]
struct OverlapWarning {
    until: Option<Instant>,
}

impl OverlapWarning {
    fn raise(&mut self, now: Instant, duration: Duration) {
        self.until = Some(now + duration);
    }

    fn is_visible(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }
}

pub struct Simulation {
    config: FieldConfig,
    store: ChargeStore,
    mode: RenderMode,
    polarity: Polarity,
    size: Vec2,
    drag: Option<Drag>,
    warning: OverlapWarning,
    revision: u64,
}

impl Simulation {
    pub fn new(config: FieldConfig, size: Vec2) -> Self {
        let store = ChargeStore::new(&config);
        Self {
            config,
            store,
            mode: RenderMode::default(),
            polarity: Polarity::default(),
            size,
            drag: None,
            warning: OverlapWarning::default(),
            revision: 0,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn store(&self) -> &ChargeStore {
        &self.store
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Bumped on every change that alters the rendered picture.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dragging(&self) -> Option<ChargeId> {
        self.drag.map(|d| d.id)
    }

    #[inline]
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn set_polarity(&mut self, polarity: Polarity) {
        self.polarity = polarity;
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        if self.mode != mode {
            debug!("render mode -> {:?}", mode);
            self.mode = mode;
            self.bump();
        }
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn resize(&mut self, size: Vec2) {
        if self.size != size {
            self.size = size;
            self.bump();
        }
    }

    /// A click on empty canvas places a charge of the selected polarity.
    pub fn click(&mut self, point: na::Point2<f64>, now: Instant) -> ClickOutcome {
        if let Some(id) = self.store.hit_test(point, self.config.hit_radius) {
            return ClickOutcome::OnCharge(id);
        }
        match self.store.add(point, self.polarity) {
            Ok(id) => {
                self.bump();
                ClickOutcome::Added(id)
            }
            Err(err) => {
                warn!("{err}");
                self.warning.raise(now, self.config.warning_duration);
                ClickOutcome::Rejected
            }
        }
    }

    /// Grabs the charge under the pointer, if any.
    pub fn press(&mut self, point: na::Point2<f64>) -> Option<ChargeId> {
        let id = self.store.hit_test(point, self.config.hit_radius)?;
        self.drag = Some(Drag { id });
        Some(id)
    }

    /// Moves the grabbed charge. Overlapping moves are dropped and the charge
    /// stays at its last valid position.
    pub fn drag_to(&mut self, point: na::Point2<f64>) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        match self.store.move_to(drag.id, point) {
            Ok(()) => {
                self.bump();
                true
            }
            Err(FieldError::Overlap { .. }) => false,
            Err(err) => {
                warn!("{err}; ending drag");
                self.drag = None;
                false
            }
        }
    }

    pub fn release(&mut self) {
        self.drag = None;
    }

    pub fn set_magnitude(&mut self, id: ChargeId, value: f64) -> Result<()> {
        self.store.set_magnitude(id, value)?;
        self.bump();
        Ok(())
    }

    pub fn remove(&mut self, id: ChargeId) -> Result<()> {
        self.store.remove(id)?;
        if self.dragging() == Some(id) {
            self.drag = None;
        }
        self.bump();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.drag = None;
        self.bump();
    }

    pub fn warning_visible(&self, now: Instant) -> bool {
        self.warning.is_visible(now)
    }

    /// Time left on the overlap warning, for scheduling a repaint.
    pub fn warning_remaining(&self, now: Instant) -> Option<Duration> {
        self.warning
            .until
            .filter(|until| now < *until)
            .map(|until| until - now)
    }

    pub fn render<S: Surface>(&self, surface: &mut S) {
        render::render(&self.store, &self.config, self.mode, self.size, surface);
    }
}
