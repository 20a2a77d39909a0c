//! Interactive 2D electric field of point charges.
//!
//! [`ChargeStore`] owns the charges, [`FieldEvaluator`] computes field and
//! potential from a snapshot of them, and [`render`] draws either field
//! vectors or equipotential contours onto any [`Surface`]. [`Simulation`]
//! ties these together behind pointer-style operations.

pub mod charge;
pub mod config;
pub mod error;
pub mod field;
pub mod render;
pub mod state;

pub use charge::{Charge, ChargeId, ChargeStore, Polarity};
pub use config::FieldConfig;
pub use error::{FieldError, Result};
pub use field::FieldEvaluator;
pub use render::{render, DrawCommand, RenderMode, Scene, Surface};
pub use state::{ClickOutcome, Simulation};
