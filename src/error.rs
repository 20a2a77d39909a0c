//! Error types for charge placement.

use thiserror::Error;

use crate::charge::ChargeId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("position ({x:.1}, {y:.1}) is closer than {min_separation} px to another charge")]
    Overlap { x: f64, y: f64, min_separation: f64 },

    #[error("no charge with id {0}")]
    UnknownCharge(ChargeId),
}

pub type Result<T> = std::result::Result<T, FieldError>;
