use std::fmt;

use log::{debug, info, warn};
use nalgebra as na;

use crate::config::FieldConfig;
use crate::error::{FieldError, Result};

/// Opaque charge handle. Never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChargeId(u64);

impl fmt::Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    #[default]
    Positive,
    Negative,
}

impl Polarity {
    pub fn sign(self) -> f64 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Polarity::Positive => '+',
            Polarity::Negative => '-',
        }
    }

    pub fn is_positive(self) -> bool {
        self == Polarity::Positive
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    pub id: ChargeId,
    pub position: na::Point2<f64>,
    pub magnitude: f64,
    pub polarity: Polarity,
}

impl Charge {
    /// Magnitude with the polarity sign applied.
    pub fn signed_magnitude(&self) -> f64 {
        self.polarity.sign() * self.magnitude
    }
}

/// Owns the point charges and enforces the minimum separation between them.
///
/// Charges are kept in creation order, which is what the 1-based labels shown
/// to the user are derived from.
#[derive(Debug, Clone)]
pub struct ChargeStore {
    charges: Vec<Charge>,
    next_id: u64,
    min_separation: f64,
    min_magnitude: f64,
    max_magnitude: f64,
    default_magnitude: f64,
}

impl ChargeStore {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            charges: Vec::new(),
            next_id: 0,
            min_separation: config.min_separation,
            min_magnitude: config.min_magnitude,
            max_magnitude: config.max_magnitude,
            default_magnitude: config.default_magnitude,
        }
    }

    pub fn min_separation(&self) -> f64 {
        self.min_separation
    }

    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn get(&self, id: ChargeId) -> Option<&Charge> {
        self.charges.iter().find(|c| c.id == id)
    }

    fn index_of(&self, id: ChargeId) -> Result<usize> {
        self.charges
            .iter()
            .position(|c| c.id == id)
            .ok_or(FieldError::UnknownCharge(id))
    }

    /// True when `position` keeps at least the minimum separation from every
    /// charge other than `exclude`.
    pub fn is_position_valid(&self, position: na::Point2<f64>, exclude: Option<ChargeId>) -> bool {
        !self.charges.iter().any(|c| {
            Some(c.id) != exclude && na::distance(&c.position, &position) < self.min_separation
        })
    }

    fn check_position(&self, position: na::Point2<f64>, exclude: Option<ChargeId>) -> Result<()> {
        if self.is_position_valid(position, exclude) {
            Ok(())
        } else {
            Err(FieldError::Overlap {
                x: position.x,
                y: position.y,
                min_separation: self.min_separation,
            })
        }
    }

    pub fn add(&mut self, position: na::Point2<f64>, polarity: Polarity) -> Result<ChargeId> {
        self.check_position(position, None)?;

        let id = ChargeId(self.next_id);
        self.next_id += 1;
        self.charges.push(Charge {
            id,
            position,
            magnitude: self.default_magnitude,
            polarity,
        });
        debug!("added {}{} at ({:.1}, {:.1})", polarity.symbol(), id, position.x, position.y);
        Ok(id)
    }

    /// Moves a charge. An overlapping target is rejected and the charge stays
    /// where it was.
    pub fn move_to(&mut self, id: ChargeId, position: na::Point2<f64>) -> Result<()> {
        let idx = self.index_of(id)?;
        self.check_position(position, Some(id))?;
        self.charges[idx].position = position;
        debug!("moved {id} to ({:.1}, {:.1})", position.x, position.y);
        Ok(())
    }

    /// Sets the magnitude, clamped into the configured range. Non-finite
    /// values leave the charge untouched.
    pub fn set_magnitude(&mut self, id: ChargeId, value: f64) -> Result<()> {
        let idx = self.index_of(id)?;
        if !value.is_finite() {
            warn!("ignoring non-finite magnitude {value} for {id}");
            return Ok(());
        }
        self.charges[idx].magnitude = value.clamp(self.min_magnitude, self.max_magnitude);
        Ok(())
    }

    pub fn remove(&mut self, id: ChargeId) -> Result<Charge> {
        let idx = self.index_of(id)?;
        let removed = self.charges.remove(idx);
        debug!("removed {id}");
        Ok(removed)
    }

    pub fn clear(&mut self) {
        if !self.charges.is_empty() {
            info!("clearing {} charges", self.charges.len());
        }
        self.charges.clear();
    }

    /// First charge (in creation order) whose centre lies strictly within
    /// `radius` of `point`.
    pub fn hit_test(&self, point: na::Point2<f64>, radius: f64) -> Option<ChargeId> {
        self.charges
            .iter()
            .find(|c| na::distance(&c.position, &point) < radius)
            .map(|c| c.id)
    }

    /// Charges in creation order with their user-facing labels such as `+1`
    /// or `-3`. Numbers shift down when an earlier charge is removed.
    pub fn labelled(&self) -> impl Iterator<Item = (String, &Charge)> + '_ {
        self.charges
            .iter()
            .enumerate()
            .map(|(idx, c)| (format!("{}{}", c.polarity.symbol(), idx + 1), c))
    }

    pub fn min_pairwise_distance(&self) -> Option<f64> {
        let mut min: Option<f64> = None;
        for (i, a) in self.charges.iter().enumerate() {
            for b in &self.charges[i + 1..] {
                let d = na::distance(&a.position, &b.position);
                min = Some(min.map_or(d, |m| m.min(d)));
            }
        }
        min
    }
}
