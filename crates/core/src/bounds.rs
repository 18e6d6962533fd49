//! Rectangular world domain with toroidal wrapping.

use crate::error::FlowError;
use crate::prng::RandomSource;
use glam::DVec2;

/// Width and height of the simulation domain, both finite and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    width: f64,
    height: f64,
}

impl Bounds {
    /// Returns `FlowError::InvalidDimensions` unless both sides are finite and > 0.
    pub fn new(width: f64, height: f64) -> Result<Self, FlowError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(FlowError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// True if `pos` lies in `[0, width) × [0, height)`.
    pub fn contains(&self, pos: DVec2) -> bool {
        (0.0..self.width).contains(&pos.x) && (0.0..self.height).contains(&pos.y)
    }

    /// Maps `pos` onto the torus `[0, width) × [0, height)`.
    pub fn wrap(&self, pos: DVec2) -> DVec2 {
        DVec2::new(wrap_axis(pos.x, self.width), wrap_axis(pos.y, self.height))
    }

    /// Uniformly random point inside the domain.
    pub fn random_point<R: RandomSource + ?Sized>(&self, rng: &mut R) -> DVec2 {
        let x = rng.next_f64() * self.width;
        let y = rng.next_f64() * self.height;
        // Rounding can land exactly on the far edge for some sizes.
        self.wrap(DVec2::new(x, y))
    }
}

/// Toroidal wrap of one coordinate into `[0, size)`.
///
/// Non-finite input maps to 0 so a corrupted sample cannot escape the domain.
fn wrap_axis(v: f64, size: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    let w = v.rem_euclid(size);
    // rem_euclid of a tiny negative value rounds up to `size`.
    if w < size {
        w
    } else {
        0.0
    }
}
