//! Fading intensity buffer that accumulates particle streaks.
//!
//! Every pixel is a blend of three colors: the style's backdrop gradient,
//! the flat background and the stroke. The canvas stores two weights per
//! pixel, `ground` (backdrop share) and intensity (stroke share); the
//! background takes the remainder. A fresh canvas is all backdrop.
//!
//! Recording a tick first fades the whole buffer toward the background,
//! then composites every particle's segment from its previous to its
//! current position, once per covered pixel, like a single stroked path.
//! Both operations are convex blends, so `ground + intensity <= 1` holds.

use crate::style::TrailStyle;
use flowfield_core::{FlowError, Particle};
use glam::DVec2;

/// Row-major intensity buffer sized in whole pixels.
#[derive(Debug, Clone)]
pub struct TrailCanvas {
    width: usize,
    height: usize,
    data: Vec<f64>,
    ground: Vec<f64>,
    /// Pixels covered by the segments of the tick being recorded.
    covered: Vec<bool>,
}

impl TrailCanvas {
    /// Creates a fresh canvas showing only the backdrop.
    ///
    /// Returns `FlowError::InvalidDimensions` if either side is zero or
    /// `width * height` overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, FlowError> {
        let invalid = || FlowError::InvalidDimensions {
            width: width as f64,
            height: height as f64,
        };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let len = width.checked_mul(height).ok_or_else(invalid)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
            ground: vec![1.0; len],
            covered: vec![false; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the row-major intensities.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Row-major share of the backdrop gradient still visible per pixel.
    pub fn ground(&self) -> &[f64] {
        &self.ground
    }

    /// Intensity at `(x, y)`, or `None` outside the canvas.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.width && y < self.height).then(|| self.data[y * self.width + x])
    }

    /// Pulls every pixel toward the background by `amount` in [0, 1].
    pub fn fade(&mut self, amount: f64) {
        let keep = 1.0 - amount.clamp(0.0, 1.0);
        self.data.iter_mut().for_each(|v| *v *= keep);
        self.ground.iter_mut().for_each(|g| *g *= keep);
    }

    /// Fades, then draws one streak segment per particle.
    ///
    /// Segments longer than half the canvas are the wrap-around jump of a
    /// particle crossing an edge and are skipped.
    pub fn record(&mut self, particles: &[Particle], style: &TrailStyle) {
        self.fade(style.fade);
        let max_len = self.width.max(self.height) as f64 * 0.5;
        for p in particles {
            if p.prev.distance(p.pos) <= max_len {
                self.mark_segment(p.prev, p.pos);
            }
        }
        self.composite(style.stroke_alpha);
    }

    /// Draws a single segment immediately at opacity `alpha`.
    pub fn stroke(&mut self, from: DVec2, to: DVec2, alpha: f64) {
        self.mark_segment(from, to);
        self.composite(alpha);
    }

    /// Marks the pixels under a segment by sampling it once per pixel step.
    fn mark_segment(&mut self, from: DVec2, to: DVec2) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let p = from + delta * (i as f64 / steps as f64);
            if let Some(idx) = self.index(p) {
                self.covered[idx] = true;
            }
        }
    }

    fn index(&self, p: DVec2) -> Option<usize> {
        if !(p.x >= 0.0 && p.y >= 0.0) {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Blends every marked pixel toward full intensity, then clears marks.
    fn composite(&mut self, alpha: f64) {
        let a = alpha.clamp(0.0, 1.0);
        let pixels = self.data.iter_mut().zip(self.ground.iter_mut());
        for ((v, g), hit) in pixels.zip(self.covered.iter_mut()) {
            if *hit {
                *v = *v * (1.0 - a) + a;
                *g *= 1.0 - a;
                *hit = false;
            }
        }
    }
}
