//! Field sources: 2D velocity contributions sampled at a point and time.
//!
//! The composed flow is built from these pieces plus the emitter forces in
//! [`composer`](crate::composer). All implementations are deterministic and
//! free of interior state, so one instance can be sampled from many threads.

use crate::noise::curl_noise;
use glam::DVec2;
use std::f64::consts::PI;

/// A source of 2D velocity values.
pub trait FieldSource: Send + Sync {
    /// Sample the field at `pos` at the given time.
    fn sample(&self, pos: DVec2, time: f64) -> DVec2;
}

/// Curl noise sampled at scaled world coordinates and scaled time.
#[derive(Debug, Clone, Copy)]
pub struct CurlNoiseField {
    /// World-to-noise coordinate scale.
    pub scale: f64,
    /// World-to-noise time scale.
    pub time_scale: f64,
    pub strength: f64,
}

/// Horizontal jet whose magnitude is a sinusoid of the vertical fraction
/// of the domain, drifting with time.
#[derive(Debug, Clone, Copy)]
pub struct JetField {
    pub height: f64,
    /// Number of half-waves across the domain height.
    pub bands: f64,
    /// Phase advance per unit of time.
    pub drift: f64,
    pub strength: f64,
}

impl FieldSource for CurlNoiseField {
    fn sample(&self, pos: DVec2, time: f64) -> DVec2 {
        let (vx, vy) = curl_noise(pos.x * self.scale, pos.y * self.scale, time * self.time_scale);
        DVec2::new(vx, vy) * self.strength
    }
}

impl FieldSource for JetField {
    fn sample(&self, pos: DVec2, time: f64) -> DVec2 {
        let phase = pos.y / self.height * PI * self.bands + time * self.drift;
        DVec2::new(phase.sin() * self.strength, 0.0)
    }
}
