//! Composition of every force in the world into one velocity sample.
//!
//! A [`FieldComposer`] borrows a config, the bounds and an emitter snapshot
//! and is otherwise stateless. Terms are summed in velocity space, then the
//! total is multiplied by [`OUTPUT_SCALE`]:
//!
//! 1. curl noise at `(x, y) * field_scale * 3`, time `* 0.05`
//! 2. horizontal jet `sin(y/h * 6π + 0.6t) * jet_strength * 0.15`
//! 3. vortex circulation plus a repulsive core
//! 4. softened sink attraction
//! 5. quadratic boundary containment

use crate::bounds::Bounds;
use crate::config::FlowConfig;
use crate::emitter::{Emitters, Vortex};
use crate::field_source::{CurlNoiseField, FieldSource, JetField};
use glam::DVec2;

/// Uniform factor applied to the summed velocity.
pub const OUTPUT_SCALE: f64 = 60.0;

const NOISE_SPACE_SCALE: f64 = 3.0;
const NOISE_TIME_SCALE: f64 = 0.05;
const JET_BANDS: f64 = 6.0;
const JET_DRIFT: f64 = 0.6;
const JET_WEIGHT: f64 = 0.15;
const VORTEX_SOFTENING: f64 = 1000.0;
const VORTEX_CIRCULATION: f64 = 100.0;
const SINK_SOFTENING: f64 = 500.0;
const SINK_PULL: f64 = 80.0;

/// Velocity field of one world state.
pub struct FieldComposer<'a> {
    config: &'a FlowConfig,
    bounds: Bounds,
    emitters: &'a Emitters,
    noise: CurlNoiseField,
    jet: JetField,
}

impl<'a> FieldComposer<'a> {
    pub fn new(config: &'a FlowConfig, bounds: Bounds, emitters: &'a Emitters) -> Self {
        Self {
            config,
            bounds,
            emitters,
            noise: CurlNoiseField {
                scale: config.field_scale * NOISE_SPACE_SCALE,
                time_scale: NOISE_TIME_SCALE,
                strength: config.noise_strength,
            },
            jet: JetField {
                height: bounds.height(),
                bands: JET_BANDS,
                drift: JET_DRIFT,
                strength: config.jet_strength * JET_WEIGHT,
            },
        }
    }

    /// Velocity at `(x, y)` at time `t`.
    pub fn evaluate(&self, x: f64, y: f64, t: f64) -> (f64, f64) {
        let v = self.sample(DVec2::new(x, y), t);
        (v.x, v.y)
    }
}

impl FieldSource for FieldComposer<'_> {
    fn sample(&self, pos: DVec2, time: f64) -> DVec2 {
        let c = self.config;
        let mut v = self.noise.sample(pos, time) + self.jet.sample(pos, time);
        for vortex in &self.emitters.vortices {
            v += vortex_velocity(vortex, pos, c);
        }
        for sink in &self.emitters.sinks {
            v += sink_velocity(sink.pos, pos, c.sink_strength);
        }
        v += boundary_push(pos, &self.bounds, c.boundary_margin, c.boundary_strength);
        v * OUTPUT_SCALE
    }
}

/// Circulation around `vortex` plus the outward core push, unscaled.
pub fn vortex_velocity(vortex: &Vortex, pos: DVec2, config: &FlowConfig) -> DVec2 {
    let d = pos - vortex.pos;
    let r2 = d.length_squared() + VORTEX_SOFTENING;
    let r = r2.sqrt();
    let radial = d / r;
    let tangent = DVec2::new(-d.y, d.x) / r;
    let circulation = config.vortex_strength * vortex.spin * VORTEX_CIRCULATION / r2;

    let core_push = if r < config.core_radius {
        config.core_repel * (1.0 - r / config.core_radius)
    } else {
        0.0
    };
    tangent * circulation + radial * core_push
}

/// Softened pull from `pos` toward `sink`, unscaled.
pub fn sink_velocity(sink: DVec2, pos: DVec2, strength: f64) -> DVec2 {
    let d = sink - pos;
    let r2 = d.length_squared() + SINK_SOFTENING;
    let r = r2.sqrt();
    d / r * (SINK_PULL / r2 * strength)
}

/// Inward push within `margin` of an edge, `strength * (1 - f²)` where `f`
/// is the distance to the edge as a fraction of the margin.
///
/// On a domain narrower than two margins the left and top bands win.
pub fn boundary_push(pos: DVec2, bounds: &Bounds, margin: f64, strength: f64) -> DVec2 {
    if margin <= 0.0 {
        return DVec2::ZERO;
    }
    let axis = |p: f64, size: f64| {
        if p < margin {
            let f = p / margin;
            (1.0 - f * f) * strength
        } else if p > size - margin {
            let f = (size - p) / margin;
            -(1.0 - f * f) * strength
        } else {
            0.0
        }
    };
    DVec2::new(
        axis(pos.x, bounds.width()),
        axis(pos.y, bounds.height()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> FlowConfig {
        FlowConfig {
            noise_strength: 0.0,
            jet_strength: 0.0,
            vortex_count: 0,
            sink_count: 0,
            source_count: 0,
            ..FlowConfig::default()
        }
    }

    fn vortex_at(x: f64, y: f64, spin: f64) -> Vortex {
        Vortex {
            pos: DVec2::new(x, y),
            radius: 200.0,
            spin,
            polarity: 1.0,
            speed: 0.3,
            angle: 0.0,
        }
    }

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0).unwrap()
    }

    #[test]
    fn counter_clockwise_vortex_pushes_positive_y_on_its_right() {
        let config = quiet_config();
        let emitters = Emitters {
            vortices: vec![vortex_at(400.0, 300.0, 1.0)],
            ..Emitters::default()
        };
        let composer = FieldComposer::new(&config, bounds(), &emitters);
        let (vx, vy) = composer.evaluate(500.0, 300.0, 0.0);
        assert!(vy > 0.0, "expected counter-clockwise push, got vy = {vy}");
        assert!(vx.abs() < 1e-9, "radial component should vanish, got vx = {vx}");
        // 2.2 * 100 / 11000 * 100/sqrt(11000) * 60
        let expected = 2.2 * 100.0 / 11_000.0 * (100.0 / 11_000f64.sqrt()) * 60.0;
        assert!((vy - expected).abs() < 1e-9, "expected {expected}, got {vy}");
    }

    #[test]
    fn negative_spin_reverses_rotation() {
        let config = quiet_config();
        let v = vortex_velocity(&vortex_at(0.0, 0.0, -1.0), DVec2::new(100.0, 0.0), &config);
        assert!(v.y < 0.0);
    }

    #[test]
    fn vortex_core_pushes_outward() {
        let config = quiet_config();
        let vortex = vortex_at(0.0, 0.0, 1.0);
        // r = sqrt(100 + 1000) ≈ 33.2 < core radius 50.
        let v = vortex_velocity(&vortex, DVec2::new(10.0, 0.0), &config);
        assert!(v.x > 0.0, "core should repel along +x, got {v:?}");
    }

    #[test]
    fn vortex_at_particle_position_is_finite() {
        let config = quiet_config();
        let v = vortex_velocity(&vortex_at(5.0, 5.0, 2.0), DVec2::new(5.0, 5.0), &config);
        assert!(v.is_finite());
        assert_eq!(v, DVec2::ZERO);
    }

    #[test]
    fn sink_pulls_toward_itself() {
        let v = sink_velocity(DVec2::new(100.0, 100.0), DVec2::new(0.0, 100.0), 2.5);
        assert!(v.x > 0.0);
        assert!(v.y.abs() < 1e-15);
        let r2: f64 = 10_000.0 + 500.0;
        let expected = 100.0 / r2.sqrt() * (80.0 / r2 * 2.5);
        assert!((v.x - expected).abs() < 1e-15);
    }

    #[test]
    fn sink_on_top_of_particle_is_finite() {
        let v = sink_velocity(DVec2::new(3.0, 4.0), DVec2::new(3.0, 4.0), 2.5);
        assert_eq!(v, DVec2::ZERO);
    }

    #[test]
    fn boundary_is_zero_in_interior() {
        let v = boundary_push(DVec2::new(400.0, 300.0), &bounds(), 200.0, 0.4);
        assert_eq!(v, DVec2::ZERO);
    }

    #[test]
    fn boundary_pushes_inward_from_every_edge() {
        let b = bounds();
        assert!(boundary_push(DVec2::new(10.0, 300.0), &b, 200.0, 0.4).x > 0.0);
        assert!(boundary_push(DVec2::new(790.0, 300.0), &b, 200.0, 0.4).x < 0.0);
        assert!(boundary_push(DVec2::new(400.0, 10.0), &b, 200.0, 0.4).y > 0.0);
        assert!(boundary_push(DVec2::new(400.0, 590.0), &b, 200.0, 0.4).y < 0.0);
    }

    #[test]
    fn boundary_decays_quadratically() {
        let b = bounds();
        let at_edge = boundary_push(DVec2::new(0.0, 300.0), &b, 200.0, 0.4).x;
        let halfway = boundary_push(DVec2::new(100.0, 300.0), &b, 200.0, 0.4).x;
        assert!((at_edge - 0.4).abs() < 1e-12);
        assert!((halfway - 0.3).abs() < 1e-12);
    }

    #[test]
    fn boundary_with_zero_margin_is_zero() {
        let v = boundary_push(DVec2::new(-5.0, 0.0), &bounds(), 0.0, 0.4);
        assert_eq!(v, DVec2::ZERO);
    }

    #[test]
    fn quiet_world_center_is_still() {
        let config = quiet_config();
        let emitters = Emitters::default();
        let composer = FieldComposer::new(&config, bounds(), &emitters);
        assert_eq!(composer.evaluate(400.0, 300.0, 1.0), (0.0, 0.0));
    }

    #[test]
    fn jet_only_contributes_horizontally() {
        let config = FlowConfig {
            jet_strength: 1.0,
            ..quiet_config()
        };
        let emitters = Emitters::default();
        let composer = FieldComposer::new(&config, bounds(), &emitters);
        let (vx, vy) = composer.evaluate(400.0, 25.0 + 200.0, 0.0);
        assert_eq!(vy, 0.0);
        // y = 225 → sin(225/600 · 6π) = sin(2.25π) = √2/2.
        let expected = (2.25 * std::f64::consts::PI).sin() * 0.15 * 60.0;
        assert!((vx - expected).abs() < 1e-9);
    }

    mod proptests {
        use super::*;
        use crate::prng::Xorshift64;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn composed_field_is_finite(seed: u64, x in 0.0_f64..800.0, y in 0.0_f64..600.0, t in 0.0_f64..100.0) {
                let config = FlowConfig::default();
                let b = bounds();
                let mut emitters = Emitters::random(&config, &b, &mut Xorshift64::new(seed));
                emitters.drift(&b);
                let composer = FieldComposer::new(&config, b, &emitters);
                let (vx, vy) = composer.evaluate(x, y, t);
                prop_assert!(vx.is_finite() && vy.is_finite());
            }

            #[test]
            fn boundary_never_pushes_outward(x in 0.0_f64..800.0, y in 0.0_f64..600.0) {
                let v = boundary_push(DVec2::new(x, y), &bounds(), 200.0, 0.4);
                if x < 400.0 { prop_assert!(v.x >= 0.0) } else { prop_assert!(v.x <= 0.0) }
                if y < 300.0 { prop_assert!(v.y >= 0.0) } else { prop_assert!(v.y <= 0.0) }
            }
        }
    }
}
