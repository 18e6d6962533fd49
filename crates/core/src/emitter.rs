//! Point emitters (vortices, sources, sinks) and their orbital drift.
//!
//! Emitter positions are never integrated. Each tick advances a phase angle
//! and the position is recomputed from a per-kind [`Orbit`]: an anchor at a
//! fixed fraction of the domain, offset along an ellipse whose radius grows
//! with the emitter's index. Emitters may overlap freely.

use crate::bounds::Bounds;
use crate::config::FlowConfig;
use crate::prng::RandomSource;
use glam::DVec2;

/// Shape of one emitter kind's drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Orbit center as a fraction of the domain size.
    pub anchor: DVec2,
    /// Drift radius of the emitter at index 0.
    pub base_radius: f64,
    /// Added drift radius per index.
    pub radius_step: f64,
    /// Horizontal stretch applied to the drift radius.
    pub stretch_x: f64,
    /// Per-index phase offset of the cosine (x) term.
    pub phase_x: f64,
    /// Per-index phase offset of the sine (y) term.
    pub phase_y: f64,
    /// Phase advance per tick per unit of emitter speed.
    pub rate: f64,
}

pub const VORTEX_ORBIT: Orbit = Orbit {
    anchor: DVec2::new(0.5, 0.5),
    base_radius: 40.0,
    radius_step: 10.0,
    stretch_x: 2.0,
    phase_x: 1.0,
    phase_y: 1.3,
    rate: 0.003,
};

pub const SOURCE_ORBIT: Orbit = Orbit {
    anchor: DVec2::new(0.3, 0.3),
    base_radius: 60.0,
    radius_step: 15.0,
    stretch_x: 1.0,
    phase_x: 2.0,
    phase_y: 1.5,
    rate: 0.004,
};

pub const SINK_ORBIT: Orbit = Orbit {
    anchor: DVec2::new(0.7, 0.7),
    base_radius: 70.0,
    radius_step: 12.0,
    stretch_x: 1.0,
    phase_x: 2.5,
    phase_y: 1.8,
    rate: 0.0035,
};

impl Orbit {
    /// Position of the emitter at `index` with phase `angle`.
    pub fn position(&self, bounds: &Bounds, index: usize, angle: f64) -> DVec2 {
        let i = index as f64;
        let drift = self.base_radius + i * self.radius_step;
        let center = self.anchor * bounds.size();
        center
            + DVec2::new(
                (angle + i * self.phase_x).cos() * drift * self.stretch_x,
                (angle + i * self.phase_y).sin() * drift,
            )
    }
}

/// A rotating point force.
#[derive(Debug, Clone, PartialEq)]
pub struct Vortex {
    pub pos: DVec2,
    /// Nominal orbit radius, drawn at reseed (the force law does not read it).
    pub radius: f64,
    /// Signed circulation multiplier: positive spins counter-clockwise.
    pub spin: f64,
    /// ±1 flag kept with the vortex state; the force law does not read it.
    pub polarity: f64,
    pub speed: f64,
    pub angle: f64,
}

/// A point that injects particles.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub pos: DVec2,
    pub speed: f64,
    pub angle: f64,
}

/// A point that attracts and captures particles.
#[derive(Debug, Clone, PartialEq)]
pub struct Sink {
    pub pos: DVec2,
    pub speed: f64,
    pub angle: f64,
}

impl Vortex {
    fn random<R: RandomSource + ?Sized>(bounds: &Bounds, rng: &mut R) -> Self {
        let pos = bounds.random_point(rng);
        let radius = rng.next_range(140.0, 300.0);
        let sign = rng.next_sign();
        let spin = sign * rng.next_range(0.8, 2.0);
        let polarity = rng.next_sign();
        let speed = rng.next_range(0.2, 0.6);
        let angle = rng.next_angle();
        Self {
            pos,
            radius,
            spin,
            polarity,
            speed,
            angle,
        }
    }
}

impl Source {
    fn random<R: RandomSource + ?Sized>(bounds: &Bounds, rng: &mut R) -> Self {
        let pos = bounds.random_point(rng);
        let speed = rng.next_range(0.15, 0.45);
        let angle = rng.next_angle();
        Self { pos, speed, angle }
    }
}

impl Sink {
    fn random<R: RandomSource + ?Sized>(bounds: &Bounds, rng: &mut R) -> Self {
        let pos = bounds.random_point(rng);
        let speed = rng.next_range(0.2, 0.55);
        let angle = rng.next_angle();
        Self { pos, speed, angle }
    }
}

/// Every emitter in the world, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Emitters {
    pub vortices: Vec<Vortex>,
    pub sources: Vec<Source>,
    pub sinks: Vec<Sink>,
}

impl Emitters {
    /// Draws a fresh set of emitters scattered over `bounds`.
    ///
    /// Spin magnitudes and speeds drawn here stay fixed until the next reseed.
    pub fn random<R: RandomSource + ?Sized>(
        config: &FlowConfig,
        bounds: &Bounds,
        rng: &mut R,
    ) -> Self {
        let vortices = (0..config.vortex_count)
            .map(|_| Vortex::random(bounds, rng))
            .collect();
        let sources = (0..config.source_count)
            .map(|_| Source::random(bounds, rng))
            .collect();
        let sinks = (0..config.sink_count)
            .map(|_| Sink::random(bounds, rng))
            .collect();
        Self {
            vortices,
            sources,
            sinks,
        }
    }

    /// Advances every emitter one tick along its orbit.
    pub fn drift(&mut self, bounds: &Bounds) {
        for (i, v) in self.vortices.iter_mut().enumerate() {
            v.angle += VORTEX_ORBIT.rate * v.speed;
            v.pos = VORTEX_ORBIT.position(bounds, i, v.angle);
        }
        for (i, s) in self.sources.iter_mut().enumerate() {
            s.angle += SOURCE_ORBIT.rate * s.speed;
            s.pos = SOURCE_ORBIT.position(bounds, i, s.angle);
        }
        for (i, s) in self.sinks.iter_mut().enumerate() {
            s.angle += SINK_ORBIT.rate * s.speed;
            s.pos = SINK_ORBIT.position(bounds, i, s.angle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::Xorshift64;

    fn bounds() -> Bounds {
        Bounds::new(800.0, 600.0).unwrap()
    }

    fn seeded(seed: u64) -> Emitters {
        Emitters::random(&FlowConfig::default(), &bounds(), &mut Xorshift64::new(seed))
    }

    #[test]
    fn random_respects_configured_counts() {
        let config = FlowConfig {
            vortex_count: 3,
            source_count: 5,
            sink_count: 1,
            ..FlowConfig::default()
        };
        let e = Emitters::random(&config, &bounds(), &mut Xorshift64::new(1));
        assert_eq!(e.vortices.len(), 3);
        assert_eq!(e.sources.len(), 5);
        assert_eq!(e.sinks.len(), 1);
    }

    #[test]
    fn random_vortex_ranges() {
        let e = seeded(77);
        for v in &e.vortices {
            assert!((140.0..300.0).contains(&v.radius));
            assert!((0.8..2.0).contains(&v.spin.abs()), "spin {}", v.spin);
            assert!(v.polarity == 1.0 || v.polarity == -1.0);
            assert!((0.2..0.6).contains(&v.speed));
        }
        for s in &e.sources {
            assert!((0.15..0.45).contains(&s.speed));
        }
        for s in &e.sinks {
            assert!((0.2..0.55).contains(&s.speed));
        }
    }

    #[test]
    fn same_seed_same_emitters() {
        assert_eq!(seeded(5), seeded(5));
        assert_ne!(seeded(5), seeded(6));
    }

    #[test]
    fn drift_advances_angle_by_rate_times_speed() {
        let mut e = seeded(9);
        let before: Vec<f64> = e.sinks.iter().map(|s| s.angle).collect();
        e.drift(&bounds());
        for (s, a0) in e.sinks.iter().zip(before) {
            assert!((s.angle - (a0 + 0.0035 * s.speed)).abs() < 1e-15);
        }
    }

    #[test]
    fn drift_places_vortex_on_its_orbit() {
        let mut e = seeded(11);
        e.drift(&bounds());
        for (i, v) in e.vortices.iter().enumerate() {
            let drift = 40.0 + 10.0 * i as f64;
            let expected = DVec2::new(
                400.0 + (v.angle + i as f64).cos() * drift * 2.0,
                300.0 + (v.angle + i as f64 * 1.3).sin() * drift,
            );
            assert!((v.pos - expected).length() < 1e-9);
        }
    }

    #[test]
    fn drift_keeps_spin_and_speed() {
        let mut e = seeded(13);
        let spins: Vec<(f64, f64)> = e.vortices.iter().map(|v| (v.spin, v.speed)).collect();
        for _ in 0..100 {
            e.drift(&bounds());
        }
        let after: Vec<(f64, f64)> = e.vortices.iter().map(|v| (v.spin, v.speed)).collect();
        assert_eq!(spins, after);
    }

    #[test]
    fn orbit_is_bounded_around_anchor() {
        let b = bounds();
        for k in 0..64 {
            let angle = k as f64 * 0.1;
            let p = SOURCE_ORBIT.position(&b, 2, angle);
            let center = DVec2::new(240.0, 180.0);
            assert!((p - center).length() <= (60.0 + 30.0) * 2f64.sqrt() + 1e-9);
        }
    }

    #[test]
    fn index_phase_staggers_emitters() {
        let b = bounds();
        let a = SINK_ORBIT.position(&b, 0, 1.0);
        let c = SINK_ORBIT.position(&b, 1, 1.0);
        assert!((a - c).length() > 1.0);
    }
}
