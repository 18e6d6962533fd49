//! Tracer particles and the policies that move, create and remove them.
//!
//! Particles are massless: each tick they step along the sampled field
//! direction, so the velocity stored at spawn time is carried but never
//! integrated. Order in the population is creation order, which is what
//! the population cap relies on to find the oldest particles.

use crate::bounds::Bounds;
use crate::config::FlowConfig;
use crate::emitter::{Sink, Source};
use crate::field_source::FieldSource;
use crate::prng::RandomSource;
use glam::DVec2;
use std::f64::consts::PI;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Chance per tick that every source emits.
pub const SPAWN_PROBABILITY: f64 = 0.3;
/// Spawned particles land within this distance of their source.
pub const SPAWN_RADIUS: f64 = 10.0;
/// Extra step length per unit of sampled speed.
const SPEED_STRETCH: f64 = 0.015;

/// A single tracer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current position, always inside the bounds after a step.
    pub pos: DVec2,
    /// Position before the most recent advection (unwrapped start of the
    /// streak segment drawn this tick).
    pub prev: DVec2,
    /// Velocity assigned at spawn. Not used for motion.
    pub vel: DVec2,
}

impl Particle {
    /// A particle at rest at `pos`.
    pub fn at(pos: DVec2) -> Self {
        Self {
            pos,
            prev: pos,
            vel: DVec2::ZERO,
        }
    }

    pub fn x(&self) -> f64 {
        self.pos.x
    }

    pub fn y(&self) -> f64 {
        self.pos.y
    }
}

/// Owner of the particle population.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    /// `count` particles at rest, uniformly distributed over `bounds`.
    pub fn scatter<R: RandomSource + ?Sized>(count: usize, bounds: &Bounds, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| Particle::at(bounds.random_point(rng)))
            .collect();
        Self { particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Appends a particle as the newest member of the population.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Rolls the per-tick spawn chance; on success every source emits
    /// `source_rate` particles. Returns how many were added.
    pub fn spawn<R: RandomSource + ?Sized>(
        &mut self,
        sources: &[Source],
        config: &FlowConfig,
        bounds: &Bounds,
        rng: &mut R,
    ) -> usize {
        if !rng.chance(SPAWN_PROBABILITY) {
            return 0;
        }
        let before = self.particles.len();
        // Capacity hint only; an unvalidated config must not panic here.
        let burst = sources.len().saturating_mul(config.source_rate);
        let _ = self.particles.try_reserve(burst);
        for source in sources {
            for _ in 0..config.source_rate {
                let angle = rng.next_angle();
                let dist = rng.next_f64() * SPAWN_RADIUS;
                let speed = config.spawn_velocity * rng.next_range(0.5, 2.0);
                let heading = angle + (rng.next_f64() - 0.5) * config.spawn_spread * PI;
                let pos = bounds.wrap(source.pos + DVec2::from_angle(angle) * dist);
                self.particles.push(Particle {
                    pos,
                    prev: pos,
                    vel: DVec2::from_angle(heading) * speed,
                });
            }
        }
        self.particles.len() - before
    }

    /// Moves every particle one step along `field` and wraps it into `bounds`.
    ///
    /// Each particle reads only the shared field, so the result does not
    /// depend on evaluation order.
    pub fn advect<F: FieldSource + ?Sized>(
        &mut self,
        field: &F,
        step_size: f64,
        bounds: &Bounds,
        time: f64,
    ) {
        let step = |p: &mut Particle| advect_particle(p, field, step_size, bounds, time);

        #[cfg(feature = "parallel")]
        self.particles.par_iter_mut().for_each(step);

        #[cfg(not(feature = "parallel"))]
        self.particles.iter_mut().for_each(step);
    }

    /// Removes every particle strictly inside `radius` of any sink.
    /// Returns how many were removed.
    pub fn cull(&mut self, sinks: &[Sink], radius: f64) -> usize {
        let before = self.particles.len();
        let r2 = radius * radius;
        self.particles
            .retain(|p| sinks.iter().all(|s| p.pos.distance_squared(s.pos) >= r2));
        before - self.particles.len()
    }

    /// When the population exceeds `floor(particle_count * 1.2)`, drops the
    /// oldest particles so that exactly `particle_count` remain.
    /// Returns how many were evicted.
    pub fn enforce_cap(&mut self, config: &FlowConfig) -> usize {
        let len = self.particles.len();
        if len <= config.population_cap() {
            return 0;
        }
        let excess = len - config.particle_count;
        self.particles.drain(..excess);
        excess
    }
}

/// One explicit Euler substep: unit field direction times a step length
/// that grows slightly with the sampled speed.
fn advect_particle<F: FieldSource + ?Sized>(
    p: &mut Particle,
    field: &F,
    step_size: f64,
    bounds: &Bounds,
    time: f64,
) {
    let v = field.sample(p.pos, time);
    // `max` also maps a NaN magnitude to the floor.
    let speed = v.length().max(1.0);
    let step = step_size * (1.0 + speed * SPEED_STRETCH);
    p.prev = p.pos;
    p.pos = bounds.wrap(p.pos + v / speed * step);
}
