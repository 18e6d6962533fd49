//! The simulation orchestrator.
//!
//! A [`Simulation`] owns everything that changes over time: bounds, world
//! time, emitters, particles and the random source. It starts
//! uninitialized; [`Simulation::resize`] is the only way into the running
//! state, and every call to it is a hard reseed. History is discarded, not
//! rescaled, so hosts should call it on viewport changes knowing the
//! picture restarts.

use crate::bounds::Bounds;
use crate::composer::FieldComposer;
use crate::config::FlowConfig;
use crate::emitter::{Emitters, Sink, Source, Vortex};
use crate::error::FlowError;
use crate::particle::{Particle, ParticleSystem};
use crate::prng::{RandomSource, Xorshift64};
use serde::Serialize;

/// World time added by every [`Simulation::step`], independent of `dt`.
pub const TIME_STEP: f64 = 0.01;

/// Bookkeeping for the most recent step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StepStats {
    /// Steps taken since the last reseed.
    pub tick: u64,
    pub spawned: usize,
    /// Particles moved by the field this step.
    pub advected: usize,
    pub captured: usize,
    pub evicted: usize,
    /// Population after the step.
    pub population: usize,
    /// World time after the step.
    pub time: f64,
}

/// State that only exists once bounds are known.
#[derive(Debug, Clone)]
struct World {
    bounds: Bounds,
    emitters: Emitters,
    particles: ParticleSystem,
}

/// A flow-field particle simulation.
///
/// Generic over its [`RandomSource`] so tests and replays can pin every
/// random draw; the default is a seeded [`Xorshift64`].
#[derive(Debug, Clone)]
pub struct Simulation<R = Xorshift64> {
    config: FlowConfig,
    rng: R,
    world: Option<World>,
    time: f64,
    last_step: StepStats,
}

impl Simulation<Xorshift64> {
    /// Creates an uninitialized simulation drawing from `Xorshift64::new(seed)`.
    pub fn new(config: FlowConfig, seed: u64) -> Result<Self, FlowError> {
        Self::with_rng(config, Xorshift64::new(seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Creates an uninitialized simulation drawing from `rng`.
    ///
    /// Returns an error if `config` fails validation.
    pub fn with_rng(config: FlowConfig, rng: R) -> Result<Self, FlowError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            world: None,
            time: 0.0,
            last_step: StepStats::default(),
        })
    }

    /// Sets the world bounds and reseeds everything: fresh emitters,
    /// `particle_count` particles scattered uniformly, time back to zero.
    ///
    /// Calling this twice with the same size still draws a new world.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), FlowError> {
        let bounds = Bounds::new(width, height)?;
        self.reseed(bounds);
        Ok(())
    }

    /// Replaces the configuration. A running simulation is reseeded within
    /// its current bounds so emitters and particles match the new values.
    pub fn set_config(&mut self, config: FlowConfig) -> Result<(), FlowError> {
        config.validate()?;
        self.config = config;
        if let Some(bounds) = self.bounds() {
            self.reseed(bounds);
        }
        Ok(())
    }

    fn reseed(&mut self, bounds: Bounds) {
        let emitters = Emitters::random(&self.config, &bounds, &mut self.rng);
        let particles = ParticleSystem::scatter(self.config.particle_count, &bounds, &mut self.rng);
        self.world = Some(World {
            bounds,
            emitters,
            particles,
        });
        self.time = 0.0;
        self.last_step = StepStats {
            population: self.config.particle_count,
            ..StepStats::default()
        };
    }

    /// Advances one tick: emitter drift, spawn, sink capture, population
    /// cap, advection, then time.
    ///
    /// Capture tests the positions particles hold when the step begins, so
    /// anything inside a sink's radius is gone afterwards even if this
    /// step's field would have carried it out.
    ///
    /// `dt` must be finite and non-negative but does not scale the tick;
    /// world time always advances by [`TIME_STEP`].
    ///
    /// Returns `FlowError::Uninitialized` before the first `resize`.
    pub fn step(&mut self, dt: f64) -> Result<(), FlowError> {
        let world = self.world.as_mut().ok_or(FlowError::Uninitialized)?;
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(FlowError::invalid_param(
                "dt",
                format!("must be finite and >= 0, got {dt}"),
            ));
        }

        let bounds = world.bounds;
        world.emitters.drift(&bounds);

        let spawned =
            world
                .particles
                .spawn(&world.emitters.sources, &self.config, &bounds, &mut self.rng);

        let captured = world
            .particles
            .cull(&world.emitters.sinks, self.config.sink_radius);
        let evicted = world.particles.enforce_cap(&self.config);

        let composer = FieldComposer::new(&self.config, bounds, &world.emitters);
        let advected = world.particles.len();
        world
            .particles
            .advect(&composer, self.config.step_size, &bounds, self.time);

        self.time += TIME_STEP;
        self.last_step = StepStats {
            tick: self.last_step.tick + 1,
            spawned,
            advected,
            captured,
            evicted,
            population: world.particles.len(),
            time: self.time,
        };
        Ok(())
    }

    /// Particles in creation order. Empty before the first `resize`.
    pub fn particles(&self) -> &[Particle] {
        self.world
            .as_ref()
            .map(|w| w.particles.particles())
            .unwrap_or(&[])
    }

    pub fn is_running(&self) -> bool {
        self.world.is_some()
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.world.as_ref().map(|w| w.bounds)
    }

    pub fn last_step(&self) -> StepStats {
        self.last_step
    }

    pub fn vortices(&self) -> &[Vortex] {
        self.world
            .as_ref()
            .map(|w| w.emitters.vortices.as_slice())
            .unwrap_or(&[])
    }

    pub fn sources(&self) -> &[Source] {
        self.world
            .as_ref()
            .map(|w| w.emitters.sources.as_slice())
            .unwrap_or(&[])
    }

    pub fn sinks(&self) -> &[Sink] {
        self.world
            .as_ref()
            .map(|w| w.emitters.sinks.as_slice())
            .unwrap_or(&[])
    }

    /// The velocity field of the current world state, for hosts that want
    /// to visualize it directly. `None` before the first `resize`.
    pub fn field(&self) -> Option<FieldComposer<'_>> {
        self.world
            .as_ref()
            .map(|w| FieldComposer::new(&self.config, w.bounds, &w.emitters))
    }
}
