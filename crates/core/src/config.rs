//! Tunable constants of the flow field and particle population.
//!
//! A [`FlowConfig`] is immutable for the life of a session. Hosts build one
//! with [`Default`], struct update syntax, or [`FlowConfig::from_json`], and
//! hand it to [`Simulation`](crate::Simulation). Every constructor path runs
//! [`FlowConfig::validate`].

use crate::error::FlowError;
use crate::params::{require_count, require_f64};
use serde::Serialize;
use serde_json::{json, Value};

const DEFAULT_PARTICLE_COUNT: usize = 9000;
const DEFAULT_STEP_SIZE: f64 = 0.9;
const DEFAULT_FIELD_SCALE: f64 = 0.0045;
const DEFAULT_NOISE_STRENGTH: f64 = 0.7;
const DEFAULT_JET_STRENGTH: f64 = 0.6;
const DEFAULT_VORTEX_STRENGTH: f64 = 2.2;
const DEFAULT_VORTEX_COUNT: usize = 4;
const DEFAULT_CORE_RADIUS: f64 = 50.0;
const DEFAULT_CORE_REPEL: f64 = 2.5;
const DEFAULT_SINK_STRENGTH: f64 = 2.5;
const DEFAULT_SINK_COUNT: usize = 2;
const DEFAULT_SINK_RADIUS: f64 = 60.0;
const DEFAULT_SOURCE_COUNT: usize = 80;
const DEFAULT_SOURCE_RATE: usize = 3;
const DEFAULT_SPAWN_VELOCITY: f64 = 2.5;
const DEFAULT_SPAWN_SPREAD: f64 = 0.8;
const DEFAULT_BOUNDARY_MARGIN: f64 = 200.0;
const DEFAULT_BOUNDARY_STRENGTH: f64 = 0.4;

/// Largest accepted `particle_count`, and the largest burst one spawn event
/// may add (`source_count * source_rate`).
pub const MAX_PARTICLES: usize = 1_000_000;
/// Largest accepted count of any single emitter kind.
pub const MAX_EMITTERS: usize = 10_000;

/// Flat set of named numeric tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowConfig {
    /// Population at reseed, and the target kept by the cap.
    pub particle_count: usize,
    /// Base advection step length in world units.
    pub step_size: f64,
    /// World-to-noise coordinate scale.
    pub field_scale: f64,
    pub noise_strength: f64,
    pub jet_strength: f64,
    pub vortex_strength: f64,
    pub vortex_count: usize,
    /// Radius inside which a vortex pushes particles outward.
    pub core_radius: f64,
    pub core_repel: f64,
    pub sink_strength: f64,
    pub sink_count: usize,
    /// Particles closer than this to a sink are removed.
    pub sink_radius: f64,
    pub source_count: usize,
    /// Particles emitted per source on each spawn event.
    pub source_rate: usize,
    pub spawn_velocity: f64,
    /// Angular spread of spawn velocity, as a fraction of π.
    pub spawn_spread: f64,
    /// Width of the edge band in which containment applies.
    pub boundary_margin: f64,
    pub boundary_strength: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            step_size: DEFAULT_STEP_SIZE,
            field_scale: DEFAULT_FIELD_SCALE,
            noise_strength: DEFAULT_NOISE_STRENGTH,
            jet_strength: DEFAULT_JET_STRENGTH,
            vortex_strength: DEFAULT_VORTEX_STRENGTH,
            vortex_count: DEFAULT_VORTEX_COUNT,
            core_radius: DEFAULT_CORE_RADIUS,
            core_repel: DEFAULT_CORE_REPEL,
            sink_strength: DEFAULT_SINK_STRENGTH,
            sink_count: DEFAULT_SINK_COUNT,
            sink_radius: DEFAULT_SINK_RADIUS,
            source_count: DEFAULT_SOURCE_COUNT,
            source_rate: DEFAULT_SOURCE_RATE,
            spawn_velocity: DEFAULT_SPAWN_VELOCITY,
            spawn_spread: DEFAULT_SPAWN_SPREAD,
            boundary_margin: DEFAULT_BOUNDARY_MARGIN,
            boundary_strength: DEFAULT_BOUNDARY_STRENGTH,
        }
    }
}

impl FlowConfig {
    /// Builds a config from a JSON object, falling back to defaults for
    /// missing keys, then validates it.
    pub fn from_json(params: &Value) -> Result<Self, FlowError> {
        let d = Self::default();
        let config = Self {
            particle_count: require_count(params, "particle_count", d.particle_count)?,
            step_size: require_f64(params, "step_size", d.step_size)?,
            field_scale: require_f64(params, "field_scale", d.field_scale)?,
            noise_strength: require_f64(params, "noise_strength", d.noise_strength)?,
            jet_strength: require_f64(params, "jet_strength", d.jet_strength)?,
            vortex_strength: require_f64(params, "vortex_strength", d.vortex_strength)?,
            vortex_count: require_count(params, "vortex_count", d.vortex_count)?,
            core_radius: require_f64(params, "core_radius", d.core_radius)?,
            core_repel: require_f64(params, "core_repel", d.core_repel)?,
            sink_strength: require_f64(params, "sink_strength", d.sink_strength)?,
            sink_count: require_count(params, "sink_count", d.sink_count)?,
            sink_radius: require_f64(params, "sink_radius", d.sink_radius)?,
            source_count: require_count(params, "source_count", d.source_count)?,
            source_rate: require_count(params, "source_rate", d.source_rate)?,
            spawn_velocity: require_f64(params, "spawn_velocity", d.spawn_velocity)?,
            spawn_spread: require_f64(params, "spawn_spread", d.spawn_spread)?,
            boundary_margin: require_f64(params, "boundary_margin", d.boundary_margin)?,
            boundary_strength: require_f64(params, "boundary_strength", d.boundary_strength)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would only show up later as numeric anomalies,
    /// overflow or runaway allocation.
    pub fn validate(&self) -> Result<(), FlowError> {
        if !(1..=MAX_PARTICLES).contains(&self.particle_count) {
            return Err(FlowError::invalid_param(
                "particle_count",
                format!("must be in 1..={MAX_PARTICLES}, got {}", self.particle_count),
            ));
        }

        let emitter_counts = [
            ("vortex_count", self.vortex_count),
            ("source_count", self.source_count),
            ("sink_count", self.sink_count),
        ];
        for (name, count) in emitter_counts {
            if count > MAX_EMITTERS {
                return Err(FlowError::invalid_param(
                    name,
                    format!("must be at most {MAX_EMITTERS}, got {count}"),
                ));
            }
        }

        match self.source_count.checked_mul(self.source_rate) {
            Some(burst) if burst <= MAX_PARTICLES => {}
            _ => {
                return Err(FlowError::invalid_param(
                    "source_rate",
                    format!(
                        "source_count * source_rate must be at most {MAX_PARTICLES}, got {} * {}",
                        self.source_count, self.source_rate
                    ),
                ));
            }
        }

        let strictly_positive = [
            ("step_size", self.step_size),
            ("field_scale", self.field_scale),
            ("core_radius", self.core_radius),
            ("sink_radius", self.sink_radius),
        ];
        for (name, value) in strictly_positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(FlowError::invalid_param(
                    name,
                    format!("must be finite and > 0, got {value}"),
                ));
            }
        }

        let non_negative = [
            ("noise_strength", self.noise_strength),
            ("jet_strength", self.jet_strength),
            ("core_repel", self.core_repel),
            ("sink_strength", self.sink_strength),
            ("spawn_velocity", self.spawn_velocity),
            ("spawn_spread", self.spawn_spread),
            ("boundary_margin", self.boundary_margin),
            ("boundary_strength", self.boundary_strength),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FlowError::invalid_param(
                    name,
                    format!("must be finite and >= 0, got {value}"),
                ));
            }
        }

        // Spin carries the rotation sign, but a negative strength is still allowed.
        if !self.vortex_strength.is_finite() {
            return Err(FlowError::invalid_param(
                "vortex_strength",
                format!("must be finite, got {}", self.vortex_strength),
            ));
        }

        Ok(())
    }

    /// Population ceiling enforced after every step.
    pub fn population_cap(&self) -> usize {
        (self.particle_count as f64 * 1.2).floor() as usize
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        // Serializing a struct of plain numbers cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Schema describing every tunable: type, default, lower bound and meaning.
    pub fn schema() -> Value {
        json!({
            "particle_count": {
                "type": "integer", "default": DEFAULT_PARTICLE_COUNT, "min": 1, "max": MAX_PARTICLES,
                "description": "Population at reseed and the steady-state target"
            },
            "step_size": {
                "type": "number", "default": DEFAULT_STEP_SIZE, "min": 0.0, "exclusive_min": true,
                "description": "Base advection step length in world units"
            },
            "field_scale": {
                "type": "number", "default": DEFAULT_FIELD_SCALE, "min": 0.0, "exclusive_min": true,
                "description": "World-to-noise coordinate scale"
            },
            "noise_strength": {
                "type": "number", "default": DEFAULT_NOISE_STRENGTH, "min": 0.0,
                "description": "Weight of the curl-noise term"
            },
            "jet_strength": {
                "type": "number", "default": DEFAULT_JET_STRENGTH, "min": 0.0,
                "description": "Weight of the horizontal sinusoidal jet"
            },
            "vortex_strength": {
                "type": "number", "default": DEFAULT_VORTEX_STRENGTH,
                "description": "Circulation weight of every vortex"
            },
            "vortex_count": {
                "type": "integer", "default": DEFAULT_VORTEX_COUNT, "min": 0, "max": MAX_EMITTERS,
                "description": "Number of vortices"
            },
            "core_radius": {
                "type": "number", "default": DEFAULT_CORE_RADIUS, "min": 0.0, "exclusive_min": true,
                "description": "Radius of the repulsive vortex core"
            },
            "core_repel": {
                "type": "number", "default": DEFAULT_CORE_REPEL, "min": 0.0,
                "description": "Outward push at a vortex center"
            },
            "sink_strength": {
                "type": "number", "default": DEFAULT_SINK_STRENGTH, "min": 0.0,
                "description": "Attraction multiplier of every sink"
            },
            "sink_count": {
                "type": "integer", "default": DEFAULT_SINK_COUNT, "min": 0, "max": MAX_EMITTERS,
                "description": "Number of sinks"
            },
            "sink_radius": {
                "type": "number", "default": DEFAULT_SINK_RADIUS, "min": 0.0, "exclusive_min": true,
                "description": "Capture radius of every sink"
            },
            "source_count": {
                "type": "integer", "default": DEFAULT_SOURCE_COUNT, "min": 0, "max": MAX_EMITTERS,
                "description": "Number of sources"
            },
            "source_rate": {
                "type": "integer", "default": DEFAULT_SOURCE_RATE, "min": 0,
                "description": "Particles emitted per source per spawn event"
            },
            "spawn_velocity": {
                "type": "number", "default": DEFAULT_SPAWN_VELOCITY, "min": 0.0,
                "description": "Base speed stored on spawned particles"
            },
            "spawn_spread": {
                "type": "number", "default": DEFAULT_SPAWN_SPREAD, "min": 0.0,
                "description": "Angular spread of spawn velocity, fraction of pi"
            },
            "boundary_margin": {
                "type": "number", "default": DEFAULT_BOUNDARY_MARGIN, "min": 0.0,
                "description": "Width of the edge containment band"
            },
            "boundary_strength": {
                "type": "number", "default": DEFAULT_BOUNDARY_STRENGTH, "min": 0.0,
                "description": "Inward push at the very edge"
            }
        })
    }
}
