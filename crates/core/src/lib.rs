#![deny(unsafe_code)]
//! Core of the flowfield simulator: a time-varying 2D vector field built from
//! curl noise and drifting point forces, and a population of tracer particles
//! advected through it.
//!
//! Provides the noise functions, `FieldSource` trait, emitters, the
//! `FieldComposer`, `ParticleSystem`, `Simulation` orchestrator, `FlowConfig`,
//! and the injectable `RandomSource` with its default `Xorshift64`.
//!
//! The crate draws nothing and schedules nothing. A host calls
//! [`Simulation::resize`] once, then [`Simulation::step`] per frame, and reads
//! [`Simulation::particles`] in between.

pub mod bounds;
pub mod composer;
pub mod config;
pub mod emitter;
pub mod error;
pub mod field_source;
pub mod noise;
pub mod params;
pub mod particle;
pub mod prng;
pub mod simulation;

pub use bounds::Bounds;
pub use composer::FieldComposer;
pub use config::FlowConfig;
pub use emitter::{Emitters, Sink, Source, Vortex};
pub use error::FlowError;
pub use field_source::FieldSource;
pub use particle::{Particle, ParticleSystem};
pub use prng::{RandomSource, Xorshift64};
pub use simulation::{Simulation, StepStats};
