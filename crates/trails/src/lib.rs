#![deny(unsafe_code)]
//! Streak rendering for flowfield hosts.
//!
//! `flowfield-core` only moves particles. This crate turns successive
//! particle snapshots into the fading streak image: a [`TrailCanvas`]
//! accumulates segments from each particle's previous to current position,
//! [`pixel::canvas_to_rgba`] colors it, and (with the default `png` feature)
//! [`snapshot::write_png`] saves it.

pub mod canvas;
pub mod pixel;
pub mod style;

#[cfg(feature = "png")]
pub mod snapshot;

pub use canvas::TrailCanvas;
pub use style::{Rgb8, TrailStyle};
