//! Radiation pressure force models for numerical orbit propagation
//!
//! Computes the acceleration a spacecraft picks up from solar radiation and
//! from planetary albedo/thermal re-radiation. The pieces compose:
//!
//! - [`bodies::BodySet`] holds the participating celestial bodies and the
//!   spacecraft, each optionally carrying a radiation source or target model
//! - [`ephemeris::Ephemeris`] supplies body positions and orientations per
//!   evaluation epoch
//! - [`radiation::RadiationPressureAcceleration`] wires one source, one
//!   target and any occulters into a per-step evaluator an integrator can
//!   call
//!
//! Model variants (point vs. paneled source, cannonball vs. paneled target,
//! albedo and thermal radiosity, static vs. dynamic source paneling) are
//! selected at setup, either directly or through the serde-backed
//! [`radiation::SourceSettings`]/[`radiation::TargetSettings`].

pub mod bodies;
pub mod ephemeris;
pub mod error;
pub mod frames;
pub mod radiation;

pub use bodies::{Body, BodyId, BodySet, BodyState};
pub use ephemeris::{Ephemeris, FixedEphemeris, LowPrecisionEphemeris};
pub use error::{RadPressError, Result};
pub use radiation::RadiationPressureAcceleration;
