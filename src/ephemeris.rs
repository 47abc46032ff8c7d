//! Ephemeris collaborator interface
//!
//! The radiation pressure core never computes celestial positions itself; it
//! pulls them through the [`Ephemeris`] trait once per body per evaluation.
//! Two providers are included:
//!
//! - [`FixedEphemeris`]: states set explicitly by the caller. The enclosing
//!   integrator pushes the current spacecraft state here between steps, and
//!   tests use it to pin exact geometries.
//! - [`LowPrecisionEphemeris`]: satkit's analytical Sun/Moon ephemeris
//!   (`lpephem`), no external data files needed. Accuracy: ~0.1° for the
//!   Sun, ~0.3° for the Moon.

use std::collections::HashMap;

use nalgebra::Vector3;
use satkit::{lpephem, Instant};

use crate::bodies::BodyState;
use crate::error::{RadPressError, Result};

/// Position and orientation lookup for a named body at a given epoch
pub trait Ephemeris: Send + Sync {
    /// State of `body` at `epoch` in the inertial frame
    fn state(&self, body: &str, epoch: &Instant) -> Result<BodyState>;
}

/// Ephemeris with explicitly supplied states
///
/// Bodies not present in the map are reported as unknown.
#[derive(Default)]
pub struct FixedEphemeris {
    states: HashMap<String, BodyState>,
}

impl FixedEphemeris {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style state insertion
    pub fn with_state(mut self, body: impl Into<String>, state: BodyState) -> Self {
        self.states.insert(body.into(), state);
        self
    }

    /// Set or replace the state of a body
    pub fn set_state(&mut self, body: impl Into<String>, state: BodyState) {
        self.states.insert(body.into(), state);
    }
}

impl Ephemeris for FixedEphemeris {
    fn state(&self, body: &str, _epoch: &Instant) -> Result<BodyState> {
        self.states
            .get(body)
            .cloned()
            .ok_or_else(|| RadPressError::UnknownBody(body.to_string()))
    }
}

/// Analytical Sun/Moon/Earth ephemeris backed by satkit's `lpephem`
///
/// Positions are geocentric (GCRF). Earth orientation comes from the
/// GCRF-to-ITRF frame transform; the Moon is returned with identity
/// orientation (no lunar orientation model in satkit), so lunar surface
/// grids are expressed in the principal-axis frame of the caller's
/// choosing. Spacecraft and other bodies unknown to the analytical model
/// must be supplied through overrides.
#[derive(Default)]
pub struct LowPrecisionEphemeris {
    overrides: HashMap<String, BodyState>,
}

impl LowPrecisionEphemeris {
    /// Create with no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace an override state (e.g. the spacecraft being propagated)
    pub fn set_override(&mut self, body: impl Into<String>, state: BodyState) {
        self.overrides.insert(body.into(), state);
    }
}

impl Ephemeris for LowPrecisionEphemeris {
    fn state(&self, body: &str, epoch: &Instant) -> Result<BodyState> {
        if let Some(state) = self.overrides.get(body) {
            return Ok(state.clone());
        }

        match body {
            "Sun" => {
                let sun_gcrf = lpephem::sun::pos_gcrf(epoch);
                Ok(BodyState::at_position(Vector3::new(
                    sun_gcrf[0],
                    sun_gcrf[1],
                    sun_gcrf[2],
                )))
            }
            "Moon" => {
                let moon_gcrf = lpephem::moon::pos_gcrf(epoch);
                Ok(BodyState::at_position(Vector3::new(
                    moon_gcrf[0],
                    moon_gcrf[1],
                    moon_gcrf[2],
                )))
            }
            "Earth" => {
                // GCRF is Earth-centered; orientation rotates ITRF into GCRF
                let q_gcrf_to_itrf = satkit::frametransform::qgcrf2itrf(epoch);
                Ok(BodyState {
                    position: Vector3::zeros(),
                    orientation: q_gcrf_to_itrf.inverse(),
                })
            }
            _ => Err(RadPressError::UnknownBody(body.to_string())),
        }
    }
}
