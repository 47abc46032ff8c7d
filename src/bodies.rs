//! Celestial body and spacecraft records
//!
//! A [`Body`] models anything that participates in a radiation pressure
//! scenario: the Sun (a source), a planet or moon (a reflecting/emitting
//! source and an occulter), or a spacecraft (a target). Bodies live in a
//! [`BodySet`] arena and are addressed by copyable [`BodyId`] indices, so
//! model variants can reference other bodies without ownership cycles.
//!
//! Positions and orientations are refreshed from the external ephemeris
//! collaborator once per evaluation; everything else is fixed at setup.

use nalgebra::{UnitQuaternion, Vector3};
use satkit::Instant;

use crate::ephemeris::Ephemeris;
use crate::error::Result;
use crate::radiation::source::RadiationSourceModel;
use crate::radiation::target::RadiationPressureTargetModel;

/// Index of a body within a [`BodySet`]
///
/// Ids are issued by [`BodySet::add`] and stay valid for the lifetime of the
/// issuing set, since bodies are never removed. An id is only meaningful for
/// the set that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(usize);

/// Instantaneous translational and rotational state of a body
///
/// `orientation` rotates body-fixed vectors into the inertial frame.
#[derive(Debug, Clone)]
pub struct BodyState {
    /// Position in the inertial frame (meters)
    pub position: Vector3<f64>,

    /// Rotation from the body-fixed frame to the inertial frame
    pub orientation: UnitQuaternion<f64>,
}

impl BodyState {
    /// Create a state with the given position and identity orientation
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            orientation: UnitQuaternion::identity(),
        }
    }

    /// State at the frame origin with identity orientation
    pub fn at_origin() -> Self {
        Self::at_position(Vector3::zeros())
    }
}

/// A body participating in a radiation pressure scenario
///
/// A body may carry a source model (Sun, reflecting planet), a target model
/// (spacecraft), or neither (pure occulter). Reflecting planets are sources
/// in this framework, never targets.
pub struct Body {
    /// Name used for ephemeris lookup and error messages
    pub name: String,

    /// Mass in kilograms
    pub mass_kg: f64,

    /// Mean radius in meters, used for apparent angular radii in the
    /// shadow function and for panel grid generation
    pub radius_m: f64,

    /// Current state, refreshed every evaluation
    pub state: BodyState,

    /// Radiation emitted or reflected by this body
    pub source: Option<RadiationSourceModel>,

    /// Radiation pressure response of this body
    pub target: Option<RadiationPressureTargetModel>,
}

impl Body {
    /// Create a body with no attached radiation models
    pub fn new(name: impl Into<String>, mass_kg: f64, radius_m: f64) -> Self {
        Self {
            name: name.into(),
            mass_kg,
            radius_m,
            state: BodyState::at_origin(),
            source: None,
            target: None,
        }
    }

    /// Attach a radiation source model
    pub fn with_source(mut self, source: RadiationSourceModel) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach a radiation pressure target model
    pub fn with_target(mut self, target: RadiationPressureTargetModel) -> Self {
        self.target = Some(target);
        self
    }
}

/// Arena of all bodies in a scenario
///
/// Bodies are constructed once at setup and never removed mid-run; only
/// their states are mutated between evaluations.
#[derive(Default)]
pub struct BodySet {
    bodies: Vec<Body>,
}

impl BodySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body, returning its id
    pub fn add(&mut self, body: Body) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    /// Borrow a body by id
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different set.
    pub fn get(&self, id: BodyId) -> &Body {
        &self.bodies[id.0]
    }

    /// Mutably borrow a body by id
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different set.
    pub fn get_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.0]
    }

    /// Look up a body id by name
    pub fn by_name(&self, name: &str) -> Option<BodyId> {
        self.bodies.iter().position(|b| b.name == name).map(BodyId)
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Refresh every body state from the ephemeris collaborator
    pub fn update_states(&mut self, ephemeris: &dyn Ephemeris, epoch: &Instant) -> Result<()> {
        for body in &mut self.bodies {
            body.state = ephemeris.state(&body.name, epoch)?;
        }
        Ok(())
    }
}

// Physical constants
/// Speed of light in m/s
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Stefan-Boltzmann constant in W/(m²·K⁴)
pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;

/// Astronomical unit in meters
pub const AU_M: f64 = 1.495_978_707e11;

/// Total solar irradiance at 1 AU in W/m²
pub const SOLAR_IRRADIANCE_1AU: f64 = 1361.0;

/// Sun nominal radius in meters (IAU 2015)
pub const SUN_RADIUS_M: f64 = 6.957e8;

/// Earth mean radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Moon mean radius in meters
pub const MOON_RADIUS_M: f64 = 1_737_400.0;
