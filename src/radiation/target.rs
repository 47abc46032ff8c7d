//! Radiation pressure target models
//!
//! A target model converts one irradiance contribution into a force on the
//! spacecraft. The cannonball variant collapses the spacecraft to a single
//! effective area/coefficient product; the paneled variant evaluates a
//! reflection law per panel with visibility weighting.

use nalgebra::{UnitQuaternion, Vector3};

use crate::bodies::SPEED_OF_LIGHT;
use crate::error::{RadPressError, Result};
use crate::radiation::reflection::ReflectionLaw;

/// One surface element of a paneled spacecraft
#[derive(Debug, Clone)]
pub struct TargetPanel {
    /// Panel area in m²
    pub area: f64,

    /// Unit normal in the body-fixed frame
    pub normal: Vector3<f64>,

    /// Panel center in the body-fixed frame (meters); not used by the force
    /// evaluation itself but kept for torque-capable consumers
    pub center: Vector3<f64>,

    /// Reflection law of this panel's surface
    pub reflection_law: ReflectionLaw,
}

impl TargetPanel {
    /// Create a panel; the normal is normalized and the area must be positive
    pub fn new(
        area: f64,
        normal: Vector3<f64>,
        center: Vector3<f64>,
        reflection_law: ReflectionLaw,
    ) -> Result<Self> {
        if area <= 0.0 || !area.is_finite() {
            return Err(RadPressError::InvalidConfiguration(format!(
                "target panel area must be positive and finite, got {area}"
            )));
        }
        let norm = normal.norm();
        if norm <= f64::EPSILON {
            return Err(RadPressError::InvalidConfiguration(
                "target panel normal must have non-zero length".into(),
            ));
        }
        Ok(Self {
            area,
            normal: normal / norm,
            center,
            reflection_law,
        })
    }
}

/// Closed set of radiation pressure target geometries
pub enum RadiationPressureTargetModel {
    /// Single effective area and coefficient, no orientation dependence
    Cannonball { area_m2: f64, coefficient: f64 },

    /// Per-panel reflection law evaluation
    Paneled { panels: Vec<TargetPanel> },
}

impl RadiationPressureTargetModel {
    /// Cannonball model with validated parameters
    pub fn cannonball(area_m2: f64, coefficient: f64) -> Result<Self> {
        if area_m2 <= 0.0 || !area_m2.is_finite() {
            return Err(RadPressError::InvalidConfiguration(format!(
                "cannonball area must be positive and finite, got {area_m2}"
            )));
        }
        if coefficient <= 0.0 || !coefficient.is_finite() {
            return Err(RadPressError::InvalidConfiguration(format!(
                "radiation pressure coefficient must be positive and finite, got {coefficient}"
            )));
        }
        Ok(Self::Cannonball {
            area_m2,
            coefficient,
        })
    }

    /// Paneled model; needs at least one panel
    pub fn paneled(panels: Vec<TargetPanel>) -> Result<Self> {
        if panels.is_empty() {
            return Err(RadPressError::InvalidConfiguration(
                "paneled target needs at least one panel".into(),
            ));
        }
        Ok(Self::Paneled { panels })
    }

    /// Force on the target in newtons
    ///
    /// `direction` is the unit propagation direction from the contribution
    /// origin toward the target; `attitude` rotates body-fixed panel normals
    /// into the inertial frame (ignored by the cannonball variant). Panels
    /// facing away from the source contribute the zero vector.
    pub fn force(
        &self,
        irradiance: f64,
        direction: &Vector3<f64>,
        attitude: &UnitQuaternion<f64>,
    ) -> Vector3<f64> {
        let pressure = irradiance / SPEED_OF_LIGHT;
        match self {
            Self::Cannonball {
                area_m2,
                coefficient,
            } => pressure * area_m2 * coefficient * direction,
            Self::Paneled { panels } => {
                let mut force = Vector3::zeros();
                for panel in panels {
                    let normal = attitude * panel.normal;
                    force += pressure
                        * panel.area
                        * panel.reflection_law.reaction_vector(&normal, direction);
                }
                force
            }
        }
    }
}
