//! Radiation pressure acceleration orchestrator
//!
//! Combines one source body, one target body and any number of occulting
//! bodies into a per-step acceleration evaluator:
//!
//! 1. refresh body states from the ephemeris collaborator,
//! 2. evaluate the source model at the target position,
//! 3. per contribution: occultation, propagation direction, target force,
//! 4. sum and divide by the target mass.
//!
//! Evaluation owns no state of its own; the only cache in the pipeline is
//! the dynamic panel cache inside a paneled source model.

use nalgebra::Vector3;
use satkit::Instant;

use crate::bodies::{BodyId, BodySet};
use crate::ephemeris::Ephemeris;
use crate::error::{RadPressError, Result};
use crate::radiation::occultation::OccultationModel;

/// Radiation pressure acceleration from a single source onto a single target
pub struct RadiationPressureAcceleration {
    source: BodyId,
    target: BodyId,
    occultation: OccultationModel,
}

impl RadiationPressureAcceleration {
    /// Wire up source, target and occultation
    ///
    /// Configuration is validated here, not at evaluation time: the source
    /// body must carry a source model, the target body a target model and a
    /// strictly positive mass.
    pub fn new(
        bodies: &BodySet,
        source: BodyId,
        target: BodyId,
        occultation: OccultationModel,
    ) -> Result<Self> {
        let source_body = bodies.get(source);
        if source_body.source.is_none() {
            return Err(RadPressError::InvalidConfiguration(format!(
                "body '{}' carries no radiation source model",
                source_body.name
            )));
        }
        let target_body = bodies.get(target);
        if target_body.target.is_none() {
            return Err(RadPressError::InvalidConfiguration(format!(
                "body '{}' carries no radiation pressure target model",
                target_body.name
            )));
        }
        if target_body.mass_kg <= 0.0 || !target_body.mass_kg.is_finite() {
            return Err(RadPressError::InvalidConfiguration(format!(
                "target mass must be positive and finite, got {} kg",
                target_body.mass_kg
            )));
        }
        log::debug!(
            "radiation pressure acceleration: {} -> {}",
            source_body.name,
            target_body.name
        );
        Ok(Self {
            source,
            target,
            occultation,
        })
    }

    /// Source body id
    pub fn source(&self) -> BodyId {
        self.source
    }

    /// Target body id
    pub fn target(&self) -> BodyId {
        self.target
    }

    /// Acceleration at `epoch`, refreshing body states from the ephemeris
    pub fn acceleration(
        &self,
        bodies: &mut BodySet,
        ephemeris: &dyn Ephemeris,
        epoch: &Instant,
    ) -> Result<Vector3<f64>> {
        bodies.update_states(ephemeris, epoch)?;
        self.evaluate(bodies)
    }

    /// Acceleration for the current body states
    ///
    /// A source yielding no contributions (fully occluded, no visible
    /// panels) produces the zero vector; degenerate geometry propagates as
    /// an error for the integrator to decide on.
    pub fn evaluate(&self, bodies: &BodySet) -> Result<Vector3<f64>> {
        let source_body = bodies.get(self.source);
        let target_body = bodies.get(self.target);

        let source_model = source_body.source.as_ref().ok_or_else(|| {
            RadPressError::InvalidConfiguration(format!(
                "body '{}' lost its radiation source model",
                source_body.name
            ))
        })?;
        let target_model = target_body.target.as_ref().ok_or_else(|| {
            RadPressError::InvalidConfiguration(format!(
                "body '{}' lost its radiation pressure target model",
                target_body.name
            ))
        })?;

        let target_position = target_body.state.position;
        let samples = source_model.evaluate_irradiance(source_body, &target_position, bodies)?;

        let mut force = Vector3::zeros();
        for sample in &samples {
            let fraction = self.occultation.irradiance_fraction(
                &sample.origin,
                source_body.radius_m,
                &target_position,
                bodies,
            );
            let irradiance = sample.irradiance * fraction;
            if irradiance <= 0.0 {
                continue;
            }

            let to_target = target_position - sample.origin;
            let distance = to_target.norm();
            if distance <= f64::EPSILON {
                return Err(RadPressError::DegenerateGeometry(
                    "irradiance origin coincides with the target",
                ));
            }
            let direction = to_target / distance;

            force += target_model.force(irradiance, &direction, &target_body.state.orientation);
        }

        Ok(force / target_body.mass_kg)
    }
}
