//! Radiation source models
//!
//! A source model turns a body into a set of irradiance contributions at a
//! target position. The point variant (a star) yields exactly one; the
//! paneled variant (a planet or moon re-radiating albedo and thermal energy)
//! yields one per panel visible from the target.

use std::f64::consts::PI;
use std::sync::Arc;

use nalgebra::{Unit, Vector3};

use crate::bodies::{Body, BodyId, BodySet};
use crate::error::{RadPressError, Result};
use crate::radiation::luminosity::LuminosityModel;
use crate::radiation::occultation::OccultationModel;
use crate::radiation::panels::{CapCache, SourcePanel};
use crate::radiation::radiosity::{PanelContext, PanelRadiosityModel};
use crate::radiation::IrradianceSample;

/// Point source: all power radiates isotropically from the body center
#[derive(Debug, Clone)]
pub struct PointSource {
    /// Total radiated power model
    pub luminosity: LuminosityModel,
}

/// Panel layout of a paneled source
pub enum PanelingScheme {
    /// Full-sphere grid generated once at setup, immutable afterwards
    Static { panels: Vec<SourcePanel> },

    /// Spherical-cap grid re-centered on the sub-target point, served from
    /// the owned cap cache
    Dynamic { cache: CapCache },
}

/// Panelized sphere re-radiating energy received from an original source
///
/// Albedo panels need to know where the incoming radiation originates
/// (`original_source`, usually the Sun) and which bodies may shadow it at
/// the panel (`panel_occultation`; for the Moon as a source only the Earth
/// occults).
pub struct PaneledSource {
    /// Body the incoming radiation originates from
    pub original_source: BodyId,

    /// Occultation applied to the incoming radiation at each panel
    pub panel_occultation: OccultationModel,

    /// Panel layout
    pub scheme: PanelingScheme,

    /// Radiosity contributions evaluated for every panel, in order
    pub radiosity: Vec<PanelRadiosityModel>,
}

impl PaneledSource {
    /// Create a paneled source; at least one radiosity model is required
    pub fn new(
        original_source: BodyId,
        panel_occultation: OccultationModel,
        scheme: PanelingScheme,
        radiosity: Vec<PanelRadiosityModel>,
    ) -> Result<Self> {
        if radiosity.is_empty() {
            return Err(RadPressError::InvalidConfiguration(
                "paneled source needs at least one radiosity model".into(),
            ));
        }
        Ok(Self {
            original_source,
            panel_occultation,
            scheme,
            radiosity,
        })
    }
}

/// Closed set of radiation source geometries
pub enum RadiationSourceModel {
    /// Point source (a star)
    Point(PointSource),

    /// Panelized sphere (planetary albedo and thermal output)
    Paneled(PaneledSource),
}

impl RadiationSourceModel {
    /// Point source with the given luminosity model
    pub fn point(luminosity: LuminosityModel) -> Self {
        Self::Point(PointSource { luminosity })
    }

    /// Total radiated power, if this is a point source
    pub fn point_luminosity(&self) -> Option<f64> {
        match self {
            Self::Point(p) => Some(p.luminosity.luminosity()),
            Self::Paneled(_) => None,
        }
    }

    /// Irradiance contributions at `target_position`
    ///
    /// `source_body` is the body this model is attached to; `bodies` resolves
    /// the original source and occulters of a paneled variant. Zero visible
    /// panels is a legitimate empty result, not an error; coincident
    /// source and target geometry is a degenerate-geometry error.
    pub fn evaluate_irradiance(
        &self,
        source_body: &Body,
        target_position: &Vector3<f64>,
        bodies: &BodySet,
    ) -> Result<Vec<IrradianceSample>> {
        match self {
            Self::Point(point) => {
                let origin = source_body.state.position;
                let distance_sq = (target_position - origin).norm_squared();
                if distance_sq <= f64::EPSILON {
                    return Err(RadPressError::DegenerateGeometry(
                        "source and target positions coincide",
                    ));
                }
                let irradiance = point.luminosity.luminosity() / (4.0 * PI * distance_sq);
                Ok(vec![IrradianceSample { irradiance, origin }])
            }
            Self::Paneled(paneled) => paneled_irradiance(paneled, source_body, target_position, bodies),
        }
    }
}

fn paneled_irradiance(
    model: &PaneledSource,
    source_body: &Body,
    target_position: &Vector3<f64>,
    bodies: &BodySet,
) -> Result<Vec<IrradianceSample>> {
    let body_position = source_body.state.position;
    let orientation = source_body.state.orientation;

    let target_bf = orientation.inverse_transform_vector(&(target_position - body_position));
    if target_bf.norm() <= source_body.radius_m {
        return Err(RadPressError::DegenerateGeometry(
            "target at or below the source surface",
        ));
    }

    let original = bodies.get(model.original_source);
    let sun_position = original.state.position;
    let luminosity = original
        .source
        .as_ref()
        .and_then(|s| s.point_luminosity())
        .ok_or_else(|| {
            RadPressError::InvalidConfiguration(format!(
                "original source '{}' carries no point source model",
                original.name
            ))
        })?;

    let body_sun_dist_sq = (sun_position - body_position).norm_squared();
    if body_sun_dist_sq <= f64::EPSILON {
        return Err(RadPressError::DegenerateGeometry(
            "paneled source coincides with its original source",
        ));
    }
    let body_irradiance = luminosity / (4.0 * PI * body_sun_dist_sq);
    let spin_axis = Unit::new_normalize(orientation * Vector3::z());

    // Keep a dynamic grid alive for the duration of the iteration
    let dynamic_grid: Arc<Vec<SourcePanel>>;
    let panels: &[SourcePanel] = match &model.scheme {
        PanelingScheme::Static { panels } => panels,
        PanelingScheme::Dynamic { cache } => {
            dynamic_grid = cache.grid_for(source_body.radius_m, &target_bf)?;
            &dynamic_grid
        }
    };

    let mut samples = Vec::with_capacity(panels.len());
    for panel in panels {
        let center = body_position + orientation * panel.center;
        let normal = orientation * panel.normal;

        // Per-panel visibility is a pure filter; panels facing away from
        // the target contribute nothing and are skipped, not an error
        let to_target = target_position - center;
        if normal.dot(&to_target) < 0.0 {
            continue;
        }

        let to_sun_v = sun_position - center;
        let sun_dist_sq = to_sun_v.norm_squared();
        if sun_dist_sq <= f64::EPSILON {
            continue;
        }
        let to_sun = to_sun_v / sun_dist_sq.sqrt();

        let shadow = model.panel_occultation.irradiance_fraction(
            &sun_position,
            original.radius_m,
            &center,
            bodies,
        );
        let sun_irradiance = shadow * luminosity / (4.0 * PI * sun_dist_sq);

        let ctx = PanelContext {
            center,
            normal,
            to_sun,
            sun_irradiance,
            body_irradiance,
            spin_axis,
        };

        let irradiance: f64 = model
            .radiosity
            .iter()
            .map(|m| m.irradiance_at_target(panel, &ctx, target_position))
            .sum();

        samples.push(IrradianceSample {
            irradiance,
            origin: center,
        });
    }

    Ok(samples)
}
