//! Radiation pressure model framework
//!
//! This module composes independently-variable physical models into a single
//! per-step force evaluator:
//!
//! - **LuminosityModel**: total radiated power of a point source
//! - **ReflectionLaw**: surface reflection physics (BRDF and reaction vector)
//! - **OccultationModel**: multi-body eclipse/shadow geometry
//! - **PanelRadiosityModel**: per-panel albedo, thermal and observed-flux
//!   contributions of a paneled source
//! - **RadiationSourceModel**: point source or panelized sphere
//! - **RadiationPressureTargetModel**: cannonball or panelized spacecraft
//! - **RadiationPressureAcceleration**: the orchestrator driving all of the
//!   above once per evaluation time
//!
//! Each model hierarchy is a closed set of tagged variants dispatched by
//! exhaustive match; the set of physical model kinds is small and fixed by
//! the domain. All models are immutable after construction except the
//! dynamic panel cache, which is an explicit synchronized cache owned by its
//! source model.

pub mod acceleration;
pub mod luminosity;
pub mod occultation;
pub mod panels;
pub mod radiosity;
pub mod reflection;
pub mod settings;
pub mod source;
pub mod target;

pub use acceleration::RadiationPressureAcceleration;
pub use luminosity::LuminosityModel;
pub use occultation::OccultationModel;
pub use panels::{CapCache, CapGridConfig, SourcePanel};
pub use radiosity::{PanelRadiosityModel, SurfaceDistribution, SurfaceGrid};
pub use reflection::ReflectionLaw;
pub use settings::{
    AlbedoDistributionSetting, PanelingType, SourceSettings, SurfaceMapSettings,
    TargetPanelSettings, TargetSettings, TargetType, ThermalType,
};
pub use source::{PaneledSource, PointSource, RadiationSourceModel};
pub use target::{RadiationPressureTargetModel, TargetPanel};

use nalgebra::Vector3;

/// One irradiance contribution produced by a source model evaluation
///
/// A point source yields a single sample; a paneled source yields one per
/// visible panel. Samples are transient and recomputed every call.
#[derive(Debug, Clone, Copy)]
pub struct IrradianceSample {
    /// Irradiance at the target position in W/m², never negative
    pub irradiance: f64,

    /// Origin of the contribution (source center or panel center, inertial)
    pub origin: Vector3<f64>,
}
