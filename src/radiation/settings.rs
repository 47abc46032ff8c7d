//! Scenario settings for radiation pressure models
//!
//! A thin, serde-deserializable description of which model variant to
//! instantiate for each role and their scalar parameters. Run configurations
//! carry these as JSON; `build` turns them into a validated model graph, so
//! every inconsistency is rejected at setup, never at evaluation time.

use serde::{Deserialize, Serialize};

use crate::bodies::{BodyId, BodySet};
use crate::error::{RadPressError, Result};
use crate::radiation::occultation::OccultationModel;
use crate::radiation::panels::{generate_static_grid, CapCache, CapGridConfig};
use crate::radiation::radiosity::{PanelRadiosityModel, SurfaceDistribution, SurfaceGrid};
use crate::radiation::reflection::ReflectionLaw;
use crate::radiation::source::{PaneledSource, PanelingScheme, RadiationSourceModel};
use crate::radiation::target::{RadiationPressureTargetModel, TargetPanel};

/// Target model selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Cannonball,
    Paneled,
}

/// Source panel layout selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelingType {
    /// Full-sphere grid, generated once
    Static,
    /// Spherical cap following the sub-target point
    Dynamic,
}

/// Thermal emission model selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermalType {
    /// No thermal contribution
    None,
    /// Knocke-style delayed emission
    Delayed,
    /// Lemoine-style angle-based emission
    AngleBased,
}

/// Albedo distribution selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbedoDistributionSetting {
    /// No albedo contribution
    None,
    /// Uniform albedo
    Constant { value: f64 },
    /// Knocke-style zonal model
    SecondDegreeZonal { a0: f64, a1: f64, a2: f64 },
    /// Loaded latitude/longitude map (e.g. a gridded DLAM-1 lunar albedo
    /// map), row-major from -90° to +90° latitude and -180° to +180°
    /// longitude
    Grid(SurfaceMapSettings),
}

/// A latitude/longitude table carried inline in the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceMapSettings {
    pub n_lat: usize,
    pub n_lon: usize,
    pub values: Vec<f64>,
}

impl SurfaceMapSettings {
    fn to_grid(&self) -> Result<SurfaceGrid> {
        SurfaceGrid::new(self.n_lat, self.n_lon, self.values.clone())
    }
}

/// Settings for a paneled radiation source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    pub paneling: PanelingType,

    /// Total panel count for static grids
    #[serde(default = "default_panel_count")]
    pub panel_count: usize,

    /// Panel count per ring for dynamic cap grids
    #[serde(default = "default_panels_per_ring")]
    pub panels_per_ring: Vec<usize>,

    /// Sub-target bucket size for the dynamic grid cache (degrees)
    #[serde(default = "default_bucket_angle_deg")]
    pub bucket_angle_deg: f64,

    pub albedo: AlbedoDistributionSetting,

    pub thermal: ThermalType,

    /// Uniform surface emissivity for thermal models
    #[serde(default = "default_emissivity")]
    pub emissivity: f64,

    /// Phase lag of the delayed thermal response (degrees)
    #[serde(default = "default_thermal_lag_deg")]
    pub thermal_lag_deg: f64,

    /// Day-side amplitude of the delayed thermal model
    #[serde(default = "default_day_amplitude")]
    pub day_amplitude: f64,

    /// Nightside temperature for the angle-based thermal model (K)
    #[serde(default = "default_min_temperature")]
    pub min_temperature_k: f64,

    /// Subsolar temperature for the angle-based thermal model (K)
    #[serde(default = "default_max_temperature")]
    pub max_temperature_k: f64,

    /// Measured radiosity map added as a further per-panel term (W/m²)
    #[serde(default)]
    pub observed_flux: Option<SurfaceMapSettings>,
}

fn default_panel_count() -> usize {
    5000
}

fn default_panels_per_ring() -> Vec<usize> {
    vec![6, 12, 18, 24, 30]
}

fn default_bucket_angle_deg() -> f64 {
    1.0
}

fn default_emissivity() -> f64 {
    0.95
}

fn default_thermal_lag_deg() -> f64 {
    30.0
}

fn default_day_amplitude() -> f64 {
    1.0
}

fn default_min_temperature() -> f64 {
    100.0
}

fn default_max_temperature() -> f64 {
    375.0
}

impl SourceSettings {
    /// Build the paneled source model for `source_body`
    ///
    /// `original_source` is the body the re-radiated energy comes from and
    /// `panel_occulters` the bodies that may shadow it at the panels.
    pub fn build(
        &self,
        bodies: &BodySet,
        source_body: BodyId,
        original_source: BodyId,
        panel_occulters: Vec<BodyId>,
    ) -> Result<RadiationSourceModel> {
        let albedo_dist = match &self.albedo {
            AlbedoDistributionSetting::None => SurfaceDistribution::Constant(0.0),
            AlbedoDistributionSetting::Constant { value } => {
                if !(0.0..=1.0).contains(value) {
                    return Err(RadPressError::InvalidConfiguration(format!(
                        "albedo must be in [0, 1], got {value}"
                    )));
                }
                SurfaceDistribution::Constant(*value)
            }
            AlbedoDistributionSetting::SecondDegreeZonal { a0, a1, a2 } => {
                SurfaceDistribution::SecondDegreeZonal {
                    a0: *a0,
                    a1: *a1,
                    a2: *a2,
                }
            }
            AlbedoDistributionSetting::Grid(map) => {
                if let Some(bad) = map.values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
                    return Err(RadPressError::InvalidConfiguration(format!(
                        "albedo map values must be in [0, 1], got {bad}"
                    )));
                }
                SurfaceDistribution::Grid(map.to_grid()?)
            }
        };
        if !(0.0..=1.0).contains(&self.emissivity) {
            return Err(RadPressError::InvalidConfiguration(format!(
                "emissivity must be in [0, 1], got {}",
                self.emissivity
            )));
        }
        let emissivity_dist = SurfaceDistribution::Constant(self.emissivity);

        let mut radiosity = Vec::new();
        if !matches!(self.albedo, AlbedoDistributionSetting::None) {
            radiosity.push(PanelRadiosityModel::Albedo);
        }
        match self.thermal {
            ThermalType::None => {}
            ThermalType::Delayed => radiosity.push(PanelRadiosityModel::delayed_thermal(
                self.thermal_lag_deg.to_radians(),
                self.day_amplitude,
            )?),
            ThermalType::AngleBased => radiosity.push(PanelRadiosityModel::angle_based_thermal(
                self.min_temperature_k,
                self.max_temperature_k,
            )?),
        }
        if let Some(flux) = &self.observed_flux {
            radiosity.push(PanelRadiosityModel::ObservedFlux {
                table: flux.to_grid()?,
            });
        }
        if radiosity.is_empty() {
            return Err(RadPressError::InvalidConfiguration(
                "paneled source needs albedo, thermal or observed-flux radiation enabled".into(),
            ));
        }

        let scheme = match self.paneling {
            PanelingType::Static => PanelingScheme::Static {
                panels: generate_static_grid(
                    bodies.get(source_body).radius_m,
                    self.panel_count,
                    &albedo_dist,
                    &emissivity_dist,
                )?,
            },
            PanelingType::Dynamic => PanelingScheme::Dynamic {
                cache: CapCache::new(
                    CapGridConfig {
                        panels_per_ring: self.panels_per_ring.clone(),
                        bucket_angle_rad: self.bucket_angle_deg.to_radians(),
                    },
                    albedo_dist,
                    emissivity_dist,
                )?,
            },
        };

        log::debug!(
            "built paneled source for '{}': {:?} paneling, {} radiosity models",
            bodies.get(source_body).name,
            self.paneling,
            radiosity.len()
        );
        Ok(RadiationSourceModel::Paneled(PaneledSource::new(
            original_source,
            OccultationModel::with_bodies(panel_occulters),
            scheme,
            radiosity,
        )?))
    }
}

/// One panel of a paneled target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetPanelSettings {
    pub area_m2: f64,
    /// Body-fixed outward normal (normalized at build time)
    pub normal: [f64; 3],
    pub absorptivity: f64,
    pub specular_reflectivity: f64,
    pub diffuse_reflectivity: f64,
}

/// Settings for the radiation pressure target model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSettings {
    pub target_type: TargetType,

    /// Cross-sectional area for the cannonball variant (m²)
    #[serde(default = "default_area")]
    pub area_m2: f64,

    /// Radiation pressure coefficient for the cannonball variant
    #[serde(default = "default_coefficient")]
    pub coefficient: f64,

    /// Re-emit absorbed energy instantaneously (paneled variant)
    #[serde(default)]
    pub instantaneous_reradiation: bool,

    /// Panels for the paneled variant
    #[serde(default)]
    pub panels: Vec<TargetPanelSettings>,
}

fn default_area() -> f64 {
    1.0
}

fn default_coefficient() -> f64 {
    1.5
}

impl TargetSettings {
    /// Build the target model
    pub fn build(&self) -> Result<RadiationPressureTargetModel> {
        match self.target_type {
            TargetType::Cannonball => {
                RadiationPressureTargetModel::cannonball(self.area_m2, self.coefficient)
            }
            TargetType::Paneled => {
                if self.panels.is_empty() {
                    return Err(RadPressError::InvalidConfiguration(
                        "paneled target settings list no panels".into(),
                    ));
                }
                let mut panels = Vec::with_capacity(self.panels.len());
                for p in &self.panels {
                    let law = ReflectionLaw::specular_diffuse(
                        p.absorptivity,
                        p.specular_reflectivity,
                        p.diffuse_reflectivity,
                        self.instantaneous_reradiation,
                    )?;
                    panels.push(TargetPanel::new(
                        p.area_m2,
                        nalgebra::Vector3::new(p.normal[0], p.normal[1], p.normal[2]),
                        nalgebra::Vector3::zeros(),
                        law,
                    )?);
                }
                RadiationPressureTargetModel::paneled(panels)
            }
        }
    }
}
