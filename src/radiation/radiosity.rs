//! Per-panel radiosity models
//!
//! Each model evaluates the irradiance one source panel contributes at a
//! target position. A panel may carry several models at once (e.g. albedo
//! plus thermal emission); the paneled source sums them. All variants return
//! zero, never a negative value, for geometry that rules out a contribution
//! (night side, panel facing away from the target).

use std::f64::consts::PI;

use nalgebra::{UnitQuaternion, Unit, Vector3};

use crate::bodies::STEFAN_BOLTZMANN;
use crate::error::{RadPressError, Result};
use crate::radiation::panels::SourcePanel;

/// Surface property (albedo or emissivity) as a function of location
///
/// Closed set: a constant, a Knocke-style second-degree zonal model, or a
/// pre-loaded latitude/longitude grid supplied by the external grid
/// collaborator. Queried only during panel generation; immutable afterwards.
#[derive(Debug, Clone)]
pub enum SurfaceDistribution {
    /// Same value everywhere
    Constant(f64),

    /// a0 + a1·sin(lat) + a2·(3·sin²(lat) − 1)/2
    SecondDegreeZonal { a0: f64, a1: f64, a2: f64 },

    /// Nearest-cell lookup in a pre-loaded grid
    Grid(SurfaceGrid),
}

impl SurfaceDistribution {
    /// Value at a body-fixed latitude/longitude (radians)
    pub fn value(&self, latitude: f64, longitude: f64) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::SecondDegreeZonal { a0, a1, a2 } => {
                let s = latitude.sin();
                a0 + a1 * s + a2 * 0.5 * (3.0 * s * s - 1.0)
            }
            Self::Grid(grid) => grid.value(latitude, longitude),
        }
    }
}

/// Uniform latitude/longitude table of a surface property
///
/// Rows run from -90° to +90° latitude, columns from -180° to +180°
/// longitude, row-major. Loaded once by the external configuration
/// collaborator; read-only for the lifetime of a run.
#[derive(Debug, Clone)]
pub struct SurfaceGrid {
    n_lat: usize,
    n_lon: usize,
    values: Vec<f64>,
}

impl SurfaceGrid {
    /// Wrap a pre-loaded table; `values.len()` must equal `n_lat * n_lon`
    pub fn new(n_lat: usize, n_lon: usize, values: Vec<f64>) -> Result<Self> {
        if n_lat == 0 || n_lon == 0 || values.len() != n_lat * n_lon {
            return Err(RadPressError::InvalidConfiguration(format!(
                "surface grid shape {n_lat}x{n_lon} does not match {} values",
                values.len()
            )));
        }
        Ok(Self {
            n_lat,
            n_lon,
            values,
        })
    }

    /// Nearest-cell value at a latitude/longitude (radians)
    pub fn value(&self, latitude: f64, longitude: f64) -> f64 {
        let lat_frac = (latitude / PI + 0.5).clamp(0.0, 1.0);
        let lon_frac = (longitude.rem_euclid(2.0 * PI)) / (2.0 * PI);
        let i = ((lat_frac * self.n_lat as f64) as usize).min(self.n_lat - 1);
        let j = ((lon_frac * self.n_lon as f64) as usize).min(self.n_lon - 1);
        self.values[i * self.n_lon + j]
    }
}

/// Geometry and illumination shared by all radiosity models of one panel
///
/// Assembled once per panel per evaluation by the paneled source.
#[derive(Debug, Clone)]
pub struct PanelContext {
    /// Panel center in the inertial frame
    pub center: Vector3<f64>,

    /// Unit outward normal in the inertial frame
    pub normal: Vector3<f64>,

    /// Unit direction from the panel toward the original source (Sun)
    pub to_sun: Vector3<f64>,

    /// Shadow-attenuated solar irradiance at the panel in W/m²
    pub sun_irradiance: f64,

    /// Unattenuated solar irradiance at the body center distance in W/m²
    pub body_irradiance: f64,

    /// Source body spin axis (+z of the body-fixed frame) in the inertial
    /// frame, used for phase-lagged thermal models
    pub spin_axis: Unit<Vector3<f64>>,
}

/// Closed set of per-panel radiation contributions
#[derive(Debug, Clone)]
pub enum PanelRadiosityModel {
    /// Diffuse reflection of shadow-attenuated sunlight using the panel's
    /// albedo coefficient
    Albedo,

    /// Knocke-style delayed thermal emission: a uniform base term (one
    /// quarter of the incident solar irradiance re-emitted) plus a day-side
    /// enhancement that lags the subsolar point by a precomputed phase
    /// angle, standing in for an explicit illumination history
    DelayedThermal {
        /// Phase lag of the thermal response behind the subsolar point
        /// (radians, positive lags westward)
        lag_angle_rad: f64,
        /// Amplitude of the day-side enhancement relative to the base term
        day_amplitude: f64,
    },

    /// Lemoine-style instantaneous thermal emission: effective temperature
    /// from the current solar zenith angle, clamped to a nightside minimum
    AngleBasedThermal {
        /// Nightside/minimum temperature in K
        min_temperature_k: f64,
        /// Subsolar maximum temperature in K
        max_temperature_k: f64,
    },

    /// Radiosity taken from an externally measured flux table indexed by
    /// panel location; read-only lookup, no physical derivation
    ObservedFlux { table: SurfaceGrid },
}

impl PanelRadiosityModel {
    /// Angle-based thermal model with validated temperatures
    pub fn angle_based_thermal(min_temperature_k: f64, max_temperature_k: f64) -> Result<Self> {
        if min_temperature_k < 0.0 || max_temperature_k < min_temperature_k {
            return Err(RadPressError::InvalidConfiguration(format!(
                "thermal temperatures must satisfy 0 <= min <= max, got {min_temperature_k}..{max_temperature_k}"
            )));
        }
        Ok(Self::AngleBasedThermal {
            min_temperature_k,
            max_temperature_k,
        })
    }

    /// Delayed thermal model with validated parameters
    pub fn delayed_thermal(lag_angle_rad: f64, day_amplitude: f64) -> Result<Self> {
        if day_amplitude < 0.0 {
            return Err(RadPressError::InvalidConfiguration(format!(
                "day-side amplitude must be non-negative, got {day_amplitude}"
            )));
        }
        Ok(Self::DelayedThermal {
            lag_angle_rad,
            day_amplitude,
        })
    }

    /// Irradiance this panel contributes at `target_position`, in W/m²
    pub fn irradiance_at_target(
        &self,
        panel: &SourcePanel,
        ctx: &PanelContext,
        target_position: &Vector3<f64>,
    ) -> f64 {
        let to_target = target_position - ctx.center;
        let distance_sq = to_target.norm_squared();
        if distance_sq <= f64::EPSILON {
            return 0.0;
        }
        let distance = distance_sq.sqrt();
        let cos_target = ctx.normal.dot(&to_target) / distance;
        if cos_target <= 0.0 {
            return 0.0;
        }

        match self {
            Self::Albedo => {
                let cos_zenith = ctx.normal.dot(&ctx.to_sun);
                if cos_zenith <= 0.0 {
                    // Night side reflects nothing
                    return 0.0;
                }
                // Received radiosity, redirected as a Lambertian reflector
                // (reflected fraction albedo/π), projected onto the target
                let received = ctx.sun_irradiance * cos_zenith;
                received * (panel.albedo / PI) * panel.area * cos_target / distance_sq
            }
            Self::DelayedThermal {
                lag_angle_rad,
                day_amplitude,
            } => {
                let lagged_sun =
                    UnitQuaternion::from_axis_angle(&ctx.spin_axis, -lag_angle_rad) * ctx.to_sun;
                let cos_lagged = ctx.normal.dot(&lagged_sun).max(0.0);
                let radiosity = panel.emissivity
                    * (ctx.body_irradiance / 4.0)
                    * (1.0 + day_amplitude * cos_lagged);
                radiosity * panel.area * cos_target / (PI * distance_sq)
            }
            Self::AngleBasedThermal {
                min_temperature_k,
                max_temperature_k,
            } => {
                let cos_zenith = ctx.normal.dot(&ctx.to_sun).max(0.0);
                let temperature = if cos_zenith > 0.0 {
                    (max_temperature_k * cos_zenith.powf(0.25)).max(*min_temperature_k)
                } else {
                    *min_temperature_k
                };
                let radiosity =
                    panel.emissivity * STEFAN_BOLTZMANN * temperature.powi(4);
                radiosity * panel.area * cos_target / (PI * distance_sq)
            }
            Self::ObservedFlux { table } => {
                let radiosity = table.value(panel.latitude, panel.longitude).max(0.0);
                radiosity * panel.area * cos_target / (PI * distance_sq)
            }
        }
    }
}
