//! Luminosity models for point radiation sources

use std::f64::consts::PI;

use crate::error::{RadPressError, Result};

/// Total radiated power of a point source
///
/// The irradiance-based variant supports time-varying input (e.g. a measured
/// solar-constant series): the caller updates the reference irradiance before
/// each evaluation via [`LuminosityModel::set_irradiance`], and the model
/// stays a pure function of its current parameter state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LuminosityModel {
    /// Fixed total radiated power in watts
    Constant { watts: f64 },

    /// Power derived from a reference irradiance at a reference distance,
    /// L = 4π d² E
    IrradianceBased {
        /// Irradiance at the reference distance in W/m²
        irradiance_w_m2: f64,
        /// Reference distance in meters
        reference_distance_m: f64,
    },
}

impl LuminosityModel {
    /// Constant luminosity; the power must be strictly positive
    pub fn constant(watts: f64) -> Result<Self> {
        if watts <= 0.0 || !watts.is_finite() {
            return Err(RadPressError::InvalidConfiguration(format!(
                "luminosity must be positive and finite, got {watts}"
            )));
        }
        Ok(Self::Constant { watts })
    }

    /// Luminosity from irradiance measured at a reference distance
    pub fn from_irradiance(irradiance_w_m2: f64, reference_distance_m: f64) -> Result<Self> {
        if irradiance_w_m2 <= 0.0 || !irradiance_w_m2.is_finite() {
            return Err(RadPressError::InvalidConfiguration(format!(
                "reference irradiance must be positive and finite, got {irradiance_w_m2}"
            )));
        }
        if reference_distance_m <= 0.0 || !reference_distance_m.is_finite() {
            return Err(RadPressError::InvalidConfiguration(format!(
                "reference distance must be positive and finite, got {reference_distance_m}"
            )));
        }
        Ok(Self::IrradianceBased {
            irradiance_w_m2,
            reference_distance_m,
        })
    }

    /// Total radiated power in watts
    pub fn luminosity(&self) -> f64 {
        match self {
            Self::Constant { watts } => *watts,
            Self::IrradianceBased {
                irradiance_w_m2,
                reference_distance_m,
            } => 4.0 * PI * reference_distance_m * reference_distance_m * irradiance_w_m2,
        }
    }

    /// Update the reference irradiance from a measured series
    ///
    /// Only valid for the irradiance-based variant.
    pub fn set_irradiance(&mut self, irradiance_w_m2: f64) -> Result<()> {
        if irradiance_w_m2 <= 0.0 || !irradiance_w_m2.is_finite() {
            return Err(RadPressError::InvalidConfiguration(format!(
                "reference irradiance must be positive and finite, got {irradiance_w_m2}"
            )));
        }
        match self {
            Self::IrradianceBased {
                irradiance_w_m2: e, ..
            } => {
                *e = irradiance_w_m2;
                Ok(())
            }
            Self::Constant { .. } => Err(RadPressError::InvalidConfiguration(
                "constant luminosity model does not accept irradiance updates".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{AU_M, SOLAR_IRRADIANCE_1AU};

    #[test]
    fn test_constant_luminosity() {
        let lum = LuminosityModel::constant(3.828e26).unwrap();
        assert_eq!(lum.luminosity(), 3.828e26);
    }

    #[test]
    fn test_irradiance_based_matches_solar_constant() {
        let lum = LuminosityModel::from_irradiance(SOLAR_IRRADIANCE_1AU, AU_M).unwrap();
        // Back out the irradiance at 1 AU
        let e = lum.luminosity() / (4.0 * PI * AU_M * AU_M);
        assert!((e - SOLAR_IRRADIANCE_1AU).abs() < 1e-9);
    }

    #[test]
    fn test_set_irradiance_updates_power() {
        let mut lum = LuminosityModel::from_irradiance(1361.0, AU_M).unwrap();
        let before = lum.luminosity();
        lum.set_irradiance(1362.5).unwrap();
        assert!(lum.luminosity() > before);

        let mut constant = LuminosityModel::constant(1.0e26).unwrap();
        assert!(constant.set_irradiance(1361.0).is_err());
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(LuminosityModel::constant(0.0).is_err());
        assert!(LuminosityModel::constant(-1.0).is_err());
        assert!(LuminosityModel::from_irradiance(1361.0, 0.0).is_err());
        assert!(LuminosityModel::from_irradiance(-1.0, AU_M).is_err());
    }
}
