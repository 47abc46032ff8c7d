//! Surface reflection laws
//!
//! A reflection law answers two questions about a surface element:
//!
//! - how much incoming radiance is redirected toward an observer
//!   ([`ReflectionLaw::reflected_fraction`], used to attenuate albedo
//!   contributions), and
//! - which net momentum a unit of intercepted radiation transfers to the
//!   surface ([`ReflectionLaw::reaction_vector`], the hemispherical integral
//!   used for force computation).
//!
//! Both are pure functions with no state.

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::error::{RadPressError, Result};

const FRACTION_SUM_TOLERANCE: f64 = 1e-10;

/// Closed set of surface reflection models
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReflectionLaw {
    /// Purely diffuse (Lambertian) reflection
    Lambertian {
        /// Fraction of incident radiation reflected, in [0, 1]
        reflectance: f64,
    },

    /// Mix of absorption, mirror-like specular reflection and diffuse
    /// reflection; the three fractions sum to one
    SpecularDiffuse {
        absorptivity: f64,
        specular_reflectivity: f64,
        diffuse_reflectivity: f64,
        /// Re-emit the absorbed fraction instantaneously as diffuse
        /// radiation, adding its normal-direction recoil to the reaction
        instantaneous_reradiation: bool,
    },
}

impl ReflectionLaw {
    /// Lambertian law with the given reflectance
    pub fn lambertian(reflectance: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&reflectance) {
            return Err(RadPressError::InvalidConfiguration(format!(
                "reflectance must be in [0, 1], got {reflectance}"
            )));
        }
        Ok(Self::Lambertian { reflectance })
    }

    /// Specular-diffuse mix; absorptivity + specular + diffuse must sum to 1
    pub fn specular_diffuse(
        absorptivity: f64,
        specular_reflectivity: f64,
        diffuse_reflectivity: f64,
        instantaneous_reradiation: bool,
    ) -> Result<Self> {
        for (name, value) in [
            ("absorptivity", absorptivity),
            ("specular reflectivity", specular_reflectivity),
            ("diffuse reflectivity", diffuse_reflectivity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(RadPressError::InvalidConfiguration(format!(
                    "{name} must be in [0, 1], got {value}"
                )));
            }
        }
        let sum = absorptivity + specular_reflectivity + diffuse_reflectivity;
        if (sum - 1.0).abs() > FRACTION_SUM_TOLERANCE {
            return Err(RadPressError::InvalidConfiguration(format!(
                "reflectivity fractions must sum to 1, got {sum}"
            )));
        }
        Ok(Self::SpecularDiffuse {
            absorptivity,
            specular_reflectivity,
            diffuse_reflectivity,
            instantaneous_reradiation,
        })
    }

    /// Reflected radiance fraction toward the observer, in sr⁻¹
    ///
    /// Lambertian surfaces scatter uniformly, so the result does not depend
    /// on the observer direction. The specular lobe is a delta distribution
    /// and carries no finite radiance in any sampled direction; only the
    /// diffuse part contributes here.
    pub fn reflected_fraction(
        &self,
        _normal: &Vector3<f64>,
        _incoming: &Vector3<f64>,
        _observer: &Vector3<f64>,
    ) -> f64 {
        match self {
            Self::Lambertian { reflectance } => reflectance / PI,
            Self::SpecularDiffuse {
                diffuse_reflectivity,
                ..
            } => diffuse_reflectivity / PI,
        }
    }

    /// Net reaction per unit of irradiance · area / c
    ///
    /// `incoming` is the unit propagation direction (source toward surface).
    /// The incidence cosine is folded into the result; a surface facing away
    /// from the source returns the zero vector. The normal component follows
    /// the closed-form hemispherical integrals: mirror recoil 2ρs·cosθ for
    /// the specular part and 2/3 for Lambertian emission.
    pub fn reaction_vector(&self, normal: &Vector3<f64>, incoming: &Vector3<f64>) -> Vector3<f64> {
        let cos_incidence = -normal.dot(incoming);
        if cos_incidence <= 0.0 {
            return Vector3::zeros();
        }

        match self {
            Self::Lambertian { reflectance } => {
                // Absorbed + diffuse momentum along the beam, Lambertian
                // recoil along the inward normal
                cos_incidence * (incoming - (2.0 / 3.0) * reflectance * normal)
            }
            Self::SpecularDiffuse {
                absorptivity,
                specular_reflectivity,
                diffuse_reflectivity,
                instantaneous_reradiation,
            } => {
                let diffuse_like = if *instantaneous_reradiation {
                    diffuse_reflectivity + absorptivity
                } else {
                    *diffuse_reflectivity
                };
                let along_beam = (absorptivity + diffuse_reflectivity) * incoming;
                let along_normal = -2.0
                    * (specular_reflectivity * cos_incidence + diffuse_like / 3.0)
                    * normal;
                cos_incidence * (along_beam + along_normal)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn hemisphere_reflected_energy(law: &ReflectionLaw) -> f64 {
        // Integrate reflected_fraction × cosθ over the outgoing hemisphere.
        // For an energy-conserving BRDF this never exceeds 1.
        let normal = Vector3::z();
        let incoming = Vector3::new(0.0, 0.5, -(0.75_f64).sqrt());
        let n_theta = 200;
        let n_phi = 200;
        let mut total = 0.0;
        for i in 0..n_theta {
            let theta = (i as f64 + 0.5) / n_theta as f64 * PI / 2.0;
            for j in 0..n_phi {
                let phi = (j as f64 + 0.5) / n_phi as f64 * 2.0 * PI;
                let observer = Vector3::new(
                    theta.sin() * phi.cos(),
                    theta.sin() * phi.sin(),
                    theta.cos(),
                );
                let d_omega = theta.sin() * (PI / 2.0 / n_theta as f64) * (2.0 * PI / n_phi as f64);
                total += law.reflected_fraction(&normal, &incoming, &observer)
                    * theta.cos()
                    * d_omega;
            }
        }
        total
    }

    #[test]
    fn test_energy_conservation_over_hemisphere() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let absorptivity: f64 = rng.gen_range(0.0..1.0);
            let specular = rng.gen_range(0.0..(1.0 - absorptivity));
            let diffuse = 1.0 - absorptivity - specular;
            let law =
                ReflectionLaw::specular_diffuse(absorptivity, specular, diffuse, false).unwrap();

            let energy = hemisphere_reflected_energy(&law);
            assert!(energy <= 1.0 + 1e-3, "reflected energy {energy} exceeds 1");
            // Diffuse part integrates back to the diffuse reflectivity
            assert!((energy - diffuse).abs() < 1e-2);
        }
    }

    #[test]
    fn test_fractions_must_sum_to_one() {
        assert!(ReflectionLaw::specular_diffuse(0.3, 0.3, 0.4, false).is_ok());
        assert!(ReflectionLaw::specular_diffuse(0.5, 0.3, 0.4, false).is_err());
        assert!(ReflectionLaw::specular_diffuse(-0.1, 0.6, 0.5, false).is_err());
        assert!(ReflectionLaw::lambertian(1.2).is_err());
    }

    #[test]
    fn test_reaction_zero_when_facing_away() {
        let law = ReflectionLaw::lambertian(0.3).unwrap();
        // Radiation travelling along +z, surface normal also +z: back side lit
        let reaction = law.reaction_vector(&Vector3::z(), &Vector3::z());
        assert_eq!(reaction, Vector3::zeros());
    }

    #[test]
    fn test_pure_absorber_pushes_along_beam() {
        let law = ReflectionLaw::specular_diffuse(1.0, 0.0, 0.0, false).unwrap();
        let incoming = Vector3::new(0.0, 0.0, -1.0);
        let reaction = law.reaction_vector(&Vector3::z(), &incoming);
        // Head-on absorption: unit reaction along the beam
        assert!((reaction - incoming).norm() < 1e-12);
    }

    #[test]
    fn test_pure_mirror_doubles_normal_momentum() {
        let law = ReflectionLaw::specular_diffuse(0.0, 1.0, 0.0, false).unwrap();
        let incoming = Vector3::new(0.0, 0.0, -1.0);
        let reaction = law.reaction_vector(&Vector3::z(), &incoming);
        // Head-on mirror: reaction -2ẑ (twice the photon momentum)
        assert!((reaction - Vector3::new(0.0, 0.0, -2.0)).norm() < 1e-12);
    }

    #[test]
    fn test_oblique_mirror_reaction_is_normal_only() {
        let law = ReflectionLaw::specular_diffuse(0.0, 1.0, 0.0, false).unwrap();
        let incoming = Vector3::new(1.0, 0.0, -1.0).normalize();
        let reaction = law.reaction_vector(&Vector3::z(), &incoming);
        // Specular reflection transfers momentum only along the normal
        assert!(reaction.x.abs() < 1e-12);
        assert!(reaction.y.abs() < 1e-12);
        assert!(reaction.z < 0.0);
    }

    #[test]
    fn test_instantaneous_reradiation_adds_normal_recoil() {
        let without = ReflectionLaw::specular_diffuse(0.5, 0.2, 0.3, false).unwrap();
        let with = ReflectionLaw::specular_diffuse(0.5, 0.2, 0.3, true).unwrap();
        let incoming = Vector3::new(0.0, 0.0, -1.0);

        let r0 = without.reaction_vector(&Vector3::z(), &incoming);
        let r1 = with.reaction_vector(&Vector3::z(), &incoming);
        // Reradiating the absorbed half adds recoil along -z only
        assert!((r1.z - (r0.z - 2.0 * 0.5 / 3.0)).abs() < 1e-12);
        assert!((r1.x - r0.x).abs() < 1e-12);
    }
}
