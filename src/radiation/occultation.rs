//! Eclipse and shadow geometry
//!
//! The shadow function computes the fraction of a source disk, as seen from
//! the target, that is not blocked by occulting bodies. It works on apparent
//! angular radii and angular separation (conical geometry, Montenbruck-style)
//! and supports any number of simultaneous occulters, combined
//! multiplicatively. Boundary cases are clamped against floating-point
//! overshoot.

use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::bodies::{BodyId, BodySet};

/// Closed set of occultation models
#[derive(Debug, Clone)]
pub enum OccultationModel {
    /// No occultation: full irradiance always reaches the target
    None,

    /// Conical shadow geometry with a list of occulting bodies
    ShadowBodies { occulting: Vec<BodyId> },
}

impl OccultationModel {
    /// Model without any occulters
    pub fn none() -> Self {
        Self::None
    }

    /// Model with the given occulting bodies
    pub fn with_bodies(occulting: Vec<BodyId>) -> Self {
        if occulting.is_empty() {
            Self::None
        } else {
            Self::ShadowBodies { occulting }
        }
    }

    /// Fraction of the source irradiance reaching `target_position`, in [0, 1]
    ///
    /// The source is treated as a disk of radius `source_radius` centered at
    /// `source_position`. Callers attenuate irradiance contributions by this
    /// factor; a factor of zero is a legitimate full-eclipse outcome, not an
    /// error.
    pub fn irradiance_fraction(
        &self,
        source_position: &Vector3<f64>,
        source_radius: f64,
        target_position: &Vector3<f64>,
        bodies: &BodySet,
    ) -> f64 {
        match self {
            Self::None => 1.0,
            Self::ShadowBodies { occulting } => {
                let mut fraction = 1.0;
                for &id in occulting {
                    let occulter = bodies.get(id);
                    fraction *= shadow_fraction(
                        source_position,
                        source_radius,
                        &occulter.state.position,
                        occulter.radius_m,
                        target_position,
                    );
                }
                fraction.clamp(0.0, 1.0)
            }
        }
    }
}

/// Visible fraction of the source disk behind a single occulter
///
/// Returns 1 when the disks are separated, 0 when the occulter disk fully
/// contains the source disk, the annular fraction when the occulter transits
/// in front of a larger source disk, and the lens-overlap fraction for
/// partial eclipses.
pub fn shadow_fraction(
    source_position: &Vector3<f64>,
    source_radius: f64,
    occulter_position: &Vector3<f64>,
    occulter_radius: f64,
    target_position: &Vector3<f64>,
) -> f64 {
    let to_source = source_position - target_position;
    let to_occulter = occulter_position - target_position;
    let d_source = to_source.norm();
    let d_occulter = to_occulter.norm();

    // Coincident points carry no usable geometry; callers with a degenerate
    // source-target pair fail earlier in the source evaluation.
    if d_source <= f64::EPSILON || d_occulter <= f64::EPSILON {
        return 1.0;
    }

    // A body can only shadow radiation coming from in front of it
    if d_occulter >= d_source || to_source.dot(&to_occulter) <= 0.0 {
        return 1.0;
    }

    // Apparent angular radii and separation as seen from the target
    let a = (source_radius / d_source).min(1.0).asin();
    let b = (occulter_radius / d_occulter).min(1.0).asin();
    let c = (to_source.dot(&to_occulter) / (d_source * d_occulter))
        .clamp(-1.0, 1.0)
        .acos();

    if c >= a + b {
        // Disks do not overlap
        1.0
    } else if c <= b - a {
        // Occulter disk contains the source disk: total eclipse
        0.0
    } else if a <= f64::EPSILON {
        // Point source behind the occulter edge; the containment case above
        // already caught c <= b
        1.0
    } else if c <= a - b {
        // Occulter transits in front of a larger source disk: annular
        (1.0 - (b * b) / (a * a)).clamp(0.0, 1.0)
    } else {
        // Partial overlap: circular lens area in angular measure
        let x = (c * c + a * a - b * b) / (2.0 * c);
        let y = (a * a - x * x).max(0.0).sqrt();
        let overlap = a * a * (x / a).clamp(-1.0, 1.0).acos()
            + b * b * ((c - x) / b).clamp(-1.0, 1.0).acos()
            - c * y;
        (1.0 - overlap / (PI * a * a)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{Body, SUN_RADIUS_M};

    // Sun at 1 AU on +x, occulter between, target at origin
    const SUN_DIST: f64 = 1.5e11;

    fn fraction_for_offset(occulter_offset_y: f64, occulter_radius: f64) -> f64 {
        let sun = Vector3::new(SUN_DIST, 0.0, 0.0);
        let occulter = Vector3::new(1.0e7, occulter_offset_y, 0.0);
        shadow_fraction(&sun, SUN_RADIUS_M, &occulter, occulter_radius, &Vector3::zeros())
    }

    #[test]
    fn test_no_occultation_when_separated() {
        // Occulter far off to the side
        assert_eq!(fraction_for_offset(5.0e6, 1.0e6), 1.0);
    }

    #[test]
    fn test_total_eclipse_when_contained() {
        // Large occulter dead center: apparent radius far exceeds the Sun's
        assert_eq!(fraction_for_offset(0.0, 2.0e6), 0.0);
    }

    #[test]
    fn test_monotonic_in_separation() {
        // Sweep the occulter from centered to clear of the disk; the visible
        // fraction must increase monotonically
        let mut last = -1.0;
        for i in 0..100 {
            let offset = i as f64 * 5.0e4;
            let f = fraction_for_offset(offset, 2.0e6);
            assert!(
                f >= last - 1e-12,
                "fraction decreased from {last} to {f} at offset {offset}"
            );
            assert!((0.0..=1.0).contains(&f));
            last = f;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_annular_transit() {
        // Small occulter in front of the Sun: blocks the area ratio
        let occulter_radius = 2.0e4;
        let occulter_dist = 1.0e7;
        let f = fraction_for_offset(0.0, occulter_radius);
        let a = (SUN_RADIUS_M / SUN_DIST).asin();
        let b = (occulter_radius / occulter_dist).asin();
        let expected = 1.0 - (b * b) / (a * a);
        assert!((f - expected).abs() < 1e-12);
    }

    #[test]
    fn test_occulter_behind_source_ignored() {
        let sun = Vector3::new(SUN_DIST, 0.0, 0.0);
        let occulter = Vector3::new(2.0 * SUN_DIST, 0.0, 0.0);
        let f = shadow_fraction(&sun, SUN_RADIUS_M, &occulter, 1.0e9, &Vector3::zeros());
        assert_eq!(f, 1.0);
    }

    #[test]
    fn test_multiple_occulters_combine() {
        let mut bodies = BodySet::new();
        // Offsets chosen so each occulter covers part of the solar disk
        let mut earth = Body::new("Earth", 5.972e24, 2.0e6);
        earth.state.position = Vector3::new(1.0e7, 2.0e6, 0.0);
        let mut moon = Body::new("Moon", 7.342e22, 2.0e6);
        moon.state.position = Vector3::new(1.0e7, -2.0e6, 0.0);
        let earth_id = bodies.add(earth);
        let moon_id = bodies.add(moon);

        let sun = Vector3::new(SUN_DIST, 0.0, 0.0);
        let single = OccultationModel::with_bodies(vec![earth_id]);
        let both = OccultationModel::with_bodies(vec![earth_id, moon_id]);

        let f_single = single.irradiance_fraction(&sun, SUN_RADIUS_M, &Vector3::zeros(), &bodies);
        let f_both = both.irradiance_fraction(&sun, SUN_RADIUS_M, &Vector3::zeros(), &bodies);

        assert!(f_single < 1.0);
        assert!(f_both < f_single);
        assert!(f_both >= 0.0);
    }

    #[test]
    fn test_none_model_passes_everything() {
        let bodies = BodySet::new();
        let model = OccultationModel::none();
        let f = model.irradiance_fraction(
            &Vector3::new(SUN_DIST, 0.0, 0.0),
            SUN_RADIUS_M,
            &Vector3::zeros(),
            &bodies,
        );
        assert_eq!(f, 1.0);
    }
}
