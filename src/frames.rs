//! Orbit-local frame decomposition
//!
//! Splits an acceleration vector into radial, along-track and cross-track
//! components relative to an orbital position/velocity pair. Used by result
//! consumers to attribute perturbation accelerations to directions that are
//! meaningful for orbit evolution.

use nalgebra::Vector3;

use crate::error::{RadPressError, Result};

/// Decompose `acc` into (radial, along-track, cross-track) components
///
/// The frame is built from the radial unit vector, the velocity component
/// orthogonal to it, and their cross product, so the three axes are
/// orthonormal and the decomposition preserves the vector norm.
///
/// Fails with a degenerate-geometry error when the position is at the
/// origin or the velocity is parallel to the position (the along-track
/// direction is then undefined).
pub fn cart2track(
    acc: &Vector3<f64>,
    vel: &Vector3<f64>,
    pos: &Vector3<f64>,
) -> Result<(f64, f64, f64)> {
    let r = pos.norm();
    if r <= f64::EPSILON {
        return Err(RadPressError::DegenerateGeometry(
            "position at origin, radial direction undefined",
        ));
    }
    let radial = pos / r;

    let along = vel - radial * vel.dot(&radial);
    let along_norm = along.norm();
    if along_norm <= f64::EPSILON {
        return Err(RadPressError::DegenerateGeometry(
            "velocity parallel to position, along-track direction undefined",
        ));
    }
    let along = along / along_norm;

    let cross = radial.cross(&along);

    Ok((acc.dot(&radial), acc.dot(&along), acc.dot(&cross)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_cart2track_axis_aligned() {
        let acc = Vector3::new(1.0, 2.0, 3.0);
        let vel = Vector3::new(0.0, 3.0, 0.0);
        let pos = Vector3::new(5.0, 0.0, 0.0);

        let (radial, along, cross) = cart2track(&acc, &vel, &pos).unwrap();

        assert!((radial - 1.0).abs() < 1e-12);
        assert!((along - 2.0).abs() < 1e-12);
        assert!((cross - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_cart2track_oblique() {
        let acc = Vector3::new(0.0, 4.0, 4.0);
        let vel = Vector3::new(3.0, 3.0, 0.0);
        let pos = Vector3::new(0.0, 5.0, 5.0);

        let (radial, along, cross) = cart2track(&acc, &vel, &pos).unwrap();

        assert!((radial - 2.0_f64.sqrt() * 4.0).abs() < 1e-12);
        assert!(along.abs() < 1e-12);
        assert!(cross.abs() < 1e-12);
    }

    #[test]
    fn test_cart2track_preserves_norm() {
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            let acc = Vector3::new(rng.gen_range(0.0..5.0), rng.gen_range(0.0..5.0), rng.gen_range(0.0..5.0));
            let vel = Vector3::new(rng.gen_range(0.0..5.0), rng.gen_range(0.0..5.0), rng.gen_range(0.0..5.0));
            let pos = Vector3::new(rng.gen_range(0.1..5.0), rng.gen_range(0.1..5.0), rng.gen_range(0.1..5.0));

            let (radial, along, cross) = cart2track(&acc, &vel, &pos).unwrap();
            let decomposed = Vector3::new(radial, along, cross);

            assert!((decomposed.norm() - acc.norm()).abs() < 1e-10);
        }
    }

    #[test]
    fn test_cart2track_degenerate_inputs() {
        let acc = Vector3::new(1.0, 0.0, 0.0);

        // Position at origin
        assert!(cart2track(&acc, &Vector3::new(0.0, 1.0, 0.0), &Vector3::zeros()).is_err());

        // Velocity parallel to position
        let pos = Vector3::new(2.0, 0.0, 0.0);
        let vel = Vector3::new(3.0, 0.0, 0.0);
        assert!(cart2track(&acc, &vel, &pos).is_err());
    }
}
