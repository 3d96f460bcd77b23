use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Radian, DPI, MJD, T2000};
use crate::earth_orientation::{obleq, prec};

/// Construct a right-handed 3×3 rotation matrix around one of the principal axes (X, Y, or Z).
///
/// This function builds a [`nalgebra::Matrix3`] representing an **active rotation**
/// of a 3D vector by an angle `alpha` around the chosen axis, in the direct
/// (counter-clockwise) sense.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians**.
/// * `k` - Index of the axis of rotation: `0` → X, `1` → Y, any other value → Z.
///
/// # Returns
///
/// A 3×3 orthonormal matrix `R` such that the rotated vector is `x' = R · x`.
pub fn rotmt(alpha: f64, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        _ => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Rotation from ecliptic mean J2000 to the mean equator and equinox of date.
///
/// The ecliptic J2000 vector is first tilted onto the J2000 equator by the
/// J2000 obliquity, then carried to the equator of date with [`prec`].
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT) of the target equator.
pub fn ecliptic_j2000_to_equator_of_date(tjm: MJD) -> Matrix3<f64> {
    prec(tjm) * rotmt(obleq(T2000), 0)
}

/// Convert a 3D Cartesian position vector to right ascension and declination.
///
/// Returns
/// --------
/// * Tuple `(α, δ, ρ)`:
///     - `α`: right ascension in radians, in the range [0, 2π).
///     - `δ`: declination in radians, in the range [−π/2, +π/2].
///     - `ρ`: Euclidean norm of the vector.
///
/// Remarks
/// -------
/// * If the input vector has zero norm, the result is `(0.0, 0.0, 0.0)`.
pub(crate) fn cartesian_to_radec(cartesian_position: Vector3<f64>) -> (Radian, Radian, f64) {
    let pos_norm = cartesian_position.norm();
    if pos_norm == 0. {
        return (0.0, 0.0, pos_norm);
    }

    let delta = (cartesian_position.z / pos_norm).clamp(-1.0, 1.0).asin();
    let alpha = cartesian_position.y.atan2(cartesian_position.x);
    let alpha = if alpha < 0.0 { alpha + DPI } else { alpha };
    (alpha, delta, pos_norm)
}

/// Altitude above the horizon from the local hour angle and declination.
///
/// ```text
/// sin(h) = sin(φ)·sin(δ) + cos(φ)·cos(δ)·cos(H)
/// ```
///
/// Arguments
/// ---------
/// * `hour_angle`: local hour angle H in radians (west positive).
/// * `declination`: δ in radians.
/// * `latitude`: geodetic latitude φ of the observer in radians.
pub(crate) fn horizon_altitude(
    hour_angle: Radian,
    declination: Radian,
    latitude: Radian,
) -> Radian {
    let sin_h =
        latitude.sin() * declination.sin() + latitude.cos() * declination.cos() * hour_angle.cos();
    sin_h.clamp(-1.0, 1.0).asin()
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotmt_z_quarter_turn() {
        let v = rotmt(FRAC_PI_2, 2) * Vector3::x();
        assert_abs_diff_eq!(v, Vector3::y(), epsilon = 1e-15);
    }

    #[test]
    fn test_ecliptic_pole_at_j2000() {
        // the ecliptic north pole sits at RA 18h, Dec 90° - ε
        let pole = ecliptic_j2000_to_equator_of_date(T2000) * Vector3::z();
        let (ra, dec, norm) = cartesian_to_radec(pole);
        assert_abs_diff_eq!(ra, 1.5 * std::f64::consts::PI, epsilon = 1e-12);
        assert_abs_diff_eq!(dec, FRAC_PI_2 - obleq(T2000), epsilon = 1e-12);
        assert_abs_diff_eq!(norm, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_cartesian_to_radec_zero_vector() {
        assert_eq!(cartesian_to_radec(Vector3::zeros()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_horizon_altitude() {
        let lat = 50f64.to_radians();
        // on the meridian, altitude = 90° - |φ - δ|
        let alt = horizon_altitude(0.0, 20f64.to_radians(), lat);
        assert_abs_diff_eq!(alt.to_degrees(), 60.0, epsilon = 1e-12);
        // the celestial pole stands at the latitude
        let alt = horizon_altitude(1.3, FRAC_PI_2, lat);
        assert_abs_diff_eq!(alt.to_degrees(), 50.0, epsilon = 1e-12);
    }
}
