use nalgebra::Matrix3;

use crate::{
    constants::{Radian, MJD, RADEG, RADSEC, T2000},
    ref_system::rotmt,
};

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// This function returns the mean obliquity angle ε, the angle between the Earth's
/// equator and the ecliptic plane, using the IAU 1976 polynomial. The result is
/// expressed in radians and is valid within a few millennia of J2000.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// Formula
/// -------
/// ```text
/// ε(t) = ε₀ + ε₁·T + ε₂·T² + ε₃·T³,   T = (tjm - T2000) / 36525
/// ```
/// with the coefficients in arcseconds, evaluated with Horner's method.
pub fn obleq(tjm: MJD) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (tjm - T2000) / 36525.0;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Precession matrix from the J2000 mean equator and equinox to the mean equator
/// and equinox of date (IAU 1976 model).
///
/// The matrix is built from the three Lieske angles:
///
/// ```text
/// ζ(T) = (0.6406161 + 0.0000839·T + 0.0000050·T²) · T  [deg]
/// θ(T) = (0.5567530 - 0.0001185·T - 0.0000116·T²) · T  [deg]
/// z(T) = (0.6406161 + 0.0003041·T + 0.0000051·T²) · T  [deg]
/// ```
///
/// and applied as active rotations `P = Rz(z) · Ry(-θ) · Rz(ζ)`, so that
/// `x_date = P · x_J2000`.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date in TT scale.
///
/// See also
/// --------
/// * [`rotmt`] – elementary rotations used to assemble the matrix.
pub fn prec(tjm: MJD) -> Matrix3<f64> {
    let zed = 0.6406161 * RADEG;
    let zd = 0.6406161 * RADEG;
    let thd = 0.5567530 * RADEG;

    let zedd = 0.0000839 * RADEG;
    let zdd = 0.0003041 * RADEG;
    let thdd = -0.0001185 * RADEG;

    let zeddd = 0.0000050 * RADEG;
    let zddd = 0.0000051 * RADEG;
    let thddd = -0.0000116 * RADEG;

    let t = (tjm - T2000) / 36525.0;

    let zeta = ((zeddd * t + zedd) * t + zed) * t;
    let z = ((zddd * t + zdd) * t + zd) * t;
    let theta = ((thddd * t + thdd) * t + thd) * t;

    rotmt(z, 2) * rotmt(-theta, 1) * rotmt(zeta, 2)
}
