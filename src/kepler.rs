use super::constants::DPI;
use std::f64::consts::PI;

use crate::planet_alert_errors::PlanetAlertError;

const MAX_ITERATIONS: usize = 30;
const TOLERANCE: f64 = 1e-12;

/// Principal value of an angle in radians, in [0, 2π).
pub(crate) fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Principal value of an angle in radians, in [-π, π).
pub(crate) fn signed_angle(a: f64) -> f64 {
    let a = principal_angle(a);
    if a >= PI {
        a - DPI
    } else {
        a
    }
}

/// Solve Kepler's equation `M = E - e·sin(E)` for the eccentric anomaly.
///
/// Newton iteration started from `E₀ = M + e·sin(M)`; the elliptic planetary
/// orbits handled here (e < 0.21) converge in a handful of steps.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: mean anomaly M in radians (any range).
/// * `eccentricity`: orbital eccentricity, `0 ≤ e < 1`.
///
/// Return
/// ------
/// * The eccentric anomaly E in radians, in [-π, π).
pub fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> Result<f64, PlanetAlertError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(PlanetAlertError::KeplerNonConvergence {
            mean_anomaly,
            eccentricity,
        });
    }

    let m = signed_angle(mean_anomaly);
    let mut e_anom = m + eccentricity * m.sin();

    for _ in 0..MAX_ITERATIONS {
        let delta =
            (e_anom - eccentricity * e_anom.sin() - m) / (1.0 - eccentricity * e_anom.cos());
        e_anom -= delta;
        if delta.abs() < TOLERANCE {
            return Ok(e_anom);
        }
    }

    Err(PlanetAlertError::KeplerNonConvergence {
        mean_anomaly,
        eccentricity,
    })
}
