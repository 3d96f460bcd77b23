use crate::constants::Degree;
use crate::ephemeris::AltitudeOracle;
use crate::planet_alert_errors::PlanetAlertError;
use crate::time::Instant;

/// True when the Sun stands at or below `night_limit` degrees at `at`.
pub fn is_dark<O: AltitudeOracle + ?Sized>(
    oracle: &O,
    at: &Instant,
    night_limit: Degree,
) -> Result<bool, PlanetAlertError> {
    Ok(oracle.sun_altitude(at)? <= night_limit)
}
