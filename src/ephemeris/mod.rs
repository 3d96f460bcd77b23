//! # Altitude oracle
//!
//! The visibility computation only ever asks one question: *how high above the
//! horizon is this body at this instant?* That question is the [`AltitudeOracle`]
//! capability. The scanner and the classifier are written against the trait, so they
//! can be driven by synthetic altitude profiles in tests.
//!
//! [`EphemerisOracle`] is the analytical implementation used by the binary:
//!
//! 1. heliocentric ecliptic J2000 positions from the Keplerian mean elements of
//!    [`planet_elements`], the Earth being taken as the Earth–Moon barycentre,
//! 2. a geocentric vector corrected once for light time,
//! 3. rotation to the mean equator of date ([`ecliptic_j2000_to_equator_of_date`]),
//! 4. topocentric correction with the observer's parallax coordinates,
//! 5. altitude from the local hour angle and the declination.
//!
//! The result is good to a few arcminutes between 1800 and 2050, far below what a
//! 2.5-minute sampling step can resolve.
pub mod planet_elements;

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;

use crate::constants::{Degree, Radian, DAYS_PER_CENTURY, VLIGHT_AU};
use crate::observers::ObserverSite;
use crate::planet_alert_errors::PlanetAlertError;
use crate::ref_system::{cartesian_to_radec, ecliptic_j2000_to_equator_of_date, horizon_altitude};
use crate::time::Instant;

use planet_elements::{PlanetElements, VALIDITY_CENTURIES};

/// A body the oracle can place on the sky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// Default tracked bodies, in display order before sorting.
    pub const PLANETS: [Body; 7] = [
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }

    fn elements(&self) -> Option<&'static PlanetElements> {
        match self {
            Body::Sun => None,
            Body::Mercury => Some(&planet_elements::MERCURY),
            Body::Venus => Some(&planet_elements::VENUS),
            Body::Mars => Some(&planet_elements::MARS),
            Body::Jupiter => Some(&planet_elements::JUPITER),
            Body::Saturn => Some(&planet_elements::SATURN),
            Body::Uranus => Some(&planet_elements::URANUS),
            Body::Neptune => Some(&planet_elements::NEPTUNE),
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = PlanetAlertError;

    /// Case-insensitive; a trailing ` barycenter` is accepted (`"jupiter barycenter"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let name = lower
            .strip_suffix("barycenter")
            .map(str::trim_end)
            .unwrap_or(&lower);

        std::iter::once(Body::Sun)
            .chain(Body::PLANETS)
            .find(|body| body.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| PlanetAlertError::UnknownBody(s.to_string()))
    }
}

/// Apparent altitude of a body above the observer's horizon.
///
/// An implementation is bound to one observer. Any error is fatal for the run.
pub trait AltitudeOracle {
    /// Altitude of `body` at `at`, in degrees (negative below the horizon).
    fn altitude(&self, body: Body, at: &Instant) -> Result<Degree, PlanetAlertError>;

    /// Altitude of the Sun, used by the darkness predicate.
    fn sun_altitude(&self, at: &Instant) -> Result<Degree, PlanetAlertError> {
        self.altitude(Body::Sun, at)
    }
}

impl<T: AltitudeOracle + ?Sized> AltitudeOracle for &T {
    fn altitude(&self, body: Body, at: &Instant) -> Result<Degree, PlanetAlertError> {
        (**self).altitude(body, at)
    }

    fn sun_altitude(&self, at: &Instant) -> Result<Degree, PlanetAlertError> {
        (**self).sun_altitude(at)
    }
}

impl<T: AltitudeOracle + ?Sized> AltitudeOracle for Box<T> {
    fn altitude(&self, body: Body, at: &Instant) -> Result<Degree, PlanetAlertError> {
        (**self).altitude(body, at)
    }

    fn sun_altitude(&self, at: &Instant) -> Result<Degree, PlanetAlertError> {
        (**self).sun_altitude(at)
    }
}

/// Analytical altitude oracle for one observing site.
#[derive(Debug, Clone)]
pub struct EphemerisOracle {
    site: ObserverSite,
}

impl EphemerisOracle {
    pub fn new(site: &ObserverSite) -> Self {
        EphemerisOracle { site: site.clone() }
    }

    pub fn site(&self) -> &ObserverSite {
        &self.site
    }

    /// Geocentric position of a body in the ecliptic J2000 frame, in au.
    ///
    /// Planets are taken at the retarded time `t − |ρ|/c`; one iteration is enough
    /// at this accuracy.
    ///
    /// Return
    /// ------
    /// * `OutOfEphemerisRange` outside the validity of the element table.
    pub fn geocentric_position(
        &self,
        body: Body,
        at: &Instant,
    ) -> Result<Vector3<f64>, PlanetAlertError> {
        let t = at.centuries_since_j2000();
        if !(VALIDITY_CENTURIES.0..=VALIDITY_CENTURIES.1).contains(&t) {
            return Err(PlanetAlertError::OutOfEphemerisRange(at.mjd_tt()));
        }

        let earth = planet_elements::EARTH_MOON.heliocentric_position(t)?;

        match body.elements() {
            None => Ok(-earth),
            Some(elements) => {
                let geometric = elements.heliocentric_position(t)? - earth;
                let light_time_days = geometric.norm() / VLIGHT_AU;
                let t_emit = t - light_time_days / DAYS_PER_CENTURY;
                Ok(elements.heliocentric_position(t_emit)? - earth)
            }
        }
    }

    /// Topocentric right ascension and declination, mean equator of date.
    ///
    /// Return
    /// ------
    /// * `(α, δ, distance)`: radians, radians, au.
    pub fn topocentric_radec(
        &self,
        body: Body,
        at: &Instant,
    ) -> Result<(Radian, Radian, f64), PlanetAlertError> {
        let geocentric = ecliptic_j2000_to_equator_of_date(at.mjd_tt())
            * self.geocentric_position(body, at)?;
        let lst = self.site.local_sidereal_time(at);
        let topocentric = geocentric - self.site.geocentric_position(lst);
        Ok(cartesian_to_radec(topocentric))
    }
}

impl AltitudeOracle for EphemerisOracle {
    fn altitude(&self, body: Body, at: &Instant) -> Result<Degree, PlanetAlertError> {
        let (ra, dec, _) = self.topocentric_radec(body, at)?;
        let hour_angle = self.site.local_sidereal_time(at) - ra;
        let altitude = horizon_altitude(hour_angle, dec, self.site.latitude_rad()).to_degrees();

        if altitude.is_finite() {
            Ok(altitude)
        } else {
            Err(PlanetAlertError::OracleFailure {
                body,
                reason: format!("non-finite altitude at {at}"),
            })
        }
    }
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;
    use crate::observers::locations::resolve_location;
    use approx::assert_abs_diff_eq;
    use std::collections::BTreeMap;

    fn winnipeg_oracle() -> EphemerisOracle {
        EphemerisOracle::new(&resolve_location("winnipeg", &BTreeMap::new()).unwrap())
    }

    #[test]
    fn test_body_from_str() {
        assert_eq!("jupiter".parse::<Body>().unwrap(), Body::Jupiter);
        assert_eq!("  Saturn ".parse::<Body>().unwrap(), Body::Saturn);
        assert_eq!("MARS barycenter".parse::<Body>().unwrap(), Body::Mars);
        assert_eq!("sun".parse::<Body>().unwrap(), Body::Sun);
        assert_eq!(
            "pluto".parse::<Body>().unwrap_err(),
            PlanetAlertError::UnknownBody("pluto".into())
        );
    }

    #[test]
    fn test_body_display() {
        let names: Vec<String> = Body::PLANETS.iter().map(|b| b.to_string()).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
    }

    #[test]
    fn test_sun_distance_and_declination_at_solstice() {
        let oracle = winnipeg_oracle();
        let at = Instant::parse("2024-06-20T21:00:00Z", chrono_tz::UTC).unwrap();
        let sun = oracle.geocentric_position(Body::Sun, &at).unwrap();
        assert_abs_diff_eq!(sun.norm(), 1.0163, epsilon = 1e-3);

        let (_, dec, _) = oracle.topocentric_radec(Body::Sun, &at).unwrap();
        assert_abs_diff_eq!(dec.to_degrees(), 23.44, epsilon = 0.05);
    }

    #[test]
    fn test_out_of_range() {
        let oracle = winnipeg_oracle();
        let at = Instant::parse("2077-01-01T00:00:00Z", chrono_tz::UTC).unwrap();
        assert!(matches!(
            oracle.altitude(Body::Mars, &at),
            Err(PlanetAlertError::OutOfEphemerisRange(_))
        ));
    }

    #[test]
    fn test_oracle_through_references() {
        let oracle = winnipeg_oracle();
        let at = Instant::parse("2025-03-01T04:00:00Z", chrono_tz::UTC).unwrap();
        let direct = oracle.altitude(Body::Venus, &at).unwrap();
        let by_ref: &dyn AltitudeOracle = &oracle;
        let boxed: Box<dyn AltitudeOracle> = Box::new(oracle.clone());
        assert_eq!(by_ref.altitude(Body::Venus, &at).unwrap(), direct);
        assert_eq!(boxed.sun_altitude(&at).unwrap(), oracle.sun_altitude(&at).unwrap());
    }
}
