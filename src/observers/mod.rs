pub mod locations;

use chrono_tz::Tz;
use nalgebra::Vector3;

use crate::constants::{Degree, Meter, Radian, DPI, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, ERAU};
use crate::planet_alert_errors::PlanetAlertError;
use crate::time::{gmst, Instant};

/// A fixed observing site on the Earth's surface.
///
/// The parallax coordinates (ρ·cosφ′, ρ·sinφ′) are computed once at construction, in
/// units of the Earth's equatorial radius.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverSite {
    pub key: String,
    pub display_name: String,
    /// Geodetic latitude, degrees, north positive
    pub latitude: Degree,
    /// Longitude, degrees, east positive
    pub longitude: Degree,
    /// Height above the WGS84 ellipsoid, meters
    pub elevation: Meter,
    pub time_zone: Tz,
    rho_cos_phi: f64,
    rho_sin_phi: f64,
}

impl ObserverSite {
    /// Create a new observing site.
    ///
    /// Arguments
    /// ---------
    /// * `key`: lookup name of the site (e.g. `winnipeg`).
    /// * `display_name`: name used in the digest header; defaults to the title-cased key.
    /// * `latitude`: geodetic latitude in degrees, within [-90, 90].
    /// * `longitude`: longitude in degrees east of Greenwich, within [-180, 360).
    /// * `elevation`: height above the ellipsoid in meters.
    /// * `time_zone`: civil zone used to display the instants.
    ///
    /// Return
    /// ------
    /// * The site, or `InvalidLocation` if a coordinate is out of range or not finite.
    pub fn new(
        key: &str,
        display_name: Option<String>,
        latitude: Degree,
        longitude: Degree,
        elevation: Meter,
        time_zone: Tz,
    ) -> Result<Self, PlanetAlertError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(PlanetAlertError::InvalidLocation(format!(
                "{key}: latitude {latitude} outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..360.0).contains(&longitude) {
            return Err(PlanetAlertError::InvalidLocation(format!(
                "{key}: longitude {longitude} outside [-180, 360)"
            )));
        }
        if !elevation.is_finite() {
            return Err(PlanetAlertError::InvalidLocation(format!(
                "{key}: elevation {elevation} is not a number"
            )));
        }

        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(latitude, elevation);
        let key = key.to_lowercase();
        Ok(ObserverSite {
            display_name: display_name.unwrap_or_else(|| title_case(&key)),
            key,
            latitude,
            longitude,
            elevation,
            time_zone,
            rho_cos_phi,
            rho_sin_phi,
        })
    }

    /// Parallax coordinates (ρ·cosφ′, ρ·sinφ′) in Earth radii.
    pub fn parallax(&self) -> (f64, f64) {
        (self.rho_cos_phi, self.rho_sin_phi)
    }

    pub fn latitude_rad(&self) -> Radian {
        self.latitude.to_radians()
    }

    /// Local mean sidereal time at the site, radians in [0, 2π).
    pub fn local_sidereal_time(&self, at: &Instant) -> Radian {
        (gmst(at.mjd_utc()) + self.longitude.to_radians()).rem_euclid(DPI)
    }

    /// Geocentric position of the site in the mean equatorial frame of date, in AU.
    ///
    /// Arguments
    /// ---------
    /// * `lst`: local sidereal time in radians, see [`ObserverSite::local_sidereal_time`].
    pub fn geocentric_position(&self, lst: Radian) -> Vector3<f64> {
        Vector3::new(
            self.rho_cos_phi * lst.cos(),
            self.rho_cos_phi * lst.sin(),
            self.rho_sin_phi,
        ) * ERAU
    }
}

fn title_case(key: &str) -> String {
    key.split(|c: char| c == ' ' || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert geodetic latitude and height into normalized parallax coordinates on the Earth.
///
/// The reduced latitude `u = atan((b/a)·tan φ)` places the observer on the WGS84
/// ellipsoid; the height then moves it along the local vertical.
///
/// Arguments
/// -----------------
/// * `lat`: Geodetic latitude of the observer in degrees.
/// * `height`: Observer's altitude above the reference ellipsoid in meters.
///
/// Return
/// ----------
/// * A tuple `(rho_cos_phi, rho_sin_phi)` in units of the Earth's equatorial radius.
pub fn geodetic_to_parallax(lat: Degree, height: Meter) -> (f64, f64) {
    let lat_rad = lat.to_radians();
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;

    let u = (lat_rad.sin() * axis_ratio).atan2(lat_rad.cos());
    let h = height / EARTH_MAJOR_AXIS;

    let rho_sin_phi = axis_ratio * u.sin() + h * lat_rad.sin();
    let rho_cos_phi = u.cos() + h * lat_rad.cos();

    (rho_cos_phi, rho_sin_phi)
}
