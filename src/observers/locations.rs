//! Named observing locations.
//!
//! Two sites are built in (`riyadh`, `winnipeg`); the configuration file can add
//! more. Lookups are case-insensitive and custom entries shadow the built-in ones.
use std::collections::BTreeMap;

use chrono_tz::Tz;
use serde::Deserialize;

use super::ObserverSite;
use crate::constants::{Degree, Meter};
use crate::planet_alert_errors::PlanetAlertError;

/// A location as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationEntry {
    pub latitude: Degree,
    pub longitude: Degree,
    #[serde(default)]
    pub elevation_m: Meter,
    pub time_zone: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl LocationEntry {
    /// Validate the entry and turn it into an [`ObserverSite`].
    pub fn to_site(&self, key: &str) -> Result<ObserverSite, PlanetAlertError> {
        let tz = parse_time_zone(&self.time_zone)?;
        ObserverSite::new(
            key,
            self.display_name.clone(),
            self.latitude,
            self.longitude,
            self.elevation_m,
            tz,
        )
    }
}

/// Parse an IANA time-zone name such as `America/Winnipeg`.
pub fn parse_time_zone(name: &str) -> Result<Tz, PlanetAlertError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| PlanetAlertError::InvalidTimeZone(name.to_string()))
}

const BUILTIN: [(&str, Degree, Degree, Meter, &str); 2] = [
    ("riyadh", 24.7136, 46.6753, 600.0, "Asia/Riyadh"),
    ("winnipeg", 49.8955, -97.1385, 240.0, "America/Winnipeg"),
];

/// The built-in locations, keyed by lowercase name.
pub fn builtin_locations() -> BTreeMap<String, LocationEntry> {
    BUILTIN
        .iter()
        .map(|&(key, latitude, longitude, elevation_m, tz)| {
            (
                key.to_string(),
                LocationEntry {
                    latitude,
                    longitude,
                    elevation_m,
                    time_zone: tz.to_string(),
                    display_name: None,
                },
            )
        })
        .collect()
}

/// Resolve a location name into an observer site.
///
/// Arguments
/// ---------
/// * `name`: location name, compared case-insensitively.
/// * `custom`: user-defined locations, searched before the built-in ones.
///
/// Return
/// ------
/// * The validated [`ObserverSite`], `UnknownLocation` if neither table knows the
///   name, or the validation error of the matching entry.
pub fn resolve_location(
    name: &str,
    custom: &BTreeMap<String, LocationEntry>,
) -> Result<ObserverSite, PlanetAlertError> {
    let key = name.trim().to_lowercase();

    if let Some(entry) = custom
        .iter()
        .find(|(k, _)| k.to_lowercase() == key)
        .map(|(_, v)| v)
    {
        return entry.to_site(&key);
    }

    builtin_locations()
        .get(&key)
        .ok_or_else(|| PlanetAlertError::UnknownLocation(name.to_string()))?
        .to_site(&key)
}

/// Every resolvable location name, custom and built-in, sorted and deduplicated.
pub fn known_location_names(custom: &BTreeMap<String, LocationEntry>) -> Vec<String> {
    let mut names: Vec<String> = builtin_locations()
        .into_keys()
        .chain(custom.keys().map(|k| k.to_lowercase()))
        .collect();
    names.sort();
    names.dedup();
    names
}
