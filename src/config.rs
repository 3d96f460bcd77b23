//! # Configuration
//!
//! Everything a run needs besides the clock: the observer, the tracked bodies, the
//! search parameters and where the digest goes. Values are taken, lowest priority
//! first, from
//!
//! 1. the built-in defaults,
//! 2. `planet-alert.yaml` in the working directory (or the file given with `--config`),
//! 3. the environment (`PLANET_ALERT_LOCATION`, `PLANET_ALERT_TEMPLATE`,
//!    `PLANET_ALERT_OUTPUT`),
//! 4. command-line flags, applied by the binary.
//!
//! Example
//! -----------------
//! ```yaml
//! location: oslo
//! locations:
//!   oslo:
//!     latitude: 59.9139
//!     longitude: 10.7522
//!     elevation_m: 23
//!     time_zone: Europe/Oslo
//! bodies: [Venus, Mars, Jupiter, Saturn]
//! search:
//!   step_minutes: 2.0
//! output: tonight.html
//! ```
use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use tracing::debug;

use crate::ephemeris::Body;
use crate::observers::locations::{resolve_location, LocationEntry};
use crate::observers::ObserverSite;
use crate::planet_alert_errors::PlanetAlertError;
use crate::visibility::{validate_tracked_bodies, SearchConfig};

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "planet-alert.yaml";

pub const DEFAULT_LOCATION: &str = "winnipeg";

pub const ENV_LOCATION: &str = "PLANET_ALERT_LOCATION";
pub const ENV_TEMPLATE: &str = "PLANET_ALERT_TEMPLATE";
pub const ENV_OUTPUT: &str = "PLANET_ALERT_OUTPUT";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Name of the observing site, case-insensitive
    pub location: String,
    /// User-defined sites, searched before the built-in ones
    pub locations: BTreeMap<String, LocationEntry>,
    /// Tracked bodies, in encounter order
    pub bodies: Vec<String>,
    pub search: SearchConfig,
    /// HTML template replacing the built-in page
    pub template: Option<Utf8PathBuf>,
    /// Write the HTML digest here instead of printing it
    pub output: Option<Utf8PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            location: DEFAULT_LOCATION.to_string(),
            locations: BTreeMap::new(),
            bodies: Body::PLANETS.iter().map(|b| b.name().to_string()).collect(),
            search: SearchConfig::default(),
            template: None,
            output: None,
        }
    }
}

impl AppConfig {
    /// Parse a YAML document; an empty document gives the defaults.
    pub fn parse(yaml: &str) -> Result<Self, PlanetAlertError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: &Utf8Path) -> Result<Self, PlanetAlertError> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| PlanetAlertError::ConfigIo {
                path: path.to_string(),
                source,
            })?;
        Self::parse(&contents)
    }

    /// Load the configuration of a run and apply the environment overrides.
    ///
    /// Arguments
    /// ---------
    /// * `explicit`: file given on the command line. It must exist; without it
    ///   [`DEFAULT_CONFIG_FILE`] is read when present.
    pub fn load(explicit: Option<&Utf8Path>) -> Result<Self, PlanetAlertError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None if Utf8Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Utf8Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key/value source (the process environment in
    /// [`AppConfig::apply_env_overrides`]). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(location) = lookup(ENV_LOCATION) {
            debug!(%location, "location overridden by the environment");
            self.location = location;
        }
        if let Some(template) = lookup(ENV_TEMPLATE) {
            self.template = Some(Utf8PathBuf::from(template));
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            self.output = Some(Utf8PathBuf::from(output));
        }
    }

    /// The observer of the configured location.
    pub fn site(&self) -> Result<ObserverSite, PlanetAlertError> {
        resolve_location(&self.location, &self.locations)
    }

    /// The tracked bodies: planets only, each named once, at least one.
    pub fn tracked_bodies(&self) -> Result<Vec<Body>, PlanetAlertError> {
        let bodies = self
            .bodies
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<Body>, _>>()?;
        validate_tracked_bodies(&bodies)?;
        Ok(bodies)
    }

    /// Check every setting before the first oracle query.
    pub fn validate(&self) -> Result<(), PlanetAlertError> {
        self.site()?;
        self.tracked_bodies()?;
        self.search.validate()
    }
}
