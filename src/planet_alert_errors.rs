use thiserror::Error;

use crate::ephemeris::Body;

#[derive(Error, Debug)]
pub enum PlanetAlertError {
    #[error("Unknown location: '{0}'")]
    UnknownLocation(String),

    #[error("Invalid IANA time zone: {0}")]
    InvalidTimeZone(String),

    #[error("Invalid observer location: {0}")]
    InvalidLocation(String),

    #[error("Unknown body: '{0}'")]
    UnknownBody(String),

    #[error("Invalid search configuration: {0}")]
    InvalidSearchConfig(String),

    #[error("Unable to read configuration file {path}: {source}")]
    ConfigIo {
        path: String,
        source: std::io::Error,
    },

    #[error("Unable to parse configuration: {0}")]
    ConfigParse(String),

    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    #[error("Instant outside of the ephemeris validity range (MJD TT {0})")]
    OutOfEphemerisRange(f64),

    #[error("Kepler equation did not converge (M = {mean_anomaly}, e = {eccentricity})")]
    KeplerNonConvergence {
        mean_anomaly: f64,
        eccentricity: f64,
    },

    #[error("Altitude query failed for {body}: {reason}")]
    OracleFailure { body: Body, reason: String },

    #[error("Template rendering error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_yml::Error> for PlanetAlertError {
    fn from(err: serde_yml::Error) -> Self {
        PlanetAlertError::ConfigParse(err.to_string())
    }
}

impl PartialEq for PlanetAlertError {
    fn eq(&self, other: &Self) -> bool {
        use PlanetAlertError::*;
        match (self, other) {
            (UnknownLocation(a), UnknownLocation(b)) => a == b,
            (InvalidTimeZone(a), InvalidTimeZone(b)) => a == b,
            (InvalidLocation(a), InvalidLocation(b)) => a == b,
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (InvalidSearchConfig(a), InvalidSearchConfig(b)) => a == b,
            (ConfigParse(a), ConfigParse(b)) => a == b,
            (InvalidInstant(a), InvalidInstant(b)) => a == b,
            (OutOfEphemerisRange(a), OutOfEphemerisRange(b)) => a == b,
            (
                KeplerNonConvergence {
                    mean_anomaly: m1,
                    eccentricity: e1,
                },
                KeplerNonConvergence {
                    mean_anomaly: m2,
                    eccentricity: e2,
                },
            ) => m1 == m2 && e1 == e2,
            (
                OracleFailure {
                    body: b1,
                    reason: r1,
                },
                OracleFailure {
                    body: b2,
                    reason: r2,
                },
            ) => b1 == b2 && r1 == r2,

            // not comparable: same variant is enough
            (ConfigIo { path: a, .. }, ConfigIo { path: b, .. }) => a == b,
            (TemplateError(_), TemplateError(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
