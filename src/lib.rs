pub mod config;
pub mod constants;
pub mod digest;
pub mod dispatch;
pub mod earth_orientation;
pub mod ephemeris;
pub mod kepler;
pub mod observers;
pub mod planet_alert;
pub mod planet_alert_errors;
mod ref_system;
pub mod time;
pub mod visibility;

pub use crate::ephemeris::{AltitudeOracle, Body, EphemerisOracle};
pub use crate::planet_alert::{PlanetAlert, RunOutcome};
pub use crate::planet_alert_errors::PlanetAlertError;
pub use crate::time::Instant;
