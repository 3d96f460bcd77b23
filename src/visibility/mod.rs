//! # Visibility windows
//!
//! Deciding whether a planet is worth announcing tonight takes three pieces:
//!
//! * [`crossing`] samples a body's altitude at a fixed step and records the horizon
//!   crossings around the reference instant (plus the forward-only set search),
//! * [`darkness`] tells whether the Sun is low enough for the sky to be dark,
//! * [`classifier`] combines both into at most one [`VisibilityRow`](classifier::VisibilityRow)
//!   per body.
//!
//! All three take their thresholds and windows from an explicit [`SearchConfig`],
//! nothing is read from global state.
pub mod classifier;
pub mod crossing;
pub mod darkness;

use hifitime::{Duration, Unit};
use serde::Deserialize;

use crate::constants::{
    Degree, ALT_THRESHOLD, DUSK_PROBE_MINUTES, LOOKAHEAD_HOURS, LOOKBACK_HOURS, NIGHT_LIMIT_DEG,
    SET_SEARCH_MAX_HOURS, STEP_MIN,
};
use crate::ephemeris::Body;
use crate::planet_alert_errors::PlanetAlertError;

/// Largest sampling step accepted, in minutes. Coarser steps can skip a crossing of
/// a fast-moving body close to the horizon.
pub const MAX_STEP_MINUTES: f64 = 10.0;

/// Thresholds and search windows shared by every body of a run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub step_minutes: f64,
    pub altitude_threshold_deg: Degree,
    pub night_limit_deg: Degree,
    pub lookback_hours: i64,
    pub lookahead_hours: i64,
    pub set_search_max_hours: i64,
    pub dusk_probe_minutes: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            step_minutes: STEP_MIN,
            altitude_threshold_deg: ALT_THRESHOLD,
            night_limit_deg: NIGHT_LIMIT_DEG,
            lookback_hours: LOOKBACK_HOURS,
            lookahead_hours: LOOKAHEAD_HOURS,
            set_search_max_hours: SET_SEARCH_MAX_HOURS,
            dusk_probe_minutes: DUSK_PROBE_MINUTES,
        }
    }
}

impl SearchConfig {
    /// Check the configuration before any oracle query is made.
    ///
    /// Return
    /// ------
    /// * `InvalidSearchConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), PlanetAlertError> {
        if !(self.step_minutes > 0.0 && self.step_minutes <= MAX_STEP_MINUTES) {
            return Err(PlanetAlertError::InvalidSearchConfig(format!(
                "step_minutes must be in (0, {MAX_STEP_MINUTES}], got {}",
                self.step_minutes
            )));
        }
        if !self.altitude_threshold_deg.is_finite() || !self.night_limit_deg.is_finite() {
            return Err(PlanetAlertError::InvalidSearchConfig(
                "thresholds must be finite".into(),
            ));
        }
        for (name, hours) in [
            ("lookback_hours", self.lookback_hours),
            ("lookahead_hours", self.lookahead_hours),
            ("set_search_max_hours", self.set_search_max_hours),
        ] {
            if hours <= 0 {
                return Err(PlanetAlertError::InvalidSearchConfig(format!(
                    "{name} must be positive, got {hours}"
                )));
            }
        }
        if self.dusk_probe_minutes < 0 {
            return Err(PlanetAlertError::InvalidSearchConfig(format!(
                "dusk_probe_minutes must not be negative, got {}",
                self.dusk_probe_minutes
            )));
        }
        Ok(())
    }

    pub fn step(&self) -> Duration {
        Unit::Minute * self.step_minutes
    }

    pub fn lookback(&self) -> Duration {
        Unit::Hour * self.lookback_hours
    }

    pub fn lookahead(&self) -> Duration {
        Unit::Hour * self.lookahead_hours
    }

    pub fn set_search_max(&self) -> Duration {
        Unit::Hour * self.set_search_max_hours
    }

    pub fn dusk_probe(&self) -> Duration {
        Unit::Minute * self.dusk_probe_minutes
    }
}

/// Check the list of bodies a run tracks.
///
/// Return
/// ------
/// * `InvalidSearchConfig` when the list is empty, names the Sun or names a body
///   twice.
pub fn validate_tracked_bodies(bodies: &[Body]) -> Result<(), PlanetAlertError> {
    if bodies.is_empty() {
        return Err(PlanetAlertError::InvalidSearchConfig(
            "the list of tracked bodies is empty".into(),
        ));
    }
    if bodies.contains(&Body::Sun) {
        return Err(PlanetAlertError::InvalidSearchConfig(
            "the Sun cannot be a tracked body".into(),
        ));
    }
    for (i, body) in bodies.iter().enumerate() {
        if bodies[..i].contains(body) {
            return Err(PlanetAlertError::InvalidSearchConfig(format!(
                "{body} is tracked more than once"
            )));
        }
    }
    Ok(())
}
