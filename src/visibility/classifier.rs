//! # Visibility classifier
//!
//! Each tracked body gets at most one row, decided by the first matching case:
//!
//! | Case | Condition | Rise shown | Set shown |
//! |------|-----------|------------|-----------|
//! | [`UpInDarkness`](VisibilityCase::UpInDarkness) | up now and dark now | last rise before now, else `—` | next set, else `—` |
//! | [`RisesIntoDarkness`](VisibilityCase::RisesIntoDarkness) | next rise is in the future and dark | next rise | set following that rise, else `—` |
//! | [`UpBeforeDusk`](VisibilityCase::UpBeforeDusk) | up now, not dark, dark one hour before the next set | last rise, else `Is Up` | next set |
//!
//! A body matching none of them is left out of the digest.
use tracing::{debug, info};

use super::crossing::{find_set_after, scan, CrossingResult};
use super::darkness::is_dark;
use super::SearchConfig;
use crate::constants::Degree;
use crate::ephemeris::{AltitudeOracle, Body};
use crate::planet_alert_errors::PlanetAlertError;
use crate::time::Instant;

/// Placeholder for an unknown instant in the first two cases.
pub const UNKNOWN_TIME: &str = "—";

/// Rise placeholder of [`VisibilityCase::UpBeforeDusk`].
pub const ALREADY_UP: &str = "Is Up";

/// Set placeholder of [`VisibilityCase::UpBeforeDusk`].
pub const UNKNOWN_SET: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityCase {
    /// Above the horizon while the sky is already dark
    UpInDarkness,
    /// Below the horizon now, rises later into a dark sky
    RisesIntoDarkness,
    /// Above the horizon in daylight, still up once dusk has fallen
    UpBeforeDusk,
}

/// What is known about a body at the reference instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyObservation {
    pub body: Body,
    pub altitude_now: Degree,
    pub dark_now: bool,
    pub crossings: CrossingResult,
}

impl BodyObservation {
    /// Query the oracle for the current altitude and scan the crossings around `now`.
    pub fn observe<O: AltitudeOracle + ?Sized>(
        oracle: &O,
        body: Body,
        now: &Instant,
        dark_now: bool,
        config: &SearchConfig,
    ) -> Result<Self, PlanetAlertError> {
        Ok(BodyObservation {
            body,
            altitude_now: oracle.altitude(body, now)?,
            dark_now,
            crossings: scan(oracle, body, now, config)?,
        })
    }

    fn is_up(&self, config: &SearchConfig) -> bool {
        self.altitude_now >= config.altitude_threshold_deg
    }
}

/// One line of the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityRow {
    pub name: String,
    pub body: Body,
    pub case: VisibilityCase,
    /// Sort key; `None` sorts last
    pub rise: Option<Instant>,
    pub set: Option<Instant>,
    pub rise_display: String,
    pub set_display: String,
}

fn label(instant: Option<Instant>, placeholder: &str) -> String {
    instant
        .map(|t| t.clock_label())
        .unwrap_or_else(|| placeholder.to_string())
}

/// Pick the case of an observation, first match wins.
///
/// The oracle is needed for the darkness tests at the next rise and one dusk probe
/// before the next set.
pub fn determine_case<O: AltitudeOracle + ?Sized>(
    oracle: &O,
    observation: &BodyObservation,
    now: &Instant,
    config: &SearchConfig,
) -> Result<Option<VisibilityCase>, PlanetAlertError> {
    let up_now = observation.is_up(config);
    let crossings = &observation.crossings;

    if up_now && observation.dark_now {
        return Ok(Some(VisibilityCase::UpInDarkness));
    }

    if let Some(rise) = crossings.next_rise_after {
        if rise > *now && is_dark(oracle, &rise, config.night_limit_deg)? {
            return Ok(Some(VisibilityCase::RisesIntoDarkness));
        }
    }

    if up_now && !observation.dark_now {
        if let Some(set) = crossings.next_set_after {
            let probe = set - config.dusk_probe();
            if is_dark(oracle, &probe, config.night_limit_deg)? {
                return Ok(Some(VisibilityCase::UpBeforeDusk));
            }
        }
    }

    Ok(None)
}

/// Build the row of one observation, or `None` if the body is not reportable.
///
/// Return
/// ------
/// * The row, with the secondary set search run when the primary scan stopped
///   short of the set that follows the next rise.
pub fn classify<O: AltitudeOracle + ?Sized>(
    oracle: &O,
    observation: &BodyObservation,
    now: &Instant,
    config: &SearchConfig,
) -> Result<Option<VisibilityRow>, PlanetAlertError> {
    let Some(case) = determine_case(oracle, observation, now, config)? else {
        return Ok(None);
    };
    let crossings = &observation.crossings;

    let (rise, set, rise_display, set_display) = match case {
        VisibilityCase::UpInDarkness => (
            crossings.last_rise_before,
            crossings.next_set_after,
            label(crossings.last_rise_before, UNKNOWN_TIME),
            label(crossings.next_set_after, UNKNOWN_TIME),
        ),
        VisibilityCase::RisesIntoDarkness => {
            let Some(rise) = crossings.next_rise_after else {
                return Ok(None);
            };
            let set = match crossings.next_set_after {
                Some(set) if set > rise => Some(set),
                _ => find_set_after(oracle, observation.body, &rise, config)?,
            };
            (
                Some(rise),
                set,
                rise.clock_label(),
                label(set, UNKNOWN_TIME),
            )
        }
        VisibilityCase::UpBeforeDusk => (
            crossings.last_rise_before,
            crossings.next_set_after,
            label(crossings.last_rise_before, ALREADY_UP),
            label(crossings.next_set_after, UNKNOWN_SET),
        ),
    };

    Ok(Some(VisibilityRow {
        name: observation.body.name().to_string(),
        body: observation.body,
        case,
        rise,
        set,
        rise_display,
        set_display,
    }))
}

/// Order rows by rise instant, rows without one last. The sort is stable.
pub fn sort_rows(rows: &mut [VisibilityRow]) {
    rows.sort_by_key(|row| (row.rise.is_none(), row.rise));
}

/// Classify every body in `bodies` and return the ordered rows.
///
/// Darkness at `now` is evaluated once for the whole run. The first oracle error
/// aborts the pass.
pub fn classify_bodies<O: AltitudeOracle + ?Sized>(
    oracle: &O,
    bodies: &[Body],
    now: &Instant,
    config: &SearchConfig,
) -> Result<Vec<VisibilityRow>, PlanetAlertError> {
    let dark_now = is_dark(oracle, now, config.night_limit_deg)?;
    debug!(dark_now, "darkness at reference instant");

    let mut rows = Vec::with_capacity(bodies.len());
    for &body in bodies {
        let observation = BodyObservation::observe(oracle, body, now, dark_now, config)?;
        match classify(oracle, &observation, now, config)? {
            Some(row) => {
                info!(
                    %body,
                    case = ?row.case,
                    rise = %row.rise_display,
                    set = %row.set_display,
                    "body reportable"
                );
                rows.push(row);
            }
            None => debug!(%body, altitude = observation.altitude_now, "body not reportable"),
        }
    }

    sort_rows(&mut rows);
    Ok(rows)
}
