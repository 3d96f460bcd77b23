//! # Crossing scanner
//!
//! Horizon crossings are found by plain sampling: the altitude is computed at a
//! fixed step and every pair of consecutive samples is compared against the
//! threshold. Nothing is refined, so an event time is the instant of the first
//! sample past the threshold and is known to within one step.
//!
//! ```text
//!   prev <  thr <= curr   →  Rise at curr
//!   prev >= thr >  curr   →  Set  at curr
//! ```
//!
//! A sample exactly on the threshold counts as *above*, so one transition can never
//! register twice.
//!
//! The bookkeeping of the primary scan ([`scan`]) is a small state machine,
//! [`ScanAccumulator`]; the secondary search ([`find_set_after`]) shares the same
//! sampling loop and simply stops at its first set.
use hifitime::Duration;
use tracing::debug;

use super::SearchConfig;
use crate::constants::Degree;
use crate::ephemeris::{AltitudeOracle, Body};
use crate::planet_alert_errors::PlanetAlertError;
use crate::time::Instant;

/// A threshold crossing between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Rise,
    Set,
}

impl Crossing {
    /// Classify the transition from `prev` to `curr`.
    pub fn between(prev: Degree, curr: Degree, threshold: Degree) -> Option<Crossing> {
        if prev < threshold && curr >= threshold {
            Some(Crossing::Rise)
        } else if prev >= threshold && curr < threshold {
            Some(Crossing::Set)
        } else {
            None
        }
    }
}

/// Crossings found around a reference instant.
///
/// An absent field means "not found inside the scanned window", never "does not
/// happen".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrossingResult {
    /// Most recent rise at or before the reference
    pub last_rise_before: Option<Instant>,
    /// First rise strictly after the reference
    pub next_rise_after: Option<Instant>,
    /// First set strictly after the reference
    pub next_set_after: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    NoFutureRise,
    FutureRiseSeen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    Continue,
    Stop,
}

/// State of the primary scan.
///
/// Rises at or before the reference keep overwriting `last_rise_before`. The first
/// future rise moves the phase to [`ScanPhase::FutureRiseSeen`]. The first future
/// set is recorded whatever the phase; if it comes after the first future rise the
/// scan is over.
#[derive(Debug, Clone)]
pub struct ScanAccumulator {
    reference: Instant,
    phase: ScanPhase,
    result: CrossingResult,
}

impl ScanAccumulator {
    pub fn new(reference: Instant) -> Self {
        ScanAccumulator {
            reference,
            phase: ScanPhase::NoFutureRise,
            result: CrossingResult::default(),
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn result(&self) -> &CrossingResult {
        &self.result
    }

    pub fn on_crossing(&mut self, crossing: Crossing, at: Instant) -> ScanControl {
        match crossing {
            Crossing::Rise => self.on_rise(at),
            Crossing::Set => self.on_set(at),
        }
    }

    pub fn on_rise(&mut self, at: Instant) -> ScanControl {
        if at <= self.reference {
            self.result.last_rise_before = Some(at);
        } else if self.result.next_rise_after.is_none() {
            self.result.next_rise_after = Some(at);
            self.phase = ScanPhase::FutureRiseSeen;
        }
        ScanControl::Continue
    }

    pub fn on_set(&mut self, at: Instant) -> ScanControl {
        if at > self.reference && self.result.next_set_after.is_none() {
            self.result.next_set_after = Some(at);
            if self.phase == ScanPhase::FutureRiseSeen {
                return ScanControl::Stop;
            }
        }
        ScanControl::Continue
    }

    pub fn finish(self) -> CrossingResult {
        self.result
    }
}

/// Sample `body` from `start` while the current instant is before `end`, handing every
/// crossing to `on_crossing`.
///
/// The first sample is taken at `start`, the following ones every `step`; the last
/// sample may fall up to one step past `end`.
///
/// Return
/// ------
/// * The number of oracle queries made, or the first oracle error.
fn sample_crossings<O, F>(
    oracle: &O,
    body: Body,
    start: Instant,
    end: Instant,
    step: Duration,
    threshold: Degree,
    mut on_crossing: F,
) -> Result<usize, PlanetAlertError>
where
    O: AltitudeOracle + ?Sized,
    F: FnMut(Crossing, Instant) -> ScanControl,
{
    let mut t = start;
    let mut prev = oracle.altitude(body, &t)?;
    let mut queries = 1;

    while t < end {
        let t_next = t + step;
        let alt = oracle.altitude(body, &t_next)?;
        queries += 1;

        if let Some(crossing) = Crossing::between(prev, alt, threshold) {
            if on_crossing(crossing, t_next) == ScanControl::Stop {
                break;
            }
        }

        prev = alt;
        t = t_next;
    }

    Ok(queries)
}

/// Scan `[reference − lookback, reference + lookahead]` for the crossings of `body`.
///
/// Arguments
/// ---------
/// * `oracle`: altitude source for the observer.
/// * `body`: the body to scan.
/// * `reference`: usually "now".
/// * `config`: step, threshold and window lengths.
///
/// Return
/// ------
/// * The [`CrossingResult`]; the scan ends early once the set following the first
///   future rise is known.
///
/// See also
/// --------
/// * [`ScanAccumulator`] – the bookkeeping applied to each crossing.
pub fn scan<O: AltitudeOracle + ?Sized>(
    oracle: &O,
    body: Body,
    reference: &Instant,
    config: &SearchConfig,
) -> Result<CrossingResult, PlanetAlertError> {
    let start = *reference - config.lookback();
    let end = *reference + config.lookahead();

    let mut acc = ScanAccumulator::new(*reference);
    let queries = sample_crossings(
        oracle,
        body,
        start,
        end,
        config.step(),
        config.altitude_threshold_deg,
        |crossing, at| acc.on_crossing(crossing, at),
    )?;

    let result = acc.finish();
    debug!(
        %body,
        queries,
        last_rise_before = ?result.last_rise_before.map(|t| t.to_string()),
        next_rise_after = ?result.next_rise_after.map(|t| t.to_string()),
        next_set_after = ?result.next_set_after.map(|t| t.to_string()),
        "crossing scan done"
    );
    Ok(result)
}

/// First set of `body` after `start`, looking forward at most `set_search_max_hours`.
pub fn find_set_after<O: AltitudeOracle + ?Sized>(
    oracle: &O,
    body: Body,
    start: &Instant,
    config: &SearchConfig,
) -> Result<Option<Instant>, PlanetAlertError> {
    let mut found = None;
    let queries = sample_crossings(
        oracle,
        body,
        *start,
        *start + config.set_search_max(),
        config.step(),
        config.altitude_threshold_deg,
        |crossing, at| match crossing {
            Crossing::Set => {
                found = Some(at);
                ScanControl::Stop
            }
            Crossing::Rise => ScanControl::Continue,
        },
    )?;

    debug!(%body, queries, set = ?found.map(|t| t.to_string()), "secondary set search done");
    Ok(found)
}
