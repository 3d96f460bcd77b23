//! # PlanetAlert: one observer, one pass
//!
//! [`PlanetAlert`] is the façade that wires a run together:
//!
//! 1. **Observer** ([`ObserverSite`]) resolved from the configuration,
//! 2. **Altitude oracle** bound to that observer ([`EphemerisOracle`] by default),
//! 3. **Tracked bodies** and the **search parameters** ([`SearchConfig`]),
//! 4. the **classifier** producing ordered [`VisibilityRow`]s,
//! 5. the **digest**, handed to a [`DigestDispatcher`] only when it has rows.
//!
//! Everything is validated at construction, so a bad location or body name fails
//! before any oracle query. A run holds no state between invocations.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use planet_alert::config::AppConfig;
//! use planet_alert::dispatch::ConsoleDispatcher;
//! use planet_alert::planet_alert::PlanetAlert;
//!
//! let config = AppConfig::load(None).unwrap();
//! let alert = PlanetAlert::from_config(&config).unwrap();
//! let outcome = alert.run(&alert.now(), &ConsoleDispatcher).unwrap();
//! println!("{outcome:?}");
//! ```
use hifitime::Unit;
use tracing::info;

use crate::config::AppConfig;
use crate::constants::DIGEST_WINDOW_HOURS;
use crate::digest::Digest;
use crate::dispatch::DigestDispatcher;
use crate::ephemeris::{AltitudeOracle, Body, EphemerisOracle};
use crate::observers::ObserverSite;
use crate::planet_alert_errors::PlanetAlertError;
use crate::time::Instant;
use crate::visibility::classifier::{classify_bodies, VisibilityRow};
use crate::visibility::{validate_tracked_bodies, SearchConfig};

/// Result of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A digest with this many rows went to the dispatcher
    Dispatched { rows: usize },
    /// No body was reportable; nothing was dispatched
    NothingToReport,
}

#[derive(Debug, Clone)]
pub struct PlanetAlert<O = EphemerisOracle> {
    site: ObserverSite,
    bodies: Vec<Body>,
    search: SearchConfig,
    oracle: O,
}

impl PlanetAlert<EphemerisOracle> {
    /// Validate a configuration and bind the analytical oracle to its site.
    pub fn from_config(config: &AppConfig) -> Result<Self, PlanetAlertError> {
        let site = config.site()?;
        let oracle = EphemerisOracle::new(&site);
        Self::with_oracle(site, config.tracked_bodies()?, config.search.clone(), oracle)
    }
}

impl<O: AltitudeOracle> PlanetAlert<O> {
    /// Build a run around any altitude oracle.
    ///
    /// Arguments
    /// ---------
    /// * `site`: the observer; its time zone is used for every displayed time.
    /// * `bodies`: tracked planets, in encounter order, each once. Must not be empty.
    /// * `search`: thresholds and windows, validated here.
    /// * `oracle`: altitude source bound to `site`.
    pub fn with_oracle(
        site: ObserverSite,
        bodies: Vec<Body>,
        search: SearchConfig,
        oracle: O,
    ) -> Result<Self, PlanetAlertError> {
        search.validate()?;
        validate_tracked_bodies(&bodies)?;
        Ok(PlanetAlert {
            site,
            bodies,
            search,
            oracle,
        })
    }

    pub fn site(&self) -> &ObserverSite {
        &self.site
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn search(&self) -> &SearchConfig {
        &self.search
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Wall-clock "now" in the observer's zone, whole seconds.
    pub fn now(&self) -> Instant {
        Instant::now_in(self.site.time_zone)
    }

    /// Ordered rows for the reference instant `now`.
    pub fn report(&self, now: &Instant) -> Result<Vec<VisibilityRow>, PlanetAlertError> {
        let now = now.with_time_zone(self.site.time_zone);
        classify_bodies(&self.oracle, &self.bodies, &now, &self.search)
    }

    /// The digest for `now`, or `None` when no body is reportable.
    pub fn digest(&self, now: &Instant) -> Result<Option<Digest>, PlanetAlertError> {
        let rows = self.report(now)?;
        Ok(Digest::build(
            &self.site,
            now.with_time_zone(self.site.time_zone),
            Unit::Hour * DIGEST_WINDOW_HOURS,
            rows,
        ))
    }

    /// One full pass: classify, build the digest, dispatch it if it has rows.
    ///
    /// Return
    /// ------
    /// * The [`RunOutcome`]. Any oracle or dispatcher error aborts the run and
    ///   nothing partial is dispatched.
    pub fn run(
        &self,
        now: &Instant,
        dispatcher: &dyn DigestDispatcher,
    ) -> Result<RunOutcome, PlanetAlertError> {
        info!(
            location = %self.site.display_name,
            now = %now.with_time_zone(self.site.time_zone),
            bodies = self.bodies.len(),
            "starting visibility pass"
        );

        match self.digest(now)? {
            Some(digest) => {
                dispatcher.dispatch(&digest)?;
                info!(
                    location = %self.site.display_name,
                    rows = digest.rows.len(),
                    "digest dispatched"
                );
                Ok(RunOutcome::Dispatched {
                    rows: digest.rows.len(),
                })
            }
            None => {
                info!("No nighttime-visible planets upcoming. Nothing dispatched.");
                Ok(RunOutcome::NothingToReport)
            }
        }
    }
}
