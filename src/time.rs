//! # Instants and civil time
//!
//! [`Instant`] is the time value that flows through the scanner and the classifier.
//! It wraps a [`hifitime::Epoch`], whose arithmetic is exact (integer nanoseconds),
//! so stepping through a 96-hour window thousands of times never drifts.
//! Each instant also carries the observer's civil time zone ([`chrono_tz::Tz`]),
//! used only when the instant is rendered for a human.
//!
//! Equality and ordering compare the absolute epoch only.
//!
//! The module also hosts [`gmst`], the Greenwich mean sidereal time used by the
//! ephemeris oracle to orient the observer.
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use hifitime::{Duration, Epoch};

use crate::constants::{DAYS_PER_CENTURY, DPI, MJD, T2000};
use crate::planet_alert_errors::PlanetAlertError;

/// Clock label used in the digest rows, e.g. `09:42 PM`.
pub const CLOCK_FORMAT: &str = "%I:%M %p";

/// Date label used in the digest header, e.g. `Oct 14, 2026`.
pub const DATE_FORMAT: &str = "%b %d, %Y";

/// An absolute point in time, displayed in the observer's civil time zone.
#[derive(Debug, Clone, Copy)]
pub struct Instant {
    epoch: Epoch,
    tz: Tz,
}

impl Instant {
    pub fn from_epoch(epoch: Epoch, tz: Tz) -> Self {
        Instant { epoch, tz }
    }

    /// Build an instant from any `chrono` date-time, dropping the sub-second part.
    ///
    /// Arguments
    /// -----------------
    /// * `datetime`: the civil date-time, in any zone.
    /// * `tz`: the zone used later for display.
    ///
    /// Return
    /// ----------
    /// * The instant on the UTC scale, truncated to whole seconds.
    pub fn from_datetime<Z: TimeZone>(datetime: &DateTime<Z>, tz: Tz) -> Self {
        let utc = datetime.with_timezone(&Utc);
        let epoch = Epoch::from_gregorian_utc(
            utc.year(),
            utc.month() as u8,
            utc.day() as u8,
            utc.hour() as u8,
            utc.minute() as u8,
            utc.second() as u8,
            0,
        );
        Instant { epoch, tz }
    }

    /// The current wall-clock time, truncated to whole seconds.
    pub fn now_in(tz: Tz) -> Self {
        Self::from_datetime(&Utc::now(), tz)
    }

    /// Parse an RFC 3339 timestamp (`2026-10-14T21:30:00-05:00`).
    pub fn parse(text: &str, tz: Tz) -> Result<Self, PlanetAlertError> {
        let parsed = DateTime::parse_from_rfc3339(text.trim())
            .map_err(|err| PlanetAlertError::InvalidInstant(format!("{text}: {err}")))?;
        Ok(Self::from_datetime(&parsed, tz))
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    /// Same absolute instant, displayed in another zone.
    pub fn with_time_zone(&self, tz: Tz) -> Self {
        Instant {
            epoch: self.epoch,
            tz,
        }
    }

    pub fn mjd_tt(&self) -> MJD {
        self.epoch.to_mjd_tt_days()
    }

    pub fn mjd_utc(&self) -> MJD {
        self.epoch.to_mjd_utc_days()
    }

    /// Julian centuries (TT) elapsed since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        (self.mjd_tt() - T2000) / DAYS_PER_CENTURY
    }

    /// Convert to a `chrono` date-time in the observer's zone.
    pub fn to_local(&self) -> DateTime<Tz> {
        let millis = self.epoch.to_unix_milliseconds().round() as i64;
        let utc = DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default();
        utc.with_timezone(&self.tz)
    }

    /// 12-hour clock label in the observer's zone.
    pub fn clock_label(&self) -> String {
        self.to_local().format(CLOCK_FORMAT).to_string()
    }

    /// Calendar date label in the observer's zone.
    pub fn date_label(&self) -> String {
        self.to_local().format(DATE_FORMAT).to_string()
    }
}

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.epoch == other.epoch
    }
}

impl Eq for Instant {}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch.cmp(&other.epoch)
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant {
            epoch: self.epoch + rhs,
            tz: self.tz,
        }
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Instant {
        Instant {
            epoch: self.epoch - rhs,
            tz: self.tz,
        }
    }
}

impl Sub<Instant> for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        self.epoch - rhs.epoch
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_local().format("%Y-%m-%d %H:%M:%S %Z"))
    }
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982 polynomial for the mean sidereal time at
/// 0h UT1, plus the fractional-day term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale). UTC is an adequate stand-in
///   here: the difference stays below one second.
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # References
/// * IAU 1982, Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(tjm: MJD) -> f64 {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / DAYS_PER_CENTURY;

    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / 86400.0;

    // the day fraction, scaled from solar to sidereal rate
    let h = (tjm - itjm) * DPI;

    (gmst0 + h * RAP).rem_euclid(DPI)
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::Unit;

    const WINNIPEG: Tz = chrono_tz::America::Winnipeg;

    #[test]
    fn test_from_datetime_truncates_subseconds() {
        let dt = Utc.with_ymd_and_hms(2026, 10, 14, 3, 15, 42).unwrap()
            + chrono::Duration::milliseconds(870);
        let instant = Instant::from_datetime(&dt, WINNIPEG);
        let expected = Epoch::from_gregorian_utc(2026, 10, 14, 3, 15, 42, 0);
        assert_eq!(instant.epoch(), expected);
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let instant = Instant::parse("2026-10-14T21:30:00-05:00", WINNIPEG).unwrap();
        let expected = Epoch::from_gregorian_utc(2026, 10, 15, 2, 30, 0, 0);
        assert_eq!(instant.epoch(), expected);
        assert_eq!(instant.clock_label(), "09:30 PM");
        assert_eq!(instant.date_label(), "Oct 14, 2026");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Instant::parse("last tuesday", WINNIPEG).unwrap_err();
        assert!(matches!(err, PlanetAlertError::InvalidInstant(_)));
    }

    #[test]
    fn test_arithmetic_is_exact_over_many_steps() {
        let start = Instant::parse("2026-01-01T00:00:00Z", WINNIPEG).unwrap();
        let step = Unit::Minute * 2.5;
        let mut t = start;
        // 96 hours in 2.5 minute steps
        for _ in 0..2304 {
            t = t + step;
        }
        assert_eq!(t - start, Unit::Hour * 96_i64);
        assert_eq!(t, start + Unit::Hour * 96_i64);
    }

    #[test]
    fn test_ordering_ignores_zone() {
        let a = Instant::parse("2026-03-01T12:00:00Z", WINNIPEG).unwrap();
        let b = a.with_time_zone(chrono_tz::Asia::Riyadh);
        assert_eq!(a, b);
        assert!(a < b + Unit::Second * 1_i64);
    }

    #[test]
    fn test_gmst() {
        // 2000-01-01 12:00 UT1: GMST = 18h 41m 50.548s
        let expected = (18.0 + 41.0 / 60.0 + 50.54841 / 3600.0) * DPI / 24.0;
        assert_abs_diff_eq!(gmst(T2000), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_gmst_is_normalized() {
        for tjm in [40000.25, 51544.5, 60962.9, 70000.0] {
            let value = gmst(tjm);
            assert!((0.0..DPI).contains(&value));
        }
    }
}
