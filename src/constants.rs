//! # Constants and type definitions for planet-alert
//!
//! This module centralizes the **physical constants**, **conversion factors** and the
//! **default search parameters** used by the visibility computation.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants (AU, Earth ellipsoid, speed of light)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate
//! - Default thresholds and scan parameters for the crossing scanner
//!
//! The search defaults are only *defaults*: every component receives them through an
//! explicit [`SearchConfig`](crate::visibility::SearchConfig) value.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Earth equatorial radius in meters (WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Earth radius expressed in astronomical units
pub const ERAU: f64 = (EARTH_MAJOR_AXIS / 1000.) / AU;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;

// -------------------------------------------------------------------------------------------------
// Visibility search defaults
// -------------------------------------------------------------------------------------------------

/// Altitude at which a body is considered to be on the horizon, accounting for refraction.
pub const ALT_THRESHOLD: Degree = -0.5;

/// Sun altitude at or below which the sky counts as dark.
pub const NIGHT_LIMIT_DEG: Degree = 0.0;

/// Sampling step of the crossing scanner, in minutes.
pub const STEP_MIN: f64 = 2.5;

/// Hours scanned before the reference instant.
pub const LOOKBACK_HOURS: i64 = 48;

/// Hours scanned after the reference instant.
pub const LOOKAHEAD_HOURS: i64 = 48;

/// Forward-only horizon of the secondary set search, in hours.
pub const SET_SEARCH_MAX_HOURS: i64 = 72;

/// How long before a set the sky must already be dark for an "up before dusk" body.
pub const DUSK_PROBE_MINUTES: i64 = 60;

/// Length of the window announced in the digest header, in hours.
pub const DIGEST_WINDOW_HOURS: i64 = 24;
