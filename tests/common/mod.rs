#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use hifitime::Unit;
use planet_alert::ephemeris::{AltitudeOracle, Body};
use planet_alert::{Instant, PlanetAlertError};

/// 9:30 PM in Winnipeg, Oct 14 2026
pub fn reference() -> Instant {
    Instant::parse("2026-10-14T21:30:00-05:00", chrono_tz::America::Winnipeg).unwrap()
}

/// Piecewise-linear altitude profile, knots in hours from the sky origin.
/// Flat beyond the first and last knots.
#[derive(Debug, Clone)]
pub struct Profile {
    knots: Vec<(f64, f64)>,
}

impl Profile {
    pub fn new(knots: &[(f64, f64)]) -> Self {
        assert!(!knots.is_empty());
        assert!(knots.windows(2).all(|w| w[0].0 < w[1].0));
        Profile {
            knots: knots.to_vec(),
        }
    }

    pub fn constant(altitude: f64) -> Self {
        Profile::new(&[(0.0, altitude)])
    }

    pub fn at(&self, hours: f64) -> f64 {
        let first = self.knots[0];
        let last = self.knots[self.knots.len() - 1];
        if hours <= first.0 {
            return first.1;
        }
        if hours >= last.0 {
            return last.1;
        }
        let i = self.knots.iter().position(|k| k.0 > hours).unwrap();
        let (h0, a0) = self.knots[i - 1];
        let (h1, a1) = self.knots[i];
        a0 + (hours - h0) / (h1 - h0) * (a1 - a0)
    }
}

/// Deterministic altitude oracle built from profiles; counts its queries.
pub struct SyntheticSky {
    origin: Instant,
    sun: Profile,
    bodies: HashMap<Body, Profile>,
    queries: Cell<usize>,
}

impl SyntheticSky {
    /// Dark everywhere, every body far below the horizon.
    pub fn new(origin: Instant) -> Self {
        SyntheticSky {
            origin,
            sun: Profile::constant(-30.0),
            bodies: HashMap::new(),
            queries: Cell::new(0),
        }
    }

    pub fn with_sun(mut self, knots: &[(f64, f64)]) -> Self {
        self.sun = Profile::new(knots);
        self
    }

    pub fn with_body(mut self, body: Body, knots: &[(f64, f64)]) -> Self {
        self.bodies.insert(body, Profile::new(knots));
        self
    }

    pub fn queries(&self) -> usize {
        self.queries.get()
    }

    pub fn reset_queries(&self) {
        self.queries.set(0);
    }

    pub fn hours(&self, at: &Instant) -> f64 {
        (*at - self.origin).to_unit(Unit::Hour)
    }
}

impl AltitudeOracle for SyntheticSky {
    fn altitude(&self, body: Body, at: &Instant) -> Result<f64, PlanetAlertError> {
        self.queries.set(self.queries.get() + 1);
        let h = self.hours(at);
        Ok(match body {
            Body::Sun => self.sun.at(h),
            other => self.bodies.get(&other).map_or(-60.0, |p| p.at(h)),
        })
    }
}

/// Hours between two instants.
pub fn hours_between(from: &Instant, to: &Instant) -> f64 {
    (*to - *from).to_unit(Unit::Hour)
}
