//! Keplerian mean elements of the major planets.
//!
//! Values and linear rates from E. M. Standish, *Keplerian Elements for Approximate
//! Positions of the Major Planets* (JPL), Table 1, valid 1800 AD – 2050 AD. Angles in
//! degrees, rates per Julian century (TDB ≈ TT), referred to the mean ecliptic and
//! equinox of J2000.
use nalgebra::Vector3;

use crate::kepler::eccentric_anomaly;
use crate::planet_alert_errors::PlanetAlertError;
use crate::ref_system::rotmt;

/// Validity of the element table, in Julian centuries from J2000.
pub const VALIDITY_CENTURIES: (f64, f64) = (-2.0, 0.51);

/// Each field holds `[value at J2000, rate per century]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetElements {
    /// au
    pub semi_major_axis: [f64; 2],
    pub eccentricity: [f64; 2],
    pub inclination: [f64; 2],
    pub mean_longitude: [f64; 2],
    pub perihelion_longitude: [f64; 2],
    pub node_longitude: [f64; 2],
}

pub const MERCURY: PlanetElements = PlanetElements {
    semi_major_axis: [0.38709927, 0.00000037],
    eccentricity: [0.20563593, 0.00001906],
    inclination: [7.00497902, -0.00594749],
    mean_longitude: [252.25032350, 149472.67411175],
    perihelion_longitude: [77.45779628, 0.16047689],
    node_longitude: [48.33076593, -0.12534081],
};

pub const VENUS: PlanetElements = PlanetElements {
    semi_major_axis: [0.72333566, 0.00000390],
    eccentricity: [0.00677672, -0.00004107],
    inclination: [3.39467605, -0.00078890],
    mean_longitude: [181.97909950, 58517.81538729],
    perihelion_longitude: [131.60246718, 0.00268329],
    node_longitude: [76.67984255, -0.27769418],
};

/// Earth–Moon barycentre
pub const EARTH_MOON: PlanetElements = PlanetElements {
    semi_major_axis: [1.00000261, 0.00000562],
    eccentricity: [0.01671123, -0.00004392],
    inclination: [-0.00001531, -0.01294668],
    mean_longitude: [100.46457166, 35999.37244981],
    perihelion_longitude: [102.93768193, 0.32327364],
    node_longitude: [0.0, 0.0],
};

pub const MARS: PlanetElements = PlanetElements {
    semi_major_axis: [1.52371034, 0.00001847],
    eccentricity: [0.09339410, 0.00007882],
    inclination: [1.84969142, -0.00813131],
    mean_longitude: [-4.55343205, 19140.30268499],
    perihelion_longitude: [-23.94362959, 0.44441088],
    node_longitude: [49.55953891, -0.29257343],
};

pub const JUPITER: PlanetElements = PlanetElements {
    semi_major_axis: [5.20288700, -0.00011607],
    eccentricity: [0.04838624, -0.00013253],
    inclination: [1.30439695, -0.00183714],
    mean_longitude: [34.39644051, 3034.74612775],
    perihelion_longitude: [14.72847983, 0.21252668],
    node_longitude: [100.47390909, 0.20469106],
};

pub const SATURN: PlanetElements = PlanetElements {
    semi_major_axis: [9.53667594, -0.00125060],
    eccentricity: [0.05386179, -0.00050991],
    inclination: [2.48599187, 0.00193609],
    mean_longitude: [49.95424423, 1222.49362201],
    perihelion_longitude: [92.59887831, -0.41897216],
    node_longitude: [113.66242448, -0.28867794],
};

pub const URANUS: PlanetElements = PlanetElements {
    semi_major_axis: [19.18916464, -0.00196176],
    eccentricity: [0.04725744, -0.00004397],
    inclination: [0.77263783, -0.00242939],
    mean_longitude: [313.23810451, 428.48202785],
    perihelion_longitude: [170.95427630, 0.40805281],
    node_longitude: [74.01692503, 0.04240589],
};

pub const NEPTUNE: PlanetElements = PlanetElements {
    semi_major_axis: [30.06992276, 0.00026291],
    eccentricity: [0.00859048, 0.00005105],
    inclination: [1.77004347, 0.00035372],
    mean_longitude: [-55.12002969, 218.45945325],
    perihelion_longitude: [44.96476227, -0.32241464],
    node_longitude: [131.78422574, -0.00508664],
};

fn at(element: [f64; 2], t: f64) -> f64 {
    element[0] + element[1] * t
}

impl PlanetElements {
    /// Heliocentric position in the ecliptic J2000 frame.
    ///
    /// Arguments
    /// ---------
    /// * `t`: Julian centuries (TT) since J2000.
    ///
    /// Return
    /// ------
    /// * Cartesian position in au, or the Kepler solver error.
    ///
    /// The orbital-plane position `(a(cos E − e), a√(1−e²) sin E, 0)` is carried to the
    /// ecliptic by `Rz(Ω) · Rx(I) · Rz(ω)`, with `ω = ϖ − Ω` and `M = L − ϖ`.
    pub fn heliocentric_position(&self, t: f64) -> Result<Vector3<f64>, PlanetAlertError> {
        let a = at(self.semi_major_axis, t);
        let e = at(self.eccentricity, t);
        let incl = at(self.inclination, t).to_radians();
        let mean_lon = at(self.mean_longitude, t);
        let peri_lon = at(self.perihelion_longitude, t);
        let node = at(self.node_longitude, t);

        let arg_peri = (peri_lon - node).to_radians();
        let mean_anomaly = (mean_lon - peri_lon).to_radians();

        let ecc_anom = eccentric_anomaly(mean_anomaly, e)?;
        let orbital = Vector3::new(
            a * (ecc_anom.cos() - e),
            a * (1.0 - e * e).sqrt() * ecc_anom.sin(),
            0.0,
        );

        Ok(rotmt(node.to_radians(), 2) * rotmt(incl, 0) * rotmt(arg_peri, 2) * orbital)
    }
}
