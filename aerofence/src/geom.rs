// SPDX-License-Identifier: Apache-2.0
// Copyright 2024, 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Geographic primitives: coordinates, great-circle distance and bearing.
//!
//! Unlike the WGS84-ellipsoid geodesic calculations elsewhere in this
//! workspace's history, this module deliberately uses the haversine formula
//! on a sphere of radius 6,371 km throughout, matching the reference this
//! analysis was distilled from.

use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean Earth radius used for all great-circle calculations, in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point in WGS84 decimal degrees.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Coordinate {
    /// Latitude in the range from -90° (south) to 90° (north).
    pub latitude: f64,

    /// Longitude in the range from -180° (west) to 180° (east).
    pub longitude: f64,
}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

impl From<Coordinate> for geo::Coord<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Coord {
            x: c.longitude,
            y: c.latitude,
        }
    }
}

impl From<geo::Coord<f64>> for Coordinate {
    fn from(c: geo::Coord<f64>) -> Self {
        Self {
            latitude: c.y,
            longitude: c.x,
        }
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.longitude, c.latitude)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(p: geo::Point<f64>) -> Self {
        Self {
            latitude: p.y(),
            longitude: p.x(),
        }
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other`, in km, using the haversine formula
    /// on a sphere of radius [`EARTH_RADIUS_KM`].
    ///
    /// # Examples
    ///
    /// ```
    /// use aerofence::geom::Coordinate;
    ///
    /// let a = Coordinate::new(0.0, 0.0);
    /// let b = Coordinate::new(0.0, 1.0);
    /// assert!((a.distance_km(&b) - 111.19).abs() < 0.1);
    /// ```
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();
        EARTH_RADIUS_KM * c
    }

    /// Initial true bearing to `other`, in degrees clockwise from north,
    /// normalized to `[0, 360)`.
    pub fn bearing_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        let bearing = y.atan2(x).to_degrees();
        (bearing + 360.0) % 360.0
    }

    /// Destination point `distance_km` away from this point along
    /// `bearing_deg` (clockwise from north), on the great-circle sphere.
    pub fn destination(&self, bearing_deg: f64, distance_km: f64) -> Coordinate {
        let angular_distance = distance_km / EARTH_RADIUS_KM;
        let bearing = bearing_deg.to_radians();
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();

        let lat2 = (lat1.sin() * angular_distance.cos()
            + lat1.cos() * angular_distance.sin() * bearing.cos())
        .asin();
        let lon2 = lon1
            + (bearing.sin() * angular_distance.sin() * lat1.cos())
                .atan2(angular_distance.cos() - lat1.sin() * lat2.sin());

        Coordinate::new(lat2.to_degrees(), lon2.to_degrees())
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({0}, {1})", self.latitude, self.longitude)
    }
}

/// Parses a free-form `DD:MM:SS[.ss]H`-style DMS string into decimal degrees.
///
/// This is distinct from [`aixm::dms::parse`], which only accepts the rigid
/// fixed-width AIXM encoding; this parser is used for round-tripping
/// human-entered or displayed coordinates and tolerates a `:` or ` `
/// separator between fields.
pub fn parse_dms(text: &str) -> Option<f64> {
    let text = text.trim();
    let mut chars = text.chars();
    let hemisphere = chars.next_back()?;
    let sign = match hemisphere {
        'N' | 'E' => 1.0,
        'S' | 'W' => -1.0,
        _ => return None,
    };
    let body = chars.as_str().trim();
    let fields: Vec<&str> = body.split([':', ' ']).filter(|s| !s.is_empty()).collect();
    let (deg, min, sec) = match fields.as_slice() {
        [d, m, s] => (d.parse::<f64>().ok()?, m.parse::<f64>().ok()?, s.parse::<f64>().ok()?),
        [d, m] => (d.parse::<f64>().ok()?, m.parse::<f64>().ok()?, 0.0),
        [d] => (d.parse::<f64>().ok()?, 0.0, 0.0),
        _ => return None,
    };
    Some(sign * (deg + min / 60.0 + sec / 3600.0))
}

/// Formats decimal degrees as a `DD:MM:SS.ssH` DMS string.
///
/// `is_latitude` selects the N/S vs E/W hemisphere letters.
pub fn format_dms(decimal: f64, is_latitude: bool) -> String {
    let hemisphere = if is_latitude {
        if decimal >= 0.0 { 'N' } else { 'S' }
    } else if decimal >= 0.0 {
        'E'
    } else {
        'W'
    };
    let abs = decimal.abs();
    let deg = abs.trunc();
    let min_f = (abs - deg) * 60.0;
    let min = min_f.trunc();
    let sec = (min_f - min) * 60.0;
    format!("{deg:02.0}:{min:02.0}:{sec:05.2}{hemisphere}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_one_degree_of_longitude_at_equator() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        assert!((a.distance_km(&b) - 111.19).abs() < 0.1);
    }

    #[test]
    fn bearing_due_east() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        assert!((a.bearing_to(&b) - 90.0).abs() < 0.1);
    }

    #[test]
    fn destination_roundtrips_distance() {
        let start = Coordinate::new(48.0, 7.0);
        let end = start.destination(45.0, 50.0);
        assert!((start.distance_km(&end) - 50.0).abs() < 0.1);
    }

    #[test]
    fn dms_roundtrip() {
        let decimal = parse_dms("48:12:34.56N").unwrap();
        let formatted = format_dms(decimal, true);
        let reparsed = parse_dms(&formatted).unwrap();
        assert!((decimal - reparsed).abs() < 1e-4);
    }

    #[test]
    fn dms_rejects_bad_hemisphere() {
        assert!(parse_dms("48:12:34.56X").is_none());
    }
}
