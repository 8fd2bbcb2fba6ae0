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

//! Materializes an airspace's borders into `geo::Polygon` geometry.
//!
//! Polygon borders pass their vertex ring straight through; circle borders
//! are approximated as a 32-sided regular polygon. The AIXM importer never
//! produces a Circle border itself (see [`crate::importer`]), but this
//! builder supports both variants for airspaces assembled programmatically.

use geo::{Coord, LineString, Polygon};

use crate::domain::Border;
use crate::error::Error;

/// Number of vertices used to approximate a circular border.
const CIRCLE_SEGMENTS: usize = 32;

/// Kilometers per degree of latitude, locally constant.
const KM_PER_DEGREE_LAT: f64 = 110.574;

/// Kilometers per degree of longitude at the equator; scaled by
/// `cos(latitude)` away from it.
const KM_PER_DEGREE_LON_EQUATOR: f64 = 111.320;

/// Builds the set of closed lateral geometries for one airspace's borders.
///
/// Borders with fewer than 3 resulting vertices are dropped; an airspace
/// with no valid borders at all yields [`Error::NoGeometry`].
pub fn build_polygons(airspace_id: i64, borders: &[Border]) -> Result<Vec<Polygon<f64>>, Error> {
    let polygons: Vec<Polygon<f64>> = borders.iter().filter_map(border_to_polygon).collect();

    if polygons.is_empty() {
        log::warn!("airspace {airspace_id} has no valid border geometry");
        return Err(Error::NoGeometry { airspace_id });
    }

    Ok(polygons)
}

fn border_to_polygon(border: &Border) -> Option<Polygon<f64>> {
    match border {
        Border::Polygon(vertices) => {
            if vertices.len() < 3 {
                log::debug!("dropping polygon border with {} vertices", vertices.len());
                return None;
            }
            let mut coords: Vec<Coord<f64>> = vertices
                .iter()
                .map(|v| Coord {
                    x: v.longitude,
                    y: v.latitude,
                })
                .collect();
            close_ring(&mut coords);
            Some(Polygon::new(LineString::from(coords), vec![]))
        }
        Border::Circle { center, radius_km } => Some(approximate_circle(center.latitude, center.longitude, *radius_km)),
    }
}

/// Approximates a circle as a [`CIRCLE_SEGMENTS`]-vertex regular polygon,
/// sampling equally spaced angles and converting the offset to degrees
/// using latitude-local scale factors.
fn approximate_circle(center_lat: f64, center_lon: f64, radius_km: f64) -> Polygon<f64> {
    let lon_scale = KM_PER_DEGREE_LON_EQUATOR * center_lat.to_radians().cos();

    let mut coords: Vec<Coord<f64>> = (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * (i as f64) / (CIRCLE_SEGMENTS as f64);
            let dlat = radius_km * theta.cos() / KM_PER_DEGREE_LAT;
            let dlon = radius_km * theta.sin() / lon_scale;
            Coord {
                x: center_lon + dlon,
                y: center_lat + dlat,
            }
        })
        .collect();
    close_ring(&mut coords);

    Polygon::new(LineString::from(coords), vec![])
}

/// Appends the first coordinate again so the ring is explicitly closed, as
/// several `geo` algorithms (containment among them) expect.
fn close_ring(coords: &mut Vec<Coord<f64>>) {
    if let Some(&first) = coords.first() {
        coords.push(first);
    }
}
