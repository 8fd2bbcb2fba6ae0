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

//! Lateral offsets around the nominal path, covering a safety tube (§4.7).
//!
//! The vertical dimension of the corridor is not materialized here — it is
//! applied at query time via [`Config::corridor_test_altitudes`], since it
//! is cheaper to requery a lateral point at a handful of altitudes than to
//! multiply the point count up front.

use crate::domain::SamplePoint;
use crate::geom::Coordinate;

/// Nautical mile, in kilometers.
pub const KM_PER_NAUTICAL_MILE: f64 = 1.852;

/// One lateral corridor offset point, anchored to the nominal altitude of
/// the sample its segment originated from.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CorridorPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub base_altitude_ft: f64,
}

impl CorridorPoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Generates the corridor offset points for a nominal sample path.
///
/// For each segment `(s_i, s_{i+1})`, offsets `s_i` perpendicular to the
/// segment bearing by `±corridor_width_nm` on the WGS84 sphere.
pub fn generate_corridor(samples: &[SamplePoint], corridor_width_nm: f64) -> Vec<CorridorPoint> {
    let width_km = corridor_width_nm * KM_PER_NAUTICAL_MILE;
    let mut points = Vec::with_capacity(samples.len().saturating_sub(1) * 2);

    for pair in samples.windows(2) {
        let (anchor, next) = (&pair[0], &pair[1]);
        let from = anchor.coordinate();
        let to = next.coordinate();
        let bearing = from.bearing_to(&to);

        for perpendicular in [bearing + 90.0, bearing - 90.0] {
            let offset = from.destination(perpendicular, width_km);
            points.push(CorridorPoint {
                longitude: offset.longitude,
                latitude: offset.latitude,
                base_altitude_ft: anchor.altitude_ft,
            });
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lon: f64, lat: f64, alt: f64, cum: f64, idx: usize) -> SamplePoint {
        SamplePoint {
            longitude: lon,
            latitude: lat,
            altitude_ft: alt,
            cumulative_distance_km: cum,
            segment_index: idx,
        }
    }

    #[test]
    fn two_offsets_emitted_per_segment() {
        let samples = vec![sample(0.0, 0.0, 1000.0, 0.0, 0), sample(1.0, 0.0, 1000.0, 111.0, 1)];
        let corridor = generate_corridor(&samples, 5.0);
        assert_eq!(corridor.len(), 2);
    }

    #[test]
    fn offsets_are_roughly_corridor_width_away() {
        let samples = vec![sample(0.0, 0.0, 1000.0, 0.0, 0), sample(1.0, 0.0, 1000.0, 111.0, 1)];
        let corridor = generate_corridor(&samples, 5.0);
        let expected_km = 5.0 * KM_PER_NAUTICAL_MILE;
        let origin = samples[0].coordinate();
        for point in &corridor {
            let distance = origin.distance_km(&point.coordinate());
            assert!((distance - expected_km).abs() < 0.1, "distance was {distance}");
        }
    }

    #[test]
    fn zero_width_collapses_to_the_anchor() {
        let samples = vec![sample(0.0, 0.0, 1000.0, 0.0, 0), sample(1.0, 0.0, 1000.0, 111.0, 1)];
        let corridor = generate_corridor(&samples, 0.0);
        for point in &corridor {
            assert!((point.longitude - 0.0).abs() < 1e-9);
            assert!((point.latitude - 0.0).abs() < 1e-9);
        }
    }

    #[test]
    fn single_sample_yields_no_corridor_points() {
        let samples = vec![sample(0.0, 0.0, 1000.0, 0.0, 0)];
        assert!(generate_corridor(&samples, 5.0).is_empty());
    }
}
