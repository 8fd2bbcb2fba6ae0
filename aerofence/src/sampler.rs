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

//! Densifies a sparse route by interpolation, or thins a dense source trace,
//! into a sequence of [`SamplePoint`]s at roughly uniform cumulative
//! distance (§4.6).

use crate::config::Config;
use crate::domain::{FlightRoute, SamplePoint};

/// Produces the analysis sample path for `route`.
///
/// An empty route or a single-waypoint route yields no samples — there is
/// no segment to sample and the analyzer must not crash on it.
pub fn sample_route(route: &FlightRoute, config: &Config) -> Vec<SamplePoint> {
    if route.waypoints.len() < 2 {
        return Vec::new();
    }

    if route.is_dense_trace() {
        thin_trace(route)
    } else {
        interpolate_route(route, config)
    }
}

/// Thins a dense source trace (>50 points) to at most ~1,000 points by
/// keeping every `⌈N/1000⌉`-th point; the final waypoint is always kept.
fn thin_trace(route: &FlightRoute) -> Vec<SamplePoint> {
    let waypoints = &route.waypoints;
    let n = waypoints.len();
    let step = n.div_ceil(1000).max(1);

    let mut kept_indices: Vec<usize> = (0..n).step_by(step).collect();
    if *kept_indices.last().unwrap() != n - 1 {
        kept_indices.push(n - 1);
    }

    let mut samples = Vec::with_capacity(kept_indices.len());
    let mut cumulative_distance_km = 0.0;
    let mut previous = waypoints[kept_indices[0]].coordinate();

    for &idx in &kept_indices {
        let wp = &waypoints[idx];
        let here = wp.coordinate();
        cumulative_distance_km += previous.distance_km(&here);
        previous = here;

        samples.push(SamplePoint {
            longitude: wp.longitude,
            latitude: wp.latitude,
            altitude_ft: wp.altitude_ft,
            cumulative_distance_km,
            segment_index: idx,
        });
    }

    samples
}

/// Interpolates each segment of a sparse route so consecutive samples are
/// no more than `sample_distance_km` apart (§4.6, §4.6.1).
fn interpolate_route(route: &FlightRoute, config: &Config) -> Vec<SamplePoint> {
    let waypoints = &route.waypoints;
    let mut samples = Vec::new();
    let mut cumulative_distance_km = 0.0;

    for (i, pair) in waypoints.windows(2).enumerate() {
        let (from, to) = (&pair[0], &pair[1]);
        let from_coord = from.coordinate();
        let to_coord = to.coordinate();
        let segment_len_km = from_coord.distance_km(&to_coord);

        samples.push(SamplePoint {
            longitude: from.longitude,
            latitude: from.latitude,
            altitude_ft: from.altitude_ft,
            cumulative_distance_km,
            segment_index: i,
        });

        let interior_count = interior_point_count(segment_len_km, config.sample_distance_km);
        let subdivisions = interior_count + 1;

        for k in 0..interior_count {
            let t = (k + 1) as f64 / subdivisions as f64;
            let lon = from.longitude + t * (to.longitude - from.longitude);
            let lat = from.latitude + t * (to.latitude - from.latitude);
            let altitude_ft = interpolate_altitude(from.altitude_ft, to.altitude_ft, t, config);

            samples.push(SamplePoint {
                longitude: lon,
                latitude: lat,
                altitude_ft,
                cumulative_distance_km: cumulative_distance_km + t * segment_len_km,
                segment_index: i,
            });
        }

        cumulative_distance_km += segment_len_km;
    }

    let last = waypoints.last().expect("at least two waypoints");
    samples.push(SamplePoint {
        longitude: last.longitude,
        latitude: last.latitude,
        altitude_ft: last.altitude_ft,
        cumulative_distance_km,
        segment_index: waypoints.len() - 2,
    });

    samples
}

/// `⌊segment_len / segment_distance_km⌋ − 1`, clamped to zero when the
/// segment is shorter than one sampling step.
fn interior_point_count(segment_len_km: f64, sample_distance_km: f64) -> usize {
    if sample_distance_km <= 0.0 {
        return 0;
    }
    let steps = (segment_len_km / sample_distance_km).floor();
    if steps < 1.0 {
        0
    } else {
        (steps as usize) - 1
    }
}

/// Altitude at fraction `t` (0..1) along a segment from `alt1` to `alt2`
/// (§4.6.1): linear below `step_climb_large_ft`, otherwise a step that
/// completes the change within the leading `step_climb_ramp_fraction` of
/// the segment and holds `alt2` for the rest.
fn interpolate_altitude(alt1: f64, alt2: f64, t: f64, config: &Config) -> f64 {
    let delta = (alt2 - alt1).abs();
    if delta <= config.step_climb_large_ft {
        return alt1 + t * (alt2 - alt1);
    }

    let ramp = config.step_climb_ramp_fraction;
    if t < ramp {
        alt1 + (t / ramp) * (alt2 - alt1)
    } else {
        alt2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Waypoint;

    #[test]
    fn empty_and_single_waypoint_routes_yield_no_samples() {
        assert!(sample_route(&FlightRoute::new(vec![]), &Config::default()).is_empty());
        let single = FlightRoute::new(vec![Waypoint::new("A", 0.0, 0.0, 0.0)]);
        assert!(sample_route(&single, &Config::default()).is_empty());
    }

    #[test]
    fn interpolated_route_always_includes_final_waypoint() {
        let route = FlightRoute::new(vec![
            Waypoint::new("A", 0.0, 0.0, 1000.0),
            Waypoint::new("B", 1.0, 0.0, 2000.0),
        ]);
        let samples = sample_route(&route, &Config::default());
        let last = samples.last().unwrap();
        assert_eq!(last.longitude, 1.0);
        assert_eq!(last.latitude, 0.0);
        assert_eq!(last.altitude_ft, 2000.0);
    }

    #[test]
    fn cumulative_distance_is_monotonically_non_decreasing() {
        let route = FlightRoute::new(vec![
            Waypoint::new("A", 0.0, 0.0, 1000.0),
            Waypoint::new("B", 1.0, 1.0, 5000.0),
            Waypoint::new("C", 2.0, 0.0, 3000.0),
        ]);
        let samples = sample_route(&route, &Config::default());
        for pair in samples.windows(2) {
            assert!(pair[1].cumulative_distance_km >= pair[0].cumulative_distance_km);
        }
    }

    #[test]
    fn small_delta_interpolates_linearly() {
        let config = Config::default();
        assert_eq!(interpolate_altitude(1000.0, 1050.0, 0.5, &config), 1025.0);
    }

    #[test]
    fn large_delta_steps_within_ramp_fraction() {
        let config = Config::default();
        // 1000ft delta over a 0.3 ramp: at t=0.15 (half the ramp) we expect
        // to be halfway through the climb.
        let at_half_ramp = interpolate_altitude(0.0, 1000.0, 0.15, &config);
        assert!((at_half_ramp - 500.0).abs() < 1e-6);
        // Past the ramp, altitude holds at the target.
        assert_eq!(interpolate_altitude(0.0, 1000.0, 0.5, &config), 1000.0);
    }

    #[test]
    fn dense_trace_is_thinned_and_keeps_final_point() {
        let waypoints: Vec<Waypoint> = (0..1500)
            .map(|i| Waypoint::new(format!("P{i}"), i as f64 * 0.001, 0.0, 1000.0))
            .collect();
        let route = FlightRoute::new(waypoints);
        let samples = sample_route(&route, &Config::default());
        assert!(samples.len() <= 1001);
        assert_eq!(samples.last().unwrap().longitude, 1499.0 * 0.001);
    }

    #[test]
    fn short_segment_contributes_no_interior_points() {
        let route = FlightRoute::new(vec![
            Waypoint::new("A", 0.0, 0.0, 1000.0),
            Waypoint::new("B", 0.001, 0.0, 1000.0),
        ]);
        let samples = sample_route(&route, &Config::default());
        assert_eq!(samples.len(), 2);
    }
}
