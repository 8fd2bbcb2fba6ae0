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

//! Combines the sampler, the corridor generator and a [`QueryEngine`] into
//! the ordered crossing list a caller actually wants (§4.8).
//!
//! Four phases:
//!
//! 1. **Discovery** — every corridor offset point is queried at each of
//!    [`Config::corridor_test_altitudes`]; any airspace this turns up is a
//!    candidate, whether or not the nominal path ever actually enters it.
//! 2. **Actual-crossing detection** — the nominal samples are walked in
//!    order; the first sample that lands inside an airspace not yet seen
//!    records an actual [`Crossing`].
//! 3. **Corridor-only backfill** — any airspace discovered in phase 1 but
//!    never confirmed in phase 2 is still reported, flagged `is_actual =
//!    false` and carrying [`Crossing::CORRIDOR_ONLY_INDEX`].
//! 4. **Ordering** — the combined list is sorted by `first_sample_index`
//!    ascending; corridor-only entries, sharing the sentinel index, keep
//!    their phase-3 (i.e. discovery) order, which a stable sort preserves.

use std::collections::HashSet;

use crate::config::Config;
use crate::corridor::generate_corridor;
use crate::domain::{AirspaceId, Crossing, CrossingRecord, FlightRoute};
use crate::error::Error;
use crate::query::QueryEngine;
use crate::sampler::sample_route;
use crate::store::AirspaceStore;

/// Runs the full discovery/crossing/backfill/ordering pipeline for `route`
/// against `engine`.
pub fn analyze<S: AirspaceStore>(engine: &QueryEngine<S>, route: &FlightRoute, config: &Config) -> Result<Vec<Crossing>, Error> {
    let samples = sample_route(route, config);
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let corridor = generate_corridor(&samples, config.corridor_width_nm);

    // Phase 1: discovery over the corridor at every test altitude.
    let mut discovered: HashSet<AirspaceId> = HashSet::new();
    for point in &corridor {
        for altitude_ft in config.corridor_test_altitudes(point.base_altitude_ft) {
            for airspace in engine.query(point.longitude, point.latitude, altitude_ft)? {
                discovered.insert(airspace.id);
            }
        }
    }
    log::debug!("corridor discovery found {} candidate airspaces", discovered.len());

    // Phase 2: walk the nominal path in order, recording the first actual
    // entry into each airspace.
    let mut seen: HashSet<AirspaceId> = HashSet::new();
    let mut crossings: Vec<Crossing> = Vec::new();
    for (i, sample) in samples.iter().enumerate() {
        for airspace in engine.query(sample.longitude, sample.latitude, sample.altitude_ft)? {
            if seen.insert(airspace.id) {
                crossings.push(Crossing {
                    airspace_id: airspace.id,
                    first_sample_index: i,
                    cumulative_distance_km: sample.cumulative_distance_km,
                    is_actual: true,
                });
            }
        }
    }
    log::debug!("nominal path actually enters {} airspaces", crossings.len());

    // Phase 3: backfill anything the corridor saw but the nominal path
    // never actually penetrated.
    for airspace_id in discovered {
        if seen.insert(airspace_id) {
            crossings.push(Crossing {
                airspace_id,
                first_sample_index: Crossing::CORRIDOR_ONLY_INDEX,
                cumulative_distance_km: 0.0,
                is_actual: false,
            });
        }
    }

    // Phase 4: chronological order; corridor-only entries, sharing the
    // sentinel index, fall after every actual crossing and keep their
    // discovery order under a stable sort.
    crossings.sort_by_key(|c| c.first_sample_index);

    Ok(crossings)
}

/// Joins a [`Crossing`] list back against the store to produce display-ready
/// [`CrossingRecord`]s, dropping any crossing whose airspace has since
/// vanished from the store.
pub fn describe<S: AirspaceStore>(engine: &QueryEngine<S>, crossings: &[Crossing]) -> Result<Vec<CrossingRecord>, Error> {
    let mut records = Vec::with_capacity(crossings.len());
    for crossing in crossings {
        let Some(airspace) = engine.store().get_airspace(crossing.airspace_id)? else {
            continue;
        };
        records.push(CrossingRecord {
            airspace_id: airspace.id,
            code_id: airspace.code_id,
            name: airspace.name,
            code_type: airspace.code_type,
            class: airspace.class,
            lower_ft: airspace.vertical_limits.map(|l| l.lower_feet()).unwrap_or(0.0),
            upper_ft: airspace
                .vertical_limits
                .map(|l| l.upper_feet())
                .unwrap_or(f64::INFINITY),
            cumulative_distance_km: crossing.cumulative_distance_km,
            is_actual: crossing.is_actual,
            is_critical: crossing.is_actual && airspace.is_critical(),
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Airspace, Border, Vertex, Waypoint};
    use crate::store::memory::MemoryStore;
    use crate::units::{VerticalLimit, VerticalLimits, VerticalReference};

    fn square_airspace(store: &mut MemoryStore, code_id: &str, code_type: &str, lower_ft: f64, upper_ft: f64) -> AirspaceId {
        let id = store.insert_airspace(Airspace {
            id: 0,
            code_id: code_id.into(),
            mid: None,
            name: Some(code_id.into()),
            code_type: code_type.into(),
            class: None,
            vertical_limits: Some(VerticalLimits::new(
                Some(VerticalLimit::new(lower_ft, VerticalReference::Ft)),
                Some(VerticalLimit::new(upper_ft, VerticalReference::Ft)),
            )),
        });
        store.insert_border(
            id,
            Border::Polygon(vec![
                Vertex { latitude: 0.0, longitude: 0.0, sequence_number: 0 },
                Vertex { latitude: 0.0, longitude: 1.0, sequence_number: 1 },
                Vertex { latitude: 1.0, longitude: 1.0, sequence_number: 2 },
                Vertex { latitude: 1.0, longitude: 0.0, sequence_number: 3 },
            ]),
        );
        id
    }

    #[test]
    fn straight_through_flight_records_an_actual_crossing() {
        let mut store = MemoryStore::new();
        square_airspace(&mut store, "EDDF_CTR", "CTR", 0.0, 5000.0);
        let engine = QueryEngine::build(store).unwrap();

        let route = FlightRoute::new(vec![
            Waypoint::new("A", -1.0, 0.5, 3000.0),
            Waypoint::new("B", 2.0, 0.5, 3000.0),
        ]);
        let crossings = analyze(&engine, &route, &Config::default()).unwrap();

        assert_eq!(crossings.len(), 1);
        assert!(crossings[0].is_actual);
        assert_ne!(crossings[0].first_sample_index, Crossing::CORRIDOR_ONLY_INDEX);
    }

    #[test]
    fn nearby_airspace_missed_by_the_nominal_path_is_backfilled() {
        let mut store = MemoryStore::new();
        // A sliver just off the route's northern edge: a wide corridor picks
        // it up, but the nominal path (running along latitude 0) never
        // enters it.
        let id = store.insert_airspace(Airspace {
            id: 0,
            code_id: "SLIVER".into(),
            mid: None,
            name: None,
            code_type: "D".into(),
            class: None,
            vertical_limits: None,
        });
        store.insert_border(
            id,
            Border::Polygon(vec![
                Vertex { latitude: 0.05, longitude: 0.0, sequence_number: 0 },
                Vertex { latitude: 0.05, longitude: 1.0, sequence_number: 1 },
                Vertex { latitude: 0.2, longitude: 1.0, sequence_number: 2 },
                Vertex { latitude: 0.2, longitude: 0.0, sequence_number: 3 },
            ]),
        );
        let engine = QueryEngine::build(store).unwrap();

        let route = FlightRoute::new(vec![
            Waypoint::new("A", -1.0, 0.0, 3000.0),
            Waypoint::new("B", 2.0, 0.0, 3000.0),
        ]);
        let mut config = Config::default();
        config.with_corridor_width_nm(20.0);
        let crossings = analyze(&engine, &route, &config).unwrap();

        assert_eq!(crossings.len(), 1);
        assert!(!crossings[0].is_actual);
        assert_eq!(crossings[0].first_sample_index, Crossing::CORRIDOR_ONLY_INDEX);
    }

    #[test]
    fn crossings_are_ordered_by_first_sample_index() {
        let mut store = MemoryStore::new();
        let first = store.insert_airspace(Airspace {
            id: 0,
            code_id: "FIRST".into(),
            mid: None,
            name: None,
            code_type: "D".into(),
            class: None,
            vertical_limits: None,
        });
        store.insert_border(
            first,
            Border::Polygon(vec![
                Vertex { latitude: -0.5, longitude: 0.0, sequence_number: 0 },
                Vertex { latitude: -0.5, longitude: 1.0, sequence_number: 1 },
                Vertex { latitude: 0.5, longitude: 1.0, sequence_number: 2 },
                Vertex { latitude: 0.5, longitude: 0.0, sequence_number: 3 },
            ]),
        );
        let second = store.insert_airspace(Airspace {
            id: 0,
            code_id: "SECOND".into(),
            mid: None,
            name: None,
            code_type: "D".into(),
            class: None,
            vertical_limits: None,
        });
        store.insert_border(
            second,
            Border::Polygon(vec![
                Vertex { latitude: -0.5, longitude: 3.0, sequence_number: 0 },
                Vertex { latitude: -0.5, longitude: 4.0, sequence_number: 1 },
                Vertex { latitude: 0.5, longitude: 4.0, sequence_number: 2 },
                Vertex { latitude: 0.5, longitude: 3.0, sequence_number: 3 },
            ]),
        );
        let engine = QueryEngine::build(store).unwrap();

        let route = FlightRoute::new(vec![
            Waypoint::new("A", -1.0, 0.0, 3000.0),
            Waypoint::new("B", 5.0, 0.0, 3000.0),
        ]);
        let crossings = analyze(&engine, &route, &Config::default()).unwrap();

        assert_eq!(crossings.len(), 2);
        assert!(crossings[0].first_sample_index <= crossings[1].first_sample_index);
        assert_eq!(crossings[0].airspace_id, first);
        assert_eq!(crossings[1].airspace_id, second);
    }

    #[test]
    fn describe_flags_restricted_airspace_as_critical_only_when_actually_entered() {
        let mut store = MemoryStore::new();
        square_airspace(&mut store, "R123", "R", 0.0, 10000.0);
        let engine = QueryEngine::build(store).unwrap();

        let route = FlightRoute::new(vec![
            Waypoint::new("A", -1.0, 0.5, 3000.0),
            Waypoint::new("B", 2.0, 0.5, 3000.0),
        ]);
        let crossings = analyze(&engine, &route, &Config::default()).unwrap();
        let records = describe(&engine, &crossings).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].is_critical);
    }

    #[test]
    fn empty_route_yields_no_crossings() {
        let engine = QueryEngine::build(MemoryStore::new()).unwrap();
        let crossings = analyze(&engine, &FlightRoute::default(), &Config::default()).unwrap();
        assert!(crossings.is_empty());
    }
}
