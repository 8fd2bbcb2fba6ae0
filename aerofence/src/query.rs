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

//! The three-stage point-in-airspace resolver: bounding box, then precise
//! polygon containment, then vertical band.
//!
//! A [`QueryEngine`] owns the store it was built from plus two immutable,
//! derived caches: the materialized `geo::Polygon` geometry per airspace
//! (§4.3) and the [`SpatialIndex`] over their bounding boxes (§4.4). Both
//! caches are built once, at [`QueryEngine::build`], and never mutated —
//! re-importing means building a new engine.

use std::collections::{HashMap, HashSet};

use geo::{Contains, Point, Polygon};

use crate::domain::{Airspace, AirspaceId};
use crate::error::Error;
use crate::geometry;
use crate::index::SpatialIndex;
use crate::store::AirspaceStore;

/// A built, queryable view over an [`AirspaceStore`]: geometry cache plus
/// spatial index, ready for repeated `query` calls.
pub struct QueryEngine<S> {
    store: S,
    geometries: HashMap<AirspaceId, Vec<Polygon<f64>>>,
    index: SpatialIndex,
}

impl<S: AirspaceStore> QueryEngine<S> {
    /// Materializes geometry for every indexed airspace and bulk-loads the
    /// spatial index over it. Airspaces whose borders yield no valid
    /// polygon are logged and excluded (`NoGeometry`), not propagated as a
    /// fatal error — a handful of bad borders must not prevent the rest of
    /// a national dataset from being queryable.
    pub fn build(store: S) -> Result<Self, Error> {
        let ids = store.list_airspace_ids_with_geometry()?;
        let mut geometries = HashMap::with_capacity(ids.len());

        for id in ids {
            let borders: Vec<_> = store.get_borders(id)?.into_iter().map(|(_, border)| border).collect();
            match geometry::build_polygons(id, &borders) {
                Ok(polygons) => {
                    geometries.insert(id, polygons);
                }
                Err(err) => log::warn!("{err}"),
            }
        }

        let index_entries = geometries
            .iter()
            .flat_map(|(id, polygons)| polygons.iter().map(move |polygon| (*id, polygon)));
        let index = SpatialIndex::build(index_entries);

        log::info!("query engine built over {} airspaces with geometry", geometries.len());

        Ok(Self { store, geometries, index })
    }

    /// Returns every airspace whose lateral geometry contains `(lon, lat)`
    /// and whose vertical band contains `altitude_ft`.
    ///
    /// Result order is not stable across calls (§4.5); callers needing a
    /// stable order must sort explicitly.
    pub fn query(&self, lon: f64, lat: f64, altitude_ft: f64) -> Result<Vec<Airspace>, Error> {
        let point = Point::new(lon, lat);

        // Stage 1: bounding-box candidates from the spatial index.
        let candidates: HashSet<AirspaceId> = self.index.query_point(lon, lat).collect();
        log::trace!("query({lon}, {lat}, {altitude_ft}): {} bbox candidates", candidates.len());

        let mut results = Vec::new();
        for id in candidates {
            // Stage 2: precise containment against the union of borders.
            let Some(polygons) = self.geometries.get(&id) else {
                continue;
            };
            if !polygons.iter().any(|polygon| polygon.contains(&point)) {
                continue;
            }

            // Stage 3: vertical band, converted to feet AMSL.
            let Some(airspace) = self.store.get_airspace(id)? else {
                continue;
            };
            let within_band = airspace
                .vertical_limits
                .map(|limits| limits.contains_altitude(altitude_ft))
                .unwrap_or(true);
            if within_band {
                results.push(airspace);
            }
        }

        Ok(results)
    }

    /// Borrows the underlying store, e.g. for `search_by_name`/`search_by_type`.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Border, Vertex};
    use crate::geom::Coordinate;
    use crate::store::memory::MemoryStore;
    use crate::units::{VerticalLimit, VerticalLimits, VerticalReference};

    fn build_single_circle_engine() -> QueryEngine<MemoryStore> {
        let mut store = MemoryStore::new();
        let id = store.insert_airspace(Airspace {
            id: 0,
            code_id: "TEST".into(),
            mid: None,
            name: Some("Test Circle".into()),
            code_type: "D".into(),
            class: None,
            vertical_limits: Some(VerticalLimits::new(
                Some(VerticalLimit::new(0.0, VerticalReference::Ft)),
                Some(VerticalLimit::new(5000.0, VerticalReference::Ft)),
            )),
        });
        store.insert_border(
            id,
            Border::Circle {
                center: Coordinate::new(0.5, 0.5),
                radius_km: 50.0,
            },
        );
        QueryEngine::build(store).unwrap()
    }

    #[test]
    fn three_stage_filter_scenario() {
        // Mirrors §8 scenario 3: bbox [0,0]-[1,1], circle centered
        // (0.5,0.5) radius 50km, vertical 0-5000ft.
        let engine = build_single_circle_engine();

        assert_eq!(engine.query(0.5, 0.5, 3000.0).unwrap().len(), 1);
        assert_eq!(engine.query(0.5, 0.5, 6000.0).unwrap().len(), 0);
        // Inside the bbox but outside the (much smaller) circle.
        assert_eq!(engine.query(0.99, 0.99, 3000.0).unwrap().len(), 0);
    }

    #[test]
    fn fl_boundary_is_inclusive() {
        let mut store = MemoryStore::new();
        let id = store.insert_airspace(Airspace {
            id: 0,
            code_id: "FL65".into(),
            mid: None,
            name: None,
            code_type: "CTR".into(),
            class: None,
            vertical_limits: Some(VerticalLimits::new(
                Some(VerticalLimit::new(0.0, VerticalReference::Ft)),
                Some(VerticalLimit::new(65.0, VerticalReference::Fl)),
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
        let engine = QueryEngine::build(store).unwrap();

        assert_eq!(engine.query(0.5, 0.5, 6500.0).unwrap().len(), 1);
        assert_eq!(engine.query(0.5, 0.5, 6501.0).unwrap().len(), 0);
    }

    #[test]
    fn empty_store_yields_empty_results() {
        let engine = QueryEngine::build(MemoryStore::new()).unwrap();
        assert!(engine.query(0.0, 0.0, 0.0).unwrap().is_empty());
    }
}
