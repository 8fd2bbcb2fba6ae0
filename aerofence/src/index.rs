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

//! Bulk-loaded R-tree over airspace bounding boxes.
//!
//! A cheap first-stage filter ahead of the precise polygon containment test
//! in [`crate::query`].

use geo::{BoundingRect, Polygon};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};

use crate::domain::AirspaceId;

type Entry = GeomWithData<Rectangle<[f64; 2]>, AirspaceId>;

/// An R-tree over the bounding boxes of every indexed airspace's geometry.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<Entry>,
}

impl SpatialIndex {
    /// Builds an index from every `(airspace_id, polygon)` pair. An airspace
    /// owning multiple polygons contributes one entry per polygon, all
    /// pointing back to the same id.
    pub fn build<'a>(entries: impl Iterator<Item = (AirspaceId, &'a Polygon<f64>)>) -> Self {
        let nodes: Vec<Entry> = entries
            .filter_map(|(id, polygon)| {
                let rect = polygon.bounding_rect()?;
                Some(GeomWithData::new(
                    Rectangle::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]),
                    id,
                ))
            })
            .collect();

        Self {
            tree: RTree::bulk_load(nodes),
        }
    }

    /// Airspace ids whose bounding box contains `(lon, lat)`.
    pub fn query_point(&self, lon: f64, lat: f64) -> impl Iterator<Item = AirspaceId> + '_ {
        let envelope = AABB::from_point([lon, lat]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.data)
    }

    /// Airspace ids whose bounding box intersects `[min, max]`.
    pub fn query_bbox(&self, min: (f64, f64), max: (f64, f64)) -> impl Iterator<Item = AirspaceId> + '_ {
        let envelope = AABB::from_corners([min.0, min.1], [max.0, max.1]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, LineString};

    fn square(min: (f64, f64), max: (f64, f64)) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                Coord { x: min.0, y: min.1 },
                Coord { x: max.0, y: min.1 },
                Coord { x: max.0, y: max.1 },
                Coord { x: min.0, y: max.1 },
                Coord { x: min.0, y: min.1 },
            ]),
            vec![],
        )
    }

    #[test]
    fn point_query_finds_containing_bbox() {
        let a = square((9.0, 53.0), (10.0, 54.0));
        let index = SpatialIndex::build(std::iter::once((1, &a)));
        let found: Vec<_> = index.query_point(9.5, 53.5).collect();
        assert_eq!(found, vec![1]);
    }

    #[test]
    fn point_query_misses_outside_bbox() {
        let a = square((9.0, 53.0), (10.0, 54.0));
        let index = SpatialIndex::build(std::iter::once((1, &a)));
        assert!(index.query_point(0.0, 0.0).next().is_none());
    }

    #[test]
    fn bbox_query_finds_intersecting_entries() {
        let a = square((0.0, 0.0), (1.0, 1.0));
        let b = square((5.0, 5.0), (6.0, 6.0));
        let index = SpatialIndex::build(vec![(1, &a), (2, &b)].into_iter());
        let found: Vec<_> = index.query_bbox((0.5, 0.5), (5.5, 5.5)).collect();
        assert_eq!(found.len(), 2);
    }
}
