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

//! GeoJSON renderings of a route and of a crossing list (§6), mirroring the
//! route export this workspace already shipped under this feature.

use geo::BoundingRect;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};

use crate::domain::{Crossing, CrossingRecord, FlightRoute, SamplePoint};

fn rect_to_bbox(rect: geo::Rect<f64>) -> geojson::Bbox {
    vec![rect.min().x, rect.min().y, rect.max().x, rect.max().y]
}

/// Renders `route`'s waypoints as a single `LineString` feature.
pub fn route_to_geojson(route: &FlightRoute) -> GeoJson {
    let coords: Vec<geo::Coord<f64>> = route.waypoints.iter().map(|w| w.coordinate().into()).collect();
    let line = geo::LineString::from(coords);

    GeoJson::Feature(Feature {
        bbox: line.bounding_rect().map(rect_to_bbox),
        geometry: Some(Geometry::new(Value::from(&line))),
        id: None,
        properties: None,
        foreign_members: None,
    })
}

/// Renders a crossing list as a feature collection: one feature per
/// crossing, positioned at the nominal-path sample where it was first
/// detected for actual crossings, geometry-less for corridor-only ones.
///
/// `crossings` and `records` must correspond index-for-index, as produced by
/// [`crate::analyzer::analyze`] and [`crate::analyzer::describe`].
pub fn crossings_to_geojson(samples: &[SamplePoint], crossings: &[Crossing], records: &[CrossingRecord]) -> GeoJson {
    let features = crossings
        .iter()
        .zip(records.iter())
        .map(|(crossing, record)| {
            let point = samples.get(crossing.first_sample_index);
            let geometry = point.map(|p| Geometry::new(Value::Point(vec![p.longitude, p.latitude])));

            let mut properties = JsonObject::new();
            properties.insert("airspace_id".into(), JsonValue::from(record.airspace_id));
            properties.insert("code_id".into(), JsonValue::from(record.code_id.clone()));
            properties.insert("name".into(), record.name.clone().map(JsonValue::from).unwrap_or(JsonValue::Null));
            properties.insert("code_type".into(), JsonValue::from(record.code_type.clone()));
            properties.insert("class".into(), record.class.map(|c| JsonValue::from(c.to_string())).unwrap_or(JsonValue::Null));
            properties.insert("lower_ft".into(), JsonValue::from(record.lower_ft));
            properties.insert("upper_ft".into(), JsonValue::from(record.upper_ft));
            properties.insert("cumulative_distance_km".into(), JsonValue::from(record.cumulative_distance_km));
            properties.insert("is_actual".into(), JsonValue::from(record.is_actual));
            properties.insert("is_critical".into(), JsonValue::from(record.is_critical));

            Feature {
                bbox: None,
                geometry,
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}
