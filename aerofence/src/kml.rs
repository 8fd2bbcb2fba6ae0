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

//! Reads a flight path out of a KML document (§6).
//!
//! Flight-path KML is small, tens of waypoints at most, so this parses the
//! whole document into memory with the `kml` crate rather than reaching for
//! a second streaming reader alongside the AIXM importer's.
//!
//! The path's coordinates come from the first `<LineString>` found anywhere
//! in the document (typically inside a placemark named `Navigation`); the
//! waypoint names come from every *other* placemark's `<name>`, in document
//! order, zipped positionally against those coordinates.

use std::str::FromStr;

use kml::types::{Geometry, Placemark};
use kml::Kml;

use crate::domain::{FlightRoute, Waypoint};
use crate::error::Error;
use crate::units::FEET_IN_METER;

/// Parses `xml` into a [`FlightRoute`].
///
/// Fails with [`Error::MalformedSource`] if the document does not parse as
/// KML at all, or does not contain a `LineString` anywhere.
pub fn parse_route(xml: &str) -> Result<FlightRoute, Error> {
    let root = Kml::<f64>::from_str(xml)?;

    let mut placemarks = Vec::new();
    collect_placemarks(&root, &mut placemarks);

    let line_string = placemarks
        .iter()
        .find_map(|p| match &p.geometry {
            Some(Geometry::LineString(ls)) => Some(ls),
            _ => None,
        })
        .ok_or_else(|| Error::MalformedSource {
            message: "no LineString found in KML document".into(),
        })?;

    let names: Vec<&str> = placemarks
        .iter()
        .filter_map(|p| p.name.as_deref())
        .filter(|name| *name != "Navigation")
        .collect();

    let waypoints = line_string
        .coords
        .iter()
        .enumerate()
        .map(|(i, coord)| {
            let name = names.get(i).map(|s| s.to_string()).unwrap_or_else(|| format!("WP{}", i + 1));
            let altitude_ft = coord.z.unwrap_or(0.0) * FEET_IN_METER;
            Waypoint::new(name, coord.x, coord.y, altitude_ft)
        })
        .collect();

    Ok(FlightRoute::new(waypoints))
}

/// Depth-first collection of every `<Placemark>` in the document, in
/// document order.
fn collect_placemarks<'a>(node: &'a Kml<f64>, out: &mut Vec<&'a Placemark<f64>>) {
    match node {
        Kml::KmlDocument(doc) => {
            for element in &doc.elements {
                collect_placemarks(element, out);
            }
        }
        Kml::Document { elements, .. } | Kml::Folder { elements, .. } => {
            for element in elements {
                collect_placemarks(element, out);
            }
        }
        Kml::Placemark(placemark) => out.push(placemark),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
    <kml xmlns="http://www.opengis.net/kml/2.2">
      <Document>
        <Placemark>
          <name>Navigation</name>
          <LineString>
            <coordinates>
              -1.95833,48.20960,0 -1.50000,48.50000,1000 -1.10000,48.90000,0
            </coordinates>
          </LineString>
        </Placemark>
        <Placemark><name>DEP</name></Placemark>
        <Placemark><name>WP1</name></Placemark>
        <Placemark><name>DEST</name></Placemark>
      </Document>
    </kml>"#;

    #[test]
    fn parses_path_and_names_from_separate_placemarks() {
        let route = parse_route(SAMPLE).unwrap();
        assert_eq!(route.waypoints.len(), 3);
        assert_eq!(route.waypoints[0].name, "DEP");
        assert_eq!(route.waypoints[1].name, "WP1");
        assert_eq!(route.waypoints[2].name, "DEST");
    }

    #[test]
    fn meters_are_converted_to_feet() {
        let route = parse_route(SAMPLE).unwrap();
        assert!((route.waypoints[1].altitude_ft - 1000.0 * FEET_IN_METER).abs() < 1e-6);
    }

    #[test]
    fn navigation_placemark_never_supplies_a_waypoint_name() {
        let route = parse_route(SAMPLE).unwrap();
        assert!(route.waypoints.iter().all(|w| w.name != "Navigation"));
    }

    #[test]
    fn missing_linestring_is_reported_as_malformed() {
        let xml = r#"<?xml version="1.0"?><kml xmlns="http://www.opengis.net/kml/2.2"><Document/></kml>"#;
        let result = parse_route(xml);
        assert!(matches!(result, Err(Error::MalformedSource { .. })));
    }

    #[test]
    fn missing_names_fall_back_to_generated_ones() {
        let xml = r#"<?xml version="1.0"?>
        <kml xmlns="http://www.opengis.net/kml/2.2">
          <Document>
            <Placemark>
              <name>Navigation</name>
              <LineString><coordinates>0,0,0 1,1,0</coordinates></LineString>
            </Placemark>
          </Document>
        </kml>"#;
        let route = parse_route(xml).unwrap();
        assert_eq!(route.waypoints[0].name, "WP1");
        assert_eq!(route.waypoints[1].name, "WP2");
    }
}
