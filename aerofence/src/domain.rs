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

//! Core domain types: airspaces, their boundaries, flight routes and the
//! samples and crossings derived from them.

use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geom::Coordinate;
use crate::units::VerticalLimits;

/// Stable internal identifier for an airspace row in an [`crate::store::AirspaceStore`].
pub type AirspaceId = i64;

/// An airspace's ICAO class, or `Unknown` when the source feed left it
/// blank or supplied an unrecognized code.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AirspaceClass {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    Unknown,
}

impl AirspaceClass {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "A" => AirspaceClass::A,
            "B" => AirspaceClass::B,
            "C" => AirspaceClass::C,
            "D" => AirspaceClass::D,
            "E" => AirspaceClass::E,
            "F" => AirspaceClass::F,
            "G" => AirspaceClass::G,
            _ => AirspaceClass::Unknown,
        }
    }
}

impl Display for AirspaceClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            AirspaceClass::A => "A",
            AirspaceClass::B => "B",
            AirspaceClass::C => "C",
            AirspaceClass::D => "D",
            AirspaceClass::E => "E",
            AirspaceClass::F => "F",
            AirspaceClass::G => "G",
            AirspaceClass::Unknown => "?",
        };
        write!(f, "{c}")
    }
}

/// A controlled volume of air, as imported from one `<Ase>` element.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Airspace {
    pub id: AirspaceId,
    /// External code, e.g. `EDDF_CTR`. Not globally unique in raw feeds.
    pub code_id: String,
    /// Raw AIXM `mid` (message identifier), when present.
    pub mid: Option<String>,
    pub name: Option<String>,
    /// e.g. `TMA`, `CTR`, `R`, `P`, `D`, `RAS`, `SECTOR`, `FIR`.
    pub code_type: String,
    pub class: Option<AirspaceClass>,
    pub vertical_limits: Option<VerticalLimits>,
}

impl Airspace {
    /// Marked critical if restricted/prohibited by type, or Class A.
    pub fn is_critical(&self) -> bool {
        matches!(self.code_type.as_str(), "R" | "P") || matches!(self.class, Some(AirspaceClass::A))
    }
}

/// A single vertex on a polygon border, ordered by `sequence_number`.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub latitude: f64,
    pub longitude: f64,
    pub sequence_number: u32,
}

impl Vertex {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// One closed lateral boundary contributing to an airspace's extent.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Border {
    /// An ordered ring of vertices, as parsed from `<Abd>`/`<Avx>`.
    Polygon(Vec<Vertex>),
    /// Center and radius; never produced by the AIXM importer, which only
    /// ever emits Polygon borders, but available for direct construction.
    Circle { center: Coordinate, radius_km: f64 },
}

/// A named point on a route, with an altitude in feet AMSL.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub altitude_ft: f64,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, longitude: f64, latitude: f64, altitude_ft: f64) -> Self {
        Self {
            name: name.into(),
            longitude,
            latitude,
            altitude_ft,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// An ordered sequence of waypoints: either a sparse route needing
/// interpolation, or a dense source trace needing thinning.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightRoute {
    pub waypoints: Vec<Waypoint>,
}

impl FlightRoute {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    /// A trace is considered dense when it has more than 50 source points.
    pub fn is_dense_trace(&self) -> bool {
        self.waypoints.len() > 50
    }
}

/// One point along a densified/interpolated path.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SamplePoint {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude_ft: f64,
    pub cumulative_distance_km: f64,
    pub segment_index: usize,
}

impl SamplePoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// One discovered airspace crossing along a route.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Crossing {
    pub airspace_id: AirspaceId,
    /// Index of the nominal-path sample where this crossing was first
    /// detected; `usize::MAX` for corridor-only discoveries, so that they
    /// sort after every actual crossing.
    pub first_sample_index: usize,
    pub cumulative_distance_km: f64,
    /// `true` for a penetration of the nominal flight path; `false` for a
    /// corridor-proximity-only discovery.
    pub is_actual: bool,
}

impl Crossing {
    /// Sentinel used for `first_sample_index` on corridor-only crossings.
    pub const CORRIDOR_ONLY_INDEX: usize = usize::MAX;
}

/// A fully described crossing, as handed to a caller (§6 "Output — result
/// records"): the transient [`Crossing`] joined back against its
/// [`Airspace`] for display.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CrossingRecord {
    pub airspace_id: AirspaceId,
    pub code_id: String,
    pub name: Option<String>,
    pub code_type: String,
    pub class: Option<AirspaceClass>,
    pub lower_ft: f64,
    pub upper_ft: f64,
    pub cumulative_distance_km: f64,
    pub is_actual: bool,
    /// `true` when the airspace is restricted/prohibited or Class A — an
    /// actual crossing into one of these is a warning (§4.8).
    pub is_critical: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_by_restricted_type() {
        let a = Airspace {
            id: 1,
            code_id: "LF-R123".into(),
            mid: None,
            name: None,
            code_type: "R".into(),
            class: None,
            vertical_limits: None,
        };
        assert!(a.is_critical());
    }

    #[test]
    fn critical_by_class_a() {
        let a = Airspace {
            id: 2,
            code_id: "EDDF_TMA".into(),
            mid: None,
            name: None,
            code_type: "TMA".into(),
            class: Some(AirspaceClass::A),
            vertical_limits: None,
        };
        assert!(a.is_critical());
    }

    #[test]
    fn not_critical_otherwise() {
        let a = Airspace {
            id: 3,
            code_id: "EDDF_CTR".into(),
            mid: None,
            name: None,
            code_type: "CTR".into(),
            class: Some(AirspaceClass::D),
            vertical_limits: None,
        };
        assert!(!a.is_critical());
    }

    #[test]
    fn dense_trace_threshold() {
        let sparse = FlightRoute::new(vec![Waypoint::new("A", 0.0, 0.0, 0.0); 10]);
        assert!(!sparse.is_dense_trace());
        let dense = FlightRoute::new(vec![Waypoint::new("A", 0.0, 0.0, 0.0); 51]);
        assert!(dense.is_dense_trace());
    }
}
