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

//! Airspace crossing analysis for a flight route: import an AIXM 4.5 feed,
//! resolve a point-in-airspace query at a given altitude, and walk a route
//! through it to produce an ordered list of airspace crossings with a
//! flyable vertical profile.
//!
//! ```no_run
//! use aerofence::{analyzer, config::Config, importer, query::QueryEngine};
//!
//! # fn run() -> Result<(), aerofence::error::Error> {
//! let xml = std::fs::read("airspace.xml")?;
//! let config = Config::default();
//! let (store, report) = importer::import(&xml, &config)?;
//! log::info!("{} issues during import", report.issues.len());
//!
//! let engine = QueryEngine::build(store)?;
//! let hits = engine.query(7.0, 48.0, 3500.0)?;
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;
pub mod corridor;
pub mod corrector;
pub mod domain;
pub mod error;
pub mod geom;
pub mod geometry;
pub mod importer;
pub mod index;
#[cfg(feature = "kml")]
pub mod kml;
pub mod query;
pub mod sampler;
pub mod store;
pub mod units;

#[cfg(feature = "geojson")]
pub mod geojson;

pub use config::Config;
pub use domain::{Airspace, AirspaceClass, AirspaceId, Border, Crossing, CrossingRecord, FlightRoute, SamplePoint, Vertex, Waypoint};
pub use error::Error;
pub use importer::ImportReport;
pub use query::QueryEngine;
