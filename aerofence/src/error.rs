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

//! Errors raised while importing, querying or analyzing airspace data.

use std::fmt::{Display, Formatter};

use crate::domain::AirspaceId;

#[derive(Debug)]
pub enum Error {
    /// The AIXM or KML source could not be parsed at all.
    MalformedSource { message: String },
    /// A single element was skipped during import (e.g. a vertex with an
    /// unparseable DMS coordinate); import continues past it.
    ElementSkipped { reason: String },
    /// An `<Abd>` border referenced an `<Ase>` `codeId` that was never seen.
    UnknownReference { code_id: String },
    /// An airspace had no border that reduced to a valid (≥3 vertex) polygon.
    NoGeometry { airspace_id: AirspaceId },
    /// A profile-correction branch cannot reach its target altitude within
    /// the branch distance available.
    AltitudeUnreachable { achievable_ft: f64 },
    /// The persistence backend is unavailable (e.g. a SQLite I/O failure).
    StoreUnavailable { message: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedSource { message } => write!(f, "malformed source: {message}"),
            Error::ElementSkipped { reason } => write!(f, "element skipped: {reason}"),
            Error::UnknownReference { code_id } => write!(f, "unknown reference: {code_id}"),
            Error::NoGeometry { airspace_id } => write!(f, "airspace {airspace_id} has no usable geometry"),
            Error::AltitudeUnreachable { achievable_ft } => {
                write!(f, "altitude unreachable within branch; achievable {achievable_ft:.0} ft")
            }
            Error::StoreUnavailable { message } => write!(f, "store unavailable: {message}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<aixm::Error> for Error {
    fn from(err: aixm::Error) -> Self {
        Error::MalformedSource {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "kml")]
impl From<kml::Error> for Error {
    fn from(err: kml::Error) -> Self {
        Error::MalformedSource {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::StoreUnavailable {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite_migration::Error> for Error {
    fn from(err: rusqlite_migration::Error) -> Self {
        Error::StoreUnavailable {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_geometry_displays_airspace_id() {
        let err = Error::NoGeometry { airspace_id: 42 };
        assert_eq!(err.to_string(), "airspace 42 has no usable geometry");
    }
}
