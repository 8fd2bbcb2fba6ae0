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

//! Keyed, queryable persistence for imported airspaces.
//!
//! [`AirspaceStore`] is implemented twice: [`memory::MemoryStore`], the
//! always-available in-process store used by default and by every test in
//! this crate, and [`sqlite::SqliteStore`] (feature `sqlite`), which
//! survives across process restarts.

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

use crate::domain::{Airspace, AirspaceId, Border, Vertex};
use crate::error::Error;

/// Identifier of a border row within a store.
pub type BorderId = i64;

/// Contract every airspace persistence backend must satisfy.
pub trait AirspaceStore {
    /// Ids of every airspace that has at least one valid border.
    fn list_airspace_ids_with_geometry(&self) -> Result<Vec<AirspaceId>, Error>;

    /// Fetches one airspace, including its vertical limits.
    fn get_airspace(&self, id: AirspaceId) -> Result<Option<Airspace>, Error>;

    /// Fetches every border owned by an airspace.
    fn get_borders(&self, airspace_id: AirspaceId) -> Result<Vec<(BorderId, Border)>, Error>;

    /// Fetches the vertices of a polygon border, ordered by sequence number.
    fn get_vertices(&self, border_id: BorderId) -> Result<Vec<Vertex>, Error>;

    /// Case-insensitive substring search over airspace names.
    ///
    /// When two results share the same name, type and vertical limits, the
    /// one with a known class is preferred and the other dropped.
    fn search_by_name(&self, pattern: &str) -> Result<Vec<Airspace>, Error>;

    /// All airspaces of a given `code_type` (e.g. `"CTR"`, `"TMA"`).
    fn search_by_type(&self, code_type: &str) -> Result<Vec<Airspace>, Error>;
}

/// Deduplicates airspaces that share name, type and vertical limits,
/// preferring the entry with a known class. Shared by every store
/// implementation's `search_by_name`.
pub(crate) fn dedupe_by_name_type_limits(mut airspaces: Vec<Airspace>) -> Vec<Airspace> {
    airspaces.sort_by(|a, b| a.class.is_some().cmp(&b.class.is_some()).reverse());

    let mut seen = std::collections::HashSet::new();
    airspaces.retain(|a| {
        let key = (
            a.name.clone(),
            a.code_type.clone(),
            a.vertical_limits.map(|v| (v.lower_feet().to_bits(), v.upper_feet().to_bits())),
        );
        seen.insert(key)
    });
    airspaces
}
