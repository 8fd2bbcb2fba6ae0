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

//! In-process, `HashMap`-backed [`AirspaceStore`]. Always available; the
//! default store used by the importer and by every test in this crate.

use std::collections::HashMap;

use crate::domain::{Airspace, AirspaceId, Border, Vertex};
use crate::error::Error;
use crate::store::{dedupe_by_name_type_limits, AirspaceStore, BorderId};

#[derive(Debug, Default)]
pub struct MemoryStore {
    airspaces: HashMap<AirspaceId, Airspace>,
    borders: HashMap<AirspaceId, Vec<(BorderId, Border)>>,
    vertices: HashMap<BorderId, Vec<Vertex>>,
    next_airspace_id: AirspaceId,
    next_border_id: BorderId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an airspace, returning the id assigned to it.
    pub fn insert_airspace(&mut self, mut airspace: Airspace) -> AirspaceId {
        self.next_airspace_id += 1;
        let id = self.next_airspace_id;
        airspace.id = id;
        self.airspaces.insert(id, airspace);
        id
    }

    /// Inserts a border owned by `airspace_id`, returning the border id.
    pub fn insert_border(&mut self, airspace_id: AirspaceId, border: Border) -> BorderId {
        self.next_border_id += 1;
        let border_id = self.next_border_id;
        self.borders.entry(airspace_id).or_default().push((border_id, border.clone()));
        if let Border::Polygon(vertices) = border {
            self.vertices.insert(border_id, vertices);
        }
        border_id
    }

    /// Commits a batch; a no-op flush for the in-memory backend.
    pub fn commit_batch(&self) {}
}

impl AirspaceStore for MemoryStore {
    fn list_airspace_ids_with_geometry(&self) -> Result<Vec<AirspaceId>, Error> {
        Ok(self
            .airspaces
            .keys()
            .copied()
            .filter(|id| self.borders.get(id).is_some_and(|b| !b.is_empty()))
            .collect())
    }

    fn get_airspace(&self, id: AirspaceId) -> Result<Option<Airspace>, Error> {
        Ok(self.airspaces.get(&id).cloned())
    }

    fn get_borders(&self, airspace_id: AirspaceId) -> Result<Vec<(BorderId, Border)>, Error> {
        Ok(self.borders.get(&airspace_id).cloned().unwrap_or_default())
    }

    fn get_vertices(&self, border_id: BorderId) -> Result<Vec<Vertex>, Error> {
        let mut v = self.vertices.get(&border_id).cloned().unwrap_or_default();
        v.sort_by_key(|vertex| vertex.sequence_number);
        Ok(v)
    }

    fn search_by_name(&self, pattern: &str) -> Result<Vec<Airspace>, Error> {
        let pattern = pattern.to_lowercase();
        let matches: Vec<Airspace> = self
            .airspaces
            .values()
            .filter(|a| {
                a.name
                    .as_ref()
                    .is_some_and(|n| n.to_lowercase().contains(&pattern))
            })
            .cloned()
            .collect();
        Ok(dedupe_by_name_type_limits(matches))
    }

    fn search_by_type(&self, code_type: &str) -> Result<Vec<Airspace>, Error> {
        Ok(self
            .airspaces
            .values()
            .filter(|a| a.code_type == code_type)
            .cloned()
            .collect())
    }
}
