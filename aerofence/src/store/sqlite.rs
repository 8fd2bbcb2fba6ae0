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

//! Persisted [`AirspaceStore`] backed by SQLite (bundled), migrated with
//! `rusqlite_migration` and opened in WAL journal mode so reads are never
//! blocked by a concurrent writer.

use rusqlite::Connection;
use rusqlite_migration::{Migrations, M};

use crate::domain::{Airspace, AirspaceClass, AirspaceId, Border, Vertex};
use crate::error::Error;
use crate::store::{dedupe_by_name_type_limits, AirspaceStore, BorderId};
use crate::units::{VerticalLimit, VerticalLimits, VerticalReference};

fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(
        "CREATE TABLE airspaces (
            id INTEGER PRIMARY KEY,
            code_id TEXT NOT NULL,
            mid TEXT,
            name TEXT,
            code_type TEXT NOT NULL,
            class TEXT
        );
        CREATE INDEX idx_airspaces_code_id ON airspaces(code_id);

        CREATE TABLE vertical_limits (
            airspace_id INTEGER PRIMARY KEY REFERENCES airspaces(id),
            lower_value REAL,
            lower_ref TEXT,
            upper_value REAL,
            upper_ref TEXT
        );
        CREATE INDEX idx_vertical_limits_airspace_id ON vertical_limits(airspace_id);

        CREATE TABLE borders (
            id INTEGER PRIMARY KEY,
            airspace_id INTEGER NOT NULL REFERENCES airspaces(id)
        );
        CREATE INDEX idx_borders_airspace_id ON borders(airspace_id);

        CREATE TABLE vertices (
            border_id INTEGER NOT NULL REFERENCES borders(id),
            sequence_number INTEGER NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            PRIMARY KEY (border_id, sequence_number)
        );",
    )])
}

/// A SQLite-backed airspace store. Opens (and migrates, if needed) the
/// database at construction time.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, Error> {
        let mut conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        migrations().to_latest(&mut conn)?;
        log::info!("opened sqlite airspace store at {path}");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        let mut conn = Connection::open_in_memory()?;
        migrations().to_latest(&mut conn)?;
        Ok(Self { conn })
    }

    /// Inserts an airspace, returning the id assigned to it.
    pub fn insert_airspace(&self, airspace: &Airspace) -> Result<AirspaceId, Error> {
        self.conn.execute(
            "INSERT INTO airspaces (code_id, mid, name, code_type, class) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                airspace.code_id,
                airspace.mid,
                airspace.name,
                airspace.code_type,
                airspace.class.map(|c| c.to_string()),
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        if let Some(limits) = airspace.vertical_limits {
            self.conn.execute(
                "INSERT INTO vertical_limits (airspace_id, lower_value, lower_ref, upper_value, upper_ref)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    id,
                    limits.lower.map(|l| l.value),
                    limits.lower.map(|l| l.reference.to_string()),
                    limits.upper.map(|u| u.value),
                    limits.upper.map(|u| u.reference.to_string()),
                ],
            )?;
        }

        Ok(id)
    }

    /// Inserts a border owned by `airspace_id`, returning the border id.
    pub fn insert_border(&self, airspace_id: AirspaceId, border: &Border) -> Result<BorderId, Error> {
        self.conn.execute(
            "INSERT INTO borders (airspace_id) VALUES (?1)",
            rusqlite::params![airspace_id],
        )?;
        let border_id = self.conn.last_insert_rowid();

        if let Border::Polygon(vertices) = border {
            for v in vertices {
                self.conn.execute(
                    "INSERT INTO vertices (border_id, sequence_number, latitude, longitude)
                     VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![border_id, v.sequence_number, v.latitude, v.longitude],
                )?;
            }
        }

        Ok(border_id)
    }

    /// Runs `f` inside a single transaction, for batched imports.
    pub fn with_transaction<T>(&mut self, f: impl FnOnce(&rusqlite::Transaction) -> Result<T, Error>) -> Result<T, Error> {
        let tx = self.conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    fn reference_from_str(s: &str) -> VerticalReference {
        VerticalReference::from_uom(s)
    }
}

impl AirspaceStore for SqliteStore {
    fn list_airspace_ids_with_geometry(&self) -> Result<Vec<AirspaceId>, Error> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT a.id FROM airspaces a JOIN borders b ON b.airspace_id = a.id",
        )?;
        let ids = stmt
            .query_map([], |row| row.get::<_, AirspaceId>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn get_airspace(&self, id: AirspaceId) -> Result<Option<Airspace>, Error> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.code_id, a.mid, a.name, a.code_type, a.class,
                    v.lower_value, v.lower_ref, v.upper_value, v.upper_ref
             FROM airspaces a
             LEFT JOIN vertical_limits v ON v.airspace_id = a.id
             WHERE a.id = ?1",
        )?;
        let mut rows = stmt.query(rusqlite::params![id])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let class: Option<String> = row.get(5)?;
        let lower_value: Option<f64> = row.get(6)?;
        let lower_ref: Option<String> = row.get(7)?;
        let upper_value: Option<f64> = row.get(8)?;
        let upper_ref: Option<String> = row.get(9)?;

        let vertical_limits = if lower_value.is_some() || upper_value.is_some() {
            Some(VerticalLimits::new(
                lower_value.map(|v| VerticalLimit::new(v, Self::reference_from_str(&lower_ref.unwrap_or_default()))),
                upper_value.map(|v| VerticalLimit::new(v, Self::reference_from_str(&upper_ref.unwrap_or_default()))),
            ))
        } else {
            None
        };

        Ok(Some(Airspace {
            id: row.get(0)?,
            code_id: row.get(1)?,
            mid: row.get(2)?,
            name: row.get(3)?,
            code_type: row.get(4)?,
            class: class.map(|c| AirspaceClass::from_code(&c)),
            vertical_limits,
        }))
    }

    fn get_borders(&self, airspace_id: AirspaceId) -> Result<Vec<(BorderId, Border)>, Error> {
        let mut stmt = self.conn.prepare("SELECT id FROM borders WHERE airspace_id = ?1")?;
        let border_ids = stmt
            .query_map(rusqlite::params![airspace_id], |row| row.get::<_, BorderId>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        border_ids
            .into_iter()
            .map(|border_id| {
                let vertices = self.get_vertices(border_id)?;
                Ok((border_id, Border::Polygon(vertices)))
            })
            .collect()
    }

    fn get_vertices(&self, border_id: BorderId) -> Result<Vec<Vertex>, Error> {
        let mut stmt = self.conn.prepare(
            "SELECT latitude, longitude, sequence_number FROM vertices
             WHERE border_id = ?1 ORDER BY sequence_number",
        )?;
        let vertices = stmt
            .query_map(rusqlite::params![border_id], |row| {
                Ok(Vertex {
                    latitude: row.get(0)?,
                    longitude: row.get(1)?,
                    sequence_number: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(vertices)
    }

    fn search_by_name(&self, pattern: &str) -> Result<Vec<Airspace>, Error> {
        let like = format!("%{}%", pattern.to_lowercase());
        let mut stmt = self.conn.prepare(
            "SELECT id FROM airspaces WHERE LOWER(name) LIKE ?1",
        )?;
        let ids = stmt
            .query_map(rusqlite::params![like], |row| row.get::<_, AirspaceId>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let matches: Vec<Airspace> = ids
            .into_iter()
            .filter_map(|id| self.get_airspace(id).ok().flatten())
            .collect();
        Ok(dedupe_by_name_type_limits(matches))
    }

    fn search_by_type(&self, code_type: &str) -> Result<Vec<Airspace>, Error> {
        let mut stmt = self.conn.prepare("SELECT id FROM airspaces WHERE code_type = ?1")?;
        let ids = stmt
            .query_map(rusqlite::params![code_type], |row| row.get::<_, AirspaceId>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids.into_iter().filter_map(|id| self.get_airspace(id).ok().flatten()).collect())
    }
}
