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

//! Streams an AIXM 4.5 document into a [`MemoryStore`] in two passes.
//!
//! Pass 1 inserts every `<Ase>` as an [`Airspace`] and builds the transient
//! `code_id → id` map; pass 2 inserts every `<Abd>` as a [`Border`], looking
//! the target airspace up in that map. Both passes delegate the actual XML
//! scan to [`aixm::Records`], which never materializes more than one
//! element's subtree at a time.

use std::collections::HashMap;

use aixm::{Abd, Ase, Record, Records};

use crate::config::Config;
use crate::domain::{Airspace, AirspaceClass, Border, Vertex};
use crate::error::Error;
use crate::store::memory::MemoryStore;
use crate::units::{VerticalLimit, VerticalLimits, VerticalReference};

/// Summary of one import run: what was inserted, and every recoverable
/// issue encountered along the way.
#[derive(Clone, Debug, Default)]
pub struct ImportReport {
    pub airspaces_inserted: usize,
    pub borders_inserted: usize,
    pub vertices_inserted: usize,
    pub issues: Vec<Error>,
}

impl ImportReport {
    fn record(&mut self, issue: Error) {
        log::warn!("{issue}");
        self.issues.push(issue);
    }
}

/// Streams `xml` into a fresh [`MemoryStore`], returning the populated
/// store alongside an [`ImportReport`].
///
/// Fails with [`Error::MalformedSource`] only if the underlying XML scan
/// itself errors; every per-element problem (bad coordinates, an `<Abd>`
/// referencing an unknown airspace, ...) is recorded in the report and
/// skipped instead.
pub fn import(xml: &[u8], config: &Config) -> Result<(MemoryStore, ImportReport), Error> {
    let mut store = MemoryStore::new();
    let mut report = ImportReport::default();
    let mut code_id_to_airspace: HashMap<String, i64> = HashMap::new();

    // Pass 1: airspaces. A second full scan of `xml` follows for borders
    // (§4.1) rather than buffering `<Abd>` elements from this pass, so the
    // importer never holds more than one element's subtree — plus the
    // bounded `code_id → id` map — in memory at a time (§5).
    let mut since_commit = 0usize;
    for record in Records::new(xml) {
        if let Record::Airspace(ase) = record? {
            if let Some(id) = insert_airspace(&mut store, &ase, &mut report) {
                if let Some(code_id) = ase.code_id {
                    code_id_to_airspace.insert(code_id, id);
                }
            }

            since_commit += 1;
            if since_commit >= config.import_batch_size {
                store.commit_batch();
                since_commit = 0;
            }
        }
    }
    store.commit_batch();

    // Pass 2: borders, resolved against the `code_id` map built above.
    let mut since_commit = 0usize;
    for record in Records::new(xml) {
        if let Record::Border(abd) = record? {
            insert_border(&mut store, &abd, &code_id_to_airspace, &mut report);

            since_commit += 1;
            if since_commit >= config.import_batch_size {
                store.commit_batch();
                since_commit = 0;
            }
        }
    }
    store.commit_batch();

    log::info!(
        "aixm import complete: {} airspaces, {} borders, {} vertices, {} issues",
        report.airspaces_inserted,
        report.borders_inserted,
        report.vertices_inserted,
        report.issues.len()
    );

    Ok((store, report))
}

fn insert_airspace(store: &mut MemoryStore, ase: &Ase, report: &mut ImportReport) -> Option<i64> {
    let Some(code_type) = ase.code_type.clone() else {
        report.record(Error::ElementSkipped {
            reason: "Ase missing codeType".into(),
        });
        return None;
    };
    let Some(code_id) = ase.code_id.clone() else {
        report.record(Error::ElementSkipped {
            reason: "Ase missing codeId".into(),
        });
        return None;
    };

    let vertical_limits = parse_vertical_limits(ase);

    let airspace = Airspace {
        id: 0,
        code_id,
        mid: ase.mid.clone(),
        name: ase.txt_name.clone(),
        code_type,
        class: ase.code_class.as_deref().map(AirspaceClass::from_code),
        vertical_limits,
    };

    let id = store.insert_airspace(airspace);
    report.airspaces_inserted += 1;
    Some(id)
}

fn parse_vertical_limits(ase: &Ase) -> Option<VerticalLimits> {
    let lower = match (&ase.val_dist_ver_lower, &ase.uom_dist_ver_lower) {
        (Some(value), uom) => value.trim().parse::<f64>().ok().map(|v| {
            VerticalLimit::new(v, uom.as_deref().map(VerticalReference::from_uom).unwrap_or(VerticalReference::Ft))
        }),
        _ => None,
    };
    let upper = match (&ase.val_dist_ver_upper, &ase.uom_dist_ver_upper) {
        (Some(value), uom) => value.trim().parse::<f64>().ok().map(|v| {
            VerticalLimit::new(v, uom.as_deref().map(VerticalReference::from_uom).unwrap_or(VerticalReference::Ft))
        }),
        _ => None,
    };

    if lower.is_none() && upper.is_none() {
        None
    } else {
        Some(VerticalLimits::new(lower, upper))
    }
}

fn insert_border(
    store: &mut MemoryStore,
    abd: &Abd,
    code_id_to_airspace: &HashMap<String, i64>,
    report: &mut ImportReport,
) {
    let Some(code_id) = &abd.ase_code_id else {
        report.record(Error::ElementSkipped {
            reason: "Abd missing AbdUid/AseUid/codeId".into(),
        });
        return;
    };
    let Some(&airspace_id) = code_id_to_airspace.get(code_id) else {
        report.record(Error::UnknownReference {
            code_id: code_id.clone(),
        });
        return;
    };

    let mut vertices = Vec::with_capacity(abd.vertices.len());
    for avx in &abd.vertices {
        match parse_vertex(avx) {
            Some(vertex) => vertices.push(vertex),
            None => report.record(Error::ElementSkipped {
                reason: format!("Avx in border of {code_id} has an unparseable coordinate"),
            }),
        }
    }

    if vertices.is_empty() {
        report.record(Error::ElementSkipped {
            reason: format!("Abd for {code_id} had no usable vertices"),
        });
        return;
    }

    report.vertices_inserted += vertices.len();
    store.insert_border(airspace_id, Border::Polygon(vertices));
    report.borders_inserted += 1;
}

fn parse_vertex(avx: &aixm::Avx) -> Option<Vertex> {
    let lat = aixm::dms::parse(avx.geo_lat.as_deref()?)?;
    let lon = aixm::dms::parse(avx.geo_long.as_deref()?)?;
    let sequence_number = avx.no_seq.as_deref().and_then(|s| s.trim().parse().ok()).unwrap_or(0);
    Some(Vertex {
        latitude: lat,
        longitude: lon,
        sequence_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AirspaceStore;

    const SAMPLE: &[u8] = br#"<AIXMBasicMessage>
      <Ase>
        <AseUid mid="EAD_1"><codeType>CTR</codeType><codeId>EADD CTR</codeId></AseUid>
        <txtName>DONLON CTR</txtName>
        <codeClass>D</codeClass>
        <valDistVerUpper>65</valDistVerUpper>
        <uomDistVerUpper>FL</uomDistVerUpper>
        <valDistVerLower>0</valDistVerLower>
        <uomDistVerLower>FT</uomDistVerLower>
      </Ase>
      <Abd>
        <AbdUid><AseUid><codeId>EADD CTR</codeId></AseUid></AbdUid>
        <Avx><geoLat>521200.00N</geoLat><geoLong>0313000.00W</geoLong><noSeq>10</noSeq></Avx>
        <Avx><geoLat>523000.00N</geoLat><geoLong>0313000.00W</geoLong><noSeq>20</noSeq></Avx>
        <Avx><geoLat>523000.00N</geoLat><geoLong>0311500.00W</geoLong><noSeq>30</noSeq></Avx>
      </Abd>
      <Abd>
        <AbdUid><AseUid><codeId>UNKNOWN</codeId></AseUid></AbdUid>
        <Avx><geoLat>521200.00N</geoLat><geoLong>0313000.00W</geoLong><noSeq>10</noSeq></Avx>
      </Abd>
    </AIXMBasicMessage>"#;

    #[test]
    fn imports_airspace_and_border() {
        let (store, report) = import(SAMPLE, &Config::default()).unwrap();
        assert_eq!(report.airspaces_inserted, 1);
        assert_eq!(report.borders_inserted, 1);
        assert_eq!(report.vertices_inserted, 3);
        assert_eq!(report.issues.len(), 1);

        let ids = store.list_airspace_ids_with_geometry().unwrap();
        assert_eq!(ids.len(), 1);

        let airspace = store.get_airspace(ids[0]).unwrap().unwrap();
        assert_eq!(airspace.code_id, "EADD CTR");
        assert_eq!(airspace.vertical_limits.unwrap().upper_feet(), 6500.0);
    }

    #[test]
    fn unknown_reference_is_skipped_not_fatal() {
        let (_, report) = import(SAMPLE, &Config::default()).unwrap();
        assert!(report
            .issues
            .iter()
            .any(|e| matches!(e, Error::UnknownReference { code_id } if code_id == "UNKNOWN")));
    }

    #[test]
    fn malformed_xml_is_fatal() {
        let result = import(b"<Ase><AseUid>", &Config::default());
        assert!(result.is_err());
    }
}
