// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Joe Pearson
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

//! Streaming AIXM 4.5 XML parser.
//!
//! Scans the XML byte stream for `<Ase>` (airspace) and `<Abd>` (border)
//! elements and yields them one at a time, each with its subtree fields
//! flattened into plain strings. The document is never materialized in
//! full — only one element's subtree is held in memory at a time, which is
//! what lets [`Records`] stream a multi-hundred-megabyte national feed.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::Error;

/// A single AIXM record yielded by [`Records`].
#[derive(Clone, Debug)]
pub enum Record {
    /// An `<Ase>` airspace definition.
    Airspace(Ase),
    /// An `<Abd>` border definition with its `<Avx>` vertices.
    Border(Abd),
}

/// Raw fields of one `<Ase>` element.
///
/// Fields are `Option` because this crate does not judge which are
/// required — that is an importer policy (§4.1 of the specification this
/// workspace implements treats a missing `codeId` as a skippable element,
/// not a parse error).
#[derive(Clone, Debug, Default)]
pub struct Ase {
    /// `AseUid/@mid`, the AIXM permanent identifier, if present.
    pub mid: Option<String>,
    /// `AseUid/codeType`, e.g. `"TMA"`, `"CTR"`, `"R"`.
    pub code_type: Option<String>,
    /// `AseUid/codeId`, the raw (not globally unique) identifier used to
    /// link `<Abd>` borders back to this airspace.
    pub code_id: Option<String>,
    /// `txtName`, the human-readable name.
    pub txt_name: Option<String>,
    /// `codeClass`, the ICAO class letter (`A`–`G`), if assigned.
    pub code_class: Option<String>,
    /// `valDistVerUpper`, the upper vertical limit's numeric value.
    pub val_dist_ver_upper: Option<String>,
    /// `uomDistVerUpper`, the upper vertical limit's unit (`FT`, `FL`, `M`).
    pub uom_dist_ver_upper: Option<String>,
    /// `valDistVerLower`, the lower vertical limit's numeric value.
    pub val_dist_ver_lower: Option<String>,
    /// `uomDistVerLower`, the lower vertical limit's unit.
    pub uom_dist_ver_lower: Option<String>,
}

/// Raw fields of one `<Avx>` boundary vertex.
#[derive(Clone, Debug, Default)]
pub struct Avx {
    /// `geoLat`, the AIXM DMS-encoded latitude string.
    pub geo_lat: Option<String>,
    /// `geoLong`, the AIXM DMS-encoded longitude string.
    pub geo_long: Option<String>,
    /// `noSeq`, the vertex's position in ring order.
    pub no_seq: Option<String>,
}

/// Raw fields of one `<Abd>` border definition, with its vertices.
#[derive(Clone, Debug, Default)]
pub struct Abd {
    /// `AbdUid/AseUid/codeId`, the airspace this border belongs to.
    pub ase_code_id: Option<String>,
    /// The `<Avx>` vertices nested under this border, in document order.
    pub vertices: Vec<Avx>,
}

/// Streaming iterator over `<Ase>` and `<Abd>` elements in an AIXM 4.5
/// document.
///
/// All other elements are silently skipped. Namespace-qualified tags
/// (`aixm:Ase`) and bare tags (`Ase`) are both accepted, matching local
/// names only.
///
/// # Examples
///
/// ```
/// let xml = br#"<AIXMBasicMessage>
///   <Ase><AseUid><codeType>CTR</codeType><codeId>EADD</codeId></AseUid>
///     <txtName>DONLON CTR</txtName><codeClass>D</codeClass>
///   </Ase>
/// </AIXMBasicMessage>"#;
///
/// let records: Vec<_> = aixm::Records::new(&xml[..]).collect::<Result<_, _>>().unwrap();
/// assert_eq!(records.len(), 1);
/// ```
pub struct Records<'a> {
    reader: Reader<&'a [u8]>,
    data: &'a [u8],
    buf: Vec<u8>,
}

impl<'a> Records<'a> {
    /// Creates a new streaming parser over an AIXM 4.5 XML byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(data);
        reader.config_mut().trim_text(true);
        Self {
            reader,
            data,
            buf: Vec::new(),
        }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf) {
                Ok(Event::Start(ref e)) => {
                    let local = local_name(e.name().as_ref()).to_vec();
                    if local != b"Ase" && local != b"Abd" {
                        continue;
                    }

                    let tag = String::from_utf8_lossy(e.as_ref()).to_string();
                    let end = e.to_end().into_owned();
                    let result = self
                        .reader
                        .read_to_end(end.name())
                        .map_err(Error::from)
                        .and_then(|span| {
                            let content = std::str::from_utf8(
                                &self.data[span.start as usize..span.end as usize],
                            )?;
                            let end_name = end.name();
                            let end_tag = std::str::from_utf8(end_name.as_ref())?;
                            let xml = format!("<{tag}>{content}</{end_tag}>");
                            if local == b"Ase" {
                                ase_from_xml(xml.as_bytes()).map(Record::Airspace)
                            } else {
                                abd_from_xml(xml.as_bytes()).map(Record::Border)
                            }
                        });

                    return Some(result);
                }
                Ok(Event::Eof) => return None,
                Err(e) => return Some(Err(e.into())),
                _ => continue,
            }
        }
    }
}

/// Returns the local name portion of a possibly namespace-prefixed XML name.
fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .position(|&b| b == b':')
        .map_or(name, |pos| &name[pos + 1..])
}

/// Flattens every descendant element's text content into a map keyed by
/// local name, plus every attribute keyed `"tag@attr"`.
///
/// This is safe for subtrees where a given tag name appears at most once —
/// true for `<Ase>` and for a single `<Avx>`, but *not* for `<Abd>` as a
/// whole (which repeats `geoLat`/`geoLong`/`noSeq` once per vertex); the
/// `<Abd>` walk below calls this per-`<Avx>` subtree instead of on the whole
/// border.
fn flatten(xml: &[u8]) -> Result<HashMap<String, String>, Error> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut fields = HashMap::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = String::from_utf8_lossy(local_name(e.name().as_ref())).to_string();
                for attr in e.attributes().flatten() {
                    let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).to_string();
                    if let Ok(value) = attr.unescape_value() {
                        fields.insert(format!("{name}@{key}"), value.into_owned());
                    }
                }
                current = Some(name);
            }
            Event::Text(t) => {
                if let Some(name) = &current {
                    let text = t.unescape()?.into_owned();
                    if !text.trim().is_empty() {
                        fields.insert(name.clone(), text);
                    }
                }
            }
            Event::End(_) => current = None,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(fields)
}

fn ase_from_xml(xml: &[u8]) -> Result<Ase, Error> {
    let fields = flatten(xml)?;
    Ok(Ase {
        mid: fields.get("AseUid@mid").cloned(),
        code_type: fields.get("codeType").cloned(),
        code_id: fields.get("codeId").cloned(),
        txt_name: fields.get("txtName").cloned(),
        code_class: fields.get("codeClass").cloned(),
        val_dist_ver_upper: fields.get("valDistVerUpper").cloned(),
        uom_dist_ver_upper: fields.get("uomDistVerUpper").cloned(),
        val_dist_ver_lower: fields.get("valDistVerLower").cloned(),
        uom_dist_ver_lower: fields.get("uomDistVerLower").cloned(),
    })
}

fn abd_from_xml(xml: &[u8]) -> Result<Abd, Error> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut ase_code_id = None;
    let mut vertices = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let local = local_name(e.name().as_ref()).to_vec();
                let tag = String::from_utf8_lossy(e.as_ref()).to_string();
                let end = e.to_end().into_owned();
                let span = reader.read_to_end(end.name())?;
                let content = std::str::from_utf8(&xml[span.start as usize..span.end as usize])?;
                let end_name = end.name();
                let end_tag = std::str::from_utf8(end_name.as_ref())?;
                let inner_xml = format!("<{tag}>{content}</{end_tag}>");

                if local == b"AbdUid" {
                    let fields = flatten(inner_xml.as_bytes())?;
                    ase_code_id = fields.get("codeId").cloned();
                } else if local == b"Avx" {
                    let fields = flatten(inner_xml.as_bytes())?;
                    vertices.push(Avx {
                        geo_lat: fields.get("geoLat").cloned(),
                        geo_long: fields.get("geoLong").cloned(),
                        no_seq: fields.get("noSeq").cloned(),
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(Abd {
        ase_code_id,
        vertices,
    })
}
