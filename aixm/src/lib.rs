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

//! AIXM (Aeronautical Information Exchange Model) 4.5 parser.
//!
//! This crate provides a streaming reader over the flat, DMS-coordinate
//! flavor of AIXM (version 4.5) used for airspace boundary feeds. It does
//! not attempt to cover the whole AIXM feature catalogue — only the `Ase`
//! (airspace), `Abd` (border) and `Avx` (boundary vertex) elements that a
//! flight-path-vs-airspace analysis needs.

pub mod dms;
mod error;
mod parser;

pub use error::Error;
pub use parser::{Abd, Ase, Avx, Record, Records};
