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

//! Vertical reference units and the feet-AMSL conversion table.
//!
//! AIXM encodes an airspace's vertical limits as a raw numeric value plus a
//! unit of measure (`uomDistVerUpper`/`uomDistVerLower`): feet, flight level,
//! or meters. The query engine always compares in feet AMSL, so every limit
//! is converted once at query time through [`VerticalLimit::to_feet`].

use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Meters-to-feet conversion factor.
pub const FEET_IN_METER: f64 = 3.28084;

/// Feet per flight level step.
pub const FEET_IN_FLIGHT_LEVEL: f64 = 100.0;

/// The unit a raw vertical value is expressed in.
///
/// `Ft` covers both AMSL and AGL references from the source feed; this core
/// does not model ground elevation, so AGL values are treated as AMSL.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VerticalReference {
    /// Feet above mean sea level.
    Ft,
    /// Flight level (hundreds of feet on the standard pressure datum).
    Fl,
    /// Meters above mean sea level.
    M,
}

impl VerticalReference {
    /// Parses an AIXM `uomDistVerUpper`/`uomDistVerLower` code.
    ///
    /// Unrecognized codes fall back to `Ft`, matching the source feed's
    /// convention of leaving the unit blank for surface/unlimited entries.
    pub fn from_uom(uom: &str) -> Self {
        match uom.trim().to_ascii_uppercase().as_str() {
            "FL" => VerticalReference::Fl,
            "M" => VerticalReference::M,
            _ => VerticalReference::Ft,
        }
    }
}

impl Display for VerticalReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VerticalReference::Ft => write!(f, "FT"),
            VerticalReference::Fl => write!(f, "FL"),
            VerticalReference::M => write!(f, "M"),
        }
    }
}

/// A single raw vertical value paired with its reference.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VerticalLimit {
    pub value: f64,
    pub reference: VerticalReference,
}

impl VerticalLimit {
    pub fn new(value: f64, reference: VerticalReference) -> Self {
        Self { value, reference }
    }

    /// Converts this limit to feet AMSL.
    ///
    /// A value with reference `Fl` is multiplied by 100 before anything
    /// else: FL65 is 6,500 ft, not 65 ft.
    ///
    /// # Examples
    ///
    /// ```
    /// use aerofence::units::{VerticalLimit, VerticalReference};
    ///
    /// let fl65 = VerticalLimit::new(65.0, VerticalReference::Fl);
    /// assert_eq!(fl65.to_feet(), 6500.0);
    /// ```
    pub fn to_feet(&self) -> f64 {
        match self.reference {
            VerticalReference::Ft => self.value,
            VerticalReference::Fl => self.value * FEET_IN_FLIGHT_LEVEL,
            VerticalReference::M => self.value * FEET_IN_METER,
        }
    }
}

impl Display for VerticalLimit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.reference {
            VerticalReference::Fl => write!(f, "FL{:.0}", self.value),
            other => write!(f, "{:.0} {}", self.value, other),
        }
    }
}

/// An airspace's vertical extent: an optional lower and upper bound.
///
/// A missing lower bound means the airspace starts at the surface (0 ft); a
/// missing upper bound means it has no ceiling.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VerticalLimits {
    pub lower: Option<VerticalLimit>,
    pub upper: Option<VerticalLimit>,
}

impl VerticalLimits {
    pub fn new(lower: Option<VerticalLimit>, upper: Option<VerticalLimit>) -> Self {
        Self { lower, upper }
    }

    /// Lower bound in feet AMSL, defaulting to the surface when absent.
    pub fn lower_feet(&self) -> f64 {
        self.lower.map(|l| l.to_feet()).unwrap_or(0.0)
    }

    /// Upper bound in feet AMSL, defaulting to unlimited when absent.
    pub fn upper_feet(&self) -> f64 {
        self.upper.map(|u| u.to_feet()).unwrap_or(f64::INFINITY)
    }

    /// Returns whether `altitude_ft` falls within `[lower_feet, upper_feet]`.
    pub fn contains_altitude(&self, altitude_ft: f64) -> bool {
        altitude_ft >= self.lower_feet() && altitude_ft <= self.upper_feet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fl_converts_to_hundreds_of_feet() {
        let fl = VerticalLimit::new(65.0, VerticalReference::Fl);
        assert_eq!(fl.to_feet(), 6500.0);
    }

    #[test]
    fn meters_convert_to_feet() {
        let m = VerticalLimit::new(1000.0, VerticalReference::M);
        assert!((m.to_feet() - 3280.84).abs() < 1e-6);
    }

    #[test]
    fn feet_pass_through() {
        let ft = VerticalLimit::new(2500.0, VerticalReference::Ft);
        assert_eq!(ft.to_feet(), 2500.0);
    }

    #[test]
    fn missing_lower_is_surface() {
        let limits = VerticalLimits::new(None, Some(VerticalLimit::new(65.0, VerticalReference::Fl)));
        assert_eq!(limits.lower_feet(), 0.0);
        assert_eq!(limits.upper_feet(), 6500.0);
    }

    #[test]
    fn missing_upper_is_unlimited() {
        let limits = VerticalLimits::new(Some(VerticalLimit::new(0.0, VerticalReference::Ft)), None);
        assert!(limits.upper_feet().is_infinite());
    }

    #[test]
    fn boundary_is_inclusive() {
        let limits = VerticalLimits::new(
            Some(VerticalLimit::new(0.0, VerticalReference::Ft)),
            Some(VerticalLimit::new(65.0, VerticalReference::Fl)),
        );
        assert!(limits.contains_altitude(6500.0));
        assert!(!limits.contains_altitude(6501.0));
    }

    #[test]
    fn from_uom_recognizes_fl_and_m() {
        assert_eq!(VerticalReference::from_uom("FL"), VerticalReference::Fl);
        assert_eq!(VerticalReference::from_uom("m"), VerticalReference::M);
        assert_eq!(VerticalReference::from_uom("FT"), VerticalReference::Ft);
        assert_eq!(VerticalReference::from_uom(""), VerticalReference::Ft);
    }
}
