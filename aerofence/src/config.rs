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

//! The options surface for path sampling, corridor generation, crossing
//! analysis and profile correction. Every tunable named in this module has
//! a documented default and is set through a fluent `&mut self -> &mut
//! Self` setter, so a caller can override only the fields it cares about:
//!
//! ```
//! use aerofence::Config;
//!
//! let mut config = Config::default();
//! config.with_corridor_width_nm(10.0).with_ground_speed_kts(120.0);
//! assert_eq!(config.corridor_width_nm, 10.0);
//! ```

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable options for the path sampler, corridor generator, crossing
/// analyzer and profile corrector.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Half-height of the corridor above and below the nominal path, in
    /// feet. Valid range 0–10,000.
    pub corridor_height_ft: f64,
    /// Lateral corridor half-width, in nautical miles. Valid range 0.0–50.0.
    pub corridor_width_nm: f64,
    /// Target spacing between interpolated samples on a sparse route, in km.
    pub sample_distance_km: f64,
    /// `code_type`s excluded from user-facing airspace listings.
    pub filter_types: HashSet<String>,
    /// Assumed climb rate used by the profile corrector, feet per minute.
    pub climb_rate_fpm: f64,
    /// Assumed descent rate used by the profile corrector, feet per minute.
    pub descent_rate_fpm: f64,
    /// Assumed ground speed used by the profile corrector, knots.
    pub ground_speed_kts: f64,
    /// Below this `|Δalt|` (feet), a segment is interpolated linearly.
    pub step_climb_small_ft: f64,
    /// Above this `|Δalt|` (feet), a segment is treated as a step climb.
    pub step_climb_large_ft: f64,
    /// Leading fraction of a step-climb segment over which the altitude
    /// change actually occurs.
    pub step_climb_ramp_fraction: f64,
    /// Elements committed to the store per import batch.
    pub import_batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corridor_height_ft: 500.0,
            corridor_width_nm: 5.0,
            sample_distance_km: 5.0,
            filter_types: ["SECTOR", "FIR", "D-OTHER"].into_iter().map(String::from).collect(),
            climb_rate_fpm: 500.0,
            descent_rate_fpm: 500.0,
            ground_speed_kts: 100.0,
            step_climb_small_ft: 100.0,
            step_climb_large_ft: 800.0,
            step_climb_ramp_fraction: 0.3,
            import_batch_size: 1000,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_corridor_height_ft(&mut self, value: f64) -> &mut Self {
        self.corridor_height_ft = value;
        self
    }

    pub fn with_corridor_width_nm(&mut self, value: f64) -> &mut Self {
        self.corridor_width_nm = value;
        self
    }

    pub fn with_sample_distance_km(&mut self, value: f64) -> &mut Self {
        self.sample_distance_km = value;
        self
    }

    pub fn with_filter_types(&mut self, types: HashSet<String>) -> &mut Self {
        self.filter_types = types;
        self
    }

    pub fn with_climb_rate_fpm(&mut self, value: f64) -> &mut Self {
        self.climb_rate_fpm = value;
        self
    }

    pub fn with_descent_rate_fpm(&mut self, value: f64) -> &mut Self {
        self.descent_rate_fpm = value;
        self
    }

    pub fn with_ground_speed_kts(&mut self, value: f64) -> &mut Self {
        self.ground_speed_kts = value;
        self
    }

    pub fn with_import_batch_size(&mut self, value: usize) -> &mut Self {
        self.import_batch_size = value;
        self
    }

    /// Whether `code_type` should be hidden from user-facing listings.
    pub fn is_filtered_type(&self, code_type: &str) -> bool {
        self.filter_types.contains(code_type)
    }

    /// Corridor half-height in feet, alongside the two extra mid-levels
    /// tested when the half-height exceeds 500 ft (see §4.7).
    pub fn corridor_test_altitudes(&self, altitude_ft: f64) -> Vec<f64> {
        let h = self.corridor_height_ft;
        let mut levels = vec![altitude_ft - h, altitude_ft, altitude_ft + h];
        if h > 500.0 {
            levels.push(altitude_ft - h / 2.0);
            levels.push(altitude_ft + h / 2.0);
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_specification() {
        let config = Config::default();
        assert_eq!(config.corridor_height_ft, 500.0);
        assert_eq!(config.corridor_width_nm, 5.0);
        assert_eq!(config.sample_distance_km, 5.0);
        assert_eq!(config.climb_rate_fpm, 500.0);
        assert_eq!(config.descent_rate_fpm, 500.0);
        assert_eq!(config.ground_speed_kts, 100.0);
        assert!(config.is_filtered_type("SECTOR"));
        assert!(config.is_filtered_type("FIR"));
        assert!(!config.is_filtered_type("CTR"));
    }

    #[test]
    fn fluent_setters_chain() {
        let mut config = Config::default();
        config.with_corridor_width_nm(10.0).with_ground_speed_kts(120.0);
        assert_eq!(config.corridor_width_nm, 10.0);
        assert_eq!(config.ground_speed_kts, 120.0);
    }

    #[test]
    fn corridor_test_altitudes_default_height() {
        let config = Config::default();
        let levels = config.corridor_test_altitudes(5000.0);
        assert_eq!(levels, vec![4500.0, 5000.0, 5500.0]);
    }

    #[test]
    fn corridor_test_altitudes_include_mid_levels_above_500ft() {
        let mut config = Config::default();
        config.with_corridor_height_ft(1000.0);
        let levels = config.corridor_test_altitudes(5000.0);
        assert_eq!(levels, vec![4000.0, 5000.0, 6000.0, 4500.0, 5500.0]);
    }
}
