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

//! Replaces a route's plain cruise altitudes with a flyable vertical
//! profile: continuous climbs/descents between waypoints, each backed by a
//! synthetic transition waypoint, rather than an instantaneous step (§4.9).

use crate::config::Config;
use crate::corridor::KM_PER_NAUTICAL_MILE;
use crate::domain::{FlightRoute, Waypoint};
use crate::error::Error;

#[derive(Copy, Clone, PartialEq, Debug)]
enum BranchKind {
    Level,
    Climb,
    Descent,
}

/// A corrected route plus every branch the corrector could not fully climb
/// or descend within its available distance.
#[derive(Clone, Debug)]
pub struct CorrectionReport {
    pub route: FlightRoute,
    pub warnings: Vec<Error>,
}

/// Derives a flyable altitude profile for `route`.
///
/// The first and last waypoint altitudes are overridden to
/// `elevation + 1000 ft`; every other waypoint is a cruise target to reach
/// *by* that point. Branches that cannot complete their climb or descent in
/// the available distance are recorded in
/// [`CorrectionReport::warnings`] as [`Error::AltitudeUnreachable`] rather
/// than aborting the correction — the shortfall is carried forward into the
/// next branch's starting altitude.
pub fn correct(route: &FlightRoute, departure_elevation_ft: f64, destination_elevation_ft: f64, config: &Config) -> CorrectionReport {
    if route.waypoints.len() < 2 {
        return CorrectionReport {
            route: route.clone(),
            warnings: Vec::new(),
        };
    }

    let mut targets = route.waypoints.clone();
    let last = targets.len() - 1;
    targets[0].altitude_ft = departure_elevation_ft + 1000.0;
    targets[last].altitude_ft = destination_elevation_ft + 1000.0;

    let mut output = Vec::with_capacity(targets.len());
    let mut warnings = Vec::new();
    let mut current_alt = targets[0].altitude_ft;
    let branch_count = targets.len() - 1;

    for i in 0..branch_count {
        let from = &targets[i];
        let to = &targets[i + 1];
        output.push(Waypoint::new(from.name.clone(), from.longitude, from.latitude, current_alt));

        let target_alt = to.altitude_ft;
        let delta = target_alt - current_alt;
        let branch_distance_nm = from.coordinate().distance_km(&to.coordinate()) / KM_PER_NAUTICAL_MILE;

        let kind = if delta.abs() < 50.0 {
            BranchKind::Level
        } else if delta > 0.0 {
            BranchKind::Climb
        } else {
            BranchKind::Descent
        };
        log::debug!("branch {i} ({from_name} -> {to_name}): {kind:?}, delta {delta:.0}ft over {branch_distance_nm:.2}nm", from_name = from.name, to_name = to.name);

        if kind == BranchKind::Level {
            current_alt = target_alt;
            continue;
        }

        let rate_fpm = if kind == BranchKind::Climb { config.climb_rate_fpm } else { config.descent_rate_fpm };
        let required_nm = (config.ground_speed_kts / 60.0) * (delta.abs() / rate_fpm);
        let is_final_branch = i == branch_count - 1;

        if required_nm >= branch_distance_nm {
            let achievable_ft = current_alt + delta.signum() * rate_fpm * (branch_distance_nm / config.ground_speed_kts * 60.0);
            warnings.push(Error::AltitudeUnreachable { achievable_ft });
            current_alt = achievable_ft;
            continue;
        }

        let fraction = required_nm / branch_distance_nm;
        let position_fraction = if is_final_branch && kind == BranchKind::Descent {
            1.0 - fraction
        } else {
            fraction
        };

        let longitude = from.longitude + position_fraction * (to.longitude - from.longitude);
        let latitude = from.latitude + position_fraction * (to.latitude - from.latitude);
        let name = match kind {
            BranchKind::Climb => format!("Climb_{}_{}", to.name, target_alt.round() as i64),
            BranchKind::Descent => format!("Descent_{}_{}", from.name, target_alt.round() as i64),
            BranchKind::Level => unreachable!("LEVEL branches continue above"),
        };
        // For every branch but the anchored final descent, the synthetic
        // point marks where the target altitude has just been reached. The
        // final descent is anchored to the branch's end instead (§4.9): the
        // flight stays level at `current_alt` until this point, then
        // descends over the remaining `fraction` of the branch, so the
        // synthetic point itself is still at the cruise altitude.
        let waypoint_altitude = if is_final_branch && kind == BranchKind::Descent {
            current_alt
        } else {
            target_alt
        };
        output.push(Waypoint::new(name, longitude, latitude, waypoint_altitude));
        current_alt = target_alt;
    }

    output.push(Waypoint::new(targets[last].name.clone(), targets[last].longitude, targets[last].latitude, current_alt));

    CorrectionReport {
        route: FlightRoute::new(output),
        warnings,
    }
}
