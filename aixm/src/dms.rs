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

//! Fixed-width DMS coordinate parsing for AIXM `geoLat`/`geoLong` text.
//!
//! AIXM 4.5 encodes coordinates as `DDMMSS.ssH` (latitude, 9 characters
//! before the hemisphere letter) or `DDDMMSS.ssH` (longitude, 10 characters
//! before the hemisphere letter). Any other width is a malformed vertex and
//! is reported as `None` so the caller can skip just that vertex.

/// Parses an AIXM `geoLat` or `geoLong` value into decimal degrees.
///
/// Returns `None` if the string is empty, its hemisphere character is not
/// one of `N`/`S`/`E`/`W`, or the numeric portion is not exactly 9 (latitude)
/// or 10 (longitude) characters long.
///
/// # Examples
///
/// ```
/// let lat = aixm::dms::parse("481234.56N").unwrap();
/// assert!((lat - 48.20960).abs() < 1e-5);
///
/// let lon = aixm::dms::parse("0015730.00W").unwrap();
/// assert!((lon - (-1.95833)).abs() < 1e-5);
/// ```
pub fn parse(text: &str) -> Option<f64> {
    let text = text.trim();
    let mut chars = text.chars();
    let hemisphere = chars.next_back()?;
    let digits = chars.as_str();

    let (deg_len, sign) = match hemisphere {
        'N' => (2, 1.0),
        'S' => (2, -1.0),
        'E' => (3, 1.0),
        'W' => (3, -1.0),
        _ => return None,
    };

    let expected_len = deg_len + 7; // DD|DDD + MM + SS.ss
    if digits.len() != expected_len {
        return None;
    }

    let deg: f64 = digits[..deg_len].parse().ok()?;
    let min: f64 = digits[deg_len..deg_len + 2].parse().ok()?;
    let sec: f64 = digits[deg_len + 2..].parse().ok()?;

    Some(sign * (deg + min / 60.0 + sec / 3600.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_latitude() {
        let lat = parse("481234.56N").unwrap();
        assert!((lat - 48.20960).abs() < 1e-5, "{lat}");
    }

    #[test]
    fn parses_negative_longitude() {
        let lon = parse("0015730.00W").unwrap();
        assert!((lon - (-1.95833)).abs() < 1e-5, "{lon}");
    }

    #[test]
    fn parses_positive_longitude() {
        let lon = parse("0100000.00E").unwrap();
        assert!((lon - 10.0).abs() < 1e-6, "{lon}");
    }

    #[test]
    fn rejects_wrong_width() {
        assert!(parse("48123.56N").is_none());
        assert!(parse("4812345678.56N").is_none());
    }

    #[test]
    fn rejects_bad_hemisphere() {
        assert!(parse("481234.56X").is_none());
    }

    #[test]
    fn rejects_empty() {
        assert!(parse("").is_none());
    }
}
