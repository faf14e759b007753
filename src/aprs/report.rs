//! # Station Reports
//!
//! Decodes one comma-delimited Direwolf log record into a [`StationReport`].
//!
//! ## Record Layout
//!
//! Direwolf writes one record per decoded packet. Only these positions are
//! used; the rest of the record is ignored:
//!
//! | Index | Field |
//! |-------|-------|
//! | 3 | Source (transmitting) callsign |
//! | 4 | Heard-by callsign |
//! | 5 | Signal level |
//! | 7 | Data type indicator (`!` for RF position reports) |
//! | 10 | Latitude |
//! | 11 | Longitude |
//! | 12 | Speed |
//! | last | Comment |

use std::fmt;

use thiserror::Error;

use super::grid::latlon_to_grid;

/// Minimum number of comma-separated fields for a usable record
pub const MIN_RECORD_FIELDS: usize = 18;

/// Placeholder shown when a value is absent from the record
pub const NOT_AVAILABLE: &str = "N/A";

/// Data type indicator marking a report received over RF
pub const RF_MARKER: &str = "!";

/// Largest latitude magnitude in degrees
const MAX_LATITUDE: f64 = 90.0;

/// Largest longitude magnitude in degrees
const MAX_LONGITUDE: f64 = 180.0;

/// Field positions within a Direwolf log record
pub mod columns {
    /// Transmitting station
    pub const SOURCE: usize = 3;
    /// Station that heard the packet
    pub const HEARD_BY: usize = 4;
    /// Audio level / signal strength
    pub const SIGNAL: usize = 5;
    /// Data type indicator
    pub const MARKER: usize = 7;
    /// Latitude in decimal degrees
    pub const LATITUDE: usize = 10;
    /// Longitude in decimal degrees
    pub const LONGITUDE: usize = 11;
    /// Speed
    pub const SPEED: usize = 12;
}

/// Errors raised while decoding a record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// Record has too few fields to be a station report
    #[error("record has {found} fields, need at least {}", MIN_RECORD_FIELDS)]
    TooFewFields { found: usize },

    /// Latitude or longitude is present but not a number
    #[error("{field} is not a number: {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },
}

/// How a report reached the iGate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Heard directly over radio
    Rf,
    /// Relayed through the internet gateway network
    Ig,
}

impl Origin {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Rf => "RF",
            Origin::Ig => "IG",
        }
    }

    /// Classify a data type indicator field
    pub fn from_marker(marker: &str) -> Self {
        if marker == RF_MARKER {
            Origin::Rf
        } else {
            Origin::Ig
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded station report
#[derive(Debug, Clone, PartialEq)]
pub struct StationReport {
    /// Transmitting station
    pub source_callsign: String,

    /// Station that heard the report (local station for self-heard RF reports)
    pub heard_by_callsign: String,

    /// Signal level token as logged
    pub signal_strength: String,

    /// Latitude in decimal degrees, or `N/A`
    pub latitude: String,

    /// Longitude in decimal degrees, or `N/A`
    pub longitude: String,

    /// Speed token as logged
    pub speed: String,

    /// 6-character Maidenhead locator, or `N/A`
    pub grid_locator: String,

    /// RF or IG
    pub origin: Origin,

    /// Free-text comment (last field of the record)
    pub comment: String,
}

impl StationReport {
    /// Decode a record that has already been split on commas
    ///
    /// # Arguments
    ///
    /// * `fields` - Record fields in log order
    /// * `mycall` - Local station callsign, substituted as listener for
    ///   RF reports whose heard-by station equals the source
    ///
    /// # Returns
    ///
    /// * `Result<StationReport, ReportError>` - Decoded report
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The record has fewer than [`MIN_RECORD_FIELDS`] fields
    /// - Latitude and longitude are both present but one is not a number
    ///
    /// # Examples
    ///
    /// ```
    /// use igate_display::aprs::report::{Origin, StationReport};
    ///
    /// let line = "0,1,2,N0CALL,N0CALL,5,6,!,8,9,40.0,-74.0,0,13,14,15,16,hello";
    /// let fields: Vec<&str> = line.split(',').collect();
    /// let report = StationReport::from_fields(&fields, "PY2PCR-15").unwrap();
    ///
    /// assert_eq!(report.origin, Origin::Rf);
    /// assert_eq!(report.heard_by_callsign, "PY2PCR-15");
    /// assert_eq!(report.grid_locator, "FN30AA");
    /// ```
    pub fn from_fields(fields: &[&str], mycall: &str) -> Result<Self, ReportError> {
        if fields.len() < MIN_RECORD_FIELDS {
            return Err(ReportError::TooFewFields { found: fields.len() });
        }

        let source_callsign = fields[columns::SOURCE].to_string();
        let origin = Origin::from_marker(fields[columns::MARKER]);

        // Direwolf logs its own callsign as listener for RF reports
        let self_heard = fields[columns::HEARD_BY] == source_callsign;
        let heard_by_callsign = if origin == Origin::Rf && self_heard {
            mycall.to_string()
        } else {
            fields[columns::HEARD_BY].to_string()
        };

        let latitude = fields[columns::LATITUDE].trim();
        let longitude = fields[columns::LONGITUDE].trim();

        let grid_locator = if !latitude.is_empty() && !longitude.is_empty() {
            let lat = parse_coordinate("latitude", latitude, MAX_LATITUDE)?;
            let lon = parse_coordinate("longitude", longitude, MAX_LONGITUDE)?;
            latlon_to_grid(lat, lon)
        } else {
            NOT_AVAILABLE.to_string()
        };

        Ok(Self {
            source_callsign,
            heard_by_callsign,
            signal_strength: fields[columns::SIGNAL].to_string(),
            latitude: or_not_available(latitude),
            longitude: or_not_available(longitude),
            speed: fields[columns::SPEED].to_string(),
            grid_locator,
            origin,
            comment: fields[fields.len() - 1].to_string(),
        })
    }

    /// Split a raw log line on commas and decode it
    ///
    /// Trailing line terminators are stripped before splitting.
    pub fn parse_line(line: &str, mycall: &str) -> Result<Self, ReportError> {
        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();
        Self::from_fields(&fields, mycall)
    }
}

/// Parse a decimal-degree coordinate, rejecting NaN, infinities and
/// anything beyond `±limit`
fn parse_coordinate(field: &'static str, value: &str, limit: f64) -> Result<f64, ReportError> {
    let invalid = || ReportError::InvalidCoordinate {
        field,
        value: value.to_string(),
    };

    let degrees = value.parse::<f64>().map_err(|_| invalid())?;
    if !degrees.is_finite() || degrees.abs() > limit {
        return Err(invalid());
    }
    Ok(degrees)
}

fn or_not_available(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MYCALL: &str = "PY2PCR-15";

    /// Build an 18-field record with the interesting positions filled in
    fn record(
        source: &str,
        heard: &str,
        marker: &str,
        lat: &str,
        lon: &str,
        comment: &str,
    ) -> String {
        let mut fields: Vec<String> = (0..MIN_RECORD_FIELDS).map(|i| i.to_string()).collect();
        fields[columns::SOURCE] = source.to_string();
        fields[columns::HEARD_BY] = heard.to_string();
        fields[columns::SIGNAL] = "56(12/9)".to_string();
        fields[columns::MARKER] = marker.to_string();
        fields[columns::LATITUDE] = lat.to_string();
        fields[columns::LONGITUDE] = lon.to_string();
        fields[columns::SPEED] = "12.5".to_string();
        fields[MIN_RECORD_FIELDS - 1] = comment.to_string();
        fields.join(",")
    }

    #[test]
    fn test_rf_self_heard_uses_mycall() {
        let line = record("N0CALL", "N0CALL", "!", "40.0", "-74.0", "hello");
        let report = StationReport::parse_line(&line, MYCALL).unwrap();

        assert_eq!(report.origin, Origin::Rf);
        assert_eq!(report.source_callsign, "N0CALL");
        assert_eq!(report.heard_by_callsign, MYCALL);
    }

    #[test]
    fn test_rf_heard_by_other_station_is_kept() {
        let line = record("N0CALL", "W1AW-10", "!", "40.0", "-74.0", "hello");
        let report = StationReport::parse_line(&line, MYCALL).unwrap();

        assert_eq!(report.origin, Origin::Rf);
        assert_eq!(report.heard_by_callsign, "W1AW-10");
    }

    #[test]
    fn test_ig_never_substitutes() {
        for marker in ["/", "=", "@", "", "!!"] {
            let line = record("N0CALL", "N0CALL", marker, "40.0", "-74.0", "hello");
            let report = StationReport::parse_line(&line, MYCALL).unwrap();

            assert_eq!(report.origin, Origin::Ig, "marker {:?}", marker);
            assert_eq!(report.heard_by_callsign, "N0CALL");
        }
    }

    #[test]
    fn test_end_to_end_record() {
        let line = "X,X,X,N0CALL,N0CALL,5,X,!,X,X,40.0,-74.0,0,X,X,X,X,hello\n";
        let report = StationReport::parse_line(line, MYCALL).unwrap();

        assert_eq!(
            report,
            StationReport {
                source_callsign: "N0CALL".to_string(),
                heard_by_callsign: MYCALL.to_string(),
                signal_strength: "5".to_string(),
                latitude: "40.0".to_string(),
                longitude: "-74.0".to_string(),
                speed: "0".to_string(),
                grid_locator: latlon_to_grid(40.0, -74.0),
                origin: Origin::Rf,
                comment: "hello".to_string(),
            }
        );
    }

    #[test]
    fn test_comment_is_last_field_of_long_record() {
        let line = "0,1,2,A,B,5,6,/,8,9,,,12,13,14,15,16,17,18,19,20,the comment";
        let report = StationReport::parse_line(line, MYCALL).unwrap();
        assert_eq!(report.comment, "the comment");
    }

    #[test]
    fn test_missing_coordinates_are_not_available() {
        let line = record("N0CALL", "N0CALL", "!", "", "", "no fix");
        let report = StationReport::parse_line(&line, MYCALL).unwrap();

        assert_eq!(report.latitude, NOT_AVAILABLE);
        assert_eq!(report.longitude, NOT_AVAILABLE);
        assert_eq!(report.grid_locator, NOT_AVAILABLE);
    }

    #[test]
    fn test_blank_coordinates_are_not_available() {
        let line = record("N0CALL", "N0CALL", "!", "  ", " ", "no fix");
        let report = StationReport::parse_line(&line, MYCALL).unwrap();

        assert_eq!(report.latitude, NOT_AVAILABLE);
        assert_eq!(report.grid_locator, NOT_AVAILABLE);
    }

    #[test]
    fn test_latitude_without_longitude_skips_grid() {
        let line = record("N0CALL", "N0CALL", "!", "40.0", "", "half fix");
        let report = StationReport::parse_line(&line, MYCALL).unwrap();

        assert_eq!(report.latitude, "40.0");
        assert_eq!(report.longitude, NOT_AVAILABLE);
        assert_eq!(report.grid_locator, NOT_AVAILABLE);
    }

    #[test]
    fn test_coordinates_are_trimmed() {
        let line = record("N0CALL", "N0CALL", "!", " 40.0 ", " -74.0", "hello");
        let report = StationReport::parse_line(&line, MYCALL).unwrap();

        assert_eq!(report.latitude, "40.0");
        assert_eq!(report.longitude, "-74.0");
        assert_eq!(report.grid_locator, "FN30AA");
    }

    #[test]
    fn test_non_numeric_coordinate_is_error() {
        let line = record("N0CALL", "N0CALL", "!", "forty", "-74.0", "hello");
        let err = StationReport::parse_line(&line, MYCALL).unwrap_err();

        assert_eq!(
            err,
            ReportError::InvalidCoordinate {
                field: "latitude",
                value: "forty".to_string(),
            }
        );
    }

    #[test]
    fn test_non_finite_coordinates_are_errors() {
        for (lat, lon, field, value) in [
            ("inf", "-74.0", "latitude", "inf"),
            ("NaN", "-74.0", "latitude", "NaN"),
            ("40.0", "-inf", "longitude", "-inf"),
            ("40.0", "nan", "longitude", "nan"),
        ] {
            let line = record("N0CALL", "N0CALL", "!", lat, lon, "hello");
            let err = StationReport::parse_line(&line, MYCALL).unwrap_err();
            assert_eq!(
                err,
                ReportError::InvalidCoordinate {
                    field,
                    value: value.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_out_of_range_coordinates_are_errors() {
        let line = record("N0CALL", "N0CALL", "!", "1e300", "-74.0", "hello");
        assert!(matches!(
            StationReport::parse_line(&line, MYCALL),
            Err(ReportError::InvalidCoordinate { field: "latitude", .. })
        ));

        let line = record("N0CALL", "N0CALL", "!", "40.0", "180.5", "hello");
        assert!(matches!(
            StationReport::parse_line(&line, MYCALL),
            Err(ReportError::InvalidCoordinate { field: "longitude", .. })
        ));
    }

    #[test]
    fn test_coordinate_limits_are_inclusive() {
        let line = record("N0CALL", "N0CALL", "!", "-90", "180", "hello");
        let report = StationReport::parse_line(&line, MYCALL).unwrap();
        assert_eq!(report.grid_locator.len(), 6);
    }

    #[test]
    fn test_short_record_is_error() {
        let err = StationReport::parse_line("a,b,c", MYCALL).unwrap_err();
        assert_eq!(err, ReportError::TooFewFields { found: 3 });
    }

    #[test]
    fn test_seventeen_fields_is_too_few() {
        let fields: Vec<&str> = vec!["x"; MIN_RECORD_FIELDS - 1];
        assert!(StationReport::from_fields(&fields, MYCALL).is_err());
    }

    #[test]
    fn test_parsing_is_repeatable() {
        let line = record("N0CALL", "N0CALL", "!", "-22.9", "-47.06", "again");
        let first = StationReport::parse_line(&line, MYCALL).unwrap();
        let second = StationReport::parse_line(&line, MYCALL).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_origin_labels() {
        assert_eq!(Origin::Rf.as_str(), "RF");
        assert_eq!(Origin::Ig.to_string(), "IG");
        assert_eq!(Origin::from_marker("!"), Origin::Rf);
        assert_eq!(Origin::from_marker("'"), Origin::Ig);
    }
}
