//! # Maidenhead Grid Locator
//!
//! Converts latitude/longitude into a 6-character (subsquare precision)
//! Maidenhead locator such as `FN30AA`.
//!
//! ## Encoding
//!
//! | Pair | Characters | Longitude step | Latitude step |
//! |------|------------|----------------|---------------|
//! | Field | `A`-`R` | 20° | 10° |
//! | Square | `0`-`9` | 2° | 1° |
//! | Subsquare | `A`-`X` | 5' | 2.5' |

/// Longitude span of one field in degrees
const FIELD_LON_DEGREES: f64 = 20.0;

/// Latitude span of one field in degrees
const FIELD_LAT_DEGREES: f64 = 10.0;

/// Longitude span of one square in degrees
const SQUARE_LON_DEGREES: f64 = 2.0;

/// Latitude span of one square in degrees
const SQUARE_LAT_DEGREES: f64 = 1.0;

/// Longitude span of one subsquare in arc minutes
const SUBSQUARE_LON_MINUTES: f64 = 5.0;

/// Latitude span of one subsquare in arc minutes
const SUBSQUARE_LAT_MINUTES: f64 = 2.5;

/// Convert a coordinate to a 6-character Maidenhead locator
///
/// # Arguments
///
/// * `lat` - Latitude in signed decimal degrees (-90 to 90)
/// * `lon` - Longitude in signed decimal degrees (-180 to 180)
///
/// # Returns
///
/// * `String` - Locator, e.g. `JJ00AA` for (0, 0)
///
/// Coordinates outside the documented range, NaN and infinities are not
/// rejected; the affected characters come out as `?` and the call never panics.
///
/// # Examples
///
/// ```
/// use igate_display::aprs::grid::latlon_to_grid;
///
/// assert_eq!(latlon_to_grid(40.0, -74.0), "FN30AA");
/// ```
pub fn latlon_to_grid(lat: f64, lon: f64) -> String {
    let lon = lon + 180.0;
    let lat = lat + 90.0;

    let lon_rem = lon.rem_euclid(FIELD_LON_DEGREES);
    let lat_rem = lat.rem_euclid(FIELD_LAT_DEGREES);

    let lon_minutes = lon_rem.rem_euclid(SQUARE_LON_DEGREES) * 60.0;
    let lat_minutes = lat_rem.rem_euclid(SQUARE_LAT_DEGREES) * 60.0;

    let mut grid = String::with_capacity(6);
    grid.push(offset_char(b'A', lon / FIELD_LON_DEGREES));
    grid.push(offset_char(b'A', lat / FIELD_LAT_DEGREES));
    grid.push(offset_char(b'0', lon_rem / SQUARE_LON_DEGREES));
    grid.push(offset_char(b'0', lat_rem / SQUARE_LAT_DEGREES));
    grid.push(offset_char(b'A', lon_minutes / SUBSQUARE_LON_MINUTES));
    grid.push(offset_char(b'A', lat_minutes / SUBSQUARE_LAT_MINUTES));
    grid
}

/// `base` advanced by the truncated `index`, or `?` when that is not a valid char
fn offset_char(base: u8, index: f64) -> char {
    if !index.is_finite() {
        return '?';
    }
    i64::from(base)
        .checked_add(index.trunc() as i64)
        .and_then(|code| u32::try_from(code).ok())
        .and_then(char::from_u32)
        .unwrap_or('?')
}
