//! Latitude-dependent bucket width.
//!
//! Buckets are always 0.125 degrees tall, but their width grows toward the
//! poles so that a bucket keeps a roughly constant ground footprint as the
//! meridians converge. The width law is a step table keyed on absolute
//! latitude: the row with the greatest threshold at or below `|lat|` wins.

/// Width table used by current FlightGear terrain tooling.
///
/// Rows are `(latitude threshold, width in degrees)`, sorted ascending.
const MODERN_ROWS: &[(u8, f64)] = &[
    (0, 0.125),
    (22, 0.25),
    (62, 0.5),
    (76, 1.0),
    (83, 2.0),
    (86, 4.0),
    (89, 12.0),
];

/// Width table from older SimGear releases. Matches [`MODERN_ROWS`] below
/// 86 degrees but keeps the historical 8 degree band and the single polar
/// cap bucket above 89.
const LEGACY_ROWS: &[(u8, f64)] = &[
    (0, 0.125),
    (22, 0.25),
    (62, 0.5),
    (76, 1.0),
    (83, 2.0),
    (86, 4.0),
    (88, 8.0),
    (89, 360.0),
];

/// Bucket width lookup table.
///
/// The table is total: the final row is open-ended and covers every
/// latitude through the poles, so a lookup never fails.
///
/// # Example
///
/// ```
/// use fgortho::bucket::WidthTable;
///
/// let table = WidthTable::modern();
/// assert_eq!(table.width_for_latitude(40.4), 0.25);
/// assert_eq!(table.width_for_latitude(-40.4), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthTable {
    rows: &'static [(u8, f64)],
}

impl WidthTable {
    /// Table used by current FlightGear terrain tooling.
    pub const fn modern() -> Self {
        Self { rows: MODERN_ROWS }
    }

    /// Historical SimGear table, for scenery built against the old law.
    pub const fn legacy() -> Self {
        Self { rows: LEGACY_ROWS }
    }

    /// Bucket width in degrees of longitude at the given latitude.
    ///
    /// Symmetric about the equator: the lookup key is `|lat|`.
    pub fn width_for_latitude(&self, lat: f64) -> f64 {
        let abs_lat = lat.abs();
        let mut width = self.rows[0].1;
        for &(threshold, row_width) in self.rows {
            if abs_lat >= f64::from(threshold) {
                width = row_width;
            } else {
                break;
            }
        }
        width
    }

    /// Number of bucket columns in one degree cell at the given width.
    ///
    /// Widths above one degree span whole degree cells and hold a single
    /// column.
    pub(crate) fn columns_for_width(width: f64) -> u8 {
        if width <= 1.0 {
            (1.0 / width).round() as u8
        } else {
            1
        }
    }
}

impl Default for WidthTable {
    fn default() -> Self {
        Self::modern()
    }
}
