//! Scenery path naming.
//!
//! FlightGear scenery trees group degree cells under ten-degree parents, so
//! the bucket at cell (-3, 40) lives in `w010n40/w003n40/`. Both segments
//! take their hemisphere letters from the parent: the parent is the
//! ten-degree origin at or south-west of the cell, and a cell like -3 keeps
//! the `w` of its -10 parent.

use super::types::Bucket;

impl Bucket {
    /// Directory pair for this bucket in a scenery tree.
    ///
    /// Returns `(parent, cell)`, e.g. `("w010n40", "w003n40")` for the
    /// bucket at cell (-3, 40).
    pub fn base_path(&self) -> (String, String) {
        let parent_lon = self.lon().div_euclid(10) * 10;
        let parent_lat = self.lat().div_euclid(10) * 10;
        let hemisphere = if parent_lon < 0 { 'w' } else { 'e' };
        let pole = if parent_lat < 0 { 's' } else { 'n' };

        let parent = format!(
            "{}{:03}{}{:02}",
            hemisphere,
            parent_lon.abs(),
            pole,
            parent_lat.abs()
        );
        let cell = format!(
            "{}{:03}{}{:02}",
            hemisphere,
            self.lon().abs(),
            pole,
            self.lat().abs()
        );
        (parent, cell)
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::Bucket;
    use super::super::width::WidthTable;

    fn bucket_at(lon: f64, lat: f64) -> Bucket {
        Bucket::from_lon_lat(lon, lat, &WidthTable::modern()).unwrap()
    }

    #[test]
    fn test_negative_cell_keeps_parent_hemisphere() {
        assert_eq!(
            bucket_at(-3.7, 40.4).base_path(),
            ("w010n40".to_string(), "w003n40".to_string())
        );
    }

    #[test]
    fn test_cell_on_parent_boundary() {
        // -10 is its own parent, with no off-by-one from truncation.
        assert_eq!(
            bucket_at(-9.9, 40.4).base_path(),
            ("w010n40".to_string(), "w010n40".to_string())
        );
    }

    #[test]
    fn test_north_eastern_quadrant() {
        assert_eq!(
            bucket_at(12.48, 41.9).base_path(),
            ("e010n40".to_string(), "e012n41".to_string())
        );
    }

    #[test]
    fn test_southern_hemisphere() {
        assert_eq!(
            bucket_at(151.2, -33.9).base_path(),
            ("e150s40".to_string(), "e151s34".to_string())
        );
    }

    #[test]
    fn test_prime_meridian_parent_is_eastern() {
        assert_eq!(
            bucket_at(5.5, 0.5).base_path(),
            ("e000n00".to_string(), "e005n00".to_string())
        );
    }

    #[test]
    fn test_far_south_west_corner() {
        assert_eq!(
            bucket_at(-180.0, -89.5).base_path(),
            ("w180s90".to_string(), "w180s90".to_string())
        );
    }
}
