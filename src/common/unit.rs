//! Unit conversion utilities.
//!
//! DrawingML positions and extents are English Metric Units (EMUs); font
//! sizes are hundredths of a point.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;
pub const CENTIPOINTS_PER_PT: f64 = 100.0;

/// Font size in points to the `sz` attribute of `<a:rPr>`.
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * CENTIPOINTS_PER_PT).round().max(0.0) as u32
}

#[inline]
pub fn centipoints_to_pt(sz: u32) -> f64 {
    sz as f64 / CENTIPOINTS_PER_PT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centipoints() {
        assert_eq!(pt_to_centipoints(10.5), 1050);
        assert_eq!(pt_to_centipoints(-3.0), 0);
        assert_eq!(centipoints_to_pt(1800), 18.0);
    }
}
