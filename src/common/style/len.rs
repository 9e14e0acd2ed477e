use std::fmt;

use crate::common::unit::{EMUS_PER_INCH, EMUS_PER_PT};

/// Length measurement with units.
///
/// Shape offsets, extents, column widths and row heights are all stored in
/// EMUs (English Metric Units), the native unit of DrawingML.
///
/// # Examples
///
/// ```rust
/// use deckframe::common::Length;
///
/// let length = Length::from_inches(1.0);
/// assert_eq!(length.emus(), 914_400);
/// assert_eq!(length.points(), 72.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length {
    emus: i64,
}

impl Length {
    #[inline]
    pub const fn from_emus(emus: i64) -> Self {
        Self { emus }
    }

    #[inline]
    pub fn from_inches(inches: f64) -> Self {
        Self::from_emus((inches * EMUS_PER_INCH as f64).round() as i64)
    }

    /// A length of `pt` points (1/72 inch), rounded to the nearest EMU.
    #[inline]
    pub fn from_pt(pt: f64) -> Self {
        Self::from_emus((pt * EMUS_PER_PT as f64).round() as i64)
    }

    #[inline]
    pub const fn emus(&self) -> i64 {
        self.emus
    }

    #[inline]
    pub fn inches(&self) -> f64 {
        self.emus as f64 / EMUS_PER_INCH as f64
    }

    #[inline]
    pub fn points(&self) -> f64 {
        self.emus as f64 / EMUS_PER_PT as f64
    }

    /// Split this length into `parts` pieces, the way a new table divides
    /// its frame among columns or rows. The last piece absorbs the remainder.
    pub fn split(&self, parts: usize) -> Vec<Length> {
        if parts == 0 {
            return Vec::new();
        }
        let each = self.emus / parts as i64;
        let mut pieces = vec![Length::from_emus(each); parts];
        if let Some(last) = pieces.last_mut() {
            last.emus += self.emus - each * parts as i64;
        }
        pieces
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}\"", self.inches())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_total() {
        let total = Length::from_emus(1000);
        let parts = total.split(3);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].emus(), 333);
        assert_eq!(parts[2].emus(), 334);
        assert_eq!(parts.iter().map(|l| l.emus()).sum::<i64>(), 1000);
        assert!(total.split(0).is_empty());
    }
}
