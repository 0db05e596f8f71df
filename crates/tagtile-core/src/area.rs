//! Working-area rectangle: the region of interest chosen for an export.
//!
//! Unlike [`Rect`], the working area keeps the `top, left, width, height`
//! field order users see in the settings dialog and stores the values as
//! `f64`, since they usually come from a zoomed canvas selection.
//!
//! # Text Format
//!
//! The editable form is `"top,left,width,height"` with every field truncated
//! toward zero. Saved configurations rely on this exact format:
//!
//! ```rust
//! use tagtile_core::WorkingArea;
//!
//! let area = WorkingArea::new(10.7, 2.2, 300.9, 150.1);
//! assert_eq!(area.to_string(), "10,2,300,150");
//!
//! let parsed: WorkingArea = "10,2,300,150".parse().unwrap();
//! assert_eq!(parsed.to_string(), "10,2,300,150");
//! ```
//!
//! Parsing accepts integers only. Text such as `"10.5,2,3,4"` is rejected
//! rather than rounded, so formatting and parsing never disagree.

use std::str::FromStr;

use crate::error::ParseError;
use crate::rect::Rect;

/// Number of comma separated fields in the text form.
const FIELD_COUNT: usize = 4;

/// Region of interest in `top, left, width, height` order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkingArea {
    /// Top row.
    pub top: f64,
    /// Left column.
    pub left: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl WorkingArea {
    /// Creates a working area from its four fields.
    #[inline]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Working area covering a whole `width x height` image.
    #[inline]
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    /// Fields truncated toward zero, in `[top, left, width, height]` order.
    ///
    /// Non-finite values saturate (`NaN` becomes 0).
    #[inline]
    pub fn truncated(&self) -> [i64; 4] {
        [
            self.top as i64,
            self.left as i64,
            self.width as i64,
            self.height as i64,
        ]
    }

    /// Converts to an integer [`Rect`].
    ///
    /// Returns `None` when a truncated field is negative or does not fit
    /// in `u32`.
    pub fn to_rect(&self) -> Option<Rect> {
        let [top, left, width, height] = self.truncated();
        let y = u32::try_from(top).ok()?;
        let x = u32::try_from(left).ok()?;
        let w = u32::try_from(width).ok()?;
        let h = u32::try_from(height).ok()?;
        Some(Rect::new(x, y, w, h))
    }
}

impl From<Rect> for WorkingArea {
    fn from(rect: Rect) -> Self {
        Self::new(
            rect.y as f64,
            rect.x as f64,
            rect.width as f64,
            rect.height as f64,
        )
    }
}

impl std::fmt::Display for WorkingArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [top, left, width, height] = self.truncated();
        write!(f, "{top},{left},{width},{height}")
    }
}

impl FromStr for WorkingArea {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if fields.len() != FIELD_COUNT {
            return Err(ParseError::FieldCount {
                expected: FIELD_COUNT,
                got: fields.len(),
            });
        }

        let mut values = [0.0f64; FIELD_COUNT];
        for (slot, field) in values.iter_mut().zip(&fields) {
            let v: i64 = field
                .parse()
                .map_err(|_| ParseError::NotAnInteger((*field).to_string()))?;
            *slot = v as f64;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_truncates_toward_zero() {
        assert_eq!(
            WorkingArea::new(10.7, 2.2, 300.9, 150.1).to_string(),
            "10,2,300,150"
        );
        assert_eq!(WorkingArea::new(-0.9, -1.5, 0.0, 1.0).to_string(), "0,-1,0,1");
    }

    #[test]
    fn parse_accepts_spaces() {
        let a: WorkingArea = " 1, 2 ,3,4 ".parse().unwrap();
        assert_eq!(a, WorkingArea::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn parse_rejects_non_integers() {
        assert_eq!(
            "1.5,2,3,4".parse::<WorkingArea>(),
            Err(ParseError::NotAnInteger("1.5".into()))
        );
        assert_eq!(
            "1,2,3".parse::<WorkingArea>(),
            Err(ParseError::FieldCount { expected: 4, got: 3 })
        );
        assert_eq!("   ".parse::<WorkingArea>(), Err(ParseError::Empty));
    }

    #[test]
    fn to_rect_swaps_field_order() {
        let rect = WorkingArea::new(10.0, 20.0, 30.0, 40.0).to_rect().unwrap();
        assert_eq!(rect, Rect::new(20, 10, 30, 40));
        assert_eq!(WorkingArea::from(rect), WorkingArea::new(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn to_rect_rejects_negative() {
        assert!(WorkingArea::new(-1.0, 0.0, 5.0, 5.0).to_rect().is_none());
        assert!(WorkingArea::new(-0.5, 0.0, 5.0, 5.0).to_rect().is_some());
    }
}
