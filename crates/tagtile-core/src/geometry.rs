//! Coordinate helpers: clamping and polyline rasterization.

use crate::area::WorkingArea;
use crate::error::{Error, Result};
use crate::matrix::LabelMatrix;

/// Label written by [`stamp_curve`].
pub const CURVE_LABEL: i32 = 2;

/// Largest vertex magnitude accepted by [`rasterize_open_polyline`].
///
/// Keeps Bresenham's doubled error term inside `i64`.
pub const MAX_VERTEX_COORD: f64 = (1u64 << 52) as f64;

/// One integer grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    /// Row (y).
    pub row: i64,
    /// Column (x).
    pub col: i64,
}

impl Cell {
    /// Creates a cell.
    #[inline]
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

impl From<(i64, i64)> for Cell {
    fn from((row, col): (i64, i64)) -> Self {
        Self::new(row, col)
    }
}

/// Clamps a point into `[0, max_x] x [0, max_y]`.
///
/// The upper bounds are **inclusive**: `max_x` itself is a legal result.
/// The lower bound is applied before the upper one, so a negative maximum
/// wins over zero instead of panicking the way [`i64::clamp`] would.
///
/// ```rust
/// use tagtile_core::clamp_coords;
///
/// assert_eq!(clamp_coords(-5, -5, 100, 50), (0, 0));
/// assert_eq!(clamp_coords(500, 500, 100, 50), (100, 50));
/// assert_eq!(clamp_coords(42, 7, 100, 50), (42, 7));
/// ```
#[inline]
pub fn clamp_coords(x: i64, y: i64, max_x: i64, max_y: i64) -> (i64, i64) {
    let x = x.max(0);
    let y = y.max(0);
    (if x > max_x { max_x } else { x }, if y > max_y { max_y } else { y })
}

/// Cells on the segment `from -> to`, both endpoints included.
///
/// Standard Bresenham; cells come out in order from `from` to `to`.
fn line_cells(from: Cell, to: Cell, out: &mut Vec<Cell>) {
    let dc = (to.col - from.col).abs();
    let dr = -(to.row - from.row).abs();
    let sc = if from.col < to.col { 1 } else { -1 };
    let sr = if from.row < to.row { 1 } else { -1 };
    let mut err = dc + dr;

    let (mut r, mut c) = (from.row, from.col);
    loop {
        out.push(Cell::new(r, c));
        if r == to.row && c == to.col {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dr {
            err += dr;
            c += sc;
        }
        if e2 <= dc {
            err += dc;
            r += sr;
        }
    }
}

/// Rasterizes an open polyline into grid cells.
///
/// Vertices are `(rows[i], cols[i])`, rounded to the nearest integer with
/// ties to even. Each consecutive segment is rasterized and the results are
/// concatenated in vertex order. Shared vertices are not deduplicated (the
/// end of segment *i* and the start of segment *i+1* both appear) and the
/// last vertex is not joined back to the first.
///
/// Fewer than two vertices produce no cells.
///
/// # Errors
///
/// [`Error::LengthMismatch`] if `rows` and `cols` differ in length,
/// [`Error::InvalidVertex`] if a coordinate is non-finite or larger in
/// magnitude than [`MAX_VERTEX_COORD`].
///
/// # Example
///
/// ```rust
/// use tagtile_core::{rasterize_open_polyline, Cell};
///
/// let cells = rasterize_open_polyline(&[0.0, 0.0], &[0.0, 5.0]).unwrap();
/// assert_eq!(cells.len(), 6);
/// assert_eq!(cells[0], Cell::new(0, 0));
/// assert_eq!(cells[5], Cell::new(0, 5));
/// ```
pub fn rasterize_open_polyline(rows: &[f64], cols: &[f64]) -> Result<Vec<Cell>> {
    if rows.len() != cols.len() {
        return Err(Error::LengthMismatch {
            rows: rows.len(),
            cols: cols.len(),
        });
    }

    let in_range = |v: f64| v.is_finite() && v.abs() <= MAX_VERTEX_COORD;
    let vertices = rows
        .iter()
        .zip(cols)
        .enumerate()
        .map(|(index, (&row, &col))| {
            if in_range(row) && in_range(col) {
                Ok(Cell::new(row.round_ties_even() as i64, col.round_ties_even() as i64))
            } else {
                Err(Error::InvalidVertex { index, row, col })
            }
        })
        .collect::<Result<Vec<Cell>>>()?;

    let mut cells = Vec::new();
    for pair in vertices.windows(2) {
        line_cells(pair[0], pair[1], &mut cells);
    }
    Ok(cells)
}

/// Stamps curve points onto a copy of a label matrix.
///
/// `curve` holds global `(x, y)` points. Points that fall inside `bbox`
/// (`top, left, width, height` in global coordinates) are shifted into the
/// matrix frame and written as [`CURVE_LABEL`]; everything else is ignored.
/// Used to inspect a mask together with an edited contour.
pub fn stamp_curve(mask: &LabelMatrix, bbox: &WorkingArea, curve: &[(i64, i64)]) -> LabelMatrix {
    let [top, left, width, height] = bbox.truncated();
    let mut out = mask.clone();
    for &(x, y) in curve {
        let xx = x - left;
        let yy = y - top;
        if xx >= 0 && yy >= 0 && xx < width && yy < height {
            if let (Ok(cx), Ok(cy)) = (u32::try_from(xx), u32::try_from(yy)) {
                out.set(cx, cy, CURVE_LABEL);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[(i64, i64)]) -> Vec<Cell> {
        v.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn clamp_inclusive_bounds() {
        assert_eq!(clamp_coords(100, 50, 100, 50), (100, 50));
        assert_eq!(clamp_coords(101, 51, 100, 50), (100, 50));
        assert_eq!(clamp_coords(-1, 10, 100, 50), (0, 10));
    }

    #[test]
    fn clamp_negative_max_does_not_panic() {
        assert_eq!(clamp_coords(5, 5, -3, -4), (-3, -4));
    }

    #[test]
    fn vertical_and_diagonal_segments() {
        let v = rasterize_open_polyline(&[0.0, 3.0], &[2.0, 2.0]).unwrap();
        assert_eq!(v, cells(&[(0, 2), (1, 2), (2, 2), (3, 2)]));

        let d = rasterize_open_polyline(&[2.0, 0.0], &[2.0, 0.0]).unwrap();
        assert_eq!(d, cells(&[(2, 2), (1, 1), (0, 0)]));
    }

    #[test]
    fn shallow_segment_is_connected() {
        let s = rasterize_open_polyline(&[0.0, 2.0], &[0.0, 5.0]).unwrap();
        assert_eq!(s.len(), 6);
        assert_eq!(s.first(), Some(&Cell::new(0, 0)));
        assert_eq!(s.last(), Some(&Cell::new(2, 5)));
        for w in s.windows(2) {
            assert_eq!(w[1].col - w[0].col, 1);
            assert!((w[1].row - w[0].row).abs() <= 1);
        }
    }

    #[test]
    fn shared_vertices_repeat_and_path_stays_open() {
        let p = rasterize_open_polyline(&[0.0, 0.0, 2.0], &[0.0, 2.0, 2.0]).unwrap();
        assert_eq!(
            p,
            cells(&[(0, 0), (0, 1), (0, 2), (0, 2), (1, 2), (2, 2)])
        );
    }

    #[test]
    fn rounding_is_ties_to_even() {
        let p = rasterize_open_polyline(&[0.5, 2.5], &[1.4, 1.6]).unwrap();
        assert_eq!(p.first(), Some(&Cell::new(0, 1)));
        assert_eq!(p.last(), Some(&Cell::new(2, 2)));
    }

    #[test]
    fn degenerate_inputs() {
        assert!(rasterize_open_polyline(&[], &[]).unwrap().is_empty());
        assert!(rasterize_open_polyline(&[1.0], &[1.0]).unwrap().is_empty());
        assert_eq!(
            rasterize_open_polyline(&[1.0, 2.0], &[1.0]),
            Err(Error::LengthMismatch { rows: 2, cols: 1 })
        );
        let point = rasterize_open_polyline(&[3.0, 3.0], &[4.0, 4.0]).unwrap();
        assert_eq!(point, cells(&[(3, 4)]));
    }

    #[test]
    fn non_finite_and_huge_vertices_are_errors() {
        assert!(matches!(
            rasterize_open_polyline(&[0.0, 0.0], &[f64::MIN, f64::MAX]),
            Err(Error::InvalidVertex { index: 0, .. })
        ));
        assert!(matches!(
            rasterize_open_polyline(&[0.0, f64::INFINITY], &[0.0, 1.0]),
            Err(Error::InvalidVertex { index: 1, .. })
        ));
        assert!(matches!(
            rasterize_open_polyline(&[0.0, 1.0, f64::NAN], &[0.0, 1.0, 2.0]),
            Err(Error::InvalidVertex { index: 2, .. })
        ));
        assert!(matches!(
            rasterize_open_polyline(&[0.0], &[f64::NEG_INFINITY]),
            Err(Error::InvalidVertex { index: 0, .. })
        ));
    }

    #[test]
    fn large_finite_vertices_rasterize() {
        let far = MAX_VERTEX_COORD;
        let cells = rasterize_open_polyline(&[far, far], &[-far, -far + 2.0]).unwrap();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0], Cell::new(far as i64, -(far as i64)));
    }

    #[test]
    fn stamp_curve_inside_bbox_only() {
        let mask = LabelMatrix::filled(3, 3, 1);
        let bbox = WorkingArea::new(10.0, 20.0, 3.0, 3.0);
        let out = stamp_curve(&mask, &bbox, &[(20, 10), (22, 12), (23, 10), (19, 11)]);
        assert_eq!(out.get(0, 0), Some(CURVE_LABEL));
        assert_eq!(out.get(2, 2), Some(CURVE_LABEL));
        assert_eq!(out.data().iter().filter(|&&v| v == CURVE_LABEL).count(), 2);
        assert_eq!(mask.get(0, 0), Some(1));
    }
}
