//! Single-channel row-major grids.
//!
//! One generic container backs every single-channel input of the
//! conversion module:
//!
//! | Alias           | Cell   | Meaning |
//! |-----------------|--------|---------|
//! | [`Mask`]        | `bool` | Binary mask, scaled x255 for display |
//! | [`GrayImage`]   | `u8`   | 8-bit intensities, shown as-is |
//! | [`LabelMatrix`] | `i32`  | Class / segment ids, 0 = background |
//! | [`ScalarField`] | `f32`  | Elevation, confidence, ... with optional no-data |

use crate::error::{Error, Result};

/// Row-major `height x width` grid of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

/// Binary mask.
pub type Mask = Matrix<bool>;
/// 8-bit grayscale image.
pub type GrayImage = Matrix<u8>;
/// Integer label map.
pub type LabelMatrix = Matrix<i32>;
/// Floating-point scalar field.
pub type ScalarField = Matrix<f32>;

impl<T> Matrix<T> {
    /// Wraps existing row-major data.
    ///
    /// Fails with [`Error::DataLength`] if `data.len() != width * height`.
    pub fn new(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DataLength {
                width,
                height,
                channels: 1,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a matrix by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the matrix has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw row-major cells.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major cells.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consumes the matrix, returning its cells.
    #[inline]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// One row of cells.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// Mutable reference to the cell at (x, y), `None` outside the grid.
    #[inline]
    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut T> {
        let idx = self.index(x, y)?;
        self.data.get_mut(idx)
    }
}

impl<T: Copy> Matrix<T> {
    /// Matrix with every cell set to `value`.
    pub fn filled(width: u32, height: u32, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Cell at (x, y), `None` outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Sets the cell at (x, y). Returns `false` if outside the grid.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: T) -> bool {
        match self.get_mut(x, y) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }
}
