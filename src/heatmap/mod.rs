//! Activation maps and activation point extraction.
//!
//! `ActivationMap` is a borrowed 2D view into a 1D buffer with an explicit
//! stride, counted in elements between row starts. A stride larger than the
//! width represents padded rows; padding is never scanned. The element type
//! decides which pixels count as activations through the [`Activation`] trait.

use crate::util::{DenseNmsError, DenseNmsResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Pixel types that can mark a positive activation.
pub trait Activation: Copy {
    /// Returns true when the pixel is an activation.
    fn is_active(&self) -> bool;
}

impl Activation for bool {
    #[inline]
    fn is_active(&self) -> bool {
        *self
    }
}

impl Activation for u8 {
    #[inline]
    fn is_active(&self) -> bool {
        *self != 0
    }
}

impl Activation for f32 {
    #[inline]
    fn is_active(&self) -> bool {
        *self > 0.0
    }
}

/// Integer pixel coordinate of a positive activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActivationPoint {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl ActivationPoint {
    /// Creates a point at column `x`, row `y`.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub(crate) fn as_f32(self) -> (f32, f32) {
        (self.x as f32, self.y as f32)
    }
}

/// Borrowed 2D activation grid with an explicit stride.
#[derive(Copy, Clone)]
pub struct ActivationMap<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T: Activation> ActivationMap<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> DenseNmsResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> DenseNmsResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(DenseNmsError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the map width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the map height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns row `y` without its padding.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Returns every active pixel in row-major order.
    pub fn active_points(&self) -> Vec<ActivationPoint> {
        let mut points = Vec::new();
        for y in 0..self.height {
            let Some(row) = self.row(y) else { break };
            for (x, value) in row.iter().enumerate() {
                if value.is_active() {
                    points.push(ActivationPoint::new(x, y));
                }
            }
        }
        points
    }

    /// Counts active pixels without materializing them.
    pub fn count_active(&self) -> usize {
        (0..self.height)
            .filter_map(|y| self.row(y))
            .map(|row| row.iter().filter(|v| v.is_active()).count())
            .sum()
    }
}

/// Owned contiguous activation mask with values `0` or `1`.
#[derive(Clone, Debug)]
pub struct OwnedActivationMap {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedActivationMap {
    /// Wraps a contiguous mask buffer of exactly `width * height` elements.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> DenseNmsResult<Self> {
        let needed = required_len(width, height, width)?;
        if data.len() < needed {
            return Err(DenseNmsError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(DenseNmsError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a 0/1 mask from intensities, marking pixels `>= threshold`.
    pub fn from_threshold(
        intensities: &[u8],
        width: usize,
        height: usize,
        threshold: u8,
    ) -> DenseNmsResult<Self> {
        let data = intensities
            .iter()
            .map(|&v| u8::from(v >= threshold))
            .collect();
        Self::new(data, width, height)
    }

    /// Returns a borrowed view of the mask.
    pub fn view(&self) -> ActivationMap<'_, u8> {
        ActivationMap {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the mask width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the mask height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the raw mask buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> DenseNmsResult<usize> {
    if width == 0 || height == 0 {
        return Err(DenseNmsError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(DenseNmsError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(DenseNmsError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::{ActivationMap, ActivationPoint, OwnedActivationMap};

    #[test]
    fn active_points_skip_row_padding() {
        // 3x2 map with stride 4; the padding column is set but must be ignored.
        let data = [0u8, 1, 0, 9, 1, 0, 0, 9];
        let map = ActivationMap::new(&data, 3, 2, 4).unwrap();
        assert_eq!(
            map.active_points(),
            vec![ActivationPoint::new(1, 0), ActivationPoint::new(0, 1)]
        );
        assert_eq!(map.count_active(), 2);
    }

    #[test]
    fn float_and_bool_maps_use_positive_values() {
        let floats = [0.0f32, -1.0, 0.25, 0.0];
        let map = ActivationMap::from_slice(&floats, 2, 2).unwrap();
        assert_eq!(map.active_points(), vec![ActivationPoint::new(0, 1)]);

        let bools = [true, false, false, true];
        let map = ActivationMap::from_slice(&bools, 2, 2).unwrap();
        assert_eq!(map.count_active(), 2);
    }

    #[test]
    fn threshold_builds_binary_mask() {
        let owned = OwnedActivationMap::from_threshold(&[0, 127, 128, 255], 2, 2, 128).unwrap();
        assert_eq!(owned.data(), &[0, 0, 1, 1]);
        assert_eq!(owned.view().count_active(), 2);
    }
}
