//! Axis-aligned box geometry.
//!
//! Boxes use corner format `(x1, y1, x2, y2)` in `f32` pixel coordinates with
//! `x1 <= x2` and `y1 <= y2`. Degenerate boxes are allowed and have zero area.
//! Every IoU helper maps a non-positive union to `0.0` instead of dividing.

pub(crate) mod mask;

pub use mask::mask_to_box;

/// Axis-aligned bounding box in corner format.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BBox {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl BBox {
    /// Creates a box from corner coordinates.
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Creates a box from the top-left corner and size.
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Creates a box from its center and size.
    pub fn from_cxcywh(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        let hw = 0.5 * width;
        let hh = 0.5 * height;
        Self::new(cx - hw, cy - hh, cx + hw, cy + hh)
    }

    /// Creates a box from a `[x1, y1, x2, y2]` array.
    pub fn from_array(coords: [f32; 4]) -> Self {
        Self::new(coords[0], coords[1], coords[2], coords[3])
    }

    /// Returns `[x1, y1, x2, y2]`.
    pub fn to_array(self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Returns `[x, y, width, height]`.
    pub fn to_xywh(self) -> [f32; 4] {
        [self.x1, self.y1, self.width(), self.height()]
    }

    /// Returns `[cx, cy, width, height]`.
    pub fn to_cxcywh(self) -> [f32; 4] {
        let (cx, cy) = self.center();
        [cx, cy, self.width(), self.height()]
    }

    /// Width, clamped at zero.
    #[inline]
    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    /// Height, clamped at zero.
    #[inline]
    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    /// Area; zero for degenerate boxes.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Center point `(cx, cy)`.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (0.5 * (self.x1 + self.x2), 0.5 * (self.y1 + self.y2))
    }

    /// Returns true when the corners are ordered and finite.
    pub fn is_valid(&self) -> bool {
        self.x1.is_finite()
            && self.y1.is_finite()
            && self.x2.is_finite()
            && self.y2.is_finite()
            && self.x1 <= self.x2
            && self.y1 <= self.y2
    }

    /// Closed-rectangle containment test (edges count as inside).
    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }

    /// Area of the overlap with `other`.
    #[inline]
    pub fn intersection_area(&self, other: &BBox) -> f32 {
        let w = (self.x2.min(other.x2) - self.x1.max(other.x1)).max(0.0);
        let h = (self.y2.min(other.y2) - self.y1.max(other.y1)).max(0.0);
        w * h
    }

    /// Clips the box to `[0, width] x [0, height]`.
    pub fn clip(&self, width: f32, height: f32) -> BBox {
        BBox::new(
            self.x1.clamp(0.0, width),
            self.y1.clamp(0.0, height),
            self.x2.clamp(0.0, width),
            self.y2.clamp(0.0, height),
        )
    }
}

impl From<[f32; 4]> for BBox {
    fn from(coords: [f32; 4]) -> Self {
        Self::from_array(coords)
    }
}

/// Intersection over union of two boxes, in `[0, 1]`.
///
/// A union area of zero or less (two degenerate boxes) yields `0.0`.
#[inline]
pub fn iou(a: &BBox, b: &BBox) -> f32 {
    let inter = a.intersection_area(b);
    let union = a.area() + b.area() - inter;
    if union <= 0.0 {
        0.0
    } else {
        inter / union
    }
}

/// Pairwise IoU matrix, row-major with `a.len()` rows and `b.len()` columns.
pub fn box_iou(a: &[BBox], b: &[BBox]) -> Vec<f32> {
    let mut out = Vec::with_capacity(a.len() * b.len());
    for box_a in a {
        for box_b in b {
            out.push(iou(box_a, box_b));
        }
    }
    out
}

/// Parses a flat `[x1, y1, x2, y2, ...]` buffer into boxes.
pub fn boxes_from_flat(coords: &[f32]) -> crate::DenseNmsResult<Vec<BBox>> {
    if coords.len() % 4 != 0 {
        return Err(crate::DenseNmsError::InvalidBoxesShape { len: coords.len() });
    }
    Ok(coords
        .chunks_exact(4)
        .map(|c| BBox::new(c[0], c[1], c[2], c[3]))
        .collect())
}
