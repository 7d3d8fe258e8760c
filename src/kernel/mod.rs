//! IoU row kernels used by the suppression loop.
//!
//! A row kernel evaluates the IoU of one anchor box against a list of
//! candidate indices. The scalar kernel is the reference; the `simd` feature
//! adds an `f32x8` kernel producing identical values.

use crate::geometry::BBox;

/// Kernel trait for one-against-many IoU evaluation.
pub trait IouKernel {
    /// Writes `iou(anchor, boxes[candidates[n]])` into `out[n]`.
    ///
    /// `out` must be at least as long as `candidates`.
    fn iou_row(anchor: &BBox, boxes: &[BBox], candidates: &[usize], out: &mut [f32]);
}

pub mod scalar;

#[cfg(feature = "simd")]
pub mod simd;
