//! SIMD IoU row kernel using the `wide` crate.
//!
//! Candidates are gathered eight at a time into `f32x8` lanes; the tail is
//! handled by the scalar kernel. Lane arithmetic follows the scalar operation
//! order so results match bit for bit.

use crate::geometry::BBox;
use crate::kernel::scalar::IouScalar;
use crate::kernel::IouKernel;
use wide::f32x8;

const LANES: usize = 8;

/// Gathered coordinates of eight candidate boxes.
struct Lanes {
    x1: f32x8,
    y1: f32x8,
    x2: f32x8,
    y2: f32x8,
}

#[inline]
fn gather(boxes: &[BBox], idx: &[usize]) -> Lanes {
    let mut x1 = [0.0f32; LANES];
    let mut y1 = [0.0f32; LANES];
    let mut x2 = [0.0f32; LANES];
    let mut y2 = [0.0f32; LANES];
    for lane in 0..LANES {
        let b = &boxes[idx[lane]];
        x1[lane] = b.x1;
        y1[lane] = b.y1;
        x2[lane] = b.x2;
        y2[lane] = b.y2;
    }
    Lanes {
        x1: f32x8::from(x1),
        y1: f32x8::from(y1),
        x2: f32x8::from(x2),
        y2: f32x8::from(y2),
    }
}

/// SIMD-accelerated IoU row kernel.
pub struct IouSimd;

impl IouKernel for IouSimd {
    fn iou_row(anchor: &BBox, boxes: &[BBox], candidates: &[usize], out: &mut [f32]) {
        let zero = f32x8::ZERO;
        let ax1 = f32x8::splat(anchor.x1);
        let ay1 = f32x8::splat(anchor.y1);
        let ax2 = f32x8::splat(anchor.x2);
        let ay2 = f32x8::splat(anchor.y2);
        let area_a = f32x8::splat(anchor.area());

        let simd_end = candidates.len() / LANES * LANES;
        let mut start = 0;
        while start < simd_end {
            let b = gather(boxes, &candidates[start..start + LANES]);

            let iw = (ax2.min(b.x2) - ax1.max(b.x1)).max(zero);
            let ih = (ay2.min(b.y2) - ay1.max(b.y1)).max(zero);
            let inter = iw * ih;
            let area_b = (b.x2 - b.x1).max(zero) * (b.y2 - b.y1).max(zero);
            let union = area_a + area_b - inter;
            let ratio = (inter / union).to_array();
            let union = union.to_array();

            for lane in 0..LANES {
                out[start + lane] = if union[lane] <= 0.0 { 0.0 } else { ratio[lane] };
            }
            start += LANES;
        }

        // Scalar remainder
        IouScalar::iou_row(anchor, boxes, &candidates[simd_end..], &mut out[simd_end..]);
    }
}
