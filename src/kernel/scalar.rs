//! Scalar IoU row kernel.

use crate::geometry::{iou, BBox};
use crate::kernel::IouKernel;

/// Reference kernel calling [`iou`] per candidate.
pub struct IouScalar;

impl IouKernel for IouScalar {
    fn iou_row(anchor: &BBox, boxes: &[BBox], candidates: &[usize], out: &mut [f32]) {
        for (slot, &idx) in out.iter_mut().zip(candidates) {
            *slot = iou(anchor, &boxes[idx]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IouScalar;
    use crate::geometry::BBox;
    use crate::kernel::IouKernel;

    #[test]
    fn row_follows_candidate_order() {
        let boxes = [
            BBox::new(0.0, 0.0, 10.0, 10.0),
            BBox::new(1.0, 1.0, 9.0, 9.0),
            BBox::new(50.0, 50.0, 60.0, 60.0),
        ];
        let mut out = [f32::NAN; 2];
        IouScalar::iou_row(&boxes[0], &boxes, &[2, 1], &mut out);
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 0.64).abs() < 1e-6);
    }
}
