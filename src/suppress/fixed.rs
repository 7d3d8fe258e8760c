//! Fixed-threshold and class-aware NMS.

use crate::geometry::BBox;
use crate::suppress::greedy::greedy_suppress;
use crate::util::{DenseNmsError, DenseNmsResult};

/// Classic NMS with one global IoU threshold.
///
/// Returns kept indices in descending score order. A box is suppressed when
/// its IoU with an already kept box is strictly greater than `iou_threshold`.
pub fn nms(boxes: &[BBox], scores: &[f32], iou_threshold: f32) -> DenseNmsResult<Vec<usize>> {
    check_shape(boxes, scores)?;
    Ok(greedy_suppress(boxes, scores, false, |_, _, overlap| {
        overlap > iou_threshold
    }))
}

/// NMS applied independently per class label.
///
/// Boxes with different labels never suppress each other; the kept indices of
/// all classes are returned together in descending score order.
pub fn batched_nms(
    boxes: &[BBox],
    scores: &[f32],
    labels: &[usize],
    iou_threshold: f32,
) -> DenseNmsResult<Vec<usize>> {
    check_shape(boxes, scores)?;
    if labels.len() != boxes.len() {
        return Err(DenseNmsError::InvalidLabels {
            boxes: boxes.len(),
            labels: labels.len(),
        });
    }
    Ok(greedy_suppress(boxes, scores, false, |i, j, overlap| {
        labels[i] == labels[j] && overlap > iou_threshold
    }))
}

pub(crate) fn check_shape(boxes: &[BBox], scores: &[f32]) -> DenseNmsResult<()> {
    if boxes.len() != scores.len() {
        return Err(DenseNmsError::InvalidShape {
            boxes: boxes.len(),
            scores: scores.len(),
        });
    }
    Ok(())
}
