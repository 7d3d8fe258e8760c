//! Shared greedy selection loop.

use crate::geometry::BBox;
use crate::kernel::IouKernel;
use crate::suppress::working_set::WorkingSet;
use crate::trace::trace_step;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(not(feature = "simd"))]
use crate::kernel::scalar::IouScalar as IouRow;
#[cfg(feature = "simd")]
use crate::kernel::simd::IouSimd as IouRow;

#[cfg(feature = "rayon")]
const PAR_CHUNK: usize = 256;

/// Runs greedy selection and returns kept indices in selection order.
///
/// Each step takes the best live index `i`, evaluates the IoU against every
/// other live index `j`, and only then tombstones each `j` for which
/// `exceeds(i, j, iou)` holds.
pub(crate) fn greedy_suppress<F>(
    boxes: &[BBox],
    scores: &[f32],
    parallel: bool,
    exceeds: F,
) -> Vec<usize>
where
    F: Fn(usize, usize, f32) -> bool,
{
    let mut set = WorkingSet::by_descending_score(scores);
    let mut keep = Vec::new();
    let mut live = Vec::with_capacity(boxes.len());
    let mut ious = Vec::with_capacity(boxes.len());

    while let Some(i) = set.pop_best() {
        keep.push(i);
        set.live_into(&mut live);
        if live.is_empty() {
            break;
        }

        iou_step(&boxes[i], boxes, &live, &mut ious, parallel);
        let mut suppressed = 0usize;
        for (&j, &overlap) in live.iter().zip(&ious) {
            if exceeds(i, j, overlap) && set.suppress(j) {
                suppressed += 1;
            }
        }
        trace_step!("suppression_step", anchor = i, suppressed = suppressed, live = set.len());
    }

    keep
}

fn iou_step(anchor: &BBox, boxes: &[BBox], live: &[usize], ious: &mut Vec<f32>, parallel: bool) {
    ious.clear();
    ious.resize(live.len(), 0.0);
    #[cfg(feature = "rayon")]
    {
        if parallel {
            iou_step_par(anchor, boxes, live, ious);
            return;
        }
    }
    let _ = parallel;
    IouRow::iou_row(anchor, boxes, live, ious);
}

/// Chunk-parallel IoU evaluation for one step (rayon).
#[cfg(feature = "rayon")]
fn iou_step_par(anchor: &BBox, boxes: &[BBox], live: &[usize], ious: &mut [f32]) {
    ious.par_chunks_mut(PAR_CHUNK)
        .zip(live.par_chunks(PAR_CHUNK))
        .for_each(|(out, idx)| IouRow::iou_row(anchor, boxes, idx, out));
}
