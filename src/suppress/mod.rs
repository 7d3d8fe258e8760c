//! Density-adaptive non-maximum suppression.
//!
//! The pipeline clusters heatmap activations into regions, counts box centers
//! per region, then runs greedy NMS where each candidate's IoU threshold is
//! `max(base_thresh, density)` of the region nearest to it. Without any
//! activation the pass is exactly fixed-threshold NMS at `base_thresh`.
//!
//! Density enters the threshold as a raw count. A region holding a single box
//! center already lifts the threshold to 1.0, which no IoU can exceed, so
//! boxes near any populated region are never suppressed. This reproduces the
//! reference behavior; a normalized density would likely be the intended
//! design.

mod fixed;
mod greedy;
mod threshold;
pub(crate) mod working_set;

pub use fixed::{batched_nms, nms};
pub use threshold::{adaptive_threshold, AdaptiveThreshold};
pub use working_set::WorkingSet;

use crate::cluster::{candidate_regions_from_points, KMeansConfig, Region};
use crate::density::estimate_densities;
use crate::geometry::BBox;
use crate::heatmap::{Activation, ActivationMap, ActivationPoint};
use crate::suppress::fixed::check_shape;
use crate::suppress::greedy::greedy_suppress;
use crate::suppress::threshold::thresholds_for;
use crate::trace::{trace_event, trace_span};
use crate::util::{DenseNmsError, DenseNmsResult};

/// Configuration for adaptive suppression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdaptiveNmsConfig {
    /// IoU threshold floor, used as-is where no region applies.
    pub base_thresh: f32,
    /// Requested number of activation clusters.
    pub n_clusters: usize,
    /// Clustering parameters.
    pub kmeans: KMeansConfig,
    /// Use rayon when the `rayon` feature is enabled; ignored otherwise.
    pub parallel: bool,
}

impl Default for AdaptiveNmsConfig {
    fn default() -> Self {
        Self {
            base_thresh: 0.5,
            n_clusters: 5,
            kmeans: KMeansConfig::default(),
            parallel: false,
        }
    }
}

impl AdaptiveNmsConfig {
    /// Checks cluster count and clustering parameters.
    ///
    /// `base_thresh` is deliberately unchecked and passed through.
    pub fn validate(&self) -> DenseNmsResult<()> {
        if self.n_clusters == 0 {
            return Err(DenseNmsError::InvalidCount {
                n_clusters: self.n_clusters,
            });
        }
        self.kmeans.validate()
    }
}

/// Output of one adaptive suppression pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Detections {
    /// Kept box indices in selection order.
    pub keep: Vec<usize>,
    /// Kept boxes, parallel to `keep`.
    pub boxes: Vec<BBox>,
    /// Kept scores, parallel to `keep`.
    pub scores: Vec<f32>,
    /// Regions with their densities, in cluster order.
    pub regions: Vec<Region>,
    /// Threshold decision for every input box, in input order.
    pub thresholds: Vec<AdaptiveThreshold>,
}

impl Detections {
    /// Number of kept boxes.
    pub fn len(&self) -> usize {
        self.keep.len()
    }

    /// Returns true when nothing was kept.
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty()
    }

    /// Iterates `(index, box, score)` in selection order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, BBox, f32)> + '_ {
        self.keep
            .iter()
            .zip(&self.boxes)
            .zip(&self.scores)
            .map(|((&idx, &bbox), &score)| (idx, bbox, score))
    }
}

/// Adaptive NMS runner holding a validated configuration.
#[derive(Clone, Debug, Default)]
pub struct AdaptiveNms {
    cfg: AdaptiveNmsConfig,
}

impl AdaptiveNms {
    /// Creates a runner with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: AdaptiveNmsConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &AdaptiveNmsConfig {
        &self.cfg
    }

    /// Runs suppression using the active pixels of `map`.
    pub fn run<T: Activation>(
        &self,
        boxes: &[BBox],
        scores: &[f32],
        map: ActivationMap<'_, T>,
    ) -> DenseNmsResult<Detections> {
        adaptive_nms(boxes, scores, map, &self.cfg)
    }

    /// Runs suppression using an explicit activation point list.
    pub fn run_points(
        &self,
        boxes: &[BBox],
        scores: &[f32],
        points: &[ActivationPoint],
    ) -> DenseNmsResult<Detections> {
        adaptive_nms_points(boxes, scores, points, &self.cfg)
    }
}

/// Density-adaptive NMS over an activation map.
pub fn adaptive_nms<T: Activation>(
    boxes: &[BBox],
    scores: &[f32],
    map: ActivationMap<'_, T>,
    cfg: &AdaptiveNmsConfig,
) -> DenseNmsResult<Detections> {
    check_shape(boxes, scores)?;
    cfg.validate()?;
    let points = map.active_points();
    adaptive_nms_points(boxes, scores, &points, cfg)
}

/// Density-adaptive NMS over an activation point list.
///
/// All validation happens before any clustering or suppression work.
pub fn adaptive_nms_points(
    boxes: &[BBox],
    scores: &[f32],
    points: &[ActivationPoint],
    cfg: &AdaptiveNmsConfig,
) -> DenseNmsResult<Detections> {
    check_shape(boxes, scores)?;
    cfg.validate()?;

    let _span = trace_span!(
        "adaptive_nms",
        boxes = boxes.len(),
        points = points.len(),
        n_clusters = cfg.n_clusters
    )
    .entered();

    let bounds = candidate_regions_from_points(points, cfg.n_clusters, &cfg.kmeans, cfg.parallel)?;
    let regions = estimate_densities(&bounds, boxes, cfg.parallel);
    let thresholds = thresholds_for(boxes, &regions, cfg.base_thresh, cfg.parallel);

    let keep = greedy_suppress(boxes, scores, cfg.parallel, |_, j, overlap| {
        overlap > thresholds[j].threshold
    });

    let kept_boxes = keep.iter().map(|&idx| boxes[idx]).collect();
    let kept_scores = keep.iter().map(|&idx| scores[idx]).collect();
    trace_event!(
        "suppression_done",
        kept = keep.len(),
        suppressed = boxes.len() - keep.len(),
        regions = regions.len()
    );

    Ok(Detections {
        keep,
        boxes: kept_boxes,
        scores: kept_scores,
        regions,
        thresholds,
    })
}

#[cfg(test)]
mod tests {
    use super::{adaptive_nms, adaptive_nms_points, AdaptiveNms, AdaptiveNmsConfig};
    use crate::geometry::BBox;
    use crate::heatmap::{ActivationMap, ActivationPoint};
    use crate::DenseNmsError;

    fn nested_pair() -> (Vec<BBox>, Vec<f32>) {
        (
            vec![BBox::new(0.0, 0.0, 10.0, 10.0), BBox::new(1.0, 1.0, 9.0, 9.0)],
            vec![0.9, 0.8],
        )
    }

    #[test]
    fn empty_map_falls_back_to_base_threshold() {
        let (boxes, scores) = nested_pair();
        let data = vec![0u8; 12 * 12];
        let map = ActivationMap::from_slice(&data, 12, 12).unwrap();
        let out = adaptive_nms(&boxes, &scores, map, &AdaptiveNmsConfig::default()).unwrap();
        assert_eq!(out.keep, vec![0]);
        assert_eq!(out.scores, vec![0.9]);
        assert!(out.regions.is_empty());
        assert!(out.thresholds.iter().all(|t| t.threshold == 0.5));
    }

    #[test]
    fn populated_region_disables_suppression() {
        let (boxes, scores) = nested_pair();
        let points = [ActivationPoint::new(4, 4), ActivationPoint::new(6, 6)];
        let cfg = AdaptiveNmsConfig {
            n_clusters: 1,
            ..AdaptiveNmsConfig::default()
        };
        let out = adaptive_nms_points(&boxes, &scores, &points, &cfg).unwrap();
        assert_eq!(out.keep, vec![0, 1]);
        assert_eq!(out.regions[0].density, 2);
        assert_eq!(out.thresholds[1].threshold, 2.0);
    }

    #[test]
    fn validation_precedes_work() {
        let (boxes, _) = nested_pair();
        let cfg = AdaptiveNmsConfig::default();
        assert_eq!(
            adaptive_nms_points(&boxes, &[0.5], &[], &cfg).err(),
            Some(DenseNmsError::InvalidShape {
                boxes: 2,
                scores: 1
            })
        );
        let bad = AdaptiveNmsConfig {
            n_clusters: 0,
            ..cfg
        };
        assert_eq!(
            AdaptiveNms::new()
                .with_config(bad)
                .run_points(&boxes, &[0.5, 0.4], &[])
                .err(),
            Some(DenseNmsError::InvalidCount { n_clusters: 0 })
        );
    }

    #[test]
    fn iter_pairs_indices_with_boxes() {
        let (boxes, scores) = nested_pair();
        let out = AdaptiveNms::new().run_points(&boxes, &scores, &[]).unwrap();
        let items: Vec<_> = out.iter().collect();
        assert_eq!(items, vec![(0, boxes[0], 0.9)]);
    }
}
