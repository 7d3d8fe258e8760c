//! Bounding regions of clustered activation points.

use crate::cluster::{kmeans, KMeansConfig};
use crate::geometry::mask::points_bbox;
use crate::geometry::BBox;
use crate::heatmap::{Activation, ActivationMap, ActivationPoint};
use crate::trace::{trace_event, trace_span};
use crate::util::DenseNmsResult;

/// Bounding rectangle of one activation cluster and its detection density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    /// Tight box around the cluster members, in pixel coordinates.
    pub bbox: BBox,
    /// Number of input box centers inside `bbox`.
    pub density: usize,
}

impl Region {
    /// Center of the region rectangle.
    pub fn center(&self) -> (f32, f32) {
        self.bbox.center()
    }
}

/// Clusters the active pixels of `map` into at most `k` region rectangles.
pub fn candidate_regions<T: Activation>(
    map: ActivationMap<'_, T>,
    k: usize,
    cfg: &KMeansConfig,
    parallel: bool,
) -> DenseNmsResult<Vec<BBox>> {
    let points = map.active_points();
    candidate_regions_from_points(&points, k, cfg, parallel)
}

/// Clusters an activation point list into at most `k` region rectangles.
///
/// Regions are ordered by cluster index. A cluster left without members
/// (possible only with duplicate points) produces no rectangle.
pub fn candidate_regions_from_points(
    points: &[ActivationPoint],
    k: usize,
    cfg: &KMeansConfig,
    parallel: bool,
) -> DenseNmsResult<Vec<BBox>> {
    let _span = trace_span!("candidate_regions", points = points.len(), k = k).entered();

    let coords: Vec<(f32, f32)> = points.iter().map(|p| p.as_f32()).collect();
    let clustering = kmeans(&coords, k, cfg, parallel)?;

    let mut members: Vec<Vec<ActivationPoint>> = vec![Vec::new(); clustering.len()];
    for (&point, &label) in points.iter().zip(&clustering.labels) {
        members[label].push(point);
    }
    let regions: Vec<BBox> = members
        .iter()
        .filter_map(|cluster| points_bbox(cluster))
        .collect();

    trace_event!("regions", count = regions.len());
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::{candidate_regions, candidate_regions_from_points};
    use crate::cluster::KMeansConfig;
    use crate::geometry::BBox;
    use crate::heatmap::{ActivationMap, ActivationPoint};

    #[test]
    fn two_points_with_five_clusters_give_two_regions() {
        let points = [ActivationPoint::new(2, 3), ActivationPoint::new(7, 1)];
        let regions =
            candidate_regions_from_points(&points, 5, &KMeansConfig::default(), false).unwrap();
        assert_eq!(
            regions,
            vec![BBox::new(2.0, 3.0, 2.0, 3.0), BBox::new(7.0, 1.0, 7.0, 1.0)]
        );
    }

    #[test]
    fn region_spans_cluster_members() {
        let mut data = vec![0u8; 12 * 12];
        for (x, y) in [(4, 4), (5, 4), (4, 6), (6, 5)] {
            data[y * 12 + x] = 1;
        }
        let map = ActivationMap::from_slice(&data, 12, 12).unwrap();
        let regions = candidate_regions(map, 1, &KMeansConfig::default(), false).unwrap();
        assert_eq!(regions, vec![BBox::new(4.0, 4.0, 6.0, 6.0)]);
    }

    #[test]
    fn empty_map_gives_no_regions() {
        let data = vec![0u8; 16];
        let map = ActivationMap::from_slice(&data, 4, 4).unwrap();
        let regions = candidate_regions(map, 3, &KMeansConfig::default(), false).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn duplicate_points_drop_empty_clusters() {
        let points = [ActivationPoint::new(1, 1); 3];
        let regions =
            candidate_regions_from_points(&points, 2, &KMeansConfig::default(), false).unwrap();
        assert_eq!(regions, vec![BBox::new(1.0, 1.0, 1.0, 1.0)]);
    }
}
