//! End-to-end suppression scenarios on small hand-built inputs.

use densenms::lowlevel::candidate_regions;
use densenms::{
    adaptive_nms, ActivationMap, ActivationPoint, AdaptiveNms, AdaptiveNmsConfig, BBox,
    KMeansConfig,
};

const MAP_SIZE: usize = 40;

fn nested_pair() -> (Vec<BBox>, Vec<f32>) {
    (
        vec![BBox::new(0.0, 0.0, 10.0, 10.0), BBox::new(1.0, 1.0, 9.0, 9.0)],
        vec![0.9, 0.8],
    )
}

fn heatmap(points: &[(usize, usize)]) -> Vec<u8> {
    let mut data = vec![0u8; MAP_SIZE * MAP_SIZE];
    for &(x, y) in points {
        data[y * MAP_SIZE + x] = 1;
    }
    data
}

fn blob(cx: usize, cy: usize) -> Vec<(usize, usize)> {
    let mut points = Vec::new();
    for y in cy - 1..=cy + 1 {
        for x in cx - 1..=cx + 1 {
            points.push((x, y));
        }
    }
    points
}

#[test]
fn overlapping_pair_without_activations_keeps_best() {
    let (boxes, scores) = nested_pair();
    let data = heatmap(&[]);
    let map = ActivationMap::from_slice(&data, MAP_SIZE, MAP_SIZE).unwrap();
    let cfg = AdaptiveNmsConfig {
        base_thresh: 0.5,
        ..AdaptiveNmsConfig::default()
    };

    let out = adaptive_nms(&boxes, &scores, map, &cfg).unwrap();
    assert_eq!(out.keep, vec![0]);
    assert_eq!(out.scores, vec![0.9]);
    assert_eq!(out.boxes, vec![boxes[0]]);
}

#[test]
fn overlapping_pair_in_dense_region_keeps_both() {
    let (boxes, scores) = nested_pair();
    let data = heatmap(&blob(5, 5));
    let map = ActivationMap::from_slice(&data, MAP_SIZE, MAP_SIZE).unwrap();
    let cfg = AdaptiveNmsConfig {
        base_thresh: 0.5,
        n_clusters: 1,
        ..AdaptiveNmsConfig::default()
    };

    let out = adaptive_nms(&boxes, &scores, map, &cfg).unwrap();
    assert_eq!(out.keep, vec![0, 1]);
    assert_eq!(out.scores, vec![0.9, 0.8]);
    assert_eq!(out.regions.len(), 1);
    assert_eq!(out.regions[0].bbox, BBox::new(4.0, 4.0, 6.0, 6.0));
    assert_eq!(out.regions[0].density, 2);
}

#[test]
fn dense_region_wins_over_distant_empty_region() {
    let (boxes, scores) = nested_pair();
    let mut points = blob(5, 5);
    points.extend(blob(31, 31));
    let data = heatmap(&points);
    let map = ActivationMap::from_slice(&data, MAP_SIZE, MAP_SIZE).unwrap();
    let cfg = AdaptiveNmsConfig {
        n_clusters: 2,
        ..AdaptiveNmsConfig::default()
    };

    let out = adaptive_nms(&boxes, &scores, map, &cfg).unwrap();
    assert_eq!(out.keep, vec![0, 1]);
    let densities: Vec<usize> = out.regions.iter().map(|r| r.density).collect();
    assert_eq!(densities, vec![2, 0]);
    assert!(out.thresholds.iter().all(|t| t.region == Some(0)));
}

#[test]
fn sparse_region_keeps_base_threshold() {
    // The only region sits far from both box centers and holds none of them.
    let (boxes, scores) = nested_pair();
    let data = heatmap(&blob(31, 31));
    let map = ActivationMap::from_slice(&data, MAP_SIZE, MAP_SIZE).unwrap();
    let out = adaptive_nms(&boxes, &scores, map, &AdaptiveNmsConfig::default()).unwrap();
    assert_eq!(out.keep, vec![0]);
    assert_eq!(out.regions.iter().map(|r| r.density).sum::<usize>(), 0);
}

#[test]
fn more_clusters_than_points_clamps() {
    let data = heatmap(&[(3, 3), (20, 25)]);
    let map = ActivationMap::from_slice(&data, MAP_SIZE, MAP_SIZE).unwrap();
    let regions = candidate_regions(map, 5, &KMeansConfig::default(), false).unwrap();
    assert_eq!(
        regions,
        vec![BBox::new(3.0, 3.0, 3.0, 3.0), BBox::new(20.0, 25.0, 20.0, 25.0)]
    );

    let (boxes, scores) = nested_pair();
    let cfg = AdaptiveNmsConfig {
        n_clusters: 5,
        ..AdaptiveNmsConfig::default()
    };
    let out = adaptive_nms(&boxes, &scores, map, &cfg).unwrap();
    assert_eq!(out.regions.len(), 2);
}

#[test]
fn single_box_is_always_kept() {
    let boxes = [BBox::new(2.0, 2.0, 8.0, 8.0)];
    let scores = [0.1];
    let full = vec![1u8; MAP_SIZE * MAP_SIZE];
    let empty = heatmap(&[]);
    for data in [&full, &empty] {
        let map = ActivationMap::from_slice(data, MAP_SIZE, MAP_SIZE).unwrap();
        let out = AdaptiveNms::new().run(&boxes, &scores, map).unwrap();
        assert_eq!(out.keep, vec![0]);
        assert_eq!(out.scores, vec![0.1]);
    }
}

#[test]
fn disjoint_boxes_are_never_suppressed() {
    let boxes = [BBox::new(0.0, 0.0, 5.0, 5.0), BBox::new(5.0, 5.0, 9.0, 9.0)];
    let scores = [0.3, 0.6];
    for base_thresh in [0.0, 0.5, 1.0] {
        let cfg = AdaptiveNmsConfig {
            base_thresh,
            ..AdaptiveNmsConfig::default()
        };
        let out = AdaptiveNms::new()
            .with_config(cfg)
            .run_points(&boxes, &scores, &[])
            .unwrap();
        assert_eq!(out.keep, vec![1, 0]);

        let dense = [(2, 2), (7, 7)].map(|(x, y)| ActivationPoint::new(x, y));
        let out = AdaptiveNms::new()
            .with_config(cfg)
            .run_points(&boxes, &scores, &dense)
            .unwrap();
        assert_eq!(out.keep, vec![1, 0]);
    }
}

#[test]
fn empty_input_gives_empty_output() {
    let data = heatmap(&blob(10, 10));
    let map = ActivationMap::from_slice(&data, MAP_SIZE, MAP_SIZE).unwrap();
    let out = adaptive_nms(&[], &[], map, &AdaptiveNmsConfig::default()).unwrap();
    assert!(out.is_empty());
    assert!(out.regions.iter().all(|r| r.density == 0));
}
