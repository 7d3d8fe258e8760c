//! Deterministic centroid seeding for k-means.

use crate::util::math::dist_sq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Farthest-point seeding.
///
/// The first centroid is the first point; each following centroid is the point
/// farthest from its nearest chosen centroid, earliest point on ties.
pub(crate) fn farthest_point(points: &[(f32, f32)], k: usize) -> Vec<(f32, f32)> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut centroids = Vec::with_capacity(k);
    centroids.push(first);
    let mut min_dist: Vec<f32> = points.iter().map(|&p| dist_sq(p, first)).collect();

    while centroids.len() < k {
        let mut best_idx = 0usize;
        let mut best_dist = f32::NEG_INFINITY;
        for (idx, &dist) in min_dist.iter().enumerate() {
            if dist > best_dist {
                best_dist = dist;
                best_idx = idx;
            }
        }
        let next = points[best_idx];
        centroids.push(next);
        for (slot, &p) in min_dist.iter_mut().zip(points) {
            *slot = slot.min(dist_sq(p, next));
        }
    }
    centroids
}

/// k-means++ seeding driven by an explicitly seeded `StdRng`.
pub(crate) fn kmeans_plus_plus(points: &[(f32, f32)], k: usize, seed: u64) -> Vec<(f32, f32)> {
    if points.is_empty() {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let n = points.len();
    let first = points[rng.random_range(0..n)];
    let mut centroids = Vec::with_capacity(k);
    centroids.push(first);
    let mut min_dist: Vec<f64> = points.iter().map(|&p| dist_sq(p, first) as f64).collect();

    while centroids.len() < k {
        let total: f64 = min_dist.iter().sum();
        let pick = if total > 0.0 {
            let target = rng.random::<f64>() * total;
            let mut acc = 0.0f64;
            let mut chosen = n - 1;
            for (idx, &weight) in min_dist.iter().enumerate() {
                acc += weight;
                if weight > 0.0 && acc > target {
                    chosen = idx;
                    break;
                }
            }
            chosen
        } else {
            // every point coincides with a chosen centroid
            rng.random_range(0..n)
        };
        let next = points[pick];
        centroids.push(next);
        for (slot, &p) in min_dist.iter_mut().zip(points) {
            *slot = slot.min(dist_sq(p, next) as f64);
        }
    }
    centroids
}
