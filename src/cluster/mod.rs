//! Candidate region generation by k-means over activation points.
//!
//! Clustering is fully deterministic: centroid seeding is either the
//! farthest-point heuristic or k-means++ driven by an explicit seed carried in
//! [`KMeansConfig`]. Point assignment ties resolve to the lowest centroid index
//! and a centroid whose cluster empties keeps its previous position.

mod init;
mod regions;

pub use regions::{candidate_regions, candidate_regions_from_points, Region};

use crate::trace::{trace_event, trace_span};
use crate::util::math::nearest_index;
use crate::util::{DenseNmsError, DenseNmsResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Centroid seeding policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CentroidInit {
    /// Farthest-point traversal starting from the first point.
    #[default]
    FarthestPoint,
    /// k-means++ seeding with a fixed RNG seed.
    KMeansPlusPlus {
        /// Seed for `StdRng`.
        seed: u64,
    },
}

/// Configuration for the k-means region clustering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KMeansConfig {
    /// Upper bound on assign/update iterations.
    pub max_iters: usize,
    /// Centroid seeding policy.
    pub init: CentroidInit,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            init: CentroidInit::FarthestPoint,
        }
    }
}

impl KMeansConfig {
    /// Checks that the configuration can run.
    pub fn validate(&self) -> DenseNmsResult<()> {
        if self.max_iters == 0 {
            return Err(DenseNmsError::InvalidConfig("max_iters must be >= 1"));
        }
        Ok(())
    }
}

/// Result of a k-means run.
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    /// Final centroid positions, one per cluster.
    pub centroids: Vec<(f32, f32)>,
    /// Cluster index of every input point.
    pub labels: Vec<usize>,
    /// Number of assignment passes performed.
    pub iterations: usize,
    /// True when the last pass changed no assignment.
    pub converged: bool,
}

impl Clustering {
    fn empty() -> Self {
        Self {
            centroids: Vec::new(),
            labels: Vec::new(),
            iterations: 0,
            converged: true,
        }
    }

    /// Number of clusters (`min(k, points.len())`).
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    /// Returns true when no cluster exists.
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }
}

/// Clusters `points` into `min(k, points.len())` groups.
///
/// Returns [`DenseNmsError::InvalidCount`] for `k == 0`. An empty point set
/// yields an empty clustering rather than an error.
pub fn kmeans(
    points: &[(f32, f32)],
    k: usize,
    cfg: &KMeansConfig,
    parallel: bool,
) -> DenseNmsResult<Clustering> {
    if k == 0 {
        return Err(DenseNmsError::InvalidCount { n_clusters: k });
    }
    cfg.validate()?;
    if points.is_empty() {
        return Ok(Clustering::empty());
    }

    let k = k.min(points.len());
    let _span = trace_span!("kmeans", points = points.len(), k = k).entered();

    let mut centroids = match cfg.init {
        CentroidInit::FarthestPoint => init::farthest_point(points, k),
        CentroidInit::KMeansPlusPlus { seed } => init::kmeans_plus_plus(points, k, seed),
    };
    let mut labels = vec![usize::MAX; points.len()];
    let mut iterations = 0usize;
    let mut converged = false;

    while iterations < cfg.max_iters {
        iterations += 1;
        let next = assign(points, &centroids, parallel);
        let changed = next != labels;
        labels = next;
        if !changed {
            converged = true;
            break;
        }
        update_centroids(points, &labels, &mut centroids);
    }

    trace_event!("kmeans_converged", iterations = iterations, converged = converged);
    Ok(Clustering {
        centroids,
        labels,
        iterations,
        converged,
    })
}

fn assign(points: &[(f32, f32)], centroids: &[(f32, f32)], parallel: bool) -> Vec<usize> {
    #[cfg(feature = "rayon")]
    {
        if parallel {
            return assign_par(points, centroids);
        }
    }
    let _ = parallel;
    points
        .iter()
        .map(|&p| nearest_index(p, centroids).unwrap_or(0))
        .collect()
}

#[cfg(feature = "rayon")]
fn assign_par(points: &[(f32, f32)], centroids: &[(f32, f32)]) -> Vec<usize> {
    points
        .par_iter()
        .map(|&p| nearest_index(p, centroids).unwrap_or(0))
        .collect()
}

fn update_centroids(points: &[(f32, f32)], labels: &[usize], centroids: &mut [(f32, f32)]) {
    let mut sums = vec![(0.0f64, 0.0f64, 0usize); centroids.len()];
    for (&(x, y), &label) in points.iter().zip(labels) {
        let slot = &mut sums[label];
        slot.0 += x as f64;
        slot.1 += y as f64;
        slot.2 += 1;
    }
    for (centroid, &(sx, sy, count)) in centroids.iter_mut().zip(&sums) {
        if count > 0 {
            *centroid = ((sx / count as f64) as f32, (sy / count as f64) as f32);
        }
    }
}
