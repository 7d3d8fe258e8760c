//! densenms is a CPU library for density-adaptive non-maximum suppression.
//!
//! Detections are pruned greedily by score, but each candidate's IoU threshold
//! is raised according to how many detections crowd the heatmap region
//! nearest to it. Regions come from deterministic k-means over the heatmap's
//! active pixels. Optional features add rayon parallelism (`rayon`), an
//! `f32x8` IoU kernel (`simd`), image loading (`image-io`) and spans/events
//! (`tracing`).

pub mod cluster;
pub mod density;
pub mod geometry;
pub mod heatmap;
pub mod kernel;
pub mod lowlevel;
pub mod suppress;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use heatmap::io;

pub use cluster::{CentroidInit, KMeansConfig, Region};
pub use geometry::{box_iou, iou, BBox};
pub use heatmap::{Activation, ActivationMap, ActivationPoint, OwnedActivationMap};
pub use suppress::{
    adaptive_nms, adaptive_nms_points, batched_nms, nms, AdaptiveNms, AdaptiveNmsConfig,
    AdaptiveThreshold, Detections,
};
pub use util::{DenseNmsError, DenseNmsResult};
