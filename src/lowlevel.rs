//! Low-level building blocks for custom suppression pipelines.
//!
//! These expose each stage of the adaptive pass separately. Most users should
//! prefer [`AdaptiveNms`](crate::AdaptiveNms) or [`adaptive_nms`](crate::adaptive_nms).

pub use crate::cluster::{candidate_regions, candidate_regions_from_points, kmeans, Clustering};
pub use crate::density::{estimate_densities, nearest_region, region_density};
pub use crate::geometry::{boxes_from_flat, mask_to_box};
pub use crate::kernel::scalar::IouScalar;
#[cfg(feature = "simd")]
pub use crate::kernel::simd::IouSimd;
pub use crate::kernel::IouKernel;
pub use crate::suppress::{adaptive_threshold, WorkingSet};
