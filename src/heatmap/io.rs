//! Loading activation masks through the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::heatmap::OwnedActivationMap;
use crate::util::{DenseNmsError, DenseNmsResult};
use std::path::Path;

/// Thresholds a grayscale buffer into an activation mask.
pub fn mask_from_gray_image(
    img: &image::GrayImage,
    threshold: u8,
) -> DenseNmsResult<OwnedActivationMap> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    OwnedActivationMap::from_threshold(img.as_raw(), width, height, threshold)
}

/// Converts any decoded image to luma and thresholds it.
pub fn mask_from_dynamic_image(
    img: &image::DynamicImage,
    threshold: u8,
) -> DenseNmsResult<OwnedActivationMap> {
    let gray = img.to_luma8();
    mask_from_gray_image(&gray, threshold)
}

/// Loads a heatmap image from disk; pixels `>= threshold` become activations.
pub fn load_activation_image<P: AsRef<Path>>(
    path: P,
    threshold: u8,
) -> DenseNmsResult<OwnedActivationMap> {
    let img = image::open(path).map_err(|err| DenseNmsError::ImageIo {
        reason: err.to_string(),
    })?;
    mask_from_dynamic_image(&img, threshold)
}
