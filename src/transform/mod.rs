//! Rotate-and-zoom transform
//!
//! Rotating a rectangle inside a frame of the same size exposes the frame's
//! corners. [`rotate`] zooms the rotated content by [`cover_scale`], the
//! smallest uniform factor for which the rotated source still covers the whole
//! frame, so the output never shows background.

pub mod affine;
pub mod warp;

pub use affine::AffineMatrix;
pub use warp::warp_bilinear;

use image::RgbImage;
use tracing::trace;

use crate::error::{TransformError, TransformResult};

/// Zoom factor needed to hide the corners after rotating a `width` x `height`
/// frame by `angle_degrees`.
///
/// Depends only on the magnitude of the rotation, so
/// `cover_scale(θ) == cover_scale(-θ) == cover_scale(180 - θ)`, and is never
/// below 1.
pub fn cover_scale(width: u32, height: u32, angle_degrees: f64) -> TransformResult<f64> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidInput(format!(
            "cannot compute zoom for a {}x{} image",
            width, height
        )));
    }

    let w = width as f64;
    let h = height as f64;
    let angle_rad = angle_degrees.abs().to_radians();
    let sin_a = angle_rad.sin().abs();
    let cos_a = angle_rad.cos().abs();

    // Axis-aligned bounds of the rotated frame
    let bound_w = w * cos_a + h * sin_a;
    let bound_h = h * cos_a + w * sin_a;

    Ok((bound_w / w).max(bound_h / h))
}

/// Rotate `image` by `angle_degrees` about its centre, zoomed by
/// [`cover_scale`] so that every output pixel comes from the source.
///
/// The output has the same dimensions as the input. A positive angle turns
/// the content counter-clockwise on screen.
pub fn rotate(image: &RgbImage, angle_degrees: f64) -> TransformResult<RgbImage> {
    let (width, height) = image.dimensions();
    let matrix = rotation_matrix(width, height, angle_degrees)?;
    warp_bilinear(image, &matrix)
}

/// The rotate-and-zoom matrix [`rotate`] applies to a `width` x `height` frame.
pub fn rotation_matrix(width: u32, height: u32, angle_degrees: f64) -> TransformResult<AffineMatrix> {
    let scale = cover_scale(width, height, angle_degrees)?;
    trace!(angle = angle_degrees, scale, "building rotation matrix");

    Ok(AffineMatrix::rotation_about(
        width as f64 / 2.0,
        height as f64 / 2.0,
        angle_degrees,
        scale,
    ))
}
