use image::imageops::FilterType;
use image::RgbImage;
use std::path::Path;
use tracing::{debug, info};

use crate::error::SourceError;

/// Load the still image that drives the animation.
///
/// The image is converted to 8-bit RGB. When `max_dimension` is set and the
/// longer side exceeds it, the image is shrunk to that working size with the
/// aspect ratio preserved.
pub fn load(path: &Path, max_dimension: Option<u32>) -> Result<RgbImage, SourceError> {
    let decoded = image::open(path).map_err(|source| SourceError::MissingOrUnreadableImage {
        path: path.to_path_buf(),
        source,
    })?;

    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(SourceError::EmptyImage {
            path: path.to_path_buf(),
            width,
            height,
        });
    }
    info!("Loaded {} ({}x{})", path.display(), width, height);

    let rgb = decoded.into_rgb8();
    Ok(match max_dimension {
        Some(limit) if limit > 0 && width.max(height) > limit => {
            let working = downsize(&rgb, limit);
            debug!(
                "Working resolution {}x{} (limit {})",
                working.width(),
                working.height(),
                limit
            );
            working
        }
        _ => rgb,
    })
}

/// Shrink `image` so that its longer side equals `limit`.
fn downsize(image: &RgbImage, limit: u32) -> RgbImage {
    let (w, h) = image.dimensions();
    let (nw, nh) = if w >= h {
        (limit, scaled_side(h, limit, w))
    } else {
        (scaled_side(w, limit, h), limit)
    };
    image::imageops::resize(image, nw, nh, FilterType::Triangle)
}

/// `side * limit / longest`, rounded, never below one pixel.
fn scaled_side(side: u32, limit: u32, longest: u32) -> u32 {
    ((side as f64 * limit as f64 / longest as f64).round() as u32).max(1)
}
