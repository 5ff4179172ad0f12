//! Bilinear resampling through an affine matrix.
//!
//! Uses inverse mapping: every output pixel centre is carried back into the
//! source with the inverted matrix and the four surrounding source pixels are
//! blended. Pixel `(x, y)` covers the unit square starting at `(x, y)`, so its
//! centre sits at `(x + 0.5, y + 0.5)`.

use image::RgbImage;
use tracing::trace;

use super::affine::AffineMatrix;
use crate::error::{TransformError, TransformResult};

const CHANNELS: usize = 3;

/// Warp `src` through `matrix` into an image of the same size.
///
/// `matrix` maps source coordinates to output coordinates. Samples that fall
/// outside the source are clamped to the nearest edge pixel, so the output
/// never contains a fill colour.
pub fn warp_bilinear(src: &RgbImage, matrix: &AffineMatrix) -> TransformResult<RgbImage> {
    let (width, height) = src.dimensions();
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidInput(format!(
            "cannot warp a {}x{} image",
            width, height
        )));
    }

    let inverse = matrix.inverse()?;
    trace!(width, height, coeffs = ?inverse.coeffs(), "warping image");

    let w = width as usize;
    let h = height as usize;
    let max_x = (w - 1) as f64;
    let max_y = (h - 1) as f64;
    let data = src.as_raw();
    let mut out = vec![0u8; w * h * CHANNELS];

    for y in 0..h {
        let row = &mut out[y * w * CHANNELS..(y + 1) * w * CHANNELS];
        for x in 0..w {
            let (u, v) = inverse.transform_point(x as f64 + 0.5, y as f64 + 0.5);
            let sx = (u - 0.5).clamp(0.0, max_x);
            let sy = (v - 0.5).clamp(0.0, max_y);
            let pixel = sample_bilinear(data, w, h, sx, sy);
            row[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&pixel);
        }
    }

    // Buffer length always matches the dimensions.
    RgbImage::from_raw(width, height, out).ok_or_else(|| {
        TransformError::InvalidInput("output buffer does not match dimensions".to_string())
    })
}

/// Blend the four neighbours of `(sx, sy)`; coordinates must already lie in
/// `[0, w-1] x [0, h-1]`.
#[inline]
fn sample_bilinear(data: &[u8], w: usize, h: usize, sx: f64, sy: f64) -> [u8; CHANNELS] {
    let x0 = sx.floor() as usize;
    let y0 = sy.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = sx - x0 as f64;
    let fy = sy - y0 as f64;

    let w00 = (1.0 - fx) * (1.0 - fy);
    let w10 = fx * (1.0 - fy);
    let w01 = (1.0 - fx) * fy;
    let w11 = fx * fy;

    let i00 = (y0 * w + x0) * CHANNELS;
    let i10 = (y0 * w + x1) * CHANNELS;
    let i01 = (y1 * w + x0) * CHANNELS;
    let i11 = (y1 * w + x1) * CHANNELS;

    let mut pixel = [0u8; CHANNELS];
    for (c, value) in pixel.iter_mut().enumerate() {
        let v = data[i00 + c] as f64 * w00
            + data[i10 + c] as f64 * w10
            + data[i01 + c] as f64 * w01
            + data[i11 + c] as f64 * w11;
        *value = v.round().clamp(0.0, 255.0) as u8;
    }
    pixel
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 3 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    #[test]
    fn test_identity_is_exact() {
        let img = gradient(17, 9);
        let out = warp_bilinear(&img, &AffineMatrix::identity()).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_half_turn_mirrors_both_axes() {
        let img = gradient(8, 6);
        let m = AffineMatrix::rotation_about(4.0, 3.0, 180.0, 1.0);
        let out = warp_bilinear(&img, &m).unwrap();
        for y in 0..6 {
            for x in 0..8 {
                assert_eq!(out.get_pixel(x, y), img.get_pixel(7 - x, 5 - y));
            }
        }
    }

    #[test]
    fn test_translation_by_whole_pixels() {
        let img = gradient(10, 4);
        let m = AffineMatrix::from_coeffs([1.0, 0.0, 2.0, 0.0, 1.0, 0.0]);
        let out = warp_bilinear(&img, &m).unwrap();
        assert_eq!(out.get_pixel(5, 1), img.get_pixel(3, 1));
        // Left edge is filled from the edge column, not a background colour.
        assert_eq!(out.get_pixel(0, 2), img.get_pixel(0, 2));
    }

    #[test]
    fn test_midpoint_blends_neighbours() {
        let img = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([200, 100, 50])
            }
        });
        // Upscale 2x about the centre: output pixel 1 centre (1.5) maps to 1.25,
        // i.e. index 0.75 between the two source pixels.
        let m = AffineMatrix::rotation_about(1.0, 0.5, 0.0, 2.0);
        let out = warp_bilinear(&img, &m).unwrap();
        assert_eq!(out.get_pixel(1, 0), &Rgb([150, 75, 38]));
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let img = RgbImage::new(0, 5);
        let result = warp_bilinear(&img, &AffineMatrix::identity());
        assert!(matches!(result, Err(TransformError::InvalidInput(_))));
    }

    #[test]
    fn test_singular_matrix_is_reported() {
        let img = gradient(4, 4);
        let m = AffineMatrix::from_coeffs([0.0; 6]);
        assert!(matches!(warp_bilinear(&img, &m), Err(TransformError::SingularMatrix)));
    }
}
