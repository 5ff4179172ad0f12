//! Half-block image widget
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀`, the lower one as the background.

use image::imageops::FilterType;
use image::RgbImage;
use ratatui::prelude::*;

/// Title of the panel holding the rotated frame
pub fn rotated_title(angle_degrees: f64) -> String {
    format!("Rotated {:.1}°", angle_degrees)
}

/// Largest pixel size with the image's aspect ratio that fits in
/// `cols` x `rows` cells. Returns `(0, 0)` when nothing fits.
pub fn fit_size(image_w: u32, image_h: u32, cols: u16, rows: u16) -> (u32, u32) {
    let avail_w = cols as u32;
    let avail_h = rows as u32 * 2;
    if image_w == 0 || image_h == 0 || avail_w == 0 || avail_h == 0 {
        return (0, 0);
    }

    let scale = (avail_w as f64 / image_w as f64).min(avail_h as f64 / image_h as f64);
    let w = ((image_w as f64 * scale).round() as u32).clamp(1, avail_w);
    let h = ((image_h as f64 * scale).round() as u32).clamp(1, avail_h);
    (w, h)
}

/// Renders an RGB image centred in its area, aspect ratio preserved.
pub struct HalfBlockImage<'a> {
    image: &'a RgbImage,
}

impl<'a> HalfBlockImage<'a> {
    pub fn new(image: &'a RgbImage) -> Self {
        Self { image }
    }
}

impl Widget for HalfBlockImage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (w, h) = fit_size(self.image.width(), self.image.height(), area.width, area.height);
        if w == 0 || h == 0 {
            return;
        }

        let fitted = if (w, h) == self.image.dimensions() {
            self.image.clone()
        } else {
            image::imageops::resize(self.image, w, h, FilterType::Triangle)
        };

        let offset_x = (area.width as u32 - w) / 2;
        let offset_y = (area.height as u32 * 2 - h) / 2;

        let pixel_at = |x: u32, py: u32| -> Option<Color> {
            let y = py.checked_sub(offset_y)?;
            if y >= h {
                return None;
            }
            let p = fitted.get_pixel(x, y);
            Some(Color::Rgb(p[0], p[1], p[2]))
        };

        for row in 0..area.height {
            for x in 0..w {
                let top = pixel_at(x, row as u32 * 2);
                let bottom = pixel_at(x, row as u32 * 2 + 1);
                let Some(cell) = buf.cell_mut((area.x + (offset_x + x) as u16, area.y + row))
                else {
                    continue;
                };
                match (top, bottom) {
                    (Some(top), Some(bottom)) => {
                        cell.set_char('▀').set_fg(top).set_bg(bottom);
                    }
                    (Some(top), None) => {
                        cell.set_char('▀').set_fg(top).set_bg(Color::Reset);
                    }
                    (None, Some(bottom)) => {
                        cell.set_char('▄').set_fg(bottom).set_bg(Color::Reset);
                    }
                    (None, None) => {}
                }
            }
        }
    }
}
