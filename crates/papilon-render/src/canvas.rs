use crate::glyphs::{glyph, text_size, GLYPH_ADVANCE, GLYPH_WIDTH};
use crate::math::Vec2;
use image::{Rgb, RgbImage};

/// Raster surface with coverage-blended primitives.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Mixes `color` into the pixel at `(x, y)`; out-of-bounds writes are ignored.
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb<u8>, coverage: f64) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage == 0.0 {
            return;
        }

        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for (dst, src) in pixel.0.iter_mut().zip(color.0) {
            let mixed = f64::from(*dst) * (1.0 - coverage) + f64::from(src) * coverage;
            *dst = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }

    pub fn fill_disc(&mut self, center: Vec2, radius: f64, color: Rgb<u8>) {
        self.shade_box(center, center, radius + 1.0, color, |p| {
            radius + 0.5 - (p - center).length()
        });
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f64, width: f64, color: Rgb<u8>) {
        let half = width * 0.5;
        self.shade_box(center, center, radius + half + 1.0, color, |p| {
            half + 0.5 - ((p - center).length() - radius).abs()
        });
    }

    pub fn stroke_line(&mut self, a: Vec2, b: Vec2, width: f64, color: Rgb<u8>) {
        let half = width * 0.5;
        self.shade_box(a, b, half + 1.0, color, |p| {
            half + 0.5 - p.distance_to_segment(a, b)
        });
    }

    /// Draws `text` with its top-left corner at `origin`.
    pub fn draw_text(&mut self, origin: Vec2, text: &str, scale: u32, color: Rgb<u8>) {
        let left = origin.x.round() as i64;
        let top = origin.y.round() as i64;
        let scale = i64::from(scale.max(1));

        for (index, c) in text.chars().enumerate() {
            let cell_left = left + index as i64 * i64::from(GLYPH_ADVANCE) * scale;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let x0 = cell_left + i64::from(col) * scale;
                    let y0 = top + row as i64 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            self.blend(x0 + dx, y0 + dy, color, 1.0);
                        }
                    }
                }
            }
        }
    }

    /// Draws `text` centered on `center`.
    pub fn draw_text_centered(&mut self, center: Vec2, text: &str, scale: u32, color: Rgb<u8>) {
        let (width, height) = text_size(text, scale.max(1));
        let origin = Vec2::new(
            center.x - f64::from(width) * 0.5,
            center.y - f64::from(height) * 0.5,
        );
        self.draw_text(origin, text, scale, color);
    }

    /// Visits every pixel of the box spanning `a` and `b` grown by `grow`
    /// and blends `color` with the coverage returned by `shade`.
    fn shade_box<F>(&mut self, a: Vec2, b: Vec2, grow: f64, color: Rgb<u8>, shade: F)
    where
        F: Fn(Vec2) -> f64,
    {
        let max_x = i64::from(self.width()) - 1;
        let max_y = i64::from(self.height()) - 1;
        let x0 = ((a.x.min(b.x) - grow).floor() as i64).max(0);
        let x1 = ((a.x.max(b.x) + grow).ceil() as i64).min(max_x);
        let y0 = ((a.y.min(b.y) - grow).floor() as i64).max(0);
        let y1 = ((a.y.max(b.y) + grow).ceil() as i64).min(max_y);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                self.blend(x, y, color, shade(center));
            }
        }
    }
}
