//! Pixel surfaces and compositing primitives.
//!
//! A [`Surface`] is an RGBA buffer addressed in *logical* pixel units: every
//! logical pixel covers `pixel_size x pixel_size` device pixels. Drawing
//! calls accept fractional logical coordinates, which lets sub-pixel
//! animation offsets land on device pixels when `pixel_size > 1`.

use image::{Rgba, RgbaImage};

use crate::color::Color;
use crate::settings::{MAX_CANVAS_SIDE, MAX_PIXEL_SIZE, MAX_SPRITE_SCALE};

/// A rectangle defined in device pixel coordinates.
///
/// Used to select frame cells within a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: u32,
    /// Y offset from the top edge of the image
    pub y: u32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns true if the rectangle lies entirely inside an image of the given size.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width && self.bottom() <= height
    }
}

// ============================================================================
// Surface
// ============================================================================

/// A drawable RGBA buffer with a logical pixel grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    image: RgbaImage,
    pixel_size: u32,
}

impl Surface {
    /// Creates a transparent surface of `width x height` logical pixels.
    ///
    /// `pixel_size` is clamped to `1..=MAX_PIXEL_SIZE` and each logical side
    /// so that the device side stays within `MAX_CANVAS_SIDE`.
    pub fn new(width: u32, height: u32, pixel_size: u32) -> Self {
        let pixel_size = pixel_size.clamp(1, MAX_PIXEL_SIZE);
        let limit = MAX_CANVAS_SIDE / pixel_size;
        Self {
            image: RgbaImage::new(width.min(limit) * pixel_size, height.min(limit) * pixel_size),
            pixel_size,
        }
    }

    /// Logical width.
    pub fn width(&self) -> u32 {
        self.image.width() / self.pixel_size
    }

    /// Logical height.
    pub fn height(&self) -> u32 {
        self.image.height() / self.pixel_size
    }

    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// The device-resolution buffer.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Overwrites every pixel with `color` (no blending).
    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba();
        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }
    }

    /// Fills a logical rectangle, blending when `color` is translucent.
    ///
    /// Edges snap down to the device grid; empty or off-surface rectangles
    /// are ignored.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if w <= 0.0 || h <= 0.0 || color.is_transparent() {
            return;
        }
        let ps = self.pixel_size as f32;
        let x0 = self.clamp_x((x * ps).floor());
        let x1 = self.clamp_x(((x + w) * ps).floor());
        let y0 = self.clamp_y((y * ps).floor());
        let y1 = self.clamp_y(((y + h) * ps).floor());

        for dy in y0..y1 {
            for dx in x0..x1 {
                self.put(dx, dy, color);
            }
        }
    }

    /// Fills one logical pixel.
    pub fn pixel(&mut self, x: f32, y: f32, color: Color) {
        self.fill_rect(x, y, 1.0, 1.0, color);
    }

    /// Fills one logical pixel at `alpha` opacity (multiplied with the colour's alpha).
    pub fn pixel_alpha(&mut self, x: f32, y: f32, color: Color, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        self.pixel(x, y, color.fade(alpha));
    }

    /// Fills an axis-aligned ellipse centred on `(cx, cy)` in logical units.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Color) {
        if rx <= 0.0 || ry <= 0.0 || color.is_transparent() {
            return;
        }
        let ps = self.pixel_size as f32;
        let x0 = self.clamp_x(((cx - rx) * ps).floor());
        let x1 = self.clamp_x(((cx + rx) * ps).ceil());
        let y0 = self.clamp_y(((cy - ry) * ps).floor());
        let y1 = self.clamp_y(((cy + ry) * ps).ceil());

        for dy in y0..y1 {
            for dx in x0..x1 {
                // Sample at the device pixel centre, back in logical units.
                let nx = ((dx as f32 + 0.5) / ps - cx) / rx;
                let ny = ((dy as f32 + 0.5) / ps - cy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.put(dx, dy, color);
                }
            }
        }
    }

    /// Reads the colour at a logical pixel (top-left device pixel of the cell).
    pub fn logical_pixel(&self, x: u32, y: u32) -> Option<Color> {
        let dx = x.checked_mul(self.pixel_size)?;
        let dy = y.checked_mul(self.pixel_size)?;
        if dx >= self.image.width() || dy >= self.image.height() {
            return None;
        }
        Some(Color::from_rgba(*self.image.get_pixel(dx, dy)))
    }

    /// Copies `src_rect` out of `src`, scaled by an integer factor with
    /// nearest-neighbour sampling, onto the surface at device position
    /// `(x, y)`. Source pixels are alpha-blended over the surface.
    pub fn blit_scaled(&mut self, src: &RgbaImage, src_rect: RectPx, x: i32, y: i32, scale: u32) {
        let scale = scale.clamp(1, MAX_SPRITE_SCALE);
        if !src_rect.fits_within(src.width(), src.height()) {
            return;
        }
        for sy in 0..src_rect.height {
            for sx in 0..src_rect.width {
                let pixel = *src.get_pixel(src_rect.x + sx, src_rect.y + sy);
                if pixel[3] == 0 {
                    continue;
                }
                let color = Color::from_rgba(pixel);
                for oy in 0..scale {
                    for ox in 0..scale {
                        let dx = x.saturating_add((sx * scale + ox) as i32);
                        let dy = y.saturating_add((sy * scale + oy) as i32);
                        self.put_signed(dx, dy, color);
                    }
                }
            }
        }
    }

    /// Stretches `src` over the whole surface with nearest-neighbour sampling.
    pub fn stretch_image(&mut self, src: &RgbaImage) {
        if src.width() == 0 || src.height() == 0 {
            return;
        }
        let (w, h) = self.image.dimensions();
        for dy in 0..h {
            for dx in 0..w {
                let sx = (dx as u64 * src.width() as u64 / w as u64) as u32;
                let sy = (dy as u64 * src.height() as u64 / h as u64) as u32;
                let color = Color::from_rgba(*src.get_pixel(sx, sy));
                self.put(dx, dy, color);
            }
        }
    }

    fn clamp_x(&self, v: f32) -> u32 {
        v.clamp(0.0, self.image.width() as f32) as u32
    }

    fn clamp_y(&self, v: f32) -> u32 {
        v.clamp(0.0, self.image.height() as f32) as u32
    }

    fn put_signed(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }
        self.put(x, y, color);
    }

    fn put(&mut self, x: u32, y: u32, color: Color) {
        if color.a == 255 {
            self.image.put_pixel(x, y, color.to_rgba());
        } else {
            let dst = *self.image.get_pixel(x, y);
            self.image.put_pixel(x, y, alpha_blend(color.to_rgba(), dst));
        }
    }
}

// ============================================================================
// Compositing
// ============================================================================

/// Alpha blends two RGBA pixels (source over destination).
pub fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::hex(0xff0000);
    const BLUE: Color = Color::hex(0x0000ff);

    #[test]
    fn logical_size_excludes_pixel_size() {
        let surface = Surface::new(64, 96, 4);
        assert_eq!((surface.width(), surface.height()), (64, 96));
        assert_eq!(surface.image().dimensions(), (256, 384));
    }

    #[test]
    fn oversized_requests_are_clamped() {
        let surface = Surface::new(u32::MAX, 2, u32::MAX);
        assert_eq!(surface.pixel_size(), MAX_PIXEL_SIZE);
        assert_eq!(surface.image().dimensions(), (MAX_CANVAS_SIDE, 2 * MAX_PIXEL_SIZE));
        assert_eq!(surface.width(), MAX_CANVAS_SIDE / MAX_PIXEL_SIZE);
        assert_eq!(surface.logical_pixel(u32::MAX, 0), None);
    }

    #[test]
    fn fill_rect_covers_whole_logical_cells() {
        let mut surface = Surface::new(8, 8, 3);
        surface.fill_rect(2.0, 1.0, 2.0, 3.0, RED);

        assert_eq!(surface.logical_pixel(2, 1), Some(RED));
        assert_eq!(surface.logical_pixel(3, 3), Some(RED));
        assert_eq!(surface.logical_pixel(4, 1), Some(Color::TRANSPARENT));
        // Last device pixel of the cell is covered too.
        assert_eq!(surface.image().get_pixel(11, 11).0, [255, 0, 0, 255]);
        assert_eq!(surface.image().get_pixel(12, 11).0, [0, 0, 0, 0]);
    }

    #[test]
    fn fractional_offsets_snap_to_device_grid() {
        let mut surface = Surface::new(4, 4, 4);
        surface.fill_rect(1.5, 0.0, 1.0, 1.0, RED);
        // 1.5 logical = device 6..10
        assert_eq!(surface.image().get_pixel(5, 0).0[3], 0);
        assert_eq!(surface.image().get_pixel(6, 0).0, [255, 0, 0, 255]);
        assert_eq!(surface.image().get_pixel(9, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn out_of_bounds_drawing_is_clipped() {
        let mut surface = Surface::new(4, 4, 1);
        surface.fill_rect(-3.0, -3.0, 4.0, 4.0, RED);
        surface.fill_rect(3.0, 3.0, 10.0, 10.0, BLUE);
        surface.pixel(100.0, 100.0, RED);

        assert_eq!(surface.logical_pixel(0, 0), Some(RED));
        assert_eq!(surface.logical_pixel(1, 1), Some(Color::TRANSPARENT));
        assert_eq!(surface.logical_pixel(3, 3), Some(BLUE));
    }

    #[test]
    fn translucent_fill_blends() {
        let mut surface = Surface::new(2, 2, 1);
        surface.fill(RED);
        surface.pixel_alpha(0.0, 0.0, BLUE, 0.5);

        let blended = surface.logical_pixel(0, 0).unwrap();
        assert!(blended.r > 0, "Should keep some red");
        assert!(blended.b > 0, "Should gain some blue");
        assert_eq!(blended.a, 255);
        assert_eq!(surface.logical_pixel(1, 1), Some(RED));
    }

    #[test]
    fn ellipse_is_filled_around_center() {
        let mut surface = Surface::new(20, 10, 1);
        surface.fill_ellipse(10.0, 5.0, 6.0, 2.0, RED);
        assert_eq!(surface.logical_pixel(10, 5), Some(RED));
        assert_eq!(surface.logical_pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(surface.logical_pixel(10, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn blit_scaled_copies_frame_cell() {
        let mut sheet = RgbaImage::new(4, 2);
        sheet.put_pixel(2, 0, Rgba([0, 255, 0, 255]));

        let mut surface = Surface::new(8, 8, 1);
        surface.blit_scaled(&sheet, RectPx::new(2, 0, 2, 2), 1, 1, 2);

        assert_eq!(surface.image().get_pixel(1, 1).0, [0, 255, 0, 255]);
        assert_eq!(surface.image().get_pixel(2, 2).0, [0, 255, 0, 255]);
        // Transparent source pixels leave the destination untouched.
        assert_eq!(surface.image().get_pixel(3, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn blit_ignores_out_of_range_rect() {
        let sheet = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        let mut surface = Surface::new(4, 4, 1);
        surface.blit_scaled(&sheet, RectPx::new(2, 2, 4, 4), 0, 0, 1);
        assert_eq!(surface.logical_pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn stretch_fills_surface() {
        let mut src = RgbaImage::from_pixel(2, 1, Rgba([255, 0, 0, 255]));
        src.put_pixel(1, 0, Rgba([0, 0, 255, 255]));

        let mut surface = Surface::new(4, 2, 1);
        surface.stretch_image(&src);
        assert_eq!(surface.logical_pixel(0, 1), Some(RED));
        assert_eq!(surface.logical_pixel(3, 0), Some(BLUE));
    }
}
