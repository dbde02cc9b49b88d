//! Procedural scene backgrounds.
//!
//! Each scene is painted straight onto the surface before the character
//! and is a pure function of the background, the time and the surface size.

use crate::color::{Color, darken, lighten, mix};
use crate::options::Background;
use crate::surface::Surface;

/// Fill used by every dark scene, and for unknown background ids.
pub const DEFAULT_FILL: Color = Color::hex(0x0a0908);

const GROUND: Color = Color::hex(0x151210);
const STONE_DARK: Color = Color::hex(0x1a1815);
const STONE: Color = Color::hex(0x252220);
const STONE_LIGHT: Color = Color::hex(0x2d2a27);

/// Height of the ground strip along the bottom edge.
pub const GROUND_HEIGHT: f32 = 12.0;

/// Where the bonfire sits on a canvas of the given logical size.
pub fn bonfire_anchor(width: u32, height: u32) -> (f32, f32) {
    ((width / 2) as f32, height as f32 - 16.0)
}

/// Paints `background` at `time_ms`.
pub fn render_background(background: Background, time_ms: f64, surface: &mut Surface) {
    let scene = Scene::new(surface, time_ms as f32);
    match background {
        Background::Void => scene.void(surface),
        Background::Bonfire => scene.bonfire(surface),
        Background::Ruins => scene.ruins(surface),
        Background::Castle => scene.castle(surface),
        Background::Fog => scene.fog(surface),
        Background::Abyss => scene.abyss(surface),
        Background::Shrine => scene.shrine(surface),
    }
}

/// Paints a background by id; unknown ids get the plain default fill.
pub fn render_background_id(id: &str, time_ms: f64, surface: &mut Surface) {
    match Background::from_id(id) {
        Some(background) => render_background(background, time_ms, surface),
        None => {
            tracing::debug!(id, "unknown background id, using default fill");
            surface.fill(DEFAULT_FILL);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Scene {
    w: f32,
    h: f32,
    t: f32,
}

impl Scene {
    fn new(surface: &Surface, t: f32) -> Self {
        Self {
            w: surface.width() as f32,
            h: surface.height() as f32,
            t,
        }
    }

    fn ground(&self, s: &mut Surface) {
        s.fill_rect(0.0, self.h - GROUND_HEIGHT, self.w, GROUND_HEIGHT, GROUND);
    }

    fn void(&self, s: &mut Surface) {
        let (w, h) = (self.w, self.h);
        s.fill(DEFAULT_FILL);
        // Stacked translucent insets read as a faint radial vignette.
        for i in 0..6 {
            let i = i as f32;
            let alpha = 0.08 - i * 0.01;
            s.fill_rect(
                i * 2.0,
                i * 2.0,
                w - i * 4.0,
                h - i * 4.0,
                Color::rgb(20, 18, 16).with_opacity(alpha),
            );
        }
        self.ground(s);
    }

    fn bonfire(&self, s: &mut Surface) {
        s.fill(DEFAULT_FILL);
        let (x, y) = bonfire_anchor(self.w as u32, self.h as u32);
        let t = self.t;
        let flicker = (t / 80.0).sin() * 2.0 + (t / 120.0).sin();

        // Coiled sword.
        s.fill_rect(x - 1.0, y - 36.0, 2.0, 34.0, Color::hex(0x4a4540));
        s.fill_rect(x, y - 34.0, 1.0, 30.0, Color::hex(0x3a3530));
        s.pixel(x - 1.0, y - 38.0, Color::hex(0x5a5550));
        s.pixel(x, y - 38.0, Color::hex(0x4a4540));

        let mut r = 18.0;
        while r > 4.0 {
            let alpha = 0.12 * (18.0 - r) / 14.0;
            s.fill_rect(
                x - r,
                y - r - 6.0,
                r * 2.0,
                r * 2.0,
                Color::rgb(255, 100, 20).with_opacity(alpha),
            );
            r -= 3.0;
        }

        let fh = 14.0 + flicker;
        s.fill_rect(x - 5.0, y - fh, 10.0, fh - 2.0, Color::hex(0xd04010));
        s.fill_rect(x - 4.0, y - fh + 2.0, 8.0, fh - 4.0, Color::hex(0xf06020));
        s.fill_rect(x - 3.0, y - fh + 3.0, 6.0, fh - 5.0, Color::hex(0xff8040));
        s.fill_rect(x - 2.0, y - fh + 4.0, 4.0, fh - 6.0, Color::hex(0xffa060));
        s.fill_rect(x - 1.0, y - fh + 5.0, 2.0, fh - 8.0, Color::hex(0xffc090));

        for i in 0..4 {
            let i = i as f32;
            let rise = (t / 80.0 + i * 8.0) % 24.0;
            let ex = x - 4.0 + (t / 150.0 + i * 1.5).sin() * 5.0;
            let ey = y - 16.0 - rise;
            s.pixel_alpha(ex.floor(), ey.floor(), Color::hex(0xff8040), 1.0 - rise / 24.0);
        }

        // Bones around the fire.
        s.fill_rect(x - 14.0, y + 2.0, 10.0, 2.0, Color::hex(0x5a5550));
        s.fill_rect(x - 12.0, y + 1.0, 2.0, 4.0, Color::hex(0x4a4540));
        s.fill_rect(x + 6.0, y + 3.0, 8.0, 2.0, Color::hex(0x5a5550));
        s.fill_rect(x + 10.0, y + 2.0, 2.0, 4.0, Color::hex(0x4a4540));

        self.ground(s);
    }

    fn ruins(&self, s: &mut Surface) {
        let (w, h) = (self.w, self.h);
        s.fill(Color::hex(0x0d0c0a));

        let floor = h - GROUND_HEIGHT;
        column(s, 3.0, 18.0, 11.0, floor);
        column(s, w - 14.0, 28.0, 11.0, floor);

        s.fill_rect(14.0, 6.0, w - 28.0, 6.0, STONE_DARK);
        s.fill_rect(16.0, 8.0, w - 32.0, 2.0, STONE);
        self.ground(s);
    }

    fn castle(&self, s: &mut Surface) {
        let (w, h, t) = (self.w, self.h, self.t);
        let floor = h - GROUND_HEIGHT;
        s.fill(Color::hex(0x0d0c0a));

        // Brick courses with staggered joints.
        let mut row = 0;
        let mut y = 0.0;
        while y < floor {
            let offset = if row % 2 == 0 { 0.0 } else { 4.0 };
            let mut x = -offset;
            while x < w {
                s.fill_rect(x + 1.0, y + 1.0, 7.0, 3.0, Color::hex(0x1c1a17));
                x += 8.0;
            }
            y += 4.0;
            row += 1;
        }

        // Two tall windows with cold light.
        for wx in [w * 0.25 - 3.0, w * 0.75 - 3.0] {
            s.fill_rect(wx - 1.0, 11.0, 8.0, 23.0, STONE_LIGHT);
            s.fill_rect(wx, 12.0, 6.0, 22.0, Color::hex(0x080a10));
            s.fill_rect(wx + 1.0, 10.0, 4.0, 2.0, Color::hex(0x080a10));
            let pane = lighten(Color::hex(0x080a10), 0.25);
            s.fill_rect(wx + 2.0, 14.0, 2.0, 18.0, pane.with_opacity(0.15));
        }

        // Wall torches.
        for (i, tx) in [6.0, w - 8.0].into_iter().enumerate() {
            let flicker = (t / 90.0 + i as f32 * 2.0).sin() * 1.5 + (t / 140.0).sin() * 0.5;
            let glow = 0.10 + (t / 200.0 + i as f32).sin().abs() * 0.05;
            s.fill_rect(tx - 4.0, 34.0, 10.0, 12.0, Color::rgb(255, 120, 30).with_opacity(glow));
            s.fill_rect(tx, 42.0, 2.0, 6.0, Color::hex(0x3a2a1a));
            let fh = 4.0 + flicker.max(-2.0);
            s.fill_rect(tx - 1.0, 42.0 - fh, 4.0, fh, Color::hex(0xd04010));
            // Hotter core while the flame is tall.
            let core = mix(Color::hex(0xf06020), Color::hex(0xffc090), (flicker + 2.0) / 4.0);
            s.fill_rect(tx, 42.0 - fh + 1.0, 2.0, fh - 1.0, core);
        }

        self.ground(s);
    }

    fn fog(&self, s: &mut Surface) {
        let (w, h, t) = (self.w, self.h, self.t);
        s.fill(DEFAULT_FILL);

        let drift = (t / 2000.0).sin();
        for i in 0..5 {
            let fi = i as f32;
            let y = 22.0 + fi * 14.0 + drift * 3.0;
            let alpha = 0.04 + (t / 1000.0 + fi).sin() * 0.02;
            s.fill_rect(7.0, y, w - 14.0, 8.0, Color::rgb(180, 180, 200).with_opacity(alpha));
        }

        let pillar = h - GROUND_HEIGHT - 6.0;
        s.fill_rect(5.0, 7.0, 9.0, pillar, STONE);
        s.fill_rect(7.0, 9.0, 5.0, pillar - 4.0, STONE_LIGHT);
        s.fill_rect(w - 14.0, 7.0, 9.0, pillar, STONE);
        s.fill_rect(w - 12.0, 9.0, 5.0, pillar - 4.0, STONE_LIGHT);
        s.fill_rect(5.0, 4.0, w - 10.0, 6.0, STONE);
        s.fill_rect(7.0, 6.0, w - 14.0, 2.0, STONE_LIGHT);
    }

    fn abyss(&self, s: &mut Surface) {
        let (w, h, t) = (self.w, self.h, self.t);
        s.fill(Color::BLACK);

        for i in 0..10 {
            let fi = i as f32;
            let px = (w / 10.0) * fi + (t / 1000.0 + fi).sin() * 4.0;
            let py = (t / 40.0 + fi * 20.0) % h;
            let alpha = 0.2 + (t / 500.0 + fi).sin() * 0.15;
            s.pixel_alpha(px.floor(), (h - py).floor(), Color::rgb(40, 20, 60), alpha);
            s.pixel_alpha(
                (px + 1.0).floor(),
                (h - py - 1.0).floor(),
                Color::rgb(60, 30, 90),
                alpha * 0.6,
            );
        }

        for i in 0..4 {
            let fi = i as f32;
            s.fill_rect(
                0.0,
                h - 4.0 - fi * 2.0,
                w,
                2.0,
                Color::rgb(30, 15, 45).with_opacity(0.1 - fi * 0.02),
            );
        }
    }

    fn shrine(&self, s: &mut Surface) {
        let (w, h, t) = (self.w, self.h, self.t);
        let floor = h - GROUND_HEIGHT;
        s.fill(DEFAULT_FILL);

        // Arch behind the altar.
        s.fill_rect(8.0, 10.0, 6.0, floor - 10.0, STONE);
        s.fill_rect(w - 14.0, 10.0, 6.0, floor - 10.0, STONE);
        s.fill_rect(8.0, 6.0, w - 16.0, 5.0, STONE);
        s.fill_rect(10.0, 8.0, w - 20.0, 1.0, STONE_LIGHT);

        // Warm light pooled on the back wall.
        let glow = 0.06 + (t / 700.0).sin() * 0.02;
        s.fill_rect(w / 2.0 - 14.0, 14.0, 28.0, floor - 18.0, Color::rgb(220, 170, 90).with_opacity(glow));

        // Altar steps.
        s.fill_rect(w / 2.0 - 18.0, floor - 4.0, 36.0, 4.0, STONE_DARK);
        s.fill_rect(w / 2.0 - 14.0, floor - 7.0, 28.0, 3.0, STONE);

        // Candles on both sides.
        for (i, cx) in [w / 2.0 - 16.0, w / 2.0 + 15.0].into_iter().enumerate() {
            let flicker = (t / 110.0 + i as f32 * 1.7).sin();
            s.fill_rect(cx, floor - 12.0, 1.0, 5.0, Color::hex(0xd8d0b8));
            s.pixel_alpha(cx, floor - 14.0, Color::hex(0xffc060), 0.6 + flicker * 0.3);
            s.pixel(cx, floor - 13.0, Color::hex(0xff8030));
            s.pixel_alpha(cx, floor - 15.0, Color::hex(0xffe0a0), 0.3 + flicker * 0.2);
        }

        self.ground(s);
    }
}

/// A weathered three-tone column standing on `floor`.
fn column(s: &mut Surface, x: f32, top: f32, width: f32, floor: f32) {
    let height = floor - top;
    s.fill_rect(x, top, width, height, STONE_DARK);
    s.fill_rect(x + 2.0, top + 2.0, width - 4.0, height - 2.0, STONE);
    s.fill_rect(x + 4.0, top + 4.0, width - 8.0, height - 4.0, STONE_LIGHT);
    s.fill_rect(x + width - 3.0, top + 2.0, 1.0, height - 2.0, darken(STONE, 0.03));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(background: Background, t: f64) -> Surface {
        let mut surface = Surface::new(64, 96, 1);
        render_background(background, t, &mut surface);
        surface
    }

    #[test]
    fn bonfire_flame_at_fire_anchor() {
        let surface = painted(Background::Bonfire, 0.0);
        assert_eq!(surface.logical_pixel(27, 74), Some(Color::hex(0xd04010)));
        assert_eq!(surface.logical_pixel(31, 72), Some(Color::hex(0xffc090)));
        assert_eq!(surface.logical_pixel(0, 90), Some(GROUND));
    }

    #[test]
    fn flames_flicker_over_time() {
        assert_ne!(painted(Background::Bonfire, 0.0), painted(Background::Bonfire, 130.0));
        assert_ne!(painted(Background::Castle, 0.0), painted(Background::Castle, 130.0));
        assert_eq!(painted(Background::Ruins, 0.0), painted(Background::Ruins, 130.0));
    }

    #[test]
    fn every_scene_covers_the_canvas() {
        for background in Background::ALL {
            let surface = painted(*background, 500.0);
            for (x, y) in [(0, 0), (63, 0), (0, 95), (63, 95), (32, 48)] {
                assert_eq!(
                    surface.logical_pixel(x, y).map(|c| c.a),
                    Some(255),
                    "{background} leaves ({x}, {y}) transparent"
                );
            }
        }
    }

    #[test]
    fn unknown_id_gets_default_fill() {
        let mut surface = Surface::new(16, 16, 2);
        render_background_id("moonlit_lake", 0.0, &mut surface);
        assert!(surface.image().pixels().all(|p| p.0 == [0x0a, 0x09, 0x08, 255]));
    }

    #[test]
    fn known_id_matches_enum_render() {
        let mut by_id = Surface::new(64, 96, 1);
        render_background_id("fog", 250.0, &mut by_id);
        assert_eq!(by_id, painted(Background::Fog, 250.0));
    }
}
