//! Sheet compositor: backdrop plus one frame cell per character layer.

use crate::assets::{AssetLoader, AssetSource};
use crate::background::render_background;
use crate::options::{Backdrop, Background};
use crate::settings::SheetSettings;
use crate::sheet::{SheetConfiguration, SheetFrame};
use crate::surface::Surface;

/// Procedural scene drawn when a backdrop image is not loaded.
pub const fn fallback_scene(backdrop: Backdrop) -> Background {
    match backdrop {
        Backdrop::Castle => Background::Castle,
        Backdrop::Dungeon => Background::Ruins,
        Backdrop::Forest => Background::Fog,
        Backdrop::Throne => Background::Shrine,
        Backdrop::Graveyard => Background::Abyss,
    }
}

/// Device position of the top-left corner of the scaled frame cell:
/// centred horizontally, a quarter of the canvas above the bottom edge.
///
/// `None` when the scaled cell or the canvas does not fit in `i32`.
pub fn sprite_origin(
    settings: &SheetSettings,
    cell_width: u32,
    cell_height: u32,
) -> Option<(i32, i32)> {
    let scaled = |cell: u32| {
        cell.checked_mul(settings.sprite_scale)
            .and_then(|side| i32::try_from(side).ok())
    };
    let (w, h) = (scaled(cell_width)?, scaled(cell_height)?);
    let width = i32::try_from(settings.width).ok()?;
    let height = i32::try_from(settings.height).ok()?;
    let x = width.checked_sub(w)? / 2;
    let y = height.checked_sub(h)?.checked_sub(height / 4)?;
    Some((x, y))
}

/// Paints one frame of a sheet character.
///
/// Only cached sheets are drawn; layers whose sheet is missing are skipped
/// and a missing backdrop falls back to a procedural scene.
pub fn render_sheet_frame<S: AssetSource>(
    config: &SheetConfiguration,
    frame: SheetFrame,
    loader: &AssetLoader<S>,
    settings: &SheetSettings,
    time_ms: f64,
) -> Surface {
    let (width, height) = settings.logical_size();
    let mut surface = Surface::new(width, height, settings.pixel_size);

    let backdrop = config.background_request();
    match loader.get_asset(&backdrop.id) {
        Some(sheet) => surface.stretch_image(&sheet.image),
        None => render_background(fallback_scene(config.background), time_ms, &mut surface),
    }

    for request in config.layers() {
        let Some(sheet) = loader.get_asset(&request.id) else {
            tracing::trace!(id = %request.id, "layer not loaded, skipping");
            continue;
        };
        let Some(rect) = frame.rect(&sheet.layout) else {
            continue;
        };
        let Some((x, y)) = sprite_origin(settings, rect.width, rect.height) else {
            tracing::debug!(id = %request.id, "scaled cell does not fit the canvas");
            continue;
        };
        surface.blit_scaled(&sheet.image, rect, x, y, settings.sprite_scale);
    }
    surface
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::error::AssetLoadError;
    use crate::options::SheetSlot;
    use crate::sheet::{Direction, SheetAnimation, SheetLayout};
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::collections::HashMap;
    use std::io::Cursor;

    struct MemorySource(HashMap<&'static str, Vec<u8>>);

    impl AssetSource for MemorySource {
        fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetLoadError> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| AssetLoadError::fetch(path, "not found"))
        }
    }

    fn encode(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    /// Full-size sheet with one marked pixel in the idle/down cell.
    fn body_sheet() -> RgbaImage {
        let layout = SheetLayout::LPC;
        let mut image = RgbaImage::new(
            layout.columns * layout.frame_width,
            layout.rows * layout.frame_height,
        );
        let cell = layout
            .frame_rect(SheetAnimation::Idle, Direction::Down, 0)
            .unwrap();
        image.put_pixel(cell.x + 10, cell.y + 20, Rgba([200, 10, 10, 255]));
        image
    }

    fn idle() -> SheetFrame {
        SheetFrame {
            animation: SheetAnimation::Idle,
            direction: Direction::Down,
            frame: 0,
        }
    }

    #[test]
    fn missing_assets_fall_back_to_scene() {
        let loader = AssetLoader::new(MemorySource(HashMap::new()));
        let config = SheetConfiguration::default().with(SheetSlot::Background, "graveyard");
        let settings = SheetSettings::default();

        let surface = render_sheet_frame(&config, idle(), &loader, &settings, 0.0);

        let mut expected = Surface::new(96, 128, 2);
        render_background(Background::Abyss, 0.0, &mut expected);
        assert_eq!(surface, expected);
    }

    #[test]
    fn loaded_layer_is_blitted_at_sprite_origin() {
        let config = SheetConfiguration::default();
        let body = config.layers()[0].clone();
        let loader = AssetLoader::new(MemorySource(HashMap::from([(
            body.path,
            encode(&body_sheet()),
        )])));
        loader.load_asset(body.path, &body.id).unwrap();
        let settings = SheetSettings::default();

        let surface = render_sheet_frame(&config, idle(), &loader, &settings, 0.0);

        assert_eq!(sprite_origin(&settings, 64, 64), Some((32, 64)));
        let red = Color::rgb(200, 10, 10).to_rgba();
        // Source (10, 20) at scale 2 from (32, 64).
        assert_eq!(*surface.image().get_pixel(52, 104), red);
        assert_eq!(*surface.image().get_pixel(53, 105), red);
        assert_ne!(*surface.image().get_pixel(54, 104), red);
    }

    #[test]
    fn oversized_sprite_scale_skips_the_layer() {
        let settings = SheetSettings {
            sprite_scale: 100_000_000,
            ..SheetSettings::default()
        };
        assert_eq!(sprite_origin(&settings, 64, 64), None);
        assert_eq!(sprite_origin(&settings, 0, 0), Some((96, 192)));

        let config = SheetConfiguration::default();
        let body = config.layers()[0].clone();
        let loader = AssetLoader::new(MemorySource(HashMap::from([(
            body.path,
            encode(&body_sheet()),
        )])));
        loader.load_asset(body.path, &body.id).unwrap();

        let surface = render_sheet_frame(&config, idle(), &loader, &settings, 0.0);
        let fallback = render_sheet_frame(
            &config,
            idle(),
            &AssetLoader::new(MemorySource(HashMap::new())),
            &settings,
            0.0,
        );
        assert_eq!(surface, fallback);
    }

    #[test]
    fn loaded_backdrop_replaces_scene() {
        let config = SheetConfiguration::default();
        let backdrop = config.background_request();
        let loader = AssetLoader::new(MemorySource(HashMap::from([(
            backdrop.path,
            encode(&RgbaImage::from_pixel(3, 4, Rgba([1, 2, 3, 255]))),
        )])));
        loader.load_asset(backdrop.path, &backdrop.id).unwrap();

        let surface =
            render_sheet_frame(&config, idle(), &loader, &SheetSettings::default(), 0.0);
        assert_eq!(surface.image().get_pixel(0, 0).0, [1, 2, 3, 255]);
        assert_eq!(surface.image().get_pixel(191, 255).0, [1, 2, 3, 255]);
    }
}
