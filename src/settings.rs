//! Render and export settings for both variants.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, ForgeResult};

/// Largest supported export upscale.
pub const MAX_EXPORT_SCALE: u32 = 8;

/// Largest number of device pixels per logical pixel.
pub const MAX_PIXEL_SIZE: u32 = 16;

/// Largest integer scale applied to sheet cells.
pub const MAX_SPRITE_SCALE: u32 = 8;

/// Largest device width or height of a render canvas.
pub const MAX_CANVAS_SIDE: u32 = 4096;

/// Surface geometry for the procedural variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RenderSettings {
    /// Logical canvas width.
    pub width: u32,
    /// Logical canvas height.
    pub height: u32,
    /// Device pixels per logical pixel.
    pub pixel_size: u32,
    /// Nearest-neighbour upscale applied on export.
    pub export_scale: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 64,
            height: 96,
            pixel_size: 4,
            export_scale: 4,
        }
    }
}

impl RenderSettings {
    /// Settings with a 1:1 device grid, handy for pixel inspection.
    pub fn unscaled() -> Self {
        Self {
            pixel_size: 1,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ForgeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ForgeError::config("canvas size must be non-zero"));
        }
        validate_pixel_size(self.pixel_size)?;
        validate_canvas(
            self.width.checked_mul(self.pixel_size),
            self.height.checked_mul(self.pixel_size),
        )?;
        validate_scale(self.export_scale)
    }
}

/// Surface geometry for the sprite-sheet variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SheetSettings {
    /// Device width of the canvas.
    pub width: u32,
    /// Device height of the canvas.
    pub height: u32,
    /// Device pixels per logical pixel for the procedural backdrop.
    pub pixel_size: u32,
    /// Integer scale applied to 64x64 sheet cells.
    pub sprite_scale: u32,
    pub export_scale: u32,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            width: 192,
            height: 256,
            pixel_size: 2,
            sprite_scale: 2,
            export_scale: 2,
        }
    }
}

impl SheetSettings {
    pub fn validate(&self) -> ForgeResult<()> {
        validate_pixel_size(self.pixel_size)?;
        if self.width < self.pixel_size || self.height < self.pixel_size {
            return Err(ForgeError::config(
                "canvas must hold at least one logical pixel",
            ));
        }
        validate_canvas(Some(self.width), Some(self.height))?;
        if !(1..=MAX_SPRITE_SCALE).contains(&self.sprite_scale) {
            return Err(ForgeError::config(format!(
                "sprite scale {} outside 1..={MAX_SPRITE_SCALE}",
                self.sprite_scale
            )));
        }
        validate_scale(self.export_scale)
    }

    /// Logical size of the backdrop surface.
    pub fn logical_size(&self) -> (u32, u32) {
        let ps = self.pixel_size.max(1);
        (self.width / ps, self.height / ps)
    }
}

fn validate_pixel_size(pixel_size: u32) -> ForgeResult<()> {
    if (1..=MAX_PIXEL_SIZE).contains(&pixel_size) {
        Ok(())
    } else {
        Err(ForgeError::config(format!(
            "pixel size {pixel_size} outside 1..={MAX_PIXEL_SIZE}"
        )))
    }
}

/// Device sides are `None` when computing them overflowed.
fn validate_canvas(width: Option<u32>, height: Option<u32>) -> ForgeResult<()> {
    match (width, height) {
        (Some(w), Some(h)) if w <= MAX_CANVAS_SIDE && h <= MAX_CANVAS_SIDE => Ok(()),
        _ => Err(ForgeError::config(format!(
            "canvas exceeds {MAX_CANVAS_SIDE} device pixels per side"
        ))),
    }
}

pub(crate) fn validate_scale(scale: u32) -> ForgeResult<()> {
    if (1..=MAX_EXPORT_SCALE).contains(&scale) {
        Ok(())
    } else {
        Err(ForgeError::export(format!(
            "export scale {scale} outside 1..={MAX_EXPORT_SCALE}"
        )))
    }
}

/// Settings file covering both variants.
///
/// ```
/// use hollow_forge::ForgeSettings;
///
/// let settings = ForgeSettings::from_json(r#"{"render": {"pixelSize": 2}}"#).unwrap();
/// assert_eq!(settings.render.pixel_size, 2);
/// assert_eq!(settings.render.width, 64);
/// assert_eq!(settings.asset_root, "assets/sprites");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ForgeSettings {
    pub render: RenderSettings,
    pub sheet: SheetSettings,
    /// Root directory of the sprite sheets.
    pub asset_root: String,
}

impl Default for ForgeSettings {
    fn default() -> Self {
        Self {
            render: RenderSettings::default(),
            sheet: SheetSettings::default(),
            asset_root: "assets/sprites".to_string(),
        }
    }
}

impl ForgeSettings {
    /// Parses and validates settings JSON; absent fields take defaults.
    pub fn from_json(json: &str) -> ForgeResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ForgeResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> ForgeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ForgeResult<()> {
        self.render.validate()?;
        self.sheet.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ForgeSettings::default().validate().is_ok());
        assert_eq!(SheetSettings::default().logical_size(), (96, 128));
    }

    #[test]
    fn out_of_range_export_scale_is_rejected() {
        let err = ForgeSettings::from_json(r#"{"render": {"exportScale": 9}}"#).unwrap_err();
        assert!(matches!(err, ForgeError::Export(_)));

        let err = ForgeSettings::from_json(r#"{"sheet": {"exportScale": 0}}"#).unwrap_err();
        assert!(err.to_string().contains("0"));
    }

    #[test]
    fn zero_pixel_size_is_a_config_error() {
        let err = ForgeSettings::from_json(r#"{"render": {"pixelSize": 0}}"#).unwrap_err();
        assert!(matches!(err, ForgeError::Config(_)));
    }

    #[test]
    fn oversized_values_are_rejected() {
        let sheet = SheetSettings {
            sprite_scale: 100_000_000,
            ..SheetSettings::default()
        };
        assert!(matches!(sheet.validate(), Err(ForgeError::Config(_))));

        let sheet = SheetSettings {
            width: 10_000,
            ..SheetSettings::default()
        };
        assert!(sheet.validate().is_err());

        let render = RenderSettings {
            pixel_size: 1000,
            ..RenderSettings::default()
        };
        assert!(render.validate().is_err());

        // 2^30 * 4 overflows u32.
        let render = RenderSettings {
            width: 1 << 30,
            ..RenderSettings::default()
        };
        assert!(render.validate().is_err());

        let err =
            ForgeSettings::from_json(r#"{"render": {"width": 2000, "pixelSize": 4}}"#).unwrap_err();
        assert!(err.to_string().contains("4096"));

        let largest = SheetSettings {
            width: MAX_CANVAS_SIDE,
            height: MAX_CANVAS_SIDE,
            pixel_size: MAX_PIXEL_SIZE,
            sprite_scale: MAX_SPRITE_SCALE,
            export_scale: MAX_EXPORT_SCALE,
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let err = ForgeSettings::from_json("{not json").unwrap_err();
        assert!(matches!(err, ForgeError::Serde(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forge.json");
        std::fs::write(&path, r#"{"assetRoot": "sprites"}"#).unwrap();
        let settings = ForgeSettings::from_path(&path).unwrap();
        assert_eq!(settings.asset_root, "sprites");
        assert_eq!(settings.sheet, SheetSettings::default());
    }
}
