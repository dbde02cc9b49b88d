//! hollow-forge: layered pixel-art character compositor
//!
//! This crate paints dark-fantasy characters from per-slot option
//! selections. Two variants share the same surfaces, animation clock and
//! export path:
//!
//! - the procedural variant draws every layer as rectangles against palette
//!   ramps ([`render_character`], [`ForgeSession`]);
//! - the sheet variant copies frame cells out of LPC sprite sheets loaded
//!   through an [`AssetLoader`] ([`render_sheet_frame`], [`SheetSession`]).
//!
//! # Example
//!
//! ```
//! use hollow_forge::{AnimationPhase, CharacterConfiguration, RenderSettings, Slot, render_character};
//!
//! let config = CharacterConfiguration::default()
//!     .with(Slot::Chest, "plate")
//!     .with(Slot::Hair, "short");
//!
//! let surface = render_character(&config, &AnimationPhase::at(0.0), &RenderSettings::default());
//! assert_eq!(surface.image().dimensions(), (256, 384));
//! ```
//!
//! # Serializable Profiles
//!
//! Sessions implement [`Configurable`] so settings can be saved as JSON:
//!
//! ```
//! use hollow_forge::{CharacterProfile, Configurable, ForgeSession};
//!
//! let mut session = ForgeSession::default();
//! session.apply_profile(&CharacterProfile::from_json(r#"{"helmet": "crown"}"#).unwrap());
//!
//! let json = session.export_profile().to_json().unwrap();
//! assert!(json.contains("\"helmet\":\"crown\""));
//! ```

mod animation;
mod assets;
mod background;
mod character;
mod color;
mod error;
mod export;
pub mod layer;
mod options;
mod profile;
mod ramps;
mod session;
mod settings;
mod sheet;
mod sheet_render;
mod surface;

pub use animation::{AnimationDriver, AnimationPhase, LimbOffsets, ReactionState};
pub use assets::{AssetLoader, AssetSource, FsAssetSource, SpriteSheet};
pub use background::{DEFAULT_FILL, bonfire_anchor, render_background, render_background_id};
pub use character::CharacterConfiguration;
pub use color::Color;
pub use error::{AssetLoadError, ForgeError, ForgeResult};
pub use export::{CHARACTER_FILE_NAME, SHEET_FILE_NAME, encode_png, save_png, upscale};
pub use layer::{CharacterLayer, RenderContext, layer_stack, render_character};
pub use options::{
    Armament, Backdrop, Background, BodyType, Boots, Build, Cape, Chest, Effect, Face, Hair,
    Hairstyle, Headgear, Helmet, LegWear, Legs, NONE_ID, OptionEntry, Scars, SheetSlot, Shield,
    Skin, Slot, Torso, Weapon, find_entry, torso_class_title,
};
pub use profile::{CharacterProfile, SheetProfile};
pub use ramps::{Fabric, Glow, HairTone, Metal, PaletteRamp};
pub use session::{Configurable, ForgeSession, SheetSession};
pub use settings::{
    ForgeSettings, MAX_CANVAS_SIDE, MAX_EXPORT_SCALE, MAX_PIXEL_SIZE, MAX_SPRITE_SCALE,
    RenderSettings, SheetSettings,
};
pub use sheet::{
    AssetRequest, Direction, SheetAnimation, SheetAnimator, SheetConfiguration, SheetFrame,
    SheetLayout, asset_id,
};
pub use sheet_render::{fallback_scene, render_sheet_frame, sprite_origin};
pub use surface::{RectPx, Surface, alpha_blend};
