//! Character sessions: own a configuration and its animation clock, apply
//! selections, render frames and export.

use std::path::Path;

use rand::Rng;

use crate::animation::{AnimationDriver, AnimationPhase};
use crate::assets::{AssetLoader, AssetSource, FsAssetSource};
use crate::character::CharacterConfiguration;
use crate::error::ForgeResult;
use crate::export::{encode_png, save_png};
use crate::layer::render_character;
use crate::options::{SheetSlot, Slot};
use crate::profile::{CharacterProfile, SheetProfile};
use crate::settings::{RenderSettings, SheetSettings};
use crate::sheet::{Direction, SheetAnimation, SheetAnimator, SheetConfiguration};
use crate::sheet_render::render_sheet_frame;
use crate::surface::Surface;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Types that can be configured from a serializable profile.
pub trait Configurable {
    type Profile;

    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &Self::Profile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> Self::Profile;
}

// ============================================================================
// ForgeSession
// ============================================================================

/// Session for the procedural variant.
///
/// # Example
///
/// ```
/// use hollow_forge::{ForgeSession, Slot};
///
/// let mut session = ForgeSession::default();
/// assert!(session.select(Slot::Chest, "plate", 0.0));
/// let frame = session.render_frame(16.0);
/// assert_eq!(frame.width(), 64);
/// assert_eq!(session.class_title(), "KNIGHT");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ForgeSession {
    config: CharacterConfiguration,
    driver: AnimationDriver,
    settings: RenderSettings,
}

impl ForgeSession {
    pub fn new(config: CharacterConfiguration, settings: RenderSettings) -> Self {
        Self {
            config,
            driver: AnimationDriver::new(),
            settings,
        }
    }

    pub fn config(&self) -> &CharacterConfiguration {
        &self.config
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    /// Selects an option and plays the reaction if anything changed.
    pub fn select(&mut self, slot: Slot, id: &str, now: f64) -> bool {
        let changed = self.config.set(slot, id);
        if changed {
            self.driver.trigger_reaction(now);
        }
        changed
    }

    /// Re-rolls every slot and plays the reaction.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, now: f64) {
        self.config.randomize(rng);
        self.driver.trigger_reaction(now);
    }

    /// Advances the clock to `now` and paints the frame.
    pub fn render_frame(&mut self, now: f64) -> Surface {
        let phase = self.driver.tick(now);
        render_character(&self.config, &phase, &self.settings)
    }

    /// Paints the still pose at `now` without touching the clock.
    pub fn render_still(&self, now: f64) -> Surface {
        render_character(&self.config, &AnimationPhase::at(now), &self.settings)
    }

    /// The live frame at `now`: the driver's breathing frame and any
    /// reaction in progress, without advancing the clock.
    pub fn render_current(&self, now: f64) -> Surface {
        render_character(&self.config, &self.driver.phase(now), &self.settings)
    }

    /// PNG bytes of the live frame at `now`, upscaled by the export scale.
    pub fn export(&self, now: f64) -> ForgeResult<Vec<u8>> {
        encode_png(self.render_current(now).image(), self.settings.export_scale)
    }

    pub fn save(&self, now: f64, path: impl AsRef<Path>) -> ForgeResult<()> {
        save_png(self.render_current(now).image(), self.settings.export_scale, path)
    }

    pub fn class_title(&self) -> &'static str {
        self.config.class_title()
    }
}

impl Configurable for ForgeSession {
    type Profile = CharacterProfile;

    fn apply_profile(&mut self, profile: &CharacterProfile) {
        self.config = profile.to_configuration();
    }

    fn export_profile(&self) -> CharacterProfile {
        CharacterProfile::from(&self.config)
    }
}

// ============================================================================
// SheetSession
// ============================================================================

/// Session for the sprite-sheet variant.
///
/// Selections preload the sheets they reference; rendering only draws what
/// is already cached.
pub struct SheetSession<S> {
    config: SheetConfiguration,
    animator: SheetAnimator,
    loader: AssetLoader<S>,
    settings: SheetSettings,
}

impl SheetSession<FsAssetSource> {
    /// Session reading sheets below `root`.
    pub fn from_dir(root: impl AsRef<Path>, settings: SheetSettings) -> Self {
        Self::new(AssetLoader::from_dir(root.as_ref()), settings)
    }
}

impl<S: AssetSource> SheetSession<S> {
    pub fn new(loader: AssetLoader<S>, settings: SheetSettings) -> Self {
        Self {
            config: SheetConfiguration::default(),
            animator: SheetAnimator::new(),
            loader,
            settings,
        }
    }

    pub fn config(&self) -> &SheetConfiguration {
        &self.config
    }

    pub fn loader(&self) -> &AssetLoader<S> {
        &self.loader
    }

    pub fn animator(&self) -> &SheetAnimator {
        &self.animator
    }

    pub fn settings(&self) -> &SheetSettings {
        &self.settings
    }

    /// Loads every sheet the current configuration references and returns
    /// how many are available.
    pub fn preload(&self) -> usize {
        self.loader.preload_assets(&self.config.asset_requests())
    }

    pub fn select(&mut self, slot: SheetSlot, id: &str, now: f64) -> bool {
        let changed = self.config.set(slot, id);
        if changed {
            self.preload();
            self.animator.trigger_reaction(now);
        }
        changed
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, now: f64) {
        self.config.randomize(rng);
        self.preload();
        self.animator.trigger_reaction(now);
    }

    pub fn set_animation(&mut self, animation: SheetAnimation) {
        self.animator.set_animation(animation);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.animator.set_direction(direction);
    }

    /// Steps the selected animation along the click cycle.
    pub fn cycle_animation(&mut self) -> SheetAnimation {
        self.animator.cycle_animation()
    }

    pub fn render_frame(&mut self, now: f64) -> Surface {
        let frame = self.animator.tick(now);
        render_sheet_frame(&self.config, frame, &self.loader, &self.settings, now)
    }

    /// The current frame without advancing the animator.
    pub fn render_current(&self, now: f64) -> Surface {
        render_sheet_frame(
            &self.config,
            self.animator.current(),
            &self.loader,
            &self.settings,
            now,
        )
    }

    pub fn export(&self, now: f64) -> ForgeResult<Vec<u8>> {
        encode_png(self.render_current(now).image(), self.settings.export_scale)
    }

    pub fn save(&self, now: f64, path: impl AsRef<Path>) -> ForgeResult<()> {
        save_png(self.render_current(now).image(), self.settings.export_scale, path)
    }

    pub fn class_title(&self) -> &'static str {
        self.config.class_title()
    }
}

impl<S: AssetSource> Configurable for SheetSession<S> {
    type Profile = SheetProfile;

    fn apply_profile(&mut self, profile: &SheetProfile) {
        self.config = profile.to_configuration();
        self.preload();
    }

    fn export_profile(&self) -> SheetProfile {
        SheetProfile::from(&self.config)
    }
}
