//! Procedural layer compositor.
//!
//! A character is painted as a fixed back-to-front stack of layers, each
//! one a short table of filled rectangles and single pixels drawn against a
//! palette ramp.
//!
//! # Architecture
//!
//! Each layer implements [`CharacterLayer`], which defines:
//! - How the layer paints itself relative to its anchor part
//! - What properties it emits for downstream layers
//!
//! Properties flow through the stack via [`RenderContext`]: the body layer
//! publishes [`BodyMetrics`] so armor can follow the build, and the helmet
//! publishes [`HeadCovered`] so effects can skip the eye glow.

pub mod anchor;
pub mod armor;
pub mod body;
pub mod effect;
pub mod gear;
pub mod head;

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::animation::AnimationPhase;
use crate::background::render_background;
use crate::character::CharacterConfiguration;
use crate::color::Color;
use crate::settings::RenderSettings;
use crate::surface::Surface;

pub use anchor::{Anchor, Attach, Part};
pub use armor::{BootsLayer, ChestLayer, HelmetLayer, LegsLayer};
pub use body::BodyLayer;
pub use effect::EffectLayer;
pub use gear::{CapeLayer, CapeSide, ShadowLayer, ShieldLayer, WeaponLayer};
pub use head::{FaceLayer, HairLayer, ScarsLayer};

// ============================================================================
// Render Context
// ============================================================================

/// Context that flows through the layer stack.
///
/// Layers can read properties set by upstream layers and emit new properties
/// for downstream layers to consume.
///
/// ```
/// use hollow_forge::{AnimationPhase, RenderContext, Surface};
/// use hollow_forge::layer::HeadCovered;
///
/// let mut ctx = RenderContext::new(Surface::new(64, 96, 1), AnimationPhase::at(0.0));
/// ctx.set(HeadCovered);
/// assert!(ctx.has::<HeadCovered>());
/// ```
pub struct RenderContext {
    /// The surface being painted.
    pub surface: Surface,
    pub phase: AnimationPhase,
    pub anchor: Anchor,

    /// Typed property bag for inter-layer communication.
    properties: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl RenderContext {
    /// Creates a context anchored in the middle of `surface`.
    pub fn new(surface: Surface, phase: AnimationPhase) -> Self {
        let anchor = Anchor::for_canvas(surface.width(), surface.height());
        Self {
            surface,
            phase,
            anchor,
            properties: HashMap::new(),
        }
    }

    /// Sets a typed property that downstream layers can read.
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
        self.properties.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Gets a typed property set by an upstream layer.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.properties
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref())
    }

    /// Checks if a property has been set.
    pub fn has<T: Any + Send + Sync>(&self) -> bool {
        self.properties.contains_key(&TypeId::of::<T>())
    }

    /// A brush whose origin is `part`'s anchor point at the current phase.
    pub fn brush(&mut self, part: Part) -> Brush<'_> {
        let (x, y) = self.anchor.origin(part, &self.phase);
        Brush {
            surface: &mut self.surface,
            x,
            y,
        }
    }

    pub fn into_surface(self) -> Surface {
        self.surface
    }
}

// ============================================================================
// Common Properties
// ============================================================================

/// Torso geometry of the painted body, relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyMetrics {
    pub body_width: i32,
    /// Left edge of the torso (`-floor(body_width / 2)`).
    pub torso_left: i32,
}

impl BodyMetrics {
    pub const fn for_width(body_width: i32) -> Self {
        Self {
            body_width,
            torso_left: -(body_width / 2),
        }
    }
}

impl Default for BodyMetrics {
    fn default() -> Self {
        Self::for_width(10)
    }
}

/// Set once a helmet covers the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadCovered;

// ============================================================================
// Brush
// ============================================================================

/// Draws in coordinates relative to an anchored origin.
pub struct Brush<'a> {
    surface: &'a mut Surface,
    x: f32,
    y: f32,
}

impl Brush<'_> {
    pub fn rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.surface.fill_rect(
            self.x + x as f32,
            self.y + y as f32,
            w as f32,
            h as f32,
            color,
        );
    }

    pub fn px(&mut self, x: i32, y: i32, color: Color) {
        self.rect(x, y, 1, 1, color);
    }

    /// A single pixel at a fractional position with extra opacity.
    pub fn dot(&mut self, x: f32, y: f32, color: Color, alpha: f32) {
        self.surface
            .pixel_alpha((self.x + x).floor(), (self.y + y).floor(), color, alpha);
    }

    pub fn ellipse(&mut self, rx: f32, ry: f32, color: Color) {
        self.surface.fill_ellipse(self.x, self.y, rx, ry, color);
    }
}

// ============================================================================
// Layer Trait
// ============================================================================

/// A self-contained layer of the character.
///
/// The separation of [`paint`](Self::paint) and [`emit`](Self::emit)
/// gives property emission a canonical place and keeps the data flow
/// explicit.
pub trait CharacterLayer {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Paint onto `ctx.surface`, reading upstream properties as needed.
    fn paint(&self, ctx: &mut RenderContext);

    /// Emit properties for downstream layers. Called after `paint`.
    fn emit(&self, _ctx: &mut RenderContext) {}

    fn apply(&self, ctx: &mut RenderContext) {
        self.paint(ctx);
        self.emit(ctx);
    }
}

// ============================================================================
// Layer Stack
// ============================================================================

/// Builds the back-to-front layer stack for a configuration.
///
/// Empty optional slots contribute no layer. Face details and hair are left
/// out under a helmet.
pub fn layer_stack(config: &CharacterConfiguration) -> Vec<Box<dyn CharacterLayer>> {
    let mut stack: Vec<Box<dyn CharacterLayer>> = vec![Box::new(ShadowLayer)];
    let bare_head = config.helmet.is_none();

    if let Some(cape) = config.cape {
        stack.push(Box::new(CapeLayer::new(cape, CapeSide::Back)));
    }
    if let Some(shield) = config.shield {
        stack.push(Box::new(ShieldLayer(shield)));
    }
    stack.push(Box::new(BodyLayer::new(config.skin, config.build)));
    stack.push(Box::new(LegsLayer(config.legs)));
    stack.push(Box::new(BootsLayer::new(config.boots, config.skin)));
    stack.push(Box::new(ChestLayer(config.chest)));
    if bare_head {
        stack.push(Box::new(FaceLayer::new(config.face, config.skin)));
    }
    if let Some(scars) = config.scars {
        stack.push(Box::new(ScarsLayer(scars)));
    }
    if let (true, Some(hair)) = (bare_head, config.hair) {
        stack.push(Box::new(HairLayer(hair)));
    }
    if let Some(helmet) = config.helmet {
        stack.push(Box::new(HelmetLayer(helmet)));
    }
    if let Some(weapon) = config.weapon {
        stack.push(Box::new(WeaponLayer(weapon)));
    }
    if let Some(effect) = config.effect {
        stack.push(Box::new(EffectLayer(effect)));
    }
    if let Some(cape) = config.cape {
        stack.push(Box::new(CapeLayer::new(cape, CapeSide::Front)));
    }
    stack
}

/// Paints the background and the full character for one animation phase.
///
/// Pure: the same configuration, phase and settings always produce the same
/// pixels.
pub fn render_character(
    config: &CharacterConfiguration,
    phase: &AnimationPhase,
    settings: &RenderSettings,
) -> Surface {
    let mut surface = Surface::new(settings.width, settings.height, settings.pixel_size);
    render_background(config.background, phase.time_ms, &mut surface);

    let mut ctx = RenderContext::new(surface, *phase);
    for layer in layer_stack(config) {
        tracing::trace!(layer = layer.name(), "painting layer");
        layer.apply(&mut ctx);
    }
    ctx.into_surface()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Cape, Effect, Hair, Helmet, Slot};

    fn names(config: &CharacterConfiguration) -> Vec<&'static str> {
        layer_stack(config).iter().map(|layer| layer.name()).collect()
    }

    #[test]
    fn default_stack_order() {
        assert_eq!(
            names(&CharacterConfiguration::default()),
            ["shadow", "body", "legs", "boots", "chest", "face", "weapon"]
        );
    }

    #[test]
    fn full_stack_order() {
        let config = CharacterConfiguration {
            hair: Some(Hair::Long),
            cape: Some(Cape::Royal),
            effect: Some(Effect::Ember),
            ..CharacterConfiguration::default()
        }
        .with(Slot::Shield, "kite")
        .with(Slot::Scars, "brand");

        assert_eq!(
            names(&config),
            [
                "shadow", "cape", "shield", "body", "legs", "boots", "chest", "face", "scars",
                "hair", "weapon", "effect", "cape"
            ]
        );
    }

    #[test]
    fn helmet_replaces_face_and_hair() {
        let config = CharacterConfiguration {
            hair: Some(Hair::Wild),
            helmet: Some(Helmet::Bucket),
            ..CharacterConfiguration::default()
        };
        let stack = names(&config);
        assert!(!stack.contains(&"face"));
        assert!(!stack.contains(&"hair"));
        assert!(stack.contains(&"helmet"));
    }

    #[test]
    fn context_properties_are_typed() {
        let mut ctx = RenderContext::new(Surface::new(8, 8, 1), AnimationPhase::at(0.0));
        assert!(ctx.get::<BodyMetrics>().is_none());
        ctx.set(BodyMetrics::for_width(12));
        assert_eq!(ctx.get::<BodyMetrics>().map(|m| m.torso_left), Some(-6));
        assert!(!ctx.has::<HeadCovered>());
    }

    #[test]
    fn brush_draws_relative_to_part() {
        let mut ctx = RenderContext::new(Surface::new(64, 96, 1), AnimationPhase::at(0.0));
        let red = Color::hex(0xff0000);
        ctx.brush(Part::Weapon).px(0, 0, red);
        assert_eq!(ctx.surface.logical_pixel(40, 66), Some(red));
    }
}
