//! Carried and draped gear: cape, shield, weapon, plus the ground shadow.

use crate::color::Color;
use crate::layer::{CharacterLayer, Part, RenderContext};
use crate::options::{Cape, Shield, Weapon};
use crate::ramps::{Fabric, Glow, Metal};

/// Soft ellipse under the feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowLayer;

impl CharacterLayer for ShadowLayer {
    fn name(&self) -> &'static str {
        "shadow"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        ctx.brush(Part::Shadow)
            .ellipse(10.0, 3.0, Color::BLACK.with_opacity(0.4));
    }
}

// ============================================================================
// Cape
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapeSide {
    /// The drape, painted behind the body.
    Back,
    /// The gold clasp, painted last.
    Front,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapeLayer {
    pub cape: Cape,
    pub side: CapeSide,
}

impl CapeLayer {
    pub fn new(cape: Cape, side: CapeSide) -> Self {
        Self { cape, side }
    }
}

impl CharacterLayer for CapeLayer {
    fn name(&self) -> &'static str {
        "cape"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        if self.side == CapeSide::Front {
            let gold = Metal::Gold.ramp();
            let mut b = ctx.brush(Part::CapeClasp);
            b.rect(-2, 9, 4, 2, gold.outline);
            b.rect(-1, 9, 2, 1, gold.base);
            return;
        }

        let c = Fabric::Black.ramp();
        let mut b = ctx.brush(Part::CapeBack);
        match self.cape {
            Cape::Tattered => {
                b.rect(-6, 9, 12, 20, c.outline);
                b.rect(-5, 10, 10, 18, c.shadow);
                b.rect(-4, 10, 8, 16, c.base);
                b.rect(-5, 24, 2, 4, c.outline);
                b.rect(2, 22, 2, 6, c.outline);
            }
            Cape::Short => {
                b.rect(-5, 9, 10, 8, c.outline);
                b.rect(-4, 10, 8, 6, c.shadow);
                b.rect(-3, 10, 6, 5, c.base);
            }
            Cape::Long => {
                b.rect(-6, 9, 12, 22, c.outline);
                b.rect(-5, 10, 10, 20, c.shadow);
                b.rect(-4, 10, 8, 18, c.base);
            }
            Cape::Hooded => {
                b.rect(-6, 6, 12, 25, c.outline);
                b.rect(-5, 7, 10, 23, c.shadow);
                b.rect(-4, 7, 8, 21, c.base);
            }
            Cape::Royal => {
                let r = Fabric::Red.ramp();
                let trim = Metal::Gold.ramp().base;
                b.rect(-7, 9, 14, 24, r.outline);
                b.rect(-6, 10, 12, 22, r.shadow);
                b.rect(-5, 10, 10, 20, r.base);
                b.rect(-6, 10, 1, 22, trim);
                b.rect(5, 10, 1, 22, trim);
            }
        }
    }
}

// ============================================================================
// Shield
// ============================================================================

/// Shield on the off-hand arm, behind the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShieldLayer(pub Shield);

impl CharacterLayer for ShieldLayer {
    fn name(&self) -> &'static str {
        "shield"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        let m = Metal::Iron.ramp();
        let red = Fabric::Red.ramp();
        let mut b = ctx.brush(Part::Shield);

        match self.0 {
            Shield::Buckler => {
                b.rect(-2, 0, 6, 6, m.outline);
                b.rect(-1, 1, 4, 4, m.shadow);
                b.rect(0, 2, 2, 2, m.base);
            }
            Shield::Kite => {
                b.rect(-3, -2, 7, 12, m.outline);
                b.rect(-2, -1, 5, 10, m.shadow);
                b.rect(-1, 0, 3, 7, m.base);
                b.rect(0, 0, 1, 6, red.base);
                b.rect(-1, 2, 3, 1, red.base);
            }
            Shield::Tower => {
                b.rect(-4, -4, 8, 16, m.outline);
                b.rect(-3, -3, 6, 14, m.shadow);
                b.rect(-2, -2, 4, 12, m.base);
            }
            Shield::Crest => {
                b.rect(-3, -2, 7, 10, red.outline);
                b.rect(-2, -1, 5, 8, red.shadow);
                b.rect(-1, 0, 3, 6, red.base);
                b.rect(-1, 1, 3, 3, Metal::Gold.ramp().base);
            }
            Shield::Skull => {
                b.rect(-3, -2, 7, 10, m.outline);
                b.rect(-2, -1, 5, 8, m.shadow);
                b.rect(-1, 0, 3, 4, Color::hex(0xc8c0b8));
                b.px(-1, 1, Color::BLACK);
                b.px(1, 1, Color::BLACK);
                b.rect(-1, 3, 3, 1, Color::hex(0x808080));
            }
        }
    }
}

// ============================================================================
// Weapon
// ============================================================================

/// Weapon in the main hand. Coordinates are relative to the grip point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponLayer(pub Weapon);

impl CharacterLayer for WeaponLayer {
    fn name(&self) -> &'static str {
        "weapon"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        let m = Metal::Steel.ramp();
        let h = Fabric::Brown.ramp();
        let mut b = ctx.brush(Part::Weapon);

        match self.0 {
            Weapon::Sword => {
                b.rect(0, 8, 2, 6, h.outline);
                b.rect(0, 9, 2, 4, h.base);
                b.rect(-2, 6, 6, 2, m.outline);
                b.rect(-1, 7, 4, 1, m.base);
                b.rect(0, -10, 2, 16, m.outline);
                b.rect(0, -9, 2, 14, m.shadow);
                b.rect(0, -8, 1, 12, m.base);
                b.rect(0, -6, 1, 8, m.highlight);
            }
            Weapon::Greatsword => {
                b.rect(0, 10, 2, 8, h.outline);
                b.rect(0, 11, 2, 6, h.base);
                b.rect(-3, 8, 8, 2, m.outline);
                b.rect(-2, 9, 6, 1, m.base);
                b.rect(-1, -16, 4, 24, m.outline);
                b.rect(0, -15, 3, 22, m.shadow);
                b.rect(0, -14, 2, 20, m.base);
                b.rect(0, -12, 1, 16, m.highlight);
            }
            Weapon::Axe => {
                b.rect(0, -6, 2, 18, h.outline);
                b.rect(0, -5, 2, 16, h.base);
                b.rect(-4, -10, 6, 8, m.outline);
                b.rect(-3, -9, 4, 6, m.shadow);
                b.rect(-3, -8, 3, 4, m.base);
            }
            Weapon::Spear => {
                b.rect(0, -18, 2, 30, h.outline);
                b.rect(0, -17, 2, 28, h.base);
                b.rect(-1, -24, 4, 8, m.outline);
                b.rect(0, -23, 2, 6, m.base);
                b.rect(0, -22, 1, 4, m.highlight);
            }
            Weapon::Katana => {
                b.rect(0, 8, 2, 6, Color::hex(0x1a1512));
                b.rect(-1, 6, 4, 2, m.outline);
                b.rect(0, -12, 2, 18, m.outline);
                b.rect(0, -11, 2, 16, Color::hex(0xa0a0a0));
                b.rect(1, -10, 1, 14, Color::hex(0xd0d0d0));
            }
            Weapon::Mace => {
                b.rect(0, 0, 2, 12, h.outline);
                b.rect(0, 1, 2, 10, h.base);
                b.rect(-2, -6, 6, 6, m.outline);
                b.rect(-1, -5, 4, 4, m.base);
                b.px(-3, -4, m.base);
                b.px(4, -4, m.base);
                b.px(0, -7, m.base);
            }
            Weapon::Scythe => {
                b.rect(0, -12, 2, 24, h.outline);
                b.rect(0, -11, 2, 22, h.base);
                b.rect(-8, -14, 10, 2, m.outline);
                b.rect(-8, -12, 2, 6, m.outline);
                b.rect(-7, -13, 8, 1, m.base);
                b.rect(-7, -11, 1, 4, m.base);
            }
            Weapon::Staff => {
                let crystal = Glow::Curse.ramp();
                b.rect(0, -14, 2, 26, h.outline);
                b.rect(0, -13, 2, 24, Color::hex(0x5a4030));
                b.rect(-2, -20, 6, 8, crystal.shadow);
                b.rect(-1, -19, 4, 6, crystal.base);
                b.rect(0, -18, 2, 4, crystal.highlight);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationPhase, ReactionState};
    use crate::surface::Surface;

    fn ctx_at(phase: AnimationPhase) -> RenderContext {
        RenderContext::new(Surface::new(64, 96, 1), phase)
    }

    #[test]
    fn sword_blade_sits_right_of_body() {
        let mut ctx = ctx_at(AnimationPhase::at(0.0));
        WeaponLayer(Weapon::Sword).apply(&mut ctx);
        let steel = Metal::Steel.ramp();
        assert_eq!(ctx.surface.logical_pixel(40, 58), Some(steel.base));
        assert_eq!(ctx.surface.logical_pixel(40, 62), Some(steel.highlight));
        assert_eq!(ctx.surface.logical_pixel(31, 58), Some(Color::TRANSPARENT));
    }

    #[test]
    fn cape_sways_with_breathing_frame() {
        let mut still = ctx_at(AnimationPhase::new(0.0, 0, ReactionState::Idle));
        let mut swayed = ctx_at(AnimationPhase::new(0.0, 2, ReactionState::Idle));
        let layer = CapeLayer::new(Cape::Long, CapeSide::Back);
        layer.apply(&mut still);
        layer.apply(&mut swayed);

        let outline = Fabric::Black.ramp().outline;
        assert_eq!(still.surface.logical_pixel(26, 70), Some(outline));
        assert_eq!(swayed.surface.logical_pixel(28, 70), Some(outline));
        assert_ne!(swayed.surface.logical_pixel(26, 70), Some(outline));
    }

    #[test]
    fn clasp_is_gold() {
        let mut ctx = ctx_at(AnimationPhase::at(0.0));
        CapeLayer::new(Cape::Short, CapeSide::Front).apply(&mut ctx);
        assert_eq!(ctx.surface.logical_pixel(31, 61), Some(Metal::Gold.ramp().base));
    }

    #[test]
    fn shadow_is_translucent() {
        let mut ctx = ctx_at(AnimationPhase::at(0.0));
        ShadowLayer.apply(&mut ctx);
        let shade = ctx.surface.logical_pixel(32, 83).unwrap();
        assert_eq!(shade.a, 102);
    }
}
