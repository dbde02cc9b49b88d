//! Worn armor: chest, leg armor, boots and helmets.

use crate::color::Color;
use crate::layer::{BodyMetrics, CharacterLayer, HeadCovered, Part, RenderContext};
use crate::options::{Boots, Chest, Helmet, Legs, Skin};
use crate::ramps::{Fabric, Metal};

const SLIT: Color = Color::hex(0x0a0808);

// ============================================================================
// Chest
// ============================================================================

/// Chest armor, fitted to the [`BodyMetrics`] emitted by the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChestLayer(pub Chest);

impl CharacterLayer for ChestLayer {
    fn name(&self) -> &'static str {
        "chest"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        let BodyMetrics {
            body_width: bw,
            torso_left: tx,
        } = ctx.get::<BodyMetrics>().copied().unwrap_or_default();
        let gold = Metal::Gold.ramp().base;
        let mut b = ctx.brush(Part::Chest);

        match self.0 {
            Chest::Rags => {
                let r = Fabric::Brown.ramp();
                b.rect(tx, 10, bw, 8, r.shadow);
                b.rect(tx + 1, 11, bw - 2, 6, r.base);
                b.px(tx, 16, r.outline);
                b.px(tx + bw - 1, 17, r.outline);
            }
            Chest::Tunic => {
                let t = Fabric::Grey.ramp();
                b.rect(tx - 1, 9, bw + 2, 10, t.outline);
                b.rect(tx, 10, bw, 8, t.base);
                b.rect(tx + 1, 11, bw - 2, 5, t.highlight);
            }
            Chest::Leather => {
                let l = Fabric::Brown.ramp();
                b.rect(tx - 1, 9, bw + 2, 10, l.outline);
                b.rect(tx, 10, bw, 8, l.shadow);
                b.rect(tx + 1, 10, bw - 2, 6, l.base);
                b.rect(tx + 2, 10, 1, 8, l.dark);
                b.rect(tx + bw - 3, 10, 1, 8, l.dark);
            }
            Chest::Chain => {
                let c = Metal::Iron.ramp();
                b.rect(tx - 1, 9, bw + 2, 10, c.outline);
                b.rect(tx, 10, bw, 8, c.shadow);
                for row in 0..4 {
                    for col in 0..bw - 2 {
                        if (col + row) % 2 == 0 {
                            b.px(tx + 1 + col, 11 + row * 2, c.base);
                        }
                    }
                }
            }
            Chest::Plate => {
                let s = Metal::Steel.ramp();
                plate_cuirass(&mut b, tx, bw, s.outline, s.shadow, s.base);
                b.rect(tx + 1, 11, bw - 2, 3, s.highlight);
                for x in [tx - 4, tx + bw] {
                    b.rect(x, 9, 4, 4, s.outline);
                }
                b.rect(tx - 3, 10, 3, 2, s.base);
                b.rect(tx + bw, 10, 3, 2, s.base);
            }
            Chest::Knight => {
                let k = Metal::Steel.ramp();
                let cross = Fabric::Red.ramp().base;
                plate_cuirass(&mut b, tx, bw, k.outline, k.shadow, k.base);
                b.rect(-1, 11, 2, 5, cross);
                b.rect(-2, 13, 4, 1, cross);
                pauldrons(&mut b, tx, bw, k.outline, k.base);
            }
            Chest::Elite => {
                let e = Metal::Steel.ramp();
                plate_cuirass(&mut b, tx, bw, e.outline, e.shadow, e.base);
                b.rect(tx, 10, bw, 1, gold);
                b.rect(tx, 17, bw, 1, gold);
                b.rect(tx - 5, 7, 6, 6, e.outline);
                b.rect(tx - 4, 8, 5, 4, e.base);
                b.rect(tx + bw - 1, 7, 6, 6, e.outline);
                b.rect(tx + bw - 1, 8, 5, 4, e.base);
                b.px(tx - 3, 9, gold);
                b.px(tx + bw + 2, 9, gold);
            }
            Chest::Dark => {
                let d = Metal::Dark.ramp();
                plate_cuirass(&mut b, tx, bw, d.outline, d.shadow, d.base);
                pauldrons(&mut b, tx, bw, d.outline, d.base);
                b.px(tx - 5, 6, d.base);
                b.px(tx + bw + 4, 6, d.base);
            }
        }
    }
}

fn plate_cuirass(
    b: &mut crate::layer::Brush<'_>,
    tx: i32,
    bw: i32,
    outline: Color,
    shadow: Color,
    base: Color,
) {
    b.rect(tx - 2, 9, bw + 4, 10, outline);
    b.rect(tx - 1, 10, bw + 2, 8, shadow);
    b.rect(tx, 10, bw, 7, base);
}

fn pauldrons(b: &mut crate::layer::Brush<'_>, tx: i32, bw: i32, outline: Color, base: Color) {
    b.rect(tx - 5, 8, 5, 5, outline);
    b.rect(tx - 4, 9, 4, 3, base);
    b.rect(tx + bw, 8, 5, 5, outline);
    b.rect(tx + bw, 9, 4, 3, base);
}

// ============================================================================
// Legs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegsLayer(pub Legs);

impl CharacterLayer for LegsLayer {
    fn name(&self) -> &'static str {
        "legs"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        let mut b = ctx.brush(Part::Legs);
        match self.0 {
            Legs::Rags | Legs::Cloth | Legs::Chain => {
                let (p, fill) = match self.0 {
                    Legs::Rags => (Fabric::Brown.ramp(), Fabric::Brown.ramp().base),
                    Legs::Cloth => (Fabric::Grey.ramp(), Fabric::Grey.ramp().base),
                    _ => (Metal::Iron.ramp(), Metal::Iron.ramp().shadow),
                };
                for x in [-3, 0] {
                    b.rect(x, 19, 3, 10, p.outline);
                }
                b.rect(-2, 20, 2, 8, fill);
                b.rect(0, 20, 2, 8, fill);
            }
            Legs::Leather => {
                let l = Fabric::Brown.ramp();
                b.rect(-3, 19, 3, 10, l.outline);
                b.rect(-2, 20, 2, 8, l.shadow);
                b.rect(-2, 20, 1, 6, l.base);
                b.rect(0, 19, 3, 10, l.outline);
                b.rect(0, 20, 2, 8, l.shadow);
                b.rect(1, 20, 1, 6, l.base);
            }
            Legs::Plate | Legs::Knight => {
                let s = Metal::Steel.ramp();
                b.rect(-4, 19, 4, 10, s.outline);
                b.rect(-3, 20, 3, 8, s.shadow);
                b.rect(-3, 20, 2, 6, s.base);
                b.rect(0, 19, 4, 10, s.outline);
                b.rect(1, 20, 3, 8, s.shadow);
                b.rect(1, 20, 2, 6, s.base);
            }
        }
    }
}

// ============================================================================
// Boots
// ============================================================================

/// Footwear; bare feet take the skin ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootsLayer {
    pub boots: Boots,
    pub skin: Skin,
}

impl BootsLayer {
    pub fn new(boots: Boots, skin: Skin) -> Self {
        Self { boots, skin }
    }
}

impl CharacterLayer for BootsLayer {
    fn name(&self) -> &'static str {
        "boots"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        let mut b = ctx.brush(Part::Boots);
        match self.boots {
            Boots::Bare => {
                let s = self.skin.ramp();
                b.rect(-3, 28, 4, 3, s.outline);
                b.rect(-2, 28, 3, 2, s.base);
                b.rect(0, 28, 4, 3, s.outline);
                b.rect(0, 28, 3, 2, s.base);
            }
            Boots::Wraps => {
                let w = Fabric::Brown.ramp();
                b.rect(-3, 26, 4, 5, w.outline);
                b.rect(-2, 27, 3, 3, w.base);
                b.rect(0, 26, 4, 5, w.outline);
                b.rect(0, 27, 3, 3, w.base);
            }
            Boots::Leather => {
                let l = Fabric::Brown.ramp();
                b.rect(-4, 25, 5, 6, l.outline);
                b.rect(-3, 26, 4, 4, l.shadow);
                b.rect(-3, 26, 3, 3, l.base);
                b.rect(0, 25, 5, 6, l.outline);
                b.rect(1, 26, 4, 4, l.shadow);
                b.rect(1, 26, 3, 3, l.base);
            }
            Boots::Iron | Boots::Knight | Boots::Plated => {
                let s = Metal::Steel.ramp();
                b.rect(-4, 24, 5, 7, s.outline);
                b.rect(-3, 25, 4, 5, s.shadow);
                b.rect(-3, 25, 3, 4, s.base);
                b.rect(0, 24, 5, 7, s.outline);
                b.rect(1, 25, 4, 5, s.shadow);
                b.rect(1, 25, 3, 4, s.base);
            }
        }
    }
}

// ============================================================================
// Helmet
// ============================================================================

/// Headgear. Emits [`HeadCovered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelmetLayer(pub Helmet);

impl CharacterLayer for HelmetLayer {
    fn name(&self) -> &'static str {
        "helmet"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        let p = Metal::Iron.ramp();
        let mut b = ctx.brush(Part::Helmet);

        match self.0 {
            Helmet::Knight | Helmet::Armet | Helmet::Barbute => {
                b.rect(-5, -1, 10, 10, p.outline);
                b.rect(-4, 0, 8, 8, p.shadow);
                b.rect(-4, 0, 7, 7, p.base);
                match self.0 {
                    Helmet::Knight => {
                        b.rect(-3, 1, 4, 3, p.highlight);
                        b.rect(-3, 3, 6, 1, SLIT);
                        b.rect(-1, -2, 2, 2, p.base);
                    }
                    Helmet::Armet => {
                        b.rect(-3, 3, 7, 3, p.shadow);
                        b.rect(-2, 3, 5, 2, p.base);
                        b.rect(-2, 4, 5, 1, SLIT);
                        b.rect(-1, -3, 2, 3, p.base);
                    }
                    _ => {
                        b.rect(-1, 2, 2, 6, SLIT);
                        b.rect(-2, 2, 4, 2, SLIT);
                    }
                }
            }
            Helmet::Bucket => {
                b.rect(-5, -2, 10, 11, p.outline);
                b.rect(-4, -1, 8, 9, p.shadow);
                b.rect(-4, -1, 7, 8, p.base);
                b.rect(-3, 2, 2, 1, SLIT);
                b.rect(1, 2, 2, 1, SLIT);
                for x in [-2, 0, 1] {
                    b.px(x, 5, SLIT);
                }
            }
            Helmet::Crown => {
                let g = Metal::Gold.ramp();
                b.rect(-4, -1, 8, 3, g.outline);
                b.rect(-3, 0, 6, 2, g.base);
                b.rect(-3, -3, 2, 3, g.base);
                b.rect(0, -4, 2, 4, g.base);
                b.px(2, -2, g.shadow);
                b.px(-2, 0, Color::hex(0x8a2020));
                b.px(1, 0, Color::hex(0x206080));
            }
            Helmet::Hood => {
                let f = Fabric::Brown.ramp();
                b.rect(-5, -2, 10, 11, f.outline);
                b.rect(-4, -1, 8, 9, f.shadow);
                b.rect(-4, -1, 7, 8, f.base);
                b.rect(-2, 2, 5, 5, SLIT);
            }
            Helmet::Mask => {
                let bone = Color::hex(0xc8c0b8);
                b.rect(-4, 0, 8, 7, Color::hex(0x686058));
                b.rect(-3, 1, 6, 5, bone);
                b.rect(-3, 1, 2, 2, Color::BLACK);
                b.rect(1, 1, 2, 2, Color::BLACK);
                b.px(-1, 3, Color::BLACK);
                b.px(0, 3, Color::BLACK);
                b.rect(-2, 5, 4, 1, Color::hex(0xa8a098));
            }
        }
    }

    fn emit(&self, ctx: &mut RenderContext) {
        ctx.set(HeadCovered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationPhase;
    use crate::layer::BodyLayer;
    use crate::options::Build;
    use crate::surface::Surface;

    fn ctx() -> RenderContext {
        RenderContext::new(Surface::new(64, 96, 1), AnimationPhase::at(0.0))
    }

    #[test]
    fn chest_follows_body_width() {
        let mut slim = ctx();
        BodyLayer::new(Skin::Human, Build::Slim).apply(&mut slim);
        ChestLayer(Chest::Tunic).apply(&mut slim);

        let mut heavy = ctx();
        BodyLayer::new(Skin::Human, Build::Heavy).apply(&mut heavy);
        ChestLayer(Chest::Tunic).apply(&mut heavy);

        let grey = Fabric::Grey.ramp();
        // Slim torso starts at x 28, heavy at x 26.
        assert_eq!(slim.surface.logical_pixel(28, 62), Some(grey.base));
        assert_eq!(heavy.surface.logical_pixel(26, 62), Some(grey.base));
        assert_ne!(slim.surface.logical_pixel(26, 62), Some(grey.base));
    }

    #[test]
    fn chest_without_metrics_uses_normal_build() {
        let mut ctx = ctx();
        ChestLayer(Chest::Plate).apply(&mut ctx);
        assert_eq!(
            ctx.surface.logical_pixel(27, 67),
            Some(Metal::Steel.ramp().base)
        );
    }

    #[test]
    fn helmet_emits_head_covered() {
        let mut ctx = ctx();
        HelmetLayer(Helmet::Crown).apply(&mut ctx);
        assert!(ctx.has::<HeadCovered>());
        assert_eq!(
            ctx.surface.logical_pixel(30, 52),
            Some(Color::hex(0x8a2020)),
            "crown gem"
        );
    }

    #[test]
    fn bare_feet_use_skin() {
        let mut ctx = ctx();
        BootsLayer::new(Boots::Bare, Skin::Cursed).apply(&mut ctx);
        assert_eq!(
            ctx.surface.logical_pixel(30, 80),
            Some(Skin::Cursed.ramp().base)
        );
    }
}
