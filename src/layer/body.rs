use crate::layer::{BodyMetrics, CharacterLayer, Part, RenderContext};
use crate::options::{Build, Skin};

/// Bare humanoid silhouette: head, neck, torso, arms, hands and legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLayer {
    pub skin: Skin,
    pub build: Build,
}

impl BodyLayer {
    pub fn new(skin: Skin, build: Build) -> Self {
        Self { skin, build }
    }

    pub fn metrics(&self) -> BodyMetrics {
        BodyMetrics::for_width(body_width(self.build))
    }
}

pub const fn body_width(build: Build) -> i32 {
    match build {
        Build::Slim => 8,
        Build::Normal => 10,
        Build::Heavy => 12,
    }
}

impl CharacterLayer for BodyLayer {
    fn name(&self) -> &'static str {
        "body"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        let p = self.skin.ramp();
        let BodyMetrics {
            body_width: bw,
            torso_left: tx,
        } = self.metrics();

        let mut head = ctx.brush(Part::Head);
        head.rect(-4, 0, 8, 8, p.outline);
        head.rect(-3, 1, 6, 6, p.shadow);
        head.rect(-3, 1, 5, 5, p.base);
        head.rect(-2, 2, 3, 3, p.highlight);

        let mut torso = ctx.brush(Part::Torso);
        torso.rect(-1, 8, 2, 2, p.shadow);
        torso.rect(tx - 1, 9, bw + 2, 10, p.outline);
        torso.rect(tx, 10, bw, 8, p.shadow);
        torso.rect(tx, 10, bw - 1, 7, p.base);

        let mut arms = ctx.brush(Part::Arms);
        for x in [tx - 3, tx + bw] {
            arms.rect(x, 10, 3, 8, p.outline);
            arms.rect(x, 18, 3, 3, p.outline);
        }
        arms.rect(tx - 2, 11, 2, 6, p.shadow);
        arms.rect(tx + bw, 11, 2, 6, p.shadow);
        arms.rect(tx - 2, 18, 2, 2, p.base);
        arms.rect(tx + bw + 1, 18, 2, 2, p.base);

        let mut legs = ctx.brush(Part::Legs);
        legs.rect(-3, 19, 3, 10, p.outline);
        legs.rect(-2, 20, 2, 8, p.shadow);
        legs.rect(0, 19, 3, 10, p.outline);
        legs.rect(0, 20, 2, 8, p.shadow);
    }

    fn emit(&self, ctx: &mut RenderContext) {
        ctx.set(self.metrics());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationPhase;
    use crate::surface::Surface;

    #[test]
    fn build_controls_torso_width() {
        assert_eq!(BodyLayer::new(Skin::Human, Build::Slim).metrics().torso_left, -4);
        assert_eq!(BodyLayer::new(Skin::Human, Build::Heavy).metrics().body_width, 12);
    }

    #[test]
    fn paints_skin_and_emits_metrics() {
        let mut ctx = RenderContext::new(Surface::new(64, 96, 1), AnimationPhase::at(0.0));
        let layer = BodyLayer::new(Skin::Human, Build::Normal);
        layer.apply(&mut ctx);

        let ramp = Skin::Human.ramp();
        // Head highlight at anchor (-2, 2).
        assert_eq!(ctx.surface.logical_pixel(30, 54), Some(ramp.highlight));
        // Torso base at torso_left.
        assert_eq!(ctx.surface.logical_pixel(27, 62), Some(ramp.base));
        assert_eq!(ctx.get::<BodyMetrics>(), Some(&BodyMetrics::for_width(10)));
    }
}
