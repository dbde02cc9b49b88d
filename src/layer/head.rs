//! Head details: face, scars and hair.

use crate::color::Color;
use crate::layer::{CharacterLayer, Part, RenderContext};
use crate::options::{Face, Hair, Scars, Skin};

const EYE: Color = Color::hex(0x1a1a18);
const SOCKET: Color = Color::hex(0x0a0808);
const SCAR: Color = Color::hex(0x6a3030);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceLayer {
    pub face: Face,
    pub skin: Skin,
}

impl FaceLayer {
    pub fn new(face: Face, skin: Skin) -> Self {
        Self { face, skin }
    }
}

impl CharacterLayer for FaceLayer {
    fn name(&self) -> &'static str {
        "face"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        let p = self.skin.ramp();
        let mut b = ctx.brush(Part::Face);

        match self.face {
            Face::Normal => {
                b.px(-2, 3, EYE);
                b.px(1, 3, EYE);
                b.rect(-1, 5, 2, 1, p.shadow);
            }
            Face::Gaunt => {
                b.rect(-3, 2, 2, 2, SOCKET);
                b.rect(1, 2, 2, 2, SOCKET);
                b.px(-2, 3, Color::hex(0x2a1a10));
                b.px(1, 3, Color::hex(0x2a1a10));
                b.px(-3, 4, p.dark);
                b.px(2, 4, p.dark);
            }
            Face::Scarred => {
                b.px(-2, 3, EYE);
                b.px(1, 3, Color::hex(0x3a2020));
                b.px(1, 2, SCAR);
                b.px(1, 4, SCAR);
                b.px(2, 5, SCAR);
            }
            Face::Hollow => {
                b.rect(-3, 2, 2, 2, Color::BLACK);
                b.rect(1, 2, 2, 2, Color::BLACK);
                b.px(-2, 3, Color::hex(0xc89030));
                b.px(1, 3, Color::hex(0xc89030));
            }
            Face::Skull => {
                b.rect(-3, 2, 2, 2, Color::BLACK);
                b.rect(1, 2, 2, 2, Color::BLACK);
                b.px(-1, 4, Color::BLACK);
                b.px(0, 4, Color::BLACK);
                b.rect(-2, 5, 4, 1, p.highlight);
            }
            Face::Noble => {
                b.px(-2, 3, Color::hex(0x2a2a28));
                b.px(1, 3, Color::hex(0x2a2a28));
                b.rect(-3, 2, 2, 1, p.dark);
                b.rect(1, 2, 2, 1, p.dark);
            }
        }
    }
}

/// Scars and marks. Facial marks follow the head, body marks the torso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScarsLayer(pub Scars);

impl CharacterLayer for ScarsLayer {
    fn name(&self) -> &'static str {
        "scars"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        match self.0 {
            Scars::Face => {
                let mut b = ctx.brush(Part::Face);
                for (x, y) in [(1, 2), (1, 3), (2, 4), (2, 5)] {
                    b.px(x, y, SCAR);
                }
            }
            Scars::Burns => {
                ctx.brush(Part::Face)
                    .rect(1, 2, 2, 3, Color::rgb(80, 30, 20).with_opacity(0.6));
                ctx.brush(Part::Chest)
                    .rect(-2, 12, 3, 4, Color::rgb(60, 20, 15).with_opacity(0.5));
            }
            Scars::Decay => {
                let rot = Color::rgb(40, 30, 20);
                let mut face = ctx.brush(Part::Face);
                face.px(-2, 3, rot.with_opacity(0.7));
                face.px(-3, 4, rot.with_opacity(0.7));
                let mut body = ctx.brush(Part::Chest);
                body.px(3, 14, rot.with_opacity(0.6));
                body.px(-4, 16, rot.with_opacity(0.6));
            }
            Scars::Brand => {
                let mut b = ctx.brush(Part::Chest);
                b.rect(2, 10, 3, 3, Color::rgb(100, 30, 20).with_opacity(0.8));
                b.px(3, 11, Color::rgb(200, 80, 40).with_opacity(0.9));
            }
        }
    }
}

/// Hair in the style's natural tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HairLayer(pub Hair);

impl CharacterLayer for HairLayer {
    fn name(&self) -> &'static str {
        "hair"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        let p = self.0.tone().ramp();
        let mut b = ctx.brush(Part::Hair);

        match self.0 {
            Hair::Short | Hair::Slicked => {
                let depth = if self.0 == Hair::Short { 4 } else { 3 };
                b.rect(-4, -1, 8, depth, p.outline);
                b.rect(-3, 0, 6, 2, p.base);
                b.rect(-2, 0, 4, 1, p.highlight);
            }
            Hair::Messy => {
                b.rect(-5, -2, 10, 5, p.outline);
                b.rect(-4, -1, 8, 4, p.base);
                b.px(-5, 0, p.base);
                b.px(4, -1, p.base);
                b.px(-3, -2, p.base);
                b.rect(-3, -1, 5, 2, p.highlight);
            }
            Hair::Long | Hair::Aged => {
                b.rect(-4, -1, 8, 4, p.outline);
                b.rect(-3, 0, 6, 3, p.base);
                let strand = if self.0 == Hair::Long {
                    8
                } else {
                    b.rect(-2, 0, 4, 2, p.highlight);
                    6
                };
                for x in [-5, 3] {
                    b.rect(x, 3, 2, strand, p.outline);
                }
                b.rect(-4, 4, 1, strand - 2, p.base);
                b.rect(3, 4, 1, strand - 2, p.base);
            }
            Hair::Wild => {
                b.rect(-5, -3, 10, 6, p.outline);
                b.rect(-4, -2, 8, 5, p.base);
                b.px(-4, -3, p.base);
                b.px(0, -4, p.base);
                b.px(3, -3, p.base);
                b.rect(-3, -1, 5, 2, p.highlight);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationPhase;
    use crate::surface::Surface;

    fn painted(layer: &dyn CharacterLayer) -> Surface {
        let mut ctx = RenderContext::new(Surface::new(64, 96, 1), AnimationPhase::at(0.0));
        layer.apply(&mut ctx);
        ctx.into_surface()
    }

    #[test]
    fn every_face_marks_the_eye_row() {
        for face in Face::ALL {
            let surface = painted(&FaceLayer::new(*face, Skin::Human));
            let eye_row = (26..38).any(|x| {
                surface
                    .logical_pixel(x, 55)
                    .is_some_and(|c| !c.is_transparent())
            });
            assert!(eye_row, "{face} draws nothing at eye level");
        }
    }

    #[test]
    fn short_hair_uses_black_tone() {
        let surface = painted(&HairLayer(Hair::Short));
        assert_eq!(surface.logical_pixel(29, 53), Some(Color::hex(0x2a2420)));
        assert_eq!(surface.logical_pixel(30, 52), Some(Color::hex(0x3a3430)));
    }

    #[test]
    fn burns_are_translucent() {
        let surface = painted(&ScarsLayer(Scars::Burns));
        let burn = surface.logical_pixel(33, 54).unwrap();
        assert!(burn.a > 0 && burn.a < 255);
    }
}
