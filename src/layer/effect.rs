//! Aura overlays. Every position and opacity is a function of time only.

use std::f32::consts::TAU;

use crate::color::Color;
use crate::layer::{CharacterLayer, HeadCovered, Part, RenderContext};
use crate::options::Effect;
use crate::ramps::Glow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectLayer(pub Effect);

impl CharacterLayer for EffectLayer {
    fn name(&self) -> &'static str {
        "effect"
    }

    fn paint(&self, ctx: &mut RenderContext) {
        let t = ctx.phase.time_ms as f32;
        let pulse = ctx.phase.pulse();
        let covered = ctx.has::<HeadCovered>();
        let mut b = ctx.brush(Part::Effect);

        match self.0 {
            Effect::Ember => {
                let ember = Glow::Ember.ramp();
                let glow = Glow::Ember.glow_color();
                b.dot(-2.0, 4.0, glow, pulse);
                b.dot(3.0, 6.0, glow, pulse);
                b.dot(-1.0, 18.0, ember.base, pulse);
                b.dot(2.0, 20.0, ember.base, pulse);
                if !covered {
                    b.dot(-2.0, 3.0, glow, pulse);
                    b.dot(1.0, 3.0, glow, pulse);
                }

                // Sparks spiral upward from the waist and fade out.
                for i in 0..8 {
                    let fi = i as f32;
                    let angle = fi / 8.0 * TAU + t / 800.0;
                    let radius = 8.0 + (t / 300.0 + fi).sin() * 3.0;
                    let climb = (t / 50.0 + fi * 12.0) % 32.0;
                    let alpha = 1.0 - climb / 32.0;
                    let spark = Color::rgb(255, 100 + i * 15, 0);
                    b.dot(angle.cos() * radius, 26.0 - climb, spark, alpha);
                }
            }
            Effect::Curse => {
                let curse = Glow::Curse.ramp();
                let glow = Glow::Curse.glow_color();
                let alpha = pulse * 0.8;
                b.dot(2.0, 3.0, glow, alpha);
                b.dot(3.0, 4.0, curse.base, alpha);
                b.dot(2.0, 5.0, glow, alpha);
                for (x, y) in [(-3.0, 14.0), (-2.0, 14.0), (-3.0, 15.0), (-2.0, 15.0)] {
                    b.dot(x, y, curse.base, alpha);
                }

                for i in 0..5 {
                    let fi = i as f32;
                    let x = -6.0 + (i % 3) as f32 * 6.0 + (t / 350.0 + fi).sin() * 1.5;
                    let y = 10.0 + (i / 3) as f32 * 12.0 + (t / 350.0 + fi).cos() * 1.5;
                    let alpha = 0.4 + (t / 200.0 + fi).sin() * 0.3;
                    b.dot(x, y, Color::hex(0x9050c0), alpha);
                }
            }
            Effect::Blood => {
                let blood = Glow::Blood.ramp();
                b.px(-2, 5, blood.base);
                b.px(-2, 6, blood.base);
                b.px(-3, 7, blood.shadow);
                b.px(3, 16, blood.base);
                b.px(3, 17, blood.shadow);
            }
            Effect::Souls => {
                let alpha = pulse * 0.6;
                let drift = (t / 50.0) % 10.0;
                b.dot(-4.0, 8.0 - drift / 2.0, Color::hex(0xa0e0ff), alpha);
                b.dot(5.0, 12.0 - drift / 3.0, Color::hex(0x80c0e0), alpha);
                b.dot(0.0, 6.0 - drift / 4.0, Color::hex(0xc0f0ff), alpha);

                for i in 0..6 {
                    let fi = i as f32;
                    let angle = t / 1200.0 + fi * 1.05;
                    let radius = 12.0 + (t / 400.0 + fi).sin() * 3.0;
                    let x = angle.cos() * radius;
                    let y = 14.0 + angle.sin() * radius * 0.4;
                    let alpha = 0.5 + (t / 250.0 + fi).sin() * 0.3;
                    b.dot(x, y, Color::hex(0x60b0ff), alpha);
                    b.dot(x + 1.0, y, Color::hex(0xa0d0ff), alpha * 0.6);
                }
            }
            Effect::Holy => {
                let ray = Glow::Holy.ramp().highlight;
                for i in 0..8 {
                    let fi = i as f32;
                    let angle = fi / 8.0 * TAU + t / 3000.0;
                    let len = 8.0 + (t / 350.0 + fi).sin() * 3.0;
                    let mut j = 0.0;
                    while j < len {
                        let x = angle.cos() * (6.0 + j);
                        let y = 14.0 + angle.sin() * (3.0 + j * 0.5);
                        b.dot(x, y, ray, (1.0 - j / len) * 0.35);
                        j += 1.0;
                    }
                }

                let halo = 0.2 + (t / 400.0).sin() * 0.1;
                for i in 0..12 {
                    let angle = i as f32 / 12.0 * TAU;
                    b.dot(
                        angle.cos() * 6.0,
                        -3.0 + angle.sin() * 1.5,
                        Glow::Holy.glow_color(),
                        halo,
                    );
                }
            }
        }
    }
}
