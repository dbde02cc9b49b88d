//! Named palette ramps used to shade the procedural sprites.

use crate::color::Color;
use crate::options::{Hair, Skin};

/// Ordered shading set for one material, darkest outline to brightest highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteRamp {
    pub outline: Color,
    pub dark: Color,
    pub shadow: Color,
    pub base: Color,
    pub highlight: Color,
    /// Emissive colour, only present on effect ramps.
    pub glow: Option<Color>,
}

const fn ramp(base: u32, shadow: u32, dark: u32, highlight: u32, outline: u32) -> PaletteRamp {
    PaletteRamp {
        outline: Color::hex(outline),
        dark: Color::hex(dark),
        shadow: Color::hex(shadow),
        base: Color::hex(base),
        highlight: Color::hex(highlight),
        glow: None,
    }
}

const fn glowing(base: u32, shadow: u32, dark: u32, highlight: u32, glow: Option<u32>) -> PaletteRamp {
    PaletteRamp {
        outline: Color::hex(dark),
        dark: Color::hex(dark),
        shadow: Color::hex(shadow),
        base: Color::hex(base),
        highlight: Color::hex(highlight),
        glow: match glow {
            Some(rgb) => Some(Color::hex(rgb)),
            None => None,
        },
    }
}

impl Skin {
    pub const fn ramp(self) -> PaletteRamp {
        match self {
            Skin::Human => ramp(0xd4a574, 0xb8876a, 0x8c6048, 0xe8c8a8, 0x5a3a28),
            Skin::Pale => ramp(0xc8b8a8, 0xa89888, 0x887868, 0xe0d4c8, 0x4a3a30),
            Skin::Hollow => ramp(0x8a7a6a, 0x6a5a4a, 0x4a3a2a, 0xa89a8a, 0x2a1a10),
            Skin::Undead => ramp(0x6a6058, 0x4a4038, 0x2a2018, 0x8a8078, 0x1a1008),
            Skin::Ashen => ramp(0x7a7068, 0x5a5048, 0x3a3028, 0x9a9088, 0x2a2018),
            Skin::Cursed => ramp(0x5a4848, 0x3a2828, 0x2a1818, 0x7a6868, 0x1a0808),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metal {
    Iron,
    Steel,
    Dark,
    Gold,
}

impl Metal {
    pub const fn ramp(self) -> PaletteRamp {
        match self {
            Metal::Iron => ramp(0x6a6a68, 0x4a4a48, 0x2a2a28, 0x8a8a88, 0x1a1a18),
            Metal::Steel => ramp(0x8a8a88, 0x6a6a68, 0x4a4a48, 0xaaaaaa, 0x2a2a28),
            Metal::Dark => ramp(0x3a3a38, 0x2a2a28, 0x1a1a18, 0x5a5a58, 0x0a0a08),
            Metal::Gold => ramp(0xc8a830, 0xa08020, 0x786010, 0xe8d060, 0x504008),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fabric {
    Brown,
    Black,
    Grey,
    Red,
}

impl Fabric {
    pub const fn ramp(self) -> PaletteRamp {
        match self {
            Fabric::Brown => ramp(0x6a4830, 0x4a3020, 0x2a1810, 0x8a6850, 0x1a0808),
            Fabric::Black => ramp(0x2a2828, 0x1a1818, 0x0a0808, 0x4a4848, 0x000000),
            Fabric::Grey => ramp(0x5a5858, 0x3a3838, 0x2a2828, 0x7a7878, 0x1a1818),
            Fabric::Red => ramp(0x8a2020, 0x6a1010, 0x4a0808, 0xaa4040, 0x2a0000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HairTone {
    Black,
    Brown,
    Grey,
    White,
}

impl HairTone {
    pub const fn ramp(self) -> PaletteRamp {
        match self {
            HairTone::Black => ramp(0x2a2420, 0x1a1410, 0x0a0400, 0x3a3430, 0x000000),
            HairTone::Brown => ramp(0x5a4030, 0x3a2820, 0x2a1810, 0x7a6050, 0x1a0800),
            HairTone::Grey => ramp(0x6a6868, 0x4a4848, 0x3a3838, 0x8a8888, 0x2a2828),
            HairTone::White => ramp(0xc8c8c8, 0xa8a8a8, 0x888888, 0xe8e8e8, 0x686868),
        }
    }
}

impl Hair {
    /// Natural colour for each hairstyle.
    pub const fn tone(self) -> HairTone {
        match self {
            Hair::Short | Hair::Long | Hair::Slicked => HairTone::Black,
            Hair::Messy => HairTone::Brown,
            Hair::Wild => HairTone::Grey,
            Hair::Aged => HairTone::White,
        }
    }
}

/// Effect ramps carry no outline; `outline` mirrors `dark`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glow {
    Ember,
    Curse,
    Blood,
    Holy,
}

impl Glow {
    pub const fn ramp(self) -> PaletteRamp {
        match self {
            Glow::Ember => glowing(0xff8030, 0xe06020, 0xc04010, 0xffa050, Some(0xff6010)),
            Glow::Curse => glowing(0x8040a0, 0x603080, 0x402060, 0xa060c0, Some(0x6020a0)),
            Glow::Blood => glowing(0x8a1010, 0x6a0808, 0x4a0000, 0xaa3030, None),
            Glow::Holy => glowing(0xf0e0a0, 0xd0c080, 0xb0a060, 0xfff0c0, Some(0xffe080)),
        }
    }

    /// The glow colour, falling back to the highlight.
    pub const fn glow_color(self) -> Color {
        let ramp = self.ramp();
        match ramp.glow {
            Some(glow) => glow,
            None => ramp.highlight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steel_matches_reference_values() {
        let steel = Metal::Steel.ramp();
        assert_eq!(steel.base, Color::hex(0x8a8a88));
        assert_eq!(steel.shadow, Color::hex(0x6a6a68));
        assert_eq!(steel.highlight, Color::hex(0xaaaaaa));
        assert_eq!(steel.outline, Color::hex(0x2a2a28));
        assert_eq!(steel.glow, None);
    }

    #[test]
    fn hair_styles_pick_their_tone() {
        assert_eq!(Hair::Short.tone(), HairTone::Black);
        assert_eq!(Hair::Aged.tone(), HairTone::White);
        assert_eq!(HairTone::Black.ramp().base, Color::hex(0x2a2420));
    }

    #[test]
    fn blood_glow_falls_back_to_highlight() {
        assert_eq!(Glow::Blood.glow_color(), Glow::Blood.ramp().highlight);
        assert_eq!(Glow::Ember.glow_color(), Color::hex(0xff6010));
    }
}
