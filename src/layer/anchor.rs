//! Anchor-relative placement of every procedural part.
//!
//! All layer drawing tables are written relative to the figure anchor (the
//! horizontal centre of the body, top of the head). This module is the only
//! place that knows where each part hangs and which animation offsets move
//! it.

use crate::animation::AnimationPhase;

/// Which animation offsets a part follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    /// Fixed to the ground; ignores breathing and the reaction lift.
    Ground,
    /// Whole-figure breathing and lift only.
    Figure,
    Torso,
    Head,
    Arms,
    /// Torso offsets plus the sideways cloak sway.
    Cloak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Shadow,
    CapeBack,
    CapeClasp,
    Shield,
    Head,
    Torso,
    Arms,
    Legs,
    Boots,
    Chest,
    Face,
    Hair,
    Helmet,
    Weapon,
    Effect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub attach: Attach,
    pub dx: f32,
    pub dy: f32,
}

const fn at(attach: Attach, dx: f32, dy: f32) -> Placement {
    Placement { attach, dx, dy }
}

/// Grip point of the weapon hand.
pub const WEAPON_GRIP: (f32, f32) = (8.0, 14.0);

/// Centre of the shield arm.
pub const SHIELD_ARM: (f32, f32) = (-10.0, 12.0);

/// Centre of the ground shadow below the boots.
pub const SHADOW_CENTER: (f32, f32) = (0.0, 31.0);

/// The offset table.
pub const fn placement(part: Part) -> Placement {
    match part {
        Part::Shadow => at(Attach::Ground, SHADOW_CENTER.0, SHADOW_CENTER.1),
        Part::CapeBack => at(Attach::Cloak, 0.0, 0.0),
        Part::CapeClasp => at(Attach::Torso, 0.0, 0.0),
        Part::Shield => at(Attach::Arms, SHIELD_ARM.0, SHIELD_ARM.1),
        Part::Weapon => at(Attach::Arms, WEAPON_GRIP.0, WEAPON_GRIP.1),
        Part::Head | Part::Face | Part::Hair | Part::Helmet => at(Attach::Head, 0.0, 0.0),
        Part::Torso | Part::Chest => at(Attach::Torso, 0.0, 0.0),
        Part::Arms => at(Attach::Arms, 0.0, 0.0),
        Part::Legs | Part::Boots | Part::Effect => at(Attach::Figure, 0.0, 0.0),
    }
}

/// Figure anchor in logical surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f32,
    pub y: f32,
}

impl Anchor {
    /// Distance from the bottom edge to the top of the head. Puts the boots
    /// on the ground line, which sits 12 px above the bottom edge.
    pub const HEAD_FROM_BOTTOM: f32 = 44.0;

    pub fn for_canvas(width: u32, height: u32) -> Self {
        Self {
            x: (width / 2) as f32,
            y: height as f32 - Self::HEAD_FROM_BOTTOM,
        }
    }

    /// Origin for `part` at the given phase.
    pub fn origin(&self, part: Part, phase: &AnimationPhase) -> (f32, f32) {
        let placement = placement(part);
        let figure = phase.figure_offset();
        let (dx, dy) = match placement.attach {
            Attach::Ground => (0.0, 0.0),
            Attach::Figure => (0.0, figure),
            Attach::Torso => (0.0, figure + phase.limbs.torso),
            Attach::Head => (0.0, figure + phase.limbs.head),
            Attach::Arms => (0.0, figure + phase.limbs.arms),
            Attach::Cloak => (phase.cloak_sway, figure + phase.limbs.torso),
        };
        (self.x + placement.dx + dx, self.y + placement.dy + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::ReactionState;

    #[test]
    fn anchor_centres_figure_on_canvas() {
        let anchor = Anchor::for_canvas(64, 96);
        assert_eq!((anchor.x, anchor.y), (32.0, 52.0));
        let weapon = anchor.origin(Part::Weapon, &AnimationPhase::at(0.0));
        assert_eq!(weapon, (40.0, 66.0));
    }

    #[test]
    fn limbs_move_independently() {
        let anchor = Anchor::for_canvas(64, 96);
        // Breathing frame 1: head -0.5, arms +0.5.
        let phase = AnimationPhase::new(0.0, 1, ReactionState::Idle);
        assert_eq!(anchor.origin(Part::Hair, &phase).1, 51.5);
        assert_eq!(anchor.origin(Part::Weapon, &phase).1, 66.5);
        assert_eq!(anchor.origin(Part::Chest, &phase).1, 52.0);
        assert_eq!(anchor.origin(Part::CapeBack, &phase).0, 33.0);
    }

    #[test]
    fn shadow_ignores_reaction_lift() {
        let anchor = Anchor::for_canvas(64, 96);
        let lifted = AnimationPhase::new(0.0, 0, ReactionState::trigger(0.0));
        assert_eq!(anchor.origin(Part::Shadow, &lifted).1, 83.0);
        assert_eq!(anchor.origin(Part::Legs, &lifted).1, 50.0);
    }
}
