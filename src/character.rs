//! Typed character configuration for the procedural variant.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::options::{
    Background, Boots, Build, Cape, Chest, Effect, Face, Hair, Helmet, Legs, NONE_ID,
    OptionEntry, Scars, Shield, Skin, Slot, Weapon,
};

/// One selection per procedural slot. `None` omits the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharacterConfiguration {
    pub skin: Skin,
    pub build: Build,
    pub face: Face,
    pub hair: Option<Hair>,
    pub helmet: Option<Helmet>,
    pub chest: Chest,
    pub legs: Legs,
    pub boots: Boots,
    pub cape: Option<Cape>,
    pub weapon: Option<Weapon>,
    pub shield: Option<Shield>,
    pub scars: Option<Scars>,
    pub effect: Option<Effect>,
    pub background: Background,
}

impl Default for CharacterConfiguration {
    fn default() -> Self {
        Self {
            skin: Skin::default(),
            build: Build::default(),
            face: Face::default(),
            hair: None,
            helmet: None,
            chest: Chest::default(),
            legs: Legs::default(),
            boots: Boots::default(),
            cape: None,
            weapon: Some(Weapon::Sword),
            shield: None,
            scars: None,
            effect: None,
            background: Background::default(),
        }
    }
}

impl CharacterConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id currently selected for `slot` ([`NONE_ID`] for an
    /// empty optional slot).
    pub fn get(&self, slot: Slot) -> &'static str {
        fn opt<T>(value: Option<T>, id: fn(T) -> &'static str) -> &'static str {
            value.map(id).unwrap_or(NONE_ID)
        }

        match slot {
            Slot::Skin => self.skin.id(),
            Slot::Build => self.build.id(),
            Slot::Face => self.face.id(),
            Slot::Hair => opt(self.hair, Hair::id),
            Slot::Helmet => opt(self.helmet, Helmet::id),
            Slot::Chest => self.chest.id(),
            Slot::Legs => self.legs.id(),
            Slot::Boots => self.boots.id(),
            Slot::Cape => opt(self.cape, Cape::id),
            Slot::Weapon => opt(self.weapon, Weapon::id),
            Slot::Shield => opt(self.shield, Shield::id),
            Slot::Scars => opt(self.scars, Scars::id),
            Slot::Effect => opt(self.effect, Effect::id),
            Slot::Background => self.background.id(),
        }
    }

    /// Selects `id` for `slot`.
    ///
    /// Unknown ids fall back to the slot's default selection. Returns true
    /// if the configuration changed.
    pub fn set(&mut self, slot: Slot, id: &str) -> bool {
        let before = *self;
        let defaults = Self::default();
        let name = slot.id();

        match slot {
            Slot::Skin => self.skin = resolve(name, id, Skin::from_id, defaults.skin),
            Slot::Build => self.build = resolve(name, id, Build::from_id, defaults.build),
            Slot::Face => self.face = resolve(name, id, Face::from_id, defaults.face),
            Slot::Hair => self.hair = resolve_optional(name, id, Hair::from_id, defaults.hair),
            Slot::Helmet => {
                self.helmet = resolve_optional(name, id, Helmet::from_id, defaults.helmet)
            }
            Slot::Chest => self.chest = resolve(name, id, Chest::from_id, defaults.chest),
            Slot::Legs => self.legs = resolve(name, id, Legs::from_id, defaults.legs),
            Slot::Boots => self.boots = resolve(name, id, Boots::from_id, defaults.boots),
            Slot::Cape => self.cape = resolve_optional(name, id, Cape::from_id, defaults.cape),
            Slot::Weapon => {
                self.weapon = resolve_optional(name, id, Weapon::from_id, defaults.weapon)
            }
            Slot::Shield => {
                self.shield = resolve_optional(name, id, Shield::from_id, defaults.shield)
            }
            Slot::Scars => self.scars = resolve_optional(name, id, Scars::from_id, defaults.scars),
            Slot::Effect => {
                self.effect = resolve_optional(name, id, Effect::from_id, defaults.effect)
            }
            Slot::Background => {
                self.background = resolve(name, id, Background::from_id, defaults.background)
            }
        }

        *self != before
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, slot: Slot, id: &str) -> Self {
        self.set(slot, id);
        self
    }

    /// Picks every slot uniformly from its option table.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for &slot in Slot::ALL {
            let id = pick(slot.options(), rng);
            self.set(slot, id);
        }
    }

    /// Class title shown on the badge.
    pub fn class_title(&self) -> &'static str {
        self.chest.class_title()
    }

    pub fn wears_helmet(&self) -> bool {
        self.helmet.is_some()
    }
}

pub(crate) fn pick<R: Rng + ?Sized>(table: &'static [OptionEntry], rng: &mut R) -> &'static str {
    table.choose(rng).map(|entry| entry.id).unwrap_or(NONE_ID)
}

pub(crate) fn resolve<T>(
    slot: &'static str,
    id: &str,
    parse: fn(&str) -> Option<T>,
    fallback: T,
) -> T {
    parse(id).unwrap_or_else(|| {
        tracing::debug!(slot, id, "unknown option id, using slot default");
        fallback
    })
}

pub(crate) fn resolve_optional<T>(
    slot: &'static str,
    id: &str,
    parse: fn(&str) -> Option<T>,
    fallback: Option<T>,
) -> Option<T> {
    if id == NONE_ID {
        return None;
    }
    match parse(id) {
        Some(value) => Some(value),
        None => {
            tracing::debug!(slot, id, "unknown option id, using slot default");
            fallback
        }
    }
}
