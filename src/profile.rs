//! Serializable character profiles for saving, loading and passing between
//! processes.
//!
//! A profile stores every slot as its option id string. Missing keys take
//! the slot default and unknown ids fall back to the slot default when the
//! profile is turned into a typed configuration.
//!
//! # Example
//!
//! ```
//! use hollow_forge::{CharacterConfiguration, CharacterProfile};
//!
//! let profile = CharacterProfile::from_json(r#"{"chest": "plate", "aura": "ember"}"#).unwrap();
//! let config = profile.to_configuration();
//! assert_eq!(config.class_title(), "KNIGHT");
//!
//! let json = CharacterProfile::from(&config).to_json().unwrap();
//! assert!(json.contains("\"effect\":\"ember\""));
//! ```

use serde::{Deserialize, Serialize};

use crate::character::CharacterConfiguration;
use crate::options::{SheetSlot, Slot};
use crate::sheet::SheetConfiguration;

// ============================================================================
// CharacterProfile
// ============================================================================

/// String-keyed form of a [`CharacterConfiguration`].
///
/// # JSON Format
///
/// ```json
/// {
///   "skin": "hollow",
///   "build": "normal",
///   "face": "normal",
///   "hair": "none",
///   "helmet": "knight",
///   "chest": "plate",
///   "legs": "cloth",
///   "boots": "leather",
///   "cape": "none",
///   "weapon": "sword",
///   "shield": "none",
///   "scars": "none",
///   "effect": "none",
///   "background": "bonfire"
/// }
/// ```
///
/// `body`, `helm`, `aura` and `effects` are read as older spellings of
/// `build`, `helmet` and `effect`. A document may use only one spelling per
/// field: naming both is a duplicate-field error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct CharacterProfile {
    pub skin: String,
    #[serde(alias = "body")]
    pub build: String,
    pub face: String,
    pub hair: String,
    #[serde(alias = "helm")]
    pub helmet: String,
    pub chest: String,
    pub legs: String,
    pub boots: String,
    pub cape: String,
    pub weapon: String,
    pub shield: String,
    pub scars: String,
    #[serde(alias = "aura", alias = "effects")]
    pub effect: String,
    pub background: String,
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self::from(&CharacterConfiguration::default())
    }
}

impl From<&CharacterConfiguration> for CharacterProfile {
    fn from(config: &CharacterConfiguration) -> Self {
        let id = |slot: Slot| config.get(slot).to_string();
        Self {
            skin: id(Slot::Skin),
            build: id(Slot::Build),
            face: id(Slot::Face),
            hair: id(Slot::Hair),
            helmet: id(Slot::Helmet),
            chest: id(Slot::Chest),
            legs: id(Slot::Legs),
            boots: id(Slot::Boots),
            cape: id(Slot::Cape),
            weapon: id(Slot::Weapon),
            shield: id(Slot::Shield),
            scars: id(Slot::Scars),
            effect: id(Slot::Effect),
            background: id(Slot::Background),
        }
    }
}

impl CharacterProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored id for `slot`.
    pub fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::Skin => &self.skin,
            Slot::Build => &self.build,
            Slot::Face => &self.face,
            Slot::Hair => &self.hair,
            Slot::Helmet => &self.helmet,
            Slot::Chest => &self.chest,
            Slot::Legs => &self.legs,
            Slot::Boots => &self.boots,
            Slot::Cape => &self.cape,
            Slot::Weapon => &self.weapon,
            Slot::Shield => &self.shield,
            Slot::Scars => &self.scars,
            Slot::Effect => &self.effect,
            Slot::Background => &self.background,
        }
    }

    /// Sets a slot id without validating it.
    pub fn with(mut self, slot: Slot, id: impl Into<String>) -> Self {
        let id = id.into();
        match slot {
            Slot::Skin => self.skin = id,
            Slot::Build => self.build = id,
            Slot::Face => self.face = id,
            Slot::Hair => self.hair = id,
            Slot::Helmet => self.helmet = id,
            Slot::Chest => self.chest = id,
            Slot::Legs => self.legs = id,
            Slot::Boots => self.boots = id,
            Slot::Cape => self.cape = id,
            Slot::Weapon => self.weapon = id,
            Slot::Shield => self.shield = id,
            Slot::Scars => self.scars = id,
            Slot::Effect => self.effect = id,
            Slot::Background => self.background = id,
        }
        self
    }

    /// Resolves every slot, falling back to defaults for unknown ids.
    pub fn to_configuration(&self) -> CharacterConfiguration {
        let mut config = CharacterConfiguration::default();
        for &slot in Slot::ALL {
            config.set(slot, self.get(slot));
        }
        config
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// SheetProfile
// ============================================================================

/// String-keyed form of a [`SheetConfiguration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SheetProfile {
    pub body: String,
    pub hair: String,
    pub head: String,
    pub torso: String,
    pub legs: String,
    pub weapon: String,
    pub background: String,
}

impl Default for SheetProfile {
    fn default() -> Self {
        Self::from(&SheetConfiguration::default())
    }
}

impl From<&SheetConfiguration> for SheetProfile {
    fn from(config: &SheetConfiguration) -> Self {
        let id = |slot: SheetSlot| config.get(slot).to_string();
        Self {
            body: id(SheetSlot::Body),
            hair: id(SheetSlot::Hair),
            head: id(SheetSlot::Head),
            torso: id(SheetSlot::Torso),
            legs: id(SheetSlot::Legs),
            weapon: id(SheetSlot::Weapon),
            background: id(SheetSlot::Background),
        }
    }
}

impl SheetProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SheetSlot) -> &str {
        match slot {
            SheetSlot::Background => &self.background,
            SheetSlot::Body => &self.body,
            SheetSlot::Hair => &self.hair,
            SheetSlot::Legs => &self.legs,
            SheetSlot::Torso => &self.torso,
            SheetSlot::Head => &self.head,
            SheetSlot::Weapon => &self.weapon,
        }
    }

    pub fn to_configuration(&self) -> SheetConfiguration {
        let mut config = SheetConfiguration::default();
        for &slot in SheetSlot::ALL {
            config.set(slot, self.get(slot));
        }
        config
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
