//! Static option tables for every character slot.
//!
//! Each slot is a closed enum generated by [`option_table!`], so the
//! compositors can match exhaustively while profiles and UIs keep working
//! with the identifier strings. Optional slots are modelled as
//! `Option<T>` in configurations; their tables list the [`NONE_ID`] entry
//! first.

use std::fmt;

/// Identifier of the "omit this layer" entry in optional slot tables.
pub const NONE_ID: &str = "none";

/// One selectable entry in an option table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Sheet path relative to the sprite root, for sprite-sheet slots.
    pub sprite_path: Option<&'static str>,
}

impl OptionEntry {
    pub const NONE: Self = Self {
        id: NONE_ID,
        display_name: "None",
        sprite_path: None,
    };
}

/// Looks an id up in a table.
pub fn find_entry(table: &'static [OptionEntry], id: &str) -> Option<&'static OptionEntry> {
    table.iter().find(|entry| entry.id == id)
}

macro_rules! option_table {
    (@none $_opt:ident) => {
        OptionEntry::NONE
    };
    (@path) => {
        None
    };
    (@path $path:literal) => {
        Some($path)
    };
    (
        $(#[$meta:meta])*
        pub enum $name:ident $([$opt:ident])? $(default $default:ident)? {
            $($variant:ident => $id:literal, $display:literal $(, $path:literal)?;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Every variant in table order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The option table as shown to users.
            pub const TABLE: &'static [OptionEntry] = &[
                $(option_table!(@none $opt),)?
                $(OptionEntry {
                    id: $id,
                    display_name: $display,
                    sprite_path: option_table!(@path $($path)?),
                },)+
            ];

            pub const fn id(self) -> &'static str {
                match self {
                    $($name::$variant => $id,)+
                }
            }

            pub const fn display_name(self) -> &'static str {
                match self {
                    $($name::$variant => $display,)+
                }
            }

            pub fn from_id(id: &str) -> Option<Self> {
                match id {
                    $($id => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        $(
            impl Default for $name {
                fn default() -> Self {
                    $name::$default
                }
            }
        )?

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }
    };
}

// ============================================================================
// Procedural Slots
// ============================================================================

option_table! {
    pub enum Skin default Hollow {
        Human => "human", "Human";
        Pale => "pale", "Pale";
        Hollow => "hollow", "Hollow";
        Undead => "undead", "Undead";
        Ashen => "ashen", "Ashen";
        Cursed => "cursed", "Cursed";
    }
}

option_table! {
    /// Body build; controls torso width.
    pub enum Build default Normal {
        Normal => "normal", "Normal";
        Slim => "slim", "Slim";
        Heavy => "heavy", "Heavy";
    }
}

option_table! {
    pub enum Face default Normal {
        Normal => "normal", "Normal";
        Gaunt => "gaunt", "Gaunt";
        Scarred => "scarred", "Scarred";
        Hollow => "hollow", "Hollow";
        Skull => "skull", "Skull";
        Noble => "noble", "Noble";
    }
}

option_table! {
    pub enum Hair [optional] {
        Short => "short", "Short";
        Messy => "messy", "Messy";
        Long => "long", "Long";
        Slicked => "slicked", "Slicked";
        Wild => "wild", "Wild";
        Aged => "aged", "Aged";
    }
}

option_table! {
    pub enum Helmet [optional] {
        Knight => "knight", "Knight";
        Bucket => "bucket", "Bucket";
        Armet => "armet", "Armet";
        Barbute => "barbute", "Barbute";
        Crown => "crown", "Crown";
        Hood => "hood", "Hood";
        Mask => "mask", "Mask";
    }
}

option_table! {
    pub enum Chest default Leather {
        Rags => "rags", "Rags";
        Tunic => "tunic", "Tunic";
        Leather => "leather", "Leather";
        Chain => "chain", "Chainmail";
        Plate => "plate", "Plate";
        Knight => "knight", "Knight";
        Elite => "elite", "Elite";
        Dark => "dark", "Dark";
    }
}

option_table! {
    pub enum Legs default Cloth {
        Rags => "rags", "Rags";
        Cloth => "cloth", "Cloth";
        Leather => "leather", "Leather";
        Chain => "chain", "Chainmail";
        Plate => "plate", "Plate";
        Knight => "knight", "Knight";
    }
}

option_table! {
    pub enum Boots default Leather {
        Bare => "bare", "Barefoot";
        Wraps => "wraps", "Wraps";
        Leather => "leather", "Leather";
        Iron => "iron", "Iron";
        Knight => "knight", "Knight";
        Plated => "plated", "Plated";
    }
}

option_table! {
    pub enum Cape [optional] {
        Tattered => "tattered", "Tattered";
        Short => "short", "Short";
        Long => "long", "Long";
        Hooded => "hooded", "Hooded";
        Royal => "royal", "Royal";
    }
}

option_table! {
    pub enum Weapon [optional] {
        Sword => "sword", "Sword";
        Greatsword => "greatsword", "Greatsword";
        Axe => "axe", "Axe";
        Spear => "spear", "Spear";
        Katana => "katana", "Katana";
        Mace => "mace", "Mace";
        Scythe => "scythe", "Scythe";
        Staff => "staff", "Staff";
    }
}

option_table! {
    pub enum Shield [optional] {
        Buckler => "buckler", "Buckler";
        Kite => "kite", "Kite";
        Tower => "tower", "Tower";
        Crest => "crest", "Crest";
        Skull => "skull", "Skull";
    }
}

option_table! {
    pub enum Scars [optional] {
        Face => "face", "Face Scar";
        Burns => "burns", "Burns";
        Decay => "decay", "Decay";
        Brand => "brand", "Brand";
    }
}

option_table! {
    /// Aura / effect overlay drawn over the whole figure.
    pub enum Effect [optional] {
        Ember => "ember", "Ember";
        Curse => "curse", "Curse";
        Blood => "blood", "Blood";
        Souls => "souls", "Souls";
        Holy => "holy", "Holy";
    }
}

option_table! {
    pub enum Background default Bonfire {
        Void => "void", "Void";
        Bonfire => "bonfire", "Bonfire";
        Ruins => "ruins", "Ruins";
        Castle => "castle", "Castle";
        Fog => "fog", "Fog Gate";
        Abyss => "abyss", "Abyss";
        Shrine => "shrine", "Shrine";
    }
}

impl Chest {
    /// Class title shown on the character badge.
    pub const fn class_title(self) -> &'static str {
        match self {
            Chest::Rags => "DEPRIVED",
            Chest::Tunic => "WANDERER",
            Chest::Leather => "THIEF",
            Chest::Chain => "WARRIOR",
            Chest::Plate => "KNIGHT",
            Chest::Knight => "ELITE KNIGHT",
            Chest::Dark => "DARKWRAITH",
            Chest::Elite => "UNDEAD",
        }
    }
}

/// The procedural character slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Skin,
    Build,
    Face,
    Hair,
    Helmet,
    Chest,
    Legs,
    Boots,
    Cape,
    Weapon,
    Shield,
    Scars,
    Effect,
    Background,
}

impl Slot {
    pub const ALL: &'static [Slot] = &[
        Slot::Skin,
        Slot::Build,
        Slot::Face,
        Slot::Hair,
        Slot::Helmet,
        Slot::Chest,
        Slot::Legs,
        Slot::Boots,
        Slot::Cape,
        Slot::Weapon,
        Slot::Shield,
        Slot::Scars,
        Slot::Effect,
        Slot::Background,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Slot::Skin => "skin",
            Slot::Build => "build",
            Slot::Face => "face",
            Slot::Hair => "hair",
            Slot::Helmet => "helmet",
            Slot::Chest => "chest",
            Slot::Legs => "legs",
            Slot::Boots => "boots",
            Slot::Cape => "cape",
            Slot::Weapon => "weapon",
            Slot::Shield => "shield",
            Slot::Scars => "scars",
            Slot::Effect => "effect",
            Slot::Background => "background",
        }
    }

    /// Parses a slot id, accepting the legacy aliases `body`, `helm`,
    /// `aura` and `effects`.
    pub fn from_id(id: &str) -> Option<Self> {
        let slot = match id {
            "skin" => Slot::Skin,
            "build" | "body" => Slot::Build,
            "face" => Slot::Face,
            "hair" => Slot::Hair,
            "helmet" | "helm" => Slot::Helmet,
            "chest" => Slot::Chest,
            "legs" => Slot::Legs,
            "boots" => Slot::Boots,
            "cape" => Slot::Cape,
            "weapon" => Slot::Weapon,
            "shield" => Slot::Shield,
            "scars" => Slot::Scars,
            "effect" | "effects" | "aura" => Slot::Effect,
            "background" => Slot::Background,
            _ => return None,
        };
        Some(slot)
    }

    /// Optional slots accept [`NONE_ID`].
    pub const fn is_optional(self) -> bool {
        matches!(
            self,
            Slot::Hair
                | Slot::Helmet
                | Slot::Cape
                | Slot::Weapon
                | Slot::Shield
                | Slot::Scars
                | Slot::Effect
        )
    }

    pub const fn options(self) -> &'static [OptionEntry] {
        match self {
            Slot::Skin => Skin::TABLE,
            Slot::Build => Build::TABLE,
            Slot::Face => Face::TABLE,
            Slot::Hair => Hair::TABLE,
            Slot::Helmet => Helmet::TABLE,
            Slot::Chest => Chest::TABLE,
            Slot::Legs => Legs::TABLE,
            Slot::Boots => Boots::TABLE,
            Slot::Cape => Cape::TABLE,
            Slot::Weapon => Weapon::TABLE,
            Slot::Shield => Shield::TABLE,
            Slot::Scars => Scars::TABLE,
            Slot::Effect => Effect::TABLE,
            Slot::Background => Background::TABLE,
        }
    }
}

// ============================================================================
// Sprite-Sheet Slots
// ============================================================================

option_table! {
    pub enum BodyType default MaleLight {
        MaleLight => "male_light", "Human Male (Light)", "body/male_light.png";
        MaleDark => "male_dark", "Human Male (Dark)", "body/male_dark.png";
        FemaleLight => "female_light", "Human Female (Light)", "body/female_light.png";
        FemaleDark => "female_dark", "Human Female (Dark)", "body/female_dark.png";
        Skeleton => "skeleton", "Skeleton", "body/skeleton.png";
        Zombie => "zombie", "Zombie", "body/zombie.png";
        Orc => "orc", "Orc", "body/orc.png";
    }
}

option_table! {
    pub enum Hairstyle [optional] {
        Plain => "plain", "Plain", "hair/plain.png";
        Ponytail => "ponytail", "Ponytail", "hair/ponytail.png";
        Messy => "messy", "Messy", "hair/messy.png";
        Long => "long", "Long", "hair/long.png";
        Braided => "braided", "Braided", "hair/braided.png";
    }
}

option_table! {
    pub enum Headgear [optional] {
        LeatherCap => "leather_cap", "Leather Cap", "head/leather_cap.png";
        ChainCoif => "chain_coif", "Chain Coif", "head/chain_coif.png";
        Helm => "helm", "Helm", "head/helm.png";
        Crown => "crown", "Crown", "head/crown.png";
        Hood => "hood", "Hood", "head/hood.png";
        SkullHelm => "skull_helm", "Skull Helm", "head/skull_helm.png";
    }
}

option_table! {
    pub enum Torso [optional] {
        LeatherVest => "leather_vest", "Leather Vest", "torso/leather_vest.png";
        ChainMail => "chain_mail", "Chain Mail", "torso/chain_mail.png";
        PlateArmor => "plate_armor", "Plate Armor", "torso/plate_armor.png";
        DarkArmor => "dark_armor", "Dark Armor", "torso/dark_armor.png";
        Robe => "robe", "Robe", "torso/robe.png";
        NobleShirt => "noble_shirt", "Noble Shirt", "torso/noble_shirt.png";
    }
}

option_table! {
    pub enum LegWear [optional] {
        Pants => "pants", "Pants", "legs/pants.png";
        LeatherPants => "leather_pants", "Leather Pants", "legs/leather_pants.png";
        ChainLegs => "chain_legs", "Chain Legs", "legs/chain_legs.png";
        PlateLegs => "plate_legs", "Plate Legs", "legs/plate_legs.png";
        DarkLegs => "dark_legs", "Dark Legs", "legs/dark_legs.png";
    }
}

option_table! {
    pub enum Armament [optional] {
        Dagger => "dagger", "Dagger", "weapons/dagger.png";
        Sword => "sword", "Sword", "weapons/sword.png";
        GreatSword => "great_sword", "Great Sword", "weapons/great_sword.png";
        Mace => "mace", "Mace", "weapons/mace.png";
        Staff => "staff", "Staff", "weapons/staff.png";
        Bow => "bow", "Bow", "weapons/bow.png";
        DarkSword => "dark_sword", "Cursed Blade", "weapons/dark_sword.png";
    }
}

option_table! {
    pub enum Backdrop default Castle {
        Castle => "castle", "Castle Hall", "backgrounds/castle.png";
        Dungeon => "dungeon", "Dungeon", "backgrounds/dungeon.png";
        Forest => "forest", "Dark Forest", "backgrounds/forest.png";
        Throne => "throne", "Throne Room", "backgrounds/throne.png";
        Graveyard => "graveyard", "Graveyard", "backgrounds/graveyard.png";
    }
}

macro_rules! sprite_path_of {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// Sheet path relative to the sprite root.
                pub fn sprite_path(self) -> &'static str {
                    Self::TABLE
                        .iter()
                        .find(|entry| entry.id == self.id())
                        .and_then(|entry| entry.sprite_path)
                        .unwrap_or_default()
                }
            }
        )+
    };
}

sprite_path_of!(BodyType, Hairstyle, Headgear, Torso, LegWear, Armament, Backdrop);

/// Class title for the sheet variant, derived from the torso piece.
pub const fn torso_class_title(torso: Option<Torso>) -> &'static str {
    match torso {
        None => "DEPRIVED",
        Some(Torso::LeatherVest) => "WANDERER",
        Some(Torso::ChainMail) => "WARRIOR",
        Some(Torso::PlateArmor) => "KNIGHT",
        Some(Torso::DarkArmor) => "DARKWRAITH",
        Some(Torso::Robe) => "SORCERER",
        Some(Torso::NobleShirt) => "NOBLE",
    }
}

/// The sprite-sheet character slots, in back-to-front draw order
/// (background first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetSlot {
    Background,
    Body,
    Hair,
    Legs,
    Torso,
    Head,
    Weapon,
}

impl SheetSlot {
    pub const ALL: &'static [SheetSlot] = &[
        SheetSlot::Background,
        SheetSlot::Body,
        SheetSlot::Hair,
        SheetSlot::Legs,
        SheetSlot::Torso,
        SheetSlot::Head,
        SheetSlot::Weapon,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            SheetSlot::Background => "background",
            SheetSlot::Body => "body",
            SheetSlot::Hair => "hair",
            SheetSlot::Legs => "legs",
            SheetSlot::Torso => "torso",
            SheetSlot::Head => "head",
            SheetSlot::Weapon => "weapon",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|slot| slot.id() == id)
    }

    pub const fn is_optional(self) -> bool {
        !matches!(self, SheetSlot::Background | SheetSlot::Body)
    }

    pub const fn options(self) -> &'static [OptionEntry] {
        match self {
            SheetSlot::Background => Backdrop::TABLE,
            SheetSlot::Body => BodyType::TABLE,
            SheetSlot::Hair => Hairstyle::TABLE,
            SheetSlot::Legs => LegWear::TABLE,
            SheetSlot::Torso => Torso::TABLE,
            SheetSlot::Head => Headgear::TABLE,
            SheetSlot::Weapon => Armament::TABLE,
        }
    }
}
