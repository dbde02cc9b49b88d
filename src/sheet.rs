//! Sprite-sheet character model: configuration, grid layout and the
//! per-animation frame animator.

use rand::Rng;

use crate::animation::ReactionState;
use crate::character::{pick, resolve, resolve_optional};
use crate::options::{
    Armament, Backdrop, BodyType, Hairstyle, Headgear, LegWear, NONE_ID, SheetSlot, Torso,
    torso_class_title,
};
use crate::surface::RectPx;

// ============================================================================
// Layout
// ============================================================================

/// Grid geometry of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
    pub rows: u32,
}

impl SheetLayout {
    /// The standard layout: 64x64 cells, 13 columns x 21 rows.
    pub const LPC: Self = Self {
        frame_width: 64,
        frame_height: 64,
        columns: 13,
        rows: 21,
    };

    /// Source rectangle of the cell at `row`, `column`, or `None` outside
    /// the grid.
    pub fn cell(&self, row: u32, column: u32) -> Option<RectPx> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(RectPx::new(
            column * self.frame_width,
            row * self.frame_height,
            self.frame_width,
            self.frame_height,
        ))
    }

    /// Cell for a frame of an animation facing `direction`.
    pub fn frame_rect(
        &self,
        animation: SheetAnimation,
        direction: Direction,
        frame: u32,
    ) -> Option<RectPx> {
        self.cell(animation.row(direction), frame % animation.frames())
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self::LPC
    }
}

// ============================================================================
// Direction
// ============================================================================

/// Facing direction; each is one row within a directional animation block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Left,
    #[default]
    Down,
    Right,
}

impl Direction {
    pub const ALL: &'static [Direction] =
        &[Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    pub const fn row_offset(self) -> u32 {
        match self {
            Direction::Up => 0,
            Direction::Left => 1,
            Direction::Down => 2,
            Direction::Right => 3,
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Right => "right",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.id() == id)
    }
}

// ============================================================================
// Animations
// ============================================================================

/// Update rate the tick counts below are expressed in.
const TICKS_PER_SECOND: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SheetAnimation {
    #[default]
    Idle,
    Walk,
    Run,
    Slash,
    Thrust,
    Cast,
    Shoot,
    Hurt,
}

impl SheetAnimation {
    pub const ALL: &'static [SheetAnimation] = &[
        SheetAnimation::Idle,
        SheetAnimation::Walk,
        SheetAnimation::Run,
        SheetAnimation::Slash,
        SheetAnimation::Thrust,
        SheetAnimation::Cast,
        SheetAnimation::Shoot,
        SheetAnimation::Hurt,
    ];

    /// Order visited by [`next_in_cycle`](Self::next_in_cycle).
    pub const CLICK_CYCLE: &'static [SheetAnimation] = &[
        SheetAnimation::Idle,
        SheetAnimation::Walk,
        SheetAnimation::Slash,
        SheetAnimation::Cast,
        SheetAnimation::Thrust,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            SheetAnimation::Idle => "idle",
            SheetAnimation::Walk => "walk",
            SheetAnimation::Run => "run",
            SheetAnimation::Slash => "slash",
            SheetAnimation::Thrust => "thrust",
            SheetAnimation::Cast => "cast",
            SheetAnimation::Shoot => "shoot",
            SheetAnimation::Hurt => "hurt",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.id() == id)
    }

    /// First row of the animation block.
    pub const fn base_row(self) -> u32 {
        match self {
            SheetAnimation::Cast => 0,
            SheetAnimation::Thrust => 4,
            SheetAnimation::Idle | SheetAnimation::Walk | SheetAnimation::Run => 8,
            SheetAnimation::Slash => 12,
            SheetAnimation::Shoot => 16,
            SheetAnimation::Hurt => 20,
        }
    }

    pub const fn frames(self) -> u32 {
        match self {
            SheetAnimation::Idle => 1,
            SheetAnimation::Cast => 7,
            SheetAnimation::Thrust => 8,
            SheetAnimation::Walk | SheetAnimation::Run => 9,
            SheetAnimation::Slash | SheetAnimation::Hurt => 6,
            SheetAnimation::Shoot => 13,
        }
    }

    /// Frame duration in 60 Hz ticks.
    pub const fn ticks_per_frame(self) -> u32 {
        match self {
            SheetAnimation::Idle => 60,
            SheetAnimation::Walk | SheetAnimation::Hurt => 8,
            SheetAnimation::Run | SheetAnimation::Cast => 6,
            SheetAnimation::Slash | SheetAnimation::Thrust | SheetAnimation::Shoot => 4,
        }
    }

    pub fn frame_interval_ms(self) -> f64 {
        self.ticks_per_frame() as f64 * 1000.0 / TICKS_PER_SECOND
    }

    /// `hurt` is a single row shared by every facing.
    pub const fn is_directional(self) -> bool {
        !matches!(self, SheetAnimation::Hurt)
    }

    pub const fn row(self, direction: Direction) -> u32 {
        if self.is_directional() {
            self.base_row() + direction.row_offset()
        } else {
            self.base_row()
        }
    }

    /// The animation after `self` in [`CLICK_CYCLE`](Self::CLICK_CYCLE).
    /// Animations outside the cycle restart it.
    pub fn next_in_cycle(self) -> Self {
        let cycle = Self::CLICK_CYCLE;
        match cycle.iter().position(|a| *a == self) {
            Some(i) => cycle[(i + 1) % cycle.len()],
            None => cycle[0],
        }
    }
}

// ============================================================================
// Animator
// ============================================================================

/// What to draw for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetFrame {
    pub animation: SheetAnimation,
    pub direction: Direction,
    pub frame: u32,
}

impl SheetFrame {
    pub fn rect(&self, layout: &SheetLayout) -> Option<RectPx> {
        layout.frame_rect(self.animation, self.direction, self.frame)
    }
}

/// Frame stepper for the sheet variant.
///
/// Plays `hurt` while a reaction is active and returns to the selected
/// animation afterwards. A change of the playing animation restarts it at
/// frame zero.
#[derive(Debug, Clone, Default)]
pub struct SheetAnimator {
    selected: SheetAnimation,
    direction: Direction,
    playing: SheetAnimation,
    frame: u32,
    accumulated: f64,
    last_tick: Option<f64>,
    reaction: ReactionState,
}

impl SheetAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animation(&self) -> SheetAnimation {
        self.selected
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_animation(&mut self, animation: SheetAnimation) {
        if self.selected != animation {
            self.selected = animation;
            if !self.reaction.is_reacting() {
                self.restart(animation);
            }
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Advances the selection along the click cycle.
    pub fn cycle_animation(&mut self) -> SheetAnimation {
        let next = self.selected.next_in_cycle();
        self.set_animation(next);
        next
    }

    pub fn trigger_reaction(&mut self, now: f64) {
        self.reaction = ReactionState::trigger(now);
    }

    pub fn reaction(&self) -> ReactionState {
        self.reaction
    }

    pub fn current(&self) -> SheetFrame {
        SheetFrame {
            animation: self.playing,
            direction: self.direction,
            frame: self.frame,
        }
    }

    /// Advances to `now` and returns the frame to draw.
    pub fn tick(&mut self, now: f64) -> SheetFrame {
        self.reaction = self.reaction.tick(now);
        let wanted = if self.reaction.is_reacting() {
            SheetAnimation::Hurt
        } else {
            self.selected
        };
        let elapsed = match self.last_tick {
            Some(last) if now >= last => now - last,
            _ => 0.0,
        };
        let backwards = self.last_tick.is_some_and(|last| now < last);
        self.last_tick = Some(now);

        if wanted != self.playing {
            self.restart(wanted);
            return self.current();
        }
        if backwards {
            self.accumulated = 0.0;
        }
        self.accumulated += elapsed;

        let interval = self.playing.frame_interval_ms();
        if self.accumulated >= interval {
            let steps = (self.accumulated / interval) as u32;
            self.frame = (self.frame + steps) % self.playing.frames();
            self.accumulated -= steps as f64 * interval;
        }

        self.current()
    }

    fn restart(&mut self, animation: SheetAnimation) {
        self.playing = animation;
        self.frame = 0;
        self.accumulated = 0.0;
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// One sheet asset to load: cache id plus path below the sprite root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRequest {
    pub id: String,
    pub path: &'static str,
}

impl AssetRequest {
    pub fn new(slot: SheetSlot, option_id: &str, path: &'static str) -> Self {
        Self {
            id: asset_id(slot, option_id),
            path,
        }
    }
}

/// Cache id of a slot option, `"<slot>/<option>"`.
pub fn asset_id(slot: SheetSlot, option_id: &str) -> String {
    format!("{}/{}", slot.id(), option_id)
}

/// One selection per sheet slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetConfiguration {
    pub body: BodyType,
    pub hair: Option<Hairstyle>,
    pub head: Option<Headgear>,
    pub torso: Option<Torso>,
    pub legs: Option<LegWear>,
    pub weapon: Option<Armament>,
    pub background: Backdrop,
}

impl Default for SheetConfiguration {
    fn default() -> Self {
        Self {
            body: BodyType::default(),
            hair: Some(Hairstyle::Plain),
            head: None,
            torso: Some(Torso::LeatherVest),
            legs: Some(LegWear::Pants),
            weapon: Some(Armament::Sword),
            background: Backdrop::default(),
        }
    }
}

impl SheetConfiguration {
    pub fn get(&self, slot: SheetSlot) -> &'static str {
        fn opt<T>(value: Option<T>, id: fn(T) -> &'static str) -> &'static str {
            value.map(id).unwrap_or(NONE_ID)
        }

        match slot {
            SheetSlot::Background => self.background.id(),
            SheetSlot::Body => self.body.id(),
            SheetSlot::Hair => opt(self.hair, Hairstyle::id),
            SheetSlot::Legs => opt(self.legs, LegWear::id),
            SheetSlot::Torso => opt(self.torso, Torso::id),
            SheetSlot::Head => opt(self.head, Headgear::id),
            SheetSlot::Weapon => opt(self.weapon, Armament::id),
        }
    }

    /// Selects `id` for `slot`, falling back to the slot default for
    /// unknown ids. Returns true if the configuration changed.
    pub fn set(&mut self, slot: SheetSlot, id: &str) -> bool {
        let before = *self;
        let defaults = Self::default();
        let name = slot.id();

        match slot {
            SheetSlot::Background => {
                self.background = resolve(name, id, Backdrop::from_id, defaults.background)
            }
            SheetSlot::Body => self.body = resolve(name, id, BodyType::from_id, defaults.body),
            SheetSlot::Hair => {
                self.hair = resolve_optional(name, id, Hairstyle::from_id, defaults.hair)
            }
            SheetSlot::Legs => {
                self.legs = resolve_optional(name, id, LegWear::from_id, defaults.legs)
            }
            SheetSlot::Torso => {
                self.torso = resolve_optional(name, id, Torso::from_id, defaults.torso)
            }
            SheetSlot::Head => {
                self.head = resolve_optional(name, id, Headgear::from_id, defaults.head)
            }
            SheetSlot::Weapon => {
                self.weapon = resolve_optional(name, id, Armament::from_id, defaults.weapon)
            }
        }

        *self != before
    }

    pub fn with(mut self, slot: SheetSlot, id: &str) -> Self {
        self.set(slot, id);
        self
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for &slot in SheetSlot::ALL {
            let id = pick(slot.options(), rng);
            self.set(slot, id);
        }
    }

    pub fn class_title(&self) -> &'static str {
        torso_class_title(self.torso)
    }

    /// Character layers to draw, back to front. Empty slots are skipped.
    pub fn layers(&self) -> Vec<AssetRequest> {
        let entries: [(SheetSlot, Option<(&'static str, &'static str)>); 6] = [
            (SheetSlot::Body, Some((self.body.id(), self.body.sprite_path()))),
            (SheetSlot::Hair, self.hair.map(|h| (h.id(), h.sprite_path()))),
            (SheetSlot::Legs, self.legs.map(|l| (l.id(), l.sprite_path()))),
            (SheetSlot::Torso, self.torso.map(|t| (t.id(), t.sprite_path()))),
            (SheetSlot::Head, self.head.map(|h| (h.id(), h.sprite_path()))),
            (SheetSlot::Weapon, self.weapon.map(|w| (w.id(), w.sprite_path()))),
        ];
        entries
            .into_iter()
            .filter_map(|(slot, entry)| entry.map(|(id, path)| AssetRequest::new(slot, id, path)))
            .collect()
    }

    pub fn background_request(&self) -> AssetRequest {
        AssetRequest::new(
            SheetSlot::Background,
            self.background.id(),
            self.background.sprite_path(),
        )
    }

    /// Every asset this configuration references, background first.
    pub fn asset_requests(&self) -> Vec<AssetRequest> {
        let mut requests = vec![self.background_request()];
        requests.extend(self.layers());
        requests
    }
}
