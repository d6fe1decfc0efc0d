use glam::Vec2;

/// Source frame size of the cat sheets, in pixels.
pub const CAT_FRAME_W: f32 = 32.0;
pub const CAT_FRAME_H: f32 = 32.0;
/// Cats are drawn enlarged from their source frames.
pub const CAT_DRAW_W: f32 = CAT_FRAME_W + 60.0;
pub const CAT_DRAW_H: f32 = CAT_FRAME_H + 60.0;
/// Frames in the idle and run cycles.
pub const CAT_IDLE_FRAMES: u32 = 7;
pub const CAT_RUN_FRAMES: u32 = 9;
/// Walk speed in pixels per frame.
pub const CAT_SPEED: f32 = 1.5;

/// Ground line cats stand on for a given window height.
pub fn cat_ground_y(viewport_h: f32) -> f32 {
    viewport_h - CAT_DRAW_H * 2.3
}

/// Current world position of the sprite's top-left corner, in pixels.
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

/// Horizontal locomotion state.
#[derive(Debug, Clone, Copy)]
pub struct Walk {
    /// Signed velocity in pixels per frame. Zero means standing.
    pub velocity: f32,
    /// Magnitude a decision uses when it starts the actor moving.
    pub speed: f32,
    /// Sheets face right; drawn mirrored when this is set.
    pub facing_left: bool,
}

impl Walk {
    pub fn standing(speed: f32) -> Self {
        Self {
            velocity: 0.0,
            speed,
            facing_left: false,
        }
    }
}

/// Sprite-sheet animation cursor.
#[derive(Debug, Clone, Copy)]
pub struct SpriteAnim {
    pub frame: u32,
    /// Accrued time toward the next frame advance (ms).
    pub timer_ms: f32,
}

impl SpriteAnim {
    pub fn new() -> Self {
        Self {
            frame: 0,
            timer_ms: 0.0,
        }
    }
}

/// Autonomous re-decision timer with a randomized interval.
#[derive(Debug, Clone, Copy)]
pub struct Behavior {
    pub timer_ms: f32,
    pub delay_ms: f32,
}

impl Behavior {
    /// Fresh timer with a random 2-4 second delay.
    pub fn roll(rng: &mut fastrand::Rng) -> Self {
        Self {
            timer_ms: 0.0,
            delay_ms: random_delay(rng),
        }
    }

    /// Restart the timer with a new random delay.
    pub fn rearm(&mut self, rng: &mut fastrand::Rng) {
        self.timer_ms = 0.0;
        self.delay_ms = random_delay(rng);
    }
}

fn random_delay(rng: &mut fastrand::Rng) -> f32 {
    rng.f32() * 2000.0 + 2000.0
}

/// The resident cats, in roster (and sprite sheet) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatName {
    Sean,
    Powi,
    Uling,
    Adidas,
    Mingkay,
}

impl CatName {
    pub const ROSTER: [CatName; 5] = [
        CatName::Sean,
        CatName::Powi,
        CatName::Uling,
        CatName::Adidas,
        CatName::Mingkay,
    ];

    /// Display name, as it appears above the sprite and in notifications.
    pub fn label(self) -> &'static str {
        match self {
            CatName::Sean => "sean",
            CatName::Powi => "powi",
            CatName::Uling => "uling",
            CatName::Adidas => "adidas",
            CatName::Mingkay => "mingkay",
        }
    }
}

/// An in-progress chase. The kind rides along so the wind-down message
/// can still name a prop that no longer exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chase {
    pub target: hecs::Entity,
    pub kind: MaterialKind,
}

/// A named cat: affection, bond bookkeeping, and its current chase.
#[derive(Debug, Clone, Copy)]
pub struct Cat {
    pub name: CatName,
    pub happy: bool,
    pub happy_timer_ms: f32,
    /// The prop this cat is pursuing. The chase system validates the
    /// entity every frame, so a despawned target cannot dangle.
    pub chasing: Option<Chase>,
    /// Throttles the pair-bond notification.
    pub bond_cooldown_ms: f32,
}

impl Cat {
    pub fn new(name: CatName) -> Self {
        Self {
            name,
            happy: false,
            happy_timer_ms: 0.0,
            chasing: None,
            bond_cooldown_ms: 0.0,
        }
    }
}

/// Prop categories cats can chase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Mouse,
}

impl MaterialKind {
    /// Name used in notifications ("a mouse has appeared!").
    pub fn label(self) -> &'static str {
        match self {
            MaterialKind::Mouse => "mouse",
        }
    }

    /// Source frame size in the sheet, in pixels.
    pub fn frame_size(self) -> Vec2 {
        match self {
            MaterialKind::Mouse => Vec2::new(42.0, 32.0),
        }
    }

    /// On-screen size. Props are drawn slightly enlarged.
    pub fn draw_size(self) -> Vec2 {
        self.frame_size() + Vec2::splat(15.0)
    }

    pub fn frame_count(self) -> u32 {
        match self {
            MaterialKind::Mouse => 4,
        }
    }

    /// Walk speed in pixels per frame.
    pub fn speed(self) -> f32 {
        match self {
            MaterialKind::Mouse => 2.0,
        }
    }

    /// Ground line this prop rests on for a given window height.
    pub fn ground_y(self, viewport_h: f32) -> f32 {
        viewport_h - self.draw_size().y * 3.6
    }
}

/// A chaseable, draggable prop.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub kind: MaterialKind,
    /// Held by the pointer. Physics and re-decisions pause while set.
    pub dragging: bool,
    /// Pointer-to-anchor offset captured at drag start (screen space).
    pub drag_offset: Vec2,
    /// Fall speed accumulator in pixels per frame. Zero while grounded.
    pub gravity: f32,
    /// Cat currently chasing this prop. Mutual with `Cat::chasing`, so
    /// a prop has at most one chaser.
    pub chased_by: Option<hecs::Entity>,
}

impl Material {
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            kind,
            dragging: false,
            drag_offset: Vec2::ZERO,
            gravity: 0.0,
            chased_by: None,
        }
    }
}
