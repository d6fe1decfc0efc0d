//! In-game clock and the night overlay driven by it.
//!
//! One real second is one in-game minute, so a full day lasts 24 real
//! minutes. The overlay darkness has a banded target per hour and eases
//! toward it a little every frame, which smooths dusk and dawn without
//! any explicit transition state.

/// Full day length in milliseconds of wall time.
pub const DAY_LENGTH_MS: f32 = 1_440_000.0;
/// Fraction of the remaining gap the overlay closes per frame.
const EASE_FACTOR: f32 = 0.005;

/// Wall-time accumulator for the in-game day, wrapping at 24h.
#[derive(Debug, Clone, Copy)]
pub struct DayClock {
    day_ms: f32,
}

impl DayClock {
    /// Start at a random time of day.
    pub fn new(rng: &mut fastrand::Rng) -> Self {
        Self {
            day_ms: rng.f32() * DAY_LENGTH_MS,
        }
    }

    /// Start at an exact in-game minute (0..1440).
    pub fn at_minutes(minutes: u32) -> Self {
        Self {
            day_ms: minutes as f32 * 1000.0,
        }
    }

    pub fn advance(&mut self, dt_ms: f32) {
        self.day_ms = (self.day_ms + dt_ms) % DAY_LENGTH_MS;
    }

    /// Minutes into the in-game day, 0..1440.
    pub fn minutes(&self) -> u32 {
        (self.day_ms / 1000.0) as u32
    }

    /// Hour of the in-game day, 0..24.
    pub fn hour(&self) -> u32 {
        self.minutes() / 60
    }

    /// 12-hour clock string, e.g. "3:05 PM".
    pub fn formatted(&self) -> String {
        let hour = self.hour();
        let display_hour = (hour + 11) % 12 + 1;
        let ampm = if hour >= 12 { "PM" } else { "AM" };
        format!("{}:{:02} {}", display_hour, self.minutes() % 60, ampm)
    }
}

/// Current opacity of the full-screen night overlay.
#[derive(Debug, Clone, Copy)]
pub struct Darkness {
    pub current: f32,
}

impl Darkness {
    pub fn new() -> Self {
        Self { current: 0.0 }
    }

    /// One easing step. Converges on the target without overshooting.
    pub fn ease_toward(&mut self, target: f32) {
        self.current += (target - self.current) * EASE_FACTOR;
    }
}

/// Overlay opacity target for an hour of day. A step function; the
/// per-frame easing is what makes transitions gradual on screen.
pub fn darkness_target(hour: u32) -> f32 {
    if is_night(hour) {
        0.6
    } else if hour >= 17 {
        0.4
    } else if (5..7).contains(&hour) {
        0.2
    } else {
        0.0
    }
}

/// Deep-night hours, when cats get their glow auras.
pub fn is_night(hour: u32) -> bool {
    hour >= 19 || hour < 5
}
