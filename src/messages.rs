//! Transient notification feed ("a mouse has appeared!", chase and
//! affection events). Entries fade out after a few seconds; when the
//! feed is over capacity the oldest entry is hurried into its fade.

/// Visible entries before the oldest gets pushed out early.
const MAX_VISIBLE: usize = 5;
/// Age at which an entry starts fading (ms).
const FADE_START_MS: f32 = 2500.0;
/// Age at which an entry is dropped (ms).
const EXPIRE_MS: f32 = 3500.0;

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub age_ms: f32,
}

impl Message {
    /// 1.0 while fresh, fading linearly to 0.0 at expiry.
    pub fn opacity(&self) -> f32 {
        if self.age_ms <= FADE_START_MS {
            1.0
        } else {
            (1.0 - (self.age_ms - FADE_START_MS) / (EXPIRE_MS - FADE_START_MS)).max(0.0)
        }
    }
}

pub struct MessageLog {
    entries: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a notification.
    pub fn push(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::debug!("{text}");
        self.entries.push(Message { text, age_ms: 0.0 });
        if self.entries.len() > MAX_VISIBLE {
            // start the oldest entry fading now instead of waiting it out
            let oldest = &mut self.entries[0];
            oldest.age_ms = oldest.age_ms.max(FADE_START_MS);
        }
    }

    /// Age all entries and drop the expired ones.
    pub fn update(&mut self, dt_ms: f32) {
        for message in &mut self.entries {
            message.age_ms += dt_ms;
        }
        self.entries.retain(|m| m.age_ms < EXPIRE_MS);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
