//! Dust motes kicked up by running cats.

use glam::Vec2;

/// Hard cap on live motes.
const MAX_PARTICLES: usize = 1024;
/// Opacity lost per frame.
const ALPHA_DECAY: f32 = 0.02;

/// One dust mote. Motion is stepped per frame, not scaled by delta time.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub radius: f32,
    /// Vertical drift per frame, always upward.
    pub dy: f32,
    pub alpha: f32,
    pub color: [u8; 3],
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(MAX_PARTICLES),
        }
    }

    /// Spawn one mote with a randomized size and upward drift.
    pub fn spawn(&mut self, pos: Vec2, color: [u8; 3], rng: &mut fastrand::Rng) {
        if self.particles.len() >= MAX_PARTICLES {
            return;
        }
        self.particles.push(Particle {
            pos,
            radius: rng.f32() * 2.0 + 1.0,
            dy: rng.f32() * -1.5 - 0.5,
            alpha: 1.0,
            color,
        });
    }

    /// Drift all motes upward, fade them, and drop the spent ones.
    pub fn update(&mut self) {
        let mut i = 0;
        while i < self.particles.len() {
            let p = &mut self.particles[i];
            p.pos.y += p.dy;
            p.alpha -= ALPHA_DECAY;
            if p.alpha <= 0.0 {
                self.particles.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
