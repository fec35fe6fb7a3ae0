//! Ephemeral effects: data packets travelling along connections and wave rings
//!
//! Effects are spawned by the stepper, advanced every frame and pruned once
//! their progress reaches 1.0. Progress never decreases.

use crate::color::Color;
use crate::entity::Entity;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectKind {
    /// Dot moving from one entity to another along their connection
    Packet { from: usize, to: usize },
    /// Expanding ring around a fixed center
    Ring { center: Vec2, max_radius: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Effect {
    /// Unique per simulation, assigned in spawn order
    pub id: u64,
    pub kind: EffectKind,
    /// In [0, 1) while alive
    pub progress: f32,
    /// Progress per reference frame
    pub speed: f32,
    pub color: Color,
}

impl Effect {
    pub fn packet(id: u64, from: usize, to: usize, speed: f32, color: Color) -> Self {
        Self {
            id,
            kind: EffectKind::Packet { from, to },
            progress: 0.0,
            speed: speed.max(0.0),
            color,
        }
    }

    pub fn ring(id: u64, center: Vec2, max_radius: f32, speed: f32, color: Color) -> Self {
        Self {
            id,
            kind: EffectKind::Ring { center, max_radius },
            progress: 0.0,
            speed: speed.max(0.0),
            color,
        }
    }

    /// Advance by `frame_scale` reference frames
    pub fn advance(&mut self, frame_scale: f32) {
        self.progress += self.speed * frame_scale.max(0.0);
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Opacity decays linearly with progress
    pub fn opacity(&self) -> f32 {
        (1.0 - self.progress).clamp(0.0, 1.0)
    }

    /// Current position for packets, center for rings
    ///
    /// Returns `None` for a packet whose endpoints no longer exist.
    pub fn position(&self, entities: &[Entity]) -> Option<Vec2> {
        match self.kind {
            EffectKind::Packet { from, to } => {
                let a = entities.get(from)?.position;
                let b = entities.get(to)?.position;
                Some(a.lerp(b, self.progress.clamp(0.0, 1.0)))
            }
            EffectKind::Ring { center, .. } => Some(center),
        }
    }

    /// Current ring radius, `None` for packets
    pub fn radius(&self) -> Option<f32> {
        match self.kind {
            EffectKind::Ring { max_radius, .. } => {
                Some(max_radius * self.progress.clamp(0.0, 1.0))
            }
            EffectKind::Packet { .. } => None,
        }
    }
}
