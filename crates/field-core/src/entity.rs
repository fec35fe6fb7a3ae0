//! Entity types and per-category behavior for the particle field

use crate::color::Color;
use crate::trail::Trail;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How an entity reacts to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Pulled toward the pointer
    Attract,
    /// Pushed away from the pointer
    Repel,
    /// Pushed perpendicular to the pointer direction, which induces orbits
    Orbit,
}

/// Entity category, selects color slot, size range and pointer behavior
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Core = 0,
    Data = 1,
    Energy = 2,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Core, Category::Data, Category::Energy];

    /// Palette slot used for this category's color
    pub fn palette_slot(self) -> usize {
        self as usize
    }

    /// Radius range (min, max) in logical pixels
    pub fn size_range(self) -> (f32, f32) {
        match self {
            Category::Core => (3.0, 5.0),
            Category::Data => (1.5, 3.0),
            Category::Energy => (2.0, 3.5),
        }
    }

    pub fn interaction(self) -> InteractionKind {
        match self {
            Category::Core => InteractionKind::Attract,
            Category::Data => InteractionKind::Orbit,
            Category::Energy => InteractionKind::Repel,
        }
    }

    /// Weighted choice given a uniform roll in [0, 1)
    ///
    /// Non-finite or negative weights count as zero. If every weight is zero
    /// the choice is `Data`.
    pub fn choose(weights: &[f32; 3], roll: f32) -> Category {
        let sanitized = (*weights).map(|w| if w.is_finite() && w > 0.0 { w } else { 0.0 });
        let total: f32 = sanitized.iter().sum();
        if total <= 0.0 {
            return Category::Data;
        }

        let mut threshold = roll.clamp(0.0, 1.0) * total;
        for (category, weight) in Self::ALL.iter().zip(sanitized) {
            if weight > 0.0 && threshold < weight {
                return *category;
            }
            threshold -= weight;
        }

        // Rounding can leave the roll just past the last bucket
        Self::ALL
            .iter()
            .zip(sanitized)
            .rev()
            .find(|(_, w)| *w > 0.0)
            .map(|(c, _)| *c)
            .unwrap_or(Category::Data)
    }
}

/// A single animated node in the field
#[derive(Clone, Debug)]
pub struct Entity {
    /// Position in logical pixels
    pub position: Vec2,
    /// Velocity in logical pixels per reference frame
    pub velocity: Vec2,
    /// Base radius before pulsing
    pub radius: f32,
    pub color: Color,
    /// Phase accumulator driving the pulse (radians, kept in [0, TAU))
    pub phase: f32,
    pub category: Category,
    /// Interaction energy in [0, 1]; rises near the pointer and decays otherwise
    pub energy: f32,
    /// Per-entity offset for the ambient drift sinusoids
    pub drift_offset: f32,
    pub trail: Trail,
}

impl Entity {
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        color: Color,
        category: Category,
        trail_length: usize,
    ) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
            phase: 0.0,
            category,
            energy: 0.0,
            drift_offset: 0.0,
            trail: Trail::new(trail_length),
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_drift_offset(mut self, offset: f32) -> Self {
        self.drift_offset = offset;
        self
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Pulsing scale factor derived from the phase, in [0.8, 1.2]
    pub fn pulse(&self) -> f32 {
        1.0 + 0.2 * self.phase.sin()
    }
}
