//! Field parameters for runtime tuning

use field_core::constants::*;
use field_core::Palette;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Visual variants of the particle field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Sparse glowing nodes, long connections and data packets
    NeuralField,
    /// Dense mesh with short connections, strong orbiting and wave rings
    BioMesh,
    /// No connections, strong drift and long trails (flowing background)
    FlowingLines,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("`{field}` must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`{field}` must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("`{field}` must be within (0, 1], got {value}")]
    RetentionOutOfRange { field: &'static str, value: f32 },
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("category weights must sum to a positive value")]
    NoCategoryWeight,
}

/// Tuning knobs of one field instance
///
/// Rates are per 60 Hz reference frame. Missing fields in a config file fall
/// back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldParams {
    // Store
    pub max_entities: usize,
    pub area_per_entity: f32,
    pub palette: Palette,
    /// Relative weights for Core, Data and Energy
    pub category_weights: [f32; 3],
    pub initial_speed: f32,
    pub trail_length: usize,

    // Motion
    pub damping: f32,
    pub max_speed: f32,
    pub wrap_margin: f32,
    pub drift_strength: f32,
    pub phase_step: f32,

    // Interaction
    pub interaction_radius: f32,
    pub interaction_strength: f32,
    pub softening: f32,
    pub energy_gain: f32,
    pub energy_retention: f32,

    // Connections & effects
    pub connection_distance: f32,
    pub spawn_probability: f32,
    pub packet_speed: f32,
    pub max_effects: usize,
    pub ring_threshold: f32,
    pub ring_max_radius: f32,
    pub ring_speed: f32,

    // Drawing
    pub line_width: f32,
    pub glow_scale: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            max_entities: MAX_ENTITIES,
            area_per_entity: AREA_PER_ENTITY,
            palette: Palette::mocha(),
            category_weights: CATEGORY_WEIGHTS,
            initial_speed: INITIAL_SPEED,
            trail_length: TRAIL_LENGTH,

            damping: DAMPING,
            max_speed: MAX_SPEED,
            wrap_margin: WRAP_MARGIN,
            drift_strength: DRIFT_STRENGTH,
            phase_step: PHASE_STEP,

            interaction_radius: INTERACTION_RADIUS,
            interaction_strength: INTERACTION_STRENGTH,
            softening: SOFTENING,
            energy_gain: ENERGY_GAIN,
            energy_retention: ENERGY_RETENTION,

            connection_distance: CONNECTION_DISTANCE,
            spawn_probability: SPAWN_PROBABILITY,
            packet_speed: PACKET_SPEED,
            max_effects: MAX_EFFECTS,
            ring_threshold: RING_THRESHOLD,
            ring_max_radius: RING_MAX_RADIUS,
            ring_speed: RING_SPEED,

            line_width: LINE_WIDTH,
            glow_scale: GLOW_SCALE,
        }
    }
}

impl FieldParams {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::NeuralField => Self::default(),
            Preset::BioMesh => Self {
                max_entities: 100,
                area_per_entity: 8_000.0,
                palette: Palette::macchiato(),
                category_weights: [0.2, 0.6, 0.2],
                connection_distance: 110.0,
                interaction_strength: 18.0,
                spawn_probability: 0.0015,
                ring_threshold: 0.6,
                glow_scale: 3.0,
                ..Self::default()
            },
            Preset::FlowingLines => Self {
                max_entities: 60,
                area_per_entity: 16_000.0,
                palette: Palette::latte(),
                category_weights: [0.1, 0.7, 0.2],
                trail_length: 24,
                damping: 0.99,
                drift_strength: 0.08,
                connection_distance: 0.0,
                spawn_probability: 0.0,
                max_effects: 8,
                glow_scale: 2.0,
                ..Self::default()
            },
        }
    }

    /// Entity count for a surface, proportional to area and capped
    pub fn entity_count(&self, width: f32, height: f32) -> usize {
        if !(width > 0.0 && height > 0.0) || self.area_per_entity <= 0.0 {
            return 0;
        }
        let by_area = (width * height / self.area_per_entity).floor() as usize;
        by_area.min(self.max_entities)
    }

    /// True when switching from `self` to `other` requires reseeding the store
    pub fn requires_reseed(&self, other: &FieldParams) -> bool {
        self.max_entities != other.max_entities
            || self.area_per_entity != other.area_per_entity
            || self.palette != other.palette
            || self.category_weights != other.category_weights
            || self.trail_length != other.trail_length
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        let finite = [
            ("area_per_entity", self.area_per_entity),
            ("initial_speed", self.initial_speed),
            ("damping", self.damping),
            ("max_speed", self.max_speed),
            ("wrap_margin", self.wrap_margin),
            ("drift_strength", self.drift_strength),
            ("phase_step", self.phase_step),
            ("interaction_radius", self.interaction_radius),
            ("interaction_strength", self.interaction_strength),
            ("softening", self.softening),
            ("energy_gain", self.energy_gain),
            ("energy_retention", self.energy_retention),
            ("connection_distance", self.connection_distance),
            ("spawn_probability", self.spawn_probability),
            ("packet_speed", self.packet_speed),
            ("ring_threshold", self.ring_threshold),
            ("ring_max_radius", self.ring_max_radius),
            ("ring_speed", self.ring_speed),
            ("line_width", self.line_width),
            ("glow_scale", self.glow_scale),
        ];
        let weights = self.category_weights.map(|weight| ("category_weights", weight));
        for (field, value) in finite.into_iter().chain(weights) {
            if !value.is_finite() {
                return Err(ParamsError::NotFinite { field, value });
            }
        }

        let non_negative = [
            ("initial_speed", self.initial_speed),
            ("wrap_margin", self.wrap_margin),
            ("drift_strength", self.drift_strength),
            ("phase_step", self.phase_step),
            ("softening", self.softening),
            ("connection_distance", self.connection_distance),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ParamsError::Negative { field, value });
            }
        }

        let positive = [
            ("area_per_entity", self.area_per_entity),
            ("max_speed", self.max_speed),
            ("interaction_radius", self.interaction_radius),
            ("ring_max_radius", self.ring_max_radius),
            ("packet_speed", self.packet_speed),
            ("ring_speed", self.ring_speed),
            ("line_width", self.line_width),
            ("glow_scale", self.glow_scale),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ParamsError::NotPositive { field, value });
            }
        }

        let unit = [
            ("spawn_probability", self.spawn_probability),
            ("ring_threshold", self.ring_threshold),
            ("energy_gain", self.energy_gain),
        ];
        for (field, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::OutOfUnitRange { field, value });
            }
        }

        let retention = [
            ("damping", self.damping),
            ("energy_retention", self.energy_retention),
        ];
        for (field, value) in retention {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ParamsError::RetentionOutOfRange { field, value });
            }
        }

        if self.palette.is_empty() {
            return Err(ParamsError::EmptyPalette);
        }

        let weight_total: f32 = self.category_weights.iter().filter(|w| **w > 0.0).sum();
        if weight_total <= 0.0 {
            return Err(ParamsError::NoCategoryWeight);
        }

        Ok(())
    }
}
