//! Entity store and frame stepper for the particle field
//!
//! All state is owned by one `FieldSimulation`: the entity store (sized by
//! surface area, refitted on resize), the ephemeral effect list (bounded by
//! `max_effects`) and the connection list rebuilt every step. Randomness comes from the injected
//! generator only, so a seeded generator and a fixed delta sequence reproduce
//! a run exactly.

use crate::params::FieldParams;
use field_core::{
    ambient_drift, clamp_speed, interaction_force, wrap_position, Category, Effect, EffectKind,
    Entity, MAX_FRAME_DELTA, REFERENCE_FRAME,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::TAU;

/// Line between two entities closer than the connection distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    /// 1.0 when touching, falling linearly to 0.0 at the connection distance
    pub alpha: f32,
}

pub struct FieldSimulation<R = StdRng> {
    params: FieldParams,
    bounds: Vec2,
    /// Bounds the entity store was last laid out for
    layout: Vec2,
    entities: Vec<Entity>,
    effects: Vec<Effect>,
    connections: Vec<Connection>,
    rng: R,
    elapsed: f32,
    frames: u64,
    next_effect_id: u64,
}

/// Per-frame chance for a per-reference-frame probability
fn scaled_probability(probability: f32, frame_scale: f32) -> f32 {
    if probability <= 0.0 || frame_scale <= 0.0 {
        0.0
    } else if probability >= 1.0 {
        1.0
    } else {
        1.0 - (1.0 - probability).powf(frame_scale)
    }
}

fn sanitize_bounds(bounds: Vec2) -> Vec2 {
    if bounds.is_finite() {
        bounds.max(Vec2::ZERO)
    } else {
        Vec2::ZERO
    }
}

fn spawn_entity<R: Rng>(params: &FieldParams, bounds: Vec2, rng: &mut R) -> Entity {
    let category = Category::choose(&params.category_weights, rng.random::<f32>());
    let (min_radius, max_radius) = category.size_range();
    let radius = rng.random_range(min_radius..=max_radius);

    let position = Vec2::new(rng.random::<f32>() * bounds.x, rng.random::<f32>() * bounds.y);
    let heading = rng.random::<f32>() * TAU;
    let speed = (rng.random::<f32>() * params.initial_speed).min(params.max_speed.max(0.0));

    Entity::new(
        position,
        Vec2::from_angle(heading) * speed,
        radius,
        params.palette.color(category.palette_slot()),
        category,
        params.trail_length,
    )
    .with_phase(rng.random::<f32>() * TAU)
    .with_drift_offset(rng.random::<f32>() * TAU)
}

impl<R: Rng> FieldSimulation<R> {
    /// Create a field for `bounds` (logical pixels) and seed its entities
    pub fn new(params: FieldParams, bounds: Vec2, rng: R) -> Self {
        let mut simulation = Self {
            params,
            bounds: sanitize_bounds(bounds),
            layout: Vec2::ZERO,
            entities: Vec::new(),
            effects: Vec::new(),
            connections: Vec::new(),
            rng,
            elapsed: 0.0,
            frames: 0,
            next_effect_id: 0,
        };
        simulation.seed();
        simulation
    }

    fn seed(&mut self) {
        let Self {
            params,
            bounds,
            layout,
            entities,
            effects,
            connections,
            rng,
            ..
        } = self;

        let count = params.entity_count(bounds.x, bounds.y);
        *layout = *bounds;
        entities.clear();
        effects.clear();
        connections.clear();
        entities.extend((0..count).map(|_| spawn_entity(params, *bounds, rng)));

        log::info!(
            "Seeded {} entities for {:.0}x{:.0} surface",
            count,
            bounds.x,
            bounds.y
        );
    }

    /// Rebuild the entity store from the generator and clear all effects
    pub fn reseed(&mut self) {
        self.seed();
    }

    /// Adopt new surface bounds
    ///
    /// Surviving entities are moved proportionally into the new bounds, then
    /// the store is topped up or trimmed to the count for the new area. A
    /// zero-area surface leaves the store untouched until it grows again.
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = sanitize_bounds(bounds);
        let count = self.params.entity_count(self.bounds.x, self.bounds.y);
        if count == 0 || self.bounds == self.layout {
            return;
        }
        if self.entities.is_empty() {
            self.seed();
            return;
        }

        let Self {
            params,
            bounds,
            layout,
            entities,
            effects,
            connections,
            rng,
            ..
        } = self;

        let scale = *bounds / *layout;
        let margin = params.wrap_margin.max(0.0);
        let (min, max) = (Vec2::splat(-margin), *bounds + margin);
        for entity in entities.iter_mut() {
            entity.position = (entity.position * scale).clamp(min, max);
            entity.trail.clear();
        }

        let previous = entities.len();
        if count < previous {
            entities.truncate(count);
            effects.retain(|effect| match effect.kind {
                EffectKind::Packet { from, to } => from < count && to < count,
                EffectKind::Ring { .. } => true,
            });
        } else {
            entities.extend((previous..count).map(|_| spawn_entity(params, *bounds, rng)));
        }
        for effect in effects.iter_mut() {
            if let EffectKind::Ring { center, .. } = &mut effect.kind {
                *center *= scale;
            }
        }
        connections.clear();
        *layout = *bounds;

        log::debug!(
            "Refitted {} -> {} entities for {:.0}x{:.0} surface",
            previous,
            count,
            bounds.x,
            bounds.y
        );
    }

    /// Apply tuned parameters, reseeding only when the store shape changes
    pub fn set_params(&mut self, params: FieldParams) {
        let reseed = self.params.requires_reseed(&params);
        self.params = params;
        if reseed {
            self.seed();
        } else {
            self.effects.truncate(self.params.max_effects);
        }
    }

    /// Advance the field by `dt` seconds
    ///
    /// `pointer` is the current pointer position in logical coordinates, or
    /// `None` when the pointer is off the surface. The step is skipped for a
    /// zero-area surface.
    pub fn step(&mut self, dt: f32, pointer: Option<Vec2>) {
        if !(self.bounds.x > 0.0 && self.bounds.y > 0.0) || self.entities.is_empty() {
            return;
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            0.0
        };
        self.elapsed += dt;
        self.frames += 1;

        let frame_scale = dt / REFERENCE_FRAME;
        let Self {
            params,
            bounds,
            entities,
            effects,
            connections,
            rng,
            elapsed,
            next_effect_id,
            ..
        } = self;

        let damping = params.damping.powf(frame_scale);
        let retention = params.energy_retention.powf(frame_scale);

        for entity in entities.iter_mut() {
            entity.phase = (entity.phase + params.phase_step * frame_scale).rem_euclid(TAU);

            entity.velocity += ambient_drift(
                entity.position,
                *elapsed,
                entity.drift_offset,
                params.drift_strength,
            ) * frame_scale;

            let previous_energy = entity.energy;
            let force = pointer.and_then(|pointer| {
                interaction_force(
                    entity.position,
                    pointer,
                    params.interaction_radius,
                    params.interaction_strength,
                    params.softening,
                    entity.category.interaction(),
                )
            });
            match force {
                Some(force) => {
                    entity.velocity += force.force * frame_scale;
                    let gain = params.energy_gain * force.proximity * frame_scale;
                    entity.energy = (entity.energy + gain).min(1.0);
                }
                None => entity.energy *= retention,
            }

            entity.position += entity.velocity * frame_scale;
            entity.velocity = clamp_speed(entity.velocity * damping, params.max_speed);

            let (position, wrapped) = wrap_position(entity.position, *bounds, params.wrap_margin);
            entity.position = position;
            if wrapped {
                entity.trail.clear();
            }
            entity.trail.push(position);

            let charged = previous_energy < params.ring_threshold
                && entity.energy >= params.ring_threshold;
            if charged && effects.len() < params.max_effects {
                effects.push(Effect::ring(
                    *next_effect_id,
                    entity.position,
                    params.ring_max_radius,
                    params.ring_speed,
                    entity.color,
                ));
                *next_effect_id += 1;
            }
        }

        connections.clear();
        let reach = params.connection_distance;
        if reach > 0.0 {
            let reach_sq = reach * reach;
            let spawn_chance = scaled_probability(params.spawn_probability, frame_scale);

            for a in 0..entities.len() {
                for b in (a + 1)..entities.len() {
                    let distance_sq = entities[a].position.distance_squared(entities[b].position);
                    if distance_sq >= reach_sq {
                        continue;
                    }
                    let alpha = 1.0 - distance_sq.sqrt() / reach;
                    if alpha <= 0.0 {
                        continue;
                    }

                    connections.push(Connection { a, b, alpha });

                    if spawn_chance > 0.0
                        && effects.len() < params.max_effects
                        && rng.random::<f32>() < spawn_chance
                    {
                        let (from, to) = if rng.random_bool(0.5) { (a, b) } else { (b, a) };
                        effects.push(Effect::packet(
                            *next_effect_id,
                            from,
                            to,
                            params.packet_speed,
                            entities[from].color,
                        ));
                        *next_effect_id += 1;
                    }
                }
            }
        }

        for effect in effects.iter_mut() {
            effect.advance(frame_scale);
        }
        effects.retain(|effect| !effect.is_finished());
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Connections found by the most recent step
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Seconds simulated so far (sum of clamped deltas)
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn mean_energy(&self) -> f32 {
        if self.entities.is_empty() {
            return 0.0;
        }
        self.entities.iter().map(|e| e.energy).sum::<f32>() / self.entities.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashMap;

    const FRAME: f32 = 1.0 / 60.0;

    fn field(params: FieldParams, width: f32, height: f32, seed: u64) -> FieldSimulation {
        FieldSimulation::new(params, Vec2::new(width, height), StdRng::seed_from_u64(seed))
    }

    /// Pointer path sweeping a circle through the middle of an 800x600 surface
    fn sweeping_pointer(frame: usize) -> Option<Vec2> {
        if frame % 200 > 170 {
            return None;
        }
        let angle = frame as f32 * 0.05;
        Some(Vec2::new(400.0, 300.0) + Vec2::from_angle(angle) * 180.0)
    }

    #[test]
    fn test_entity_count_follows_area_and_cap() {
        let params = FieldParams {
            max_entities: 50,
            area_per_entity: 10_000.0,
            ..FieldParams::default()
        };

        assert_eq!(field(params.clone(), 400.0, 250.0, 1).entities().len(), 10);
        assert_eq!(field(params, 4000.0, 3000.0, 1).entities().len(), 50);
    }

    #[test]
    fn test_seeded_entities_start_in_bounds() {
        let simulation = field(FieldParams::default(), 800.0, 600.0, 3);
        for entity in simulation.entities() {
            assert!((0.0..=800.0).contains(&entity.position.x));
            assert!((0.0..=600.0).contains(&entity.position.y));
            let (min_radius, max_radius) = entity.category.size_range();
            assert!(entity.radius >= min_radius && entity.radius <= max_radius);
            assert!(entity.speed() <= simulation.params().max_speed + 1e-4);
        }
    }

    #[test]
    fn test_positions_stay_within_wrap_bounds() {
        let params = FieldParams {
            interaction_strength: 40.0,
            max_speed: 6.0,
            ..FieldParams::default()
        };
        let margin = params.wrap_margin;
        let mut simulation = field(params, 800.0, 600.0, 11);

        for frame in 0..900 {
            // Mix of steady frames and long stalls
            let dt = if frame % 97 == 0 { 0.5 } else { FRAME };
            simulation.step(dt, sweeping_pointer(frame));

            for entity in simulation.entities() {
                assert!(entity.position.x >= -margin && entity.position.x <= 800.0 + margin);
                assert!(entity.position.y >= -margin && entity.position.y <= 600.0 + margin);
            }
        }
    }

    #[test]
    fn test_speed_is_clamped_every_frame() {
        let params = FieldParams {
            interaction_strength: 200.0,
            softening: 0.5,
            drift_strength: 0.5,
            ..FieldParams::default()
        };
        let max_speed = params.max_speed;
        let mut simulation = field(params, 800.0, 600.0, 5);

        for frame in 0..600 {
            simulation.step(FRAME * (1.0 + (frame % 3) as f32), sweeping_pointer(frame));
            for entity in simulation.entities() {
                assert!(entity.speed() <= max_speed + 1e-4, "speed {}", entity.speed());
            }
        }
    }

    #[test]
    fn test_identical_seeds_replay_identically() {
        let deltas = [FRAME, 0.017, 0.033, 0.008, FRAME, 0.05];
        let mut first = field(FieldParams::default(), 800.0, 600.0, 42);
        let mut second = field(FieldParams::default(), 800.0, 600.0, 42);

        for frame in 0..300 {
            let dt = deltas[frame % deltas.len()];
            first.step(dt, sweeping_pointer(frame));
            second.step(dt, sweeping_pointer(frame));

            let a: Vec<Vec2> = first.entities().iter().map(|e| e.position).collect();
            let b: Vec<Vec2> = second.entities().iter().map(|e| e.position).collect();
            assert_eq!(a, b, "diverged at frame {}", frame);
            assert_eq!(first.effects(), second.effects());
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let first = field(FieldParams::default(), 800.0, 600.0, 1);
        let second = field(FieldParams::default(), 800.0, 600.0, 2);

        let a: Vec<Vec2> = first.entities().iter().map(|e| e.position).collect();
        let b: Vec<Vec2> = second.entities().iter().map(|e| e.position).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_effect_lifecycle() {
        let params = FieldParams {
            max_entities: 12,
            area_per_entity: 100.0,
            connection_distance: 2000.0,
            spawn_probability: 1.0,
            packet_speed: 0.07,
            max_effects: 5,
            ..FieldParams::default()
        };
        let cap = params.max_effects;
        let mut simulation = field(params, 400.0, 300.0, 9);

        let mut last_seen: HashMap<u64, Effect> = HashMap::new();
        let mut retired: Vec<u64> = Vec::new();

        for _ in 0..400 {
            simulation.step(FRAME, None);
            assert!(simulation.effects().len() <= cap);

            let live: HashMap<u64, Effect> =
                simulation.effects().iter().map(|e| (e.id, *e)).collect();
            assert_eq!(live.len(), simulation.effects().len(), "duplicate effect id");

            for effect in live.values() {
                assert!(!effect.is_finished());
                assert!(!retired.contains(&effect.id), "effect {} came back", effect.id);
                if let Some(previous) = last_seen.get(&effect.id) {
                    assert!(effect.progress >= previous.progress);
                }
            }

            for (id, previous) in &last_seen {
                if !live.contains_key(id) {
                    // Removed exactly when the next advance reached the end
                    assert!(previous.progress + previous.speed >= 1.0 - 1e-5);
                    retired.push(*id);
                }
            }

            last_seen = live;
        }

        assert!(!retired.is_empty());
    }

    #[test]
    fn test_lowering_effect_cap_truncates() {
        let params = FieldParams {
            max_entities: 12,
            area_per_entity: 100.0,
            connection_distance: 2000.0,
            spawn_probability: 1.0,
            max_effects: 10,
            ..FieldParams::default()
        };
        let mut simulation = field(params.clone(), 400.0, 300.0, 4);
        simulation.step(FRAME, None);
        assert_eq!(simulation.effects().len(), 10);

        simulation.set_params(FieldParams {
            max_effects: 3,
            ..params
        });
        assert_eq!(simulation.effects().len(), 3);
    }

    #[test]
    fn test_energy_rises_near_held_pointer() {
        let params = FieldParams {
            max_entities: 40,
            area_per_entity: 1_000.0,
            interaction_radius: 200.0,
            ..FieldParams::default()
        };
        let center = Vec2::new(400.0, 300.0);
        let mut simulation = field(params, 800.0, 600.0, 2024);
        assert_eq!(simulation.entities().len(), 40);

        let nearby: Vec<usize> = simulation
            .entities()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.position.distance(center) < 200.0)
            .map(|(i, _)| i)
            .collect();
        assert!(!nearby.is_empty());

        let mean_energy = |simulation: &FieldSimulation| {
            nearby
                .iter()
                .map(|&i| simulation.entities()[i].energy)
                .sum::<f32>()
                / nearby.len() as f32
        };

        let before = mean_energy(&simulation);
        for _ in 0..60 {
            simulation.step(FRAME, Some(center));
        }
        let after = mean_energy(&simulation);

        assert!(after > before, "energy {} -> {}", before, after);
    }

    #[test]
    fn test_energy_decays_without_pointer() {
        let mut simulation = field(FieldParams::default(), 800.0, 600.0, 8);
        for entity in simulation.entities.iter_mut() {
            entity.energy = 0.5;
        }

        for _ in 0..30 {
            simulation.step(FRAME, None);
        }

        for entity in simulation.entities() {
            assert!(entity.energy < 0.5);
            assert!(entity.energy > 0.0);
        }
    }

    #[test]
    fn test_ring_spawns_when_entity_charges() {
        let params = FieldParams {
            max_entities: 1,
            connection_distance: 0.0,
            energy_gain: 0.5,
            ring_threshold: 0.8,
            ..FieldParams::default()
        };
        let mut simulation = field(params, 800.0, 600.0, 12);
        let pointer = simulation.entities()[0].position;

        simulation.step(FRAME, Some(pointer));
        assert!(simulation.effects().is_empty());

        simulation.step(FRAME, Some(pointer));
        assert_eq!(simulation.effects().len(), 1);
        assert!(simulation.effects()[0].radius().is_some());

        // Already charged: holding the pointer does not spawn more rings
        simulation.step(FRAME, Some(pointer));
        assert_eq!(simulation.effects().len(), 1);
    }

    #[test]
    fn test_connection_alpha_decays_with_distance() {
        let params = FieldParams {
            connection_distance: 150.0,
            spawn_probability: 0.0,
            ..FieldParams::default()
        };
        let mut simulation = field(params, 800.0, 600.0, 21);
        simulation.step(FRAME, None);

        assert!(!simulation.connections().is_empty());
        for connection in simulation.connections() {
            let a = simulation.entities()[connection.a].position;
            let b = simulation.entities()[connection.b].position;
            let expected = 1.0 - a.distance(b) / 150.0;
            assert!(connection.a < connection.b);
            assert!((connection.alpha - expected).abs() < 1e-4);
            assert!(connection.alpha > 0.0 && connection.alpha <= 1.0);
        }
        assert!(simulation.effects().is_empty());
    }

    #[test]
    fn test_zero_area_skips_frames() {
        let mut simulation = field(FieldParams::default(), 0.0, 0.0, 1);
        assert!(simulation.entities().is_empty());

        simulation.step(FRAME, Some(Vec2::ZERO));
        assert_eq!(simulation.frame_count(), 0);
        assert_eq!(simulation.elapsed(), 0.0);

        let mut simulation = field(FieldParams::default(), 800.0, 600.0, 1);
        let before: Vec<Vec2> = simulation.entities().iter().map(|e| e.position).collect();
        simulation.resize(Vec2::new(800.0, 0.0));
        simulation.step(FRAME, None);

        let after: Vec<Vec2> = simulation.entities().iter().map(|e| e.position).collect();
        assert_eq!(before, after);
        assert_eq!(simulation.frame_count(), 0);
    }

    #[test]
    fn test_resize_seeds_empty_store() {
        let mut simulation = field(FieldParams::default(), 0.0, 0.0, 6);
        simulation.resize(Vec2::new(800.0, 600.0));
        assert_eq!(simulation.entities().len(), 40);

        // Same bounds again keeps the store as is
        let first = simulation.entities()[0].position;
        simulation.resize(Vec2::new(800.0, 600.0));
        assert_eq!(simulation.entities()[0].position, first);
    }

    #[test]
    fn test_resize_grows_store_with_area() {
        let params = FieldParams {
            max_entities: 200,
            ..FieldParams::default()
        };
        let mut simulation = field(params, 800.0, 600.0, 6);
        assert_eq!(simulation.entities().len(), 40);
        let before: Vec<Vec2> = simulation.entities().iter().map(|e| e.position).collect();

        simulation.resize(Vec2::new(1600.0, 1200.0));
        assert_eq!(simulation.entities().len(), 160);

        // Survivors keep their relative place instead of clustering top-left
        for (entity, old) in simulation.entities().iter().zip(&before) {
            assert!(entity.position.distance(*old * 2.0) < 1e-3);
        }
        let in_new_region = simulation
            .entities()
            .iter()
            .filter(|e| e.position.x > 800.0 || e.position.y > 600.0)
            .count();
        assert!(in_new_region > 40, "{} entities outside the old area", in_new_region);
    }

    #[test]
    fn test_resize_shrinks_store_without_stacking() {
        let params = FieldParams {
            connection_distance: 2000.0,
            spawn_probability: 1.0,
            max_effects: 64,
            ..FieldParams::default()
        };
        let margin = params.wrap_margin;
        let mut simulation = field(params, 800.0, 600.0, 6);
        simulation.step(FRAME, None);
        assert!(!simulation.effects().is_empty());

        simulation.resize(Vec2::new(400.0, 300.0));
        assert_eq!(simulation.entities().len(), 10);
        for entity in simulation.entities() {
            assert!((-margin..=400.0 + margin).contains(&entity.position.x));
            assert!((-margin..=300.0 + margin).contains(&entity.position.y));
        }
        for effect in simulation.effects() {
            if let EffectKind::Packet { from, to } = effect.kind {
                assert!(from < 10 && to < 10);
            }
        }

        simulation.step(FRAME, None);
        let on_left_edge = simulation
            .entities()
            .iter()
            .filter(|e| e.position.x == -margin)
            .count();
        let on_top_edge = simulation
            .entities()
            .iter()
            .filter(|e| e.position.y == -margin)
            .count();
        assert!(on_left_edge <= 1 && on_top_edge <= 1);
        for entity in simulation.entities() {
            assert!((-margin..=400.0 + margin).contains(&entity.position.x));
            assert!((-margin..=300.0 + margin).contains(&entity.position.y));
        }
    }

    #[test]
    fn test_resize_to_zero_area_keeps_store() {
        let mut simulation = field(FieldParams::default(), 800.0, 600.0, 6);
        let before: Vec<Vec2> = simulation.entities().iter().map(|e| e.position).collect();

        simulation.resize(Vec2::ZERO);
        simulation.resize(Vec2::new(800.0, 600.0));

        let after: Vec<Vec2> = simulation.entities().iter().map(|e| e.position).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_set_params_reseeds_only_on_shape_change() {
        let params = FieldParams::default();
        let mut simulation = field(params.clone(), 800.0, 600.0, 13);
        let first = simulation.entities()[0].position;

        simulation.set_params(FieldParams {
            damping: 0.9,
            ..params.clone()
        });
        assert_eq!(simulation.entities()[0].position, first);

        simulation.set_params(FieldParams {
            max_entities: 5,
            ..params
        });
        assert_eq!(simulation.entities().len(), 5);
    }

    #[test]
    fn test_long_stall_is_clamped() {
        let mut simulation = field(FieldParams::default(), 800.0, 600.0, 17);
        simulation.step(30.0, None);
        assert!((simulation.elapsed() - MAX_FRAME_DELTA).abs() < 1e-6);

        simulation.step(f32::NAN, None);
        assert!((simulation.elapsed() - MAX_FRAME_DELTA).abs() < 1e-6);
    }

    #[test]
    fn test_flowing_preset_builds_trails() {
        let params = FieldParams::preset(crate::params::Preset::FlowingLines);
        let trail_length = params.trail_length;
        let mut simulation = field(params, 800.0, 600.0, 19);

        for _ in 0..(trail_length * 2) {
            simulation.step(FRAME, None);
        }

        assert!(simulation.connections().is_empty());
        for entity in simulation.entities() {
            assert!(entity.trail.len() <= trail_length);
            assert!(!entity.trail.is_empty());
        }
    }

    #[test]
    fn test_scaled_probability() {
        assert_eq!(scaled_probability(0.0, 1.0), 0.0);
        assert_eq!(scaled_probability(1.0, 0.5), 1.0);
        assert!((scaled_probability(0.1, 1.0) - 0.1).abs() < 1e-6);
        assert!(scaled_probability(0.1, 2.0) > 0.1);
        assert_eq!(scaled_probability(0.5, 0.0), 0.0);
    }
}
