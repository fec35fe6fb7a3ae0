//! Draws one field onto a [`Canvas`]

use crate::canvas::Canvas;
use field_core::{Color, EffectKind, Palette};
use field_simulation::FieldSimulation;
use rand::Rng;

const CONNECTION_OPACITY: f32 = 0.35;
const TRAIL_OPACITY: f32 = 0.5;
const PACKET_RADIUS: f32 = 2.0;
const RING_WIDTH: f32 = 1.5;
const GLOW_OPACITY: f32 = 0.25;

/// Issue the draw calls for one frame
///
/// Order: clear, connections, trails, effects, then per entity a glow and its
/// core. A zero-area field only clears.
pub fn draw_field<C: Canvas, R: Rng>(canvas: &mut C, simulation: &FieldSimulation<R>) {
    canvas.clear(Palette::background());

    let bounds = simulation.bounds();
    if !(bounds.x > 0.0 && bounds.y > 0.0) {
        return;
    }

    let params = simulation.params();
    let entities = simulation.entities();

    for connection in simulation.connections() {
        let (a, b) = (&entities[connection.a], &entities[connection.b]);
        let color = a
            .color
            .lerp(b.color, 0.5)
            .with_alpha(connection.alpha * CONNECTION_OPACITY);
        canvas.line(a.position, b.position, params.line_width, color);
    }

    for entity in entities {
        let segments = entity.trail.len().saturating_sub(1);
        for (i, (from, to)) in entity.trail.segments().enumerate() {
            let alpha = (i + 1) as f32 / segments as f32 * TRAIL_OPACITY;
            canvas.line(from, to, params.line_width, entity.color.with_alpha(alpha));
        }
    }

    for effect in simulation.effects() {
        let color = effect.color.fade(effect.opacity());
        match effect.kind {
            EffectKind::Packet { .. } => {
                if let Some(position) = effect.position(entities) {
                    canvas.circle(position, PACKET_RADIUS, color);
                }
            }
            EffectKind::Ring { center, .. } => {
                if let Some(radius) = effect.radius() {
                    canvas.ring(center, radius, RING_WIDTH, color);
                }
            }
        }
    }

    for entity in entities {
        let pulse = entity.pulse();
        let glow_radius = entity.radius * params.glow_scale * pulse * (1.0 + entity.energy);
        let inner = entity
            .color
            .with_alpha(GLOW_OPACITY + 0.5 * entity.energy);
        canvas.radial_glow(entity.position, glow_radius, inner, Color::transparent());
        canvas.circle(entity.position, entity.radius * pulse, entity.color);
    }
}
