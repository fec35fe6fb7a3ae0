//! Per-entity force terms and bound handling
//!
//! Pure functions over positions and velocities; the stepper composes them and
//! scales the results by the frame delta.

use crate::entity::InteractionKind;
use glam::Vec2;

/// Pointer force applied to one entity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionForce {
    pub force: Vec2,
    /// 1.0 at the pointer, falling linearly to 0.0 at the interaction radius
    pub proximity: f32,
}

/// Organic wave motion from two sinusoids in time and position
///
/// Each axis uses a different frequency and the entity's own offset, so
/// neighbors drift coherently but never in lockstep.
pub fn ambient_drift(position: Vec2, elapsed: f32, offset: f32, strength: f32) -> Vec2 {
    let x = (elapsed * 0.7 + position.y * 0.008 + offset).sin();
    let y = (elapsed * 0.5 + position.x * 0.006 + offset * 1.7).cos();
    Vec2::new(x, y) * strength
}

/// Force from a pointer within `radius`, or `None` when out of range
///
/// Magnitude is `strength / (distance + softening)`; direction depends on the
/// interaction kind.
pub fn interaction_force(
    position: Vec2,
    pointer: Vec2,
    radius: f32,
    strength: f32,
    softening: f32,
    kind: InteractionKind,
) -> Option<InteractionForce> {
    let to_pointer = pointer - position;
    let distance = to_pointer.length();

    if distance.is_nan() || distance >= radius {
        return None;
    }

    let direction = if distance > f32::EPSILON {
        to_pointer / distance
    } else {
        // Sitting exactly on the pointer: no defined direction
        Vec2::ZERO
    };

    let magnitude = strength / (distance + softening.max(f32::EPSILON));
    let force = match kind {
        InteractionKind::Attract => direction * magnitude,
        InteractionKind::Repel => -direction * magnitude,
        InteractionKind::Orbit => direction.perp() * magnitude,
    };

    Some(InteractionForce {
        force,
        proximity: 1.0 - distance / radius,
    })
}

/// Limit speed without changing direction
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    velocity.clamp_length_max(max_speed.max(0.0))
}

/// Wrap one coordinate into `[-margin, bound + margin]`
///
/// Leaving past one edge re-enters at the opposite edge, offset by the
/// margin. Returns the new value and whether a wrap happened.
pub fn wrap_axis(value: f32, bound: f32, margin: f32) -> (f32, bool) {
    if value < -margin {
        (bound + margin, true)
    } else if value > bound + margin {
        (-margin, true)
    } else {
        (value, false)
    }
}

pub fn wrap_position(position: Vec2, bounds: Vec2, margin: f32) -> (Vec2, bool) {
    let (x, wrapped_x) = wrap_axis(position.x, bounds.x, margin);
    let (y, wrapped_y) = wrap_axis(position.y, bounds.y, margin);
    (Vec2::new(x, y), wrapped_x || wrapped_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_has_no_force() {
        let force = interaction_force(
            Vec2::ZERO,
            Vec2::new(300.0, 0.0),
            200.0,
            10.0,
            1.0,
            InteractionKind::Attract,
        );
        assert!(force.is_none());
    }

    #[test]
    fn test_interaction_directions() {
        let position = Vec2::ZERO;
        let pointer = Vec2::new(100.0, 0.0);

        let attract =
            interaction_force(position, pointer, 200.0, 10.0, 1.0, InteractionKind::Attract)
                .unwrap();
        let repel =
            interaction_force(position, pointer, 200.0, 10.0, 1.0, InteractionKind::Repel)
                .unwrap();
        let orbit =
            interaction_force(position, pointer, 200.0, 10.0, 1.0, InteractionKind::Orbit)
                .unwrap();

        assert!(attract.force.x > 0.0);
        assert!(repel.force.x < 0.0);
        assert!(orbit.force.x.abs() < 1e-6);
        assert!(orbit.force.y.abs() > 0.0);
        assert!((attract.proximity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_force_falls_off_with_distance() {
        let near = interaction_force(
            Vec2::new(90.0, 0.0),
            Vec2::new(100.0, 0.0),
            200.0,
            10.0,
            1.0,
            InteractionKind::Attract,
        )
        .unwrap();
        let far = interaction_force(
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            200.0,
            10.0,
            1.0,
            InteractionKind::Attract,
        )
        .unwrap();

        assert!(near.force.length() > far.force.length());
        assert!(near.proximity > far.proximity);
    }

    #[test]
    fn test_force_on_pointer_is_finite() {
        let force = interaction_force(
            Vec2::splat(5.0),
            Vec2::splat(5.0),
            200.0,
            10.0,
            0.0,
            InteractionKind::Repel,
        )
        .unwrap();
        assert_eq!(force.force, Vec2::ZERO);
        assert_eq!(force.proximity, 1.0);
    }

    #[test]
    fn test_clamp_speed() {
        let clamped = clamp_speed(Vec2::new(30.0, 40.0), 5.0);
        assert!((clamped.length() - 5.0).abs() < 1e-5);
        assert!((clamped.x / clamped.y - 0.75).abs() < 1e-5);

        let slow = Vec2::new(0.1, 0.2);
        assert_eq!(clamp_speed(slow, 5.0), slow);
    }

    #[test]
    fn test_wrap_axis() {
        assert_eq!(wrap_axis(-21.0, 800.0, 20.0), (820.0, true));
        assert_eq!(wrap_axis(821.0, 800.0, 20.0), (-20.0, true));
        assert_eq!(wrap_axis(-20.0, 800.0, 20.0), (-20.0, false));
        assert_eq!(wrap_axis(400.0, 800.0, 20.0), (400.0, false));
    }

    #[test]
    fn test_drift_is_bounded() {
        for i in 0..100 {
            let t = i as f32 * 0.37;
            let drift = ambient_drift(Vec2::new(t * 13.0, t * 7.0), t, 0.5, 0.03);
            assert!(drift.x.abs() <= 0.03 + 1e-6);
            assert!(drift.y.abs() <= 0.03 + 1e-6);
        }
    }
}
