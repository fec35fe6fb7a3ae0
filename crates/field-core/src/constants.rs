//! Default tuning constants for the particle field
//!
//! Rates are expressed per reference frame (60 Hz) and scaled by the real
//! frame delta in the stepper, so changing the display refresh rate does not
//! change visual speed.

/// Duration of one reference frame in seconds
pub const REFERENCE_FRAME: f32 = 1.0 / 60.0;

/// Largest delta accepted per step; longer gaps (e.g. a hidden window) are
/// clamped so entities do not jump across the surface
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Entity cap regardless of surface area
pub const MAX_ENTITIES: usize = 80;

/// Surface area (logical px²) per entity before the cap applies
pub const AREA_PER_ENTITY: f32 = 12_000.0;

/// Pairs closer than this are joined by a connection line
pub const CONNECTION_DISTANCE: f32 = 150.0;

/// Pointer influence radius
pub const INTERACTION_RADIUS: f32 = 200.0;

/// Pointer force numerator; magnitude is strength / (distance + softening)
pub const INTERACTION_STRENGTH: f32 = 12.0;

/// Softening added to pointer distance to avoid a singular force at r→0
pub const SOFTENING: f32 = 8.0;

/// Velocity retention per reference frame
pub const DAMPING: f32 = 0.96;

/// Speed cap (px per reference frame)
pub const MAX_SPEED: f32 = 2.0;

/// Largest initial speed when seeding
pub const INITIAL_SPEED: f32 = 0.6;

/// Distance past a bound before an entity re-enters on the opposite side
pub const WRAP_MARGIN: f32 = 20.0;

/// Ambient sinusoidal drift added to velocity per reference frame
pub const DRIFT_STRENGTH: f32 = 0.03;

/// Phase advance per reference frame (radians)
pub const PHASE_STEP: f32 = 0.05;

/// Energy gained per reference frame at zero pointer distance
pub const ENERGY_GAIN: f32 = 0.08;

/// Energy kept per reference frame while not interacting
pub const ENERGY_RETENTION: f32 = 0.97;

/// Chance per connected pair per reference frame of spawning a packet
pub const SPAWN_PROBABILITY: f32 = 0.003;

/// Packet progress per reference frame
pub const PACKET_SPEED: f32 = 0.02;

/// Live ephemeral effects cap
pub const MAX_EFFECTS: usize = 32;

/// Energy level that triggers a wave ring when crossed upward
pub const RING_THRESHOLD: f32 = 0.8;

/// Final radius of a wave ring
pub const RING_MAX_RADIUS: f32 = 60.0;

/// Ring progress per reference frame
pub const RING_SPEED: f32 = 0.025;

/// Trail points kept per entity (0 disables trails)
pub const TRAIL_LENGTH: usize = 0;

/// Connection line width
pub const LINE_WIDTH: f32 = 1.0;

/// Glow radius as a multiple of the entity radius
pub const GLOW_SCALE: f32 = 4.0;

/// Relative category weights for Core, Data and Energy
pub const CATEGORY_WEIGHTS: [f32; 3] = [0.15, 0.55, 0.30];
