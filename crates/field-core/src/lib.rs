//! # Field Core
//!
//! Entity model for the interactive particle field: categories, colors,
//! trails, ephemeral effects and the per-entity force terms.

pub mod color;
pub mod constants;
pub mod effect;
pub mod entity;
pub mod forces;
pub mod trail;

pub use color::*;
pub use constants::*;
pub use effect::*;
pub use entity::*;
pub use forces::*;
pub use trail::*;
