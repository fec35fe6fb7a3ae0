//! # Field Simulation
//!
//! Frame-rate independent CPU simulation of the particle field, plus the
//! surface, pointer and animation-loop plumbing a host window drives it with.

pub mod animation;
pub mod params;
pub mod pointer;
pub mod simulation;
pub mod surface;
pub mod view;

pub use animation::*;
pub use params::*;
pub use pointer::*;
pub use simulation::*;
pub use surface::*;
pub use view::*;
