//! One mounted particle field: surface, pointer, simulation and loop together
//!
//! The host forwards window events here and calls [`FieldView::frame`] once per
//! redraw. Dropping the view stops the loop; nothing is stepped afterwards.

use crate::animation::AnimationLoop;
use crate::params::FieldParams;
use crate::pointer::PointerTracker;
use crate::simulation::FieldSimulation;
use crate::surface::{SurfaceManager, SurfaceSize};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Instant;

pub struct FieldView<R = StdRng> {
    surface: SurfaceManager,
    pointer: PointerTracker,
    simulation: FieldSimulation<R>,
    animation: AnimationLoop,
}

impl<R: Rng> FieldView<R> {
    /// Create an unsized, stopped view; the store is seeded on the first
    /// non-empty resize
    pub fn new(params: FieldParams, rng: R) -> Self {
        Self {
            surface: SurfaceManager::new(),
            pointer: PointerTracker::new(),
            simulation: FieldSimulation::new(params, Vec2::ZERO, rng),
            animation: AnimationLoop::new(),
        }
    }

    pub fn resize(
        &mut self,
        logical_width: f32,
        logical_height: f32,
        scale_factor: f32,
    ) -> SurfaceSize {
        let size = self.surface.resize(logical_width, logical_height, scale_factor);
        self.simulation.resize(size.logical);
        size
    }

    pub fn resize_physical(&mut self, width: u32, height: u32, scale_factor: f32) -> SurfaceSize {
        let size = self.surface.resize_physical(width, height, scale_factor);
        self.simulation.resize(size.logical);
        size
    }

    /// Pointer moved, in backing pixels as reported by the window system
    pub fn pointer_moved_physical(&mut self, physical: Vec2) {
        let local = self.surface.to_local(physical);
        self.pointer.moved(local);
    }

    /// Pointer moved, in logical coordinates
    pub fn pointer_moved(&mut self, local: Vec2) {
        self.pointer.moved(local);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.left();
    }

    pub fn start(&mut self) {
        self.animation.start();
    }

    pub fn stop(&mut self) {
        self.animation.stop();
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    /// Advance one redraw at `now`; returns true when the field was stepped
    pub fn frame(&mut self, now: Instant) -> bool {
        match self.animation.tick(now) {
            Some(dt) => self.advance(dt),
            None => false,
        }
    }

    /// Step the field by an explicit delta, bypassing the wall clock
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.surface.is_drawable() {
            return false;
        }
        self.simulation.step(dt, self.pointer.position());
        true
    }

    pub fn set_params(&mut self, params: FieldParams) {
        self.simulation.set_params(params);
    }

    pub fn reseed(&mut self) {
        self.simulation.reseed();
    }

    pub fn simulation(&self) -> &FieldSimulation<R> {
        &self.simulation
    }

    pub fn surface(&self) -> &SurfaceManager {
        &self.surface
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }
}

impl<R> Drop for FieldView<R> {
    fn drop(&mut self) {
        self.animation.stop();
        log::debug!("field view unmounted");
    }
}
