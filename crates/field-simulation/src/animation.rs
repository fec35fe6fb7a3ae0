//! Start/stop controller for the per-frame loop
//!
//! The host calls `tick` once per redraw; the controller turns wall-clock
//! instants into frame deltas and reports nothing while stopped.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

#[derive(Debug, Clone)]
pub struct AnimationLoop {
    state: LoopState,
    last_tick: Option<Instant>,
    frames: u64,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Stopped,
            last_tick: None,
            frames: 0,
        }
    }

    /// Start (or keep) running; the next tick reports a zero delta
    pub fn start(&mut self) {
        if self.state == LoopState::Running {
            return;
        }
        self.state = LoopState::Running;
        self.last_tick = None;
        log::debug!("animation loop started");
    }

    pub fn stop(&mut self) {
        if self.state == LoopState::Stopped {
            return;
        }
        self.state = LoopState::Stopped;
        self.last_tick = None;
        log::debug!("animation loop stopped after {} frames", self.frames);
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames ticked while running, across restarts
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Delta in seconds since the previous tick, or `None` while stopped
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        if self.state == LoopState::Stopped {
            return None;
        }

        let dt = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        self.frames += 1;
        Some(dt)
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new()
    }
}
