//! Drawing surface sizing
//!
//! Tracks the logical (CSS-pixel) size of the surface and its device pixel
//! ratio. Backing pixel dimensions are `logical × scale_factor`; all drawing
//! and simulation happens in logical coordinates.

use glam::Vec2;

/// Snapshot of the surface dimensions after a resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    /// Logical size used for simulation bounds and drawing
    pub logical: Vec2,
    /// Backing pixel width
    pub physical_width: u32,
    /// Backing pixel height
    pub physical_height: u32,
    /// Device pixel ratio
    pub scale_factor: f32,
}

impl SurfaceSize {
    pub const EMPTY: SurfaceSize = SurfaceSize {
        logical: Vec2::ZERO,
        physical_width: 0,
        physical_height: 0,
        scale_factor: 1.0,
    };

    pub fn is_drawable(&self) -> bool {
        self.physical_width > 0 && self.physical_height > 0
    }
}

#[derive(Debug, Clone)]
pub struct SurfaceManager {
    size: SurfaceSize,
}

fn sanitize_scale(scale_factor: f32) -> f32 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    }
}

fn sanitize_extent(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

impl SurfaceManager {
    pub fn new() -> Self {
        Self {
            size: SurfaceSize::EMPTY,
        }
    }

    /// Resize from a logical size, e.g. a container's layout box
    pub fn resize(
        &mut self,
        logical_width: f32,
        logical_height: f32,
        scale_factor: f32,
    ) -> SurfaceSize {
        let scale_factor = sanitize_scale(scale_factor);
        let logical = Vec2::new(sanitize_extent(logical_width), sanitize_extent(logical_height));

        self.size = SurfaceSize {
            logical,
            physical_width: (logical.x * scale_factor).round() as u32,
            physical_height: (logical.y * scale_factor).round() as u32,
            scale_factor,
        };

        log::debug!(
            "surface resized: logical={:.1}x{:.1} physical={}x{} scale={:.2}",
            logical.x,
            logical.y,
            self.size.physical_width,
            self.size.physical_height,
            scale_factor
        );

        self.size
    }

    /// Resize from a backing pixel size, as reported by the window system
    pub fn resize_physical(
        &mut self,
        physical_width: u32,
        physical_height: u32,
        scale_factor: f32,
    ) -> SurfaceSize {
        let scale_factor = sanitize_scale(scale_factor);

        self.size = SurfaceSize {
            logical: Vec2::new(
                physical_width as f32 / scale_factor,
                physical_height as f32 / scale_factor,
            ),
            physical_width,
            physical_height,
            scale_factor,
        };

        log::debug!(
            "surface resized: physical={}x{} scale={:.2}",
            physical_width,
            physical_height,
            scale_factor
        );

        self.size
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Logical bounds for the simulation
    pub fn bounds(&self) -> Vec2 {
        self.size.logical
    }

    pub fn scale_factor(&self) -> f32 {
        self.size.scale_factor
    }

    pub fn is_drawable(&self) -> bool {
        self.size.is_drawable()
    }

    /// Convert a backing-pixel position to logical coordinates
    pub fn to_local(&self, physical: Vec2) -> Vec2 {
        physical / self.size.scale_factor
    }
}

impl Default for SurfaceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backing_size_uses_scale_factor() {
        let mut surface = SurfaceManager::new();
        let size = surface.resize(800.0, 600.0, 2.0);

        assert_eq!(size.physical_width, 1600);
        assert_eq!(size.physical_height, 1200);
        assert_eq!(size.logical, Vec2::new(800.0, 600.0));
        assert!(surface.is_drawable());
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut surface = SurfaceManager::new();
        let first = surface.resize(1024.0, 768.0, 1.5);
        let second = surface.resize(1024.0, 768.0, 1.5);
        assert_eq!(first, second);
        assert_eq!(first.scale_factor, second.scale_factor);

        let first = surface.resize_physical(1920, 1080, 1.25);
        let second = surface.resize_physical(1920, 1080, 1.25);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_scale_falls_back() {
        let mut surface = SurfaceManager::new();
        assert_eq!(surface.resize(100.0, 100.0, 0.0).scale_factor, 1.0);
        assert_eq!(surface.resize(100.0, 100.0, f32::NAN).scale_factor, 1.0);
        assert_eq!(surface.resize_physical(100, 100, -2.0).scale_factor, 1.0);
    }

    #[test]
    fn test_zero_area_is_not_drawable() {
        let mut surface = SurfaceManager::new();
        assert!(!surface.is_drawable());

        surface.resize(800.0, 0.0, 1.0);
        assert!(!surface.is_drawable());

        surface.resize_physical(0, 600, 2.0);
        assert!(!surface.is_drawable());
    }

    #[test]
    fn test_to_local() {
        let mut surface = SurfaceManager::new();
        surface.resize_physical(1600, 1200, 2.0);
        assert_eq!(surface.to_local(Vec2::new(400.0, 300.0)), Vec2::new(200.0, 150.0));
        assert_eq!(surface.bounds(), Vec2::new(800.0, 600.0));
    }
}
