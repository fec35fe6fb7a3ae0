//! Immediate-mode 2D drawing seam
//!
//! Scene code issues draw calls against [`Canvas`]; [`ShapeList`] records them
//! for the GPU renderer (and for tests). All coordinates are logical pixels.

use field_core::Color;
use glam::Vec2;

pub trait Canvas {
    /// Fill the whole surface, discarding anything drawn before
    fn clear(&mut self, color: Color);

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    fn circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Stroked circle outline
    fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color);

    /// Filled circle fading from `inner` at the center to `outer` at the edge
    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    Glow {
        center: Vec2,
        radius: f32,
        inner: Color,
        outer: Color,
    },
}

/// Recorded frame: a clear color plus shapes in draw order
#[derive(Clone, Debug, Default)]
pub struct ShapeList {
    clear: Option<Color>,
    shapes: Vec<Shape>,
}

impl ShapeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_color(&self) -> Option<Color> {
        self.clear
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Forget everything, keeping the allocation for the next frame
    pub fn reset(&mut self) {
        self.clear = None;
        self.shapes.clear();
    }

    fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }
}

fn visible(size: f32, color: Color) -> bool {
    size > 0.0 && size.is_finite() && color.a > 0.0
}

impl Canvas for ShapeList {
    fn clear(&mut self, color: Color) {
        self.clear = Some(color);
        self.shapes.clear();
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if visible(width, color) && from.is_finite() && to.is_finite() {
            self.push(Shape::Line {
                from,
                to,
                width,
                color,
            });
        }
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if visible(radius, color) {
            self.push(Shape::Circle {
                center,
                radius,
                color,
            });
        }
    }

    fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if visible(radius, color) && width > 0.0 {
            self.push(Shape::Ring {
                center,
                radius,
                width,
                color,
            });
        }
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        if radius > 0.0 && radius.is_finite() && (inner.a > 0.0 || outer.a > 0.0) {
            self.push(Shape::Glow {
                center,
                radius,
                inner,
                outer,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_discards_earlier_shapes() {
        let mut list = ShapeList::new();
        list.circle(Vec2::ZERO, 2.0, Color::WHITE);
        list.clear(Color::rgb(0.1, 0.1, 0.1));

        assert!(list.is_empty());
        assert_eq!(list.clear_color(), Some(Color::rgb(0.1, 0.1, 0.1)));
    }

    #[test]
    fn test_invisible_shapes_are_dropped() {
        let mut list = ShapeList::new();
        list.circle(Vec2::ZERO, 0.0, Color::WHITE);
        list.line(Vec2::ZERO, Vec2::ONE, 1.0, Color::WHITE.with_alpha(0.0));
        list.ring(Vec2::ZERO, 5.0, 0.0, Color::WHITE);
        list.radial_glow(Vec2::ZERO, 4.0, Color::transparent(), Color::transparent());
        assert!(list.is_empty());

        list.line(Vec2::ZERO, Vec2::ONE, 1.0, Color::WHITE);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut list = ShapeList::new();
        list.clear(Color::WHITE);
        list.circle(Vec2::ZERO, 1.0, Color::WHITE);
        list.reset();

        assert_eq!(list.clear_color(), None);
        assert!(list.is_empty());
    }
}
