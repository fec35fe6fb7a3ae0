//! Colors and palettes for field entities

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGBA color in linear space with values in [0, 1]
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Convert sRGB color (0-255) to linear space
    #[inline]
    pub const fn from_srgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        const fn srgb_to_linear(c: u8) -> f32 {
            let x = c as f32 / 255.0;
            if x <= 0.04045 {
                x / 12.92
            } else {
                // Polynomial approximation of ((x + 0.055) / 1.055)^2.4
                let t = (x + 0.055) / 1.055;
                t * t * (0.5870 * t + 0.4130)
            }
        }

        Self::new(
            srgb_to_linear(r),
            srgb_to_linear(g),
            srgb_to_linear(b),
            a as f32 / 255.0,
        )
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }

    /// Multiply the existing alpha, used for fades
    pub fn fade(mut self, factor: f32) -> Self {
        self.a = (self.a * factor).clamp(0.0, 1.0);
        self
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn from_catppuccin(color: &catppuccin::Color) -> Color {
    Color::from_srgba(color.rgb.r, color.rgb.g, color.rgb.b, 255)
}

/// Ordered set of colors, indexed by category slot
///
/// Lookups wrap modulo the palette length, so a short palette still colors
/// every category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color for a slot; an empty palette falls back to white
    pub fn color(&self, slot: usize) -> Color {
        if self.colors.is_empty() {
            return Color::WHITE;
        }
        self.colors[slot % self.colors.len()]
    }

    /// Catppuccin Mocha accents: mauve, sapphire, peach, teal
    pub fn mocha() -> Self {
        let c = &catppuccin::PALETTE.mocha.colors;
        Self::new(vec![
            from_catppuccin(&c.mauve),
            from_catppuccin(&c.sapphire),
            from_catppuccin(&c.peach),
            from_catppuccin(&c.teal),
        ])
    }

    /// Catppuccin Macchiato greens and blues for the mesh look
    pub fn macchiato() -> Self {
        let c = &catppuccin::PALETTE.macchiato.colors;
        Self::new(vec![
            from_catppuccin(&c.green),
            from_catppuccin(&c.teal),
            from_catppuccin(&c.sky),
            from_catppuccin(&c.lavender),
        ])
    }

    /// Catppuccin Latte accents, saturated enough for thin flowing lines
    pub fn latte() -> Self {
        let c = &catppuccin::PALETTE.latte.colors;
        Self::new(vec![
            from_catppuccin(&c.blue),
            from_catppuccin(&c.pink),
            from_catppuccin(&c.sapphire),
            from_catppuccin(&c.mauve),
        ])
    }

    /// Background behind every preset (Catppuccin Mocha crust)
    pub fn background() -> Color {
        from_catppuccin(&catppuccin::PALETTE.mocha.colors.crust)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::mocha()
    }
}
