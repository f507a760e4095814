//! Core types used throughout Vitrine

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque RGB color with floating point components (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Create a color from RGB values
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert to an array [r, g, b]
    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 3]> for Color {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_white() {
        assert_eq!(Color::default(), Color::WHITE);
        assert_eq!(Color::default().to_array(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn from_rgb_array() {
        let color = Color::from([0.25, 0.5, 0.75]);
        assert_eq!(color, Color::rgb(0.25, 0.5, 0.75));
    }

    #[test]
    fn display_formats_components() {
        assert_eq!(Color::rgb(0.0, 1.0, 0.5).to_string(), "(0.000, 1.000, 0.500)");
    }
}
