//! Color utility functions shared across the application.
//!
//! Label colors are derived from the label index with fixed-width 8-bit
//! arithmetic, so every component wraps around at 256.

use serde::{Deserialize, Serialize};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The 8-bit complement, used as text color on top of a swatch.
    pub const fn contrasting(self) -> Self {
        Self {
            r: 255 - self.r,
            g: 255 - self.g,
            b: 255 - self.b,
        }
    }
}

impl std::fmt::Display for Rgb {
    /// Formats as `RRR,GGG,BBB` with each component zero-padded to width 3.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03},{:03},{:03}", self.r, self.g, self.b)
    }
}

/// Derive the display color for a label at `index`.
///
/// # Arguments
/// * `index` - Zero-based label position at creation time
///
/// # Returns
/// `((index+9)*30, (index+6)*60, (index+3)*90)`, each reduced mod 256
pub fn label_color(index: usize) -> Rgb {
    // Reduction mod 256 commutes with + and *, so truncating first is exact.
    let i = (index % 256) as u8;
    Rgb {
        r: i.wrapping_add(9).wrapping_mul(30),
        g: i.wrapping_add(6).wrapping_mul(60),
        b: i.wrapping_add(3).wrapping_mul(90),
    }
}
