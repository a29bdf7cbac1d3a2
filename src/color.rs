// Simple color struct, created from an unsigned 32 representing 0xRRGGBB,
// plus the scroll-driven gradient used to tint the glow and sparkles

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const ACCENT_BLUE: Color = Color::from_u32(0x4285F4);

    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = num as u8;

        Color { r, g, b }
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { color: self, alpha }
    }

    // Linear blend towards `other`, each channel rounded to the nearest integer
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// A color plus an opacity in `[0, 1]`, formatted as a CSS `rgba()` string.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    pub color: Color,
    pub alpha: f64,
}

impl Rgba {
    pub fn opaque(color: Color) -> Rgba {
        color.with_alpha(1.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.color.r, self.color.g, self.color.b, self.alpha
        )
    }
}

/// Three evenly spaced stops sampled by scroll progress in `[0, 2]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollGradient {
    pub stops: [Color; 3],
}

impl Default for ScrollGradient {
    fn default() -> Self {
        ScrollGradient::SCROLL
    }
}

impl ScrollGradient {
    /// Blue, then purple, then cyan.
    pub const SCROLL: ScrollGradient = ScrollGradient {
        stops: [
            Color::new(66, 133, 244),
            Color::new(147, 51, 234),
            Color::new(34, 211, 238),
        ],
    };

    // Stretches `[0, max_progress]` over the three stops
    pub fn sample_over(&self, progress: f64, max_progress: f64) -> Color {
        if max_progress > 0.0 {
            self.sample(progress / max_progress * 2.0)
        } else {
            self.stops[0]
        }
    }

    pub fn sample(&self, progress: f64) -> Color {
        let [first, middle, last] = self.stops;
        let progress = progress.max(0.0).min(2.0);
        if progress <= 1.0 {
            first.lerp(middle, progress)
        } else {
            middle.lerp(last, progress - 1.0)
        }
    }
}
