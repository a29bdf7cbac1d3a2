use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Tunables for the particle field. Every field is optional when read from JS;
/// missing keys fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    /// Foreground particles per square CSS pixel.
    pub particle_density: f64,
    /// Background particles per square CSS pixel.
    pub background_density: f64,
    pub mouse_radius: f64,
    pub repulsion: f64,
    pub repulsion_boost: f64,
    pub spring: f64,
    pub damping: f64,
    pub scroll_force_scale: f64,
    /// Fraction of the scroll force applied to background particles.
    pub background_scroll_share: f64,
    pub sparkle_chance: f64,
    pub accent_chance: f64,
    /// Number of full-viewport sections the scroll container holds. Scroll
    /// progress runs up to `sections - 1` and the color gradient spans it.
    pub sections: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub profile: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_density: 0.00015,
            background_density: 0.00005,
            mouse_radius: 250.0,
            repulsion: 1.2,
            repulsion_boost: 5.0,
            spring: 0.05,
            damping: 0.92,
            scroll_force_scale: 0.05,
            background_scroll_share: 0.1,
            sparkle_chance: 0.005,
            accent_chance: 0.1,
            sections: 3,
            seed: None,
            profile: false,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), Error> {
        let non_negative = [
            ("particleDensity", self.particle_density),
            ("backgroundDensity", self.background_density),
            ("mouseRadius", self.mouse_radius),
            ("repulsion", self.repulsion),
            ("repulsionBoost", self.repulsion_boost),
            ("spring", self.spring),
            ("scrollForceScale", self.scroll_force_scale),
            ("backgroundScrollShare", self.background_scroll_share),
        ];
        for (name, value) in non_negative.iter() {
            if !value.is_finite() || *value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }

        let unit = [
            ("damping", self.damping),
            ("sparkleChance", self.sparkle_chance),
            ("accentChance", self.accent_chance),
        ];
        for (name, value) in unit.iter() {
            if !(0.0..=1.0).contains(value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must lie in [0, 1] (got {})",
                    name, value
                )));
            }
        }

        if self.sections == 0 {
            return Err(Error::InvalidConfig("sections must be at least 1".into()));
        }
        Ok(())
    }

    /// Upper bound of the scroll progress, one less than the section count.
    pub fn max_progress(&self) -> f64 {
        (self.sections.max(1) - 1) as f64
    }
}
