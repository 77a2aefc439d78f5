//! UI preferences
//!
//! Held in memory for the lifetime of the page.

use serde::{Deserialize, Serialize};

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Multiplier on overlay particle counts
    pub fn particle_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.4,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.5,
        }
    }

    /// Next preset, wrapping
    pub fn cycled(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    /// Overlay effect quality
    pub quality: QualityPreset,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            quality: QualityPreset::Medium,
            show_fps: false,
        }
    }
}

impl Settings {
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        log::info!("Theme: {}", self.theme.as_str());
        self.theme
    }

    pub fn cycle_quality(&mut self) -> QualityPreset {
        self.quality = self.quality.cycled();
        log::info!("Quality: {}", self.quality.as_str());
        self.quality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_round_trip() {
        let mut s = Settings::default();
        assert_eq!(s.theme, Theme::Light);
        assert_eq!(s.toggle_theme(), Theme::Dark);
        assert!(s.theme.is_dark());
        assert_eq!(s.toggle_theme(), Theme::Light);
    }

    #[test]
    fn test_quality_cycle() {
        let mut s = Settings::default();
        assert_eq!(s.cycle_quality(), QualityPreset::High);
        assert_eq!(s.cycle_quality(), QualityPreset::Low);
        assert!(QualityPreset::Low.particle_scale() < QualityPreset::High.particle_scale());
    }
}
