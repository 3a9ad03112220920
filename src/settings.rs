//! Driver settings and preferences
//!
//! Persisted as JSON next to the player's other config. Never required:
//! anything missing or malformed falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::WorldConfig;

/// Which cabinet to emulate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Random trickle of enemies, escaped enemies vanish, starfield
    #[default]
    Arcade,
    /// Rows of five that speed up every wave, an escaped enemy ends the run
    Classic,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Arcade => "Arcade",
            Variant::Classic => "Classic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arcade" | "random" => Some(Variant::Arcade),
            "classic" | "wave" | "waves" => Some(Variant::Classic),
            _ => None,
        }
    }

    pub fn world_config(&self) -> WorldConfig {
        match self {
            Variant::Arcade => WorldConfig::arcade(),
            Variant::Classic => WorldConfig::classic(),
        }
    }

    /// The arcade cabinet restarts on the fire button
    pub fn fire_restarts(&self) -> bool {
        match self {
            Variant::Arcade => true,
            Variant::Classic => false,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    /// Fixed seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Override the variant's tick rate
    pub tick_hz: Option<f32>,
    /// Full world tuning, replacing the variant preset
    pub world: Option<WorldConfig>,
    /// Override whether the fire key restarts a finished run
    pub fire_restarts: Option<bool>,

    // === HUD ===
    /// Draw the background starfield
    pub show_stars: bool,
    /// Show the achieved tick rate
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Arcade,
            seed: None,
            tick_hz: None,
            world: None,
            fire_restarts: None,
            show_stars: true,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Settings for a preset with no overrides
    pub fn from_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// The world tuning these settings describe
    pub fn world_config(&self) -> WorldConfig {
        let mut config = self
            .world
            .clone()
            .unwrap_or_else(|| self.variant.world_config());
        if let Some(hz) = self.tick_hz {
            config.tick_hz = hz;
        }
        if !self.show_stars {
            config.star_count = 0;
        }
        config
    }

    pub fn effective_fire_restarts(&self) -> bool {
        self.fire_restarts
            .unwrap_or_else(|| self.variant.fire_restarts())
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names() {
        assert_eq!(Variant::from_str("ARCADE"), Some(Variant::Arcade));
        assert_eq!(Variant::from_str("waves"), Some(Variant::Classic));
        assert_eq!(Variant::from_str("galaga"), None);
        assert_eq!(Variant::Classic.as_str(), "Classic");
    }

    #[test]
    fn test_overrides() {
        let settings = Settings {
            variant: Variant::Classic,
            tick_hz: Some(30.0),
            fire_restarts: Some(true),
            ..Settings::default()
        };
        let config = settings.world_config();
        assert_eq!(config.tick_hz, 30.0);
        assert_eq!(config.field_width, 500.0);
        assert!(settings.effective_fire_restarts());
        assert!(!Settings::from_variant(Variant::Classic).effective_fire_restarts());
    }

    #[test]
    fn test_hidden_stars() {
        let settings = Settings {
            show_stars: false,
            ..Settings::default()
        };
        assert_eq!(settings.world_config().star_count, 0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"variant":"classic"}"#).unwrap();
        assert_eq!(settings.variant, Variant::Classic);
        assert!(settings.show_stars);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        // Missing file
        assert_eq!(Settings::load(&path), Settings::default());

        let settings = Settings {
            variant: Variant::Classic,
            seed: Some(42),
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);

        // Malformed file
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }
}
