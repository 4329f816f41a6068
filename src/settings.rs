//! Player preferences
//!
//! Persisted separately from high scores.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, from_json_object};
use crate::platform::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play sound cues (level up, game over...)
    pub sound_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            volume: 0.8,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "math_quest_settings";

    /// Volume to play cues at (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.sound_enabled {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match from_json_object::<Self>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings; failures are logged
    pub fn save(&self, store: &mut impl KeyValueStore) {
        let result = serde_json::to_string(self)
            .map_err(GameError::from)
            .and_then(|json| store.set(Self::STORAGE_KEY, &json));
        if let Err(e) = result {
            log::warn!("Failed to save settings: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_muted_volume_is_zero() {
        let mut s = Settings::default();
        assert!(s.effective_volume() > 0.0);
        s.toggle_sound();
        assert_eq!(s.effective_volume(), 0.0);
    }

    #[test]
    fn test_volume_clamped() {
        let s = Settings {
            sound_enabled: true,
            volume: 3.0,
        };
        assert_eq!(s.effective_volume(), 1.0);
    }

    #[test]
    fn test_load_save() {
        let mut store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());

        let s = Settings {
            sound_enabled: false,
            volume: 0.5,
        };
        s.save(&mut store);
        assert_eq!(Settings::load(&store), s);

        store.set(Settings::STORAGE_KEY, "garbage").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_array_is_not_settings() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "[false, 0.1]").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
