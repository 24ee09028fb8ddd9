//! Display preferences
//!
//! Persisted separately from the game in LocalStorage. Game state itself is
//! never saved.

use serde::{Deserialize, Serialize};

/// Host-side preferences passed to the page alongside each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Overlays ===
    /// Draw the world map in the top-right corner
    pub show_minimap: bool,
    /// Label bodies with their score multiplier
    pub show_multipliers: bool,
    /// Draw the Little Dipper lines between bodies
    pub show_constellation: bool,

    // === Accessibility ===
    /// Reduced motion (no ship blinking while invincible)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_minimap: true,
            show_multipliers: true,
            show_constellation: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Whether the ship should blink during invincibility
    pub fn effective_invincible_blink(&self) -> bool {
        !self.reduced_motion
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dipper_quest_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
