//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web, defaults elsewhere. Session state
//! itself is never persisted; only user preferences live here.

use serde::{Deserialize, Serialize};

use crate::sim::ControlMode;

/// Optional override for the automatic control-mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlOverride {
    /// Pick from viewport width (touch below the threshold)
    #[default]
    Auto,
    Keys,
    Pointer,
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Control-mode override
    pub control: ControlOverride,
    /// Show FPS counter in the HUD
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control: ControlOverride::Auto,
            show_fps: false,
        }
    }
}

impl Settings {
    /// Resolve the control mode for this session
    pub fn resolve_control(&self, viewport_width: f32) -> ControlMode {
        match self.control {
            ControlOverride::Auto => ControlMode::for_viewport(viewport_width),
            ControlOverride::Keys => ControlMode::Keys,
            ControlOverride::Pointer => ControlMode::Pointer,
        }
    }

    /// Flip the FPS counter preference; the caller persists via `save`
    pub fn toggle_show_fps(&mut self) -> bool {
        self.show_fps = !self.show_fps;
        self.show_fps
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "drop_dodge_settings";

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TOUCH_WIDTH_THRESHOLD;

    #[test]
    fn test_auto_follows_viewport() {
        let settings = Settings::default();
        assert_eq!(
            settings.resolve_control(TOUCH_WIDTH_THRESHOLD - 1.0),
            ControlMode::Pointer
        );
        assert_eq!(
            settings.resolve_control(TOUCH_WIDTH_THRESHOLD),
            ControlMode::Keys
        );
    }

    #[test]
    fn test_override_wins() {
        let settings = Settings {
            control: ControlOverride::Keys,
            ..Default::default()
        };
        assert_eq!(settings.resolve_control(320.0), ControlMode::Keys);
    }

    #[test]
    fn test_toggle_show_fps_flips_and_persists_shape() {
        let mut settings = Settings::default();
        assert!(settings.toggle_show_fps());
        assert!(settings.show_fps);
        assert!(!settings.toggle_show_fps());

        // Toggled state survives a save/load serialization pass
        settings.show_fps = true;
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(back.show_fps);
    }

    #[test]
    fn test_settings_roundtrip() {
        let settings = Settings {
            control: ControlOverride::Pointer,
            show_fps: true,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.control, ControlOverride::Pointer);
        assert!(back.show_fps);
    }
}
