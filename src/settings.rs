//! Game settings and tuning
//!
//! Loaded once at startup from a JSON file. Missing keys fall back to the
//! defaults in [`crate::consts`], so a file can override just what it needs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Fixed capacity of every entity pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolCapacities {
    pub ships: usize,
    pub projectiles: usize,
    pub asteroids: usize,
    pub debris: usize,
    pub beetles: usize,
    pub wasps: usize,
    pub stars: usize,
}

impl Default for PoolCapacities {
    fn default() -> Self {
        Self {
            ships: MAX_SHIPS,
            projectiles: MAX_PROJECTILES,
            asteroids: MAX_ASTEROIDS,
            debris: MAX_DEBRIS,
            beetles: MAX_BEETLES,
            wasps: MAX_WASPS,
            stars: MAX_STARS,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// World width in world units
    pub world_width: f32,
    /// World height in world units
    pub world_height: f32,
    /// Pool capacities per entity kind
    pub pools: PoolCapacities,

    // === Session ===
    /// Number of waves to clear for a win
    pub max_waves: u32,
    /// Simulated seconds between win/lose and the return to attract mode
    pub reset_delay_seconds: f32,
    /// Start sessions in two-player split-screen
    pub multiplayer: bool,

    // === Visual Effects ===
    /// Camera shake on explosions/impacts
    pub screen_shake: bool,
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,
    /// Draw physics/cosmetic rings and heading lines
    pub debug_draw: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start with music muted
    pub mute_music: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_SIZE_X,
            world_height: WORLD_SIZE_Y,
            pools: PoolCapacities::default(),

            max_waves: MAX_WAVES,
            reset_delay_seconds: GAME_OVER_RESET_SECONDS,
            multiplayer: false,

            screen_shake: true,
            reduced_motion: false,
            debug_draw: false,

            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.01,
            mute_music: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world_width > 0.0 && self.world_width.is_finite()) {
            return Err(invalid("world_width", "must be a positive finite number"));
        }
        if !(self.world_height > 0.0 && self.world_height.is_finite()) {
            return Err(invalid("world_height", "must be a positive finite number"));
        }
        if self.pools.ships != MAX_SHIPS {
            return Err(invalid("pools.ships", format!("must be exactly {}", MAX_SHIPS)));
        }
        let caps = [
            ("pools.projectiles", self.pools.projectiles),
            ("pools.asteroids", self.pools.asteroids),
            ("pools.debris", self.pools.debris),
            ("pools.beetles", self.pools.beetles),
            ("pools.wasps", self.pools.wasps),
            ("pools.stars", self.pools.stars),
        ];
        for (field, cap) in caps {
            if cap == 0 {
                return Err(invalid(field, "must be at least 1"));
            }
        }
        if self.max_waves == 0 {
            return Err(invalid("max_waves", "must be at least 1"));
        }
        if !(self.reset_delay_seconds >= 0.0) {
            return Err(invalid("reset_delay_seconds", "must be zero or positive"));
        }
        let volumes = [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("music_volume", self.music_volume),
        ];
        for (field, volume) in volumes {
            if !(0.0..=1.0).contains(&volume) {
                return Err(invalid(field, "must be within 0.0..=1.0"));
            }
        }
        Ok(())
    }

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let settings = Settings::from_json(r#"{ "max_waves": 2, "pools": { "debris": 16 } }"#)
            .expect("partial settings should parse");
        assert_eq!(settings.max_waves, 2);
        assert_eq!(settings.pools.debris, 16);
        assert_eq!(settings.pools.asteroids, MAX_ASTEROIDS);
        assert_eq!(settings.world_width, WORLD_SIZE_X);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "world_width": -5.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "world_width", .. }));

        let err = Settings::from_json(r#"{ "pools": { "ships": 3 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "pools.ships", .. }));

        let err = Settings::from_json(r#"{ "sfx_volume": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "sfx_volume", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse settings"));
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut settings = Settings::default();
        settings.multiplayer = true;
        let json = settings.to_json().unwrap();
        let parsed = Settings::from_json(&json).unwrap();
        assert!(parsed.multiplayer);
    }
}
