//! Friendly-fire policy
//!
//! Key names match the plugin's JSON config file so existing server configs
//! load unchanged. Missing keys fall back to the defaults below.
//!
//! # Environment Variables
//!
//! | Variable | Overrides |
//! |---|---|
//! | `FF_ENABLED` | `Enable/Disable Advanced Friendly Fire` |
//! | `FF_PUNISHMENTS_ENABLED` | `Enable/Disable Punishments` |

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Token replaced with the attacker's name in punishment commands
pub const PLAYER_PLACEHOLDER: &str = "{Player}";

/// Server cvars applied at load when the feature is enabled
pub const FRIENDLY_FIRE_CVARS: &[&str] = &[
    "mp_friendlyfire 1",
    "ff_damage_reduction_bullets 0.0",
    "ff_damage_reduction_grenade 0.85",
    "ff_damage_reduction_grenade_self 1",
    "ff_damage_reduction_other 0.4",
];

/// Errors raised while loading or validating a config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Threshold {index} must be positive (got {value})")]
    NonPositiveThreshold { index: u8, value: u32 },

    #[error("Thresholds must not decrease: warn{lower_index}={lower} > warn{upper_index}={upper}")]
    UnorderedThresholds {
        lower_index: u8,
        lower: u32,
        upper_index: u8,
        upper: u32,
    },
}

/// One rung of the punishment ladder as configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunishmentAction {
    /// Cumulative team damage (HP) that triggers this rung
    pub threshold: u32,
    /// Chat message shown to the attacker
    pub chat_message: String,
    /// Console command template, may contain [`PLAYER_PLACEHOLDER`]
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FriendlyFireConfig {
    #[serde(rename = "ConfigVersion")]
    pub version: u32,

    #[serde(rename = "Enable/Disable Advanced Friendly Fire")]
    pub enabled: bool,

    #[serde(rename = "Enable/Disable Punishments")]
    pub punishments_enabled: bool,

    #[serde(rename = "Damage Inflictors")]
    pub damage_inflictors: Vec<String>,

    #[serde(rename = "Center Alert Message")]
    pub center_alert: String,

    #[serde(rename = "Warning #1 Required Team Damage (HP Metrics)")]
    pub warn1: u32,

    #[serde(rename = "Warning #1 Chat message")]
    pub chat_warn1: String,

    #[serde(rename = "Warning #1 Punishment")]
    pub punish_warn1: String,

    #[serde(rename = "Warning #2 Required Team Damage (HP Metrics)")]
    pub warn2: u32,

    #[serde(rename = "Warning #2 Chat message")]
    pub chat_warn2: String,

    #[serde(rename = "Warning #2 Punishment")]
    pub punish_warn2: String,

    #[serde(rename = "Warning #3 Required Team Damage (HP Metrics)")]
    pub warn3: u32,

    #[serde(rename = "Warning #3 Chat message")]
    pub chat_warn3: String,

    #[serde(rename = "Warning #3 Punishment")]
    pub punish_warn3: String,
}

impl Default for FriendlyFireConfig {
    fn default() -> Self {
        Self {
            version: 1,
            enabled: true,
            punishments_enabled: true,
            damage_inflictors: [
                "inferno",
                "hegrenade_projectile",
                "flashbang_projectile",
                "smokegrenade_projectile",
                "decoy_projectile",
                "planted_c4",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            center_alert: "DON'T HURT YOUR TEAMMATES!".to_string(),
            warn1: 100,
            chat_warn1: "Avoid friendly fire, or you will be punished! Friendly fire warning [1/3]"
                .to_string(),
            punish_warn1: "css_slay {Player} \"Friendly fire warning [1/3]\"".to_string(),
            warn2: 200,
            chat_warn2: "You have been kicked for dealing excessive damage to your teammates!"
                .to_string(),
            punish_warn2: "css_kick {Player} \"Friendly fire warning [2/3]\"".to_string(),
            warn3: 300,
            chat_warn3: "You have been banned for dealing excessive damage to your teammates!"
                .to_string(),
            punish_warn3: "css_ban {Player} 30 \"Friendly fire warning [3/3]\"".to_string(),
        }
    }
}

impl FriendlyFireConfig {
    /// Load from a `.json` or `.toml` file, validating the result.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Self::from_json(&raw),
            "toml" => Self::from_toml(&raw),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Parse plugin JSON, then validate.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML, then validate.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `FF_*` environment overrides on top of the loaded values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(v) = parse_bool_env("FF_ENABLED") {
            self.enabled = v;
        }
        if let Some(v) = parse_bool_env("FF_PUNISHMENTS_ENABLED") {
            self.punishments_enabled = v;
        }
    }

    /// Thresholds must be positive and non-decreasing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = [self.warn1, self.warn2, self.warn3];
        for (i, value) in thresholds.iter().enumerate() {
            if *value == 0 {
                return Err(ConfigError::NonPositiveThreshold {
                    index: i as u8 + 1,
                    value: *value,
                });
            }
        }
        for i in 0..2 {
            if thresholds[i] > thresholds[i + 1] {
                return Err(ConfigError::UnorderedThresholds {
                    lower_index: i as u8 + 1,
                    lower: thresholds[i],
                    upper_index: i as u8 + 2,
                    upper: thresholds[i + 1],
                });
            }
        }
        Ok(())
    }

    /// Exact, case-sensitive match against the inflictor allow-list
    pub fn is_allowed_inflictor(&self, designer_name: &str) -> bool {
        self.damage_inflictors.iter().any(|d| d == designer_name)
    }

    /// The three ladder rungs in ascending order
    pub fn actions(&self) -> [PunishmentAction; 3] {
        [
            PunishmentAction {
                threshold: self.warn1,
                chat_message: self.chat_warn1.clone(),
                command: self.punish_warn1.clone(),
            },
            PunishmentAction {
                threshold: self.warn2,
                chat_message: self.chat_warn2.clone(),
                command: self.punish_warn2.clone(),
            },
            PunishmentAction {
                threshold: self.warn3,
                chat_message: self.chat_warn3.clone(),
                command: self.punish_warn3.clone(),
            },
        ]
    }

    /// Commands to run when the plugin loads
    pub fn startup_commands(&self) -> &'static [&'static str] {
        if self.enabled {
            FRIENDLY_FIRE_CVARS
        } else {
            &[]
        }
    }
}

/// Accepts "1", "true", or "yes" (case-insensitive) as true and
/// "0", "false", or "no" as false. Anything else is ignored.
fn parse_bool_env(var: &str) -> Option<bool> {
    let val = std::env::var(var).ok()?;
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
