//! Host Interface: what the game server hands to the moderation core
//!
//! The engine's entity model is reduced to plain snapshots taken at the
//! moment a hook or event fires. Output capabilities (console, chat, center
//! alert) are injected through [`ActionDispatcher`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Designer name the engine gives to player pawns.
pub const PLAYER_DESIGNER_NAME: &str = "player";

/// Stable 64-bit player identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SteamId(pub u64);

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player controller as seen at the moment of the hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerController {
    pub steam_id: SteamId,
    /// Engine `TeamNum`
    pub team: u8,
    /// Engine `PlayerName`; may change between hits
    #[serde(default)]
    pub name: String,
}

impl PlayerController {
    pub fn new(steam_id: u64, team: u8, name: impl Into<String>) -> Self {
        Self {
            steam_id: SteamId(steam_id),
            team,
            name: name.into(),
        }
    }
}

/// Any engine entity taking part in a damage call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Type discriminator, e.g. `player`, `inferno`, `hegrenade_projectile`
    pub designer_name: String,
    /// Owning player controller, if the entity is a valid player pawn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<PlayerController>,
}

impl Entity {
    /// A player pawn controlled by `controller`
    pub fn player(controller: PlayerController) -> Self {
        Self {
            designer_name: PLAYER_DESIGNER_NAME.to_string(),
            controller: Some(controller),
        }
    }

    /// A non-player entity such as a projectile or fire
    pub fn named(designer_name: impl Into<String>) -> Self {
        Self {
            designer_name: designer_name.into(),
            controller: None,
        }
    }

    pub fn is_player(&self) -> bool {
        self.designer_name.eq_ignore_ascii_case(PLAYER_DESIGNER_NAME)
    }
}

/// Parameters of the pre-damage hook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeDamageInfo {
    #[serde(default)]
    pub attacker: Option<Entity>,
    #[serde(default)]
    pub inflictor: Option<Entity>,
    /// Raw damage, possibly before armor mitigation
    #[serde(default)]
    pub damage: f32,
}

/// Post-damage `player_hurt` game event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerHurtEvent {
    #[serde(default)]
    pub attacker: Option<PlayerController>,
    #[serde(default)]
    pub victim: Option<PlayerController>,
    /// Health actually removed by the engine
    #[serde(default)]
    pub dmg_health: f32,
}

/// Output side of the host: console and player-facing text.
///
/// Every call is fire-and-forget.
pub trait ActionDispatcher {
    /// Run a console/admin command line
    fn execute_command(&mut self, command: &str);

    /// Chat line shown to one player
    fn print_to_chat(&mut self, player: &PlayerController, message: &str);

    /// Short overlay alert shown to one player
    fn print_to_center_alert(&mut self, player: &PlayerController, message: &str);
}

impl<D: ActionDispatcher + ?Sized> ActionDispatcher for &mut D {
    fn execute_command(&mut self, command: &str) {
        (**self).execute_command(command);
    }

    fn print_to_chat(&mut self, player: &PlayerController, message: &str) {
        (**self).print_to_chat(player, message);
    }

    fn print_to_center_alert(&mut self, player: &PlayerController, message: &str) {
        (**self).print_to_center_alert(player, message);
    }
}

/// One call received by a [`RecordingDispatcher`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchedAction {
    Command { line: String },
    Chat { steam_id: SteamId, message: String },
    CenterAlert { steam_id: SteamId, message: String },
}

/// Dispatcher that only remembers what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct RecordingDispatcher {
    pub actions: Vec<DispatchedAction>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                DispatchedAction::Command { line } => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn chats(&self) -> Vec<&str> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                DispatchedAction::Chat { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn alert_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, DispatchedAction::CenterAlert { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }
}

impl ActionDispatcher for RecordingDispatcher {
    fn execute_command(&mut self, command: &str) {
        self.actions.push(DispatchedAction::Command {
            line: command.to_string(),
        });
    }

    fn print_to_chat(&mut self, player: &PlayerController, message: &str) {
        self.actions.push(DispatchedAction::Chat {
            steam_id: player.steam_id,
            message: message.to_string(),
        });
    }

    fn print_to_center_alert(&mut self, player: &PlayerController, message: &str) {
        self.actions.push(DispatchedAction::CenterAlert {
            steam_id: player.steam_id,
            message: message.to_string(),
        });
    }
}
