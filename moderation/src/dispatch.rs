//! Punishment dispatch: turning a ladder step into chat text and a command

use crate::config::{PunishmentAction, PLAYER_PLACEHOLDER};
use crate::console_safety::{sanitize_player_name, validate_console_arg};
use crate::host::{ActionDispatcher, PlayerController};
use tracing::{debug, info};

/// Render a command template for `player_name`.
///
/// Every `{Player}` occurrence (case-sensitive) is replaced by the sanitized
/// name. A template without the token is returned verbatim. A blank template
/// yields `None`.
pub fn render_command(template: &str, player_name: &str) -> Option<String> {
    if template.trim().is_empty() {
        return None;
    }
    if !template.contains(PLAYER_PLACEHOLDER) {
        return Some(template.to_string());
    }
    if let Err(e) = validate_console_arg(player_name) {
        debug!(error = %e, "Stripping console separators from player name");
    }
    Some(template.replace(PLAYER_PLACEHOLDER, &sanitize_player_name(player_name)))
}

/// Show the step's chat message to the attacker, then dispatch its command.
///
/// Returns the command line that was executed, if any.
pub fn fire<D: ActionDispatcher + ?Sized>(
    dispatcher: &mut D,
    action: &PunishmentAction,
    attacker: &PlayerController,
    attacker_name: &str,
) -> Option<String> {
    dispatcher.print_to_chat(attacker, &action.chat_message);

    let command = render_command(&action.command, attacker_name)?;
    info!(attacker = %attacker.steam_id, command = %command, "Dispatching punishment");
    dispatcher.execute_command(&command);
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingDispatcher;

    fn action(command: &str) -> PunishmentAction {
        PunishmentAction {
            threshold: 100,
            chat_message: "stop it".to_string(),
            command: command.to_string(),
        }
    }

    #[test]
    fn test_render_substitutes_every_placeholder() {
        assert_eq!(
            render_command("css_kick {Player} \"bye {Player}\"", "bob").as_deref(),
            Some("css_kick bob \"bye bob\"")
        );
    }

    #[test]
    fn test_render_without_placeholder_is_verbatim() {
        assert_eq!(
            render_command("say someone teamkilled", "bob").as_deref(),
            Some("say someone teamkilled")
        );
    }

    #[test]
    fn test_render_placeholder_is_case_sensitive() {
        assert_eq!(
            render_command("css_slay {player}", "bob").as_deref(),
            Some("css_slay {player}")
        );
    }

    #[test]
    fn test_render_blank_template_is_none() {
        assert_eq!(render_command("   ", "bob"), None);
        assert_eq!(render_command("", "bob"), None);
    }

    #[test]
    fn test_render_strips_separators_from_name() {
        assert_eq!(
            render_command("css_kick {Player}", "bob;quit").as_deref(),
            Some("css_kick bobquit")
        );
    }

    #[test]
    fn test_fire_chats_then_executes() {
        let mut d = RecordingDispatcher::new();
        let attacker = PlayerController::new(1, 2, "current");
        let cmd = fire(&mut d, &action("css_slay {Player}"), &attacker, "resolved");

        assert_eq!(cmd.as_deref(), Some("css_slay resolved"));
        assert_eq!(d.chats(), vec!["stop it"]);
        assert_eq!(d.commands(), vec!["css_slay resolved"]);
        assert!(matches!(
            d.actions[0],
            crate::host::DispatchedAction::Chat { .. }
        ));
    }

    #[test]
    fn test_fire_blank_command_only_chats() {
        let mut d = RecordingDispatcher::new();
        let attacker = PlayerController::new(1, 2, "a");
        assert_eq!(fire(&mut d, &action(""), &attacker, "a"), None);
        assert_eq!(d.chats().len(), 1);
        assert!(d.commands().is_empty());
    }
}
