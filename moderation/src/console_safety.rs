//! Console Safety: keep player names from splitting admin commands
//!
//! Player names are attacker-controlled and end up inside console command
//! lines such as `css_kick {Player} "reason"`. The server console treats
//! `;` and line breaks as command separators and `"` as an argument
//! delimiter, so a crafted name could append its own command.
//!
//! ```rust,ignore
//! use ff_moderation::console_safety::sanitize_player_name;
//!
//! assert_eq!(sanitize_player_name("bob; quit"), "bob quit");
//! assert_eq!(sanitize_player_name("bob;quit"), "bobquit");
//! ```

/// Characters the console interprets as command or argument boundaries.
const CONSOLE_SEPARATORS: &[char] = &[';', '\n', '\r', '"', '\0'];

/// A separator found in an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleArgError {
    /// The problematic character found.
    pub character: char,
    /// Position (in chars) in the input string.
    pub position: usize,
}

impl std::fmt::Display for ConsoleArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "console separator '{}' at position {}",
            self.character.escape_default(),
            self.position
        )
    }
}

impl std::error::Error for ConsoleArgError {}

/// Remove console separators from a player name.
///
/// All other characters, whitespace included, are kept as-is. Targeting by
/// name is best-effort when the name contained separators, since the result
/// no longer matches the player's display name exactly.
pub fn sanitize_player_name(name: &str) -> String {
    name.chars()
        .filter(|c| !CONSOLE_SEPARATORS.contains(c))
        .collect()
}

/// Check that an argument contains no console separators.
pub fn validate_console_arg(arg: &str) -> Result<(), ConsoleArgError> {
    match arg
        .chars()
        .enumerate()
        .find(|(_, c)| CONSOLE_SEPARATORS.contains(c))
    {
        Some((position, character)) => Err(ConsoleArgError {
            character,
            position,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(sanitize_player_name("xX_Sniper_Xx"), "xX_Sniper_Xx");
        assert_eq!(sanitize_player_name("Two Words"), "Two Words");
    }

    #[test]
    fn test_separators_removed() {
        assert_eq!(sanitize_player_name("bob;quit"), "bobquit");
        assert_eq!(sanitize_player_name("bob\"; rcon_password x"), "bob rcon_password x");
        assert_eq!(sanitize_player_name("line\nbreak"), "linebreak");
    }

    #[test]
    fn test_whitespace_kept_verbatim() {
        assert_eq!(sanitize_player_name("  two   spaces "), "  two   spaces ");
        assert_eq!(sanitize_player_name("tab\tname"), "tab\tname");
    }

    #[test]
    fn test_only_separators_becomes_empty() {
        assert_eq!(sanitize_player_name(";;\"\n"), "");
    }

    #[test]
    fn test_validate_reports_position() {
        assert!(validate_console_arg("safe name").is_ok());
        let err = validate_console_arg("ab;c").unwrap_err();
        assert_eq!(err.character, ';');
        assert_eq!(err.position, 2);
    }

    #[test]
    fn test_unicode_names_survive() {
        assert_eq!(sanitize_player_name("Ñandú ☠"), "Ñandú ☠");
    }
}
