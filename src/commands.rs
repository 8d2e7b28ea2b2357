/// Keyword the form's "Go!" action carries back to reach the second stage.
pub const MAKE_MEME_CALLBACK: &str = "make_meme_callback_rbamzfyx";

pub const MEME_KEYWORD: &str = "/meme";
pub const EXIT_KEYWORD: &str = "exit";
pub const HELP_KEYWORD: &str = "help";

/// What a registered command does when matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    MakeMeme,
    MakeMemeCallback,
    Exit,
    Help,
}

/// Immutable description of a command. Registered once; per-interaction
/// values live in `workflow::InteractionContext`, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub kind: CommandKind,
    pub keyword: Option<&'static str>,
    pub card_callback_keyword: Option<&'static str>,
    pub help_message: Option<&'static str>,
    pub chained_callbacks: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<CommandDescriptor>,
}

impl CommandRegistry {
    pub fn new(commands: Vec<CommandDescriptor>) -> Self {
        Self { commands }
    }

    /// Text commands match on the first word, case-insensitively.
    pub fn match_text(&self, text: &str) -> Option<&CommandDescriptor> {
        let first = text.split_whitespace().next()?;
        self.commands
            .iter()
            .find(|c| c.keyword.is_some_and(|k| k.eq_ignore_ascii_case(first)))
    }

    pub fn by_keyword(&self, keyword: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.keyword == Some(keyword))
    }

    /// Only callbacks chained from a registered command are reachable.
    pub fn by_callback(&self, callback_keyword: &str) -> Option<&CommandDescriptor> {
        let chained = self
            .commands
            .iter()
            .any(|c| c.chained_callbacks.iter().any(|cb| *cb == callback_keyword));
        if !chained {
            return None;
        }
        self.commands
            .iter()
            .find(|c| c.card_callback_keyword == Some(callback_keyword))
    }

    /// Lines for the help reply, one per command with help text.
    pub fn help_lines(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| Some(format!("{} - {}", c.keyword?, c.help_message?)))
            .collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new(vec![
            CommandDescriptor {
                kind: CommandKind::MakeMeme,
                keyword: Some(MEME_KEYWORD),
                card_callback_keyword: None,
                help_message: Some("Make a Meme"),
                chained_callbacks: vec![MAKE_MEME_CALLBACK],
            },
            CommandDescriptor {
                kind: CommandKind::MakeMemeCallback,
                keyword: None,
                card_callback_keyword: Some(MAKE_MEME_CALLBACK),
                help_message: None,
                chained_callbacks: Vec::new(),
            },
            CommandDescriptor {
                kind: CommandKind::Exit,
                keyword: Some(EXIT_KEYWORD),
                card_callback_keyword: None,
                help_message: Some("Exit"),
                chained_callbacks: Vec::new(),
            },
            CommandDescriptor {
                kind: CommandKind::Help,
                keyword: Some(HELP_KEYWORD),
                card_callback_keyword: None,
                help_message: Some("Show available commands"),
                chained_callbacks: Vec::new(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_first_word_case_insensitively() {
        let registry = CommandRegistry::default();
        assert_eq!(registry.match_text("  /MEME please").map(|c| c.kind), Some(CommandKind::MakeMeme));
        assert_eq!(registry.match_text("exit").map(|c| c.kind), Some(CommandKind::Exit));
        assert!(registry.match_text("make me a meme").is_none());
        assert!(registry.match_text("").is_none());
    }

    #[test]
    fn callback_is_reachable_only_through_chain() {
        let registry = CommandRegistry::default();
        assert_eq!(
            registry.by_callback(MAKE_MEME_CALLBACK).map(|c| c.kind),
            Some(CommandKind::MakeMemeCallback)
        );

        let orphan = CommandRegistry::new(vec![CommandDescriptor {
            kind: CommandKind::MakeMemeCallback,
            keyword: None,
            card_callback_keyword: Some(MAKE_MEME_CALLBACK),
            help_message: None,
            chained_callbacks: Vec::new(),
        }]);
        assert!(orphan.by_callback(MAKE_MEME_CALLBACK).is_none());
    }

    #[test]
    fn callback_has_no_text_keyword() {
        let registry = CommandRegistry::default();
        assert!(registry.match_text(MAKE_MEME_CALLBACK).is_none());
    }

    #[test]
    fn help_lists_keyword_commands() {
        let lines = CommandRegistry::default().help_lines();
        assert_eq!(
            lines,
            vec!["/meme - Make a Meme", "exit - Exit", "help - Show available commands"]
        );
    }
}
