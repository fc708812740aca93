//! Inbound events and outbound effects of the conversation engine.
//!
//! Transport adapters translate platform updates into [`EventKind`] values
//! and render [`Effect`] values back out. Choice tokens are decoded exactly
//! once, at the transport boundary; the engine only ever sees the structured
//! [`Choice`] form.

use crate::domain::trade::TradeKind;
use crate::domain::user::UserId;

/// Top-level bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Register,
    Trade,
    Cancel,
    Fallback,
}

/// Parse error for command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a chat message into a bot command.
///
/// Tolerates surrounding whitespace and a `@bot_name` mention suffix.
/// `/go` is an alias for `/register`, kept from the original bot.
pub fn parse_command(text: &str) -> Result<Command, CommandParseError> {
    let mut parts = text.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(Command::Start),
        "/help" => Ok(Command::Help),
        "/register" | "/go" => Ok(Command::Register),
        "/trade" => Ok(Command::Trade),
        "/cancel" => Ok(Command::Cancel),
        "/fallback" => Ok(Command::Fallback),
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

/// Help text returned by `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "Here are the available commands:\n\
     /register - Register your name and public address\n\
     /trade - Start a new swap (cross-chain or same-chain)\n\
     /cancel - Cancel the current operation\n\
     /help - Show this help message\n\
     /start - Show the welcome message"
}

/// Bot commands for the transport's command menu.
///
/// Returns tuples of (command, description).
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("register", "Register your name and public address"),
        ("trade", "Start a new swap"),
        ("cancel", "Cancel the current operation"),
        ("help", "Show all commands"),
        ("start", "Show the welcome message"),
    ]
}

/// Which chain-selection step issued a chain choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStage {
    CrossSource,
    CrossDest,
    Same,
}

/// Which token-selection step issued a token choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStage {
    CrossSource,
    CrossDest,
    SameSource,
    SameDest,
}

/// A structured button selection, bound to the step that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Branch selection at the start of the trade wizard.
    Kind(TradeKind),
    /// A chain picked at one of the chain-selection steps.
    Chain { stage: ChainStage, chain: String },
    /// A token picked at one of the token-selection steps.
    Token { stage: TokenStage, token: String },
    /// Yes/no on the confirmation prompt.
    Confirm(bool),
    /// The global cancel button, valid in every trade-flow prompt.
    Cancel,
}

impl Choice {
    /// Encode into the wire token carried in button callback data.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Kind(TradeKind::CrossChain) => "trade_cross".into(),
            Self::Kind(TradeKind::SameChain) => "trade_same".into(),
            Self::Cancel => "trade_cancel".into(),
            Self::Confirm(true) => "confirm_yes".into(),
            Self::Confirm(false) => "confirm_no".into(),
            Self::Chain { stage, chain } => format!("{}|{chain}", chain_tag(*stage)),
            Self::Token { stage, token } => format!("{}|{token}", token_tag(*stage)),
        }
    }

    /// Decode a wire token back into a structured choice.
    ///
    /// Returns `None` for malformed or unknown tokens; the caller reports
    /// those as not understood rather than failing.
    #[must_use]
    pub fn decode(token: &str) -> Option<Self> {
        match token {
            "trade_cross" => return Some(Self::Kind(TradeKind::CrossChain)),
            "trade_same" => return Some(Self::Kind(TradeKind::SameChain)),
            "trade_cancel" => return Some(Self::Cancel),
            "confirm_yes" => return Some(Self::Confirm(true)),
            "confirm_no" => return Some(Self::Confirm(false)),
            _ => {}
        }

        let (tag, value) = token.split_once('|')?;
        if value.is_empty() {
            return None;
        }
        let choice = match tag {
            "cross_src_chain" => Self::Chain {
                stage: ChainStage::CrossSource,
                chain: value.to_string(),
            },
            "cross_dst_chain" => Self::Chain {
                stage: ChainStage::CrossDest,
                chain: value.to_string(),
            },
            "same_chain" => Self::Chain {
                stage: ChainStage::Same,
                chain: value.to_string(),
            },
            "cross_src_token" => Self::Token {
                stage: TokenStage::CrossSource,
                token: value.to_string(),
            },
            "cross_dst_token" => Self::Token {
                stage: TokenStage::CrossDest,
                token: value.to_string(),
            },
            "same_src_token" => Self::Token {
                stage: TokenStage::SameSource,
                token: value.to_string(),
            },
            "same_dst_token" => Self::Token {
                stage: TokenStage::SameDest,
                token: value.to_string(),
            },
            _ => return None,
        };
        Some(choice)
    }
}

const fn chain_tag(stage: ChainStage) -> &'static str {
    match stage {
        ChainStage::CrossSource => "cross_src_chain",
        ChainStage::CrossDest => "cross_dst_chain",
        ChainStage::Same => "same_chain",
    }
}

const fn token_tag(stage: TokenStage) -> &'static str {
    match stage {
        TokenStage::CrossSource => "cross_src_token",
        TokenStage::CrossDest => "cross_dst_token",
        TokenStage::SameSource => "same_src_token",
        TokenStage::SameDest => "same_dst_token",
    }
}

/// One inbound event for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A recognized command.
    Command(Command),
    /// A slash-message that parsed as a command but matched nothing.
    UnknownCommand(String),
    /// Free-form message text.
    Text(String),
    /// A decoded button selection.
    Choice(Choice),
    /// Callback data that failed to decode at the transport boundary.
    UnknownChoice(String),
}

/// One selectable option in a choice prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Text shown on the button.
    pub label: String,
    /// Wire token delivered back when selected.
    pub token: String,
}

impl ChoiceOption {
    /// Build an option whose token encodes the given choice.
    #[must_use]
    pub fn new(label: impl Into<String>, choice: &Choice) -> Self {
        Self {
            label: label.into(),
            token: choice.encode(),
        }
    }
}

/// One outbound instruction to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Plain text message.
    SendText { user: UserId, text: String },
    /// Prompt with an ordered set of selectable options.
    SendChoices {
        user: UserId,
        prompt: String,
        options: Vec<ChoiceOption>,
    },
    /// Resolve the most recent choice prompt with new text.
    AckChoices { user: UserId, text: String },
}

impl Effect {
    /// The user this effect addresses.
    #[must_use]
    pub const fn user(&self) -> UserId {
        match self {
            Self::SendText { user, .. }
            | Self::SendChoices { user, .. }
            | Self::AckChoices { user, .. } => *user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Command parsing
    // -------------------------------------------------------------------------

    #[test]
    fn parse_all_commands() {
        assert_eq!(parse_command("/start").unwrap(), Command::Start);
        assert_eq!(parse_command("/help").unwrap(), Command::Help);
        assert_eq!(parse_command("/register").unwrap(), Command::Register);
        assert_eq!(parse_command("/trade").unwrap(), Command::Trade);
        assert_eq!(parse_command("/cancel").unwrap(), Command::Cancel);
        assert_eq!(parse_command("/fallback").unwrap(), Command::Fallback);
    }

    #[test]
    fn go_is_register_alias() {
        assert_eq!(parse_command("/go").unwrap(), Command::Register);
    }

    #[test]
    fn parse_command_with_bot_mention() {
        assert_eq!(parse_command("/trade@swapdesk_bot").unwrap(), Command::Trade);
    }

    #[test]
    fn parse_command_with_whitespace() {
        assert_eq!(parse_command("  /cancel  ").unwrap(), Command::Cancel);
    }

    #[test]
    fn parse_not_a_command() {
        assert!(matches!(
            parse_command("hello"),
            Err(CommandParseError::NotACommand)
        ));
        assert!(matches!(
            parse_command(""),
            Err(CommandParseError::NotACommand)
        ));
        assert!(matches!(
            parse_command("   "),
            Err(CommandParseError::NotACommand)
        ));
    }

    #[test]
    fn parse_unknown_command() {
        let err = parse_command("/frobnicate").unwrap_err();
        assert!(matches!(err, CommandParseError::UnknownCommand(ref c) if c == "/frobnicate"));
    }

    #[test]
    fn commands_are_case_sensitive() {
        assert!(matches!(
            parse_command("/TRADE"),
            Err(CommandParseError::UnknownCommand(_))
        ));
    }

    #[test]
    fn command_help_lists_entry_points() {
        let help = command_help();
        assert!(help.contains("/register"));
        assert!(help.contains("/trade"));
        assert!(help.contains("/cancel"));
    }

    #[test]
    fn bot_commands_have_descriptions() {
        for (cmd, desc) in bot_commands() {
            assert!(!cmd.is_empty());
            assert!(!desc.is_empty(), "empty description for {cmd}");
        }
    }

    // -------------------------------------------------------------------------
    // Choice token codec
    // -------------------------------------------------------------------------

    #[test]
    fn fixed_tokens_roundtrip() {
        for choice in [
            Choice::Kind(TradeKind::CrossChain),
            Choice::Kind(TradeKind::SameChain),
            Choice::Cancel,
            Choice::Confirm(true),
            Choice::Confirm(false),
        ] {
            assert_eq!(Choice::decode(&choice.encode()), Some(choice));
        }
    }

    #[test]
    fn staged_tokens_roundtrip() {
        let choice = Choice::Chain {
            stage: ChainStage::CrossSource,
            chain: "Polygon".into(),
        };
        assert_eq!(choice.encode(), "cross_src_chain|Polygon");
        assert_eq!(Choice::decode("cross_src_chain|Polygon"), Some(choice));

        let choice = Choice::Token {
            stage: TokenStage::SameDest,
            token: "USDC".into(),
        };
        assert_eq!(choice.encode(), "same_dst_token|USDC");
        assert_eq!(Choice::decode("same_dst_token|USDC"), Some(choice));
    }

    #[test]
    fn malformed_tokens_do_not_decode() {
        assert!(Choice::decode("").is_none());
        assert!(Choice::decode("garbage").is_none());
        assert!(Choice::decode("cross_src_chain|").is_none());
        assert!(Choice::decode("unknown_stage|Polygon").is_none());
        assert!(Choice::decode("|Polygon").is_none());
    }

    #[test]
    fn choice_option_carries_encoded_token() {
        let opt = ChoiceOption::new("Polygon", &Choice::Chain {
            stage: ChainStage::CrossDest,
            chain: "Polygon".into(),
        });
        assert_eq!(opt.label, "Polygon");
        assert_eq!(opt.token, "cross_dst_chain|Polygon");
    }

    #[test]
    fn effect_reports_user() {
        let user = UserId::new(9);
        let effect = Effect::SendText {
            user,
            text: "hi".into(),
        };
        assert_eq!(effect.user(), user);
    }
}
