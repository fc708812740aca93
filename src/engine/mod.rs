//! The conversation state machine.
//!
//! [`ConversationEngine::step`] consumes one inbound event for one user and
//! returns the outbound effects, reading and writing the profile store and
//! calling the oracles along the way. The engine holds no per-user state
//! itself; the caller owns each user's [`ConversationSession`] and must
//! apply that user's events strictly in order (see [`router`]).

pub mod event;
pub mod router;
pub mod session;

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::assets::AssetCatalog;
use crate::domain::trade::{ReadyTrade, TradeDraft, TradeKind};
use crate::domain::user::{UserId, UserProfile};
use crate::domain::validate::{normalize_address, parse_amount};
use crate::error::Result;
use crate::port::oracle::{ExecutionOracle, QuoteOracle};
use crate::port::store::ProfileStore;

use event::{ChainStage, Choice, ChoiceOption, Command, Effect, EventKind, TokenStage};
use session::{ConversationSession, FlowState};

const MSG_WELCOME: &str = "Welcome! I'm your swap helper bot.\n\
    Use /register to save your address, /trade to start a swap, or /help for all commands.";
const MSG_ASK_NAME: &str = "How would you like to be called?";
const MSG_BAD_ADDRESS: &str = "That address doesn't look valid. \
    Please send a 40-character hex address, e.g. 0x1234... (40 hex digits after the prefix).";
const MSG_NEED_REGISTRATION: &str =
    "I don't have your address on file. Please use /register first.";
const MSG_CANCELLED: &str = "Operation cancelled.";
const MSG_NO_ACTIVE: &str = "No operation in progress.";
const MSG_NOT_UNDERSTOOD: &str =
    "I didn't understand that. Use /help to see available commands.";
const MSG_IDLE_HINT: &str =
    "I didn't understand that. Use /trade to start a swap or /help for commands.";
const MSG_USE_BUTTONS: &str = "Please use the buttons above, or /cancel to abort.";
const MSG_BAD_AMOUNT: &str = "Please enter a positive numeric amount (e.g. 0.5).";
const MSG_QUOTE_FAILED: &str =
    "Sorry, I couldn't fetch a quote for that trade. The operation was cancelled.";
const MSG_EXECUTION_FAILED: &str =
    "Sorry, the trade could not be executed. The operation was cancelled.";
const MSG_INTERNAL: &str = "Internal error. The operation was cancelled.";
const MSG_CONFIRM_NO: &str = "Cancelled. No trade executed.";

/// The per-user finite-state machine over registration and the trade wizard.
pub struct ConversationEngine {
    store: Arc<dyn ProfileStore>,
    quotes: Arc<dyn QuoteOracle>,
    executor: Arc<dyn ExecutionOracle>,
    catalog: Arc<AssetCatalog>,
}

impl ConversationEngine {
    /// Create an engine over the given collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn ProfileStore>,
        quotes: Arc<dyn QuoteOracle>,
        executor: Arc<dyn ExecutionOracle>,
        catalog: Arc<AssetCatalog>,
    ) -> Self {
        Self {
            store,
            quotes,
            executor,
            catalog,
        }
    }

    /// Apply one inbound event to one user's session.
    ///
    /// User-facing failures (validation, oracle errors, internal
    /// inconsistencies) come back as effects; only infrastructure failures
    /// such as store I/O surface as `Err`.
    pub async fn step(
        &self,
        user: UserId,
        session: &mut ConversationSession,
        event: EventKind,
    ) -> Result<Vec<Effect>> {
        match event {
            EventKind::Command(cmd) => self.handle_command(user, session, cmd).await,
            EventKind::Text(text) => self.handle_text(user, session, text).await,
            EventKind::Choice(choice) => self.handle_choice(user, session, choice).await,
            EventKind::UnknownCommand(raw) => {
                info!(user = %user, command = %raw, "Unknown command");
                Ok(vec![text(user, MSG_NOT_UNDERSTOOD)])
            }
            EventKind::UnknownChoice(token) => {
                info!(user = %user, token = %token, "Undecodable choice token");
                Ok(vec![text(user, MSG_NOT_UNDERSTOOD)])
            }
        }
    }

    async fn handle_command(
        &self,
        user: UserId,
        session: &mut ConversationSession,
        cmd: Command,
    ) -> Result<Vec<Effect>> {
        match cmd {
            Command::Start => Ok(vec![text(user, MSG_WELCOME)]),
            Command::Help => Ok(vec![text(user, event::command_help())]),
            Command::Fallback => Ok(vec![text(user, MSG_NOT_UNDERSTOOD)]),
            Command::Cancel => {
                if session.is_idle() {
                    Ok(vec![text(user, MSG_NO_ACTIVE)])
                } else {
                    session.reset();
                    Ok(vec![text(user, MSG_CANCELLED)])
                }
            }
            Command::Register => {
                // Re-entry is allowed from any state and discards partial
                // progress, including an in-flight trade draft.
                session.reset();
                session.state = FlowState::AwaitingName;
                Ok(vec![text(user, MSG_ASK_NAME)])
            }
            Command::Trade => {
                session.reset();
                let registered = self
                    .store
                    .get(user)
                    .await?
                    .is_some_and(|p| !p.address.is_empty());
                if !registered {
                    return Ok(vec![text(user, MSG_NEED_REGISTRATION)]);
                }
                session.state = FlowState::SelectType;
                Ok(vec![choices(
                    user,
                    "Choose swap option:",
                    vec![
                        ChoiceOption::new("Cross-chain", &Choice::Kind(TradeKind::CrossChain)),
                        ChoiceOption::new("Non cross-chain", &Choice::Kind(TradeKind::SameChain)),
                        ChoiceOption::new("Cancel", &Choice::Cancel),
                    ],
                )])
            }
        }
    }

    async fn handle_text(
        &self,
        user: UserId,
        session: &mut ConversationSession,
        input: String,
    ) -> Result<Vec<Effect>> {
        let state = session.state.clone();
        match state {
            FlowState::Idle => Ok(vec![text(user, MSG_IDLE_HINT)]),
            FlowState::AwaitingName => {
                let name = input.trim().to_string();
                session.state = FlowState::AwaitingAddress { name: name.clone() };
                Ok(vec![text(
                    user,
                    format!(
                        "So you're {name}.\nPlease send your public Ethereum address (e.g., 0x...)."
                    ),
                )])
            }
            FlowState::AwaitingAddress { name } => {
                let Some(address) = normalize_address(&input) else {
                    return Ok(vec![text(user, MSG_BAD_ADDRESS)]);
                };
                let profile = UserProfile::new(user, name, address.clone());
                // Persist before acknowledging so a crash cannot lose a
                // registration the user was told succeeded.
                self.store.save(&profile).await?;
                session.reset();
                info!(user = %user, "Profile registered");
                Ok(vec![text(
                    user,
                    format!("Saved address: {address}\nYou can now use /trade to start a swap."),
                )])
            }
            FlowState::CrossAmount | FlowState::SameAmount => {
                self.handle_amount(user, session, &input).await
            }
            // Choice-driven states: free text is not a valid input there.
            _ => Ok(vec![text(user, MSG_USE_BUTTONS)]),
        }
    }

    async fn handle_amount(
        &self,
        user: UserId,
        session: &mut ConversationSession,
        input: &str,
    ) -> Result<Vec<Effect>> {
        let Some(amount) = parse_amount(input) else {
            return Ok(vec![text(user, MSG_BAD_AMOUNT)]);
        };

        let quoted = match session.draft.as_ref() {
            Some(TradeDraft::Cross(d)) => {
                let (Some(sc), Some(st), Some(dc), Some(dt)) = (
                    d.source_chain.clone(),
                    d.source_token.clone(),
                    d.dest_chain.clone(),
                    d.dest_token.clone(),
                ) else {
                    return Ok(self.internal_reset(user, session));
                };
                self.quotes
                    .quote_cross_chain(&sc, &st, &dc, &dt, amount)
                    .await
            }
            Some(TradeDraft::Same(d)) => {
                let (Some(chain), Some(st), Some(dt)) = (
                    d.chain.clone(),
                    d.source_token.clone(),
                    d.dest_token.clone(),
                ) else {
                    return Ok(self.internal_reset(user, session));
                };
                self.quotes.quote_same_chain(&chain, &st, &dt, amount).await
            }
            None => return Ok(self.internal_reset(user, session)),
        };

        let quote = match quoted {
            Ok(quote) => quote,
            Err(e) => {
                warn!(user = %user, error = %e, "Quote oracle failed");
                session.reset();
                return Ok(vec![text(user, MSG_QUOTE_FAILED)]);
            }
        };

        match session.draft.as_mut() {
            Some(TradeDraft::Cross(d)) => {
                d.amount = Some(amount);
                d.quote = Some(quote);
            }
            Some(TradeDraft::Same(d)) => {
                d.amount = Some(amount);
                d.quote = Some(quote);
            }
            None => return Ok(self.internal_reset(user, session)),
        }

        let Some(ready) = session.draft.clone().and_then(TradeDraft::into_ready) else {
            return Ok(self.internal_reset(user, session));
        };
        session.state = FlowState::Confirm;
        Ok(vec![choices(
            user,
            ready.summary(),
            vec![
                ChoiceOption::new("Yes - Execute", &Choice::Confirm(true)),
                ChoiceOption::new("No - Cancel", &Choice::Confirm(false)),
            ],
        )])
    }

    async fn handle_choice(
        &self,
        user: UserId,
        session: &mut ConversationSession,
        choice: Choice,
    ) -> Result<Vec<Effect>> {
        // The cancel button is a single global escape over the whole trade
        // flow, not a per-state transition.
        if choice == Choice::Cancel {
            if session.is_idle() {
                return Ok(vec![ack(user, MSG_NO_ACTIVE)]);
            }
            session.reset();
            return Ok(vec![ack(user, MSG_CANCELLED)]);
        }

        let state = session.state.clone();
        match (state, choice) {
            (FlowState::SelectType, Choice::Kind(kind)) => {
                session.draft = Some(TradeDraft::new(kind));
                match kind {
                    TradeKind::CrossChain => {
                        session.state = FlowState::CrossSrcChain;
                        Ok(vec![choices(
                            user,
                            "Select source chain:",
                            self.chain_options(ChainStage::CrossSource),
                        )])
                    }
                    TradeKind::SameChain => {
                        session.state = FlowState::SameChain;
                        Ok(vec![choices(
                            user,
                            "Select chain:",
                            self.chain_options(ChainStage::Same),
                        )])
                    }
                }
            }

            (FlowState::CrossSrcChain, Choice::Chain { stage: ChainStage::CrossSource, chain })
                if self.catalog.has_chain(&chain) =>
            {
                let Some(TradeDraft::Cross(d)) = session.draft.as_mut() else {
                    return Ok(self.internal_reset(user, session));
                };
                d.source_chain = Some(chain.clone());
                session.state = FlowState::CrossSrcToken;
                Ok(vec![choices(
                    user,
                    format!("Source chain: {chain}\nChoose source token:"),
                    self.token_options(TokenStage::CrossSource),
                )])
            }

            (FlowState::CrossSrcToken, Choice::Token { stage: TokenStage::CrossSource, token })
                if self.catalog.has_token(&token) =>
            {
                let Some(TradeDraft::Cross(d)) = session.draft.as_mut() else {
                    return Ok(self.internal_reset(user, session));
                };
                d.source_token = Some(token.clone());
                session.state = FlowState::CrossDstChain;
                Ok(vec![choices(
                    user,
                    format!("Source token: {token}\nChoose destination chain:"),
                    self.chain_options(ChainStage::CrossDest),
                )])
            }

            (FlowState::CrossDstChain, Choice::Chain { stage: ChainStage::CrossDest, chain })
                if self.catalog.has_chain(&chain) =>
            {
                let Some(TradeDraft::Cross(d)) = session.draft.as_mut() else {
                    return Ok(self.internal_reset(user, session));
                };
                d.dest_chain = Some(chain.clone());
                session.state = FlowState::CrossDstToken;
                Ok(vec![choices(
                    user,
                    format!("Destination chain: {chain}\nChoose destination token:"),
                    self.token_options(TokenStage::CrossDest),
                )])
            }

            (FlowState::CrossDstToken, Choice::Token { stage: TokenStage::CrossDest, token })
                if self.catalog.has_token(&token) =>
            {
                let Some(TradeDraft::Cross(d)) = session.draft.as_mut() else {
                    return Ok(self.internal_reset(user, session));
                };
                d.dest_token = Some(token.clone());
                session.state = FlowState::CrossAmount;
                Ok(vec![ack(
                    user,
                    format!(
                        "Destination token: {token}\nNow send the AMOUNT (in source tokens, e.g. 0.5):"
                    ),
                )])
            }

            (FlowState::SameChain, Choice::Chain { stage: ChainStage::Same, chain })
                if self.catalog.has_chain(&chain) =>
            {
                let Some(TradeDraft::Same(d)) = session.draft.as_mut() else {
                    return Ok(self.internal_reset(user, session));
                };
                d.chain = Some(chain.clone());
                session.state = FlowState::SameSrcToken;
                Ok(vec![choices(
                    user,
                    format!("Chain: {chain}\nChoose source token:"),
                    self.token_options(TokenStage::SameSource),
                )])
            }

            (FlowState::SameSrcToken, Choice::Token { stage: TokenStage::SameSource, token })
                if self.catalog.has_token(&token) =>
            {
                let Some(TradeDraft::Same(d)) = session.draft.as_mut() else {
                    return Ok(self.internal_reset(user, session));
                };
                d.source_token = Some(token.clone());
                session.state = FlowState::SameDstToken;
                Ok(vec![choices(
                    user,
                    format!("Source token: {token}\nChoose destination token:"),
                    self.token_options(TokenStage::SameDest),
                )])
            }

            (FlowState::SameDstToken, Choice::Token { stage: TokenStage::SameDest, token })
                if self.catalog.has_token(&token) =>
            {
                let Some(TradeDraft::Same(d)) = session.draft.as_mut() else {
                    return Ok(self.internal_reset(user, session));
                };
                d.dest_token = Some(token.clone());
                session.state = FlowState::SameAmount;
                Ok(vec![ack(
                    user,
                    format!(
                        "Destination token: {token}\nNow send the AMOUNT (in source tokens, e.g. 0.5):"
                    ),
                )])
            }

            (FlowState::Confirm, Choice::Confirm(false)) => {
                session.reset();
                Ok(vec![ack(user, MSG_CONFIRM_NO)])
            }

            (FlowState::Confirm, Choice::Confirm(true)) => {
                self.execute_confirmed(user, session).await
            }

            // Out-of-pattern selection for the current state: report and
            // leave the state untouched.
            (state, choice) => {
                info!(user = %user, ?state, ?choice, "Choice does not match current state");
                Ok(vec![text(user, MSG_NOT_UNDERSTOOD)])
            }
        }
    }

    async fn execute_confirmed(
        &self,
        user: UserId,
        session: &mut ConversationSession,
    ) -> Result<Vec<Effect>> {
        let draft = session.draft.take();
        session.reset();

        let Some(ready) = draft.and_then(TradeDraft::into_ready) else {
            warn!(user = %user, "Confirm reached without a complete draft");
            return Ok(vec![ack(user, MSG_INTERNAL)]);
        };
        let profile = self.store.get(user).await?;
        let Some(profile) = profile.filter(|p| !p.address.is_empty()) else {
            warn!(user = %user, "Confirm reached without a registered profile");
            return Ok(vec![ack(user, MSG_INTERNAL)]);
        };

        let executed = match &ready {
            ReadyTrade::Cross(t) => {
                self.executor
                    .execute_cross_chain(
                        &profile.address,
                        &t.source_chain,
                        &t.source_token,
                        &t.dest_chain,
                        &t.dest_token,
                        t.amount,
                    )
                    .await
            }
            ReadyTrade::Same(t) => {
                self.executor
                    .execute_same_chain(
                        &profile.address,
                        &t.chain,
                        &t.source_token,
                        &t.dest_token,
                        t.amount,
                    )
                    .await
            }
        };

        match executed {
            Ok(tx) => {
                info!(user = %user, tx = %tx, "Trade executed");
                Ok(vec![ack(user, format!("TX hash: {tx}"))])
            }
            Err(e) => {
                warn!(user = %user, error = %e, "Execution oracle failed");
                Ok(vec![ack(user, MSG_EXECUTION_FAILED)])
            }
        }
    }

    /// Recovery path for states that should be unreachable.
    fn internal_reset(&self, user: UserId, session: &mut ConversationSession) -> Vec<Effect> {
        warn!(user = %user, state = ?session.state, "Conversation state and draft out of sync");
        session.reset();
        vec![text(user, MSG_INTERNAL)]
    }

    fn chain_options(&self, stage: ChainStage) -> Vec<ChoiceOption> {
        let mut options: Vec<ChoiceOption> = self
            .catalog
            .chains
            .iter()
            .map(|chain| {
                ChoiceOption::new(
                    chain,
                    &Choice::Chain {
                        stage,
                        chain: chain.clone(),
                    },
                )
            })
            .collect();
        options.push(ChoiceOption::new("Cancel", &Choice::Cancel));
        options
    }

    fn token_options(&self, stage: TokenStage) -> Vec<ChoiceOption> {
        let mut options: Vec<ChoiceOption> = self
            .catalog
            .tokens
            .iter()
            .map(|token| {
                ChoiceOption::new(
                    token,
                    &Choice::Token {
                        stage,
                        token: token.clone(),
                    },
                )
            })
            .collect();
        options.push(ChoiceOption::new("Cancel", &Choice::Cancel));
        options
    }
}

fn text(user: UserId, text: impl Into<String>) -> Effect {
    Effect::SendText {
        user,
        text: text.into(),
    }
}

fn ack(user: UserId, text: impl Into<String>) -> Effect {
    Effect::AckChoices {
        user,
        text: text.into(),
    }
}

fn choices(user: UserId, prompt: impl Into<String>, options: Vec<ChoiceOption>) -> Effect {
    Effect::SendChoices {
        user,
        prompt: prompt.into(),
        options,
    }
}
