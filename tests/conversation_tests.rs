//! End-to-end conversation flows driven through the engine's public API.

use std::sync::Arc;

use rust_decimal_macros::dec;

use swapdesk::adapter::memory::MemoryProfileStore;
use swapdesk::domain::assets::AssetCatalog;
use swapdesk::domain::trade::TradeKind;
use swapdesk::domain::user::{UserId, UserProfile};
use swapdesk::engine::event::{ChainStage, Choice, Command, Effect, EventKind, TokenStage};
use swapdesk::engine::session::{ConversationSession, FlowState};
use swapdesk::engine::ConversationEngine;
use swapdesk::port::oracle::{ExecutionOracle, QuoteOracle};
use swapdesk::port::store::ProfileStore;
use swapdesk::testkit::{
    ExecutionCall, FailingQuoteOracle, FixedExecutionOracle, FixedQuoteOracle, QuoteCall,
};

const USER: UserId = UserId::new(100);

struct Fixture {
    store: Arc<MemoryProfileStore>,
    quotes: Arc<FixedQuoteOracle>,
    executor: Arc<FixedExecutionOracle>,
    engine: ConversationEngine,
    session: ConversationSession,
}

impl Fixture {
    fn new() -> Self {
        let store = Arc::new(MemoryProfileStore::new());
        let quotes = Arc::new(FixedQuoteOracle::default());
        let executor = Arc::new(FixedExecutionOracle::default());
        let engine = ConversationEngine::new(
            Arc::clone(&store) as Arc<dyn ProfileStore>,
            Arc::clone(&quotes) as Arc<dyn QuoteOracle>,
            Arc::clone(&executor) as Arc<dyn ExecutionOracle>,
            Arc::new(AssetCatalog::default()),
        );
        Self {
            store,
            quotes,
            executor,
            engine,
            session: ConversationSession::default(),
        }
    }

    async fn registered() -> Self {
        let fixture = Self::new();
        fixture
            .store
            .save(&UserProfile::new(
                USER,
                "Alice",
                format!("0x{}", "a".repeat(40)),
            ))
            .await
            .unwrap();
        fixture
    }

    async fn step(&mut self, event: EventKind) -> Vec<Effect> {
        self.engine
            .step(USER, &mut self.session, event)
            .await
            .unwrap()
    }

    async fn command(&mut self, cmd: Command) -> Vec<Effect> {
        self.step(EventKind::Command(cmd)).await
    }

    async fn text(&mut self, input: &str) -> Vec<Effect> {
        self.step(EventKind::Text(input.to_string())).await
    }

    async fn choice(&mut self, choice: Choice) -> Vec<Effect> {
        self.step(EventKind::Choice(choice)).await
    }
}

fn effect_text(effect: &Effect) -> &str {
    match effect {
        Effect::SendText { text, .. } | Effect::AckChoices { text, .. } => text,
        Effect::SendChoices { prompt, .. } => prompt,
    }
}

#[tokio::test]
async fn registration_then_trade_end_to_end() {
    let mut fx = Fixture::new();

    fx.command(Command::Register).await;
    fx.text("Alice").await;
    let effects = fx
        .text("ABCDEF0123456789ABCDEF0123456789ABCDEF01")
        .await;
    // Address without a prefix is normalized to carry one.
    assert!(effect_text(&effects[0]).contains("0xABCDEF0123456789ABCDEF0123456789ABCDEF01"));

    let profile = fx.store.get(USER).await.unwrap().unwrap();
    assert_eq!(profile.display_name, "Alice");
    assert_eq!(profile.address, "0xABCDEF0123456789ABCDEF0123456789ABCDEF01");

    let effects = fx.command(Command::Trade).await;
    assert!(matches!(&effects[0], Effect::SendChoices { prompt, .. } if prompt.contains("swap option")));
}

#[tokio::test]
async fn trade_without_registration_is_blocked() {
    let mut fx = Fixture::new();

    let effects = fx.command(Command::Trade).await;
    assert!(effect_text(&effects[0]).contains("/register"));
    assert!(fx.session.is_idle());
    assert!(fx.quotes.calls().is_empty());
}

#[tokio::test]
async fn cross_chain_flow_quotes_and_executes() {
    let mut fx = Fixture::registered().await;

    fx.command(Command::Trade).await;
    fx.choice(Choice::Kind(TradeKind::CrossChain)).await;
    fx.choice(Choice::Chain {
        stage: ChainStage::CrossSource,
        chain: "Base".to_string(),
    })
    .await;
    fx.choice(Choice::Token {
        stage: TokenStage::CrossSource,
        token: "ETH".to_string(),
    })
    .await;
    fx.choice(Choice::Chain {
        stage: ChainStage::CrossDest,
        chain: "Polygon".to_string(),
    })
    .await;
    let effects = fx
        .choice(Choice::Token {
            stage: TokenStage::CrossDest,
            token: "USDC".to_string(),
        })
        .await;
    assert!(effect_text(&effects[0]).contains("AMOUNT"));

    let effects = fx.text("1.5").await;
    let Effect::SendChoices { prompt, options, .. } = &effects[0] else {
        panic!("expected confirmation prompt, got {effects:?}");
    };
    assert!(prompt.contains("Cross-chain Swap"));
    assert!(prompt.contains("Proceed?"));
    assert!(options.iter().any(|o| o.token == "confirm_yes"));
    assert!(options.iter().any(|o| o.token == "confirm_no"));

    assert_eq!(
        fx.quotes.calls(),
        vec![QuoteCall::Cross {
            source_chain: "Base".to_string(),
            source_token: "ETH".to_string(),
            dest_chain: "Polygon".to_string(),
            dest_token: "USDC".to_string(),
            amount: dec!(1.5),
        }]
    );

    let effects = fx.choice(Choice::Confirm(true)).await;
    assert!(effect_text(&effects[0]).contains(fx.executor.tx_hash()));
    assert!(fx.session.is_idle());

    assert_eq!(
        fx.executor.calls(),
        vec![ExecutionCall::Cross {
            user_address: format!("0x{}", "a".repeat(40)),
            source_chain: "Base".to_string(),
            source_token: "ETH".to_string(),
            dest_chain: "Polygon".to_string(),
            dest_token: "USDC".to_string(),
            amount: dec!(1.5),
        }]
    );
}

#[tokio::test]
async fn same_chain_flow_quotes_and_executes() {
    let mut fx = Fixture::registered().await;

    fx.command(Command::Trade).await;
    fx.choice(Choice::Kind(TradeKind::SameChain)).await;
    fx.choice(Choice::Chain {
        stage: ChainStage::Same,
        chain: "Ethereum".to_string(),
    })
    .await;
    fx.choice(Choice::Token {
        stage: TokenStage::SameSource,
        token: "USDC".to_string(),
    })
    .await;
    fx.choice(Choice::Token {
        stage: TokenStage::SameDest,
        token: "ETH".to_string(),
    })
    .await;
    let effects = fx.text("250").await;
    assert!(effect_text(&effects[0]).contains("On-chain Swap"));

    fx.choice(Choice::Confirm(true)).await;

    assert_eq!(
        fx.quotes.calls(),
        vec![QuoteCall::Same {
            chain: "Ethereum".to_string(),
            source_token: "USDC".to_string(),
            dest_token: "ETH".to_string(),
            amount: dec!(250),
        }]
    );
    assert_eq!(
        fx.executor.calls(),
        vec![ExecutionCall::Same {
            user_address: format!("0x{}", "a".repeat(40)),
            chain: "Ethereum".to_string(),
            source_token: "USDC".to_string(),
            dest_token: "ETH".to_string(),
            amount: dec!(250),
        }]
    );
}

#[tokio::test]
async fn declining_confirmation_executes_nothing() {
    let mut fx = Fixture::registered().await;

    fx.command(Command::Trade).await;
    fx.choice(Choice::Kind(TradeKind::SameChain)).await;
    fx.choice(Choice::Chain {
        stage: ChainStage::Same,
        chain: "Base".to_string(),
    })
    .await;
    fx.choice(Choice::Token {
        stage: TokenStage::SameSource,
        token: "ETH".to_string(),
    })
    .await;
    fx.choice(Choice::Token {
        stage: TokenStage::SameDest,
        token: "USDC".to_string(),
    })
    .await;
    fx.text("0.5").await;

    let effects = fx.choice(Choice::Confirm(false)).await;
    assert!(effect_text(&effects[0]).contains("No trade executed"));
    assert!(fx.session.is_idle());
    assert!(fx.executor.calls().is_empty());
}

#[tokio::test]
async fn quote_failure_discards_the_draft() {
    let store = Arc::new(MemoryProfileStore::new());
    store
        .save(&UserProfile::new(
            USER,
            "Alice",
            format!("0x{}", "a".repeat(40)),
        ))
        .await
        .unwrap();
    let engine = ConversationEngine::new(
        store,
        Arc::new(FailingQuoteOracle),
        Arc::new(FixedExecutionOracle::default()),
        Arc::new(AssetCatalog::default()),
    );
    let mut session = ConversationSession::default();

    for event in [
        EventKind::Command(Command::Trade),
        EventKind::Choice(Choice::Kind(TradeKind::SameChain)),
        EventKind::Choice(Choice::Chain {
            stage: ChainStage::Same,
            chain: "Polygon".to_string(),
        }),
        EventKind::Choice(Choice::Token {
            stage: TokenStage::SameSource,
            token: "ETH".to_string(),
        }),
        EventKind::Choice(Choice::Token {
            stage: TokenStage::SameDest,
            token: "USDC".to_string(),
        }),
    ] {
        engine.step(USER, &mut session, event).await.unwrap();
    }
    let effects = engine
        .step(USER, &mut session, EventKind::Text("3".to_string()))
        .await
        .unwrap();

    assert!(effect_text(&effects[0]).contains("couldn't fetch a quote"));
    assert!(session.is_idle());
    assert!(session.draft.is_none());
}

#[tokio::test]
async fn invalid_amount_reprompts_without_losing_the_draft() {
    let mut fx = Fixture::registered().await;

    fx.command(Command::Trade).await;
    fx.choice(Choice::Kind(TradeKind::SameChain)).await;
    fx.choice(Choice::Chain {
        stage: ChainStage::Same,
        chain: "Base".to_string(),
    })
    .await;
    fx.choice(Choice::Token {
        stage: TokenStage::SameSource,
        token: "ETH".to_string(),
    })
    .await;
    fx.choice(Choice::Token {
        stage: TokenStage::SameDest,
        token: "USDC".to_string(),
    })
    .await;

    for bad in ["zero", "-1", "0"] {
        let effects = fx.text(bad).await;
        assert!(effect_text(&effects[0]).contains("positive numeric amount"));
    }
    assert!(fx.quotes.calls().is_empty());

    // A valid amount still completes the flow.
    let effects = fx.text("2").await;
    assert!(effect_text(&effects[0]).contains("Proceed?"));
}

#[tokio::test]
async fn cancel_mid_wizard_then_restart_starts_fresh() {
    let mut fx = Fixture::registered().await;

    fx.command(Command::Trade).await;
    fx.choice(Choice::Kind(TradeKind::CrossChain)).await;
    fx.choice(Choice::Chain {
        stage: ChainStage::CrossSource,
        chain: "Base".to_string(),
    })
    .await;

    let effects = fx.choice(Choice::Cancel).await;
    assert!(effect_text(&effects[0]).contains("cancelled"));
    assert!(fx.session.is_idle());
    assert!(fx.session.draft.is_none());

    // Cancelling again reports that nothing is active.
    let effects = fx.choice(Choice::Cancel).await;
    assert!(effect_text(&effects[0]).contains("No operation"));

    let effects = fx.command(Command::Trade).await;
    assert!(matches!(&effects[0], Effect::SendChoices { .. }));
}

#[tokio::test]
async fn register_mid_trade_discards_the_draft() {
    let mut fx = Fixture::registered().await;

    fx.command(Command::Trade).await;
    fx.choice(Choice::Kind(TradeKind::CrossChain)).await;
    fx.choice(Choice::Chain {
        stage: ChainStage::CrossSource,
        chain: "Base".to_string(),
    })
    .await;
    assert!(fx.session.draft.is_some());

    // Re-entry replaces the trade flow wholesale and restarts registration.
    let effects = fx.command(Command::Register).await;
    assert!(effect_text(&effects[0]).contains("called"));
    assert!(fx.session.draft.is_none());
    assert_eq!(fx.session.state, FlowState::AwaitingName);
}

#[tokio::test]
async fn free_text_during_choice_steps_is_redirected() {
    let mut fx = Fixture::registered().await;

    fx.command(Command::Trade).await;
    let effects = fx.text("Base").await;
    assert!(effect_text(&effects[0]).contains("buttons"));

    // The wizard is still at type selection.
    let effects = fx.choice(Choice::Kind(TradeKind::CrossChain)).await;
    assert!(matches!(&effects[0], Effect::SendChoices { prompt, .. } if prompt.contains("source chain")));
}

#[tokio::test]
async fn unknown_command_and_choice_leave_state_alone() {
    let mut fx = Fixture::registered().await;

    fx.command(Command::Register).await;
    let effects = fx
        .step(EventKind::UnknownCommand("/frobnicate".to_string()))
        .await;
    assert!(effect_text(&effects[0]).contains("didn't understand"));

    // Still awaiting the name.
    fx.text("Alice").await;
    let effects = fx.step(EventKind::UnknownChoice("garbage|token".to_string())).await;
    assert!(effect_text(&effects[0]).contains("didn't understand"));
}
