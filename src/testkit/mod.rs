//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! The oracle fakes are deterministic counterparts of the dummy adapters:
//! [`FixedQuoteOracle`] and [`FixedExecutionOracle`] always succeed with a
//! known quote or hash and record their call arguments for assertions;
//! [`FailingQuoteOracle`] and [`FailingExecutionOracle`] always fail.
//! [`RecordingOutbox`] captures delivered effects in order.

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::trade::{CrossDraft, Quote, TradeDraft};
use crate::engine::event::Effect;
use crate::error::OracleError;
use crate::port::oracle::{ExecutionOracle, QuoteOracle};
use crate::port::outbox::Outbox;

/// Arguments of one recorded quote request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteCall {
    Cross {
        source_chain: String,
        source_token: String,
        dest_chain: String,
        dest_token: String,
        amount: Decimal,
    },
    Same {
        chain: String,
        source_token: String,
        dest_token: String,
        amount: Decimal,
    },
}

/// Quote oracle that always returns the same quote and records calls.
pub struct FixedQuoteOracle {
    quote: Quote,
    calls: Mutex<Vec<QuoteCall>>,
}

impl FixedQuoteOracle {
    pub fn with_quote(quote: Quote) -> Self {
        Self {
            quote,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The quote every request receives.
    pub fn quote(&self) -> Quote {
        self.quote.clone()
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<QuoteCall> {
        self.calls.lock().clone()
    }
}

impl Default for FixedQuoteOracle {
    fn default() -> Self {
        Self::with_quote(Quote {
            estimated_received: dec!(3875),
            gas_fee_amount: dec!(0.2),
            gas_fee_token: "ETH".to_string(),
        })
    }
}

#[async_trait]
impl QuoteOracle for FixedQuoteOracle {
    async fn quote_cross_chain(
        &self,
        source_chain: &str,
        source_token: &str,
        dest_chain: &str,
        dest_token: &str,
        amount: Decimal,
    ) -> Result<Quote, OracleError> {
        self.calls.lock().push(QuoteCall::Cross {
            source_chain: source_chain.to_string(),
            source_token: source_token.to_string(),
            dest_chain: dest_chain.to_string(),
            dest_token: dest_token.to_string(),
            amount,
        });
        Ok(self.quote.clone())
    }

    async fn quote_same_chain(
        &self,
        chain: &str,
        source_token: &str,
        dest_token: &str,
        amount: Decimal,
    ) -> Result<Quote, OracleError> {
        self.calls.lock().push(QuoteCall::Same {
            chain: chain.to_string(),
            source_token: source_token.to_string(),
            dest_token: dest_token.to_string(),
            amount,
        });
        Ok(self.quote.clone())
    }
}

/// Quote oracle that rejects every request.
pub struct FailingQuoteOracle;

#[async_trait]
impl QuoteOracle for FailingQuoteOracle {
    async fn quote_cross_chain(
        &self,
        _source_chain: &str,
        _source_token: &str,
        _dest_chain: &str,
        _dest_token: &str,
        _amount: Decimal,
    ) -> Result<Quote, OracleError> {
        Err(OracleError::Quote("scripted failure".to_string()))
    }

    async fn quote_same_chain(
        &self,
        _chain: &str,
        _source_token: &str,
        _dest_token: &str,
        _amount: Decimal,
    ) -> Result<Quote, OracleError> {
        Err(OracleError::Quote("scripted failure".to_string()))
    }
}

/// Arguments of one recorded execution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionCall {
    Cross {
        user_address: String,
        source_chain: String,
        source_token: String,
        dest_chain: String,
        dest_token: String,
        amount: Decimal,
    },
    Same {
        user_address: String,
        chain: String,
        source_token: String,
        dest_token: String,
        amount: Decimal,
    },
}

/// Execution oracle that always succeeds with a fixed hash and records calls.
pub struct FixedExecutionOracle {
    tx_hash: String,
    calls: Mutex<Vec<ExecutionCall>>,
}

impl FixedExecutionOracle {
    pub fn with_hash(tx_hash: impl Into<String>) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The hash every execution returns.
    pub fn tx_hash(&self) -> &str {
        &self.tx_hash
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<ExecutionCall> {
        self.calls.lock().clone()
    }
}

impl Default for FixedExecutionOracle {
    fn default() -> Self {
        Self::with_hash(format!("0x{}", "f".repeat(64)))
    }
}

#[async_trait]
impl ExecutionOracle for FixedExecutionOracle {
    async fn execute_cross_chain(
        &self,
        user_address: &str,
        source_chain: &str,
        source_token: &str,
        dest_chain: &str,
        dest_token: &str,
        amount: Decimal,
    ) -> Result<String, OracleError> {
        self.calls.lock().push(ExecutionCall::Cross {
            user_address: user_address.to_string(),
            source_chain: source_chain.to_string(),
            source_token: source_token.to_string(),
            dest_chain: dest_chain.to_string(),
            dest_token: dest_token.to_string(),
            amount,
        });
        Ok(self.tx_hash.clone())
    }

    async fn execute_same_chain(
        &self,
        user_address: &str,
        chain: &str,
        source_token: &str,
        dest_token: &str,
        amount: Decimal,
    ) -> Result<String, OracleError> {
        self.calls.lock().push(ExecutionCall::Same {
            user_address: user_address.to_string(),
            chain: chain.to_string(),
            source_token: source_token.to_string(),
            dest_token: dest_token.to_string(),
            amount,
        });
        Ok(self.tx_hash.clone())
    }
}

/// Execution oracle that rejects every request.
pub struct FailingExecutionOracle;

#[async_trait]
impl ExecutionOracle for FailingExecutionOracle {
    async fn execute_cross_chain(
        &self,
        _user_address: &str,
        _source_chain: &str,
        _source_token: &str,
        _dest_chain: &str,
        _dest_token: &str,
        _amount: Decimal,
    ) -> Result<String, OracleError> {
        Err(OracleError::Execution("scripted failure".to_string()))
    }

    async fn execute_same_chain(
        &self,
        _user_address: &str,
        _chain: &str,
        _source_token: &str,
        _dest_token: &str,
        _amount: Decimal,
    ) -> Result<String, OracleError> {
        Err(OracleError::Execution("scripted failure".to_string()))
    }
}

/// Outbox that records every delivered effect in order.
#[derive(Default)]
pub struct RecordingOutbox {
    effects: Mutex<Vec<Effect>>,
}

impl RecordingOutbox {
    /// Snapshot of the effects delivered so far.
    pub fn effects(&self) -> Vec<Effect> {
        self.effects.lock().clone()
    }
}

#[async_trait]
impl Outbox for RecordingOutbox {
    async fn deliver(&self, effect: Effect) -> crate::error::Result<()> {
        self.effects.lock().push(effect);
        Ok(())
    }
}

/// A cross-chain draft with every field populated, quote included.
pub fn complete_cross_draft() -> TradeDraft {
    TradeDraft::Cross(CrossDraft {
        source_chain: Some("Base".to_string()),
        source_token: Some("ETH".to_string()),
        dest_chain: Some("Polygon".to_string()),
        dest_token: Some("USDC".to_string()),
        amount: Some(dec!(1.5)),
        quote: Some(Quote {
            estimated_received: dec!(5812.5),
            gas_fee_amount: dec!(0.2),
            gas_fee_token: "ETH".to_string(),
        }),
    })
}
