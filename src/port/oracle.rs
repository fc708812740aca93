//! Pricing and execution collaborator ports.
//!
//! Both oracles are slow, fallible external calls. They are awaited inside
//! the owning user's session lane only, so a stalled oracle never blocks
//! other users. The engine treats any error as fatal to the active flow.

use async_trait::async_trait;

use rust_decimal::Decimal;

use crate::domain::trade::Quote;
use crate::error::OracleError;

/// Estimates swap output and gas fees for a proposed trade.
#[async_trait]
pub trait QuoteOracle: Send + Sync {
    /// Quote a swap between two chains.
    async fn quote_cross_chain(
        &self,
        source_chain: &str,
        source_token: &str,
        dest_chain: &str,
        dest_token: &str,
        amount: Decimal,
    ) -> Result<Quote, OracleError>;

    /// Quote a swap on a single chain.
    async fn quote_same_chain(
        &self,
        chain: &str,
        source_token: &str,
        dest_token: &str,
        amount: Decimal,
    ) -> Result<Quote, OracleError>;
}

/// Executes a confirmed trade and returns the transaction identifier.
#[async_trait]
pub trait ExecutionOracle: Send + Sync {
    /// Execute a confirmed cross-chain swap.
    async fn execute_cross_chain(
        &self,
        user_address: &str,
        source_chain: &str,
        source_token: &str,
        dest_chain: &str,
        dest_token: &str,
        amount: Decimal,
    ) -> Result<String, OracleError>;

    /// Execute a confirmed same-chain swap.
    async fn execute_same_chain(
        &self,
        user_address: &str,
        chain: &str,
        source_token: &str,
        dest_token: &str,
        amount: Decimal,
    ) -> Result<String, OracleError>;
}
