//! Randomized stand-in oracles.
//!
//! Placeholder pricing and execution until a real trading backend is wired
//! in: quotes apply a fixed reference rate with a ±1% jitter and flat gas
//! fees, execution fabricates a random transaction hash. Deterministic
//! fakes for tests live in [`crate::testkit`] instead.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::assets::AssetCatalog;
use crate::domain::trade::Quote;
use crate::error::OracleError;
use crate::port::oracle::{ExecutionOracle, QuoteOracle};

/// Reference conversion rate applied to every quote.
const REFERENCE_RATE: Decimal = dec!(3875);
/// Flat gas fee for cross-chain quotes.
const CROSS_GAS_FEE: Decimal = dec!(0.2);
/// Flat gas fee for same-chain quotes.
const SAME_GAS_FEE: Decimal = dec!(0.1);

/// Quote oracle producing jittered placeholder estimates.
pub struct DummyQuoteOracle {
    catalog: Arc<AssetCatalog>,
}

impl DummyQuoteOracle {
    /// Create an oracle reporting gas tokens from the given catalog.
    #[must_use]
    pub fn new(catalog: Arc<AssetCatalog>) -> Self {
        Self { catalog }
    }

    fn estimate(amount: Decimal) -> Decimal {
        // Jitter in [0.990, 1.010], mirroring the placeholder pricing the
        // engine was developed against.
        let jitter = Decimal::from(rand::thread_rng().gen_range(990..=1010)) / dec!(1000);
        (amount * REFERENCE_RATE * jitter).round_dp(8)
    }
}

#[async_trait]
impl QuoteOracle for DummyQuoteOracle {
    async fn quote_cross_chain(
        &self,
        source_chain: &str,
        _source_token: &str,
        _dest_chain: &str,
        _dest_token: &str,
        amount: Decimal,
    ) -> Result<Quote, OracleError> {
        Ok(Quote {
            estimated_received: Self::estimate(amount),
            gas_fee_amount: CROSS_GAS_FEE,
            gas_fee_token: self.catalog.gas_token_for(source_chain).to_string(),
        })
    }

    async fn quote_same_chain(
        &self,
        chain: &str,
        _source_token: &str,
        _dest_token: &str,
        amount: Decimal,
    ) -> Result<Quote, OracleError> {
        Ok(Quote {
            estimated_received: Self::estimate(amount),
            gas_fee_amount: SAME_GAS_FEE,
            gas_fee_token: self.catalog.gas_token_for(chain).to_string(),
        })
    }
}

/// Execution oracle fabricating random transaction hashes.
#[derive(Default)]
pub struct DummyExecutionOracle;

impl DummyExecutionOracle {
    fn random_tx_hash() -> String {
        const HEX: &[u8] = b"0123456789abcdef";
        let mut rng = rand::thread_rng();
        let digits: String = (0..64)
            .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
            .collect();
        format!("0x{digits}")
    }
}

#[async_trait]
impl ExecutionOracle for DummyExecutionOracle {
    async fn execute_cross_chain(
        &self,
        _user_address: &str,
        _source_chain: &str,
        _source_token: &str,
        _dest_chain: &str,
        _dest_token: &str,
        _amount: Decimal,
    ) -> Result<String, OracleError> {
        Ok(Self::random_tx_hash())
    }

    async fn execute_same_chain(
        &self,
        _user_address: &str,
        _chain: &str,
        _source_token: &str,
        _dest_token: &str,
        _amount: Decimal,
    ) -> Result<String, OracleError> {
        Ok(Self::random_tx_hash())
    }
}
