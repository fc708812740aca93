//! Configured chains, tokens, and their native gas tokens.
//!
//! The selectable sets are configuration, not structure: the engine renders
//! whatever this catalog contains and validates selections against it.

use std::collections::HashMap;

use serde::Deserialize;

/// Gas token reported when a chain has no native-token mapping.
const FALLBACK_GAS_TOKEN: &str = "USDC";

/// Selectable chains and tokens plus the per-chain native gas token.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetCatalog {
    /// Chains offered in the wizard, in display order.
    #[serde(default = "default_chains")]
    pub chains: Vec<String>,
    /// Tokens offered in the wizard, in display order.
    #[serde(default = "default_tokens")]
    pub tokens: Vec<String>,
    /// Native gas token per chain.
    #[serde(default = "default_gas_tokens")]
    pub gas_tokens: HashMap<String, String>,
}

fn default_chains() -> Vec<String> {
    vec!["Polygon".into(), "Base".into(), "Ethereum".into()]
}

fn default_tokens() -> Vec<String> {
    vec!["ETH".into(), "USDC".into(), "Bitcoin".into()]
}

fn default_gas_tokens() -> HashMap<String, String> {
    HashMap::from([
        ("Polygon".into(), "MATIC".into()),
        ("Base".into(), "ETH".into()),
        ("Ethereum".into(), "ETH".into()),
    ])
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self {
            chains: default_chains(),
            tokens: default_tokens(),
            gas_tokens: default_gas_tokens(),
        }
    }
}

impl AssetCatalog {
    /// Whether a chain is offered by this catalog.
    #[must_use]
    pub fn has_chain(&self, chain: &str) -> bool {
        self.chains.iter().any(|c| c == chain)
    }

    /// Whether a token is offered by this catalog.
    #[must_use]
    pub fn has_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Native gas token for a chain, falling back to USDC for unknown chains.
    #[must_use]
    pub fn gas_token_for(&self, chain: &str) -> &str {
        self.gas_tokens
            .get(chain)
            .map_or(FALLBACK_GAS_TOKEN, String::as_str)
    }
}
