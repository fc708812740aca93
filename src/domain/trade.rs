//! The in-progress trade draft and its committed forms.
//!
//! A [`TradeDraft`] accumulates wizard selections one state at a time. The
//! engine only offers confirmation once a draft converts into a complete
//! [`ReadyTrade`]; an incomplete draft at that point is an internal
//! consistency defect, not a user error.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which of the two wizard branches a draft belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeKind {
    /// Swap between two chains.
    CrossChain,
    /// Swap on a single chain.
    SameChain,
}

impl TradeKind {
    /// Human-readable label used in confirmation summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CrossChain => "Cross-chain Swap",
            Self::SameChain => "On-chain Swap",
        }
    }
}

/// Quote oracle response attached to a draft before confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Estimated amount received in the destination token.
    pub estimated_received: Decimal,
    /// Estimated gas fee.
    pub gas_fee_amount: Decimal,
    /// Token the gas fee is denominated in.
    pub gas_fee_token: String,
}

/// Accumulating parameters of a cross-chain swap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossDraft {
    pub source_chain: Option<String>,
    pub source_token: Option<String>,
    pub dest_chain: Option<String>,
    pub dest_token: Option<String>,
    pub amount: Option<Decimal>,
    pub quote: Option<Quote>,
}

/// Accumulating parameters of a same-chain swap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SameDraft {
    pub chain: Option<String>,
    pub source_token: Option<String>,
    pub dest_token: Option<String>,
    pub amount: Option<Decimal>,
    pub quote: Option<Quote>,
}

/// The transient draft held while the trade wizard is active.
///
/// Discarded whole on cancellation, completion, or flow-fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeDraft {
    Cross(CrossDraft),
    Same(SameDraft),
}

impl TradeDraft {
    /// Start an empty draft of the given kind.
    #[must_use]
    pub fn new(kind: TradeKind) -> Self {
        match kind {
            TradeKind::CrossChain => Self::Cross(CrossDraft::default()),
            TradeKind::SameChain => Self::Same(SameDraft::default()),
        }
    }

    /// Which branch this draft belongs to.
    #[must_use]
    pub const fn kind(&self) -> TradeKind {
        match self {
            Self::Cross(_) => TradeKind::CrossChain,
            Self::Same(_) => TradeKind::SameChain,
        }
    }

    /// Convert into a fully-specified trade, or `None` if any field is
    /// still missing.
    #[must_use]
    pub fn into_ready(self) -> Option<ReadyTrade> {
        match self {
            Self::Cross(draft) => Some(ReadyTrade::Cross(CrossTrade {
                source_chain: draft.source_chain?,
                source_token: draft.source_token?,
                dest_chain: draft.dest_chain?,
                dest_token: draft.dest_token?,
                amount: draft.amount?,
                quote: draft.quote?,
            })),
            Self::Same(draft) => Some(ReadyTrade::Same(SameTrade {
                chain: draft.chain?,
                source_token: draft.source_token?,
                dest_token: draft.dest_token?,
                amount: draft.amount?,
                quote: draft.quote?,
            })),
        }
    }
}

/// A complete cross-chain trade, quote attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossTrade {
    pub source_chain: String,
    pub source_token: String,
    pub dest_chain: String,
    pub dest_token: String,
    pub amount: Decimal,
    pub quote: Quote,
}

/// A complete same-chain trade, quote attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SameTrade {
    pub chain: String,
    pub source_token: String,
    pub dest_token: String,
    pub amount: Decimal,
    pub quote: Quote,
}

/// A draft that passed completeness checks and can be confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyTrade {
    Cross(CrossTrade),
    Same(SameTrade),
}

impl ReadyTrade {
    /// Confirmation summary shown alongside the yes/no prompt.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Cross(t) => format!(
                "You are about to execute this trade:\n\n\
                 Type: {}\n\
                 From Token: {}\n\
                 To Token: {}\n\
                 From Chain: {}\n\
                 To Chain: {}\n\
                 Amount: {} {}\n\
                 Estimated Received: {} {}\n\
                 Gas Fee: ~{} {}\n\n\
                 Proceed?",
                TradeKind::CrossChain.label(),
                t.source_token,
                t.dest_token,
                t.source_chain,
                t.dest_chain,
                t.amount,
                t.source_token,
                t.quote.estimated_received,
                t.dest_token,
                t.quote.gas_fee_amount,
                t.quote.gas_fee_token,
            ),
            Self::Same(t) => format!(
                "You are about to execute this trade:\n\n\
                 Type: {}\n\
                 Chain: {}\n\
                 From Token: {}\n\
                 To Token: {}\n\
                 Amount: {} {}\n\
                 Estimated Received: {} {}\n\
                 Gas Fee: ~{} {}\n\n\
                 Proceed?",
                TradeKind::SameChain.label(),
                t.chain,
                t.source_token,
                t.dest_token,
                t.amount,
                t.source_token,
                t.quote.estimated_received,
                t.dest_token,
                t.quote.gas_fee_amount,
                t.quote.gas_fee_token,
            ),
        }
    }
}
