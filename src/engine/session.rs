//! Per-user conversation state.

use crate::domain::trade::TradeDraft;

/// The two guided interactions, plus no flow at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    None,
    Registration,
    Trade,
}

/// Finite-state-machine position within the active flow.
///
/// Registration states carry their partial data directly; the trade flow
/// keeps its accumulating fields in the session's [`TradeDraft`] so the
/// draft can be discarded as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,

    // Registration
    AwaitingName,
    AwaitingAddress {
        name: String,
    },

    // Trade wizard
    SelectType,
    CrossSrcChain,
    CrossSrcToken,
    CrossDstChain,
    CrossDstToken,
    CrossAmount,
    SameChain,
    SameSrcToken,
    SameDstToken,
    SameAmount,
    Confirm,
}

impl FlowState {
    /// Which flow this state belongs to.
    #[must_use]
    pub const fn flow(&self) -> Flow {
        match self {
            Self::Idle => Flow::None,
            Self::AwaitingName | Self::AwaitingAddress { .. } => Flow::Registration,
            _ => Flow::Trade,
        }
    }
}

/// Transient conversation state for one user.
///
/// At most one active flow per user; starting a new flow replaces the
/// current one. Owned exclusively by that user's session lane, so no
/// locking is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationSession {
    /// Current FSM position.
    pub state: FlowState,
    /// In-progress trade draft, present only during the trade flow.
    pub draft: Option<TradeDraft>,
}

impl ConversationSession {
    /// Whether no flow is active.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == FlowState::Idle
    }

    /// Discard the active flow and any partial data.
    pub fn reset(&mut self) {
        self.state = FlowState::Idle;
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trade::TradeKind;

    #[test]
    fn default_session_is_idle() {
        let session = ConversationSession::default();
        assert!(session.is_idle());
        assert_eq!(session.state.flow(), Flow::None);
        assert!(session.draft.is_none());
    }

    #[test]
    fn states_map_to_flows() {
        assert_eq!(FlowState::AwaitingName.flow(), Flow::Registration);
        assert_eq!(
            FlowState::AwaitingAddress { name: "A".into() }.flow(),
            Flow::Registration
        );
        assert_eq!(FlowState::SelectType.flow(), Flow::Trade);
        assert_eq!(FlowState::CrossAmount.flow(), Flow::Trade);
        assert_eq!(FlowState::Confirm.flow(), Flow::Trade);
    }

    #[test]
    fn reset_discards_state_and_draft() {
        let mut session = ConversationSession {
            state: FlowState::CrossDstToken,
            draft: Some(TradeDraft::new(TradeKind::CrossChain)),
        };
        session.reset();
        assert!(session.is_idle());
        assert!(session.draft.is_none());
    }
}
