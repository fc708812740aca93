//! Per-user session lanes.
//!
//! Each active user gets one bounded channel and one tokio task owning that
//! user's [`ConversationSession`]. Events for a user apply strictly in
//! arrival order, oracle round-trips included; different users' lanes never
//! block on each other.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::domain::user::UserId;
use crate::engine::event::{Effect, EventKind};
use crate::engine::session::ConversationSession;
use crate::engine::ConversationEngine;
use crate::port::outbox::Outbox;

/// Events queued per lane before `dispatch` awaits backpressure.
const LANE_BUFFER: usize = 32;

const MSG_LANE_ERROR: &str = "Something went wrong on our side. The operation was cancelled.";

/// Serializes inbound events by user and fans effects out to the transport.
pub struct SessionRouter {
    engine: Arc<ConversationEngine>,
    outbox: Arc<dyn Outbox>,
    /// One live lane per user who has ever sent an event; lanes are never
    /// evicted, so the map is bounded by total distinct users over the
    /// process lifetime (an idle lane is one sender plus one parked task).
    lanes: DashMap<UserId, mpsc::Sender<EventKind>>,
}

impl SessionRouter {
    /// Create a router over an engine and an outbox.
    #[must_use]
    pub fn new(engine: Arc<ConversationEngine>, outbox: Arc<dyn Outbox>) -> Self {
        Self {
            engine,
            outbox,
            lanes: DashMap::new(),
        }
    }

    /// Route one event into its user's lane, spawning the lane on first use.
    ///
    /// Awaits only on that lane's backpressure, never on processing.
    pub async fn dispatch(&self, user: UserId, event: EventKind) {
        let sender = self
            .lanes
            .entry(user)
            .or_insert_with(|| self.spawn_lane(user))
            .clone();

        if sender.send(event.clone()).await.is_err() {
            // Lane task is gone (it never exits on its own); start a fresh
            // one rather than dropping the event.
            error!(user = %user, "Session lane was closed, respawning");
            let sender = self.spawn_lane(user);
            self.lanes.insert(user, sender.clone());
            let _ = sender.send(event).await;
        }
    }

    /// Number of users with a live lane.
    #[must_use]
    pub fn active_lanes(&self) -> usize {
        self.lanes.len()
    }

    fn spawn_lane(&self, user: UserId) -> mpsc::Sender<EventKind> {
        let (sender, mut receiver) = mpsc::channel(LANE_BUFFER);
        let engine = Arc::clone(&self.engine);
        let outbox = Arc::clone(&self.outbox);

        tokio::spawn(async move {
            debug!(user = %user, "Session lane started");
            let mut session = ConversationSession::default();

            while let Some(event) = receiver.recv().await {
                match engine.step(user, &mut session, event).await {
                    Ok(effects) => {
                        for effect in effects {
                            if let Err(e) = outbox.deliver(effect).await {
                                error!(user = %user, error = %e, "Failed to deliver effect");
                            }
                        }
                    }
                    Err(e) => {
                        // Infrastructure failure: drop the flow so the user
                        // is never left stuck in a half-applied state.
                        error!(user = %user, error = %e, "Engine step failed");
                        session.reset();
                        let apology = Effect::SendText {
                            user,
                            text: MSG_LANE_ERROR.into(),
                        };
                        if let Err(e) = outbox.deliver(apology).await {
                            error!(user = %user, error = %e, "Failed to deliver error notice");
                        }
                    }
                }
            }
            debug!(user = %user, "Session lane stopped");
        });

        sender
    }
}
