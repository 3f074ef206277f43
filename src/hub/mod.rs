//! Notification hub
//!
//! In-process fan-out point for live cancellation notices. Connected
//! WebSocket clients register an outbound channel with the hub; booking
//! cancellation publishes an event that the hub pushes to every current
//! subscriber.
//!
//! The hub runs as a single actor task owning the subscriber set, so
//! register, unregister, and broadcast are processed strictly in arrival
//! order and the set is never observed half-updated. A subscriber whose
//! channel rejects a payload is dropped from the set without affecting
//! delivery to the others.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// Event pushed to live subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HubEvent {
    /// A confirmed booking on a session was cancelled
    SessionCancelled {
        session_name: String,
        user_name: String,
    },
}

enum HubCommand {
    Register {
        id: Uuid,
        sender: mpsc::UnboundedSender<String>,
    },
    Unregister {
        id: Uuid,
    },
    Broadcast {
        payload: String,
    },
    Count {
        reply: oneshot::Sender<usize>,
    },
    Shutdown,
}

/// Handle to the running notification hub
///
/// Cheap to clone; all clones feed the same actor. The actor runs until
/// `shutdown` is called or the last handle is dropped.
#[derive(Clone)]
pub struct NotificationHub {
    tx: mpsc::UnboundedSender<HubCommand>,
}

impl NotificationHub {
    /// Start the hub actor and return a handle to it
    pub fn start() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_hub(rx));
        Self { tx }
    }

    /// Register a new subscriber, returning its identity and the channel
    /// that will carry broadcast payloads to it
    pub fn subscribe(&self) -> (Uuid, mpsc::UnboundedReceiver<String>) {
        let id = Uuid::new_v4();
        let (sender, receiver) = mpsc::unbounded_channel();
        let _ = self.tx.send(HubCommand::Register { id, sender });
        (id, receiver)
    }

    /// Remove a subscriber; no-op if it is already gone
    pub fn unsubscribe(&self, id: Uuid) {
        let _ = self.tx.send(HubCommand::Unregister { id });
    }

    /// Push a cancellation notice to every current subscriber
    pub fn broadcast_session_cancelled(&self, session_name: &str, user_name: &str) {
        let event = HubEvent::SessionCancelled {
            session_name: session_name.to_string(),
            user_name: user_name.to_string(),
        };

        match serde_json::to_string(&event) {
            Ok(payload) => {
                let _ = self.tx.send(HubCommand::Broadcast { payload });
            }
            Err(e) => {
                tracing::error!("Failed to serialize hub event: {}", e);
            }
        }
    }

    /// Number of currently registered subscribers.
    ///
    /// Processed in order with the other commands, so awaiting it also
    /// confirms every previously queued event has been handled.
    pub async fn connection_count(&self) -> anyhow::Result<usize> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(HubCommand::Count { reply })
            .map_err(|_| anyhow::anyhow!("Notification hub is not running"))?;
        rx.await
            .map_err(|_| anyhow::anyhow!("Notification hub dropped the reply"))
    }

    /// Stop the hub actor; subsequent commands are discarded
    pub fn shutdown(&self) {
        let _ = self.tx.send(HubCommand::Shutdown);
    }
}

async fn run_hub(mut rx: mpsc::UnboundedReceiver<HubCommand>) {
    let mut subscribers: HashMap<Uuid, mpsc::UnboundedSender<String>> = HashMap::new();

    while let Some(command) = rx.recv().await {
        match command {
            HubCommand::Register { id, sender } => {
                subscribers.insert(id, sender);
                tracing::info!("WebSocket client {} connected", id);
            }
            HubCommand::Unregister { id } => {
                if subscribers.remove(&id).is_some() {
                    tracing::info!("WebSocket client {} disconnected", id);
                }
            }
            HubCommand::Broadcast { payload } => {
                subscribers.retain(|id, sender| {
                    if sender.send(payload.clone()).is_ok() {
                        true
                    } else {
                        tracing::warn!("Dropping unreachable WebSocket client {}", id);
                        false
                    }
                });
            }
            HubCommand::Count { reply } => {
                let _ = reply.send(subscribers.len());
            }
            HubCommand::Shutdown => {
                tracing::debug!("Notification hub shutting down");
                break;
            }
        }
    }
}
