//! Application-scoped broadcast channel.
//!
//! One registry per application session, shared by cloning the handle into
//! every component that publishes or listens. Each subscriber gets its own
//! unbounded queue so delivery never blocks the publisher.

use crate::boat::BoatId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Payload carried on the boat channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoatMessage {
    pub record_id: BoatId,
}

impl BoatMessage {
    pub fn new(record_id: impl Into<BoatId>) -> Self {
        Self {
            record_id: record_id.into(),
        }
    }
}

pub type SubscriptionId = u64;

struct Registry {
    next_id: SubscriptionId,
    subscribers: HashMap<SubscriptionId, mpsc::UnboundedSender<BoatMessage>>,
}

/// Handle to a named publish/subscribe registry
#[derive(Clone)]
pub struct MessageChannel {
    name: Arc<str>,
    registry: Arc<Mutex<Registry>>,
}

/// A live registration on a [`MessageChannel`]
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: mpsc::UnboundedReceiver<BoatMessage>,
}

impl MessageChannel {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            registry: Arc::new(Mutex::new(Registry {
                next_id: 1,
                subscribers: HashMap::new(),
            })),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a new subscriber
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut id = 0;
        if let Ok(mut registry) = self.registry.lock() {
            id = registry.next_id;
            registry.next_id += 1;
            registry.subscribers.insert(id, tx);
        }
        log::debug!("{}: subscription {} registered", self.name, id);
        Subscription { id, receiver: rx }
    }

    /// Remove a subscriber; pending undelivered messages are dropped
    pub fn unsubscribe(&self, subscription: Subscription) {
        if let Ok(mut registry) = self.registry.lock() {
            registry.subscribers.remove(&subscription.id);
        }
        log::debug!("{}: subscription {} removed", self.name, subscription.id);
    }

    /// Deliver a message to every current subscriber, returns the number reached
    pub fn publish(&self, message: BoatMessage) -> usize {
        let Ok(mut registry) = self.registry.lock() else {
            return 0;
        };

        // Subscribers whose receiving end was dropped are pruned here
        registry
            .subscribers
            .retain(|_, sender| sender.send(message.clone()).is_ok());

        let delivered = registry.subscribers.len();
        log::debug!(
            "{}: published recordId={} to {} subscriber(s)",
            self.name,
            message.record_id,
            delivered
        );
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry
            .lock()
            .map(|registry| registry.subscribers.len())
            .unwrap_or(0)
    }
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Next queued message without waiting
    pub fn try_recv(&mut self) -> Option<BoatMessage> {
        self.receiver.try_recv().ok()
    }

    /// Wait for the next message; `None` once the subscription is removed
    pub async fn recv(&mut self) -> Option<BoatMessage> {
        self.receiver.recv().await
    }
}
