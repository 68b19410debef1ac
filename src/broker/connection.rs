use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::broker::delivery::Delivery;

/// Acknowledgment mode requested at subscription time.
///
/// The reception pipeline always subscribes in `Manual` mode; `Auto` exists
/// because the broker interface offers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckMode {
    /// The broker waits for an explicit `AckToken::ack` per delivery.
    Manual,
    /// The broker considers a message consumed as soon as it is delivered.
    Auto,
}

/// Errors from broker subscription and publish operations.
///
/// A subscription error during startup is fatal to the worker: it must not
/// run partially subscribed.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("queue '{0}' already has a subscriber")]
    AlreadySubscribed(String),
    #[error("queue '{0}' has no subscriber")]
    UnknownQueue(String),
    #[error("broker connection closed")]
    ConnectionClosed,
}

/// Client-side view of a message broker, reduced to what the consumer needs:
/// establishing per-queue subscriptions.
#[async_trait]
pub trait BrokerConnection: Send + Sync {
    /// Subscribes to a queue, returning the stream of its deliveries.
    async fn subscribe(&self, queue: &str, mode: AckMode) -> Result<Subscription, BrokerError>;
}

/// A subscription handle receiving deliveries from a single queue.
///
/// Deliveries arrive in the broker's per-queue order; no ordering exists
/// across different subscriptions.
#[derive(Debug)]
pub struct Subscription {
    queue: String,
    receiver: UnboundedReceiver<Delivery>,
}

impl Subscription {
    pub(crate) fn new(queue: impl Into<String>, receiver: UnboundedReceiver<Delivery>) -> Self {
        Self {
            queue: queue.into(),
            receiver,
        }
    }

    /// Receives the next delivery, or `None` once the connection is closed.
    pub async fn recv(&mut self) -> Option<Delivery> {
        self.receiver.recv().await
    }

    /// Name of the subscribed queue.
    pub fn queue(&self) -> &str {
        &self.queue
    }
}
