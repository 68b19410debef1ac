use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::broker::connection::{AckMode, BrokerConnection, BrokerError, Subscription};
use crate::broker::delivery::{AckToken, Delivery};

/// An in-process broker backend.
///
/// Stands in for an external broker during tests and local runs: a queue
/// exists once something subscribes to it, deliveries flow over a per-queue
/// channel in publish order, and acknowledgments are recorded in a ledger
/// that tests can inspect.
#[derive(Default)]
pub struct InMemoryBroker {
    queues: Mutex<HashMap<String, QueueEntry>>,
    acks: Arc<Mutex<HashMap<String, usize>>>,
}

struct QueueEntry {
    sender: mpsc::UnboundedSender<Delivery>,
    mode: AckMode,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers a message body to the queue's subscriber.
    pub fn publish(&self, queue: &str, body: impl Into<Vec<u8>>) -> Result<(), BrokerError> {
        let queues = self.queues.lock().unwrap();
        let entry = queues
            .get(queue)
            .ok_or_else(|| BrokerError::UnknownQueue(queue.to_string()))?;

        let ack = match entry.mode {
            AckMode::Auto => {
                self.record_ack(queue);
                AckToken::settled(queue)
            }
            AckMode::Manual => {
                let acks = Arc::clone(&self.acks);
                let owner = queue.to_string();
                AckToken::new(
                    queue,
                    Box::new(move || {
                        *acks.lock().unwrap().entry(owner).or_insert(0) += 1;
                        Ok(())
                    }),
                )
            }
        };

        let delivery = Delivery {
            queue: queue.to_string(),
            body: body.into(),
            ack,
        };
        entry
            .sender
            .send(delivery)
            .map_err(|_| BrokerError::ConnectionClosed)
    }

    /// Number of acknowledged messages for a queue.
    pub fn acked(&self, queue: &str) -> usize {
        self.acks.lock().unwrap().get(queue).copied().unwrap_or(0)
    }

    /// Names of all queues with an active subscription, sorted.
    pub fn queues(&self) -> Vec<String> {
        let mut names: Vec<String> = self.queues.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    fn record_ack(&self, queue: &str) {
        *self
            .acks
            .lock()
            .unwrap()
            .entry(queue.to_string())
            .or_insert(0) += 1;
    }
}

#[async_trait]
impl BrokerConnection for InMemoryBroker {
    async fn subscribe(&self, queue: &str, mode: AckMode) -> Result<Subscription, BrokerError> {
        let mut queues = self.queues.lock().unwrap();
        if queues.contains_key(queue) {
            return Err(BrokerError::AlreadySubscribed(queue.to_string()));
        }
        let (sender, receiver) = mpsc::unbounded_channel();
        queues.insert(queue.to_string(), QueueEntry { sender, mode });
        debug!(queue, "in-memory subscription established");
        Ok(Subscription::new(queue, receiver))
    }
}
