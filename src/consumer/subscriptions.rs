use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::broker::{AckMode, BrokerConnection, BrokerError, Subscription};
use crate::config::ConsumerSettings;
use crate::consumer::pipeline;
use crate::handler::Handler;

/// Name of the unsharded routing queue.
pub const ROUTING_QUEUE: &str = "logs";

/// Name of the shard queue with the given index.
pub fn shard_queue(index: u32) -> String {
    format!("{ROUTING_QUEUE}.{index}")
}

/// Tag identifying which subscription produced a message, and therefore which
/// semantics the handler should apply.
///
/// Fixed when the subscription is registered, never inferred from payload
/// content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Delivered via the unsharded routing queue.
    Route,
    /// Delivered via one of the shard queues.
    Log,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Route => "route",
            MessageType::Log => "log",
        }
    }
}

/// Subscribes the worker's queues and runs one listener task per queue.
pub struct Consumer {
    handler: Arc<dyn Handler>,
    shard_count: u32,
    handler_timeout: Duration,
}

impl Consumer {
    pub fn new(handler: Arc<dyn Handler>, settings: &ConsumerSettings) -> Self {
        Self {
            handler,
            shard_count: settings.shard_count,
            handler_timeout: settings.handler_timeout(),
        }
    }

    /// Establishes every subscription: the routing queue tagged `route`, then
    /// one `log`-tagged subscription per shard index. All use manual
    /// acknowledgment.
    ///
    /// Any subscription failure aborts the whole set and propagates: the
    /// worker must not run partially subscribed, so this error is
    /// startup-fatal.
    pub async fn subscribe_all(
        &self,
        broker: Arc<dyn BrokerConnection>,
    ) -> Result<Vec<JoinHandle<()>>, BrokerError> {
        let mut listeners = Vec::with_capacity(self.shard_count as usize + 1);

        info!(queue = ROUTING_QUEUE, "subscribing");
        let subscription = broker.subscribe(ROUTING_QUEUE, AckMode::Manual).await?;
        listeners.push(self.spawn_listener(MessageType::Route, subscription));

        for shard in 0..self.shard_count {
            let queue = shard_queue(shard);
            info!(queue = %queue, "subscribing");
            let subscription = broker.subscribe(&queue, AckMode::Manual).await?;
            listeners.push(self.spawn_listener(MessageType::Log, subscription));
        }

        Ok(listeners)
    }

    /// One listener drains one queue sequentially: at most one in-flight
    /// `receive` per queue, full parallelism across queues.
    fn spawn_listener(&self, kind: MessageType, mut subscription: Subscription) -> JoinHandle<()> {
        let handler = Arc::clone(&self.handler);
        let deadline = self.handler_timeout;
        tokio::spawn(async move {
            while let Some(delivery) = subscription.recv().await {
                pipeline::receive(kind, delivery, Arc::clone(&handler), deadline).await;
            }
            info!(queue = subscription.queue(), "subscription closed");
        })
    }
}
