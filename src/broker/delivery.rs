use std::fmt;

use thiserror::Error;

/// Error returned when a delivery could not be acknowledged, typically because
/// the broker connection is gone.
///
/// Acknowledgment failure is not retried; the reception pipeline reports it on
/// the last-resort channel and moves on.
#[derive(Debug, Error)]
#[error("failed to acknowledge message from queue '{queue}'")]
pub struct AckError {
    pub queue: String,
}

type Settle = Box<dyn FnOnce() -> Result<(), AckError> + Send>;

/// One-shot acknowledgment capability attached to a delivery.
///
/// `ack` consumes the token, so a message can never be acknowledged twice.
/// Making sure it is acknowledged exactly once, on every exit path, is the
/// reception pipeline's job.
pub struct AckToken {
    queue: String,
    settle: Option<Settle>,
}

impl AckToken {
    pub(crate) fn new(queue: impl Into<String>, settle: Settle) -> Self {
        Self {
            queue: queue.into(),
            settle: Some(settle),
        }
    }

    /// Token for a delivery the broker already considers consumed (auto-ack
    /// subscriptions). Calling `ack` on it succeeds without doing anything.
    pub(crate) fn settled(queue: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            settle: None,
        }
    }

    /// Marks the message as consumed on the broker.
    pub fn ack(self) -> Result<(), AckError> {
        match self.settle {
            Some(settle) => settle(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for AckToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AckToken")
            .field("queue", &self.queue)
            .field("settled", &self.settle.is_none())
            .finish()
    }
}

/// A raw message handed to the consumer by the broker client.
///
/// Carries the opaque body bytes and the acknowledgment capability. The body
/// is not interpreted here; decoding belongs to the consumer's codec.
#[derive(Debug)]
pub struct Delivery {
    pub queue: String,
    pub body: Vec<u8>,
    pub ack: AckToken,
}
