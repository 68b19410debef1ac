//! The `handler` module defines the seam between the ingestion front-end and
//! the actual log-processing logic, which lives outside this crate.

use std::future::Future;

use async_trait::async_trait;
use tracing::info;

use crate::consumer::MessageType;
use crate::consumer::codec::Payload;

/// Error type handlers fail with.
///
/// Opaque to the consumer: any handler failure is contained at the failsafe
/// envelope and the message is still acknowledged.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Processing logic invoked once per decoded message.
///
/// Implementations may fail or block arbitrarily; containing their duration
/// and faults is the reception pipeline's responsibility, not theirs.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, kind: MessageType, payload: Payload) -> Result<(), HandlerError>;
}

/// Adapter that lets a plain async closure act as a handler.
///
/// Built with [`handler_fn`].
pub struct HandlerFn<F>(F);

/// Wraps an async closure as a [`Handler`].
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(MessageType, Payload) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send,
{
    HandlerFn(f)
}

#[async_trait]
impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(MessageType, Payload) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send,
{
    async fn handle(&self, kind: MessageType, payload: Payload) -> Result<(), HandlerError> {
        (self.0)(kind, payload).await
    }
}

/// Stand-in handler that records each payload it is given.
///
/// Keeps the binary runnable on its own; a deployment replaces it with the
/// real log-processing logic.
pub struct PayloadLogger;

#[async_trait]
impl Handler for PayloadLogger {
    async fn handle(&self, kind: MessageType, payload: Payload) -> Result<(), HandlerError> {
        info!(kind = kind.as_str(), fields = payload.len(), "payload received");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
