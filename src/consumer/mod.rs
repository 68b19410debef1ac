//! The `consumer` module implements the message reception and dispatch
//! pipeline: queue subscription topology, payload decoding with failure
//! isolation, timeout-bounded handler invocation, and the failsafe envelope
//! that guarantees exactly one acknowledgment per received message.

pub mod codec;
pub mod pipeline;
pub mod subscriptions;
pub mod timeout;

pub use codec::{Payload, correlation_id, decode};
pub use pipeline::{Outcome, receive};
pub use subscriptions::{Consumer, MessageType, ROUTING_QUEUE, shard_queue};
pub use timeout::{Bounded, run_bounded};
