//! The `broker` module defines the client-side boundary to the message broker.
//!
//! The worker consumes the broker exclusively through the `BrokerConnection`
//! trait: one subscription per queue, deliveries carrying opaque body bytes
//! and a one-shot acknowledgment capability. The crate ships an in-process
//! backend (`InMemoryBroker`) used by tests and local runs; a production
//! deployment plugs a real broker client in behind the same trait.

pub mod connection;
pub mod delivery;
pub mod memory;

pub use connection::{AckMode, BrokerConnection, BrokerError, Subscription};
pub use delivery::{AckError, AckToken, Delivery};
pub use memory::InMemoryBroker;

#[cfg(test)]
mod tests;
