//! # logpump
//!
//! `logpump` is the ingestion front-end of a log-processing worker. It
//! subscribes to a routing queue and a set of shard queues on a message
//! broker, decodes incoming JSON payloads, and dispatches each one to a
//! processing handler under a hard deadline, acknowledging every message
//! exactly once no matter how handling went.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `broker`: the client-side boundary to the message broker, plus an
//!   in-process backend used by tests and local runs.
//! - `consumer`: the reception pipeline (payload codec, timeout guard,
//!   failsafe acknowledgment envelope, and queue subscription management).
//! - `handler`: the seam to the actual log-processing logic.
//! - `config`: handles loading and defaulting of worker configuration.

pub mod broker;
pub mod config;
pub mod consumer;
pub mod handler;
