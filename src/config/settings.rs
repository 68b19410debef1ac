use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration settings for the worker.
///
/// Includes settings for the broker connection and for the consumer itself.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub broker: BrokerSettings,
    pub consumer: ConsumerSettings,
}

/// Configuration settings for the broker connection.
///
/// Defines the endpoint the worker's broker client connects to.
#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    pub host: String,
    pub port: u16,
}

/// Configuration settings for the consumer.
///
/// Controls the queue sharding topology and the per-message handler deadline.
#[derive(Debug, Deserialize, Clone)]
pub struct ConsumerSettings {
    pub shard_count: u32,
    pub handler_timeout_secs: u64,
}

impl ConsumerSettings {
    /// The hard wall-clock deadline applied to each handler invocation.
    pub fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.handler_timeout_secs)
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub broker: Option<PartialBrokerSettings>,
    pub consumer: Option<PartialConsumerSettings>,
}

/// Partial broker settings.
///
/// Used when loading broker configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialBrokerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Partial consumer settings.
///
/// Used for consumer configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialConsumerSettings {
    pub shard_count: Option<u32>,
    pub handler_timeout_secs: Option<u64>,
}

/// Provides default values for `Settings`.
///
/// Ensures the worker has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            broker: BrokerSettings {
                host: "127.0.0.1".to_string(),
                port: 5672,
            },
            consumer: ConsumerSettings {
                shard_count: 1,
                handler_timeout_secs: 60,
            },
        }
    }
}
