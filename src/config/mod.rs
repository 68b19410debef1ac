mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{BrokerSettings, ConsumerSettings, Settings};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the broker and consumer configurations
///
/// Environment variables use `__` to separate nesting levels, so that keys
/// which themselves contain underscores stay addressable: `BROKER__HOST`,
/// `CONSUMER__SHARD_COUNT`, `CONSUMER__HANDLER_TIMEOUT_SECS`.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("__"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        broker: BrokerSettings {
            host: partial
                .broker
                .as_ref()
                .and_then(|b| b.host.clone())
                .unwrap_or(default.broker.host),
            port: partial
                .broker
                .as_ref()
                .and_then(|b| b.port)
                .unwrap_or(default.broker.port),
        },
        consumer: ConsumerSettings {
            shard_count: partial
                .consumer
                .as_ref()
                .and_then(|c| c.shard_count)
                .unwrap_or(default.consumer.shard_count),
            handler_timeout_secs: partial
                .consumer
                .as_ref()
                .and_then(|c| c.handler_timeout_secs)
                .unwrap_or(default.consumer.handler_timeout_secs),
        },
    })
}
