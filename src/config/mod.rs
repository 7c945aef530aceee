//! Configuration loading.
//!
//! Settings are layered: built-in defaults, then an optional
//! `config/default.toml`, then `FORMRELAY_`-prefixed environment variables
//! (`FORMRELAY_HTTP__PORT=8080` sets `http.port`).

mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{HttpSettings, LogSettings, Settings, StoreSettings, UdpSettings};


/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the http, udp, store and log configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config/default")
}

/// Same as [`load_config`] but reads the file layer from `file` (extension
/// optional) instead of `config/default`.
pub fn load_config_from(file: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix("FORMRELAY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();
    let http = partial.http;
    let udp = partial.udp;
    let store = partial.store;

    Ok(Settings {
        http: HttpSettings {
            host: http
                .as_ref()
                .and_then(|h| h.host.clone())
                .unwrap_or(default.http.host),
            port: http
                .as_ref()
                .and_then(|h| h.port)
                .unwrap_or(default.http.port),
            root: http
                .as_ref()
                .and_then(|h| h.root.clone())
                .unwrap_or(default.http.root),
            index_page: http
                .as_ref()
                .and_then(|h| h.index_page.clone())
                .unwrap_or(default.http.index_page),
            message_page: http
                .as_ref()
                .and_then(|h| h.message_page.clone())
                .unwrap_or(default.http.message_page),
            error_page: http
                .as_ref()
                .and_then(|h| h.error_page.clone())
                .unwrap_or(default.http.error_page),
        },
        udp: UdpSettings {
            host: udp
                .as_ref()
                .and_then(|u| u.host.clone())
                .unwrap_or(default.udp.host),
            port: udp
                .as_ref()
                .and_then(|u| u.port)
                .unwrap_or(default.udp.port),
            buffer_size: udp
                .as_ref()
                .and_then(|u| u.buffer_size)
                .unwrap_or(default.udp.buffer_size),
            reply_timeout_ms: udp
                .as_ref()
                .and_then(|u| u.reply_timeout_ms)
                .unwrap_or(default.udp.reply_timeout_ms),
            echo_on_failure: udp
                .as_ref()
                .and_then(|u| u.echo_on_failure)
                .unwrap_or(default.udp.echo_on_failure),
        },
        store: StoreSettings {
            path: store
                .as_ref()
                .and_then(|s| s.path.clone())
                .unwrap_or(default.store.path),
            collection: store
                .as_ref()
                .and_then(|s| s.collection.clone())
                .unwrap_or(default.store.collection),
        },
        log: LogSettings {
            level: partial
                .log
                .and_then(|l| l.level)
                .unwrap_or(default.log.level),
        },
    })
}
