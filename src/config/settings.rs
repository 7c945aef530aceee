use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the web front, the datagram store server and the
/// document store both of them end up talking to.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub http: HttpSettings,
    pub udp: UdpSettings,
    pub store: StoreSettings,
    pub log: LogSettings,
}

/// Configuration settings for the HTTP web front.
///
/// `root` is the directory static files are served from; the three page
/// names are resolved relative to it.
#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    pub host: String,
    pub port: u16,
    pub root: String,
    pub index_page: String,
    pub message_page: String,
    pub error_page: String,
}

/// Configuration settings for the datagram channel.
///
/// Shared by the store server (which binds `host:port`) and the relay
/// (which sends to it).
#[derive(Debug, Deserialize, Clone)]
pub struct UdpSettings {
    pub host: String,
    pub port: u16,
    pub buffer_size: usize,
    pub reply_timeout_ms: u64,
    pub echo_on_failure: bool,
}

/// Configuration settings for the document store.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub path: String,
    pub collection: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub http: Option<PartialHttpSettings>,
    pub udp: Option<PartialUdpSettings>,
    pub store: Option<PartialStoreSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialHttpSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root: Option<String>,
    pub index_page: Option<String>,
    pub message_page: Option<String>,
    pub error_page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialUdpSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub buffer_size: Option<usize>,
    pub reply_timeout_ms: Option<u64>,
    pub echo_on_failure: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PartialStoreSettings {
    pub path: Option<String>,
    pub collection: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            root: "static".to_string(),
            index_page: "index.html".to_string(),
            message_page: "message.html".to_string(),
            error_page: "error.html".to_string(),
        }
    }
}

impl Default for UdpSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            buffer_size: 1024,
            reply_timeout_ms: 5000,
            echo_on_failure: true,
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: "socket_db".to_string(),
            collection: "messages".to_string(),
        }
    }
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            http: HttpSettings::default(),
            udp: UdpSettings::default(),
            store: StoreSettings::default(),
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl UdpSettings {
    /// `host:port` of the store server.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl HttpSettings {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
