use std::time::Duration;

/// Upstream API used when `F1_API_BASE_URL` is not set
pub const DEFAULT_BASE_URL: &str = "https://ergast.com/api/f1";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Service configuration, built once at start-up and handed to whoever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Build the configuration from the global command line options
    pub fn from_global(global: &crate::Global) -> Self {
        Self::new(&global.base_url, Duration::from_secs(global.timeout))
    }

    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Apply the listen address chosen for the HTTP server
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
