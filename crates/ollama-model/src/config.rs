const DEFAULT_HOST: &str = "http://localhost";
const DEFAULT_PORT: u16 = 11434;
const CHAT_PATH: &str = "/api/chat";

/// Builder for [`OllamaConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct OllamaConfigBuilder {
    host: Option<String>,
    port: Option<u16>,
}

impl OllamaConfigBuilder {
    /// Creates a builder with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host, including the scheme (e.g. `http://localhost`).
    #[inline]
    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the port.
    #[inline]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> OllamaConfig {
        let host = self.host.unwrap_or_else(|| DEFAULT_HOST.to_owned());
        OllamaConfig {
            host: host.trim_end_matches('/').to_owned(),
            port: self.port.unwrap_or(DEFAULT_PORT),
        }
    }
}

/// Configuration for the Ollama backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OllamaConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
}

impl OllamaConfig {
    /// Returns the host, without a trailing slash.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the full URL of the chat endpoint.
    #[inline]
    pub fn chat_url(&self) -> String {
        format!("{}:{}{}", self.host, self.port, CHAT_PATH)
    }
}

impl Default for OllamaConfig {
    #[inline]
    fn default() -> Self {
        OllamaConfigBuilder::new().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OllamaConfig::default();
        assert_eq!(config.host(), "http://localhost");
        assert_eq!(config.port(), 11434);
        assert_eq!(config.chat_url(), "http://localhost:11434/api/chat");
    }

    #[test]
    fn test_trailing_slash() {
        let config = OllamaConfigBuilder::new()
            .with_host("http://10.0.0.2/")
            .with_port(8080)
            .build();
        assert_eq!(config.chat_url(), "http://10.0.0.2:8080/api/chat");
    }
}
