use crate::log::LogSink;
use std::time::Duration;

/// Port the service listens on unless configured otherwise in code.
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime settings for the greeter.
///
/// The defaults reproduce the fixed behavior the service ships with. Nothing
/// here is read from CLI flags, environment variables, or files; callers that
/// want different values construct the struct themselves.
#[derive(Debug, Clone)]
pub struct GreeterConfig {
    pub port: u16,
    pub max_connections: usize,
    pub keep_alive: Duration,
    pub sink: LogSink,
}

impl Default for GreeterConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_connections: 256,
            keep_alive: Duration::from_secs(5),
            sink: LogSink::Console,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_behavior() {
        let config = GreeterConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 256);
        assert_eq!(config.keep_alive, Duration::from_secs(5));
        assert_eq!(config.sink, LogSink::Console);
    }
}
