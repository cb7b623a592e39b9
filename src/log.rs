//! Output sink for operational messages.
//!
//! The service has exactly two voices: plain console lines and `tracing`
//! events. Which one speaks is a field on the config rather than two copies
//! of the server.

use std::fmt::Display;

/// Where startup and connection messages go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// Plain `println!`/`eprintln!` lines.
    Console,
    /// `tracing` events. Call [`LogSink::init`] once before serving.
    Structured,
}

impl LogSink {
    /// Installs the global `tracing` subscriber when the structured sink is
    /// selected. A no-op for the console sink; calling it twice is harmless.
    pub fn init(&self) {
        if let LogSink::Structured = self {
            let _ = tracing_subscriber::fmt().try_init();
        }
    }

    pub(crate) fn server_started(&self, port: u16) {
        match self {
            LogSink::Console => println!("Server running on port {}", port),
            LogSink::Structured => tracing::info!("Server running on port {}", port),
        }
    }

    pub(crate) fn connection_error(&self, err: &dyn Display) {
        match self {
            LogSink::Console => eprintln!("Connection error: {}", err),
            LogSink::Structured => tracing::warn!("connection error: {}", err),
        }
    }

    pub(crate) fn connection_refused(&self) {
        match self {
            LogSink::Console => eprintln!("Max connections reached"),
            LogSink::Structured => tracing::warn!("max connections reached, dropping connection"),
        }
    }

    pub(crate) fn handler_panic(&self, msg: &str) {
        match self {
            LogSink::Console => eprintln!("Handler panicked: {}", msg),
            LogSink::Structured => tracing::error!("handler panicked: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let sink = LogSink::Structured;
        sink.init();
        sink.init();
    }

    #[test]
    fn console_init_installs_nothing() {
        LogSink::Console.init();
    }
}
