//! # Greeterd
//!
//! A single-route HTTP service that answers every request with a fixed
//! plaintext greeting. It exists to smoke-test CI/CD pipelines: deploy it,
//! curl it, and a `200 OK` with the expected body proves the pipeline can
//! serve traffic.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use greeterd::config::GreeterConfig;
//! use greeterd::greeting::greet;
//! use greeterd::server::Server;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GreeterConfig::default();
//!     config.sink.init();
//!     Server::new(config, greet).run()?;
//!     Ok(())
//! }
//! ```
//!
//! There is deliberately no routing, no shutdown path, and no configuration
//! surface; the port is fixed at 8080 and the process runs until killed.

pub mod config;
pub mod error;
pub mod greeting;
pub mod handler;
pub mod http;
pub mod log;
pub mod server;
