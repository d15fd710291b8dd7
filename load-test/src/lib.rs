//! # Shop load test
//! goose scenarios that put load on the e-commerce services behind the api gateway:
//! a catalog browser, a full shopper (register, cart, order) and a smoke test.
//!
//! The binary in `main.rs` registers all of them; goose's command line picks host, users,
//! hatch rate, run time and report file.
pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod ids;
pub mod payload;
pub mod report;
pub mod scenarios;
pub mod session;


pub use config::LoadTestConfig;
pub use error::{ConfigError, LoadTestError, PayloadError};
pub use ids::EntityId;
