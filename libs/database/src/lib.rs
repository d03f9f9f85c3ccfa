//! MongoDB connection management for the events API.
//!
//! The connection handle is opened once at startup and injected into
//! repositories; nothing in this crate holds global state.
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "events");
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;
pub mod mongodb;

pub use common::{RetryConfig, retry, retry_with_backoff};
pub use mongodb::{MongoConfig, MongoError};
