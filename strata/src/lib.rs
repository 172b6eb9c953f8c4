//! Layered, priority-ordered configuration.
//!
//! Values live in nested maps at numbered [`ConfigLevel`]s. A lookup walks
//! the levels from highest to lowest priority and returns the first value
//! found, so an override beats a flag, a flag beats the environment, and so
//! on down to compiled-in defaults. Levels may carry a [`resolver::Resolver`]
//! that consults an external source such as the process environment or the
//! command line instead of the level's own map.
//!
//! Stores share the [`ConfigStore`] contract. [`LayeredStore`] is the base;
//! [`SharedStore`], [`LoggingStore`], and [`SubscriptionStore`] wrap any
//! store to add locking, activity logging, and change events. [`Registry`]
//! combines a store with file loaders and typed decoding:
//!
//! ```
//! use strata::{ConfigLevel, Decode, Registry};
//!
//! #[derive(Default, Decode)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     #[strata(rename = "allowed-origins")]
//!     origins: Vec<String>,
//! }
//!
//! let mut registry = Registry::new();
//! registry.set_default("host", "127.0.0.1")?;
//! registry.set_default("port", 80)?;
//! registry.set_level(ConfigLevel::FLAG, "port", "8080")?;
//! registry.merge_serialized(
//!     ConfigLevel::FILE,
//!     &serde_json::json!({"allowed-origins": ["https://example.org"]}),
//! )?;
//!
//! let mut server = Server::default();
//! registry.decode(&mut server)?;
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.origins, ["https://example.org"]);
//! # Ok::<(), std::sync::Arc<strata::StrataError>>(())
//! ```

extern crate self as strata;

use std::sync::Arc;

pub use strata_macros::Decode;

pub mod decode;
mod error;
pub mod file;
mod global;
mod heap;
mod level;
pub mod nested;
mod registry;
pub mod resolver;
mod result_ext;
pub mod store;

pub use decode::{Decode, Decoder, Record, decode};
pub use error::{CoerceError, StrataError};
pub use global::{decode_global, global};
pub use heap::LevelHeap;
pub use level::ConfigLevel;
pub use nested::ConfigMap;
pub use registry::Registry;
pub use result_ext::StrataResultExt;
pub use serde_json::Value;
pub use store::{
    ConfigStore, Event, LayeredStore, LoggingStore, SharedStore, StoreLogger, Subscription,
    SubscriptionStore, TracingLogger,
};

/// Result type used by fallible operations in this crate.
pub type StrataResult<T> = Result<T, Arc<StrataError>>;
