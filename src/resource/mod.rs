//! Resource module - converting runtime handles into serializable values.
//!
//! Provides:
//! - [`Resource`], [`Value`], [`Payload`] - the data flowing through a conversion
//! - [`ResourceParser`] / [`ResourceLoader`] - the pluggable capabilities
//! - [`ParserRegistry`] - maps normalized type tags to parser factories
//! - [`ResourceConverter`] - owns the loader binding and runs the chain
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use amf_typeloader::resource::{ParserRegistry, Payload, Resource, ResourceConverter, Value};
//!
//! let mut parsers = ParserRegistry::new();
//! // An open file converts to a stream, a stream converts to its bytes.
//! parsers.register_fn("file", |res: Resource| {
//!     let path = res.into_inner::<String>().unwrap_or_default();
//!     Ok(Payload::Resource(Resource::new("stream", path.into_bytes())))
//! });
//! parsers.register_fn("stream", |res: Resource| {
//!     let data = res.into_inner::<Vec<u8>>().unwrap_or_default();
//!     Ok(Payload::Value(Value::from(data)))
//! });
//!
//! let converter = ResourceConverter::new();
//! converter.set_resource_loader(Arc::new(parsers));
//!
//! let value = converter
//!     .handle_resource(Resource::new("file", "abc".to_string()))
//!     .unwrap();
//! assert_eq!(value.as_bytes(), Some(&b"abc"[..]));
//! ```

mod converter;
mod handle;
mod parser;
mod registry;

pub use converter::{normalize_resource_type, ResourceConverter, DEFAULT_MAX_CHAIN_DEPTH};
pub use handle::{Payload, Resource, Value};
pub use parser::{ParserFactory, ResourceLoader, ResourceParser};
pub use registry::ParserRegistry;
