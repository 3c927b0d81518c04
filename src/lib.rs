//! # amf-typeloader
//!
//! Type resolution and resource conversion for AMF (Flex remoting)
//! serializers.
//!
//! This crate sits between an AMF decoder/encoder and the host type system:
//!
//! - **Type mapping**: wire-level class names such as
//!   `flex.messaging.messages.RemotingMessage` resolve to native type
//!   identifiers and back through one bidirectional table
//!   ([`mapping::TypeMapRegistry`]).
//! - **Resource conversion**: opaque runtime handles (files, streams,
//!   connections) are drained into serializable [`resource::Value`]s by
//!   chaining pluggable parsers ([`resource::ResourceConverter`]).
//!
//! Both live in a [`TypeLoader`], a cloneable shared context handed to
//! encoders and decoders.
//!
//! ## Example
//!
//! ```
//! use amf_typeloader::resource::{ParserRegistry, Payload, Resource, Value};
//! use amf_typeloader::TypeLoader;
//!
//! let mut parsers = ParserRegistry::new();
//! parsers.register_fn("stream", |res: Resource| {
//!     let data = res.into_inner::<Vec<u8>>().unwrap_or_default();
//!     Ok(Payload::Value(Value::from(data)))
//! });
//!
//! let loader = TypeLoader::builder().resource_loader(parsers).build();
//!
//! // Decoder side: wire name -> constructible type.
//! assert_eq!(
//!     loader.load_type("flex.messaging.messages.RemotingMessage"),
//!     "value::messaging::RemotingMessage"
//! );
//! assert_eq!(loader.load_type("com.example.Unknown"), "value::Object");
//!
//! // Encoder side: resource -> plain value.
//! let value = loader
//!     .handle_resource(Resource::new("stream", b"raw".to_vec()))
//!     .unwrap();
//! assert_eq!(value.as_bytes(), Some(&b"raw"[..]));
//! ```

pub mod error;
pub mod mapping;
pub mod resource;

mod config;
mod loader;

pub use config::LoaderConfig;
pub use error::{ErrorKind, TypeLoaderError};
pub use loader::{TypeLoader, TypeLoaderBuilder};
