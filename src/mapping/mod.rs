//! Mapping module - wire type names to native type identifiers.
//!
//! Provides:
//! - [`TypeMapping`] - ordered wire name -> native identifier table
//! - [`TypeMapRegistry`] - live table with bidirectional lookup, reset and
//!   the `load_type` fallback chain
//! - the default Flex messaging table and naming constants
//!
//! # Example
//!
//! ```
//! use amf_typeloader::mapping::TypeMapRegistry;
//!
//! let registry = TypeMapRegistry::new();
//! assert_eq!(
//!     registry.mapped_class_name("flex.messaging.messages.CommandMessage"),
//!     Some("value::messaging::CommandMessage")
//! );
//! ```

mod defaults;
mod registry;
mod table;

pub use defaults::{
    transliterate, DEFAULT_CLASS_MAP, NATIVE_SEPARATOR, PLACEHOLDER_TYPE, WIRE_SEPARATOR,
};
pub use registry::TypeMapRegistry;
pub use table::{MappingEntry, TypeMapping};
