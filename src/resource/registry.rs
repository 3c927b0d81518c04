//! Parser registry for dispatching resources by type tag.
//!
//! The registry maps normalized resource type tags to parser factories and
//! is the stock [`ResourceLoader`]. Tags are normalized on the way in, so
//! registering `"gd image"` or `"GdImage"` lands on the same entry.
//!
//! # Example
//!
//! ```
//! use amf_typeloader::resource::{ParserRegistry, Payload, Resource, ResourceLoader, Value};
//!
//! let mut registry = ParserRegistry::new();
//! registry.register_fn("stream", |res: Resource| {
//!     let text = res.into_inner::<String>().unwrap_or_default();
//!     Ok(Payload::Value(Value::from(text)))
//! });
//!
//! assert!(registry.load("Stream").unwrap().is_some());
//! assert!(registry.load("GdImage").unwrap().is_none());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::converter::normalize_resource_type;
use super::handle::{Payload, Resource};
use super::parser::{ParserFactory, ResourceLoader, ResourceParser};
use crate::error::BoxError;

/// Registry mapping normalized resource type tags to parser factories.
pub struct ParserRegistry {
    /// Factories by normalized tag.
    factories: HashMap<String, ParserFactory>,
}

impl ParserRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a parser factory for `tag`.
    ///
    /// The factory runs once per conversion step and may fail; its error is
    /// reclassified like any parser error. Registering a tag twice replaces
    /// the earlier factory.
    pub fn register<F>(&mut self, tag: &str, factory: F)
    where
        F: Fn() -> Result<Box<dyn ResourceParser>, BoxError> + Send + Sync + 'static,
    {
        let tag = normalize_resource_type(tag);
        if self.factories.insert(tag.clone(), Arc::new(factory)).is_some() {
            tracing::debug!("Replaced resource parser for {:?}", tag);
        }
    }

    /// Register a parser type built with `Default` for `tag`.
    pub fn register_parser<P>(&mut self, tag: &str)
    where
        P: ResourceParser + Default + 'static,
    {
        self.register(tag, || Ok(Box::new(P::default()) as Box<dyn ResourceParser>));
    }

    /// Register a parse function for `tag`.
    pub fn register_fn<F>(&mut self, tag: &str, parse: F)
    where
        F: Fn(Resource) -> Result<Payload, BoxError> + Clone + Send + Sync + 'static,
    {
        self.register(tag, move || {
            Ok(Box::new(parse.clone()) as Box<dyn ResourceParser>)
        });
    }

    /// Get a factory by tag (normalized before lookup).
    pub fn get(&self, tag: &str) -> Option<&ParserFactory> {
        self.factories.get(&normalize_resource_type(tag))
    }

    /// Check if a factory is registered for `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    /// Registered normalized tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLoader for ParserRegistry {
    fn load(&self, tag: &str) -> Result<Option<ParserFactory>, BoxError> {
        Ok(self.factories.get(tag).cloned())
    }
}
