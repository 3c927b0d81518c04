//! Resource conversion pipeline.
//!
//! [`ResourceConverter`] owns the loader binding and drains resources into
//! values:
//!
//! ```text
//! Resource ─► normalize tag ─► loader.load(tag) ─► factory() ─► parse()
//!    ▲                                                           │
//!    └──────────────── another Resource ◄────────────────────────┤
//!                                                                ▼
//!                                                              Value
//! ```
//!
//! # Chain depth
//!
//! Parsers may hand back further resources indefinitely. The converter stops
//! after `max_chain_depth` steps (default [`DEFAULT_MAX_CHAIN_DEPTH`]) with a
//! conversion error. `None` removes the bound and loops for as long as
//! parsers keep producing resources.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use amf_typeloader::resource::{ParserRegistry, Payload, Resource, ResourceConverter, Value};
//!
//! let mut parsers = ParserRegistry::new();
//! parsers.register_fn("stream", |res: Resource| {
//!     let text = res.into_inner::<String>().unwrap_or_default();
//!     Ok(Payload::Value(Value::from(text)))
//! });
//!
//! let converter = ResourceConverter::new();
//! converter.set_resource_loader(Arc::new(parsers));
//!
//! let value = converter
//!     .handle_resource(Resource::new("stream", "hello".to_string()))
//!     .unwrap();
//! assert_eq!(value, Value::from("hello"));
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use super::handle::{Payload, Resource, Value};
use super::parser::{ParserFactory, ResourceLoader};
use crate::error::{BoxError, Result, TypeLoaderError};

/// Default maximum number of conversion steps per resource.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 64;

/// Normalize a runtime resource type into a loader tag.
///
/// Every character outside `[A-Za-z0-9_]` separates words; each word gets
/// its first letter upper-cased and the words are joined without separator.
///
/// ```
/// use amf_typeloader::resource::normalize_resource_type;
///
/// assert_eq!(normalize_resource_type("stream"), "Stream");
/// assert_eq!(normalize_resource_type("gd image"), "GdImage");
/// assert_eq!(normalize_resource_type("foo-bar!!baz"), "FooBarBaz");
/// ```
pub fn normalize_resource_type(kind: &str) -> String {
    kind.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Converts resource handles into serializable values.
///
/// The loader binding sits behind a read/write lock, so one converter can be
/// shared by concurrent encoders. `handle_resource` takes a snapshot of the
/// binding and runs the chain without holding the lock.
pub struct ResourceConverter {
    /// Bound loader, if any.
    loader: RwLock<Option<Arc<dyn ResourceLoader>>>,
    /// Maximum conversion steps, `None` for unbounded.
    max_chain_depth: Option<usize>,
}

impl ResourceConverter {
    /// Create a converter with no loader and the default chain bound.
    pub fn new() -> Self {
        Self::with_max_chain_depth(Some(DEFAULT_MAX_CHAIN_DEPTH))
    }

    /// Create a converter with a custom chain bound (`None` = unbounded).
    pub fn with_max_chain_depth(max_chain_depth: Option<usize>) -> Self {
        Self {
            loader: RwLock::new(None),
            max_chain_depth,
        }
    }

    /// Configured chain bound.
    #[inline]
    pub fn max_chain_depth(&self) -> Option<usize> {
        self.max_chain_depth
    }

    /// Currently bound loader.
    pub fn resource_loader(&self) -> Option<Arc<dyn ResourceLoader>> {
        self.loader.read().clone()
    }

    /// Bind `loader`, replacing any previous binding.
    pub fn set_resource_loader(&self, loader: Arc<dyn ResourceLoader>) {
        tracing::debug!("Resource loader bound");
        *self.loader.write() = Some(loader);
    }

    /// Remove the loader binding.
    pub fn clear_resource_loader(&self) {
        tracing::debug!("Resource loader cleared");
        *self.loader.write() = None;
    }

    /// Factory for `resource`'s normalized type tag.
    ///
    /// Returns `Ok(None)` if no loader is bound or the loader has no entry.
    ///
    /// # Errors
    ///
    /// A failing loader lookup is reclassified, see
    /// [`TypeLoaderError::reclassify`].
    pub fn resource_parser(&self, resource: &Resource) -> Result<Option<ParserFactory>> {
        match self.resource_loader() {
            Some(loader) => parser_for(loader.as_ref(), resource)
                .map_err(|e| reclassify(e, resource.kind())),
            None => Ok(None),
        }
    }

    /// Drain `input` into a serializable value.
    ///
    /// A plain [`Value`] comes back unchanged without consulting the loader,
    /// but a loader must still be bound.
    ///
    /// # Errors
    ///
    /// - configuration error if no loader is bound
    /// - conversion error if a resource type has no parser, or the chain
    ///   exceeds the depth bound
    /// - loader, factory and parser errors are reclassified, see
    ///   [`TypeLoaderError::reclassify`]
    pub fn handle_resource(&self, input: impl Into<Payload>) -> Result<Value> {
        let loader = self
            .resource_loader()
            .ok_or_else(TypeLoaderError::loader_not_set)?;

        let mut current = input.into();
        let mut depth = 0usize;

        loop {
            let resource = match current {
                Payload::Value(value) => return Ok(value),
                Payload::Resource(resource) => resource,
            };

            if let Some(max) = self.max_chain_depth {
                if depth >= max {
                    tracing::warn!(
                        "Resource chain exceeded {} steps at type {:?}",
                        max,
                        resource.kind()
                    );
                    return Err(TypeLoaderError::conversion(
                        resource.kind(),
                        format!(
                            "Resource chain for type {} exceeded {} steps",
                            resource.kind(),
                            max
                        ),
                    ));
                }
            }
            depth += 1;

            let kind = resource.kind().to_string();
            let factory = parser_for(loader.as_ref(), &resource)
                .map_err(|e| reclassify(e, &kind))?
                .ok_or_else(|| TypeLoaderError::unsupported_resource(&kind))?;

            let parser = factory().map_err(|e| reclassify(e, &kind))?;
            current = parser.parse(resource).map_err(|e| reclassify(e, &kind))?;
        }
    }
}

impl Default for ResourceConverter {
    fn default() -> Self {
        Self::new()
    }
}

fn parser_for(
    loader: &dyn ResourceLoader,
    resource: &Resource,
) -> std::result::Result<Option<ParserFactory>, BoxError> {
    let tag = normalize_resource_type(resource.kind());
    tracing::trace!("Resolving parser for {:?} as {:?}", resource.kind(), tag);
    loader.load(&tag)
}

fn reclassify(err: BoxError, kind: &str) -> TypeLoaderError {
    tracing::warn!("Resource type {:?} failed to convert: {}", kind, err);
    TypeLoaderError::reclassify(err, kind)
}
