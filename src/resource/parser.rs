//! Parser capability and the loader abstraction.
//!
//! A [`ResourceLoader`] resolves a normalized resource type tag (for example
//! `"GdImage"`) to a [`ParserFactory`]. The factory builds a fresh
//! [`ResourceParser`] for every conversion step.

use std::sync::Arc;

use super::handle::{Payload, Resource};
use crate::error::BoxError;

/// Converts one resource into a value or into another resource.
pub trait ResourceParser: Send {
    /// Consume `resource` and produce the next payload in the chain.
    fn parse(&self, resource: Resource) -> Result<Payload, BoxError>;
}

impl<F> ResourceParser for F
where
    F: Fn(Resource) -> Result<Payload, BoxError> + Send,
{
    fn parse(&self, resource: Resource) -> Result<Payload, BoxError> {
        self(resource)
    }
}

/// Builds a parser for one conversion step.
pub type ParserFactory =
    Arc<dyn Fn() -> Result<Box<dyn ResourceParser>, BoxError> + Send + Sync + 'static>;

/// Resolves normalized resource type tags to parser factories.
pub trait ResourceLoader: Send + Sync + 'static {
    /// Factory for resources tagged `tag`.
    ///
    /// `Ok(None)` means the loader has no entry for `tag`. An error means
    /// the lookup itself failed; the converter reclassifies it like a
    /// parser error.
    fn load(&self, tag: &str) -> Result<Option<ParserFactory>, BoxError>;
}
