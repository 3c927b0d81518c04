//! Shared type loader context and its builder.
//!
//! [`TypeLoader`] bundles a [`TypeMapRegistry`] and a [`ResourceConverter`]
//! into one cheaply cloneable handle that decoders and encoders receive
//! instead of reaching for global state. Locking policy:
//!
//! - type map: read lock for `load_type` / `mapped_class_name`, write lock
//!   for `set_mapping` / `reset_map` / `register_type` / `set_defaults`
//! - loader binding: read lock for lookups and at the start of
//!   `handle_resource`, write lock for `set_resource_loader`
//!
//! # Example
//!
//! ```
//! use amf_typeloader::resource::{ParserRegistry, Payload, Resource, Value};
//! use amf_typeloader::TypeLoader;
//!
//! let mut parsers = ParserRegistry::new();
//! parsers.register_fn("stream", |res: Resource| {
//!     let text = res.into_inner::<String>().unwrap_or_default();
//!     Ok(Payload::Value(Value::from(text)))
//! });
//!
//! let loader = TypeLoader::builder()
//!     .mapping("com.example.User", "app::User")
//!     .known_type("app::User")
//!     .resource_loader(parsers)
//!     .build();
//!
//! assert_eq!(loader.load_type("com.example.User"), "app::User");
//! assert_eq!(
//!     loader.handle_resource(Resource::new("stream", "hi".to_string())).unwrap(),
//!     Value::from("hi")
//! );
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::LoaderConfig;
use crate::error::Result;
use crate::mapping::{TypeMapRegistry, TypeMapping};
use crate::resource::{ParserFactory, Payload, Resource, ResourceConverter, ResourceLoader, Value};

/// Builder for configuring and creating a [`TypeLoader`].
pub struct TypeLoaderBuilder {
    config: LoaderConfig,
    resource_loader: Option<Arc<dyn ResourceLoader>>,
}

impl TypeLoaderBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::from_config(LoaderConfig::default())
    }

    /// Create a builder starting from `config`.
    pub fn from_config(config: LoaderConfig) -> Self {
        Self {
            config,
            resource_loader: None,
        }
    }

    /// Add `wire -> native` to the default table.
    ///
    /// Unlike [`TypeLoader::set_mapping`], the entry survives `reset_map`.
    pub fn mapping(mut self, wire: &str, native: &str) -> Self {
        self.config.mappings.insert(wire, native);
        self
    }

    /// Replace the whole default table.
    pub fn mappings(mut self, mappings: TypeMapping) -> Self {
        self.config.mappings = mappings;
        self
    }

    /// Declare a native identifier as constructible by the host.
    pub fn known_type(mut self, native: &str) -> Self {
        self.config.known_types.push(native.to_string());
        self
    }

    /// Set the placeholder returned for unresolvable types.
    ///
    /// Default: `value::Object`
    pub fn placeholder_type(mut self, native: &str) -> Self {
        self.config.placeholder_type = native.to_string();
        self
    }

    /// Set the maximum resource conversion steps.
    ///
    /// Default: 64
    pub fn max_chain_depth(mut self, depth: usize) -> Self {
        self.config.max_chain_depth = Some(depth);
        self
    }

    /// Let resource chains run without a step bound.
    pub fn unbounded_chain(mut self) -> Self {
        self.config.max_chain_depth = None;
        self
    }

    /// Bind a resource loader.
    pub fn resource_loader<L: ResourceLoader>(mut self, loader: L) -> Self {
        self.resource_loader = Some(Arc::new(loader));
        self
    }

    /// Build the loader.
    pub fn build(self) -> TypeLoader {
        let LoaderConfig {
            mappings,
            known_types,
            placeholder_type,
            max_chain_depth,
        } = self.config;

        let mut types = TypeMapRegistry::with_defaults(mappings);
        for native in known_types {
            types.register_type(native);
        }
        types.set_placeholder(placeholder_type);

        let resources = ResourceConverter::with_max_chain_depth(max_chain_depth);
        if let Some(loader) = self.resource_loader {
            resources.set_resource_loader(loader);
        }

        TypeLoader {
            inner: Arc::new(Inner {
                types: RwLock::new(types),
                resources,
            }),
        }
    }
}

impl Default for TypeLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct Inner {
    types: RwLock<TypeMapRegistry>,
    resources: ResourceConverter,
}

/// Shared type mapping and resource conversion context.
///
/// `TypeLoader` is `Clone` (an `Arc` inside) and `Send + Sync`; clones see
/// the same mappings and loader binding.
#[derive(Clone)]
pub struct TypeLoader {
    inner: Arc<Inner>,
}

impl TypeLoader {
    /// Create a new loader builder.
    pub fn builder() -> TypeLoaderBuilder {
        TypeLoaderBuilder::new()
    }

    /// Create a loader with the default configuration and no resource loader.
    pub fn new() -> Self {
        TypeLoaderBuilder::new().build()
    }

    /// Create a loader from a configuration.
    pub fn from_config(config: LoaderConfig) -> Self {
        TypeLoaderBuilder::from_config(config).build()
    }

    /// See [`TypeMapRegistry::load_type`].
    pub fn load_type(&self, name: &str) -> String {
        self.inner.types.read().load_type(name)
    }

    /// See [`TypeMapRegistry::mapped_class_name`].
    pub fn mapped_class_name(&self, name: &str) -> Option<String> {
        self.inner
            .types
            .read()
            .mapped_class_name(name)
            .map(str::to_string)
    }

    /// See [`TypeMapRegistry::set_mapping`].
    pub fn set_mapping(&self, wire: &str, native: &str) {
        self.inner.types.write().set_mapping(wire, native);
    }

    /// See [`TypeMapRegistry::reset_map`].
    pub fn reset_map(&self) {
        self.inner.types.write().reset_map();
    }

    /// See [`TypeMapRegistry::set_defaults`].
    pub fn set_defaults(&self, defaults: TypeMapping) {
        self.inner.types.write().set_defaults(defaults);
    }

    /// Declare a native identifier as constructible by the host.
    pub fn register_type(&self, native: &str) {
        self.inner.types.write().register_type(native);
    }

    /// Check if `native` names a type known to the host.
    pub fn is_known_type(&self, native: &str) -> bool {
        self.inner.types.read().is_known_type(native)
    }

    /// Snapshot of the live table.
    pub fn mapping(&self) -> TypeMapping {
        self.inner.types.read().mapping().clone()
    }

    /// Snapshot of the default table.
    pub fn defaults(&self) -> TypeMapping {
        self.inner.types.read().defaults().clone()
    }

    /// The resource converter.
    pub fn converter(&self) -> &ResourceConverter {
        &self.inner.resources
    }

    /// Currently bound resource loader.
    pub fn resource_loader(&self) -> Option<Arc<dyn ResourceLoader>> {
        self.inner.resources.resource_loader()
    }

    /// Bind a resource loader, replacing any previous binding.
    pub fn set_resource_loader(&self, loader: Arc<dyn ResourceLoader>) {
        self.inner.resources.set_resource_loader(loader);
    }

    /// Remove the resource loader binding.
    pub fn clear_resource_loader(&self) {
        self.inner.resources.clear_resource_loader();
    }

    /// See [`ResourceConverter::resource_parser`].
    pub fn resource_parser(&self, resource: &Resource) -> Result<Option<ParserFactory>> {
        self.inner.resources.resource_parser(resource)
    }

    /// See [`ResourceConverter::handle_resource`].
    pub fn handle_resource(&self, input: impl Into<Payload>) -> Result<Value> {
        self.inner.resources.handle_resource(input)
    }
}

impl Default for TypeLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::mapping::PLACEHOLDER_TYPE;
    use crate::resource::ParserRegistry;

    fn stream_parsers() -> ParserRegistry {
        let mut parsers = ParserRegistry::new();
        parsers.register_fn("stream", |res: Resource| {
            let text = res.into_inner::<String>().unwrap_or_default();
            Ok(Payload::Value(Value::from(text)))
        });
        parsers
    }

    #[test]
    fn test_default_loader() {
        let loader = TypeLoader::new();

        assert_eq!(
            loader.load_type("flex.messaging.messages.ErrorMessage"),
            "value::messaging::ErrorMessage"
        );
        assert!(loader.resource_loader().is_none());
        assert_eq!(loader.converter().max_chain_depth(), Some(64));
    }

    #[test]
    fn test_builder_mapping_survives_reset() {
        let loader = TypeLoader::builder()
            .mapping("com.example.User", "app::User")
            .build();

        loader.set_mapping("com.example.Temp", "app::Temp");
        loader.reset_map();

        assert_eq!(
            loader.mapped_class_name("com.example.User").as_deref(),
            Some("app::User")
        );
        assert_eq!(loader.mapped_class_name("com.example.Temp"), None);
        assert_eq!(loader.mapping().len(), 7);
    }

    #[test]
    fn test_builder_known_type_and_placeholder() {
        let loader = TypeLoader::builder()
            .known_type("com::example::Point")
            .placeholder_type("app::Dynamic")
            .build();

        assert_eq!(loader.load_type("com.example.Point"), "com::example::Point");
        assert_eq!(loader.load_type("com.example.Nope"), "app::Dynamic");
        assert!(loader.is_known_type("app::Dynamic"));
    }

    #[test]
    fn test_register_type_after_build() {
        let loader = TypeLoader::new();
        loader.set_mapping("com.example.User", "app::User");
        assert_eq!(loader.load_type("com.example.User"), PLACEHOLDER_TYPE);

        loader.register_type("app::User");
        assert_eq!(loader.load_type("com.example.User"), "app::User");
    }

    #[test]
    fn test_clones_share_state() {
        let loader = TypeLoader::new();
        let clone = loader.clone();

        clone.set_mapping("com.example.User", "app::User");
        assert_eq!(
            loader.mapped_class_name("app::User").as_deref(),
            Some("com.example.User")
        );

        clone.set_resource_loader(Arc::new(stream_parsers()));
        assert!(loader.resource_loader().is_some());
    }

    #[test]
    fn test_set_defaults_then_reset() {
        let loader = TypeLoader::new();
        let table: TypeMapping = [("com.example.User", "app::User")].into_iter().collect();

        loader.set_defaults(table.clone());
        assert_eq!(loader.mapping().len(), 6);

        loader.reset_map();
        assert_eq!(loader.mapping(), table);
        assert_eq!(loader.defaults(), table);
        assert_eq!(loader.load_type("com.example.User"), "app::User");
    }

    #[test]
    fn test_handle_resource_through_loader() {
        let loader = TypeLoader::builder().resource_loader(stream_parsers()).build();

        assert!(loader
            .resource_parser(&Resource::new("stream", ()))
            .unwrap()
            .is_some());
        assert_eq!(
            loader
                .handle_resource(Resource::new("stream", "hi".to_string()))
                .unwrap(),
            Value::from("hi")
        );
    }

    #[test]
    fn test_converted_value_serializes() {
        let loader = TypeLoader::builder().resource_loader(stream_parsers()).build();

        let value = loader
            .handle_resource(Resource::new("stream", "hi".to_string()))
            .unwrap();
        assert_eq!(serde_json::to_value(&value).unwrap(), serde_json::json!("hi"));
    }

    #[test]
    fn test_handle_resource_without_loader() {
        let loader = TypeLoader::new();
        let err = loader.handle_resource(Value::Null).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_from_config() {
        let config = LoaderConfig::from_json(r#"{ "max_chain_depth": 2 }"#).unwrap();
        let loader = TypeLoader::from_config(config);
        assert_eq!(loader.converter().max_chain_depth(), Some(2));

        let loader = TypeLoader::builder().unbounded_chain().build();
        assert_eq!(loader.converter().max_chain_depth(), None);
    }
}
