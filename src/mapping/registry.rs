//! Bidirectional type name registry.
//!
//! The registry keeps a live [`TypeMapping`] seeded from a default table and
//! answers lookups from either direction through one structure:
//!
//! 1. the query is looked up among native identifiers (reverse index) and
//!    the owning wire name is returned;
//! 2. otherwise it is looked up among wire names (forward index) and the
//!    native identifier is returned.
//!
//! A resolved name that is empty counts as a miss. When several wire names
//! share a native identifier, the reverse index keeps the first inserted one.
//!
//! # Example
//!
//! ```
//! use amf_typeloader::mapping::TypeMapRegistry;
//!
//! let mut registry = TypeMapRegistry::new();
//! registry.register_type("app::User");
//! registry.set_mapping("com.example.User", "app::User");
//!
//! assert_eq!(registry.load_type("com.example.User"), "app::User");
//! assert_eq!(registry.mapped_class_name("app::User"), Some("com.example.User"));
//! assert_eq!(registry.load_type("com.example.Missing"), "value::Object");
//! ```

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::defaults::{transliterate, PLACEHOLDER_TYPE};
use super::table::TypeMapping;

/// Live wire/native type table with a restorable default.
#[derive(Debug, Clone)]
pub struct TypeMapRegistry {
    /// Table restored by `reset_map`.
    defaults: Arc<TypeMapping>,
    /// Table consulted by lookups.
    live: TypeMapping,
    /// Wire name -> native identifier.
    forward: HashMap<String, String>,
    /// Native identifier -> first wire name mapped to it.
    reverse: HashMap<String, String>,
    /// Native identifiers the host can construct.
    known_types: HashSet<String>,
    /// Returned by `load_type` when nothing resolves.
    placeholder: String,
}

impl TypeMapRegistry {
    /// Create a registry seeded with the AMF default table.
    pub fn new() -> Self {
        Self::with_defaults(TypeMapping::amf_defaults())
    }

    /// Create a registry seeded with `defaults`.
    ///
    /// Every native identifier in `defaults` and the placeholder type are
    /// registered as known host types.
    pub fn with_defaults(defaults: TypeMapping) -> Self {
        let known_types = defaults
            .iter()
            .map(|(_, native)| native.to_string())
            .chain(std::iter::once(PLACEHOLDER_TYPE.to_string()))
            .collect();

        let mut registry = Self {
            live: defaults.clone(),
            defaults: Arc::new(defaults),
            forward: HashMap::new(),
            reverse: HashMap::new(),
            known_types,
            placeholder: PLACEHOLDER_TYPE.to_string(),
        };
        registry.rebuild_index();
        registry
    }

    /// Resolve a wire name to a constructible native type identifier.
    ///
    /// Never fails. A lookup miss falls back to replacing every `.` with
    /// `::`; if that candidate is not a known host type the placeholder
    /// is returned.
    pub fn load_type(&self, name: &str) -> String {
        let candidate = match self.mapped_class_name(name) {
            Some(mapped) => mapped.to_string(),
            None => {
                let candidate = transliterate(name);
                tracing::debug!("No mapping for {:?}, trying {:?}", name, candidate);
                candidate
            }
        };

        if self.known_types.contains(&candidate) {
            candidate
        } else {
            tracing::debug!(
                "Type {:?} is not known, using {:?}",
                candidate,
                self.placeholder
            );
            self.placeholder.clone()
        }
    }

    /// Look `name` up among native identifiers first, then among wire names.
    pub fn mapped_class_name(&self, name: &str) -> Option<&str> {
        self.reverse
            .get(name)
            .filter(|wire| !wire.is_empty())
            .or_else(|| self.forward.get(name).filter(|native| !native.is_empty()))
            .map(String::as_str)
    }

    /// Insert or overwrite `wire -> native` in the live table.
    ///
    /// Neither string is validated.
    pub fn set_mapping(&mut self, wire: impl Into<String>, native: impl Into<String>) {
        let wire = wire.into();
        let native = native.into();
        tracing::debug!("Mapping {:?} <-> {:?}", wire, native);

        if let Some(old) = self.live.insert(wire.clone(), native.clone()) {
            if old == native {
                return;
            }
            // `old` may still be owned by a later wire name.
            if self.reverse.get(&old) == Some(&wire) {
                self.rebuild_index();
                return;
            }
        }

        self.forward.insert(wire.clone(), native.clone());
        self.claim_reverse(wire, native);
    }

    /// Replace the live table with the current default table.
    pub fn reset_map(&mut self) {
        tracing::debug!("Resetting type map to {} default entries", self.defaults.len());
        self.live = TypeMapping::clone(&self.defaults);
        self.rebuild_index();
    }

    /// Replace the stored default table.
    ///
    /// Its native identifiers become known host types. The live table is
    /// untouched until the next `reset_map`.
    pub fn set_defaults(&mut self, defaults: TypeMapping) {
        self.known_types
            .extend(defaults.iter().map(|(_, native)| native.to_string()));
        self.defaults = Arc::new(defaults);
    }

    /// Default table restored by `reset_map`.
    pub fn defaults(&self) -> &TypeMapping {
        &self.defaults
    }

    /// Live table.
    pub fn mapping(&self) -> &TypeMapping {
        &self.live
    }

    /// Declare a native identifier as constructible by the host.
    pub fn register_type(&mut self, native: impl Into<String>) {
        self.known_types.insert(native.into());
    }

    /// Check if `native` names a type known to the host.
    pub fn is_known_type(&self, native: &str) -> bool {
        self.known_types.contains(native)
    }

    /// Placeholder returned when a type cannot be resolved.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Change the placeholder type. It becomes a known type.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
        self.known_types.insert(self.placeholder.clone());
    }

    /// Point `native` back at `wire` unless an earlier wire name owns it.
    fn claim_reverse(&mut self, wire: String, native: String) {
        let position = self.live.position(&wire);
        match self.reverse.entry(native) {
            Entry::Vacant(slot) => {
                slot.insert(wire);
            }
            Entry::Occupied(mut slot) => {
                if self.live.position(slot.get()) > position {
                    slot.insert(wire);
                }
            }
        }
    }

    fn rebuild_index(&mut self) {
        self.forward.clear();
        self.reverse.clear();

        for (wire, native) in self.live.iter() {
            self.forward.insert(wire.to_string(), native.to_string());
            self.reverse
                .entry(native.to_string())
                .or_insert_with(|| wire.to_string());
        }
    }
}

impl Default for TypeMapRegistry {
    fn default() -> Self {
        Self::new()
    }
}
