//! Resource handles and the values they convert into.
//!
//! A [`Resource`] is an opaque runtime handle (file, stream, connection)
//! tagged with a runtime type name such as `"stream"` or `"gd image"`. It
//! cannot be serialized. Parsers turn it into a [`Value`], possibly via
//! further resources, and [`Payload`] is the state carried between steps.
//!
//! # Example
//!
//! ```
//! use amf_typeloader::resource::{Payload, Resource, Value};
//!
//! let handle = Resource::new("stream", std::io::Cursor::new(b"abc".to_vec()));
//! assert_eq!(handle.kind(), "stream");
//! assert!(handle.is::<std::io::Cursor<Vec<u8>>>());
//!
//! let payload = Payload::from(Value::from("done"));
//! assert!(!payload.is_resource());
//! ```

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use serde::Serialize;

/// Opaque runtime handle with a type tag.
pub struct Resource {
    /// Runtime type tag, as reported by the host.
    kind: String,
    /// The handle itself.
    inner: Box<dyn Any + Send>,
}

impl Resource {
    /// Wrap `inner` as a resource of runtime type `kind`.
    pub fn new<T: Any + Send>(kind: impl Into<String>, inner: T) -> Self {
        Self {
            kind: kind.into(),
            inner: Box::new(inner),
        }
    }

    /// Runtime type tag.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Check if the handle is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrow the handle as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Mutably borrow the handle as a `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.inner.downcast_mut()
    }

    /// Take the handle out as a `T`, or get the resource back unchanged.
    pub fn into_inner<T: Any>(self) -> Result<T, Self> {
        let Self { kind, inner } = self;
        match inner.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(inner) => Err(Self { kind, inner }),
        }
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Plain data a serializer can encode.
///
/// Serializes untagged, so a `Value::Object` becomes a map and
/// `Value::Bytes` becomes a binary blob.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Double(f64),
    /// UTF-8 string.
    String(String),
    /// Binary data (zero-copy via `bytes::Bytes`).
    Bytes(Bytes),
    /// Ordered list.
    Array(Vec<Value>),
    /// String keyed map.
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Check if the value is `Null`.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow binary data.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(v))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Self::Object(v)
    }
}

/// Either a resource still to convert or a finished value.
#[derive(Debug)]
pub enum Payload {
    /// Needs another conversion step.
    Resource(Resource),
    /// Conversion finished.
    Value(Value),
}

impl Payload {
    /// Check if another conversion step is needed.
    #[inline]
    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource(_))
    }
}

impl From<Resource> for Payload {
    fn from(resource: Resource) -> Self {
        Self::Resource(resource)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FileHandle {
        path: &'static str,
    }

    #[test]
    fn test_resource_downcast() {
        let mut res = Resource::new("stream", FileHandle { path: "/tmp/a" });

        assert!(res.is::<FileHandle>());
        assert!(!res.is::<String>());
        assert_eq!(res.downcast_ref::<FileHandle>().unwrap().path, "/tmp/a");

        res.downcast_mut::<FileHandle>().unwrap().path = "/tmp/b";
        assert_eq!(res.downcast_ref::<FileHandle>().unwrap().path, "/tmp/b");
    }

    #[test]
    fn test_into_inner_wrong_type_returns_resource() {
        let res = Resource::new("stream", 7u32);

        let res = res.into_inner::<String>().unwrap_err();
        assert_eq!(res.kind(), "stream");
        assert_eq!(res.into_inner::<u32>().unwrap(), 7);
    }

    #[test]
    fn test_resource_debug_hides_handle() {
        let res = Resource::new("gd image", 1u8);
        let debug = format!("{:?}", res);
        assert!(debug.contains("gd image"));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(5), Value::Integer(5));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
        assert!(Value::Null.is_null());
    }

    #[test]
    fn test_value_json_shape() {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), Value::from("log.txt"));
        fields.insert("size".to_string(), Value::from(12));
        fields.insert("meta".to_string(), Value::Null);
        fields.insert(
            "tags".to_string(),
            Value::from(vec![Value::from("a"), Value::from(1.5)]),
        );

        let json = serde_json::to_string(&Value::Object(fields)).unwrap();
        assert_eq!(
            json,
            r#"{"meta":null,"name":"log.txt","size":12,"tags":["a",1.5]}"#
        );
    }

    #[test]
    fn test_payload_from() {
        assert!(Payload::from(Resource::new("stream", ())).is_resource());
        assert!(!Payload::from(Value::Null).is_resource());
    }
}
