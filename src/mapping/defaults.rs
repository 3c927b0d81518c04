//! Default wire type table and naming constants.
//!
//! The six entries must stay byte-for-byte identical to the names used by
//! Flex/BlazeDS peers.

/// Separator between segments of a native type identifier.
pub const NATIVE_SEPARATOR: &str = "::";

/// Separator between segments of a wire-level type name.
pub const WIRE_SEPARATOR: char = '.';

/// Placeholder returned by `load_type` when nothing else resolves.
pub const PLACEHOLDER_TYPE: &str = "value::Object";

/// Default wire name to native identifier table.
pub const DEFAULT_CLASS_MAP: [(&str, &str); 6] = [
    (
        "flex.messaging.messages.AcknowledgeMessage",
        "value::messaging::AcknowledgeMessage",
    ),
    (
        "flex.messaging.messages.AsyncMessage",
        "value::messaging::AsyncMessage",
    ),
    (
        "flex.messaging.messages.CommandMessage",
        "value::messaging::CommandMessage",
    ),
    (
        "flex.messaging.messages.ErrorMessage",
        "value::messaging::ErrorMessage",
    ),
    (
        "flex.messaging.messages.RemotingMessage",
        "value::messaging::RemotingMessage",
    ),
    (
        "flex.messaging.io.ArrayCollection",
        "value::messaging::ArrayCollection",
    ),
];

/// Turn a dotted wire name into a native identifier candidate.
///
/// ```
/// use amf_typeloader::mapping::transliterate;
///
/// assert_eq!(transliterate("com.example.User"), "com::example::User");
/// ```
pub fn transliterate(wire_name: &str) -> String {
    wire_name.replace(WIRE_SEPARATOR, NATIVE_SEPARATOR)
}
