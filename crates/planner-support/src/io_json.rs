//! Compact JSON serialization helpers.
//!
//! Both CLIs emit whitespace-free JSON (spec: "Compact output formatting
//! (no whitespace) is the expected default").

use serde::Serialize;

/// Serialize `value` as compact (no-whitespace) JSON.
///
/// Panics only if `T`'s `Serialize` impl itself fails, which for the wire
/// types in this workspace (plain structs of strings/numbers/vecs/maps)
/// cannot happen -- mirrors the teacher's treatment of serialization of its
/// own data types as infallible in practice.
pub fn to_compact_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).expect("wire type must serialize")
}
