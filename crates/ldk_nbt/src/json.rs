//! Plain JSON view of a tag tree.
//!
//! Type information is dropped: every number becomes a JSON number, lists and
//! arrays become JSON arrays and compounds become objects in insertion order.
//! The result cannot be turned back into the same tags, use
//! [`mojangson`](crate::mojangson) for that.

use serde_json::{Map, Number, Value};

use crate::Tag;

/// Converts a tag to JSON. [`Tag::End`] and non-finite floats become `null`.
pub fn to_json(tag: &Tag) -> Value {
    match tag {
        Tag::End => Value::Null,
        Tag::Byte(v) => Value::from(*v),
        Tag::Short(v) => Value::from(*v),
        Tag::Int(v) => Value::from(*v),
        Tag::Long(v) => Value::from(*v),
        // Go through the shortest decimal form so `0.1f32` stays `0.1`.
        Tag::Float(v) => float(v.to_string().parse().unwrap_or(f64::NAN)),
        Tag::Double(v) => float(*v),
        Tag::ByteArray(v) => v.iter().copied().map(Value::from).collect(),
        Tag::String(v) => Value::String(v.clone()),
        Tag::List(v) => v.iter().map(to_json).collect(),
        Tag::Compound(v) => Value::Object(
            v.iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect::<Map<_, _>>(),
        ),
        Tag::IntArray(v) => v.iter().copied().map(Value::from).collect(),
        Tag::LongArray(v) => v.iter().copied().map(Value::from).collect(),
    }
}

fn float(v: f64) -> Value {
    Number::from_f64(v).map_or(Value::Null, Value::Number)
}

/// Converts a tag to a compact JSON string.
pub fn to_json_string(tag: &Tag) -> String {
    to_json(tag).to_string()
}
