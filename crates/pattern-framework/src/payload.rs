//! Outbound payload normalization.
//!
//! Structured values (objects and arrays) are sent as-is. Everything else,
//! including `null`, is wrapped as `{"id": value}` so a bare identifier can
//! be passed straight to a service method.

use serde::Serialize;
use serde_json::{Map, Value};

/// Field used when wrapping a primitive argument.
pub const ID_FIELD: &str = "id";

/// Wraps primitives and `null` as `{"id": value}`.
pub fn normalize_payload(value: Value) -> Value {
    match value {
        Value::Object(_) | Value::Array(_) => value,
        primitive => {
            let mut wrapped = Map::with_capacity(1);
            wrapped.insert(ID_FIELD.to_owned(), primitive);
            Value::Object(wrapped)
        }
    }
}

/// Serializes `arg` and normalizes the result.
pub fn to_payload<P: Serialize>(arg: P) -> Result<Value, serde_json::Error> {
    serde_json::to_value(arg).map(normalize_payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitives_are_wrapped() {
        assert_eq!(normalize_payload(json!(42)), json!({ "id": 42 }));
        assert_eq!(normalize_payload(json!("u-1")), json!({ "id": "u-1" }));
        assert_eq!(normalize_payload(json!(true)), json!({ "id": true }));
        assert_eq!(normalize_payload(Value::Null), json!({ "id": null }));
    }

    #[test]
    fn structured_values_pass_through() {
        let object = json!({ "id": 7, "name": "a" });
        assert_eq!(normalize_payload(object.clone()), object);

        let array = json!([1, 2, 3]);
        assert_eq!(normalize_payload(array.clone()), array);
    }

    #[test]
    fn typed_arguments_are_serialized_first() {
        #[derive(Serialize)]
        struct Rename<'a> {
            id: u32,
            name: &'a str,
        }

        assert_eq!(
            to_payload(Rename { id: 7, name: "a" }).unwrap(),
            json!({ "id": 7, "name": "a" })
        );
        assert_eq!(to_payload(()).unwrap(), json!({ "id": null }));
        assert_eq!(to_payload(Some(3u8)).unwrap(), json!({ "id": 3 }));
    }
}
