//! Mapping a response body onto output items.

use crate::types::Item;
use serde_json::Value;

/// Field holding the record array in both APIs' list responses.
pub const SPLIT_FIELD: &str = "data";

/// Map a response body to output items.
///
/// With `split` set and an array under [`SPLIT_FIELD`], each element becomes
/// its own item in upstream order. Otherwise the whole body is one item.
pub fn map_response(body: Value, split: bool) -> Vec<Item> {
    match body {
        Value::Object(mut map) if split => match map.remove(SPLIT_FIELD) {
            Some(Value::Array(records)) => records.into_iter().map(Item::new).collect(),
            Some(other) => {
                map.insert(SPLIT_FIELD.to_string(), other);
                vec![Item::new(Value::Object(map))]
            }
            None => vec![Item::new(Value::Object(map))],
        },
        body => vec![Item::new(body)],
    }
}
