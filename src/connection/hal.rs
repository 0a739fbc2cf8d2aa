//! Hypertext Application Language helpers.
//!
//! The boat store decorates every object with a `_links` entry and wraps
//! collections in `_embedded`. Neither is part of the client's data model.

use crate::core::{ClientError, Result};
use serde_json::Value;

/// Reserved hypermedia key removed from everything the transport returns
pub const LINKS_KEY: &str = "_links";

/// Key of the embedded collections object
pub const EMBEDDED_KEY: &str = "_embedded";

/// Removes `_links` from every object in `value`, at any depth
pub fn strip_links(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.remove(LINKS_KEY);
            for nested in map.values_mut() {
                strip_links(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                strip_links(item);
            }
        }
        _ => {}
    }
}

/// Takes the `_embedded.<collection>` array out of a collection response.
///
/// A response without `_embedded` is an empty collection; an `_embedded`
/// without the named array is a malformed answer.
pub fn embedded_items(value: Value, collection: &str) -> Result<Vec<Value>> {
    let Value::Object(mut map) = value else {
        return Err(ClientError::MissingCollection(collection.to_string()));
    };

    match map.remove(EMBEDDED_KEY) {
        None => Ok(Vec::new()),
        Some(Value::Object(mut embedded)) => match embedded.remove(collection) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(ClientError::MissingCollection(collection.to_string())),
        },
        Some(_) => Err(ClientError::MissingCollection(collection.to_string())),
    }
}
