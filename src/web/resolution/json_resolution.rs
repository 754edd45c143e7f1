use std::pin::Pin;

use futures::{Stream, stream};
use linked_hash_map::LinkedHashMap;
use serde::Serialize;
use serde_json::Value;

use crate::web::{
    Resolution,
    resolution::{ResultKind, get_status_header},
};

/// ## JSON Resolution
///
/// Implementation of the Resolution trait. Allows for you send JSON based content back to a client.
///
/// ## Example
///
/// ```ignore
/// //a person object exist that just has a name and age
/// let person = Person::new("John Doe", 32);
///
/// let mut j_resolution = JsonResolution::serialize(person)?;
///
/// //we can also change the status of this resolution (it is by default 200)
/// j_resolution.set_status(201);
///
/// return j_resolution.resolve();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResolution {
    value: Value,
    status_code: i32,
}

impl JsonResolution {
    /// # serialize
    ///
    /// Serializes the value T into a JsonResolution with a `200` status.
    pub fn serialize<T>(value: T) -> Result<Self, serde_json::Error>
    where
        T: Serialize,
    {
        serde_json::to_value(value).map(|value| Self {
            value,
            status_code: 200,
        })
    }

    /// Set the status code of the resolution.
    pub fn set_status(&mut self, status_code: i32) -> () {
        self.status_code = status_code
    }

    pub fn status_code(&self) -> i32 {
        self.status_code
    }

    /// The serialized value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Resolution for JsonResolution {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn get_headers(&self) -> LinkedHashMap<String, Option<String>> {
        let mut hmap = LinkedHashMap::new();

        let (n, v) = get_status_header(self.status_code);
        hmap.insert(n, Some(v));
        hmap.insert(
            "Content-Type".to_string(),
            Some("application/json".to_string()),
        );

        hmap
    }

    fn get_content(&self) -> Pin<Box<dyn Stream<Item = Vec<u8>> + Send + 'static>> {
        let json_value = self.value.to_string();

        Box::pin(stream::once(async move { json_value.into_bytes() }))
    }

    fn into_any(self: Box<Self>) -> Box<dyn std::any::Any + Send> {
        self
    }
}

impl ResultKind for JsonResolution {
    const KIND: &'static str = "json";
}
