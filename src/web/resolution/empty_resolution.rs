use futures::{Stream, stream};
use linked_hash_map::LinkedHashMap;

use crate::web::{
    Resolution,
    resolution::{ResultKind, empty_content, get_status_header},
};

/// ## Empty Resolution
///
/// Implementation of the Resolution trait.
///
/// A result without a payload, only a status code you can set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyResolution {
    status_code: i32,
}

impl EmptyResolution {
    /// Create a new Empty Resolution with a status code.
    pub fn status(code: i32) -> Self {
        Self { status_code: code }
    }

    pub fn status_code(&self) -> i32 {
        self.status_code
    }
}

impl Resolution for EmptyResolution {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn get_headers(&self) -> LinkedHashMap<String, Option<String>> {
        let mut hmap = LinkedHashMap::new();

        let header = get_status_header(self.status_code);

        hmap.insert(header.0, Some(header.1));

        hmap
    }

    fn get_content(&self) -> std::pin::Pin<Box<dyn Stream<Item = Vec<u8>> + Send>> {
        Box::pin(stream::once(async move { empty_content() }))
    }

    fn into_any(self: Box<Self>) -> Box<dyn std::any::Any + Send> {
        self
    }
}

impl ResultKind for EmptyResolution {
    const KIND: &'static str = "empty";
}
