use futures::Stream;
use linked_hash_map::LinkedHashMap;
use std::{any::Any, pin::Pin};

pub mod empty_resolution;
pub mod json_resolution;
pub mod redirect;

/// Represents a resolution for a request, the value an action gives back.
pub trait Resolution: Any + Send {
    /// The runtime kind of this resolution, e.g. `empty` or `redirect`.
    fn kind(&self) -> &'static str;

    ///
    /// Get all headers for the HTTP response.
    ///
    fn get_headers(&self) -> LinkedHashMap<String, Option<String>>;

    ///
    /// Get the content for the resolution.
    fn get_content(&self) -> Pin<Box<dyn Stream<Item = Vec<u8>> + Send>>;

    /// Gives up the box so the concrete resolution can be recovered with a downcast.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;

    /// Boxes the resolution.
    fn resolve(self) -> Box<dyn Resolution>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

/// # Result Kind
///
/// The static side of `Resolution::kind`. Any resolution implementing this can be asserted on with
/// `ShouldReturnTestBuilder::result_of_kind`.
pub trait ResultKind: Resolution {
    const KIND: &'static str;
}

/// Returns a status string based on a code.
///
/// ### Example
/// ```ignore
/// let status = get_status(&405);
///
/// //output is Method Not Allowed
/// println!("{status}");
///
/// ```
pub fn get_status(status_code: &i32) -> &'static str {
    match status_code {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",

        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",

        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",

        500 => "Internal Server Error",

        _ => "Unknown Status Code",
    }
}

/// Gives you back the status header based on a status code.
///
/// ### Example
///
/// ```ignore
/// let (name, value) = get_status_header(200);
///
/// //outputs Status: 200 OK
/// println!("{name}: {value}");
/// ```
pub fn get_status_header(status_code: i32) -> (String, String) {
    let status = get_status(&status_code);

    ("Status".to_string(), format!("{status_code} {status}"))
}

/// Signals that there is no content to serve.
pub fn empty_content() -> Vec<u8> {
    Vec::new()
}
