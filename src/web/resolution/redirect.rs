use linked_hash_map::LinkedHashMap;

use crate::web::{
    Resolution,
    resolution::{ResultKind, empty_content, get_status_header},
};

pub type Location = String;

/// Redirect Types
///
/// Redirect types that you can use to set the header of your redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectType {
    /// The resource has been moved permanently.
    ///
    /// See: https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Status/301
    MovedPermanently(Location),

    /// The requested URL has been moved temporarily.
    ///
    /// See: https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Status/302
    Found(Location),

    /// Indicates that the browser should redirect to the url in the location header.
    ///
    /// See: https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Status/303
    SeeOther(Location),

    /// Indicates to the browser that the page has not been modified since a requested date. Carries no location.
    ///
    /// See: https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Status/304
    NotModified,

    /// See: https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Status/307
    TemporaryRedirect(Location),

    /// See: https://developer.mozilla.org/en-US/docs/Web/HTTP/Reference/Status/308
    PermanentRedirect(Location),
}

impl RedirectType {
    /// the status of the redirection type 301, etc...
    fn status(&self) -> i32 {
        match self {
            RedirectType::MovedPermanently(_) => 301,
            RedirectType::Found(_) => 302,
            RedirectType::SeeOther(_) => 303,
            RedirectType::NotModified => 304,
            RedirectType::TemporaryRedirect(_) => 307,
            RedirectType::PermanentRedirect(_) => 308,
        }
    }

    fn location(&self) -> Option<&str> {
        match self {
            RedirectType::MovedPermanently(url)
            | RedirectType::Found(url)
            | RedirectType::SeeOther(url)
            | RedirectType::TemporaryRedirect(url)
            | RedirectType::PermanentRedirect(url) => Some(url),
            RedirectType::NotModified => None,
        }
    }
}

/// ## Redirect
///
/// A result that sends the client somewhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    redirect_header_type: RedirectType,
}

impl Redirect {
    /// Create a new redirect resolution with a redirect type.
    pub fn new(redirect_type: RedirectType) -> Self {
        Self {
            redirect_header_type: redirect_type,
        }
    }

    /// Shorthand for a `302 Found` redirect.
    pub fn found(url: &str) -> Self {
        Self::new(RedirectType::Found(url.to_string()))
    }

    pub fn status_code(&self) -> i32 {
        self.redirect_header_type.status()
    }

    /// The target of the redirect. None for `304 Not Modified`.
    pub fn location(&self) -> Option<&str> {
        self.redirect_header_type.location()
    }

    pub fn redirect_type(&self) -> &RedirectType {
        &self.redirect_header_type
    }
}

impl Resolution for Redirect {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    //sets the header for the redirection!
    fn get_headers(&self) -> LinkedHashMap<String, Option<String>> {
        let mut hmap = LinkedHashMap::<String, Option<String>>::with_capacity(2);

        let (n, v) = get_status_header(self.status_code());
        hmap.insert(n, Some(v));

        if let Some(url) = self.location() {
            hmap.insert("Location".to_string(), Some(url.to_string()));
        }

        hmap
    }

    fn get_content(&self) -> std::pin::Pin<Box<dyn futures::Stream<Item = Vec<u8>> + Send>> {
        Box::pin(tokio_stream::once(empty_content()))
    }

    fn into_any(self: Box<Self>) -> Box<dyn std::any::Any + Send> {
        self
    }
}

impl ResultKind for Redirect {
    const KIND: &'static str = "redirect";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_header_follows_status() {
        let redirect = Redirect::new(RedirectType::SeeOther("/items".to_string()));
        let headers = redirect.get_headers();

        assert_eq!(redirect.status_code(), 303);
        assert_eq!(
            headers.get("Status"),
            Some(&Some("303 See Other".to_string()))
        );
        assert_eq!(headers.get("Location"), Some(&Some("/items".to_string())));
    }

    #[test]
    fn not_modified_has_no_location() {
        let redirect = Redirect::new(RedirectType::NotModified);

        assert_eq!(redirect.location(), None);
        assert_eq!(redirect.get_headers().len(), 1);
    }
}
