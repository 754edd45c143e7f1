/// # Method
///
/// Describes a method that a synthetic HTTP request may send.
///
/// Common variants may include GET, POST, DELETE, etc...
///
/// Routes may share a path if and only if the method does not match an existing method for that route.
#[derive(Debug)]
#[derive(Eq, Hash, PartialEq)]
#[derive(Clone)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    Other(String),
}

impl Method {
    /// # Parse
    ///
    /// Turns the method token of a request line into a Method. Unknown tokens are kept as `Other`.
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "PUT" => Method::PUT,
            "POST" => Method::POST,
            "DELETE" => Method::DELETE,
            "PATCH" => Method::PATCH,
            token => Method::Other(token.to_string()),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = match self {
            Self::GET => "GET",
            Self::POST => "POST",
            Self::PUT => "PUT",
            Self::DELETE => "DELETE",
            Self::PATCH => "PATCH",
            Self::Other(x) => x.as_str(),
        };

        write!(f, "{m}")
    }
}
