use std::{
    collections::HashMap,
    io::{BufRead, BufReader, Read},
};

use serde::Serialize;

use crate::web::routing::{Method, Route};

/// # Request
///
/// Represents a synthetic request that is handed to a route resolver.
///
/// Data includes the method, the route, headers and the body of the request.
#[derive(Debug, Clone)]
pub struct Request {
    /// The method used for this request.
    pub method: Method,

    /// The route of the request
    pub route: Route,

    /// # headers
    ///
    /// The headers that are included in the request, such as the content length, and other misc header items.
    ///
    /// Keys are stored lower-cased, use `header` to look one up by any casing.
    pub headers: HashMap<String, String>,

    /// The body of the request.
    ///
    /// None if there was no body included in the request.
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Create a request without headers or a body.
    ///
    /// ```ignore
    /// let req = Request::new(Method::GET, "/items/5?expand=true");
    /// ```
    pub fn new(method: Method, route: &str) -> Self {
        Self {
            method,
            route: Route::new(route.to_string()),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Adds (or replaces) a header. Header names are case-insensitive.
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Gets a header value, the name is matched case-insensitively.
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers.get(&key.to_ascii_lowercase())
    }

    /// Sets the raw body and its `Content-Length` header.
    pub fn with_body(self, body: Vec<u8>) -> Self {
        let mut req = self.with_header("Content-Length", &body.len().to_string());
        req.body = Some(body);
        req
    }

    /// # With Json Body
    ///
    /// Serializes the value into the body and marks the request as `application/json`.
    pub fn with_json_body<T>(self, value: &T) -> Result<Self, serde_json::Error>
    where
        T: Serialize,
    {
        let body = serde_json::to_vec(value)?;

        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    /// # from_raw
    ///
    /// Parses the text of an HTTP/1.1 request, reading it line by line.
    ///
    /// The first line holds the method and the route, each following line a header until an empty line.
    /// When a `Content-Length` header is present that many bytes are read as the body.
    /// A body shorter than its `Content-Length` is rejected as `InvalidData`.
    pub fn from_raw(raw: &[u8]) -> Result<Self, std::io::Error> {
        //create a buffer that will read each line
        let mut reader = BufReader::new(raw);

        let mut request_line = String::new();

        //the first line should be parsed independently
        reader.read_line(&mut request_line)?;

        if request_line.trim().is_empty() {
            //no data
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "parse request failed due to no data being provided",
            ));
        }

        let mut request_header = request_line.split_whitespace();

        let method = request_header
            .next()
            .map(Method::parse)
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidData, "missing header for method")
            })?;

        let route = request_header
            .next()
            .map(|header_value| Route::new(header_value.to_string()))
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidData, "missing header for request")
            })?;

        //all other headers beside the first
        let mut headers = HashMap::new();

        loop {
            let mut read_header = String::new();

            //end of input also ends the headers
            if reader.read_line(&mut read_header)? == 0 {
                break;
            }

            let read_header = read_header.trim_end();

            //no more headers.
            if read_header.is_empty() {
                break;
            }

            let Some((header_key, header_val)) = read_header.split_once(":") else {
                continue;
            };

            headers.insert(header_key.trim().to_ascii_lowercase(), String::from(header_val.trim()));
        }

        let content_length = headers
            .get("content-length")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let body = if content_length > 0 {
            //read the body from the content length, never past the end of the input.
            let mut body = Vec::new();
            reader.by_ref().take(content_length).read_to_end(&mut body)?;

            if (body.len() as u64) < content_length {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!(
                        "body has {} bytes but the content length is {content_length}",
                        body.len()
                    ),
                ));
            }

            Some(body)
        } else {
            None
        };

        Ok(Self {
            method,
            route,
            headers,
            body,
        })
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.route)
    }
}
