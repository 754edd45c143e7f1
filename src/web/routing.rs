pub mod binding;
pub mod method;
pub mod request;
pub mod route;
pub mod route_match;
pub mod router;

pub use method::Method;
pub use request::Request;
pub use route::Route;
pub use route_match::{RouteData, RouteMatch};

/// # Route Resolver
///
/// Maps a request to a controller action.
///
/// Gives back the match, or a diagnostic describing why no route could be matched.
/// A diagnostic for a route that exists without the requested method must contain `Method Not Allowed`.
pub trait RouteResolver {
    fn resolve(&self, request: &Request) -> Result<RouteMatch, String>;
}
