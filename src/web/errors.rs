pub mod routing_error;

pub use self::routing_error::RoutingError;
