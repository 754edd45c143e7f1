use std::{collections::HashMap, sync::Arc};

use linked_hash_map::LinkedHashMap;
use serde_json::Value;

use crate::web::{
    controller::Controller,
    routing::{Method, binding::ValidationState},
};

/// # Route Data
///
/// What the router matched: the method, the template of the route and the values of its variable segments in path order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteData {
    pub method: Method,

    /// The route as it was mapped, e.g. `/items/{id}`
    pub template: String,

    pub values: LinkedHashMap<String, String>,
}

/// # Route Match
///
/// Everything a resolver knows about a successful match.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub controller_type: Arc<Controller>,
    pub controller_name: String,
    pub action: String,

    /// Bound values by parameter name. Parameters without a value are absent.
    pub raw_route_values: HashMap<String, Value>,

    pub route_data: RouteData,
    pub validation_state: ValidationState,
}
