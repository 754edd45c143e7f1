use std::sync::Arc;

use crate::web::controller::Controller;

/// ## End Point
/// Represents an Endpoint of a Route Tree node.
///
/// Points at the controller and the name of the action that handles the route, along with the template it was mapped with.
#[derive(Debug, Clone)]
pub struct EndPoint {
    pub controller: Arc<Controller>,
    pub action: String,
    pub template: String,
}

impl EndPoint {
    pub fn new(controller: Arc<Controller>, action: &str, template: &str) -> Self {
        Self {
            controller,
            action: action.to_string(),
            template: template.to_string(),
        }
    }
}
