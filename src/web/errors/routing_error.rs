/// # routing error
///
/// An error that represents when trying to map a route to a controller action.
#[derive(Debug, PartialEq, Eq)]
pub enum RoutingError {
    /// The route already has an endpoint for the method.
    Exist,
    InvalidRoute(String),
    /// The controller does not declare the action the route points to.
    ActionMissing { controller: String, action: String },
    /// An action declares the same parameter name more than once.
    DuplicateParameter { action: String, parameter: String },
}

impl std::fmt::Display for RoutingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            RoutingError::Exist => write!(f, "the route already exist for the method"),
            RoutingError::InvalidRoute(reason) => {
                write!(f, "the route provided was invalid because {reason}")
            }
            RoutingError::ActionMissing { controller, action } => {
                write!(f, "the controller {controller} has no action named {action}")
            }
            RoutingError::DuplicateParameter { action, parameter } => {
                write!(f, "the action {action} declares the parameter {parameter} more than once")
            }
        }
    }
}

impl std::error::Error for RoutingError {}
