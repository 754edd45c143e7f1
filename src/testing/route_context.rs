use std::sync::Arc;

use tracing::{debug, warn};

use crate::web::{
    controller::{ActionArguments, Controller},
    routing::{Request, RouteData, RouteMatch, RouteResolver, binding::ValidationState},
};

/// # Is Method Not Allowed
///
/// Classifies a resolver diagnostic. True when the diagnostic contains `Method Not Allowed`, case-sensitive.
///
/// This is tied to the wording of the resolver's diagnostics. Every other classification of an unresolved route goes here too.
pub fn is_method_not_allowed(error: &str) -> bool {
    error.contains("Method Not Allowed")
}

/// Why a route could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The route exists but not for the requested method.
    MethodNotAllowed,
    /// Any other diagnostic.
    Unmatched,
}

/// # Resolved Route
///
/// The success side of a resolution attempt.
#[derive(Debug, Clone)]
pub struct ResolvedRoute {
    controller_type: Arc<Controller>,
    controller_name: String,
    action: String,
    route_arguments: ActionArguments,
    route_data: RouteData,
    validation_state: ValidationState,
}

impl ResolvedRoute {
    pub fn controller_type(&self) -> &Arc<Controller> {
        &self.controller_type
    }

    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// One entry per parameter of the action, in declaration order.
    pub fn route_arguments(&self) -> &ActionArguments {
        &self.route_arguments
    }

    pub fn route_data(&self) -> &RouteData {
        &self.route_data
    }

    pub fn validation_state(&self) -> &ValidationState {
        &self.validation_state
    }
}

/// # Unresolved Route
///
/// The failure side of a resolution attempt, holding the resolver's diagnostic as it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRoute {
    error: String,
}

impl UnresolvedRoute {
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Recomputed from the diagnostic on every call.
    pub fn method_is_not_allowed(&self) -> bool {
        is_method_not_allowed(&self.error)
    }

    pub fn reason(&self) -> UnresolvedReason {
        if self.method_is_not_allowed() {
            UnresolvedReason::MethodNotAllowed
        } else {
            UnresolvedReason::Unmatched
        }
    }
}

/// # Resolved Route Context
///
/// The outcome of resolving one request. Built once, read only afterwards.
///
/// ```ignore
/// let context = ResolvedRouteContext::resolve(&tree, &Request::new(Method::GET, "/items/5"));
///
/// if let ResolvedRouteContext::Resolved(route) = &context {
///     println!("{}.{}", route.controller_name(), route.action());
/// }
/// ```
#[derive(Debug, Clone)]
pub enum ResolvedRouteContext {
    Resolved(ResolvedRoute),
    Unresolved(UnresolvedRoute),
}

impl ResolvedRouteContext {
    /// # Resolve
    ///
    /// Asks the resolver about the request, exactly once, and captures the outcome.
    pub fn resolve(resolver: &dyn RouteResolver, request: &Request) -> Self {
        match resolver.resolve(request) {
            Ok(route_match) => {
                debug!(
                    request = %request,
                    controller = %route_match.controller_name,
                    action = %route_match.action,
                    "route resolved"
                );

                Self::from_match(route_match)
            }
            Err(error) => {
                debug!(request = %request, error = %error, "route unresolved");

                Self::unresolved(error)
            }
        }
    }

    /// # From Match
    ///
    /// Builds the resolved outcome. The raw values are ordered by the parameters of the matched action,
    /// parameters without a value are kept as unprovided.
    pub fn from_match(route_match: RouteMatch) -> Self {
        let RouteMatch {
            controller_type,
            controller_name,
            action,
            raw_route_values,
            route_data,
            validation_state,
        } = route_match;

        let route_arguments = match controller_type.action(&action) {
            Some(declared) => declared.arguments_from(raw_route_values),
            None => {
                warn!(
                    controller = %controller_type.type_name,
                    action = %action,
                    "matched action is not declared by the controller"
                );

                ActionArguments::new()
            }
        };

        Self::Resolved(ResolvedRoute {
            controller_type,
            controller_name,
            action,
            route_arguments,
            route_data,
            validation_state,
        })
    }

    /// Builds the unresolved outcome, keeping the diagnostic verbatim.
    pub fn unresolved(error: impl Into<String>) -> Self {
        Self::Unresolved(UnresolvedRoute {
            error: error.into(),
        })
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn as_resolved(&self) -> Option<&ResolvedRoute> {
        match self {
            Self::Resolved(route) => Some(route),
            Self::Unresolved(_) => None,
        }
    }

    pub fn as_unresolved(&self) -> Option<&UnresolvedRoute> {
        match self {
            Self::Resolved(_) => None,
            Self::Unresolved(route) => Some(route),
        }
    }

    pub fn unresolved_error(&self) -> Option<&str> {
        self.as_unresolved().map(|r| r.error())
    }

    /// False for a resolved route.
    pub fn method_is_not_allowed(&self) -> bool {
        self.as_unresolved()
            .is_some_and(|r| r.method_is_not_allowed())
    }

    pub fn unresolved_reason(&self) -> Option<UnresolvedReason> {
        self.as_unresolved().map(|r| r.reason())
    }

    pub fn controller_type(&self) -> Option<&Arc<Controller>> {
        self.as_resolved().map(|r| r.controller_type())
    }

    pub fn controller_name(&self) -> Option<&str> {
        self.as_resolved().map(|r| r.controller_name())
    }

    pub fn action(&self) -> Option<&str> {
        self.as_resolved().map(|r| r.action())
    }

    pub fn route_arguments(&self) -> Option<&ActionArguments> {
        self.as_resolved().map(|r| r.route_arguments())
    }

    pub fn route_data(&self) -> Option<&RouteData> {
        self.as_resolved().map(|r| r.route_data())
    }

    pub fn validation_state(&self) -> Option<&ValidationState> {
        self.as_resolved().map(|r| r.validation_state())
    }
}
