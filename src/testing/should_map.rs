use serde_json::Value;

use crate::{
    testing::{
        failure::TestFailure,
        route_context::{ResolvedRoute, ResolvedRouteContext},
        should_return::{ActionTestContext, ShouldReturnTestBuilder},
    },
    web::routing::{Request, RouteResolver},
};

/// # Route Test Builder
///
/// Entry point for route tests against a resolver.
///
/// ```ignore
/// let routes = RouteTestBuilder::new(&tree);
///
/// routes
///     .should_map(Request::new(Method::GET, "/items/5"))
///     .to("Items", "Get")?
///     .to_argument("id", json!(5))?
///     .to_valid_model_state()?;
/// ```
pub struct RouteTestBuilder<'a> {
    resolver: &'a dyn RouteResolver,
}

impl<'a> RouteTestBuilder<'a> {
    pub fn new(resolver: &'a dyn RouteResolver) -> Self {
        Self { resolver }
    }

    /// Resolves the request and starts a chain of expectations on the outcome.
    pub fn should_map(&self, request: Request) -> ShouldMapTestBuilder {
        let context = ResolvedRouteContext::resolve(self.resolver, &request);

        ShouldMapTestBuilder::new(request, context)
    }
}

/// # Should Map Test Builder
///
/// Expectations on the outcome of a single resolution attempt. Every check gives the builder back so they can be chained.
pub struct ShouldMapTestBuilder {
    request: Request,
    context: ResolvedRouteContext,
}

impl ShouldMapTestBuilder {
    pub fn new(request: Request, context: ResolvedRouteContext) -> Self {
        Self { request, context }
    }

    pub fn context(&self) -> &ResolvedRouteContext {
        &self.context
    }

    fn resolved(&self) -> Result<&ResolvedRoute, TestFailure> {
        match &self.context {
            ResolvedRouteContext::Resolved(route) => Ok(route),
            ResolvedRouteContext::Unresolved(route) => Err(TestFailure::UnresolvedRoute {
                request: self.request.to_string(),
                error: route.error().to_string(),
            }),
        }
    }

    fn mismatch(&self, message: String) -> TestFailure {
        TestFailure::RouteMismatch {
            request: self.request.to_string(),
            message,
        }
    }

    /// How the outcome reads in a failure message.
    fn describe(&self) -> String {
        match &self.context {
            ResolvedRouteContext::Resolved(route) => {
                format!("it resolved to {}.{}", route.controller_name(), route.action())
            }
            ResolvedRouteContext::Unresolved(route) => {
                format!("instead received '{}'", route.error())
            }
        }
    }

    /// # To
    ///
    /// Checks the controller and action. The controller may be given by name (`Items`) or type name (`ItemsController`).
    pub fn to(self, controller: &str, action: &str) -> Result<Self, TestFailure> {
        let route = self.resolved()?;

        let controller_matches = route.controller_name() == controller
            || route.controller_type().type_name == controller;

        if controller_matches && route.action() == action {
            return Ok(self);
        }

        Err(self.mismatch(format!(
            "to match {controller}.{action}, but {}",
            self.describe()
        )))
    }

    pub fn to_action(self, action: &str) -> Result<Self, TestFailure> {
        let route = self.resolved()?;

        if route.action() == action {
            return Ok(self);
        }

        Err(self.mismatch(format!(
            "to match action {action}, but {}",
            self.describe()
        )))
    }

    /// Checks the value bound to an argument.
    pub fn to_argument(self, name: &str, expected: Value) -> Result<Self, TestFailure> {
        let message = match self.resolved()?.route_arguments().get(name) {
            None => Some(format!(
                "to have argument {name}, but the action has no such parameter"
            )),
            Some(argument) => match &argument.value {
                Some(value) if *value == expected => None,
                Some(value) => Some(format!(
                    "to have argument {name} with value {expected}, but instead received {value}"
                )),
                None => Some(format!(
                    "to have argument {name} with value {expected}, but it was not provided"
                )),
            },
        };

        match message {
            None => Ok(self),
            Some(message) => Err(self.mismatch(message)),
        }
    }

    /// Checks that an argument is declared but received no value.
    pub fn to_unprovided_argument(self, name: &str) -> Result<Self, TestFailure> {
        let message = match self.resolved()?.route_arguments().get(name) {
            None => Some(format!(
                "to have argument {name}, but the action has no such parameter"
            )),
            Some(argument) => argument.value.as_ref().map(|value| {
                format!("to leave argument {name} unprovided, but it received {value}")
            }),
        };

        match message {
            None => Ok(self),
            Some(message) => Err(self.mismatch(message)),
        }
    }

    pub fn to_valid_model_state(self) -> Result<Self, TestFailure> {
        let route = self.resolved()?;
        let state = route.validation_state();

        if state.is_valid() {
            return Ok(self);
        }

        let fields: Vec<&str> = state.iter().map(|(key, _)| key.as_str()).collect();

        Err(self.mismatch(format!(
            "to have valid model state, but errors were found for: {}",
            fields.join(", ")
        )))
    }

    pub fn to_invalid_model_state(self) -> Result<Self, TestFailure> {
        let route = self.resolved()?;

        if !route.validation_state().is_valid() {
            return Ok(self);
        }

        Err(self.mismatch("to have invalid model state, but it was valid".to_string()))
    }

    /// Checks that the route exists but does not accept the method of the request.
    pub fn to_non_allowed_method(self) -> Result<Self, TestFailure> {
        if self.context.method_is_not_allowed() {
            return Ok(self);
        }

        Err(self.mismatch(format!(
            "to have a method that is not allowed, but {}",
            self.describe()
        )))
    }

    /// Checks that no route matched, for any reason other than the method.
    pub fn to_not_found(self) -> Result<Self, TestFailure> {
        if !self.context.is_resolved() && !self.context.method_is_not_allowed() {
            return Ok(self);
        }

        Err(self.mismatch(format!("to not be found, but {}", self.describe())))
    }

    /// # And Invoke
    ///
    /// Calls the matched action with the bound route arguments and wraps its result for further checks.
    pub async fn and_invoke(self) -> Result<ShouldReturnTestBuilder, TestFailure> {
        let route = self.resolved()?;

        let controller = route.controller_type();

        let Some(action) = controller.action(route.action()) else {
            return Err(self.mismatch(format!(
                "to match an action declared by {}, but {} was not",
                controller.type_name,
                route.action()
            )));
        };

        let context = ActionTestContext::new(&controller.type_name, &action.name);
        let result = action.invoke(route.route_arguments().clone()).await;

        Ok(ShouldReturnTestBuilder::new(context, result))
    }
}
