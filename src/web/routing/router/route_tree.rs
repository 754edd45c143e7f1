use std::sync::Arc;

use linked_hash_map::LinkedHashMap;
use tracing::debug;

use crate::web::{
    controller::Controller,
    errors::RoutingError,
    resolution::get_status,
    routing::{
        Method, Request, RouteData, RouteMatch, RouteResolver,
        binding::bind_arguments,
        router::{EndPoint, RouteNode},
    },
};

/// # Route tree
///
/// Trie based tree that separates a given route into nodes and contains information about their nodes such as:
///
/// * id (the part of the route)
/// * EndPoint (controller and action)
///
/// A part wrapped in braces, `{id}`, matches any single part and captures it. `{*}` or `{*name}` captures the rest of the route.
///
/// Exact parts are preferred over variable parts, there is no backtracking.
///
/// #### Mapping a Route
///
/// ```ignore
/// let items = Arc::new(Controller::new("Items").with_action(/* --snip-- */));
///
/// let mut tree = RouteTree::new();
/// tree.map("/items/{id}", Method::GET, &items, "Get")?;
/// ```
///
/// #### Resolving a Request
///
/// The tree implements `RouteResolver`, a request resolves into a `RouteMatch` or a diagnostic string.
pub struct RouteTree {
    /// Route node for /
    pub root: RouteNode,
}

impl Default for RouteTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTree {
    pub fn new() -> Self {
        Self {
            root: RouteNode::new("/".to_string(), None),
        }
    }

    /// Add a route to the tree. Takes in the route and an optional endpoint.
    ///
    /// Without an endpoint the nodes are still created, but the route resolves to nothing.
    pub fn add_route(
        &mut self,
        route: &str,
        end_point: Option<(Method, EndPoint)>,
    ) -> Result<(), RoutingError> {
        if route.is_empty() {
            return Err(RoutingError::InvalidRoute("empty".to_string()));
        }

        let mut node = &mut self.root;

        //break the route into digestable parts (nodes)
        let mut route_parts = route.split("/").filter(|p| !p.is_empty()).peekable();

        while let Some(rte_part) = route_parts.next() {
            //a wildcard has to be the last part
            let is_last = route_parts.peek().is_none();

            if rte_part.starts_with("{*") && !is_last {
                return Err(RoutingError::InvalidRoute(format!(
                    "{rte_part} must be the last part of the route"
                )));
            }

            node = node.child_or_insert(rte_part)?;
        }

        match end_point {
            Some((method, end_point)) => node.insert_resolution(method, end_point),
            None => Ok(()),
        }
    }

    /// # Map
    ///
    /// Maps the route and method to an action of the controller.
    ///
    /// Fails if the controller does not declare the action or the route already has an endpoint for the method.
    pub fn map(
        &mut self,
        route: &str,
        method: Method,
        controller: &Arc<Controller>,
        action: &str,
    ) -> Result<(), RoutingError> {
        if controller.action(action).is_none() {
            return Err(RoutingError::ActionMissing {
                controller: controller.type_name.clone(),
                action: action.to_string(),
            });
        }

        let end_point = EndPoint::new(controller.clone(), action, route);

        self.add_route(route, Some((method, end_point)))
    }

    /// Maps a route and method combination.
    ///
    /// # Panics
    ///
    /// Panics if the route cannot be mapped. Intended for test setup.
    pub fn map_or_panic(
        &mut self,
        route: &str,
        method: Method,
        controller: &Arc<Controller>,
        action: &str,
    ) -> () {
        if let Err(e) = self.map(route, method, controller, action) {
            panic!("When mapping route '{route}' an error occurred because '{e}'");
        }
    }

    /// # Get Route
    ///
    /// Gets the node for a cleaned route, along with the values of the variable parts it passed through.
    ///
    /// Assume we have added a route to get a user by their ID such as "/api/admin/user/{id}"
    ///
    /// ```ignore
    /// //--snip--
    /// let (node, variables) = tree.get_route("/api/admin/user/12").unwrap();
    ///
    /// //output is 12
    /// println!("{}", variables["id"]);
    /// ```
    pub fn get_route(&self, full_route: &str) -> Option<(&RouteNode, LinkedHashMap<String, String>)> {
        let mut variables = LinkedHashMap::new();

        //start with the root and work our way down
        let mut current_node = &self.root;

        let route_parts: Vec<&str> = full_route.split("/").filter(|p| !p.is_empty()).collect();

        for (index, route_part) in route_parts.iter().enumerate() {
            if let Some(child) = current_node.brw_child(route_part) {
                current_node = child;
                continue;
            }

            //nothing further to do if there is no var child
            let var_child = current_node.var_child.as_deref()?;

            if var_child.is_wild_card() {
                variables.insert(
                    var_child.var_name().to_string(),
                    route_parts[index..].join("/"),
                );

                return Some((var_child, variables));
            }

            variables.insert(var_child.var_name().to_string(), route_part.to_string());

            current_node = var_child;
        }

        Some((current_node, variables))
    }
}

impl RouteResolver for RouteTree {
    fn resolve(&self, request: &Request) -> Result<RouteMatch, String> {
        let path = &request.route.cleaned_route;

        let not_found = || {
            format!(
                "404 {}: no route matches {} {path}",
                get_status(&404),
                request.method
            )
        };

        let (node, variables) = self.get_route(path).ok_or_else(not_found)?;

        if node.resolutions.is_empty() {
            return Err(not_found());
        }

        let Some(end_point) = node.brw_resolution(&request.method) else {
            debug!(method = %request.method, path = %path, "route exists without the method");

            return Err(format!(
                "405 {}: {} {path} (allowed: {})",
                get_status(&405),
                request.method,
                node.allowed_methods().join(", ")
            ));
        };

        let controller = end_point.controller.clone();

        let action = controller.action(&end_point.action).ok_or_else(|| {
            format!(
                "{} maps to {}.{}, which is not declared",
                end_point.template, controller.type_name, end_point.action
            )
        })?;

        let (raw_route_values, validation_state) = bind_arguments(&action, &variables, request);

        Ok(RouteMatch {
            controller_name: controller.name.clone(),
            controller_type: controller,
            action: end_point.action.clone(),
            raw_route_values,
            route_data: RouteData {
                method: request.method.clone(),
                template: end_point.template.clone(),
                values: variables,
            },
            validation_state,
        })
    }
}
