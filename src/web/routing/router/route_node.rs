use std::{collections::HashMap, sync::Arc};

use crate::web::{
    errors::RoutingError,
    routing::{Method, router::EndPoint},
};

/// # Is Variable Id
///
/// Takes a reference to a string and checks for a pattern on the string that:
///
/// true -> when the ID is of a variable type
/// false -> when the ID is not of a variable type
fn is_variable_id(id: &str) -> bool {
    id.len() > 2 && id.starts_with("{") && id.ends_with("}")
}

pub struct RouteNode {
    // The ID of the node, usually part of a larger string. Ex. api/admin/users -> ID's may be (api, admin, users)
    pub id: String,

    /// A map of resolutions, used to find the endpoint to call for a request. Only one endpoint may exist per Method for THIS node.
    pub resolutions: HashMap<Method, Arc<EndPoint>>,

    /// Is Variable
    pub is_var: bool,

    /// The children of this node.
    ///
    /// Assume that the node is part of a tree for ["api/admin/users", "api/partner/users", "api/agency/users"] and this node is "api"
    ///
    /// The children of this node would be ["admin", "partner", "agency"]
    pub children: HashMap<String, RouteNode>,

    /// The variable based child for this route node.
    pub var_child: Option<Box<RouteNode>>,
}

/// A node from a Route Tree
impl RouteNode {
    /// # New
    ///
    /// Creates a new route node struct, takes an ID (part of a URL), takes a Optional Method and Endpoint tuple.
    pub fn new(id: String, resolution: Option<(Method, EndPoint)>) -> Self {
        let mut resolutions = HashMap::new();

        if let Some((method, end_point)) = resolution {
            resolutions.insert(method, Arc::new(end_point));
        }

        let is_var = is_variable_id(&id);

        Self {
            id,
            resolutions,
            is_var,
            children: HashMap::new(),
            var_child: None,
        }
    }

    /// # Borrow Resolution
    ///
    /// None -> if the resolution for the given method does not exist.
    ///
    /// Some -> If the resolution exist for the given method. Clones the Arc
    pub fn brw_resolution(&self, method: &Method) -> Option<Arc<EndPoint>> {
        self.resolutions.get(method).cloned()
    }

    /// # Borrow Child
    ///
    /// None -> If the child does not exist
    ///
    /// Some -> If the child with the ID exist.
    pub fn brw_child(&self, id: &str) -> Option<&RouteNode> {
        self.children.get(id)
    }

    /// # Insert Resolution
    ///
    /// Inserts a resolution to an existing route node. Fails if the method already has one.
    pub fn insert_resolution(
        &mut self,
        method: Method,
        endpoint: EndPoint,
    ) -> Result<(), RoutingError> {
        if self.resolutions.contains_key(&method) {
            return Err(RoutingError::Exist);
        }

        self.resolutions.insert(method, Arc::new(endpoint));

        Ok(())
    }

    /// # Child Or Insert
    ///
    /// Gets the child for the ID, adding it first if it is missing.
    ///
    /// A node has a single variable child, so two different variable names at the same depth are rejected.
    pub fn child_or_insert(&mut self, id: &str) -> Result<&mut RouteNode, RoutingError> {
        if !is_variable_id(id) {
            return Ok(self
                .children
                .entry(id.to_string())
                .or_insert_with(|| RouteNode::new(id.to_string(), None)));
        }

        let var_child = self
            .var_child
            .get_or_insert_with(|| Box::new(RouteNode::new(id.to_string(), None)));

        if var_child.id != id {
            return Err(RoutingError::InvalidRoute(format!(
                "{id} conflicts with the variable {} at the same position",
                var_child.id
            )));
        }

        Ok(&mut **var_child)
    }

    /// # Variable Name
    ///
    /// The name inside the braces: `{id}` -> `id`, `{*path}` -> `path`, `{*}` -> `*`
    pub fn var_name(&self) -> &str {
        let inner = self.id.trim_start_matches('{').trim_end_matches('}');

        match inner.strip_prefix('*') {
            Some(name) if !name.is_empty() => name,
            _ => inner,
        }
    }

    /// A variable node that swallows the rest of the route.
    pub fn is_wild_card(&self) -> bool {
        self.is_var && self.id.starts_with("{*")
    }

    /// The methods this node can resolve, sorted.
    pub fn allowed_methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.resolutions.keys().map(|m| m.to_string()).collect();
        methods.sort();
        methods
    }
}

#[cfg(test)]
mod tests {
    use super::RouteNode;

    #[test]
    fn variable_names() {
        assert_eq!(RouteNode::new("{id}".to_string(), None).var_name(), "id");
        assert_eq!(RouteNode::new("{*path}".to_string(), None).var_name(), "path");
        assert_eq!(RouteNode::new("{*}".to_string(), None).var_name(), "*");

        assert!(RouteNode::new("{*}".to_string(), None).is_wild_card());
        assert!(!RouteNode::new("{id}".to_string(), None).is_wild_card());
        assert!(!RouteNode::new("{}".to_string(), None).is_var);
    }

    #[test]
    fn conflicting_variables_are_rejected() {
        let mut node = RouteNode::new("/".to_string(), None);

        assert!(node.child_or_insert("{id}").is_ok());
        assert!(node.child_or_insert("{id}").is_ok());
        assert!(node.child_or_insert("{slug}").is_err());
        assert!(node.child_or_insert("static").is_ok());
        assert_eq!(node.children.len(), 1);
    }
}
