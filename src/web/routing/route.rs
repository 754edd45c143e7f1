use std::collections::HashMap;

/// A route from a request
#[derive(Debug, Clone)]
pub struct Route {
    /// The full route given
    pub init_route: String,

    /// The route without its query string or trailing slash. Used for lookups in the route tree.
    pub cleaned_route: String,

    /// Any params within the route.
    params: HashMap<String, String>,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.init_route)
    }
}

impl Route {
    fn parse_params(query: &str) -> HashMap<String, String> {
        let mut parsed = HashMap::new();

        /*
           test?x=y&z=x -> x=y&z=x
        */
        for param_item in query.split("&") {
            let Some((key, val)) = param_item.split_once("=") else {
                continue;
            };

            if key.is_empty() {
                continue;
            }

            parsed.insert(String::from(key), String::from(val));
        }

        parsed
    }

    fn clean_route(path: &str) -> String {
        let trimmed = path.trim_end_matches('/');

        if trimmed.is_empty() {
            return "/".to_string();
        }

        if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        }
    }

    pub fn new(init_route: String) -> Self {
        let (path, query) = match init_route.split_once("?") {
            Some((path, query)) => (path, query),
            None => (init_route.as_str(), ""),
        };

        let cleaned_route = Self::clean_route(path);
        let params = Self::parse_params(query);

        Self {
            init_route,
            cleaned_route,
            params,
        }
    }

    pub fn get_param(&self, param_name: &str) -> Option<&String> {
        self.params.get(param_name)
    }

    pub fn get_params(&self) -> &HashMap<String, String> {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::Route;

    #[test]
    fn cleans_route_and_reads_params() {
        let route = Route::new("/tasks/1/?done=true&owner=ann&broken".to_string());

        assert_eq!(route.cleaned_route, "/tasks/1");
        assert_eq!(route.get_param("done"), Some(&"true".to_string()));
        assert_eq!(route.get_param("owner"), Some(&"ann".to_string()));
        assert_eq!(route.get_params().len(), 2);
    }

    #[test]
    fn root_route_stays_root() {
        assert_eq!(Route::new("/".to_string()).cleaned_route, "/");
        assert_eq!(Route::new("?a=1".to_string()).cleaned_route, "/");
        assert_eq!(Route::new("items".to_string()).cleaned_route, "/items");
    }
}
