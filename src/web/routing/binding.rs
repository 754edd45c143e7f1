use std::collections::{BTreeMap, HashMap};

use linked_hash_map::LinkedHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::web::{controller::Action, routing::Request};

/// # Argument Type
///
/// The declared type of an action parameter. Raw route, query and body values are converted into this type while binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    Int,
    Float,
    Bool,
    Text,
    /// Bound from the request body.
    Json,
}

impl ArgumentType {
    /// # Bind
    ///
    /// Converts a raw string into a value of this type.
    ///
    /// None -> if the raw value cannot be represented by the type.
    pub fn bind(&self, raw: &str) -> Option<Value> {
        match self {
            ArgumentType::Int => raw.parse::<i64>().ok().map(Value::from),
            ArgumentType::Float => raw
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            ArgumentType::Bool => raw.parse::<bool>().ok().map(Value::Bool),
            ArgumentType::Text => Some(Value::String(raw.to_string())),
            ArgumentType::Json => serde_json::from_str(raw).ok(),
        }
    }
}

impl std::fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let t = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Text => "string",
            Self::Json => "json",
        };

        write!(f, "{t}")
    }
}

/// # Validation State
///
/// A snapshot of binding errors, keyed by field path. An empty state is a valid one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records an error message for the field.
    pub fn add_error(&mut self, key: &str, message: String) {
        self.errors.entry(key.to_string()).or_default().push(message);
    }

    pub fn errors_for(&self, key: &str) -> Option<&[String]> {
        self.errors.get(key).map(|e| e.as_slice())
    }

    /// Count of fields with at least one error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.errors.iter()
    }
}

/// # Bind Arguments
///
/// Collects the raw values for each parameter of the action.
///
/// Route variables win over query params. `Json` parameters are read from the body.
///
/// A parameter without any raw value is left out of the returned map, a value that cannot be converted is left out too and recorded in the validation state.
pub fn bind_arguments(
    action: &Action,
    variables: &LinkedHashMap<String, String>,
    request: &Request,
) -> (HashMap<String, Value>, ValidationState) {
    let mut values = HashMap::new();
    let mut state = ValidationState::new();

    for parameter in &action.parameters {
        if parameter.arg_type == ArgumentType::Json {
            let Some(body) = request.body.as_ref() else {
                continue;
            };

            match serde_json::from_slice::<Value>(body) {
                Ok(value) => {
                    values.insert(parameter.name.clone(), value);
                }
                Err(_) => state.add_error(
                    &parameter.name,
                    "The request body is not valid JSON.".to_string(),
                ),
            }

            continue;
        }

        let raw = variables
            .get(&parameter.name)
            .or_else(|| request.route.get_param(&parameter.name));

        let Some(raw) = raw else {
            continue;
        };

        match parameter.arg_type.bind(raw) {
            Some(value) => {
                values.insert(parameter.name.clone(), value);
            }
            None => state.add_error(
                &parameter.name,
                format!("The value '{raw}' is not valid for {}.", parameter.name),
            ),
        }
    }

    (values, state)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::web::{
        controller::{Controller, Parameter},
        resolution::empty_resolution::EmptyResolution,
        routing::Method,
        Resolution,
    };

    fn create_action() -> std::sync::Arc<Action> {
        let controller = Controller::new("Items").with_action(
            "Update",
            vec![
                Parameter::new("id", ArgumentType::Int),
                Parameter::new("notify", ArgumentType::Bool),
                Parameter::new("item", ArgumentType::Json),
            ],
            |_args| async move { EmptyResolution::status(204).resolve() },
        );

        controller.action("Update").unwrap()
    }

    #[test]
    fn converts_raw_values() {
        assert_eq!(ArgumentType::Int.bind("42"), Some(json!(42)));
        assert_eq!(ArgumentType::Int.bind("4.2"), None);
        assert_eq!(ArgumentType::Float.bind("4.5"), Some(json!(4.5)));
        assert_eq!(ArgumentType::Bool.bind("true"), Some(json!(true)));
        assert_eq!(ArgumentType::Text.bind("abc"), Some(json!("abc")));
        assert_eq!(ArgumentType::Json.bind("{\"a\":1}"), Some(json!({ "a": 1 })));
    }

    #[test]
    fn binds_from_variables_query_and_body() {
        let action = create_action();

        let mut variables = LinkedHashMap::new();
        variables.insert("id".to_string(), "7".to_string());

        let request = Request::new(Method::PUT, "/items/7?notify=false&id=99")
            .with_json_body(&json!({ "name": "lamp" }))
            .unwrap();

        let (values, state) = bind_arguments(&action, &variables, &request);

        assert!(state.is_valid());
        assert_eq!(values.get("id"), Some(&json!(7)));
        assert_eq!(values.get("notify"), Some(&json!(false)));
        assert_eq!(values.get("item"), Some(&json!({ "name": "lamp" })));
    }

    #[test]
    fn invalid_values_are_recorded() {
        let action = create_action();

        let mut variables = LinkedHashMap::new();
        variables.insert("id".to_string(), "abc".to_string());

        let request = Request::new(Method::PUT, "/items/abc").with_body(b"{oops".to_vec());

        let (values, state) = bind_arguments(&action, &variables, &request);

        assert!(values.is_empty());
        assert_eq!(state.len(), 2);
        assert_eq!(
            state.errors_for("id"),
            Some(&["The value 'abc' is not valid for id.".to_string()][..])
        );
        assert!(state.errors_for("item").is_some());
        assert!(state.errors_for("notify").is_none());
    }
}
