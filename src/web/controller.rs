use std::{collections::HashMap, pin::Pin, sync::Arc};

use linked_hash_map::LinkedHashMap;
use serde_json::Value;

use crate::web::{Resolution, errors::RoutingError, routing::binding::ArgumentType};

pub type ActionFuture = dyn Future<Output = Box<dyn Resolution>> + Send;

pub type ActionFunction = dyn Fn(ActionArguments) -> Pin<Box<ActionFuture>> + Send + Sync + 'static;

/// Describes an async function that takes in the bound arguments and gives back the Resolution trait.
pub type ActionFnRef = Arc<ActionFunction>;

/// Arguments handed to an action, in declaration order.
pub type ActionArguments = LinkedHashMap<String, ArgumentContext>;

/// # Parameter
///
/// A formal parameter of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub arg_type: ArgumentType,
}

impl Parameter {
    pub fn new(name: &str, arg_type: ArgumentType) -> Self {
        Self {
            name: name.to_string(),
            arg_type,
        }
    }
}

/// # Argument Context
///
/// Pairs a parameter with the value bound to it. A value of `None` marks the argument as unprovided.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentContext {
    pub name: String,
    pub arg_type: ArgumentType,
    pub value: Option<Value>,
}

impl ArgumentContext {
    pub fn is_provided(&self) -> bool {
        self.value.is_some()
    }
}

/// # Action
///
/// An action of a controller: its name, its ordered parameters and the function that produces its resolution.
pub struct Action {
    pub name: String,
    pub parameters: Vec<Parameter>,
    handler: ActionFnRef,
}

impl Action {
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// # Arguments From
    ///
    /// Pairs every declared parameter, in order, with its raw value. Parameters without a raw value are kept as unprovided,
    /// raw values that are not parameters are dropped.
    pub fn arguments_from(&self, mut raw_values: HashMap<String, Value>) -> ActionArguments {
        self.parameters
            .iter()
            .map(|parameter| {
                let context = ArgumentContext {
                    name: parameter.name.clone(),
                    arg_type: parameter.arg_type,
                    value: raw_values.remove(&parameter.name),
                };

                (parameter.name.clone(), context)
            })
            .collect()
    }

    /// # Invoke
    ///
    /// Calls the action with already bound arguments.
    pub async fn invoke(&self, arguments: ActionArguments) -> Box<dyn Resolution> {
        (self.handler)(arguments).await
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// # Controller
///
/// Describes a controller type: its name and the actions it declares.
///
/// ```ignore
/// let items = Controller::new("Items").with_action(
///     "Get",
///     vec![Parameter::new("id", ArgumentType::Int)],
///     |_args| async move { EmptyResolution::status(200).resolve() },
/// );
///
/// //output is ItemsController
/// println!("{}", items.type_name);
/// ```
#[derive(Debug)]
pub struct Controller {
    /// Short name, e.g. `Items`
    pub name: String,

    /// Full type name, e.g. `ItemsController`
    pub type_name: String,

    actions: LinkedHashMap<String, Arc<Action>>,
}

impl Controller {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: format!("{name}Controller"),
            actions: LinkedHashMap::new(),
        }
    }

    /// # Try With Action
    ///
    /// Declares an action. Declaring an action with an existing name replaces it.
    ///
    /// Err(RoutingError::DuplicateParameter) -> a parameter name is declared more than once.
    pub fn try_with_action<F, Fut>(
        mut self,
        name: &str,
        parameters: Vec<Parameter>,
        handler: F,
    ) -> Result<Self, RoutingError>
    where
        F: Fn(ActionArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Box<dyn Resolution>> + Send + 'static,
    {
        for (index, parameter) in parameters.iter().enumerate() {
            if parameters[..index].iter().any(|p| p.name == parameter.name) {
                return Err(RoutingError::DuplicateParameter {
                    action: name.to_string(),
                    parameter: parameter.name.clone(),
                });
            }
        }

        let handler: ActionFnRef = Arc::new(move |args: ActionArguments| {
            Box::pin(handler(args)) as Pin<Box<ActionFuture>>
        });

        let action = Action {
            name: name.to_string(),
            parameters,
            handler,
        };

        self.actions.insert(name.to_string(), Arc::new(action));

        Ok(self)
    }

    /// # With Action
    ///
    /// Declares an action, see `try_with_action`.
    ///
    /// # Panics
    ///
    /// Panics if a parameter name is declared more than once. Intended for test setup.
    pub fn with_action<F, Fut>(self, name: &str, parameters: Vec<Parameter>, handler: F) -> Self
    where
        F: Fn(ActionArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Box<dyn Resolution>> + Send + 'static,
    {
        let controller_name = self.name.clone();

        match self.try_with_action(name, parameters, handler) {
            Ok(controller) => controller,
            Err(e) => panic!("When declaring action '{name}' on '{controller_name}' an error occurred because '{e}'"),
        }
    }

    pub fn action(&self, name: &str) -> Option<Arc<Action>> {
        self.actions.get(name).cloned()
    }

    pub fn actions(&self) -> impl Iterator<Item = &Arc<Action>> {
        self.actions.values()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::web::resolution::{empty_resolution::EmptyResolution, json_resolution::JsonResolution};

    fn create_controller() -> Controller {
        Controller::new("Orders").with_action(
            "Search",
            vec![
                Parameter::new("customer", ArgumentType::Text),
                Parameter::new("page", ArgumentType::Int),
                Parameter::new("open", ArgumentType::Bool),
            ],
            |args| async move {
                let provided: Vec<String> = args
                    .values()
                    .filter(|a| a.is_provided())
                    .map(|a| a.name.clone())
                    .collect();

                match JsonResolution::serialize(provided) {
                    Ok(json) => json.resolve(),
                    Err(_) => EmptyResolution::status(500).resolve(),
                }
            },
        )
    }

    #[test]
    fn arguments_follow_declaration_order() {
        let controller = create_controller();
        let action = controller.action("Search").unwrap();

        let mut raw = HashMap::new();
        raw.insert("open".to_string(), json!(true));
        raw.insert("customer".to_string(), json!("ann"));
        raw.insert("unknown".to_string(), json!(1));

        let args = action.arguments_from(raw);
        let names: Vec<&String> = args.keys().collect();

        assert_eq!(names, ["customer", "page", "open"]);
        assert_eq!(args["customer"].value, Some(json!("ann")));
        assert!(!args["page"].is_provided());
        assert_eq!(args["page"].arg_type, ArgumentType::Int);
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        let result = Controller::new("Items").try_with_action(
            "Get",
            vec![
                Parameter::new("id", ArgumentType::Int),
                Parameter::new("id", ArgumentType::Int),
            ],
            |_args| async move { EmptyResolution::status(200).resolve() },
        );

        assert_eq!(
            result.err(),
            Some(RoutingError::DuplicateParameter {
                action: "Get".to_string(),
                parameter: "id".to_string(),
            })
        );
    }

    #[test]
    #[should_panic(expected = "declares the parameter id more than once")]
    fn with_action_panics_on_duplicate_parameters() {
        Controller::new("Items").with_action(
            "Get",
            vec![
                Parameter::new("id", ArgumentType::Int),
                Parameter::new("id", ArgumentType::Text),
            ],
            |_args| async move { EmptyResolution::status(200).resolve() },
        );
    }

    #[tokio::test]
    async fn invoke_passes_arguments() {
        let controller = create_controller();
        let action = controller.action("Search").unwrap();

        let mut raw = HashMap::new();
        raw.insert("page".to_string(), json!(2));

        let result = action.invoke(action.arguments_from(raw)).await;

        let json = result
            .into_any()
            .downcast::<JsonResolution>()
            .expect("expected a json result");

        assert_eq!(json.value(), &json!(["page"]));
        assert_eq!(controller.type_name, "OrdersController");
        assert_eq!(controller.actions().count(), 1);
    }
}
