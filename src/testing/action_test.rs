use std::{collections::HashMap, sync::Arc};

use serde_json::Value;

use crate::{
    testing::{
        failure::TestFailure,
        should_return::{ActionTestContext, ShouldReturnTestBuilder},
    },
    web::controller::Controller,
};

/// # Action Test Builder
///
/// Calls an action of a controller directly, without going through a router.
///
/// ```ignore
/// let mut values = HashMap::new();
/// values.insert("id".to_string(), json!(5));
///
/// ActionTestBuilder::new(items)
///     .calling("Delete", values)
///     .await?
///     .empty()?;
/// ```
pub struct ActionTestBuilder {
    controller: Arc<Controller>,
}

impl ActionTestBuilder {
    pub fn new(controller: Arc<Controller>) -> Self {
        Self { controller }
    }

    /// # Calling
    ///
    /// Binds the values to the declared parameters of the action and calls it. Parameters without a value are unprovided.
    pub async fn calling(
        &self,
        action: &str,
        values: HashMap<String, Value>,
    ) -> Result<ShouldReturnTestBuilder, TestFailure> {
        let context = ActionTestContext::new(&self.controller.type_name, action);

        let Some(declared) = self.controller.action(action) else {
            return Err(TestFailure::Assertion {
                controller: context.controller,
                action: context.action,
                message: "the action to be declared, but it was not".to_string(),
            });
        };

        let result = declared.invoke(declared.arguments_from(values)).await;

        Ok(ShouldReturnTestBuilder::new(context, result))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::web::{
        Resolution,
        controller::Parameter,
        resolution::{empty_resolution::EmptyResolution, redirect::Redirect},
        routing::binding::ArgumentType,
    };

    fn create_controller() -> Arc<Controller> {
        Arc::new(Controller::new("Items").with_action(
            "Delete",
            vec![Parameter::new("id", ArgumentType::Int)],
            |args| async move {
                match args.get("id").and_then(|a| a.value.as_ref()) {
                    Some(_) => EmptyResolution::status(204).resolve(),
                    None => Redirect::found("/items").resolve(),
                }
            },
        ))
    }

    #[tokio::test]
    async fn calls_the_action_with_values() {
        let actions = ActionTestBuilder::new(create_controller());

        let mut values = HashMap::new();
        values.insert("id".to_string(), json!(5));

        let checked = actions
            .calling("Delete", values)
            .await
            .unwrap()
            .empty()
            .unwrap()
            .with_status_code(204);

        assert!(checked.is_ok());
    }

    #[tokio::test]
    async fn unprovided_values_reach_the_action() {
        let actions = ActionTestBuilder::new(create_controller());

        let failure = actions
            .calling("Delete", HashMap::new())
            .await
            .unwrap()
            .empty()
            .err()
            .unwrap();

        assert_eq!(
            failure.to_string(),
            "When calling Delete action in ItemsController expected action result to be empty, but instead received redirect."
        );
    }

    #[tokio::test]
    async fn undeclared_action_fails() {
        let actions = ActionTestBuilder::new(create_controller());

        let failure = actions.calling("Archive", HashMap::new()).await.err().unwrap();

        assert_eq!(
            failure.to_string(),
            "When calling Archive action in ItemsController expected the action to be declared, but it was not."
        );
    }
}
