use futures::StreamExt;
use serde_json::Value;
use tracing::debug;

use crate::{
    testing::failure::TestFailure,
    web::{
        Resolution, ResultKind,
        resolution::{
            empty_resolution::EmptyResolution, json_resolution::JsonResolution,
            redirect::Redirect,
        },
    },
};

/// # Action Test Context
///
/// Which action produced the result under test. Used for failure messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTestContext {
    /// Controller type name, e.g. `ItemsController`
    pub controller: String,
    pub action: String,
}

impl ActionTestContext {
    pub fn new(controller: &str, action: &str) -> Self {
        Self {
            controller: controller.to_string(),
            action: action.to_string(),
        }
    }

    fn failure(&self, message: String) -> TestFailure {
        TestFailure::Assertion {
            controller: self.controller.clone(),
            action: self.action.clone(),
            message,
        }
    }
}

/// # Should Return Test Builder
///
/// Wraps the result of an action before its kind has been checked.
///
/// Checking the kind hands back an `AndProvideTestBuilder` typed by that kind, any type implementing `ResultKind` works.
///
/// ```ignore
/// let builder = ShouldReturnTestBuilder::new(
///     ActionTestContext::new("ItemsController", "Delete"),
///     EmptyResolution::status(204).resolve(),
/// );
///
/// builder.empty()?.with_status_code(204)?;
/// ```
pub struct ShouldReturnTestBuilder {
    context: ActionTestContext,
    result: Box<dyn Resolution>,
}

impl ShouldReturnTestBuilder {
    pub fn new(context: ActionTestContext, result: Box<dyn Resolution>) -> Self {
        Self { context, result }
    }

    pub fn context(&self) -> &ActionTestContext {
        &self.context
    }

    /// The runtime kind of the wrapped result.
    pub fn actual_kind(&self) -> &'static str {
        self.result.kind()
    }

    /// # Result Of Kind
    ///
    /// Checks that the result is a `K`.
    ///
    /// Err(TestFailure::KindMismatch) -> naming the controller, the action, the expected and the actual kind.
    pub fn result_of_kind<K>(self) -> Result<AndProvideTestBuilder<K>, TestFailure>
    where
        K: ResultKind,
    {
        let actual = self.result.kind();

        match self.result.into_any().downcast::<K>() {
            Ok(result) => {
                debug!(
                    controller = %self.context.controller,
                    action = %self.context.action,
                    kind = K::KIND,
                    "action result kind matched"
                );

                Ok(AndProvideTestBuilder {
                    context: self.context,
                    result,
                })
            }
            Err(_) => Err(TestFailure::KindMismatch {
                controller: self.context.controller,
                action: self.context.action,
                expected: K::KIND,
                actual,
            }),
        }
    }

    /// Checks that the result is a `K`.
    ///
    /// # Panics
    ///
    /// Panics with the failure message if it is not.
    pub fn result_of_kind_or_panic<K>(self) -> AndProvideTestBuilder<K>
    where
        K: ResultKind,
    {
        match self.result_of_kind::<K>() {
            Ok(builder) => builder,
            Err(e) => panic!("{e}"),
        }
    }

    /// Tests whether the action result is an `EmptyResolution`.
    pub fn empty(self) -> Result<AndProvideTestBuilder<EmptyResolution>, TestFailure> {
        self.result_of_kind::<EmptyResolution>()
    }

    /// Tests whether the action result is a `Redirect`.
    pub fn redirect(self) -> Result<AndProvideTestBuilder<Redirect>, TestFailure> {
        self.result_of_kind::<Redirect>()
    }

    /// Tests whether the action result is a `JsonResolution`.
    pub fn json(self) -> Result<AndProvideTestBuilder<JsonResolution>, TestFailure> {
        self.result_of_kind::<JsonResolution>()
    }
}

/// # And Provide Test Builder
///
/// The result after its kind was checked. Further checks are specific to `K`.
pub struct AndProvideTestBuilder<K> {
    context: ActionTestContext,
    result: Box<K>,
}

impl<K> AndProvideTestBuilder<K>
where
    K: ResultKind,
{
    pub fn context(&self) -> &ActionTestContext {
        &self.context
    }

    pub fn result(&self) -> &K {
        &self.result
    }

    /// Ends the chain and gives back the result.
    pub fn and_provide(self) -> K {
        *self.result
    }

    /// # Passing
    ///
    /// Checks the result against a predicate. The description ends up in the failure message.
    pub fn passing<P>(self, predicate: P, description: &str) -> Result<Self, TestFailure>
    where
        P: FnOnce(&K) -> bool,
    {
        if predicate(&self.result) {
            return Ok(self);
        }

        Err(self.context.failure(format!(
            "action result to pass '{description}', but it did not"
        )))
    }

    /// # With Header
    ///
    /// Checks that the result sends the header with the value. Header names are matched case-insensitively.
    pub fn with_header(self, name: &str, value: &str) -> Result<Self, TestFailure> {
        let headers = self.result.get_headers();

        let found = headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone());

        let message = match found {
            Some(Some(actual)) if actual == value => return Ok(self),
            Some(Some(actual)) => format!(
                "action result to have header '{name}' with value '{value}', but instead received '{actual}'"
            ),
            Some(None) => format!(
                "action result to have header '{name}' with value '{value}', but it has no value"
            ),
            None => format!(
                "action result to have header '{name}' with value '{value}', but it was missing"
            ),
        };

        Err(self.context.failure(message))
    }

    /// Drains the content stream of the result.
    pub async fn content(&self) -> Vec<u8> {
        self.result.get_content().concat().await
    }

    /// Checks that the content stream of the result yields no bytes.
    pub async fn without_content(self) -> Result<Self, TestFailure> {
        let content = self.content().await;

        if content.is_empty() {
            return Ok(self);
        }

        Err(self.context.failure(format!(
            "action result to have no content, but instead received {} bytes",
            content.len()
        )))
    }

    fn status_code(self, expected: i32, actual: i32) -> Result<Self, TestFailure> {
        if expected == actual {
            return Ok(self);
        }

        Err(self.context.failure(format!(
            "action result to have status code {expected}, but instead received {actual}"
        )))
    }
}

impl AndProvideTestBuilder<EmptyResolution> {
    pub fn with_status_code(self, code: i32) -> Result<Self, TestFailure> {
        let actual = self.result.status_code();
        self.status_code(code, actual)
    }
}

impl AndProvideTestBuilder<Redirect> {
    pub fn with_status_code(self, code: i32) -> Result<Self, TestFailure> {
        let actual = self.result.status_code();
        self.status_code(code, actual)
    }

    /// Checks the `Location` the redirect points to.
    pub fn to_location(self, url: &str) -> Result<Self, TestFailure> {
        match self.result.location() {
            Some(location) if location == url => Ok(self),
            Some(location) => Err(self.context.failure(format!(
                "redirect result to point to '{url}', but instead it points to '{location}'"
            ))),
            None => Err(self.context.failure(format!(
                "redirect result to point to '{url}', but it has no location"
            ))),
        }
    }
}

impl AndProvideTestBuilder<JsonResolution> {
    pub fn with_status_code(self, code: i32) -> Result<Self, TestFailure> {
        let actual = self.result.status_code();
        self.status_code(code, actual)
    }

    /// Checks the serialized value of the result.
    pub fn with_json(self, expected: &Value) -> Result<Self, TestFailure> {
        if self.result.value() == expected {
            return Ok(self);
        }

        Err(self.context.failure(format!(
            "json result to be {expected}, but instead received {}",
            self.result.value()
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;

    use futures::{Stream, stream};
    use linked_hash_map::LinkedHashMap;
    use serde_json::json;

    use super::*;
    use crate::web::resolution::redirect::RedirectType;

    /// A kind the builder knows nothing about.
    struct TeapotResolution;

    impl Resolution for TeapotResolution {
        fn kind(&self) -> &'static str {
            Self::KIND
        }

        fn get_headers(&self) -> LinkedHashMap<String, Option<String>> {
            LinkedHashMap::new()
        }

        fn get_content(&self) -> Pin<Box<dyn Stream<Item = Vec<u8>> + Send>> {
            Box::pin(stream::iter(vec![b"short".to_vec(), b" and stout".to_vec()]))
        }

        fn into_any(self: Box<Self>) -> Box<dyn std::any::Any + Send> {
            self
        }
    }

    impl ResultKind for TeapotResolution {
        const KIND: &'static str = "teapot";
    }

    fn create_builder(result: Box<dyn Resolution>) -> ShouldReturnTestBuilder {
        ShouldReturnTestBuilder::new(ActionTestContext::new("ItemsController", "Get"), result)
    }

    #[test]
    fn empty_matches_empty_result() {
        let builder = create_builder(EmptyResolution::status(204).resolve());

        assert_eq!(builder.actual_kind(), "empty");

        let checked = builder.empty().unwrap().with_status_code(204).unwrap();

        assert_eq!(checked.and_provide(), EmptyResolution::status(204));
    }

    #[test]
    fn empty_against_redirect_is_a_kind_mismatch() {
        let failure = create_builder(Redirect::found("/login").resolve())
            .empty()
            .err()
            .unwrap();

        assert_eq!(
            failure,
            TestFailure::KindMismatch {
                controller: "ItemsController".to_string(),
                action: "Get".to_string(),
                expected: "empty",
                actual: "redirect",
            }
        );
    }

    #[test]
    #[should_panic(expected = "expected action result to be json, but instead received empty")]
    fn or_panic_raises_the_failure() {
        create_builder(EmptyResolution::status(200).resolve())
            .result_of_kind_or_panic::<JsonResolution>();
    }

    #[test]
    fn open_kinds_work_without_builder_changes() {
        let checked = create_builder(TeapotResolution.resolve())
            .result_of_kind::<TeapotResolution>()
            .unwrap();

        assert_eq!(checked.result().kind(), "teapot");

        let failure = create_builder(TeapotResolution.resolve())
            .redirect()
            .err()
            .unwrap();

        assert!(failure.to_string().contains("received teapot"));
    }

    #[test]
    fn kind_specific_checks() {
        let redirect = create_builder(
            Redirect::new(RedirectType::PermanentRedirect("/new".to_string())).resolve(),
        )
        .redirect()
        .unwrap()
        .with_status_code(308)
        .unwrap();

        let failure = redirect.to_location("/old").err().unwrap();

        assert_eq!(
            failure.to_string(),
            "When calling Get action in ItemsController expected redirect result to point to '/old', but instead it points to '/new'."
        );

        let json = create_builder(JsonResolution::serialize(json!({ "id": 5 })).unwrap().resolve())
            .json()
            .unwrap();

        assert!(json.with_json(&json!({ "id": 5 })).is_ok());

        let status = create_builder(EmptyResolution::status(200).resolve())
            .empty()
            .unwrap()
            .with_status_code(404)
            .err()
            .unwrap();

        assert!(status.to_string().contains("status code 404, but instead received 200"));
    }

    #[test]
    fn headers_are_checked_on_any_kind() {
        let json = create_builder(JsonResolution::serialize(json!([1, 2])).unwrap().resolve())
            .json()
            .unwrap()
            .with_header("content-type", "application/json")
            .unwrap()
            .with_header("Status", "200 OK");

        assert!(json.is_ok());

        let wrong = create_builder(Redirect::found("/login").resolve())
            .redirect()
            .unwrap()
            .with_header("Location", "/home")
            .err()
            .unwrap();

        assert_eq!(
            wrong.to_string(),
            "When calling Get action in ItemsController expected action result to have header 'Location' with value '/home', but instead received '/login'."
        );

        let missing = create_builder(TeapotResolution.resolve())
            .result_of_kind::<TeapotResolution>()
            .unwrap()
            .with_header("Content-Type", "tea")
            .err()
            .unwrap();

        assert!(missing.to_string().ends_with("but it was missing."));
    }

    #[test]
    fn passing_uses_the_description() {
        let failure = create_builder(EmptyResolution::status(500).resolve())
            .empty()
            .unwrap()
            .passing(|r| r.status_code() < 500, "no server error")
            .err()
            .unwrap();

        assert!(failure.to_string().contains("'no server error'"));
    }

    #[tokio::test]
    async fn empty_result_has_no_content() {
        let checked = create_builder(EmptyResolution::status(204).resolve())
            .empty()
            .unwrap()
            .without_content()
            .await;

        assert!(checked.is_ok());

        let teapot = create_builder(TeapotResolution.resolve())
            .result_of_kind::<TeapotResolution>()
            .unwrap();

        assert_eq!(teapot.content().await, b"short and stout".to_vec());

        let failure = teapot.without_content().await.err().unwrap();

        assert!(failure.to_string().contains("received 15 bytes"));
    }
}
