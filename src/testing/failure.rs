use crate::testing::route_context::is_method_not_allowed;

/// # Test Failure
///
/// A failed expectation, with enough context to read the test report without the test source.
///
/// Nothing retries or recovers from a failure, it ends the assertion chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestFailure {
    /// The route was expected to resolve but the resolver gave back a diagnostic.
    UnresolvedRoute { request: String, error: String },

    /// The route resolved (or failed) differently than expected.
    RouteMismatch { request: String, message: String },

    /// The action result is of a different kind than expected.
    KindMismatch {
        controller: String,
        action: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A check on the action result failed.
    Assertion {
        controller: String,
        action: String,
        message: String,
    },
}

impl std::fmt::Display for TestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self {
            TestFailure::UnresolvedRoute { request, error } if is_method_not_allowed(error) => {
                write!(
                    f,
                    "Expected route '{request}' to be resolved, but the method is not allowed: {error}"
                )
            }
            TestFailure::UnresolvedRoute { request, error } => {
                write!(f, "Expected route '{request}' to be resolved, but it was not: {error}")
            }
            TestFailure::RouteMismatch { request, message } => {
                write!(f, "Expected route '{request}' {message}.")
            }
            TestFailure::KindMismatch {
                controller,
                action,
                expected,
                actual,
            } => write!(
                f,
                "When calling {action} action in {controller} expected action result to be {expected}, but instead received {actual}."
            ),
            TestFailure::Assertion {
                controller,
                action,
                message,
            } => write!(f, "When calling {action} action in {controller} expected {message}."),
        }
    }
}

impl std::error::Error for TestFailure {}
