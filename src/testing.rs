pub mod action_test;
pub mod failure;
pub mod route_context;
pub mod should_map;
pub mod should_return;

pub use self::{
    action_test::ActionTestBuilder,
    failure::TestFailure,
    route_context::{ResolvedRoute, ResolvedRouteContext, UnresolvedReason, UnresolvedRoute},
    should_map::{RouteTestBuilder, ShouldMapTestBuilder},
    should_return::{ActionTestContext, AndProvideTestBuilder, ShouldReturnTestBuilder},
};
