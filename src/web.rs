pub mod controller;
pub mod errors;
pub mod resolution;
pub mod routing;

pub use self::{
    controller::Controller,
    resolution::{Resolution, ResultKind},
    routing::{Method, Request, RouteResolver, router::RouteTree},
};
