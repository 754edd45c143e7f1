pub mod endpoint;
pub mod route_node;
pub mod route_tree;

pub use endpoint::EndPoint;
pub use route_node::RouteNode;
pub use route_tree::RouteTree;
