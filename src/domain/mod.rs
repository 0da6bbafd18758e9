//! Domain Layer - 领域层
//!
//! 声明式路由表：
//! - route: RouteSpec 及相关类型
//! - election: 电子投票合约
//! - movie: fabcar 电影示例合约

pub mod election;
pub mod movie;
pub mod route;

pub use route::{
    validate_route_table, ArgSpec, EnvelopeData, MutationKind, ParamDefault, ParamSource,
    ParamSpec, PlaceholderFn, ResponsePolicy, RouteError, RouteMethod, RouteSpec, SecondaryCall,
};

/// 完整路由表（启动时构建一次）
pub fn route_table() -> Vec<RouteSpec> {
    let mut routes = election::election_routes();
    routes.extend(movie::movie_routes());
    routes
}
