//! HTTP Routes
//!
//! 账本路由全部由声明式路由表生成，同一路径的 GET/POST 合并到一个 MethodRouter。
//!
//! 额外端点：
//! - /ping   GET   健康检查
//! - /       GET   首页文件
//! - 其他路径      静态文件目录

use axum::{
    extract::State,
    routing::{get, MethodFilter, MethodRouter},
    Router,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

use super::extract::ExtractParams;
use super::handlers;
use super::state::AppState;
use crate::domain::{RouteMethod, RouteSpec};

fn method_filter(method: RouteMethod) -> MethodFilter {
    match method {
        RouteMethod::Get => MethodFilter::GET,
        RouteMethod::Post => MethodFilter::POST,
    }
}

/// 创建所有路由
pub fn create_routes(
    routes: Vec<RouteSpec>,
    static_dir: &Path,
    index_file: &Path,
) -> Router<Arc<AppState>> {
    let mut grouped: BTreeMap<&'static str, MethodRouter<Arc<AppState>>> = BTreeMap::new();

    for route in routes {
        let path = route.path;
        let filter = method_filter(route.method);
        let route = Arc::new(route);

        let handler = move |State(state): State<Arc<AppState>>, params: ExtractParams| {
            let route = route.clone();
            async move { handlers::dispatch_route(state, route, params).await }
        };

        let method_router = grouped.remove(path).unwrap_or_else(MethodRouter::new);
        grouped.insert(path, method_router.on(filter, handler));
    }

    let router = grouped
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            router.route(path, method_router)
        });

    router
        .route("/ping", get(handlers::ping))
        .route_service("/", ServeFile::new(index_file))
        .fallback_service(ServeDir::new(static_dir))
}
