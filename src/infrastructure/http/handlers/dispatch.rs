//! Dispatch Handler
//!
//! 所有账本路由共用的处理函数：提取参数 → 分发 → 整形

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::application::{ContentKind, ResponseShaper, ShapedResponse};
use crate::domain::RouteSpec;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::ExtractParams;
use crate::infrastructure::http::state::AppState;

impl IntoResponse for ShapedResponse {
    fn into_response(self) -> Response {
        let content_type = match self.content_kind {
            ContentKind::Json => "application/json",
            ContentKind::Html => "text/html; charset=utf-8",
        };
        ([(header::CONTENT_TYPE, content_type)], self.body).into_response()
    }
}

/// 按路由声明处理一次请求
pub async fn dispatch_route(
    state: Arc<AppState>,
    route: Arc<RouteSpec>,
    ExtractParams(params): ExtractParams,
) -> Result<ShapedResponse, ApiError> {
    let outcome = state.dispatcher.handle(&route, &params).await?;
    Ok(ResponseShaper::shape(&outcome, &route.policy))
}
