//! Request Parameter Extractor
//!
//! - query string 总是解析
//! - body 按 Content-Type 解析：`application/json`（对象）或
//!   `application/x-www-form-urlencoded`，其他类型视为空

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Query, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde_json::{Map, Value};

use super::error::ApiError;
use crate::application::RequestParams;

/// 请求参数提取器
pub struct ExtractParams(pub RequestParams);

enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(request: &Request) -> BodyKind {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        BodyKind::Json
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

#[async_trait]
impl<S> FromRequest<S> for ExtractParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<Vec<(String, String)>>::try_from_uri(request.uri())
            .map_err(|e| ApiError::BadRequest(format!("Invalid query string: {}", e)))?;
        let query = RequestParams::from_pairs(query);

        let body = match body_kind(&request) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(request, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read body: {}", e)))?;
                parse_json_body(&bytes)?
            }
            BodyKind::Form => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, state)
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid form body: {}", e)))?;
                RequestParams::from_pairs(pairs)
            }
            BodyKind::Other => Map::new(),
        };

        Ok(ExtractParams(RequestParams::new(query, body)))
    }
}

fn parse_json_body(bytes: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::BadRequest(
            "JSON body must be an object".to_string(),
        )),
        Err(e) => Err(ApiError::BadRequest(format!("Invalid JSON body: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParamSource;
    use axum::body::Body;
    use axum::http::{Method, Request as HttpRequest};

    async fn extract(request: Request) -> Result<RequestParams, ApiError> {
        ExtractParams::from_request(request, &()).await.map(|p| p.0)
    }

    #[tokio::test]
    async fn test_query_params() {
        let request = HttpRequest::builder()
            .uri("/getRandom?seed=42")
            .body(Body::empty())
            .unwrap();

        let params = extract(request).await.unwrap();
        assert_eq!(params.get(ParamSource::Query, "seed").as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn test_json_body() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .uri("/createElection")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"electionName":"E1","electionDuration":10}"#))
            .unwrap();

        let params = extract(request).await.unwrap();
        assert_eq!(
            params.get(ParamSource::Body, "electionDuration").as_deref(),
            Some("10")
        );
    }

    #[tokio::test]
    async fn test_form_body() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .uri("/createElection")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("electionName=E+1&electionDuration=10"))
            .unwrap();

        let params = extract(request).await.unwrap();
        assert_eq!(
            params.get(ParamSource::Body, "electionName").as_deref(),
            Some("E 1")
        );
    }

    #[tokio::test]
    async fn test_empty_json_body_is_empty_map() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .uri("/generateUID")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::empty())
            .unwrap();

        assert!(extract(request).await.is_ok());
    }

    #[tokio::test]
    async fn test_non_object_json_is_rejected() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .uri("/createElection")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("[1,2]"))
            .unwrap();

        assert!(matches!(
            extract(request).await,
            Err(ApiError::BadRequest(_))
        ));
    }
}
