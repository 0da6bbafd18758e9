//! Response Shaper - 响应整形
//!
//! 把交易结果按路由的响应策略转换为响应体。
//! 交易失败永远会得到一个响应，不会向上传播。

use serde::Serialize;
use serde_json::{Map, Value};

use super::dispatcher::{Attachment, DispatchOutcome};
use crate::application::error::ApplicationError;
use crate::application::ports::TransactionOutcome;
use crate::domain::{EnvelopeData, PlaceholderFn, ResponsePolicy};

/// 响应内容类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Html,
}

/// 整形后的响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedResponse {
    pub content_kind: ContentKind,
    pub body: Vec<u8>,
}

impl ShapedResponse {
    pub fn raw(body: Vec<u8>) -> Self {
        Self {
            content_kind: ContentKind::Json,
            body,
        }
    }

    pub fn html(body: String) -> Self {
        Self {
            content_kind: ContentKind::Html,
            body: body.into_bytes(),
        }
    }

    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self::raw(body),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response");
                Self::raw(br#"{"status":"failure","message":"serialization error"}"#.to_vec())
            }
        }
    }
}

/// Envelope 状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Failure,
}

/// `{ status, message, data? }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub status: EnvelopeStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ResponseEnvelope {
    pub fn success(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Failure,
            message: message.into(),
            data: None,
        }
    }
}

/// Response Shaper
pub struct ResponseShaper;

impl ResponseShaper {
    pub fn shape(outcome: &DispatchOutcome, policy: &ResponsePolicy) -> ShapedResponse {
        let bytes = match &outcome.primary {
            TransactionOutcome::Success(bytes) => bytes,
            TransactionOutcome::Failure(message) => {
                return match policy {
                    ResponsePolicy::FallbackSynthesis { placeholder } => {
                        synthesize(*placeholder, message, outcome.secondary.as_ref())
                    }
                    _ => failure(message),
                };
            }
        };

        match policy {
            ResponsePolicy::RawPassThrough => ShapedResponse::raw(bytes.clone()),
            ResponsePolicy::DataWrapped => match parse(bytes) {
                Ok(data) => {
                    let mut wrapped = Map::new();
                    wrapped.insert("data".to_string(), data);
                    ShapedResponse::json(&wrapped)
                }
                Err(e) => failure(&e.to_string()),
            },
            ResponsePolicy::Envelope { message, data } => {
                let data = match data {
                    EnvelopeData::None => None,
                    EnvelopeData::Text => Some(Value::String(text(bytes))),
                    EnvelopeData::Json => match parse(bytes) {
                        Ok(value) => Some(value),
                        Err(e) => return failure(&e.to_string()),
                    },
                };
                ShapedResponse::json(&ResponseEnvelope::success(*message, data))
            }
            ResponsePolicy::FallbackSynthesis { placeholder } => match parse(bytes) {
                Ok(Value::Object(result)) => attach(result, outcome.secondary.as_ref()),
                Ok(_) => synthesize(
                    *placeholder,
                    "result is not a JSON object",
                    outcome.secondary.as_ref(),
                ),
                Err(e) => synthesize(*placeholder, &e.to_string(), outcome.secondary.as_ref()),
            },
            ResponsePolicy::EchoArguments(fields) => {
                let echoed: Map<String, Value> = fields
                    .iter()
                    .filter_map(|field| {
                        outcome
                            .values
                            .get(*field)
                            .map(|v| (field.to_string(), Value::String(v.clone())))
                    })
                    .collect();
                ShapedResponse::json(&echoed)
            }
            ResponsePolicy::HtmlDocument => {
                ShapedResponse::html(format!("<html><body>{}</body></html>", text(bytes)))
            }
        }
    }
}

fn failure(message: &str) -> ShapedResponse {
    ShapedResponse::json(&ResponseEnvelope::failure(message))
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn parse(bytes: &[u8]) -> Result<Value, ApplicationError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// 失败时合成默认结果，仍然挂载附加查询的结果
fn synthesize(
    placeholder: PlaceholderFn,
    error: &str,
    secondary: Option<&Attachment>,
) -> ShapedResponse {
    tracing::warn!(error = %error, "Synthesizing placeholder result");
    attach(placeholder(error), secondary)
}

fn attach(mut result: Map<String, Value>, secondary: Option<&Attachment>) -> ShapedResponse {
    if let Some(attachment) = secondary {
        let value = match &attachment.outcome {
            TransactionOutcome::Success(bytes) => parse(bytes).unwrap_or_else(|e| {
                tracing::warn!(field = attachment.field, error = %e, "Unparseable attachment");
                Value::Array(Vec::new())
            }),
            TransactionOutcome::Failure(_) => Value::Array(Vec::new()),
        };
        result.insert(attachment.field.to_string(), value);
    }
    ShapedResponse::json(&result)
}
