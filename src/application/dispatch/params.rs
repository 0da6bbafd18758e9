//! Request Parameters - 请求参数集合
//!
//! query 与 body 分开保存，路由声明决定从哪里取值

use serde_json::{Map, Value};

use crate::domain::ParamSource;

/// 一次请求携带的参数
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    query: Map<String, Value>,
    body: Map<String, Value>,
}

impl RequestParams {
    pub fn new(query: Map<String, Value>, body: Map<String, Value>) -> Self {
        Self { query, body }
    }

    /// 由 key/value 字符串对构建（query string / 表单）
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Map<String, Value> {
        pairs
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect()
    }

    pub fn with_query(mut self, query: Map<String, Value>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = body;
        self
    }

    /// 取参数并转为字符串
    ///
    /// - 字符串原样返回
    /// - 数字、布尔值使用其文本形式
    /// - 数组、对象使用紧凑 JSON
    /// - `null` 视为缺失
    pub fn get(&self, source: ParamSource, name: &str) -> Option<String> {
        let map = match source {
            ParamSource::Query => &self.query,
            ParamSource::Body => &self.body,
        };

        match map.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn test_values_are_coerced_to_strings() {
        let params = RequestParams::default().with_body(body(json!({
            "name": "E1",
            "duration": 10,
            "open": true,
            "tags": ["a", "b"],
        })));

        assert_eq!(params.get(ParamSource::Body, "name").as_deref(), Some("E1"));
        assert_eq!(params.get(ParamSource::Body, "duration").as_deref(), Some("10"));
        assert_eq!(params.get(ParamSource::Body, "open").as_deref(), Some("true"));
        assert_eq!(
            params.get(ParamSource::Body, "tags").as_deref(),
            Some(r#"["a","b"]"#)
        );
    }

    #[test]
    fn test_null_counts_as_missing() {
        let params = RequestParams::default().with_body(body(json!({ "seed": null })));
        assert_eq!(params.get(ParamSource::Body, "seed"), None);
    }

    #[test]
    fn test_sources_are_separate() {
        let params = RequestParams::new(
            RequestParams::from_pairs(vec![("seed".to_string(), "1".to_string())]),
            Map::new(),
        );
        assert_eq!(params.get(ParamSource::Query, "seed").as_deref(), Some("1"));
        assert_eq!(params.get(ParamSource::Body, "seed"), None);
    }
}
