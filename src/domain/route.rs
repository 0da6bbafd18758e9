//! Route Specification - 声明式路由表
//!
//! 每个 HTTP 端点对应一个 `RouteSpec`：
//! - 交易名称与类型（submit / evaluate）
//! - 参数列表（来源：query / body）
//! - 交易参数顺序（合约按位置解析参数）
//! - 响应策略
//!
//! 路由表在启动时构建，之后只读。

use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

/// 路由表错误（启动时校验）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Duplicate route: {method} {path}")]
    Duplicate { method: &'static str, path: String },

    #[error("Route {path} forwards undeclared parameter: {param}")]
    UndeclaredArgument { path: String, param: String },

    #[error("Route {path} has no transaction name")]
    MissingTransaction { path: String },
}

/// HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMethod {
    Get,
    Post,
}

impl RouteMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }

    /// GET 从 query 取参数，POST 从 body 取参数
    pub fn param_source(&self) -> ParamSource {
        match self {
            Self::Get => ParamSource::Query,
            Self::Post => ParamSource::Body,
        }
    }
}

/// 交易类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// 写入账本（排序、持久化）
    Submit,
    /// 只读查询
    Evaluate,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Evaluate => "evaluate",
        }
    }
}

/// 参数来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSource {
    Query,
    Body,
}

/// 参数缺失时的默认值生成方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDefault {
    /// 当前 Unix 时间（毫秒）
    UnixMillis,
}

/// 参数声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub source: ParamSource,
    pub default: Option<ParamDefault>,
}

impl ParamSpec {
    pub fn required(name: &'static str, source: ParamSource) -> Self {
        Self {
            name,
            source,
            default: None,
        }
    }
}

/// 交易参数：来自请求参数，或在本地生成
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSpec {
    Param(&'static str),
    /// 本地生成的随机 key（字母数字），同时记录在请求值中供响应回显
    GeneratedKey { name: &'static str, len: usize },
}

/// 附加查询：主交易完成后总是执行的第二次 evaluate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryCall {
    pub transaction: &'static str,
    pub arguments: Vec<ArgSpec>,
    /// 结果挂载到响应对象上的字段名
    pub attach_as: &'static str,
}

/// Envelope 中 `data` 字段的取值方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeData {
    None,
    /// 原始结果按 UTF-8 文本放入
    Text,
    /// 原始结果解析为 JSON 放入
    Json,
}

/// 失败时合成的默认结果
pub type PlaceholderFn = fn(&str) -> Map<String, Value>;

/// 响应策略
#[derive(Debug, Clone)]
pub enum ResponsePolicy {
    /// 账本返回的字节原样输出
    RawPassThrough,
    /// `{ "data": <parsed result> }`
    DataWrapped,
    /// `{ status, message, data? }`
    Envelope {
        message: &'static str,
        data: EnvelopeData,
    },
    /// 成功时转发解析结果，失败时合成同结构的默认结果
    FallbackSynthesis { placeholder: PlaceholderFn },
    /// 回显请求中的指定字段（含本地生成的 key）
    EchoArguments(&'static [&'static str]),
    /// 结果包装进最简 HTML 文档
    HtmlDocument,
}

impl ResponsePolicy {
    pub fn envelope(message: &'static str) -> Self {
        Self::Envelope {
            message,
            data: EnvelopeData::None,
        }
    }

    pub fn envelope_with(message: &'static str, data: EnvelopeData) -> Self {
        Self::Envelope { message, data }
    }
}

/// 路由声明
#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub path: &'static str,
    pub method: RouteMethod,
    pub kind: MutationKind,
    pub transaction: &'static str,
    pub params: Vec<ParamSpec>,
    pub arguments: Vec<ArgSpec>,
    pub secondary: Option<SecondaryCall>,
    pub policy: ResponsePolicy,
}

impl RouteSpec {
    fn new(method: RouteMethod, path: &'static str) -> Self {
        Self {
            path,
            method,
            kind: MutationKind::Evaluate,
            transaction: "",
            params: Vec::new(),
            arguments: Vec::new(),
            secondary: None,
            policy: ResponsePolicy::RawPassThrough,
        }
    }

    pub fn get(path: &'static str) -> Self {
        Self::new(RouteMethod::Get, path)
    }

    pub fn post(path: &'static str) -> Self {
        Self::new(RouteMethod::Post, path)
    }

    pub fn submit(mut self, transaction: &'static str) -> Self {
        self.kind = MutationKind::Submit;
        self.transaction = transaction;
        self
    }

    pub fn evaluate(mut self, transaction: &'static str) -> Self {
        self.kind = MutationKind::Evaluate;
        self.transaction = transaction;
        self
    }

    /// 声明参数，并按相同顺序转发给交易
    pub fn params(mut self, names: &[&'static str]) -> Self {
        let source = self.method.param_source();
        self.params = names
            .iter()
            .copied()
            .map(|name| ParamSpec::required(name, source))
            .collect();
        self.arguments = names.iter().copied().map(ArgSpec::Param).collect();
        self
    }

    /// 覆盖交易参数顺序（参数可以只收集不转发）
    pub fn arguments(mut self, arguments: Vec<ArgSpec>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_default(mut self, name: &str, default: ParamDefault) -> Self {
        if let Some(param) = self.params.iter_mut().find(|p| p.name == name) {
            param.default = Some(default);
        }
        self
    }

    pub fn then_evaluate(mut self, secondary: SecondaryCall) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub fn policy(mut self, policy: ResponsePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn declares(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name == name)
    }

    fn validate(&self) -> Result<(), RouteError> {
        if self.transaction.is_empty() {
            return Err(RouteError::MissingTransaction {
                path: self.path.to_string(),
            });
        }

        let secondary_args = self
            .secondary
            .iter()
            .flat_map(|s| s.arguments.iter());

        for arg in self.arguments.iter().chain(secondary_args) {
            if let ArgSpec::Param(name) = arg {
                if !self.declares(name) {
                    return Err(RouteError::UndeclaredArgument {
                        path: self.path.to_string(),
                        param: name.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// 校验整个路由表
///
/// - 每个 (method, path) 只能出现一次
/// - 转发的参数必须已声明
pub fn validate_route_table(routes: &[RouteSpec]) -> Result<(), RouteError> {
    let mut seen = HashSet::new();
    for route in routes {
        route.validate()?;
        if !seen.insert((route.method, route.path)) {
            return Err(RouteError::Duplicate {
                method: route.method.as_str(),
                path: route.path.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_are_forwarded_in_declared_order() {
        let route = RouteSpec::post("/createElection")
            .submit("createElection")
            .params(&["electionName", "electionDuration"]);

        assert_eq!(route.kind, MutationKind::Submit);
        assert_eq!(
            route.arguments,
            vec![
                ArgSpec::Param("electionName"),
                ArgSpec::Param("electionDuration")
            ]
        );
        assert!(route.params.iter().all(|p| p.source == ParamSource::Body));
    }

    #[test]
    fn test_get_params_come_from_query() {
        let route = RouteSpec::get("/getRandom")
            .evaluate("getRandom")
            .params(&["seed"])
            .with_default("seed", ParamDefault::UnixMillis);

        assert_eq!(route.params[0].source, ParamSource::Query);
        assert_eq!(route.params[0].default, Some(ParamDefault::UnixMillis));
    }

    #[test]
    fn test_validation_rejects_duplicate_route() {
        let routes = vec![
            RouteSpec::get("/a").evaluate("a"),
            RouteSpec::post("/a").evaluate("a"),
            RouteSpec::get("/a").evaluate("b"),
        ];
        assert_eq!(
            validate_route_table(&routes),
            Err(RouteError::Duplicate {
                method: "GET",
                path: "/a".to_string()
            })
        );
    }

    #[test]
    fn test_validation_rejects_undeclared_argument() {
        let routes = vec![RouteSpec::post("/a")
            .evaluate("a")
            .params(&["x"])
            .arguments(vec![ArgSpec::Param("x"), ArgSpec::Param("y")])];
        assert!(matches!(
            validate_route_table(&routes),
            Err(RouteError::UndeclaredArgument { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_missing_transaction() {
        let routes = vec![RouteSpec::get("/a")];
        assert!(matches!(
            validate_route_table(&routes),
            Err(RouteError::MissingTransaction { .. })
        ));
    }
}
