//! Request Dispatcher - 通用分发器
//!
//! 对任意 `RouteSpec`：
//! 1. 按声明收集参数，缺失则直接失败（不会发出部分参数的交易）
//! 2. 按声明顺序组装交易参数
//! 3. 调用 submit / evaluate
//! 4. 如有附加查询，无论主交易成败都执行一次
//!
//! 不重试、不缓存，每次请求互不影响。

use rand::{distributions::Alphanumeric, Rng};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::params::RequestParams;
use crate::application::error::ApplicationError;
use crate::application::ports::{TransactionGatewayPort, TransactionOutcome, TransactionRequest};
use crate::domain::{ArgSpec, MutationKind, ParamDefault, RouteSpec};

/// 附加查询的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// 挂载到响应上的字段名
    pub field: &'static str,
    pub outcome: TransactionOutcome,
}

/// 一次分发的完整结果，交给 ResponseShaper
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub request: TransactionRequest,
    /// 收集到的参数值（包含本地生成的 key）
    pub values: BTreeMap<String, String>,
    pub primary: TransactionOutcome,
    pub secondary: Option<Attachment>,
}

/// 生成指定长度的随机字母数字 key（`[A-Za-z0-9]`）
pub fn generate_key(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Request Dispatcher
pub struct RequestDispatcher {
    gateway: Arc<dyn TransactionGatewayPort>,
}

impl RequestDispatcher {
    pub fn new(gateway: Arc<dyn TransactionGatewayPort>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        route: &RouteSpec,
        params: &RequestParams,
    ) -> Result<DispatchOutcome, ApplicationError> {
        let mut values = collect_values(route, params)?;

        let request = build_request(route.transaction, &route.arguments, &mut values);
        let primary = self.invoke(route.kind, &request).await;

        tracing::info!(
            route = %route.path,
            transaction = %request.name,
            kind = route.kind.as_str(),
            success = primary.is_success(),
            "Transaction dispatched"
        );

        let secondary = match &route.secondary {
            Some(call) => {
                let secondary_request = build_request(call.transaction, &call.arguments, &mut values);
                let outcome = self
                    .invoke(MutationKind::Evaluate, &secondary_request)
                    .await;
                Some(Attachment {
                    field: call.attach_as,
                    outcome,
                })
            }
            None => None,
        };

        Ok(DispatchOutcome {
            request,
            values,
            primary,
            secondary,
        })
    }

    async fn invoke(&self, kind: MutationKind, request: &TransactionRequest) -> TransactionOutcome {
        tracing::debug!(
            transaction = %request.name,
            kind = kind.as_str(),
            args = request.args.len(),
            "Invoking ledger transaction"
        );

        let result = match kind {
            MutationKind::Submit => self.gateway.submit(request).await,
            MutationKind::Evaluate => self.gateway.evaluate(request).await,
        };

        if let Err(e) = &result {
            tracing::warn!(
                transaction = %request.name,
                kind = kind.as_str(),
                error = %e,
                "Ledger transaction failed"
            );
        }

        result.into()
    }
}

/// 收集路由声明的全部参数
fn collect_values(
    route: &RouteSpec,
    params: &RequestParams,
) -> Result<BTreeMap<String, String>, ApplicationError> {
    let mut values = BTreeMap::new();

    for param in &route.params {
        let value = match params.get(param.source, param.name) {
            Some(value) => value,
            None => match param.default {
                Some(default) => default_value(default),
                None => return Err(ApplicationError::missing_parameter(param.name)),
            },
        };
        values.insert(param.name.to_string(), value);
    }

    Ok(values)
}

fn default_value(default: ParamDefault) -> String {
    match default {
        ParamDefault::UnixMillis => chrono::Utc::now().timestamp_millis().to_string(),
    }
}

/// 按声明顺序组装交易参数
///
/// 生成的 key 写回 `values`，同名 key 在一次请求内只生成一次
fn build_request(
    transaction: &str,
    arguments: &[ArgSpec],
    values: &mut BTreeMap<String, String>,
) -> TransactionRequest {
    let args = arguments
        .iter()
        .map(|arg| match *arg {
            ArgSpec::Param(name) => values.get(name).cloned().unwrap_or_default(),
            ArgSpec::GeneratedKey { name, len } => values
                .entry(name.to_string())
                .or_insert_with(|| generate_key(len))
                .clone(),
        })
        .collect();

    TransactionRequest::new(transaction, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::route_table;
    use crate::domain::RouteMethod;
    use crate::infrastructure::adapters::{FakeLedgerGateway, RecordedCall};
    use serde_json::{json, Map, Value};

    fn route(method: RouteMethod, path: &str) -> RouteSpec {
        route_table()
            .into_iter()
            .find(|r| r.method == method && r.path == path)
            .unwrap()
    }

    fn body(value: Value) -> RequestParams {
        let map = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        RequestParams::default().with_body(map)
    }

    #[tokio::test]
    async fn test_create_election_submits_in_declared_order() {
        let gateway = Arc::new(FakeLedgerGateway::new());
        gateway.respond_ok("createElection", b"");
        let dispatcher = RequestDispatcher::new(gateway.clone());

        let outcome = dispatcher
            .handle(
                &route(RouteMethod::Post, "/createElection"),
                &body(json!({ "electionName": "E1", "electionDuration": "10" })),
            )
            .await
            .unwrap();

        assert!(outcome.primary.is_success());
        assert_eq!(
            gateway.calls(),
            vec![RecordedCall::submit("createElection", &["E1", "10"])]
        );
    }

    #[tokio::test]
    async fn test_missing_parameter_fails_before_any_call() {
        let gateway = Arc::new(FakeLedgerGateway::new());
        let dispatcher = RequestDispatcher::new(gateway.clone());

        let err = dispatcher
            .handle(
                &route(RouteMethod::Post, "/createElection"),
                &body(json!({ "electionDuration": "10" })),
            )
            .await
            .unwrap_err();

        assert_eq!(err, ApplicationError::missing_parameter("electionName"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_random_defaults_seed_to_current_time() {
        let gateway = Arc::new(FakeLedgerGateway::new());
        let dispatcher = RequestDispatcher::new(gateway.clone());

        let outcome = dispatcher
            .handle(&route(RouteMethod::Get, "/getRandom"), &RequestParams::default())
            .await
            .unwrap();

        let seed = &outcome.request.args[0];
        assert!(seed.parse::<i64>().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_cast_vote_forwards_email_and_vote_content_only() {
        let gateway = Arc::new(FakeLedgerGateway::new());
        let dispatcher = RequestDispatcher::new(gateway.clone());

        dispatcher
            .handle(
                &route(RouteMethod::Post, "/castVote"),
                &body(json!({ "email": "a@b.c", "electionID": "e1", "voteContent": "v" })),
            )
            .await
            .unwrap();

        assert_eq!(
            gateway.calls(),
            vec![RecordedCall::submit("castVote", &["a@b.c", "v"])]
        );
    }

    #[tokio::test]
    async fn test_secondary_call_runs_after_primary_failure() {
        let gateway = Arc::new(FakeLedgerGateway::new());
        gateway.respond_err("calculateResult", "election still running");
        gateway.respond_ok("getCandidates", b"[]");
        let dispatcher = RequestDispatcher::new(gateway.clone());

        let outcome = dispatcher
            .handle(
                &route(RouteMethod::Post, "/calculateResult"),
                &body(json!({ "electionId": "e1" })),
            )
            .await
            .unwrap();

        assert!(!outcome.primary.is_success());
        let attachment = outcome.secondary.unwrap();
        assert_eq!(attachment.field, "candidates");
        assert_eq!(attachment.outcome, TransactionOutcome::Success(b"[]".to_vec()));
        assert_eq!(
            gateway.calls(),
            vec![
                RecordedCall::evaluate("calculateResult", &["e1"]),
                RecordedCall::evaluate("getCandidates", &["e1"]),
            ]
        );
    }

    #[tokio::test]
    async fn test_insert_movie_generates_key_once() {
        let gateway = Arc::new(FakeLedgerGateway::new());
        let dispatcher = RequestDispatcher::new(gateway.clone());

        let outcome = dispatcher
            .handle(
                &route(RouteMethod::Post, "/insertMovie"),
                &body(json!({ "name": "N", "director": "D", "genre": "G", "year": 1999 })),
            )
            .await
            .unwrap();

        let key = outcome.values.get("key").unwrap();
        assert_eq!(key.len(), 20);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(
            outcome.request.args,
            vec![key.clone(), "N".into(), "D".into(), "1999".into(), "G".into()]
        );
    }

    #[test]
    fn test_generate_key_alphabet_and_length() {
        for _ in 0..50 {
            let key = generate_key(20);
            assert_eq!(key.len(), 20);
            assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }
}
