//! Election Context - 电子投票合约路由
//!
//! 投票合约交易：选举、候选人、选民、登录挑战、投票、计票。

use serde_json::{json, Map, Value};

use super::route::{
    ArgSpec, EnvelopeData, ParamDefault, ResponsePolicy, RouteSpec, SecondaryCall,
};

/// 计票失败时合成结果使用的占位 ID（固定哨兵值，与请求无关）
pub const PLACEHOLDER_RESULT_ID: &str = "LnfgDsc2WD8F2qNfHK5aResult";
pub const PLACEHOLDER_ELECTION_ID: &str = "LnfgDsc2WD8F2qNfHK5a";

/// 候选人列表挂载字段
pub const CANDIDATES_FIELD: &str = "candidates";

/// 合成一个结构与 `ElectionResult` 相同的默认结果
///
/// `publisherID` 携带错误信息，计票数组全部为 0。
pub fn placeholder_result(error: &str) -> Map<String, Value> {
    let value = json!({
        "id": PLACEHOLDER_RESULT_ID,
        "publisherID": error,
        "values": [0, 0, 0, 0],
        "electionID": PLACEHOLDER_ELECTION_ID,
        "doctype": "ElectionResult",
    });

    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// 投票合约的所有路由
pub fn election_routes() -> Vec<RouteSpec> {
    vec![
        RouteSpec::get("/getRandom")
            .evaluate("getRandom")
            .params(&["seed"])
            .with_default("seed", ParamDefault::UnixMillis)
            .policy(ResponsePolicy::DataWrapped),
        RouteSpec::post("/getRandom")
            .evaluate("getRandom")
            .params(&["seed"]),
        RouteSpec::get("/generateUID").evaluate("generateUID"),
        RouteSpec::post("/generateUID").evaluate("generateUID"),
        RouteSpec::post("/createElection")
            .submit("createElection")
            .params(&["electionName", "electionDuration"])
            .policy(ResponsePolicy::envelope("Election Created")),
        RouteSpec::get("/getElections").evaluate("getElections"),
        RouteSpec::post("/getElections").evaluate("getElections"),
        RouteSpec::post("/addCandidate")
            .submit("addCandidate")
            .params(&["name", "sign", "imgAddress", "electionId"])
            .policy(ResponsePolicy::envelope("Candidate Added")),
        RouteSpec::post("/getCandidates")
            .evaluate("getCandidates")
            .params(&["electionId"]),
        RouteSpec::post("/registerVoter")
            .submit("registerVoter")
            .params(&["name", "email", "v1", "v2", "v3", "electionId"])
            .policy(ResponsePolicy::envelope_with("Voter Added", EnvelopeData::Text)),
        RouteSpec::get("/getLoginChallenge").evaluate("getLoginChallenge"),
        RouteSpec::post("/getLoginChallenge").evaluate("getLoginChallenge"),
        RouteSpec::post("/voterLogin")
            .evaluate("voterLogin")
            .params(&["email", "x", "a1", "a2", "a3", "v1", "v2", "v3", "y1"])
            .policy(ResponsePolicy::envelope_with("", EnvelopeData::Json)),
        // electionID 被收集但不转发：合约根据选民记录确定选举
        RouteSpec::post("/castVote")
            .submit("castVote")
            .params(&["email", "electionID", "voteContent"])
            .arguments(vec![ArgSpec::Param("email"), ArgSpec::Param("voteContent")])
            .policy(ResponsePolicy::envelope_with(
                "Vote Cast Successful",
                EnvelopeData::Json,
            )),
        RouteSpec::post("/calculateResult")
            .evaluate("calculateResult")
            .params(&["electionId"])
            .then_evaluate(SecondaryCall {
                transaction: "getCandidates",
                arguments: vec![ArgSpec::Param("electionId")],
                attach_as: CANDIDATES_FIELD,
            })
            .policy(ResponsePolicy::FallbackSynthesis {
                placeholder: placeholder_result,
            }),
        RouteSpec::post("/startElection")
            .submit("startElection")
            .params(&["electionId"])
            .policy(ResponsePolicy::envelope_with("", EnvelopeData::Text)),
    ]
}
