#![allow(dead_code)]
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use http_body_util::BodyExt;
use sentinel_dns_api::{create_api_routes, AppState, RuleUseCases};
use sentinel_dns_application::ports::NextHandler;
use sentinel_dns_application::use_cases::{
    AddRuleUseCase, EvaluatePolicyUseCase, GetRulesUseCase, HandleDnsQueryUseCase,
    PipelineSettings, RemoveRuleUseCase,
};
use sentinel_dns_domain::DomainError;
use sentinel_dns_infrastructure::database::run_migrations;
use sentinel_dns_infrastructure::repositories::SqliteRuleRepository;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;

pub const UPSTREAM_IP: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);
pub const UPSTREAM_TTL: u32 = 300;

/// Answers every question with `UPSTREAM_IP`, or fails when `failing` is set.
pub struct StubUpstream {
    pub failing: bool,
}

#[async_trait]
impl NextHandler for StubUpstream {
    async fn forward(&self, request: &Message) -> Result<Message, DomainError> {
        if self.failing {
            return Err(DomainError::TransportAllServersUnreachable);
        }

        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_recursion_available(true)
            .set_response_code(ResponseCode::NoError);
        response.add_queries(request.queries().to_vec());
        for query in request.queries() {
            response.add_answer(Record::from_rdata(
                query.name().clone(),
                UPSTREAM_TTL,
                RData::A(A(UPSTREAM_IP)),
            ));
        }
        Ok(response)
    }
}

pub async fn create_app() -> Router {
    create_app_with_upstream(StubUpstream { failing: false }).await
}

pub async fn create_app_with_upstream(upstream: StubUpstream) -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();

    let repo = Arc::new(SqliteRuleRepository::new(pool));
    let policy = Arc::new(EvaluatePolicyUseCase::new(repo.clone()));

    let state = AppState {
        rules: RuleUseCases {
            add_rule: Arc::new(AddRuleUseCase::new(repo.clone())),
            remove_rule: Arc::new(RemoveRuleUseCase::new(repo.clone())),
            get_rules: Arc::new(GetRulesUseCase::new(repo)),
        },
        dns: Arc::new(HandleDnsQueryUseCase::new(
            policy,
            Arc::new(upstream),
            PipelineSettings::default(),
        )),
    };

    create_api_routes(state)
}

pub fn dns_query(name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(0x0A0B)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
