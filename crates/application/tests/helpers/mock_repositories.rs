#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use sentinel_dns_application::ports::{NextHandler, ResponseSink, RuleRepository};
use sentinel_dns_domain::{BlockedRule, DomainError, UserId};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

pub fn a_query(name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(0x1234)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message
}

pub fn a_record(name: &str, ttl: u32, ip: Ipv4Addr) -> Record {
    Record::from_rdata(Name::from_str(name).unwrap(), ttl, RData::A(A(ip)))
}

#[derive(Clone, Default)]
pub struct MockRuleRepository {
    rules: Arc<RwLock<Vec<BlockedRule>>>,
    next_id: Arc<AtomicI64>,
    should_fail: Arc<AtomicBool>,
    list_calls: Arc<AtomicUsize>,
}

impl MockRuleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_rules(rules: &[(&str, &str)]) -> Self {
        let repo = Self::new();
        for (user, domain) in rules {
            repo.add_rule(&UserId::parse(user).unwrap(), domain)
                .await
                .unwrap();
        }
        repo
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub async fn count(&self) -> usize {
        self.rules.read().await.len()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(
                "Mock rule store unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RuleRepository for MockRuleRepository {
    async fn list_blocked_domains(&self, user: &UserId) -> Result<Vec<String>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self
            .rules
            .read()
            .await
            .iter()
            .filter(|rule| &rule.user_id == user)
            .map(|rule| rule.domain.to_string())
            .collect())
    }

    async fn list_rules(&self, user: &UserId) -> Result<Vec<BlockedRule>, DomainError> {
        self.check_failure()?;
        Ok(self
            .rules
            .read()
            .await
            .iter()
            .filter(|rule| &rule.user_id == user)
            .cloned()
            .collect())
    }

    async fn add_rule(&self, user: &UserId, domain: &str) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut rules = self.rules.write().await;
        if rules
            .iter()
            .any(|rule| &rule.user_id == user && rule.domain.as_ref() == domain)
        {
            return Ok(());
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        rules.push(BlockedRule::new(id, user.clone(), domain));
        Ok(())
    }

    async fn remove_rule(&self, user: &UserId, rule_id: i64) -> Result<(), DomainError> {
        self.check_failure()?;
        self.rules
            .write()
            .await
            .retain(|rule| !(&rule.user_id == user && rule.id == rule_id));
        Ok(())
    }
}

/// Answers every query with the configured records, echoing id and question.
#[derive(Clone)]
pub struct MockNextHandler {
    answers: Arc<Mutex<Vec<Record>>>,
    should_fail: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MockNextHandler {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(AtomicBool::new(false)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_answers(answers: Vec<Record>) -> Self {
        let handler = Self::new();
        *handler.answers.lock().unwrap() = answers;
        handler
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockNextHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NextHandler for MockNextHandler {
    async fn forward(&self, request: &Message) -> Result<Message, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.should_fail.load(Ordering::SeqCst) {
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
        response.insert_answers(self.answers.lock().unwrap().clone());
        Ok(response)
    }
}

#[derive(Default)]
pub struct CapturingSink {
    pub messages: Vec<Message>,
    pub should_fail: bool,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            messages: Vec::new(),
            should_fail: true,
        }
    }

    pub fn only_message(&self) -> &Message {
        assert_eq!(self.messages.len(), 1, "expected exactly one reply");
        &self.messages[0]
    }
}

#[async_trait]
impl ResponseSink for CapturingSink {
    async fn write_message(&mut self, message: &Message) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::IoError("client went away".to_string()));
        }
        self.messages.push(message.clone());
        Ok(())
    }
}
