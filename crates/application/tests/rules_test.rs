mod helpers;

use helpers::MockRuleRepository;
use sentinel_dns_application::use_cases::{AddRuleUseCase, GetRulesUseCase, RemoveRuleUseCase};
use sentinel_dns_domain::DomainError;
use std::sync::Arc;

struct RuleUseCases {
    add: AddRuleUseCase,
    remove: RemoveRuleUseCase,
    get: GetRulesUseCase,
}

fn make_use_cases(repo: &MockRuleRepository) -> RuleUseCases {
    RuleUseCases {
        add: AddRuleUseCase::new(Arc::new(repo.clone())),
        remove: RemoveRuleUseCase::new(Arc::new(repo.clone())),
        get: GetRulesUseCase::new(Arc::new(repo.clone())),
    }
}

#[tokio::test]
async fn test_add_then_list_contains_domain() {
    let repo = MockRuleRepository::new();
    let cases = make_use_cases(&repo);

    cases.add.execute("u1", "x.com").await.unwrap();
    let rules = cases.get.execute("u1").await.unwrap();

    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].domain.as_ref(), "x.com");
}

#[tokio::test]
async fn test_add_strips_trailing_dot() {
    let repo = MockRuleRepository::new();
    let cases = make_use_cases(&repo);

    cases.add.execute("u1", "x.com.").await.unwrap();
    let rules = cases.get.execute("u1").await.unwrap();

    assert_eq!(rules[0].domain.as_ref(), "x.com");
}

#[tokio::test]
async fn test_add_twice_is_idempotent() {
    let repo = MockRuleRepository::new();
    let cases = make_use_cases(&repo);

    cases.add.execute("u1", "x.com").await.unwrap();
    cases.add.execute("u1", "x.com.").await.unwrap();

    assert_eq!(repo.count().await, 1);
}

#[tokio::test]
async fn test_remove_then_list_no_longer_contains_domain() {
    let repo = MockRuleRepository::new();
    let cases = make_use_cases(&repo);

    cases.add.execute("u1", "x.com").await.unwrap();
    let id = cases.get.execute("u1").await.unwrap()[0].id;

    cases.remove.execute("u1", id).await.unwrap();

    assert!(cases.get.execute("u1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_unknown_id_is_not_an_error() {
    let repo = MockRuleRepository::new();
    let cases = make_use_cases(&repo);
    cases.add.execute("u1", "x.com").await.unwrap();

    cases.remove.execute("u1", 9_999).await.unwrap();

    assert_eq!(repo.count().await, 1);
}

#[tokio::test]
async fn test_remove_cannot_touch_other_users_rules() {
    let repo = MockRuleRepository::new();
    let cases = make_use_cases(&repo);
    cases.add.execute("u1", "x.com").await.unwrap();
    let id = cases.get.execute("u1").await.unwrap()[0].id;

    cases.remove.execute("u2", id).await.unwrap();

    assert_eq!(cases.get.execute("u1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_user_id_is_rejected() {
    let repo = MockRuleRepository::new();
    let cases = make_use_cases(&repo);

    assert!(matches!(
        cases.add.execute("", "x.com").await,
        Err(DomainError::InvalidUserId(_))
    ));
    assert!(matches!(
        cases.get.execute("").await,
        Err(DomainError::InvalidUserId(_))
    ));
    assert!(matches!(
        cases.remove.execute("", 1).await,
        Err(DomainError::InvalidUserId(_))
    ));
}

#[tokio::test]
async fn test_invalid_domain_is_rejected_before_store() {
    let repo = MockRuleRepository::new();
    let cases = make_use_cases(&repo);

    let result = cases.add.execute("u1", "*.x.com").await;

    assert!(matches!(result, Err(DomainError::InvalidDomainName(_))));
    assert_eq!(repo.count().await, 0);
}

#[tokio::test]
async fn test_store_errors_are_reported() {
    let repo = MockRuleRepository::new();
    repo.set_should_fail(true);
    let cases = make_use_cases(&repo);

    assert!(matches!(
        cases.add.execute("u1", "x.com").await,
        Err(DomainError::DatabaseError(_))
    ));
    assert!(cases.get.execute("u1").await.is_err());
}
