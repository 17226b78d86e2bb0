use async_trait::async_trait;
use sentinel_dns_application::ports::RuleRepository;
use sentinel_dns_domain::{BlockedRule, DomainError, UserId};
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};

type RuleRow = (i64, String);

pub struct SqliteRuleRepository {
    pool: SqlitePool,
}

impl SqliteRuleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RuleRepository for SqliteRuleRepository {
    #[instrument(skip(self))]
    async fn list_blocked_domains(&self, user: &UserId) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT domain FROM blocked_sites WHERE user_id = ? ORDER BY id",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query blocked domains");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|(domain,)| domain).collect())
    }

    #[instrument(skip(self))]
    async fn list_rules(&self, user: &UserId) -> Result<Vec<BlockedRule>, DomainError> {
        let rows = sqlx::query_as::<_, RuleRow>(
            "SELECT id, domain FROM blocked_sites WHERE user_id = ? ORDER BY id",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query rules");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows
            .into_iter()
            .map(|(id, domain)| BlockedRule::new(id, user.clone(), domain))
            .collect())
    }

    #[instrument(skip(self))]
    async fn add_rule(&self, user: &UserId, domain: &str) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!(error = %e, "Failed to begin transaction");
            DomainError::DatabaseError(e.to_string())
        })?;

        sqlx::query("INSERT OR IGNORE INTO users (id) VALUES (?)")
            .bind(user.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to provision user");
                DomainError::DatabaseError(e.to_string())
            })?;

        let result =
            sqlx::query("INSERT OR IGNORE INTO blocked_sites (user_id, domain) VALUES (?, ?)")
                .bind(user.as_str())
                .bind(domain)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to insert rule");
                    DomainError::DatabaseError(e.to_string())
                })?;

        tx.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit rule");
            DomainError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            debug!("Rule already present");
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_rule(&self, user: &UserId, rule_id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM blocked_sites WHERE user_id = ? AND id = ?")
            .bind(user.as_str())
            .bind(rule_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to delete rule");
                DomainError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            debug!("No rule to remove");
        }

        Ok(())
    }
}
