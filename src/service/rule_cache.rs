use crate::domain::rule::AllocationRule;
use crate::repo::rules_repo::RulesRepo;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Short-TTL cache over the read-mostly rule set. Staleness within the TTL is
/// acceptable; no cross-call isolation is assumed.
#[derive(Clone)]
pub struct RuleCache {
    pub rules_repo: RulesRepo,
    inner: Arc<RwLock<Option<(std::time::Instant, Vec<AllocationRule>)>>>,
    ttl: std::time::Duration,
}

impl RuleCache {
    pub fn new(rules_repo: RulesRepo, ttl: std::time::Duration) -> Self {
        Self {
            rules_repo,
            inner: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    pub async fn active_rules(&self) -> Result<Vec<AllocationRule>> {
        {
            let read = self.inner.read().await;
            if let Some((loaded_at, rules)) = &*read {
                if loaded_at.elapsed() <= self.ttl {
                    return Ok(rules.clone());
                }
            }
        }

        let rules = self.rules_repo.list_active().await?;
        let mut write = self.inner.write().await;
        *write = Some((std::time::Instant::now(), rules.clone()));
        Ok(rules)
    }
}
