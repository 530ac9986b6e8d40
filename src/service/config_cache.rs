use crate::allocation::types::FactorWeights;
use crate::repo::allocation_config_repo::AllocationConfigRepo;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct ConfigCache {
    pub config_repo: AllocationConfigRepo,
    inner: Arc<RwLock<Option<(std::time::Instant, FactorWeights)>>>,
    ttl: std::time::Duration,
}

impl ConfigCache {
    pub fn new(config_repo: AllocationConfigRepo, ttl: std::time::Duration) -> Self {
        Self {
            config_repo,
            inner: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    pub async fn factor_weights(&self) -> Result<FactorWeights> {
        {
            let read = self.inner.read().await;
            if let Some((loaded_at, weights)) = &*read {
                if loaded_at.elapsed() <= self.ttl {
                    return Ok(weights.clone());
                }
            }
        }

        let weights = self.config_repo.load_weights().await?;
        let mut write = self.inner.write().await;
        *write = Some((std::time::Instant::now(), weights.clone()));
        Ok(weights)
    }
}
