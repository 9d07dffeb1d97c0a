use crate::core::rate::Rate;
use crate::core::store::RateStore;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Rate cache held in process memory; lost on exit.
#[derive(Clone, Default)]
pub struct MemoryRateStore {
    inner: Arc<Mutex<Vec<Rate>>>,
}

impl MemoryRateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(rates: Vec<Rate>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rates)),
        }
    }
}

#[async_trait]
impl RateStore for MemoryRateStore {
    async fn get_all(&self) -> Result<Vec<Rate>> {
        let rates = self.inner.lock().await;
        debug!(count = rates.len(), "Memory store READ");
        Ok(rates.clone())
    }

    async fn save(&self, rates: &[Rate]) -> Result<()> {
        let mut stored = self.inner.lock().await;
        stored.extend_from_slice(rates);
        debug!(count = rates.len(), "Memory store SAVE");
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.inner.lock().await.clear();
        debug!("Memory store CLEAR");
        Ok(())
    }

    async fn replace(&self, rates: &[Rate]) -> Result<()> {
        *self.inner.lock().await = rates.to_vec();
        debug!(count = rates.len(), "Memory store REPLACE");
        Ok(())
    }
}
