//! Rate acquisition: remote service first, local cache as fallback.

use crate::core::config::ApiConfig;
use crate::core::connectivity::ConnectivityChecker;
use crate::core::rate::{LoadResult, LoadSource, Rate, dedup_by_code};
use crate::core::rates::RateProvider;
use crate::core::store::RateStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

pub const REMOTE_MESSAGE: &str = "Rates loaded from Internet.";
pub const LOCAL_MESSAGE: &str = "Rates loaded from local data.";
pub const EMPTY_MESSAGE: &str = "No internet connection and no previously loaded rates.";

pub struct RateRepository {
    connectivity: Arc<dyn ConnectivityChecker>,
    provider: Arc<dyn RateProvider>,
    store: Arc<dyn RateStore>,
    base_url: String,
    path: String,
    timeout: Duration,
    // Serializes cache replacement so concurrent loads cannot interleave.
    write_lock: Mutex<()>,
}

impl RateRepository {
    pub fn new(
        connectivity: Arc<dyn ConnectivityChecker>,
        provider: Arc<dyn RateProvider>,
        store: Arc<dyn RateStore>,
        config: &ApiConfig,
    ) -> Self {
        Self {
            connectivity,
            provider,
            store,
            base_url: config.base_url.clone(),
            path: config.path.clone(),
            timeout: config.timeout(),
            write_lock: Mutex::new(()),
        }
    }

    /// Acquires the current rate list. Never fails: every collaborator fault
    /// ends up in the returned [`LoadResult`].
    #[instrument(name = "RateLoad", skip(self))]
    pub async fn load(&self) -> LoadResult {
        match tokio::time::timeout(self.timeout, self.fetch_remote()).await {
            Ok(Some(rates)) => {
                self.replace_cache(&rates).await;
                info!(count = rates.len(), "Rates loaded from remote service");
                LoadResult::new(LoadSource::Remote, rates, REMOTE_MESSAGE)
            }
            Ok(None) => self.load_local().await,
            Err(_) => {
                warn!(timeout = ?self.timeout, "Remote rate load timed out");
                self.load_local().await
            }
        }
    }

    async fn fetch_remote(&self) -> Option<Vec<Rate>> {
        let connection = self.connectivity.check_connection().await;
        if !connection.is_success {
            warn!(message = %connection.message, "Rate service unreachable");
            return None;
        }

        let response = self.provider.get_list(&self.base_url, &self.path).await;
        if !response.is_success {
            warn!(message = %response.message, "Rate fetch failed");
            return None;
        }

        let rates = dedup_by_code(response.result);
        if rates.is_empty() {
            warn!("Rate service returned an empty list");
            return None;
        }
        Some(rates)
    }

    async fn load_local(&self) -> LoadResult {
        let rates = match self.store.get_all().await {
            Ok(rates) => rates,
            Err(e) => {
                warn!(error = %e, "Failed to read cached rates");
                Vec::new()
            }
        };

        if rates.is_empty() {
            debug!("No cached rates available");
            LoadResult::new(LoadSource::None, rates, EMPTY_MESSAGE)
        } else {
            info!(count = rates.len(), "Rates loaded from local cache");
            LoadResult::new(LoadSource::LocalCache, rates, LOCAL_MESSAGE)
        }
    }

    async fn replace_cache(&self, rates: &[Rate]) {
        let _guard = self.write_lock.lock().await;
        if let Err(e) = self.store.replace(rates).await {
            error!(error = %e, "Failed to replace cached rates");
        }
    }
}
