pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::store::RateStore;
use disk::DiskRateStore;
use memory::MemoryRateStore;
use std::sync::Arc;
use tracing::warn;

/// Opens the persistent rate cache, falling back to an in-memory one when the
/// data directory cannot be used.
pub fn open_rate_store(config: &AppConfig) -> Arc<dyn RateStore> {
    let disk = config
        .default_data_path()
        .and_then(|path| DiskRateStore::open(&path));

    match disk {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(error = %e, "Persistent rate cache unavailable, using memory");
            Arc::new(MemoryRateStore::new())
        }
    }
}
