use crate::core::rate::Rate;
use crate::core::store::RateStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const RATES_PARTITION: &str = "rates";

/// Rate cache persisted in a fjall partition.
///
/// Keys are the big-endian position of each rate so that iteration returns
/// rates in the order they were saved.
pub struct DiskRateStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskRateStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path.join("cache"))
            .open()
            .with_context(|| format!("Failed to open rate cache at {}", path.display()))?;
        let partition = keyspace
            .open_partition(RATES_PARTITION, PartitionCreateOptions::default())
            .context("Failed to open rates partition")?;

        Ok(Self {
            keyspace,
            partition,
        })
    }

    fn next_index(&self) -> Result<u32> {
        match self.partition.last_key_value()? {
            Some((key, _)) => {
                let bytes =
                    <[u8; 4]>::try_from(&*key).context("Corrupt key in rates partition")?;
                Ok(u32::from_be_bytes(bytes) + 1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl RateStore for DiskRateStore {
    async fn get_all(&self) -> Result<Vec<Rate>> {
        let mut rates = Vec::new();
        for item in self.partition.iter() {
            let (_, value) = item?;
            let rate: Rate =
                serde_json::from_slice(&value).context("Failed to decode cached rate")?;
            rates.push(rate);
        }
        debug!(count = rates.len(), "Disk store READ");
        Ok(rates)
    }

    async fn save(&self, rates: &[Rate]) -> Result<()> {
        let start = self.next_index()?;
        for (offset, rate) in (start..).zip(rates) {
            self.partition
                .insert(offset.to_be_bytes().to_vec(), serde_json::to_vec(rate)?)?;
        }
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(count = rates.len(), "Disk store SAVE");
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        let keys = self
            .partition
            .keys()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        for key in keys {
            self.partition.remove(key)?;
        }
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Disk store CLEAR");
        Ok(())
    }

    async fn replace(&self, rates: &[Rate]) -> Result<()> {
        // Encode everything up front so a bad value leaves the cache untouched
        let values = rates
            .iter()
            .map(serde_json::to_vec)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let keys = self
            .partition
            .keys()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut batch = self.keyspace.batch();
        // Keys below the new length are overwritten below, the rest go
        for key in keys {
            let overwritten = <[u8; 4]>::try_from(&*key)
                .map(|bytes| (u32::from_be_bytes(bytes) as usize) < values.len())
                .unwrap_or(false);
            if !overwritten {
                batch.remove(&self.partition, key);
            }
        }
        for (index, value) in (0u32..).zip(values) {
            batch.insert(&self.partition, index.to_be_bytes().to_vec(), value);
        }
        batch.commit()?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(count = rates.len(), "Disk store REPLACE");
        Ok(())
    }
}
