//! Local persistence of the last fetched rate list

use crate::core::rate::Rate;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait RateStore: Send + Sync {
    /// Returns the cached rates in the order they were saved.
    async fn get_all(&self) -> Result<Vec<Rate>>;

    async fn save(&self, rates: &[Rate]) -> Result<()>;

    async fn delete_all(&self) -> Result<()>;

    /// Swaps the whole cache for `rates`. On error the previous contents
    /// must still be readable.
    async fn replace(&self, rates: &[Rate]) -> Result<()>;
}
