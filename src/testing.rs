//! Test doubles for the collaborator traits.

use crate::core::connectivity::{ConnectionStatus, ConnectivityChecker};
use crate::core::dialog::DialogService;
use crate::core::rate::Rate;
use crate::core::rates::{ApiResponse, RateProvider};
use crate::core::store::RateStore;
use crate::store::memory::MemoryRateStore;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub struct StubConnectivity(pub bool);

#[async_trait]
impl ConnectivityChecker for StubConnectivity {
    async fn check_connection(&self) -> ConnectionStatus {
        if self.0 {
            ConnectionStatus::ok()
        } else {
            ConnectionStatus::failed("offline")
        }
    }
}

pub struct StubProvider {
    pub response: ApiResponse<Rate>,
    pub delay: Option<Duration>,
    pub call_count: AtomicUsize,
}

impl StubProvider {
    pub fn new(response: ApiResponse<Rate>) -> Self {
        Self {
            response,
            delay: None,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateProvider for StubProvider {
    async fn get_list(&self, _base_url: &str, _path: &str) -> ApiResponse<Rate> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}

/// Memory store that counts mutating calls.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryRateStore,
    pub writes: AtomicUsize,
}

impl CountingStore {
    pub fn with_rates(rates: Vec<Rate>) -> Self {
        Self {
            inner: MemoryRateStore::with_rates(rates),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateStore for CountingStore {
    async fn get_all(&self) -> Result<Vec<Rate>> {
        self.inner.get_all().await
    }

    async fn save(&self, rates: &[Rate]) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.save(rates).await
    }

    async fn delete_all(&self) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_all().await
    }

    async fn replace(&self, rates: &[Rate]) -> Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.replace(rates).await
    }
}

/// Dialog that records every message instead of showing it.
#[derive(Default)]
pub struct RecordingDialog {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingDialog {
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn last_message(&self) -> Option<String> {
        self.messages().last().map(|(_, message)| message.clone())
    }
}

#[async_trait]
impl DialogService for RecordingDialog {
    async fn show_message(&self, title: &str, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}
