//! Reachability of the remote rate service

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub is_success: bool,
    pub message: String,
}

impl ConnectionStatus {
    pub fn ok() -> Self {
        Self {
            is_success: true,
            message: "Ok".to_string(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait ConnectivityChecker: Send + Sync {
    async fn check_connection(&self) -> ConnectionStatus;
}
