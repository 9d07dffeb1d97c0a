//! Remote rate list abstractions

use crate::core::rate::Rate;
use async_trait::async_trait;

/// Outcome of a remote list request. Failures are carried in `message`
/// rather than returned as errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub is_success: bool,
    pub message: String,
    pub result: Vec<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(result: Vec<T>) -> Self {
        Self {
            is_success: true,
            message: "Ok".to_string(),
            result,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: message.into(),
            result: Vec::new(),
        }
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn get_list(&self, base_url: &str, path: &str) -> ApiResponse<Rate>;
}
