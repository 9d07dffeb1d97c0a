//! User-facing message surface

use async_trait::async_trait;

pub const ERROR_TITLE: &str = "Error";
pub const ACCEPT_LABEL: &str = "Accept";

#[async_trait]
pub trait DialogService: Send + Sync {
    async fn show_message(&self, title: &str, message: &str);
}
