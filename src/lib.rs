pub mod cli;
pub mod conversion;
pub mod core;
pub mod providers;
pub mod repository;
pub mod store;
pub mod viewmodel;

#[cfg(test)]
mod testing;

use crate::cli::convert::ConvertArgs;
use crate::core::config::AppConfig;
use crate::providers::ApiService;
use crate::repository::RateRepository;
use crate::viewmodel::ExchangeViewModel;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Rates,
    Convert(ConvertArgs),
}

/// Wires the HTTP service, the rate cache and the console dialog into a view-model.
pub fn build_view_model(config: &AppConfig) -> Result<ExchangeViewModel> {
    let api = Arc::new(ApiService::from_config(&config.api)?);
    let store = store::open_rate_store(config);
    let repository = RateRepository::new(api.clone(), api, store, &config.api);

    Ok(ExchangeViewModel::new(
        Arc::new(repository),
        Arc::new(cli::ui::ConsoleDialog),
    ))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("forex starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let vm = build_view_model(&config)?;

    match command {
        AppCommand::Rates => cli::rates::run(&vm).await,
        AppCommand::Convert(args) => cli::convert::run(&vm, &args).await,
    }
}
