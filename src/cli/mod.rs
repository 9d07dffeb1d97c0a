pub mod convert;
pub mod rates;
pub mod setup;
pub mod ui;

use crate::core::rate::LoadSource;
use crate::viewmodel::{ExchangeViewModel, LOADING_MESSAGE, ViewState};
use anyhow::{Result, bail};

/// Runs the view-model load behind a spinner and fails if no rates are usable.
pub async fn load_rates(vm: &ExchangeViewModel) -> Result<LoadSource> {
    let spinner = ui::new_spinner(LOADING_MESSAGE);
    let source = vm.start().await;
    spinner.finish_and_clear();

    let source = source?;
    if vm.state().get() == ViewState::Unavailable {
        bail!(vm.status().get());
    }
    Ok(source)
}
