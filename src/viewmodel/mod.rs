//! View-model for the exchange screen.
//!
//! Owns every piece of state a view observes and exposes the user actions as
//! plain async methods. The view layer only reads observables and calls these
//! methods.

pub mod observable;

use crate::conversion::{self, ConversionRequest, ConversionResult};
use crate::core::dialog::{DialogService, ERROR_TITLE};
use crate::core::rate::{LoadSource, Rate};
use crate::repository::RateRepository;
use anyhow::{Result, bail};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

pub use observable::{Observable, ReadOnly};

pub const LOADING_MESSAGE: &str = "Loading rates...";
pub const READY_MESSAGE: &str = "Ready to convert!";

pub const AMOUNT_REQUIRED: &str = "You must enter a value in amount.";
pub const AMOUNT_NOT_NUMERIC: &str = "You must enter a numeric value in amount.";
pub const SOURCE_REQUIRED: &str = "You must select a source rate.";
pub const TARGET_REQUIRED: &str = "You must select a target rate.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Ready,
    Unavailable,
}

pub struct ExchangeViewModel {
    repository: Arc<RateRepository>,
    dialog: Arc<dyn DialogService>,
    state: Observable<ViewState>,
    amount: Observable<String>,
    rates: Observable<Vec<Rate>>,
    source_rate: Observable<Option<Rate>>,
    target_rate: Observable<Option<Rate>>,
    is_running: Observable<bool>,
    is_enabled: Observable<bool>,
    result: Observable<Option<ConversionResult>>,
    status: Observable<String>,
}

/// Puts the view-model back into a consistent state when a load ends,
/// including when the load future is dropped mid-flight.
struct LoadGuard<'a> {
    vm: &'a ExchangeViewModel,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if self.vm.state.set_if(|s| *s == ViewState::Loading, ViewState::Idle) {
            debug!("Rate load cancelled");
        }
        self.vm.is_running.set(false);
    }
}

impl ExchangeViewModel {
    pub fn new(repository: Arc<RateRepository>, dialog: Arc<dyn DialogService>) -> Self {
        Self {
            repository,
            dialog,
            state: Observable::default(),
            amount: Observable::default(),
            rates: Observable::default(),
            source_rate: Observable::default(),
            target_rate: Observable::default(),
            is_running: Observable::default(),
            is_enabled: Observable::default(),
            result: Observable::default(),
            status: Observable::default(),
        }
    }

    pub fn state(&self) -> ReadOnly<'_, ViewState> {
        self.state.read_only()
    }

    pub fn amount(&self) -> ReadOnly<'_, String> {
        self.amount.read_only()
    }

    pub fn rates(&self) -> ReadOnly<'_, Vec<Rate>> {
        self.rates.read_only()
    }

    pub fn source_rate(&self) -> ReadOnly<'_, Option<Rate>> {
        self.source_rate.read_only()
    }

    pub fn target_rate(&self) -> ReadOnly<'_, Option<Rate>> {
        self.target_rate.read_only()
    }

    pub fn is_running(&self) -> ReadOnly<'_, bool> {
        self.is_running.read_only()
    }

    pub fn is_enabled(&self) -> ReadOnly<'_, bool> {
        self.is_enabled.read_only()
    }

    pub fn result(&self) -> ReadOnly<'_, Option<ConversionResult>> {
        self.result.read_only()
    }

    pub fn status(&self) -> ReadOnly<'_, String> {
        self.status.read_only()
    }

    /// Loads the rate list and moves to `Ready` or `Unavailable`.
    ///
    /// Fails without side effects if a load is already running.
    pub async fn start(&self) -> Result<LoadSource> {
        if !self.is_running.set_if(|running| !running, true) {
            bail!("A rate load is already in progress");
        }
        let _guard = LoadGuard { vm: self };

        self.state.set(ViewState::Loading);
        self.status.set(LOADING_MESSAGE.to_string());

        let load = self.repository.load().await;
        debug!(source = ?load.source, count = load.rates.len(), "Load finished");

        if load.rates.is_empty() {
            self.rates.set(Vec::new());
            self.source_rate.set(None);
            self.target_rate.set(None);
            self.is_enabled.set(false);
            self.status.set(load.message);
            self.state.set(ViewState::Unavailable);
        } else {
            // Selections survive a reload only if their code is still present
            let reselect = |selected: Option<Rate>| {
                selected.and_then(|old| load.rates.iter().find(|r| r.code == old.code).cloned())
            };
            self.source_rate.set(reselect(self.source_rate.get()));
            self.target_rate.set(reselect(self.target_rate.get()));
            self.rates.set(load.rates);
            self.is_enabled.set(true);
            self.status.set(READY_MESSAGE.to_string());
            self.state.set(ViewState::Ready);
        }

        Ok(load.source)
    }

    pub fn set_amount(&self, amount: &str) {
        self.amount.set(amount.to_string());
    }

    /// Selects the source rate by currency code. Returns false if the code is
    /// not in the loaded list.
    pub fn select_source(&self, code: &str) -> bool {
        match self.find_rate(code) {
            Some(rate) => {
                self.source_rate.set(Some(rate));
                true
            }
            None => false,
        }
    }

    pub fn select_target(&self, code: &str) -> bool {
        match self.find_rate(code) {
            Some(rate) => {
                self.target_rate.set(Some(rate));
                true
            }
            None => false,
        }
    }

    fn find_rate(&self, code: &str) -> Option<Rate> {
        self.rates.with(|rates| {
            rates
                .iter()
                .find(|r| r.code.eq_ignore_ascii_case(code))
                .cloned()
        })
    }

    /// Exchanges source and target, then converts again if an amount is set.
    pub async fn swap(&self) -> Option<ConversionResult> {
        let source = self.source_rate.get();
        let target = self.target_rate.get();
        self.source_rate.set(target);
        self.target_rate.set(source);

        if self.amount.with(|amount| amount.trim().is_empty()) {
            return None;
        }
        self.convert().await
    }

    /// Validates the inputs and publishes a new result.
    ///
    /// The first failing check is shown through the dialog service and
    /// `result` is left untouched.
    pub async fn convert(&self) -> Option<ConversionResult> {
        let amount_text = self.amount.get();
        let amount_text = amount_text.trim();
        if amount_text.is_empty() {
            self.show_error(AMOUNT_REQUIRED).await;
            return None;
        }

        let Ok(amount) = Decimal::from_str(amount_text) else {
            self.show_error(AMOUNT_NOT_NUMERIC).await;
            return None;
        };

        let Some(source_rate) = self.source_rate.get() else {
            self.show_error(SOURCE_REQUIRED).await;
            return None;
        };

        let Some(target_rate) = self.target_rate.get() else {
            self.show_error(TARGET_REQUIRED).await;
            return None;
        };

        let request = ConversionRequest {
            amount,
            source_rate: &source_rate,
            target_rate: &target_rate,
        };
        match conversion::convert(&request) {
            Ok(result) => {
                debug!(text = %result.display_text, "Converted");
                self.result.set(Some(result.clone()));
                Some(result)
            }
            Err(e) => {
                warn!(error = %e, "Conversion rejected");
                self.show_error(&e.to_string()).await;
                None
            }
        }
    }

    async fn show_error(&self, message: &str) {
        self.dialog.show_message(ERROR_TITLE, message).await;
    }
}
