use super::ui;
use crate::viewmodel::ExchangeViewModel;
use anyhow::{Result, bail};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub amount: String,
    pub from: String,
    pub to: String,
    pub swap: bool,
}

fn unknown_code(vm: &ExchangeViewModel, code: &str) -> String {
    let known = vm.rates().with(|rates| {
        rates
            .iter()
            .map(|r| r.code.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    });
    format!("Unknown currency code {code}. Available: {known}")
}

/// Loads rates, applies the user's selection and prints the conversion.
pub async fn run(vm: &ExchangeViewModel, args: &ConvertArgs) -> Result<()> {
    let source = super::load_rates(vm).await?;
    debug!(%source, "Rates ready");

    vm.set_amount(&args.amount);
    if !vm.select_source(&args.from) {
        bail!(unknown_code(vm, &args.from));
    }
    if !vm.select_target(&args.to) {
        bail!(unknown_code(vm, &args.to));
    }

    let result = if args.swap {
        vm.swap().await
    } else {
        vm.convert().await
    };

    match result {
        Some(result) => {
            println!(
                "{}",
                ui::style_text(&result.display_text, ui::StyleType::Result)
            );
            println!(
                "{}",
                ui::style_text(&format!("Rates from {source}"), ui::StyleType::Subtle)
            );
            Ok(())
        }
        // The dialog service has already reported why
        None => bail!("Conversion failed"),
    }
}
