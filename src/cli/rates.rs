use super::ui;
use crate::core::rate::{LoadSource, Rate};
use crate::viewmodel::ExchangeViewModel;
use anyhow::Result;
use comfy_table::Cell;

/// Renders the loaded rates with the source they came from.
pub fn display_rates(rates: &[Rate], source: LoadSource) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell("Rate"),
    ]);

    for rate in rates {
        table.add_row(vec![
            Cell::new(&rate.code),
            Cell::new(&rate.name),
            ui::rate_cell(rate.tax_rate),
        ]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Exchange rates", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output.push_str(&format!(
        "\n\n{}",
        ui::style_text(&format!("Source: {source}"), ui::StyleType::Subtle)
    ));
    output
}

pub async fn run(vm: &ExchangeViewModel) -> Result<()> {
    let source = super::load_rates(vm).await?;
    let rates = vm.rates().get();
    println!("{}", display_rates(&rates, source));
    Ok(())
}
