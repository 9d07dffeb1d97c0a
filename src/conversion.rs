//! Amount conversion between two rate records.

use crate::core::rate::Rate;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    /// The rate cannot be used as a divisor or multiplier.
    #[error("Invalid tax rate {tax_rate} for currency {code}")]
    InvalidTaxRate { code: String, tax_rate: f64 },
    /// Positive, but too large or too small for decimal arithmetic.
    #[error("Tax rate {tax_rate} for currency {code} is out of range")]
    TaxRateOutOfRange { code: String, tax_rate: f64 },
    #[error("Converted amount from {source_code} to {target_code} is out of range")]
    Overflow {
        source_code: String,
        target_code: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest<'a> {
    pub amount: Decimal,
    pub source_rate: &'a Rate,
    pub target_rate: &'a Rate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub converted_amount: Decimal,
    pub display_text: String,
}

fn rate_factor(rate: &Rate) -> Result<Decimal, ConversionError> {
    if !rate.tax_rate.is_finite() || rate.tax_rate <= 0.0 {
        return Err(ConversionError::InvalidTaxRate {
            code: rate.code.clone(),
            tax_rate: rate.tax_rate,
        });
    }
    let out_of_range = || ConversionError::TaxRateOutOfRange {
        code: rate.code.clone(),
        tax_rate: rate.tax_rate,
    };
    let factor = Decimal::try_from(rate.tax_rate).map_err(|_| out_of_range())?;
    // Values below 1e-28 collapse to zero
    if factor <= Decimal::ZERO {
        return Err(out_of_range());
    }
    Ok(factor)
}

fn two_decimals(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts `amount` from the source currency into the target currency.
///
/// The amount is first expressed in the base currency (division), then in the
/// target currency (multiplication). The order matters for rounding.
pub fn convert(request: &ConversionRequest) -> Result<ConversionResult, ConversionError> {
    let source_factor = rate_factor(request.source_rate)?;
    let target_factor = rate_factor(request.target_rate)?;

    let converted_amount = request
        .amount
        .checked_div(source_factor)
        .and_then(|base| base.checked_mul(target_factor))
        .ok_or_else(|| ConversionError::Overflow {
            source_code: request.source_rate.code.clone(),
            target_code: request.target_rate.code.clone(),
        })?;
    let display_text = format!(
        "{} ${:.2} = {} ${:.2}",
        request.source_rate.code,
        two_decimals(request.amount),
        request.target_rate.code,
        two_decimals(converted_amount)
    );

    Ok(ConversionResult {
        converted_amount,
        display_text,
    })
}
