//! Currency rate records and the outcome of a rate load

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use tracing::warn;

/// A currency and its conversion factor against the service's base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    #[serde(default, alias = "RateId", alias = "rateId", skip_serializing_if = "Option::is_none")]
    pub rate_id: Option<i64>,
    #[serde(alias = "Code")]
    pub code: String,
    #[serde(alias = "Name")]
    pub name: String,
    /// Units of base currency per unit of this currency.
    #[serde(rename = "taxRate", alias = "TaxRate", alias = "tax_rate")]
    pub tax_rate: f64,
}

impl Rate {
    pub fn new(code: &str, name: &str, tax_rate: f64) -> Self {
        Self {
            rate_id: None,
            code: code.to_string(),
            name: name.to_string(),
            tax_rate,
        }
    }
}

impl Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadSource {
    Remote,
    LocalCache,
    None,
}

impl Display for LoadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LoadSource::Remote => "Internet",
                LoadSource::LocalCache => "Local data",
                LoadSource::None => "None",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult {
    pub source: LoadSource,
    pub rates: Vec<Rate>,
    pub message: String,
}

impl LoadResult {
    pub fn new(source: LoadSource, rates: Vec<Rate>, message: &str) -> Self {
        Self {
            source,
            rates,
            message: message.to_string(),
        }
    }
}

/// Drops rates whose code was already seen, keeping the first occurrence and
/// the original order.
pub fn dedup_by_code(rates: Vec<Rate>) -> Vec<Rate> {
    let mut seen = HashSet::new();
    rates
        .into_iter()
        .filter(|rate| {
            let fresh = seen.insert(rate.code.clone());
            if !fresh {
                warn!(code = %rate.code, "Dropping duplicate rate");
            }
            fresh
        })
        .collect()
}
