use serde::Serialize;

use super::constants::{HORIZON_YEARS, MONTHS_PER_YEAR, PERCENT};
use super::error::{CalcError, CalcResult};
use super::tax::DividendTax;

/// Number of numeric fields describing one holding.
pub const ASSET_FIELD_COUNT: usize = 8;

/// Validated parameters of one holding, before projection.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetParams {
    pub name: String,
    pub yield_rate: f64,
    pub dividend_rate: f64,
    pub contribution_years: usize,
    pub reserved: f64,
    pub initial_fund: f64,
    pub is_domestic: bool,
    pub volatility: f64,
    pub is_tax_sheltered: bool,
}

impl AssetParams {
    /// Builds parameters from the raw field order
    /// `[yield%, dividend%, years, reserved, initial fund, domestic, volatility%, sheltered]`.
    ///
    /// Percentages become fractions, years are truncated toward zero and the
    /// two flags are true when non-zero. A yield below -100% has no monthly
    /// root and is rejected.
    pub fn from_fields(name: impl Into<String>, fields: [f64; ASSET_FIELD_COUNT]) -> CalcResult<Self> {
        let name = name.into();
        if let Some(pos) = fields.iter().position(|v| !v.is_finite()) {
            return Err(CalcError::InvalidAsset {
                name,
                reason: format!("field {} is not a finite number", pos + 1),
            });
        }

        let [yld, div, years, reserved, initial_fund, is_domestic, volatility, sheltered] = fields;
        if yld < -PERCENT {
            return Err(CalcError::InvalidAsset {
                name,
                reason: format!("yield cannot fall below -100%, got {yld}%"),
            });
        }
        let years = years.trunc();
        if years < 0.0 || years > HORIZON_YEARS as f64 {
            return Err(CalcError::InvalidAsset {
                name,
                reason: format!("contribution years must be between 0 and {HORIZON_YEARS}, got {years}"),
            });
        }

        Ok(Self {
            name,
            yield_rate: yld / PERCENT,
            dividend_rate: div / PERCENT,
            contribution_years: years as usize,
            reserved,
            initial_fund,
            is_domestic: is_domestic != 0.0,
            volatility: volatility / PERCENT,
            is_tax_sheltered: sheltered != 0.0,
        })
    }

    /// Compound monthly equivalent of the annual yield.
    pub fn monthly_yield(&self) -> f64 {
        (1.0 + self.yield_rate).powf(1.0 / MONTHS_PER_YEAR as f64) - 1.0
    }

    pub fn monthly_volatility(&self) -> f64 {
        self.volatility * (1.0 / (MONTHS_PER_YEAR as f64).sqrt())
    }

    pub fn dividend_tax(&self) -> DividendTax {
        DividendTax::new(self.is_domestic, self.is_tax_sheltered)
    }
}

/// A holding together with its yearly projected series.
///
/// Both series hold `HORIZON_YEARS + 1` year-end values, starting with the
/// initial fund.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedAsset {
    pub(crate) params: AssetParams,
    pub(crate) capital_transition: Vec<f64>,
    pub(crate) price_transition: Vec<f64>,
}

impl ProjectedAsset {
    pub fn params(&self) -> &AssetParams {
        &self.params
    }

    pub fn name(&self) -> &str {
        &self.params.name
    }

    /// Principal paid in, year by year.
    pub fn capital_transition(&self) -> &[f64] {
        &self.capital_transition
    }

    /// Market value including growth, year by year.
    pub fn price_transition(&self) -> &[f64] {
        &self.price_transition
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalTransition {
    #[serde(rename = "max_year")]
    pub max_year: usize,
    pub price_transition: Vec<i64>,
    pub capital_price_transition: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedValue {
    pub name: String,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRatio {
    pub not_tax: Vec<NamedValue>,
    pub has_tax: Vec<NamedValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRow {
    pub name: String,
    pub origin_price: f64,
    pub top10: String,
    pub top30: String,
    pub worst30: String,
    pub worst10: String,
    pub prob: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityDistribution {
    /// `(bucket value, relative frequency)` in ascending bucket order.
    pub data: Vec<(f64, f64)>,
    pub table_rows: Vec<RiskRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DividendSeries {
    pub price: Vec<f64>,
    pub tax: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemolitionSchedule {
    pub duration: u32,
    pub demolition_price: f64,
    pub price_transition: Vec<f64>,
}
