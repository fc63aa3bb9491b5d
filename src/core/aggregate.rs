//! Portfolio-level series built from projected holdings.

use super::constants::UNIT_DIVISOR;
use super::error::{CalcError, CalcResult};
use super::numeric::{floor_div, round_one_decimal, round_to_int};
use super::tax::after_capital_gains_tax;
use super::types::{AssetRatio, DividendSeries, NamedValue, ProjectedAsset, TotalTransition};

/// Largest contribution period in the portfolio. Every aggregate is reported
/// up to this year rather than over the full horizon.
pub fn max_contribution_years(assets: &[ProjectedAsset]) -> CalcResult<usize> {
    assets
        .iter()
        .map(|asset| asset.params.contribution_years)
        .max()
        .ok_or(CalcError::EmptyPortfolio)
}

/// Sums the rounded capital and market-value series of all holdings for years
/// `0..=max_year`.
pub fn total_transition(assets: &[ProjectedAsset]) -> CalcResult<TotalTransition> {
    let max_year = max_contribution_years(assets)?;
    let mut capital = vec![0_i64; max_year + 1];
    let mut price = vec![0_i64; max_year + 1];

    let accumulate = |total: &mut i64, value: f64, year: usize| -> CalcResult<()> {
        *total = round_to_int(value)
            .and_then(|units| total.checked_add(units))
            .ok_or(CalcError::Overflow { year })?;
        Ok(())
    };

    for asset in assets {
        for year in 0..=max_year {
            accumulate(&mut capital[year], asset.capital_transition[year], year)?;
            accumulate(&mut price[year], asset.price_transition[year], year)?;
        }
    }

    Ok(TotalTransition {
        max_year,
        price_transition: price,
        capital_price_transition: capital,
    })
}

/// Value of each holding at `max_year`, before and after capital-gains tax,
/// in display units. Input order is kept.
pub fn ratio_asset(assets: &[ProjectedAsset]) -> CalcResult<AssetRatio> {
    let max_year = max_contribution_years(assets)?;
    let mut not_tax = Vec::with_capacity(assets.len());
    let mut has_tax = Vec::with_capacity(assets.len());

    for asset in assets {
        let value = asset.price_transition[max_year];
        let capital = asset.capital_transition[max_year];
        let after_tax = after_capital_gains_tax(value, capital, asset.params.is_tax_sheltered);

        not_tax.push(NamedValue {
            name: asset.params.name.clone(),
            y: floor_div(value, UNIT_DIVISOR),
        });
        has_tax.push(NamedValue {
            name: asset.params.name.clone(),
            y: floor_div(after_tax, UNIT_DIVISOR),
        });
    }

    Ok(AssetRatio { not_tax, has_tax })
}

/// Yearly dividend income (net) and the tax withheld on it, in display units.
///
/// A holding whose series is shorter than `max_year` repeats its last yearly
/// split for the remaining years instead of extrapolating its value.
pub fn dividend_price(assets: &[ProjectedAsset]) -> CalcResult<DividendSeries> {
    let max_year = max_contribution_years(assets)?;
    let mut price = vec![0.0; max_year + 1];
    let mut tax = vec![0.0; max_year + 1];

    for asset in assets {
        let dividend_tax = asset.params.dividend_tax();
        let mut last_split = (0.0, 0.0);
        for year in 0..=max_year {
            if let Some(value) = asset.price_transition.get(year) {
                let gross = value * asset.params.dividend_rate / UNIT_DIVISOR;
                last_split = dividend_tax.net_and_tax(gross);
            }
            let (net, withheld) = last_split;
            price[year] += net;
            tax[year] += withheld;
        }
    }

    Ok(DividendSeries {
        price: price.into_iter().map(round_one_decimal).collect(),
        tax: tax.into_iter().map(round_one_decimal).collect(),
    })
}
