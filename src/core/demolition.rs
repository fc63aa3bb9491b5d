//! Drawdown schedule: a constant yearly withdrawal that runs each holding down
//! to zero over a fixed number of years.

use super::aggregate::max_contribution_years;
use super::constants::UNIT_DIVISOR;
use super::error::{CalcError, CalcResult};
use super::numeric::floor_div;
use super::types::{DemolitionSchedule, ProjectedAsset};

/// Yearly payment per unit of principal that amortises it over `duration`
/// years at `rate`.
fn annuity_factor(rate: f64, duration: u32) -> Option<f64> {
    let growth = (1.0 + rate).powf(duration as f64);
    let denominator = growth - 1.0;
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    Some(rate * growth / denominator)
}

/// Each holding starts from its value at the portfolio's `max_year` and earns
/// its yield plus after-tax dividend while paying out a fixed amount. The
/// per-holding schedules are summed in display units; the last year is
/// reported as exactly zero.
pub fn demolition_price(assets: &[ProjectedAsset], duration: u32) -> CalcResult<DemolitionSchedule> {
    let last_year = max_contribution_years(assets)?;
    if duration == 0 {
        return Err(CalcError::InvalidDuration(0));
    }

    let mut price_transition = vec![0.0; duration as usize + 1];
    let mut withdrawal_total = 0.0;

    for asset in assets {
        let params = &asset.params;
        let start_price = asset.price_transition[last_year];
        let yield_year =
            params.yield_rate + params.dividend_tax().effective_yield(params.dividend_rate);
        let k = annuity_factor(yield_year, duration).ok_or_else(|| CalcError::DegenerateYield {
            name: params.name.clone(),
            yield_rate: yield_year,
        })?;

        let withdrawal = start_price * k;
        withdrawal_total += withdrawal;

        let mut price = start_price;
        for (year, slot) in price_transition.iter_mut().enumerate() {
            if year > 0 {
                price = price * (1.0 + yield_year) - withdrawal;
            }
            *slot += floor_div(price, UNIT_DIVISOR);
        }
    }

    if let Some(last) = price_transition.last_mut() {
        *last = 0.0;
    }

    Ok(DemolitionSchedule {
        duration,
        demolition_price: floor_div(withdrawal_total, UNIT_DIVISOR),
        price_transition,
    })
}
