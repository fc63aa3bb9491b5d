//! Monte Carlo spread of profit and loss at the end of the contribution period.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::aggregate::max_contribution_years;
use super::constants::{BUCKET_CENTRE_DIVISOR, MONTHS_PER_YEAR, PERCENT, PERCENTILE_DIVISOR, UNIT_DIVISOR};
use super::error::{CalcError, CalcResult};
use super::numeric::{floor_div, signed_display};
use super::types::{DensityDistribution, ProjectedAsset, RiskRow};

/// Runs `trials` random monthly paths per holding up to the portfolio's
/// `max_year`, summarises each holding's outcomes and bins the portfolio-wide
/// totals into a histogram.
///
/// Draws are taken from `rng` holding by holding, trial by trial, so the same
/// seed always yields the same report.
pub fn density_distribution<R: Rng + ?Sized>(
    assets: &[ProjectedAsset],
    trials: usize,
    rng: &mut R,
) -> CalcResult<DensityDistribution> {
    let max_year = max_contribution_years(assets)?;
    if trials == 0 {
        return Err(CalcError::InvalidTrials(trials));
    }

    let mut totals = vec![0.0; trials];
    let mut table_rows = Vec::with_capacity(assets.len());

    for asset in assets {
        let origin = asset.capital_transition[max_year];
        let mut outcomes: Vec<f64> = (0..trials)
            .map(|_| simulate_path(asset, max_year, &mut *rng) - origin)
            .collect();
        if outcomes.iter().any(|value| !value.is_finite()) {
            return Err(CalcError::NonFinite {
                name: asset.params.name.clone(),
                what: "simulated value",
            });
        }

        for (total, outcome) in totals.iter_mut().zip(&outcomes) {
            *total += outcome;
        }

        outcomes.sort_by(|a, b| a.total_cmp(b));
        table_rows.push(risk_row(asset, origin, &outcomes));
    }

    Ok(DensityDistribution {
        data: histogram(totals, trials),
        table_rows,
    })
}

/// Final market value of one random path.
fn simulate_path<R: Rng + ?Sized>(asset: &ProjectedAsset, max_year: usize, rng: &mut R) -> f64 {
    let params = &asset.params;
    let mean = params.monthly_yield();
    let sd = params.monthly_volatility();

    let mut price = params.initial_fund;
    for year in 0..max_year {
        let contributing = year < params.contribution_years;
        for _ in 0..MONTHS_PER_YEAR {
            let z: f64 = StandardNormal.sample(&mut *rng);
            let monthly_return = mean + sd * z;
            price *= 1.0 + monthly_return;
            if contributing {
                price += params.reserved;
            }
        }
    }
    price
}

fn risk_row(asset: &ProjectedAsset, origin: f64, sorted: &[f64]) -> RiskRow {
    let trials = sorted.len();
    let at_or_below_zero = sorted.partition_point(|v| *v <= 0.0);
    let prob = at_or_below_zero as f64 / trials as f64 * PERCENT;

    let step = trials / PERCENTILE_DIVISOR;
    let marker = |k: usize| signed_display(floor_div(sorted[step * k], UNIT_DIVISOR));

    RiskRow {
        name: asset.params.name.clone(),
        origin_price: floor_div(origin, UNIT_DIVISOR),
        top10: marker(9),
        top30: marker(7),
        worst30: marker(3),
        worst10: marker(1),
        prob: format!("{prob:.2} %"),
    }
}

/// Snaps each total to the centre of one of ten equal-width buckets over
/// `[min, max]` and returns `(bucket value, share of trials)` pairs in
/// ascending order.
fn histogram(mut totals: Vec<f64>, trials: usize) -> Vec<(f64, f64)> {
    totals.sort_by(|a, b| a.total_cmp(b));
    let (Some(&min), Some(&max)) = (totals.first(), totals.last()) else {
        return Vec::new();
    };
    let width = floor_div(max - min, PERCENTILE_DIVISOR as f64);
    // A zero width means the whole spread is under ten units: one bucket at `min`.
    let (half_width, width) = if width == 0.0 {
        (0.0, None)
    } else {
        (floor_div(width, BUCKET_CENTRE_DIVISOR), Some(width))
    };

    let mut data: Vec<(f64, usize)> = Vec::new();
    for total in totals {
        let offset = match width {
            Some(width) => floor_div(total - min, width) * width,
            None => 0.0,
        };
        let value = floor_div(offset - half_width + min, UNIT_DIVISOR);
        match data.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => data.push((value, 1)),
        }
    }

    data.into_iter()
        .map(|(value, count)| (value, count as f64 / trials as f64))
        .collect()
}
