//! One request's worth of work: project the holdings, then build every chart
//! payload from the same projections.

use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::Serialize;

use super::aggregate::{dividend_price, ratio_asset, total_transition};
use super::constants::{DEFAULT_DEMOLITION_YEARS, DEFAULT_SEED, DEFAULT_TRIALS};
use super::demolition::demolition_price;
use super::density::density_distribution;
use super::error::{CalcError, CalcResult};
use super::types::{
    AssetParams, AssetRatio, DemolitionSchedule, DensityDistribution, DividendSeries,
    ProjectedAsset, TotalTransition,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalcSettings {
    /// Seed of the generator built afresh for every calculation.
    pub seed: u64,
    pub trials: usize,
    pub demolition_years: u32,
}

impl Default for CalcSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            trials: DEFAULT_TRIALS,
            demolition_years: DEFAULT_DEMOLITION_YEARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub transition: TotalTransition,
    pub pie: AssetRatio,
    pub density: DensityDistribution,
    pub bar: DividendSeries,
    pub demolition: DemolitionSchedule,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recalculation {
    pub demolition: DemolitionSchedule,
}

fn project_all(params: Vec<AssetParams>) -> CalcResult<Vec<ProjectedAsset>> {
    if params.is_empty() {
        return Err(CalcError::EmptyPortfolio);
    }
    let assets: Vec<ProjectedAsset> = params.into_iter().map(AssetParams::project).collect();
    for asset in &assets {
        let mut series = asset.capital_transition().iter().chain(asset.price_transition());
        if series.any(|value| !value.is_finite()) {
            return Err(CalcError::NonFinite {
                name: asset.name().to_string(),
                what: "projection",
            });
        }
        tracing::debug!(
            name = asset.name(),
            years = asset.params().contribution_years,
            final_value = asset.price_transition().last().copied().unwrap_or_default(),
            "projected asset"
        );
    }
    Ok(assets)
}

/// Full report. Any failing part fails the whole calculation.
pub fn calculate(params: Vec<AssetParams>, settings: &CalcSettings) -> CalcResult<Calculation> {
    let assets = project_all(params)?;
    let mut rng = Pcg64::seed_from_u64(settings.seed);

    Ok(Calculation {
        transition: total_transition(&assets)?,
        pie: ratio_asset(&assets)?,
        density: density_distribution(&assets, settings.trials, &mut rng)?,
        bar: dividend_price(&assets)?,
        demolition: demolition_price(&assets, settings.demolition_years)?,
    })
}

/// Drawdown schedule only, for a caller-chosen duration.
pub fn recalculate(params: Vec<AssetParams>, duration: u32) -> CalcResult<Recalculation> {
    let assets = project_all(params)?;
    Ok(Recalculation {
        demolition: demolition_price(&assets, duration)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Vec<AssetParams> {
        vec![
            AssetParams::from_fields("MUFG", [3.3, 4.1, 8.0, 5000.0, 300000.0, 1.0, 3.2, 1.0])
                .unwrap(),
            AssetParams::from_fields("GOOGL", [11.3, 0.2, 10.0, 5500.0, 0.0, 0.0, 5.2, 0.0])
                .unwrap(),
        ]
    }

    #[test]
    fn calculate_is_reproducible_for_a_fixed_seed() {
        let settings = CalcSettings {
            trials: 200,
            ..CalcSettings::default()
        };
        let a = calculate(params(), &settings).unwrap();
        let b = calculate(params(), &settings).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn different_seeds_change_only_the_density() {
        let a = calculate(params(), &CalcSettings { trials: 100, ..CalcSettings::default() }).unwrap();
        let b = calculate(
            params(),
            &CalcSettings {
                seed: 99,
                trials: 100,
                ..CalcSettings::default()
            },
        )
        .unwrap();
        assert_eq!(a.transition, b.transition);
        assert_eq!(a.pie, b.pie);
        assert_eq!(a.bar, b.bar);
        assert_eq!(a.demolition, b.demolition);
        assert_ne!(a.density, b.density);
    }

    #[test]
    fn calculate_rejects_empty_portfolio() {
        assert_eq!(
            calculate(Vec::new(), &CalcSettings::default()),
            Err(CalcError::EmptyPortfolio)
        );
        assert_eq!(recalculate(Vec::new(), 10), Err(CalcError::EmptyPortfolio));
    }

    #[test]
    fn unbounded_projection_fails_the_whole_request() {
        let runaway =
            AssetParams::from_fields("HUGE", [900.0, 1.0, 1.0, 0.0, 1e300, 1.0, 1.0, 1.0]).unwrap();
        let expected = Err(CalcError::NonFinite {
            name: "HUGE".to_string(),
            what: "projection",
        });
        assert_eq!(calculate(vec![runaway.clone()], &CalcSettings::default()), expected);
        assert_eq!(recalculate(vec![runaway], 10).err(), expected.err());
    }

    #[test]
    fn total_loss_yield_still_calculates() {
        let wiped =
            AssetParams::from_fields("GONE", [-100.0, 2.0, 5.0, 1000.0, 100000.0, 1.0, 1.0, 1.0])
                .unwrap();
        let report = calculate(vec![wiped], &CalcSettings { trials: 20, ..CalcSettings::default() })
            .unwrap();
        assert_eq!(report.transition.price_transition[0], 100000);
        assert!(report.bar.price.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn recalculate_uses_requested_duration() {
        let report = recalculate(params(), 7).unwrap();
        assert_eq!(report.demolition.duration, 7);
        assert_eq!(report.demolition.price_transition.len(), 8);
    }

    #[test]
    fn report_serializes_with_chart_keys() {
        let report = calculate(params(), &CalcSettings { trials: 20, ..CalcSettings::default() }).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        for key in ["transition", "pie", "density", "bar", "demolition"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["transition"]["max_year"], 10);
        assert!(json["transition"]["priceTransition"].is_array());
        assert!(json["transition"]["capitalPriceTransition"].is_array());
        assert!(json["pie"]["notTax"].is_array());
        assert!(json["pie"]["hasTax"][0]["y"].is_number());
        assert!(json["density"]["data"][0].is_array());
        assert!(json["density"]["tableRows"][0]["originPrice"].is_number());
        assert!(json["density"]["tableRows"][0]["worst10"].is_string());
        assert!(json["bar"]["price"].is_array());
        assert_eq!(json["demolition"]["duration"], 20);
        assert!(json["demolition"]["demolitionPrice"].is_number());
    }
}
