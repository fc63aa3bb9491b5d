mod aggregate;
mod constants;
mod demolition;
mod density;
mod error;
mod numeric;
mod projection;
mod report;
mod tax;
mod types;

pub use aggregate::{dividend_price, max_contribution_years, ratio_asset, total_transition};
pub use constants::{
    DEFAULT_DEMOLITION_YEARS, DEFAULT_SEED, DEFAULT_TRIALS, HORIZON_YEARS, UNIT_DIVISOR,
};
pub use demolition::demolition_price;
pub use density::density_distribution;
pub use error::{CalcError, CalcResult};
pub use report::{CalcSettings, Calculation, Recalculation, calculate, recalculate};
pub use tax::DividendTax;
pub use types::{
    ASSET_FIELD_COUNT, AssetParams, AssetRatio, DemolitionSchedule, DensityDistribution,
    DividendSeries, NamedValue, ProjectedAsset, RiskRow, TotalTransition,
};
