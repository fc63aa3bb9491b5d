use thiserror::Error;

pub type CalcResult<T> = Result<T, CalcError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("at least one asset is required")]
    EmptyPortfolio,

    #[error("invalid asset '{name}': {reason}")]
    InvalidAsset { name: String, reason: String },

    #[error("simulation trials must be > 0, got {0}")]
    InvalidTrials(usize),

    #[error("demolition duration must be >= 1 year, got {0}")]
    InvalidDuration(i64),

    #[error("portfolio total for year {year} does not fit a 64-bit integer")]
    Overflow { year: usize },

    #[error("asset '{name}' produced a non-finite {what}")]
    NonFinite { name: String, what: &'static str },

    #[error("asset '{name}' has an effective yield of {yield_rate}; a drawdown needs a non-zero yield")]
    DegenerateYield { name: String, yield_rate: f64 },
}
