//! Fixed rates and scaling factors shared by every projection.

/// Percentage inputs are divided by this to become fractions.
pub const PERCENT: f64 = 100.0;

pub const MONTHS_PER_YEAR: usize = 12;

/// Projection horizon in years.
pub const HORIZON_YEARS: usize = 20;

/// Tax on realised gains in a taxable account.
pub const CAPITAL_GAINS_TAX_RATE: f64 = 0.20315;

/// Share of a foreign dividend kept inside a tax-sheltered account (withholding only).
pub const FOREIGN_SHELTERED_DIVIDEND_RATE: f64 = 0.9;

/// Share of a domestic dividend kept in a taxable account.
pub const DOMESTIC_TAXABLE_DIVIDEND_RATE: f64 = 0.79685;

/// Share of a foreign dividend kept in a taxable account (withholding plus domestic tax).
pub const FOREIGN_TAXABLE_DIVIDEND_RATE: f64 = 0.71787;

/// Raw currency values are divided by this for display.
pub const UNIT_DIVISOR: f64 = 10_000.0;

pub const DEFAULT_TRIALS: usize = 1000;

/// Trials are split into this many slices for percentiles and histogram buckets.
pub const PERCENTILE_DIVISOR: usize = 10;

/// Histogram values are centred by half a bucket width.
pub const BUCKET_CENTRE_DIVISOR: f64 = 2.0;

pub const DEFAULT_DEMOLITION_YEARS: u32 = 20;

/// Seed of the per-request generator when none is configured.
pub const DEFAULT_SEED: u64 = 1;
