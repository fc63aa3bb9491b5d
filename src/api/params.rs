//! Query parameters → holdings.
//!
//! Every parameter is `<name>=<n1>,<n2>,…,<n8>` in the field order
//! `yield%, dividend%, years, reserved, initial fund, domestic, volatility%, sheltered`.

use thiserror::Error;

use crate::core::{ASSET_FIELD_COUNT, AssetParams, CalcError};

/// Longest drawdown a request may ask for.
pub const MAX_DURATION_YEARS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("'{name}' needs {expected} comma-separated numbers, got {found}")]
    FieldCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("'{name}' has a non-numeric field '{value}'")]
    NotNumeric { name: String, value: String },

    #[error("expected '<name>=<fields>', got '{0}'")]
    MalformedPair(String),

    #[error("a trailing duration parameter is required")]
    MissingDuration,

    #[error("duration must be a finite number of years, got {0}")]
    NonFiniteDuration(f64),

    #[error("duration must be at most {max} years, got {found}")]
    DurationTooLong { max: u32, found: f64 },

    #[error(transparent)]
    Calc(#[from] CalcError),
}

/// Keeps the first value of a repeated key, preserving key order.
pub fn first_values(pairs: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut unique: Vec<(String, String)> = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        if !unique.iter().any(|(seen, _)| *seen == key) {
            unique.push((key, value));
        }
    }
    unique
}

pub fn parse_numbers(name: &str, value: &str) -> Result<Vec<f64>, ParamError> {
    value
        .split(',')
        .map(|field| {
            field.trim().parse::<f64>().map_err(|_| ParamError::NotNumeric {
                name: name.to_string(),
                value: field.to_string(),
            })
        })
        .collect()
}

pub fn parse_asset(name: &str, value: &str) -> Result<AssetParams, ParamError> {
    let numbers = parse_numbers(name, value)?;
    let fields: [f64; ASSET_FIELD_COUNT] =
        numbers
            .as_slice()
            .try_into()
            .map_err(|_| ParamError::FieldCount {
                name: name.to_string(),
                expected: ASSET_FIELD_COUNT,
                found: numbers.len(),
            })?;
    Ok(AssetParams::from_fields(name, fields)?)
}

pub fn parse_assets(pairs: &[(String, String)]) -> Result<Vec<AssetParams>, ParamError> {
    pairs
        .iter()
        .map(|(name, value)| parse_asset(name, value))
        .collect()
}

/// `NAME=f1,…,f8` as given on the command line.
pub fn parse_asset_arg(arg: &str) -> Result<AssetParams, ParamError> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| ParamError::MalformedPair(arg.to_string()))?;
    parse_asset(name, value)
}

/// Whole years from a raw number, truncated toward zero.
pub fn parse_duration(raw: f64) -> Result<u32, ParamError> {
    if !raw.is_finite() {
        return Err(ParamError::NonFiniteDuration(raw));
    }
    let years = raw.trunc();
    if years > MAX_DURATION_YEARS as f64 {
        return Err(ParamError::DurationTooLong {
            max: MAX_DURATION_YEARS,
            found: years,
        });
    }
    if years < 1.0 {
        return Err(CalcError::InvalidDuration(years as i64).into());
    }
    Ok(years as u32)
}

/// Splits a drawdown request: every parameter but the last is a holding, the
/// last one's first number is the duration in years.
pub fn split_duration(pairs: &[(String, String)]) -> Result<(Vec<AssetParams>, u32), ParamError> {
    let ((name, value), assets) = pairs.split_last().ok_or(ParamError::MissingDuration)?;
    let numbers = parse_numbers(name, value)?;
    let raw = numbers.first().copied().ok_or(ParamError::MissingDuration)?;
    let duration = parse_duration(raw)?;
    Ok((parse_assets(assets)?, duration))
}
