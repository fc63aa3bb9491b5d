//! Float helpers whose rounding behaviour the reported figures depend on.

/// Floor division of floats, returning a whole-number `f64`.
///
/// Follows the usual floored-modulo definition: the remainder takes the sign
/// of the divisor, the quotient is corrected by one when the signs disagree,
/// and an exact zero quotient keeps the sign of `a / b`. `b` must be non-zero.
pub fn floor_div(a: f64, b: f64) -> f64 {
    let rem = a % b;
    let mut div = (a - rem) / b;
    if rem != 0.0 && ((b < 0.0) != (rem < 0.0)) {
        div -= 1.0;
    }
    if div == 0.0 {
        return 0.0_f64.copysign(a / b);
    }
    let floored = div.floor();
    if div - floored > 0.5 {
        floored + 1.0
    } else {
        floored
    }
}

/// Round half to even, to an integer. `None` when the result does not fit an `i64`.
pub fn round_to_int(value: f64) -> Option<i64> {
    // 2^63 is exact in f64; every integral value below it converts losslessly.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let rounded = value.round_ties_even();
    (rounded >= -LIMIT && rounded < LIMIT).then_some(rounded as i64)
}

/// Round to one decimal place, correctly rounded on the exact binary value.
pub fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// `+N`, `-N` or `±0` for a whole-number display value.
pub fn signed_display(value: f64) -> String {
    if value > 0.0 {
        format!("+{value:.0}")
    } else if value < 0.0 {
        format!("{value:.0}")
    } else {
        "±0".to_string()
    }
}
