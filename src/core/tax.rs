//! Dividend and capital-gains tax treatment.
//!
//! The after-tax share of a dividend depends only on where the stock is listed
//! and which kind of account holds it, so every dividend calculation goes
//! through [`DividendTax`].

use super::constants::{
    CAPITAL_GAINS_TAX_RATE, DOMESTIC_TAXABLE_DIVIDEND_RATE, FOREIGN_SHELTERED_DIVIDEND_RATE,
    FOREIGN_TAXABLE_DIVIDEND_RATE,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DividendTax {
    pub is_domestic: bool,
    pub is_tax_sheltered: bool,
}

impl DividendTax {
    pub fn new(is_domestic: bool, is_tax_sheltered: bool) -> Self {
        Self {
            is_domestic,
            is_tax_sheltered,
        }
    }

    /// Share of a gross dividend the holder keeps.
    pub fn rate(self) -> f64 {
        match (self.is_tax_sheltered, self.is_domestic) {
            (true, true) => 1.0,
            (true, false) => FOREIGN_SHELTERED_DIVIDEND_RATE,
            (false, true) => DOMESTIC_TAXABLE_DIVIDEND_RATE,
            (false, false) => FOREIGN_TAXABLE_DIVIDEND_RATE,
        }
    }

    /// Splits a gross dividend into `(net, tax)`.
    pub fn net_and_tax(self, amount: f64) -> (f64, f64) {
        let net = amount * self.rate();
        (net, amount - net)
    }

    pub fn effective_yield(self, dividend_yield: f64) -> f64 {
        dividend_yield * self.rate()
    }
}

/// Market value after paying capital-gains tax on the gain over `capital`.
/// Tax-sheltered holdings are returned untouched.
pub fn after_capital_gains_tax(value: f64, capital: f64, is_tax_sheltered: bool) -> f64 {
    if is_tax_sheltered {
        return value;
    }
    let tax = (value - capital) * CAPITAL_GAINS_TAX_RATE;
    value - tax
}
