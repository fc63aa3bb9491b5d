use super::constants::{HORIZON_YEARS, MONTHS_PER_YEAR};
use super::types::{AssetParams, ProjectedAsset};

impl AssetParams {
    /// Walks the holding month by month over the full horizon and keeps the
    /// year-end values.
    ///
    /// While the year index is below `contribution_years` the reserved amount is
    /// paid in every month; afterwards capital is frozen and the market value
    /// keeps compounding.
    pub fn project(self) -> ProjectedAsset {
        let monthly_yield = self.monthly_yield();
        let mut capital = self.initial_fund;
        let mut price = self.initial_fund;

        let mut capital_transition = Vec::with_capacity(HORIZON_YEARS + 1);
        let mut price_transition = Vec::with_capacity(HORIZON_YEARS + 1);
        capital_transition.push(capital);
        price_transition.push(price);

        for year in 0..HORIZON_YEARS {
            let contributing = year < self.contribution_years;
            for _ in 0..MONTHS_PER_YEAR {
                if contributing {
                    capital += self.reserved;
                    price = price * (1.0 + monthly_yield) + self.reserved;
                } else {
                    price *= 1.0 + monthly_yield;
                }
            }
            capital_transition.push(capital);
            price_transition.push(price);
        }

        ProjectedAsset {
            params: self,
            capital_transition,
            price_transition,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const BANK_CAPITAL: [f64; 21] = [
        300000.0,
        360000.0,
        420000.0,
        480000.0,
        540000.0,
        600000.0,
        660000.0,
        720000.0,
        780000.0,
        780000.0,
        780000.0,
        780000.0,
        780000.0,
        780000.0,
        780000.0,
        780000.0,
        780000.0,
        780000.0,
        780000.0,
        780000.0,
        780000.0,
    ];
    const APPLE_CAPITAL: [f64; 21] = [
        200000.0,
        262400.0,
        324800.0,
        387200.0,
        449600.0,
        512000.0,
        574400.0,
        636800.0,
        699200.0,
        761600.0,
        824000.0,
        886400.0,
        886400.0,
        886400.0,
        886400.0,
        886400.0,
        886400.0,
        886400.0,
        886400.0,
        886400.0,
        886400.0,
    ];
    const TRADING_HOUSE_CAPITAL: [f64; 21] = [
        100.0,
        60100.0,
        120100.0,
        180100.0,
        240100.0,
        300100.0,
        360100.0,
        420100.0,
        480100.0,
        540100.0,
        540100.0,
        540100.0,
        540100.0,
        540100.0,
        540100.0,
        540100.0,
        540100.0,
        540100.0,
        540100.0,
        540100.0,
        540100.0,
    ];
    const GOOGLE_CAPITAL: [f64; 21] = [
        0.0,
        66000.0,
        132000.0,
        198000.0,
        264000.0,
        330000.0,
        396000.0,
        462000.0,
        528000.0,
        594000.0,
        660000.0,
        660000.0,
        660000.0,
        660000.0,
        660000.0,
        660000.0,
        660000.0,
        660000.0,
        660000.0,
        660000.0,
        660000.0,
    ];

    const BANK_PRICE: [f64; 21] = [
        300000.0,
        370802.18020972534,
        443940.83236637147,
        519493.06004418683,
        597538.51123537,
        678159.4623158621,
        761440.9047820102,
        847470.634849541,
        936339.3460093006,
        967238.5444276062,
        999157.4163937158,
        1032129.6111347071,
        1066189.8883021506,
        1101374.1546161207,
        1137719.501718451,
        1175264.2452751582,
        1214047.965369237,
        1254111.54822642,
        1295497.2293178902,
        1338248.6378853791,
        1382410.842935595,
    ];
    const APPLE_PRICE: [f64; 21] = [
        200000.0,
        280656.20969867916,
        367764.9161732527,
        461842.31916579214,
        563445.9143977346,
        673177.7972482325,
        791688.2307267701,
        919679.4988835909,
        1057910.0684929574,
        1207199.0836710727,
        1368431.2200634372,
        1542561.9273671915,
        1665966.8815565663,
        1799244.2320810913,
        1943183.770647578,
        2098638.472299383,
        2266529.550083333,
        2447851.9140899987,
        2643680.0672171973,
        2855174.472594572,
        3083588.4304021373,
    ];
    const TRADING_HOUSE_PRICE: [f64; 21] = [
        100.0,
        61603.379240458446,
        126489.44433914212,
        194944.24301825347,
        267164.0556247158,
        343355.95792453375,
        423738.41485084157,
        508541.90690809634,
        598009.5910285,
        692397.997775526,
        730479.88765318,
        770656.2814741048,
        813042.3769551808,
        857759.7076877158,
        904936.4916105402,
        954707.9986491201,
        1007216.9385748217,
        1062613.870196437,
        1121057.633057241,
        1182715.8028753896,
        1247765.1720335365,
    ];
    const GOOGLE_PRICE: [f64; 21] = [
        0.0,
        69352.18755690311,
        146541.17230773615,
        232452.51233541325,
        328071.8337862177,
        434496.13856096304,
        552946.3897752545,
        684781.5193767607,
        831514.0186232369,
        994827.2902845647,
        1176594.9616436223,
        1309550.19230935,
        1457529.3640403047,
        1622230.182176857,
        1805542.1927628398,
        2009568.4605450386,
        2236649.6965866247,
        2489391.1123009096,
        2770692.307990909,
        3083780.5387938786,
        3432247.7396775824,
    ];

    #[test]
    fn capital_transition_matches_reference_series_exactly() {
        assert_eq!(bank().capital_transition(), BANK_CAPITAL.as_slice());
        assert_eq!(apple().capital_transition(), APPLE_CAPITAL.as_slice());
        assert_eq!(trading_house().capital_transition(), TRADING_HOUSE_CAPITAL.as_slice());
        assert_eq!(google().capital_transition(), GOOGLE_CAPITAL.as_slice());
    }

    #[test]
    fn price_transition_matches_reference_series_exactly() {
        assert_eq!(bank().price_transition(), BANK_PRICE.as_slice());
        assert_eq!(apple().price_transition(), APPLE_PRICE.as_slice());
        assert_eq!(trading_house().price_transition(), TRADING_HOUSE_PRICE.as_slice());
        assert_eq!(google().price_transition(), GOOGLE_PRICE.as_slice());
    }

    #[test]
    fn lump_sum_compounds_at_the_annual_yield() {
        let asset = projected("LUMP", [7.0, 0.0, 0.0, 0.0, 1000.0, 1.0, 0.0, 1.0]);
        for (year, value) in asset.price_transition().iter().enumerate() {
            let expected = 1000.0 * 1.07f64.powi(year as i32);
            assert!(
                (value - expected).abs() <= 1e-8 * expected,
                "year {year}: expected {expected}, got {value}"
            );
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_capital_rises_then_holds(
            yield_bp in -500i32..2000,
            years in 0u32..=20,
            reserved in 0u32..50_000,
            initial in 0u32..5_000_000,
        ) {
            let asset = projected(
                "P",
                [yield_bp as f64 / 100.0, 1.0, years as f64, reserved as f64, initial as f64, 1.0, 5.0, 0.0],
            );
            let capital = asset.capital_transition();
            prop_assert_eq!(capital.len(), HORIZON_YEARS + 1);
            prop_assert_eq!(asset.price_transition().len(), HORIZON_YEARS + 1);
            for pair in capital.windows(2) {
                prop_assert!(pair[1] >= pair[0]);
            }
            for value in &capital[years as usize..] {
                prop_assert_eq!(*value, capital[years as usize]);
            }
        }
    }
}
