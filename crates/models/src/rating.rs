//! Derived ship rating.
//!
//! `rating = 80 * speed * k / (current_year - prod_year + 1)` with `k = 0.5`
//! for used ships and `1` otherwise, rounded half-up to two decimal places.
//! The whole computation runs in decimal arithmetic so that values such as
//! `0.225` round up instead of collapsing to `0.22499999999999998`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::ModelError;
use crate::ship::Model;

pub const CURRENT_YEAR: i32 = 3019;
const RATING_FACTOR: i64 = 80;
const RATING_SCALE: u32 = 2;

pub fn compute_rating(speed: f64, used: bool, prod_year: i32) -> Result<Decimal, ModelError> {
    compute_rating_with_current_year(speed, used, prod_year, CURRENT_YEAR)
}

pub fn compute_rating_with_current_year(
    speed: f64,
    used: bool,
    prod_year: i32,
    current_year: i32,
) -> Result<Decimal, ModelError> {
    if !speed.is_finite() {
        return Err(ModelError::invalid("speed", "must be a finite number"));
    }
    let years = i64::from(current_year) - i64::from(prod_year) + 1;
    if years <= 0 {
        return Err(ModelError::invalid("prodDate", format!("year {prod_year} is after {current_year}")));
    }
    // Shortest round-trip text of the f64, i.e. the value the caller wrote.
    let speed: Decimal = speed
        .to_string()
        .parse()
        .map_err(|_| ModelError::invalid("speed", format!("{speed} is out of decimal range")))?;
    let wear = if used { Decimal::new(5, 1) } else { Decimal::ONE };

    let raw = Decimal::from(RATING_FACTOR)
        .checked_mul(speed)
        .and_then(|v| v.checked_mul(wear))
        .and_then(|v| v.checked_div(Decimal::from(years)))
        .ok_or_else(|| ModelError::invalid("rating", "overflow"))?;

    let mut rating = raw.round_dp_with_strategy(RATING_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rating.rescale(RATING_SCALE);
    Ok(rating)
}

/// Rating of an already merged record.
pub fn rating_of(ship: &Model) -> Result<Decimal, ModelError> {
    compute_rating(ship.speed, ship.is_used, ship.prod_year())
}

/// Storage representation of a rating.
pub fn rating_value(rating: Decimal) -> f64 {
    rating.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// The rounding a careless implementation would do.
    fn naive(speed: f64, used: bool, prod_year: i32) -> f64 {
        let raw = 80.0 * speed * if used { 0.5 } else { 1.0 } / f64::from(CURRENT_YEAR - prod_year + 1);
        (raw * 100.0).round() / 100.0
    }

    #[test]
    fn new_ship_example() {
        let r = compute_rating(0.5, false, 3010).unwrap();
        assert_eq!(r, dec("4.00"));
        assert_eq!(r.to_string(), "4.00");
    }

    #[test]
    fn used_ship_halves_the_rating() {
        assert_eq!(compute_rating(0.5, true, 3010).unwrap(), dec("2.00"));
    }

    #[test]
    fn always_two_decimal_places() {
        for (speed, used, year) in [(0.5, false, 3010), (0.33, true, 2900), (0.99, false, 3018), (0.01, true, 2801)] {
            let r = compute_rating(speed, used, year).unwrap();
            assert_eq!(r.scale(), 2, "{speed} {used} {year}");
        }
    }

    #[test]
    fn deterministic() {
        let a = compute_rating(0.77, true, 2950).unwrap();
        let b = compute_rating(0.77, true, 2950).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn midpoint_rounds_up_where_binary_float_rounds_down() {
        // 80 * 0.09 / 32 = 0.225 exactly; in f64 it is 0.22499999999999998.
        assert_eq!(naive(0.09, false, 2988), 0.22);
        assert_eq!(compute_rating(0.09, false, 2988).unwrap(), dec("0.23"));

        // 80 * 0.41 / 32 = 1.025
        assert_eq!(naive(0.41, false, 2988), 1.02);
        assert_eq!(compute_rating(0.41, false, 2988).unwrap(), dec("1.03"));

        // 80 * 0.29 * 0.5 / 80 = 0.145
        assert_eq!(compute_rating(0.29, true, 2940).unwrap(), dec("0.15"));
    }

    #[test]
    fn half_up_not_bankers() {
        // 80 * 0.5 / 64 = 0.625; banker's rounding would give 0.62
        assert_eq!(compute_rating(0.5, false, 2956).unwrap(), dec("0.63"));
    }

    #[test]
    fn custom_current_year() {
        assert_eq!(compute_rating_with_current_year(0.5, false, 2010, 2019).unwrap(), dec("4.00"));
        assert_eq!(compute_rating_with_current_year(0.5, false, 2019, 2019).unwrap(), dec("40.00"));
    }

    #[test]
    fn rejects_production_after_current_year() {
        assert!(compute_rating_with_current_year(0.5, false, 3021, 3019).is_err());
        assert!(compute_rating_with_current_year(0.5, false, 3020, 3019).is_err());
    }

    #[test]
    fn rejects_non_finite_speed() {
        assert!(compute_rating(f64::NAN, false, 3000).is_err());
        assert!(compute_rating(f64::INFINITY, false, 3000).is_err());
    }

    #[test]
    fn storage_value() {
        assert_eq!(rating_value(dec("0.23")), 0.23);
        assert_eq!(rating_value(dec("4.00")), 4.0);
    }
}
