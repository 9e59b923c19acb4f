//! Fare formula and the display formatting used in fare responses.

/// Flat amount charged for every ride.
pub const BASE_FARE: f64 = 5.0;

/// Amount charged per kilometer of straight-line distance.
pub const RATE_PER_KM: f64 = 2.0;

/// Estimate the fare for a ride of `distance_km`, rounded to cents.
pub fn estimate_fare(distance_km: f64) -> f64 {
    round_to_cents(BASE_FARE + RATE_PER_KM * distance_km)
}

/// Round to two decimals, matching [`to_fixed_2`].
pub fn round_to_cents(value: f64) -> f64 {
    to_fixed_2(value).parse().unwrap_or(value)
}

/// Format with exactly two decimals, rounding like JavaScript's `toFixed(2)`.
///
/// Rust's formatter already rounds on the exact binary value but breaks exact
/// ties to even, where `toFixed` breaks them away from zero. A double sits
/// exactly halfway between two cents only when it is an odd multiple of 1/8,
/// and in that case `value * 100.0` is exact, so `f64::round` settles it.
pub fn to_fixed_2(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.is_finite() && eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let cents = (value * 100.0).round();
        return format!("{:.2}", cents / 100.0);
    }
    format!("{value:.2}")
}

/// `"1.60 km"`
pub fn format_distance(distance_km: f64) -> String {
    format!("{} km", to_fixed_2(distance_km))
}

/// `"₵8.20"` for the default symbol.
pub fn format_fare(currency_symbol: &str, fare: f64) -> String {
    format!("{currency_symbol}{}", to_fixed_2(fare))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance_is_base_fare() {
        assert_eq!(estimate_fare(0.0), 5.0);
    }

    #[test]
    fn test_fare_formula() {
        assert_eq!(estimate_fare(1.600113089993178), 8.2);
        assert_eq!(estimate_fare(10.0), 25.0);
        assert_eq!(estimate_fare(343.5298654949116), 692.06);
    }

    #[test]
    fn test_fare_never_below_base() {
        for d in [0.0, 0.001, 0.0024, 0.5, 1.53, 12.345, 999.999] {
            let fare = estimate_fare(d);
            assert!(fare >= BASE_FARE, "fare({d}) = {fare}");
            assert!((fare - (BASE_FARE + RATE_PER_KM * d)).abs() <= 0.005 + 1e-9);
        }
    }

    #[test]
    fn test_to_fixed_ties_round_away_from_zero() {
        // Exactly representable halves
        assert_eq!(to_fixed_2(8.125), "8.13");
        assert_eq!(to_fixed_2(0.375), "0.38");
        assert_eq!(to_fixed_2(2.625), "2.63");
        assert_eq!(to_fixed_2(-0.125), "-0.13");
    }

    #[test]
    fn test_to_fixed_uses_binary_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(to_fixed_2(1.005), "1.00");
        assert_eq!(to_fixed_2(8.200226179986357), "8.20");
        assert_eq!(to_fixed_2(1.6001130899931784), "1.60");
        assert_eq!(to_fixed_2(2.5), "2.50");
        assert_eq!(to_fixed_2(0.0), "0.00");
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(format_distance(1.6001130899931784), "1.60 km");
        assert_eq!(format_distance(0.0), "0.00 km");
        assert_eq!(format_fare("₵", 8.2), "₵8.20");
        assert_eq!(format_fare("GHS ", 25.0), "GHS 25.00");
    }
}
