//! Simple-interest accrual math

/// Fixed divisor regardless of leap years.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Rewards accrued by a position over `days_staked` whole days.
///
/// `apy` is the pool's stored percentage value (`12.5` means 12.5%) and is
/// applied linearly, not compounded. The result is the raw f64 product; no
/// rounding is applied anywhere in the ledger.
pub fn accrued_rewards(amount: f64, apy: f64, days_staked: i64) -> f64 {
    amount * apy * days_staked as f64 / DAYS_PER_YEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_days_at_twelve_percent() {
        let rewards = accrued_rewards(1000.0, 12.0, 100);
        assert_eq!(rewards, 1000.0 * 12.0 * 100.0 / 365.0);
        assert!((rewards - 3287.671_232_876_712_5).abs() < 1e-9);
    }

    #[test]
    fn zero_days_accrues_nothing() {
        assert_eq!(accrued_rewards(1000.0, 12.0, 0), 0.0);
    }

    #[test]
    fn zero_apy_accrues_nothing() {
        assert_eq!(accrued_rewards(1000.0, 0.0, 365), 0.0);
    }

    #[test]
    fn full_year_yields_amount_times_apy() {
        assert_eq!(accrued_rewards(200.0, 7.5, 365), 200.0 * 7.5);
    }
}
