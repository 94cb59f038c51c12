//! Storage fee assessment.

use crate::domain::foundation::Timestamp;

const SECONDS_PER_DAY: i64 = 86_400;

/// Assesses the storage fee owed when booking a pickup.
///
/// Every started day between the subject's registration at the facility
/// and `now` is billed at `daily_rate`: 2.3 elapsed days bill as 3 whole
/// days. Clock skew that puts `registered_on` in the future bills zero.
pub fn storage_fee(registered_on: &Timestamp, now: &Timestamp, daily_rate: i64) -> i64 {
    let elapsed_secs = now.duration_since(registered_on).num_seconds();
    if elapsed_secs <= 0 {
        return 0;
    }
    let days = (elapsed_secs + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    days * daily_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RATE: i64 = 19_000;

    #[test]
    fn partial_days_round_up() {
        let now = Timestamp::now();
        // 2.3 days = 198 720 seconds
        let registered = now.minus_seconds(198_720);
        assert_eq!(storage_fee(&registered, &now, RATE), 3 * RATE);
    }

    #[test]
    fn exact_day_boundaries_do_not_round_up() {
        let now = Timestamp::now();
        let registered = now.minus_seconds(2 * SECONDS_PER_DAY);
        assert_eq!(storage_fee(&registered, &now, RATE), 2 * RATE);
    }

    #[test]
    fn one_second_past_a_boundary_bills_the_next_day() {
        let now = Timestamp::now();
        let registered = now.minus_seconds(2 * SECONDS_PER_DAY + 1);
        assert_eq!(storage_fee(&registered, &now, RATE), 3 * RATE);
    }

    #[test]
    fn zero_elapsed_time_bills_nothing() {
        let now = Timestamp::now();
        assert_eq!(storage_fee(&now, &now, RATE), 0);
    }

    #[test]
    fn future_registration_bills_nothing() {
        let now = Timestamp::now();
        let future = now.minus_seconds(-3_600);
        assert_eq!(storage_fee(&future, &now, RATE), 0);
    }

    proptest! {
        #[test]
        fn fee_is_ceiling_of_days_times_rate(elapsed_secs in 1i64..(400 * SECONDS_PER_DAY)) {
            let now = Timestamp::now();
            let registered = now.minus_seconds(elapsed_secs);
            let fee = storage_fee(&registered, &now, RATE);

            let whole_days = elapsed_secs / SECONDS_PER_DAY;
            let expected_days = if elapsed_secs % SECONDS_PER_DAY == 0 {
                whole_days
            } else {
                whole_days + 1
            };
            prop_assert_eq!(fee, expected_days * RATE);
            prop_assert!(fee > 0);
        }
    }
}
