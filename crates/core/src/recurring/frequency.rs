//! Recurrence frequencies and next-occurrence arithmetic.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// How often a recurring expense repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    /// Every day.
    Daily,
    /// Every 7 days.
    Weekly,
    /// Every 14 days.
    Biweekly,
    /// Every calendar month.
    Monthly,
    /// Every 3 calendar months.
    Quarterly,
    /// Every calendar year.
    Yearly,
}

impl Frequency {
    /// All supported frequencies, shortest first.
    pub const ALL: [Self; 6] = [
        Self::Daily,
        Self::Weekly,
        Self::Biweekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Yearly,
    ];

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Biweekly => "BIWEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Quarterly => "QUARTERLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Computes the occurrence that follows `current`.
    ///
    /// Day and week steps add a fixed number of days. Month, quarter and year
    /// steps use calendar addition: when the target month is shorter, the day
    /// is clamped to its last valid day (`2024-01-31` + 1 month is
    /// `2024-02-29`, `2024-02-29` + 1 year is `2025-02-28`). The clamp does not
    /// stick; the following step starts from the clamped date.
    ///
    /// Results beyond the representable range saturate at `NaiveDate::MAX`.
    #[must_use]
    pub fn next_date(self, current: NaiveDate) -> NaiveDate {
        let next = match self {
            Self::Daily => current.checked_add_days(Days::new(1)),
            Self::Weekly => current.checked_add_days(Days::new(7)),
            Self::Biweekly => current.checked_add_days(Days::new(14)),
            Self::Monthly => current.checked_add_months(Months::new(1)),
            Self::Quarterly => current.checked_add_months(Months::new(3)),
            Self::Yearly => current.checked_add_months(Months::new(12)),
        };
        next.unwrap_or(NaiveDate::MAX)
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            "BIWEEKLY" => Ok(Self::Biweekly),
            "MONTHLY" => Ok(Self::Monthly),
            "QUARTERLY" => Ok(Self::Quarterly),
            "YEARLY" => Ok(Self::Yearly),
            _ => Err(format!("Unknown frequency: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(Frequency::Daily, date(2024, 1, 1), date(2024, 1, 2))]
    #[case(Frequency::Daily, date(2023, 12, 31), date(2024, 1, 1))]
    #[case(Frequency::Weekly, date(2024, 1, 1), date(2024, 1, 8))]
    #[case(Frequency::Weekly, date(2024, 2, 26), date(2024, 3, 4))]
    #[case(Frequency::Biweekly, date(2024, 1, 1), date(2024, 1, 15))]
    #[case(Frequency::Biweekly, date(2024, 12, 25), date(2025, 1, 8))]
    #[case(Frequency::Monthly, date(2024, 1, 15), date(2024, 2, 15))]
    #[case(Frequency::Monthly, date(2024, 12, 1), date(2025, 1, 1))]
    #[case(Frequency::Quarterly, date(2024, 1, 1), date(2024, 4, 1))]
    #[case(Frequency::Quarterly, date(2024, 11, 30), date(2025, 2, 28))]
    #[case(Frequency::Yearly, date(2024, 3, 1), date(2025, 3, 1))]
    fn test_next_date_offsets(
        #[case] frequency: Frequency,
        #[case] current: NaiveDate,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(frequency.next_date(current), expected);
    }

    #[test]
    fn test_monthly_clamps_to_end_of_february_in_leap_year() {
        assert_eq!(
            Frequency::Monthly.next_date(date(2024, 1, 31)),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_monthly_clamps_to_end_of_february_in_common_year() {
        assert_eq!(
            Frequency::Monthly.next_date(date(2023, 1, 31)),
            date(2023, 2, 28)
        );
    }

    #[test]
    fn test_monthly_clamp_does_not_stick() {
        let february = Frequency::Monthly.next_date(date(2023, 1, 31));
        assert_eq!(Frequency::Monthly.next_date(february), date(2023, 3, 28));
    }

    #[test]
    fn test_yearly_from_leap_day() {
        assert_eq!(
            Frequency::Yearly.next_date(date(2024, 2, 29)),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn test_next_date_saturates_at_max() {
        assert_eq!(Frequency::Yearly.next_date(NaiveDate::MAX), NaiveDate::MAX);
        assert_eq!(Frequency::Daily.next_date(NaiveDate::MAX), NaiveDate::MAX);
    }

    #[test]
    fn test_display_and_parse() {
        for frequency in Frequency::ALL {
            assert_eq!(Frequency::from_str(frequency.as_str()).unwrap(), frequency);
            assert_eq!(frequency.to_string(), frequency.as_str());
        }
        assert_eq!(Frequency::from_str("monthly").unwrap(), Frequency::Monthly);
        assert!(Frequency::from_str("FORTNIGHTLY").is_err());
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&Frequency::Biweekly).unwrap();
        assert_eq!(json, "\"BIWEEKLY\"");
        let parsed: Frequency = serde_json::from_str("\"QUARTERLY\"").unwrap();
        assert_eq!(parsed, Frequency::Quarterly);
    }

    fn frequency_strategy() -> impl Strategy<Value = Frequency> {
        prop_oneof![
            Just(Frequency::Daily),
            Just(Frequency::Weekly),
            Just(Frequency::Biweekly),
            Just(Frequency::Monthly),
            Just(Frequency::Quarterly),
            Just(Frequency::Yearly),
        ]
    }

    /// Dates between 1970-01-01 and roughly 2100.
    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0u64..47_000).prop_map(|days| date(1970, 1, 1) + Days::new(days))
    }

    proptest! {
        #[test]
        fn prop_next_date_is_strictly_later(
            frequency in frequency_strategy(),
            current in date_strategy(),
        ) {
            prop_assert!(frequency.next_date(current) > current);
        }

        #[test]
        fn prop_fixed_day_steps_are_exact(current in date_strategy()) {
            prop_assert_eq!((Frequency::Daily.next_date(current) - current).num_days(), 1);
            prop_assert_eq!((Frequency::Weekly.next_date(current) - current).num_days(), 7);
            prop_assert_eq!((Frequency::Biweekly.next_date(current) - current).num_days(), 14);
        }

        #[test]
        fn prop_calendar_steps_never_overshoot_target_month(
            frequency in prop_oneof![
                Just(Frequency::Monthly),
                Just(Frequency::Quarterly),
                Just(Frequency::Yearly),
            ],
            current in date_strategy(),
        ) {
            use chrono::Datelike;

            let months = match frequency {
                Frequency::Monthly => 1,
                Frequency::Quarterly => 3,
                _ => 12,
            };
            let next = frequency.next_date(current);
            let current_index = current.year() * 12 + i32::try_from(current.month0()).unwrap();
            let next_index = next.year() * 12 + i32::try_from(next.month0()).unwrap();
            prop_assert_eq!(next_index - current_index, months);
            prop_assert!(next.day() <= current.day());
        }
    }
}
