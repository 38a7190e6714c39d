//! Frequency metadata of period types.
//!
//! The frequency order is the nominal length of a period in days. It orders
//! period types from most to least frequent and gives the number of periods
//! of one type that fit into another.

use crate::period_type::PeriodType;

impl PeriodType {
    /// Nominal period length in days.
    #[must_use]
    pub const fn frequency_order(self) -> u32 {
        match self {
            Self::Daily => 1,
            Self::Weekly
            | Self::WeeklyWednesday
            | Self::WeeklyThursday
            | Self::WeeklySaturday
            | Self::WeeklySunday => 7,
            Self::BiWeekly => 14,
            Self::Monthly => 30,
            Self::BiMonthly => 61,
            Self::Quarterly | Self::QuarterlyNov => 91,
            Self::SixMonthly | Self::SixMonthlyApril | Self::SixMonthlyNov => 182,
            Self::Yearly
            | Self::FinancialApril
            | Self::FinancialJuly
            | Self::FinancialSep
            | Self::FinancialOct
            | Self::FinancialNov => 365,
            Self::TwoYearly => 730,
        }
    }

    /// ISO-8601 duration of one period, e.g. `P3M`.
    #[must_use]
    pub const fn iso8601_duration(self) -> &'static str {
        match self {
            Self::Daily => "P1D",
            Self::Weekly
            | Self::WeeklyWednesday
            | Self::WeeklyThursday
            | Self::WeeklySaturday
            | Self::WeeklySunday => "P7D",
            Self::BiWeekly => "P14D",
            Self::Monthly => "P1M",
            Self::BiMonthly => "P2M",
            Self::Quarterly | Self::QuarterlyNov => "P3M",
            Self::SixMonthly | Self::SixMonthlyApril | Self::SixMonthlyNov => "P6M",
            Self::Yearly
            | Self::FinancialApril
            | Self::FinancialJuly
            | Self::FinancialSep
            | Self::FinancialOct
            | Self::FinancialNov => "P1Y",
            Self::TwoYearly => "P2Y",
        }
    }

    /// Number of periods in the trailing window built by
    /// [`generate_rolling_periods`](Self::generate_rolling_periods).
    #[must_use]
    pub const fn rolling_window_length(self) -> Option<usize> {
        match self.frequency_order() {
            1 => Some(365),
            7 => Some(52),
            14 => Some(26),
            30 => Some(12),
            61 => Some(6),
            91 => Some(4),
            182 => Some(2),
            365 => Some(5),
            _ => None,
        }
    }

    /// How many periods of `other` fit into one period of this type, rounded down.
    #[must_use]
    pub const fn period_span(self, other: Self) -> u32 {
        self.frequency_order() / other.frequency_order()
    }

    /// Returns true if periods of this type are shorter than periods of `other`.
    #[must_use]
    pub const fn is_more_frequent_than(self, other: Self) -> bool {
        self.frequency_order() < other.frequency_order()
    }

    /// Returns true for the weekly family, bi-weeks excluded.
    #[must_use]
    pub const fn is_weekly(self) -> bool {
        self.frequency_order() == 7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_order_is_monotonic() {
        let orders: Vec<u32> = PeriodType::ALL.iter().map(|t| t.frequency_order()).collect();
        assert!(orders.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_period_span() {
        assert_eq!(PeriodType::Yearly.period_span(PeriodType::Monthly), 12);
        assert_eq!(PeriodType::Yearly.period_span(PeriodType::Quarterly), 4);
        assert_eq!(PeriodType::Quarterly.period_span(PeriodType::Monthly), 3);
        assert_eq!(PeriodType::Monthly.period_span(PeriodType::Yearly), 0);
        assert_eq!(PeriodType::Yearly.period_span(PeriodType::Weekly), 52);
    }

    #[test]
    fn test_rolling_window_lengths() {
        assert_eq!(PeriodType::Daily.rolling_window_length(), Some(365));
        assert_eq!(PeriodType::WeeklySunday.rolling_window_length(), Some(52));
        assert_eq!(PeriodType::BiWeekly.rolling_window_length(), Some(26));
        assert_eq!(PeriodType::Monthly.rolling_window_length(), Some(12));
        assert_eq!(PeriodType::BiMonthly.rolling_window_length(), Some(6));
        assert_eq!(PeriodType::QuarterlyNov.rolling_window_length(), Some(4));
        assert_eq!(PeriodType::SixMonthlyApril.rolling_window_length(), Some(2));
        assert_eq!(PeriodType::FinancialJuly.rolling_window_length(), Some(5));
        assert_eq!(PeriodType::TwoYearly.rolling_window_length(), None);
    }

    #[test]
    fn test_durations() {
        assert_eq!(PeriodType::BiWeekly.iso8601_duration(), "P14D");
        assert_eq!(PeriodType::SixMonthlyNov.iso8601_duration(), "P6M");
        assert_eq!(PeriodType::FinancialOct.iso8601_duration(), "P1Y");
        assert!(PeriodType::Daily.is_more_frequent_than(PeriodType::Weekly));
        assert!(PeriodType::WeeklyThursday.is_weekly());
        assert!(!PeriodType::BiWeekly.is_weekly());
    }
}
