//! Single relative period identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use period_core::PeriodError;

use super::RelativePeriods;

/// A single relative period, identified externally by a stable string such
/// as `LAST_12_MONTHS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RelativePeriodEnum {
    /// `TODAY`
    Today,
    /// `YESTERDAY`
    Yesterday,
    /// `LAST_3_DAYS`
    Last3Days,
    /// `LAST_7_DAYS`
    Last7Days,
    /// `LAST_14_DAYS`
    Last14Days,
    /// `LAST_30_DAYS`
    Last30Days,
    /// `LAST_60_DAYS`
    Last60Days,
    /// `LAST_90_DAYS`
    Last90Days,
    /// `LAST_180_DAYS`
    Last180Days,
    /// `THIS_MONTH`
    ThisMonth,
    /// `LAST_MONTH`
    LastMonth,
    /// `THIS_BIMONTH`
    ThisBimonth,
    /// `LAST_BIMONTH`
    LastBimonth,
    /// `THIS_QUARTER`
    ThisQuarter,
    /// `LAST_QUARTER`
    LastQuarter,
    /// `THIS_SIX_MONTH`
    ThisSixMonth,
    /// `LAST_SIX_MONTH`
    LastSixMonth,
    /// `WEEKS_THIS_YEAR`
    WeeksThisYear,
    /// `MONTHS_THIS_YEAR`
    MonthsThisYear,
    /// `BIMONTHS_THIS_YEAR`
    BimonthsThisYear,
    /// `QUARTERS_THIS_YEAR`
    QuartersThisYear,
    /// `THIS_YEAR`
    ThisYear,
    /// `MONTHS_LAST_YEAR`
    MonthsLastYear,
    /// `QUARTERS_LAST_YEAR`
    QuartersLastYear,
    /// `LAST_YEAR`
    LastYear,
    /// `LAST_5_YEARS`
    Last5Years,
    /// `LAST_10_YEARS`
    Last10Years,
    /// `LAST_12_MONTHS`
    Last12Months,
    /// `LAST_6_MONTHS`
    Last6Months,
    /// `LAST_3_MONTHS`
    Last3Months,
    /// `LAST_6_BIMONTHS`
    Last6Bimonths,
    /// `LAST_4_QUARTERS`
    Last4Quarters,
    /// `LAST_2_SIXMONTHS`
    Last2Sixmonths,
    /// `THIS_FINANCIAL_YEAR`
    ThisFinancialYear,
    /// `LAST_FINANCIAL_YEAR`
    LastFinancialYear,
    /// `LAST_5_FINANCIAL_YEARS`
    Last5FinancialYears,
    /// `LAST_10_FINANCIAL_YEARS`
    Last10FinancialYears,
    /// `THIS_WEEK`
    ThisWeek,
    /// `LAST_WEEK`
    LastWeek,
    /// `THIS_BIWEEK`
    ThisBiweek,
    /// `LAST_BIWEEK`
    LastBiweek,
    /// `LAST_4_WEEKS`
    Last4Weeks,
    /// `LAST_4_BIWEEKS`
    Last4Biweeks,
    /// `LAST_12_WEEKS`
    Last12Weeks,
    /// `LAST_52_WEEKS`
    Last52Weeks,
}

impl RelativePeriodEnum {
    /// Every relative period, in flag order.
    pub const ALL: [Self; 45] = [
        Self::Today,
        Self::Yesterday,
        Self::Last3Days,
        Self::Last7Days,
        Self::Last14Days,
        Self::Last30Days,
        Self::Last60Days,
        Self::Last90Days,
        Self::Last180Days,
        Self::ThisMonth,
        Self::LastMonth,
        Self::ThisBimonth,
        Self::LastBimonth,
        Self::ThisQuarter,
        Self::LastQuarter,
        Self::ThisSixMonth,
        Self::LastSixMonth,
        Self::WeeksThisYear,
        Self::MonthsThisYear,
        Self::BimonthsThisYear,
        Self::QuartersThisYear,
        Self::ThisYear,
        Self::MonthsLastYear,
        Self::QuartersLastYear,
        Self::LastYear,
        Self::Last5Years,
        Self::Last10Years,
        Self::Last12Months,
        Self::Last6Months,
        Self::Last3Months,
        Self::Last6Bimonths,
        Self::Last4Quarters,
        Self::Last2Sixmonths,
        Self::ThisFinancialYear,
        Self::LastFinancialYear,
        Self::Last5FinancialYears,
        Self::Last10FinancialYears,
        Self::ThisWeek,
        Self::LastWeek,
        Self::ThisBiweek,
        Self::LastBiweek,
        Self::Last4Weeks,
        Self::Last4Biweeks,
        Self::Last12Weeks,
        Self::Last52Weeks,
    ];

    /// Returns the stable string identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Today => "TODAY",
            Self::Yesterday => "YESTERDAY",
            Self::Last3Days => "LAST_3_DAYS",
            Self::Last7Days => "LAST_7_DAYS",
            Self::Last14Days => "LAST_14_DAYS",
            Self::Last30Days => "LAST_30_DAYS",
            Self::Last60Days => "LAST_60_DAYS",
            Self::Last90Days => "LAST_90_DAYS",
            Self::Last180Days => "LAST_180_DAYS",
            Self::ThisMonth => "THIS_MONTH",
            Self::LastMonth => "LAST_MONTH",
            Self::ThisBimonth => "THIS_BIMONTH",
            Self::LastBimonth => "LAST_BIMONTH",
            Self::ThisQuarter => "THIS_QUARTER",
            Self::LastQuarter => "LAST_QUARTER",
            Self::ThisSixMonth => "THIS_SIX_MONTH",
            Self::LastSixMonth => "LAST_SIX_MONTH",
            Self::WeeksThisYear => "WEEKS_THIS_YEAR",
            Self::MonthsThisYear => "MONTHS_THIS_YEAR",
            Self::BimonthsThisYear => "BIMONTHS_THIS_YEAR",
            Self::QuartersThisYear => "QUARTERS_THIS_YEAR",
            Self::ThisYear => "THIS_YEAR",
            Self::MonthsLastYear => "MONTHS_LAST_YEAR",
            Self::QuartersLastYear => "QUARTERS_LAST_YEAR",
            Self::LastYear => "LAST_YEAR",
            Self::Last5Years => "LAST_5_YEARS",
            Self::Last10Years => "LAST_10_YEARS",
            Self::Last12Months => "LAST_12_MONTHS",
            Self::Last6Months => "LAST_6_MONTHS",
            Self::Last3Months => "LAST_3_MONTHS",
            Self::Last6Bimonths => "LAST_6_BIMONTHS",
            Self::Last4Quarters => "LAST_4_QUARTERS",
            Self::Last2Sixmonths => "LAST_2_SIXMONTHS",
            Self::ThisFinancialYear => "THIS_FINANCIAL_YEAR",
            Self::LastFinancialYear => "LAST_FINANCIAL_YEAR",
            Self::Last5FinancialYears => "LAST_5_FINANCIAL_YEARS",
            Self::Last10FinancialYears => "LAST_10_FINANCIAL_YEARS",
            Self::ThisWeek => "THIS_WEEK",
            Self::LastWeek => "LAST_WEEK",
            Self::ThisBiweek => "THIS_BIWEEK",
            Self::LastBiweek => "LAST_BIWEEK",
            Self::Last4Weeks => "LAST_4_WEEKS",
            Self::Last4Biweeks => "LAST_4_BIWEEKS",
            Self::Last12Weeks => "LAST_12_WEEKS",
            Self::Last52Weeks => "LAST_52_WEEKS",
        }
    }

    /// Returns the flag of this relative period.
    #[must_use]
    pub const fn flag(self) -> RelativePeriods {
        // variants are declared in flag bit order
        RelativePeriods::from_bits_retain(1 << self as u32)
    }
}

impl fmt::Display for RelativePeriodEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelativePeriodEnum {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|relative| relative.as_str() == s)
            .ok_or_else(|| PeriodError::UnknownRelativePeriod(s.to_string()))
    }
}

impl TryFrom<String> for RelativePeriodEnum {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RelativePeriodEnum> for String {
    fn from(relative: RelativePeriodEnum) -> Self {
        relative.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_declaration_order() {
        for (position, relative) in RelativePeriodEnum::ALL.iter().enumerate() {
            assert_eq!(*relative as usize, position);
        }
    }

    #[test]
    fn test_flags_match_names() {
        for relative in RelativePeriodEnum::ALL {
            let flag = relative.flag();
            assert_eq!(flag.iter().count(), 1, "{relative}");
            let (name, _) = flag.iter_names().next().unwrap();
            let expected = match relative {
                RelativePeriodEnum::Today => "THIS_DAY",
                other => other.as_str(),
            };
            assert_eq!(name, expected);
        }
    }

    #[test]
    fn test_string_round_trip() {
        for relative in RelativePeriodEnum::ALL {
            assert_eq!(relative.to_string().parse::<RelativePeriodEnum>(), Ok(relative));
        }
        assert!(matches!(
            "LAST_2_DAYS".parse::<RelativePeriodEnum>(),
            Err(PeriodError::UnknownRelativePeriod(_))
        ));
        assert!("last_12_months".parse::<RelativePeriodEnum>().is_err());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&RelativePeriodEnum::Last12Months).unwrap();
        assert_eq!(json, "\"LAST_12_MONTHS\"");
        let parsed: Vec<RelativePeriodEnum> =
            serde_json::from_str(r#"["TODAY", "LAST_5_FINANCIAL_YEARS"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![RelativePeriodEnum::Today, RelativePeriodEnum::Last5FinancialYears]
        );
        assert!(serde_json::from_str::<RelativePeriodEnum>("\"NEXT_YEAR\"").is_err());
    }
}
