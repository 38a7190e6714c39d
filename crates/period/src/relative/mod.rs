//! Relative period sets.
//!
//! A [`RelativePeriods`] value is a set of independent flags such as
//! "this month" or "last 12 months". The set is resolved into concrete
//! periods by [`PeriodContext::relative_periods`](crate::PeriodContext::relative_periods).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use period_core::{PeriodType, Result};

mod kind;
mod resolve;

pub use kind::RelativePeriodEnum;

bitflags::bitflags! {
    /// Named relative periods, resolved against a reference date.
    ///
    /// Flags are independent; any combination is valid.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RelativePeriods: u64 {
        /// The day containing the reference date.
        const THIS_DAY = 1 << 0;
        /// The day before the reference date.
        const YESTERDAY = 1 << 1;
        /// The last 3 days.
        const LAST_3_DAYS = 1 << 2;
        /// The last 7 days.
        const LAST_7_DAYS = 1 << 3;
        /// The last 14 days.
        const LAST_14_DAYS = 1 << 4;
        /// The last 30 days.
        const LAST_30_DAYS = 1 << 5;
        /// The last 60 days.
        const LAST_60_DAYS = 1 << 6;
        /// The last 90 days.
        const LAST_90_DAYS = 1 << 7;
        /// The last 180 days.
        const LAST_180_DAYS = 1 << 8;
        /// The month containing the reference date.
        const THIS_MONTH = 1 << 9;
        /// The previous month.
        const LAST_MONTH = 1 << 10;
        /// The bi-month containing the reference date.
        const THIS_BIMONTH = 1 << 11;
        /// The previous bi-month.
        const LAST_BIMONTH = 1 << 12;
        /// The quarter containing the reference date.
        const THIS_QUARTER = 1 << 13;
        /// The previous quarter.
        const LAST_QUARTER = 1 << 14;
        /// The six-month containing the reference date.
        const THIS_SIX_MONTH = 1 << 15;
        /// The previous six-month.
        const LAST_SIX_MONTH = 1 << 16;
        /// Every week of the current week-year.
        const WEEKS_THIS_YEAR = 1 << 17;
        /// Every month of the current year.
        const MONTHS_THIS_YEAR = 1 << 18;
        /// Every bi-month of the current year.
        const BIMONTHS_THIS_YEAR = 1 << 19;
        /// Every quarter of the current year.
        const QUARTERS_THIS_YEAR = 1 << 20;
        /// The current year.
        const THIS_YEAR = 1 << 21;
        /// Every month of the previous year.
        const MONTHS_LAST_YEAR = 1 << 22;
        /// Every quarter of the previous year.
        const QUARTERS_LAST_YEAR = 1 << 23;
        /// The previous year.
        const LAST_YEAR = 1 << 24;
        /// The last 5 years.
        const LAST_5_YEARS = 1 << 25;
        /// The last 10 years.
        const LAST_10_YEARS = 1 << 26;
        /// The last 12 months.
        const LAST_12_MONTHS = 1 << 27;
        /// The last 6 months.
        const LAST_6_MONTHS = 1 << 28;
        /// The last 3 months.
        const LAST_3_MONTHS = 1 << 29;
        /// The last 6 bi-months.
        const LAST_6_BIMONTHS = 1 << 30;
        /// The last 4 quarters.
        const LAST_4_QUARTERS = 1 << 31;
        /// The last 2 six-months.
        const LAST_2_SIXMONTHS = 1 << 32;
        /// The current financial year.
        const THIS_FINANCIAL_YEAR = 1 << 33;
        /// The previous financial year.
        const LAST_FINANCIAL_YEAR = 1 << 34;
        /// The last 5 financial years.
        const LAST_5_FINANCIAL_YEARS = 1 << 35;
        /// The last 10 financial years.
        const LAST_10_FINANCIAL_YEARS = 1 << 36;
        /// The week containing the reference date.
        const THIS_WEEK = 1 << 37;
        /// The previous week.
        const LAST_WEEK = 1 << 38;
        /// The bi-week containing the reference date.
        const THIS_BIWEEK = 1 << 39;
        /// The previous bi-week.
        const LAST_BIWEEK = 1 << 40;
        /// The last 4 weeks.
        const LAST_4_WEEKS = 1 << 41;
        /// The last 4 bi-weeks.
        const LAST_4_BIWEEKS = 1 << 42;
        /// The last 12 weeks.
        const LAST_12_WEEKS = 1 << 43;
        /// The last 52 weeks.
        const LAST_52_WEEKS = 1 << 44;
    }
}

impl RelativePeriods {
    const DAILY: Self = Self::THIS_DAY
        .union(Self::YESTERDAY)
        .union(Self::LAST_3_DAYS)
        .union(Self::LAST_7_DAYS)
        .union(Self::LAST_14_DAYS)
        .union(Self::LAST_30_DAYS)
        .union(Self::LAST_60_DAYS)
        .union(Self::LAST_90_DAYS)
        .union(Self::LAST_180_DAYS);
    const WEEKLY: Self = Self::THIS_WEEK
        .union(Self::LAST_WEEK)
        .union(Self::LAST_4_WEEKS)
        .union(Self::LAST_12_WEEKS)
        .union(Self::LAST_52_WEEKS);
    const BI_WEEKLY: Self = Self::THIS_BIWEEK
        .union(Self::LAST_BIWEEK)
        .union(Self::LAST_4_BIWEEKS);
    const MONTHLY: Self = Self::THIS_MONTH
        .union(Self::LAST_MONTH)
        .union(Self::LAST_12_MONTHS)
        .union(Self::LAST_6_MONTHS)
        .union(Self::LAST_3_MONTHS);
    const BI_MONTHLY: Self = Self::THIS_BIMONTH
        .union(Self::LAST_BIMONTH)
        .union(Self::LAST_6_BIMONTHS);
    const QUARTERLY: Self = Self::THIS_QUARTER
        .union(Self::LAST_QUARTER)
        .union(Self::LAST_4_QUARTERS);
    const SIX_MONTHLY: Self = Self::THIS_SIX_MONTH
        .union(Self::LAST_SIX_MONTH)
        .union(Self::LAST_2_SIXMONTHS);
    const FINANCIAL: Self = Self::THIS_FINANCIAL_YEAR
        .union(Self::LAST_FINANCIAL_YEAR)
        .union(Self::LAST_5_FINANCIAL_YEARS)
        .union(Self::LAST_10_FINANCIAL_YEARS);

    /// Returns true if any financial year flag is set.
    #[must_use]
    pub const fn is_financial(self) -> bool {
        self.intersects(Self::FINANCIAL)
    }

    /// Returns the most frequent period type among the set flags.
    ///
    /// Financial flags map to the type of `financial_year_start`. An empty set
    /// and sets of yearly flags only map to [`PeriodType::Yearly`].
    #[must_use]
    pub const fn period_type(self, financial_year_start: FinancialYearStart) -> PeriodType {
        if self.intersects(Self::DAILY) {
            PeriodType::Daily
        } else if self.intersects(Self::WEEKLY) {
            PeriodType::Weekly
        } else if self.intersects(Self::BI_WEEKLY) {
            PeriodType::BiWeekly
        } else if self.intersects(Self::MONTHLY) {
            PeriodType::Monthly
        } else if self.intersects(Self::BI_MONTHLY) {
            PeriodType::BiMonthly
        } else if self.intersects(Self::QUARTERLY) {
            PeriodType::Quarterly
        } else if self.intersects(Self::SIX_MONTHLY) {
            PeriodType::SixMonthly
        } else if self.intersects(Self::FINANCIAL) {
            financial_year_start.period_type()
        } else {
            PeriodType::Yearly
        }
    }

    /// Rewinds `date` by `rewind` periods of [`period_type`](Self::period_type).
    ///
    /// Defaults to today and a single period.
    pub fn rewinded_date(
        self,
        financial_year_start: FinancialYearStart,
        date: Option<NaiveDate>,
        rewind: Option<u32>,
    ) -> Result<NaiveDate> {
        self.period_type(financial_year_start).rewinded_date(date, rewind)
    }

    /// Builds a set from individual relative periods.
    #[must_use]
    pub fn from_enums<I>(relative_periods: I) -> Self
    where
        I: IntoIterator<Item = RelativePeriodEnum>,
    {
        relative_periods
            .into_iter()
            .fold(Self::empty(), |flags, relative| flags | relative.flag())
    }

    /// Returns the individual relative periods of this set, in declaration order.
    #[must_use]
    pub fn enums(self) -> Vec<RelativePeriodEnum> {
        RelativePeriodEnum::ALL
            .iter()
            .copied()
            .filter(|relative| self.contains(relative.flag()))
            .collect()
    }
}

/// First month of the financial year used by the financial relative periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialYearStart {
    /// Financial year starting in April.
    April,
    /// Financial year starting in July.
    July,
    /// Financial year starting in September.
    September,
    /// Financial year starting in October.
    #[default]
    October,
    /// Financial year starting in November.
    November,
}

impl FinancialYearStart {
    /// Returns the financial period type for this start month.
    #[must_use]
    pub const fn period_type(self) -> PeriodType {
        match self {
            Self::April => PeriodType::FinancialApril,
            Self::July => PeriodType::FinancialJuly,
            Self::September => PeriodType::FinancialSep,
            Self::October => PeriodType::FinancialOct,
            Self::November => PeriodType::FinancialNov,
        }
    }
}
