//! Resolution of relative periods against a reference date.
//!
//! Periods are returned in a fixed order: financial years first, then days,
//! weeks, bi-weeks, months, bi-months, quarters and six-months, the "this
//! year" lists, the rolling windows, and finally everything anchored on the
//! previous year. Each period is named after its position in its group,
//! e.g. `month12` for the last month of a 12 month window.

use chrono::{Months, NaiveDate};
use tracing::{debug, instrument};

use period_core::{DateTimeUnit, Period, PeriodError, PeriodType, Result};

use super::{RelativePeriodEnum, RelativePeriods};
use crate::context::PeriodContext;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Names `prefix1`, `prefix2`, ...
fn numbered(prefix: &'static str) -> impl Fn(usize) -> String {
    move |position| format!("{prefix}{}", position + 1)
}

/// Names `prefix{n-1}`, ..., `prefix1`, `current` for a group of `len` periods.
fn counting_down(prefix: &'static str, current: &'static str, len: usize) -> impl Fn(usize) -> String {
    move |position| {
        let back = len.saturating_sub(position + 1);
        if back == 0 {
            current.to_string()
        } else {
            format!("{prefix}{back}")
        }
    }
}

fn month_name(suffix: &'static str) -> impl Fn(usize) -> String {
    move |position| {
        let month = MONTH_NAMES.get(position).copied().unwrap_or_default();
        format!("{month}{suffix}")
    }
}

fn named(periods: Vec<Period>, name: impl Fn(usize) -> String) -> Vec<Period> {
    periods
        .into_iter()
        .enumerate()
        .map(|(position, period)| period.with_name(name(position)))
        .collect()
}

fn last(mut periods: Vec<Period>, count: usize) -> Vec<Period> {
    let skip = periods.len().saturating_sub(count);
    periods.drain(..skip);
    periods
}

fn years_before(date: NaiveDate, years: u32) -> Result<NaiveDate> {
    date.checked_sub_months(Months::new(12 * years))
        .ok_or_else(|| PeriodError::DateOutOfRange(format!("{date} minus {years} years")))
}

impl PeriodContext {
    /// Resolves relative periods against a reference date, defaulting to today.
    ///
    /// Rolling windows such as [`RelativePeriods::LAST_3_MONTHS`] end with the
    /// period containing the reference date unless the context is configured
    /// with `rolling_includes_current = false`, in which case they end one
    /// period earlier.
    #[instrument(skip(self), level = "debug")]
    pub fn relative_periods(
        &self,
        flags: RelativePeriods,
        reference: Option<NaiveDate>,
    ) -> Result<Vec<Period>> {
        let date = reference.unwrap_or_else(|| self.today());
        let mut periods = Vec::new();

        if flags.is_financial() {
            self.financial_periods(flags, date, &mut periods)?;
        }

        if flags.contains(RelativePeriods::THIS_DAY) {
            periods.push(self.named_period(PeriodType::Daily, "thisDay", date)?);
        }
        if flags.contains(RelativePeriods::YESTERDAY) {
            let yesterday = PeriodType::Daily.rewinded_date(Some(date), None)?;
            periods.push(self.named_period(PeriodType::Daily, "yesterday", yesterday)?);
        }
        for (flag, count) in [
            (RelativePeriods::LAST_3_DAYS, 3),
            (RelativePeriods::LAST_7_DAYS, 7),
            (RelativePeriods::LAST_14_DAYS, 14),
            (RelativePeriods::LAST_30_DAYS, 30),
            (RelativePeriods::LAST_60_DAYS, 60),
            (RelativePeriods::LAST_90_DAYS, 90),
            (RelativePeriods::LAST_180_DAYS, 180),
        ] {
            if flags.contains(flag) {
                periods.extend(self.rolling(PeriodType::Daily, date, count, numbered("day"))?);
            }
        }

        let singles = [
            (RelativePeriods::THIS_WEEK, PeriodType::Weekly, "last_week", false),
            (RelativePeriods::LAST_WEEK, PeriodType::Weekly, "last_week", true),
            (RelativePeriods::THIS_BIWEEK, PeriodType::BiWeekly, "last_biweek", false),
            (RelativePeriods::LAST_BIWEEK, PeriodType::BiWeekly, "last_biweek", true),
            (RelativePeriods::THIS_MONTH, PeriodType::Monthly, "reporting_month", false),
            (RelativePeriods::LAST_MONTH, PeriodType::Monthly, "reporting_month", true),
            (RelativePeriods::THIS_BIMONTH, PeriodType::BiMonthly, "reporting_bimonth", false),
            (RelativePeriods::LAST_BIMONTH, PeriodType::BiMonthly, "reporting_bimonth", true),
            (RelativePeriods::THIS_QUARTER, PeriodType::Quarterly, "reporting_quarter", false),
            (RelativePeriods::LAST_QUARTER, PeriodType::Quarterly, "reporting_quarter", true),
            (RelativePeriods::THIS_SIX_MONTH, PeriodType::SixMonthly, "last_sixmonth", false),
            (RelativePeriods::LAST_SIX_MONTH, PeriodType::SixMonthly, "last_sixmonth", true),
        ];
        for (flag, period_type, name, rewind) in singles {
            if flags.contains(flag) {
                let anchor = if rewind {
                    period_type.rewinded_date(Some(date), None)?
                } else {
                    date
                };
                periods.push(self.named_period(period_type, name, anchor)?);
            }
        }

        if flags.contains(RelativePeriods::WEEKS_THIS_YEAR) {
            periods.extend(named(
                self.generate_periods(PeriodType::Weekly, date)?,
                numbered("w"),
            ));
        }
        if flags.contains(RelativePeriods::MONTHS_THIS_YEAR) {
            periods.extend(named(
                self.generate_periods(PeriodType::Monthly, date)?,
                month_name(""),
            ));
        }
        if flags.contains(RelativePeriods::BIMONTHS_THIS_YEAR) {
            periods.extend(named(
                self.generate_periods(PeriodType::BiMonthly, date)?,
                numbered("bimonth"),
            ));
        }
        if flags.contains(RelativePeriods::QUARTERS_THIS_YEAR) {
            periods.extend(named(
                self.generate_periods(PeriodType::Quarterly, date)?,
                numbered("quarter"),
            ));
        }
        if flags.contains(RelativePeriods::THIS_YEAR) {
            periods.push(self.named_period(PeriodType::Yearly, "year", date)?);
        }

        let windows = [
            (RelativePeriods::LAST_3_MONTHS, PeriodType::Monthly, 3, "month"),
            (RelativePeriods::LAST_6_MONTHS, PeriodType::Monthly, 6, "month"),
            (RelativePeriods::LAST_12_MONTHS, PeriodType::Monthly, 12, "month"),
            (RelativePeriods::LAST_6_BIMONTHS, PeriodType::BiMonthly, 6, "bimonth"),
            (RelativePeriods::LAST_4_QUARTERS, PeriodType::Quarterly, 4, "quarter"),
            (RelativePeriods::LAST_2_SIXMONTHS, PeriodType::SixMonthly, 2, "sixmonth"),
            (RelativePeriods::LAST_4_WEEKS, PeriodType::Weekly, 4, "w"),
            (RelativePeriods::LAST_4_BIWEEKS, PeriodType::BiWeekly, 4, "biweek"),
            (RelativePeriods::LAST_12_WEEKS, PeriodType::Weekly, 12, "w"),
            (RelativePeriods::LAST_52_WEEKS, PeriodType::Weekly, 52, "w"),
        ];
        for (flag, period_type, count, prefix) in windows {
            if flags.contains(flag) {
                periods.extend(self.rolling(period_type, date, count, numbered(prefix))?);
            }
        }

        let last_year = PeriodType::Yearly.rewinded_date(Some(date), None)?;
        if flags.contains(RelativePeriods::MONTHS_LAST_YEAR) {
            periods.extend(named(
                self.generate_periods(PeriodType::Monthly, last_year)?,
                month_name("_last_year"),
            ));
        }
        if flags.contains(RelativePeriods::QUARTERS_LAST_YEAR) {
            periods.extend(named(
                self.generate_periods(PeriodType::Quarterly, last_year)?,
                move |position| format!("quarter{}_last_year", position + 1),
            ));
        }
        if flags.contains(RelativePeriods::LAST_YEAR) {
            periods.push(self.named_period(PeriodType::Yearly, "last_year", last_year)?);
        }
        if flags.contains(RelativePeriods::LAST_5_YEARS) {
            periods.extend(self.years_up_to(
                PeriodType::Yearly,
                last_year,
                1,
                counting_down("year_minus_", "year_this", 5),
            )?);
        }
        if flags.contains(RelativePeriods::LAST_10_YEARS) {
            periods.extend(self.years_up_to(
                PeriodType::Yearly,
                last_year,
                2,
                counting_down("year_minus_", "year_this", 10),
            )?);
        }

        debug!(count = periods.len(), "Resolved relative periods");
        Ok(periods)
    }

    /// Resolves a single relative period against a reference date.
    pub fn relative_periods_from_enum(
        &self,
        relative: RelativePeriodEnum,
        reference: Option<NaiveDate>,
    ) -> Result<Vec<Period>> {
        self.relative_periods(relative.flag(), reference)
    }

    fn financial_periods(
        &self,
        flags: RelativePeriods,
        date: NaiveDate,
        periods: &mut Vec<Period>,
    ) -> Result<()> {
        let period_type = self.config().financial_year_start.period_type();
        if flags.contains(RelativePeriods::THIS_FINANCIAL_YEAR) {
            periods.push(self.named_period(period_type, "financial_year", date)?);
        }
        let last_year = period_type.rewinded_date(Some(date), None)?;
        if flags.contains(RelativePeriods::LAST_FINANCIAL_YEAR) {
            periods.push(self.named_period(period_type, "last_financial_year", last_year)?);
        }
        if flags.contains(RelativePeriods::LAST_5_FINANCIAL_YEARS) {
            periods.extend(self.years_up_to(
                period_type,
                last_year,
                1,
                counting_down("financial_year_minus_", "financial_year_this", 5),
            )?);
        }
        if flags.contains(RelativePeriods::LAST_10_FINANCIAL_YEARS) {
            periods.extend(self.years_up_to(
                period_type,
                last_year,
                2,
                counting_down("financial_year_minus_", "financial_year_this", 10),
            )?);
        }
        Ok(())
    }

    fn named_period(&self, period_type: PeriodType, name: &str, date: NaiveDate) -> Result<Period> {
        Ok(self.create_period(period_type, date)?.with_name(name))
    }

    /// Date the rolling windows of `period_type` end at.
    fn rolling_anchor(&self, period_type: PeriodType, date: NaiveDate) -> Result<NaiveDate> {
        if self.config().rolling_includes_current {
            Ok(date)
        } else {
            period_type.rewinded_date(Some(date), None)
        }
    }

    fn rolling_window(&self, period_type: PeriodType, anchor: NaiveDate) -> Result<Vec<Period>> {
        period_type.generate_rolling_periods(DateTimeUnit::from(anchor), self.calendar())
    }

    /// The last `count` periods of the rolling window, named by their
    /// position in the full window.
    fn rolling(
        &self,
        period_type: PeriodType,
        date: NaiveDate,
        count: usize,
        name: impl Fn(usize) -> String,
    ) -> Result<Vec<Period>> {
        let anchor = self.rolling_anchor(period_type, date)?;
        let window = named(self.rolling_window(period_type, anchor)?, name);
        Ok(last(window, count))
    }

    /// `windows` consecutive five year windows, the last one ending with the
    /// year containing `last_year`.
    fn years_up_to(
        &self,
        period_type: PeriodType,
        last_year: NaiveDate,
        windows: u32,
        name: impl Fn(usize) -> String,
    ) -> Result<Vec<Period>> {
        let mut periods = Vec::new();
        for back in (0..windows).rev() {
            periods.extend(self.rolling_window(period_type, years_before(last_year, 5 * back)?)?);
        }
        Ok(named(periods, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relative::FinancialYearStart;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn reference() -> Option<NaiveDate> {
        Some(date(2023, 7, 15))
    }

    fn isos(periods: &[Period]) -> Vec<&str> {
        periods.iter().filter_map(Period::iso_date).collect()
    }

    fn names(periods: &[Period]) -> Vec<&str> {
        periods.iter().filter_map(Period::name).collect()
    }

    #[test]
    fn test_last_3_months() {
        let context = PeriodContext::new();
        let periods = context
            .relative_periods(RelativePeriods::LAST_3_MONTHS, reference())
            .unwrap();
        assert_eq!(isos(&periods), vec!["202305", "202306", "202307"]);
        assert_eq!(names(&periods), vec!["month10", "month11", "month12"]);
    }

    #[test]
    fn test_last_3_months_excluding_current() {
        let context = PeriodContext::new().with_rolling_includes_current(false);
        let periods = context
            .relative_periods(RelativePeriods::LAST_3_MONTHS, reference())
            .unwrap();
        assert_eq!(isos(&periods), vec!["202304", "202305", "202306"]);
    }

    #[test]
    fn test_empty_set() {
        let context = PeriodContext::new();
        assert!(context
            .relative_periods(RelativePeriods::empty(), reference())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_this_and_last_singles() {
        let context = PeriodContext::new();
        let flags = RelativePeriods::THIS_MONTH
            | RelativePeriods::LAST_MONTH
            | RelativePeriods::THIS_QUARTER
            | RelativePeriods::LAST_QUARTER
            | RelativePeriods::LAST_SIX_MONTH;
        let periods = context.relative_periods(flags, reference()).unwrap();
        assert_eq!(
            isos(&periods),
            vec!["202307", "202306", "2023Q3", "2023Q2", "2023S1"]
        );
        assert_eq!(periods[0].name(), Some("reporting_month"));
    }

    #[test]
    fn test_days() {
        let context = PeriodContext::new();
        let flags = RelativePeriods::THIS_DAY | RelativePeriods::YESTERDAY;
        let periods = context.relative_periods(flags, reference()).unwrap();
        assert_eq!(isos(&periods), vec!["20230715", "20230714"]);
        assert_eq!(names(&periods), vec!["thisDay", "yesterday"]);

        let week = context
            .relative_periods(RelativePeriods::LAST_7_DAYS, reference())
            .unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].iso_date(), Some("20230709"));
        assert_eq!(week[6].iso_date(), Some("20230715"));
        assert_eq!(week[0].name(), Some("day359"));
        assert_eq!(week[6].name(), Some("day365"));
    }

    #[test]
    fn test_weeks() {
        let context = PeriodContext::new();
        let flags = RelativePeriods::THIS_WEEK | RelativePeriods::LAST_4_WEEKS;
        let periods = context.relative_periods(flags, reference()).unwrap();
        assert_eq!(
            isos(&periods),
            vec!["2023W28", "2023W25", "2023W26", "2023W27", "2023W28"]
        );

        let year = context
            .relative_periods(RelativePeriods::WEEKS_THIS_YEAR, reference())
            .unwrap();
        assert_eq!(year.len(), 52);
        assert_eq!(year[0].name(), Some("w1"));
        assert_eq!(year[0].start_date(), date(2023, 1, 2));
    }

    #[test]
    fn test_lists_this_year() {
        let context = PeriodContext::new();
        let flags = RelativePeriods::MONTHS_THIS_YEAR | RelativePeriods::QUARTERS_THIS_YEAR;
        let periods = context.relative_periods(flags, reference()).unwrap();
        assert_eq!(periods.len(), 16);
        assert_eq!(periods[0].name(), Some("january"));
        assert_eq!(periods[11].name(), Some("december"));
        assert_eq!(
            isos(&periods[12..]),
            vec!["2023Q1", "2023Q2", "2023Q3", "2023Q4"]
        );
        assert_eq!(
            names(&periods[12..]),
            vec!["quarter1", "quarter2", "quarter3", "quarter4"]
        );
    }

    #[test]
    fn test_last_year() {
        let context = PeriodContext::new();
        let flags = RelativePeriods::MONTHS_LAST_YEAR
            | RelativePeriods::QUARTERS_LAST_YEAR
            | RelativePeriods::LAST_YEAR;
        let periods = context.relative_periods(flags, reference()).unwrap();
        assert_eq!(periods.len(), 17);
        assert_eq!(periods[0].iso_date(), Some("202201"));
        assert_eq!(periods[0].name(), Some("january_last_year"));
        assert_eq!(periods[12].iso_date(), Some("2022Q1"));
        assert_eq!(periods[12].name(), Some("quarter1_last_year"));
        assert_eq!(periods[16].iso_date(), Some("2022"));
        assert_eq!(periods[16].name(), Some("last_year"));
    }

    #[test]
    fn test_last_5_and_10_years() {
        let context = PeriodContext::new();
        let five = context
            .relative_periods(RelativePeriods::LAST_5_YEARS, reference())
            .unwrap();
        assert_eq!(isos(&five), vec!["2018", "2019", "2020", "2021", "2022"]);
        assert_eq!(
            names(&five),
            vec!["year_minus_4", "year_minus_3", "year_minus_2", "year_minus_1", "year_this"]
        );

        let ten = context
            .relative_periods(RelativePeriods::LAST_10_YEARS, reference())
            .unwrap();
        assert_eq!(ten.len(), 10);
        assert_eq!(ten[0].iso_date(), Some("2013"));
        assert_eq!(ten[0].name(), Some("year_minus_9"));
        assert_eq!(ten[9].iso_date(), Some("2022"));
        assert_eq!(ten[9].name(), Some("year_this"));
        assert!(ten.windows(2).all(|pair| pair[0].end_date() < pair[1].start_date()));

        // the year windows never reach the current year
        let flags = RelativePeriods::THIS_YEAR | RelativePeriods::LAST_5_YEARS;
        let periods = context.relative_periods(flags, reference()).unwrap();
        assert_eq!(periods.iter().filter(|p| p.iso_date() == Some("2023")).count(), 1);
    }

    #[test]
    fn test_financial_years() {
        let context = PeriodContext::new();
        let flags = RelativePeriods::THIS_FINANCIAL_YEAR
            | RelativePeriods::LAST_FINANCIAL_YEAR
            | RelativePeriods::THIS_DAY;
        let periods = context.relative_periods(flags, reference()).unwrap();
        assert_eq!(isos(&periods), vec!["2022Oct", "2021Oct", "20230715"]);
        assert_eq!(periods[0].start_date(), date(2022, 10, 1));
        assert_eq!(periods[0].name(), Some("financial_year"));

        let april = PeriodContext::new().with_financial_year_start(FinancialYearStart::April);
        let periods = april
            .relative_periods(RelativePeriods::LAST_5_FINANCIAL_YEARS, reference())
            .unwrap();
        assert_eq!(
            isos(&periods),
            vec!["2018April", "2019April", "2020April", "2021April", "2022April"]
        );
        assert_eq!(periods[4].name(), Some("financial_year_this"));

        let periods = april
            .relative_periods(RelativePeriods::LAST_10_FINANCIAL_YEARS, reference())
            .unwrap();
        assert_eq!(periods.len(), 10);
        assert_eq!(periods[0].iso_date(), Some("2013April"));
        assert_eq!(periods[9].iso_date(), Some("2022April"));
    }

    #[test]
    fn test_from_enum() {
        let context = PeriodContext::new();
        let periods = context
            .relative_periods_from_enum(RelativePeriodEnum::Last3Months, reference())
            .unwrap();
        assert_eq!(isos(&periods), vec!["202305", "202306", "202307"]);
    }

    #[test]
    fn test_every_flag_resolves() {
        let context = PeriodContext::new();
        for relative in RelativePeriodEnum::ALL {
            let periods = context
                .relative_periods_from_enum(relative, reference())
                .unwrap();
            assert!(!periods.is_empty(), "{relative}");
            assert!(periods.iter().all(|p| p.name().is_some()), "{relative}");
        }
    }
}
