//! The variant table behind [`PeriodType`].
//!
//! Every period type maps to one [`Rule`]. Month based types only differ in
//! span, anchor month, ISO layout and which year labels them, so they share a
//! single [`MonthSpan`] description instead of one implementation each.

use chrono::Weekday;

use super::PeriodType;

/// How a period type partitions time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rule {
    Daily,
    Weekly {
        start: Weekday,
        marker: &'static str,
    },
    BiWeekly,
    Months(MonthSpan),
    TwoYearly,
}

/// Month based partitioning: `span` months starting at `anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MonthSpan {
    pub(crate) span: u32,
    pub(crate) anchor: u32,
    pub(crate) label: YearLabel,
    pub(crate) layout: IsoLayout,
}

/// Which year an ISO string carries for periods of a type-year that crosses January.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum YearLabel {
    /// The year the type-year starts in.
    Start,
    /// The year the type-year ends in.
    End,
}

/// Shape of the ISO string after the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IsoLayout {
    /// `yyyyMM`
    Month,
    /// `yyyy0nB`
    BiMonth,
    /// `yyyy<prefix>n`
    Indexed(&'static str),
    /// `yyyy`
    Year,
    /// `yyyy<suffix>`
    Suffix(&'static str),
}

const fn months(span: u32, anchor: u32, label: YearLabel, layout: IsoLayout) -> Rule {
    Rule::Months(MonthSpan {
        span,
        anchor,
        label,
        layout,
    })
}

impl PeriodType {
    pub(crate) const fn rule(self) -> Rule {
        use IsoLayout::{BiMonth, Indexed, Month, Suffix, Year};
        use YearLabel::{End, Start};

        match self {
            Self::Daily => Rule::Daily,
            Self::Weekly => Rule::Weekly {
                start: Weekday::Mon,
                marker: "W",
            },
            Self::WeeklyWednesday => Rule::Weekly {
                start: Weekday::Wed,
                marker: "WedW",
            },
            Self::WeeklyThursday => Rule::Weekly {
                start: Weekday::Thu,
                marker: "ThuW",
            },
            Self::WeeklySaturday => Rule::Weekly {
                start: Weekday::Sat,
                marker: "SatW",
            },
            Self::WeeklySunday => Rule::Weekly {
                start: Weekday::Sun,
                marker: "SunW",
            },
            Self::BiWeekly => Rule::BiWeekly,
            Self::Monthly => months(1, 1, Start, Month),
            Self::BiMonthly => months(2, 1, Start, BiMonth),
            Self::Quarterly => months(3, 1, Start, Indexed("Q")),
            Self::QuarterlyNov => months(3, 11, End, Indexed("NovQ")),
            Self::SixMonthly => months(6, 1, Start, Indexed("S")),
            Self::SixMonthlyApril => months(6, 4, Start, Indexed("AprilS")),
            Self::SixMonthlyNov => months(6, 11, End, Indexed("NovS")),
            Self::Yearly => months(12, 1, Start, Year),
            Self::FinancialApril => months(12, 4, Start, Suffix("April")),
            Self::FinancialJuly => months(12, 7, Start, Suffix("July")),
            Self::FinancialSep => months(12, 9, Start, Suffix("Sep")),
            Self::FinancialOct => months(12, 10, Start, Suffix("Oct")),
            Self::FinancialNov => months(12, 11, End, Suffix("Nov")),
            Self::TwoYearly => Rule::TwoYearly,
        }
    }
}
