//! Catalog of period types and ISO period detection.
//!
//! The catalog is a fixed, frequency ordered array. Name and ISO pattern
//! indexes are built lazily on first use and never change afterwards.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::calendar::Calendar;
use crate::error::Result;
use crate::period::Period;
use crate::period_type::PeriodType;

/// Anchored ISO patterns. Each string matches at most one period type.
const ISO_PATTERNS: [(PeriodType, &str); 20] = [
    (PeriodType::Daily, r"^(\d{4})(\d{2})(\d{2})$"),
    (PeriodType::Weekly, r"^(\d{4})W(\d{1,2})$"),
    (PeriodType::WeeklyWednesday, r"^(\d{4})WedW(\d{1,2})$"),
    (PeriodType::WeeklyThursday, r"^(\d{4})ThuW(\d{1,2})$"),
    (PeriodType::WeeklySaturday, r"^(\d{4})SatW(\d{1,2})$"),
    (PeriodType::WeeklySunday, r"^(\d{4})SunW(\d{1,2})$"),
    (PeriodType::BiWeekly, r"^(\d{4})BiW(\d{1,2})$"),
    (PeriodType::Monthly, r"^(\d{4})-?(\d{2})$"),
    (PeriodType::BiMonthly, r"^(\d{4})(\d{2})B$"),
    (PeriodType::Quarterly, r"^(\d{4})Q(\d)$"),
    (PeriodType::QuarterlyNov, r"^(\d{4})NovQ(\d)$"),
    (PeriodType::SixMonthly, r"^(\d{4})S(\d)$"),
    (PeriodType::SixMonthlyApril, r"^(\d{4})AprilS(\d)$"),
    (PeriodType::SixMonthlyNov, r"^(\d{4})NovS(\d)$"),
    (PeriodType::Yearly, r"^(\d{4})$"),
    (PeriodType::FinancialApril, r"^(\d{4})April$"),
    (PeriodType::FinancialJuly, r"^(\d{4})July$"),
    (PeriodType::FinancialSep, r"^(\d{4})Sep$"),
    (PeriodType::FinancialOct, r"^(\d{4})Oct$"),
    (PeriodType::FinancialNov, r"^(\d{4})Nov$"),
];

static PATTERNS: Lazy<HashMap<PeriodType, Regex>> = Lazy::new(|| {
    ISO_PATTERNS
        .iter()
        .filter_map(|(period_type, pattern)| {
            Regex::new(pattern).ok().map(|regex| (*period_type, regex))
        })
        .collect()
});

static NAMES: Lazy<HashMap<String, PeriodType>> = Lazy::new(|| {
    PeriodType::ALL
        .iter()
        .map(|period_type| (period_type.name().to_lowercase(), *period_type))
        .collect()
});

impl PeriodType {
    /// Every period type, most frequent first.
    pub const ALL: [Self; 21] = [
        Self::Daily,
        Self::Weekly,
        Self::WeeklyWednesday,
        Self::WeeklyThursday,
        Self::WeeklySaturday,
        Self::WeeklySunday,
        Self::BiWeekly,
        Self::Monthly,
        Self::BiMonthly,
        Self::Quarterly,
        Self::QuarterlyNov,
        Self::SixMonthly,
        Self::SixMonthlyApril,
        Self::SixMonthlyNov,
        Self::Yearly,
        Self::FinancialApril,
        Self::FinancialJuly,
        Self::FinancialSep,
        Self::FinancialOct,
        Self::FinancialNov,
        Self::TwoYearly,
    ];

    /// Looks a type up by its exact name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|period_type| period_type.name() == name)
    }

    /// Looks a type up by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn by_name_ignore_case(name: &str) -> Option<Self> {
        NAMES.get(&name.trim().to_lowercase()).copied()
    }

    /// Looks a type up by its 1-based position in [`ALL`](Self::ALL).
    #[must_use]
    pub fn by_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }

    /// Returns the 1-based position in [`ALL`](Self::ALL).
    #[must_use]
    pub fn index(self) -> usize {
        // ALL lists the variants in declaration order
        self as usize + 1
    }

    /// Names of all registered types, most frequent first.
    #[must_use]
    pub fn available_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|period_type| period_type.name()).collect()
    }

    pub(crate) fn pattern(self) -> Option<&'static Regex> {
        PATTERNS.get(&self)
    }

    /// Detects the period type of an ISO period string.
    #[must_use]
    pub fn from_iso_string(iso: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|period_type| {
            period_type
                .pattern()
                .is_some_and(|pattern| pattern.is_match(iso))
        })
    }

    /// Parses any ISO period string.
    ///
    /// `Ok(None)` means no period type recognises the string; an error means
    /// one does but the string names no real period.
    pub fn period_from_iso_string(iso: &str, calendar: &dyn Calendar) -> Result<Option<Period>> {
        match Self::from_iso_string(iso) {
            Some(period_type) => period_type.parse_iso(iso, calendar),
            None => Ok(None),
        }
    }

    /// Parses ISO period strings, keeping only those that name a real period.
    pub fn periods_from_iso_strings<'a, I>(isos: I, calendar: &dyn Calendar) -> Vec<Period>
    where
        I: IntoIterator<Item = &'a str>,
    {
        isos.into_iter()
            .filter_map(|iso| match Self::period_from_iso_string(iso, calendar) {
                Ok(Some(period)) => Some(period),
                Ok(None) => {
                    debug!(iso, "Skipping unrecognised ISO period");
                    None
                }
                Err(error) => {
                    warn!(iso, %error, "Skipping malformed ISO period");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Iso8601Calendar;
    use crate::error::PeriodError;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(PATTERNS.len(), ISO_PATTERNS.len());
    }

    #[test]
    fn test_all_is_in_declaration_order() {
        for (position, period_type) in PeriodType::ALL.iter().enumerate() {
            assert_eq!(period_type.index(), position + 1);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(PeriodType::by_name("Monthly"), Some(PeriodType::Monthly));
        assert_eq!(PeriodType::by_name("monthly"), None);
        assert_eq!(
            PeriodType::by_name_ignore_case("  sixmonthlyapril "),
            Some(PeriodType::SixMonthlyApril)
        );
        assert_eq!(PeriodType::by_name_ignore_case("Fortnightly"), None);
        assert_eq!("FinancialNov".parse::<PeriodType>(), Ok(PeriodType::FinancialNov));
        assert!(matches!(
            "Hourly".parse::<PeriodType>(),
            Err(PeriodError::UnknownPeriodType(_))
        ));
    }

    #[test]
    fn test_lookup_by_index() {
        assert_eq!(PeriodType::by_index(1), Some(PeriodType::Daily));
        assert_eq!(PeriodType::by_index(8), Some(PeriodType::Monthly));
        assert_eq!(PeriodType::by_index(21), Some(PeriodType::TwoYearly));
        assert_eq!(PeriodType::by_index(0), None);
        assert_eq!(PeriodType::by_index(22), None);
    }

    #[test]
    fn test_available_names() {
        let names = PeriodType::available_names();
        assert_eq!(names.len(), 21);
        assert_eq!(names[0], "Daily");
        assert_eq!(names[20], "TwoYearly");
    }

    #[test]
    fn test_iso_detection() {
        let cases = [
            ("20230115", PeriodType::Daily),
            ("2023W3", PeriodType::Weekly),
            ("2023WedW3", PeriodType::WeeklyWednesday),
            ("2023ThuW12", PeriodType::WeeklyThursday),
            ("2023SatW1", PeriodType::WeeklySaturday),
            ("2023SunW52", PeriodType::WeeklySunday),
            ("2023BiW3", PeriodType::BiWeekly),
            ("202301", PeriodType::Monthly),
            ("2023-01", PeriodType::Monthly),
            ("202301B", PeriodType::BiMonthly),
            ("2023Q1", PeriodType::Quarterly),
            ("2023NovQ1", PeriodType::QuarterlyNov),
            ("2023S1", PeriodType::SixMonthly),
            ("2023AprilS1", PeriodType::SixMonthlyApril),
            ("2023NovS1", PeriodType::SixMonthlyNov),
            ("2023", PeriodType::Yearly),
            ("2023April", PeriodType::FinancialApril),
            ("2023July", PeriodType::FinancialJuly),
            ("2023Sep", PeriodType::FinancialSep),
            ("2023Oct", PeriodType::FinancialOct),
            ("2023Nov", PeriodType::FinancialNov),
        ];
        for (iso, expected) in cases {
            assert_eq!(PeriodType::from_iso_string(iso), Some(expected), "{iso}");
        }
    }

    #[test]
    fn test_iso_detection_rejects_garbage() {
        for iso in ["", "23", "2023W", "2023Q", "2023X1", "2023-1", "2023Q12", "abcd"] {
            assert_eq!(PeriodType::from_iso_string(iso), None, "{iso}");
        }
    }

    #[test]
    fn test_no_match_versus_malformed() {
        let calendar = Iso8601Calendar::new();
        assert_eq!(
            PeriodType::period_from_iso_string("not a period", &calendar),
            Ok(None)
        );
        assert!(matches!(
            PeriodType::period_from_iso_string("2023Q5", &calendar),
            Err(PeriodError::MalformedIsoPeriod { .. })
        ));
        assert!(matches!(
            PeriodType::period_from_iso_string("202313", &calendar),
            Err(PeriodError::MalformedIsoPeriod { .. })
        ));
        assert!(matches!(
            PeriodType::period_from_iso_string("20230230", &calendar),
            Err(PeriodError::MalformedIsoPeriod { .. })
        ));
        assert!(matches!(
            PeriodType::period_from_iso_string("2023W53", &calendar),
            Err(PeriodError::MalformedIsoPeriod { .. })
        ));
    }

    #[test]
    fn test_periods_from_iso_strings_skips_failures() {
        let calendar = Iso8601Calendar::new();
        let periods =
            PeriodType::periods_from_iso_strings(["202301", "2023Q5", "junk", "2023Q2"], &calendar);
        let isos: Vec<_> = periods.iter().filter_map(Period::iso_date).collect();
        assert_eq!(isos, vec!["202301", "2023Q2"]);
    }
}
