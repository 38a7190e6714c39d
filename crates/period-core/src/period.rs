//! The [`Period`] value type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{PeriodError, Result};
use crate::period_type::PeriodType;

/// A calendar-aligned reporting period.
///
/// Start and end are ISO-8601 dates and both bounds are inclusive. Two periods
/// are equal when they share start, end and period type; the display names
/// never take part in equality, ordering or hashing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "PeriodRecord")]
pub struct Period {
    period_type: PeriodType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    iso_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    short_name: Option<String>,
}

/// Serialized form of [`Period`], checked before it becomes one.
#[derive(Deserialize)]
struct PeriodRecord {
    period_type: PeriodType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    iso_date: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
}

impl TryFrom<PeriodRecord> for Period {
    type Error = PeriodError;

    fn try_from(record: PeriodRecord) -> Result<Self> {
        let mut period = Self::new(
            record.period_type,
            record.start_date,
            record.end_date,
            record.iso_date,
        )?;
        period.name = record.name;
        period.short_name = record.short_name;
        Ok(period)
    }
}

impl Period {
    /// Creates a period from its parts.
    ///
    /// Fails if `start_date` is after `end_date`.
    pub fn new(
        period_type: PeriodType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        iso_date: Option<String>,
    ) -> Result<Self> {
        if start_date > end_date {
            return Err(PeriodError::DateOutOfRange(format!(
                "{} period starts {start_date} after it ends {end_date}",
                period_type.name()
            )));
        }
        Ok(Self {
            period_type,
            start_date,
            end_date,
            iso_date,
            name: None,
            short_name: None,
        })
    }

    /// Returns the period type.
    #[must_use]
    pub const fn period_type(&self) -> PeriodType {
        self.period_type
    }

    /// Returns the first day of the period.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last day of the period.
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns the ISO period identifier, e.g. `2023Q2`.
    ///
    /// `None` only for period types without an ISO format.
    #[must_use]
    pub fn iso_date(&self) -> Option<&str> {
        self.iso_date.as_deref()
    }

    /// Returns the display name, if one was assigned.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the short display name, if one was assigned.
    #[must_use]
    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    /// Attaches a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches a short display name.
    #[must_use]
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    /// Returns the number of days covered, both bounds included.
    #[must_use]
    pub fn days_in_period(&self) -> i64 {
        self.end_date.signed_duration_since(self.start_date).num_days() + 1
    }

    /// Returns true if the date falls inside the period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns true if the two periods share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }

    /// Returns true if this period begins after `other` has ended.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.start_date > other.end_date
    }

    /// Returns the frequency order of the period type.
    #[must_use]
    pub const fn frequency_order(&self) -> u32 {
        self.period_type.frequency_order()
    }
}

impl PartialEq for Period {
    fn eq(&self, other: &Self) -> bool {
        self.start_date == other.start_date
            && self.end_date == other.end_date
            && self.period_type == other.period_type
    }
}

impl Eq for Period {}

impl Hash for Period {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start_date.hash(state);
        self.end_date.hash(state);
        self.period_type.hash(state);
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_date
            .cmp(&other.start_date)
            .then(self.end_date.cmp(&other.end_date))
            .then(self.period_type.cmp(&other.period_type))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.iso_date {
            Some(iso) => write!(f, "{iso}"),
            None => write!(f, "{}/{}", self.start_date, self.end_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn february() -> Period {
        Period::new(
            PeriodType::Monthly,
            date(2023, 2, 1),
            date(2023, 2, 28),
            Some("202302".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let result = Period::new(PeriodType::Daily, date(2023, 2, 2), date(2023, 2, 1), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_names_do_not_affect_equality() {
        let plain = february();
        let named = february().with_name("february").with_short_name("Feb");
        assert_eq!(plain, named);

        let set: HashSet<_> = [plain, named].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_period_type_is_part_of_identity() {
        let monthly = february();
        let other = Period::new(
            PeriodType::Weekly,
            monthly.start_date(),
            monthly.end_date(),
            None,
        )
        .unwrap();
        assert_ne!(monthly, other);
    }

    #[test]
    fn test_contains_and_length() {
        let period = february();
        assert_eq!(period.days_in_period(), 28);
        assert!(period.contains(date(2023, 2, 1)));
        assert!(period.contains(date(2023, 2, 28)));
        assert!(!period.contains(date(2023, 3, 1)));
    }

    #[test]
    fn test_ordering_by_start_date() {
        let feb = february();
        let march = Period::new(
            PeriodType::Monthly,
            date(2023, 3, 1),
            date(2023, 3, 31),
            Some("202303".to_string()),
        )
        .unwrap();
        assert!(feb < march);
        assert!(march.is_after(&feb));
        assert!(!feb.overlaps(&march));
    }

    #[test]
    fn test_display_and_serde() {
        let period = february();
        assert_eq!(period.to_string(), "202302");

        let json = serde_json::to_string(&period).unwrap();
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
        assert_eq!(back.iso_date(), Some("202302"));
    }

    #[test]
    fn test_deserialize_checks_bounds() {
        let inverted = r#"{"period_type":"Monthly","start_date":"2023-02-28","end_date":"2023-02-01","iso_date":"202302"}"#;
        assert!(serde_json::from_str::<Period>(inverted).is_err());

        let named = r#"{"period_type":"Monthly","start_date":"2023-02-01","end_date":"2023-02-28","iso_date":"202302","name":"February"}"#;
        let period: Period = serde_json::from_str(named).unwrap();
        assert_eq!(period, february());
        assert_eq!(period.name(), Some("February"));
    }
}
