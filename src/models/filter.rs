//! Filters for listing a user's transactions.
//!
//! A listing request names a transaction type (or the `"all"` sentinel) and a
//! frequency: a number of days back from now, or the `"custom"` sentinel that
//! switches to an explicit `[startDate, endDate]` window.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        present,
        transaction::{FrequencyField, Transaction, parse_date},
    },
};

/// Sentinel type value that disables the type filter.
pub const ALL_TYPES: &str = "all";

/// Sentinel frequency value that selects the explicit date window.
pub const CUSTOM_FREQUENCY: &str = "custom";

/// Which date window a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// Transactions dated within the last `n` days.
    LastDays(u32),
    /// Transactions inside the request's start/end dates.
    Custom,
}

impl Frequency {
    /// Interpret the wire value of `frequency`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for anything other than `"custom"` or a
    /// non-negative day count.
    pub fn parse(field: &FrequencyField) -> Result<Self, AppError> {
        let invalid = || AppError::Validation("Invalid frequency".to_string());

        match field {
            FrequencyField::Days(days) => u32::try_from(*days)
                .map(Frequency::LastDays)
                .map_err(|_| invalid()),
            FrequencyField::Text(text) if text.trim() == CUSTOM_FREQUENCY => Ok(Frequency::Custom),
            FrequencyField::Text(text) => text
                .trim()
                .parse::<u32>()
                .map(Frequency::LastDays)
                .map_err(|_| invalid()),
        }
    }
}

/// Inclusive date bounds; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// A fully resolved listing query.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub user_id: Uuid,
    /// `None` means every type
    pub transaction_type: Option<String>,
    pub range: DateRange,
}

impl TransactionFilter {
    /// Resolve the raw request values against `now`.
    ///
    /// - a type of `"all"` (or none) matches every type
    /// - a day count `n` keeps dates on or after `now - n days`
    /// - `"custom"` keeps dates in `[start, end]` when both are given and
    ///   applies no date restriction otherwise
    /// - no frequency at all applies no date restriction
    pub fn build(
        user_id: Uuid,
        transaction_type: Option<String>,
        frequency: Option<&FrequencyField>,
        start_date: Option<String>,
        end_date: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let transaction_type = present(transaction_type).filter(|t| t != ALL_TYPES);

        let range = match frequency.map(Frequency::parse).transpose()? {
            None => DateRange::default(),
            Some(Frequency::LastDays(days)) => DateRange {
                from: now.checked_sub_signed(Duration::days(i64::from(days))),
                to: None,
            },
            Some(Frequency::Custom) => match (present(start_date), present(end_date)) {
                (Some(start), Some(end)) => DateRange {
                    from: Some(parse_date(&start)?),
                    to: Some(parse_date(&end)?),
                },
                _ => DateRange::default(),
            },
        };

        Ok(Self {
            user_id,
            transaction_type,
            range,
        })
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        transaction.user_id == self.user_id
            && self
                .transaction_type
                .as_deref()
                .is_none_or(|t| transaction.transaction_type == t)
            && self.range.contains(transaction.date)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::*;

    fn text(value: &str) -> FrequencyField {
        FrequencyField::Text(value.to_string())
    }

    #[test]
    fn frequency_parses_sentinel_and_day_counts() {
        assert_eq!(Frequency::parse(&text("custom")).unwrap(), Frequency::Custom);
        assert_eq!(Frequency::parse(&text("7")).unwrap(), Frequency::LastDays(7));
        assert_eq!(
            Frequency::parse(&FrequencyField::Days(365)).unwrap(),
            Frequency::LastDays(365)
        );
    }

    #[test]
    fn frequency_rejects_negative_and_non_numeric() {
        assert!(Frequency::parse(&text("-3")).is_err());
        assert!(Frequency::parse(&text("weekly")).is_err());
        assert!(Frequency::parse(&FrequencyField::Days(-3)).is_err());
    }

    #[test]
    fn all_sentinel_disables_type_filter() {
        let filter = TransactionFilter::build(
            Uuid::new_v4(),
            Some("all".into()),
            None,
            None,
            None,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(filter.transaction_type, None);
        assert_eq!(filter.range, DateRange::default());
    }

    #[test]
    fn day_window_starts_n_days_before_now() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

        let filter = TransactionFilter::build(
            Uuid::new_v4(),
            Some("expense".into()),
            Some(&text("7")),
            None,
            None,
            now,
        )
        .unwrap();

        assert_eq!(filter.transaction_type.as_deref(), Some("expense"));
        assert_eq!(filter.range.from, Some(now - Duration::days(7)));
        assert!(filter.range.contains(now - Duration::days(6)));
        assert!(!filter.range.contains(now - Duration::days(8)));
    }

    #[test]
    fn custom_window_is_inclusive() {
        let filter = TransactionFilter::build(
            Uuid::new_v4(),
            None,
            Some(&text("custom")),
            Some("2024-01-01".into()),
            Some("2024-01-31".into()),
            Utc::now(),
        )
        .unwrap();

        let range = filter.range;
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn custom_without_both_bounds_applies_no_date_restriction() {
        let filter = TransactionFilter::build(
            Uuid::new_v4(),
            None,
            Some(&text("custom")),
            Some("2024-01-01".into()),
            None,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(filter.range, DateRange::default());
    }
}
