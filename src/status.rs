// 🏷️ Record Status - What listing pages show for a record
// "Expired Date" column + "Delinquent" badge, computed in one pass

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dates::display_date;
use crate::delinquency::{is_past_period_end, RenewableRecord};
use crate::period::{compute_period_end, PeriodOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusBadge {
    Renewed,
    Current,
    Delinquent,
    /// Record date could not be parsed; needs clerk attention
    InvalidDate,
}

impl StatusBadge {
    pub fn label(&self) -> &'static str {
        match self {
            StatusBadge::Renewed => "Renewed",
            StatusBadge::Current => "Current",
            StatusBadge::Delinquent => "Delinquent",
            StatusBadge::InvalidDate => "Invalid date",
        }
    }
}

impl fmt::Display for StatusBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStatus {
    /// Computed period end (None when the record date is invalid)
    pub period_end: Option<NaiveDate>,

    /// Display text for the "Expired Date" column ("—" when invalid)
    pub expired_date: String,

    pub status: StatusBadge,
}

impl RecordStatus {
    pub fn evaluate<R: RenewableRecord + ?Sized>(
        record: &R,
        options: &PeriodOptions,
        now: NaiveDateTime,
    ) -> Self {
        let period_end = compute_period_end(record.date(), record.frequency(), options);

        let status = match (record.renewed(), period_end) {
            (true, _) => StatusBadge::Renewed,
            (false, None) => StatusBadge::InvalidDate,
            (false, Some(end)) if is_past_period_end(end, now) => StatusBadge::Delinquent,
            (false, Some(_)) => StatusBadge::Current,
        };

        RecordStatus {
            period_end,
            expired_date: display_date(period_end),
            status,
        }
    }

    pub fn is_delinquent(&self) -> bool {
        self.status == StatusBadge::Delinquent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delinquency::{is_record_delinquent_exact, RecordTerms};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_delinquent_record() {
        let record = RecordTerms::new("02/15/2025", "quarterly", false);
        let status = RecordStatus::evaluate(&record, &PeriodOptions::default(), now());

        assert_eq!(status.expired_date, "03/31/2025");
        assert_eq!(status.status, StatusBadge::Delinquent);
        assert!(status.is_delinquent());
    }

    #[test]
    fn test_current_record() {
        let record = RecordTerms::new("07/01/2025", "semi-annual", false);
        let status = RecordStatus::evaluate(&record, &PeriodOptions::default(), now());

        assert_eq!(status.expired_date, "12/31/2025");
        assert_eq!(status.status, StatusBadge::Current);
    }

    #[test]
    fn test_renewed_keeps_expired_date() {
        let record = RecordTerms::new("02/15/2025", "quarterly", true);
        let status = RecordStatus::evaluate(&record, &PeriodOptions::default(), now());

        assert_eq!(status.expired_date, "03/31/2025");
        assert_eq!(status.status, StatusBadge::Renewed);
        assert!(!status.is_delinquent());
    }

    #[test]
    fn test_invalid_date_renders_dash() {
        let record = RecordTerms::new("", "quarterly", false);
        let status = RecordStatus::evaluate(&record, &PeriodOptions::default(), now());

        assert_eq!(status.period_end, None);
        assert_eq!(status.expired_date, "—");
        assert_eq!(status.status, StatusBadge::InvalidDate);
        assert_eq!(status.status.to_string(), "Invalid date");
    }

    #[test]
    fn test_agrees_with_evaluator() {
        let options = PeriodOptions::default().with_early_rollover_days(14);
        let records = [
            RecordTerms::new("03/20/2025", "quarterly", false),
            RecordTerms::new("05/01/2025", "semi-annual", false),
            RecordTerms::new("2024-11-30", "annual", false),
            RecordTerms::new("2023-01-01", "annual", true),
        ];

        for record in &records {
            let status = RecordStatus::evaluate(record, &options, now());
            let delinquent = is_record_delinquent_exact(record, &options, now()).unwrap();
            assert_eq!(status.is_delinquent(), delinquent, "record {:?}", record);
        }
    }
}
