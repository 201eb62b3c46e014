// ⏰ Delinquency Evaluator - Has the record's period ended without renewal?
//
// "Now" is always passed in explicitly. The wall-clock wrapper exists for
// callers that really do mean the current moment.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::PeriodError;
use crate::period::{compute_period_end, PeriodOptions};

// ============================================================================
// RECORD CONTRACT
// ============================================================================

/// The three fields the period core reads from a stored record.
///
/// Business tax records and boat registrations are owned by the
/// application; they only need to expose these.
pub trait RenewableRecord {
    /// Payment / registration date as stored (`MM/DD/YYYY` or ISO)
    fn date(&self) -> &str;

    /// Renewal frequency text ("quarterly", "semi-annual", "annual")
    fn frequency(&self) -> &str;

    /// Whether the record has been marked renewed
    fn renewed(&self) -> bool;
}

/// Minimal owned record carrying just the renewal terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTerms {
    pub date: String,
    pub frequency: String,
    #[serde(default)]
    pub renewed: bool,
}

impl RecordTerms {
    pub fn new(date: &str, frequency: &str, renewed: bool) -> Self {
        RecordTerms {
            date: date.to_string(),
            frequency: frequency.to_string(),
            renewed,
        }
    }
}

impl RenewableRecord for RecordTerms {
    fn date(&self) -> &str {
        &self.date
    }

    fn frequency(&self) -> &str {
        &self.frequency
    }

    fn renewed(&self) -> bool {
        self.renewed
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Decide whether `record` is delinquent as of `now`.
///
/// A renewed record is never delinquent, even with an unusable date.
/// Otherwise an unparseable date is an error the caller must report.
pub fn is_record_delinquent_exact<R: RenewableRecord + ?Sized>(
    record: &R,
    options: &PeriodOptions,
    now: NaiveDateTime,
) -> Result<bool, PeriodError> {
    if record.renewed() {
        return Ok(false);
    }

    let period_end = compute_period_end(record.date(), record.frequency(), options)
        .ok_or_else(|| PeriodError::invalid_date(record.date()))?;

    Ok(is_past_period_end(period_end, now))
}

/// Same as [`is_record_delinquent_exact`] evaluated at the local wall clock
pub fn is_record_delinquent<R: RenewableRecord + ?Sized>(
    record: &R,
    options: &PeriodOptions,
) -> Result<bool, PeriodError> {
    is_record_delinquent_exact(record, options, Local::now().naive_local())
}

/// The period end day is fully covered; delinquency starts the day after
pub fn is_past_period_end(period_end: NaiveDate, now: NaiveDateTime) -> bool {
    now.date() > period_end
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_renewed_is_never_delinquent() {
        let record = RecordTerms::new("01/01/2020", "annual", true);
        let result = is_record_delinquent_exact(&record, &PeriodOptions::default(), at(2026, 10, 15));
        assert_eq!(result, Ok(false));
    }

    #[test]
    fn test_renewed_with_invalid_date_is_not_an_error() {
        let record = RecordTerms::new("", "quarterly", true);
        let result = is_record_delinquent_exact(&record, &PeriodOptions::default(), at(2026, 10, 15));
        assert_eq!(result, Ok(false));
    }

    #[test]
    fn test_old_unrenewed_record_is_delinquent() {
        let record = RecordTerms::new("01/01/2020", "annual", false);
        let result = is_record_delinquent_exact(&record, &PeriodOptions::default(), at(2026, 10, 15));
        assert_eq!(result, Ok(true));
    }

    #[test]
    fn test_current_period_is_not_delinquent() {
        let record = RecordTerms::new("02/15/2025", "quarterly", false);
        let result = is_record_delinquent_exact(&record, &PeriodOptions::default(), at(2025, 3, 1));
        assert_eq!(result, Ok(false));
    }

    #[test]
    fn test_period_end_day_is_still_current() {
        let record = RecordTerms::new("02/15/2025", "quarterly", false);
        let options = PeriodOptions::default();

        let last_moment = NaiveDate::from_ymd_opt(2025, 3, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(is_record_delinquent_exact(&record, &options, last_moment), Ok(false));

        let next_morning = NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(is_record_delinquent_exact(&record, &options, next_morning), Ok(true));
    }

    #[test]
    fn test_early_rollover_extends_coverage() {
        let record = RecordTerms::new("06/20/2025", "semi-annual", false);
        let now = at(2025, 7, 15);

        let plain = PeriodOptions::default();
        assert_eq!(is_record_delinquent_exact(&record, &plain, now), Ok(true));

        let grace = PeriodOptions::default().with_early_rollover_days(30);
        assert_eq!(is_record_delinquent_exact(&record, &grace, now), Ok(false));
    }

    #[test]
    fn test_rolling_policy() {
        let record = RecordTerms::new("01/31/2025", "quarterly", false);
        let rolling = PeriodOptions::rolling();

        assert_eq!(is_record_delinquent_exact(&record, &rolling, at(2025, 4, 29)), Ok(false));
        assert_eq!(is_record_delinquent_exact(&record, &rolling, at(2025, 4, 30)), Ok(true));
    }

    #[test]
    fn test_invalid_date_is_reported() {
        let record = RecordTerms::new("not a date", "annual", false);
        let result = is_record_delinquent_exact(&record, &PeriodOptions::default(), at(2026, 10, 15));
        assert_eq!(
            result,
            Err(PeriodError::InvalidDate {
                input: "not a date".to_string()
            })
        );
    }

    #[test]
    fn test_idempotent() {
        let record = RecordTerms::new("2019-05-10", "semi-annual", false);
        let options = PeriodOptions::default();
        let now = at(2026, 10, 15);

        let first = is_record_delinquent_exact(&record, &options, now);
        let second = is_record_delinquent_exact(&record, &options, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_wall_clock_wrapper() {
        let ancient = RecordTerms::new("01/01/1990", "annual", false);
        assert_eq!(is_record_delinquent(&ancient, &PeriodOptions::default()), Ok(true));

        let far_future = RecordTerms::new("01/01/2999", "annual", false);
        assert_eq!(is_record_delinquent(&far_future, &PeriodOptions::default()), Ok(false));
    }

    #[test]
    fn test_record_terms_deserialize() {
        let record: RecordTerms =
            serde_json::from_str(r#"{"date": "03/03/2025", "frequency": "annual"}"#).unwrap();
        assert!(!record.renewed);
        assert_eq!(record.frequency(), "annual");
    }
}
