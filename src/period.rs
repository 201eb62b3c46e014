// 🗓️ Period-End Calculator - When does a record's billing period close?
//
// Two policies:
// - Fixed: period end snaps to the calendar quarter / half / year boundary
//   containing the record date (Mar 31, Jun 30, Sep 30, Dec 31)
// - Rolling: period end is N months after the record date, minus one day
//
// Fixed mode optionally credits payments made shortly before a boundary to
// the following period (early rollover).

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::dates::parse_date_flexible;
use crate::error::PeriodError;

// ============================================================================
// FREQUENCY
// ============================================================================

/// How often a record must be renewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Quarterly,
    SemiAnnual,
    Annual,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [
        Frequency::Quarterly,
        Frequency::SemiAnnual,
        Frequency::Annual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Quarterly => "quarterly",
            Frequency::SemiAnnual => "semi-annual",
            Frequency::Annual => "annual",
        }
    }

    /// Length of one period in calendar months
    pub fn months(&self) -> u32 {
        match self {
            Frequency::Quarterly => 3,
            Frequency::SemiAnnual => 6,
            Frequency::Annual => 12,
        }
    }

    /// Parse stored frequency text, treating anything unrecognized as annual.
    ///
    /// Records saved by older forms carry free-text frequencies, so the
    /// fallback is kept but always logged.
    pub fn parse_lenient(input: &str) -> Frequency {
        input.parse().unwrap_or_else(|_| {
            warn!(frequency = %input, "unrecognized renewal frequency, using annual");
            Frequency::Annual
        })
    }
}

impl FromStr for Frequency {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == normalized)
            .ok_or_else(|| PeriodError::UnknownFrequency {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    /// Snap to calendar quarter / half / year boundaries
    #[default]
    Fixed,

    /// Offset in months from the record's own date
    Rolling,
}

impl Rounding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rounding::Fixed => "fixed",
            Rounding::Rolling => "rolling",
        }
    }
}

impl FromStr for Rounding {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Rounding::Fixed),
            "rolling" => Ok(Rounding::Rolling),
            _ => Err(PeriodError::UnknownRounding {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Period policy applied when computing period ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodOptions {
    #[serde(default)]
    pub rounding: Rounding,

    /// Days before a fixed boundary during which a payment counts toward the
    /// next period. Ignored in rolling mode.
    #[serde(default, alias = "earlyRolloverDays")]
    pub early_rollover_days: u32,
}

impl PeriodOptions {
    pub fn rolling() -> Self {
        PeriodOptions {
            rounding: Rounding::Rolling,
            early_rollover_days: 0,
        }
    }

    pub fn with_early_rollover_days(mut self, days: u32) -> Self {
        self.early_rollover_days = days;
        self
    }
}

// ============================================================================
// CALCULATOR
// ============================================================================

/// Compute the period end for a record date string and frequency text.
///
/// Returns None when the date cannot be parsed. Unrecognized frequencies are
/// computed as annual.
pub fn compute_period_end(
    date_str: &str,
    frequency: &str,
    options: &PeriodOptions,
) -> Option<NaiveDate> {
    let date = parse_date_flexible(date_str)?;
    period_end(date, Frequency::parse_lenient(frequency), options)
}

/// Typed core of [`compute_period_end`]
pub fn period_end(
    date: NaiveDate,
    frequency: Frequency,
    options: &PeriodOptions,
) -> Option<NaiveDate> {
    match options.rounding {
        Rounding::Rolling => {
            if options.early_rollover_days > 0 {
                debug!(
                    days = options.early_rollover_days,
                    "early rollover ignored in rolling mode"
                );
            }
            rolling_period_end(date, frequency)
        }
        Rounding::Fixed => {
            let end = fixed_period_end(date, frequency)?;
            if options.early_rollover_days == 0 {
                return Some(end);
            }

            let diff_days = (end - date).num_days();
            if (0..=i64::from(options.early_rollover_days)).contains(&diff_days) {
                debug!(
                    %date,
                    %end,
                    diff_days,
                    "record within early rollover window, crediting next period"
                );
                next_fixed_period_end(end, frequency)
            } else {
                Some(end)
            }
        }
    }
}

/// End of the calendar quarter / half / year containing `date`
pub fn fixed_period_end(date: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    let (month, day) = match frequency {
        Frequency::Quarterly => match date.month() {
            1..=3 => (3, 31),
            4..=6 => (6, 30),
            7..=9 => (9, 30),
            _ => (12, 31),
        },
        Frequency::SemiAnnual => {
            if date.month() <= 6 {
                (6, 30)
            } else {
                (12, 31)
            }
        }
        Frequency::Annual => (12, 31),
    };

    NaiveDate::from_ymd_opt(date.year(), month, day)
}

/// The fixed boundary that follows `end` (Dec 31 wraps into the next year)
pub fn next_fixed_period_end(end: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    // The day after a boundary opens the next period
    fixed_period_end(end.succ_opt()?, frequency)
}

/// `date` plus one period, clamped to month end, minus one day
pub fn rolling_period_end(date: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    add_months_clamped(date, frequency.months())?.pred_opt()
}

/// Add calendar months; the day is clamped to the last day of the target
/// month (Jan 31 + 1 month = Feb 28/29)
pub fn add_months_clamped(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

// ============================================================================
// TESTS
// ============================================================================
