// Errors raised by the renewal period core

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Date string could not be turned into a calendar date
    #[error("invalid record date: {input:?}")]
    InvalidDate { input: String },

    #[error("unknown renewal frequency: {input:?} (expected quarterly, semi-annual or annual)")]
    UnknownFrequency { input: String },

    #[error("unknown rounding policy: {input:?} (expected fixed or rolling)")]
    UnknownRounding { input: String },
}

impl PeriodError {
    pub fn invalid_date(input: &str) -> Self {
        PeriodError::InvalidDate {
            input: input.to_string(),
        }
    }
}
