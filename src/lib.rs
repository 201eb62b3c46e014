// Municipal Records - Renewal Period Core
// Period-end and delinquency rules shared by the listing pages, forms and
// the command-line tool

pub mod error;
pub mod dates;       // Date Parser - MM/DD/YYYY + generic forms
pub mod period;      // Period-End Calculator - fixed / rolling policies
pub mod delinquency; // Delinquency Evaluator - renewed flag + injected now
pub mod status;      // Record Status - Expired Date column + badge
pub mod config;      // Period policy loaded from JSON

// Re-export commonly used types
pub use error::PeriodError;
pub use dates::{
    parse_date_flexible, parse_iso_date, format_mdy, display_date, MISSING_DATE,
};
pub use period::{
    Frequency, Rounding, PeriodOptions,
    compute_period_end, period_end,
    fixed_period_end, next_fixed_period_end, rolling_period_end, add_months_clamped,
};
pub use delinquency::{
    RenewableRecord, RecordTerms,
    is_record_delinquent_exact, is_record_delinquent, is_past_period_end,
};
pub use status::{RecordStatus, StatusBadge};
pub use config::{load_period_options, period_options_from_json};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
