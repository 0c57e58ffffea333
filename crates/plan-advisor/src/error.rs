//! Error Types for the Plan Advisor

use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Invalid vesting factor {0}: must be between 0 and 1")]
    InvalidVestingFactor(Decimal),

    #[error("Unknown tab: {0}")]
    UnknownTab(String),
}
