//! Per-group test limit

use crate::error::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

/// Maximum number of tests retained per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    /// No limit configured: every test is kept, in discovery order
    Unbounded,
    /// Keep at most this many tests per group (`0` excludes everything)
    AtMost(usize),
}

impl Limit {
    /// Resolve a raw configured limit
    ///
    /// # Errors
    /// A negative limit is a configuration error. It is never clamped to zero.
    pub fn resolve(raw: Option<i64>) -> AppResult<Self> {
        match raw {
            None => Ok(Self::Unbounded),
            Some(value) if value < 0 => Err(AppError::InvalidLimit { value }),
            Some(value) => usize::try_from(value).map(Self::AtMost).map_err(|_| {
                AppError::Config(format!("Test limit {} does not fit in usize", value))
            }),
        }
    }

    /// Number of tests kept from a group of `group_size`
    pub fn retained(self, group_size: usize) -> usize {
        match self {
            Self::Unbounded => group_size,
            Self::AtMost(limit) => limit.min(group_size),
        }
    }

    pub fn is_bounded(self) -> bool {
        matches!(self, Self::AtMost(_))
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("unbounded"),
            Self::AtMost(limit) => write!(f, "{}", limit),
        }
    }
}
