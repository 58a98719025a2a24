//! Outcomes of state transitions and their side effects

use std::fmt::Display;

use serde::Serialize;

/// Result of a conditioned status update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// This call moved the row out of its pending state
    Applied,
    /// The row had already left its pending state; nothing changed
    AlreadyResolved,
}

impl Transition {
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            Self::Applied
        } else {
            Self::AlreadyResolved
        }
    }

    #[inline]
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Outcome of a best-effort step that never fails its caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum SideEffect {
    Completed,
    Failed(String),
    Skipped,
}

impl SideEffect {
    pub fn from_result<T, E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Completed,
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
