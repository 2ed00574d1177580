use serde::{Deserialize, Serialize};

/// Normalized input to the rule engine. Dates stay textual because the
/// engine owns parsing: a malformed date must come back as a verdict,
/// never as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub reason: String,
    pub start_date: String,
    pub end_date: String,
    pub department: String,
    /// Leaves already taken by the same employee in the calendar month of
    /// `start_date`. Supplied by the history collaborator, not computed here.
    pub previous_leaves_count: u32,
}

impl LeaveRequest {
    pub fn new(
        reason: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        department: impl Into<String>,
        previous_leaves_count: u32,
    ) -> Self {
        Self {
            reason: reason.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            department: department.into(),
            previous_leaves_count,
        }
    }
}
