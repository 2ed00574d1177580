use std::fmt;

use serde::{Serialize, Serializer};

/// Identifier of a policy check, plus the validation sentinel. Kept as a
/// tagged enum instead of the loose `1 | "4a" | "validation_error"` wire
/// values so callers can match on it; `Display`/`Serialize` emit the wire
/// codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleId {
    LongDuration,
    VacationKeywords,
    FrequentLeaves,
    FridayStart,
    MondayEnd,
    BriefSickReason,
    ItSupportDuration,
    HolidayProximity,
    ValidationError,
}

impl RuleId {
    pub fn code(&self) -> &'static str {
        match self {
            RuleId::LongDuration => "1",
            RuleId::VacationKeywords => "2",
            RuleId::FrequentLeaves => "3",
            RuleId::FridayStart => "4a",
            RuleId::MondayEnd => "4b",
            RuleId::BriefSickReason => "5",
            RuleId::ItSupportDuration => "6",
            RuleId::HolidayProximity => "7",
            RuleId::ValidationError => "validation_error",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for RuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Approved,
    Flagged,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Approved => f.write_str("Approved"),
            Status::Flagged => f.write_str("Flagged"),
        }
    }
}

/// Outcome of evaluating one leave request. A value object: built by the
/// engine, consumed by the caller, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub status: Status,
    /// Triggered-rule explanations when Flagged, or the three fixed
    /// approval messages when Approved.
    pub reasons: Vec<String>,
    /// Inclusive day count; 0 when the input failed validation.
    pub duration: i64,
    pub rules_triggered: Vec<RuleId>,
    /// Full weekday names of the parsed dates; absent on validation failure.
    pub start_day: Option<String>,
    pub end_day: Option<String>,
}

impl Verdict {
    /// True only for the terminal validation failures, as opposed to a
    /// genuine policy flag. Presentation must route these to a form error.
    pub fn is_validation_error(&self) -> bool {
        self.rules_triggered == [RuleId::ValidationError]
    }
}
