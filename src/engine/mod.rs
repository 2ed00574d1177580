pub mod holidays;
pub mod rules;

use chrono::NaiveDate;

use crate::model::{LeaveRequest, RuleId, Status, Verdict};
pub use holidays::HolidayCalendar;
pub use rules::{RULE_CATALOG, RuleInfo};
use rules::{RULESET, RuleContext};

const DATE_FORMAT: &str = "%Y-%m-%d";

const APPROVAL_MESSAGES: [&str; 3] = [
    "All validation rules passed successfully",
    "No policy violations detected",
    "Request meets all approval criteria",
];

/// The rule engine. Pure and synchronous: every call reads only the injected
/// holiday calendar and the caller-owned request, so it is safe to share
/// across handlers without coordination.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    calendar: HolidayCalendar,
}

impl Analyzer {
    pub fn new(calendar: HolidayCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Evaluate one leave request against every policy rule. Never fails:
    /// malformed input comes back as a Flagged verdict carrying the
    /// `validation_error` sentinel, which callers must treat as a form
    /// error rather than a policy decision.
    pub fn evaluate(&self, request: &LeaveRequest) -> Verdict {
        let (start, end) = match (
            NaiveDate::parse_from_str(&request.start_date, DATE_FORMAT),
            NaiveDate::parse_from_str(&request.end_date, DATE_FORMAT),
        ) {
            (Ok(start), Ok(end)) => (start, end),
            _ => {
                return Self::validation_failure("Invalid date format - please use YYYY-MM-DD");
            }
        };

        let duration = (end - start).num_days() + 1;
        if duration <= 0 {
            return Self::validation_failure("End date must be on or after start date");
        }

        let ctx = RuleContext {
            request,
            reason_lower: request.reason.to_lowercase(),
            start,
            end,
            duration,
            calendar: &self.calendar,
        };

        let mut flags = Vec::new();
        let mut rules_triggered = Vec::new();
        for rule in RULESET.iter() {
            let messages = rule.check(&ctx);
            if !messages.is_empty() {
                flags.extend(messages);
                rules_triggered.push(rule.id());
            }
        }

        let (status, reasons) = if flags.is_empty() {
            (
                Status::Approved,
                APPROVAL_MESSAGES.iter().map(|m| m.to_string()).collect(),
            )
        } else {
            (Status::Flagged, flags)
        };

        Verdict {
            status,
            reasons,
            duration,
            rules_triggered,
            start_day: Some(start.format("%A").to_string()),
            end_day: Some(end.format("%A").to_string()),
        }
    }

    fn validation_failure(message: &str) -> Verdict {
        Verdict {
            status: Status::Flagged,
            reasons: vec![message.to_string()],
            duration: 0,
            rules_triggered: vec![RuleId::ValidationError],
            start_day: None,
            end_day: None,
        }
    }
}
