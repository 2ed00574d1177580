use chrono::{Datelike, Days, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::engine::holidays::HolidayCalendar;
use crate::model::{LeaveRequest, RuleId};

pub const MAX_DURATION_DAYS: i64 = 7;
pub const MONTHLY_LEAVE_LIMIT: u32 = 3;
pub const MIN_SICK_REASON_CHARS: usize = 10;
pub const IT_SUPPORT_DEPARTMENT: &str = "IT Support";
pub const IT_SUPPORT_MAX_DAYS: i64 = 2;

/// Scan order is fixed: matched keywords are reported in this order, not in
/// order of appearance in the reason text.
pub const VACATION_KEYWORDS: [&str; 4] = ["vacation", "travel", "holiday", "trip"];

/// Everything a rule may look at. Built once per evaluation after the dates
/// have parsed; rules never see unvalidated input.
pub(crate) struct RuleContext<'a> {
    pub request: &'a LeaveRequest,
    /// Lower-cased once, shared by the keyword rules.
    pub reason_lower: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration: i64,
    pub calendar: &'a HolidayCalendar,
}

/// One independent policy condition. Rules never short-circuit each other;
/// the engine runs every rule and aggregates whatever messages come back.
pub(crate) trait PolicyRule: Send + Sync {
    fn id(&self) -> RuleId;
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String>;
}

/// The full rule set in evaluation (and reporting) order.
pub(crate) static RULESET: Lazy<Vec<Box<dyn PolicyRule>>> = Lazy::new(|| {
    vec![
        Box::new(LongDuration),
        Box::new(VacationKeywords),
        Box::new(FrequentLeaves),
        Box::new(FridayStart),
        Box::new(MondayEnd),
        Box::new(BriefSickReason),
        Box::new(ItSupportDuration),
        Box::new(HolidayProximity),
    ]
});

struct LongDuration;

impl PolicyRule for LongDuration {
    fn id(&self) -> RuleId {
        RuleId::LongDuration
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        if ctx.duration > MAX_DURATION_DAYS {
            vec![format!(
                "Leave duration ({} days) exceeds {} days",
                ctx.duration, MAX_DURATION_DAYS
            )]
        } else {
            Vec::new()
        }
    }
}

struct VacationKeywords;

impl PolicyRule for VacationKeywords {
    fn id(&self) -> RuleId {
        RuleId::VacationKeywords
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        let found: Vec<&str> = VACATION_KEYWORDS
            .iter()
            .copied()
            .filter(|kw| ctx.reason_lower.contains(kw))
            .collect();
        if found.is_empty() {
            Vec::new()
        } else {
            vec![format!(
                "Leave reason contains vacation-related keywords: {}",
                found.join(", ")
            )]
        }
    }
}

struct FrequentLeaves;

impl PolicyRule for FrequentLeaves {
    fn id(&self) -> RuleId {
        RuleId::FrequentLeaves
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        let count = ctx.request.previous_leaves_count;
        if count >= MONTHLY_LEAVE_LIMIT {
            vec![format!(
                "Employee has already taken {count} leaves this month (limit: {MONTHLY_LEAVE_LIMIT})"
            )]
        } else {
            Vec::new()
        }
    }
}

struct FridayStart;

impl PolicyRule for FridayStart {
    fn id(&self) -> RuleId {
        RuleId::FridayStart
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        if ctx.start.weekday() == Weekday::Fri {
            vec!["Leave starts on Friday (potential long weekend extension)".to_string()]
        } else {
            Vec::new()
        }
    }
}

struct MondayEnd;

impl PolicyRule for MondayEnd {
    fn id(&self) -> RuleId {
        RuleId::MondayEnd
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        if ctx.end.weekday() == Weekday::Mon {
            vec!["Leave ends on Monday (potential long weekend extension)".to_string()]
        } else {
            Vec::new()
        }
    }
}

struct BriefSickReason;

impl PolicyRule for BriefSickReason {
    fn id(&self) -> RuleId {
        RuleId::BriefSickReason
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        // Length is the raw character count of the original reason, not the
        // lower-cased copy.
        let len = ctx.request.reason.chars().count();
        if ctx.reason_lower.contains("sick") && len < MIN_SICK_REASON_CHARS {
            vec![format!(
                "Sick leave reason is too brief ({len} characters, minimum: {MIN_SICK_REASON_CHARS})"
            )]
        } else {
            Vec::new()
        }
    }
}

struct ItSupportDuration;

impl PolicyRule for ItSupportDuration {
    fn id(&self) -> RuleId {
        RuleId::ItSupportDuration
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        if ctx.request.department == IT_SUPPORT_DEPARTMENT && ctx.duration > IT_SUPPORT_MAX_DAYS {
            vec![format!(
                "IT Support department leave exceeds {IT_SUPPORT_MAX_DAYS} days \
                 (requested: {} days, limit: {IT_SUPPORT_MAX_DAYS})",
                ctx.duration
            )]
        } else {
            Vec::new()
        }
    }
}

struct HolidayProximity;

impl PolicyRule for HolidayProximity {
    fn id(&self) -> RuleId {
        RuleId::HolidayProximity
    }

    /// For every holiday, in table order, three independent tests: leave
    /// starts the day after it, ends the day before it, or spans it. One
    /// request can collect several flags across several holidays.
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<String> {
        let mut flags = Vec::new();

        for &holiday in ctx.calendar.dates() {
            let name = ctx.calendar.name_for(holiday);
            let date = holiday.format("%Y-%m-%d");

            if Some(ctx.start) == holiday.checked_add_days(Days::new(1)) {
                flags.push(format!("Leave starts immediately after {name} ({date})"));
            }
            if Some(ctx.end) == holiday.checked_sub_days(Days::new(1)) {
                flags.push(format!("Leave ends immediately before {name} ({date})"));
            }
            if ctx.start <= holiday && holiday <= ctx.end {
                flags.push(format!("Leave period includes {name} ({date})"));
            }
        }

        flags
    }
}

/// Static rule metadata for documentation and display. No computation, just
/// a fixed catalog keyed by rule id.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RuleInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub criteria: &'static str,
}

pub const RULE_CATALOG: [(RuleId, RuleInfo); 8] = [
    (
        RuleId::LongDuration,
        RuleInfo {
            name: "Long Duration",
            description: "Leave duration exceeds 7 days",
            criteria: "7 days",
        },
    ),
    (
        RuleId::VacationKeywords,
        RuleInfo {
            name: "Vacation Keywords",
            description: "Reason contains vacation-related keywords",
            criteria: "vacation, travel, holiday, trip",
        },
    ),
    (
        RuleId::FrequentLeaves,
        RuleInfo {
            name: "Frequent Leaves",
            description: "Employee has taken 3 or more leaves in the same month",
            criteria: "3 leaves per month",
        },
    ),
    (
        RuleId::FridayStart,
        RuleInfo {
            name: "Friday Start",
            description: "Leave starts on Friday (potential long weekend)",
            criteria: "Friday",
        },
    ),
    (
        RuleId::MondayEnd,
        RuleInfo {
            name: "Monday End",
            description: "Leave ends on Monday (potential long weekend)",
            criteria: "Monday",
        },
    ),
    (
        RuleId::BriefSickReason,
        RuleInfo {
            name: "Brief Sick Reason",
            description: "Sick leave with insufficient details",
            criteria: "10 characters minimum",
        },
    ),
    (
        RuleId::ItSupportDuration,
        RuleInfo {
            name: "IT Support Duration",
            description: "IT Support department leave exceeds limit",
            criteria: "2 days for IT Support",
        },
    ),
    (
        RuleId::HolidayProximity,
        RuleInfo {
            name: "Holiday Proximity",
            description: "Leave is adjacent to or includes public holidays",
            criteria: "Before, after, or during holidays",
        },
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ctx<'a>(
        request: &'a LeaveRequest,
        calendar: &'a HolidayCalendar,
        start: &str,
        end: &str,
    ) -> RuleContext<'a> {
        let start = date(start);
        let end = date(end);
        RuleContext {
            reason_lower: request.reason.to_lowercase(),
            duration: (end - start).num_days() + 1,
            request,
            start,
            end,
            calendar,
        }
    }

    #[test]
    fn vacation_keywords_report_in_scan_order() {
        let calendar = HolidayCalendar::builtin();
        // "trip" appears before "vacation" in the text but after it in the
        // fixed keyword list.
        let request = LeaveRequest::new("trip then vacation", "", "", "Engineering", 0);
        let flags = VacationKeywords.check(&ctx(&request, &calendar, "2025-06-03", "2025-06-04"));
        assert_eq!(
            flags,
            vec!["Leave reason contains vacation-related keywords: vacation, trip".to_string()]
        );
    }

    #[test]
    fn sick_rule_counts_raw_characters() {
        let calendar = HolidayCalendar::builtin();
        let request = LeaveRequest::new("Sick", "", "", "Engineering", 0);
        let flags = BriefSickReason.check(&ctx(&request, &calendar, "2025-06-03", "2025-06-03"));
        assert_eq!(
            flags,
            vec!["Sick leave reason is too brief (4 characters, minimum: 10)".to_string()]
        );

        // Ten characters is long enough even when "sick" is present.
        let request = LeaveRequest::new("Sick today", "", "", "Engineering", 0);
        let flags = BriefSickReason.check(&ctx(&request, &calendar, "2025-06-03", "2025-06-03"));
        assert!(flags.is_empty());
    }

    #[test]
    fn it_support_limit_is_department_exact() {
        let calendar = HolidayCalendar::builtin();
        let request = LeaveRequest::new("Family matter", "", "", "it support", 0);
        let flags = ItSupportDuration.check(&ctx(&request, &calendar, "2025-06-03", "2025-06-05"));
        assert!(flags.is_empty(), "department comparison is case-sensitive");

        let request = LeaveRequest::new("Family matter", "", "", "IT Support", 0);
        let flags = ItSupportDuration.check(&ctx(&request, &calendar, "2025-06-03", "2025-06-05"));
        assert_eq!(
            flags,
            vec!["IT Support department leave exceeds 2 days (requested: 3 days, limit: 2)"
                .to_string()]
        );
    }

    #[test]
    fn holiday_proximity_emits_one_flag_per_match() {
        let calendar = HolidayCalendar::builtin();
        let request = LeaveRequest::new("Family matter", "", "", "Engineering", 0);
        // 2025-01-26 is Republic Day: spans it and ends right before nothing.
        let flags = HolidayProximity.check(&ctx(&request, &calendar, "2025-01-25", "2025-01-27"));
        assert_eq!(
            flags,
            vec!["Leave period includes Republic Day (2025-01-26)".to_string()]
        );
    }

    #[test]
    fn holiday_proximity_matches_adjacency_on_both_sides() {
        let calendar = HolidayCalendar::builtin();
        let request = LeaveRequest::new("Family matter", "", "", "Engineering", 0);
        // Starts the day after New Year's Day.
        let flags = HolidayProximity.check(&ctx(&request, &calendar, "2025-01-02", "2025-01-03"));
        assert_eq!(
            flags,
            vec!["Leave starts immediately after New Year's Day (2025-01-01)".to_string()]
        );
    }
}
