use chrono::NaiveDate;
use leaveguard::engine::{Analyzer, HolidayCalendar};
use leaveguard::model::{LeaveRequest, RuleId, Status};
use leaveguard::store::{LeaveLog, LogRecord};

fn log_row(employee_id: &str, start_date: &str) -> LogRecord {
    LogRecord {
        timestamp: format!("{start_date} 09:00:00"),
        employee_name: "Sarah Johnson".to_string(),
        employee_id: employee_id.to_string(),
        department: "Finance".to_string(),
        reason: "Personal health checkup and wellness visit".to_string(),
        start_date: start_date.to_string(),
        end_date: start_date.to_string(),
        duration: 1,
        status: "Approved".to_string(),
        flags: "All validation rules passed successfully".to_string(),
    }
}

/// The full submit flow without HTTP: the history collaborator counts prior
/// leaves in the request's month, the engine turns that count into rule 3.
#[test]
fn history_scan_feeds_the_monthly_limit_rule() {
    let dir = tempfile::tempdir().unwrap();
    let log = LeaveLog::new(dir.path().join("leave_requests.csv"));
    log.ensure_exists().unwrap();

    for day in ["2025-06-02", "2025-06-10", "2025-06-17"] {
        log.append(&log_row("EMP-002", day)).unwrap();
    }
    // A different month and a different employee must not count.
    log.append(&log_row("EMP-002", "2025-05-30")).unwrap();
    log.append(&log_row("EMP-009", "2025-06-11")).unwrap();

    let start = NaiveDate::from_ymd_opt(2025, 6, 24).unwrap();
    let previous = log.monthly_leave_count("EMP-002", start);
    assert_eq!(previous, 3);

    let engine = Analyzer::new(HolidayCalendar::builtin());
    let request = LeaveRequest::new(
        "Personal health checkup and wellness visit",
        "2025-06-24",
        "2025-06-25",
        "Finance",
        previous,
    );
    let verdict = engine.evaluate(&request);
    assert_eq!(verdict.status, Status::Flagged);
    assert_eq!(verdict.rules_triggered, vec![RuleId::FrequentLeaves]);

    // Persist the decision and confirm the next request sees one more leave.
    let record = LogRecord::from_verdict(
        "Sarah Johnson",
        "EMP-002",
        &request.department,
        &request.reason,
        &request.start_date,
        &request.end_date,
        &verdict,
    );
    log.append(&record).unwrap();
    assert_eq!(log.monthly_leave_count("EMP-002", start), 4);
}

#[test]
fn verdict_serializes_the_wire_rule_codes() {
    let engine = Analyzer::new(HolidayCalendar::builtin());
    let request = LeaveRequest::new(
        "Planning vacation trip",
        "2025-06-06",
        "2025-06-09",
        "IT Support",
        3,
    );
    let verdict = engine.evaluate(&request);
    let json = serde_json::to_value(&verdict).unwrap();

    assert_eq!(json["status"], "Flagged");
    assert_eq!(
        json["rules_triggered"],
        serde_json::json!(["2", "3", "4a", "4b", "6"])
    );
    assert_eq!(json["duration"], 4);
    assert_eq!(json["start_day"], "Friday");
    assert_eq!(json["end_day"], "Monday");
}

#[test]
fn validation_errors_serialize_the_sentinel_code() {
    let engine = Analyzer::new(HolidayCalendar::builtin());
    let request = LeaveRequest::new("Checkup", "2025-13-40", "2025-06-05", "Finance", 0);
    let verdict = engine.evaluate(&request);
    let json = serde_json::to_value(&verdict).unwrap();

    assert_eq!(json["rules_triggered"], serde_json::json!(["validation_error"]));
    assert_eq!(json["duration"], 0);
    assert_eq!(json["start_day"], serde_json::Value::Null);
}
