//! Seeds `dataset/leave_requests.csv` with ~250 realistic synthetic leave
//! requests, evaluated through the real rule engine so statuses and flags
//! match what the service would have produced.
//!
//! Usage:
//!     cargo run --bin seed-dataset

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::Rng;
use rand::seq::IndexedRandom;

use leaveguard::config::Config;
use leaveguard::engine::{Analyzer, HolidayCalendar, RULE_CATALOG};
use leaveguard::model::LeaveRequest;
use leaveguard::store::{LeaveLog, LogRecord};

const RECORD_COUNT: usize = 250;

const EMPLOYEES: [(&str, &str); 30] = [
    ("John Smith", "EMP-001"),
    ("Sarah Johnson", "EMP-002"),
    ("Michael Chen", "EMP-003"),
    ("Emily Davis", "EMP-004"),
    ("Robert Wilson", "EMP-005"),
    ("Lisa Anderson", "EMP-006"),
    ("David Martinez", "EMP-007"),
    ("Jennifer Taylor", "EMP-008"),
    ("Christopher Lee", "EMP-009"),
    ("Amanda White", "EMP-010"),
    ("James Brown", "EMP-011"),
    ("Maria Garcia", "EMP-012"),
    ("Daniel Rodriguez", "EMP-013"),
    ("Jessica Martinez", "EMP-014"),
    ("Matthew Anderson", "EMP-015"),
    ("Ashley Thomas", "EMP-016"),
    ("Joshua Jackson", "EMP-017"),
    ("Stephanie White", "EMP-018"),
    ("Andrew Harris", "EMP-019"),
    ("Michelle Martin", "EMP-020"),
    ("Ryan Thompson", "EMP-021"),
    ("Nicole Garcia", "EMP-022"),
    ("Kevin Rodriguez", "EMP-023"),
    ("Rachel Lewis", "EMP-024"),
    ("Brandon Lee", "EMP-025"),
    ("Lauren Walker", "EMP-026"),
    ("Justin Hall", "EMP-027"),
    ("Samantha Allen", "EMP-028"),
    ("Nicholas Young", "EMP-029"),
    ("Kimberly King", "EMP-030"),
];

const DEPARTMENTS: [&str; 8] = [
    "IT Support",
    "Engineering",
    "Human Resources",
    "Finance",
    "Marketing",
    "Sales",
    "Operations",
    "Customer Service",
];

const APPROVED_REASONS: [&str; 12] = [
    "Medical appointment scheduled with specialist doctor",
    "Dental procedure and recovery time needed",
    "Child's school event and parent-teacher meeting",
    "Home maintenance emergency repair work scheduled",
    "Personal legal matter requires immediate attention",
    "Family member needs assistance with medical care",
    "Vehicle maintenance and registration renewal",
    "Professional certification exam preparation required",
    "Attending important family gathering celebration",
    "Personal health checkup and wellness visit",
    "Moving to new residence within city limits",
    "Required jury duty service obligation",
];

const VACATION_REASONS: [&str; 8] = [
    "Planning vacation trip to beach resort",
    "Holiday travel to visit family abroad",
    "Vacation planned for mountain hiking trip",
    "International travel for leisure and sightseeing",
    "Beach holiday with family members scheduled",
    "Trip to national park for camping adventure",
    "Annual family vacation to theme parks",
    "Road trip across multiple states planned",
];

const SICK_SHORT_REASONS: [&str; 8] = [
    "Sick", "Ill", "Flu", "Cold", "Fever", "Unwell", "Not well", "Health",
];

/// Weighted scenario mix: roughly 40% clean requests, the rest spread over
/// the individual rule triggers.
const SCENARIOS: [Scenario; 12] = [
    Scenario::ApprovedShort,
    Scenario::ApprovedShort,
    Scenario::ApprovedShort,
    Scenario::ApprovedShort,
    Scenario::LongDuration,
    Scenario::VacationKeyword,
    Scenario::VacationKeyword,
    Scenario::FridayStart,
    Scenario::MondayEnd,
    Scenario::SickShort,
    Scenario::ItSupportLong,
    Scenario::HolidayAdjacent,
];

#[derive(Clone, Copy)]
enum Scenario {
    ApprovedShort,
    LongDuration,
    VacationKeyword,
    FridayStart,
    MondayEnd,
    SickShort,
    ItSupportLong,
    HolidayAdjacent,
}

struct Draft {
    timestamp: String,
    name: &'static str,
    employee_id: &'static str,
    department: &'static str,
    reason: &'static str,
    start: NaiveDate,
    end: NaiveDate,
}

fn random_date(rng: &mut impl Rng) -> NaiveDate {
    let base = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
    base + Days::new(rng.random_range(0..365))
}

fn generate_draft(rng: &mut impl Rng) -> Draft {
    let (name, employee_id) = *EMPLOYEES.choose(rng).expect("non-empty");
    let mut department = *DEPARTMENTS.choose(rng).expect("non-empty");
    let scenario = *SCENARIOS.choose(rng).expect("non-empty");

    let mut start = random_date(rng);
    let (reason, end) = match scenario {
        Scenario::ApprovedShort => {
            let duration = rng.random_range(1..=3);
            while start.weekday() == Weekday::Fri {
                start = random_date(rng);
            }
            let mut end = start + Days::new(duration - 1);
            let mut attempts = 0;
            while end.weekday() == Weekday::Mon && attempts < 50 {
                start = random_date(rng);
                end = start + Days::new(duration - 1);
                attempts += 1;
            }
            (*APPROVED_REASONS.choose(rng).expect("non-empty"), end)
        }
        Scenario::LongDuration => {
            let duration = rng.random_range(8..=14);
            (
                *APPROVED_REASONS.choose(rng).expect("non-empty"),
                start + Days::new(duration - 1),
            )
        }
        Scenario::VacationKeyword => {
            let duration = rng.random_range(3..=6);
            (
                *VACATION_REASONS.choose(rng).expect("non-empty"),
                start + Days::new(duration - 1),
            )
        }
        Scenario::FridayStart => {
            while start.weekday() != Weekday::Fri {
                start = random_date(rng);
            }
            let duration = rng.random_range(1..=3);
            (
                *APPROVED_REASONS.choose(rng).expect("non-empty"),
                start + Days::new(duration - 1),
            )
        }
        Scenario::MondayEnd => {
            let duration = rng.random_range(2..=4);
            let mut end = start + Days::new(duration - 1);
            let mut attempts = 0;
            while end.weekday() != Weekday::Mon && attempts < 50 {
                start = random_date(rng);
                end = start + Days::new(duration - 1);
                attempts += 1;
            }
            (*APPROVED_REASONS.choose(rng).expect("non-empty"), end)
        }
        Scenario::SickShort => (*SICK_SHORT_REASONS.choose(rng).expect("non-empty"), start),
        Scenario::ItSupportLong => {
            department = "IT Support";
            let duration = rng.random_range(3..=5);
            (
                *APPROVED_REASONS.choose(rng).expect("non-empty"),
                start + Days::new(duration - 1),
            )
        }
        Scenario::HolidayAdjacent => {
            let anchors = [
                NaiveDate::from_ymd_opt(2025, 1, 1),
                NaiveDate::from_ymd_opt(2025, 12, 24),
                NaiveDate::from_ymd_opt(2025, 12, 26),
                NaiveDate::from_ymd_opt(2025, 8, 14),
                NaiveDate::from_ymd_opt(2025, 10, 1),
            ];
            start = anchors.choose(rng).copied().flatten().expect("valid date");
            let duration = rng.random_range(1..=2);
            (
                *APPROVED_REASONS.choose(rng).expect("non-empty"),
                start + Days::new(duration - 1),
            )
        }
    };

    // Submitted some days before the leave starts.
    let submitted = start - Days::new(rng.random_range(1..=30));
    Draft {
        timestamp: format!("{} 09:00:00", submitted.format("%Y-%m-%d")),
        name,
        employee_id,
        department,
        reason,
        start,
        end,
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    let engine = Analyzer::new(HolidayCalendar::builtin());
    let log = LeaveLog::new(&config.dataset_path);

    println!("Generating {RECORD_COUNT} leave request records...");

    let mut rng = rand::rng();
    let mut drafts: Vec<Draft> = (0..RECORD_COUNT).map(|_| generate_draft(&mut rng)).collect();
    drafts.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    // Start fresh; the generator owns the dataset it writes.
    if log.path().exists() {
        std::fs::remove_file(log.path())?;
    }
    log.ensure_exists()?;

    // Per-employee monthly counts feed rule 3, exactly as the history
    // collaborator would.
    let mut monthly_counts: HashMap<String, u32> = HashMap::new();
    let mut approved = 0u32;
    let mut rule_counts: HashMap<&'static str, u32> = HashMap::new();

    for draft in &drafts {
        let month_key = format!("{}_{}", draft.employee_id, draft.start.format("%Y-%m"));
        let previous = *monthly_counts.get(&month_key).unwrap_or(&0);
        monthly_counts.insert(month_key, previous + 1);

        let request = LeaveRequest::new(
            draft.reason,
            draft.start.format("%Y-%m-%d").to_string(),
            draft.end.format("%Y-%m-%d").to_string(),
            draft.department,
            previous,
        );
        let verdict = engine.evaluate(&request);

        if verdict.rules_triggered.is_empty() {
            approved += 1;
        }
        for id in &verdict.rules_triggered {
            if let Some((_, info)) = RULE_CATALOG.iter().find(|(rule, _)| rule == id) {
                *rule_counts.entry(info.name).or_insert(0) += 1;
            }
        }

        let mut record = LogRecord::from_verdict(
            draft.name,
            draft.employee_id,
            draft.department,
            draft.reason,
            &request.start_date,
            &request.end_date,
            &verdict,
        );
        record.timestamp = draft.timestamp.clone();
        log.append(&record)?;
    }

    let flagged = RECORD_COUNT as u32 - approved;
    println!("Dataset written to {}", log.path().display());
    println!("  Total:    {RECORD_COUNT}");
    println!(
        "  Approved: {approved} ({:.1}%)",
        approved as f64 / RECORD_COUNT as f64 * 100.0
    );
    println!(
        "  Flagged:  {flagged} ({:.1}%)",
        flagged as f64 / RECORD_COUNT as f64 * 100.0
    );

    if !rule_counts.is_empty() {
        println!("Rule triggers:");
        let mut breakdown: Vec<_> = rule_counts.into_iter().collect();
        breakdown.sort();
        for (name, count) in breakdown {
            println!("  {name}: {count}");
        }
    }

    Ok(())
}
