use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::Verdict;

const HEADERS: [&str; 10] = [
    "Timestamp",
    "Employee Name",
    "Employee ID",
    "Department",
    "Reason",
    "Start Date",
    "End Date",
    "Duration",
    "Status",
    "Flags",
];

/// One row of the append-only request log. Field names map onto the fixed
/// CSV header the original dataset format uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Employee Name")]
    pub employee_name: String,
    #[serde(rename = "Employee ID")]
    pub employee_id: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Reason")]
    pub reason: String,
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "End Date")]
    pub end_date: String,
    #[serde(rename = "Duration")]
    pub duration: i64,
    #[serde(rename = "Status")]
    pub status: String,
    /// Verdict reasons joined with "; ".
    #[serde(rename = "Flags")]
    pub flags: String,
}

impl LogRecord {
    pub fn from_verdict(
        employee_name: &str,
        employee_id: &str,
        department: &str,
        reason: &str,
        start_date: &str,
        end_date: &str,
        verdict: &Verdict,
    ) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            employee_name: employee_name.to_string(),
            employee_id: employee_id.to_string(),
            department: department.to_string(),
            reason: reason.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            duration: verdict.duration,
            status: verdict.status.to_string(),
            flags: verdict.reasons.join("; "),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeInfo {
    pub name: String,
    pub department: String,
    pub total_leaves: u32,
}

/// Aggregates over the whole log, for the stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LogStats {
    pub total_requests: u32,
    pub approved: u32,
    pub flagged: u32,
    pub approval_rate: f64,
    pub unique_employees: u32,
    pub departments: HashMap<String, u32>,
}

/// Append-only CSV log of evaluated requests. The engine never touches
/// this; handlers evaluate first and persist after, so an I/O failure can
/// lose a row but never block or corrupt an evaluation.
#[derive(Debug, Clone)]
pub struct LeaveLog {
    path: PathBuf,
}

impl LeaveLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and seed the header row if the log does
    /// not exist yet.
    pub fn ensure_exists(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        writer.write_record(HEADERS)?;
        writer.flush()?;
        Ok(())
    }

    pub fn append(&self, record: &LogRecord) -> anyhow::Result<()> {
        self.ensure_exists()?;
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    pub fn records(&self) -> anyhow::Result<Vec<LogRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            match row {
                Ok(record) => records.push(record),
                Err(e) => warn!(error = %e, "Skipping malformed log row"),
            }
        }
        Ok(records)
    }

    /// Leaves taken by `employee_id` in the calendar month and year of
    /// `start_date`. Rows with an unparsable start date are skipped, and a
    /// read failure degrades to zero so history problems never block an
    /// evaluation.
    pub fn monthly_leave_count(&self, employee_id: &str, start_date: NaiveDate) -> u32 {
        let records = match self.records() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, employee_id, "Failed to read leave history, assuming none");
                return 0;
            }
        };

        records
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .filter_map(|r| NaiveDate::parse_from_str(&r.start_date, "%Y-%m-%d").ok())
            .filter(|d| d.month() == start_date.month() && d.year() == start_date.year())
            .count() as u32
    }

    /// First-seen identity plus total request count for an employee, or
    /// `None` for a new employee.
    pub fn find_employee(&self, employee_id: &str) -> anyhow::Result<Option<EmployeeInfo>> {
        let mut info: Option<EmployeeInfo> = None;
        for record in self.records()? {
            if record.employee_id != employee_id {
                continue;
            }
            match info.as_mut() {
                Some(info) => info.total_leaves += 1,
                None => {
                    info = Some(EmployeeInfo {
                        name: record.employee_name.clone(),
                        department: record.department.clone(),
                        total_leaves: 1,
                    })
                }
            }
        }
        Ok(info)
    }

    pub fn stats(&self) -> anyhow::Result<LogStats> {
        let records = self.records()?;

        let total_requests = records.len() as u32;
        let approved = records.iter().filter(|r| r.status == "Approved").count() as u32;
        let flagged = records.iter().filter(|r| r.status == "Flagged").count() as u32;
        let approval_rate = if total_requests > 0 {
            (approved as f64 / total_requests as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        let mut unique = std::collections::HashSet::new();
        let mut departments: HashMap<String, u32> = HashMap::new();
        for record in &records {
            unique.insert(record.employee_id.clone());
            *departments.entry(record.department.clone()).or_insert(0) += 1;
        }

        Ok(LogStats {
            total_requests,
            approved,
            flagged,
            approval_rate,
            unique_employees: unique.len() as u32,
            departments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Analyzer, HolidayCalendar};
    use crate::model::LeaveRequest;

    fn temp_log() -> (tempfile::TempDir, LeaveLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = LeaveLog::new(dir.path().join("dataset").join("leave_requests.csv"));
        (dir, log)
    }

    fn record(employee_id: &str, start_date: &str, status: &str) -> LogRecord {
        LogRecord {
            timestamp: "2025-06-01 09:00:00".to_string(),
            employee_name: "Jan Kowalski".to_string(),
            employee_id: employee_id.to_string(),
            department: "Engineering".to_string(),
            reason: "Medical appointment, with commas; and semicolons".to_string(),
            start_date: start_date.to_string(),
            end_date: start_date.to_string(),
            duration: 1,
            status: status.to_string(),
            flags: "a; b".to_string(),
        }
    }

    #[test]
    fn ensure_exists_seeds_header_only() {
        let (_dir, log) = temp_log();
        log.ensure_exists().unwrap();
        let content = std::fs::read_to_string(log.path()).unwrap();
        assert!(content.starts_with("Timestamp,Employee Name,Employee ID"));
        assert_eq!(log.records().unwrap().len(), 0);
    }

    #[test]
    fn append_round_trips_fields_with_commas() {
        let (_dir, log) = temp_log();
        log.append(&record("EMP-001", "2025-06-03", "Approved")).unwrap();
        let records = log.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].reason,
            "Medical appointment, with commas; and semicolons"
        );
    }

    #[test]
    fn monthly_count_matches_month_and_year_of_start() {
        let (_dir, log) = temp_log();
        log.append(&record("EMP-001", "2025-06-03", "Approved")).unwrap();
        log.append(&record("EMP-001", "2025-06-20", "Flagged")).unwrap();
        log.append(&record("EMP-001", "2025-07-01", "Approved")).unwrap();
        log.append(&record("EMP-002", "2025-06-10", "Approved")).unwrap();

        let june = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(log.monthly_leave_count("EMP-001", june), 2);
        assert_eq!(log.monthly_leave_count("EMP-003", june), 0);
    }

    #[test]
    fn monthly_count_survives_a_missing_file() {
        let (_dir, log) = temp_log();
        let june = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(log.monthly_leave_count("EMP-001", june), 0);
    }

    #[test]
    fn find_employee_counts_all_rows() {
        let (_dir, log) = temp_log();
        log.append(&record("EMP-001", "2025-06-03", "Approved")).unwrap();
        log.append(&record("EMP-001", "2025-07-01", "Flagged")).unwrap();

        let info = log.find_employee("EMP-001").unwrap().unwrap();
        assert_eq!(info.name, "Jan Kowalski");
        assert_eq!(info.total_leaves, 2);
        assert!(log.find_employee("EMP-404").unwrap().is_none());
    }

    #[test]
    fn stats_aggregate_the_whole_log() {
        let (_dir, log) = temp_log();
        log.append(&record("EMP-001", "2025-06-03", "Approved")).unwrap();
        log.append(&record("EMP-001", "2025-06-04", "Approved")).unwrap();
        log.append(&record("EMP-002", "2025-06-05", "Flagged")).unwrap();

        let stats = log.stats().unwrap();
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.approved, 2);
        assert_eq!(stats.flagged, 1);
        assert_eq!(stats.approval_rate, 66.7);
        assert_eq!(stats.unique_employees, 2);
        assert_eq!(stats.departments.get("Engineering"), Some(&3));
    }

    #[test]
    fn empty_log_yields_zeroed_stats() {
        let (_dir, log) = temp_log();
        let stats = log.stats().unwrap();
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.approval_rate, 0.0);
    }

    #[test]
    fn verdict_reasons_are_joined_with_semicolons() {
        let engine = Analyzer::new(HolidayCalendar::builtin());
        let request = LeaveRequest::new(
            "Planning vacation trip",
            "2025-06-06",
            "2025-06-09",
            "Engineering",
            0,
        );
        let verdict = engine.evaluate(&request);
        let row = LogRecord::from_verdict(
            "Jan Kowalski",
            "EMP-001",
            &request.department,
            &request.reason,
            &request.start_date,
            &request.end_date,
            &verdict,
        );
        assert_eq!(row.status, "Flagged");
        assert!(row.flags.contains("; "));
    }
}
