use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

/// Static public-holiday reference data. The date list and the month-day
/// name table are kept separate on purpose: a holiday repeated across years
/// shares one name entry, and a date with no entry falls back to a generic
/// label.
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    dates: Vec<NaiveDate>,
    /// Keyed by `MM-DD`.
    names: HashMap<String, String>,
}

const GENERIC_HOLIDAY: &str = "Public Holiday";

/// On-disk shape for a region-specific calendar (HOLIDAYS_FILE).
#[derive(Debug, Deserialize)]
struct CalendarFile {
    dates: Vec<String>,
    #[serde(default)]
    names: HashMap<String, String>,
}

impl HolidayCalendar {
    pub fn new(dates: Vec<NaiveDate>, names: HashMap<String, String>) -> Self {
        Self { dates, names }
    }

    /// The built-in policy table (customize per region via HOLIDAYS_FILE).
    pub fn builtin() -> Self {
        let dates = [
            "2025-01-01", // New Year's Day
            "2025-01-26", // Republic Day
            "2025-03-14", // Holi
            "2025-04-18", // Good Friday
            "2025-08-15", // Independence Day
            "2025-10-02", // Gandhi Jayanti
            "2025-10-24", // Diwali
            "2025-12-25", // Christmas
            "2026-01-01",
            "2026-01-26",
            "2026-12-25",
        ];
        let names = [
            ("01-01", "New Year's Day"),
            ("01-26", "Republic Day"),
            ("03-14", "Holi"),
            ("04-18", "Good Friday"),
            ("08-15", "Independence Day"),
            ("10-02", "Gandhi Jayanti"),
            ("10-24", "Diwali"),
            ("12-25", "Christmas"),
        ];

        Self {
            dates: dates
                .iter()
                .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                .collect(),
            names: names
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Load a calendar from a JSON file. Unparsable dates are skipped, not
    /// fatal, so a stale config cannot take the service down.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read holiday calendar {}", path.display()))?;
        let file: CalendarFile = serde_json::from_str(&raw)
            .with_context(|| format!("invalid holiday calendar {}", path.display()))?;

        let mut dates = Vec::with_capacity(file.dates.len());
        for entry in &file.dates {
            match NaiveDate::parse_from_str(entry, "%Y-%m-%d") {
                Ok(date) => dates.push(date),
                Err(_) => warn!(entry = %entry, "Skipping unparsable holiday date"),
            }
        }

        Ok(Self::new(dates, file.names))
    }

    /// Dates in table order; rule evaluation preserves this order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn name_for(&self, date: NaiveDate) -> &str {
        let month_day = date.format("%m-%d").to_string();
        self.names
            .get(&month_day)
            .map(String::as_str)
            .unwrap_or(GENERIC_HOLIDAY)
    }
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::builtin()
    }
}
