pub mod api;
pub mod config;
pub mod docs;
pub mod engine;
pub mod model;
pub mod routes;
pub mod store;

pub use engine::{Analyzer, HolidayCalendar};
pub use model::{LeaveRequest, RuleId, Status, Verdict};
