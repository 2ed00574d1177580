pub mod leave_request;
pub mod verdict;

pub use leave_request::LeaveRequest;
pub use verdict::{RuleId, Status, Verdict};
