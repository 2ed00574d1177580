use crate::api::leave_request::SubmitLeave;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Request Analyzer API",
        version = "1.0.0",
        description = r#"
## Leave Request Analyzer

Evaluates employee leave requests against a fixed set of policy rules and
classifies each as **Approved** or **Flagged** with human-readable
explanations.

### Key Features
- **Rule Engine** — seven independent policy checks with traceable rule ids
- **Request Log** — append-only CSV dataset of every evaluated request
- **Statistics** — approval rate and per-department breakdowns
- **Rule Catalog** — static rule metadata for documentation and display

### Response Format
JSON-based responses. A verdict whose `rules_triggered` is
`["validation_error"]` is a form error, not a policy decision.
"#,
    ),
    paths(
        crate::api::leave_request::submit_leave,
        crate::api::leave_request::check_employee,
        crate::api::leave_request::list_rules,
        crate::api::stats::statistics,
    ),
    components(schemas(SubmitLeave)),
    tags(
        (name = "Leave", description = "Leave request evaluation APIs"),
        (name = "Rules", description = "Policy rule catalog"),
        (name = "Stats", description = "Request log statistics"),
    )
)]
pub struct ApiDoc;
