use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::engine::{Analyzer, RULE_CATALOG};
use crate::model::LeaveRequest;
use crate::store::{LeaveLog, LogRecord};

#[derive(Deserialize, ToSchema)]
pub struct SubmitLeave {
    #[schema(example = "Jan Kowalski")]
    pub employee_name: String,
    #[schema(example = "EMP-001")]
    pub employee_id: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Medical appointment with specialist")]
    pub reason: String,
    #[schema(example = "2025-06-03", format = "date", value_type = String)]
    pub start_date: String,
    #[schema(example = "2025-06-04", format = "date", value_type = String)]
    pub end_date: String,
}

/* =========================
Submit a leave request
========================= */
#[utoipa::path(
    post,
    path = "/submit",
    request_body(
        content = SubmitLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Request evaluated and recorded", body = Object,
         example = json!({
            "employee_name": "Jan Kowalski",
            "employee_id": "EMP-001",
            "is_new_employee": true,
            "previous_leaves_count": 0,
            "result": {
                "status": "Approved",
                "reasons": ["All validation rules passed successfully"],
                "duration": 2,
                "rules_triggered": [],
                "start_day": "Tuesday",
                "end_day": "Wednesday"
            }
         })
        ),
        (status = 400, description = "Missing fields or invalid dates"),
        (status = 500, description = "Failed to record the request")
    ),
    tag = "Leave"
)]
pub async fn submit_leave(
    engine: web::Data<Analyzer>,
    log: web::Data<LeaveLog>,
    payload: web::Json<SubmitLeave>,
) -> actix_web::Result<impl Responder> {
    let employee_name = payload.employee_name.trim();
    let employee_id = payload.employee_id.trim();
    let department = payload.department.trim();
    let reason = payload.reason.trim();
    let start_date = payload.start_date.trim();
    let end_date = payload.end_date.trim();

    if [employee_name, employee_id, department, reason, start_date, end_date]
        .iter()
        .any(|field| field.is_empty())
    {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "All fields are required. Please fill out the complete form."
        })));
    }

    // Identity lookup failures only cost the "known employee" hint.
    let existing = log.find_employee(employee_id).unwrap_or_else(|e| {
        tracing::warn!(error = %e, employee_id, "Employee lookup failed");
        None
    });
    let is_new_employee = existing.is_none();

    // History feeds rule 3; an unparsable start date means the engine will
    // reject the request anyway, so zero is fine here.
    let previous_leaves_count = NaiveDate::parse_from_str(start_date, "%Y-%m-%d")
        .map(|start| log.monthly_leave_count(employee_id, start))
        .unwrap_or(0);

    let request = LeaveRequest::new(
        reason,
        start_date,
        end_date,
        department,
        previous_leaves_count,
    );
    let verdict = engine.evaluate(&request);

    // A validation error is a form problem, not a policy decision, and is
    // not worth a log row.
    if verdict.is_validation_error() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": verdict.reasons.first().cloned().unwrap_or_default()
        })));
    }

    let record = LogRecord::from_verdict(
        employee_name,
        employee_id,
        department,
        reason,
        start_date,
        end_date,
        &verdict,
    );
    if let Err(e) = log.append(&record) {
        tracing::error!(error = %e, employee_id, "Failed to record leave request");
        return Ok(HttpResponse::InternalServerError().json(serde_json::json!({
            "message": "Error saving request. Please try again."
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "employee_name": employee_name,
        "employee_id": employee_id,
        "is_new_employee": is_new_employee,
        "previous_leaves_count": previous_leaves_count,
        "result": verdict
    })))
}

/* =========================
Employee lookup
========================= */
#[utoipa::path(
    get,
    path = "/api/check-employee/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee ID to look up")
    ),
    responses(
        (status = 200, description = "Lookup result", body = Object, example = json!({
            "exists": true,
            "info": { "name": "Jan Kowalski", "department": "Engineering", "total_leaves": 2 }
        }))
    ),
    tag = "Leave"
)]
pub async fn check_employee(
    log: web::Data<LeaveLog>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let info = log.find_employee(&employee_id).map_err(|e| {
        tracing::error!(error = %e, employee_id = %employee_id, "Failed to read leave log");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match info {
        Some(info) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "exists": true,
            "info": info
        }))),
        None => Ok(HttpResponse::Ok().json(serde_json::json!({ "exists": false }))),
    }
}

/* =========================
Rule catalog
========================= */
#[utoipa::path(
    get,
    path = "/api/rules",
    responses(
        (status = 200, description = "Static rule metadata keyed by rule id", body = Object,
         example = json!({
            "rule_1": {
                "name": "Long Duration",
                "description": "Leave duration exceeds 7 days",
                "criteria": "7 days"
            }
         })
        )
    ),
    tag = "Rules"
)]
pub async fn list_rules() -> actix_web::Result<impl Responder> {
    let mut catalog = serde_json::Map::new();
    for (id, info) in RULE_CATALOG {
        catalog.insert(format!("rule_{}", id.code()), serde_json::to_value(info)?);
    }
    Ok(HttpResponse::Ok().json(catalog))
}
