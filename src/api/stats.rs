use actix_web::{HttpResponse, Responder, web};

use crate::store::LeaveLog;

/* =========================
Log statistics
========================= */
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Aggregates over the request log", body = Object,
         example = json!({
            "total_requests": 250,
            "approved": 130,
            "flagged": 120,
            "approval_rate": 52.0,
            "unique_employees": 50,
            "departments": { "Engineering": 40, "IT Support": 31 }
         })
        ),
        (status = 500, description = "Failed to read the request log")
    ),
    tag = "Stats"
)]
pub async fn statistics(log: web::Data<LeaveLog>) -> actix_web::Result<impl Responder> {
    let stats = log.stats().map_err(|e| {
        tracing::error!(error = %e, "Failed to aggregate leave log");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(stats))
}
