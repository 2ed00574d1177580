use actix_web::web;

use crate::api::{leave_request, stats};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/submit").route(web::post().to(leave_request::submit_leave)))
        .service(web::resource("/stats").route(web::get().to(stats::statistics)))
        .service(
            web::scope("/api")
                .service(web::resource("/rules").route(web::get().to(leave_request::list_rules)))
                .service(
                    web::resource("/check-employee/{employee_id}")
                        .route(web::get().to(leave_request::check_employee)),
                ),
        );
}
