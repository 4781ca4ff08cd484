use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use super::error_response;
use crate::middlewares::{self, RequireJWT};
use crate::models::attendance::responses::ClassAttendanceSummaryListResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::StatsService;
use crate::storage::Storage;

// 学生在各班级的考勤
pub async fn my_class_summaries(
    req: HttpRequest,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireJWT::extract_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return Ok(error_response(&e, ErrorCode::Unauthorized)),
    };

    let service = StatsService::new(storage.get_ref().clone());
    match service.student_class_summaries(&actor.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassAttendanceSummaryListResponse { items },
            "Class attendance retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::AttendanceQueryFailed)),
    }
}

// 学生总体考勤
pub async fn my_overview(
    req: HttpRequest,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireJWT::extract_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return Ok(error_response(&e, ErrorCode::Unauthorized)),
    };

    let service = StatsService::new(storage.get_ref().clone());
    match service.student_overview(&actor.id).await {
        Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            overview,
            "Attendance overview retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::AttendanceQueryFailed)),
    }
}

// 配置路由
pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students/me")
            .wrap(middlewares::RequireRole::new(UserRole::Student))
            .wrap(middlewares::RequireJWT)
            .route("/classes", web::get().to(my_class_summaries))
            .route("/attendance", web::get().to(my_overview)),
    );
}
