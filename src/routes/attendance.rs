use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use super::error_response;
use crate::middlewares::{self, RequireJWT};
use crate::models::attendance::{
    requests::SaveAttendanceRequest, responses::SessionHistoryResponse,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AttendanceService;
use crate::storage::Storage;
use crate::utils::validate::validate_id;

// HTTP处理程序
pub async fn save_attendance(
    req: HttpRequest,
    storage: web::Data<Arc<dyn Storage>>,
    path: web::Path<String>,
    body: web::Json<SaveAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    let class_id = path.into_inner();
    let actor = match RequireJWT::extract_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return Ok(error_response(&e, ErrorCode::Unauthorized)),
    };
    if let Err(e) = validate_id("class_id", &class_id) {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let service = AttendanceService::new(storage.get_ref().clone());
    match service
        .save_session(&actor, &class_id, &body.into_inner().entries)
        .await
    {
        Ok(saved) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            saved,
            "Attendance saved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::AttendanceSaveFailed)),
    }
}

pub async fn list_sessions(
    req: HttpRequest,
    storage: web::Data<Arc<dyn Storage>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let class_id = path.into_inner();
    let actor = match RequireJWT::extract_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return Ok(error_response(&e, ErrorCode::Unauthorized)),
    };
    if let Err(e) = validate_id("class_id", &class_id) {
        return Ok(error_response(&e, ErrorCode::BadRequest));
    }

    let service = AttendanceService::new(storage.get_ref().clone());
    match service.list_sessions(&actor, &class_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SessionHistoryResponse { class_id, items },
            "Attendance history retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::AttendanceQueryFailed)),
    }
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                // 仅班级所属教师可以点名和查看历史
                web::resource("")
                    .route(
                        web::post()
                            .to(save_attendance)
                            .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                    )
                    .route(
                        web::get()
                            .to(list_sessions)
                            .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                    ),
            ),
    );
}
