use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use super::error_response;
use crate::middlewares::{self, RequireJWT};
use crate::models::attendance::responses::RosterResponse;
use crate::models::class_students::responses::JoinClassResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{AttendanceService, ClassStudentService};
use crate::storage::Storage;
use crate::utils::validate::validate_id;

// HTTP处理程序
pub async fn join_class(
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

    let service = ClassStudentService::new(storage.get_ref().clone());
    match service.join_class(&actor, &class_id).await {
        Ok(outcome) => {
            let message = if outcome.is_new() {
                "Class joined successfully"
            } else {
                "Already joined this class"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                JoinClassResponse {
                    already_joined: !outcome.is_new(),
                    joined_class: outcome.joined_class().clone(),
                },
                message,
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::ClassJoinFailed)),
    }
}

// 教师载入点名花名册
pub async fn load_roster(
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
    match service.load_roster(&actor, &class_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RosterResponse { class_id, items },
            "Roster retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}

// 配置路由
pub fn configure_class_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::post()
                            .to(join_class)
                            // 学生加入班级，重复加入不会产生新记录
                            .wrap(middlewares::RequireRole::new(UserRole::Student)),
                    )
                    .route(
                        web::get()
                            .to(load_roster)
                            // 班级所属教师查看花名册
                            .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                    ),
            ),
    );
}
