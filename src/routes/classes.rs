use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use super::error_response;
use crate::middlewares::{self, RequireJWT};
use crate::models::classes::{
    requests::CreateClassRequest,
    responses::{ClassListResponse, JoinableClassListResponse},
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::ClassService;
use crate::storage::Storage;

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireJWT::extract_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return Ok(error_response(&e, ErrorCode::Unauthorized)),
    };

    let service = ClassService::new(storage.get_ref().clone());
    match service.list_classes_for_teacher(&actor.id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassListResponse { items },
            "Class list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}

pub async fn create_class(
    req: HttpRequest,
    storage: web::Data<Arc<dyn Storage>>,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireJWT::extract_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return Ok(error_response(&e, ErrorCode::Unauthorized)),
    };

    let service = ClassService::new(storage.get_ref().clone());
    match service.create_class(&actor, class_data.into_inner()).await {
        Ok(class) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(class, "Class created successfully"))),
        Err(e) => Ok(error_response(&e, ErrorCode::ClassCreationFailed)),
    }
}

pub async fn discover_classes(
    req: HttpRequest,
    storage: web::Data<Arc<dyn Storage>>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireJWT::extract_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return Ok(error_response(&e, ErrorCode::Unauthorized)),
    };

    let service = ClassService::new(storage.get_ref().clone());
    match service.list_joinable_classes(&actor).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            JoinableClassListResponse { items },
            "Class list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                // 教师查询和创建自己的班级
                web::resource("")
                    .route(
                        web::get()
                            .to(list_classes)
                            .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                    )
                    .route(
                        web::post()
                            .to(create_class)
                            .wrap(middlewares::RequireRole::new(UserRole::Teacher)),
                    ),
            )
            .service(
                // 学生浏览全部班级，附带是否已加入
                web::resource("/discover").route(
                    web::get()
                        .to(discover_classes)
                        .wrap(middlewares::RequireRole::new(UserRole::Student)),
                ),
            ),
    );
}
