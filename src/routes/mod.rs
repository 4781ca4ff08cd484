pub mod attendance;

pub mod class_students;

pub mod classes;

pub mod students;

pub use attendance::configure_attendance_routes;
pub use class_students::configure_class_students_routes;
pub use classes::configure_classes_routes;
pub use students::configure_students_routes;

use actix_web::{HttpResponse, http::StatusCode};
use tracing::{error, info};

use crate::errors::AttendanceError;
use crate::models::{ApiResponse, ErrorCode};

/// 业务错误转换为统一的 JSON 错误响应
///
/// `failure` 是存储故障时返回给前端的业务码。
pub(crate) fn error_response(err: &AttendanceError, failure: ErrorCode) -> HttpResponse {
    let status = match err {
        AttendanceError::Validation(_) => StatusCode::BAD_REQUEST,
        AttendanceError::Authentication(_) => StatusCode::UNAUTHORIZED,
        AttendanceError::Authorization(_) => StatusCode::FORBIDDEN,
        AttendanceError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let code = match err {
        AttendanceError::NotFound(_) => ErrorCode::ClassNotFound,
        AttendanceError::Authorization(_) => ErrorCode::ClassPermissionDenied,
        e if e.is_store_failure() => failure,
        e => ErrorCode::from_error(e),
    };

    let message = if err.is_store_failure() {
        error!("[{}] {}", err.code(), err.message());
        err.format_simple()
    } else {
        info!("[{}] {}", err.code(), err.message());
        err.message().to_string()
    };

    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (AttendanceError::validation("bad"), StatusCode::BAD_REQUEST),
            (AttendanceError::authentication("who"), StatusCode::UNAUTHORIZED),
            (AttendanceError::authorization("no"), StatusCode::FORBIDDEN),
            (AttendanceError::not_found("gone"), StatusCode::NOT_FOUND),
            (
                AttendanceError::database_operation("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let resp = error_response(&err, ErrorCode::AttendanceSaveFailed);
            assert_eq!(resp.status(), status);
        }
    }

    #[actix_web::test]
    async fn test_requests_without_token_are_rejected() {
        use actix_web::{App, test};

        let app = test::init_service(
            App::new()
                .configure(configure_class_students_routes)
                .configure(configure_attendance_routes)
                .configure(configure_classes_routes)
                .configure(configure_students_routes),
        )
        .await;

        for uri in [
            "/api/v1/classes",
            "/api/v1/classes/discover",
            "/api/v1/classes/c-1/students",
            "/api/v1/classes/c-1/attendance",
            "/api/v1/students/me/attendance",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[actix_web::test]
    async fn test_role_guard_on_authenticated_requests() {
        use crate::config::AppConfig;
        use crate::models::users::entities::Actor;
        use crate::services::test_support::{memory_storage, student, teacher};
        use crate::utils::jwt::JwtUtils;
        use actix_web::{App, test, web};

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(memory_storage().await))
                .configure(configure_class_students_routes)
                .configure(configure_attendance_routes)
                .configure(configure_classes_routes)
                .configure(configure_students_routes),
        )
        .await;

        let secret = &AppConfig::get().jwt.secret;
        let bearer = |actor: Actor| {
            let token =
                JwtUtils::generate_token_with_secret(&actor, secret, chrono::Duration::hours(1))
                    .unwrap();
            ("Authorization", format!("Bearer {token}"))
        };

        let cases = [
            (teacher("t-1"), "/api/v1/classes", StatusCode::OK),
            (student("s-1"), "/api/v1/classes", StatusCode::FORBIDDEN),
            (student("s-1"), "/api/v1/classes/discover", StatusCode::OK),
            (teacher("t-1"), "/api/v1/classes/discover", StatusCode::FORBIDDEN),
            (student("s-1"), "/api/v1/students/me/attendance", StatusCode::OK),
            (teacher("t-1"), "/api/v1/students/me/attendance", StatusCode::FORBIDDEN),
        ];

        for (actor, uri, status) in cases {
            let req = test::TestRequest::get()
                .uri(uri)
                .insert_header(bearer(actor))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status, "{uri}");

            if status == StatusCode::FORBIDDEN {
                let body: serde_json::Value = test::read_body_json(resp).await;
                assert_eq!(body["code"], ErrorCode::Forbidden as i32, "{uri}");
            }
        }
    }
}
