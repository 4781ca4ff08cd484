use serde::{Deserialize, Serialize};

use crate::errors::AttendanceError;

/// API 响应码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1500,

    // 班级相关 2xxx
    ClassNotFound = 2000,
    ClassCreationFailed = 2001,
    ClassPermissionDenied = 2002,
    ClassJoinFailed = 2003,

    // 考勤相关 3xxx
    AttendanceSaveFailed = 3000,
    AttendanceQueryFailed = 3001,
}

impl ErrorCode {
    /// 将业务错误映射为通用响应码
    pub fn from_error(err: &AttendanceError) -> Self {
        match err {
            AttendanceError::Validation(_) => ErrorCode::BadRequest,
            AttendanceError::Authentication(_) => ErrorCode::Unauthorized,
            AttendanceError::Authorization(_) => ErrorCode::Forbidden,
            AttendanceError::NotFound(_) => ErrorCode::NotFound,
            _ => ErrorCode::InternalServerError,
        }
    }
}
