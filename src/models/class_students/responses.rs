use super::entities::JoinedClass;
use serde::Serialize;

// 加入班级响应
#[derive(Debug, Serialize)]
pub struct JoinClassResponse {
    pub joined_class: JoinedClass,
    pub already_joined: bool,
}
