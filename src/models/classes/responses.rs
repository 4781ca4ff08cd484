use super::entities::{Class, JoinableClass};
use serde::Serialize;

// 班级列表响应
#[derive(Debug, Serialize)]
pub struct ClassListResponse {
    pub items: Vec<Class>,
}

// 可加入班级列表响应
#[derive(Debug, Serialize)]
pub struct JoinableClassListResponse {
    pub items: Vec<JoinableClass>,
}
