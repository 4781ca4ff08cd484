use serde::Deserialize;

// 创建班级请求
//
// 班级归属于当前登录的教师，请求体中不接受 teacher_id
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

// 班级存储写入参数（用于存储层）
#[derive(Debug, Clone)]
pub struct NewClass {
    pub teacher_id: String,
    pub name: String,
    pub description: String,
}
