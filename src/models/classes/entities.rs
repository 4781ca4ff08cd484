use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Class {
    // 班级ID
    pub id: String,
    // 班级名称
    pub name: String,
    // 班级描述
    pub description: String,
    // 教师ID，创建后不再变更
    pub teacher_id: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生浏览班级时的视图，附带是否已加入
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinableClass {
    #[serde(flatten)]
    pub class: Class,
    pub already_joined: bool,
}
