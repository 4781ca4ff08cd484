use serde::{Deserialize, Serialize};

// 班级花名册条目（classes/{class_id}/students）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassStudent {
    pub id: String,
    pub class_id: String,
    pub student_id: String,
    pub name: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

// 学生已加入班级条目（students/{student_id}/joinedClasses）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinedClass {
    pub id: String,
    pub student_id: String,
    pub class_id: String,
    pub class_name: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

/// 加入班级的结果
#[derive(Debug, Clone, PartialEq)]
pub enum JoinOutcome {
    /// 新写入了花名册与已加入记录
    Joined(JoinedClass),
    /// 已经加入过，未做任何写入
    AlreadyJoined(JoinedClass),
}

impl JoinOutcome {
    pub fn joined_class(&self) -> &JoinedClass {
        match self {
            JoinOutcome::Joined(joined) | JoinOutcome::AlreadyJoined(joined) => joined,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, JoinOutcome::Joined(_))
    }
}
