//! 班级考勤实体
//!
//! 每个班级每天一行，`students` 以 JSON 文本保存 `student_id -> bool`。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub class_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub date_key: String,
    #[sea_orm(column_type = "Text")]
    pub students: String,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_session(
        self,
    ) -> crate::errors::Result<crate::models::attendance::entities::AttendanceSession> {
        use crate::models::attendance::entities::AttendanceSession;

        let students = serde_json::from_str(&self.students)?;
        Ok(AttendanceSession {
            class_id: self.class_id,
            date_key: self.date_key,
            students,
        })
    }
}
