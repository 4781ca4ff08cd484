//! 学生考勤记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub class_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub date_key: String,
    pub status: String,
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
    pub fn into_record(
        self,
    ) -> crate::errors::Result<crate::models::attendance::entities::AttendanceRecord> {
        use crate::errors::AttendanceError;
        use crate::models::attendance::entities::{AttendanceRecord, AttendanceStatus};

        let status = self
            .status
            .parse::<AttendanceStatus>()
            .map_err(AttendanceError::serialization)?;
        Ok(AttendanceRecord {
            student_id: self.student_id,
            class_id: self.class_id,
            date_key: self.date_key,
            status,
        })
    }
}
