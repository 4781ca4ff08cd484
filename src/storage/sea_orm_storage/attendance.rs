//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance_records::{
    ActiveModel as RecordActiveModel, Column as RecordColumn, Entity as AttendanceRecords,
};
use crate::entity::attendance_sessions::{
    ActiveModel as SessionActiveModel, Column as SessionColumn, Entity as AttendanceSessions,
};
use crate::errors::{AttendanceError, Result};
use crate::models::attendance::entities::{AttendanceRecord, AttendanceSession};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 获取班级某天的考勤
    pub async fn get_attendance_session_impl(
        &self,
        class_id: &str,
        date_key: &str,
    ) -> Result<Option<AttendanceSession>> {
        let result = AttendanceSessions::find_by_id((class_id.to_string(), date_key.to_string()))
            .one(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询班级考勤失败: {e}")))?;

        result.map(|m| m.into_session()).transpose()
    }

    /// 列出班级全部考勤，按日期升序
    pub async fn list_attendance_sessions_impl(
        &self,
        class_id: &str,
    ) -> Result<Vec<AttendanceSession>> {
        let sessions = AttendanceSessions::find()
            .filter(SessionColumn::ClassId.eq(class_id))
            .order_by_asc(SessionColumn::DateKey)
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询班级考勤列表失败: {e}")))?;

        sessions.into_iter().map(|m| m.into_session()).collect()
    }

    /// 列出学生全部考勤记录，按日期降序
    pub async fn list_attendance_records_impl(
        &self,
        student_id: &str,
    ) -> Result<Vec<AttendanceRecord>> {
        let records = AttendanceRecords::find()
            .filter(RecordColumn::StudentId.eq(student_id))
            .order_by_desc(RecordColumn::DateKey)
            .order_by_asc(RecordColumn::ClassId)
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询学生考勤记录失败: {e}")))?;

        records.into_iter().map(|m| m.into_record()).collect()
    }

    /// 覆盖写入班级考勤与学生记录
    ///
    /// 班级视图整行替换（不与旧的学生映射合并），学生视图逐条覆盖，全部在一个事务中提交。
    pub async fn commit_attendance_impl(
        &self,
        session: &AttendanceSession,
        records: &[AttendanceRecord],
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let students = serde_json::to_string(&session.students)?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AttendanceError::database_operation(format!("开启事务失败: {e}")))?;

        AttendanceSessions::insert(SessionActiveModel {
            class_id: Set(session.class_id.clone()),
            date_key: Set(session.date_key.clone()),
            students: Set(students),
            updated_at: Set(now),
        })
        .on_conflict(
            OnConflict::columns([SessionColumn::ClassId, SessionColumn::DateKey])
                .update_columns([SessionColumn::Students, SessionColumn::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(&txn)
        .await
        .map_err(|e| AttendanceError::database_operation(format!("写入班级考勤失败: {e}")))?;

        for record in records {
            AttendanceRecords::insert(RecordActiveModel {
                student_id: Set(record.student_id.clone()),
                class_id: Set(record.class_id.clone()),
                date_key: Set(record.date_key.clone()),
                status: Set(record.status.to_string()),
                updated_at: Set(now),
            })
            .on_conflict(
                OnConflict::columns([
                    RecordColumn::StudentId,
                    RecordColumn::ClassId,
                    RecordColumn::DateKey,
                ])
                .update_columns([RecordColumn::Status, RecordColumn::UpdatedAt])
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await
            .map_err(|e| {
                AttendanceError::database_operation(format!(
                    "写入学生 {} 考勤记录失败: {e}",
                    record.student_id
                ))
            })?;
        }

        txn.commit()
            .await
            .map_err(|e| AttendanceError::database_operation(format!("提交考勤失败: {e}")))?;

        Ok(())
    }
}
