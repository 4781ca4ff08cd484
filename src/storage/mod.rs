use std::sync::Arc;

use crate::models::{
    attendance::entities::{AttendanceRecord, AttendanceSession},
    class_students::entities::{ClassStudent, JoinedClass},
    classes::{entities::Class, requests::NewClass},
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储层接口
///
/// 对应文档型存储的 get / list / create / put 操作，按业务集合展开成具体方法。
/// 需要同时落两份视图的写操作（加入班级、保存考勤）以批量方法提供，由实现保证原子性。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 班级管理方法
    // 创建班级（存储生成 ID）
    async fn create_class(&self, class: NewClass) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: &str) -> Result<Option<Class>>;
    // 列出班级，teacher_id 为 None 时返回全部
    async fn list_classes(&self, teacher_id: Option<&str>) -> Result<Vec<Class>>;

    /// 班级成员方法
    // 列出班级花名册（classes/{class_id}/students）
    async fn list_class_students(&self, class_id: &str) -> Result<Vec<ClassStudent>>;
    // 列出学生已加入的班级（students/{student_id}/joinedClasses）
    async fn list_joined_classes(&self, student_id: &str) -> Result<Vec<JoinedClass>>;
    // 同时写入花名册条目与已加入条目；已加入时返回已有记录，只补写缺失的花名册条目
    async fn enroll_student(
        &self,
        class: &Class,
        student_id: &str,
        student_name: &str,
    ) -> Result<(JoinedClass, bool)>;

    /// 考勤方法
    // 获取班级某天的考勤
    async fn get_attendance_session(
        &self,
        class_id: &str,
        date_key: &str,
    ) -> Result<Option<AttendanceSession>>;
    // 列出班级全部考勤（classes/{class_id}/attendance）
    async fn list_attendance_sessions(&self, class_id: &str) -> Result<Vec<AttendanceSession>>;
    // 列出学生全部考勤记录（students/{student_id}/attendance）
    async fn list_attendance_records(&self, student_id: &str) -> Result<Vec<AttendanceRecord>>;
    // 在同一事务中覆盖写入班级考勤与每个学生的记录
    async fn commit_attendance(
        &self,
        session: &AttendanceSession,
        records: &[AttendanceRecord],
    ) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
