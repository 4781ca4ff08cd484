//! 班级成员存储操作
//!
//! 花名册（class_students）与学生已加入班级（joined_classes）是同一事实的两份视图，
//! 写入时必须在同一事务内完成。

use super::SeaOrmStorage;
use crate::entity::class_students::{
    ActiveModel as ClassStudentActiveModel, Column as ClassStudentColumn,
    Entity as ClassStudents,
};
use crate::entity::joined_classes::{
    ActiveModel as JoinedClassActiveModel, Column as JoinedClassColumn, Entity as JoinedClasses,
    Model as JoinedClassModel,
};
use crate::errors::{AttendanceError, Result};
use crate::models::{
    class_students::entities::{ClassStudent, JoinedClass},
    classes::entities::Class,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait,
};
use tracing::warn;

impl SeaOrmStorage {
    /// 列出班级花名册
    pub async fn list_class_students_impl(&self, class_id: &str) -> Result<Vec<ClassStudent>> {
        let students = ClassStudents::find()
            .filter(ClassStudentColumn::ClassId.eq(class_id))
            .order_by_asc(ClassStudentColumn::JoinedAt)
            .order_by_asc(ClassStudentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询班级花名册失败: {e}")))?;

        Ok(students
            .into_iter()
            .map(|m| m.into_class_student())
            .collect())
    }

    /// 列出学生已加入的班级
    pub async fn list_joined_classes_impl(&self, student_id: &str) -> Result<Vec<JoinedClass>> {
        let joined = JoinedClasses::find()
            .filter(JoinedClassColumn::StudentId.eq(student_id))
            .order_by_asc(JoinedClassColumn::JoinedAt)
            .order_by_asc(JoinedClassColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                AttendanceError::database_operation(format!("查询学生已加入班级失败: {e}"))
            })?;

        Ok(joined.into_iter().map(|m| m.into_joined_class()).collect())
    }

    /// 获取学生在某班级的已加入记录
    pub async fn get_joined_class_impl(
        &self,
        student_id: &str,
        class_id: &str,
    ) -> Result<Option<JoinedClass>> {
        let result = JoinedClasses::find()
            .filter(
                Condition::all()
                    .add(JoinedClassColumn::StudentId.eq(student_id))
                    .add(JoinedClassColumn::ClassId.eq(class_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("查询已加入班级失败: {e}")))?;

        Ok(result.map(|m| m.into_joined_class()))
    }

    /// 学生加入班级
    ///
    /// 返回 (已加入记录, 是否为本次新加入)。两份视图中缺哪份补哪份，
    /// 因此历史上只写了一半的数据会在下一次加入时被补齐。
    /// 并发加入撞上唯一索引时，以已提交的记录为准。
    pub async fn enroll_student_impl(
        &self,
        class: &Class,
        student_id: &str,
        student_name: &str,
    ) -> Result<(JoinedClass, bool)> {
        match self.enroll_in_txn(class, student_id, student_name).await {
            Ok((joined, is_new)) => Ok((joined.into_joined_class(), is_new)),
            Err(e) => self.settle_enroll_error(e, &class.id, student_id).await,
        }
    }

    async fn enroll_in_txn(
        &self,
        class: &Class,
        student_id: &str,
        student_name: &str,
    ) -> std::result::Result<(JoinedClassModel, bool), DbErr> {
        let txn = self.db.begin().await?;

        let existing_joined = JoinedClasses::find()
            .filter(
                Condition::all()
                    .add(JoinedClassColumn::StudentId.eq(student_id))
                    .add(JoinedClassColumn::ClassId.eq(class.id.as_str())),
            )
            .one(&txn)
            .await?;

        let existing_roster = ClassStudents::find()
            .filter(
                Condition::all()
                    .add(ClassStudentColumn::ClassId.eq(class.id.as_str()))
                    .add(ClassStudentColumn::StudentId.eq(student_id)),
            )
            .one(&txn)
            .await?;

        let now = chrono::Utc::now().timestamp();

        if existing_roster.is_none() {
            if existing_joined.is_some() {
                warn!(
                    "Roster entry missing for student {} in class {}, repairing",
                    student_id, class.id
                );
            }
            ClassStudentActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                class_id: Set(class.id.clone()),
                student_id: Set(student_id.to_string()),
                name: Set(student_name.to_string()),
                joined_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }

        let (joined, is_new) = match existing_joined {
            Some(joined) => (joined, false),
            None => {
                let joined = JoinedClassActiveModel {
                    id: Set(uuid::Uuid::new_v4().to_string()),
                    student_id: Set(student_id.to_string()),
                    class_id: Set(class.id.clone()),
                    class_name: Set(class.name.clone()),
                    joined_at: Set(now),
                }
                .insert(&txn)
                .await?;
                (joined, true)
            }
        };

        txn.commit().await?;
        Ok((joined, is_new))
    }

    /// 加入失败的收尾处理
    ///
    /// 唯一索引冲突说明另一个请求已经完成了加入（事务已随 drop 回滚），
    /// 重新读取已提交的记录并按"已加入"返回。
    async fn settle_enroll_error(
        &self,
        err: DbErr,
        class_id: &str,
        student_id: &str,
    ) -> Result<(JoinedClass, bool)> {
        if !is_unique_violation(&err) {
            return Err(AttendanceError::database_operation(format!(
                "加入班级失败: {err}"
            )));
        }

        warn!(
            "Concurrent join detected for student {} in class {}, re-reading",
            student_id, class_id
        );
        match self.get_joined_class_impl(student_id, class_id).await? {
            Some(joined) => Ok((joined, false)),
            None => Err(AttendanceError::database_operation(format!(
                "加入班级失败: {err}"
            ))),
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::requests::NewClass;
    use crate::storage::Storage;

    async fn setup() -> (SeaOrmStorage, Class) {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let class = storage
            .create_class(NewClass {
                teacher_id: "t-1".to_string(),
                name: "Chemistry".to_string(),
                description: "Bonds".to_string(),
            })
            .await
            .unwrap();
        (storage, class)
    }

    async fn duplicate_joined_insert(storage: &SeaOrmStorage, class: &Class) -> DbErr {
        JoinedClassActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            student_id: Set("s-1".to_string()),
            class_id: Set(class.id.clone()),
            class_name: Set(class.name.clone()),
            joined_at: Set(0),
        }
        .insert(&storage.db)
        .await
        .unwrap_err()
    }

    #[tokio::test]
    async fn test_duplicate_join_row_is_unique_violation() {
        let (storage, class) = setup().await;
        storage
            .enroll_student_impl(&class, "s-1", "Alice")
            .await
            .unwrap();

        let err = duplicate_joined_insert(&storage, &class).await;
        assert!(is_unique_violation(&err));
        assert!(!is_unique_violation(&DbErr::Custom("boom".to_string())));
    }

    #[tokio::test]
    async fn test_conflicting_join_resolves_to_existing_entry() {
        let (storage, class) = setup().await;
        let (first, is_new) = storage
            .enroll_student_impl(&class, "s-1", "Alice")
            .await
            .unwrap();
        assert!(is_new);

        let err = duplicate_joined_insert(&storage, &class).await;
        let (settled, is_new) = storage
            .settle_enroll_error(err, &class.id, "s-1")
            .await
            .unwrap();
        assert!(!is_new);
        assert_eq!(settled.id, first.id);
        assert_eq!(storage.list_joined_classes_impl("s-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_other_enroll_errors_are_database_failures() {
        let (storage, class) = setup().await;
        let err = storage
            .settle_enroll_error(DbErr::Custom("boom".to_string()), &class.id, "s-1")
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::DatabaseOperation(_)));
    }
}
