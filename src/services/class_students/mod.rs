pub mod join;
pub mod list;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::class_students::entities::{ClassStudent, JoinOutcome, JoinedClass};
use crate::models::users::entities::Actor;
use crate::storage::Storage;

pub struct ClassStudentService {
    storage: Arc<dyn Storage>,
}

impl ClassStudentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 学生加入班级（按班级 ID 幂等）
    pub async fn join_class(&self, actor: &Actor, class_id: &str) -> Result<JoinOutcome> {
        join::join_class(self, actor, class_id).await
    }

    // 学生已加入的班级
    pub async fn list_joined_classes(&self, student_id: &str) -> Result<Vec<JoinedClass>> {
        list::list_joined_classes(self, student_id).await
    }

    // 班级花名册
    pub async fn list_class_students(&self, class_id: &str) -> Result<Vec<ClassStudent>> {
        list::list_class_students(self, class_id).await
    }
}
