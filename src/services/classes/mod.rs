pub mod create;
pub mod get;
pub mod list;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::classes::{
    entities::{Class, JoinableClass},
    requests::CreateClassRequest,
};
use crate::models::users::entities::Actor;
use crate::storage::Storage;

pub struct ClassService {
    storage: Arc<dyn Storage>,
}

impl ClassService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 教师创建班级
    pub async fn create_class(&self, actor: &Actor, req: CreateClassRequest) -> Result<Class> {
        create::create_class(self, actor, req).await
    }

    // 根据班级 ID 获取班级
    pub async fn get_class(&self, class_id: &str) -> Result<Class> {
        get::get_class(self, class_id).await
    }

    // 获取当前教师拥有的班级，非本人或不存在时报错
    pub async fn get_owned_class(&self, actor: &Actor, class_id: &str) -> Result<Class> {
        get::get_owned_class(self, actor, class_id).await
    }

    // 教师名下的班级列表
    pub async fn list_classes_for_teacher(&self, teacher_id: &str) -> Result<Vec<Class>> {
        list::list_classes_for_teacher(self, teacher_id).await
    }

    // 全部班级（学生浏览）
    pub async fn list_all_classes(&self) -> Result<Vec<Class>> {
        list::list_all_classes(self).await
    }

    // 全部班级并标记当前学生是否已加入
    pub async fn list_joinable_classes(&self, actor: &Actor) -> Result<Vec<JoinableClass>> {
        list::list_joinable_classes(self, actor).await
    }
}
