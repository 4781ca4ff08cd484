use super::ClassService;
use crate::errors::{AttendanceError, Result};
use crate::models::classes::entities::Class;
use crate::models::users::entities::Actor;

pub async fn get_class(service: &ClassService, class_id: &str) -> Result<Class> {
    service
        .storage()
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| AttendanceError::not_found(format!("Class not found: {class_id}")))
}

/// 班级只属于创建它的教师
pub async fn get_owned_class(service: &ClassService, actor: &Actor, class_id: &str) -> Result<Class> {
    if !actor.is_teacher() {
        return Err(AttendanceError::authorization(
            "Only teachers can manage class attendance",
        ));
    }

    let class = get_class(service, class_id).await?;
    if class.teacher_id != actor.id {
        return Err(AttendanceError::authorization(format!(
            "Class {class_id} does not belong to the current teacher"
        )));
    }

    Ok(class)
}
