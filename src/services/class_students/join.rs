use tracing::{debug, info};

use super::ClassStudentService;
use crate::errors::{AttendanceError, Result};
use crate::models::class_students::entities::JoinOutcome;
use crate::models::users::entities::Actor;

pub async fn join_class(
    service: &ClassStudentService,
    actor: &Actor,
    class_id: &str,
) -> Result<JoinOutcome> {
    if !actor.is_student() {
        return Err(AttendanceError::authorization("Only students can join classes"));
    }

    let storage = service.storage();

    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| AttendanceError::not_found(format!("Class not found: {class_id}")))?;

    // 每次都走加入事务，缺失的花名册条目会在这里补齐
    // 班级名称取自存储中的班级，而不是调用方
    let (joined, is_new) = storage
        .enroll_student(&class, &actor.id, &actor.display_name)
        .await?;

    if is_new {
        info!("Student {} joined class {} ({})", actor.id, class.name, class.id);
        Ok(JoinOutcome::Joined(joined))
    } else {
        debug!("Student {} already joined class {}", actor.id, class.id);
        Ok(JoinOutcome::AlreadyJoined(joined))
    }
}
