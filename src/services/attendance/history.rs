use super::AttendanceService;
use crate::errors::Result;
use crate::models::attendance::responses::SessionHistoryEntry;
use crate::models::users::entities::Actor;
use crate::services::stats::aggregate::history_entry;

pub async fn list_sessions(
    service: &AttendanceService,
    actor: &Actor,
    class_id: &str,
) -> Result<Vec<SessionHistoryEntry>> {
    let class = service.owned_class(actor, class_id).await?;
    fetch_history(service, &class.id).await
}

/// 存储层已按日期升序返回
pub(crate) async fn fetch_history(
    service: &AttendanceService,
    class_id: &str,
) -> Result<Vec<SessionHistoryEntry>> {
    let sessions = service.storage().list_attendance_sessions(class_id).await?;
    Ok(sessions.iter().map(history_entry).collect())
}
