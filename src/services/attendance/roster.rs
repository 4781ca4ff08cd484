use super::{AttendanceService, AttendanceSheet};
use crate::errors::Result;
use crate::models::attendance::entities::RosterEntry;
use crate::models::users::entities::Actor;

pub async fn load_roster(
    service: &AttendanceService,
    actor: &Actor,
    class_id: &str,
) -> Result<Vec<RosterEntry>> {
    let class = service.owned_class(actor, class_id).await?;
    let students = service.storage().list_class_students(&class.id).await?;

    Ok(students.into_iter().map(RosterEntry::from).collect())
}

pub async fn open_sheet(
    service: &AttendanceService,
    actor: &Actor,
    sheet: &mut AttendanceSheet,
    class_id: &str,
) -> Result<()> {
    let roster = load_roster(service, actor, class_id).await?;
    sheet.load(class_id, roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AttendanceError;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::services::attendance::RecorderState;
    use crate::services::test_support::{memory_storage, student, teacher};
    use crate::services::{ClassService, ClassStudentService};

    #[tokio::test]
    async fn test_roster_defaults_to_absent() {
        let storage = memory_storage().await;
        let owner = teacher("t-1");
        let class = ClassService::new(storage.clone())
            .create_class(
                &owner,
                CreateClassRequest {
                    name: "Music".to_string(),
                    description: "Choir".to_string(),
                },
            )
            .await
            .unwrap();
        let members = ClassStudentService::new(storage.clone());
        members.join_class(&student("s-1"), &class.id).await.unwrap();
        members.join_class(&student("s-2"), &class.id).await.unwrap();

        let service = AttendanceService::new(storage);
        let roster = service.load_roster(&owner, &class.id).await.unwrap();
        assert_eq!(roster.len(), 2);
        assert!(roster.iter().all(|e| !e.present));

        let mut sheet = AttendanceSheet::new();
        service.open_sheet(&owner, &mut sheet, &class.id).await.unwrap();
        assert_eq!(sheet.state(), RecorderState::RosterLoaded);
        assert_eq!(sheet.entries().len(), 2);

        let err = service
            .load_roster(&teacher("t-2"), &class.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Authorization(_)));
    }
}
