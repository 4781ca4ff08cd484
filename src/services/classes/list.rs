use std::collections::HashSet;

use super::ClassService;
use crate::errors::{AttendanceError, Result};
use crate::models::classes::entities::{Class, JoinableClass};
use crate::models::users::entities::Actor;

pub async fn list_classes_for_teacher(service: &ClassService, teacher_id: &str) -> Result<Vec<Class>> {
    service.storage().list_classes(Some(teacher_id)).await
}

pub async fn list_all_classes(service: &ClassService) -> Result<Vec<Class>> {
    service.storage().list_classes(None).await
}

pub async fn list_joinable_classes(
    service: &ClassService,
    actor: &Actor,
) -> Result<Vec<JoinableClass>> {
    if !actor.is_student() {
        return Err(AttendanceError::authorization(
            "Only students can browse classes to join",
        ));
    }

    let storage = service.storage();
    let classes = storage.list_classes(None).await?;
    let joined: HashSet<String> = storage
        .list_joined_classes(&actor.id)
        .await?
        .into_iter()
        .map(|j| j.class_id)
        .collect();

    Ok(classes
        .into_iter()
        .map(|class| {
            let already_joined = joined.contains(&class.id);
            JoinableClass {
                class,
                already_joined,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::services::ClassStudentService;
    use crate::services::test_support::{memory_storage, student, teacher};

    fn request(name: &str) -> CreateClassRequest {
        CreateClassRequest {
            name: name.to_string(),
            description: format!("{name} description"),
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_teacher() {
        let service = ClassService::new(memory_storage().await);
        service.create_class(&teacher("t-1"), request("A")).await.unwrap();
        service.create_class(&teacher("t-1"), request("B")).await.unwrap();
        service.create_class(&teacher("t-2"), request("C")).await.unwrap();

        let own = service.list_classes_for_teacher("t-1").await.unwrap();
        assert_eq!(own.len(), 2);
        assert!(own.iter().all(|c| c.teacher_id == "t-1"));

        assert_eq!(service.list_all_classes().await.unwrap().len(), 3);
        assert!(service.list_classes_for_teacher("t-3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_joinable_marks_joined_classes() {
        let storage = memory_storage().await;
        let classes = ClassService::new(storage.clone());
        let members = ClassStudentService::new(storage);
        let alice = student("s-1");

        let math = classes.create_class(&teacher("t-1"), request("Math")).await.unwrap();
        let art = classes.create_class(&teacher("t-2"), request("Art")).await.unwrap();
        members.join_class(&alice, &math.id).await.unwrap();

        let joinable = classes.list_joinable_classes(&alice).await.unwrap();
        assert_eq!(joinable.len(), 2);
        for entry in joinable {
            assert_eq!(entry.already_joined, entry.class.id == math.id);
            if entry.class.id == art.id {
                assert!(!entry.already_joined);
            }
        }
    }

    #[tokio::test]
    async fn test_teacher_cannot_browse_joinable() {
        let service = ClassService::new(memory_storage().await);
        let err = service
            .list_joinable_classes(&teacher("t-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Authorization(_)));
    }
}
