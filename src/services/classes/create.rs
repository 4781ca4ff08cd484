use tracing::info;

use super::ClassService;
use crate::errors::{AttendanceError, Result};
use crate::models::classes::{
    entities::Class,
    requests::{CreateClassRequest, NewClass},
};
use crate::models::users::entities::Actor;
use crate::utils::validate::validate_class_fields;

pub async fn create_class(
    service: &ClassService,
    actor: &Actor,
    req: CreateClassRequest,
) -> Result<Class> {
    // 权限校验
    if !actor.is_teacher() {
        return Err(AttendanceError::authorization(
            "Only teachers can create classes",
        ));
    }

    validate_class_fields(&req.name, &req.description)?;

    // 班级名称不做去重
    let class = service
        .storage()
        .create_class(NewClass {
            teacher_id: actor.id.clone(),
            name: req.name,
            description: req.description,
        })
        .await?;

    info!("Class {} ({}) created by {}", class.name, class.id, actor.id);
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{memory_storage, student, teacher};

    fn request(name: &str, description: &str) -> CreateClassRequest {
        CreateClassRequest {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_created_class_is_retrievable() {
        let service = ClassService::new(memory_storage().await);
        let owner = teacher("t-1");

        let created = service
            .create_class(&owner, request(" Physics ", "Mechanics"))
            .await
            .unwrap();
        assert_eq!(created.name, " Physics ");
        assert_eq!(created.teacher_id, "t-1");

        let fetched = service.get_class(&created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, " Physics ");
        assert_eq!(fetched.description, "Mechanics");
        assert_eq!(fetched.teacher_id, "t-1");
    }

    #[tokio::test]
    async fn test_empty_fields_rejected_without_write() {
        let service = ClassService::new(memory_storage().await);
        let owner = teacher("t-1");

        let err = service
            .create_class(&owner, request("Physics", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Validation(_)));
        assert!(service.list_all_classes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_any_non_empty_fields_are_stored_as_given() {
        let service = ClassService::new(memory_storage().await);
        let owner = teacher("t-1");
        let long_name = "n".repeat(150);

        for (name, description) in [("   ", "\t"), (long_name.as_str(), "Mechanics")] {
            let created = service
                .create_class(&owner, request(name, description))
                .await
                .unwrap();
            let fetched = service.get_class(&created.id).await.unwrap();
            assert_eq!(fetched.name, name);
            assert_eq!(fetched.description, description);
        }
    }

    #[tokio::test]
    async fn test_student_cannot_create_class() {
        let service = ClassService::new(memory_storage().await);

        let err = service
            .create_class(&student("s-1"), request("Physics", "Mechanics"))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_duplicate_names_allowed() {
        let service = ClassService::new(memory_storage().await);
        let owner = teacher("t-1");

        let first = service
            .create_class(&owner, request("Physics", "Morning"))
            .await
            .unwrap();
        let second = service
            .create_class(&owner, request("Physics", "Evening"))
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
    }
}
