use super::ClassStudentService;
use crate::errors::Result;
use crate::models::class_students::entities::{ClassStudent, JoinedClass};

pub async fn list_joined_classes(
    service: &ClassStudentService,
    student_id: &str,
) -> Result<Vec<JoinedClass>> {
    service.storage().list_joined_classes(student_id).await
}

pub async fn list_class_students(
    service: &ClassStudentService,
    class_id: &str,
) -> Result<Vec<ClassStudent>> {
    service.storage().list_class_students(class_id).await
}
