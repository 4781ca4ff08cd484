pub mod attendance;
pub mod class_students;
pub mod classes;
pub mod stats;

pub use attendance::AttendanceService;
pub use class_students::ClassStudentService;
pub use classes::ClassService;
pub use stats::StatsService;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::models::users::entities::{Actor, UserRole};
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    pub async fn memory_storage() -> Arc<dyn Storage> {
        Arc::new(
            SeaOrmStorage::in_memory()
                .await
                .expect("in-memory storage should initialise"),
        )
    }

    pub fn teacher(id: &str) -> Actor {
        Actor::new(id, format!("Teacher {id}"), UserRole::Teacher)
    }

    pub fn student(id: &str) -> Actor {
        Actor::new(id, format!("Student {id}"), UserRole::Student)
    }
}
