pub mod attendance;
pub mod class_students;
pub mod classes;
pub mod common;
pub mod users;

pub use common::{ApiResponse, ErrorCode};
