use crate::errors::{AttendanceError, Result};

/// 校验班级名称与描述
///
/// 只要求两者非空，内容按原样保存。
pub fn validate_class_fields(name: &str, description: &str) -> Result<()> {
    if name.is_empty() || description.is_empty() {
        return Err(AttendanceError::validation(
            "Please fill in both the class name and description",
        ));
    }
    Ok(())
}

/// 校验路径中的 ID（非空，无空白）
pub fn validate_id(field: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(AttendanceError::validation(format!("Invalid {field}")));
    }
    Ok(())
}
