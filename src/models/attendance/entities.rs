use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::class_students::entities::ClassStudent;

// 考勤状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present, // 出勤
    Absent,  // 缺勤
}

impl AttendanceStatus {
    pub const PRESENT: &'static str = "Present";
    pub const ABSENT: &'static str = "Absent";

    pub fn from_presence(present: bool) -> Self {
        if present {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => Self::PRESENT,
            AttendanceStatus::Absent => Self::ABSENT,
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PRESENT => Ok(AttendanceStatus::Present),
            Self::ABSENT => Ok(AttendanceStatus::Absent),
            _ => Err(format!("Invalid attendance status: {s}")),
        }
    }
}

/// 班级视图：某班级某一天的考勤（classes/{class_id}/attendance/{date_key}）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceSession {
    pub class_id: String,
    pub date_key: String,
    pub students: BTreeMap<String, bool>,
}

impl AttendanceSession {
    /// 学生在这次考勤中的状态，未被记录时为 None
    pub fn presence_of(&self, student_id: &str) -> Option<bool> {
        self.students.get(student_id).copied()
    }

    pub fn present_count(&self) -> usize {
        self.students.values().filter(|present| **present).count()
    }

    pub fn absent_count(&self) -> usize {
        self.students.len() - self.present_count()
    }
}

/// 学生视图：某学生在某班级某一天的考勤
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub student_id: String,
    pub class_id: String,
    pub date_key: String,
    pub status: AttendanceStatus,
}

/// 教师点名时的花名册条目，`present` 只存在于内存中
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: String,
    pub student_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub present: bool,
}

impl From<ClassStudent> for RosterEntry {
    fn from(student: ClassStudent) -> Self {
        Self {
            id: student.id,
            student_id: student.student_id,
            name: student.name,
            present: false,
        }
    }
}
