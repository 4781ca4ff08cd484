use serde::Serialize;
use std::collections::BTreeMap;

use super::entities::{AttendanceRecord, RosterEntry};

/// 考勤汇总（每次读取时现算，不落库）
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttendanceSummary {
    pub present_days: u32,
    pub absent_days: u32,
    pub total_days: u32,
    pub attendance_percentage: String,
}

/// 学生总览：总体汇总 + 最近考勤
#[derive(Debug, Clone, Serialize)]
pub struct StudentOverviewResponse {
    pub summary: AttendanceSummary,
    pub recent: Vec<AttendanceRecord>,
}

/// 学生在单个班级的考勤汇总
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClassAttendanceSummary {
    pub class_id: String,
    pub class_name: String,
    #[serde(flatten)]
    pub summary: AttendanceSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassAttendanceSummaryListResponse {
    pub items: Vec<ClassAttendanceSummary>,
}

/// 班级历史考勤中的一天
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionHistoryEntry {
    pub date_key: String,
    pub students: BTreeMap<String, bool>,
    pub present_count: usize,
    pub absent_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionHistoryResponse {
    pub class_id: String,
    pub items: Vec<SessionHistoryEntry>,
}

/// 点名花名册响应
#[derive(Debug, Clone, Serialize)]
pub struct RosterResponse {
    pub class_id: String,
    pub items: Vec<RosterEntry>,
}

/// 保存考勤响应，附带保存后重新拉取的历史
///
/// 保存已提交但历史拉取失败时 `history` 为 `None`。
#[derive(Debug, Clone, Serialize)]
pub struct SaveAttendanceResponse {
    pub class_id: String,
    pub date_key: String,
    pub history: Option<Vec<SessionHistoryEntry>>,
}
