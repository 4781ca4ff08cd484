//! 考勤汇总计算
//!
//! 全部为纯函数，每次读取时从考勤数据现算，不保存任何累计值。

use crate::models::attendance::{
    entities::{AttendanceRecord, AttendanceSession, AttendanceStatus},
    responses::{AttendanceSummary, SessionHistoryEntry},
};

/// 学生总览中展示的最近考勤条数
pub const RECENT_RECORD_LIMIT: usize = 5;

/// 出勤率，保留一位小数
///
/// 没有任何考勤时返回字面量 `"0"`（不是 `"0.0"`），前端依赖这个值。
/// 四舍五入用整数运算完成，避免浮点在 .x5 附近的误差。
pub fn percentage(present: u32, total: u32) -> String {
    if total == 0 {
        return "0".to_string();
    }

    let present = u64::from(present);
    let total = u64::from(total);
    let tenths = (present * 2000 + total) / (2 * total);
    format!("{}.{}", tenths / 10, tenths % 10)
}

impl AttendanceSummary {
    pub fn from_counts(present_days: u32, absent_days: u32) -> Self {
        let total_days = present_days + absent_days;
        Self {
            present_days,
            absent_days,
            total_days,
            attendance_percentage: percentage(present_days, total_days),
        }
    }
}

/// 按学生视图汇总
pub fn summarize_records(records: &[AttendanceRecord]) -> AttendanceSummary {
    let present = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count() as u32;
    let absent = records.len() as u32 - present;
    AttendanceSummary::from_counts(present, absent)
}

/// 按班级视图汇总某个学生
///
/// 学生不在某次考勤的映射中时，这一天既不算出勤也不算缺勤。
pub fn summarize_sessions(sessions: &[AttendanceSession], student_id: &str) -> AttendanceSummary {
    let (present, absent) = sessions
        .iter()
        .filter_map(|s| s.presence_of(student_id))
        .fold((0u32, 0u32), |(present, absent), is_present| {
            if is_present {
                (present + 1, absent)
            } else {
                (present, absent + 1)
            }
        });
    AttendanceSummary::from_counts(present, absent)
}

/// 最近的考勤记录，日期降序，同一天按班级 ID 排序
pub fn recent_records(records: &[AttendanceRecord], limit: usize) -> Vec<AttendanceRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        b.date_key
            .cmp(&a.date_key)
            .then_with(|| a.class_id.cmp(&b.class_id))
    });
    sorted.truncate(limit);
    sorted
}

pub fn history_entry(session: &AttendanceSession) -> SessionHistoryEntry {
    SessionHistoryEntry {
        date_key: session.date_key.clone(),
        students: session.students.clone(),
        present_count: session.present_count(),
        absent_count: session.absent_count(),
    }
}
