use super::StatsService;
use super::aggregate::{RECENT_RECORD_LIMIT, recent_records, summarize_records, summarize_sessions};
use crate::errors::Result;
use crate::models::attendance::responses::{ClassAttendanceSummary, StudentOverviewResponse};

/// 总览基于学生视图（每条记录一个班级一天）
pub async fn student_overview(
    service: &StatsService,
    student_id: &str,
) -> Result<StudentOverviewResponse> {
    let records = service.storage().list_attendance_records(student_id).await?;

    Ok(StudentOverviewResponse {
        summary: summarize_records(&records),
        recent: recent_records(&records, RECENT_RECORD_LIMIT),
    })
}

/// 分班级汇总基于班级视图
pub async fn student_class_summaries(
    service: &StatsService,
    student_id: &str,
) -> Result<Vec<ClassAttendanceSummary>> {
    let storage = service.storage();
    let joined = storage.list_joined_classes(student_id).await?;

    let mut summaries = Vec::with_capacity(joined.len());
    for class in joined {
        let sessions = storage.list_attendance_sessions(&class.class_id).await?;
        summaries.push(ClassAttendanceSummary {
            summary: summarize_sessions(&sessions, student_id),
            class_id: class.class_id,
            class_name: class.class_name,
        });
    }

    Ok(summaries)
}
