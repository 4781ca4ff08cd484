pub mod aggregate;
pub mod student;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::attendance::responses::{ClassAttendanceSummary, StudentOverviewResponse};
use crate::storage::Storage;

pub use aggregate::{percentage, summarize_records, summarize_sessions};

pub struct StatsService {
    storage: Arc<dyn Storage>,
}

impl StatsService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    // 学生总体考勤与最近记录
    pub async fn student_overview(&self, student_id: &str) -> Result<StudentOverviewResponse> {
        student::student_overview(self, student_id).await
    }

    // 学生在各个已加入班级的考勤
    pub async fn student_class_summaries(
        &self,
        student_id: &str,
    ) -> Result<Vec<ClassAttendanceSummary>> {
        student::student_class_summaries(self, student_id).await
    }
}
