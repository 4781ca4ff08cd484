use serde::Deserialize;

use super::entities::RosterEntry;

// 保存考勤请求
//
// entries 为教师在前端修改过出勤状态的花名册
#[derive(Debug, Clone, Deserialize)]
pub struct SaveAttendanceRequest {
    pub entries: Vec<RosterEntry>,
}
