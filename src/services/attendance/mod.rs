pub mod history;
pub mod recorder;
pub mod roster;
pub mod save;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::Result;
use crate::models::attendance::{
    entities::RosterEntry,
    responses::{SaveAttendanceResponse, SessionHistoryEntry},
};
use crate::models::classes::entities::Class;
use crate::models::users::entities::Actor;
use crate::services::ClassService;
use crate::storage::Storage;

pub use recorder::{AttendanceSheet, RecorderState};

pub struct AttendanceService {
    storage: Arc<dyn Storage>,
}

impl AttendanceService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) async fn owned_class(&self, actor: &Actor, class_id: &str) -> Result<Class> {
        ClassService::new(self.storage.clone())
            .get_owned_class(actor, class_id)
            .await
    }

    // 载入点名花名册，所有人默认缺勤
    pub async fn load_roster(&self, actor: &Actor, class_id: &str) -> Result<Vec<RosterEntry>> {
        roster::load_roster(self, actor, class_id).await
    }

    // 载入花名册到点名表
    pub async fn open_sheet(
        &self,
        actor: &Actor,
        sheet: &mut AttendanceSheet,
        class_id: &str,
    ) -> Result<()> {
        roster::open_sheet(self, actor, sheet, class_id).await
    }

    // 以当天 UTC 日期保存考勤
    pub async fn save_session(
        &self,
        actor: &Actor,
        class_id: &str,
        roster: &[RosterEntry],
    ) -> Result<SaveAttendanceResponse> {
        save::save_session(self, actor, class_id, roster).await
    }

    // 保存指定日期的考勤
    pub async fn save_session_on(
        &self,
        actor: &Actor,
        class_id: &str,
        roster: &[RosterEntry],
        date: NaiveDate,
    ) -> Result<SaveAttendanceResponse> {
        save::save_session_on(self, actor, class_id, roster, date).await
    }

    // 保存点名表
    pub async fn save_sheet(
        &self,
        actor: &Actor,
        sheet: &mut AttendanceSheet,
    ) -> Result<SaveAttendanceResponse> {
        save::save_sheet(self, actor, sheet).await
    }

    // 班级历史考勤，按日期升序
    pub async fn list_sessions(
        &self,
        actor: &Actor,
        class_id: &str,
    ) -> Result<Vec<SessionHistoryEntry>> {
        history::list_sessions(self, actor, class_id).await
    }
}
