use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use super::{AttendanceService, AttendanceSheet, history::fetch_history};
use crate::errors::{AttendanceError, Result};
use crate::models::attendance::{
    entities::{AttendanceRecord, AttendanceSession, AttendanceStatus, RosterEntry},
    responses::SaveAttendanceResponse,
};
use crate::models::users::entities::Actor;
use crate::utils::date_key_for;

pub async fn save_session(
    service: &AttendanceService,
    actor: &Actor,
    class_id: &str,
    roster: &[RosterEntry],
) -> Result<SaveAttendanceResponse> {
    save_session_on(service, actor, class_id, roster, Utc::now().date_naive()).await
}

/// 写入班级视图与学生视图，提交后重新拉取班级历史
///
/// 同一班级同一天重复保存会整体覆盖当天的学生映射。
/// 提交成功即视为保存成功，之后的历史拉取失败只记录日志。
pub async fn save_session_on(
    service: &AttendanceService,
    actor: &Actor,
    class_id: &str,
    roster: &[RosterEntry],
    date: NaiveDate,
) -> Result<SaveAttendanceResponse> {
    let class = service.owned_class(actor, class_id).await?;
    let storage = service.storage();

    let enrolled: HashSet<String> = storage
        .list_class_students(&class.id)
        .await?
        .into_iter()
        .map(|s| s.student_id)
        .collect();
    check_roster(roster, &enrolled)?;

    let date_key = date_key_for(date);
    let students: BTreeMap<String, bool> = roster
        .iter()
        .map(|e| (e.student_id.clone(), e.present))
        .collect();
    let records: Vec<AttendanceRecord> = roster
        .iter()
        .map(|e| AttendanceRecord {
            student_id: e.student_id.clone(),
            class_id: class.id.clone(),
            date_key: date_key.clone(),
            status: AttendanceStatus::from_presence(e.present),
        })
        .collect();
    let session = AttendanceSession {
        class_id: class.id.clone(),
        date_key: date_key.clone(),
        students,
    };

    storage.commit_attendance(&session, &records).await?;
    info!(
        "Attendance for class {} on {} saved by {}: {} present, {} absent",
        class.id,
        date_key,
        actor.id,
        session.present_count(),
        session.absent_count()
    );

    let history = match fetch_history(service, &class.id).await {
        Ok(history) => Some(history),
        Err(e) => {
            warn!(
                "Attendance for class {} on {} saved, but reloading history failed: {}",
                class.id, date_key, e
            );
            None
        }
    };

    Ok(SaveAttendanceResponse {
        class_id: class.id,
        date_key,
        history,
    })
}

pub async fn save_sheet(
    service: &AttendanceService,
    actor: &Actor,
    sheet: &mut AttendanceSheet,
) -> Result<SaveAttendanceResponse> {
    let (class_id, entries) = sheet.begin_save()?;
    let result = save_session(service, actor, &class_id, &entries).await;
    if let Err(e) = &result {
        warn!("Saving attendance sheet for class {} failed: {}", class_id, e);
    }
    sheet.finish_save(result.is_ok());
    result
}

/// 花名册只能包含已加入班级的学生，且每个学生只出现一次
fn check_roster(roster: &[RosterEntry], enrolled: &HashSet<String>) -> Result<()> {
    let mut seen = HashSet::with_capacity(roster.len());
    for entry in roster {
        if !enrolled.contains(&entry.student_id) {
            return Err(AttendanceError::validation(format!(
                "Student {} is not enrolled in this class",
                entry.student_id
            )));
        }
        if !seen.insert(entry.student_id.as_str()) {
            return Err(AttendanceError::validation(format!(
                "Student {} appears more than once in the roster",
                entry.student_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::class_students::entities::{ClassStudent, JoinedClass};
    use crate::models::classes::{entities::Class, requests::{CreateClassRequest, NewClass}};
    use crate::services::attendance::RecorderState;
    use crate::services::test_support::{memory_storage, student, teacher};
    use crate::services::{ClassService, ClassStudentService};
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use std::sync::Arc;

    struct Fixture {
        storage: Arc<dyn Storage>,
        service: AttendanceService,
        owner: Actor,
        class_id: String,
    }

    async fn fixture(students: &[&str]) -> Fixture {
        let storage = memory_storage().await;
        let owner = teacher("t-1");
        let class = ClassService::new(storage.clone())
            .create_class(
                &owner,
                CreateClassRequest {
                    name: "Geography".to_string(),
                    description: "Maps".to_string(),
                },
            )
            .await
            .unwrap();
        let members = ClassStudentService::new(storage.clone());
        for id in students {
            members.join_class(&student(id), &class.id).await.unwrap();
        }
        Fixture {
            service: AttendanceService::new(storage.clone()),
            storage,
            owner,
            class_id: class.id,
        }
    }

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn entry(student_id: &str, present: bool) -> RosterEntry {
        RosterEntry {
            id: format!("r-{student_id}"),
            student_id: student_id.to_string(),
            name: String::new(),
            present,
        }
    }

    #[tokio::test]
    async fn test_save_writes_both_views() {
        let f = fixture(&["S1", "S2"]).await;

        let saved = f
            .service
            .save_session_on(&f.owner, &f.class_id, &[entry("S1", true), entry("S2", false)], jan(1))
            .await
            .unwrap();
        assert_eq!(saved.date_key, "2024-01-01");

        let session = f
            .storage
            .get_attendance_session(&f.class_id, "2024-01-01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.presence_of("S1"), Some(true));
        assert_eq!(session.presence_of("S2"), Some(false));
        assert_eq!(session.students.len(), 2);

        let s1 = f.storage.list_attendance_records("S1").await.unwrap();
        assert_eq!(s1.len(), 1);
        assert_eq!(s1[0].class_id, f.class_id);
        assert_eq!(s1[0].date_key, "2024-01-01");
        assert_eq!(s1[0].status, AttendanceStatus::Present);

        let s2 = f.storage.list_attendance_records("S2").await.unwrap();
        assert_eq!(s2[0].status, AttendanceStatus::Absent);

        let history = saved.history.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].present_count, 1);
        assert_eq!(history[0].absent_count, 1);
    }

    #[tokio::test]
    async fn test_resave_replaces_session_map() {
        let f = fixture(&["S1", "S2"]).await;

        f.service
            .save_session_on(&f.owner, &f.class_id, &[entry("S1", true), entry("S2", false)], jan(1))
            .await
            .unwrap();
        let saved = f
            .service
            .save_session_on(&f.owner, &f.class_id, &[entry("S2", true)], jan(1))
            .await
            .unwrap();

        let session = f
            .storage
            .get_attendance_session(&f.class_id, "2024-01-01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.presence_of("S1"), None);
        assert_eq!(session.presence_of("S2"), Some(true));
        assert_eq!(saved.history.map(|h| h.len()), Some(1));

        // 学生视图逐条覆盖，不删除
        let s2 = f.storage.list_attendance_records("S2").await.unwrap();
        assert_eq!(s2.len(), 1);
        assert_eq!(s2[0].status, AttendanceStatus::Present);
        assert_eq!(f.storage.list_attendance_records("S1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_history_is_ascending() {
        let f = fixture(&["S1"]).await;

        for d in [3, 1, 2] {
            f.service
                .save_session_on(&f.owner, &f.class_id, &[entry("S1", d != 2)], jan(d))
                .await
                .unwrap();
        }

        let history = f.service.list_sessions(&f.owner, &f.class_id).await.unwrap();
        let keys: Vec<&str> = history.iter().map(|h| h.date_key.as_str()).collect();
        assert_eq!(keys, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        assert_eq!(history[1].present_count, 0);
        assert_eq!(history[1].absent_count, 1);
    }

    #[tokio::test]
    async fn test_rejects_unenrolled_and_duplicate_students() {
        let f = fixture(&["S1"]).await;

        let err = f
            .service
            .save_session_on(&f.owner, &f.class_id, &[entry("S9", true)], jan(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Validation(_)));

        let err = f
            .service
            .save_session_on(&f.owner, &f.class_id, &[entry("S1", true), entry("S1", false)], jan(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Validation(_)));

        assert!(f
            .storage
            .get_attendance_session(&f.class_id, "2024-01-01")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_only_owner_can_save() {
        let f = fixture(&["S1"]).await;

        let err = f
            .service
            .save_session_on(&teacher("t-2"), &f.class_id, &[entry("S1", true)], jan(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Authorization(_)));

        let err = f
            .service
            .list_sessions(&teacher("t-2"), &f.class_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Authorization(_)));
    }

    #[tokio::test]
    async fn test_save_sheet_uses_today() {
        let f = fixture(&["S1", "S2"]).await;
        let mut sheet = AttendanceSheet::new();
        f.service
            .open_sheet(&f.owner, &mut sheet, &f.class_id)
            .await
            .unwrap();

        let s1_entry = sheet
            .entries()
            .iter()
            .find(|e| e.student_id == "S1")
            .map(|e| e.id.clone())
            .unwrap();
        sheet.toggle_presence(&s1_entry).unwrap();

        let saved = f.service.save_sheet(&f.owner, &mut sheet).await.unwrap();
        assert_eq!(saved.date_key, date_key_for(Utc::now().date_naive()));
        assert_eq!(sheet.state(), RecorderState::RosterLoaded);

        let session = f
            .storage
            .get_attendance_session(&f.class_id, &saved.date_key)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.presence_of("S1"), Some(true));
        assert_eq!(session.presence_of("S2"), Some(false));
    }

    /// 历史查询总是失败的存储，其余操作照常
    struct HistoryUnavailable(SeaOrmStorage);

    #[async_trait::async_trait]
    impl Storage for HistoryUnavailable {
        async fn create_class(&self, class: NewClass) -> Result<Class> {
            self.0.create_class(class).await
        }

        async fn get_class_by_id(&self, class_id: &str) -> Result<Option<Class>> {
            self.0.get_class_by_id(class_id).await
        }

        async fn list_classes(&self, teacher_id: Option<&str>) -> Result<Vec<Class>> {
            self.0.list_classes(teacher_id).await
        }

        async fn list_class_students(&self, class_id: &str) -> Result<Vec<ClassStudent>> {
            self.0.list_class_students(class_id).await
        }

        async fn list_joined_classes(&self, student_id: &str) -> Result<Vec<JoinedClass>> {
            self.0.list_joined_classes(student_id).await
        }

        async fn enroll_student(
            &self,
            class: &Class,
            student_id: &str,
            student_name: &str,
        ) -> Result<(JoinedClass, bool)> {
            self.0.enroll_student(class, student_id, student_name).await
        }

        async fn get_attendance_session(
            &self,
            class_id: &str,
            date_key: &str,
        ) -> Result<Option<AttendanceSession>> {
            self.0.get_attendance_session(class_id, date_key).await
        }

        async fn list_attendance_sessions(&self, _class_id: &str) -> Result<Vec<AttendanceSession>> {
            Err(AttendanceError::database_connection("connection reset"))
        }

        async fn list_attendance_records(&self, student_id: &str) -> Result<Vec<AttendanceRecord>> {
            self.0.list_attendance_records(student_id).await
        }

        async fn commit_attendance(
            &self,
            session: &AttendanceSession,
            records: &[AttendanceRecord],
        ) -> Result<()> {
            self.0.commit_attendance(session, records).await
        }
    }

    #[tokio::test]
    async fn test_committed_save_survives_history_reload_failure() {
        let backend = SeaOrmStorage::in_memory().await.unwrap();
        let storage: Arc<dyn Storage> = Arc::new(HistoryUnavailable(backend.clone()));
        let owner = teacher("t-1");
        let class = ClassService::new(storage.clone())
            .create_class(
                &owner,
                CreateClassRequest {
                    name: "Geography".to_string(),
                    description: "Maps".to_string(),
                },
            )
            .await
            .unwrap();
        ClassStudentService::new(storage.clone())
            .join_class(&student("S1"), &class.id)
            .await
            .unwrap();

        let service = AttendanceService::new(storage);
        let mut sheet = AttendanceSheet::new();
        service.open_sheet(&owner, &mut sheet, &class.id).await.unwrap();

        let saved = service.save_sheet(&owner, &mut sheet).await.unwrap();
        assert!(saved.history.is_none());
        assert_eq!(sheet.state(), RecorderState::RosterLoaded);

        let session = backend
            .get_attendance_session(&class.id, &saved.date_key)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.presence_of("S1"), Some(false));
        assert_eq!(backend.list_attendance_records("S1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_sheet_save_returns_to_editing() {
        let f = fixture(&["S1"]).await;
        let mut sheet = AttendanceSheet::new();
        f.service
            .open_sheet(&f.owner, &mut sheet, &f.class_id)
            .await
            .unwrap();

        assert!(f.service.save_sheet(&teacher("t-2"), &mut sheet).await.is_err());
        assert_eq!(sheet.state(), RecorderState::Editing);
    }
}
