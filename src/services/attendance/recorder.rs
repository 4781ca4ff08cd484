//! 点名表
//!
//! 教师选中班级后在内存中维护的一份花名册，勾选出勤不做任何 I/O，
//! 只有保存时才写入存储。
//!
//! 状态流转：`Idle → RosterLoaded → Editing → Saving → RosterLoaded`，
//! 任意状态下 `close` 回到 `Idle` 并丢弃花名册。

use crate::errors::{AttendanceError, Result};
use crate::models::attendance::entities::RosterEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    RosterLoaded,
    Editing,
    Saving,
}

#[derive(Debug, Clone)]
pub struct AttendanceSheet {
    state: RecorderState,
    class_id: Option<String>,
    entries: Vec<RosterEntry>,
}

impl Default for AttendanceSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceSheet {
    pub fn new() -> Self {
        Self {
            state: RecorderState::Idle,
            class_id: None,
            entries: Vec::new(),
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn class_id(&self) -> Option<&str> {
        self.class_id.as_deref()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// 载入花名册，所有人默认缺勤（不沿用以前的考勤）
    pub fn load(&mut self, class_id: impl Into<String>, roster: Vec<RosterEntry>) -> Result<()> {
        if self.state == RecorderState::Saving {
            return Err(AttendanceError::validation(
                "Cannot switch classes while attendance is being saved",
            ));
        }

        self.class_id = Some(class_id.into());
        self.entries = roster
            .into_iter()
            .map(|mut entry| {
                entry.present = false;
                entry
            })
            .collect();
        self.state = RecorderState::RosterLoaded;
        Ok(())
    }

    /// 切换某个花名册条目的出勤状态，返回切换后的值
    pub fn toggle_presence(&mut self, entry_id: &str) -> Result<bool> {
        match self.state {
            RecorderState::RosterLoaded | RecorderState::Editing => {}
            RecorderState::Idle => {
                return Err(AttendanceError::validation("No roster is loaded"));
            }
            RecorderState::Saving => {
                return Err(AttendanceError::validation(
                    "Attendance is being saved, please wait",
                ));
            }
        }

        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| AttendanceError::not_found(format!("Roster entry not found: {entry_id}")))?;
        entry.present = !entry.present;
        self.state = RecorderState::Editing;
        Ok(entry.present)
    }

    /// 进入保存状态，返回要提交的班级与花名册快照
    pub fn begin_save(&mut self) -> Result<(String, Vec<RosterEntry>)> {
        let class_id = match (self.state, &self.class_id) {
            (RecorderState::RosterLoaded | RecorderState::Editing, Some(class_id)) => {
                class_id.clone()
            }
            (RecorderState::Saving, _) => {
                return Err(AttendanceError::validation("Attendance is already being saved"));
            }
            _ => return Err(AttendanceError::validation("No roster is loaded")),
        };

        self.state = RecorderState::Saving;
        Ok((class_id, self.entries.clone()))
    }

    /// 保存结束：成功回到 RosterLoaded，失败回到 Editing 以便重试
    pub fn finish_save(&mut self, saved: bool) {
        if self.state != RecorderState::Saving {
            return;
        }
        self.state = if saved {
            RecorderState::RosterLoaded
        } else {
            RecorderState::Editing
        };
    }

    pub fn close(&mut self) {
        self.state = RecorderState::Idle;
        self.class_id = None;
        self.entries.clear();
    }
}
