//! 考勤日期键
//!
//! 日期键为 UTC 日历日 `YYYY-MM-DD`，同一班级同一天只有一次考勤。

use chrono::NaiveDate;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

pub fn date_key_for(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}
