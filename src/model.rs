use std::str::FromStr;

use chrono::NaiveDate;
use clap::ValueEnum;
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaskerError};

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[clap(rename_all = "snake_case")]
pub enum Status {
    #[default]
    #[value(alias = "новая")]
    New,
    #[value(alias = "в работе")]
    InProgress,
    #[value(alias = "сделано")]
    Done,
}

/// Declaration order is the ranking: `Low < Medium < High`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[clap(rename_all = "snake_case")]
pub enum Priority {
    #[value(alias = "низкий")]
    Low,
    #[default]
    #[value(alias = "средний")]
    Medium,
    #[value(alias = "высокий")]
    High,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Done => write!(f, "done"),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Lower-cases a user token and folds `-` and spaces to `_`. Russian labels
/// are accepted alongside the English names.
fn normalize_token(input: &str) -> String {
    input.trim().to_lowercase().replace(['-', ' '], "_")
}

impl FromStr for Status {
    type Err = TaskerError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_token(s).as_str() {
            "new" | "новая" => Ok(Self::New),
            "in_progress" | "в_работе" => Ok(Self::InProgress),
            "done" | "сделано" => Ok(Self::Done),
            _ => Err(TaskerError::Validation(format!(
                "unknown status '{}' (expected new, in_progress or done)",
                s.trim()
            ))),
        }
    }
}

impl FromStr for Priority {
    type Err = TaskerError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_token(s).as_str() {
            "low" | "низкий" => Ok(Self::Low),
            "medium" | "средний" => Ok(Self::Medium),
            "high" | "высокий" => Ok(Self::High),
            _ => Err(TaskerError::Validation(format!(
                "unknown priority '{}' (expected low, medium or high)",
                s.trim()
            ))),
        }
    }
}

/// `DD.MM.YYYY` date encoding shared by the task file and the CLI.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::error::{Result, TaskerError};

    pub const FORMAT: &str = "%d.%m.%Y";

    pub fn format(date: NaiveDate) -> String {
        date.format(FORMAT).to_string()
    }

    pub fn parse(input: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), FORMAT).map_err(|_| {
            TaskerError::Validation(format!(
                "invalid date '{}' (expected DD.MM.YYYY)",
                input.trim()
            ))
        })
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Current local calendar date according to `clock`.
pub fn today(clock: &dyn Clock) -> NaiveDate {
    clock.local().date_naive()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub(crate) id: u64,
    pub(crate) title: String,
    pub(crate) description: String,
    #[serde(with = "date_format")]
    pub(crate) completion_date: NaiveDate,
    #[serde(with = "date_format")]
    pub(crate) create_date: NaiveDate,
    pub(crate) priority: Priority,
    pub(crate) status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) rating: Option<u8>,
    #[serde(skip)]
    pub(crate) deleted: bool,
}

impl Task {
    pub(crate) fn new(
        id: u64,
        title: String,
        description: String,
        completion_date: NaiveDate,
        create_date: NaiveDate,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            title,
            description,
            completion_date,
            create_date,
            priority,
            status: Status::New,
            rating: None,
            deleted: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn completion_date(&self) -> NaiveDate {
        self.completion_date
    }

    pub fn create_date(&self) -> NaiveDate {
        self.create_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Past its completion date and not yet done. Never persisted.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        today > self.completion_date && self.status != Status::Done
    }

    /// Record a 1-5 rating. Only a finished task can be rated, and only once.
    pub fn rate(&mut self, value: i64) -> Result<()> {
        if self.status != Status::Done {
            return Err(TaskerError::InvalidState(format!(
                "task {} can only be rated once it is done",
                self.id
            )));
        }
        if self.rating.is_some() {
            return Err(TaskerError::AlreadySet(self.id));
        }
        let rating = u8::try_from(value)
            .ok()
            .filter(|r| (1..=5).contains(r))
            .ok_or(TaskerError::OutOfRange(value))?;
        self.rating = Some(rating);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample(status: Status) -> Task {
        let mut task = Task::new(
            7,
            "Write report".into(),
            "Quarterly numbers".into(),
            date(31, 12, 2026),
            date(19, 10, 2026),
            Priority::High,
        );
        task.status = status;
        task
    }

    #[test]
    fn task_serializes_with_dotted_dates_and_symbolic_enums() {
        let json = serde_json::to_value(sample(Status::InProgress)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["completionDate"], "31.12.2026");
        assert_eq!(json["createDate"], "19.10.2026");
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["status"], "IN_PROGRESS");
        assert!(json.get("rating").is_none());
        assert!(json.get("deleted").is_none());
    }

    #[test]
    fn task_deserialization_ignores_legacy_fields() {
        let raw = r#"{
            "id": 3, "title": "t", "description": "d",
            "completionDate": "01.02.2027", "createDate": "05.01.2027",
            "priority": "LOW", "status": "DONE", "rating": 5,
            "deleted": false, "state": {}
        }"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id(), 3);
        assert_eq!(task.completion_date(), date(1, 2, 2027));
        assert_eq!(task.status(), Status::Done);
        assert_eq!(task.rating(), Some(5));
        assert!(!task.is_deleted());
    }

    #[test]
    fn malformed_date_fails_deserialization() {
        let raw = r#"{
            "id": 3, "title": "t", "description": "d",
            "completionDate": "2027-02-01", "createDate": "05.01.2027",
            "priority": "LOW", "status": "NEW"
        }"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
    }

    #[test]
    fn date_format_is_symmetric() {
        let d = date(5, 3, 2027);
        assert_eq!(date_format::format(d), "05.03.2027");
        assert_eq!(date_format::parse("05.03.2027").unwrap(), d);
        assert!(matches!(
            date_format::parse("2027/03/05"),
            Err(TaskerError::Validation(_))
        ));
    }

    #[test]
    fn enum_tokens_parse_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" in-progress ".parse::<Status>().unwrap(), Status::InProgress);
        assert!(matches!(
            "urgent".parse::<Priority>(),
            Err(TaskerError::Validation(_))
        ));
    }

    #[test]
    fn russian_labels_parse_to_the_same_values() {
        assert_eq!("Высокий".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("средний".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("низкий".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!("новая".parse::<Status>().unwrap(), Status::New);
        assert_eq!(" В работе ".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("СДЕЛАНО".parse::<Status>().unwrap(), Status::Done);

        assert_eq!(<Priority as ValueEnum>::from_str("высокий", true).unwrap(), Priority::High);
        assert_eq!(<Status as ValueEnum>::from_str("в работе", true).unwrap(), Status::InProgress);
    }

    #[test]
    fn priority_ranks_high_above_low() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn overdue_requires_past_date_and_unfinished() {
        let task = sample(Status::New);
        assert!(!task.is_overdue(date(31, 12, 2026)));
        assert!(task.is_overdue(date(1, 1, 2027)));

        let done = sample(Status::Done);
        assert!(!done.is_overdue(date(1, 1, 2030)));
    }

    #[test]
    fn rate_requires_done() {
        let mut task = sample(Status::InProgress);
        assert!(matches!(task.rate(4), Err(TaskerError::InvalidState(_))));
        assert_eq!(task.rating(), None);
    }

    #[test]
    fn rate_only_once() {
        let mut task = sample(Status::Done);
        task.rate(4).unwrap();
        assert_eq!(task.rating(), Some(4));
        assert!(matches!(task.rate(5), Err(TaskerError::AlreadySet(7))));
        assert_eq!(task.rating(), Some(4));
    }

    #[test]
    fn rate_rejects_out_of_range() {
        let mut task = sample(Status::Done);
        assert!(matches!(task.rate(0), Err(TaskerError::OutOfRange(0))));
        assert!(matches!(task.rate(6), Err(TaskerError::OutOfRange(6))));
        assert!(matches!(task.rate(-1), Err(TaskerError::OutOfRange(-1))));
        assert_eq!(task.rating(), None);
    }
}
