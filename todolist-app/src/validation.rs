/// Input validation for service operations
///
/// Turns raw front-end input into the typed values the store accepts.
/// Every rejection carries the message shown to the user verbatim.

use chrono::NaiveDate;
use todolist_shared::models::{CreateTask, TaskStatus, UpdateTask};
use todolist_shared::store::EMPTY_DESCRIPTION;
use validator::{Validate, ValidationErrors};

/// Shown when a username or password is missing
pub const MISSING_CREDENTIALS: &str = "Username and password are required";

/// Shown when a priority is outside `[0, 10]`
pub const PRIORITY_OUT_OF_RANGE: &str = "Priority must be between 0 and 10";

/// Caller-supplied data rejected before reaching the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InputError(pub String);

#[derive(Debug, Validate)]
struct Registration {
    #[validate(length(max = 100, message = "Username must be at most 100 characters"))]
    username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    password: String,
}

#[derive(Debug, Validate)]
struct TaskFields {
    #[validate(length(max = 255, message = "Task description must be at most 255 characters"))]
    description: Option<String>,

    #[validate(range(min = 0, max = 10, message = "Priority must be between 0 and 10"))]
    priority: Option<i32>,
}

/// Raw field changes for a task update, as entered by the user
///
/// `None` means "leave unchanged". A blank due date is also treated as unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<i32>,
    pub status: Option<TaskStatus>,
}

const REGISTRATION_FIELDS: &[&str] = &["username", "password"];
const TASK_FIELDS: &[&str] = &["description", "priority"];

/// Picks the message of the first failing field, in `fields` order
fn first_message(errors: ValidationErrors, fields: &[&str]) -> InputError {
    let field_errors = errors.field_errors();
    let message = fields
        .iter()
        .filter_map(|field| {
            field_errors
                .iter()
                .find(|(name, _)| **name == *field)
                .map(|(_, errs)| *errs)
        })
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid input".to_string());
    InputError(message)
}

/// True when the value is empty or only whitespace
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Checks registration input
///
/// Both fields must be non-blank and the password at least 8 characters.
pub fn check_registration(username: &str, password: &str) -> Result<(), InputError> {
    check_credentials_present(username, password)?;

    Registration {
        username: username.to_string(),
        password: password.to_string(),
    }
    .validate()
    .map_err(|e| first_message(e, REGISTRATION_FIELDS))
}

/// Checks that a login attempt supplied both fields
pub fn check_credentials_present(username: &str, password: &str) -> Result<(), InputError> {
    if is_blank(username) || password.is_empty() {
        return Err(InputError(MISSING_CREDENTIALS.to_string()));
    }
    Ok(())
}

/// Parses an optional `YYYY-MM-DD` due date
///
/// `None` and blank strings mean "no due date". Anything else must be four
/// digits, a dash, two digits, a dash, two digits, and a real calendar date.
pub fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDate>, InputError> {
    let raw = match raw.map(str::trim) {
        None => return Ok(None),
        Some(s) if s.is_empty() => return Ok(None),
        Some(s) => s,
    };

    let invalid = || InputError(format!("Invalid due date '{}': expected YYYY-MM-DD", raw));

    let shaped = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| invalid())
}

/// Validates input for a new task
pub fn new_task(
    description: &str,
    due_date: Option<&str>,
    priority: Option<i32>,
) -> Result<CreateTask, InputError> {
    if is_blank(description) {
        return Err(InputError(EMPTY_DESCRIPTION.to_string()));
    }
    let description = description.trim().to_string();

    TaskFields {
        description: Some(description.clone()),
        priority,
    }
    .validate()
    .map_err(|e| first_message(e, TASK_FIELDS))?;

    Ok(CreateTask {
        description,
        due_date: parse_due_date(due_date)?,
        priority,
    })
}

/// Validates a set of task changes into a partial update
///
/// Applies the same rules as [`new_task`] to every field that is present.
pub fn task_update(changes: &TaskChanges) -> Result<UpdateTask, InputError> {
    let description = match changes.description.as_deref() {
        Some(d) if is_blank(d) => return Err(InputError(EMPTY_DESCRIPTION.to_string())),
        Some(d) => Some(d.trim().to_string()),
        None => None,
    };

    TaskFields {
        description: description.clone(),
        priority: changes.priority,
    }
    .validate()
    .map_err(|e| first_message(e, TASK_FIELDS))?;

    Ok(UpdateTask {
        description,
        due_date: parse_due_date(changes.due_date.as_deref())?,
        priority: changes.priority,
        status: changes.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_requires_both_fields() {
        assert_eq!(
            check_registration("", "longenough"),
            Err(InputError(MISSING_CREDENTIALS.to_string()))
        );
        assert_eq!(
            check_registration("alice", ""),
            Err(InputError(MISSING_CREDENTIALS.to_string()))
        );
        assert_eq!(
            check_registration("   ", "longenough"),
            Err(InputError(MISSING_CREDENTIALS.to_string()))
        );
    }

    #[test]
    fn test_registration_password_length() {
        let err = check_registration("alice", "short77").unwrap_err();
        assert!(err.0.contains("at least 8 characters"));

        assert!(check_registration("alice", "exactly8").is_ok());
        // Length counts characters, not bytes
        assert!(check_registration("alice", "пароль12").is_ok());
    }

    #[test]
    fn test_registration_username_length() {
        let err = check_registration(&"a".repeat(101), "longenough").unwrap_err();
        assert!(err.0.contains("at most 100"));
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(parse_due_date(None), Ok(None));
        assert_eq!(parse_due_date(Some("")), Ok(None));
        assert_eq!(parse_due_date(Some("  ")), Ok(None));
        assert_eq!(
            parse_due_date(Some("2025-03-01")),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 1))
        );

        for bad in [
            "2025-3-1",
            "03/01/2025",
            "2025-02-30",
            "2025-13-01",
            "tomorrow",
            "2025-03-01T00:00",
            "+2025-3-01",
            "-001-01-01",
            "+999-01-01",
            "2025-03-0a",
        ] {
            assert!(parse_due_date(Some(bad)).is_err(), "'{}' should be rejected", bad);
        }
    }

    #[test]
    fn test_new_task_priority_bounds() {
        assert!(new_task("x", None, Some(0)).is_ok());
        assert!(new_task("x", None, Some(10)).is_ok());
        assert_eq!(
            new_task("x", None, Some(-1)).unwrap_err().0,
            PRIORITY_OUT_OF_RANGE
        );
        assert_eq!(
            new_task("x", None, Some(11)).unwrap_err().0,
            PRIORITY_OUT_OF_RANGE
        );
    }

    #[test]
    fn test_first_failing_field_wins() {
        let long = "d".repeat(256);
        for _ in 0..8 {
            let err = new_task(&long, None, Some(11)).unwrap_err();
            assert_eq!(err.0, "Task description must be at most 255 characters");
        }

        let changes = TaskChanges {
            description: Some(long),
            priority: Some(-1),
            ..Default::default()
        };
        assert_eq!(
            task_update(&changes).unwrap_err().0,
            "Task description must be at most 255 characters"
        );

        let err = check_registration(&"a".repeat(101), "short").unwrap_err();
        assert!(err.0.contains("at most 100"));
    }

    #[test]
    fn test_new_task_description() {
        assert_eq!(new_task("", None, None).unwrap_err().0, EMPTY_DESCRIPTION);
        assert_eq!(new_task(" \t", None, None).unwrap_err().0, EMPTY_DESCRIPTION);
        assert!(new_task(&"d".repeat(256), None, None).is_err());

        let task = new_task("  Buy milk ", Some("2025-03-01"), Some(5)).unwrap();
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(task.priority, Some(5));
    }

    #[test]
    fn test_task_update_validates_present_fields() {
        let empty = task_update(&TaskChanges::default()).unwrap();
        assert!(empty.is_empty());

        let changes = TaskChanges {
            description: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(task_update(&changes).unwrap_err().0, EMPTY_DESCRIPTION);

        let changes = TaskChanges {
            priority: Some(11),
            ..Default::default()
        };
        assert!(task_update(&changes).is_err());

        let changes = TaskChanges {
            due_date: Some("01-03-2025".to_string()),
            ..Default::default()
        };
        assert!(task_update(&changes).is_err());

        let changes = TaskChanges {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        let update = task_update(&changes).unwrap();
        assert_eq!(update.status, Some(TaskStatus::Completed));
        assert!(update.description.is_none());
    }
}
