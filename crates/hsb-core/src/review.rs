//! Shape checking and formatting of review API payloads.

use serde::Deserialize;
use serde_json::Value;

use crate::{domain::HomeworkStatus, errors::Error, Result};

/// A shape-checked review API payload.
///
/// Homework records stay raw (`Value`): only the first one is ever read,
/// and its fields are checked lazily by [`parse_status`].
#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    /// Most-recent-first.
    pub homeworks: Vec<Value>,
    pub current_date: i64,
}

/// Enforce the top-level contract: a mapping with a `homeworks` list and a
/// `current_date` timestamp. Anything else is rejected wholesale.
pub fn check_response(raw: Value) -> Result<StatusResponse> {
    serde_json::from_value(raw.clone()).map_err(|e| {
        Error::MalformedPayload(format!("unexpected response structure: {e}; payload: {raw}"))
    })
}

/// Map one homework record to the user-facing notification text.
///
/// Pure: the same record always yields the same string.
pub fn parse_status(record: &Value) -> Result<String> {
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::MalformedPayload(format!("homework record without homework_name: {record}"))
        })?;
    let code = record
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            Error::MalformedPayload(format!("homework record without status: {record}"))
        })?;
    let status = HomeworkStatus::from_code(code)
        .ok_or_else(|| Error::UnrecognizedStatus(code.to_string()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_response() {
        let raw = json!({
            "homeworks": [{"homework_name": "proj1", "status": "approved"}],
            "current_date": 1_700_000_000,
        });
        let resp = check_response(raw).unwrap();
        assert_eq!(resp.homeworks.len(), 1);
        assert_eq!(resp.current_date, 1_700_000_000);
    }

    #[test]
    fn rejects_response_without_current_date() {
        let raw = json!({"homeworks": []});
        let err = check_response(raw).unwrap_err();
        assert!(matches!(err, Error::MalformedPayload(_)));
    }

    #[test]
    fn rejects_response_without_homeworks() {
        let raw = json!({"current_date": 1});
        assert!(matches!(
            check_response(raw),
            Err(Error::MalformedPayload(_))
        ));
    }

    #[test]
    fn rejects_non_list_homeworks() {
        let raw = json!({"homeworks": {"a": 1}, "current_date": 1});
        assert!(matches!(
            check_response(raw),
            Err(Error::MalformedPayload(_))
        ));
    }

    #[test]
    fn rejects_non_object_top_level() {
        let raw = json!([1, 2, 3]);
        assert!(matches!(
            check_response(raw),
            Err(Error::MalformedPayload(_))
        ));
    }

    #[test]
    fn records_are_not_validated_by_the_shape_check() {
        // A garbage record passes here; parse_status rejects it later.
        let raw = json!({"homeworks": [{"unrelated": true}], "current_date": 1});
        let resp = check_response(raw).unwrap();
        assert!(parse_status(&resp.homeworks[0]).is_err());
    }

    #[test]
    fn formats_approved_homework() {
        let record = json!({"homework_name": "proj1", "status": "approved"});
        assert_eq!(
            parse_status(&record).unwrap(),
            "Изменился статус проверки работы \"proj1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn parse_status_is_pure() {
        let record = json!({"homework_name": "proj2", "status": "reviewing"});
        let first = parse_status(&record).unwrap();
        let second = parse_status(&record).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            "Изменился статус проверки работы \"proj2\". Работа взята на проверку ревьюером."
        );
    }

    #[test]
    fn missing_name_is_malformed() {
        let record = json!({"status": "approved"});
        assert!(matches!(
            parse_status(&record),
            Err(Error::MalformedPayload(_))
        ));
    }

    #[test]
    fn missing_status_is_malformed() {
        let record = json!({"homework_name": "proj1"});
        assert!(matches!(
            parse_status(&record),
            Err(Error::MalformedPayload(_))
        ));
    }

    #[test]
    fn unknown_status_names_the_code() {
        let record = json!({"homework_name": "proj1", "status": "on_fire"});
        match parse_status(&record).unwrap_err() {
            Error::UnrecognizedStatus(code) => assert_eq!(code, "on_fire"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
