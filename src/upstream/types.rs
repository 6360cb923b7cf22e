//! Upstream envelope types and error definitions.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::employees::model::Employee;

/// Operations the upstream API supports, used for logging and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Delete => "delete",
        }
    }
}

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, timeout or body read failure.
    #[error("upstream request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status code.
    #[error("upstream returned {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// Upstream answered 2xx with a body we cannot read.
    #[error("malformed upstream response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl UpstreamError {
    /// True when upstream could not be reached or refused the request,
    /// as opposed to answering with an unreadable body.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, UpstreamError::Transport { .. } | UpstreamError::Status { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Transport { source, .. } if source.is_timeout())
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Response wrapper used by every upstream endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// True when the `status` field reads "success" in any letter case.
    pub fn is_success(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("success"))
    }

    /// Decode `data` into employees. A single object counts as a list of one;
    /// a missing or null `data` is an empty list.
    pub fn into_employees(self) -> Result<Vec<Employee>, serde_json::Error> {
        match self.data {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(data) => serde_json::from_value::<OneOrMany<Employee>>(data).map(Vec::from),
        }
    }

    /// Decode the full employee list.
    ///
    /// Unlike [`Envelope::into_employees`], `data` must be present and a
    /// `status` other than "success" is an error.
    pub fn into_employee_list(self) -> Result<Vec<Employee>, serde_json::Error> {
        use serde::de::Error;

        if self.status.is_some() && !self.is_success() {
            return Err(serde_json::Error::custom(format!(
                "envelope status '{}' ({})",
                self.status.as_deref().unwrap_or_default(),
                self.message.as_deref().unwrap_or("no message"),
            )));
        }

        match self.data {
            None | Some(Value::Null) => Err(serde_json::Error::custom("envelope has no data")),
            Some(data) => serde_json::from_value::<OneOrMany<Employee>>(data).map(Vec::from),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_array_data() {
        let env = envelope(json!({
            "status": "success",
            "data": [
                {"id": 1, "employee_name": "Tiger Nixon", "employee_salary": 320800, "employee_age": 61, "profile_image": ""},
                {"id": 2, "employee_name": "Garrett Winters", "employee_salary": 170750, "employee_age": 63, "profile_image": ""}
            ],
            "message": "Successfully! All records has been fetched."
        }));

        assert!(env.is_success());
        let employees = env.into_employees().unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[1].name, "Garrett Winters");
    }

    #[test]
    fn test_single_object_data() {
        let env = envelope(json!({
            "status": "success",
            "data": {"id": 4, "employee_name": "Cedric Kelly", "employee_salary": 433060, "employee_age": 22, "profile_image": ""}
        }));

        let employees = env.into_employees().unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].id, 4);
    }

    #[test]
    fn test_null_or_missing_data() {
        assert!(envelope(json!({"status": "success", "data": null})).into_employees().unwrap().is_empty());
        assert!(envelope(json!({"status": "success"})).into_employees().unwrap().is_empty());
    }

    #[test]
    fn test_list_requires_data_and_success() {
        let throttled = envelope(json!({"status": "failure", "message": "Too Many Attempts."}));
        let err = throttled.into_employee_list().unwrap_err();
        assert!(err.to_string().contains("Too Many Attempts."));

        assert!(envelope(json!({"status": "success", "data": null})).into_employee_list().is_err());
        assert!(envelope(json!({"status": "success"})).into_employee_list().is_err());
        assert!(envelope(json!({"status": "failure", "data": []})).into_employee_list().is_err());

        assert!(envelope(json!({"status": "success", "data": []})).into_employee_list().unwrap().is_empty());
        assert_eq!(envelope(json!({"data": []})).into_employee_list().unwrap().len(), 0);
    }

    #[test]
    fn test_malformed_data() {
        let env = envelope(json!({"status": "success", "data": "nope"}));
        assert!(env.into_employees().is_err());
    }

    #[test]
    fn test_status_case_insensitive() {
        assert!(envelope(json!({"status": "SUCCESS"})).is_success());
        assert!(!envelope(json!({"status": "failure"})).is_success());
        assert!(!envelope(json!({})).is_success());
    }

    #[test]
    fn test_error_display() {
        let err = UpstreamError::Status {
            url: "http://upstream/employees".into(),
            status: StatusCode::TOO_MANY_REQUESTS,
        };
        assert_eq!(err.to_string(), "upstream returned 429 Too Many Requests for http://upstream/employees");
        assert!(err.is_unavailable());
        assert!(!err.is_timeout());
    }
}
