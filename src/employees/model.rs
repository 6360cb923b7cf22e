//! Employee records and the small value types that travel with them.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// An employee as reported by upstream or the fallback dataset.
///
/// Field names on the wire follow the upstream API in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(deserialize_with = "lenient_number")]
    pub id: u64,

    #[serde(rename = "employee_name")]
    pub name: String,

    #[serde(rename = "employee_salary", deserialize_with = "lenient_number")]
    pub salary: u64,

    #[serde(rename = "employee_age", deserialize_with = "lenient_number")]
    pub age: u32,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub profile_image: String,
}

/// Validated input for creating an employee upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub salary: u64,
    pub age: u32,
}

/// Outcome of a create call as reported by upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationStatus {
    Success,
    Failure,
}

impl OperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Success => "SUCCESS",
            OperationStatus::Failure => "FAILURE",
        }
    }
}

impl FromStr for OperationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(OperationStatus::Success),
            "FAILURE" => Ok(OperationStatus::Failure),
            other => Err(format!("unknown operation status '{}'", other)),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a read result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Upstream,
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Upstream => "upstream",
            DataSource::Fallback => "fallback",
        }
    }
}

/// A value tagged with the data source that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: DataSource,
}

impl<T> Sourced<T> {
    pub fn upstream(value: T) -> Self {
        Self { value, source: DataSource::Upstream }
    }

    pub fn fallback(value: T) -> Self {
        Self { value, source: DataSource::Fallback }
    }

    /// Transform the value, keeping the source.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            value: f(self.value),
            source: self.source,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

/// Accept either a JSON integer or a string holding one.
fn lenient_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64> + FromStr,
{
    use serde::de::Error;

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => {
            T::try_from(n).map_err(|_| D::Error::custom(format!("number {} out of range", n)))
        }
        NumberOrText::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("'{}' is not an unsigned integer", s))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_employee_wire_format() {
        let employee = Employee {
            id: 4,
            name: "Cedric Kelly".into(),
            salary: 433060,
            age: 22,
            profile_image: String::new(),
        };

        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 4,
                "employee_name": "Cedric Kelly",
                "employee_salary": 433060,
                "employee_age": 22,
                "profile_image": ""
            })
        );
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let employee: Employee = serde_json::from_value(json!({
            "id": "7",
            "employee_name": "Herrod Chandler",
            "employee_salary": "137500",
            "employee_age": " 59 ",
            "profile_image": null
        }))
        .unwrap();

        assert_eq!(employee.id, 7);
        assert_eq!(employee.salary, 137500);
        assert_eq!(employee.age, 59);
        assert_eq!(employee.profile_image, "");
    }

    #[test]
    fn test_missing_profile_image_defaults() {
        let employee: Employee = serde_json::from_value(json!({
            "id": 1,
            "employee_name": "Tiger Nixon",
            "employee_salary": 320800,
            "employee_age": 61
        }))
        .unwrap();
        assert!(employee.profile_image.is_empty());
    }

    #[test]
    fn test_rejects_negative_and_garbage_numbers() {
        let negative = serde_json::from_value::<Employee>(json!({
            "id": 1, "employee_name": "x", "employee_salary": -5, "employee_age": 30
        }));
        assert!(negative.is_err());

        let garbage = serde_json::from_value::<Employee>(json!({
            "id": 1, "employee_name": "x", "employee_salary": 10, "employee_age": "old"
        }));
        assert!(garbage.is_err());
    }

    #[test]
    fn test_operation_status_parsing() {
        assert_eq!("success".parse::<OperationStatus>(), Ok(OperationStatus::Success));
        assert_eq!("Failure".parse::<OperationStatus>(), Ok(OperationStatus::Failure));
        assert!("error".parse::<OperationStatus>().is_err());
        assert_eq!(
            serde_json::to_value(OperationStatus::Success).unwrap(),
            json!("SUCCESS")
        );
    }

    #[test]
    fn test_sourced_map_keeps_source() {
        let sourced = Sourced::fallback(vec![1, 2, 3]).map(|v| v.len());
        assert_eq!(sourced.value, 3);
        assert_eq!(sourced.source, DataSource::Fallback);
    }
}
