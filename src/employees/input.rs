//! Normalization of employee creation payloads.
//!
//! Callers may spell each field either short (`name`, `salary`, `age`) or the
//! way upstream does (`employee_name`, `employee_salary`, `employee_age`).
//! The short spelling wins when both are present.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::employees::model::NewEmployee;

/// A creation payload that cannot be turned into a [`NewEmployee`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("missing field '{short}' (or '{long}')")]
    MissingField { short: &'static str, long: &'static str },

    #[error("field '{0}' must be a non-empty string")]
    InvalidName(&'static str),

    #[error("field '{field}' must be an integer, got {value}")]
    NotAnInteger { field: &'static str, value: String },

    #[error("field '{field}' is out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

struct FieldKeys {
    short: &'static str,
    long: &'static str,
}

const NAME: FieldKeys = FieldKeys { short: "name", long: "employee_name" };
const SALARY: FieldKeys = FieldKeys { short: "salary", long: "employee_salary" };
const AGE: FieldKeys = FieldKeys { short: "age", long: "employee_age" };

impl NewEmployee {
    /// Resolve name, salary and age from a raw JSON payload.
    pub fn from_payload(payload: &Value) -> Result<Self, InputError> {
        let map = payload.as_object().ok_or(InputError::NotAnObject)?;

        let (name_key, name) = lookup(map, &NAME)?;
        let name = match name {
            Value::String(s) if !s.trim().is_empty() => s.clone(),
            _ => return Err(InputError::InvalidName(name_key)),
        };

        let salary = integer_field(map, &SALARY)?;
        let age = integer_field(map, &AGE)?;

        let salary = u64::try_from(salary).map_err(|_| InputError::OutOfRange {
            field: SALARY.short,
            value: salary.to_string(),
        })?;
        let age = u32::try_from(age)
            .ok()
            .filter(|age| *age > 0)
            .ok_or_else(|| InputError::OutOfRange {
                field: AGE.short,
                value: age.to_string(),
            })?;

        Ok(Self { name, salary, age })
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, keys: &FieldKeys) -> Result<(&'static str, &'a Value), InputError> {
    map.get(keys.short)
        .map(|v| (keys.short, v))
        .or_else(|| map.get(keys.long).map(|v| (keys.long, v)))
        .ok_or(InputError::MissingField {
            short: keys.short,
            long: keys.long,
        })
}

fn integer_field(map: &Map<String, Value>, keys: &FieldKeys) -> Result<i64, InputError> {
    let (field, value) = lookup(map, keys)?;
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| InputError::NotAnInteger {
        field,
        value: value.to_string(),
    })
}
