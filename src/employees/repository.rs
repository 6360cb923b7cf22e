//! Employee operations on top of the upstream client.
//!
//! # Responsibilities
//! - Call upstream once per operation
//! - Substitute the fallback dataset when an upstream read fails
//! - Search, rank and aggregate over the resulting employee list
//! - Interpret create/delete outcomes
//!
//! # Design Decisions
//! - Every read result is tagged with its [`DataSource`]
//! - Fallback can be switched off, in which case upstream errors surface
//! - Search input is matched literally, never as a pattern

use regex::RegexBuilder;
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::employees::fallback;
use crate::employees::model::{Employee, NewEmployee, OperationStatus, Sourced};
use crate::observability::metrics;
use crate::upstream::{Operation, UpstreamClient, UpstreamError, UpstreamResult};

/// Maximum number of entries returned by [`EmployeeRepository::top_ten_by_salary`].
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Errors surfaced by employee operations.
#[derive(Debug, Error)]
pub enum EmployeeError {
    /// No employee with this id upstream or in the fallback dataset.
    #[error("No employee found with id: {0}")]
    NotFound(u64),

    /// Upstream did not confirm the deletion.
    #[error("Failed to delete employee with id: {0}")]
    DeleteFailed(u64),

    /// The employee list is empty.
    #[error("No employee records found")]
    NoEmployees,

    /// Upstream failed and no fallback applies.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Result type for employee operations.
pub type EmployeeResult<T> = Result<T, EmployeeError>;

/// Employee operations backed by the upstream API.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    client: UpstreamClient,
    fallback_enabled: bool,
}

impl EmployeeRepository {
    pub fn new(client: UpstreamClient, fallback_enabled: bool) -> Self {
        Self {
            client,
            fallback_enabled,
        }
    }

    /// Build the client and repository from configuration.
    pub fn from_config(config: &UpstreamConfig) -> UpstreamResult<Self> {
        Ok(Self::new(UpstreamClient::new(config)?, config.fallback_enabled))
    }

    /// Fetch every employee, degrading to the fallback dataset on any upstream failure.
    pub async fn list_all(&self) -> EmployeeResult<Sourced<Vec<Employee>>> {
        match self.client.list_employees().await {
            Ok(employees) => Ok(Sourced::upstream(employees)),
            Err(e) if self.fallback_enabled => {
                self.note_fallback(Operation::List, &e);
                Ok(Sourced::fallback(fallback::employees()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Employees whose name contains `fragment`, ignoring case.
    pub async fn search(&self, fragment: &str) -> EmployeeResult<Sourced<Vec<Employee>>> {
        let all = self.list_all().await?;
        Ok(all.map(|employees| filter_by_name(employees, fragment)))
    }

    /// Highest salary across all employees.
    pub async fn highest_salary(&self) -> EmployeeResult<Sourced<u64>> {
        let all = self.list_all().await?;
        let highest = all.value.iter().map(|e| e.salary).max();

        match highest {
            Some(salary) => Ok(Sourced {
                value: salary,
                source: all.source,
            }),
            None => {
                tracing::warn!("No employee records found");
                Err(EmployeeError::NoEmployees)
            }
        }
    }

    /// Up to ten employees, highest salary first.
    pub async fn top_ten_by_salary(&self) -> EmployeeResult<Sourced<Vec<Employee>>> {
        let all = self.list_all().await?;
        Ok(all.map(|employees| top_earners(employees, TOP_EARNERS_LIMIT)))
    }

    /// Fetch a single employee.
    ///
    /// When upstream is unreachable or rejects the call, the fallback dataset
    /// is searched instead. A malformed success response is an error.
    pub async fn get_by_id(&self, id: u64) -> EmployeeResult<Sourced<Employee>> {
        let found = match self.client.get_employee(id).await {
            Ok(employees) => Sourced::upstream(employees.into_iter().next()),
            Err(e) if self.fallback_enabled && e.is_unavailable() => {
                self.note_fallback(Operation::Get, &e);
                Sourced::fallback(fallback::find(id))
            }
            Err(e) => return Err(e.into()),
        };

        match found.value {
            Some(employee) => Ok(Sourced {
                value: employee,
                source: found.source,
            }),
            None => Err(EmployeeError::NotFound(id)),
        }
    }

    /// Ask upstream to create an employee. Upstream failures read as `FAILURE`.
    pub async fn create(&self, employee: &NewEmployee) -> OperationStatus {
        let envelope = match self.client.create_employee(employee).await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(name = %employee.name, error = %e, "Create failed upstream");
                return OperationStatus::Failure;
            }
        };

        match envelope.status.as_deref().map(str::parse::<OperationStatus>) {
            Some(Ok(status)) => {
                tracing::info!(name = %employee.name, status = %status, "Create processed upstream");
                status
            }
            Some(Err(reason)) => {
                tracing::warn!(name = %employee.name, reason = %reason, "Unrecognized create status");
                OperationStatus::Failure
            }
            None => {
                tracing::warn!(name = %employee.name, "Create response carried no status");
                OperationStatus::Failure
            }
        }
    }

    /// Delete an employee and return the name it had.
    pub async fn delete(&self, id: u64) -> EmployeeResult<String> {
        let employee = self.get_by_id(id).await?.value;

        match self.client.delete_employee(id).await {
            Ok(envelope) if envelope.is_success() => {
                tracing::info!(id, name = %employee.name, "Employee deleted");
                Ok(employee.name)
            }
            Ok(envelope) => {
                tracing::warn!(id, status = ?envelope.status, message = ?envelope.message, "Delete rejected upstream");
                Err(EmployeeError::DeleteFailed(id))
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "Delete failed upstream");
                Err(EmployeeError::DeleteFailed(id))
            }
        }
    }

    fn note_fallback(&self, operation: Operation, error: &UpstreamError) {
        tracing::warn!(
            operation = operation.as_str(),
            error = %error,
            "Upstream unavailable, serving fallback employee data"
        );
        metrics::record_fallback(operation.as_str());
    }
}

/// Keep employees whose name contains `fragment` literally, ignoring case.
pub fn filter_by_name(employees: Vec<Employee>, fragment: &str) -> Vec<Employee> {
    let matcher = match RegexBuilder::new(&regex::escape(fragment))
        .case_insensitive(true)
        .build()
    {
        Ok(matcher) => matcher,
        // Only reachable when the escaped pattern exceeds the regex size limit.
        Err(e) => {
            tracing::warn!(error = %e, "Search fragment rejected");
            return Vec::new();
        }
    };

    employees
        .into_iter()
        .filter(|e| matcher.is_match(&e.name))
        .collect()
}

/// Sort by salary, highest first, keeping input order among equal salaries.
pub fn top_earners(mut employees: Vec<Employee>, limit: usize) -> Vec<Employee> {
    employees.sort_by(|a, b| b.salary.cmp(&a.salary));
    employees.truncate(limit);
    employees
}
