//! Employee domain subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → input.rs (normalize creation payloads into NewEmployee)
//!     → repository.rs (upstream call, fallback, search/rank/aggregate)
//!     → fallback.rs (static dataset when upstream reads fail)
//!     → model.rs (Employee, OperationStatus, Sourced<T>)
//! ```

pub mod fallback;
pub mod input;
pub mod model;
pub mod repository;

pub use input::InputError;
pub use model::{DataSource, Employee, NewEmployee, OperationStatus, Sourced};
pub use repository::{EmployeeError, EmployeeRepository, EmployeeResult};
