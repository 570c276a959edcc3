mod error;
pub mod operations;
pub mod providers;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod mocks;

pub use error::{CompensationFailure, OperationError, Result};
