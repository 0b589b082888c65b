//! Core trait definitions
//!
//! The two seams of the application: the store the handlers query and the
//! console they talk to.

use async_trait::async_trait;

use crate::core::data::{RowSet, Value};
use crate::utils::error::{AppResult, QueryError};

/// Executes parameterized SQL against the contact store
///
/// Parameters are bound positionally (`$1`, `$2`, ...) and never spliced into
/// the statement text. Callers await each statement before issuing the next.
#[async_trait]
pub trait QueryExecutor {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<RowSet, QueryError>;
}

/// Line-oriented user interaction
pub trait Console {
    /// Ask for free text. Empty input yields `default` when one is given.
    fn input(&mut self, message: &str, default: Option<&str>) -> AppResult<String>;

    /// Ask for one of `choices`, returning its index
    fn select(&mut self, message: &str, choices: &[&str], default: usize) -> AppResult<usize>;

    fn clear(&mut self) -> AppResult<()>;
}
