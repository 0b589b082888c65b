//! contact-manager - an interactive terminal contact manager
//!
//! This library provides the contact model, the query layer over PostgreSQL,
//! and the menu-driven workflows that create, list, update and delete contacts.

pub mod cli;
pub mod config;
pub mod core;
pub mod manager;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export core types and traits for easier use
pub use crate::core::{
    data::{AddressPolicy, Contact, ContactDraft, Row, RowSet, Value},
    operations::ContactOperations,
    traits::{Console, QueryExecutor},
};
pub use storage::Database;
pub use utils::error::{AppError, AppResult, QueryError};

/// An interactive session: the store it talks to and the console it reads from
pub struct ContactManager<E, C> {
    executor: E,
    console: C,
}

impl<E: QueryExecutor, C: Console> ContactManager<E, C> {
    pub fn new(executor: E, console: C) -> Self {
        Self { executor, console }
    }

    /// Print the banner once, then run the menu until the user exits
    pub async fn run(&mut self) -> AppResult<()> {
        utils::output::print_banner()?;
        manager::run_menu(&mut self.executor, &mut self.console).await
    }

    /// Give back the executor so the caller can close it
    pub fn into_executor(self) -> E {
        self.executor
    }
}
