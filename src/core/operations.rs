//! Core operations implementation
//!
//! Typed contact operations on top of a [`QueryExecutor`]. Each method issues
//! exactly one statement; the handlers decide how to combine them.

use crate::core::data::{Contact, ContactDraft, RowSet, Value};
use crate::core::traits::QueryExecutor;
use crate::utils::error::QueryError;

pub const SELECT_ALL_CONTACTS: &str = "SELECT * FROM contacts";

pub const SELECT_CONTACT_BY_ID: &str = "SELECT * FROM contacts WHERE id = $1";

pub const INSERT_CONTACT: &str = "INSERT INTO contacts (first_name, last_name, phone_number, email, address) VALUES ($1, $2, $3, $4, $5)";

pub const UPDATE_CONTACT: &str = "UPDATE contacts SET first_name = $1, last_name = $2, phone_number = $3, email = $4, address = $5 WHERE id = $6";

pub const DELETE_CONTACT: &str = "DELETE FROM contacts WHERE id = $1";

/// Contact operations bound to one executor
pub struct ContactOperations<'a, E: QueryExecutor + ?Sized> {
    executor: &'a mut E,
}

impl<'a, E: QueryExecutor + ?Sized> ContactOperations<'a, E> {
    pub fn new(executor: &'a mut E) -> Self {
        Self { executor }
    }

    /// All contacts ordered by id
    pub async fn list_contacts(&mut self) -> Result<Vec<Contact>, QueryError> {
        let result = self.executor.execute(SELECT_ALL_CONTACTS, &[]).await?;
        let mut contacts = decode_contacts(&result)?;
        contacts.sort_by_key(|c| c.id);
        Ok(contacts)
    }

    pub async fn find_contact(&mut self, id: i32) -> Result<Option<Contact>, QueryError> {
        let result = self
            .executor
            .execute(SELECT_CONTACT_BY_ID, &[Value::from(id)])
            .await?;

        match result.rows.first() {
            Some(row) => Ok(Some(Contact::from_row(row)?)),
            None => Ok(None),
        }
    }

    pub async fn insert_contact(&mut self, draft: &ContactDraft) -> Result<u64, QueryError> {
        let result = self.executor.execute(INSERT_CONTACT, &draft.params()).await?;
        log::debug!("inserted {} contact row(s)", result.row_count);
        Ok(result.row_count)
    }

    pub async fn update_contact(&mut self, id: i32, draft: &ContactDraft) -> Result<u64, QueryError> {
        let mut params = draft.params();
        params.push(Value::from(id));

        let result = self.executor.execute(UPDATE_CONTACT, &params).await?;
        log::debug!("updated contact {} ({} row(s))", id, result.row_count);
        Ok(result.row_count)
    }

    pub async fn delete_contact(&mut self, id: i32) -> Result<u64, QueryError> {
        let result = self
            .executor
            .execute(DELETE_CONTACT, &[Value::from(id)])
            .await?;
        log::debug!("deleted contact {} ({} row(s))", id, result.row_count);
        Ok(result.row_count)
    }
}

fn decode_contacts(result: &RowSet) -> Result<Vec<Contact>, QueryError> {
    result.rows.iter().map(Contact::from_row).collect()
}
