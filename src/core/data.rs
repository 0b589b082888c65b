//! Core data structures for contact management
//!
//! This module defines the contact record, the editable draft used by the
//! create and update workflows, and the loosely typed row values exchanged
//! with the query executor.

use std::collections::HashMap;

use crate::utils::error::{AppError, AppResult, QueryError};

/// Text shown in place of a missing or empty address
pub const NO_ADDRESS: &str = "No address provided";

/// Address input that clears the stored address on update
pub const CLEAR_ADDRESS_SENTINEL: &str = "none";

/// A stored contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub address: Option<String>,
}

impl Contact {
    /// Build a contact from a `contacts` row
    pub fn from_row(row: &Row) -> Result<Self, QueryError> {
        let id = row.get_int("id")?;
        let id = i32::try_from(id).map_err(|e| QueryError::Decode {
            column: "id".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            id,
            first_name: row.get_text("first_name")?,
            last_name: row.get_text("last_name")?,
            phone_number: row.get_text("phone_number")?,
            email: row.get_text("email")?,
            address: row.get_opt_text("address")?,
        })
    }

    /// Address for display, falling back to [`NO_ADDRESS`]
    pub fn display_address(&self) -> &str {
        match self.address.as_deref() {
            Some(address) if !address.is_empty() => address,
            _ => NO_ADDRESS,
        }
    }

    /// Editable fields of this contact, used as update defaults
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}

/// The user-editable fields of a contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub address: Option<String>,
}

impl Default for ContactDraft {
    fn default() -> Self {
        Self {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            phone_number: "123-456-7890".to_string(),
            email: "john@example.com".to_string(),
            address: None,
        }
    }
}

impl ContactDraft {
    /// Positional parameters `$1..$5` for insert and update statements
    pub fn params(&self) -> Vec<Value> {
        vec![
            Value::from(self.first_name.as_str()),
            Value::from(self.last_name.as_str()),
            Value::from(self.phone_number.as_str()),
            Value::from(self.email.as_str()),
            Value::from(self.address.clone()),
        ]
    }
}

/// How an update treats the stored address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressPolicy {
    /// Store an empty address
    Clear,
    /// Leave the stored address as is
    Keep,
    Replace(String),
}

impl AddressPolicy {
    pub fn from_input(input: &str) -> Self {
        match input {
            CLEAR_ADDRESS_SENTINEL => AddressPolicy::Clear,
            "" => AddressPolicy::Keep,
            other => AddressPolicy::Replace(other.to_string()),
        }
    }

    pub fn resolve(self, current: Option<String>) -> Option<String> {
        match self {
            AddressPolicy::Clear => Some(String::new()),
            AddressPolicy::Keep => current,
            AddressPolicy::Replace(address) => Some(address),
        }
    }
}

/// Validate a contact id typed by the user
pub fn parse_contact_id(input: &str) -> AppResult<i32> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::Validation("Contact ID needs to be an integer.".to_string()))
}

/// A bound parameter or a decoded column value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        v.map_or(Value::Null, Value::Text)
    }
}

/// One result row, keyed by column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.columns.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    fn require(&self, column: &str) -> Result<&Value, QueryError> {
        self.get(column)
            .ok_or_else(|| QueryError::MissingColumn(column.to_string()))
    }

    pub fn get_int(&self, column: &str) -> Result<i64, QueryError> {
        match self.require(column)? {
            Value::Int(i) => Ok(*i),
            other => Err(type_mismatch(column, "integer", other)),
        }
    }

    pub fn get_text(&self, column: &str) -> Result<String, QueryError> {
        match self.require(column)? {
            Value::Text(s) => Ok(s.clone()),
            other => Err(type_mismatch(column, "text", other)),
        }
    }

    pub fn get_opt_text(&self, column: &str) -> Result<Option<String>, QueryError> {
        match self.require(column)? {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.clone())),
            other => Err(type_mismatch(column, "text or NULL", other)),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn type_mismatch(column: &str, expected: &str, found: &Value) -> QueryError {
    QueryError::Decode {
        column: column.to_string(),
        reason: format!("expected {}, found {:?}", expected, found),
    }
}

/// Rows returned by a statement, plus the affected row count for mutations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub rows: Vec<Row>,
    pub row_count: u64,
}
