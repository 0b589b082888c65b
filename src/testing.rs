//! Test doubles for the executor and console seams

use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;

use crate::core::data::{Contact, ContactDraft, Row, RowSet, Value};
use crate::core::operations::{
    DELETE_CONTACT, INSERT_CONTACT, SELECT_ALL_CONTACTS, SELECT_CONTACT_BY_ID, UPDATE_CONTACT,
};
use crate::core::traits::{Console, QueryExecutor};
use crate::utils::error::{AppError, AppResult, QueryError};

/// In-memory `contacts` table that understands the statements the
/// application issues and records every call.
#[derive(Debug, Default)]
pub struct MemoryExecutor {
    contacts: BTreeMap<i32, Contact>,
    next_id: i32,
    statements: Vec<(String, Vec<Value>)>,
    failure: Option<String>,
}

impl MemoryExecutor {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    pub fn seed(&mut self, id: i32, draft: &ContactDraft) {
        self.contacts.insert(id, contact(id, draft));
        self.next_id = self.next_id.max(id + 1);
    }

    /// Make every following statement fail with a database error
    pub fn fail_with(&mut self, message: &str) {
        self.failure = Some(message.to_string());
    }

    pub fn statements(&self) -> &[(String, Vec<Value>)] {
        &self.statements
    }

    pub fn issued(&self, sql: &str) -> usize {
        self.statements.iter().filter(|(s, _)| s == sql).count()
    }

    pub fn contact(&self, id: i32) -> Option<&Contact> {
        self.contacts.get(&id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    fn run(&mut self, sql: &str, params: &[Value]) -> Result<RowSet, QueryError> {
        match sql {
            SELECT_ALL_CONTACTS => Ok(rows(self.contacts.values().rev())),
            SELECT_CONTACT_BY_ID => {
                let id = int_param(params, 0)?;
                Ok(rows(self.contacts.get(&id)))
            }
            INSERT_CONTACT => {
                let id = self.next_id;
                self.next_id += 1;
                self.contacts.insert(id, contact(id, &draft_params(params)?));
                Ok(affected(1))
            }
            UPDATE_CONTACT => {
                let id = int_param(params, 5)?;
                let draft = draft_params(params)?;
                match self.contacts.get_mut(&id) {
                    Some(existing) => {
                        *existing = contact(id, &draft);
                        Ok(affected(1))
                    }
                    None => Ok(affected(0)),
                }
            }
            DELETE_CONTACT => {
                let id = int_param(params, 0)?;
                Ok(affected(self.contacts.remove(&id).map_or(0, |_| 1)))
            }
            other => Err(QueryError::Database(format!("unexpected statement: {}", other))),
        }
    }
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<RowSet, QueryError> {
        self.statements.push((sql.to_string(), params.to_vec()));
        if let Some(message) = &self.failure {
            return Err(QueryError::Database(message.clone()));
        }
        self.run(sql, params)
    }
}

fn contact(id: i32, draft: &ContactDraft) -> Contact {
    Contact {
        id,
        first_name: draft.first_name.clone(),
        last_name: draft.last_name.clone(),
        phone_number: draft.phone_number.clone(),
        email: draft.email.clone(),
        address: draft.address.clone(),
    }
}

fn rows<'a>(contacts: impl IntoIterator<Item = &'a Contact>) -> RowSet {
    let rows: Vec<Row> = contacts
        .into_iter()
        .map(|c| {
            Row::from_iter([
                ("id", Value::from(c.id)),
                ("first_name", Value::from(c.first_name.as_str())),
                ("last_name", Value::from(c.last_name.as_str())),
                ("phone_number", Value::from(c.phone_number.as_str())),
                ("email", Value::from(c.email.as_str())),
                ("address", Value::from(c.address.clone())),
            ])
        })
        .collect();
    let row_count = rows.len() as u64;
    RowSet { rows, row_count }
}

fn affected(row_count: u64) -> RowSet {
    RowSet {
        rows: Vec::new(),
        row_count,
    }
}

fn int_param(params: &[Value], index: usize) -> Result<i32, QueryError> {
    match params.get(index) {
        Some(Value::Int(i)) => i32::try_from(*i).map_err(|e| QueryError::Database(e.to_string())),
        other => Err(QueryError::Database(format!(
            "parameter ${} is not an integer: {:?}",
            index + 1,
            other
        ))),
    }
}

fn text_param(params: &[Value], index: usize) -> Result<String, QueryError> {
    match params.get(index) {
        Some(Value::Text(s)) => Ok(s.clone()),
        other => Err(QueryError::Database(format!(
            "parameter ${} is not text: {:?}",
            index + 1,
            other
        ))),
    }
}

fn draft_params(params: &[Value]) -> Result<ContactDraft, QueryError> {
    let address = match params.get(4) {
        Some(Value::Null) => None,
        _ => Some(text_param(params, 4)?),
    };

    Ok(ContactDraft {
        first_name: text_param(params, 0)?,
        last_name: text_param(params, 1)?,
        phone_number: text_param(params, 2)?,
        email: text_param(params, 3)?,
        address,
    })
}

/// Console fed from a queue of answers.
///
/// Free-text answers follow the real console: empty input falls back to the
/// prompt's default. Selections are given as choice labels.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub clears: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self) -> AppResult<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| AppError::Io("no scripted answer left".to_string()))
    }
}

impl Console for ScriptedConsole {
    fn input(&mut self, message: &str, default: Option<&str>) -> AppResult<String> {
        self.prompts.push(message.to_string());
        let answer = self.next_answer()?;
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn select(&mut self, message: &str, choices: &[&str], default: usize) -> AppResult<usize> {
        self.prompts.push(message.to_string());
        let answer = self.next_answer()?;
        if answer.is_empty() {
            return Ok(default);
        }
        choices
            .iter()
            .position(|c| *c == answer)
            .ok_or_else(|| AppError::Io(format!("no such choice: {}", answer)))
    }

    fn clear(&mut self) -> AppResult<()> {
        self.clears += 1;
        Ok(())
    }
}
