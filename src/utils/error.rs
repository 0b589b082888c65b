use crate::core::data::Contact;
use crate::utils::output::{format_contact, OutputStyle};
use thiserror::Error;

/// Failures raised by the query layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("database error: {0}")]
    Database(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("cannot decode column '{column}': {reason}")]
    Decode { column: String, reason: String },

    #[error("missing column '{0}' in result row")]
    MissingColumn(String),
}

impl From<sqlx::Error> for QueryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => QueryError::Database(db_err.message().to_string()),
            sqlx::Error::Io(e) => QueryError::Connection(e.to_string()),
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
                QueryError::Connection(err.to_string())
            }
            sqlx::Error::ColumnDecode { index, source } => QueryError::Decode {
                column: index,
                reason: source.to_string(),
            },
            _ => QueryError::Database(err.to_string()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("{0}")]
    Validation(String),

    #[error("Contact {0} not found")]
    NotFound(i32),

    /// A query failed while running the named workflow.
    #[error("Error {action}: {source}")]
    Query {
        action: &'static str,
        #[source]
        source: QueryError,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl AppError {
    pub fn query(action: &'static str, source: QueryError) -> Self {
        AppError::Query { action, source }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

/// Non-error outcome of one menu action, rendered by [`handle_flow`].
#[derive(Debug, Clone, PartialEq)]
pub enum FlowResult {
    Contacts(Vec<Contact>),
    EmptyList,
    Success(String),
}

/// User-facing text for a failed menu action
pub fn format_error(err: &AppError) -> String {
    match err {
        AppError::Validation(msg) => format!("\n{}\n", OutputStyle::error(msg)),
        AppError::NotFound(_) => format!("\n{}\n", OutputStyle::error("Contact not found.")),
        AppError::Query { .. } => OutputStyle::error(&err.to_string()).to_string(),
        AppError::Connection(msg) => {
            format!("❌ {}", OutputStyle::error(&format!("Connection: {}", msg)))
        }
        AppError::Config(msg) | AppError::Io(msg) => format!("❌ {}", OutputStyle::error(msg)),
    }
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::Validation(_) | AppError::NotFound(_) => println!("{}", format_error(err)),
        AppError::Query { .. } | AppError::Connection(_) => {
            log::error!("{}", err);
            eprintln!("{}", format_error(err));
        }
        AppError::Config(_) | AppError::Io(_) => eprintln!("{}", format_error(err)),
    }
}

/// User-facing text for a completed menu action, ending in a newline
pub fn format_flow(flow: &FlowResult) -> String {
    match flow {
        FlowResult::Contacts(contacts) => {
            let mut out = String::from("Contacts:\n\n");
            for contact in contacts {
                out.push_str(&format_contact(contact));
                out.push('\n');
            }
            out
        }
        FlowResult::EmptyList => format!("{}\n", OutputStyle::info("There are no contacts.\n")),
        FlowResult::Success(msg) => format!("\n{}\n\n", OutputStyle::info(msg)),
    }
}

pub fn handle_flow(flow: FlowResult) {
    print!("{}", format_flow(&flow));
}
