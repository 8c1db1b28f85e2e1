use thiserror::Error;

#[derive(Debug, Error)]
pub enum LojaApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid REST request: {0}")]
    RestRequestError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),
    #[error("Could not access snapshot file. {0}")]
    Io(#[from] std::io::Error),
}
