use csvql_core::QueryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

impl CliError {
    /// Process exit status for this failure. Each query error kind has its own
    /// code so scripts can tell them apart.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Query(err) => match err {
                QueryError::Syntax { .. } => 10,
                QueryError::UnexpectedToken(_) => 11,
                QueryError::NotFound(_) => 20,
                QueryError::MalformedSource { .. } => 21,
                QueryError::MissingFrom => 30,
                QueryError::UnknownColumn(_) => 31,
                QueryError::InvalidLimit(_) => 32,
                QueryError::UnsupportedOperator(_) => 33,
            },
            CliError::Config(_) => 40,
            CliError::Io(_) | CliError::Csv(_) | CliError::Json(_) => 74,
        }
    }
}
