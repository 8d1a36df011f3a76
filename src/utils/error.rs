use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    /// One request attempt failed: network error, non-2xx status, timeout,
    /// or an unparseable body. Retried by the fetcher.
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("giving up on {url} after {attempts} attempts: {source}")]
    FetchExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<EtlError>,
    },

    #[error("could not discover total page count: {source}")]
    DiscoveryFailure {
        #[source]
        source: Box<EtlError>,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Persistence failed: {message}")]
    PersistenceError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, EtlError>;
