use thiserror::Error;

/// Failure of a single upstream retrieval tier.
///
/// Never escapes [`Resolver::resolve`](crate::resolver::Resolver::resolve):
/// every variant advances to the next tier or to the offline set.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: String },

    #[error("unexpected HTTP status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("upstream error {code}: {message}")]
    Upstream { code: String, message: String },

    #[error("JSON deserialization error for {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Failure to load the YAML configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
