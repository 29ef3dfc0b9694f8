use crate::config::ConfigError;
use crate::datasource::DataSourceError;
use crate::export::ExportError;
use crate::orchestration::FetchError;
use thiserror::Error;

/// Run-level failure. Every variant aborts the run with a non-zero exit.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<DataSourceError> for AppError {
    fn from(err: DataSourceError) -> Self {
        if err.is_transport() {
            AppError::Transport(err.to_string())
        } else {
            AppError::Api(err.to_string())
        }
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        match &err {
            FetchError::DataSource { source, .. } if source.is_transport() => {
                AppError::Transport(err.to_string())
            }
            _ => AppError::Api(err.to_string()),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Io(err.to_string())
    }
}
