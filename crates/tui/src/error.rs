use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures that abort the client outright: bad configuration, a broken
/// terminal, or an unusable session file. API failures never reach this
/// type; the stores turn `ClientError` into display messages instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("terminal error: {0}")]
    Terminal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_failures_convert() {
        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(err.to_string().starts_with("io error:"));
    }

    #[test]
    fn json_failures_convert() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::from(json_err);
        assert!(err.to_string().starts_with("json error:"));
    }
}
